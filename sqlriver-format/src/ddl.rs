//! DDL layout: CREATE TABLE element alignment, ALTER TABLE action
//! lists, CREATE VIEW / INDEX and DROP.

#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use itertools::Itertools;
use sqlriver_ast::{
    expression::Expr,
    statement::{
        AlterColumnChange, AlterTableAction, AlterTableStmt, ColumnConstraint, ColumnDef,
        CreateIndexStmt, CreateTableStmt, CreateViewStmt, DropStmt, IndexDef, TableConstraint,
        TableConstraintDef, TableElementKind,
    },
};
use sqlriver_core::Dialect;

use crate::Fmt;

impl<'a, D: Dialect> Fmt<'a, D> {
    // ------------------------------------------------------------------
    // CREATE TABLE
    // ------------------------------------------------------------------

    pub(crate) fn emit_create_table(&mut self, create: &CreateTableStmt, base: usize) {
        self.p.push(&self.kw("CREATE"));
        if create.or_replace {
            self.p.push(" ");
            self.p.push(&self.kw("OR REPLACE"));
        }
        if let Some(temporary) = &create.temporary {
            self.p.push(" ");
            self.p.push(&self.kw(&temporary.to_uppercase()));
        }
        self.p.push(" ");
        self.p.push(&self.kw("TABLE"));
        if create.if_not_exists {
            self.p.push(" ");
            self.p.push(&self.kw("IF NOT EXISTS"));
        }
        self.p.push(" ");
        let name = self.object_name(&create.name);
        self.p.push(&name);
        if !create.elements.is_empty() {
            self.p.push(" (");
            self.emit_table_elements(create, base);
            self.p.newline();
            self.p.pad_to(base);
            self.p.push(")");
        }
        if !create.options.is_empty() {
            self.p.push(" ");
            self.emit_token_run(&create.options, base);
        }
        if let Some(query) = &create.query {
            self.p.push(" ");
            self.p.push(&self.kw("AS"));
            self.p.newline();
            self.p.pad_to(base);
            self.emit_query(query, base);
        }
    }

    /// The element list. Column names, types and constraint heads align
    /// into three padded columns; unnamed table constraints start at the
    /// table-constraint column so they sit under the column bodies.
    fn emit_table_elements(&mut self, create: &CreateTableStmt, base: usize) {
        let indent = base + self.options.indent;
        let name_width = create
            .elements
            .iter()
            .filter_map(|e| match &e.kind {
                TableElementKind::Column(column) => {
                    Some(self.ident(&column.name).chars().count())
                }
                _ => None,
            })
            .max()
            .unwrap_or(0);
        let type_width = create
            .elements
            .iter()
            .filter_map(|e| match &e.kind {
                TableElementKind::Column(column) => {
                    Some(self.data_type_str(&column.data_type).chars().count())
                }
                _ => None,
            })
            .max()
            .unwrap_or(0);
        let constraint_col = indent + name_width + 1;
        let last = create.elements.len().saturating_sub(1);
        for (i, element) in create.elements.iter().enumerate() {
            self.p.newline();
            self.emit_own_line_comments(element.span.start, indent);
            self.p.pad_to(indent);
            match &element.kind {
                TableElementKind::Column(column) => {
                    self.emit_column_def(column, indent, name_width, type_width)
                }
                TableElementKind::Constraint(constraint) => {
                    self.emit_table_constraint(constraint, indent, constraint_col)
                }
                TableElementKind::Index(index) => {
                    self.p.pad_to(constraint_col);
                    let index = self.index_def_str(index);
                    self.p.push(&index);
                }
                TableElementKind::Like(name) => {
                    let name = self.object_name(name);
                    self.p.push(&self.kw("LIKE"));
                    self.p.push(" ");
                    self.p.push(&name);
                }
            }
            if i < last || create.trailing_comma {
                self.p.push(",");
            }
            let limit = create
                .elements
                .get(i + 1)
                .map(|next| next.span.start)
                .unwrap_or(element.span.end + 1);
            self.emit_inline_comments(limit);
        }
    }

    fn emit_column_def(
        &mut self,
        column: &ColumnDef,
        indent: usize,
        name_width: usize,
        type_width: usize,
    ) {
        let name = self.ident(&column.name);
        self.p.push(&name);
        self.p.pad_to(indent + name_width + 1);
        let data_type = self.data_type_str(&column.data_type);
        self.p.push(&data_type);
        if !column.constraints.is_empty() {
            self.p.pad_to(indent + name_width + 1 + type_width + 1);
            let constraints = column
                .constraints
                .iter()
                .map(|c| self.column_constraint_str(c))
                .join(" ");
            self.p.push(&constraints);
        }
    }

    pub(crate) fn column_constraint_str(&self, constraint: &ColumnConstraint) -> String {
        match constraint {
            ColumnConstraint::Null => self.kw("NULL"),
            ColumnConstraint::NotNull => self.kw("NOT NULL"),
            ColumnConstraint::Default(expr) => {
                format!("{} {}", self.kw("DEFAULT"), self.expr_str(expr))
            }
            ColumnConstraint::PrimaryKey => self.kw("PRIMARY KEY"),
            ColumnConstraint::Unique => self.kw("UNIQUE"),
            ColumnConstraint::Check(expr) => {
                format!("{} ({})", self.kw("CHECK"), self.expr_str(expr))
            }
            ColumnConstraint::References {
                table,
                columns,
                actions,
            } => {
                let mut out = format!("{} {}", self.kw("REFERENCES"), self.object_name(table));
                if !columns.is_empty() {
                    out.push_str(&format!(
                        " ({})",
                        columns.iter().map(|c| self.ident(c)).join(", ")
                    ));
                }
                if !actions.is_empty() {
                    out.push(' ');
                    out.push_str(&self.token_run_str(actions));
                }
                out
            }
            ColumnConstraint::Collate(name) => {
                format!("{} {}", self.kw("COLLATE"), self.object_name(name))
            }
            ColumnConstraint::Named { name, inner } => format!(
                "{} {} {}",
                self.kw("CONSTRAINT"),
                self.ident(name),
                self.column_constraint_str(inner)
            ),
            ColumnConstraint::Verbatim(tokens) => self.token_run_str(tokens),
        }
    }

    /// Renders a verbatim token run to a string with the generic spacing
    /// rules.
    pub(crate) fn token_run_str(&self, tokens: &[sqlriver_core::Token]) -> String {
        use sqlriver_core::TokenKind;
        let mut out = String::new();
        let mut prev: Option<&sqlriver_core::Token> = None;
        for token in tokens {
            let glue = matches!(token.kind, TokenKind::Punct(',' | ';' | ')' | ']' | '.'))
                || token.is_op("::")
                || (token.is_punct('(')
                    && prev.is_some_and(|p| {
                        matches!(p.kind, TokenKind::Ident | TokenKind::QuotedIdent(_))
                    }))
                || prev.is_some_and(|p| {
                    matches!(p.kind, TokenKind::Punct('(' | '[' | '.')) || p.is_op("::")
                });
            if !out.is_empty() && !glue {
                out.push(' ');
            }
            out.push_str(&self.token_text(token));
            prev = Some(token);
        }
        out
    }

    /// Named table constraints wrap: name on one line, body indented.
    /// Unnamed ones start at the table-constraint column.
    fn emit_table_constraint(
        &mut self,
        constraint: &TableConstraintDef,
        indent: usize,
        constraint_col: usize,
    ) {
        match &constraint.name {
            Some(name) => {
                self.p.push(&self.kw("CONSTRAINT"));
                self.p.push(" ");
                let name = self.ident(name);
                self.p.push(&name);
                self.p.newline();
                self.p.pad_to(indent + self.options.indent);
                self.emit_table_constraint_body(&constraint.constraint);
            }
            None => {
                self.p.pad_to(constraint_col);
                self.emit_table_constraint_body(&constraint.constraint);
            }
        }
    }

    fn emit_table_constraint_body(&mut self, constraint: &TableConstraint) {
        match constraint {
            TableConstraint::PrimaryKey(columns) => {
                let cols = columns.iter().map(|c| self.ident(c)).join(", ");
                self.p.push(&self.kw("PRIMARY KEY"));
                self.p.push(&format!(" ({})", cols));
            }
            TableConstraint::Unique(columns) => {
                let cols = columns.iter().map(|c| self.ident(c)).join(", ");
                self.p.push(&self.kw("UNIQUE"));
                self.p.push(&format!(" ({})", cols));
            }
            TableConstraint::Check(expr) => self.emit_check_constraint(expr),
            TableConstraint::ForeignKey {
                columns,
                table,
                referenced_columns,
                actions,
            } => {
                let cols = columns.iter().map(|c| self.ident(c)).join(", ");
                self.p.push(&self.kw("FOREIGN KEY"));
                self.p.push(&format!(" ({}) ", cols));
                self.p.push(&self.kw("REFERENCES"));
                self.p.push(" ");
                let table = self.object_name(table);
                self.p.push(&table);
                if !referenced_columns.is_empty() {
                    let cols = referenced_columns.iter().map(|c| self.ident(c)).join(", ");
                    self.p.push(&format!(" ({})", cols));
                }
                if !actions.is_empty() {
                    self.p.push(" ");
                    let actions = self.token_run_str(actions);
                    self.p.push(&actions);
                }
            }
            TableConstraint::Exclude(tokens) => {
                self.p.push(&self.kw("EXCLUDE"));
                self.p.push(" ");
                let tokens = self.token_run_str(tokens);
                self.p.push(&tokens);
            }
        }
    }

    /// A CHECK whose IN list forces wrapping puts each value on its own
    /// line, aligned under the opening paren of the list.
    fn emit_check_constraint(&mut self, expr: &Expr) {
        let inline = format!("{} ({})", self.kw("CHECK"), self.expr_str(expr));
        if self.fits(inline.chars().count()) {
            self.p.push(&inline);
            return;
        }
        if let Expr::InList {
            expr: tested,
            negated,
            list,
        } = expr
        {
            self.p.push(&self.kw("CHECK"));
            self.p.push(" (");
            let tested = self.expr_str(tested);
            self.p.push(&tested);
            self.p.push(" ");
            if *negated {
                self.p.push(&self.kw("NOT"));
                self.p.push(" ");
            }
            self.p.push(&self.kw("IN"));
            self.p.push(" (");
            let value_col = self.p.col();
            for (i, value) in list.iter().enumerate() {
                if i > 0 {
                    self.p.push(",");
                    self.p.newline();
                    self.p.pad_to(value_col);
                }
                let value = self.expr_str(value);
                self.p.push(&value);
            }
            self.p.push("))");
            return;
        }
        self.p.push(&inline);
    }

    fn index_def_str(&self, index: &IndexDef) -> String {
        let mut out = String::new();
        if let Some(prefix) = &index.prefix {
            out.push_str(&self.kw(prefix));
            out.push(' ');
        }
        out.push_str(&self.kw(&index.keyword.to_uppercase()));
        if let Some(name) = &index.name {
            out.push(' ');
            out.push_str(&self.ident(name));
        }
        out.push_str(&format!(
            " ({})",
            index.columns.iter().map(|c| self.ident(c)).join(", ")
        ));
        out
    }

    // ------------------------------------------------------------------
    // ALTER TABLE
    // ------------------------------------------------------------------

    pub(crate) fn emit_alter_table(&mut self, alter: &AlterTableStmt, base: usize) {
        self.p.push(&self.kw("ALTER TABLE"));
        if alter.if_exists {
            self.p.push(" ");
            self.p.push(&self.kw("IF EXISTS"));
        }
        if alter.only {
            self.p.push(" ");
            self.p.push(&self.kw("ONLY"));
        }
        self.p.push(" ");
        let name = self.object_name(&alter.name);
        self.p.push(&name);
        let rendered: Vec<String> = alter
            .actions
            .iter()
            .map(|action| self.alter_action_str(action))
            .collect();
        if rendered.len() == 1 && self.fits(rendered[0].chars().count() + 1) {
            self.p.push(" ");
            self.p.push(&rendered[0]);
            return;
        }
        // Multiple comma-separated actions stay grouped under the one
        // statement, one action per line.
        let indent = base + self.options.indent;
        let last = rendered.len().saturating_sub(1);
        for (i, action) in rendered.iter().enumerate() {
            self.p.newline();
            self.p.pad_to(indent);
            self.p.push(action);
            if i < last {
                self.p.push(",");
            }
        }
    }

    fn alter_action_str(&self, action: &AlterTableAction) -> String {
        match action {
            AlterTableAction::AddColumn {
                explicit_column,
                column,
            } => {
                let mut out = self.kw("ADD");
                if *explicit_column {
                    out.push(' ');
                    out.push_str(&self.kw("COLUMN"));
                }
                out.push(' ');
                out.push_str(&self.column_def_str(column));
                out
            }
            AlterTableAction::AddConstraint(constraint) => {
                format!("{} {}", self.kw("ADD"), self.table_constraint_str(constraint))
            }
            AlterTableAction::AddIndex(index) => {
                format!("{} {}", self.kw("ADD"), self.index_def_str(index))
            }
            AlterTableAction::DropColumn {
                explicit_column,
                name,
                behavior,
            } => {
                let mut out = self.kw("DROP");
                if *explicit_column {
                    out.push(' ');
                    out.push_str(&self.kw("COLUMN"));
                }
                out.push(' ');
                out.push_str(&self.ident(name));
                if let Some(behavior) = behavior {
                    out.push(' ');
                    out.push_str(&self.kw(behavior));
                }
                out
            }
            AlterTableAction::DropConstraint(name) => {
                format!("{} {}", self.kw("DROP CONSTRAINT"), self.ident(name))
            }
            AlterTableAction::AlterColumn { name, change } => {
                let change = match change {
                    AlterColumnChange::SetDefault(expr) => {
                        format!("{} {}", self.kw("SET DEFAULT"), self.expr_str(expr))
                    }
                    AlterColumnChange::DropDefault => self.kw("DROP DEFAULT"),
                    AlterColumnChange::SetType { data_type, using } => {
                        let mut out =
                            format!("{} {}", self.kw("TYPE"), self.data_type_str(data_type));
                        if let Some(using) = using {
                            out.push(' ');
                            out.push_str(&self.kw("USING"));
                            out.push(' ');
                            out.push_str(&self.expr_str(using));
                        }
                        out
                    }
                    AlterColumnChange::SetNotNull => self.kw("SET NOT NULL"),
                    AlterColumnChange::DropNotNull => self.kw("DROP NOT NULL"),
                };
                format!(
                    "{} {} {}",
                    self.kw("ALTER COLUMN"),
                    self.ident(name),
                    change
                )
            }
            AlterTableAction::ModifyColumn(column) => {
                format!("{} {}", self.kw("MODIFY"), self.column_def_str(column))
            }
            AlterTableAction::OwnerTo(name) => {
                format!("{} {}", self.kw("OWNER TO"), self.ident(name))
            }
            AlterTableAction::SetSchema(name) => {
                format!("{} {}", self.kw("SET SCHEMA"), self.ident(name))
            }
            AlterTableAction::RenameTo(name) => {
                format!("{} {}", self.kw("RENAME TO"), self.ident(name))
            }
            AlterTableAction::Verbatim(tokens) => self.token_run_str(tokens),
        }
    }

    fn column_def_str(&self, column: &ColumnDef) -> String {
        let mut out = format!(
            "{} {}",
            self.ident(&column.name),
            self.data_type_str(&column.data_type)
        );
        for constraint in &column.constraints {
            out.push(' ');
            out.push_str(&self.column_constraint_str(constraint));
        }
        out
    }

    fn table_constraint_str(&self, constraint: &TableConstraintDef) -> String {
        let mut out = String::new();
        if let Some(name) = &constraint.name {
            out.push_str(&self.kw("CONSTRAINT"));
            out.push(' ');
            out.push_str(&self.ident(name));
            out.push(' ');
        }
        match &constraint.constraint {
            TableConstraint::PrimaryKey(columns) => {
                out.push_str(&self.kw("PRIMARY KEY"));
                out.push_str(&format!(
                    " ({})",
                    columns.iter().map(|c| self.ident(c)).join(", ")
                ));
            }
            TableConstraint::Unique(columns) => {
                out.push_str(&self.kw("UNIQUE"));
                out.push_str(&format!(
                    " ({})",
                    columns.iter().map(|c| self.ident(c)).join(", ")
                ));
            }
            TableConstraint::Check(expr) => {
                out.push_str(&format!("{} ({})", self.kw("CHECK"), self.expr_str(expr)));
            }
            TableConstraint::ForeignKey {
                columns,
                table,
                referenced_columns,
                actions,
            } => {
                out.push_str(&self.kw("FOREIGN KEY"));
                out.push_str(&format!(
                    " ({}) ",
                    columns.iter().map(|c| self.ident(c)).join(", ")
                ));
                out.push_str(&self.kw("REFERENCES"));
                out.push(' ');
                out.push_str(&self.object_name(table));
                if !referenced_columns.is_empty() {
                    out.push_str(&format!(
                        " ({})",
                        referenced_columns.iter().map(|c| self.ident(c)).join(", ")
                    ));
                }
                if !actions.is_empty() {
                    out.push(' ');
                    out.push_str(&self.token_run_str(actions));
                }
            }
            TableConstraint::Exclude(tokens) => {
                out.push_str(&self.kw("EXCLUDE"));
                out.push(' ');
                out.push_str(&self.token_run_str(tokens));
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // CREATE VIEW / INDEX, DROP
    // ------------------------------------------------------------------

    pub(crate) fn emit_create_view(&mut self, view: &CreateViewStmt, base: usize) {
        self.p.push(&self.kw("CREATE"));
        if view.or_replace {
            self.p.push(" ");
            self.p.push(&self.kw("OR REPLACE"));
        }
        if view.materialized {
            self.p.push(" ");
            self.p.push(&self.kw("MATERIALIZED"));
        }
        self.p.push(" ");
        self.p.push(&self.kw("VIEW"));
        if view.if_not_exists {
            self.p.push(" ");
            self.p.push(&self.kw("IF NOT EXISTS"));
        }
        self.p.push(" ");
        let name = self.object_name(&view.name);
        self.p.push(&name);
        if !view.columns.is_empty() {
            let cols = view.columns.iter().map(|c| self.ident(c)).join(", ");
            self.p.push(&format!(" ({})", cols));
        }
        self.p.push(" ");
        self.p.push(&self.kw("AS"));
        self.p.newline();
        self.p.pad_to(base);
        self.emit_query(&view.query, base);
    }

    pub(crate) fn emit_create_index(&mut self, index: &CreateIndexStmt, base: usize) {
        self.p.push(&self.kw("CREATE"));
        if index.unique {
            self.p.push(" ");
            self.p.push(&self.kw("UNIQUE"));
        }
        self.p.push(" ");
        self.p.push(&self.kw("INDEX"));
        if index.concurrently {
            self.p.push(" ");
            self.p.push(&self.kw("CONCURRENTLY"));
        }
        if index.if_not_exists {
            self.p.push(" ");
            self.p.push(&self.kw("IF NOT EXISTS"));
        }
        if let Some(name) = &index.name {
            self.p.push(" ");
            let name = self.object_name(name);
            self.p.push(&name);
        }
        self.p.push(" ");
        self.p.push(&self.kw("ON"));
        self.p.push(" ");
        let table = self.object_name(&index.table);
        self.p.push(&table);
        if let Some(using) = &index.using {
            self.p.push(" ");
            self.p.push(&self.kw("USING"));
            self.p.push(" ");
            let using = self.ident(using);
            self.p.push(&using);
        }
        let cols = self.order_by_str(&index.columns);
        self.p.push(&format!(" ({})", cols));
        if !index.tail.is_empty() {
            self.p.push(" ");
            self.emit_token_run(&index.tail, base);
        }
    }

    pub(crate) fn emit_drop(&mut self, drop: &DropStmt, _base: usize) {
        self.p.push(&self.kw("DROP"));
        for word in &drop.object_kind {
            self.p.push(" ");
            self.p.push(&self.kw(word));
        }
        if drop.if_exists {
            self.p.push(" ");
            self.p.push(&self.kw("IF EXISTS"));
        }
        self.p.push(" ");
        let names = drop.names.iter().map(|n| self.object_name(n)).join(", ");
        self.p.push(&names);
        if let Some(behavior) = &drop.behavior {
            self.p.push(" ");
            self.p.push(&self.kw(behavior));
        }
    }
}
