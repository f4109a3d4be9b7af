//! DML statement layout (INSERT / UPDATE / DELETE / MERGE) and the
//! procedural constructs (blocks, T-SQL IF, routine bodies).

#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use itertools::Itertools;
use sqlriver_ast::{
    expression::SelectItem,
    statement::{
        Assignment, AssignmentTarget, BlockStmt, CreateRoutineStmt, DeleteStmt, InsertSource,
        InsertStmt, MergeAction, MergeStmt, OnConflictAction, Stmt, TsqlIfStmt, UpdateStmt,
    },
};
use sqlriver_core::Dialect;

use crate::{Fmt, RIVER};

impl<'a, D: Dialect> Fmt<'a, D> {
    // ------------------------------------------------------------------
    // INSERT
    // ------------------------------------------------------------------

    pub(crate) fn emit_insert(&mut self, insert: &InsertStmt, base: usize) {
        self.p.push(&self.kw("INSERT"));
        if let Some(or_conflict) = &insert.or_conflict {
            self.p.push(" ");
            self.p.push(&self.kw("OR"));
            self.p.push(" ");
            self.p.push(&self.kw(or_conflict.as_str()));
        }
        self.p.push(" ");
        self.p.push(&self.kw("INTO"));
        self.p.push(" ");
        let table = self.object_name(&insert.table);
        self.p.push(&table);
        if let Some(alias) = &insert.alias {
            self.p.push(" ");
            self.p.push(&self.kw("AS"));
            self.p.push(" ");
            let alias = self.ident(alias);
            self.p.push(&alias);
        }
        if !insert.columns.is_empty() {
            // Long inline column lists prefer the one-line form even when
            // the source was multi-line.
            let cols = insert.columns.iter().map(|c| self.ident(c)).join(", ");
            if self.fits(cols.chars().count() + 3) {
                self.p.push(&format!(" ({})", cols));
            } else {
                self.p.push(" (");
                let col = self.p.col();
                for (i, column) in insert.columns.iter().enumerate() {
                    if i > 0 {
                        self.p.push(",");
                        self.p.newline();
                        self.p.pad_to(col);
                    }
                    let column = self.ident(column);
                    self.p.push(&column);
                }
                self.p.push(")");
            }
        }
        if let Some(system) = insert.overriding_system {
            self.p.push(" ");
            self.p.push(&self.kw(if system {
                "OVERRIDING SYSTEM VALUE"
            } else {
                "OVERRIDING USER VALUE"
            }));
        }
        match &insert.source {
            InsertSource::DefaultValues => {
                self.p.push(" ");
                self.p.push(&self.kw("DEFAULT VALUES"));
            }
            InsertSource::Values(values) => {
                self.p.newline();
                self.emit_values(values, base);
            }
            InsertSource::Query(query) => {
                self.p.newline();
                self.p.pad_to(base);
                self.emit_query(query, base);
            }
        }
        if let Some(on_conflict) = &insert.on_conflict {
            self.clause(base, "ON CONFLICT");
            if !on_conflict.target.is_empty() {
                let target = on_conflict
                    .target
                    .iter()
                    .map(|e| self.expr_str(e))
                    .join(", ");
                self.p.push(&format!("({}) ", target));
            }
            self.p.push(&self.kw("DO"));
            match &on_conflict.action {
                OnConflictAction::DoNothing => {
                    self.p.push(" ");
                    self.p.push(&self.kw("NOTHING"));
                }
                OnConflictAction::DoUpdate {
                    assignments,
                    selection,
                } => {
                    self.p.push(" ");
                    self.p.push(&self.kw("UPDATE"));
                    self.clause(base, "SET");
                    self.emit_assignments(assignments);
                    if let Some(selection) = selection {
                        self.clause(base, "WHERE");
                        self.emit_condition(selection, base);
                    }
                }
            }
        }
        if !insert.on_duplicate.is_empty() {
            self.clause(base, "ON DUPLICATE KEY UPDATE");
            self.emit_assignments(&insert.on_duplicate);
        }
        self.emit_returning(&insert.returning, base);
    }

    // ------------------------------------------------------------------
    // UPDATE
    // ------------------------------------------------------------------

    pub(crate) fn emit_update(&mut self, update: &UpdateStmt, base: usize) {
        self.p.push(&self.kw("UPDATE"));
        self.p.push(" ");
        let table = self.table_factor_str(&update.table);
        self.p.push(&table);
        self.clause(base, "SET");
        self.emit_assignments(&update.assignments);
        if !update.from.is_empty() {
            self.clause(base, "FROM");
            for (i, twj) in update.from.iter().enumerate() {
                if i > 0 {
                    self.p.push(",");
                    self.p.newline();
                    self.p.pad_to(base + RIVER + 1);
                }
                self.emit_table_with_joins(twj, base);
            }
        }
        if let Some(selection) = &update.selection {
            self.claim_clause_comments(update.selection_offset, base);
            self.clause(base, "WHERE");
            self.emit_condition(selection, base);
        }
        self.emit_returning(&update.returning, base);
    }

    /// SET items: inline when a single short assignment, one per line
    /// aligned to the first otherwise.
    fn emit_assignments(&mut self, assignments: &[Assignment]) {
        let rendered: Vec<String> = assignments
            .iter()
            .map(|a| self.assignment_str(a))
            .collect();
        let inline = rendered.join(", ");
        if assignments.len() == 1 && self.fits(inline.chars().count()) {
            self.p.push(&inline);
            return;
        }
        let col = self.p.col();
        let last = rendered.len().saturating_sub(1);
        for (i, item) in rendered.iter().enumerate() {
            if i > 0 {
                self.p.pad_to(col);
            }
            self.p.push(item);
            if i < last {
                self.p.push(",");
                self.p.newline();
            }
        }
    }

    fn assignment_str(&self, assignment: &Assignment) -> String {
        let target = match &assignment.target {
            AssignmentTarget::Column(parts) => parts.iter().map(|p| self.ident(p)).join("."),
            AssignmentTarget::Tuple(columns) => format!(
                "({})",
                columns
                    .iter()
                    .map(|parts| parts.iter().map(|p| self.ident(p)).join("."))
                    .join(", ")
            ),
        };
        format!("{} = {}", target, self.expr_str(&assignment.value))
    }

    // ------------------------------------------------------------------
    // DELETE
    // ------------------------------------------------------------------

    /// DELETE always renders with an explicit FROM on its own river
    /// line, normalising the Oracle `DELETE <table>` shorthand.
    pub(crate) fn emit_delete(&mut self, delete: &DeleteStmt, base: usize) {
        self.p.push(&self.kw("DELETE"));
        self.clause(base, "FROM");
        let table = self.object_name(&delete.table);
        self.p.push(&table);
        if let Some(alias) = &delete.alias {
            self.p.push(" ");
            self.p.push(&self.kw("AS"));
            self.p.push(" ");
            let alias = self.ident(alias);
            self.p.push(&alias);
        }
        if !delete.using.is_empty() {
            self.clause(base, "USING");
            for (i, twj) in delete.using.iter().enumerate() {
                if i > 0 {
                    self.p.push(",");
                    self.p.newline();
                    self.p.pad_to(base + RIVER + 1);
                }
                self.emit_table_with_joins(twj, base);
            }
        }
        if let Some(selection) = &delete.selection {
            self.claim_clause_comments(delete.selection_offset, base);
            self.clause(base, "WHERE");
            self.emit_condition(selection, base);
        }
        self.emit_returning(&delete.returning, base);
    }

    fn emit_returning(&mut self, returning: &[SelectItem], base: usize) {
        if returning.is_empty() {
            return;
        }
        self.clause(base, "RETURNING");
        self.emit_select_items(returning);
    }

    // ------------------------------------------------------------------
    // MERGE
    // ------------------------------------------------------------------

    pub(crate) fn emit_merge(&mut self, merge: &MergeStmt, base: usize) {
        self.p.push(&self.kw("MERGE"));
        self.p.push(" ");
        self.p.push(&self.kw("INTO"));
        self.p.push(" ");
        let target = self.table_factor_str(&merge.target);
        self.p.push(&target);
        self.clause(base, "USING");
        let source = self.table_factor_str(&merge.source);
        self.p.push(&source);
        self.clause(base, "ON");
        self.emit_condition(&merge.on, base);
        for clause in &merge.clauses {
            self.clause(base, "WHEN");
            if !clause.matched {
                self.p.push(&self.kw("NOT"));
                self.p.push(" ");
            }
            self.p.push(&self.kw("MATCHED"));
            if let Some(condition) = &clause.condition {
                self.p.push(" ");
                self.p.push(&self.kw("AND"));
                self.p.push(" ");
                let condition = self.expr_str(condition);
                self.p.push(&condition);
            }
            self.p.push(" ");
            self.p.push(&self.kw("THEN"));
            self.p.newline();
            let action_col = base + self.options.indent;
            self.p.pad_to(action_col);
            match &clause.action {
                MergeAction::Update(assignments) => {
                    self.p.push(&self.kw("UPDATE SET"));
                    self.p.push(" ");
                    self.emit_assignments(assignments);
                }
                MergeAction::Delete => self.p.push(&self.kw("DELETE")),
                MergeAction::Insert { columns, values } => {
                    self.p.push(&self.kw("INSERT"));
                    if !columns.is_empty() {
                        let cols = columns.iter().map(|c| self.ident(c)).join(", ");
                        self.p.push(&format!(" ({})", cols));
                    }
                    self.p.push(" ");
                    let values = self.values_str(values);
                    self.p.push(&values);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Procedural
    // ------------------------------------------------------------------

    /// A `BEGIN ... END` block: inner statements at one extra indent,
    /// separated by single newlines rather than blank lines.
    pub(crate) fn emit_block(&mut self, block: &BlockStmt, base: usize) {
        self.block_depth += 1;
        if !block.declare.is_empty() {
            self.p.push(&self.kw("DECLARE"));
            self.p.newline();
            self.p.pad_to(base + self.options.indent);
            self.emit_token_run(&block.declare, base + self.options.indent);
            self.p.newline();
            self.p.pad_to(base);
        }
        self.p.push(&self.kw("BEGIN"));
        let inner = base + self.options.indent;
        for statement in &block.statements {
            self.p.newline();
            self.emit_own_line_comments(statement.span.start, inner);
            self.p.pad_to(inner);
            self.emit_statement(statement, inner);
        }
        if !block.exception.is_empty() {
            self.p.newline();
            self.p.pad_to(base);
            self.p.push(&self.kw("EXCEPTION"));
            self.p.newline();
            self.p.pad_to(inner);
            self.emit_token_run(&block.exception, inner);
        }
        self.p.newline();
        self.p.pad_to(base);
        self.p.push(&self.kw("END"));
        self.block_depth -= 1;
    }

    pub(crate) fn emit_tsql_if(&mut self, tsql_if: &TsqlIfStmt, base: usize) {
        self.p.push(&self.kw("IF"));
        self.p.push(" ");
        self.emit_condition(&tsql_if.condition, base);
        self.emit_if_branch(&tsql_if.then_branch, base);
        if let Some(else_branch) = &tsql_if.else_branch {
            self.p.newline();
            self.p.pad_to(base);
            self.p.push(&self.kw("ELSE"));
            self.emit_if_branch(else_branch, base);
        }
    }

    fn emit_if_branch(&mut self, branch: &sqlriver_ast::statement::Statement, base: usize) {
        match &branch.stmt {
            Stmt::TsqlBeginBlock(block) => {
                self.p.newline();
                self.p.pad_to(base);
                self.emit_block(block, base);
            }
            _ => {
                self.p.newline();
                let inner = base + self.options.indent;
                self.p.pad_to(inner);
                self.emit_statement(branch, inner);
            }
        }
    }

    /// `CREATE { PROCEDURE | FUNCTION | TRIGGER }`: the header renders
    /// through the generic token printer, the body as a block.
    pub(crate) fn emit_create_routine(&mut self, routine: &CreateRoutineStmt, base: usize) {
        self.emit_tokens(&routine.header, base);
        if let Some(body) = &routine.body {
            self.p.newline();
            self.p.pad_to(base);
            self.emit_block(body, base);
        }
    }
}
