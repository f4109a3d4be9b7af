//! River layout for query expressions: clause alignment, select-list and
//! FROM/JOIN layout, VALUES alignment and set operations.

#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use itertools::Itertools;
use sqlriver_ast::expression::{
    Cte, Distinct, FetchClause, Join, JoinConstraint, LockWait, LockingClause, Query, QueryBody,
    Select, SelectItem, SetQuantifier, TableFactor, TableWithJoins, Values, With,
};
use sqlriver_core::Dialect;

use crate::{Fmt, RIVER};

impl<'a, D: Dialect> Fmt<'a, D> {
    /// Emits a query at the given base indent. The clause river sits at
    /// `base + 6`, under the `T` of `SELECT`.
    pub(crate) fn emit_query(&mut self, query: &Query, base: usize) {
        if let Some(with) = &query.with {
            self.emit_with(with, base);
            self.p.newline();
            self.p.pad_to(base);
        }
        self.emit_query_body(&query.body, base);
        if !query.order_by.is_empty() {
            self.claim_clause_comments(query.order_by_offset, base);
            self.clause(base, "ORDER BY");
            let inline = self.order_by_str(&query.order_by);
            let items: Vec<String> = query
                .order_by
                .iter()
                .map(|key| self.order_by_str(core::slice::from_ref(key)))
                .collect();
            self.emit_list_inline_or_wrapped(&inline, &items);
        }
        if let Some(limit) = &query.limit {
            self.clause(base, "LIMIT");
            match &limit.quantity {
                Some(expr) => {
                    let expr = self.expr_str(expr);
                    self.p.push(&expr);
                }
                None => self.p.push(&self.kw("ALL")),
            }
        }
        if let Some(offset) = &query.offset {
            self.clause(base, "OFFSET");
            let value = self.expr_str(&offset.value);
            self.p.push(&value);
            if let Some(rows) = &offset.rows {
                self.p.push(" ");
                self.p.push(&self.kw(rows));
            }
        }
        if let Some(fetch) = &query.fetch {
            self.clause(base, "FETCH");
            let tail = self.fetch_str(fetch);
            let tail = tail
                .strip_prefix(&format!("{} ", self.kw("FETCH")))
                .map(|s| s.to_string())
                .unwrap_or(tail);
            self.p.push(&tail);
        }
        for locking in &query.locking {
            self.clause(base, "FOR");
            let tail = self.locking_str(locking);
            let tail = tail
                .strip_prefix(&format!("{} ", self.kw("FOR")))
                .map(|s| s.to_string())
                .unwrap_or(tail);
            self.p.push(&tail);
        }
    }

    fn emit_query_body(&mut self, body: &QueryBody, base: usize) {
        match body {
            QueryBody::Select(select) => self.emit_select(select, base),
            QueryBody::Values(values) => self.emit_values(values, base),
            QueryBody::Nested(query) => {
                self.p.push("(");
                self.p.newline();
                self.p.pad_to(base + self.options.indent);
                self.emit_query(query, base + self.options.indent);
                self.p.newline();
                self.p.pad_to(base);
                self.p.push(")");
            }
            QueryBody::SetOperation {
                left,
                op,
                quantifier,
                right,
            } => {
                self.emit_query_body(left, base);
                self.p.newline();
                let mut word = self.kw(op.as_str());
                match quantifier {
                    Some(SetQuantifier::All) => {
                        word.push(' ');
                        word.push_str(&self.kw("ALL"));
                    }
                    Some(SetQuantifier::Distinct) => {
                        word.push(' ');
                        word.push_str(&self.kw("DISTINCT"));
                    }
                    None => {}
                }
                let first_len = word.split(' ').next().unwrap_or(&word).chars().count();
                self.p.pad_to(base + RIVER.saturating_sub(first_len));
                self.p.push(&word);
                self.p.newline();
                self.p.pad_to(base);
                self.emit_query_body(right, base);
            }
        }
    }

    /// Emits the WITH clause; each CTE body opens on its own indented
    /// block with the closing paren back at the base indent.
    pub(crate) fn emit_with(&mut self, with: &With, base: usize) {
        self.p.pad_to(base);
        self.p.push(&self.kw("WITH"));
        self.p.push(" ");
        if with.recursive {
            self.p.push(&self.kw("RECURSIVE"));
            self.p.push(" ");
        }
        for (i, cte) in with.ctes.iter().enumerate() {
            if i > 0 {
                self.p.push(",");
                self.p.newline();
                self.p.pad_to(base);
            }
            self.emit_cte(cte, base);
        }
    }

    fn emit_cte(&mut self, cte: &Cte, base: usize) {
        let name = self.ident(&cte.name);
        self.p.push(&name);
        if !cte.columns.is_empty() {
            let cols = cte.columns.iter().map(|c| self.ident(c)).join(", ");
            self.p.push(&format!(" ({})", cols));
        }
        self.p.push(" ");
        self.p.push(&self.kw("AS"));
        match cte.materialized {
            Some(true) => {
                self.p.push(" ");
                self.p.push(&self.kw("MATERIALIZED"));
            }
            Some(false) => {
                self.p.push(" ");
                self.p.push(&self.kw("NOT MATERIALIZED"));
            }
            None => {}
        }
        self.p.push(" (");
        self.p.newline();
        let inner = base + self.options.indent;
        self.p.pad_to(inner);
        self.emit_query(&cte.query, inner);
        self.p.newline();
        self.p.pad_to(base);
        self.p.push(")");
        if let Some(search) = &cte.search {
            self.p.newline();
            self.p.pad_to(base);
            self.p.push(&self.kw(if search.depth_first {
                "SEARCH DEPTH FIRST BY"
            } else {
                "SEARCH BREADTH FIRST BY"
            }));
            let by = search.by.iter().map(|c| self.ident(c)).join(", ");
            self.p.push(" ");
            self.p.push(&by);
            self.p.push(" ");
            self.p.push(&self.kw("SET"));
            self.p.push(" ");
            let set = self.ident(&search.set);
            self.p.push(&set);
        }
        if let Some(cycle) = &cte.cycle {
            self.p.newline();
            self.p.pad_to(base);
            self.p.push(&self.kw("CYCLE"));
            self.p.push(" ");
            let cols = cycle.columns.iter().map(|c| self.ident(c)).join(", ");
            self.p.push(&cols);
            self.p.push(" ");
            self.p.push(&self.kw("SET"));
            self.p.push(" ");
            let set = self.ident(&cycle.set);
            self.p.push(&set);
            if let Some(using) = &cycle.using {
                self.p.push(" ");
                self.p.push(&self.kw("USING"));
                self.p.push(" ");
                let using = self.ident(using);
                self.p.push(&using);
            }
        }
    }

    fn emit_select(&mut self, select: &Select, base: usize) {
        self.p.pad_to(base);
        self.p.push(&self.kw("SELECT"));
        match &select.distinct {
            Some(Distinct::All) => {
                self.p.push(" ");
                self.p.push(&self.kw("ALL"));
            }
            Some(Distinct::Distinct) => {
                self.p.push(" ");
                self.p.push(&self.kw("DISTINCT"));
            }
            Some(Distinct::DistinctOn(exprs)) => {
                self.p.push(" ");
                self.p.push(&self.kw("DISTINCT ON"));
                let list = exprs.iter().map(|e| self.expr_str(e)).join(", ");
                self.p.push(&format!(" ({})", list));
            }
            None => {}
        }
        if let Some(top) = &select.top {
            self.p.push(" ");
            self.p.push(&self.kw("TOP"));
            self.p.push(" ");
            let top = self.expr_str(top);
            self.p.push(&top);
        }
        if select.straight_join {
            self.p.push(" ");
            self.p.push(&self.kw("STRAIGHT_JOIN"));
        }
        self.p.push(" ");
        self.emit_select_items(&select.projection);
        if let Some(into) = &select.into {
            self.clause(base, "INTO");
            let into = self.object_name(into);
            self.p.push(&into);
        }
        if !select.from.is_empty() {
            self.claim_clause_comments(select.from_offset, base);
            self.clause(base, "FROM");
            self.emit_from_list(&select.from, base);
        }
        if let Some(selection) = &select.selection {
            self.claim_clause_comments(select.selection_offset, base);
            self.clause(base, "WHERE");
            self.emit_condition(selection, base);
        }
        if !select.group_by.is_empty() {
            self.claim_clause_comments(select.group_by_offset, base);
            self.clause(base, "GROUP BY");
            let list = select.group_by.iter().map(|e| self.expr_str(e)).join(", ");
            self.p.push(&list);
        }
        if let Some(having) = &select.having {
            self.claim_clause_comments(select.having_offset, base);
            self.clause(base, "HAVING");
            self.emit_condition(having, base);
        }
        if !select.windows.is_empty() {
            self.clause(base, "WINDOW");
            for (i, window) in select.windows.iter().enumerate() {
                if i > 0 {
                    self.p.push(", ");
                }
                let name = self.ident(&window.name);
                self.p.push(&name);
                self.p.push(" ");
                self.p.push(&self.kw("AS"));
                self.p.push(" ");
                let spec = self.window_spec_str(&window.spec);
                self.p.push(&spec);
            }
        }
    }

    /// The select list: inline when it fits, otherwise one item per line
    /// aligned under the first item, commas trailing.
    pub(crate) fn emit_select_items(&mut self, items: &[SelectItem]) {
        let first_col = self.p.col();
        let rendered: Vec<String> = items.iter().map(|item| self.select_item_str(item)).collect();
        let inline_width: usize =
            rendered.iter().map(|s| s.chars().count()).sum::<usize>() + 2 * rendered.len().saturating_sub(1);
        let has_comments = items
            .iter()
            .any(|item| self.comments.has_before(item.span.end));
        let inline_ok = self.fits(inline_width)
            && !has_comments
            && !items.iter().any(|item| is_expanding_item(&item.expr));
        if inline_ok {
            self.p.push(&rendered.join(", "));
            return;
        }
        let last = items.len().saturating_sub(1);
        for (i, item) in items.iter().enumerate() {
            self.emit_own_line_comments(item.span.start, first_col);
            self.p.pad_to(first_col);
            self.emit_select_item(item);
            if i < last {
                self.p.push(",");
            }
            let limit = items
                .get(i + 1)
                .map(|next| next.span.start)
                .unwrap_or(item.span.end + 1);
            self.emit_inline_comments(limit);
            if i < last {
                self.p.newline();
            }
        }
    }

    fn select_item_str(&self, item: &SelectItem) -> String {
        let mut out = self.expr_str(&item.expr);
        if let Some(alias) = &item.alias {
            if item.explicit_as {
                out.push(' ');
                out.push_str(&self.kw("AS"));
            }
            out.push(' ');
            out.push_str(&self.ident(alias));
        }
        out
    }

    fn emit_select_item(&mut self, item: &SelectItem) {
        self.emit_expr(&item.expr);
        if let Some(alias) = &item.alias {
            if item.explicit_as {
                self.p.push(" ");
                self.p.push(&self.kw("AS"));
            }
            self.p.push(" ");
            let alias = self.ident(alias);
            self.p.push(&alias);
        }
    }

    /// The FROM list: first source inline after the clause keyword,
    /// further comma sources on their own lines, joins laid out per the
    /// join rules.
    fn emit_from_list(&mut self, from: &[TableWithJoins], base: usize) {
        let content_col = base + RIVER + 1;
        for (i, twj) in from.iter().enumerate() {
            if i > 0 {
                self.p.push(",");
                self.p.newline();
                self.p.pad_to(content_col);
            }
            self.emit_table_with_joins(twj, base);
        }
    }

    pub(crate) fn emit_table_with_joins(&mut self, twj: &TableWithJoins, base: usize) {
        self.emit_table_factor(&twj.relation, base);
        for join in &twj.joins {
            self.emit_join(join, base);
        }
    }

    fn emit_join(&mut self, join: &Join, base: usize) {
        self.claim_clause_comments(Some(join.offset), base);
        self.p.newline();
        let word = self.kw(join.join_type.as_str());
        let first_len = word.split(' ').next().unwrap_or(&word).chars().count();
        let mut col = base + RIVER.saturating_sub(first_len);
        // The LEFT/RIGHT/FULL family indents two extra columns, and its
        // ON/AND lines align under the join keyword's first character.
        if join.join_type.is_outer_family() {
            col += 2;
        }
        self.p.pad_to(col);
        self.p.push(&word);
        self.p.push(" ");
        self.emit_table_factor(&join.relation, base);
        match &join.constraint {
            JoinConstraint::On(condition) => {
                if join.join_type.is_outer_family() {
                    self.p.newline();
                    self.p.pad_to(col);
                    self.p.push(&self.kw("ON"));
                    self.p.push(" ");
                    self.emit_on_condition(condition, col);
                } else {
                    let inline = self.expr_str(condition);
                    if self.fits(inline.chars().count() + 4) {
                        self.p.push(" ");
                        self.p.push(&self.kw("ON"));
                        self.p.push(" ");
                        self.p.push(&inline);
                    } else {
                        self.p.newline();
                        self.p.pad_to(base + RIVER.saturating_sub(2));
                        self.p.push(&self.kw("ON"));
                        self.p.push(" ");
                        self.emit_on_condition(condition, base + RIVER.saturating_sub(2));
                    }
                }
            }
            JoinConstraint::Using(columns) => {
                self.p.push(" ");
                self.p.push(&self.kw("USING"));
                let cols = columns.iter().map(|c| self.ident(c)).join(", ");
                self.p.push(&format!(" ({})", cols));
            }
            JoinConstraint::None => {}
        }
    }

    /// The AND/OR continuation lines of a join condition align under the
    /// ON keyword.
    fn emit_on_condition(&mut self, condition: &sqlriver_ast::expression::Expr, on_col: usize) {
        let inline = self.expr_str(condition);
        if self.fits(inline.chars().count()) {
            self.p.push(&inline);
            return;
        }
        let mut operands = Vec::new();
        crate::expr::flatten_bool(condition, None, &mut operands);
        for (i, (op, operand)) in operands.iter().enumerate() {
            if i > 0 {
                self.p.newline();
                self.p.pad_to(on_col);
                if let Some(op) = op {
                    self.p.push(&self.kw(op));
                    self.p.push(" ");
                }
            }
            self.emit_expr(operand);
        }
    }

    pub(crate) fn emit_table_factor(&mut self, factor: &TableFactor, base: usize) {
        match factor {
            TableFactor::Table {
                name,
                alias,
                with_ordinality,
                hints,
                tablesample,
            } => {
                let name = self.object_name(name);
                self.p.push(&name);
                if *with_ordinality {
                    self.p.push(" ");
                    self.p.push(&self.kw("WITH ORDINALITY"));
                }
                if let Some(alias) = alias {
                    self.p.push(" ");
                    let alias = self.table_alias_str(alias);
                    self.p.push(&alias);
                }
                if !hints.is_empty() {
                    self.p.push(&format!(" ({})", hints.join(", ")));
                }
                if let Some(tablesample) = tablesample {
                    self.p.push(" ");
                    self.p.push(&self.kw("TABLESAMPLE"));
                    self.p.push(" ");
                    let tablesample = tablesample.clone();
                    self.p.push(&tablesample);
                }
            }
            TableFactor::Derived {
                lateral,
                subquery,
                alias,
            } => {
                if *lateral {
                    self.p.push(&self.kw("LATERAL"));
                    self.p.push(" ");
                }
                let inline = self.query_str(subquery);
                if self.fits(inline.chars().count() + 2) {
                    self.p.push(&format!("({})", inline));
                } else {
                    let open_col = self.p.col();
                    self.p.push("(");
                    self.p.newline();
                    let inner = open_col + self.options.indent;
                    self.p.pad_to(inner);
                    self.emit_query(subquery, inner);
                    self.p.newline();
                    self.p.pad_to(open_col);
                    self.p.push(")");
                }
                if let Some(alias) = alias {
                    self.p.push(" ");
                    let alias = self.table_alias_str(alias);
                    self.p.push(&alias);
                }
            }
            TableFactor::Function {
                lateral,
                call,
                alias,
                column_defs,
                with_ordinality,
            } => {
                if *lateral {
                    self.p.push(&self.kw("LATERAL"));
                    self.p.push(" ");
                }
                let call = self.function_str(call);
                self.p.push(&call);
                if *with_ordinality {
                    self.p.push(" ");
                    self.p.push(&self.kw("WITH ORDINALITY"));
                }
                if !column_defs.is_empty() {
                    self.p.push(" ");
                    self.p.push(&self.kw("AS"));
                    let defs = column_defs
                        .iter()
                        .map(|(name, data_type)| {
                            format!("{} {}", self.ident(name), self.data_type_str(data_type))
                        })
                        .join(", ");
                    self.p.push(&format!(" ({})", defs));
                } else if let Some(alias) = alias {
                    self.p.push(" ");
                    let alias = self.table_alias_str(alias);
                    self.p.push(&alias);
                }
            }
            TableFactor::Values { values, alias } => {
                self.p.push("(");
                self.emit_values_inline_or_block(values);
                self.p.push(")");
                if let Some(alias) = alias {
                    self.p.push(" ");
                    let alias = self.table_alias_str(alias);
                    self.p.push(&alias);
                }
            }
            TableFactor::NestedJoin { inner, alias } => {
                // Parenthesised join groups wrap onto multiple lines
                // with the inner joins one extra level deep.
                let open_col = self.p.col();
                self.p.push("(");
                let inner_base = open_col + self.options.indent;
                self.p.newline();
                self.p.pad_to(inner_base + RIVER + 1);
                self.emit_table_with_joins(inner, inner_base);
                self.p.newline();
                self.p.pad_to(open_col);
                self.p.push(")");
                if let Some(alias) = alias {
                    self.p.push(" ");
                    let alias = self.table_alias_str(alias);
                    self.p.push(&alias);
                }
            }
        }
    }

    pub(crate) fn table_alias_str(&self, alias: &sqlriver_ast::expression::TableAlias) -> String {
        let mut out = self.ident(&alias.name);
        if !alias.columns.is_empty() {
            out.push_str(&format!(
                " ({})",
                alias.columns.iter().map(|c| self.ident(c)).join(", ")
            ));
        }
        out
    }

    /// `VALUES` layout: a single short row stays inline; multiple rows
    /// align every tuple's opening paren under the first.
    pub(crate) fn emit_values(&mut self, values: &Values, base: usize) {
        self.p.pad_to(base);
        self.p.push(&self.kw("VALUES"));
        self.p.push(" ");
        self.emit_values_rows(values);
    }

    fn emit_values_inline_or_block(&mut self, values: &Values) {
        self.p.push(&self.kw("VALUES"));
        self.p.push(" ");
        self.emit_values_rows(values);
    }

    fn emit_values_rows(&mut self, values: &Values) {
        let first_col = self.p.col();
        let last = values.rows.len().saturating_sub(1);
        for (i, row) in values.rows.iter().enumerate() {
            self.emit_own_line_comments(row.span.start, first_col);
            self.p.pad_to(first_col);
            let inline = format!(
                "({})",
                row.exprs.iter().map(|e| self.expr_str(e)).join(", ")
            );
            if self.fits(inline.chars().count()) {
                self.p.push(&inline);
            } else {
                // Break after the opening paren, one element per line,
                // aligned one column in.
                self.p.push("(");
                let elem_col = self.p.col();
                for (j, expr) in row.exprs.iter().enumerate() {
                    if j > 0 {
                        self.p.push(",");
                        self.p.newline();
                        self.p.pad_to(elem_col);
                    }
                    self.emit_expr(expr);
                }
                self.p.push(")");
            }
            if i < last {
                self.p.push(",");
                let limit = values
                    .rows
                    .get(i + 1)
                    .map(|next| next.span.start)
                    .unwrap_or(row.span.end + 1);
                self.emit_inline_comments(limit);
                self.p.newline();
            }
        }
    }

    /// Helper shared by list clauses: inline when it fits, otherwise one
    /// element per line aligned at the current column.
    fn emit_list_inline_or_wrapped(&mut self, inline: &str, items: &[String]) {
        if self.fits(inline.chars().count()) {
            self.p.push(inline);
            return;
        }
        let col = self.p.col();
        let last = items.len().saturating_sub(1);
        for (i, item) in items.iter().enumerate() {
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

    pub(crate) fn fetch_str(&self, fetch: &FetchClause) -> String {
        let mut out = self.kw("FETCH");
        out.push(' ');
        out.push_str(&self.kw(if fetch.first { "FIRST" } else { "NEXT" }));
        if let Some(quantity) = &fetch.quantity {
            out.push(' ');
            out.push_str(&self.expr_str(quantity));
        }
        if fetch.percent {
            out.push(' ');
            out.push_str(&self.kw("PERCENT"));
        }
        out.push(' ');
        out.push_str(&self.kw("ROWS"));
        out.push(' ');
        out.push_str(&self.kw(if fetch.with_ties { "WITH TIES" } else { "ONLY" }));
        out
    }

    pub(crate) fn locking_str(&self, locking: &LockingClause) -> String {
        let mut out = self.kw("FOR");
        out.push(' ');
        out.push_str(&self.kw(if locking.update { "UPDATE" } else { "SHARE" }));
        if !locking.of.is_empty() {
            out.push(' ');
            out.push_str(&self.kw("OF"));
            out.push(' ');
            out.push_str(&locking.of.iter().map(|n| self.object_name(n)).join(", "));
        }
        match locking.wait {
            Some(LockWait::SkipLocked) => {
                out.push(' ');
                out.push_str(&self.kw("SKIP LOCKED"));
            }
            Some(LockWait::Nowait) => {
                out.push(' ');
                out.push_str(&self.kw("NOWAIT"));
            }
            None => {}
        }
        out
    }

    pub(crate) fn select_str(&self, select: &Select) -> String {
        let mut out = self.kw("SELECT");
        match &select.distinct {
            Some(Distinct::All) => {
                out.push(' ');
                out.push_str(&self.kw("ALL"));
            }
            Some(Distinct::Distinct) => {
                out.push(' ');
                out.push_str(&self.kw("DISTINCT"));
            }
            Some(Distinct::DistinctOn(exprs)) => {
                out.push(' ');
                out.push_str(&self.kw("DISTINCT ON"));
                out.push_str(&format!(
                    " ({})",
                    exprs.iter().map(|e| self.expr_str(e)).join(", ")
                ));
            }
            None => {}
        }
        if let Some(top) = &select.top {
            out.push(' ');
            out.push_str(&self.kw("TOP"));
            out.push(' ');
            out.push_str(&self.expr_str(top));
        }
        if select.straight_join {
            out.push(' ');
            out.push_str(&self.kw("STRAIGHT_JOIN"));
        }
        out.push(' ');
        out.push_str(
            &select
                .projection
                .iter()
                .map(|item| self.select_item_str(item))
                .join(", "),
        );
        if let Some(into) = &select.into {
            out.push(' ');
            out.push_str(&self.kw("INTO"));
            out.push(' ');
            out.push_str(&self.object_name(into));
        }
        if !select.from.is_empty() {
            out.push(' ');
            out.push_str(&self.kw("FROM"));
            out.push(' ');
            out.push_str(
                &select
                    .from
                    .iter()
                    .map(|twj| self.table_with_joins_str(twj))
                    .join(", "),
            );
        }
        if let Some(selection) = &select.selection {
            out.push(' ');
            out.push_str(&self.kw("WHERE"));
            out.push(' ');
            out.push_str(&self.expr_str(selection));
        }
        if !select.group_by.is_empty() {
            out.push(' ');
            out.push_str(&self.kw("GROUP BY"));
            out.push(' ');
            out.push_str(&select.group_by.iter().map(|e| self.expr_str(e)).join(", "));
        }
        if let Some(having) = &select.having {
            out.push(' ');
            out.push_str(&self.kw("HAVING"));
            out.push(' ');
            out.push_str(&self.expr_str(having));
        }
        if !select.windows.is_empty() {
            out.push(' ');
            out.push_str(&self.kw("WINDOW"));
            out.push(' ');
            out.push_str(
                &select
                    .windows
                    .iter()
                    .map(|w| {
                        format!(
                            "{} {} {}",
                            self.ident(&w.name),
                            self.kw("AS"),
                            self.window_spec_str(&w.spec)
                        )
                    })
                    .join(", "),
            );
        }
        out
    }

    fn table_with_joins_str(&self, twj: &TableWithJoins) -> String {
        let mut out = self.table_factor_str(&twj.relation);
        for join in &twj.joins {
            out.push(' ');
            out.push_str(&self.kw(join.join_type.as_str()));
            out.push(' ');
            out.push_str(&self.table_factor_str(&join.relation));
            match &join.constraint {
                JoinConstraint::On(condition) => {
                    out.push(' ');
                    out.push_str(&self.kw("ON"));
                    out.push(' ');
                    out.push_str(&self.expr_str(condition));
                }
                JoinConstraint::Using(columns) => {
                    out.push(' ');
                    out.push_str(&self.kw("USING"));
                    out.push_str(&format!(
                        " ({})",
                        columns.iter().map(|c| self.ident(c)).join(", ")
                    ));
                }
                JoinConstraint::None => {}
            }
        }
        out
    }

    pub(crate) fn table_factor_str(&self, factor: &TableFactor) -> String {
        match factor {
            TableFactor::Table {
                name,
                alias,
                with_ordinality,
                hints,
                tablesample,
            } => {
                let mut out = self.object_name(name);
                if *with_ordinality {
                    out.push(' ');
                    out.push_str(&self.kw("WITH ORDINALITY"));
                }
                if let Some(alias) = alias {
                    out.push(' ');
                    out.push_str(&self.table_alias_str(alias));
                }
                if !hints.is_empty() {
                    out.push_str(&format!(" ({})", hints.join(", ")));
                }
                if let Some(tablesample) = tablesample {
                    out.push(' ');
                    out.push_str(&self.kw("TABLESAMPLE"));
                    out.push(' ');
                    out.push_str(tablesample);
                }
                out
            }
            TableFactor::Derived {
                lateral,
                subquery,
                alias,
            } => {
                let mut out = String::new();
                if *lateral {
                    out.push_str(&self.kw("LATERAL"));
                    out.push(' ');
                }
                out.push_str(&format!("({})", self.query_str(subquery)));
                if let Some(alias) = alias {
                    out.push(' ');
                    out.push_str(&self.table_alias_str(alias));
                }
                out
            }
            TableFactor::Function {
                lateral,
                call,
                alias,
                column_defs,
                with_ordinality,
            } => {
                let mut out = String::new();
                if *lateral {
                    out.push_str(&self.kw("LATERAL"));
                    out.push(' ');
                }
                out.push_str(&self.function_str(call));
                if *with_ordinality {
                    out.push(' ');
                    out.push_str(&self.kw("WITH ORDINALITY"));
                }
                if !column_defs.is_empty() {
                    out.push(' ');
                    out.push_str(&self.kw("AS"));
                    out.push_str(&format!(
                        " ({})",
                        column_defs
                            .iter()
                            .map(|(name, data_type)| format!(
                                "{} {}",
                                self.ident(name),
                                self.data_type_str(data_type)
                            ))
                            .join(", ")
                    ));
                } else if let Some(alias) = alias {
                    out.push(' ');
                    out.push_str(&self.table_alias_str(alias));
                }
                out
            }
            TableFactor::Values { values, alias } => {
                let mut out = format!("({})", self.values_str(values));
                if let Some(alias) = alias {
                    out.push(' ');
                    out.push_str(&self.table_alias_str(alias));
                }
                out
            }
            TableFactor::NestedJoin { inner, alias } => {
                let mut out = format!("({})", self.table_with_joins_str(inner));
                if let Some(alias) = alias {
                    out.push(' ');
                    out.push_str(&self.table_alias_str(alias));
                }
                out
            }
        }
    }

    pub(crate) fn values_str(&self, values: &Values) -> String {
        let mut out = self.kw("VALUES");
        out.push(' ');
        out.push_str(
            &values
                .rows
                .iter()
                .map(|row| {
                    format!("({})", row.exprs.iter().map(|e| self.expr_str(e)).join(", "))
                })
                .join(", "),
        );
        out
    }
}

/// True when the item expression forces one-per-line layout.
fn is_expanding_item(expr: &sqlriver_ast::expression::Expr) -> bool {
    matches!(expr, sqlriver_ast::expression::Expr::Case(case) if case.when_clauses.len() > 1)
}
