//! Inline expression rendering and the multi-line special cases (CASE
//! blocks, expanded window frames, boolean condition cascades).

#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use itertools::Itertools;
use sqlriver_ast::{
    expression::{
        BinaryOperator, CaseExpr, Expr, FrameExclusion, FunctionArg, FunctionCall, OrderByExpr,
        Query, QueryBody, Subscript, UnaryOperator, WindowFrame, WindowFrameBound,
        WindowFrameUnits, WindowSpec,
    },
    types::{DataType, Literal},
};
use sqlriver_core::Dialect;

use crate::{Fmt, RIVER};

/// Type vocabulary that is uppercased in type expressions; other words
/// (user-defined type names) keep their source spelling. Sorted for
/// binary search.
const KNOWN_TYPE_WORDS: &[&str] = &[
    "BIGINT", "BIGSERIAL", "BINARY", "BIT", "BLOB", "BOOL", "BOOLEAN", "BYTEA", "BYTES", "CHAR",
    "CHARACTER", "CLOB", "DATE", "DATETIME", "DATETIME2", "DEC", "DECIMAL", "DOUBLE", "ENUM",
    "FLOAT", "FLOAT4", "FLOAT8", "GEOGRAPHY", "INT", "INT2", "INT4", "INT8", "INTEGER",
    "INTERVAL", "JSON", "JSONB", "MEDIUMINT", "MONEY", "NCHAR", "NCLOB", "NUMBER", "NUMERIC",
    "NVARCHAR", "PRECISION", "RAW", "REAL", "ROWID", "SERIAL", "SMALLINT", "STRING", "TEXT",
    "TIME", "TIMESTAMP", "TIMESTAMPTZ", "TINYINT", "UNSIGNED", "UUID", "VARBINARY", "VARCHAR",
    "VARIANT", "VARYING", "XML", "ZEROFILL",
];

impl<'a, D: Dialect> Fmt<'a, D> {
    // ------------------------------------------------------------------
    // Inline rendering
    // ------------------------------------------------------------------

    /// Renders an expression on a single line.
    pub(crate) fn expr_str(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(lit) => self.literal_str(lit),
            Expr::Identifier(ident) => self.ident(ident),
            Expr::CompoundIdentifier(parts) => {
                parts.iter().map(|p| self.ident(p)).join(".")
            }
            Expr::Wildcard => "*".to_string(),
            Expr::QualifiedWildcard(parts) => {
                let mut out = parts.iter().map(|p| self.ident(p)).join(".");
                out.push_str(".*");
                out
            }
            Expr::Parameter(text) => text.clone(),
            Expr::Default => self.kw("DEFAULT"),
            Expr::Function(call) => self.function_str(call),
            Expr::Cast {
                expr,
                data_type,
                double_colon,
            } => {
                if *double_colon {
                    format!("{}::{}", self.expr_str(expr), self.data_type_str(data_type))
                } else {
                    format!(
                        "{}({} {} {})",
                        self.kw("CAST"),
                        self.expr_str(expr),
                        self.kw("AS"),
                        self.data_type_str(data_type)
                    )
                }
            }
            Expr::Case(case) => self.case_str(case),
            Expr::Between {
                expr,
                negated,
                low,
                high,
            } => format!(
                "{} {}{} {} {} {}",
                self.expr_str(expr),
                if *negated { self.kw("NOT ") } else { String::new() },
                self.kw("BETWEEN"),
                self.expr_str(low),
                self.kw("AND"),
                self.expr_str(high)
            ),
            Expr::InList {
                expr,
                negated,
                list,
            } => format!(
                "{} {}{} ({})",
                self.expr_str(expr),
                if *negated { self.kw("NOT ") } else { String::new() },
                self.kw("IN"),
                list.iter().map(|e| self.expr_str(e)).join(", ")
            ),
            Expr::InSubquery {
                expr,
                negated,
                subquery,
            } => format!(
                "{} {}{} ({})",
                self.expr_str(expr),
                if *negated { self.kw("NOT ") } else { String::new() },
                self.kw("IN"),
                self.query_str(subquery)
            ),
            Expr::Exists { negated, subquery } => format!(
                "{}{} ({})",
                if *negated { self.kw("NOT ") } else { String::new() },
                self.kw("EXISTS"),
                self.query_str(subquery)
            ),
            Expr::Quantified {
                expr,
                op,
                quantifier,
                subquery,
            } => format!(
                "{} {} {} ({})",
                self.expr_str(expr),
                op,
                self.kw(quantifier.as_str()),
                self.query_str(subquery)
            ),
            Expr::Subquery(query) => format!("({})", self.query_str(query)),
            Expr::Array(items) => format!(
                "{}[{}]",
                self.kw("ARRAY"),
                items.iter().map(|e| self.expr_str(e)).join(", ")
            ),
            Expr::Row(items) => format!(
                "({})",
                items.iter().map(|e| self.expr_str(e)).join(", ")
            ),
            Expr::Interval { value, qualifier } => {
                let mut out = self.kw("INTERVAL");
                out.push(' ');
                out.push_str(&self.expr_str(value));
                for word in qualifier {
                    out.push(' ');
                    out.push_str(&self.kw(&word.to_uppercase()));
                }
                out
            }
            Expr::UnaryOp { op, expr } => match op {
                UnaryOperator::Not => format!("{} {}", self.kw("NOT"), self.expr_str(expr)),
                _ => format!("{}{}", op, self.expr_str(expr)),
            },
            Expr::BinaryOp { left, op, right } => {
                format!("{} {} {}", self.expr_str(left), self.op_str(op), self.expr_str(right))
            }
            Expr::IsNull { expr, negated } => format!(
                "{} {}",
                self.expr_str(expr),
                if *negated {
                    self.kw("IS NOT NULL")
                } else {
                    self.kw("IS NULL")
                }
            ),
            Expr::IsDistinctFrom {
                left,
                negated,
                right,
            } => format!(
                "{} {} {}",
                self.expr_str(left),
                if *negated {
                    self.kw("IS NOT DISTINCT FROM")
                } else {
                    self.kw("IS DISTINCT FROM")
                },
                self.expr_str(right)
            ),
            Expr::Subscript { expr, subscript } => {
                let index = match subscript.as_ref() {
                    Subscript::Index(e) => self.expr_str(e),
                    Subscript::Slice { lower, upper } => format!(
                        "{}:{}",
                        lower.as_ref().map(|e| self.expr_str(e)).unwrap_or_default(),
                        upper.as_ref().map(|e| self.expr_str(e)).unwrap_or_default()
                    ),
                };
                format!("{}[{}]", self.expr_str(expr), index)
            }
            Expr::VariantPath { expr, path } => {
                format!("{}:{}", self.expr_str(expr), self.ident(path))
            }
            Expr::Nested(inner) => format!("({})", self.expr_str(inner)),
        }
    }

    fn op_str(&self, op: &BinaryOperator) -> String {
        match op {
            BinaryOperator::And => self.kw("AND"),
            BinaryOperator::Or => self.kw("OR"),
            BinaryOperator::Like => self.kw("LIKE"),
            BinaryOperator::NotLike => self.kw("NOT LIKE"),
            BinaryOperator::ILike => self.kw("ILIKE"),
            BinaryOperator::NotILike => self.kw("NOT ILIKE"),
            other => other.to_string(),
        }
    }

    fn literal_str(&self, literal: &Literal) -> String {
        match literal {
            Literal::Boolean(true) => self.kw("TRUE"),
            Literal::Boolean(false) => self.kw("FALSE"),
            Literal::Null => self.kw("NULL"),
            other => other.to_string(),
        }
    }

    /// Renders a type expression; vocabulary words are uppercased, user
    /// type names keep their spelling.
    pub(crate) fn data_type_str(&self, data_type: &DataType) -> String {
        let mut out = String::new();
        for (i, word) in data_type.name.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&self.type_word(word));
        }
        if let Some(args) = &data_type.args {
            out.push('(');
            out.push_str(&args.join(", "));
            out.push(')');
        }
        for word in &data_type.modifiers {
            if word == "[]" {
                out.push_str("[]");
            } else {
                out.push(' ');
                out.push_str(&self.type_word(word));
            }
        }
        out
    }

    fn type_word(&self, word: &str) -> String {
        let upper = word.to_uppercase();
        if KNOWN_TYPE_WORDS.binary_search(&upper.as_str()).is_ok()
            || matches!(upper.as_str(), "WITH" | "WITHOUT" | "TIME" | "ZONE" | "LOCAL")
        {
            self.kw(&upper)
        } else {
            word.to_string()
        }
    }

    fn case_str(&self, case: &CaseExpr) -> String {
        let mut out = self.kw("CASE");
        if let Some(operand) = &case.operand {
            out.push(' ');
            out.push_str(&self.expr_str(operand));
        }
        for when in &case.when_clauses {
            out.push(' ');
            out.push_str(&self.kw("WHEN"));
            out.push(' ');
            out.push_str(&self.expr_str(&when.condition));
            out.push(' ');
            out.push_str(&self.kw("THEN"));
            out.push(' ');
            out.push_str(&self.expr_str(&when.result));
        }
        if let Some(else_result) = &case.else_result {
            out.push(' ');
            out.push_str(&self.kw("ELSE"));
            out.push(' ');
            out.push_str(&self.expr_str(else_result));
        }
        out.push(' ');
        out.push_str(&self.kw("END"));
        out
    }

    /// Renders a function call on one line.
    pub(crate) fn function_str(&self, call: &FunctionCall) -> String {
        let mut out = self.function_name(&call.name);
        out.push('(');
        if call.distinct {
            out.push_str(&self.kw("DISTINCT"));
            out.push(' ');
        }
        if call.variadic {
            out.push_str(&self.kw("VARIADIC"));
            out.push(' ');
        }
        out.push_str(
            &call
                .args
                .iter()
                .map(|arg| match arg {
                    FunctionArg::Unnamed(expr) => self.expr_str(expr),
                    FunctionArg::Named { name, value } => {
                        format!("{} => {}", self.ident(name), self.expr_str(value))
                    }
                })
                .join(", "),
        );
        if !call.order_by.is_empty() {
            out.push(' ');
            out.push_str(&self.kw("ORDER BY"));
            out.push(' ');
            out.push_str(&self.order_by_str(&call.order_by));
        }
        if let Some(separator) = &call.separator {
            out.push(' ');
            out.push_str(&self.kw("SEPARATOR"));
            out.push(' ');
            out.push_str(&separator.to_string());
        }
        out.push(')');
        if !call.within_group.is_empty() {
            out.push(' ');
            out.push_str(&self.kw("WITHIN GROUP"));
            out.push_str(" (");
            out.push_str(&self.kw("ORDER BY"));
            out.push(' ');
            out.push_str(&self.order_by_str(&call.within_group));
            out.push(')');
        }
        if let Some(filter) = &call.filter {
            out.push(' ');
            out.push_str(&self.kw("FILTER"));
            out.push_str(" (");
            out.push_str(&self.kw("WHERE"));
            out.push(' ');
            out.push_str(&self.expr_str(filter));
            out.push(')');
        }
        if let Some(over) = &call.over {
            out.push(' ');
            out.push_str(&self.kw("OVER"));
            out.push(' ');
            out.push_str(&self.window_spec_str(over));
        }
        out
    }

    /// Renders an ORDER BY key list on one line.
    pub(crate) fn order_by_str(&self, items: &[OrderByExpr]) -> String {
        items
            .iter()
            .map(|item| {
                let mut out = self.expr_str(&item.expr);
                match item.asc {
                    Some(true) => {
                        out.push(' ');
                        out.push_str(&self.kw("ASC"));
                    }
                    Some(false) => {
                        out.push(' ');
                        out.push_str(&self.kw("DESC"));
                    }
                    None => {}
                }
                match item.nulls_first {
                    Some(true) => {
                        out.push(' ');
                        out.push_str(&self.kw("NULLS FIRST"));
                    }
                    Some(false) => {
                        out.push(' ');
                        out.push_str(&self.kw("NULLS LAST"));
                    }
                    None => {}
                }
                out
            })
            .join(", ")
    }

    /// Renders a window spec on one line (without `OVER`).
    pub(crate) fn window_spec_str(&self, spec: &WindowSpec) -> String {
        if !spec.parenthesized {
            return spec
                .name
                .as_ref()
                .map(|n| self.ident(n))
                .unwrap_or_default();
        }
        let mut parts: Vec<String> = Vec::new();
        if let Some(name) = &spec.name {
            parts.push(self.ident(name));
        }
        if !spec.partition_by.is_empty() {
            parts.push(format!(
                "{} {}",
                self.kw("PARTITION BY"),
                spec.partition_by.iter().map(|e| self.expr_str(e)).join(", ")
            ));
        }
        if !spec.order_by.is_empty() {
            parts.push(format!(
                "{} {}",
                self.kw("ORDER BY"),
                self.order_by_str(&spec.order_by)
            ));
        }
        if let Some(frame) = &spec.frame {
            parts.push(self.frame_str(frame));
        }
        if let Some(exclude) = &spec.exclude {
            parts.push(format!("{} {}", self.kw("EXCLUDE"), self.exclusion_str(exclude)));
        }
        format!("({})", parts.join(" "))
    }

    fn frame_str(&self, frame: &WindowFrame) -> String {
        let units = self.kw(match frame.units {
            WindowFrameUnits::Rows => "ROWS",
            WindowFrameUnits::Range => "RANGE",
            WindowFrameUnits::Groups => "GROUPS",
        });
        match &frame.end {
            Some(end) => format!(
                "{} {} {} {} {}",
                units,
                self.kw("BETWEEN"),
                self.frame_bound_str(&frame.start),
                self.kw("AND"),
                self.frame_bound_str(end)
            ),
            None => format!("{} {}", units, self.frame_bound_str(&frame.start)),
        }
    }

    pub(crate) fn frame_bound_str(&self, bound: &WindowFrameBound) -> String {
        match bound {
            WindowFrameBound::CurrentRow => self.kw("CURRENT ROW"),
            WindowFrameBound::Preceding(None) => self.kw("UNBOUNDED PRECEDING"),
            WindowFrameBound::Preceding(Some(expr)) => {
                format!("{} {}", self.expr_str(expr), self.kw("PRECEDING"))
            }
            WindowFrameBound::Following(None) => self.kw("UNBOUNDED FOLLOWING"),
            WindowFrameBound::Following(Some(expr)) => {
                format!("{} {}", self.expr_str(expr), self.kw("FOLLOWING"))
            }
        }
    }

    pub(crate) fn exclusion_str(&self, exclusion: &FrameExclusion) -> String {
        self.kw(match exclusion {
            FrameExclusion::CurrentRow => "CURRENT ROW",
            FrameExclusion::Group => "GROUP",
            FrameExclusion::Ties => "TIES",
            FrameExclusion::NoOthers => "NO OTHERS",
        })
    }

    // ------------------------------------------------------------------
    // Multi-line emission
    // ------------------------------------------------------------------

    /// Emits an expression at the current position: inline when it fits
    /// the budget, with CASE blocks and oversized windows expanded
    /// otherwise.
    pub(crate) fn emit_expr(&mut self, expr: &Expr) {
        let inline = self.expr_str(expr);
        let multi_when = matches!(expr, Expr::Case(case) if case.when_clauses.len() > 1);
        if !multi_when && self.fits(inline.chars().count()) {
            self.p.push(&inline);
            return;
        }
        match expr {
            Expr::Case(case) => self.emit_case(case),
            Expr::Function(call) if call.over.is_some() => self.emit_function_expanded(call),
            Expr::Subquery(query) => self.emit_subquery_parens(query),
            _ => self.p.push(&inline),
        }
    }

    /// A CASE block: `CASE` heads the block, each `WHEN ... THEN ...`,
    /// the `ELSE` and the `END` line up under it.
    fn emit_case(&mut self, case: &CaseExpr) {
        let col = self.p.col();
        self.p.push(&self.kw("CASE"));
        if let Some(operand) = &case.operand {
            self.p.push(" ");
            let operand = self.expr_str(operand);
            self.p.push(&operand);
        }
        for when in &case.when_clauses {
            self.p.newline();
            self.p.pad_to(col);
            self.p.push(&self.kw("WHEN"));
            self.p.push(" ");
            let condition = self.expr_str(&when.condition);
            self.p.push(&condition);
            self.p.push(" ");
            self.p.push(&self.kw("THEN"));
            self.p.push(" ");
            let result = self.expr_str(&when.result);
            self.p.push(&result);
        }
        if let Some(else_result) = &case.else_result {
            self.p.newline();
            self.p.pad_to(col);
            self.p.push(&self.kw("ELSE"));
            self.p.push(" ");
            let else_result = self.expr_str(else_result);
            self.p.push(&else_result);
        }
        self.p.newline();
        self.p.pad_to(col);
        self.p.push(&self.kw("END"));
    }

    /// An OVER clause wider than the budget expands to a multi-line
    /// block; the closing paren aligns under `OVER`.
    fn emit_function_expanded(&mut self, call: &FunctionCall) {
        let mut head = call.clone();
        let over = head.over.take();
        let head_text = self.function_str(&head);
        self.p.push(&head_text);
        let Some(spec) = over else { return };
        self.p.push(" ");
        let over_col = self.p.col();
        self.p.push(&self.kw("OVER"));
        self.p.push(" ");
        if !spec.parenthesized {
            let name = self.window_spec_str(&spec);
            self.p.push(&name);
            return;
        }
        self.p.push("(");
        let inner = over_col + self.options.indent;
        if let Some(name) = &spec.name {
            self.p.newline();
            self.p.pad_to(inner);
            let name = self.ident(name);
            self.p.push(&name);
        }
        if !spec.partition_by.is_empty() {
            self.p.newline();
            self.p.pad_to(inner);
            self.p.push(&self.kw("PARTITION BY"));
            self.p.push(" ");
            let list = spec.partition_by.iter().map(|e| self.expr_str(e)).join(", ");
            self.p.push(&list);
        }
        if !spec.order_by.is_empty() {
            self.p.newline();
            self.p.pad_to(inner);
            self.p.push(&self.kw("ORDER BY"));
            self.p.push(" ");
            let list = self.order_by_str(&spec.order_by);
            self.p.push(&list);
        }
        if let Some(frame) = &spec.frame {
            self.p.newline();
            self.p.pad_to(inner);
            let units = self.kw(match frame.units {
                WindowFrameUnits::Rows => "ROWS",
                WindowFrameUnits::Range => "RANGE",
                WindowFrameUnits::Groups => "GROUPS",
            });
            self.p.push(&units);
            self.p.push(" ");
            match &frame.end {
                Some(end) => {
                    let between_col = self.p.col();
                    self.p.push(&self.kw("BETWEEN"));
                    self.p.push(" ");
                    let start = self.frame_bound_str(&frame.start);
                    self.p.push(&start);
                    self.p.newline();
                    self.p.pad_to(between_col);
                    self.p.push(&self.kw("AND"));
                    self.p.push(" ");
                    let end = self.frame_bound_str(end);
                    self.p.push(&end);
                }
                None => {
                    let start = self.frame_bound_str(&frame.start);
                    self.p.push(&start);
                }
            }
        }
        if let Some(exclusion) = &spec.exclude {
            self.p.newline();
            self.p.pad_to(inner);
            self.p.push(&self.kw("EXCLUDE"));
            self.p.push(" ");
            let exclusion = self.exclusion_str(exclusion);
            self.p.push(&exclusion);
        }
        self.p.newline();
        self.p.pad_to(over_col);
        self.p.push(")");
    }

    /// A subquery in expression position that does not fit inline:
    /// opens the paren, lays the query out one indent level deeper, and
    /// closes aligned with the opening line's indent.
    fn emit_subquery_parens(&mut self, query: &Query) {
        let open_col = self.p.col();
        self.p.push("(");
        self.p.newline();
        let base = open_col + self.options.indent;
        self.p.pad_to(base);
        self.emit_query(query, base);
        self.p.newline();
        self.p.pad_to(open_col);
        self.p.push(")");
    }

    /// Emits a boolean condition after a clause keyword: the first
    /// operand stays inline, each further top-level AND/OR gets its own
    /// river-aligned line.
    pub(crate) fn emit_condition(&mut self, expr: &Expr, base: usize) {
        let inline = self.expr_str(expr);
        if self.fits(inline.chars().count()) && !contains_multi_when_case(expr) {
            self.p.push(&inline);
            return;
        }
        let mut operands = Vec::new();
        flatten_bool(expr, None, &mut operands);
        for (i, (op, operand)) in operands.iter().enumerate() {
            if i > 0 || op.is_some() {
                if let Some(op) = op {
                    self.p.newline();
                    let word = self.kw(op);
                    let first_len = word.split(' ').next().unwrap_or(&word).chars().count();
                    self.p.pad_to(base + RIVER.saturating_sub(first_len));
                    self.p.push(&word);
                    self.p.push(" ");
                }
            }
            self.emit_expr(operand);
        }
    }

    /// Renders a whole query on one line (used for fit checks and small
    /// inline subqueries).
    pub(crate) fn query_str(&self, query: &Query) -> String {
        let mut out = String::new();
        if let Some(with) = &query.with {
            out.push_str(&self.kw("WITH"));
            out.push(' ');
            if with.recursive {
                out.push_str(&self.kw("RECURSIVE"));
                out.push(' ');
            }
            out.push_str(
                &with
                    .ctes
                    .iter()
                    .map(|cte| {
                        let mut s = self.ident(&cte.name);
                        if !cte.columns.is_empty() {
                            s.push_str(&format!(
                                " ({})",
                                cte.columns.iter().map(|c| self.ident(c)).join(", ")
                            ));
                        }
                        s.push(' ');
                        s.push_str(&self.kw("AS"));
                        match cte.materialized {
                            Some(true) => {
                                s.push(' ');
                                s.push_str(&self.kw("MATERIALIZED"));
                            }
                            Some(false) => {
                                s.push(' ');
                                s.push_str(&self.kw("NOT MATERIALIZED"));
                            }
                            None => {}
                        }
                        s.push_str(" (");
                        s.push_str(&self.query_str(&cte.query));
                        s.push(')');
                        s
                    })
                    .join(", "),
            );
            out.push(' ');
        }
        out.push_str(&self.query_body_str(&query.body));
        if !query.order_by.is_empty() {
            out.push(' ');
            out.push_str(&self.kw("ORDER BY"));
            out.push(' ');
            out.push_str(&self.order_by_str(&query.order_by));
        }
        if let Some(limit) = &query.limit {
            out.push(' ');
            out.push_str(&self.kw("LIMIT"));
            out.push(' ');
            match &limit.quantity {
                Some(expr) => out.push_str(&self.expr_str(expr)),
                None => out.push_str(&self.kw("ALL")),
            }
        }
        if let Some(offset) = &query.offset {
            out.push(' ');
            out.push_str(&self.kw("OFFSET"));
            out.push(' ');
            out.push_str(&self.expr_str(&offset.value));
            if let Some(rows) = &offset.rows {
                out.push(' ');
                out.push_str(&self.kw(rows));
            }
        }
        if let Some(fetch) = &query.fetch {
            out.push(' ');
            out.push_str(&self.fetch_str(fetch));
        }
        for locking in &query.locking {
            out.push(' ');
            out.push_str(&self.locking_str(locking));
        }
        out
    }

    fn query_body_str(&self, body: &QueryBody) -> String {
        match body {
            QueryBody::Select(select) => self.select_str(select),
            QueryBody::Nested(query) => format!("({})", self.query_str(query)),
            QueryBody::Values(values) => {
                let mut out = self.kw("VALUES");
                out.push(' ');
                out.push_str(
                    &values
                        .rows
                        .iter()
                        .map(|row| {
                            format!(
                                "({})",
                                row.exprs.iter().map(|e| self.expr_str(e)).join(", ")
                            )
                        })
                        .join(", "),
                );
                out
            }
            QueryBody::SetOperation {
                left,
                op,
                quantifier,
                right,
            } => {
                let mut out = self.query_body_str(left);
                out.push(' ');
                out.push_str(&self.kw(op.as_str()));
                match quantifier {
                    Some(sqlriver_ast::expression::SetQuantifier::All) => {
                        out.push(' ');
                        out.push_str(&self.kw("ALL"));
                    }
                    Some(sqlriver_ast::expression::SetQuantifier::Distinct) => {
                        out.push(' ');
                        out.push_str(&self.kw("DISTINCT"));
                    }
                    None => {}
                }
                out.push(' ');
                out.push_str(&self.query_body_str(right));
                out
            }
        }
    }
}

/// True when the expression contains a CASE with more than one WHEN arm
/// at the top level of a boolean chain.
fn contains_multi_when_case(expr: &Expr) -> bool {
    match expr {
        Expr::Case(case) => case.when_clauses.len() > 1,
        Expr::BinaryOp { left, op, right }
            if matches!(op, BinaryOperator::And | BinaryOperator::Or) =>
        {
            contains_multi_when_case(left) || contains_multi_when_case(right)
        }
        _ => false,
    }
}

/// Flattens a left-associative AND/OR tree into `(operator, operand)`
/// pairs; the first pair has no operator.
pub(crate) fn flatten_bool<'e>(
    expr: &'e Expr,
    op: Option<&'static str>,
    out: &mut Vec<(Option<&'static str>, &'e Expr)>,
) {
    match expr {
        Expr::BinaryOp { left, op: node_op, right }
            if matches!(node_op, BinaryOperator::And | BinaryOperator::Or) =>
        {
            let word = match node_op {
                BinaryOperator::And => "AND",
                _ => "OR",
            };
            flatten_bool(left, op, out);
            flatten_bool(right, Some(word), out);
        }
        _ => out.push((op, expr)),
    }
}
