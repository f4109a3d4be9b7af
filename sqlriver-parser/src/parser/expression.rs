//! The Pratt-style expression parser.

#[cfg(not(feature = "std"))]
use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec,
    vec::Vec,
};

use sqlriver_ast::{
    expression::{
        BinaryOperator, CaseExpr, CaseWhen, Expr, FrameExclusion, FunctionArg, FunctionCall,
        Quantifier, Subscript, UnaryOperator, WindowFrame, WindowFrameBound, WindowFrameUnits,
        WindowSpec,
    },
    types::{Ident, Literal, ObjectName},
};
use sqlriver_core::{Dialect, DialectParserConf, Keyword, ParamKind, StringKind, TokenKind};

use crate::{error::ParserError, parser::Parser};

impl<'a, D: Dialect> Parser<'a, D> {
    pub(crate) const OR_PREC: u8 = 5;
    pub(crate) const AND_PREC: u8 = 10;
    pub(crate) const UNARY_NOT_PREC: u8 = 15;
    pub(crate) const COMPARISON_PREC: u8 = 20;
    pub(crate) const IS_PREC: u8 = 22;
    pub(crate) const BETWEEN_PREC: u8 = 25;
    pub(crate) const ADDITIVE_PREC: u8 = 30;
    pub(crate) const MULTIPLICATIVE_PREC: u8 = 35;
    pub(crate) const CARET_PREC: u8 = 38;
    pub(crate) const UNARY_SIGN_PREC: u8 = 40;
    pub(crate) const JSON_OP_PREC: u8 = 42;
    pub(crate) const CAST_PREC: u8 = 50;
    pub(crate) const POSTFIX_PREC: u8 = 60;

    /// Parses a new expression.
    pub fn parse_expr(&mut self) -> Result<Expr, ParserError> {
        self.parse_subexpr(0)
    }

    /// Parses operators until the precedence drops to `precedence` or
    /// below.
    pub(crate) fn parse_subexpr(&mut self, precedence: u8) -> Result<Expr, ParserError> {
        let mut expr = self.parse_prefix()?;
        loop {
            let next_precedence = self.next_precedence();
            if precedence >= next_precedence {
                break;
            }
            expr = self.parse_infix(expr, next_precedence)?;
        }
        Ok(expr)
    }

    /// Parses an expression prefix.
    fn parse_prefix(&mut self) -> Result<Expr, ParserError> {
        let token = match self.cursor.peek() {
            Some(token) => token.clone(),
            None => return self.expected("an expression", None),
        };
        match &token.kind {
            TokenKind::Number => {
                self.cursor.next();
                Ok(Expr::Literal(Literal::Number(token.text)))
            }
            TokenKind::Str(kind) => {
                self.cursor.next();
                let mut text = token.text;
                // `U&'...' UESCAPE '<c>'` stays one literal; the escape
                // character may itself be an operator such as `+`.
                if *kind == StringKind::Unicode && self.parse_keyword(Keyword::UESCAPE) {
                    let escape = self.cursor.bump();
                    if !matches!(escape.kind, TokenKind::Str(_)) {
                        return self.expected("a string after UESCAPE", Some(&escape));
                    }
                    text.push_str(" UESCAPE ");
                    text.push_str(&escape.text);
                }
                Ok(Expr::Literal(Literal::String { kind: *kind, text }))
            }
            TokenKind::Parameter(_) => {
                self.cursor.next();
                Ok(Expr::Parameter(token.text))
            }
            TokenKind::Keyword(Keyword::TRUE) => {
                self.cursor.next();
                Ok(Expr::Literal(Literal::Boolean(true)))
            }
            TokenKind::Keyword(Keyword::FALSE) => {
                self.cursor.next();
                Ok(Expr::Literal(Literal::Boolean(false)))
            }
            TokenKind::Keyword(Keyword::NULL) => {
                self.cursor.next();
                Ok(Expr::Literal(Literal::Null))
            }
            TokenKind::Keyword(Keyword::CASE) => self.parse_case_expr(),
            TokenKind::Keyword(Keyword::CAST) => self.parse_cast_expr(),
            TokenKind::Keyword(Keyword::EXISTS) => self.parse_exists_expr(false),
            TokenKind::Keyword(Keyword::INTERVAL) => self.parse_interval_expr(),
            TokenKind::Keyword(Keyword::NOT) => {
                if self.cursor.peek_nth(1).is_some_and(|t| t.is_keyword(Keyword::EXISTS)) {
                    self.cursor.next();
                    return self.parse_exists_expr(true);
                }
                self.cursor.next();
                Ok(Expr::UnaryOp {
                    op: UnaryOperator::Not,
                    expr: Box::new(self.parse_subexpr(Self::UNARY_NOT_PREC)?),
                })
            }
            TokenKind::Keyword(Keyword::ARRAY) if self.peek_nth_is_punct(1, '[') => {
                self.cursor.next();
                self.expect_punct('[')?;
                let items = if self.parse_punct(']') {
                    vec![]
                } else {
                    let items = self.parse_comma_separated(Parser::parse_expr)?;
                    self.expect_punct(']')?;
                    items
                };
                Ok(Expr::Array(items))
            }
            TokenKind::Keyword(Keyword::ROW) if self.peek_nth_is_punct(1, '(') => {
                self.cursor.next();
                self.expect_punct('(')?;
                let items = self.parse_comma_separated(Parser::parse_expr)?;
                self.expect_punct(')')?;
                Ok(Expr::Row(items))
            }
            TokenKind::Operator if token.text == "-" => {
                self.cursor.next();
                Ok(Expr::UnaryOp {
                    op: UnaryOperator::Minus,
                    expr: Box::new(self.parse_subexpr(Self::UNARY_SIGN_PREC)?),
                })
            }
            TokenKind::Operator if token.text == "+" => {
                self.cursor.next();
                Ok(Expr::UnaryOp {
                    op: UnaryOperator::Plus,
                    expr: Box::new(self.parse_subexpr(Self::UNARY_SIGN_PREC)?),
                })
            }
            TokenKind::Operator if token.text == "~" => {
                self.cursor.next();
                Ok(Expr::UnaryOp {
                    op: UnaryOperator::BitwiseNot,
                    expr: Box::new(self.parse_subexpr(Self::UNARY_SIGN_PREC)?),
                })
            }
            TokenKind::Operator if token.text == "*" => {
                self.cursor.next();
                Ok(Expr::Wildcard)
            }
            TokenKind::Punct('(') => self.parse_parenthesized_expr(),
            TokenKind::Ident | TokenKind::QuotedIdent(_) => self.parse_word_expr(),
            TokenKind::Keyword(kw) if !super::RESERVED_FOR_IDENT.contains(kw) => {
                self.parse_word_expr()
            }
            _ => self.expected("an expression", Some(&token)),
        }
    }

    /// `( ... )`: a subquery, a nested expression or a bare tuple.
    fn parse_parenthesized_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_punct('(')?;
        self.descend(|parser| {
            let expr = if parser.next_is_query_start() {
                Expr::Subquery(Box::new(parser.parse_query(true)?))
            } else {
                let first = parser.parse_expr()?;
                if parser.parse_punct(',') {
                    let mut items = vec![first];
                    items.append(&mut parser.parse_comma_separated(Parser::parse_expr)?);
                    Expr::Row(items)
                } else {
                    Expr::Nested(Box::new(first))
                }
            };
            parser.expect_punct(')')?;
            Ok(expr)
        })
    }

    /// An identifier path, possibly a wildcard or a function call.
    fn parse_word_expr(&mut self) -> Result<Expr, ParserError> {
        let mut parts = vec![self.parse_identifier()?];
        let mut wildcard = false;
        while self.parse_punct('.') {
            if self.cursor.next_if(|t| t.is_op("*")).is_some() {
                wildcard = true;
                break;
            }
            parts.push(self.parse_identifier()?);
        }
        if wildcard {
            return Ok(Expr::QualifiedWildcard(parts));
        }
        if self.peek_punct('(') {
            let call = self.parse_function_call(ObjectName(parts))?;
            return Ok(Expr::Function(Box::new(call)));
        }
        if parts.len() == 1 {
            let mut parts = parts;
            Ok(Expr::Identifier(parts.remove(0)))
        } else {
            Ok(Expr::CompoundIdentifier(parts))
        }
    }

    fn parse_case_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_keyword(Keyword::CASE)?;
        let operand = if self.peek_keyword(Keyword::WHEN) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let mut when_clauses = vec![];
        while self.parse_keyword(Keyword::WHEN) {
            let condition = self.parse_expr()?;
            self.expect_keyword(Keyword::THEN)?;
            let result = self.parse_expr()?;
            when_clauses.push(CaseWhen { condition, result });
        }
        if when_clauses.is_empty() {
            let found = self.cursor.peek().cloned();
            return self.expected("WHEN in CASE expression", found.as_ref());
        }
        let else_result = if self.parse_keyword(Keyword::ELSE) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::END)?;
        Ok(Expr::Case(Box::new(CaseExpr {
            operand,
            when_clauses,
            else_result,
        })))
    }

    fn parse_cast_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_keyword(Keyword::CAST)?;
        self.expect_punct('(')?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::AS)?;
        let data_type = self.parse_data_type()?;
        self.expect_punct(')')?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
            double_colon: false,
        })
    }

    fn parse_exists_expr(&mut self, negated: bool) -> Result<Expr, ParserError> {
        self.expect_keyword(Keyword::EXISTS)?;
        self.expect_punct('(')?;
        let subquery = self.descend(|parser| parser.parse_query(true))?;
        self.expect_punct(')')?;
        Ok(Expr::Exists {
            negated,
            subquery: Box::new(subquery),
        })
    }

    fn parse_interval_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_keyword(Keyword::INTERVAL)?;
        let value = self.parse_subexpr(Self::UNARY_SIGN_PREC)?;
        let mut qualifier = vec![];
        loop {
            if self.parse_keyword(Keyword::TO) {
                qualifier.push("TO".to_string());
                continue;
            }
            let is_unit = self.cursor.peek().is_some_and(|t| {
                t.kind == TokenKind::Ident && is_interval_unit(&t.text)
            });
            if is_unit {
                qualifier.push(self.cursor.bump().text);
            } else {
                break;
            }
        }
        Ok(Expr::Interval {
            value: Box::new(value),
            qualifier,
        })
    }

    /// Gets the precedence of the next token as an infix operator.
    fn next_precedence(&self) -> u8 {
        let token = match self.cursor.peek() {
            Some(token) => token,
            None => return 0,
        };
        match &token.kind {
            TokenKind::Keyword(Keyword::OR) => Self::OR_PREC,
            TokenKind::Keyword(Keyword::AND) => Self::AND_PREC,
            TokenKind::Keyword(Keyword::IS) => Self::IS_PREC,
            TokenKind::Keyword(Keyword::NOT) => {
                // The precedence of NOT varies with the keyword that
                // follows it; standalone NOT is not an infix operator.
                match self.cursor.peek_nth(1).and_then(|t| t.keyword()) {
                    Some(Keyword::IN | Keyword::BETWEEN | Keyword::LIKE | Keyword::ILIKE) => {
                        Self::BETWEEN_PREC
                    }
                    _ => 0,
                }
            }
            TokenKind::Keyword(Keyword::IN | Keyword::BETWEEN | Keyword::LIKE | Keyword::ILIKE) => {
                Self::BETWEEN_PREC
            }
            TokenKind::Keyword(Keyword::ESCAPE) => Self::BETWEEN_PREC,
            TokenKind::Operator => match token.text.as_str() {
                "=" | "<" | ">" | "<=" | ">=" | "<>" | "!=" | "=>" => Self::COMPARISON_PREC,
                "|" => 27,
                "&" => 28,
                "<<" | ">>" => 29,
                "+" | "-" => Self::ADDITIVE_PREC,
                "||" => 31,
                "*" | "/" | "%" => Self::MULTIPLICATIVE_PREC,
                "^" => Self::CARET_PREC,
                "->" | "->>" | "#>" | "#>>" | "@>" | "<@" | "@@" | "?" | "?|" | "?&" | "~"
                | "~*" | "!~" | "!~*" | "#" => Self::JSON_OP_PREC,
                "::" => Self::CAST_PREC,
                ":" if self.dialect.parser_conf().supports_variant_path() => Self::POSTFIX_PREC,
                _ => 0,
            },
            TokenKind::Punct('[') => Self::POSTFIX_PREC,
            _ => 0,
        }
    }

    /// Parses an operator following an expression.
    fn parse_infix(&mut self, expr: Expr, precedence: u8) -> Result<Expr, ParserError> {
        let token = match self.cursor.next() {
            Some(token) => token,
            None => return self.expected("an infix operator", None),
        };
        let expr = Box::new(expr);
        match &token.kind {
            TokenKind::Keyword(Keyword::AND) => Ok(Expr::BinaryOp {
                left: expr,
                op: BinaryOperator::And,
                right: Box::new(self.parse_subexpr(precedence)?),
            }),
            TokenKind::Keyword(Keyword::OR) => Ok(Expr::BinaryOp {
                left: expr,
                op: BinaryOperator::Or,
                right: Box::new(self.parse_subexpr(precedence)?),
            }),
            TokenKind::Keyword(Keyword::IS) => {
                let negated = self.parse_keyword(Keyword::NOT);
                if self.parse_keyword(Keyword::NULL) {
                    Ok(Expr::IsNull { expr, negated })
                } else if self.parse_keywords(&[Keyword::DISTINCT, Keyword::FROM]) {
                    Ok(Expr::IsDistinctFrom {
                        left: expr,
                        negated,
                        right: Box::new(self.parse_subexpr(Self::IS_PREC)?),
                    })
                } else if self.parse_keyword(Keyword::TRUE) {
                    Ok(is_bool_test(expr, negated, true))
                } else if self.parse_keyword(Keyword::FALSE) {
                    Ok(is_bool_test(expr, negated, false))
                } else {
                    let found = self.cursor.peek().cloned();
                    self.expected("NULL, TRUE, FALSE or DISTINCT FROM after IS", found.as_ref())
                }
            }
            TokenKind::Keyword(Keyword::NOT) => {
                if self.parse_keyword(Keyword::IN) {
                    self.parse_in(expr, true)
                } else if self.parse_keyword(Keyword::BETWEEN) {
                    self.parse_between(expr, true)
                } else if self.parse_keyword(Keyword::LIKE) {
                    self.parse_like(expr, BinaryOperator::NotLike, precedence)
                } else if self.parse_keyword(Keyword::ILIKE) {
                    self.parse_like(expr, BinaryOperator::NotILike, precedence)
                } else {
                    let found = self.cursor.peek().cloned();
                    self.expected("IN, BETWEEN or LIKE after NOT", found.as_ref())
                }
            }
            TokenKind::Keyword(Keyword::IN) => self.parse_in(expr, false),
            TokenKind::Keyword(Keyword::BETWEEN) => self.parse_between(expr, false),
            TokenKind::Keyword(Keyword::LIKE) => {
                self.parse_like(expr, BinaryOperator::Like, precedence)
            }
            TokenKind::Keyword(Keyword::ILIKE) => {
                self.parse_like(expr, BinaryOperator::ILike, precedence)
            }
            TokenKind::Keyword(Keyword::ESCAPE) => Ok(Expr::BinaryOp {
                left: expr,
                op: BinaryOperator::Custom("ESCAPE".to_string()),
                right: Box::new(self.parse_subexpr(precedence)?),
            }),
            TokenKind::Punct('[') => {
                let subscript = self.parse_subscript()?;
                self.expect_punct(']')?;
                Ok(Expr::Subscript {
                    expr,
                    subscript: Box::new(subscript),
                })
            }
            TokenKind::Operator if token.text == "::" => Ok(Expr::Cast {
                expr,
                data_type: self.parse_data_type()?,
                double_colon: true,
            }),
            TokenKind::Operator if token.text == ":" => Ok(Expr::VariantPath {
                expr,
                path: self.parse_identifier()?,
            }),
            TokenKind::Operator => {
                let op = binary_operator_for(&token.text);
                if is_comparison(&token.text) {
                    if let Some(q) = self.parse_one_of_keywords(&[
                        Keyword::ALL,
                        Keyword::ANY,
                        Keyword::SOME,
                    ]) {
                        let quantifier = match q {
                            Keyword::ALL => Quantifier::All,
                            Keyword::ANY => Quantifier::Any,
                            _ => Quantifier::Some,
                        };
                        self.expect_punct('(')?;
                        let subquery = self.descend(|parser| parser.parse_query(true))?;
                        self.expect_punct(')')?;
                        return Ok(Expr::Quantified {
                            expr,
                            op,
                            quantifier,
                            subquery: Box::new(subquery),
                        });
                    }
                }
                Ok(Expr::BinaryOp {
                    left: expr,
                    op,
                    right: Box::new(self.parse_subexpr(precedence)?),
                })
            }
            _ => self.expected("an infix operator", Some(&token)),
        }
    }

    fn parse_like(
        &mut self,
        expr: Box<Expr>,
        op: BinaryOperator,
        precedence: u8,
    ) -> Result<Expr, ParserError> {
        Ok(Expr::BinaryOp {
            left: expr,
            op,
            right: Box::new(self.parse_subexpr(precedence)?),
        })
    }

    /// `[ NOT ] IN ( <list> | <subquery> )`.
    fn parse_in(&mut self, expr: Box<Expr>, negated: bool) -> Result<Expr, ParserError> {
        self.expect_punct('(')?;
        let result = self.descend(|parser| {
            if parser.next_is_query_start() {
                Ok(Expr::InSubquery {
                    expr,
                    negated,
                    subquery: Box::new(parser.parse_query(true)?),
                })
            } else {
                Ok(Expr::InList {
                    expr,
                    negated,
                    list: parser.parse_comma_separated(Parser::parse_expr)?,
                })
            }
        })?;
        self.expect_punct(')')?;
        Ok(result)
    }

    /// `[NOT] BETWEEN <low> AND <high>`.
    fn parse_between(&mut self, expr: Box<Expr>, negated: bool) -> Result<Expr, ParserError> {
        let low = self.parse_subexpr(Self::BETWEEN_PREC)?;
        self.expect_keyword(Keyword::AND)?;
        let high = self.parse_subexpr(Self::BETWEEN_PREC)?;
        Ok(Expr::Between {
            expr,
            negated,
            low: Box::new(low),
            high: Box::new(high),
        })
    }

    /// `[ <index> ]` or `[ <lo> : <hi> ]`.
    fn parse_subscript(&mut self) -> Result<Subscript, ParserError> {
        // `[:hi]`
        if self.cursor.next_if(|t| t.is_op(":")).is_some() {
            let upper = if self.peek_punct(']') {
                None
            } else {
                Some(self.parse_expr()?)
            };
            return Ok(Subscript::Slice { lower: None, upper });
        }
        let lower = self.parse_expr()?;
        // A colon parameter token such as `:hi` is really `:` + `hi` in
        // subscript position.
        if let Some(token) = self
            .cursor
            .next_if(|t| t.kind == TokenKind::Parameter(ParamKind::Colon) && !t.text.contains('\''))
        {
            let upper = token.text.trim_start_matches(':').to_string();
            return Ok(Subscript::Slice {
                lower: Some(lower),
                upper: Some(Expr::Identifier(Ident::new(upper))),
            });
        }
        if self.cursor.next_if(|t| t.is_op(":")).is_some() {
            let upper = if self.peek_punct(']') {
                None
            } else {
                Some(self.parse_expr()?)
            };
            return Ok(Subscript::Slice {
                lower: Some(lower),
                upper,
            });
        }
        Ok(Subscript::Index(lower))
    }

    /// Parses a function call; the opening paren has not been consumed.
    pub(crate) fn parse_function_call(
        &mut self,
        name: ObjectName,
    ) -> Result<FunctionCall, ParserError> {
        self.expect_punct('(')?;
        let mut call = FunctionCall {
            name,
            args: vec![],
            distinct: false,
            variadic: false,
            order_by: vec![],
            separator: None,
            within_group: vec![],
            filter: None,
            over: None,
        };
        if !self.peek_punct(')') {
            call.distinct = self.parse_keyword(Keyword::DISTINCT);
            if !call.distinct {
                call.variadic = self.parse_keyword(Keyword::VARIADIC);
            }
            call.args = self.parse_comma_separated(Parser::parse_function_arg)?;
            if self.parse_keywords(&[Keyword::ORDER, Keyword::BY]) {
                call.order_by = self.parse_comma_separated(Parser::parse_order_by_expr)?;
            }
            if self.parse_keyword(Keyword::SEPARATOR) {
                let token = self.cursor.bump();
                if let TokenKind::Str(kind) = token.kind {
                    call.separator = Some(Literal::String {
                        kind,
                        text: token.text,
                    });
                } else {
                    return self.expected("a string after SEPARATOR", Some(&token));
                }
            }
        }
        self.expect_punct(')')?;
        if self.parse_keywords(&[Keyword::WITHIN, Keyword::GROUP]) {
            self.expect_punct('(')?;
            self.expect_keywords(&[Keyword::ORDER, Keyword::BY])?;
            call.within_group = self.parse_comma_separated(Parser::parse_order_by_expr)?;
            self.expect_punct(')')?;
        }
        if self.parse_keyword(Keyword::FILTER) {
            self.expect_punct('(')?;
            self.expect_keyword(Keyword::WHERE)?;
            call.filter = Some(Box::new(self.parse_expr()?));
            self.expect_punct(')')?;
        }
        if self.parse_keyword(Keyword::OVER) {
            call.over = Some(self.parse_over_clause()?);
        }
        Ok(call)
    }

    fn parse_function_arg(&mut self) -> Result<FunctionArg, ParserError> {
        // `name => value` named argument.
        let named = matches!(
            self.cursor.peek().map(|t| &t.kind),
            Some(TokenKind::Ident | TokenKind::QuotedIdent(_))
        ) && self.cursor.peek_nth(1).is_some_and(|t| t.is_op("=>"));
        if named {
            let name = self.parse_identifier()?;
            self.cursor.next();
            let value = self.parse_expr()?;
            return Ok(FunctionArg::Named { name, value });
        }
        Ok(FunctionArg::Unnamed(self.parse_expr()?))
    }

    /// The window after `OVER`: a bare window name or a parenthesised
    /// specification.
    fn parse_over_clause(&mut self) -> Result<WindowSpec, ParserError> {
        if !self.peek_punct('(') {
            let name = self.parse_identifier()?;
            return Ok(WindowSpec {
                name: Some(name),
                partition_by: vec![],
                order_by: vec![],
                frame: None,
                exclude: None,
                parenthesized: false,
            });
        }
        self.expect_punct('(')?;
        let spec = self.parse_window_spec()?;
        self.expect_punct(')')?;
        Ok(spec)
    }

    /// The inside of a parenthesised window specification.
    pub(crate) fn parse_window_spec(&mut self) -> Result<WindowSpec, ParserError> {
        let mut spec = WindowSpec {
            name: None,
            partition_by: vec![],
            order_by: vec![],
            frame: None,
            exclude: None,
            parenthesized: true,
        };
        // An optional base window name comes first.
        if matches!(
            self.cursor.peek().map(|t| &t.kind),
            Some(TokenKind::Ident | TokenKind::QuotedIdent(_))
        ) {
            spec.name = Some(self.parse_identifier()?);
        }
        if self.parse_keywords(&[Keyword::PARTITION, Keyword::BY]) {
            spec.partition_by = self.parse_comma_separated(Parser::parse_expr)?;
        }
        if self.parse_keywords(&[Keyword::ORDER, Keyword::BY]) {
            spec.order_by = self.parse_comma_separated(Parser::parse_order_by_expr)?;
        }
        if let Some(units) = self.parse_one_of_keywords(&[
            Keyword::ROWS,
            Keyword::RANGE,
            Keyword::GROUPS,
        ]) {
            let units = match units {
                Keyword::ROWS => WindowFrameUnits::Rows,
                Keyword::RANGE => WindowFrameUnits::Range,
                _ => WindowFrameUnits::Groups,
            };
            let (start, end) = if self.parse_keyword(Keyword::BETWEEN) {
                let start = self.parse_frame_bound()?;
                self.expect_keyword(Keyword::AND)?;
                let end = self.parse_frame_bound()?;
                (start, Some(end))
            } else {
                (self.parse_frame_bound()?, None)
            };
            spec.frame = Some(WindowFrame { units, start, end });
        }
        if self.parse_keyword(Keyword::EXCLUDE) {
            spec.exclude = Some(self.parse_frame_exclusion()?);
        }
        Ok(spec)
    }

    fn parse_frame_bound(&mut self) -> Result<WindowFrameBound, ParserError> {
        if self.parse_keyword(Keyword::UNBOUNDED) {
            return if self.parse_keyword(Keyword::PRECEDING) {
                Ok(WindowFrameBound::Preceding(None))
            } else {
                self.expect_keyword(Keyword::FOLLOWING)?;
                Ok(WindowFrameBound::Following(None))
            };
        }
        if self.parse_keywords(&[Keyword::CURRENT, Keyword::ROW]) {
            return Ok(WindowFrameBound::CurrentRow);
        }
        let offset = self.parse_subexpr(Self::BETWEEN_PREC)?;
        if self.parse_keyword(Keyword::PRECEDING) {
            Ok(WindowFrameBound::Preceding(Some(Box::new(offset))))
        } else {
            self.expect_keyword(Keyword::FOLLOWING)?;
            Ok(WindowFrameBound::Following(Some(Box::new(offset))))
        }
    }

    fn parse_frame_exclusion(&mut self) -> Result<FrameExclusion, ParserError> {
        if self.parse_keywords(&[Keyword::CURRENT, Keyword::ROW]) {
            Ok(FrameExclusion::CurrentRow)
        } else if self.parse_keyword(Keyword::GROUP) {
            Ok(FrameExclusion::Group)
        } else if self.parse_keyword(Keyword::TIES) {
            Ok(FrameExclusion::Ties)
        } else if self.parse_keywords(&[Keyword::NO, Keyword::OTHERS]) {
            Ok(FrameExclusion::NoOthers)
        } else {
            let found = self.cursor.peek().cloned();
            self.expected("CURRENT ROW, GROUP, TIES or NO OTHERS", found.as_ref())
        }
    }

    /// True when the next tokens start a query (`SELECT`, `WITH`,
    /// `VALUES`, or a parenthesised one).
    pub(crate) fn next_is_query_start(&self) -> bool {
        match self.cursor.peek().and_then(|t| t.keyword()) {
            Some(Keyword::SELECT | Keyword::WITH | Keyword::VALUES) => true,
            _ => false,
        }
    }

    pub(crate) fn peek_punct(&self, ch: char) -> bool {
        self.cursor.peek().is_some_and(|t| t.is_punct(ch))
    }

    fn peek_nth_is_punct(&self, n: usize, ch: char) -> bool {
        self.cursor.peek_nth(n).is_some_and(|t| t.is_punct(ch))
    }
}

fn binary_operator_for(text: &str) -> BinaryOperator {
    match text {
        "+" => BinaryOperator::Plus,
        "-" => BinaryOperator::Minus,
        "*" => BinaryOperator::Multiply,
        "/" => BinaryOperator::Divide,
        "%" => BinaryOperator::Modulo,
        "||" => BinaryOperator::StringConcat,
        ">" => BinaryOperator::Greater,
        "<" => BinaryOperator::Less,
        ">=" => BinaryOperator::GreaterOrEqual,
        "<=" => BinaryOperator::LessOrEqual,
        "=" => BinaryOperator::Equal,
        "<>" | "!=" => BinaryOperator::NotEqual,
        "&" => BinaryOperator::BitwiseAnd,
        "|" => BinaryOperator::BitwiseOr,
        "^" => BinaryOperator::Caret,
        "<<" => BinaryOperator::LeftShift,
        ">>" => BinaryOperator::RightShift,
        "->" => BinaryOperator::Arrow,
        "->>" => BinaryOperator::LongArrow,
        "#>" => BinaryOperator::HashArrow,
        "#>>" => BinaryOperator::HashLongArrow,
        "@>" => BinaryOperator::AtArrow,
        "<@" => BinaryOperator::ArrowAt,
        "@@" => BinaryOperator::AtAt,
        "~" => BinaryOperator::Tilde,
        "~*" => BinaryOperator::TildeStar,
        "!~" => BinaryOperator::NotTilde,
        "!~*" => BinaryOperator::NotTildeStar,
        other => BinaryOperator::Custom(other.to_string()),
    }
}

fn is_comparison(text: &str) -> bool {
    matches!(text, "=" | "<" | ">" | "<=" | ">=" | "<>" | "!=")
}

fn is_bool_test(expr: Box<Expr>, negated: bool, value: bool) -> Expr {
    Expr::BinaryOp {
        left: expr,
        op: BinaryOperator::Custom(if negated { "IS NOT" } else { "IS" }.to_string()),
        right: Box::new(Expr::Literal(Literal::Boolean(value))),
    }
}

fn is_interval_unit(word: &str) -> bool {
    matches!(
        word.to_uppercase().as_str(),
        "YEAR" | "YEARS" | "MONTH" | "MONTHS" | "WEEK" | "WEEKS" | "DAY" | "DAYS" | "HOUR"
            | "HOURS" | "MINUTE" | "MINUTES" | "SECOND" | "SECONDS" | "QUARTER"
    )
}
