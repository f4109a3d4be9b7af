//! Query expression parsing: SELECT cores, set operations, WITH lists
//! and the trailing limiting clauses.

#[cfg(not(feature = "std"))]
use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec,
    vec::Vec,
};

use sqlriver_ast::{
    expression::{
        Cte, CteCycle, CteSearch, Distinct, Expr, FetchClause, LimitClause, LockWait,
        LockingClause, NamedWindow, OffsetClause, OrderByExpr, Query, QueryBody, Select,
        SelectItem, SetOperator, SetQuantifier, Values, ValuesRow, With,
    },
    types::Ident,
};
use sqlriver_core::{Dialect, Keyword, Span, TokenKind};

use crate::{error::ParserError, parser::Parser};

impl<'a, D: Dialect> Parser<'a, D> {
    /// Parses a full query expression.
    pub fn parse_query(&mut self, allow_with: bool) -> Result<Query, ParserError> {
        let with = if allow_with && self.peek_keyword(Keyword::WITH) {
            Some(self.parse_with()?)
        } else {
            None
        };
        let body = self.parse_query_body()?;
        let mut query = Query {
            with,
            body,
            order_by: vec![],
            order_by_offset: None,
            limit: None,
            offset: None,
            fetch: None,
            locking: vec![],
        };
        if self.parse_keywords(&[Keyword::ORDER, Keyword::BY]) {
            query.order_by_offset = Some(self.peek_start());
            query.order_by = self.parse_comma_separated(Parser::parse_order_by_expr)?;
        }
        // LIMIT / OFFSET / FETCH come in any order.
        loop {
            if query.limit.is_none() && self.parse_keyword(Keyword::LIMIT) {
                query.limit = Some(if self.parse_keyword(Keyword::ALL) {
                    LimitClause { quantity: None }
                } else {
                    LimitClause {
                        quantity: Some(self.parse_expr()?),
                    }
                });
                // MySQL `LIMIT o, n`.
                if self.parse_punct(',') {
                    let quantity = self.parse_expr()?;
                    let offset_value = match query.limit.take() {
                        Some(LimitClause {
                            quantity: Some(expr),
                        }) => expr,
                        _ => Expr::Literal(sqlriver_ast::types::Literal::Number("0".into())),
                    };
                    query.offset = Some(OffsetClause {
                        value: offset_value,
                        rows: None,
                    });
                    query.limit = Some(LimitClause {
                        quantity: Some(quantity),
                    });
                }
                continue;
            }
            if query.offset.is_none() && self.parse_keyword(Keyword::OFFSET) {
                let value = self.parse_expr()?;
                let rows = self
                    .parse_one_of_keywords(&[Keyword::ROW, Keyword::ROWS])
                    .map(|kw| kw.as_str().to_string());
                query.offset = Some(OffsetClause { value, rows });
                continue;
            }
            if query.fetch.is_none() && self.peek_keyword(Keyword::FETCH) {
                query.fetch = Some(self.parse_fetch_clause()?);
                continue;
            }
            break;
        }
        while self.peek_keyword(Keyword::FOR) {
            query.locking.push(self.parse_locking_clause()?);
        }
        Ok(query)
    }

    /// Parses the `WITH [RECURSIVE]` clause.
    pub(crate) fn parse_with(&mut self) -> Result<With, ParserError> {
        self.expect_keyword(Keyword::WITH)?;
        let recursive = self.parse_keyword(Keyword::RECURSIVE);
        let ctes = self.parse_comma_separated(Parser::parse_cte)?;
        Ok(With { recursive, ctes })
    }

    fn parse_cte(&mut self) -> Result<Cte, ParserError> {
        let name = self.parse_identifier()?;
        let columns = if self.parse_punct('(') {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(')')?;
            cols
        } else {
            vec![]
        };
        self.expect_keyword(Keyword::AS)?;
        let materialized = if self.parse_keywords(&[Keyword::NOT, Keyword::MATERIALIZED]) {
            Some(false)
        } else if self.parse_keyword(Keyword::MATERIALIZED) {
            Some(true)
        } else {
            None
        };
        self.expect_punct('(')?;
        let query = self.descend(|parser| parser.parse_query(true))?;
        self.expect_punct(')')?;
        let search = if self.parse_keyword(Keyword::SEARCH) {
            Some(self.parse_cte_search()?)
        } else {
            None
        };
        let cycle = if self.parse_keyword(Keyword::CYCLE) {
            Some(self.parse_cte_cycle()?)
        } else {
            None
        };
        Ok(Cte {
            name,
            columns,
            materialized,
            query: Box::new(query),
            search,
            cycle,
        })
    }

    fn parse_cte_search(&mut self) -> Result<CteSearch, ParserError> {
        let depth_first = if self.parse_keyword(Keyword::DEPTH) {
            true
        } else {
            self.expect_keyword(Keyword::BREADTH)?;
            false
        };
        self.expect_keyword(Keyword::FIRST)?;
        self.expect_keyword(Keyword::BY)?;
        let by = self.parse_comma_separated(Parser::parse_identifier)?;
        self.expect_keyword(Keyword::SET)?;
        let set = self.parse_identifier()?;
        Ok(CteSearch {
            depth_first,
            by,
            set,
        })
    }

    fn parse_cte_cycle(&mut self) -> Result<CteCycle, ParserError> {
        let columns = self.parse_comma_separated(Parser::parse_identifier)?;
        self.expect_keyword(Keyword::SET)?;
        let set = self.parse_identifier()?;
        let using = if self.parse_keyword(Keyword::USING) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(CteCycle { columns, set, using })
    }

    /// Parses a query body with left-associative set operations.
    fn parse_query_body(&mut self) -> Result<QueryBody, ParserError> {
        let mut body = self.parse_query_primary()?;
        loop {
            let op = if self.parse_keyword(Keyword::UNION) {
                SetOperator::Union
            } else if self.parse_keyword(Keyword::INTERSECT) {
                SetOperator::Intersect
            } else if self.parse_keyword(Keyword::EXCEPT) {
                SetOperator::Except
            } else if self.parse_keyword(Keyword::MINUS) {
                SetOperator::Minus
            } else {
                break;
            };
            let quantifier = if self.parse_keyword(Keyword::ALL) {
                Some(SetQuantifier::All)
            } else if self.parse_keyword(Keyword::DISTINCT) {
                Some(SetQuantifier::Distinct)
            } else {
                None
            };
            let right = self.parse_query_primary()?;
            body = QueryBody::SetOperation {
                left: Box::new(body),
                op,
                quantifier,
                right: Box::new(right),
            };
        }
        Ok(body)
    }

    fn parse_query_primary(&mut self) -> Result<QueryBody, ParserError> {
        if self.peek_punct('(') {
            self.expect_punct('(')?;
            let inner = self.descend(|parser| parser.parse_query(true))?;
            self.expect_punct(')')?;
            return Ok(QueryBody::Nested(Box::new(inner)));
        }
        if self.peek_keyword(Keyword::VALUES) {
            return Ok(QueryBody::Values(self.parse_values()?));
        }
        Ok(QueryBody::Select(Box::new(self.parse_select_core()?)))
    }

    /// Parses a `VALUES` constructor.
    pub(crate) fn parse_values(&mut self) -> Result<Values, ParserError> {
        self.expect_keyword(Keyword::VALUES)?;
        let rows = self.parse_comma_separated(|parser| {
            let start = parser.peek_start();
            parser.expect_punct('(')?;
            let exprs = parser.parse_comma_separated(Parser::parse_expr)?;
            parser.expect_punct(')')?;
            Ok(ValuesRow {
                exprs,
                span: Span::new(start, parser.prev_end()),
            })
        })?;
        Ok(Values { rows })
    }

    /// Parses one SELECT core.
    fn parse_select_core(&mut self) -> Result<Select, ParserError> {
        self.expect_keyword(Keyword::SELECT)?;
        let mut select = Select {
            distinct: None,
            top: None,
            straight_join: false,
            projection: vec![],
            into: None,
            from: vec![],
            from_offset: None,
            selection: None,
            selection_offset: None,
            group_by: vec![],
            group_by_offset: None,
            having: None,
            having_offset: None,
            windows: vec![],
        };
        if self.parse_keyword(Keyword::ALL) {
            select.distinct = Some(Distinct::All);
        } else if self.parse_keyword(Keyword::DISTINCT) {
            select.distinct = Some(if self.parse_keyword(Keyword::ON) {
                self.expect_punct('(')?;
                let exprs = self.parse_comma_separated(Parser::parse_expr)?;
                self.expect_punct(')')?;
                Distinct::DistinctOn(exprs)
            } else {
                Distinct::Distinct
            });
        }
        if self.parse_keyword(Keyword::TOP) {
            // Bind tighter than `*` so `TOP 10 *` keeps its wildcard.
            select.top = Some(self.parse_subexpr(Self::MULTIPLICATIVE_PREC)?);
        }
        if self.parse_keyword(Keyword::STRAIGHT_JOIN) {
            select.straight_join = true;
        }
        select.projection = self.parse_comma_separated(Parser::parse_select_item)?;
        if self.parse_keyword(Keyword::INTO) {
            select.into = Some(self.parse_object_name()?);
        }
        if self.parse_keyword(Keyword::FROM) {
            select.from_offset = Some(self.peek_start());
            select.from = self.parse_comma_separated(Parser::parse_table_with_joins)?;
        }
        if self.parse_keyword(Keyword::WHERE) {
            select.selection_offset = Some(self.peek_start());
            select.selection = Some(self.parse_expr()?);
        }
        if self.parse_keywords(&[Keyword::GROUP, Keyword::BY]) {
            select.group_by_offset = Some(self.peek_start());
            select.group_by = self.parse_comma_separated(Parser::parse_expr)?;
        }
        if self.parse_keyword(Keyword::HAVING) {
            select.having_offset = Some(self.peek_start());
            select.having = Some(self.parse_expr()?);
        }
        if self.parse_keyword(Keyword::WINDOW) {
            select.windows = self.parse_comma_separated(|parser| {
                let name = parser.parse_identifier()?;
                parser.expect_keyword(Keyword::AS)?;
                parser.expect_punct('(')?;
                let spec = parser.parse_window_spec()?;
                parser.expect_punct(')')?;
                Ok(NamedWindow { name, spec })
            })?;
        }
        Ok(select)
    }

    /// Parses one select-list item, recording its source span.
    pub(crate) fn parse_select_item(&mut self) -> Result<SelectItem, ParserError> {
        let start = self.peek_start();
        let expr = self.parse_expr()?;
        let (alias, explicit_as) = self.parse_optional_alias()?;
        Ok(SelectItem {
            expr,
            alias,
            explicit_as,
            span: Span::new(start, self.prev_end()),
        })
    }

    /// `[AS] <alias>`: with AS any identifier-capable word is accepted;
    /// without AS only plain or quoted identifier tokens, so clause
    /// keywords are never eaten.
    pub(crate) fn parse_optional_alias(
        &mut self,
    ) -> Result<(Option<Ident>, bool), ParserError> {
        if self.parse_keyword(Keyword::AS) {
            return Ok((Some(self.parse_identifier()?), true));
        }
        let aliasable = matches!(
            self.cursor.peek().map(|t| &t.kind),
            Some(TokenKind::Ident | TokenKind::QuotedIdent(_))
        );
        if aliasable {
            return Ok((Some(self.parse_identifier()?), false));
        }
        Ok((None, false))
    }

    /// Parses one `ORDER BY` sort key.
    pub(crate) fn parse_order_by_expr(&mut self) -> Result<OrderByExpr, ParserError> {
        let expr = self.parse_expr()?;
        let asc = if self.parse_keyword(Keyword::ASC) {
            Some(true)
        } else if self.parse_keyword(Keyword::DESC) {
            Some(false)
        } else {
            None
        };
        let nulls_first = if self.parse_keyword(Keyword::NULLS) {
            if self.parse_keyword(Keyword::FIRST) {
                Some(true)
            } else {
                self.expect_keyword(Keyword::LAST)?;
                Some(false)
            }
        } else {
            None
        };
        Ok(OrderByExpr {
            expr,
            asc,
            nulls_first,
        })
    }

    fn parse_fetch_clause(&mut self) -> Result<FetchClause, ParserError> {
        self.expect_keyword(Keyword::FETCH)?;
        let first = if self.parse_keyword(Keyword::FIRST) {
            true
        } else {
            self.expect_keyword(Keyword::NEXT)?;
            false
        };
        let quantity = if self.peek_keyword(Keyword::ROW) || self.peek_keyword(Keyword::ROWS) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let percent = self.parse_keyword(Keyword::PERCENT);
        if !self.parse_keyword(Keyword::ROWS) {
            self.expect_keyword(Keyword::ROW)?;
        }
        let with_ties = if self.parse_keyword(Keyword::ONLY) {
            false
        } else {
            self.expect_keywords(&[Keyword::WITH, Keyword::TIES])?;
            true
        };
        Ok(FetchClause {
            first,
            quantity,
            percent,
            with_ties,
        })
    }

    fn parse_locking_clause(&mut self) -> Result<LockingClause, ParserError> {
        self.expect_keyword(Keyword::FOR)?;
        let update = if self.parse_keyword(Keyword::UPDATE) {
            true
        } else {
            self.expect_keyword(Keyword::SHARE)?;
            false
        };
        let of = if self.parse_keyword(Keyword::OF) {
            self.parse_comma_separated(Parser::parse_object_name)?
        } else {
            vec![]
        };
        let wait = if self.parse_keywords(&[Keyword::SKIP, Keyword::LOCKED]) {
            Some(LockWait::SkipLocked)
        } else if self.parse_keyword(Keyword::NOWAIT) {
            Some(LockWait::Nowait)
        } else {
            None
        };
        Ok(LockingClause { update, of, wait })
    }
}
