//! # sqlriver
//!
//! A multi-dialect SQL pretty-printer. Given a SQL source text it
//! produces a canonical, human-readable "river" rendering that preserves
//! semantics and stabilises after one reformat.
//!
//! The pipeline is a three-stage pull-through: tokenize → parse (with
//! optional per-statement recovery) → format. The facade in this crate
//! wires the stages: trim edge whitespace, tokenize, parse, format, and
//! append the terminal newline.
//!
//! ```
//! let out = sqlriver::format("select id from t where x = 1;", &sqlriver::Options::default());
//! assert_eq!(out.unwrap(), "SELECT id\n  FROM t\n WHERE x = 1;\n");
//! ```

#![deny(missing_docs)]
#![deny(unused_imports)]

mod error;
mod options;

pub use sqlriver_ast as ast;
pub use sqlriver_core as dialects;
pub use sqlriver_format as formatter;
pub use sqlriver_lexer as lexer;
pub use sqlriver_parser as parser;

use sqlriver_ast::statement::Statement;
use sqlriver_core::{
    ansi::AnsiDialect, bigquery::BigqueryDialect, exasol::ExasolDialect, mysql::MysqlDialect,
    oracle::OracleDialect, postgres::PostgresDialect, snowflake::SnowflakeDialect,
    sqlite::SqliteDialect, tsql::TsqlDialect, Dialect, DialectKind,
};
use sqlriver_lexer::Lexer;
use sqlriver_parser::{ParseError, Parser};

pub use self::{error::Error, options::Options};
pub use sqlriver_core::DialectKind as SqlDialect;
pub use sqlriver_format::{IdentifierCase, KeywordCase};

/// A callback invoked synchronously for every statement the parser
/// recovered from. It must not assume any particular statement order
/// beyond source order.
pub type RecoverCallback<'cb> = &'cb mut dyn FnMut(&ParseError);

/// Formats `input` and returns the formatted text.
///
/// Empty or whitespace-only input returns the empty string; non-empty
/// output always ends in exactly one `\n` (or `\r\n` when every newline
/// of the input was CRLF).
pub fn format(input: &str, options: &Options) -> Result<String, Error> {
    format_with(input, options, None)
}

/// Like [`format`], with a callback for recovered statements.
pub fn format_with(
    input: &str,
    options: &Options,
    on_recover: Option<RecoverCallback<'_>>,
) -> Result<String, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    let crlf = uses_crlf_only(input);
    let mut out = dispatch(options.dialect, |dialect| {
        dialect.format(trimmed, options, on_recover)
    })?;
    while out.ends_with(['\n', '\r', ' ', '\t']) {
        out.pop();
    }
    out.push('\n');
    if crlf {
        out = out.replace('\n', "\r\n");
    }
    Ok(out)
}

/// Parses `input` into its statement sequence, with the same error and
/// recovery behaviour as [`format`].
pub fn parse(input: &str, options: &Options) -> Result<Vec<Statement>, Error> {
    parse_with(input, options, None)
}

/// Like [`parse`], with a callback for recovered statements.
pub fn parse_with(
    input: &str,
    options: &Options,
    on_recover: Option<RecoverCallback<'_>>,
) -> Result<Vec<Statement>, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    dispatch(options.dialect, |dialect| {
        dialect.parse(trimmed, options, on_recover)
    })
}

fn dispatch<T>(
    kind: DialectKind,
    f: impl FnOnce(&dyn DynRun) -> Result<T, Error>,
) -> Result<T, Error> {
    match kind {
        DialectKind::Postgres => f(&PostgresDialect),
        DialectKind::Mysql => f(&MysqlDialect),
        DialectKind::Tsql => f(&TsqlDialect),
        DialectKind::Oracle => f(&OracleDialect),
        DialectKind::Sqlite => f(&SqliteDialect),
        DialectKind::Snowflake => f(&SnowflakeDialect),
        DialectKind::Bigquery => f(&BigqueryDialect),
        DialectKind::Exasol => f(&ExasolDialect),
        DialectKind::Ansi => f(&AnsiDialect),
    }
}

/// Object-safe shim over the concrete dialect types, so the dispatch
/// table stays a single match.
trait DynRun {
    fn format(
        &self,
        source: &str,
        options: &Options,
        on_recover: Option<RecoverCallback<'_>>,
    ) -> Result<String, Error>;
    fn parse(
        &self,
        source: &str,
        options: &Options,
        on_recover: Option<RecoverCallback<'_>>,
    ) -> Result<Vec<Statement>, Error>;
}

impl<D: Dialect> DynRun for D {
    fn format(
        &self,
        source: &str,
        options: &Options,
        on_recover: Option<RecoverCallback<'_>>,
    ) -> Result<String, Error> {
        run_format(self, source, options, on_recover)
    }

    fn parse(
        &self,
        source: &str,
        options: &Options,
        on_recover: Option<RecoverCallback<'_>>,
    ) -> Result<Vec<Statement>, Error> {
        run_parse(self, source, options, on_recover).map(|(statements, _)| statements)
    }
}

fn run_format<D: Dialect>(
    dialect: &D,
    source: &str,
    options: &Options,
    on_recover: Option<RecoverCallback<'_>>,
) -> Result<String, Error> {
    let (statements, tokens) = run_parse(dialect, source, options, on_recover)?;
    Ok(sqlriver_format::format_statements(
        &statements,
        &tokens,
        dialect,
        &options.format_options(),
    ))
}

fn run_parse<D: Dialect>(
    dialect: &D,
    source: &str,
    options: &Options,
    on_recover: Option<RecoverCallback<'_>>,
) -> Result<(Vec<Statement>, Vec<sqlriver_core::Token>), Error> {
    let tokens = Lexer::with_config(dialect, source, options.lexer_config()).tokenize()?;
    let mut parser = Parser::new_with_tokens(dialect, source, tokens.clone())
        .with_config(options.parser_config());
    let statements = parser.parse_statements(on_recover)?;
    Ok((statements, tokens))
}

/// True when the input contains newlines and every one of them is CRLF.
fn uses_crlf_only(input: &str) -> bool {
    let total = input.matches('\n').count();
    total > 0 && input.matches("\r\n").count() == total
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fmt(input: &str) -> String {
        format(input, &Options::default()).unwrap()
    }

    fn fmt_dialect(input: &str, dialect: DialectKind) -> String {
        let options = Options {
            dialect,
            ..Options::default()
        };
        format(input, &options).unwrap()
    }

    // ------------------------------------------------------------------
    // Scenarios
    // ------------------------------------------------------------------

    #[test]
    fn trivial_canonicalisation() {
        assert_eq!(fmt("select 1;"), "SELECT 1;\n");
    }

    #[test]
    fn river_alignment() {
        assert_eq!(
            fmt("select id from t where x = 1;"),
            "SELECT id\n  FROM t\n WHERE x = 1;\n"
        );
    }

    #[test]
    fn insert_with_parenthesised_select_source() {
        assert_eq!(
            fmt("insert into A (select * from B);"),
            "INSERT INTO a\nSELECT *\n  FROM b;\n"
        );
    }

    #[test]
    fn oracle_delete_shorthand_normalised() {
        assert_eq!(fmt("DELETE member;"), "DELETE\n  FROM member;\n");
    }

    #[test]
    fn comment_normalisation_in_ddl() {
        let out = fmt("CREATE TABLE t (\n  a INT, -- note\n  b INT\n);");
        assert!(out.contains("a INT, /* note */"), "{}", out);
        assert!(out.ends_with(";\n") && !out.ends_with("\n\n"), "{}", out);
    }

    #[test]
    fn window_frame_expansion() {
        let out = fmt(
            "SELECT SUM(x) OVER (ORDER BY t RANGE BETWEEN INTERVAL '7 days' PRECEDING AND CURRENT ROW EXCLUDE TIES) FROM o;",
        );
        assert!(out.contains("OVER (\n"), "{}", out);
        assert!(out.contains("\n                  ORDER BY t\n"), "{}", out);
        assert!(
            out.contains("\n                  RANGE BETWEEN INTERVAL '7 days' PRECEDING\n"),
            "{}",
            out
        );
        assert!(out.contains("\n                        AND CURRENT ROW\n"), "{}", out);
        assert!(out.contains("\n                  EXCLUDE TIES\n"), "{}", out);
        assert!(out.contains("\n              )\n"), "{}", out);
        assert!(out.ends_with("  FROM o;\n"), "{}", out);
    }

    // ------------------------------------------------------------------
    // Facade contract
    // ------------------------------------------------------------------

    #[test]
    fn empty_input_returns_empty_string() {
        assert_eq!(fmt(""), "");
        assert_eq!(fmt("   \n\t  "), "");
    }

    #[test]
    fn output_ends_in_exactly_one_newline() {
        for input in ["select 1", "select 1;", "select 1;\n\n\n"] {
            let out = fmt(input);
            assert!(out.ends_with('\n') && !out.ends_with("\n\n"), "{:?}", out);
        }
    }

    #[test]
    fn statements_separated_by_one_blank_line() {
        assert_eq!(fmt("select 1; select 2;"), "SELECT 1;\n\nSELECT 2;\n");
    }

    #[test]
    fn crlf_round_trip() {
        assert_eq!(fmt("select 1;\r\n"), "SELECT 1;\r\n");
        assert_eq!(
            fmt("select 1;\r\nselect 2;\r\n"),
            "SELECT 1;\r\n\r\nSELECT 2;\r\n"
        );
        // Mixed endings stay LF.
        assert_eq!(fmt("select 1;\r\nselect 2;\n"), "SELECT 1;\n\nSELECT 2;\n");
    }

    #[test]
    fn idempotence() {
        let inputs = [
            "select 1;",
            "select id from t where x = 1;",
            "select a, count(*) from t group by a having count(*) > 1 order by a desc;",
            "insert into A (select * from B);",
            "CREATE TABLE t (\n  a INT, -- note\n  b INT\n);",
            "select a from t union all select b from u;",
            "update t set a = 1, b = 2 where id = 3 returning a;",
            "select case when a = 1 then 'x' when a = 2 then 'y' else 'z' end from t;",
            "with d as (select 1 as x) select x from d;",
            "alter table t add column c int, drop column d;",
            "grant select, insert on t to role1;",
            "delete from t where id in (select id from u);",
            "select a from /* note */ t where x = 1;",
        ];
        for input in inputs {
            let once = fmt(input);
            let twice = fmt(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn statement_count_preservation() {
        let statements = parse(
            "select 1; bogus stuff here; select 2; drop table t;",
            &Options::default(),
        )
        .unwrap();
        assert_eq!(statements.len(), 4);
    }

    #[test]
    fn comment_preservation() {
        let input = "-- leading\nselect 1; -- trailing\n/* standalone */\nselect 2;";
        let out = fmt(input);
        for body in ["leading", "trailing", "standalone"] {
            assert!(out.contains(body), "missing {:?} in {}", body, out);
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    #[test]
    fn set_operations_align_with_river() {
        assert_eq!(
            fmt("select a from t union all select b from u;"),
            "SELECT a\n  FROM t\n UNION ALL\nSELECT b\n  FROM u;\n"
        );
    }

    #[test]
    fn case_block_layout() {
        assert_eq!(
            fmt("select case when a = 1 then 'x' when a = 2 then 'y' else 'z' end from t;"),
            "SELECT CASE\n       WHEN a = 1 THEN 'x'\n       WHEN a = 2 THEN 'y'\n       ELSE 'z'\n       END\n  FROM t;\n"
        );
    }

    #[test]
    fn join_layout() {
        assert_eq!(
            fmt("select * from a join b on a.id = b.id left outer join c on c.id = a.id;"),
            "SELECT *\n  FROM a\n  JOIN b ON a.id = b.id\n    LEFT OUTER JOIN c\n    ON c.id = a.id;\n"
        );
    }

    #[test]
    fn group_by_and_limit_river() {
        assert_eq!(
            fmt("select a, count(*) from t group by a order by a limit 10;"),
            "SELECT a, COUNT(*)\n  FROM t\n GROUP BY a\n ORDER BY a\n LIMIT 10;\n"
        );
    }

    #[test]
    fn cte_layout() {
        assert_eq!(
            fmt("with d as (select 1 as x) select x from d;"),
            "WITH d AS (\n    SELECT 1 AS x\n)\nSELECT x\n  FROM d;\n"
        );
    }

    #[test]
    fn update_layout() {
        assert_eq!(
            fmt("update t set a = 1, b = 2 where id = 3;"),
            "UPDATE t\n   SET a = 1,\n       b = 2\n WHERE id = 3;\n"
        );
    }

    #[test]
    fn multi_row_values_align_tuples() {
        assert_eq!(
            fmt("insert into t (a, b) values (1, 'x'), (2, 'y');"),
            "INSERT INTO t (a, b)\nVALUES (1, 'x'),\n       (2, 'y');\n"
        );
    }

    // ------------------------------------------------------------------
    // Casing
    // ------------------------------------------------------------------

    #[test]
    fn identifiers_lowercased_only_in_write_statements() {
        // Read statements keep source casing.
        assert_eq!(fmt("select MyCol from T;"), "SELECT MyCol\n  FROM T;\n");
        // Write statements lowercase identifiers that were not
        // deliberately mixed-case.
        assert_eq!(fmt("drop table FOO;"), "DROP TABLE foo;\n");
        assert_eq!(fmt("drop table MyTable;"), "DROP TABLE MyTable;\n");
    }

    #[test]
    fn quoted_identifiers_never_recased() {
        assert_eq!(fmt("drop table \"FOO\";"), "DROP TABLE \"FOO\";\n");
    }

    #[test]
    fn format_builtin_casing_is_context_aware() {
        // Top-level calls uppercase the known builtin, like any other.
        let out = fmt("select format('%s', x) from t;");
        assert!(out.contains("FORMAT('%s', x)"), "{}", out);
        // Inside a BigQuery procedure body the builtin passes through
        // as spelled.
        let out = fmt_dialect(
            "create procedure p()\nbegin\nselect format('%s', x);\nend;",
            DialectKind::Bigquery,
        );
        assert!(out.contains("format('%s', x)"), "{}", out);
        assert!(!out.contains("FORMAT"), "{}", out);
    }

    #[test]
    fn clause_interior_comments_stay_near_their_clause() {
        // A comment inside the FROM clause is hoisted to the preceding
        // line, not deferred to the terminator.
        assert_eq!(
            fmt("select a from /* note */ t where x = 1;"),
            "SELECT a /* note */\n  FROM t\n WHERE x = 1;\n"
        );
        // A comment inside a compound clause keyword is hoisted so the
        // keyword stays atomic.
        assert_eq!(
            fmt("select a from t order /* tail */ by a;"),
            "SELECT a\n  FROM t /* tail */\n ORDER BY a;\n"
        );
        // Same for a comment inside a join head.
        assert_eq!(
            fmt("select * from a join /* j */ b on a.id = b.id;"),
            "SELECT *\n  FROM a /* j */\n  JOIN b ON a.id = b.id;\n"
        );
    }

    #[test]
    fn known_functions_uppercased_in_call_position() {
        let out = fmt("select count(*), ltrim(name) from t;");
        assert!(out.contains("COUNT(*)"), "{}", out);
        assert!(out.contains("LTRIM(name)"), "{}", out);
        // Unknown functions keep their spelling.
        let out = fmt("select my_udf(x) from t;");
        assert!(out.contains("my_udf(x)"), "{}", out);
    }

    #[test]
    fn keyword_case_lower() {
        let options = Options {
            keyword_case: KeywordCase::Lower,
            ..Options::default()
        };
        assert_eq!(
            format("SELECT id FROM t;", &options).unwrap(),
            "select id\n  from t;\n"
        );
    }

    // ------------------------------------------------------------------
    // Dialects
    // ------------------------------------------------------------------

    #[test]
    fn mysql_backtick_identifiers() {
        assert_eq!(
            fmt_dialect("select `a b` from t;", DialectKind::Mysql),
            "SELECT `a b`\n  FROM t;\n"
        );
    }

    #[test]
    fn tsql_top_and_brackets() {
        assert_eq!(
            fmt_dialect("select top 10 * from [dbo].[T];", DialectKind::Tsql),
            "SELECT TOP 10 *\n  FROM [dbo].[T];\n"
        );
    }

    #[test]
    fn tsql_go_batches() {
        assert_eq!(
            fmt_dialect("select 1\nGO\nselect 2\nGO", DialectKind::Tsql),
            "SELECT 1;\n\nGO\n\nSELECT 2;\n\nGO\n"
        );
    }

    #[test]
    fn mysql_delimiter_blocks() {
        let input = "DELIMITER $$\nCREATE PROCEDURE p()\nBEGIN\nSELECT 1;\nEND $$\nDELIMITER ;";
        let out = fmt_dialect(input, DialectKind::Mysql);
        assert_eq!(
            out,
            "DELIMITER $$\n\nCREATE PROCEDURE p()\nBEGIN\n    SELECT 1;\nEND $$\n\nDELIMITER ;\n"
        );
    }

    #[test]
    fn oracle_plsql_block_and_slash() {
        let out = fmt_dialect("BEGIN\nNULL;\nEND;\n/", DialectKind::Oracle);
        assert_eq!(out, "BEGIN\n    NULL;\nEND;\n\n/\n");
    }

    #[test]
    fn psql_meta_command_passthrough() {
        assert_eq!(fmt("\\timing on\nselect 1;"), "\\timing on\n\nSELECT 1;\n");
    }

    #[test]
    fn snowflake_variant_path() {
        assert_eq!(
            fmt_dialect("select payload:item from t;", DialectKind::Snowflake),
            "SELECT payload:item\n  FROM t;\n"
        );
    }

    #[test]
    fn straight_join_is_mysql_only() {
        let out = fmt_dialect(
            "select straight_join * from a straight_join b;",
            DialectKind::Mysql,
        );
        assert!(out.contains("STRAIGHT_JOIN"), "{}", out);
        // Under postgres the word is a plain identifier and keeps its
        // source spelling.
        let out = fmt("select straight_join from a;");
        assert!(out.contains("straight_join"), "{}", out);
    }

    // ------------------------------------------------------------------
    // Errors and bounds
    // ------------------------------------------------------------------

    #[test]
    fn input_size_boundary() {
        let input = "select 1;";
        let at_limit = Options {
            max_input_size: input.len(),
            ..Options::default()
        };
        assert!(format(input, &at_limit).is_ok());
        let over_limit = Options {
            max_input_size: input.len() - 1,
            ..Options::default()
        };
        let err = format(input, &over_limit).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum size"), "{}", err);
    }

    #[test]
    fn token_count_boundary() {
        let options = Options {
            max_token_count: 3,
            ..Options::default()
        };
        assert!(format("select 1 x", &options).is_ok());
        let err = format("select 1, 2;", &options).unwrap_err();
        assert!(err.to_string().contains("token count exceeds 3"), "{}", err);
    }

    #[test]
    fn identifier_length_boundary() {
        let ok = std::format!("select {};", "a".repeat(10_000));
        assert!(format(&ok, &Options::default()).is_ok());
        let too_long = std::format!("select {};", "a".repeat(10_001));
        let err = format(&too_long, &Options::default()).unwrap_err();
        assert!(err.to_string().contains("maximum length"), "{}", err);
    }

    #[test]
    fn nesting_depth_boundary_in_both_modes() {
        for recover in [true, false] {
            let options = Options {
                max_depth: 3,
                recover,
                ..Options::default()
            };
            assert!(format("select ((1));", &options).is_ok());
            let err = format("select (((1)));", &options).unwrap_err();
            assert!(matches!(err, Error::MaxDepth(_)), "{:?}", err);
        }
    }

    #[test]
    fn recovery_preserves_failed_statement_text() {
        let mut recovered = Vec::new();
        let mut on_recover = |err: &ParseError| recovered.push(err.message.clone());
        let out = format_with(
            "select from t; select 2;",
            &Options::default(),
            Some(&mut on_recover),
        )
        .unwrap();
        assert_eq!(out, "select from t;\n\nSELECT 2;\n");
        assert_eq!(recovered.len(), 1);
    }

    #[test]
    fn strict_mode_raises_parse_errors() {
        let options = Options {
            recover: false,
            ..Options::default()
        };
        let err = format("select from t;", &options).unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "{:?}", err);
    }

    #[test]
    fn unknown_statements_pass_through() {
        let out = fmt("frobnicate the database;");
        assert_eq!(out, "frobnicate the database;\n");
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let err = format("select 'foo", &Options::default()).unwrap_err();
        assert!(matches!(err, Error::Tokenize(_)), "{:?}", err);
    }
}
