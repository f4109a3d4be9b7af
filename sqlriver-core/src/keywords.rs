//! The keyword tables shared by every dialect.
//!
//! One global [`Keyword`] enumeration covers the union of all supported
//! dialects; each dialect recognises the common subset plus its own
//! vendor extensions (see the dialect modules).
//!
//! **NOTE**: All keyword lists must stay sorted so they can be matched
//! using binary search.

/// Defines a string constant for a single keyword: `kw_def!(SELECT);`,
/// which expands to `const SELECT: &'static str = "SELECT";`
#[macro_export]
macro_rules! kw_def {
    ($ident:ident = $string_keyword:expr) => {
        const $ident: &'static str = $string_keyword;
    };
    ($ident:ident) => {
        $crate::kw_def!($ident = stringify!($ident));
    };
}

/// Expands to a list of `kw_def!()` invocations for each keyword, defines
/// the global `Keyword` enum and the sorted `ALL_KEYWORDS` lookup tables.
macro_rules! define_keywords {
    (
        $(
            $keyword:ident $(= $string_keyword:expr)?
        ),* $(,)?
    ) => {
        /// A keyword recognised by at least one supported dialect.
        #[doc(hidden)]
        #[allow(non_camel_case_types)]
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Keyword {
            $($keyword),*
        }

        impl ::core::fmt::Display for Keyword {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        $( $crate::kw_def!($keyword $(= $string_keyword)?); )*

        /// All keywords, in the same order as [`ALL_KEYWORD_STRINGS`].
        pub const ALL_KEYWORDS: &[Keyword] = &[
            $(Keyword::$keyword),*
        ];

        /// All keyword spellings, sorted for binary search.
        pub const ALL_KEYWORD_STRINGS: &[&str] = &[
            $($keyword),*
        ];

        impl Keyword {
            /// The canonical (uppercase) spelling of the keyword.
            pub const fn as_str(&self) -> &'static str {
                ALL_KEYWORD_STRINGS[*self as usize]
            }
        }
    }
}

define_keywords!(
    ABORT,
    ACTION,
    ADD,
    ALL,
    ALTER,
    ANALYZE,
    AND,
    ANY,
    APPLY,
    ARRAY,
    AS,
    ASC,
    AUTOINCREMENT,
    AUTO_INCREMENT,
    BEGIN,
    BETWEEN,
    BREADTH,
    BY,
    CALL,
    CASCADE,
    CASE,
    CAST,
    CHARSET,
    CHECK,
    COLLATE,
    COLUMN,
    COMMENT,
    COMMIT,
    CONCURRENTLY,
    CONFLICT,
    CONNECT,
    CONSTRAINT,
    COPY,
    CREATE,
    CROSS,
    CURRENT,
    CURSOR,
    CYCLE,
    DEALLOCATE,
    DECLARE,
    DEFAULT,
    DEFERRABLE,
    DELETE,
    DELIMITER,
    DEPTH,
    DESC,
    DISTINCT,
    DO,
    DOMAIN,
    DROP,
    DUPLICATE,
    EACH,
    ELSE,
    END,
    ENGINE,
    ESCAPE,
    EXCEPT,
    EXCEPTION,
    EXCLUDE,
    EXECUTE,
    EXISTS,
    EXPLAIN,
    FAIL,
    FALSE,
    FETCH,
    FILTER,
    FIRST,
    FOLLOWING,
    FOR,
    FOREIGN,
    FROM,
    FULL,
    FULLTEXT,
    FUNCTION,
    GLOBAL,
    GO,
    GRANT,
    GROUP,
    GROUPS,
    HAVING,
    IDENTIFIER,
    IDENTITY,
    IF,
    IGNORE,
    ILIKE,
    IN,
    INDEX,
    INNER,
    INSERT,
    INSTEAD,
    INTERSECT,
    INTERVAL,
    INTO,
    IS,
    ISOLATION,
    JOIN,
    KEY,
    LANGUAGE,
    LAST,
    LATERAL,
    LEFT,
    LEVEL,
    LIKE,
    LIMIT,
    LISTEN,
    LOCAL,
    LOCK,
    LOCKED,
    MATCHED,
    MATERIALIZED,
    MERGE,
    MINUS,
    MODE,
    MODIFY,
    NATURAL,
    NEXT,
    NO,
    NOT,
    NOTHING,
    NOTIFY,
    NOWAIT,
    NULL,
    NULLS,
    OF,
    OFFSET,
    ON,
    ONLY,
    OPTION,
    OR,
    ORDER,
    ORDINALITY,
    OTHERS,
    OUTER,
    OUTPUT,
    OVER,
    OVERRIDING,
    OWNER,
    PARTITION,
    PERCENT,
    PIPE,
    PLAN,
    PRECEDING,
    PREPARE,
    PRIMARY,
    PRINT,
    PRIOR,
    PRIVILEGES,
    PROCEDURE,
    PUBLICATION,
    RANGE,
    READ,
    RECURSIVE,
    REFERENCES,
    REFRESH,
    RELEASE,
    RENAME,
    REPEATABLE,
    REPLACE,
    RESET,
    RESTRICT,
    RETURNING,
    RETURNS,
    REVOKE,
    RIGHT,
    ROLLBACK,
    ROW,
    ROWS,
    SAVEPOINT,
    SCHEMA,
    SEARCH,
    SELECT,
    SEPARATOR,
    SEQUENCE,
    SESSION,
    SET,
    SHARE,
    SHOW,
    SKIP,
    SOME,
    SPATIAL,
    START,
    STRAIGHT_JOIN,
    SYSTEM,
    TABLE,
    TABLESAMPLE,
    TEMP,
    TEMPORARY,
    THEN,
    TIES,
    TO,
    TOP,
    TRANSACTION,
    TRIGGER,
    TRUE,
    TRUNCATE,
    TYPE,
    UESCAPE,
    UNBOUNDED,
    UNION,
    UNIQUE,
    UNLISTEN,
    UNSIGNED,
    UPDATE,
    USE,
    USER,
    USING,
    VACUUM,
    VALUE,
    VALUES,
    VARIADIC,
    VERBOSE,
    VIEW,
    WHEN,
    WHERE,
    WINDOW,
    WITH,
    WITHIN,
    WORK,
    ZEROFILL,
    ZONE,
);

impl Keyword {
    /// Looks up a word (in any casing) in the global keyword table.
    pub fn from_word(word: &str) -> Option<Keyword> {
        let upper = word.to_uppercase();
        ALL_KEYWORD_STRINGS
            .binary_search(&upper.as_str())
            .map(|idx| ALL_KEYWORDS[idx])
            .ok()
    }
}

/// Keywords recognised by a single vendor (or a small set of vendors);
/// every keyword not listed here belongs to the common set.
pub const VENDOR_KEYWORDS: &[Keyword] = &[
    Keyword::APPLY,
    Keyword::AUTOINCREMENT,
    Keyword::AUTO_INCREMENT,
    Keyword::CHARSET,
    Keyword::CONCURRENTLY,
    Keyword::CONNECT,
    Keyword::DELIMITER,
    Keyword::DUPLICATE,
    Keyword::ENGINE,
    Keyword::FULLTEXT,
    Keyword::GO,
    Keyword::IDENTIFIER,
    Keyword::IDENTITY,
    Keyword::ILIKE,
    Keyword::LISTEN,
    Keyword::MINUS,
    Keyword::MODIFY,
    Keyword::NOTIFY,
    Keyword::OUTPUT,
    Keyword::PIPE,
    Keyword::PRINT,
    Keyword::PRIOR,
    Keyword::PUBLICATION,
    Keyword::SPATIAL,
    Keyword::STRAIGHT_JOIN,
    Keyword::TOP,
    Keyword::UNLISTEN,
    Keyword::UNSIGNED,
    Keyword::VARIADIC,
    Keyword::ZEROFILL,
];

/// Returns true if the keyword belongs to the set every dialect recognises.
pub fn is_common_keyword(kw: Keyword) -> bool {
    VENDOR_KEYWORDS.binary_search(&kw).is_err()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_tables_are_sorted() {
        let mut sorted = ALL_KEYWORD_STRINGS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, ALL_KEYWORD_STRINGS);

        let mut vendor = VENDOR_KEYWORDS.to_vec();
        vendor.sort_unstable();
        assert_eq!(vendor, VENDOR_KEYWORDS);
    }

    #[test]
    fn keyword_lookup_is_case_insensitive() {
        assert_eq!(Keyword::from_word("select"), Some(Keyword::SELECT));
        assert_eq!(Keyword::from_word("Select"), Some(Keyword::SELECT));
        assert_eq!(Keyword::from_word("STRAIGHT_JOIN"), Some(Keyword::STRAIGHT_JOIN));
        assert_eq!(Keyword::from_word("frobnicate"), None);
    }

    #[test]
    fn vendor_keywords_are_not_common() {
        assert!(!is_common_keyword(Keyword::STRAIGHT_JOIN));
        assert!(!is_common_keyword(Keyword::GO));
        assert!(is_common_keyword(Keyword::SELECT));
        assert!(is_common_keyword(Keyword::EXCEPT));
    }
}
