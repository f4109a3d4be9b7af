#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec::Vec};

use sqlriver_core::{Span, Token};

use crate::{
    expression::{Expr, OrderByExpr, Query},
    statement::BlockStmt,
    types::{DataType, Ident, ObjectName},
};

// ============================================================================
// Table definition
// ============================================================================

/// The `CREATE TABLE` statement.
///
/// ```txt
/// CREATE [ OR REPLACE ] [ TEMPORARY | TEMP | GLOBAL TEMPORARY ] TABLE
///     [ IF NOT EXISTS ] <name> [ ( <element list> ) ]
///     [ <table options> ] [ AS <query> ]
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateTableStmt {
    /// `OR REPLACE` flag.
    pub or_replace: bool,
    /// The temporary flavour, as written (`TEMPORARY`, `TEMP`,
    /// `GLOBAL TEMPORARY`).
    pub temporary: Option<String>,
    /// `IF NOT EXISTS` flag.
    pub if_not_exists: bool,
    /// Table name.
    pub name: ObjectName,
    /// The element list: column definitions, table constraints, index
    /// definitions and LIKE clauses, in source order.
    pub elements: Vec<TableElement>,
    /// A trailing comma after the last element is accepted and preserved.
    pub trailing_comma: bool,
    /// Table options tail (`ENGINE=...`, `WITH (...)`, `ON [PRIMARY]`),
    /// collected as opaque tokens.
    pub options: Vec<Token>,
    /// `AS <query>`.
    pub query: Option<Box<Query>>,
}

/// One element of a CREATE TABLE element list, with its source span for
/// comment anchoring.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableElement {
    /// The element kind.
    pub kind: TableElementKind,
    /// Byte span of the element in the source.
    pub span: Span,
}

/// The kinds of CREATE TABLE elements.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableElementKind {
    /// A column definition.
    Column(ColumnDef),
    /// A table-level constraint, optionally named.
    Constraint(TableConstraintDef),
    /// A MySQL `KEY` / `INDEX` / `FULLTEXT` / `SPATIAL` definition.
    Index(IndexDef),
    /// A `LIKE <table>` clause.
    Like(ObjectName),
}

/// A column definition.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDef {
    /// Column name.
    pub name: Ident,
    /// Column type.
    pub data_type: DataType,
    /// Column constraints, in source order.
    pub constraints: Vec<ColumnConstraint>,
}

/// A single column constraint.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnConstraint {
    /// `NULL`
    Null,
    /// `NOT NULL`
    NotNull,
    /// `DEFAULT <expr>`
    Default(Expr),
    /// `PRIMARY KEY`
    PrimaryKey,
    /// `UNIQUE`
    Unique,
    /// `CHECK (<condition>)`
    Check(Box<Expr>),
    /// `REFERENCES <table> [ (<columns>) ] [ <actions> ]`
    References {
        /// Referenced table.
        table: ObjectName,
        /// Referenced columns.
        columns: Vec<Ident>,
        /// Raw `ON DELETE` / `ON UPDATE` action tail.
        actions: Vec<Token>,
    },
    /// `COLLATE <name>`
    Collate(ObjectName),
    /// `CONSTRAINT <name> <inner>`
    Named {
        /// Constraint name.
        name: Ident,
        /// The named constraint body.
        inner: Box<ColumnConstraint>,
    },
    /// Anything else (`AUTO_INCREMENT`, `IDENTITY(1,1)`, `COMMENT '...'`,
    /// a MySQL conditional comment), carried as verbatim tokens.
    Verbatim(Vec<Token>),
}

/// A table-level constraint, optionally named.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableConstraintDef {
    /// `CONSTRAINT <name>`.
    pub name: Option<Ident>,
    /// The constraint body.
    pub constraint: TableConstraint,
}

/// A table-level constraint body.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableConstraint {
    /// `PRIMARY KEY (<columns>)`
    PrimaryKey(Vec<Ident>),
    /// `UNIQUE (<columns>)`
    Unique(Vec<Ident>),
    /// `CHECK (<condition>)`
    Check(Box<Expr>),
    /// `FOREIGN KEY (<columns>) REFERENCES <table> [ (<columns>) ] [ <actions> ]`
    ForeignKey {
        /// Referencing columns.
        columns: Vec<Ident>,
        /// Referenced table.
        table: ObjectName,
        /// Referenced columns.
        referenced_columns: Vec<Ident>,
        /// Raw `ON DELETE` / `ON UPDATE` action tail.
        actions: Vec<Token>,
    },
    /// `EXCLUDE ...`, carried verbatim.
    Exclude(Vec<Token>),
}

/// A MySQL index element inside CREATE TABLE.
///
/// ```txt
/// [ FULLTEXT | SPATIAL ] { KEY | INDEX } [ <name> ] ( <columns> )
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexDef {
    /// `FULLTEXT` / `SPATIAL` prefix, as written.
    pub prefix: Option<String>,
    /// `KEY` or `INDEX`, as written.
    pub keyword: String,
    /// Index name.
    pub name: Option<Ident>,
    /// Indexed columns.
    pub columns: Vec<Ident>,
}

// ============================================================================
// Table manipulation
// ============================================================================

/// The `ALTER TABLE` statement: a comma-separated list of actions that
/// stays grouped under a single statement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlterTableStmt {
    /// `IF EXISTS` flag.
    pub if_exists: bool,
    /// `ONLY` flag.
    pub only: bool,
    /// Table name.
    pub name: ObjectName,
    /// The actions, in source order.
    pub actions: Vec<AlterTableAction>,
}

/// One ALTER TABLE action.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlterTableAction {
    /// `ADD [COLUMN] <column def>`
    AddColumn {
        /// Whether `COLUMN` was written.
        explicit_column: bool,
        /// The column definition.
        column: ColumnDef,
    },
    /// `ADD [CONSTRAINT] <table constraint>`
    AddConstraint(TableConstraintDef),
    /// `ADD { INDEX | KEY | FULLTEXT | SPATIAL } ...` (MySQL)
    AddIndex(IndexDef),
    /// `DROP [COLUMN] <name> [ CASCADE | RESTRICT ]`
    DropColumn {
        /// Whether `COLUMN` was written.
        explicit_column: bool,
        /// The column name.
        name: Ident,
        /// `CASCADE` / `RESTRICT` tail word.
        behavior: Option<String>,
    },
    /// `DROP CONSTRAINT <name>`
    DropConstraint(Ident),
    /// `ALTER [COLUMN] <name> <change>`
    AlterColumn {
        /// The column name.
        name: Ident,
        /// The change.
        change: AlterColumnChange,
    },
    /// `MODIFY <column def>` (MySQL)
    ModifyColumn(ColumnDef),
    /// `OWNER TO <name>`
    OwnerTo(Ident),
    /// `SET SCHEMA <name>`
    SetSchema(Ident),
    /// `RENAME TO <name>`
    RenameTo(Ident),
    /// Any other action, carried verbatim.
    Verbatim(Vec<Token>),
}

/// The change applied by `ALTER COLUMN`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlterColumnChange {
    /// `SET DEFAULT <expr>`
    SetDefault(Expr),
    /// `DROP DEFAULT`
    DropDefault,
    /// `[SET DATA] TYPE <type> [ USING <expr> ]`
    SetType {
        /// The new type.
        data_type: DataType,
        /// The `USING` conversion expression.
        using: Option<Expr>,
    },
    /// `SET NOT NULL`
    SetNotNull,
    /// `DROP NOT NULL`
    DropNotNull,
}

// ============================================================================
// Other DDL
// ============================================================================

/// The `CREATE [OR REPLACE] [MATERIALIZED] VIEW` statement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateViewStmt {
    /// `OR REPLACE` flag.
    pub or_replace: bool,
    /// `MATERIALIZED` flag.
    pub materialized: bool,
    /// `IF NOT EXISTS` flag.
    pub if_not_exists: bool,
    /// View name.
    pub name: ObjectName,
    /// Optional column list.
    pub columns: Vec<Ident>,
    /// The defining query.
    pub query: Box<Query>,
}

/// The `CREATE [UNIQUE] INDEX` statement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateIndexStmt {
    /// `UNIQUE` flag.
    pub unique: bool,
    /// `CONCURRENTLY` flag.
    pub concurrently: bool,
    /// `IF NOT EXISTS` flag.
    pub if_not_exists: bool,
    /// Index name; anonymous indexes are allowed.
    pub name: Option<ObjectName>,
    /// Indexed table.
    pub table: ObjectName,
    /// `USING <method>`.
    pub using: Option<Ident>,
    /// Indexed expressions with optional ordering tails.
    pub columns: Vec<OrderByExpr>,
    /// Any trailing clauses (`WHERE ...`, `INCLUDE ...`), verbatim.
    pub tail: Vec<Token>,
}

/// `CREATE { PROCEDURE | FUNCTION | TRIGGER } ...`: the header is carried
/// verbatim, the body (when it is a `BEGIN ... END` block) is parsed so
/// inner statements render at an inherited indent.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateRoutineStmt {
    /// Which routine kind this is.
    pub kind: RoutineKind,
    /// Header tokens, up to (not including) the body block.
    pub header: Vec<Token>,
    /// The parsed body block, when present.
    pub body: Option<BlockStmt>,
}

/// The routine flavour.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoutineKind {
    /// `PROCEDURE`
    Procedure,
    /// `FUNCTION`
    Function,
    /// `TRIGGER`
    Trigger,
}

/// The `DROP` statement.
///
/// ```txt
/// DROP <object kind> [ IF EXISTS ] <names> [ CASCADE | RESTRICT ]
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropStmt {
    /// The dropped object kind words (`TABLE`, `MATERIALIZED VIEW`, ...).
    pub object_kind: Vec<String>,
    /// `IF EXISTS` flag.
    pub if_exists: bool,
    /// The dropped names.
    pub names: Vec<ObjectName>,
    /// `CASCADE` / `RESTRICT` tail word.
    pub behavior: Option<String>,
}
