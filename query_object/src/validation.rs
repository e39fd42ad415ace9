//! Identifier validation
//!
//! Every table, alias, column and function name is checked here before it is
//! spliced into generated SQL. Values never are: they always travel as bound
//! parameters.
//!
//! Names are emitted unquoted, so a name is accepted when PostgreSQL would
//! parse it as a plain identifier: ASCII letters, digits and underscores, at
//! most 63 bytes, not starting with a digit, and not one of the keywords that
//! PostgreSQL refuses as a bare column or table name. Everyday words such as
//! `count`, `date`, `key` or `text` are ordinary identifiers there.

use std::fmt;
use thiserror::Error;

/// PostgreSQL identifier length limit (NAMEDATALEN - 1)
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Keywords PostgreSQL classifies as `reserved` or `reserved (can be function
/// or type)`; kept sorted for binary search
const RESERVED_KEYWORDS: &[&str] = &[
    "ALL",
    "ANALYSE",
    "ANALYZE",
    "AND",
    "ANY",
    "ARRAY",
    "AS",
    "ASC",
    "ASYMMETRIC",
    "AUTHORIZATION",
    "BINARY",
    "BOTH",
    "CASE",
    "CAST",
    "CHECK",
    "COLLATE",
    "COLLATION",
    "COLUMN",
    "CONCURRENTLY",
    "CONSTRAINT",
    "CREATE",
    "CROSS",
    "CURRENT_CATALOG",
    "CURRENT_DATE",
    "CURRENT_ROLE",
    "CURRENT_SCHEMA",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "DEFAULT",
    "DEFERRABLE",
    "DESC",
    "DISTINCT",
    "DO",
    "ELSE",
    "END",
    "EXCEPT",
    "FALSE",
    "FETCH",
    "FOR",
    "FOREIGN",
    "FREEZE",
    "FROM",
    "FULL",
    "GRANT",
    "GROUP",
    "HAVING",
    "ILIKE",
    "IN",
    "INITIALLY",
    "INNER",
    "INTERSECT",
    "INTO",
    "IS",
    "ISNULL",
    "JOIN",
    "LATERAL",
    "LEADING",
    "LEFT",
    "LIKE",
    "LIMIT",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "NATURAL",
    "NOT",
    "NOTNULL",
    "NULL",
    "OFFSET",
    "ON",
    "ONLY",
    "OR",
    "ORDER",
    "OUTER",
    "OVERLAPS",
    "PLACING",
    "PRIMARY",
    "REFERENCES",
    "RETURNING",
    "RIGHT",
    "SELECT",
    "SESSION_USER",
    "SIMILAR",
    "SOME",
    "SYMMETRIC",
    "SYSTEM_USER",
    "TABLE",
    "TABLESAMPLE",
    "THEN",
    "TO",
    "TRAILING",
    "TRUE",
    "UNION",
    "UNIQUE",
    "USER",
    "USING",
    "VARIADIC",
    "VERBOSE",
    "WHEN",
    "WHERE",
    "WINDOW",
    "WITH",
];

/// Why a name cannot be used as an unquoted identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    Empty,
    #[error("Name '{name}' is too long: {length} characters (max {max_length})")]
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },
    #[error("Name '{0}' must start with a letter or underscore")]
    InvalidStartCharacter(String),
    #[error("Invalid characters in name '{0}': only alphanumeric characters and underscores are allowed")]
    InvalidCharacters(String),
    #[error("Name '{0}' is a reserved SQL keyword")]
    ReservedKeyword(String),
}

fn check_shape(name: &str) -> Result<(), ValidationError> {
    let first = name.chars().next().ok_or(ValidationError::Empty)?;
    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong {
            name: name.to_string(),
            length: name.len(),
            max_length: MAX_IDENTIFIER_LENGTH,
        });
    }
    if !first.is_ascii_alphabetic() && first != '_' {
        return Err(ValidationError::InvalidStartCharacter(name.to_string()));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidCharacters(name.to_string()));
    }
    Ok(())
}

fn check_identifier(name: &str) -> Result<(), ValidationError> {
    check_shape(name)?;
    if is_reserved_keyword(name) {
        return Err(ValidationError::ReservedKeyword(name.to_string()));
    }
    Ok(())
}

/// True for keywords that cannot stand as a bare column, alias or table name
pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS
        .binary_search(&name.to_ascii_uppercase().as_str())
        .is_ok()
}

macro_rules! validated_name {
    ($(#[$meta:meta])* $name:ident, $check:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(name: &str) -> Result<Self, ValidationError> {
                $check(name)?;
                Ok(Self(name.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

validated_name!(
    /// Table name accepted by [`SqlGenerator`](crate::query_builder::SqlGenerator)
    ValidatedTableName,
    check_identifier
);

validated_name!(
    /// Column, alias or projection label
    ValidatedFieldName,
    check_identifier
);

validated_name!(
    /// SQL function name (`lower`, `regexp_replace`, `left`, ...)
    ///
    /// Calls are parsed as function names, where keywords like `LEFT` are
    /// allowed, so only the character rules apply.
    ValidatedFunctionName,
    check_shape
);
