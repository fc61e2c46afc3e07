//! Condition tree for WHERE and JOIN ... ON predicates.
//!
//! A [`Cond`] is one of four node kinds:
//! - a bare SQL fragment (`"a = b"`), rendered verbatim
//! - a binary comparison (`column op ?`), carrying one bound value
//! - a raw fragment with its own `?` placeholders and values
//! - an AND/OR group of child nodes
//!
//! Callers rarely build nodes by hand. Anything implementing [`IntoConds`]
//! (a string, a `(column, op, value)` tuple, a `Vec` or array of those, or an
//! existing node) is normalized into a list of sibling nodes.
//!
//! ```ignore
//! use sqlq::{or, query};
//!
//! let q = query()
//!     .select("*")
//!     .from("blah")
//!     .filter("a = b")
//!     .filter(or([("c", "=", "CCC"), ("d", "=", "DDD")]));
//! // SELECT * FROM blah WHERE a = b AND (c = ? OR d = ?)
//! ```

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Boolean connective of a [`Cond::Group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    And,
    Or,
}

impl Kind {
    /// Separator placed between rendered children.
    pub fn separator(self) -> &'static str {
        match self {
            Kind::And => " AND ",
            Kind::Or => " OR ",
        }
    }

    /// Lowercase name, used in error paths.
    pub fn name(self) -> &'static str {
        match self {
            Kind::And => "and",
            Kind::Or => "or",
        }
    }
}

/// One node of a condition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cond {
    /// Raw SQL without placeholders: rendered as-is, binds nothing.
    Fragment(String),

    /// `column op ?`, binding `value`.
    Compare {
        column: String,
        op: String,
        value: Value,
    },

    /// Raw SQL with embedded `?` placeholders, rendered as `(sql)`.
    ///
    /// `params` must line up one-to-one with the `?` characters in `sql`,
    /// left to right. Only [`Extended`](crate::render::Extended) renders it.
    Raw { sql: String, params: Vec<Value> },

    /// Children joined by `kind`, rendered as `(a AND b ...)`.
    Group { kind: Kind, conds: Vec<Cond> },
}

impl Cond {
    /// Create a bare fragment.
    pub fn fragment(sql: impl Into<String>) -> Self {
        Cond::Fragment(sql.into())
    }

    /// Create a binary comparison: `column op ?`.
    pub fn compare(column: impl Into<String>, op: impl Into<String>, value: impl Into<Value>) -> Self {
        Cond::Compare {
            column: column.into(),
            op: op.into(),
            value: value.into(),
        }
    }

    /// Create a raw fragment carrying its own parameters.
    ///
    /// # Example
    /// ```ignore
    /// Cond::raw("LOWER(name) = LOWER(?)", ["Cully"])
    /// ```
    pub fn raw<I, V>(sql: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Cond::Raw {
            sql: sql.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an AND group.
    pub fn and(conds: impl IntoConds) -> Self {
        Cond::Group {
            kind: Kind::And,
            conds: conds.into_conds(),
        }
    }

    /// Create an OR group.
    pub fn or(conds: impl IntoConds) -> Self {
        Cond::Group {
            kind: Kind::Or,
            conds: conds.into_conds(),
        }
    }

    /// `column = ?`
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "=", value)
    }

    /// `column != ?`
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "!=", value)
    }

    /// `column > ?`
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, ">", value)
    }

    /// `column >= ?`
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, ">=", value)
    }

    /// `column < ?`
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "<", value)
    }

    /// `column <= ?`
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "<=", value)
    }

    /// `column LIKE ?`
    pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::compare(column, "LIKE", pattern)
    }

    /// Check if this node is a leaf (anything but a group).
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Cond::Group { .. })
    }

    /// Number of parameters this node binds, counted over the whole subtree.
    ///
    /// For raw fragments this is the declared parameter count, which may
    /// disagree with the placeholder count until a renderer checks it.
    pub fn param_count(&self) -> usize {
        match self {
            Cond::Fragment(_) => 0,
            Cond::Compare { .. } => 1,
            Cond::Raw { params, .. } => params.len(),
            Cond::Group { conds, .. } => conds.iter().map(Cond::param_count).sum(),
        }
    }
}

impl From<&str> for Cond {
    fn from(sql: &str) -> Self {
        Cond::Fragment(sql.to_string())
    }
}

impl From<String> for Cond {
    fn from(sql: String) -> Self {
        Cond::Fragment(sql)
    }
}

impl From<&String> for Cond {
    fn from(sql: &String) -> Self {
        Cond::Fragment(sql.clone())
    }
}

impl<C, O, V> From<(C, O, V)> for Cond
where
    C: Into<String>,
    O: Into<String>,
    V: Into<Value>,
{
    fn from((column, op, value): (C, O, V)) -> Self {
        Cond::compare(column, op, value)
    }
}

/// Normalize caller input into a list of sibling condition nodes.
pub trait IntoConds {
    fn into_conds(self) -> Vec<Cond>;
}

impl IntoConds for Cond {
    fn into_conds(self) -> Vec<Cond> {
        vec![self]
    }
}

impl IntoConds for &str {
    fn into_conds(self) -> Vec<Cond> {
        vec![self.into()]
    }
}

impl IntoConds for String {
    fn into_conds(self) -> Vec<Cond> {
        vec![self.into()]
    }
}

impl IntoConds for &String {
    fn into_conds(self) -> Vec<Cond> {
        vec![self.into()]
    }
}

impl<C, O, V> IntoConds for (C, O, V)
where
    C: Into<String>,
    O: Into<String>,
    V: Into<Value>,
{
    fn into_conds(self) -> Vec<Cond> {
        vec![self.into()]
    }
}

impl<T: Into<Cond>> IntoConds for Vec<T> {
    fn into_conds(self) -> Vec<Cond> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Cond>, const N: usize> IntoConds for [T; N] {
    fn into_conds(self) -> Vec<Cond> {
        self.into_iter().map(Into::into).collect()
    }
}

/// Create an AND group. See [`Cond::and`].
pub fn and(conds: impl IntoConds) -> Cond {
    Cond::and(conds)
}

/// Create an OR group. See [`Cond::or`].
pub fn or(conds: impl IntoConds) -> Cond {
    Cond::or(conds)
}

/// Create a binary comparison. See [`Cond::compare`].
pub fn cmp(column: impl Into<String>, op: impl Into<String>, value: impl Into<Value>) -> Cond {
    Cond::compare(column, op, value)
}

/// Create a raw fragment with parameters. See [`Cond::raw`].
pub fn raw<I, V>(sql: impl Into<String>, params: I) -> Cond
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Cond::raw(sql, params)
}
