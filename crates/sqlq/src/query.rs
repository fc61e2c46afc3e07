//! Immutable SELECT query representation and its builder API.
//!
//! Every builder method takes `&self` and returns a fresh [`Query`], so a
//! partially built query can be kept as a base and extended along several
//! independent branches.
//!
//! ```ignore
//! use sqlq::query;
//!
//! let base = query().select("c.*").from("campaigns c");
//! let active = base.filter(("c.status", "=", "active"));
//! let recent = base.filter(("c.startDate", ">=", "2024-01-01")).limit(10);
//! // `base` is unchanged and still renders `SELECT c.* FROM campaigns c`.
//! ```

use crate::cond::{Cond, IntoConds};
use serde::{Deserialize, Serialize};

/// `LEFT JOIN <table> ON (<on, AND-joined>)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub table: String,
    pub on: Vec<Cond>,
}

/// Accepts one column/table expression or a list of them.
pub trait IntoColumns {
    fn into_columns(self) -> Vec<String>;
}

impl IntoColumns for &str {
    fn into_columns(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoColumns for &String {
    fn into_columns(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<T: Into<String>> IntoColumns for Vec<T> {
    fn into_columns(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<String>, const N: usize> IntoColumns for [T; N] {
    fn into_columns(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl IntoColumns for &[&str] {
    fn into_columns(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

/// An immutable description of one SELECT statement.
///
/// Empty lists and `None` mean "no such clause". `limit`/`offset` of
/// `Some(0)` still render a clause and bind `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    select: Vec<String>,
    from: Vec<String>,
    left_join: Vec<Join>,
    #[serde(rename = "where")]
    conditions: Vec<Cond>,
    group_by: Vec<String>,
    order: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    fn with(&self, f: impl FnOnce(&mut Query)) -> Query {
        let mut next = self.clone();
        f(&mut next);
        next
    }

    // ==================== Builder ====================

    /// Append SELECT columns.
    pub fn select(&self, cols: impl IntoColumns) -> Query {
        self.with(|q| q.select.extend(cols.into_columns()))
    }

    /// Append FROM tables.
    pub fn from(&self, tables: impl IntoColumns) -> Query {
        self.with(|q| q.from.extend(tables.into_columns()))
    }

    /// Append a `LEFT JOIN table ON (...)` clause.
    pub fn left_join(&self, table: impl Into<String>, on: impl IntoConds) -> Query {
        let join = Join {
            table: table.into(),
            on: on.into_conds(),
        };
        self.with(|q| q.left_join.push(join))
    }

    /// Append WHERE conditions (AND-joined with existing ones).
    pub fn filter(&self, conds: impl IntoConds) -> Query {
        self.with(|q| q.conditions.extend(conds.into_conds()))
    }

    /// Append GROUP BY expressions.
    pub fn group_by(&self, cols: impl IntoColumns) -> Query {
        self.with(|q| q.group_by.extend(cols.into_columns()))
    }

    /// Append ORDER BY expressions, e.g. `"created DESC"`.
    pub fn order_by(&self, exprs: impl IntoColumns) -> Query {
        self.with(|q| q.order.extend(exprs.into_columns()))
    }

    /// Set LIMIT (replaces any previous value).
    pub fn limit(&self, n: i64) -> Query {
        self.with(|q| q.limit = Some(n))
    }

    /// Set OFFSET (replaces any previous value).
    pub fn offset(&self, n: i64) -> Query {
        self.with(|q| q.offset = Some(n))
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    /// The offset saturates at `i64::MAX` instead of overflowing.
    pub fn paginate(&self, page: i64, per_page: i64) -> Query {
        let p = page.max(1);
        let size = per_page.max(1);
        self.with(|q| {
            q.limit = Some(size);
            q.offset = Some(p.saturating_sub(1).saturating_mul(size));
        })
    }

    /// Label carried into render log events. Never rendered into SQL.
    pub fn tag(&self, tag: impl Into<String>) -> Query {
        let tag = tag.into();
        self.with(|q| q.tag = Some(tag))
    }

    // ==================== Accessors ====================

    pub fn columns(&self) -> &[String] {
        &self.select
    }

    pub fn tables(&self) -> &[String] {
        &self.from
    }

    pub fn joins(&self) -> &[Join] {
        &self.left_join
    }

    pub fn conditions(&self) -> &[Cond] {
        &self.conditions
    }

    pub fn group_columns(&self) -> &[String] {
        &self.group_by
    }

    pub fn order_exprs(&self) -> &[String] {
        &self.order
    }

    pub fn limit_value(&self) -> Option<i64> {
        self.limit
    }

    pub fn offset_value(&self) -> Option<i64> {
        self.offset
    }

    pub fn tag_name(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

/// Create an empty query.
pub fn query() -> Query {
    Query::new()
}
