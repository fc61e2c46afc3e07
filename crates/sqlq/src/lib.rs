//! # sqlq
//!
//! An immutable SELECT builder that renders SQL with `?` placeholders plus
//! the matching, ordered list of bound values.
//!
//! ## Features
//!
//! - **Pure builder**: every call returns a new [`Query`]; bases can be shared
//!   and extended along independent branches
//! - **Condition trees**: fragments, `column op ?` comparisons, raw fragments
//!   with their own parameters, nested AND/OR groups
//! - **Positional agreement**: text and parameters come from one traversal,
//!   so the n-th `?` always matches the n-th value
//! - **Errors at render time**: malformed nodes are reported with their path
//!   (`where[1].or[0]`), never silently mis-rendered
//!
//! ## Example
//!
//! ```ignore
//! use sqlq::{cmp, or, query, Basic, Renderer};
//!
//! let q = query()
//!     .select("c.*")
//!     .from("campaigns c")
//!     .left_join("campaignReports cr", "cr.campaignId = c.id")
//!     .filter(vec![
//!         cmp("c.startDate", "<=", "1981-02-08"),
//!         or(["cr.id IS NULL", "cr.isFinal = FALSE"]),
//!     ])
//!     .order_by("c.startDate DESC")
//!     .limit(10);
//!
//! let built = Basic.render(&q)?;
//! // built.sql:    SELECT c.* FROM campaigns c LEFT JOIN campaignReports cr ON (cr.campaignId = c.id)
//! //               WHERE c.startDate <= ? AND (cr.id IS NULL OR cr.isFinal = FALSE)
//! //               ORDER BY c.startDate DESC LIMIT ?
//! // built.params: ['1981-02-08', 10]
//! ```

pub mod cond;
pub mod error;
pub mod query;
pub mod render;
pub mod value;

pub use cond::{Cond, IntoConds, Kind, and, cmp, or, raw};
pub use error::{QueryError, QueryResult};
pub use query::{IntoColumns, Join, Query, query};
pub use render::{Basic, Extended, Rendered, Renderer};
pub use value::Value;
