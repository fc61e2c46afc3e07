//! Renderers turning a [`Query`] into `?`-placeholder SQL and bound values.
//!
//! Two renderers ship with the crate:
//!
//! - [`Basic`]: bare fragments and `column op ?` comparisons.
//! - [`Extended`]: everything `Basic` does, plus raw fragments carrying
//!   their own `?` placeholders and values ([`Cond::Raw`](crate::Cond::Raw)),
//!   in WHERE and in JOIN ... ON.
//!
//! Both produce text and parameters from the same traversal, so the n-th `?`
//! in [`Renderer::render_text`] always corresponds to the n-th value from
//! [`Renderer::render_params`].
//!
//! # Example
//!
//! ```ignore
//! use sqlq::{query, Extended, Renderer};
//!
//! let q = query().select("*").from("test").filter(("a", "=", "asdf"));
//! let built = Extended.render(&q)?;
//! assert_eq!(built.sql, "SELECT * FROM test WHERE a = ?");
//! ```

#[cfg(feature = "tracing")]
mod trace;
mod walk;

#[cfg(test)]
mod tests;

use crate::error::QueryResult;
use crate::query::Query;
use crate::value::Value;
use walk::{BothSink, Caps, ParamSink, TextSink};

/// SQL text and its bound values, rendered from one query snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Rendered {
    /// Number of `?` markers in `sql`. Always equals `params.len()`.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    /// Split into `(sql, params)`.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// A pure function pair from [`Query`] to SQL text and parameters.
///
/// Implementors only describe what they accept; the traversal itself is
/// shared. On error neither output is produced.
pub trait Renderer {
    /// Short name used in errors and log events.
    fn name(&self) -> &'static str;

    /// Whether [`Cond::Raw`](crate::Cond::Raw) leaves are accepted.
    fn supports_raw_params(&self) -> bool;

    /// Render the SQL text.
    fn render_text(&self, query: &Query) -> QueryResult<String> {
        let mut sink = TextSink::default();
        walk::walk(query, caps(self), &mut sink)?;
        Ok(sink.sql)
    }

    /// Render the bound values in placeholder order.
    fn render_params(&self, query: &Query) -> QueryResult<Vec<Value>> {
        let mut sink = ParamSink::default();
        walk::walk(query, caps(self), &mut sink)?;
        Ok(sink.params)
    }

    /// Render text and values together in a single pass.
    fn render(&self, query: &Query) -> QueryResult<Rendered> {
        let mut sink = BothSink::default();
        let result = walk::walk(query, caps(self), &mut sink).map(|()| Rendered {
            sql: sink.text.sql,
            params: sink.params.params,
        });

        #[cfg(feature = "tracing")]
        trace::emit(self.name(), query, &result);

        result
    }
}

fn caps<R: Renderer + ?Sized>(renderer: &R) -> Caps {
    Caps {
        renderer: renderer.name(),
        raw_params: renderer.supports_raw_params(),
    }
}

/// Renders fragments and comparisons; rejects raw fragments with parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Basic;

impl Renderer for Basic {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn supports_raw_params(&self) -> bool {
        false
    }
}

/// Renders every condition kind, including raw fragments with parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extended;

impl Renderer for Extended {
    fn name(&self) -> &'static str {
        "extended"
    }

    fn supports_raw_params(&self) -> bool {
        true
    }
}

impl Query {
    /// Render with the given renderer. Shorthand for `renderer.render(self)`.
    pub fn render_with<R: Renderer + ?Sized>(&self, renderer: &R) -> QueryResult<Rendered> {
        renderer.render(self)
    }
}
