//! The single traversal shared by every render pass.
//!
//! Text and parameters are produced by walking the query once in clause
//! order and reporting SQL pieces and bound values to a [`Sink`]. A `?` is
//! only ever written by [`Sink::push_param`], so the placeholder sequence and
//! the parameter sequence cannot drift apart.
//!
//! Parameter order falls out of clause order: JOIN ... ON values come before
//! WHERE values, which come before LIMIT and OFFSET.

use crate::cond::{Cond, Kind};
use crate::error::{QueryError, QueryResult};
use crate::query::{Join, Query};
use crate::value::Value;

/// Receives the pieces of a rendered statement in order.
pub(crate) trait Sink {
    /// Literal SQL (never contains a placeholder).
    fn push_sql(&mut self, sql: &str);

    /// One bound value, standing for one `?` in the text.
    fn push_param(&mut self, value: &Value);
}

/// Collects SQL text only.
#[derive(Debug, Default)]
pub(crate) struct TextSink {
    pub(crate) sql: String,
}

impl Sink for TextSink {
    fn push_sql(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    fn push_param(&mut self, _value: &Value) {
        self.sql.push('?');
    }
}

/// Collects bound values only.
#[derive(Debug, Default)]
pub(crate) struct ParamSink {
    pub(crate) params: Vec<Value>,
}

impl Sink for ParamSink {
    fn push_sql(&mut self, _sql: &str) {}

    fn push_param(&mut self, value: &Value) {
        self.params.push(value.clone());
    }
}

/// Collects both outputs in one pass.
#[derive(Debug, Default)]
pub(crate) struct BothSink {
    pub(crate) text: TextSink,
    pub(crate) params: ParamSink,
}

impl Sink for BothSink {
    fn push_sql(&mut self, sql: &str) {
        self.text.push_sql(sql);
    }

    fn push_param(&mut self, value: &Value) {
        self.text.push_param(value);
        self.params.push_param(value);
    }
}

/// What the active renderer accepts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Caps {
    pub(crate) renderer: &'static str,
    pub(crate) raw_params: bool,
}

/// Walk `query` into `sink`.
///
/// On error the sink holds a partial statement and must be discarded.
pub(crate) fn walk<S: Sink>(query: &Query, caps: Caps, sink: &mut S) -> QueryResult<()> {
    let mut w = Walker {
        sink,
        caps,
        path: Vec::new(),
        started: false,
    };

    w.list_clause("SELECT ", "select", query.columns())?;
    w.list_clause("FROM ", "from", query.tables())?;

    for (i, join) in query.joins().iter().enumerate() {
        w.path.push(("left_join", i));
        w.join(join)?;
        w.path.pop();
    }

    if !query.conditions().is_empty() {
        w.clause("WHERE ");
        w.siblings("where", query.conditions(), Kind::And)?;
    }

    w.list_clause("GROUP BY ", "group_by", query.group_columns())?;
    w.list_clause("ORDER BY ", "order", query.order_exprs())?;

    if let Some(limit) = query.limit_value() {
        w.clause("LIMIT ");
        w.sink.push_param(&Value::Int(limit));
    }
    if let Some(offset) = query.offset_value() {
        w.clause("OFFSET ");
        w.sink.push_param(&Value::Int(offset));
    }

    Ok(())
}

struct Walker<'s, S: Sink> {
    sink: &'s mut S,
    caps: Caps,
    /// (segment, index) pairs from the clause down to the current node.
    path: Vec<(&'static str, usize)>,
    started: bool,
}

impl<S: Sink> Walker<'_, S> {
    fn clause(&mut self, keyword: &str) {
        if self.started {
            self.sink.push_sql(" ");
        }
        self.started = true;
        self.sink.push_sql(keyword);
    }

    fn list_clause(&mut self, keyword: &str, segment: &'static str, items: &[String]) -> QueryResult<()> {
        if items.is_empty() {
            return Ok(());
        }
        for (i, item) in items.iter().enumerate() {
            self.path.push((segment, i));
            self.plain("expression", item)?;
            self.path.pop();
        }
        self.clause(keyword);
        self.sink.push_sql(&items.join(", "));
        Ok(())
    }

    fn join(&mut self, join: &Join) -> QueryResult<()> {
        self.plain("join table", &join.table)?;
        if join.on.is_empty() {
            return Err(self.malformed("join has no ON conditions"));
        }

        self.clause("LEFT JOIN ");
        self.sink.push_sql(&join.table);
        self.sink.push_sql(" ON (");
        self.siblings("on", &join.on, Kind::And)?;
        self.sink.push_sql(")");
        Ok(())
    }

    /// Render `conds` joined by `kind`, without surrounding parentheses.
    fn siblings(&mut self, segment: &'static str, conds: &[Cond], kind: Kind) -> QueryResult<()> {
        for (i, cond) in conds.iter().enumerate() {
            if i > 0 {
                self.sink.push_sql(kind.separator());
            }
            self.path.push((segment, i));
            self.cond(cond)?;
            self.path.pop();
        }
        Ok(())
    }

    fn cond(&mut self, cond: &Cond) -> QueryResult<()> {
        match cond {
            Cond::Fragment(sql) => {
                self.plain("fragment", sql)?;
                self.sink.push_sql(sql);
            }
            Cond::Compare { column, op, value } => {
                self.plain("column", column)?;
                self.plain("operator", op)?;
                self.sink.push_sql(column);
                self.sink.push_sql(" ");
                self.sink.push_sql(op);
                self.sink.push_sql(" ");
                self.sink.push_param(value);
            }
            Cond::Raw { sql, params } => {
                if !self.caps.raw_params {
                    return Err(QueryError::Unsupported {
                        path: self.path_string(),
                        renderer: self.caps.renderer,
                    });
                }
                if sql.trim().is_empty() {
                    return Err(self.malformed("empty raw fragment"));
                }
                let placeholders = sql.matches('?').count();
                if placeholders != params.len() {
                    return Err(QueryError::PlaceholderMismatch {
                        path: self.path_string(),
                        placeholders,
                        params: params.len(),
                    });
                }

                self.sink.push_sql("(");
                let mut values = params.iter();
                for (i, piece) in sql.split('?').enumerate() {
                    if i > 0 {
                        if let Some(value) = values.next() {
                            self.sink.push_param(value);
                        }
                    }
                    self.sink.push_sql(piece);
                }
                self.sink.push_sql(")");
            }
            Cond::Group { kind, conds } => {
                if conds.is_empty() {
                    return Err(self.malformed(format!("empty {} group", kind.name())));
                }
                self.sink.push_sql("(");
                self.siblings(kind.name(), conds, *kind)?;
                self.sink.push_sql(")");
            }
        }
        Ok(())
    }

    /// Reject empty text and stray `?` in text that binds nothing.
    fn plain(&self, what: &str, text: &str) -> QueryResult<()> {
        if text.trim().is_empty() {
            return Err(self.malformed(format!("empty {}", what)));
        }
        if text.contains('?') {
            return Err(self.malformed(format!(
                "{} `{}` contains `?` but binds no parameter; use a raw condition with parameters",
                what, text
            )));
        }
        Ok(())
    }

    fn malformed(&self, reason: impl Into<String>) -> QueryError {
        QueryError::malformed(self.path_string(), reason)
    }

    fn path_string(&self) -> String {
        self.path
            .iter()
            .map(|(segment, i)| format!("{}[{}]", segment, i))
            .collect::<Vec<_>>()
            .join(".")
    }
}
