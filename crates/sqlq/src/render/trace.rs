use crate::error::QueryResult;
use crate::query::Query;
use crate::render::Rendered;

/// Longest SQL (in bytes) written into a log event.
const MAX_SQL_LENGTH: usize = 200;

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

fn truncate_sql(sql: &str) -> String {
    if sql.len() > MAX_SQL_LENGTH {
        format!("{}...", truncate_sql_bytes(sql, MAX_SQL_LENGTH))
    } else {
        sql.to_string()
    }
}

/// Emit one event per `Renderer::render` call on target `sqlq.render`.
pub(crate) fn emit(renderer: &'static str, query: &Query, result: &QueryResult<Rendered>) {
    let tag = query.tag_name().unwrap_or("-");
    match result {
        Ok(rendered) => tracing::debug!(
            target: "sqlq.render",
            renderer,
            tag,
            param_count = rendered.params.len(),
            sql = %truncate_sql(&rendered.sql),
        ),
        Err(err) => tracing::warn!(
            target: "sqlq.render",
            renderer,
            tag,
            path = err.path(),
            error = %err,
        ),
    }
}
