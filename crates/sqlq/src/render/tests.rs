use super::*;
use crate::cond::{Cond, and, cmp, or, raw};
use crate::error::QueryError;
use crate::query::query;

fn text(q: &Query) -> String {
    Basic.render_text(q).unwrap()
}

fn params(q: &Query) -> Vec<Value> {
    Basic.render_params(q).unwrap()
}

fn vals<V: Into<Value> + Clone>(xs: &[V]) -> Vec<Value> {
    xs.iter().cloned().map(Into::into).collect()
}

#[test]
fn test_empty_query_renders_nothing() {
    assert_eq!(text(&query()), "");
    assert!(params(&query()).is_empty());
}

#[test]
fn test_where_fragment() {
    let q = query().select("*").from("test").filter("a = b");
    assert_eq!(text(&q), "SELECT * FROM test WHERE a = b");
    assert!(params(&q).is_empty());
}

#[test]
fn test_where_compare() {
    let q = query().select("*").from("test").filter(("a", "=", "asdf"));
    assert_eq!(text(&q), "SELECT * FROM test WHERE a = ?");
    assert_eq!(params(&q), vals(&["asdf"]));
}

#[test]
fn test_join_fragment() {
    let q = query()
        .select(["* as a", "test.blah as b"])
        .from(["test t", "blah b"])
        .left_join("something s", "s.id = b.id")
        .filter(("a", "=", "asdf"));

    assert_eq!(
        text(&q),
        "SELECT * as a, test.blah as b FROM test t, blah b LEFT JOIN something s ON (s.id = b.id) WHERE a = ?"
    );
    assert_eq!(params(&q), vals(&["asdf"]));
}

#[test]
fn test_multiple_joins_params_before_where() {
    let q = query()
        .select(["* as a", "test.blah as b"])
        .from(["test t", "blah b"])
        .left_join(
            "something s",
            vec![Cond::from("s.id = b.id"), Cond::from(("s.name", "=", "Cully"))],
        )
        .left_join("foo f", [("f.id", "!=", "1"), ("f.key", "=", "Foo")])
        .filter(("a", "=", "asdf"))
        .filter(("blue", "!=", "red"));

    assert_eq!(
        text(&q),
        "SELECT * as a, test.blah as b FROM test t, blah b \
         LEFT JOIN something s ON (s.id = b.id AND s.name = ?) \
         LEFT JOIN foo f ON (f.id != ? AND f.key = ?) \
         WHERE a = ? AND blue != ?"
    );
    assert_eq!(params(&q), vals(&["Cully", "1", "Foo", "asdf", "red"]));
}

#[test]
fn test_order_limit_offset() {
    let q = query()
        .select(["* as a", "test.blah as b"])
        .from(["test t", "blah b"])
        .filter(("a", "=", "asdf"))
        .order_by(["blue ASC", "red DESC"])
        .limit(3)
        .offset(100);

    assert_eq!(
        text(&q),
        "SELECT * as a, test.blah as b FROM test t, blah b WHERE a = ? ORDER BY blue ASC, red DESC LIMIT ? OFFSET ?"
    );
    assert_eq!(
        params(&q),
        vec![Value::from("asdf"), Value::Int(3), Value::Int(100)]
    );
}

#[test]
fn test_repeated_calls_append() {
    let q = query()
        .select("* as a")
        .select("test.blah as b")
        .from("test t")
        .from("blah b")
        .filter(("a", "=", "asdf"))
        .filter(("some", "LIKE", "thing"))
        .filter("a = b")
        .order_by("blue ASC")
        .order_by("red DESC")
        .limit(3)
        .offset(100);

    assert_eq!(
        text(&q),
        "SELECT * as a, test.blah as b FROM test t, blah b WHERE a = ? AND some LIKE ? AND a = b ORDER BY blue ASC, red DESC LIMIT ? OFFSET ?"
    );
    assert_eq!(
        params(&q),
        vec![
            Value::from("asdf"),
            Value::from("thing"),
            Value::Int(3),
            Value::Int(100)
        ]
    );
}

#[test]
fn test_group_by() {
    let q = query()
        .select(["SUM(a)", "test.blah as b"])
        .from(["test t", "blah b"])
        .filter(("a", "=", "asdf"))
        .group_by("a")
        .group_by("b")
        .group_by(["c", "d"])
        .order_by(["blue ASC", "red DESC"])
        .limit(3)
        .offset(100);

    assert_eq!(
        text(&q),
        "SELECT SUM(a), test.blah as b FROM test t, blah b WHERE a = ? GROUP BY a, b, c, d ORDER BY blue ASC, red DESC LIMIT ? OFFSET ?"
    );
    assert_eq!(
        params(&q),
        vec![Value::from("asdf"), Value::Int(3), Value::Int(100)]
    );
}

#[test]
fn test_limit_without_offset() {
    let q = query().select("*").from("t").limit(3);
    assert_eq!(text(&q), "SELECT * FROM t LIMIT ?");
    assert_eq!(params(&q), vec![Value::Int(3)]);
}

#[test]
fn test_zero_limit_still_renders() {
    let q = query().select("*").from("t").limit(0).offset(0);
    assert_eq!(text(&q), "SELECT * FROM t LIMIT ? OFFSET ?");
    assert_eq!(params(&q), vec![Value::Int(0), Value::Int(0)]);
}

#[test]
fn test_offset_without_limit() {
    let q = query().select("*").from("t").offset(5);
    assert_eq!(text(&q), "SELECT * FROM t OFFSET ?");
    assert_eq!(params(&q), vec![Value::Int(5)]);
}

#[test]
fn test_or_group() {
    let q = query()
        .select("*")
        .from("blah")
        .filter("a = b")
        .filter(or([("c", "=", "CCC"), ("d", "=", "DDD")]));

    assert_eq!(text(&q), "SELECT * FROM blah WHERE a = b AND (c = ? OR d = ?)");
    assert_eq!(params(&q), vals(&["CCC", "DDD"]));
}

#[test]
fn test_nested_groups() {
    let q = query().select("*").from("blah").filter("a = b").filter(or(vec![
        cmp("c", "=", "CCC"),
        cmp("d", "=", "DDD"),
        and(vec![
            cmp("e", "=", "EEE"),
            Cond::fragment("g = 2"),
            or(vec![
                cmp("h", "!=", "HHH"),
                Cond::fragment("i = 27"),
                cmp("j", "=", "JJJ"),
            ]),
        ]),
    ]));

    assert_eq!(
        text(&q),
        "SELECT * FROM blah WHERE a = b AND (c = ? OR d = ? OR (e = ? AND g = 2 AND (h != ? OR i = 27 OR j = ?)))"
    );
    assert_eq!(params(&q), vals(&["CCC", "DDD", "EEE", "HHH", "JJJ"]));
}

#[test]
fn test_mixed_list_with_group() {
    let before = "1981-02-08";
    let q = query()
        .select("c.*")
        .from("campaigns c")
        .left_join("campaignReports cr", "cr.campaignId = c.id")
        .filter(vec![
            cmp("c.startDate", "<=", before),
            or(vec![
                Cond::from("cr.id IS NULL"),
                Cond::from("cr.isFinal = FALSE"),
                Cond::from("cr.isCancelledWhenMarkedFinal != c.isCancelled"),
                Cond::from("cr.startDateWhenMarkedFinal != c.startDate"),
                Cond::from("cr.endDateWhenMarkedFinal != c.endDate"),
                cmp("cr.created", "<=", before),
            ]),
        ]);

    assert_eq!(
        text(&q),
        "SELECT c.* FROM campaigns c LEFT JOIN campaignReports cr ON (cr.campaignId = c.id) \
         WHERE c.startDate <= ? AND (cr.id IS NULL OR cr.isFinal = FALSE \
         OR cr.isCancelledWhenMarkedFinal != c.isCancelled OR cr.startDateWhenMarkedFinal != c.startDate \
         OR cr.endDateWhenMarkedFinal != c.endDate OR cr.created <= ?)"
    );
    assert_eq!(params(&q), vals(&[before, before]));
}

#[test]
fn test_multiple_where_calls_with_groups() {
    let before = "1981-02-08";
    let term = "blah";
    let q = query()
        .select("c.*")
        .from("campaigns c")
        .left_join("campaignReports cr", "cr.campaignId = c.id")
        .filter(or(vec![
            ("term", "=", term.to_string()),
            ("term", "=", format!("\"{}\"", term)),
            ("term", "=", format!("'{}'", term)),
        ]))
        .filter("a = b")
        .filter(vec![
            cmp("c.startDate", "<=", before),
            or(["cr.id IS NULL", "cr.isFinal = FALSE"]),
        ]);

    assert_eq!(
        text(&q),
        "SELECT c.* FROM campaigns c LEFT JOIN campaignReports cr ON (cr.campaignId = c.id) \
         WHERE (term = ? OR term = ? OR term = ?) AND a = b AND c.startDate <= ? \
         AND (cr.id IS NULL OR cr.isFinal = FALSE)"
    );
    assert_eq!(
        params(&q),
        vals(&[
            term.to_string(),
            format!("\"{}\"", term),
            format!("'{}'", term),
            before.to_string(),
        ])
    );
}

#[test]
fn test_group_inside_join_on() {
    let q = query()
        .select("*")
        .from("a")
        .left_join("b", vec![Cond::from("b.a_id = a.id"), or([("b.kind", "=", "x"), ("b.kind", "=", "y")])])
        .filter(("a.n", ">", 1));

    assert_eq!(
        text(&q),
        "SELECT * FROM a LEFT JOIN b ON (b.a_id = a.id AND (b.kind = ? OR b.kind = ?)) WHERE a.n > ?"
    );
    assert_eq!(
        params(&q),
        vec![Value::from("x"), Value::from("y"), Value::Int(1)]
    );
}

// ==================== Extended renderer ====================

#[test]
fn test_extended_matches_basic_without_raw() {
    let q = query()
        .select("*")
        .from("blah")
        .left_join("x", ("x.id", "=", 4))
        .filter(or([("c", "=", "CCC"), ("d", "=", "DDD")]))
        .limit(3);

    assert_eq!(Extended.render(&q).unwrap(), Basic.render(&q).unwrap());
}

#[test]
fn test_extended_raw_in_where() {
    let q = query()
        .select("*")
        .from("users")
        .filter(("status", "=", "active"))
        .filter(raw("LOWER(name) = LOWER(?) OR email = ?", ["Cully", "c@x.io"]))
        .limit(1);

    let built = Extended.render(&q).unwrap();
    assert_eq!(
        built.sql,
        "SELECT * FROM users WHERE status = ? AND (LOWER(name) = LOWER(?) OR email = ?) LIMIT ?"
    );
    assert_eq!(
        built.params,
        vec![
            Value::from("active"),
            Value::from("Cully"),
            Value::from("c@x.io"),
            Value::Int(1)
        ]
    );
}

#[test]
fn test_extended_raw_in_join_on() {
    let q = query()
        .select("*")
        .from("a")
        .left_join(
            "b",
            vec![
                Cond::from("b.a_id = a.id"),
                raw("b.created > DATE_SUB(?, INTERVAL ? DAY)", vec![Value::from("2020-01-01"), Value::from(7)]),
            ],
        )
        .filter(("a.x", "=", "y"));

    assert_eq!(
        Extended.render_text(&q).unwrap(),
        "SELECT * FROM a LEFT JOIN b ON (b.a_id = a.id AND (b.created > DATE_SUB(?, INTERVAL ? DAY))) WHERE a.x = ?"
    );
    assert_eq!(
        Extended.render_params(&q).unwrap(),
        vec![Value::from("2020-01-01"), Value::Int(7), Value::from("y")]
    );
}

#[test]
fn test_extended_raw_inside_nested_group() {
    let q = query().filter(or(vec![
        cmp("a", "=", 1),
        and(vec![raw("b IN (?, ?)", [2, 3]), cmp("c", "=", 4)]),
        raw("NOW() > d", Vec::<Value>::new()),
    ]));

    let built = Extended.render(&q).unwrap();
    assert_eq!(built.sql, "WHERE (a = ? OR ((b IN (?, ?)) AND c = ?) OR (NOW() > d))");
    assert_eq!(built.params, vals(&[1, 2, 3, 4]));
}

#[test]
fn test_extended_raw_placeholder_at_edges() {
    let q = query().filter(raw("? = ?", ["l", "r"]));
    let built = Extended.render(&q).unwrap();
    assert_eq!(built.sql, "WHERE (? = ?)");
    assert_eq!(built.params, vals(&["l", "r"]));
}

// ==================== Errors ====================

#[test]
fn test_basic_rejects_raw() {
    let q = query().filter(("a", "=", 1)).filter(raw("b = ?", [2]));
    let err = Basic.render_text(&q).unwrap_err();
    assert!(err.is_unsupported());
    assert_eq!(err.path(), "where[1]");
    assert_eq!(Basic.render_params(&q).unwrap_err(), err);
    assert_eq!(Basic.render(&q).unwrap_err(), err);
}

#[test]
fn test_basic_rejects_raw_in_join() {
    let q = query().left_join("b", raw("b.x = ?", [1]));
    let err = Basic.render(&q).unwrap_err();
    assert!(err.is_unsupported());
    assert_eq!(err.path(), "left_join[0].on[0]");
}

#[test]
fn test_raw_count_mismatch() {
    let q = query().filter(or(vec![cmp("a", "=", 1), raw("b = ? AND c = ?", [2])]));
    let err = Extended.render(&q).unwrap_err();
    assert!(err.is_placeholder_mismatch());
    assert!(!err.is_malformed());
    assert_eq!(
        err,
        QueryError::PlaceholderMismatch {
            path: "where[0].or[1]".to_string(),
            placeholders: 2,
            params: 1,
        }
    );
}

#[test]
fn test_empty_fragment_is_malformed() {
    let q = query().filter(vec!["a = b", ""]);
    let err = Basic.render_text(&q).unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.path(), "where[1]");
}

#[test]
fn test_empty_group_is_malformed() {
    let q = query().filter(and(Vec::<Cond>::new()));
    let err = Extended.render_params(&q).unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.path(), "where[0]");
}

#[test]
fn test_empty_column_is_malformed() {
    let q = query().left_join("b", vec![Cond::from("b.id = a.id"), cmp("", "=", 1)]);
    let err = Basic.render(&q).unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.path(), "left_join[0].on[1]");
}

#[test]
fn test_join_without_on_is_malformed() {
    let q = query().left_join("b", Vec::<Cond>::new());
    let err = Basic.render(&q).unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.path(), "left_join[0]");
}

#[test]
fn test_stray_placeholder_in_fragment_is_malformed() {
    let q = query().filter("a = ?");
    let err = Extended.render(&q).unwrap_err();
    assert!(err.is_malformed());

    let q = query().select("COALESCE(x, ?)");
    let err = Extended.render(&q).unwrap_err();
    assert_eq!(err.path(), "select[0]");
}

// ==================== Invariants ====================

#[test]
fn test_render_is_idempotent() {
    let q = query()
        .select("*")
        .from("t")
        .left_join("j", ("j.x", "=", 1))
        .filter(or([("a", "=", 2), ("b", "=", 3)]))
        .limit(10);

    let first = Extended.render(&q).unwrap();
    let second = Extended.render(&q).unwrap();
    assert_eq!(first, second);
    assert_eq!(Extended.render_text(&q).unwrap(), first.sql);
    assert_eq!(Extended.render_params(&q).unwrap(), first.params);
}

#[test]
fn test_placeholder_count_matches_params() {
    let q = query()
        .select("*")
        .from("t")
        .left_join("j", vec![cmp("j.a", "=", 1), raw("j.b = ?", [2])])
        .filter(and(vec![or(vec![cmp("c", "<", 3), raw("? < d AND d < ?", [4, 5])])]))
        .paginate(2, 25);

    let built = Extended.render(&q).unwrap();
    assert_eq!(built.placeholder_count(), built.params.len());
    assert_eq!(built.params.len(), 7);
}

#[test]
fn test_render_with() {
    let q = query().select("1");
    assert_eq!(q.render_with(&Basic).unwrap().sql, "SELECT 1");
    let dynamic: &dyn Renderer = &Extended;
    assert_eq!(q.render_with(dynamic).unwrap().into_parts(), ("SELECT 1".to_string(), vec![]));
}
