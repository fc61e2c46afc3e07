//! Example: build a report query from optional filters and render it.
//!
//! Run with:
//!   cargo run --example campaign_report -p sqlq

use sqlq::{Cond, Extended, Query, QueryResult, Renderer, cmp, or, query, raw};

#[derive(Debug, Default)]
struct Filters {
    updated_before: Option<String>,
    search: Option<String>,
    regions: Vec<String>,
    page: i64,
    per_page: i64,
}

fn build_report_query(filters: &Filters) -> Query {
    let mut q = query()
        .select(["c.*", "COUNT(cr.id) AS reports"])
        .from("campaigns c")
        .left_join(
            "campaignReports cr",
            vec![Cond::from("cr.campaignId = c.id"), cmp("cr.isFinal", "=", true)],
        );

    if let Some(before) = &filters.updated_before {
        q = q.filter(vec![
            cmp("c.startDate", "<=", before.clone()),
            or(vec![Cond::from("cr.id IS NULL"), cmp("cr.created", "<=", before.clone())]),
        ]);
    }

    if let Some(search) = &filters.search {
        q = q.filter(raw("LOWER(c.name) LIKE LOWER(?)", [format!("%{search}%")]));
    }

    if !filters.regions.is_empty() {
        let regions: Vec<Cond> = filters
            .regions
            .iter()
            .map(|r| cmp("c.region", "=", r.clone()))
            .collect();
        q = q.filter(or(regions));
    }

    q.group_by("c.id")
        .order_by("c.startDate DESC")
        .paginate(filters.page, filters.per_page)
}

fn main() -> QueryResult<()> {
    let filters = Filters {
        updated_before: Some("1981-02-08".to_string()),
        search: Some("spring".to_string()),
        regions: vec!["eu".to_string(), "us".to_string()],
        page: 2,
        per_page: 20,
    };

    let built = Extended.render(&build_report_query(&filters).tag("campaigns.report"))?;
    println!("SQL:    {}", built.sql);
    println!("Params: {:?}", built.params);

    // Empty filters still produce a valid statement.
    let built = Extended.render(&build_report_query(&Filters::default()))?;
    println!("SQL:    {}", built.sql);
    println!("Params: {:?}", built.params);

    Ok(())
}
