//! Report command implementations

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::{AggregateResult, QueryService, TrendBucket};

pub fn cmd_trends(
    service: &QueryService,
    keyword: Option<&str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    json: bool,
) -> Result<Vec<TrendBucket>> {
    let buckets = service.trend(keyword, start, end)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&buckets)?);
        return Ok(buckets);
    }

    println!();
    println!("📈 Weekly Trend: {}", keyword.unwrap_or("all transactions"));
    println!("   ─────────────────────────────────────────");

    if buckets.is_empty() {
        println!("   No matching transactions.");
        return Ok(buckets);
    }

    println!("   {:<12} │ {:>12} │ {:>12}", "Week of", "Credit", "Debit");
    for bucket in &buckets {
        println!(
            "   {:<12} │ {:>12.2} │ {:>12.2}",
            bucket.period.format("%d-%m-%Y"),
            bucket.total_credit,
            bucket.total_debit
        );
    }

    Ok(buckets)
}

pub fn cmd_aggregate(
    service: &QueryService,
    keyword: Option<&str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    json: bool,
) -> Result<AggregateResult> {
    let result = service.aggregate(keyword, start, end)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(result);
    }

    let label = if result.category.is_empty() {
        "all transactions"
    } else {
        result.category.as_str()
    };

    println!();
    println!("📊 Totals: {}", label);
    println!("   ─────────────────────────────");
    println!("   Credit: {:>12.2}", result.total_credit);
    println!("   Debit:  {:>12.2}", result.total_debit);
    println!("   Net:    {:>12.2}", result.total);

    Ok(result)
}
