//! Transaction command implementations

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::{PageRequest, QueryService, SortOrder, Transaction, TransactionFilter};

use super::{format_amount, truncate};

#[allow(clippy::too_many_arguments)]
pub fn cmd_search(
    service: &QueryService,
    keyword: Option<&str>,
    accounts: &[String],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    page: u32,
    sort: &str,
    json: bool,
) -> Result<Vec<Transaction>> {
    let page = PageRequest::new(page, SortOrder::from_param(sort))?;
    let filter = TransactionFilter::new()
        .keyword(keyword)
        .accounts(accounts)
        .start(start)
        .end(end);

    let transactions = service.list_transactions(&filter, &page)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transactions)?);
        return Ok(transactions);
    }

    if transactions.is_empty() {
        println!("No transactions found on page {}.", page.page());
        return Ok(transactions);
    }

    println!();
    println!("📝 Transactions (page {}, {})", page.page(), page.sort());
    println!("   ─────────────────────────────────────────────────────────────────────");

    for tx in &transactions {
        println!(
            "   {} │ {:<10} │ {:>10} │ {:>10} │ {}",
            tx.date.format("%d/%m/%Y"),
            truncate(&tx.account_id, 10),
            format_amount(tx.debit),
            format_amount(tx.credit),
            truncate(&tx.description, 40)
        );
    }

    Ok(transactions)
}

pub fn cmd_info(service: &QueryService) -> Result<()> {
    let info = service.user_info()?;

    if info.bank_accounts.is_empty() {
        println!("No transactions yet. Load some with:");
        println!("  tally ingest ./statements");
        return Ok(());
    }

    println!();
    println!("🏦 Accounts ({})", info.bank_accounts.len());
    for account in &info.bank_accounts {
        println!("   {}", account);
    }

    println!();
    println!("🔎 Descriptions ({})", info.keywords.len());
    for keyword in &info.keywords {
        println!("   {}", truncate(keyword, 60));
    }

    Ok(())
}
