//! Terminal rendering for CLI commands

use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use yansi::Paint;

use crate::bulk::{BulkQuote, ParseError};
use crate::catalog::ProductCatalog;
use crate::models::{ActivityItem, ApiKey, BadgeTone, PurchasePage, PurchaseStatus, Withdrawal};
use crate::phone::format_phone_for_display;
use crate::services::PurchaseOutcome;
use crate::store::{AgentStore, StoreView};
use crate::utils::{format_capacity, format_cedis};

pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

pub fn status_badge(status: &PurchaseStatus) -> String {
    let label = status.label();
    match status.tone() {
        BadgeTone::Success => Paint::new(label).green().to_string(),
        BadgeTone::Danger => Paint::new(label).red().to_string(),
        BadgeTone::Warning => Paint::new(label).yellow().to_string(),
        BadgeTone::Info => Paint::new(label).cyan().to_string(),
        BadgeTone::Neutral => Paint::new(label).dim().to_string(),
    }
}

fn format_time(t: Option<chrono::DateTime<chrono::Utc>>) -> String {
    t.map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "—".into())
}

pub fn print_catalog(catalog: &ProductCatalog, network: Option<&str>) {
    if catalog.is_empty() {
        println!("{}", Paint::new("No products available").yellow());
        return;
    }
    for (key, products) in &catalog.grouped {
        if network.is_some_and(|n| !key.eq_ignore_ascii_case(n)) {
            continue;
        }
        let mut table = new_table();
        table.set_header(vec!["ID", "Capacity", "Price", "Stock"]);
        for p in products {
            let stock = if p.in_stock { "In stock" } else { "Out of stock" };
            table.add_row(vec![p.id.clone(), format_capacity(p.capacity), format_cedis(p.price), stock.to_string()]);
        }
        println!("\n{}\n{table}", Paint::new(key).bold().underline());
    }
    println!();
}

pub fn print_store(store: &AgentStore, view: &StoreView) {
    println!("\n{}", Paint::new(store.display_name()).bold());
    if view.is_empty() {
        println!("{}", Paint::new("This store has no products yet").yellow());
        return;
    }
    let tabs: Vec<String> = view
        .tabs
        .iter()
        .map(|t| {
            let text = format!("{} ({})", t.label, t.count);
            if t.active {
                Paint::new(format!("[{}]", text)).green().bold().to_string()
            } else {
                Paint::new(text).dim().to_string()
            }
        })
        .collect();
    println!("{}", tabs.join("  "));

    let mut table = new_table();
    table.set_header(vec!["ID", "Bundle", "Price", ""]);
    for card in &view.cards {
        let availability = if card.available { "" } else { "Out of stock" };
        table.add_row(vec![card.id.as_str(), card.capacity_label.as_str(), card.price_label.as_str(), availability]);
    }
    println!("{table}\n");
}

pub fn print_parse_errors(errors: &[ParseError]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("{}", Paint::new(format!("{} line(s) could not be read:", errors.len())).red().bold());
    for e in errors {
        let at = if e.line == 0 { "sheet:".to_string() } else { format!("line {}:", e.line) };
        eprintln!("  {} {}", Paint::new(at).red(), e.error);
    }
}

pub fn print_bulk_preview(quote: &BulkQuote) {
    let mut table = new_table();
    table.set_header(vec!["#", "Phone", "Network", "Bundle", "Price"]);
    for (idx, line) in quote.lines.iter().enumerate() {
        let price = match line.unit_price {
            Some(p) => format_cedis(p),
            None => Paint::new("no matching product").yellow().to_string(),
        };
        table.add_row(vec![
            (idx + 1).to_string(),
            format_phone_for_display(&line.intent.phone_number),
            line.intent.network.label().to_string(),
            format_capacity(line.intent.capacity),
            price,
        ]);
    }
    println!("\n{table}");
    println!("{} {}", Paint::new("Total:").bold(), Paint::new(format_cedis(quote.total)).cyan());
    if !quote.unmatched.is_empty() {
        println!(
            "{}",
            Paint::new(format!(
                "Warning: {} row(s) have no matching product and are not included in the total",
                quote.unmatched.len()
            ))
            .yellow()
        );
    }
}

pub fn print_outcome(outcome: &PurchaseOutcome) {
    match outcome {
        PurchaseOutcome::Success { message, balance, checkout_url } => {
            println!("{}", Paint::new(message).green());
            if let Some(b) = balance {
                println!("{} {}", Paint::new("Wallet balance:").bold(), format_cedis(*b));
            }
            if let Some(url) = checkout_url {
                println!("{} {}", Paint::new("Complete payment at:").bold(), Paint::new(url).underline());
            }
        }
        PurchaseOutcome::Rejected { .. } | PurchaseOutcome::Failed { .. } | PurchaseOutcome::Blocked(_) => {
            eprintln!("{}", Paint::new(outcome.message()).red());
        }
        PurchaseOutcome::Busy => eprintln!("{}", Paint::new(outcome.message()).yellow()),
    }
}

pub fn print_purchase_page(page: &PurchasePage, per_page: usize) {
    let mut table = new_table();
    table.set_header(vec!["ID", "Reference", "Phone", "Network", "Bundle", "Price", "Status", "Created"]);
    for p in &page.purchases {
        table.add_row(vec![
            p.id.clone(),
            p.reference.clone(),
            format_phone_for_display(&p.phone_number),
            p.network.clone(),
            format_capacity(p.capacity),
            format_cedis(p.price),
            status_badge(&p.status),
            format_time(p.created_at),
        ]);
    }
    println!("\n{table}");

    if page.pages > 1 {
        println!(
            "\n{}",
            Paint::new(format!(
                "Page {} of {} | Showing {} of {} total purchases",
                page.page,
                page.pages,
                page.purchases.len(),
                page.total
            ))
            .cyan()
        );
        if page.page > 1 {
            println!(
                "{} {}",
                Paint::new("←").bold(),
                Paint::new(format!("Previous page: cletech admin purchases list --page {} --per-page {}", page.page - 1, per_page)).dim()
            );
        }
        if page.page < page.pages {
            println!(
                "{} {}",
                Paint::new("→").bold(),
                Paint::new(format!("Next page: cletech admin purchases list --page {} --per-page {}", page.page + 1, per_page)).dim()
            );
        }
    }
    println!();
}

pub fn print_activity(items: &[ActivityItem]) {
    let mut table = new_table();
    table.set_header(vec!["Time", "Phone", "Network", "Bundle", "Status"]);
    for item in items {
        table.add_row(vec![
            format_time(item.created_at),
            format_phone_for_display(&item.phone_number),
            item.network.clone(),
            format_capacity(item.capacity),
            status_badge(&item.status),
        ]);
    }
    println!("\n{table}");
}

pub fn print_api_keys(keys: &[ApiKey]) {
    if keys.is_empty() {
        println!("(no API keys)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Key", "Active", "Created", "Last used"]);
    for k in keys {
        let active = if k.is_active {
            Paint::new("yes").green().to_string()
        } else {
            Paint::new("revoked").red().to_string()
        };
        table.add_row(vec![
            k.id.clone(),
            k.name.clone(),
            k.display_key(),
            active,
            format_time(k.created_at),
            format_time(k.last_used_at),
        ]);
    }
    println!("\n{table}\n");
}

pub fn print_withdrawals(rows: &[Withdrawal]) {
    if rows.is_empty() {
        println!("(no withdrawals)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["ID", "User", "Amount", "Method", "Status", "Requested"]);
    for w in rows {
        table.add_row(vec![
            w.id.clone(),
            w.user.clone(),
            format_cedis(w.amount),
            w.method.clone(),
            w.status.clone(),
            format_time(w.created_at),
        ]);
    }
    println!("\n{table}\n");
}
