//! Marketplace CLI commands: list, show, delete.

use anyhow::{Context, Result, anyhow};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use rentora_core::marketplace::query::{from_query_string, to_query_string};
use rentora_core::repository::property::ListingFilter;
use rentora_core::wizard::assembler::{format_listing_summary, format_money};
use rentora_types::property::{ListingStatus, Property, PropertyId, Terms};

use super::ListArgs;
use super::money::parse_money;
use crate::state::AppState;

/// Search marketplace listings (`rentora list`).
pub async fn list_listings(state: &AppState, args: ListArgs, json: bool) -> Result<()> {
    let filter = build_filter(&args)?;
    let query = to_query_string(&filter);

    // With pagination in play, fetch the unpaginated total for the footer.
    let total = if filter.limit.is_some() || filter.offset.is_some() {
        Some(state.marketplace.count(filter.clone()).await?)
    } else {
        None
    };

    let listings = state.marketplace.search(filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    if listings.is_empty() {
        println!();
        println!(
            "  {} No listings matched. Widen the search, or create one with: {}",
            style("i").blue().bold(),
            style("rentora new").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("City").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Beds").fg(Color::White),
        Cell::new("Rent").fg(Color::White),
        Cell::new("Status").fg(Color::White),
    ]);

    for listing in &listings {
        table.add_row(vec![
            Cell::new(short_id(&listing.id)).fg(Color::DarkGrey),
            Cell::new(&listing.basics.title).fg(Color::Cyan),
            Cell::new(&listing.location.city),
            Cell::new(&listing.basics.property_type),
            Cell::new(listing.basics.bedrooms),
            rent_cell(listing),
            status_cell(&listing.status),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    match total {
        Some(total) if total != listings.len() => {
            println!(
                "  {} of {} listing{}",
                style(listings.len()).bold(),
                total,
                if total == 1 { "" } else { "s" }
            );
        }
        _ => {
            println!(
                "  {} listing{}",
                style(listings.len()).bold(),
                if listings.len() == 1 { "" } else { "s" }
            );
        }
    }
    if !query.is_empty() {
        // Replayable with `rentora list --query '...'`.
        println!("  {}", style(format!("Query: {query}")).dim());
    }
    println!();

    Ok(())
}

/// Show one listing in full (`rentora show <id>`).
pub async fn show_listing(state: &AppState, id: &str, json: bool) -> Result<()> {
    let id: PropertyId = id.parse().context("invalid listing id")?;
    let listing = state
        .marketplace
        .get(&id)
        .await?
        .ok_or_else(|| anyhow!("listing {id} not found"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!();
    for line in format_listing_summary(&listing).lines() {
        println!("  {line}");
    }
    println!();

    Ok(())
}

/// Delete a listing permanently, with confirmation (`rentora delete <id>`).
pub async fn delete_listing(state: &AppState, id: &str, force: bool, json: bool) -> Result<()> {
    let id: PropertyId = id.parse().context("invalid listing id")?;
    let listing = state
        .marketplace
        .get(&id)
        .await?
        .ok_or_else(|| anyhow!("listing {id} not found"))?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete listing '{}'?",
                style(&listing.basics.title).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.red} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("Deleting {}...", listing.basics.title));
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    state.marketplace.remove(&id).await?;

    spinner.finish_and_clear();

    if json {
        println!(
            "{}",
            serde_json::json!({"deleted": true, "id": id.to_string()})
        );
    } else {
        println!(
            "  {} Listing '{}' deleted.",
            style("✓").red().bold(),
            listing.basics.title
        );
    }

    Ok(())
}

/// Assemble the search filter: `--query` seeds it, explicit flags win.
fn build_filter(args: &ListArgs) -> Result<ListingFilter> {
    let mut filter = args
        .query
        .as_deref()
        .map(from_query_string)
        .unwrap_or_default();

    if let Some(city) = &args.city {
        filter.city = Some(city.clone());
    }
    if let Some(raw) = &args.property_type {
        filter.property_type = Some(raw.parse().map_err(|e: String| anyhow!(e))?);
    }
    if let Some(raw) = &args.min_rent {
        filter.min_rent = Some(parse_money(raw).map_err(|e| anyhow!(e))?);
    }
    if let Some(raw) = &args.max_rent {
        filter.max_rent = Some(parse_money(raw).map_err(|e| anyhow!(e))?);
    }
    if let Some(min_beds) = args.min_beds {
        filter.min_bedrooms = Some(min_beds);
    }
    if let Some(furnished) = args.furnished {
        filter.furnished = Some(furnished);
    }
    if let Some(raw) = &args.status {
        filter.status = Some(raw.parse().map_err(|e: String| anyhow!(e))?);
    }
    if let Some(raw) = &args.sort {
        filter.sort_by = Some(raw.parse().map_err(|e: String| anyhow!(e))?);
    }
    if let Some(raw) = &args.order {
        filter.sort_order = Some(raw.parse().map_err(|e: String| anyhow!(e))?);
    }
    if let Some(limit) = args.limit {
        filter.limit = Some(limit);
    }
    if let Some(offset) = args.offset {
        filter.offset = Some(offset);
    }

    Ok(filter)
}

// --- Formatting helpers ---

fn short_id(id: &PropertyId) -> String {
    // UUID text form is ASCII, so a byte slice is safe here.
    id.to_string()[..8].to_string()
}

fn rent_cell(listing: &Property) -> Cell {
    match &listing.terms {
        Terms::Rental(financials) => Cell::new(format!(
            "{} {}",
            format_money(financials.rent),
            financials.billing
        )),
        Terms::Development { investment, .. } => Cell::new(format!(
            "from {}",
            format_money(investment.minimum_investment)
        ))
        .fg(Color::DarkGrey),
    }
}

fn status_cell(status: &ListingStatus) -> Cell {
    match status {
        ListingStatus::Available => Cell::new("● available").fg(Color::Green),
        ListingStatus::Let => Cell::new("○ let").fg(Color::Yellow),
        ListingStatus::Archived => Cell::new("◌ archived").fg(Color::DarkGrey),
    }
}
