//! Interactive listing wizard (`rentora new`, `rentora edit`).
//!
//! Drives a `WizardSession` with dialoguer prompts: each step collects one
//! section of the draft, commits it, and moves forward only once the step
//! validates. The preview step offers submit, jump-back, or discard.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use console::style;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use rentora_core::role_sync::{RoleSource, resolve_active_role};
use rentora_core::wizard::assembler::{format_listing_summary, format_money};
use rentora_core::wizard::error::WizardServiceError;
use rentora_core::wizard::service::NavOutcome;
use rentora_core::wizard::session::{CommitOutcome, Jump, WizardSession};
use rentora_types::draft::{
    BasicsDraft, FinancialsDraft, InvestmentDraft, LocationDraft, MediaDraft, PropertyDraft,
    StepFields, TimelineDraft,
};
use rentora_types::error::FieldViolation;
use rentora_types::property::{
    AgencyDetails, BillingPeriod, MediaItem, MediaKind, OwnerContact, PayoutSchedule, Property,
    PropertyId, PropertyType,
};
use rentora_types::role::Role;
use rentora_types::step::StepId;

use super::money::parse_money;
use crate::state::AppState;

/// Start a create-mode wizard.
///
/// The role comes out of [`resolve_active_role`]: `--role` wins when the
/// profile holds it, then the configured default role, and with neither
/// the user picks from the roles the profile enables.
pub async fn run_create(state: &AppState, role: Option<&str>, json: bool) -> Result<()> {
    let requested = role
        .map(|raw| raw.parse::<Role>().map_err(|err| anyhow!(err)))
        .transpose()?;

    let profile = &state.config.profile;
    let resolution = resolve_active_role(&profile.roles, profile.default_role, requested)
        .ok_or_else(|| anyhow!("no roles enabled in profile; check config.toml"))?;

    if let Some(denied) = resolution.denied {
        println!(
            "\n  {} Cannot list as {denied}: not enabled in your profile.",
            style("!").yellow().bold()
        );
    }

    let role = match resolution.source {
        RoleSource::Requested | RoleSource::Stored => resolution.role,
        RoleSource::Fallback if profile.roles.len() == 1 => resolution.role,
        RoleSource::Fallback => {
            let items: Vec<String> = profile.roles.iter().map(|r| r.to_string()).collect();
            let default = profile
                .roles
                .iter()
                .position(|r| *r == resolution.role)
                .unwrap_or(0);
            println!("\n{}", style("List as").bold());
            let pick = Select::new().items(&items).default(default).interact()?;
            profile.roles[pick]
        }
    };

    let mut session = state.wizard.start_create(role);

    println!();
    println!(
        "  {} New {} listing -- {} steps",
        style("*").cyan().bold(),
        style(role.to_string()).yellow(),
        session.steps().len()
    );

    drive_session(state, &mut session, json).await
}

/// Reopen a stored listing in the wizard.
pub async fn run_edit(state: &AppState, id: &str, json: bool) -> Result<()> {
    let id: PropertyId = id.parse().context("invalid listing id")?;
    let mut session = state
        .wizard
        .start_edit(&id)
        .await
        .context("Failed to open listing for editing")?;

    println!();
    println!(
        "  {} Editing listing -- {} of {} steps already complete",
        style("*").cyan().bold(),
        session.completed_count(),
        session.steps().len()
    );

    drive_session(state, &mut session, json).await
}

// ---------------------------------------------------------------------------
// Session loop
// ---------------------------------------------------------------------------

enum PreviewChoice {
    Submit,
    EditStep(usize),
    Discard,
}

/// Prompt/commit/advance until the listing submits or the user bails out.
async fn drive_session(
    state: &AppState,
    session: &mut WizardSession,
    json: bool,
) -> Result<()> {
    let mut return_to_preview = false;

    loop {
        let step = session.current_step();

        if step == StepId::Preview {
            match preview_menu(session)? {
                PreviewChoice::Submit => {
                    if let CommitOutcome::Rejected { violations, .. } =
                        session.commit_step(StepId::Preview, StepFields::Preview)?
                    {
                        print_violations(&violations);
                        continue;
                    }
                    if submit(state, session, json).await? {
                        return Ok(());
                    }
                }
                PreviewChoice::EditStep(index) => match session.jump_to(index)? {
                    Jump::Moved { .. } => return_to_preview = true,
                    Jump::Rejected { .. } => {
                        println!("  {} That step is not reachable yet.", style("✗").red());
                    }
                },
                PreviewChoice::Discard => {
                    let confirmed = Confirm::new()
                        .with_prompt("Discard this draft and exit?")
                        .default(false)
                        .interact()?;
                    if confirmed {
                        println!("  Draft discarded.");
                        return Ok(());
                    }
                }
            }
            continue;
        }

        print_step_header(session);
        let fields = prompt_step(session.role(), step, session.draft())?;

        if let CommitOutcome::Rejected { violations, .. } = session.commit_step(step, fields)? {
            print_violations(&violations);
            continue;
        }

        if return_to_preview {
            return_to_preview = false;
            let preview_index = session
                .steps()
                .iter()
                .position(|planned| planned.id == StepId::Preview)
                .unwrap_or(session.steps().len() - 1);
            if let Jump::Moved { .. } = session.jump_to(preview_index)? {
                continue;
            }
        }

        match state.wizard.advance(session).await {
            Ok(NavOutcome::Moved { .. }) => {}
            Ok(NavOutcome::Blocked { violations, .. }) => print_violations(&violations),
            Ok(NavOutcome::Submitted(property)) => {
                print_submitted(&property, json)?;
                return Ok(());
            }
            Err(WizardServiceError::Storage(err)) => {
                println!("  {} Submission failed: {err}", style("✗").red().bold());
                println!("  Your draft is intact; complete the step again to retry.");
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Show the preview screen and ask what to do next.
fn preview_menu(session: &WizardSession) -> Result<PreviewChoice> {
    print_preview(session.draft());

    let items = ["Submit listing", "Edit a step", "Discard and exit"];
    let pick = Select::new().items(&items).default(0).interact()?;

    match pick {
        0 => Ok(PreviewChoice::Submit),
        1 => {
            let editable: Vec<_> = session
                .steps()
                .iter()
                .filter(|planned| planned.id != StepId::Preview)
                .collect();
            let labels: Vec<String> = editable
                .iter()
                .map(|planned| {
                    let marker = if session.is_step_completed(planned.ordinal) {
                        style("●").green().to_string()
                    } else {
                        style("○").dim().to_string()
                    };
                    format!("{marker} {}", planned.id.label())
                })
                .collect();
            println!("\n{}", style("Edit which step?").bold());
            let pick = Select::new().items(&labels).default(0).interact()?;
            Ok(PreviewChoice::EditStep(editable[pick].ordinal))
        }
        _ => Ok(PreviewChoice::Discard),
    }
}

/// Run the repository submission with a spinner. Returns true when done.
async fn submit(state: &AppState, session: &mut WizardSession, json: bool) -> Result<bool> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Submitting listing...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let outcome = state.wizard.advance(session).await;

    spinner.finish_and_clear();

    match outcome {
        Ok(NavOutcome::Submitted(property)) => {
            print_submitted(&property, json)?;
            Ok(true)
        }
        Ok(NavOutcome::Blocked { violations, .. }) => {
            print_violations(&violations);
            Ok(false)
        }
        Ok(NavOutcome::Moved { .. }) => Ok(false),
        Err(WizardServiceError::Storage(err)) => {
            println!("  {} Submission failed: {err}", style("✗").red().bold());
            println!("  Your draft is intact; choose Submit again to retry.");
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

// ---------------------------------------------------------------------------
// Step prompts
// ---------------------------------------------------------------------------

fn prompt_step(role: Role, step: StepId, draft: &PropertyDraft) -> Result<StepFields> {
    match step {
        StepId::Basics => prompt_basics(role, &draft.basics),
        StepId::Location => prompt_location(&draft.location),
        StepId::Financials => prompt_financials(&draft.financials),
        StepId::Media => prompt_media(&draft.media),
        StepId::ProjectTimeline => prompt_timeline(&draft.timeline),
        StepId::InvestmentTerms => prompt_investment(&draft.investment),
        StepId::Preview => Ok(StepFields::Preview),
    }
}

fn prompt_basics(role: Role, current: &BasicsDraft) -> Result<StepFields> {
    let mut input = Input::<String>::new().with_prompt("Title");
    if let Some(cur) = &current.title {
        input = input.default(cur.clone());
    }
    let title = input.interact_text()?;

    let mut input = Input::<String>::new().with_prompt("Summary");
    if let Some(cur) = &current.summary {
        input = input.default(cur.clone());
    }
    let summary = input.interact_text()?;

    let property_type = select_one(
        "Property type",
        &PropertyType::ALL,
        current.property_type.as_ref(),
    )?;

    let mut input = Input::<u8>::new().with_prompt("Bedrooms");
    if let Some(cur) = current.bedrooms {
        input = input.default(cur);
    }
    let bedrooms = input.interact_text()?;

    let mut input = Input::<u8>::new().with_prompt("Bathrooms");
    if let Some(cur) = current.bathrooms {
        input = input.default(cur);
    }
    let bathrooms = input.interact_text()?;

    let furnished = Confirm::new()
        .with_prompt("Furnished?")
        .default(current.furnished.unwrap_or(false))
        .interact()?;

    let mut input = Input::<String>::new()
        .with_prompt("Amenities (comma-separated, blank for none)")
        .allow_empty(true);
    if let Some(cur) = &current.amenities {
        input = input.default(cur.join(", "));
    }
    let raw = input.interact_text()?;
    let amenities = split_list(&raw);

    // Role-specific identification fields
    let agency = if role == Role::Agent {
        Some(prompt_agency(current.agency.as_ref())?)
    } else {
        None
    };
    let owner_contact = if role == Role::Caretaker {
        Some(prompt_owner_contact(current.owner_contact.as_ref())?)
    } else {
        None
    };

    Ok(StepFields::Basics(BasicsDraft {
        title: Some(title),
        summary: Some(summary),
        property_type: Some(property_type),
        bedrooms: Some(bedrooms),
        bathrooms: Some(bathrooms),
        furnished: Some(furnished),
        amenities: Some(amenities),
        agency,
        owner_contact,
    }))
}

fn prompt_agency(current: Option<&AgencyDetails>) -> Result<AgencyDetails> {
    let mut input = Input::<String>::new().with_prompt("Agency name");
    if let Some(cur) = current {
        input = input.default(cur.agency_name.clone());
    }
    let agency_name = input.interact_text()?;

    let mut input = Input::<String>::new().with_prompt("Agency licence number");
    if let Some(cur) = current {
        input = input.default(cur.licence_number.clone());
    }
    let licence_number = input.interact_text()?;

    Ok(AgencyDetails {
        agency_name,
        licence_number,
    })
}

fn prompt_owner_contact(current: Option<&OwnerContact>) -> Result<OwnerContact> {
    let mut input = Input::<String>::new().with_prompt("Owner name");
    if let Some(cur) = current {
        input = input.default(cur.name.clone());
    }
    let name = input.interact_text()?;

    let mut input = Input::<String>::new().with_prompt("Owner phone");
    if let Some(cur) = current {
        input = input.default(cur.phone.clone());
    }
    let phone = input.interact_text()?;

    Ok(OwnerContact { name, phone })
}

fn prompt_location(current: &LocationDraft) -> Result<StepFields> {
    let mut input = Input::<String>::new().with_prompt("Address line");
    if let Some(cur) = &current.address_line {
        input = input.default(cur.clone());
    }
    let address_line = input.interact_text()?;

    let mut input = Input::<String>::new().with_prompt("City");
    if let Some(cur) = &current.city {
        input = input.default(cur.clone());
    }
    let city = input.interact_text()?;

    let region = optional_input("Region (blank to skip)", current.region.as_ref())?;
    let postal_code = optional_input("Postcode (blank to skip)", current.postal_code.as_ref())?;

    let mut input = Input::<String>::new().with_prompt("Country");
    if let Some(cur) = &current.country {
        input = input.default(cur.clone());
    }
    let country = input.interact_text()?;

    Ok(StepFields::Location(LocationDraft {
        address_line: Some(address_line),
        city: Some(city),
        region,
        postal_code,
        country: Some(country),
    }))
}

fn prompt_financials(current: &FinancialsDraft) -> Result<StepFields> {
    let rent = money_input("Rent", current.rent)?;
    let deposit = money_input("Deposit", current.deposit)?;
    let billing = select_one("Billing period", &BillingPeriod::ALL, current.billing.as_ref())?;

    let utilities_included = Confirm::new()
        .with_prompt("Utilities included?")
        .default(current.utilities_included.unwrap_or(false))
        .interact()?;

    let service_charge =
        optional_money_input("Service charge (blank for none)", current.service_charge)?;

    Ok(StepFields::Financials(FinancialsDraft {
        rent: Some(rent),
        deposit: Some(deposit),
        billing: Some(billing),
        utilities_included: Some(utilities_included),
        service_charge,
    }))
}

fn prompt_media(current: &MediaDraft) -> Result<StepFields> {
    if let Some(existing) = current.items.as_ref().filter(|items| !items.is_empty()) {
        println!("\n{}", style(format!("{} media item(s) attached:", existing.len())).dim());
        for item in existing {
            println!("    {} {} {}", style("•").dim(), item.kind, item.url);
        }
        let replace = Confirm::new()
            .with_prompt("Replace the attached media?")
            .default(false)
            .interact()?;
        if !replace {
            // A patch without items keeps what the draft already holds.
            return Ok(StepFields::Media(MediaDraft { items: None }));
        }
    }

    let mut items = Vec::new();
    loop {
        let prompt = if items.is_empty() {
            "Media URL (blank to finish)"
        } else {
            "Another media URL (blank to finish)"
        };
        let raw: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        let url = raw.trim().to_string();
        if url.is_empty() {
            break;
        }
        let kind = select_one("Kind", &MediaKind::ALL, None)?;
        let caption = optional_input("Caption (blank to skip)", None)?;
        items.push(MediaItem { url, kind, caption });
    }

    Ok(StepFields::Media(MediaDraft { items: Some(items) }))
}

fn prompt_timeline(current: &TimelineDraft) -> Result<StepFields> {
    let mut input = Input::<String>::new().with_prompt("Project name");
    if let Some(cur) = &current.project_name {
        input = input.default(cur.clone());
    }
    let project_name = input.interact_text()?;

    let start = date_input("Start date (YYYY-MM-DD)", current.start)?;
    let expected_completion =
        date_input("Expected completion (YYYY-MM-DD)", current.expected_completion)?;

    let mut input = Input::<String>::new()
        .with_prompt("Phases (comma-separated, blank for none)")
        .allow_empty(true);
    if let Some(cur) = &current.phases {
        input = input.default(cur.join(", "));
    }
    let raw = input.interact_text()?;
    let phases = split_list(&raw);

    Ok(StepFields::ProjectTimeline(TimelineDraft {
        project_name: Some(project_name),
        start: Some(start),
        expected_completion: Some(expected_completion),
        phases: Some(phases),
    }))
}

fn prompt_investment(current: &InvestmentDraft) -> Result<StepFields> {
    let minimum_investment = money_input("Minimum investment", current.minimum_investment)?;

    let mut input = Input::<f64>::new().with_prompt("Projected yield % (e.g. 5.8)");
    if let Some(cur) = current.projected_yield_pct {
        input = input.default(cur);
    }
    let projected_yield_pct = input.interact_text()?;

    let payout = select_one(
        "Payout schedule",
        &PayoutSchedule::ALL,
        current.payout.as_ref(),
    )?;

    Ok(StepFields::InvestmentTerms(InvestmentDraft {
        minimum_investment: Some(minimum_investment),
        projected_yield_pct: Some(projected_yield_pct),
        payout: Some(payout),
    }))
}

// ---------------------------------------------------------------------------
// Prompt helpers
// ---------------------------------------------------------------------------

/// Print a prompt, then select from `options`, defaulting to the current
/// value when the draft already holds one.
fn select_one<T>(prompt: &str, options: &[T], current: Option<&T>) -> Result<T>
where
    T: Clone + PartialEq + std::fmt::Display,
{
    let items: Vec<String> = options.iter().map(|option| option.to_string()).collect();
    let default = current
        .and_then(|cur| options.iter().position(|option| option == cur))
        .unwrap_or(0);
    println!("\n{}", style(prompt).bold());
    let pick = Select::new().items(&items).default(default).interact()?;
    Ok(options[pick].clone())
}

fn optional_input(prompt: &str, current: Option<&String>) -> Result<Option<String>> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(cur) = current {
        input = input.default(cur.clone());
    }
    let raw = input.interact_text()?;
    let trimmed = raw.trim();
    Ok(if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    })
}

fn money_input(prompt: &str, current: Option<u64>) -> Result<u64> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(cur) = current {
        input = input.default(format_money(cur));
    }
    let raw = input
        .validate_with(|value: &String| parse_money(value).map(|_| ()))
        .interact_text()?;
    parse_money(&raw).map_err(|err| anyhow!(err))
}

fn optional_money_input(prompt: &str, current: Option<u64>) -> Result<Option<u64>> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(cur) = current {
        input = input.default(format_money(cur));
    }
    let raw = input
        .validate_with(|value: &String| {
            if value.trim().is_empty() {
                Ok(())
            } else {
                parse_money(value).map(|_| ())
            }
        })
        .interact_text()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        parse_money(trimmed).map(Some).map_err(|err| anyhow!(err))
    }
}

fn date_input(prompt: &str, current: Option<NaiveDate>) -> Result<NaiveDate> {
    let mut input = Input::<NaiveDate>::new().with_prompt(prompt);
    if let Some(cur) = current {
        input = input.default(cur);
    }
    Ok(input.interact_text()?)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_step_header(session: &WizardSession) {
    let steps = session.steps();
    let index = session.current_index();

    let markers: String = steps
        .iter()
        .map(|planned| {
            if planned.ordinal == index {
                style("●").cyan().bold().to_string()
            } else if session.is_step_completed(planned.ordinal) {
                style("●").green().to_string()
            } else {
                style("○").dim().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    println!();
    println!(
        "  {}  {}  {}",
        style(format!("Step {}/{}", index + 1, steps.len())).dim(),
        markers,
        style(session.current_step().label()).bold()
    );
}

fn print_violations(violations: &[FieldViolation]) {
    println!();
    println!(
        "  {} Fix the following before continuing:",
        style("✗").red().bold()
    );
    for violation in violations {
        println!("    {} {}", style("•").red(), violation);
    }
}

fn print_preview(draft: &PropertyDraft) {
    let basics = &draft.basics;
    let location = &draft.location;
    let financials = &draft.financials;
    let timeline = &draft.timeline;
    let investment = &draft.investment;

    println!();
    println!("{}", style("--- Listing preview ---").cyan());
    if let Some(title) = &basics.title {
        println!("  Title: {title}");
    }
    if let Some(property_type) = &basics.property_type {
        let rooms = match (basics.bedrooms, basics.bathrooms) {
            (Some(bed), Some(bath)) => format!(" -- {bed} bed, {bath} bath"),
            _ => String::new(),
        };
        println!("  Type: {property_type}{rooms}");
    }
    if let Some(summary) = &basics.summary {
        println!("  Summary: {summary}");
    }
    if let Some(furnished) = basics.furnished {
        println!("  Furnished: {}", if furnished { "yes" } else { "no" });
    }
    if let Some(amenities) = basics.amenities.as_ref().filter(|a| !a.is_empty()) {
        println!("  Amenities: {}", amenities.join(", "));
    }
    if let Some(agency) = &basics.agency {
        println!(
            "  Agency: {} (licence {})",
            agency.agency_name, agency.licence_number
        );
    }
    if let Some(owner) = &basics.owner_contact {
        println!("  Owner: {} ({})", owner.name, owner.phone);
    }

    let address: Vec<&str> = [
        location.address_line.as_deref(),
        location.city.as_deref(),
        location.region.as_deref(),
        location.postal_code.as_deref(),
        location.country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !address.is_empty() {
        println!("  Where: {}", address.join(", "));
    }

    if let Some(rent) = financials.rent {
        match &financials.billing {
            Some(billing) => println!("  Rent: {} {billing}", format_money(rent)),
            None => println!("  Rent: {}", format_money(rent)),
        }
    }
    if let Some(deposit) = financials.deposit {
        println!("  Deposit: {}", format_money(deposit));
    }
    if let Some(service_charge) = financials.service_charge {
        println!("  Service charge: {}", format_money(service_charge));
    }
    if financials.utilities_included == Some(true) {
        println!("  Utilities included");
    }

    if let Some(project) = &timeline.project_name {
        println!("  Project: {project}");
    }
    if let (Some(start), Some(done)) = (timeline.start, timeline.expected_completion) {
        println!("  Timeline: {start} to {done}");
    }
    if let Some(phases) = timeline.phases.as_ref().filter(|p| !p.is_empty()) {
        println!("  Phases: {}", phases.join(", "));
    }
    if let Some(minimum) = investment.minimum_investment {
        println!("  Minimum investment: {}", format_money(minimum));
    }
    if let Some(yield_pct) = investment.projected_yield_pct {
        println!("  Projected yield: {yield_pct}%");
    }
    if let Some(payout) = &investment.payout {
        println!("  Payout: {payout}");
    }

    let media_count = draft.media.items.as_ref().map(Vec::len).unwrap_or(0);
    println!("  Media: {media_count} item(s)");
    println!("{}", style("---").cyan());
}

fn print_submitted(property: &Property, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(property)?);
        return Ok(());
    }

    println!();
    println!("  {} Listing submitted!", style("✓").green().bold());
    println!();
    for line in format_listing_summary(property).lines() {
        println!("  {line}");
    }
    println!();
    Ok(())
}
