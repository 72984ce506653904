//! CLI command definitions and dispatch for the `rentora` binary.
//!
//! Uses clap derive macros for argument parsing. Commands map one-to-one
//! onto wizard and marketplace operations (e.g., `rentora new`,
//! `rentora list --city Bristol`).

pub mod calc;
pub mod listing;
pub mod money;
pub mod roles;
pub mod wizard;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Manage rental listings from the command line.
#[derive(Parser)]
#[command(name = "rentora", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout via OpenTelemetry (debugging aid).
    #[arg(long, global = true)]
    pub trace_export: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new listing through the step-by-step wizard.
    New {
        /// Role to list as (landlord, agent, caretaker, developer).
        #[arg(long)]
        role: Option<String>,
    },

    /// Rework an existing listing through the wizard.
    Edit {
        /// Listing ID to edit.
        id: String,
    },

    /// Search marketplace listings.
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        args: ListArgs,
    },

    /// Show details of a listing.
    Show {
        /// Listing ID to display.
        id: String,
    },

    /// Delete a listing permanently.
    #[command(alias = "rm")]
    Delete {
        /// Listing ID to delete.
        id: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Rent affordability and landlord earnings calculators.
    Calc {
        #[command(subcommand)]
        action: CalcCommand,
    },

    /// Show which wizard steps each role goes through.
    Roles,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Filters for `rentora list`. Every flag is optional; explicit flags win
/// over fields carried in `--query`.
#[derive(Args)]
pub struct ListArgs {
    /// Filter by city (case-insensitive).
    #[arg(long)]
    pub city: Option<String>,

    /// Filter by property type (apartment, house, studio, townhouse, commercial).
    #[arg(long = "type")]
    pub property_type: Option<String>,

    /// Minimum monthly rent (e.g. 800 or 795.50).
    #[arg(long)]
    pub min_rent: Option<String>,

    /// Maximum monthly rent.
    #[arg(long)]
    pub max_rent: Option<String>,

    /// Minimum number of bedrooms.
    #[arg(long)]
    pub min_beds: Option<u8>,

    /// Only furnished (true) or unfurnished (false) listings.
    #[arg(long)]
    pub furnished: Option<bool>,

    /// Filter by status (available, let, archived). Defaults to available.
    #[arg(long)]
    pub status: Option<String>,

    /// Sort by field (created, updated, rent, bedrooms).
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order (asc, desc).
    #[arg(long)]
    pub order: Option<String>,

    /// Maximum number of results.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Skip the first N results.
    #[arg(long)]
    pub offset: Option<usize>,

    /// A saved query string, as printed by a previous search.
    #[arg(long)]
    pub query: Option<String>,
}

#[derive(Subcommand)]
pub enum CalcCommand {
    /// What rent fits a tenant's budget.
    Affordability {
        /// Net monthly income (e.g. 2400 or 2400.50).
        #[arg(long)]
        income: String,

        /// Fixed monthly obligations (loans, support payments).
        #[arg(long, default_value = "0")]
        obligations: String,

        /// A specific rent to check against the budget.
        #[arg(long)]
        target_rent: Option<String>,
    },

    /// Projected landlord earnings for a listing.
    Earnings {
        /// Monthly rent charged.
        #[arg(long)]
        rent: String,

        /// Expected occupancy percentage (0-100).
        #[arg(long, default_value_t = 100.0)]
        occupancy: f64,

        /// Monthly outgoings (maintenance, insurance, mortgage).
        #[arg(long, default_value = "0")]
        outgoings: String,

        /// Management fee percentage taken by an agency (0-100).
        #[arg(long, default_value_t = 0.0)]
        fee: f64,

        /// Property value, for the gross yield figure.
        #[arg(long)]
        value: Option<String>,
    },
}
