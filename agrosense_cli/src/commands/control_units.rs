//! The `control-units` subcommand: lists control units with status, activity
//! and installation/last-seen date filters.

use anyhow::Result;
use agrosense_lib::validation;
use agrosense_lib::{CachedClient, ControlUnitQuery, Query};
use clap::Args;

use crate::output::{page_summary, print_control_units, OutputFormat};

#[derive(Args)]
pub struct ControlUnitsArgs {
    /// Show a single control unit by ID
    #[arg(long)]
    pub id: Option<i64>,

    /// Search by serial code or model
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by status: all, online, offline, maintenance
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Filter by state: all, 1 (active), 0 (inactive)
    #[arg(long, default_value = "all")]
    pub active: String,

    /// Installed on/after this date (YYYY-MM-DD)
    #[arg(long)]
    pub installed_from: Option<String>,

    /// Installed on/before this date (YYYY-MM-DD)
    #[arg(long)]
    pub installed_to: Option<String>,

    /// Last seen on/after this date (YYYY-MM-DD)
    #[arg(long)]
    pub seen_from: Option<String>,

    /// Last seen on/before this date (YYYY-MM-DD)
    #[arg(long)]
    pub seen_to: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u64,

    /// Results per page
    #[arg(long, default_value = "12")]
    pub per_page: u64,
}

pub async fn run(
    args: &ControlUnitsArgs,
    client: &CachedClient,
    format: OutputFormat,
) -> Result<()> {
    if let Some(id) = args.id {
        let unit = client.get_control_unit(validation::validate_id(id)?).await?;
        return print_control_units(std::slice::from_ref(&unit), format);
    }

    let (installed_from, installed_to) = validation::validate_date_range(
        args.installed_from.as_deref(),
        args.installed_to.as_deref(),
    )?;
    let (seen_from, seen_to) =
        validation::validate_date_range(args.seen_from.as_deref(), args.seen_to.as_deref())?;

    let mut query = ControlUnitQuery::default()
        .with_installed_between(installed_from, installed_to)
        .with_seen_between(seen_from, seen_to)
        .with_page(validation::validate_page(args.page)?)
        .with_per_page(validation::validate_per_page(args.per_page)?);

    if let Some(ref search) = args.search {
        query = query.with_search(&validation::validate_search(search)?);
    }
    if let Some(status) = validation::validate_control_unit_status(&args.status)? {
        query = query.with_status(status);
    }
    if let Some(active) = validation::validate_active_filter(&args.active)? {
        query = query.with_active(active);
    }

    let page = client.list_control_units(&query).await?;
    eprintln!("{}", page_summary(&page.meta, "control units"));
    print_control_units(&page.items, format)
}
