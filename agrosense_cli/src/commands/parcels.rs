//! The `parcels` subcommand: lists parcels with status, date and search filters.

use anyhow::Result;
use agrosense_lib::validation;
use agrosense_lib::{CachedClient, ParcelQuery, Query};
use clap::Args;

use crate::output::{page_summary, print_parcels, OutputFormat};

/// Arguments for the `parcels` subcommand.
#[derive(Args)]
pub struct ParcelsArgs {
    /// Show a single parcel by ID
    #[arg(long)]
    pub id: Option<i64>,

    /// Search by name, location or crop
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by status: all, active, inactive
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Created on/after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Created on/before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Sort field, prefix with - for descending
    #[arg(long, default_value = agrosense_lib::agrosense_api::DEFAULT_PARCEL_SORT)]
    pub sort: String,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u64,

    /// Results per page
    #[arg(long, default_value = "12")]
    pub per_page: u64,
}

pub async fn run(args: &ParcelsArgs, client: &CachedClient, format: OutputFormat) -> Result<()> {
    if let Some(id) = args.id {
        let parcel = client.get_parcel(validation::validate_id(id)?).await?;
        return print_parcels(std::slice::from_ref(&parcel), format);
    }

    let (from, to) = validation::validate_date_range(args.from.as_deref(), args.to.as_deref())?;

    let mut query = ParcelQuery::default()
        .with_status(validation::validate_parcel_status(&args.status)?)
        .with_sort(&validation::validate_sort(&args.sort)?)
        .with_page(validation::validate_page(args.page)?)
        .with_per_page(validation::validate_per_page(args.per_page)?);

    if let Some(ref search) = args.search {
        query = query.with_search(&validation::validate_search(search)?);
    }
    if let Some(from) = from {
        query = query.with_from_date(from);
    }
    if let Some(to) = to {
        query = query.with_to_date(to);
    }

    let page = client.list_parcels(&query).await?;
    eprintln!("{}", page_summary(&page.meta, "parcels"));
    print_parcels(&page.items, format)
}
