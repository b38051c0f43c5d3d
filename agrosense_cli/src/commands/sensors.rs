//! The `sensors` subcommand.

use anyhow::Result;
use agrosense_lib::validation;
use agrosense_lib::{CachedClient, Query, SensorQuery};
use clap::Args;

use crate::output::{page_summary, print_sensors, OutputFormat};

#[derive(Args)]
pub struct SensorsArgs {
    /// Show a single sensor by ID
    #[arg(long)]
    pub id: Option<i64>,

    /// Search by sensor name
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by sensor type (e.g. dht22), or all
    #[arg(long = "type", default_value = "all")]
    pub sensor_type: String,

    /// Filter by state: all, 1 (active), 0 (inactive)
    #[arg(long, default_value = "all")]
    pub active: String,

    /// Only sensors attached to this control unit
    #[arg(long)]
    pub control_unit: Option<i64>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u64,

    /// Results per page
    #[arg(long, default_value = "12")]
    pub per_page: u64,
}

pub async fn run(args: &SensorsArgs, client: &CachedClient, format: OutputFormat) -> Result<()> {
    if let Some(id) = args.id {
        let sensor = client.get_sensor(validation::validate_id(id)?).await?;
        return print_sensors(std::slice::from_ref(&sensor), format);
    }

    let mut query = SensorQuery::default()
        .with_page(validation::validate_page(args.page)?)
        .with_per_page(validation::validate_per_page(args.per_page)?);

    if let Some(ref search) = args.search {
        query = query.with_search(&validation::validate_search(search)?);
    }
    if let Some(sensor_type) = validation::validate_sensor_type(&args.sensor_type)? {
        query = query.with_type(&sensor_type);
    }
    if let Some(active) = validation::validate_active_filter(&args.active)? {
        query = query.with_active(active);
    }
    if let Some(unit) = args.control_unit {
        query = query.with_control_unit(validation::validate_id(unit)?);
    }

    let page = client.list_sensors(&query).await?;
    eprintln!("{}", page_summary(&page.meta, "sensors"));
    print_sensors(&page.items, format)
}
