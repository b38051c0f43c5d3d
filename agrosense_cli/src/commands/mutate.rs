//! The `create`, `update` and `delete` subcommands.
//!
//! Form data is passed as a JSON object via `--data`; only the keys present
//! are sent, so `update` behaves as a partial update.

use anyhow::Result;
use agrosense_lib::types::{ControlUnitForm, ParcelForm, SensorForm};
use agrosense_lib::validation::{self, parse_form};
use agrosense_lib::CachedClient;
use clap::{Args, ValueEnum};

use crate::output::{print_control_units, print_parcels, print_sensors, OutputFormat};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Resource {
    Parcels,
    Sensors,
    ControlUnits,
}

impl Resource {
    fn noun(self) -> &'static str {
        match self {
            Resource::Parcels => "parcel",
            Resource::Sensors => "sensor",
            Resource::ControlUnits => "control unit",
        }
    }
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(value_enum)]
    pub resource: Resource,

    /// JSON object with the fields to set, e.g. '{"name":"Lote Sur"}'
    #[arg(long)]
    pub data: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(value_enum)]
    pub resource: Resource,

    pub id: i64,

    /// JSON object with the fields to change
    #[arg(long)]
    pub data: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[arg(value_enum)]
    pub resource: Resource,

    pub id: i64,
}

pub async fn run_create(args: &CreateArgs, client: &CachedClient, format: OutputFormat) -> Result<()> {
    match args.resource {
        Resource::Parcels => {
            let form: ParcelForm = parse_form(&args.data)?;
            let parcel = client.create_parcel(&form).await?;
            eprintln!("Created parcel {}", parcel.id);
            print_parcels(std::slice::from_ref(&parcel), format)
        }
        Resource::Sensors => {
            let form: SensorForm = parse_form(&args.data)?;
            let sensor = client.create_sensor(&form).await?;
            eprintln!("Created sensor {}", sensor.id);
            print_sensors(std::slice::from_ref(&sensor), format)
        }
        Resource::ControlUnits => {
            let form: ControlUnitForm = parse_form(&args.data)?;
            let unit = client.create_control_unit(&form).await?;
            eprintln!("Created control unit {}", unit.id);
            print_control_units(std::slice::from_ref(&unit), format)
        }
    }
}

pub async fn run_update(args: &UpdateArgs, client: &CachedClient, format: OutputFormat) -> Result<()> {
    let id = validation::validate_id(args.id)?;
    match args.resource {
        Resource::Parcels => {
            let form: ParcelForm = parse_form(&args.data)?;
            let parcel = client.update_parcel(id, &form).await?;
            print_parcels(std::slice::from_ref(&parcel), format)
        }
        Resource::Sensors => {
            let form: SensorForm = parse_form(&args.data)?;
            let sensor = client.update_sensor(id, &form).await?;
            print_sensors(std::slice::from_ref(&sensor), format)
        }
        Resource::ControlUnits => {
            let form: ControlUnitForm = parse_form(&args.data)?;
            let unit = client.update_control_unit(id, &form).await?;
            print_control_units(std::slice::from_ref(&unit), format)
        }
    }
}

pub async fn run_delete(args: &DeleteArgs, client: &CachedClient) -> Result<()> {
    let id = validation::validate_id(args.id)?;
    match args.resource {
        Resource::Parcels => client.delete_parcel(id).await?,
        Resource::Sensors => client.delete_sensor(id).await?,
        Resource::ControlUnits => client.delete_control_unit(id).await?,
    }
    eprintln!("Deleted {} {}", args.resource.noun(), id);
    Ok(())
}
