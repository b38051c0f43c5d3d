//! The `lookup` subcommand: compact option lists for parent-record pickers.

use anyhow::Result;
use agrosense_lib::CachedClient;
use clap::{Args, ValueEnum};

use crate::output::{print_control_unit_options, print_parcel_options, OutputFormat};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LookupTarget {
    /// Active parcels
    Parcels,
    /// Active control units
    ControlUnits,
}

#[derive(Args)]
pub struct LookupArgs {
    #[arg(value_enum)]
    pub target: LookupTarget,
}

pub async fn run(args: &LookupArgs, client: &CachedClient, format: OutputFormat) -> Result<()> {
    match args.target {
        LookupTarget::Parcels => {
            let options = client.parcel_options().await?;
            print_parcel_options(&options, format)
        }
        LookupTarget::ControlUnits => {
            let options = client.active_control_units().await?;
            print_control_unit_options(&options, format)
        }
    }
}
