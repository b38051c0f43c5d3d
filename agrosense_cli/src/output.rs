use anyhow::Result;
use agrosense_lib::types::{
    ControlUnit, ControlUnitOption, PaginationMeta, Parcel, ParcelOption, Sensor,
};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ParcelRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    #[serde(rename = "Location")]
    location: String,
    #[tabled(rename = "Crop")]
    #[serde(rename = "Crop")]
    crop: String,
    #[tabled(rename = "Area")]
    #[serde(rename = "Area")]
    area: String,
    #[tabled(rename = "Active")]
    #[serde(rename = "Active")]
    active: String,
}

#[derive(Tabled, Serialize)]
struct SensorRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    sensor_type: String,
    #[tabled(rename = "Control Unit")]
    #[serde(rename = "Control Unit")]
    control_unit_id: i64,
    #[tabled(rename = "Active")]
    #[serde(rename = "Active")]
    active: String,
}

#[derive(Tabled, Serialize)]
struct ControlUnitRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Serial")]
    #[serde(rename = "Serial")]
    serial_code: String,
    #[tabled(rename = "Model")]
    #[serde(rename = "Model")]
    model: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Parcel")]
    #[serde(rename = "Parcel")]
    parcel_id: i64,
    #[tabled(rename = "Last Seen")]
    #[serde(rename = "Last Seen")]
    last_seen: String,
    #[tabled(rename = "Active")]
    #[serde(rename = "Active")]
    active: String,
}

#[derive(Tabled, Serialize)]
struct OptionRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Label")]
    #[serde(rename = "Label")]
    label: String,
    #[tabled(rename = "Detail")]
    #[serde(rename = "Detail")]
    detail: String,
}

// -- Row builders --

fn build_parcel_rows(parcels: &[Parcel]) -> Vec<ParcelRow> {
    parcels
        .iter()
        .map(|p| ParcelRow {
            id: p.id,
            name: p.name.clone(),
            location: p.location.clone().unwrap_or_default(),
            crop: p.crop_type.clone().unwrap_or_default(),
            area: format_area(p.area_m2),
            active: yes_no(p.active),
        })
        .collect()
}

fn build_sensor_rows(sensors: &[Sensor]) -> Vec<SensorRow> {
    sensors
        .iter()
        .map(|s| SensorRow {
            id: s.id,
            name: s.name.clone(),
            sensor_type: s.sensor_type.clone(),
            control_unit_id: s.control_unit_id,
            active: yes_no(s.active),
        })
        .collect()
}

fn build_control_unit_rows(units: &[ControlUnit]) -> Vec<ControlUnitRow> {
    units
        .iter()
        .map(|u| ControlUnitRow {
            id: u.id,
            serial_code: u.serial_code.clone(),
            model: u.model.clone(),
            status: u.status.to_string(),
            parcel_id: u.parcel_id,
            last_seen: u.last_seen_at.clone().unwrap_or_else(|| "never".to_string()),
            active: yes_no(u.active),
        })
        .collect()
}

fn build_parcel_option_rows(options: &[ParcelOption]) -> Vec<OptionRow> {
    options
        .iter()
        .map(|o| OptionRow {
            id: o.id,
            label: o.name.clone(),
            detail: o.location.clone().unwrap_or_default(),
        })
        .collect()
}

fn build_control_unit_option_rows(options: &[ControlUnitOption]) -> Vec<OptionRow> {
    options
        .iter()
        .map(|o| OptionRow {
            id: o.id,
            label: o.serial_code.clone(),
            detail: o.model.clone().unwrap_or_default(),
        })
        .collect()
}

// -- Rendering --

fn render_rows<R: Tabled + Serialize>(rows: &[R], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Table => Table::new(rows).to_string(),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            table.to_string()
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(Vec::new());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
            String::from_utf8(wtr.into_inner()?)?
                .trim_end()
                .to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(rows)?,
    })
}

/// JSON output prints the full records; the other formats print summary rows.
fn print_records<T: Serialize, R: Tabled + Serialize>(
    records: &[T],
    rows: Vec<R>,
    format: OutputFormat,
) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(records)?,
        other => render_rows(&rows, other)?,
    };
    println!("{}", rendered);
    Ok(())
}

pub fn print_parcels(parcels: &[Parcel], format: OutputFormat) -> Result<()> {
    print_records(parcels, build_parcel_rows(parcels), format)
}

pub fn print_sensors(sensors: &[Sensor], format: OutputFormat) -> Result<()> {
    print_records(sensors, build_sensor_rows(sensors), format)
}

pub fn print_control_units(units: &[ControlUnit], format: OutputFormat) -> Result<()> {
    print_records(units, build_control_unit_rows(units), format)
}

pub fn print_parcel_options(options: &[ParcelOption], format: OutputFormat) -> Result<()> {
    print_records(options, build_parcel_option_rows(options), format)
}

pub fn print_control_unit_options(
    options: &[ControlUnitOption],
    format: OutputFormat,
) -> Result<()> {
    print_records(options, build_control_unit_option_rows(options), format)
}

/// `Page 2/9 (25 total sensors)`
pub fn page_summary(meta: &PaginationMeta, noun: &str) -> String {
    format!(
        "Page {}/{} ({} total {})",
        meta.current_page, meta.last_page, meta.total, noun
    )
}

fn format_area(m2: f64) -> String {
    if m2 >= 10_000.0 {
        format!("{:.2} ha", m2 / 10_000.0)
    } else {
        format!("{:.0} m2", m2)
    }
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}
