pub mod auth;
pub mod control_units;
pub mod lookup;
pub mod mutate;
pub mod parcels;
pub mod sensors;
