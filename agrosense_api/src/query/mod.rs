mod common;
pub use self::common::{Query, QueryCommon};

mod parcel;
pub use self::parcel::{ParcelQuery, DEFAULT_PARCEL_SORT};

mod sensor;
pub use self::sensor::SensorQuery;

mod control_unit;
pub use self::control_unit::ControlUnitQuery;
