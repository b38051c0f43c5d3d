mod meta;
pub use self::meta::{
    ApiResponse, ListPayload, PageRequest, Paginated, PaginationMeta, PartialMeta,
    DEFAULT_PER_PAGE,
};

pub(crate) mod de;

mod parcel;
pub use self::parcel::{Parcel, ParcelForm, ParcelID, ParcelOption, ParcelStatus};

mod sensor;
pub use self::sensor::{Sensor, SensorForm, SensorID};

mod control_unit;
pub use self::control_unit::{
    ControlUnit, ControlUnitForm, ControlUnitID, ControlUnitOption, ControlUnitStatus,
};

mod auth;
pub use self::auth::{AuthSession, LoginCredentials, User};
