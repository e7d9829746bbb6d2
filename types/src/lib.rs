pub mod capability;
pub mod dashboard;
pub mod device;
mod error;
mod session;
pub mod tile;

pub use capability::{AuthorizationService, Capabilities, Module};
pub use device::{DeviceModel, DeviceType, ReferenceDataService};
pub use error::{Error, ErrorKind, Result};
pub use session::{CurrentUser, SESSION_COOKIE_NAME, UserData};

#[doc(hidden)]
pub use anyhow::anyhow as internal_anyhow_dont_use;
