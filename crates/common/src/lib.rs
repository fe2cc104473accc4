//! Shared configuration and runtime setup.

mod logging;
mod region;

pub use logging::init_logging;
pub use region::{ParseRegionError, Region, AUTHORIZE_URL, AUTH_BASE_URL, DEFAULT_CALLBACK_URL};
