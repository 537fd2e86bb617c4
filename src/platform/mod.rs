pub mod error;
pub mod zone;

pub use error::PlatformError;
pub use zone::{LandingStatus, LandingZone};
