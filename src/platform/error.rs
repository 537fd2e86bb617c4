use crate::geometry::GridPoint;
use thiserror::Error;

/// Contract violations surfaced by [`LandingZone`](super::LandingZone).
///
/// Neither variant leaves partial state behind: a failed construction yields
/// no zone, and a rejected evaluation never touches the reservation slot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("invalid platform size: top-left {top_left} must be strictly before bottom-right {bottom_right}")]
    InvalidBounds {
        top_left: GridPoint,
        bottom_right: GridPoint,
    },
    #[error("landing request carried no position")]
    NullPoint,
}
