use super::PlatformError;
use crate::geometry::GridPoint;
use serde::Serialize;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Answer given to a single landing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingStatus {
    Accepted,
    OutOfBounds,
    Clash,
}

impl fmt::Display for LandingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            LandingStatus::Accepted => "ok for landing",
            LandingStatus::OutOfBounds => "out of platform",
            LandingStatus::Clash => "clash",
        };
        f.write_str(msg)
    }
}

/// A rectangular landing platform shared by concurrent landing requests.
///
/// Only the most recently accepted position is remembered. A request clashes
/// when it lands on that position or one of its 8 neighbours; older
/// reservations are forgotten as soon as a newer one is accepted.
#[derive(Debug)]
pub struct LandingZone {
    top_left: GridPoint,
    bottom_right: GridPoint,
    last_reserved: Mutex<Option<GridPoint>>,
}

impl LandingZone {
    /// Create a zone spanning `top_left..=bottom_right`.
    ///
    /// # Errors
    /// * `InvalidBounds` - unless `top_left` is strictly before `bottom_right`
    ///   on both axes
    pub fn new(top_left: GridPoint, bottom_right: GridPoint) -> Result<Self, PlatformError> {
        if !top_left.strictly_before(&bottom_right) {
            return Err(PlatformError::InvalidBounds {
                top_left,
                bottom_right,
            });
        }

        log::debug!("Landing zone {} -> {} ready", top_left, bottom_right);

        Ok(Self {
            top_left,
            bottom_right,
            last_reserved: Mutex::new(None),
        })
    }

    pub fn top_left(&self) -> &GridPoint {
        &self.top_left
    }

    pub fn bottom_right(&self) -> &GridPoint {
        &self.bottom_right
    }

    /// True if `point` lies on the platform, edges included
    pub fn contains(&self, point: &GridPoint) -> bool {
        self.top_left.at_or_before(point) && point.at_or_before(&self.bottom_right)
    }

    /// Decide whether a rocket may land at `point`, reserving it on success.
    ///
    /// The null and bounds checks run without the lock. The clash checks and
    /// the reservation run as one critical section, so concurrent callers
    /// aiming at the same or adjacent cells see exactly one `Accepted`.
    ///
    /// # Errors
    /// * `NullPoint` - the request carried no position
    pub fn evaluate(&self, point: Option<&GridPoint>) -> Result<LandingStatus, PlatformError> {
        let point = point.ok_or(PlatformError::NullPoint)?;
        Ok(self.status_of(point))
    }

    /// Evaluate a position the caller already holds
    pub fn status_of(&self, point: &GridPoint) -> LandingStatus {
        if !self.contains(point) {
            log::trace!(
                "{} is outside {} -> {}",
                point,
                self.top_left,
                self.bottom_right
            );
            return LandingStatus::OutOfBounds;
        }

        // Nothing in this section can panic, so a poisoned slot is still consistent.
        let mut last = self
            .last_reserved
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(reserved) = last.as_ref() {
            if reserved == point {
                log::debug!("{} clashes: already reserved", point);
                return LandingStatus::Clash;
            }
            if point.is_within_perimeter_of(reserved) {
                log::debug!("{} clashes: next to reserved {}", point, reserved);
                return LandingStatus::Clash;
            }
        }

        *last = Some(point.clone());
        log::debug!("{} reserved", point);

        LandingStatus::Accepted
    }
}
