//! Drive a landing zone with a batch of rockets
//!
//! Each rocket is one call into [`LandingZone::evaluate`]. In concurrent mode
//! every rocket runs as its own task on the rayon pool, so the zone's lock is
//! the only thing ordering them.

pub mod request;

pub use request::{RequestError, Rocket, load_requests, parse_requests};

use crate::geometry::GridPoint;
use crate::platform::{LandingStatus, LandingZone};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sequential,
    Concurrent,
}

/// What happened to a single rocket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingOutcome {
    pub rocket: String,
    pub position: Option<GridPoint>,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Accepted,
    OutOfBounds,
    Clash,
    /// The zone refused to evaluate the request at all
    Rejected,
}

impl From<LandingStatus> for OutcomeStatus {
    fn from(status: LandingStatus) -> Self {
        match status {
            LandingStatus::Accepted => OutcomeStatus::Accepted,
            LandingStatus::OutOfBounds => OutcomeStatus::OutOfBounds,
            LandingStatus::Clash => OutcomeStatus::Clash,
        }
    }
}

impl LandingOutcome {
    fn evaluate(zone: &LandingZone, rocket: &Rocket) -> Self {
        let (status, error) = match zone.evaluate(rocket.position.as_ref()) {
            Ok(status) => (status.into(), None),
            Err(e) => {
                log::warn!("Rocket {} rejected: {}", rocket.name, e);
                (OutcomeStatus::Rejected, Some(e.to_string()))
            }
        };

        Self {
            rocket: rocket.name.clone(),
            position: rocket.position.clone(),
            status,
            error,
        }
    }

    /// Human-readable answer, using the platform's status messages
    pub fn message(&self) -> String {
        match (self.status, &self.error) {
            (OutcomeStatus::Accepted, _) => LandingStatus::Accepted.to_string(),
            (OutcomeStatus::OutOfBounds, _) => LandingStatus::OutOfBounds.to_string(),
            (OutcomeStatus::Clash, _) => LandingStatus::Clash.to_string(),
            (OutcomeStatus::Rejected, Some(e)) => format!("rejected ({})", e),
            (OutcomeStatus::Rejected, None) => "rejected".to_string(),
        }
    }
}

/// Evaluate every rocket against `zone`, returning outcomes in request order.
pub fn simulate(zone: &LandingZone, rockets: &[Rocket], mode: Mode) -> Vec<LandingOutcome> {
    log::info!("Simulating {} rockets ({:?})", rockets.len(), mode);

    match mode {
        Mode::Sequential => rockets
            .iter()
            .map(|rocket| LandingOutcome::evaluate(zone, rocket))
            .collect(),
        Mode::Concurrent => rockets
            .par_iter()
            .map(|rocket| LandingOutcome::evaluate(zone, rocket))
            .collect(),
    }
}

/// Tally of outcomes for a simulation run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub accepted: usize,
    pub out_of_bounds: usize,
    pub clash: usize,
    pub rejected: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[LandingOutcome]) -> Self {
        let mut summary = Summary::default();
        for outcome in outcomes {
            match outcome.status {
                OutcomeStatus::Accepted => summary.accepted += 1,
                OutcomeStatus::OutOfBounds => summary.out_of_bounds += 1,
                OutcomeStatus::Clash => summary.clash += 1,
                OutcomeStatus::Rejected => summary.rejected += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.accepted + self.out_of_bounds + self.clash + self.rejected
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rockets: {} ok for landing, {} out of platform, {} clash, {} rejected",
            self.total(),
            self.accepted,
            self.out_of_bounds,
            self.clash,
            self.rejected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> LandingZone {
        LandingZone::new(GridPoint::new(5, 5), GridPoint::new(10, 10)).unwrap()
    }

    fn rocket(name: &str, x: i32, y: i32) -> Rocket {
        Rocket::new(name, Some(GridPoint::new(x, y)))
    }

    #[test]
    fn test_sequential_follows_request_order() {
        let rockets = vec![
            rocket("a", 5, 5),
            rocket("b", 16, 15),
            rocket("c", 5, 6),
            Rocket::new("d", None),
            rocket("e", 7, 7),
            rocket("f", 10, 10),
        ];

        let outcomes = simulate(&zone(), &rockets, Mode::Sequential);
        let statuses: Vec<_> = outcomes.iter().map(|o| o.status).collect();

        assert_eq!(
            statuses,
            vec![
                OutcomeStatus::Accepted,
                OutcomeStatus::OutOfBounds,
                OutcomeStatus::Clash,
                OutcomeStatus::Rejected,
                OutcomeStatus::Accepted,
                OutcomeStatus::Accepted,
            ]
        );
        assert_eq!(outcomes[3].error.as_deref(), Some("landing request carried no position"));
    }

    #[test]
    fn test_concurrent_same_target_single_winner() {
        let rockets: Vec<_> = (0..200)
            .map(|i| rocket(&format!("r{}", i), 8, 8))
            .collect();

        let outcomes = simulate(&zone(), &rockets, Mode::Concurrent);
        let summary = Summary::from_outcomes(&outcomes);

        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.clash, 199);
        // results keep request order regardless of scheduling
        assert!(outcomes.iter().zip(&rockets).all(|(o, r)| o.rocket == r.name));
    }

    #[test]
    fn test_concurrent_out_of_bounds_never_contend() {
        let rockets: Vec<_> = (0..50).map(|i| rocket("far", 100 + i, 100)).collect();

        let summary = Summary::from_outcomes(&simulate(&zone(), &rockets, Mode::Concurrent));
        assert_eq!(summary.out_of_bounds, 50);
        assert_eq!(summary.total(), 50);
    }

    #[test]
    fn test_outcome_messages() {
        let rockets = vec![rocket("a", 5, 5), rocket("b", 5, 5), Rocket::new("c", None)];
        let outcomes = simulate(&zone(), &rockets, Mode::Sequential);

        assert_eq!(outcomes[0].message(), "ok for landing");
        assert_eq!(outcomes[1].message(), "clash");
        assert_eq!(
            outcomes[2].message(),
            "rejected (landing request carried no position)"
        );
    }

    #[test]
    fn test_summary_display() {
        let summary = Summary {
            accepted: 2,
            out_of_bounds: 1,
            clash: 3,
            rejected: 0,
        };
        assert_eq!(
            summary.to_string(),
            "6 rockets: 2 ok for landing, 1 out of platform, 3 clash, 0 rejected"
        );
    }

    #[test]
    fn test_outcome_json() {
        let outcomes = simulate(&zone(), &[rocket("a", 5, 5)], Mode::Sequential);
        let json = serde_json::to_string(&outcomes[0]).unwrap();
        assert_eq!(
            json,
            r#"{"rocket":"a","position":{"x":5,"y":5},"status":"accepted"}"#
        );
    }
}
