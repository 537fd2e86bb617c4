//! landing-platform - Concurrent landing-slot validation for a rocket landing platform

pub mod config;
pub mod geometry;
pub mod platform;
pub mod simulation;
