pub mod point;

pub use point::{GridPoint, ParsePointError, compare};
