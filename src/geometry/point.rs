use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// An integer grid coordinate on the landing platform.
///
/// The 8 surrounding cells are computed once at construction so adjacency
/// checks under the platform lock are a single set lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawPoint", into = "RawPoint")]
pub struct GridPoint {
    x: i32,
    y: i32,
    perimeter: HashSet<(i32, i32)>,
}

#[derive(Serialize, Deserialize)]
struct RawPoint {
    x: i32,
    y: i32,
}

impl From<RawPoint> for GridPoint {
    fn from(raw: RawPoint) -> Self {
        GridPoint::new(raw.x, raw.y)
    }
}

impl From<GridPoint> for RawPoint {
    fn from(point: GridPoint) -> Self {
        RawPoint {
            x: point.x,
            y: point.y,
        }
    }
}

impl GridPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            perimeter: surrounding_cells(x, y),
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// True if `self` is one of the 8 cells immediately surrounding `other`.
    pub fn is_within_perimeter_of(&self, other: &GridPoint) -> bool {
        other.perimeter.contains(&(self.x, self.y))
    }

    pub fn strictly_before(&self, other: &GridPoint) -> bool {
        self.x < other.x && self.y < other.y
    }

    pub fn strictly_after(&self, other: &GridPoint) -> bool {
        self.x > other.x && self.y > other.y
    }

    pub fn at_or_before(&self, other: &GridPoint) -> bool {
        self.x <= other.x && self.y <= other.y
    }

    pub fn at_or_after(&self, other: &GridPoint) -> bool {
        self.x >= other.x && self.y >= other.y
    }
}

/// Cells at Chebyshev distance 1. Neighbours outside the `i32` range are
/// skipped since no `GridPoint` can sit there.
fn surrounding_cells(x: i32, y: i32) -> HashSet<(i32, i32)> {
    let mut cells = HashSet::with_capacity(8);
    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            if let (Some(nx), Some(ny)) = (x.checked_add(dx), y.checked_add(dy)) {
                cells.insert((nx, ny));
            }
        }
    }
    cells
}

impl PartialEq for GridPoint {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for GridPoint {}

impl Hash for GridPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParsePointError {
    #[error("expected a position as \"x,y\", got {0:?}")]
    Format(String),
    #[error("invalid coordinate {value:?}: {source}")]
    Coordinate {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

impl FromStr for GridPoint {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (x, y) = trimmed
            .split_once(',')
            .or_else(|| trimmed.split_once(char::is_whitespace))
            .ok_or_else(|| ParsePointError::Format(trimmed.to_string()))?;

        Ok(GridPoint::new(parse_coord(x)?, parse_coord(y)?))
    }
}

fn parse_coord(value: &str) -> Result<i32, ParsePointError> {
    let value = value.trim();
    value.parse().map_err(|source| ParsePointError::Coordinate {
        value: value.to_string(),
        source,
    })
}

/// Ordering predicates over possibly-absent points.
///
/// An absent operand on either side makes every comparison false.
pub mod compare {
    use super::GridPoint;

    pub fn strictly_before(a: Option<&GridPoint>, b: Option<&GridPoint>) -> bool {
        matches!((a, b), (Some(a), Some(b)) if a.strictly_before(b))
    }

    pub fn strictly_after(a: Option<&GridPoint>, b: Option<&GridPoint>) -> bool {
        matches!((a, b), (Some(a), Some(b)) if a.strictly_after(b))
    }

    pub fn at_or_before(a: Option<&GridPoint>, b: Option<&GridPoint>) -> bool {
        matches!((a, b), (Some(a), Some(b)) if a.at_or_before(b))
    }

    pub fn at_or_after(a: Option<&GridPoint>, b: Option<&GridPoint>) -> bool {
        matches!((a, b), (Some(a), Some(b)) if a.at_or_after(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perimeter_has_eight_cells() {
        let p = GridPoint::new(7, 7);
        let mut cells: Vec<_> = p.perimeter.iter().copied().collect();
        cells.sort();

        assert_eq!(
            cells,
            vec![
                (6, 6),
                (6, 7),
                (6, 8),
                (7, 6),
                (7, 8),
                (8, 6),
                (8, 7),
                (8, 8)
            ]
        );
    }

    #[test]
    fn test_point_not_within_own_perimeter() {
        let p = GridPoint::new(3, -2);
        assert!(!p.is_within_perimeter_of(&p));
    }

    #[test]
    fn test_perimeter_is_symmetric() {
        let center = GridPoint::new(0, 0);
        for dx in -2..=2 {
            for dy in -2..=2 {
                let other = GridPoint::new(dx, dy);
                assert_eq!(
                    other.is_within_perimeter_of(&center),
                    center.is_within_perimeter_of(&other),
                    "asymmetric adjacency for ({}, {})",
                    dx,
                    dy
                );
                let chebyshev = dx.abs().max(dy.abs());
                assert_eq!(other.is_within_perimeter_of(&center), chebyshev == 1);
            }
        }
    }

    #[test]
    fn test_perimeter_at_integer_edge() {
        let corner = GridPoint::new(i32::MAX, i32::MIN);
        assert_eq!(corner.perimeter.len(), 3);

        let inside = GridPoint::new(i32::MAX - 1, i32::MIN + 1);
        assert!(inside.is_within_perimeter_of(&corner));
        assert!(corner.is_within_perimeter_of(&inside));
    }

    #[test]
    fn test_equality_ignores_perimeter() {
        use std::collections::HashSet;

        let a = GridPoint::new(5, 6);
        let b = GridPoint::new(5, 6);
        assert_eq!(a, b);
        assert_ne!(a, GridPoint::new(6, 5));

        let set: HashSet<GridPoint> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_componentwise_ordering() {
        let a = GridPoint::new(1, 1);
        let b = GridPoint::new(2, 2);

        assert!(a.strictly_before(&b));
        assert!(b.strictly_after(&a));
        assert!(a.at_or_before(&b));
        assert!(b.at_or_after(&a));
        assert!(a.at_or_before(&a));
        assert!(!a.strictly_before(&a));
    }

    #[test]
    fn test_incomparable_points() {
        let a = GridPoint::new(1, 5);
        let b = GridPoint::new(5, 1);

        assert!(!a.strictly_before(&b));
        assert!(!a.strictly_after(&b));
        assert!(!a.at_or_before(&b));
        assert!(!a.at_or_after(&b));
        assert!(!b.strictly_before(&a));
        assert!(!b.at_or_before(&a));
    }

    #[test]
    fn test_shared_axis_is_not_strict() {
        let a = GridPoint::new(1, 1);
        let b = GridPoint::new(1, 4);

        assert!(!a.strictly_before(&b));
        assert!(a.at_or_before(&b));
    }

    #[test]
    fn test_absent_operands_compare_false() {
        let p = GridPoint::new(1, 1);
        let q = GridPoint::new(2, 2);

        assert!(compare::strictly_before(Some(&p), Some(&q)));
        assert!(!compare::strictly_before(None, Some(&q)));
        assert!(!compare::strictly_after(Some(&q), None));
        assert!(!compare::at_or_before(None, None));
        assert!(!compare::at_or_after(None, Some(&p)));
    }

    #[test]
    fn test_parse_point() {
        assert_eq!("5,6".parse::<GridPoint>().unwrap(), GridPoint::new(5, 6));
        assert_eq!(" -3 , 4 ".parse::<GridPoint>().unwrap(), GridPoint::new(-3, 4));
        assert_eq!("10 12".parse::<GridPoint>().unwrap(), GridPoint::new(10, 12));
        assert_eq!(
            "7".parse::<GridPoint>(),
            Err(ParsePointError::Format("7".to_string()))
        );
        assert!(matches!(
            "a,1".parse::<GridPoint>(),
            Err(ParsePointError::Coordinate { .. })
        ));
    }

    #[test]
    fn test_display_matches_parse() {
        let p = GridPoint::new(-4, 9);
        assert_eq!(p.to_string(), "-4,9");
        assert_eq!(p.to_string().parse::<GridPoint>().unwrap(), p);
    }

    #[test]
    fn test_serde_rebuilds_perimeter() {
        let json = r#"{"x":7,"y":7}"#;
        let p: GridPoint = serde_json::from_str(json).unwrap();

        assert!(GridPoint::new(8, 8).is_within_perimeter_of(&p));
        assert_eq!(serde_json::to_string(&p).unwrap(), json);
    }
}
