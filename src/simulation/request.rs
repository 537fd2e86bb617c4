use crate::geometry::{GridPoint, ParsePointError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One landing request. `position` is `None` when the rocket reported nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rocket {
    pub name: String,
    pub position: Option<GridPoint>,
}

impl Rocket {
    pub fn new(name: impl Into<String>, position: Option<GridPoint>) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to read request file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    InvalidLine {
        line: usize,
        #[source]
        source: ParsePointError,
    },
    #[error("line {line}: rocket name is empty")]
    EmptyName { line: usize },
}

/// Parse a request list, one rocket per line.
///
/// Accepted line shapes:
/// * `x,y` or `x y` - a position
/// * `-` or `null` - a rocket without a position
/// * `name: <position>` - any of the above with an explicit label
///
/// Blank lines and `#` comments are skipped. Unlabelled rockets are named
/// `rocket-<n>` by request order.
pub fn parse_requests(input: &str) -> Result<Vec<Rocket>, RequestError> {
    let mut rockets = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (name, body) = match line.split_once(':') {
            Some((name, body)) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(RequestError::EmptyName { line: line_no });
                }
                (name.to_string(), body.trim())
            }
            None => (format!("rocket-{}", rockets.len() + 1), line),
        };

        let position = if body == "-" || body.eq_ignore_ascii_case("null") {
            None
        } else {
            let point = body
                .parse::<GridPoint>()
                .map_err(|source| RequestError::InvalidLine {
                    line: line_no,
                    source,
                })?;
            Some(point)
        };

        rockets.push(Rocket { name, position });
    }

    Ok(rockets)
}

/// Read and parse a request file
pub fn load_requests(path: &Path) -> Result<Vec<Rocket>, RequestError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RequestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_requests(&contents)
}
