use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::geometry::GridPoint;

fn default_top_left() -> [i32; 2] {
    [5, 5]
}
fn default_bottom_right() -> [i32; 2] {
    [10, 10]
}
fn default_concurrent() -> bool {
    false
}
fn default_verbose() -> bool {
    false
}

/// Platform corners as `[x, y]` pairs
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    #[serde(default = "default_top_left")]
    pub top_left: [i32; 2],
    #[serde(default = "default_bottom_right")]
    pub bottom_right: [i32; 2],
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            top_left: default_top_left(),
            bottom_right: default_bottom_right(),
        }
    }
}

impl PlatformConfig {
    pub fn top_left_point(&self) -> GridPoint {
        GridPoint::new(self.top_left[0], self.top_left[1])
    }

    pub fn bottom_right_point(&self) -> GridPoint {
        GridPoint::new(self.bottom_right[0], self.bottom_right[1])
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub requests: Option<PathBuf>,
    #[serde(default = "default_concurrent")]
    pub concurrent: bool,
    /// Worker threads for concurrent runs (rayon's default when unset)
    #[serde(default)]
    pub threads: Option<usize>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

/// Outcome of searching the usual config locations
#[derive(Debug, Default)]
pub struct ConfigSearch {
    /// First file that parsed, with its path
    pub found: Option<(PathBuf, FileConfig)>,
    /// Files that exist but failed to parse, with the parse error
    pub skipped: Vec<(PathBuf, String)>,
}

impl FileConfig {
    /// Search the usual locations and return the first config that parses.
    ///
    /// Runs before logging is set up; the caller reports `found` and `skipped`.
    pub fn load() -> ConfigSearch {
        Self::search(&get_config_paths())
    }

    pub fn search(paths: &[PathBuf]) -> ConfigSearch {
        let mut result = ConfigSearch::default();

        for path in paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(path)
            {
                match toml::from_str::<FileConfig>(&contents) {
                    Ok(config) => {
                        result.found = Some((path.clone(), config.anchored_to(path)));
                        break;
                    }
                    Err(e) => result.skipped.push((path.clone(), e.to_string())),
                }
            }
        }
        result
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: FileConfig = toml::from_str(&contents).context("Failed to parse config file")?;
        Ok(config.anchored_to(path))
    }

    /// Resolve a relative `requests` path against the config file's directory
    fn anchored_to(mut self, config_path: &Path) -> Self {
        if let Some(requests) = self.requests.as_mut()
            && requests.is_relative()
            && let Some(dir) = config_path.parent()
        {
            *requests = dir.join(&*requests);
        }
        self
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("landing-platform.toml"));
    paths.push(PathBuf::from(".landing-platform.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("landing-platform").join("config.toml"));
        paths.push(config_dir.join("landing-platform.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".landing-platform.toml"));
    }

    paths
}
