//! `wcf.toml` discovery and defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wcf_format::AdjacencyOptions;
use wcf_tikz::planar::DEFAULT_PIPELINE;
use wcf_tikz::{NodePrinter, TikzOptions, DEFAULT_SCALE};

pub const CONFIG_FILE: &str = "wcf.toml";

/// Optional per-project settings. Every section and key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WcfConfig {
    pub adjlist: AdjlistConfig,
    pub tikz: TikzConfig,
    pub planar: PlanarConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AdjlistConfig {
    /// Treat neighbour indices as 0-based.
    pub zero_based: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TikzConfig {
    pub scale: f64,
    pub polar: bool,
}

impl Default for TikzConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            polar: false,
        }
    }
}

/// Where the planar embedding binaries live and how they are chained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlanarConfig {
    /// Relative paths are resolved against the directory holding `wcf.toml`.
    pub toolchain_dir: PathBuf,
    pub command: String,
}

impl Default for PlanarConfig {
    fn default() -> Self {
        Self {
            toolchain_dir: PathBuf::from("."),
            command: DEFAULT_PIPELINE.to_string(),
        }
    }
}

impl WcfConfig {
    /// Search for `wcf.toml` starting at `start_dir` and walking up.
    ///
    /// Returns the parsed config and the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config = Self::from_toml(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Config for `start_dir`, with relative paths made absolute.
    ///
    /// Without a config file the defaults apply and the toolchain is looked
    /// for in `start_dir` itself.
    pub fn resolve(start_dir: &Path) -> Result<Self> {
        match Self::find_and_load(start_dir)? {
            Some((mut config, dir)) => {
                config.planar.toolchain_dir = dir.join(&config.planar.toolchain_dir);
                tracing::debug!(dir = %dir.display(), "loaded {CONFIG_FILE}");
                Ok(config)
            }
            None => {
                let mut config = Self::default();
                config.planar.toolchain_dir = start_dir.join(&config.planar.toolchain_dir);
                Ok(config)
            }
        }
    }

    pub fn adjacency_options(&self, zero_based_flag: bool) -> AdjacencyOptions {
        AdjacencyOptions {
            zero_based: zero_based_flag || self.adjlist.zero_based,
        }
    }

    pub fn tikz_options(&self, polar_flag: bool, scale: Option<f64>) -> TikzOptions {
        TikzOptions {
            printer: if polar_flag || self.tikz.polar {
                NodePrinter::Polar
            } else {
                NodePrinter::Cartesian
            },
            scale: scale.unwrap_or(self.tikz.scale),
        }
    }
}
