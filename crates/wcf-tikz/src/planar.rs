//! Planar embeddings computed by the external plantri/CaGe tool chain.
//!
//! The graph is written as a multi_code stream to a shell pipeline that
//! converts it, checks planarity and prints a `writegraph2d` description with
//! one coordinate line per vertex.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;
use wcf_core::Graph;
use wcf_format::multi_code;

use crate::error::{EmbedError, Result};
use crate::layout::{PlanarEmbedder, Point};

/// Binaries the default pipeline expects in the tool directory.
pub const REQUIRED_TOOLS: [&str; 3] = ["gconv", "planarg", "embed"];

/// Default conversion pipeline, run with `sh -c` inside the tool directory.
pub const DEFAULT_PIPELINE: &str =
    "./gconv -f graph6_old | ./planarg -p | ./gconv -f writegraph2d | ./embed -o YSd";

/// Names of the required tools that are not present in `dir`.
pub fn missing_tools(dir: &Path) -> Vec<&'static str> {
    REQUIRED_TOOLS
        .into_iter()
        .filter(|tool| !dir.join(tool).is_file())
        .collect()
}

/// Extract coordinates from a `writegraph2d` response.
///
/// The first line is the header and the last two lines close the graph; every
/// line in between is `index x y neighbours...`.
pub fn parse_writegraph2d(response: &str) -> Result<Vec<Point>> {
    let lines: Vec<&str> = response.lines().map(str::trim).collect();
    if lines.len() < 3 {
        return Ok(Vec::new());
    }
    lines[1..lines.len() - 2]
        .iter()
        .map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let coordinate = |i: usize| -> Result<f64> {
                let field = fields.get(i).ok_or_else(|| {
                    EmbedError::failure(format!("missing coordinate in line '{line}'"))
                })?;
                field.parse().map_err(|_| {
                    EmbedError::failure(format!("'{field}' is not a coordinate in line '{line}'"))
                })
            };
            Ok(Point::Cartesian {
                x: coordinate(1)?,
                y: coordinate(2)?,
            })
        })
        .collect()
}

/// Embedder that shells out to the external pipeline.
#[derive(Debug, Clone)]
pub struct ExternalEmbedder {
    dir: PathBuf,
    command: String,
}

impl ExternalEmbedder {
    /// Use `command` in `dir` as is, without checking for the binaries.
    pub fn new(dir: impl Into<PathBuf>, command: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            command: command.into(),
        }
    }

    /// The default pipeline in `dir`, provided all required tools are there.
    pub fn locate(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let missing = missing_tools(&dir);
        if !missing.is_empty() {
            return Err(EmbedError::ExternalToolUnavailable {
                dir,
                missing: missing.into_iter().map(String::from).collect(),
            });
        }
        Ok(Self::new(dir, DEFAULT_PIPELINE))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl PlanarEmbedder for ExternalEmbedder {
    fn embed(&self, graph: &Graph) -> Result<Vec<Point>> {
        let record = multi_code::encode_record(graph)?;

        debug!(
            command = %self.command,
            dir = %self.dir.display(),
            order = graph.order(),
            "starting planar pipeline"
        );
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .current_dir(&self.dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EmbedError::failure(format!("failed to start pipeline: {e}")))?;

        // stdin is dropped at the end of this block so the pipeline sees EOF
        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| EmbedError::failure("pipeline has no stdin"))?;
            stdin
                .write_all(multi_code::MAGIC)
                .and_then(|_| stdin.write_all(&record))
                .map_err(|e| EmbedError::failure(format!("writing to pipeline: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| EmbedError::failure(format!("reading from pipeline: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EmbedError::failure(format!(
                "pipeline exited with {} (is the graph planar?): {}",
                output.status,
                stderr.trim()
            )));
        }

        let points = parse_writegraph2d(&String::from_utf8_lossy(&output.stdout))?;
        debug!(points = points.len(), "planar pipeline finished");
        Ok(points)
    }
}
