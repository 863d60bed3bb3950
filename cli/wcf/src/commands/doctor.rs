//! `wcf doctor`: configuration and planar toolchain diagnostics.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use anyhow::Result;
use wcf_core::MAX_ORDER;
use wcf_tikz::planar::{missing_tools, DEFAULT_PIPELINE, REQUIRED_TOOLS};

use crate::config::{WcfConfig, CONFIG_FILE};

/// Print diagnostic information for a run started in `cwd`.
pub fn run<W: Write>(out: &mut W, cwd: &Path) -> Result<()> {
    writeln!(out, "=== wcf doctor ===")?;
    writeln!(out)?;
    writeln!(out, "wcf version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "Largest graph order: {MAX_ORDER}")?;
    writeln!(out)?;

    writeln!(out, "--- Configuration ---")?;
    let config = match WcfConfig::find_and_load(cwd) {
        Ok(Some((_, dir))) => {
            writeln!(out, "  {CONFIG_FILE}: found at {}", dir.display())?;
            WcfConfig::resolve(cwd)?
        }
        Ok(None) => {
            writeln!(out, "  {CONFIG_FILE}: not found, using defaults")?;
            WcfConfig::resolve(cwd)?
        }
        Err(e) => {
            writeln!(out, "  {CONFIG_FILE}: error: {e:#}")?;
            return Ok(());
        }
    };
    let indices = if config.adjlist.zero_based { "0-based" } else { "1-based" };
    writeln!(out, "  Adjacency indices: {indices}")?;
    writeln!(out, "  TikZ scale: {}", config.tikz.scale)?;
    let coordinates = if config.tikz.polar { "polar" } else { "cartesian" };
    writeln!(out, "  TikZ coordinates: {coordinates}")?;
    writeln!(out)?;

    writeln!(out, "--- Planar Embedding ---")?;
    let dir = &config.planar.toolchain_dir;
    writeln!(out, "  Toolchain directory: {}", dir.display())?;
    writeln!(out, "  Pipeline: {}", config.planar.command)?;
    writeln!(out, "  sh: {}", shell_status())?;
    if config.planar.command == DEFAULT_PIPELINE {
        let missing = missing_tools(dir);
        for tool in REQUIRED_TOOLS {
            let status = if missing.contains(&tool) { "missing" } else { "found" };
            writeln!(out, "  {tool}: {status}")?;
        }
        let available = if missing.is_empty() { "available" } else { "not available" };
        writeln!(out, "  Planar layout (-p): {available}")?;
    } else {
        writeln!(out, "  Custom pipeline, binaries not checked")?;
    }

    Ok(())
}

/// Whether `sh`, which runs the pipeline, can be spawned and exits cleanly.
fn shell_status() -> &'static str {
    match Command::new("sh").args(["-c", "exit 0"]).status() {
        Ok(status) if status.success() => "available",
        Ok(_) => "failed to run",
        Err(_) => "not found",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(dir: &Path) -> String {
        let mut out = Vec::new();
        run(&mut out, dir).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn doctor_runs_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let report = doctor(dir.path());
        assert!(report.contains("=== wcf doctor ==="));
        assert!(report.contains("planarg: missing"));
        assert!(report.contains("Planar layout (-p): not available"));
    }

    #[test]
    fn doctor_reads_config_and_finds_tools() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[planar]\ntoolchain-dir = \"tools\"\n[tikz]\npolar = true\n",
        )
        .unwrap();
        let tools = dir.path().join("tools");
        std::fs::create_dir(&tools).unwrap();
        for tool in REQUIRED_TOOLS {
            std::fs::write(tools.join(tool), b"").unwrap();
        }

        let report = doctor(dir.path());
        assert!(report.contains(&format!("{CONFIG_FILE}: found at")));
        assert!(report.contains("TikZ coordinates: polar"));
        assert!(report.contains("embed: found"));
        assert!(report.contains("Planar layout (-p): available"));
    }

    #[cfg(unix)]
    #[test]
    fn shell_is_spawned_for_real() {
        assert_eq!(shell_status(), "available");
        let dir = tempfile::tempdir().unwrap();
        assert!(doctor(dir.path()).contains("  sh: available\n"));
    }

    #[test]
    fn broken_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[tikz\n").unwrap();
        assert!(doctor(dir.path()).contains(&format!("{CONFIG_FILE}: error:")));
    }
}
