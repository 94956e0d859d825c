//! Streams an input script through a [`Session`] and prints the reports.

use std::io::{BufRead, Write};

use aclfs_interp::{Report, Session, Status};
use aclfs_namespace::World;
use serde::Serialize;

use crate::config::{AclfsConfig, OutputFormat};
use crate::error::Result;

/// Per-status counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Lines reported `Y`
    pub allowed: usize,
    /// Lines reported `N`
    pub denied: usize,
    /// Lines reported `X`
    pub invalid: usize,
}

impl RunSummary {
    fn record(&mut self, report: &Report) {
        match report.status {
            Status::Allowed => self.allowed += 1,
            Status::Denied => self.denied += 1,
            Status::Invalid => self.invalid += 1,
        }
    }

    /// Total number of reported lines.
    pub fn total(&self) -> usize {
        self.allowed + self.denied + self.invalid
    }
}

fn emit(out: &mut impl Write, format: OutputFormat, report: &Report) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{report}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn dump_tree(out: &mut impl Write, format: OutputFormat, world: &World) -> Result<()> {
    match format {
        OutputFormat::Text => out.write_all(world.render_tree().as_bytes())?,
        OutputFormat::Json => {
            for node in world.snapshot() {
                serde_json::to_writer(&mut *out, &node)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Run the script read from `input`, writing reports to `out`.
///
/// Reports are written as soon as each line completes. Input after the end
/// of the command section is not read.
pub fn run(config: &AclfsConfig, input: impl BufRead, mut out: impl Write) -> Result<RunSummary> {
    let format = config.output.format;
    let mut session = Session::with_limits(config.limits)?;
    let mut summary = RunSummary::default();

    for line in input.lines() {
        if session.is_done() {
            break;
        }
        if let Some(report) = session.feed(&line?) {
            summary.record(&report);
            emit(&mut out, format, &report)?;
        }
    }
    if let Some(report) = session.finish() {
        summary.record(&report);
        emit(&mut out, format, &report)?;
    }

    if config.output.dump_tree {
        dump_tree(&mut out, format, session.world())?;
    }
    out.flush()?;

    tracing::info!(
        allowed = summary.allowed,
        denied = summary.denied,
        invalid = summary.invalid,
        "Run complete"
    );
    Ok(summary)
}
