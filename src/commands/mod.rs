//! Command implementations for the karafctl CLI.

pub mod feature;
pub mod repo;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::Context;
use crate::ui;
use karafkit::{Disposition, Reconciliation};

/// Reconcile report printed on success.
#[derive(Debug, Serialize)]
struct Report<'a> {
    changed: bool,
    command: &'a str,
    resource: &'a str,
    state: &'a str,
    stdout: &'a str,
    stderr: &'a str,
}

/// Spinner shown while a blocking reconcile call is in flight.
pub fn spinner(hidden: bool, msg: &str) -> Option<ProgressBar> {
    if hidden {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Render the outcome of a reconcile pass.
pub fn print_report(
    ctx: &Context,
    resource: &str,
    want: Disposition,
    outcome: &Reconciliation,
    json: bool,
) -> Result<()> {
    let (changed, command, stdout, stderr) = match outcome {
        Reconciliation::Unchanged => (false, "", "", ""),
        Reconciliation::Applied {
            command,
            stdout,
            stderr,
        } => (true, command.as_str(), stdout.as_str(), stderr.as_str()),
        Reconciliation::Skipped { command } => (false, command.as_str(), "", ""),
    };

    if json {
        let report = Report {
            changed,
            command,
            resource,
            state: want.as_str(),
            stdout,
            stderr,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match outcome {
        Reconciliation::Unchanged => ui::info(&format!("{} already {}", resource, want)),
        Reconciliation::Applied { .. } => {
            if want == Disposition::Refresh {
                ui::success(&format!("{} refreshed", resource));
            } else {
                ui::success(&format!("{} is now {}", resource, want));
            }
            ui::kv("command", command);
            if ctx.verbose > 0 {
                if !stdout.trim().is_empty() {
                    ui::kv("stdout", stdout.trim());
                }
                if !stderr.trim().is_empty() {
                    ui::kv("stderr", stderr.trim());
                }
            }
        }
        Reconciliation::Skipped { .. } => {
            ui::info(&format!("dry run - would execute {}", command));
        }
    }
    Ok(())
}
