//! Core types for Karaf console state reconciliation.

use serde::{Deserialize, Serialize};
use std::process::Output;

/// State value the console reports for features that are known but not
/// installed. Anything else counts as installed.
pub const FEATURE_STATE_UNINSTALLED: &str = "Uninstalled";

/// Desired end-state for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// Resource should be installed/registered
    Present,
    /// Resource should not be installed/registered
    Absent,
    /// Repository descriptors should be re-read (repositories only)
    Refresh,
}

impl Disposition {
    /// The state name as used on the CLI surface and in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Present => "present",
            Disposition::Absent => "absent",
            Disposition::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A feature row parsed from `feature:list` output.
///
/// Records are rebuilt from a fresh listing on every query and carry no
/// identity beyond their fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Feature name
    pub name: String,
    /// Version exactly as listed (the console substitutes `.` for `-`
    /// in deployed versions, and some listings use `_`)
    pub version: String,
    /// Raw state column, e.g. `Installed`, `Started`, `Uninstalled`
    pub state: String,
}

impl FeatureRecord {
    /// Whether this record counts as installed.
    pub fn is_installed(&self) -> bool {
        self.state != FEATURE_STATE_UNINSTALLED
    }
}

/// A repository row parsed from `feature:repo-list` output.
///
/// Repositories have no state column; presence in the listing is
/// "installed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    /// Repository name as reported by the console
    pub name: String,
    /// Descriptor url, the repository's identity
    pub url: String,
}

/// Captured result of one client invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleOutput {
    /// Captured stdout, lossily decoded
    pub stdout: String,
    /// Captured stderr, lossily decoded
    pub stderr: String,
    /// Whether the client exited zero
    pub success: bool,
}

impl ConsoleOutput {
    /// A successful invocation with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    /// A failed invocation with the given stdout.
    pub fn failed(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: false,
        }
    }

    /// The stream worth showing a human: stdout when it has content,
    /// stderr otherwise.
    pub fn diagnostics(&self) -> &str {
        if self.stdout.trim().is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

impl From<Output> for ConsoleOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }
}

/// Outcome of one reconcile pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reconciliation {
    /// Current state already matched the desired disposition; no
    /// mutating command was issued
    Unchanged,
    /// A mutating command ran and its effect was verified
    Applied {
        /// The full invocation line that was executed
        command: String,
        /// Captured stdout of the mutating command
        stdout: String,
        /// Captured stderr of the mutating command
        stderr: String,
    },
    /// Dry run: the command that would have been issued
    Skipped {
        /// The full invocation line that was withheld
        command: String,
    },
}

impl Reconciliation {
    /// Whether the pass changed remote state.
    pub fn changed(&self) -> bool {
        matches!(self, Reconciliation::Applied { .. })
    }

    /// The command line that ran (or would have run), if any.
    pub fn command(&self) -> Option<&str> {
        match self {
            Reconciliation::Unchanged => None,
            Reconciliation::Applied { command, .. } | Reconciliation::Skipped { command } => {
                Some(command)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_counts_as_installed() {
        let record = FeatureRecord {
            name: "camel-jms".to_string(),
            version: "2.18.1".to_string(),
            state: "Started".to_string(),
        };
        assert!(record.is_installed());
    }

    #[test]
    fn uninstalled_is_not_installed() {
        let record = FeatureRecord {
            name: "camel-jms".to_string(),
            version: "2.18.1".to_string(),
            state: FEATURE_STATE_UNINSTALLED.to_string(),
        };
        assert!(!record.is_installed());
    }

    #[test]
    fn diagnostics_prefers_stdout() {
        let out = ConsoleOutput {
            stdout: "boom".to_string(),
            stderr: "ignored".to_string(),
            success: false,
        };
        assert_eq!(out.diagnostics(), "boom");
    }

    #[test]
    fn diagnostics_falls_back_to_stderr() {
        let out = ConsoleOutput {
            stdout: "  \n".to_string(),
            stderr: "connection refused".to_string(),
            success: false,
        };
        assert_eq!(out.diagnostics(), "connection refused");
    }

    #[test]
    fn only_applied_counts_as_changed() {
        assert!(!Reconciliation::Unchanged.changed());
        assert!(
            Reconciliation::Applied {
                command: "c".to_string(),
                stdout: String::new(),
                stderr: String::new(),
            }
            .changed()
        );
        assert!(
            !Reconciliation::Skipped {
                command: "c".to_string(),
            }
            .changed()
        );
    }
}
