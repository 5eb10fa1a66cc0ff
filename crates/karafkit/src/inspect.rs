//! State inspection over the console listing sub-commands.
//!
//! Every question about current state runs a fresh listing query; no
//! parsed record set is kept across calls.

use std::collections::BTreeMap;

use crate::backend::ConsoleBackend;
use crate::command::ConsoleCommand;
use crate::error::{Error, Result, extract_reason};
use crate::listing;
use crate::types::{ConsoleOutput, FeatureRecord, RepoRecord};

/// Output markers that mean the console rejected or failed the command
/// even when the client itself exits zero.
const ERROR_MARKERS: [&str; 2] = ["Error executing command", "Command not found"];

/// Queries current state through a [`ConsoleBackend`].
pub struct Inspector<'a> {
    backend: &'a dyn ConsoleBackend,
}

impl<'a> Inspector<'a> {
    /// Wrap a backend for querying.
    pub fn new(backend: &'a dyn ConsoleBackend) -> Self {
        Self { backend }
    }

    /// Run a console command, treating a non-zero exit or an error
    /// marker in the output as a hard transport failure.
    pub fn run_checked(&self, command: &ConsoleCommand) -> Result<ConsoleOutput> {
        let output = self.backend.run(command)?;
        if !output.success || has_error_marker(&output) {
            return Err(Error::Transport {
                command: self.backend.command_text(command),
                reason: extract_reason(output.diagnostics()).to_string(),
            });
        }
        Ok(output)
    }

    /// Installed features, in listing order.
    pub fn features(&self) -> Result<Vec<FeatureRecord>> {
        let output = self.run_checked(&ConsoleCommand::with_argument("list", "-i --no-format"))?;
        Ok(listing::parse_feature_listing(&output.stdout))
    }

    /// Registered repositories, keyed by url.
    pub fn repositories(&self) -> Result<BTreeMap<String, RepoRecord>> {
        let output = self.run_checked(&ConsoleCommand::with_argument("repo-list", "--no-format"))?;
        Ok(listing::parse_repo_listing(&output.stdout))
    }

    /// Whether a feature is installed.
    ///
    /// The first installed record with a matching name decides; when a
    /// version is requested both sides are normalized before comparing.
    /// Listing order wins, no sorting.
    pub fn is_feature_installed(&self, name: &str, version: Option<&str>) -> Result<bool> {
        let wanted = version.map(listing::normalize_desired_version);
        for record in self.features()? {
            if record.name != name || !record.is_installed() {
                continue;
            }
            match &wanted {
                Some(wanted) => {
                    if listing::normalize_listed_version(&record.version) == *wanted {
                        return Ok(true);
                    }
                }
                None => return Ok(true),
            }
        }
        Ok(false)
    }
}

fn has_error_marker(output: &ConsoleOutput) -> bool {
    ERROR_MARKERS
        .iter()
        .any(|marker| output.stdout.contains(marker) || output.stderr.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::FakeConsole;

    #[test]
    fn error_marker_fails_even_on_zero_exit() {
        let fake = FakeConsole::scripted([ConsoleOutput::ok(
            "Error executing command on feature\nreason: no such feature\n",
        )]);
        let inspector = Inspector::new(&fake);

        let err = inspector.features().unwrap_err();
        match err {
            Error::Transport { reason, .. } => assert_eq!(reason, "no such feature"),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn nonzero_exit_reports_raw_output_without_marker() {
        let fake = FakeConsole::scripted([ConsoleOutput::failed("Connection refused")]);
        let inspector = Inspector::new(&fake);

        let err = inspector.repositories().unwrap_err();
        match err {
            Error::Transport { reason, .. } => assert_eq!(reason, "Connection refused"),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn version_match_is_normalized_on_both_sides() {
        let fake = FakeConsole::scripted([ConsoleOutput::ok("camel-jms 2.18.1_SNAPSHOT x Started\n")]);
        let inspector = Inspector::new(&fake);

        assert!(
            inspector
                .is_feature_installed("camel-jms", Some("2.18.1-SNAPSHOT"))
                .unwrap()
        );
    }

    #[test]
    fn any_installed_version_satisfies_a_versionless_query() {
        let fake = FakeConsole::scripted([ConsoleOutput::ok("camel-jms 2.18.1 x Installed\n")]);
        let inspector = Inspector::new(&fake);

        assert!(inspector.is_feature_installed("camel-jms", None).unwrap());
    }

    #[test]
    fn uninstalled_records_never_satisfy_presence() {
        let fake = FakeConsole::scripted([ConsoleOutput::ok("camel-jms 2.18.1 x Uninstalled\n")]);
        let inspector = Inspector::new(&fake);

        assert!(!inspector.is_feature_installed("camel-jms", None).unwrap());
    }

    #[test]
    fn listing_queries_use_no_format() {
        let fake = FakeConsole::scripted([
            ConsoleOutput::ok(""),
            ConsoleOutput::ok(""),
        ]);
        let inspector = Inspector::new(&fake);

        inspector.features().unwrap();
        inspector.repositories().unwrap();
        assert_eq!(
            fake.statements(),
            vec!["feature:list -i --no-format", "feature:repo-list --no-format"]
        );
    }
}
