//! The reconcile state machine: evaluate, mutate, verify.
//!
//! One pass is one sequential chain of client invocations. Current
//! state is queried fresh immediately before deciding, and again
//! immediately after acting; nothing is cached between passes. The only
//! intentional suspension is the settling wait before verifying a
//! repository removal.

use std::thread;
use std::time::Duration;

use crate::backend::ConsoleBackend;
use crate::command::ConsoleCommand;
use crate::error::{Error, Result};
use crate::inspect::Inspector;
use crate::types::{Disposition, Reconciliation};

/// Settling delay before verifying a repository removal. The remote
/// side processes `repo-remove` asynchronously and listings keep
/// showing the url for a while after the command returns.
pub const REPO_REMOVE_SETTLE: Duration = Duration::from_secs(20);

/// A reconcilable resource, tagged by kind.
///
/// Both kinds share the transport and failure model; the tag supplies
/// the kind-specific command names, presence query and settling delay
/// to one common control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A feature, identified by name and optional version. Without a
    /// version, any installed version satisfies presence.
    Feature {
        /// Feature name
        name: String,
        /// Optional version qualifier
        version: Option<String>,
    },
    /// A feature repository, identified by descriptor url.
    Repo {
        /// Descriptor url
        url: String,
    },
}

impl Target {
    /// A feature target.
    pub fn feature(name: impl Into<String>, version: Option<&str>) -> Self {
        Target::Feature {
            name: name.into(),
            version: version.map(str::to_string),
        }
    }

    /// A repository target.
    pub fn repo(url: impl Into<String>) -> Self {
        Target::Repo { url: url.into() }
    }

    /// Resource identity as shown in logs and reports.
    pub fn id(&self) -> String {
        match self {
            Target::Feature { name, version } => qualified_name(name, version.as_deref()),
            Target::Repo { url } => url.clone(),
        }
    }
}

/// Runs one reconcile pass against a backend.
pub struct Reconciler<'a> {
    backend: &'a dyn ConsoleBackend,
    settle: Duration,
    dry_run: bool,
}

impl<'a> Reconciler<'a> {
    /// A reconciler with the given settling delay and dry-run mode.
    pub fn new(backend: &'a dyn ConsoleBackend, settle: Duration, dry_run: bool) -> Self {
        Self {
            backend,
            settle,
            dry_run,
        }
    }

    /// Drive the target to the desired disposition.
    pub fn reconcile(&self, target: &Target, want: Disposition) -> Result<Reconciliation> {
        match want {
            Disposition::Refresh => self.refresh(target),
            Disposition::Present => self.converge(target, true),
            Disposition::Absent => self.converge(target, false),
        }
    }

    /// Refresh never short-circuits to a no-op: once the repository is
    /// known to the console the command is issued unconditionally, and
    /// there is no post-condition to verify.
    fn refresh(&self, target: &Target) -> Result<Reconciliation> {
        let Target::Repo { url } = target else {
            return Err(Error::Precondition {
                message: "refresh is only supported for repositories".to_string(),
            });
        };

        let inspector = Inspector::new(self.backend);
        if !inspector.repositories()?.contains_key(url) {
            return Err(Error::Precondition {
                message: format!("cannot refresh a repository that is not registered: {url}"),
            });
        }

        let command = ConsoleCommand::with_argument("repo-refresh", url.clone());
        if self.dry_run {
            return Ok(Reconciliation::Skipped {
                command: self.backend.command_text(&command),
            });
        }
        let output = inspector.run_checked(&command)?;
        Ok(Reconciliation::Applied {
            command: self.backend.command_text(&command),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn converge(&self, target: &Target, wanted_present: bool) -> Result<Reconciliation> {
        let inspector = Inspector::new(self.backend);

        if self.is_present(&inspector, target)? == wanted_present {
            log::debug!("{} already in desired state", target.id());
            return Ok(Reconciliation::Unchanged);
        }

        let command = mutate_command(target, wanted_present);
        if self.dry_run {
            return Ok(Reconciliation::Skipped {
                command: self.backend.command_text(&command),
            });
        }

        let output = inspector.run_checked(&command)?;

        if !wanted_present && matches!(target, Target::Repo { .. }) && !self.settle.is_zero() {
            log::info!(
                "waiting {}s for the console to settle after repo-remove",
                self.settle.as_secs()
            );
            thread::sleep(self.settle);
        }

        if self.is_present(&inspector, target)? != wanted_present {
            return Err(Error::Verification {
                message: verification_failure(target, wanted_present).to_string(),
            });
        }

        Ok(Reconciliation::Applied {
            command: self.backend.command_text(&command),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn is_present(&self, inspector: &Inspector, target: &Target) -> Result<bool> {
        match target {
            Target::Feature { name, version } => {
                inspector.is_feature_installed(name, version.as_deref())
            }
            Target::Repo { url } => Ok(inspector.repositories()?.contains_key(url)),
        }
    }
}

fn mutate_command(target: &Target, wanted_present: bool) -> ConsoleCommand {
    match target {
        Target::Feature { name, version } => {
            let verb = if wanted_present { "install" } else { "uninstall" };
            ConsoleCommand::with_argument(verb, qualified_name(name, version.as_deref()))
        }
        Target::Repo { url } => {
            let verb = if wanted_present { "repo-add" } else { "repo-remove" };
            ConsoleCommand::with_argument(verb, url.clone())
        }
    }
}

/// Install and uninstall take the fully-qualified `name/version` form
/// when a version is requested.
fn qualified_name(name: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{name}/{version}"),
        None => name.to_string(),
    }
}

fn verification_failure(target: &Target, wanted_present: bool) -> &'static str {
    match (target, wanted_present) {
        (Target::Feature { .. }, true) => "Feature fails to install",
        (Target::Feature { .. }, false) => "Feature fails to uninstall",
        (Target::Repo { .. }, true) => "Repo did not install",
        (Target::Repo { .. }, false) => "Repo is still installed",
    }
}
