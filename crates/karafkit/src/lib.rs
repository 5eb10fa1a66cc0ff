//! # karafkit
//!
//! Pure Rust library for reconciling Apache Karaf features and feature
//! repositories through the administrative console client.
//!
//! The remote console offers no structured query API: all state is
//! inferred by invoking the `client` binary with a console sub-command,
//! capturing its mixed human-readable output, and parsing it into typed
//! records. This crate provides:
//! - Command line assembly (client path, connection options, quoted
//!   console statement)
//! - Tolerant parsers for the `feature:list` / `feature:repo-list`
//!   listings
//! - State inspection (is a feature installed, which repositories are
//!   registered)
//! - A reconcile pass: compare desired and current state, issue the
//!   mutating command when needed, and verify its effect with a fresh
//!   query
//!
//! ## Example
//!
//! ```no_run
//! use karafkit::{Client, ConnectionOptions, Disposition};
//!
//! let options = ConnectionOptions {
//!     host: Some("karaf.example.org".to_string()),
//!     ..ConnectionOptions::default()
//! };
//! let client = Client::connect("/opt/karaf", options).expect("client not found");
//!
//! let outcome = client
//!     .reconcile_feature("camel-jms", Some("2.18.1"), Disposition::Present, false)
//!     .expect("reconcile failed");
//! println!("changed: {}", outcome.changed());
//! ```
//!
//! Every run is self-contained and idempotent: a pass whose current
//! state already matches issues no mutating command at all.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod command;
pub mod error;
pub mod inspect;
pub mod listing;
pub mod reconcile;
pub mod types;

pub use backend::ConsoleBackend;
pub use backend::client::{ClientBackend, DEFAULT_CLIENT_BIN};
pub use command::{ConnectionOptions, ConsoleCommand, build_command_line};
pub use error::{Error, Result, extract_reason};
pub use inspect::Inspector;
pub use reconcile::{REPO_REMOVE_SETTLE, Reconciler, Target};
pub use types::{
    ConsoleOutput, Disposition, FEATURE_STATE_UNINSTALLED, FeatureRecord, Reconciliation,
    RepoRecord,
};

use std::collections::BTreeMap;
use std::time::Duration;

/// High-level client for console operations.
///
/// Wraps a [`ConsoleBackend`] and provides the reconcile and listing
/// entry points. One reconcile call is one sequential, blocking chain
/// of client invocations.
pub struct Client {
    backend: Box<dyn ConsoleBackend>,
    settle: Duration,
}

impl Client {
    /// Connect through the real client binary.
    ///
    /// `client_bin` may be the binary itself or a Karaf install root
    /// containing `bin/client`; a path that is neither is a
    /// configuration error before any remote interaction.
    pub fn connect(client_bin: &str, options: ConnectionOptions) -> Result<Self> {
        Ok(Self::with_backend(Box::new(ClientBackend::new(
            client_bin, options,
        )?)))
    }

    /// Create a client with a custom backend (useful for testing).
    pub fn with_backend(backend: Box<dyn ConsoleBackend>) -> Self {
        Self {
            backend,
            settle: REPO_REMOVE_SETTLE,
        }
    }

    /// Override the settling delay applied before verifying a
    /// repository removal.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Installed features, in listing order.
    pub fn features(&self) -> Result<Vec<FeatureRecord>> {
        Inspector::new(self.backend.as_ref()).features()
    }

    /// Registered repositories, keyed by url.
    pub fn repositories(&self) -> Result<BTreeMap<String, RepoRecord>> {
        Inspector::new(self.backend.as_ref()).repositories()
    }

    /// Whether a feature is installed (at the given version, when one
    /// is supplied).
    pub fn is_feature_installed(&self, name: &str, version: Option<&str>) -> Result<bool> {
        Inspector::new(self.backend.as_ref()).is_feature_installed(name, version)
    }

    /// Reconcile a feature to the desired disposition.
    pub fn reconcile_feature(
        &self,
        name: &str,
        version: Option<&str>,
        want: Disposition,
        dry_run: bool,
    ) -> Result<Reconciliation> {
        Reconciler::new(self.backend.as_ref(), self.settle, dry_run)
            .reconcile(&Target::feature(name, version), want)
    }

    /// Reconcile a repository to the desired disposition.
    pub fn reconcile_repo(
        &self,
        url: &str,
        want: Disposition,
        dry_run: bool,
    ) -> Result<Reconciliation> {
        Reconciler::new(self.backend.as_ref(), self.settle, dry_run)
            .reconcile(&Target::repo(url), want)
    }
}
