//! Real backend spawning the Karaf `client` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::backend::ConsoleBackend;
use crate::command::{ConnectionOptions, ConsoleCommand, build_command_line};
use crate::error::{Error, Result};
use crate::types::ConsoleOutput;

/// Client location inside a stock Karaf install.
pub const DEFAULT_CLIENT_BIN: &str = "/opt/karaf/bin/client";

/// Backend that executes the real `client` binary.
pub struct ClientBackend {
    client_bin: PathBuf,
    options: ConnectionOptions,
}

impl ClientBackend {
    /// Create a backend for the given client path.
    ///
    /// `client_bin` may be the client binary itself or a Karaf install
    /// root containing `bin/client`.
    pub fn new(client_bin: &str, options: ConnectionOptions) -> Result<Self> {
        Ok(Self {
            client_bin: resolve_client_bin(client_bin)?,
            options,
        })
    }

    fn bin_text(&self) -> String {
        self.client_bin.display().to_string()
    }
}

impl ConsoleBackend for ClientBackend {
    fn command_text(&self, command: &ConsoleCommand) -> String {
        build_command_line(&self.bin_text(), &self.options, command)
    }

    fn run(&self, command: &ConsoleCommand) -> Result<ConsoleOutput> {
        log::debug!("running {}", self.command_text(command));
        let output = Command::new(&self.client_bin)
            .args(self.options.to_args())
            .arg(command.statement())
            .output()
            .map_err(|source| Error::Spawn {
                command: self.command_text(command),
                source,
            })?;
        Ok(ConsoleOutput::from(output))
    }
}

/// Resolve the configured client path after tilde expansion: a file is
/// used as-is, a directory must contain `bin/client`.
pub fn resolve_client_bin(configured: &str) -> Result<PathBuf> {
    let expanded = shellexpand::tilde(configured);
    let path = Path::new(expanded.as_ref());

    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if path.is_dir() {
        let candidate = path.join("bin").join("client");
        if candidate.is_file() {
            return Ok(candidate);
        }
        return Err(Error::Configuration {
            path: path.to_path_buf(),
            message: "directory does not contain bin/client".to_string(),
        });
    }
    Err(Error::Configuration {
        path: path.to_path_buf(),
        message: "not a file or a directory".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn file_path_is_used_as_is() {
        let tmp = TempDir::new().unwrap();
        let bin = tmp.path().join("client");
        fs::write(&bin, "#!/bin/sh\n").unwrap();

        let resolved = resolve_client_bin(bin.to_str().unwrap()).unwrap();
        assert_eq!(resolved, bin);
    }

    #[test]
    fn install_root_resolves_to_bin_client() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("bin")).unwrap();
        let bin = tmp.path().join("bin").join("client");
        fs::write(&bin, "#!/bin/sh\n").unwrap();

        let resolved = resolve_client_bin(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(resolved, bin);
    }

    #[test]
    fn directory_without_client_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_client_bin(tmp.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn missing_path_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let err = resolve_client_bin(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
