//! Error types for Karaf console operations.
//!
//! The console gives no transactional confirmation, so failures are
//! split by where they were detected: before any remote interaction
//! (configuration), while talking to the client (spawn/transport), or
//! after a mutating command when the re-query contradicts it
//! (verification). Every variant carries the one message that is shown
//! to the user; there is no partial-success reporting.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for console operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Marker the console prints ahead of a failure explanation.
const REASON_MARKER: &str = "reason: ";

/// Errors that can occur during a reconcile pass.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured client path is neither a client binary nor a
    /// Karaf install root containing `bin/client`.
    #[error("client_bin not usable ({message}): {}", path.display())]
    Configuration {
        /// The path as configured, after tilde expansion
        path: PathBuf,
        /// Why the path was rejected
        message: String,
    },

    /// The client process could not be started at all.
    #[error("failed to execute {command}: {source}")]
    Spawn {
        /// The full invocation line that failed to spawn
        command: String,
        /// The underlying OS error
        source: io::Error,
    },

    /// The client ran but the console reported failure: non-zero exit
    /// code or a recognized error marker in the captured output.
    #[error("{reason}")]
    Transport {
        /// The full invocation line that failed
        command: String,
        /// Extracted reason, or the raw output when no marker was found
        reason: String,
    },

    /// A mutating command reported success but the post-condition
    /// re-query contradicted it.
    #[error("{message}")]
    Verification {
        /// Operation-specific failure message
        message: String,
    },

    /// The requested operation cannot be attempted in the current state.
    #[error("{message}")]
    Precondition {
        /// Why the operation was refused before any command was issued
        message: String,
    },
}

/// Extract a human-readable failure reason from raw console output.
///
/// Returns the text after the `reason: ` marker, trimmed of surrounding
/// whitespace. Output without the marker comes back unchanged and must
/// be treated as opaque diagnostic text, not a structured error code.
pub fn extract_reason(output: &str) -> &str {
    match output.find(REASON_MARKER) {
        Some(index) => output[index + REASON_MARKER.len()..].trim(),
        None => output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_after_marker() {
        let out = "Error executing command on feature\nreason: disk full\n";
        assert_eq!(extract_reason(out), "disk full");
    }

    #[test]
    fn reason_without_marker_is_untouched() {
        let out = "Connection refused by remote host";
        assert_eq!(extract_reason(out), out);
    }

    #[test]
    fn reason_keeps_trailing_text() {
        // Everything after the marker belongs to the reason.
        let out = "failed, reason: Unable to resolve root feature\ncaused by: timeout";
        assert_eq!(
            extract_reason(out),
            "Unable to resolve root feature\ncaused by: timeout"
        );
    }

    #[test]
    fn transport_error_displays_reason_only() {
        let err = Error::Transport {
            command: "/opt/karaf/bin/client 'feature:install x'".to_string(),
            reason: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "disk full");
    }
}
