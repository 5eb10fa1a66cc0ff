//! Backend abstraction for client invocations.
//!
//! The [`ConsoleBackend`] trait is the process-execution seam: the
//! production implementation spawns the real `client` binary, test
//! doubles return canned console output without spawning anything.

pub mod client;

use crate::command::ConsoleCommand;
use crate::error::Result;
use crate::types::ConsoleOutput;

/// One synchronous client invocation per call; no implicit retry
/// (retry/delay ride the command line and are handled by the client).
pub trait ConsoleBackend: Send + Sync {
    /// The full invocation line for display and reporting.
    fn command_text(&self, command: &ConsoleCommand) -> String;

    /// Run one console statement, blocking until the client exits, and
    /// capture exit status and both output streams.
    fn run(&self, command: &ConsoleCommand) -> Result<ConsoleOutput>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::ConsoleBackend;
    use crate::command::ConsoleCommand;
    use crate::error::Result;
    use crate::types::ConsoleOutput;

    /// Scripted backend: hands out canned outputs in order and records
    /// every statement it was asked to run.
    pub struct FakeConsole {
        responses: Mutex<VecDeque<ConsoleOutput>>,
        statements: Mutex<Vec<String>>,
    }

    impl FakeConsole {
        pub fn scripted(responses: impl IntoIterator<Item = ConsoleOutput>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                statements: Mutex::new(Vec::new()),
            }
        }

        /// Statements run so far, in order.
        pub fn statements(&self) -> Vec<String> {
            self.statements.lock().unwrap().clone()
        }
    }

    impl ConsoleBackend for FakeConsole {
        fn command_text(&self, command: &ConsoleCommand) -> String {
            format!("client '{}'", command.statement())
        }

        fn run(&self, command: &ConsoleCommand) -> Result<ConsoleOutput> {
            self.statements.lock().unwrap().push(command.statement());
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("unscripted command: {}", command.statement())))
        }
    }
}
