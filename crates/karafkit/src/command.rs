//! Command line assembly for the Karaf `client` binary.
//!
//! An invocation is the client path, the connection options in a fixed
//! order, and one console statement quoted as a single token so the
//! remote side treats it as one statement.

use serde::{Deserialize, Serialize};

/// Connection options forwarded verbatim to the client binary.
///
/// Each option is appended only when present, in the fixed order
/// `-h -a -u -p -d -r`, between the client path and the console
/// statement. Retry behavior (`-d`/`-r`) belongs to the client's own
/// connection handling; nothing here retries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionOptions {
    /// Remote host (`-h`)
    pub host: Option<String>,
    /// Remote port (`-a`)
    pub port: Option<String>,
    /// User name (`-u`)
    pub user: Option<String>,
    /// Password (`-p`)
    pub password: Option<String>,
    /// Intra-retry delay (`-d`)
    pub delay: Option<String>,
    /// Connection retry attempts (`-r`)
    pub retry: Option<String>,
}

impl ConnectionOptions {
    /// The option/value argument pairs, in the fixed order.
    pub fn to_args(&self) -> Vec<String> {
        let pairs = [
            ("-h", &self.host),
            ("-a", &self.port),
            ("-u", &self.user),
            ("-p", &self.password),
            ("-d", &self.delay),
            ("-r", &self.retry),
        ];

        let mut args = Vec::new();
        for (flag, value) in pairs {
            if let Some(value) = value {
                args.push(flag.to_string());
                args.push(value.clone());
            }
        }
        args
    }
}

/// One console statement: a `feature:` sub-command plus optional
/// argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleCommand {
    verb: &'static str,
    argument: Option<String>,
}

impl ConsoleCommand {
    /// A statement without argument, e.g. `feature:list`.
    pub fn new(verb: &'static str) -> Self {
        Self {
            verb,
            argument: None,
        }
    }

    /// A statement with argument text, e.g. `feature:install camel-jms`.
    pub fn with_argument(verb: &'static str, argument: impl Into<String>) -> Self {
        Self {
            verb,
            argument: Some(argument.into()),
        }
    }

    /// The statement as the remote console sees it.
    pub fn statement(&self) -> String {
        match &self.argument {
            Some(argument) => format!("feature:{} {}", self.verb, argument),
            None => format!("feature:{}", self.verb),
        }
    }
}

/// Assemble the full invocation line.
///
/// No escaping is performed beyond quoting the statement; callers must
/// supply arguments free of the quote character.
pub fn build_command_line(
    client_bin: &str,
    options: &ConnectionOptions,
    command: &ConsoleCommand,
) -> String {
    let mut line = String::from(client_bin);
    for arg in options.to_args() {
        line.push(' ');
        line.push_str(&arg);
    }
    line.push_str(" '");
    line.push_str(&command.statement());
    line.push('\'');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_options() -> ConnectionOptions {
        ConnectionOptions {
            host: Some("karaf.example.org".to_string()),
            port: Some("8101".to_string()),
            user: Some("smx".to_string()),
            password: Some("secret".to_string()),
            delay: Some("5".to_string()),
            retry: Some("3".to_string()),
        }
    }

    #[test]
    fn options_keep_fixed_order() {
        assert_eq!(
            full_options().to_args(),
            vec![
                "-h",
                "karaf.example.org",
                "-a",
                "8101",
                "-u",
                "smx",
                "-p",
                "secret",
                "-d",
                "5",
                "-r",
                "3"
            ]
        );
    }

    #[test]
    fn absent_options_are_omitted() {
        let options = ConnectionOptions {
            host: Some("localhost".to_string()),
            retry: Some("2".to_string()),
            ..ConnectionOptions::default()
        };
        assert_eq!(options.to_args(), vec!["-h", "localhost", "-r", "2"]);
        assert!(ConnectionOptions::default().to_args().is_empty());
    }

    #[test]
    fn statement_with_and_without_argument() {
        assert_eq!(
            ConsoleCommand::with_argument("install", "camel-jms/2.18.1").statement(),
            "feature:install camel-jms/2.18.1"
        );
        assert_eq!(ConsoleCommand::new("list").statement(), "feature:list");
    }

    #[test]
    fn command_line_quotes_the_statement() {
        let line = build_command_line(
            "/opt/karaf/bin/client",
            &ConnectionOptions {
                host: Some("localhost".to_string()),
                port: Some("8101".to_string()),
                ..ConnectionOptions::default()
            },
            &ConsoleCommand::with_argument("repo-add", "mvn:org.example/features/1.0/xml/features"),
        );
        assert_eq!(
            line,
            "/opt/karaf/bin/client -h localhost -a 8101 \
             'feature:repo-add mvn:org.example/features/1.0/xml/features'"
        );
    }
}
