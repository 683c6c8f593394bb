//! Lookups backed by the system `dig` and `whois` programs.

use async_trait::async_trait;
use ipprov_core::Address;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::error::{ReconError, ReconResult};
use crate::lookup::LookupService;

/// Default per-lookup timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs `dig +short -x <addr>` and `whois <addr>` as child processes.
#[derive(Debug, Clone)]
pub struct CommandLookup {
    dig: String,
    whois: String,
    timeout: Duration,
}

impl Default for CommandLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLookup {
    /// Use `dig` and `whois` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dig: String::from("dig"),
            whois: String::from("whois"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use specific programs for the two lookups.
    #[must_use]
    pub fn with_programs(mut self, dig: impl Into<String>, whois: impl Into<String>) -> Self {
        self.dig = dig.into();
        self.whois = whois.into();
        self
    }

    /// Kill a lookup that runs longer than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, program: &str, args: &[&str]) -> ReconResult<Output> {
        debug!(program, ?args, "running lookup");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output();

        tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| ReconError::Timeout {
                program: program.to_string(),
                timeout: self.timeout,
            })?
            .map_err(|source| ReconError::Spawn {
                program: program.to_string(),
                source,
            })
    }
}

#[async_trait]
impl LookupService for CommandLookup {
    async fn reverse_dns(&self, addr: &Address) -> ReconResult<String> {
        let ip = addr.to_string();
        let output = self.run(&self.dig, &["+short", "-x", ip.as_str()]).await?;
        if !output.status.success() {
            return Err(ReconError::ExitStatus {
                program: self.dig.clone(),
                code: output.status.code(),
            });
        }
        // NXDOMAIN is a successful, empty answer
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn whois(&self, addr: &Address) -> ReconResult<String> {
        let ip = addr.to_string();
        let output = self.run(&self.whois, &[ip.as_str()]).await?;
        // Exit status varies between whois clients; the text is what counts.
        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if text.trim().is_empty() {
            return Err(ReconError::EmptyResponse(self.whois.clone()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> Address {
        "203.0.113.9".parse().unwrap()
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let lookup = CommandLookup::new()
            .with_programs("ipprov-no-such-dig", "ipprov-no-such-whois");
        let err = tokio_test::block_on(lookup.reverse_dns(&addr())).unwrap_err();
        assert!(matches!(err, ReconError::Spawn { ref program, .. } if program == "ipprov-no-such-dig"));
        let err = tokio_test::block_on(lookup.whois(&addr())).unwrap_err();
        assert!(matches!(err, ReconError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_and_empty_output() {
        let lookup = CommandLookup::new().with_programs("false", "true");
        assert!(matches!(
            lookup.reverse_dns(&addr()).await,
            Err(ReconError::ExitStatus { code: Some(1), .. })
        ));
        assert!(matches!(
            lookup.whois(&addr()).await,
            Err(ReconError::EmptyResponse(_))
        ));

        // `true` succeeds with no output: an answered, empty PTR set
        let lookup = CommandLookup::new().with_programs("true", "true");
        assert_eq!(lookup.reverse_dns(&addr()).await.unwrap(), "");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_echo_returns_stdout() {
        let lookup = CommandLookup::new().with_programs("echo", "echo");
        assert_eq!(lookup.reverse_dns(&addr()).await.unwrap(), "+short -x 203.0.113.9\n");
        assert_eq!(lookup.whois(&addr()).await.unwrap(), "203.0.113.9\n");
    }
}
