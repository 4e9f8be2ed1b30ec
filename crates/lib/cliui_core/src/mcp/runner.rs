//! Subprocess execution of the external tool.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;
use tracing::debug;

use super::GatewayError;

/// Subcommand under which the tool exposes MCP server management.
const MCP_SUBCOMMAND: &str = "mcp";

/// Absolute host paths (`/…`, `~/…`, `C:\…`) at the start of a word.
/// URLs are left alone: their slashes follow a scheme, not a boundary.
static HOST_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(^|[\s'"(=,])(?:~?/|[A-Za-z]:\\)[^\s'"(),]*"#)
        .expect("host path regex is valid")
});

/// Placeholder substituted for scrubbed paths.
const PATH_PLACEHOLDER: &str = "<path>";

/// Captured result of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Diagnostic text for a failed run: stderr, or stdout when stderr is
    /// empty, with host paths replaced by a placeholder.
    pub fn failure_details(&self) -> String {
        let stderr = self.stderr.trim();
        let text = if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        };
        scrub_host_paths(text)
    }
}

/// Replace absolute file-system paths in tool output.
pub fn scrub_host_paths(text: &str) -> String {
    HOST_PATH
        .replace_all(text, format!("${{1}}{PATH_PLACEHOLDER}").as_str())
        .into_owned()
}

/// Runs `mcp <args…>` against the external tool.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, args: &[String]) -> Result<ToolOutput, GatewayError>;
}

/// Spawns the tool as a child process.
///
/// Every argument is passed as a discrete argv entry; nothing goes through
/// a shell. The child is killed if the awaiting future is dropped.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
    leading_args: Vec<OsString>,
}

impl ProcessRunner {
    /// Create a runner for `program`, e.g. `gemini`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Arguments placed before the `mcp` subcommand, e.g. a script path
    /// when `program` is an interpreter.
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, args: &[String]) -> Result<ToolOutput, GatewayError> {
        debug!(subcommand = args.first().map(String::as_str), "invoking external tool");

        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .arg(MCP_SUBCOMMAND)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;

        debug!(status = %output.status, "external tool exited");

        Ok(ToolOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
