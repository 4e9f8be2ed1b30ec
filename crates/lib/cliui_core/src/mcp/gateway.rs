//! The gateway: one tool invocation per logical operation.

use std::sync::Arc;

use tracing::{info, warn};

use super::args;
use super::parser::{OutputParser, TextOutputParser};
use super::runner::{ToolOutput, ToolRunner};
use super::GatewayError;
use crate::models::mcp::{CommandOutcome, McpServerDescriptor, ServerListing, ServerLookup};

/// Relays MCP server management to the external tool.
#[derive(Clone)]
pub struct McpCliGateway {
    runner: Arc<dyn ToolRunner>,
    parser: Arc<dyn OutputParser>,
}

impl McpCliGateway {
    /// Gateway using the default text parser.
    pub fn new(runner: Arc<dyn ToolRunner>) -> Self {
        Self::with_parser(runner, Arc::new(TextOutputParser))
    }

    pub fn with_parser(runner: Arc<dyn ToolRunner>, parser: Arc<dyn OutputParser>) -> Self {
        Self { runner, parser }
    }

    /// `mcp list`.
    pub async fn list_servers(&self) -> Result<ServerListing, GatewayError> {
        let output = self.invoke(&args::list_args()).await?;
        let servers = self.parser.parse_list(&output.stdout);
        info!(count = servers.len(), "listed MCP servers");
        Ok(ServerListing {
            raw_output: output.stdout,
            servers,
        })
    }

    /// `mcp add …`.
    pub async fn add_server(
        &self,
        descriptor: &McpServerDescriptor,
    ) -> Result<CommandOutcome, GatewayError> {
        args::validate_descriptor(descriptor)?;
        let output = self.invoke(&args::add_args(descriptor)).await?;
        info!(
            name = %descriptor.name,
            transport = descriptor.transport.kind().as_str(),
            "added MCP server"
        );
        Ok(CommandOutcome {
            raw_output: output.stdout,
            message: format!("MCP server \"{}\" added successfully", descriptor.name),
        })
    }

    /// `mcp remove <name>`.
    pub async fn remove_server(&self, name: &str) -> Result<CommandOutcome, GatewayError> {
        args::validate_name(name)?;
        let output = self.invoke(&args::remove_args(name)).await?;
        info!(name, "removed MCP server");
        Ok(CommandOutcome {
            raw_output: output.stdout,
            message: format!("MCP server \"{name}\" removed successfully"),
        })
    }

    /// `mcp get <name>`.
    pub async fn get_server(&self, name: &str) -> Result<ServerLookup, GatewayError> {
        args::validate_name(name)?;
        let output = self.invoke(&args::get_args(name)).await?;
        let server = self.parser.parse_get(&output.stdout);
        Ok(ServerLookup {
            raw_output: output.stdout,
            server,
        })
    }

    async fn invoke(&self, args: &[String]) -> Result<ToolOutput, GatewayError> {
        let output = self.runner.run(args).await?;
        if !output.success {
            let details = output.failure_details();
            warn!(subcommand = args.first().map(String::as_str), %details, "external tool failed");
            return Err(GatewayError::ToolFailed { details });
        }
        Ok(output)
    }
}
