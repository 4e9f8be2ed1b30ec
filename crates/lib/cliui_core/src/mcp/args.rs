//! Argument lists for the tool's `mcp` subcommands.

use super::GatewayError;
use crate::models::mcp::{McpServerDescriptor, ServerTransport};

/// Reject names the tool could misread as a flag.
pub fn validate_name(name: &str) -> Result<(), GatewayError> {
    if name.trim().is_empty() {
        return Err(GatewayError::Validation("Server name is required".into()));
    }
    if name.starts_with('-') {
        return Err(GatewayError::Validation(
            "Server name must not start with '-'".into(),
        ));
    }
    Ok(())
}

/// Check a descriptor before anything is sent to the tool.
pub fn validate_descriptor(descriptor: &McpServerDescriptor) -> Result<(), GatewayError> {
    validate_name(&descriptor.name)?;
    match &descriptor.transport {
        ServerTransport::Stdio { command, .. } if command.trim().is_empty() => Err(
            GatewayError::Validation("A command is required for stdio servers".into()),
        ),
        ServerTransport::Http { url, .. } | ServerTransport::Sse { url, .. }
            if url.trim().is_empty() =>
        {
            Err(GatewayError::Validation(format!(
                "A URL is required for {} servers",
                descriptor.transport.kind().as_str()
            )))
        }
        _ => Ok(()),
    }
}

/// `add` arguments for a descriptor.
///
/// - stdio: `add <name> [-e KEY=VALUE]… <command> [args…]`
/// - http/sse: `add --transport <kind> <name> <url> [--header "Key: Value"]…`
pub fn add_args(descriptor: &McpServerDescriptor) -> Vec<String> {
    let mut args = vec!["add".to_string()];
    match &descriptor.transport {
        ServerTransport::Stdio { command, args: cmd_args, env } => {
            args.push(descriptor.name.clone());
            for (key, value) in env {
                args.push("-e".to_string());
                args.push(format!("{key}={value}"));
            }
            args.push(command.clone());
            args.extend(cmd_args.iter().cloned());
        }
        ServerTransport::Http { url, headers } | ServerTransport::Sse { url, headers } => {
            args.push("--transport".to_string());
            args.push(descriptor.transport.kind().as_str().to_string());
            args.push(descriptor.name.clone());
            args.push(url.clone());
            for (key, value) in headers {
                args.push("--header".to_string());
                args.push(format!("{key}: {value}"));
            }
        }
    }
    args
}

/// `remove <name>`.
pub fn remove_args(name: &str) -> Vec<String> {
    vec!["remove".to_string(), name.to_string()]
}

/// `get <name>`.
pub fn get_args(name: &str) -> Vec<String> {
    vec!["get".to_string(), name.to_string()]
}

/// `list`.
pub fn list_args() -> Vec<String> {
    vec!["list".to_string()]
}
