//! Route paths served by the router.

pub const GET_HEALTH: &str = "/health";

pub const GET_AUTH_STATUS: &str = "/auth/status";
pub const POST_AUTH_REGISTER: &str = "/auth/register";
pub const POST_AUTH_LOGIN: &str = "/auth/login";
pub const GET_AUTH_USER: &str = "/auth/user";
pub const POST_AUTH_LOGOUT: &str = "/auth/logout";

pub const GET_MCP_CLI_LIST: &str = "/mcp/cli/list";
pub const POST_MCP_CLI_ADD: &str = "/mcp/cli/add";
pub const DELETE_MCP_CLI_REMOVE_NAME: &str = "/mcp/cli/remove/{name}";
pub const GET_MCP_CLI_GET_NAME: &str = "/mcp/cli/get/{name}";

pub const GET_SESSIONS: &str = "/sessions";
/// `GET` reads the transcript, `POST` appends a message.
pub const SESSIONS_ID_MESSAGES: &str = "/sessions/{id}/messages";
pub const GET_SESSIONS_ID_CONTEXT: &str = "/sessions/{id}/context";
