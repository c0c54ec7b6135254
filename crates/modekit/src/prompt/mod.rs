//! System prompt assembly.
//!
//! This module builds the natural-language system prompt from pieces the host
//! application supplies. It owns no I/O: templates, environment facts, and
//! tool-provider metadata all arrive as arguments, and the output is a plain
//! string for the host to ship.
//!
//! Three concerns live here:
//!
//! - **Placeholder substitution** - [`render_system_prompt`] splices
//!   environment facts, the MCP server fragment, and optional browser
//!   fragments into the main template
//! - **Metadata serialization** - [`mcp_server_list_xml`] turns connected
//!   MCP server metadata into the XML fragment embedded in the prompt, with
//!   [`escape_xml`] handling entity escaping
//! - **Sections and instructions** - [`system_info_section`],
//!   [`capabilities_section`], and [`join_user_instructions`] compose the
//!   fixed prompt sections and the user instruction block
//!
//! # Example
//!
//! ```
//! use modekit::prompt::{render_system_prompt, SystemPromptParts, WorkspaceFacts};
//!
//! let parts = SystemPromptParts {
//!     main: "You work in __WORKSPACE_DIR__.\n__MCP_SERVER_LIST__".to_string(),
//!     ..Default::default()
//! };
//! let facts = WorkspaceFacts {
//!     workspace_dir: "/work/app".to_string(),
//!     os_name: "Linux".to_string(),
//!     shell: "bash".to_string(),
//!     home_dir: "/home/dev".to_string(),
//! };
//!
//! let prompt = render_system_prompt(&parts, &facts, &[], None);
//! assert!(prompt.starts_with("You work in /work/app."));
//! ```

mod sections;
mod template;
mod xml;

pub use sections::{capabilities_section, join_user_instructions, system_info_section, ContextOptions};
pub use template::{
    render_system_prompt, BrowserSettings, SystemPromptParts, WorkspaceFacts,
    BROWSER_CAPABILITIES_PLACEHOLDER, BROWSER_CONFIRMATION_PLACEHOLDER, BROWSER_TOOL_PLACEHOLDER,
    BROWSER_USAGE_PLACEHOLDER, HOME_DIR_PLACEHOLDER, MCP_SERVER_LIST_PLACEHOLDER,
    OS_NAME_PLACEHOLDER, SHELL_PLACEHOLDER, VIEWPORT_HEIGHT_PLACEHOLDER,
    VIEWPORT_WIDTH_PLACEHOLDER, WORKSPACE_DIR_PLACEHOLDER,
};
pub use xml::{
    escape_xml, mcp_server_list_xml, McpResource, McpResourceTemplate, McpServerInfo, McpToolInfo,
    ServerStatus,
};
