//! Placeholder substitution for system prompt templates.

use serde::{Deserialize, Serialize};

use crate::prompt::xml::{escape_xml, mcp_server_list_xml, McpServerInfo};

/// Placeholder for the workspace directory
pub const WORKSPACE_DIR_PLACEHOLDER: &str = "__WORKSPACE_DIR__";
/// Placeholder for the operating system name
pub const OS_NAME_PLACEHOLDER: &str = "__OS_NAME__";
/// Placeholder for the default shell
pub const SHELL_PLACEHOLDER: &str = "__SHELL__";
/// Placeholder for the user's home directory
pub const HOME_DIR_PLACEHOLDER: &str = "__HOME_DIR__";
/// Placeholder for the MCP server list XML fragment
pub const MCP_SERVER_LIST_PLACEHOLDER: &str = "__MCP_SERVER_LIST__";
/// Placeholder for the browser tool definition fragment
pub const BROWSER_TOOL_PLACEHOLDER: &str = "__BROWSER_TOOL_DEFINITION__";
/// Placeholder for the browser capabilities fragment
pub const BROWSER_CAPABILITIES_PLACEHOLDER: &str = "__BROWSER_CAPABILITIES__";
/// Placeholder for the browser usage notes fragment
pub const BROWSER_USAGE_PLACEHOLDER: &str = "__BROWSER_USAGE_NOTES__";
/// Placeholder for the browser confirmation rule fragment
pub const BROWSER_CONFIRMATION_PLACEHOLDER: &str = "__BROWSER_CONFIRMATION_RULE__";
/// Placeholder for the browser viewport width
pub const VIEWPORT_WIDTH_PLACEHOLDER: &str = "__VIEWPORT_WIDTH__";
/// Placeholder for the browser viewport height
pub const VIEWPORT_HEIGHT_PLACEHOLDER: &str = "__VIEWPORT_HEIGHT__";

/// Environment facts substituted into prompt templates
///
/// The host detects these; this crate only substitutes them. All values are
/// XML-escaped before insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceFacts {
    /// Active workspace directory, POSIX style
    pub workspace_dir: String,
    /// Operating system name
    pub os_name: String,
    /// Default shell
    pub shell: String,
    /// User home directory, POSIX style
    pub home_dir: String,
}

/// Browser viewport configuration substituted into the browser tool fragment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BrowserSettings {
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            viewport_width: 900,
            viewport_height: 600,
        }
    }
}

/// The template fragments a system prompt is assembled from
///
/// The host loads these from wherever it keeps its prompt assets; this crate
/// never touches the filesystem. The `main` template carries the placeholders
/// listed in this module; the browser fragments are spliced into it only when
/// browser use is supported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemPromptParts {
    /// Main template containing the substitution placeholders
    pub main: String,
    /// Browser tool definition fragment (may contain viewport placeholders)
    pub browser_tool_definition: String,
    /// Browser capabilities summary fragment
    pub browser_capabilities: String,
    /// Browser usage notes fragment
    pub browser_usage_notes: String,
    /// Browser confirmation rule fragment
    pub browser_confirmation_rule: String,
}

/// Assemble a system prompt from template parts
///
/// Substitutes every occurrence of each placeholder:
///
/// - environment facts (`__WORKSPACE_DIR__`, `__OS_NAME__`, `__SHELL__`,
///   `__HOME_DIR__`), XML-escaped
/// - the MCP server list fragment (`__MCP_SERVER_LIST__`), serialized from
///   `servers`
/// - the browser fragments, spliced in when `browser` is `Some` (with viewport
///   dimensions substituted into the tool definition) and cleared to empty
///   strings otherwise
///
/// # Example
///
/// ```
/// use modekit::prompt::{render_system_prompt, SystemPromptParts, WorkspaceFacts};
///
/// let parts = SystemPromptParts {
///     main: "Workspace: __WORKSPACE_DIR__".to_string(),
///     ..Default::default()
/// };
/// let facts = WorkspaceFacts {
///     workspace_dir: "/home/user/project".to_string(),
///     os_name: "Linux".to_string(),
///     shell: "bash".to_string(),
///     home_dir: "/home/user".to_string(),
/// };
///
/// let prompt = render_system_prompt(&parts, &facts, &[], None);
/// assert_eq!(prompt, "Workspace: /home/user/project");
/// ```
pub fn render_system_prompt(
    parts: &SystemPromptParts,
    facts: &WorkspaceFacts,
    servers: &[McpServerInfo],
    browser: Option<&BrowserSettings>,
) -> String {
    let mut prompt = parts.main.clone();

    prompt = prompt.replace(WORKSPACE_DIR_PLACEHOLDER, &escape_xml(&facts.workspace_dir));
    prompt = prompt.replace(OS_NAME_PLACEHOLDER, &escape_xml(&facts.os_name));
    prompt = prompt.replace(SHELL_PLACEHOLDER, &escape_xml(&facts.shell));
    prompt = prompt.replace(HOME_DIR_PLACEHOLDER, &escape_xml(&facts.home_dir));

    prompt = prompt.replace(MCP_SERVER_LIST_PLACEHOLDER, &mcp_server_list_xml(servers));

    match browser {
        Some(settings) => {
            let tool_definition = parts
                .browser_tool_definition
                .replace(VIEWPORT_WIDTH_PLACEHOLDER, &settings.viewport_width.to_string())
                .replace(VIEWPORT_HEIGHT_PLACEHOLDER, &settings.viewport_height.to_string());

            prompt = prompt.replace(BROWSER_TOOL_PLACEHOLDER, &tool_definition);
            prompt = prompt.replace(BROWSER_CAPABILITIES_PLACEHOLDER, &parts.browser_capabilities);
            prompt = prompt.replace(BROWSER_USAGE_PLACEHOLDER, &parts.browser_usage_notes);
            prompt = prompt.replace(
                BROWSER_CONFIRMATION_PLACEHOLDER,
                &parts.browser_confirmation_rule,
            );
        }
        None => {
            prompt = prompt.replace(BROWSER_TOOL_PLACEHOLDER, "");
            prompt = prompt.replace(BROWSER_CAPABILITIES_PLACEHOLDER, "");
            prompt = prompt.replace(BROWSER_USAGE_PLACEHOLDER, "");
            prompt = prompt.replace(BROWSER_CONFIRMATION_PLACEHOLDER, "");
        }
    }

    prompt
}
