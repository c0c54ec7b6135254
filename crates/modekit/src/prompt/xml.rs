//! XML escaping and tool-provider metadata serialization.

use serde::{Deserialize, Serialize};

/// Escape text for inclusion in XML content or attribute values
///
/// Replaces the five XML-sensitive characters (`<`, `>`, `&`, `'`, `"`) with
/// their entity references.
///
/// # Example
///
/// ```
/// use modekit::prompt::escape_xml;
///
/// assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
/// ```
pub fn escape_xml(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Connection status of an MCP server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    /// Server is connected and its tools are usable
    Connected,
    /// Connection attempt in progress
    Connecting,
    /// Server is not connected
    Disconnected,
}

/// A tool exposed by an MCP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolInfo {
    /// Tool name identifier
    pub name: String,
    /// Optional tool description
    #[serde(default)]
    pub description: Option<String>,
    /// Optional JSON schema for tool input
    #[serde(default)]
    pub input_schema: Option<serde_json::Value>,
}

/// A parameterized resource exposed by an MCP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResourceTemplate {
    /// URI template with placeholders
    pub uri_template: String,
    /// Template name
    pub name: String,
    /// Optional template description
    #[serde(default)]
    pub description: Option<String>,
}

/// A directly addressable resource exposed by an MCP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResource {
    /// Resource URI
    pub uri: String,
    /// Resource name
    pub name: String,
    /// Optional resource description
    #[serde(default)]
    pub description: Option<String>,
}

/// Metadata describing a configured MCP server
///
/// Connection management lives in the host application; this record is the
/// snapshot it hands over for prompt assembly.
///
/// # Example
///
/// ```
/// use modekit::prompt::{McpServerInfo, ServerStatus};
///
/// let server = McpServerInfo {
///     name: "filesystem".to_string(),
///     command: "npx".to_string(),
///     args: vec!["mcp-server-filesystem".to_string()],
///     status: ServerStatus::Connected,
///     tools: vec![],
///     resource_templates: vec![],
///     resources: vec![],
/// };
/// assert_eq!(server.command_line(), "npx mcp-server-filesystem");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerInfo {
    /// Server name identifier
    pub name: String,
    /// Executable the server was launched with
    pub command: String,
    /// Arguments passed to the executable
    #[serde(default)]
    pub args: Vec<String>,
    /// Current connection status
    pub status: ServerStatus,
    /// Tools the server exposes
    #[serde(default)]
    pub tools: Vec<McpToolInfo>,
    /// Resource templates the server exposes
    #[serde(default)]
    pub resource_templates: Vec<McpResourceTemplate>,
    /// Direct resources the server exposes
    #[serde(default)]
    pub resources: Vec<McpResource>,
}

impl McpServerInfo {
    /// The command-line invocation string shown in the prompt
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

/// Serialize connected MCP servers into the prompt's XML fragment
///
/// Servers that are not [`ServerStatus::Connected`] are omitted. When no
/// server is connected the fragment is a single placeholder element so the
/// prompt still renders something meaningful in that slot. All names,
/// descriptions, and invocation strings are XML-escaped; tool input schemas
/// are embedded as pretty-printed JSON inside CDATA sections.
///
/// # Example
///
/// ```
/// use modekit::prompt::mcp_server_list_xml;
///
/// let xml = mcp_server_list_xml(&[]);
/// assert!(xml.contains("No MCP servers currently connected"));
/// ```
pub fn mcp_server_list_xml(servers: &[McpServerInfo]) -> String {
    let connected: Vec<&McpServerInfo> = servers
        .iter()
        .filter(|server| server.status == ServerStatus::Connected)
        .collect();

    if connected.is_empty() {
        return "    <no_mcp_servers_connected_message>No MCP servers currently connected\
                </no_mcp_servers_connected_message>"
            .to_string();
    }

    connected
        .iter()
        .map(|server| server_xml(server))
        .collect::<Vec<String>>()
        .join("\n")
}

fn server_xml(server: &McpServerInfo) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "    <mcp_server name=\"{}\" command_line_invocation=\"{}\">",
        escape_xml(&server.name),
        escape_xml(&server.command_line())
    ));

    if !server.tools.is_empty() {
        lines.push("        <available_tools>".to_string());
        for tool in &server.tools {
            lines.push(format!("            <tool name=\"{}\">", escape_xml(&tool.name)));
            lines.push(format!(
                "                <description>{}</description>",
                escape_xml(tool.description.as_deref().unwrap_or_default())
            ));
            if let Some(schema) = &tool.input_schema {
                let pretty = serde_json::to_string_pretty(schema).unwrap_or_default();
                lines.push(format!(
                    "                <input_schema><![CDATA[\n{pretty}\n                ]]></input_schema>"
                ));
            }
            lines.push("            </tool>".to_string());
        }
        lines.push("        </available_tools>".to_string());
    }

    if !server.resource_templates.is_empty() {
        lines.push("        <resource_templates>".to_string());
        for template in &server.resource_templates {
            lines.push(format!(
                "            <resource_template uri_template=\"{}\" name=\"{}\">",
                escape_xml(&template.uri_template),
                escape_xml(&template.name)
            ));
            lines.push(format!(
                "                <description>{}</description>",
                escape_xml(template.description.as_deref().unwrap_or_default())
            ));
            lines.push("            </resource_template>".to_string());
        }
        lines.push("        </resource_templates>".to_string());
    }

    if !server.resources.is_empty() {
        lines.push("        <direct_resources>".to_string());
        for resource in &server.resources {
            lines.push(format!(
                "            <direct_resource uri=\"{}\" name=\"{}\">",
                escape_xml(&resource.uri),
                escape_xml(&resource.name)
            ));
            lines.push(format!(
                "                <description>{}</description>",
                escape_xml(resource.description.as_deref().unwrap_or_default())
            ));
            lines.push("            </direct_resource>".to_string());
        }
        lines.push("        </direct_resources>".to_string());
    }

    lines.push("    </mcp_server>".to_string());
    lines.join("\n")
}
