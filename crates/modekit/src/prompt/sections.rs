//! Prompt sections and user instruction composition.

use serde::{Deserialize, Serialize};

use crate::prompt::template::WorkspaceFacts;

/// Context for composing a mode's effective custom instructions
///
/// Carries the workspace marker plus the externally supplied instruction
/// fragments (host settings, project rule files, ignore rules, preferred
/// language). The registry joins these only when `workspace_dir` is present;
/// reading them from storage is the host's job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextOptions {
    /// Active workspace directory; instruction joining is skipped when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_dir: Option<String>,

    /// Preferred response language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Instructions from host-level settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_instructions: Option<String>,

    /// Instructions from project rule files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_rules: Option<String>,

    /// Instructions describing files the assistant must not touch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_rules: Option<String>,
}

/// Join instruction fragments into a single block
///
/// Fragments are concatenated in a fixed order — language notice, global
/// instructions, the mode's own instructions, project rules, ignore rules —
/// each separated by a blank line, with empty fragments skipped.
///
/// # Example
///
/// ```
/// use modekit::prompt::{join_user_instructions, ContextOptions};
///
/// let context = ContextOptions {
///     global_instructions: Some("Prefer small commits.".to_string()),
///     ..Default::default()
/// };
/// let joined = join_user_instructions(&context, "Write tests first.");
/// assert_eq!(joined, "Prefer small commits.\n\nWrite tests first.");
/// ```
pub fn join_user_instructions(context: &ContextOptions, base_instructions: &str) -> String {
    let language_notice = context.language.as_deref().map(|language| {
        format!(
            "You should always speak and think in the {language} language unless given \
             instructions to do otherwise."
        )
    });

    let fragments = [
        language_notice.as_deref(),
        context.global_instructions.as_deref(),
        Some(base_instructions),
        context.project_rules.as_deref(),
        context.ignore_rules.as_deref(),
    ];

    fragments
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<&str>>()
        .join("\n\n")
}

/// The SYSTEM INFORMATION prompt section
///
/// Environment detection is the host's responsibility; the section only
/// renders the facts it is handed.
pub fn system_info_section(facts: &WorkspaceFacts) -> String {
    format!(
        "====

SYSTEM INFORMATION

Operating System: {os}
Default Shell: {shell}
Home Directory: {home}
Current Workspace Directory: {workspace}

The Current Workspace Directory is the active project directory, and is therefore the default \
directory for all tool operations. New terminals will be created in the current workspace \
directory; changing directories in a terminal does not modify the workspace directory.",
        os = facts.os_name,
        shell = facts.shell,
        home = facts.home_dir,
        workspace = facts.workspace_dir,
    )
}

/// The CAPABILITIES prompt section
///
/// The browser and MCP sentences appear only when the corresponding
/// capability is available in the session.
pub fn capabilities_section(supports_browser: bool, has_mcp_servers: bool) -> String {
    let mut section = String::from(
        "====

CAPABILITIES

- You have access to tools that let you execute CLI commands on the user's computer",
    );

    if supports_browser {
        section.push_str(", use the browser");
    }

    section.push_str(
        ", write and edit files, and ask follow-up questions. These tools help you effectively \
         accomplish a wide range of tasks, such as writing code, making edits or improvements to \
         existing files, and performing system operations.
- You can use the execute_command tool to run commands on the user's computer whenever you feel \
         it can help accomplish the user's task. When you need to execute a CLI command, you must \
         provide a clear explanation of what the command does.",
    );

    if supports_browser {
        section.push_str(
            "\n- You can use the browser_action tool to interact with websites through a \
             controlled browser when you feel it is necessary in accomplishing the user's task. \
             This tool lets you launch a browser, navigate to pages, interact with elements \
             through clicks and keyboard input, and capture the results through screenshots and \
             console logs.",
        );
    }

    if has_mcp_servers {
        section.push_str(
            "\n- You have access to MCP servers that may provide additional tools and resources. \
             Each server may provide different capabilities that you can use to accomplish tasks \
             more effectively.",
        );
    }

    section
}
