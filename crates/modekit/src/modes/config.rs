//! Mode records and the built-in mode table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::tools::ToolGroup;

/// Restriction options attached to a group grant
///
/// An edit grant carrying a `file_regex` only covers file paths matching the
/// pattern; the optional `description` is surfaced in restriction errors.
///
/// # Example
///
/// ```
/// use modekit::modes::GroupOptions;
///
/// let options = GroupOptions {
///     file_regex: Some("\\.md$".to_string()),
///     description: Some("Markdown files only".to_string()),
/// };
/// assert!(options.file_regex.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupOptions {
    /// File path pattern limiting which files the grant covers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_regex: Option<String>,

    /// Human-readable description of the restriction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A tool-group grant in a mode's `groups` list
///
/// Either a bare group reference or a group paired with restriction options.
/// The position of an entry matters: the permission resolver scans entries in
/// declared order and the first entry whose group contains the requested tool
/// decides the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    /// The granted tool group
    pub group: ToolGroup,

    /// Restriction options scoping the grant, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GroupOptions>,
}

impl GroupEntry {
    /// Grant a group without restrictions
    pub fn bare(group: ToolGroup) -> Self {
        Self {
            group,
            options: None,
        }
    }

    /// Grant a group scoped by restriction options
    pub fn with_options(group: ToolGroup, options: GroupOptions) -> Self {
        Self {
            group,
            options: Some(options),
        }
    }
}

/// A named persona and tool-permission profile
///
/// Built-in modes are fixed at startup; custom modes are supplied at runtime
/// and either override a built-in slug or add a new mode. Slugs are unique
/// within the effective (merged) mode set — a custom mode sharing a built-in
/// slug fully replaces it.
///
/// # Example
///
/// ```
/// use modekit::modes::{GroupEntry, ModeConfig};
/// use modekit::tools::ToolGroup;
///
/// let mode = ModeConfig {
///     slug: "reviewer".to_string(),
///     name: "🔍 Reviewer".to_string(),
///     role_definition: "You are Kit, a meticulous code reviewer.".to_string(),
///     when_to_use: None,
///     custom_instructions: None,
///     groups: vec![GroupEntry::bare(ToolGroup::Read)],
/// };
/// assert_eq!(mode.slug, "reviewer");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeConfig {
    /// Unique stable identifier
    pub slug: String,

    /// Display label
    pub name: String,

    /// Persona text placed at the top of the assembled system prompt
    pub role_definition: String,

    /// Guidance on when this mode should be selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when_to_use: Option<String>,

    /// Mode-specific instruction text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,

    /// Granted tool groups, in evaluation order
    pub groups: Vec<GroupEntry>,
}

/// Field-level prompt overrides for a single mode
///
/// Hosts may override the prompt-facing fields of a mode without redefining
/// the mode itself. An absent or empty field falls through to the mode's own
/// value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptComponent {
    /// Override for the mode's persona text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_definition: Option<String>,

    /// Override for the mode's selection guidance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when_to_use: Option<String>,

    /// Override for the mode's instruction text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
}

/// Prompt overrides keyed by mode slug
pub type CustomModePrompts = HashMap<String, PromptComponent>;

/// The built-in mode table, in display order
///
/// The first entry is the default mode.
pub(crate) fn builtin_modes() -> Vec<ModeConfig> {
    vec![
        ModeConfig {
            slug: "code".to_string(),
            name: "💻 Code".to_string(),
            role_definition: "You are Kit, a highly skilled software engineer with extensive \
                knowledge in many programming languages, frameworks, design patterns, and best \
                practices."
                .to_string(),
            when_to_use: None,
            custom_instructions: None,
            groups: vec![
                GroupEntry::bare(ToolGroup::Read),
                GroupEntry::bare(ToolGroup::Edit),
                GroupEntry::bare(ToolGroup::Browser),
                GroupEntry::bare(ToolGroup::Command),
                GroupEntry::bare(ToolGroup::Mcp),
            ],
        },
        ModeConfig {
            slug: "architect".to_string(),
            name: "🏗️ Architect".to_string(),
            role_definition: "You are Kit, an experienced technical leader who is inquisitive \
                and an excellent planner. Your goal is to gather information and get context to \
                create a detailed plan for accomplishing the user's task, which the user will \
                review and approve before they switch into another mode to implement the \
                solution."
                .to_string(),
            when_to_use: None,
            custom_instructions: Some(
                "1. Analyze the task and the relevant parts of the project before proposing \
                 anything.\n2. Present a numbered, step-by-step plan and ask the user to approve \
                 it.\n3. Once every step is approved, write the final plan to a markdown \
                 document.\n4. Never implement the plan yourself; hand off to another mode after \
                 approval."
                    .to_string(),
            ),
            groups: vec![
                GroupEntry::bare(ToolGroup::Read),
                GroupEntry::with_options(
                    ToolGroup::Edit,
                    GroupOptions {
                        file_regex: Some("\\.md$".to_string()),
                        description: Some("Markdown files only".to_string()),
                    },
                ),
                GroupEntry::bare(ToolGroup::Browser),
                GroupEntry::bare(ToolGroup::Mcp),
            ],
        },
        ModeConfig {
            slug: "ask".to_string(),
            name: "❓ Ask".to_string(),
            role_definition: "You are Kit, a knowledgeable technical assistant focused on \
                answering questions and providing information about software development, \
                technology, and related topics."
                .to_string(),
            when_to_use: None,
            custom_instructions: Some(
                "You can analyze code, explain concepts, and access external resources. Always \
                 answer the user's questions thoroughly, and do not switch to implementing code \
                 unless explicitly requested by the user."
                    .to_string(),
            ),
            groups: vec![
                GroupEntry::bare(ToolGroup::Read),
                GroupEntry::bare(ToolGroup::Browser),
                GroupEntry::bare(ToolGroup::Mcp),
            ],
        },
        ModeConfig {
            slug: "debug".to_string(),
            name: "🪲 Debug".to_string(),
            role_definition: "You are Kit, an expert software debugger specializing in \
                systematic problem diagnosis and resolution."
                .to_string(),
            when_to_use: None,
            custom_instructions: Some(
                "Reflect on several possible sources of the problem, distill those down to the \
                 most likely ones, and add logs to validate your assumptions. Explicitly ask the \
                 user to confirm the diagnosis before fixing the problem."
                    .to_string(),
            ),
            groups: vec![
                GroupEntry::bare(ToolGroup::Read),
                GroupEntry::bare(ToolGroup::Edit),
                GroupEntry::bare(ToolGroup::Browser),
                GroupEntry::bare(ToolGroup::Command),
                GroupEntry::bare(ToolGroup::Mcp),
            ],
        },
        ModeConfig {
            slug: "orchestrator".to_string(),
            name: "🪃 Orchestrator".to_string(),
            role_definition: "You are Kit, a strategic workflow orchestrator who coordinates \
                complex tasks by delegating them to appropriate specialized modes. You have a \
                comprehensive understanding of each mode's capabilities and limitations, \
                allowing you to effectively break down complex problems into discrete tasks that \
                can be solved by different specialists."
                .to_string(),
            when_to_use: None,
            custom_instructions: Some(
                "Break complex tasks into subtasks and delegate each one to the most appropriate \
                 mode with complete, self-contained instructions. Track subtask results, explain \
                 how they fit together, and synthesize an overview once all subtasks are done."
                    .to_string(),
            ),
            groups: vec![],
        },
    ]
}
