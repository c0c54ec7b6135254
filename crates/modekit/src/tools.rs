//! Tool catalog: tool groups, always-available tools, and experiment gating
//!
//! This module defines the process-wide tool tables consumed by the mode
//! registry and the permission resolver:
//!
//! - **Tool groups** - named bundles of tool identifiers that modes grant as a
//!   unit (read, edit, browser, command, mcp)
//! - **Always-available tools** - tools permitted in every mode unconditionally
//! - **Experiments** - tool identifiers gated behind runtime experiment flags
//!
//! A [`ToolCatalog`] is built once at startup and passed by reference into the
//! components that consult it. It is never mutated afterwards; hosts that need
//! a different table construct their own catalog with [`ToolCatalog::builder`].
//!
//! # Example
//!
//! ```
//! use modekit::tools::{ToolCatalog, ToolGroup};
//!
//! let catalog = ToolCatalog::standard();
//!
//! assert!(catalog.tools_in_group(ToolGroup::Read).contains(&"read_file".to_string()));
//! assert!(catalog.is_always_available("attempt_completion"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named bundle of tool identifiers that modes grant as a unit
///
/// Group membership is defined by the [`ToolCatalog`]; a mode's `groups` list
/// references these variants, optionally scoped by
/// [`GroupOptions`](crate::modes::GroupOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolGroup {
    /// File and code inspection tools
    Read,
    /// File modification tools
    Edit,
    /// Browser automation tools
    Browser,
    /// Shell command execution
    Command,
    /// MCP tool and resource access
    Mcp,
}

impl ToolGroup {
    /// The lowercase identifier used in serialized configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolGroup::Read => "read",
            ToolGroup::Edit => "edit",
            ToolGroup::Browser => "browser",
            ToolGroup::Command => "command",
            ToolGroup::Mcp => "mcp",
        }
    }
}

/// Immutable tool tables consulted during permission resolution
///
/// Holds the group-to-tools mapping, the always-available tool set, and the
/// identifiers of experimental tools. Constructed once at startup — either the
/// [`standard`](ToolCatalog::standard) table or a host-supplied one via
/// [`builder`](ToolCatalog::builder) — and shared by reference.
///
/// # Example
///
/// ```
/// use modekit::tools::{ToolCatalog, ToolGroup};
///
/// let catalog = ToolCatalog::builder()
///     .group(ToolGroup::Read, vec!["read_file".to_string()])
///     .always_available(vec!["attempt_completion".to_string()])
///     .build();
///
/// assert_eq!(catalog.tools_in_group(ToolGroup::Read).len(), 1);
/// assert!(catalog.tools_in_group(ToolGroup::Edit).is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCatalog {
    groups: HashMap<ToolGroup, Vec<String>>,
    always_available: Vec<String>,
    experiments: Vec<String>,
}

impl ToolCatalog {
    /// The standard tool table used by the plugin
    pub fn standard() -> Self {
        let mut groups = HashMap::new();
        groups.insert(
            ToolGroup::Read,
            vec![
                "read_file".to_string(),
                "search_files".to_string(),
                "list_files".to_string(),
                "list_code_definition_names".to_string(),
                "codebase_search".to_string(),
            ],
        );
        groups.insert(
            ToolGroup::Edit,
            vec![
                "apply_diff".to_string(),
                "write_to_file".to_string(),
                "insert_content".to_string(),
                "search_and_replace".to_string(),
            ],
        );
        groups.insert(ToolGroup::Browser, vec!["browser_action".to_string()]);
        groups.insert(ToolGroup::Command, vec!["execute_command".to_string()]);
        groups.insert(
            ToolGroup::Mcp,
            vec![
                "use_mcp_tool".to_string(),
                "access_mcp_resource".to_string(),
            ],
        );

        Self {
            groups,
            always_available: vec![
                "ask_followup_question".to_string(),
                "attempt_completion".to_string(),
                "switch_mode".to_string(),
                "new_task".to_string(),
            ],
            experiments: vec![
                "insert_content".to_string(),
                "search_and_replace".to_string(),
            ],
        }
    }

    /// Create a new builder for a custom catalog
    pub fn builder() -> ToolCatalogBuilder {
        ToolCatalogBuilder::default()
    }

    /// The tool identifiers granted by a group
    ///
    /// Returns an empty slice for groups the catalog does not define.
    pub fn tools_in_group(&self, group: ToolGroup) -> &[String] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The tools granted in every mode unconditionally
    pub fn always_available(&self) -> &[String] {
        &self.always_available
    }

    /// Whether a tool is permitted in every mode unconditionally
    pub fn is_always_available(&self, tool: &str) -> bool {
        self.always_available.iter().any(|t| t == tool)
    }

    /// Whether a tool is gated behind an experiment flag
    pub fn is_experimental(&self, tool: &str) -> bool {
        self.experiments.iter().any(|t| t == tool)
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for [`ToolCatalog`]
///
/// # Example
///
/// ```
/// use modekit::tools::{ToolCatalog, ToolGroup};
///
/// let catalog = ToolCatalog::builder()
///     .group(ToolGroup::Command, vec!["execute_command".to_string()])
///     .experiments(vec!["execute_command".to_string()])
///     .build();
///
/// assert!(catalog.is_experimental("execute_command"));
/// ```
#[derive(Debug, Default)]
pub struct ToolCatalogBuilder {
    groups: HashMap<ToolGroup, Vec<String>>,
    always_available: Vec<String>,
    experiments: Vec<String>,
}

impl ToolCatalogBuilder {
    /// Set the tools granted by a group
    pub fn group(mut self, group: ToolGroup, tools: Vec<String>) -> Self {
        self.groups.insert(group, tools);
        self
    }

    /// Set the always-available tool list
    pub fn always_available(mut self, tools: Vec<String>) -> Self {
        self.always_available = tools;
        self
    }

    /// Set the experimental tool identifiers
    pub fn experiments(mut self, tools: Vec<String>) -> Self {
        self.experiments = tools;
        self
    }

    /// Build the catalog
    pub fn build(self) -> ToolCatalog {
        ToolCatalog {
            groups: self.groups,
            always_available: self.always_available,
            experiments: self.experiments,
        }
    }
}
