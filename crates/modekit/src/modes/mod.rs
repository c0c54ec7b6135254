//! Mode registry: persona/tool-permission profiles and their resolution.
//!
//! A **mode** pairs a persona with an ordered list of tool-group grants.
//! Built-in modes are fixed at startup; hosts supply **custom modes** per call
//! to override or extend them, and **prompt overrides** to replace individual
//! prompt-facing fields without redefining a mode.
//!
//! # Resolution rules
//!
//! - A custom mode with a built-in slug fully replaces the built-in mode.
//! - [`ModeRegistry::merge_all`] keeps built-in positions for overridden slugs
//!   and appends novel slugs at the end.
//! - [`ModeRegistry::effective_details`] layers prompt overrides over the
//!   resolved base mode and composes the effective custom instructions from
//!   workspace context.
//!
//! # Example
//!
//! ```
//! use modekit::modes::{GroupEntry, ModeConfig, ModeRegistry};
//! use modekit::tools::ToolGroup;
//!
//! let registry = ModeRegistry::new();
//!
//! let custom = vec![ModeConfig {
//!     slug: "code".to_string(),
//!     name: "My Code".to_string(),
//!     role_definition: "You are a careful engineer.".to_string(),
//!     when_to_use: None,
//!     custom_instructions: None,
//!     groups: vec![GroupEntry::bare(ToolGroup::Read)],
//! }];
//!
//! // The custom mode replaces the built-in "code" but keeps its position.
//! let merged = registry.merge_all(&custom);
//! assert_eq!(merged[0].name, "My Code");
//! ```

mod config;
mod registry;

pub use config::{CustomModePrompts, GroupEntry, GroupOptions, ModeConfig, PromptComponent};
pub use registry::{find_mode_by_slug, tools_for_mode, ModeRegistry, ModeSelection};
