//! Modekit - mode and prompt toolkit for AI coding-assistant plugins
//!
//! This crate provides the configuration core of a coding-assistant plugin:
//! named persona/tool-permission profiles ("modes"), a resolver that decides
//! whether a tool invocation is permitted under a mode, and the string
//! assembly that turns templates and tool-provider metadata into a system
//! prompt.
//!
//! # Overview
//!
//! Modekit enables hosts to:
//! - Resolve mode slugs against built-in and runtime-supplied custom modes
//! - Merge custom modes over the built-in table with stable ordering
//! - Gate tool invocations by mode grants, experiment flags, and host
//!   requirements, with regex-scoped edit restrictions
//! - Assemble system prompts from templates, environment facts, and MCP
//!   server metadata
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//! - `tools`: the fixed tool tables (groups, always-available set, experiments)
//! - `modes`: mode records, the built-in table, and the registry operations
//! - `permissions`: the tool permission resolver
//! - `prompt`: placeholder substitution, XML serialization, prompt sections
//! - `error`: error types and handling
//!
//! Everything is a pure function over immutable startup tables and per-call
//! inputs: there is no global state, no interior mutability, and no I/O, so
//! independent call sites may use a shared registry and catalog concurrently
//! without coordination.
//!
//! # Example
//!
//! ```rust
//! use modekit::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<(), KitError> {
//!     let catalog = ToolCatalog::standard();
//!     let registry = ModeRegistry::new();
//!     let resolver = PermissionResolver::new(&catalog, &registry);
//!
//!     // Plain grants resolve to booleans
//!     assert!(resolver.is_allowed("read_file", "code", &[], &CallContext::default())?);
//!     assert!(!resolver.is_allowed("execute_command", "ask", &[], &CallContext::default())?);
//!
//!     // Restriction violations carry structured detail
//!     let context = CallContext::default()
//!         .with_params(json!({"path": "src/lib.rs", "diff": "..."}));
//!     let result = resolver.is_allowed("apply_diff", "architect", &[], &context);
//!     assert!(matches!(result, Err(KitError::FileRestriction { .. })));
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Tool tables: groups, always-available tools, and experiment identifiers
///
/// This module defines [`tools::ToolCatalog`], the immutable table mapping
/// tool groups to the tool identifiers they grant, built once at startup and
/// passed by reference wherever tool membership is consulted.
pub mod tools;

/// Mode registry: persona/tool-permission profiles
///
/// This module defines [`modes::ModeConfig`] records, the built-in mode
/// table, and [`modes::ModeRegistry`] with the lookup and merge operations
/// that combine built-in and runtime-supplied custom modes.
pub mod modes;

/// Tool permission resolution
///
/// This module decides whether a tool invocation is permitted under a mode.
/// See [`permissions::PermissionResolver`] for the evaluation order and
/// [`permissions::CallContext`] for the per-invocation inputs.
pub mod permissions;

/// System prompt assembly
///
/// This module substitutes placeholders into host-supplied templates,
/// serializes MCP server metadata into the prompt's XML fragment, and
/// composes the fixed prompt sections and user instruction block.
pub mod prompt;

/// Error types and utilities
///
/// This module defines the [`error::KitError`] enum:
///
/// - `ModeNotFound` - a slug absent from both custom and built-in mode sets
/// - `FileRestriction` - an edit attempt outside a mode's file restriction,
///   with the mode name, pattern, description, and offending path
pub mod error;

// Prelude module for common imports
pub mod prelude {
    //! Common imports for modekit users
    //!
    //! Use `use modekit::prelude::*;` to import commonly used types.

    pub use crate::error::KitError;
    pub use crate::modes::{
        CustomModePrompts, GroupEntry, GroupOptions, ModeConfig, ModeRegistry, ModeSelection,
        PromptComponent,
    };
    pub use crate::permissions::{CallContext, PermissionResolver, ToolRequirements};
    pub use crate::prompt::{
        render_system_prompt, BrowserSettings, ContextOptions, McpServerInfo, McpToolInfo,
        ServerStatus, SystemPromptParts, WorkspaceFacts,
    };
    pub use crate::tools::{ToolCatalog, ToolGroup};
}
