//! Permission resolution for tool usage control.
//!
//! This module decides, for a single tool-invocation attempt, whether the
//! tool is currently permitted under a mode. The decision is a pure function
//! of the startup tables and the per-call inputs.
//!
//! # Evaluation order
//!
//! The resolver applies these layers in order; the first applicable rule
//! decides:
//!
//! 1. **Always available** - tools in the catalog's always-available set are
//!    allowed unconditionally
//! 2. **Experiment gate** - experimental tools require an explicit `true`
//!    flag
//! 3. **Requirements** - a blanket disable, or an explicit per-tool `false`,
//!    denies
//! 4. **Mode grants** - the mode's group entries are scanned in declared
//!    order; the first entry whose group contains the tool decides, so a
//!    restricted grant listed first shadows a broader one listed later
//!
//! An edit grant carrying a file restriction raises
//! [`KitError`](crate::error::KitError)`::FileRestriction` when the attempted
//! path falls outside the pattern - a hard stop distinct from an ordinary
//! `Ok(false)` denial.
//!
//! # Example
//!
//! ```rust
//! use modekit::permissions::{CallContext, PermissionResolver};
//! use modekit::modes::ModeRegistry;
//! use modekit::tools::ToolCatalog;
//! use serde_json::json;
//!
//! let catalog = ToolCatalog::standard();
//! let registry = ModeRegistry::new();
//! let resolver = PermissionResolver::new(&catalog, &registry);
//!
//! // The architect mode only edits markdown files
//! let context = CallContext::default()
//!     .with_params(json!({"path": "plan.md", "content": "# Plan"}));
//! let allowed = resolver
//!     .is_allowed("write_to_file", "architect", &[], &context)
//!     .unwrap();
//! assert!(allowed);
//! ```

mod resolver;

pub use resolver::{file_matches_regex, CallContext, PermissionResolver, ToolRequirements};
