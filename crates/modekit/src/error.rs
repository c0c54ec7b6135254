//! Error types for modekit
//!
//! This module defines the error hierarchy for the modekit crate using `thiserror`.
//! Fallible operations return `Result<T, KitError>`.
//!
//! # Error Variants
//!
//! - [`KitError::ModeNotFound`]: a mode slug is absent from both the custom and
//!   built-in mode lists
//! - [`KitError::FileRestriction`]: an edit attempt targets a file outside a
//!   mode's file restriction pattern
//!
//! Note that an ordinary permission denial is *not* an error: the resolver
//! returns `Ok(false)` when a tool is simply not granted by a mode. Errors are
//! reserved for conditions that carry diagnosable detail the caller should
//! surface to the user.
//!
//! # Example
//!
//! ```rust
//! use modekit::error::KitError;
//! use modekit::prelude::*;
//!
//! fn example() -> Result<(), KitError> {
//!     let registry = ModeRegistry::new();
//!     // Unknown slugs surface as ModeNotFound
//!     let mode = registry.resolve_or_err("no-such-mode", &[])?;
//!     let _ = mode;
//!     Ok(())
//! }
//!
//! assert!(example().is_err());
//! ```

use thiserror::Error;

/// The main error type for all modekit operations
///
/// Permission denials are plain booleans, not errors; this enum covers the two
/// conditions that must reach the caller with structured detail.
#[derive(Error, Debug)]
pub enum KitError {
    /// Requested mode slug does not exist
    ///
    /// Returned by [`ModeRegistry::resolve_or_err`](crate::modes::ModeRegistry::resolve_or_err)
    /// when the slug is absent from both the custom mode list and the built-in
    /// mode table. The non-throwing lookup,
    /// [`ModeRegistry::resolve`](crate::modes::ModeRegistry::resolve), yields
    /// `None` for the same input.
    #[error("No mode found for slug: {slug}")]
    ModeNotFound {
        /// The slug that failed to resolve
        slug: String,
    },

    /// An edit attempt's file path violates a mode's file restriction
    ///
    /// Raised by the permission resolver when a mode grants the edit group only
    /// for files matching a pattern and the attempted path does not match.
    /// This is a hard stop, not a denial: it carries the mode name, the
    /// pattern, the optional restriction description, and the offending path
    /// so the caller can render a precise message.
    #[error(
        "This mode ({mode}) can only edit files matching pattern: {pattern}{}. Got: {path}",
        description_suffix(.description)
    )]
    FileRestriction {
        /// Display name of the mode whose restriction was violated
        mode: String,
        /// The file path pattern the mode is restricted to
        pattern: String,
        /// Human-readable description of the restriction, if the mode supplied one
        description: Option<String>,
        /// The file path that failed to match
        path: String,
    },
}

fn description_suffix(description: &Option<String>) -> String {
    match description {
        Some(text) => format!(" ({text})"),
        None => String::new(),
    }
}
