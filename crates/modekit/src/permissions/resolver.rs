//! Tool permission resolution.

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::KitError;
use crate::modes::ModeConfig;
use crate::modes::ModeRegistry;
use crate::tools::{ToolCatalog, ToolGroup};

/// Host-supplied tool requirement state
///
/// Mirrors the two shapes hosts hand over: a blanket "everything is off"
/// switch, or a per-tool map where an explicit `false` disables that tool.
/// Tools missing from the map are unaffected.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolRequirements {
    /// Every non-always-available tool is disabled
    Disabled,
    /// Per-tool enablement; only explicit `false` entries deny
    PerTool(HashMap<String, bool>),
}

/// Per-invocation inputs to a permission check
///
/// All fields are optional; [`CallContext::default`] describes a plain
/// invocation with no requirements, parameters, or experiment flags.
///
/// # Example
///
/// ```
/// use modekit::permissions::CallContext;
/// use serde_json::json;
///
/// let context = CallContext::default()
///     .with_params(json!({"path": "a.md", "content": "x"}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    /// Tool requirement state supplied by the host
    pub requirements: Option<ToolRequirements>,
    /// Parameters of the tool invocation being checked
    pub params: Option<Map<String, Value>>,
    /// Experiment flags by tool identifier
    pub experiments: Option<HashMap<String, bool>>,
}

impl CallContext {
    /// Set the requirement state
    pub fn with_requirements(mut self, requirements: ToolRequirements) -> Self {
        self.requirements = Some(requirements);
        self
    }

    /// Set the tool parameters from a JSON object
    ///
    /// Non-object values are ignored.
    pub fn with_params(mut self, params: Value) -> Self {
        if let Value::Object(map) = params {
            self.params = Some(map);
        }
        self
    }

    /// Set the experiment flags
    pub fn with_experiments(mut self, experiments: HashMap<String, bool>) -> Self {
        self.experiments = Some(experiments);
        self
    }

    fn param_str(&self, key: &str) -> Option<&str> {
        self.params.as_ref()?.get(key)?.as_str()
    }

    /// Whether the parameters carry an edit payload (diff, content, or operations)
    fn has_edit_payload(&self) -> bool {
        const EDIT_PAYLOAD_KEYS: [&str; 3] = ["diff", "content", "operations"];

        self.params.as_ref().is_some_and(|params| {
            EDIT_PAYLOAD_KEYS
                .iter()
                .any(|key| params.get(*key).is_some_and(|value| !value.is_null()))
        })
    }

    fn experiment_enabled(&self, tool: &str) -> bool {
        self.experiments
            .as_ref()
            .and_then(|flags| flags.get(tool))
            .copied()
            .unwrap_or(false)
    }
}

/// Whether a file path matches a restriction pattern
///
/// A malformed pattern is logged and treated as a non-match, so a broken
/// restriction still denies rather than silently allowing.
pub fn file_matches_regex(file_path: &str, pattern: &str) -> bool {
    match Regex::new(pattern) {
        Ok(regex) => regex.is_match(file_path),
        Err(error) => {
            tracing::warn!(pattern, %error, "invalid file restriction pattern");
            false
        }
    }
}

/// Decides whether a single tool invocation is permitted
///
/// Borrows the startup tables and evaluates each check as a pure function of
/// its arguments; it holds no mutable state and can be shared freely.
///
/// # Example
///
/// ```
/// use modekit::permissions::{CallContext, PermissionResolver};
/// use modekit::modes::ModeRegistry;
/// use modekit::tools::ToolCatalog;
///
/// let catalog = ToolCatalog::standard();
/// let registry = ModeRegistry::new();
/// let resolver = PermissionResolver::new(&catalog, &registry);
///
/// let allowed = resolver
///     .is_allowed("read_file", "code", &[], &CallContext::default())
///     .unwrap();
/// assert!(allowed);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PermissionResolver<'a> {
    catalog: &'a ToolCatalog,
    registry: &'a ModeRegistry,
}

impl<'a> PermissionResolver<'a> {
    /// Create a resolver over the given catalog and registry
    pub fn new(catalog: &'a ToolCatalog, registry: &'a ModeRegistry) -> Self {
        Self { catalog, registry }
    }

    /// Whether `tool` may be invoked right now in the given mode
    ///
    /// Checks are applied in a fixed precedence; the first applicable rule
    /// decides:
    ///
    /// 1. Always-available tools are allowed, bypassing every later check.
    /// 2. An experimental tool is denied unless its experiment flag is
    ///    explicitly `true`.
    /// 3. [`ToolRequirements::Disabled`] denies every tool.
    /// 4. An explicit `false` in the requirements map denies that tool.
    /// 5. An unknown mode slug denies.
    /// 6. The mode's group entries are scanned in declared order and the
    ///    FIRST entry whose group contains the tool decides — group order
    ///    expresses the mode author's precedence, so a restricted grant
    ///    listed before a broad one wins. An unrestricted entry allows; an
    ///    edit entry with a file restriction fails with
    ///    [`KitError::FileRestriction`] when the invocation carries a path
    ///    and an edit payload whose path does not match.
    /// 7. No matching group denies.
    ///
    /// Denial is `Ok(false)`; `Err` is reserved for restriction violations
    /// that carry diagnosable detail.
    pub fn is_allowed(
        &self,
        tool: &str,
        mode_slug: &str,
        custom_modes: &[ModeConfig],
        context: &CallContext,
    ) -> Result<bool, KitError> {
        if self.catalog.is_always_available(tool) {
            return Ok(true);
        }

        if self.catalog.is_experimental(tool) && !context.experiment_enabled(tool) {
            return Ok(false);
        }

        match &context.requirements {
            Some(ToolRequirements::Disabled) => return Ok(false),
            Some(ToolRequirements::PerTool(map)) => {
                if map.get(tool) == Some(&false) {
                    return Ok(false);
                }
            }
            None => {}
        }

        let Some(mode) = self.registry.resolve(mode_slug, custom_modes) else {
            return Ok(false);
        };

        // First structurally matching group wins; later entries for the same
        // tool must not be reached.
        for entry in &mode.groups {
            if !self
                .catalog
                .tools_in_group(entry.group)
                .iter()
                .any(|t| t == tool)
            {
                continue;
            }

            let Some(options) = &entry.options else {
                return Ok(true);
            };

            if entry.group == ToolGroup::Edit {
                if let Some(pattern) = &options.file_regex {
                    if let Some(path) = context.param_str("path") {
                        if context.has_edit_payload() && !file_matches_regex(path, pattern) {
                            return Err(KitError::FileRestriction {
                                mode: mode.name.clone(),
                                pattern: pattern.clone(),
                                description: options.description.clone(),
                                path: path.to_string(),
                            });
                        }
                    }
                }
            }

            return Ok(true);
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::{GroupEntry, GroupOptions};
    use serde_json::json;

    fn resolver_fixtures() -> (ToolCatalog, ModeRegistry) {
        (ToolCatalog::standard(), ModeRegistry::new())
    }

    fn mode_with_groups(slug: &str, groups: Vec<GroupEntry>) -> ModeConfig {
        ModeConfig {
            slug: slug.to_string(),
            name: format!("Test {slug}"),
            role_definition: "You are a test persona.".to_string(),
            when_to_use: None,
            custom_instructions: None,
            groups,
        }
    }

    fn md_only_options() -> GroupOptions {
        GroupOptions {
            file_regex: Some("\\.md$".to_string()),
            description: Some("Markdown files only".to_string()),
        }
    }

    #[test]
    fn test_always_available_bypasses_everything() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        // Unknown mode, disabled requirements - still allowed
        let context = CallContext::default().with_requirements(ToolRequirements::Disabled);
        assert!(
            resolver
                .is_allowed("attempt_completion", "nope", &[], &context)
                .unwrap()
        );
    }

    #[test]
    fn test_experimental_denied_without_flag() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        // "code" grants the edit group, which contains insert_content, but the
        // experiment flag is missing
        assert!(
            !resolver
                .is_allowed("insert_content", "code", &[], &CallContext::default())
                .unwrap()
        );

        let context = CallContext::default()
            .with_experiments(HashMap::from([("insert_content".to_string(), false)]));
        assert!(!resolver.is_allowed("insert_content", "code", &[], &context).unwrap());
    }

    #[test]
    fn test_experimental_allowed_with_flag() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        let context = CallContext::default()
            .with_experiments(HashMap::from([("insert_content".to_string(), true)]));
        assert!(resolver.is_allowed("insert_content", "code", &[], &context).unwrap());
    }

    #[test]
    fn test_disabled_requirements_deny_all_tools() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        let context = CallContext::default().with_requirements(ToolRequirements::Disabled);
        assert!(!resolver.is_allowed("read_file", "code", &[], &context).unwrap());
        assert!(!resolver.is_allowed("apply_diff", "code", &[], &context).unwrap());
    }

    #[test]
    fn test_requirements_map_explicit_false_denies() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        let context = CallContext::default().with_requirements(ToolRequirements::PerTool(
            HashMap::from([("apply_diff".to_string(), false)]),
        ));
        assert!(!resolver.is_allowed("apply_diff", "code", &[], &context).unwrap());
        // Tools not in the map are unaffected
        assert!(resolver.is_allowed("read_file", "code", &[], &context).unwrap());
    }

    #[test]
    fn test_requirements_map_true_does_not_bypass_mode() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        // "ask" has no command group; an explicit true requirement does not
        // grant the tool by itself
        let context = CallContext::default().with_requirements(ToolRequirements::PerTool(
            HashMap::from([("execute_command".to_string(), true)]),
        ));
        assert!(!resolver.is_allowed("execute_command", "ask", &[], &context).unwrap());
    }

    #[test]
    fn test_unknown_mode_denies() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        assert!(
            !resolver
                .is_allowed("read_file", "nope", &[], &CallContext::default())
                .unwrap()
        );
    }

    #[test]
    fn test_tool_outside_mode_groups_denies() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        // "ask" grants read/browser/mcp but not command
        assert!(
            !resolver
                .is_allowed("execute_command", "ask", &[], &CallContext::default())
                .unwrap()
        );
    }

    #[test]
    fn test_unrestricted_group_allows() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        assert!(
            resolver
                .is_allowed("apply_diff", "code", &[], &CallContext::default())
                .unwrap()
        );
    }

    #[test]
    fn test_file_restriction_violation_is_an_error() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);
        let custom = vec![mode_with_groups(
            "docs",
            vec![GroupEntry::with_options(ToolGroup::Edit, md_only_options())],
        )];

        let context =
            CallContext::default().with_params(json!({"path": "a.txt", "content": "x"}));
        let err = resolver
            .is_allowed("write_to_file", "docs", &custom, &context)
            .unwrap_err();

        match err {
            KitError::FileRestriction {
                mode,
                pattern,
                description,
                path,
            } => {
                assert_eq!(mode, "Test docs");
                assert_eq!(pattern, "\\.md$");
                assert_eq!(description.as_deref(), Some("Markdown files only"));
                assert_eq!(path, "a.txt");
            }
            other => panic!("expected FileRestriction, got {other:?}"),
        }
    }

    #[test]
    fn test_file_restriction_matching_path_allows() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);
        let custom = vec![mode_with_groups(
            "docs",
            vec![GroupEntry::with_options(ToolGroup::Edit, md_only_options())],
        )];

        let context = CallContext::default().with_params(json!({"path": "a.md", "content": "x"}));
        assert!(
            resolver
                .is_allowed("write_to_file", "docs", &custom, &context)
                .unwrap()
        );
    }

    #[test]
    fn test_file_restriction_skipped_without_edit_payload() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);
        let custom = vec![mode_with_groups(
            "docs",
            vec![GroupEntry::with_options(ToolGroup::Edit, md_only_options())],
        )];

        // A path with no diff/content/operations field is not an edit attempt
        let context = CallContext::default().with_params(json!({"path": "a.txt"}));
        assert!(
            resolver
                .is_allowed("write_to_file", "docs", &custom, &context)
                .unwrap()
        );

        // No parameters at all
        assert!(
            resolver
                .is_allowed("write_to_file", "docs", &custom, &CallContext::default())
                .unwrap()
        );
    }

    #[test]
    fn test_builtin_architect_restriction_enforced() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        let context =
            CallContext::default().with_params(json!({"path": "src/lib.rs", "diff": "..."}));
        let err = resolver
            .is_allowed("apply_diff", "architect", &[], &context)
            .unwrap_err();
        assert!(err.to_string().contains("🏗️ Architect"));

        let context =
            CallContext::default().with_params(json!({"path": "NOTES.md", "diff": "..."}));
        assert!(
            resolver
                .is_allowed("apply_diff", "architect", &[], &context)
                .unwrap()
        );
    }

    #[test]
    fn test_first_matching_group_wins() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        // A restrictive edit entry listed before an unrestricted one: the
        // restriction must be enforced, the later grant never reached.
        let custom = vec![mode_with_groups(
            "layered",
            vec![
                GroupEntry::with_options(ToolGroup::Edit, md_only_options()),
                GroupEntry::bare(ToolGroup::Edit),
            ],
        )];

        let context =
            CallContext::default().with_params(json!({"path": "a.txt", "content": "x"}));
        assert!(
            resolver
                .is_allowed("write_to_file", "layered", &custom, &context)
                .is_err()
        );
    }

    #[test]
    fn test_malformed_pattern_fails_safe_to_deny() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);
        let custom = vec![mode_with_groups(
            "broken",
            vec![GroupEntry::with_options(
                ToolGroup::Edit,
                GroupOptions {
                    file_regex: Some("[unclosed".to_string()),
                    description: None,
                },
            )],
        )];

        // The unmatchable pattern behaves as "does not match": restriction raised
        let context = CallContext::default().with_params(json!({"path": "a.md", "content": "x"}));
        let err = resolver
            .is_allowed("write_to_file", "broken", &custom, &context)
            .unwrap_err();
        assert!(matches!(err, KitError::FileRestriction { .. }));
    }

    #[test]
    fn test_file_matches_regex() {
        assert!(file_matches_regex("notes/readme.md", "\\.md$"));
        assert!(!file_matches_regex("src/main.rs", "\\.md$"));
        assert!(!file_matches_regex("anything", "[unclosed"));
    }

    #[test]
    fn test_custom_mode_grants_apply() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        // A custom override of "code" that only grants read
        let custom = vec![mode_with_groups(
            "code",
            vec![GroupEntry::bare(ToolGroup::Read)],
        )];

        assert!(
            resolver
                .is_allowed("read_file", "code", &custom, &CallContext::default())
                .unwrap()
        );
        assert!(
            !resolver
                .is_allowed("apply_diff", "code", &custom, &CallContext::default())
                .unwrap()
        );
    }

    #[test]
    fn test_orchestrator_denies_group_tools() {
        let (catalog, registry) = resolver_fixtures();
        let resolver = PermissionResolver::new(&catalog, &registry);

        assert!(
            !resolver
                .is_allowed("read_file", "orchestrator", &[], &CallContext::default())
                .unwrap()
        );
        assert!(
            resolver
                .is_allowed("new_task", "orchestrator", &[], &CallContext::default())
                .unwrap()
        );
    }
}
