//! Mode lookup, merging, and effective-configuration resolution.

use crate::error::KitError;
use crate::modes::config::{builtin_modes, CustomModePrompts, ModeConfig, PromptComponent};
use crate::modes::GroupEntry;
use crate::prompt::{join_user_instructions, ContextOptions};
use crate::tools::ToolCatalog;

/// Find a mode by slug in a single list, without falling back to built-ins
pub fn find_mode_by_slug<'a>(slug: &str, modes: &'a [ModeConfig]) -> Option<&'a ModeConfig> {
    modes.iter().find(|mode| mode.slug == slug)
}

/// All tools granted by a sequence of group entries
///
/// Returns the union of the groups' tool sets plus the catalog's
/// always-available tools, deduplicated, in first-seen order.
pub fn tools_for_mode(groups: &[GroupEntry], catalog: &ToolCatalog) -> Vec<String> {
    let mut tools: Vec<String> = Vec::new();

    for entry in groups {
        for tool in catalog.tools_in_group(entry.group) {
            if !tools.contains(tool) {
                tools.push(tool.clone());
            }
        }
    }

    for tool in catalog.always_available() {
        if !tools.iter().any(|t| t == tool) {
            tools.push(tool.clone());
        }
    }

    tools
}

/// The prompt-facing selection for a mode
///
/// Produced by [`ModeRegistry::mode_selection`]; both fields default to empty
/// strings when no source defines them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeSelection {
    /// Persona text for the prompt
    pub role_definition: String,
    /// Mode instruction text before context composition
    pub base_instructions: String,
}

/// Registry of built-in modes with custom-mode merge helpers
///
/// The built-in table is fixed at construction. Custom modes are read-only
/// per-call inputs: a custom mode whose slug matches a built-in fully replaces
/// it, and novel slugs extend the set. Every operation is a pure function over
/// the registry and its arguments.
///
/// # Example
///
/// ```
/// use modekit::modes::ModeRegistry;
///
/// let registry = ModeRegistry::new();
///
/// let code = registry.resolve("code", &[]).unwrap();
/// assert_eq!(code.name, "💻 Code");
/// assert!(registry.resolve("no-such-mode", &[]).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ModeRegistry {
    modes: Vec<ModeConfig>,
}

impl ModeRegistry {
    /// Create a registry over the built-in mode table
    pub fn new() -> Self {
        Self {
            modes: builtin_modes(),
        }
    }

    /// The built-in modes, in display order
    pub fn builtin(&self) -> &[ModeConfig] {
        &self.modes
    }

    /// Slug of the default mode (the first built-in)
    pub fn default_slug(&self) -> &str {
        &self.modes[0].slug
    }

    /// Resolve a slug to its mode, custom modes taking precedence
    pub fn resolve<'a>(
        &'a self,
        slug: &str,
        custom_modes: &'a [ModeConfig],
    ) -> Option<&'a ModeConfig> {
        find_mode_by_slug(slug, custom_modes).or_else(|| find_mode_by_slug(slug, &self.modes))
    }

    /// Resolve a slug to its mode, or fail with [`KitError::ModeNotFound`]
    pub fn resolve_or_err<'a>(
        &'a self,
        slug: &str,
        custom_modes: &'a [ModeConfig],
    ) -> Result<&'a ModeConfig, KitError> {
        self.resolve(slug, custom_modes)
            .ok_or_else(|| KitError::ModeNotFound {
                slug: slug.to_string(),
            })
    }

    /// Whether a custom mode with this slug exists
    pub fn is_custom(&self, slug: &str, custom_modes: &[ModeConfig]) -> bool {
        find_mode_by_slug(slug, custom_modes).is_some()
    }

    /// The effective ordered mode set after applying custom modes
    ///
    /// Starts from the built-in order. A custom mode sharing a built-in slug
    /// replaces that entry in place; custom modes with new slugs are appended
    /// in their given order.
    pub fn merge_all(&self, custom_modes: &[ModeConfig]) -> Vec<ModeConfig> {
        let mut all = self.modes.clone();

        for custom in custom_modes {
            match all.iter().position(|mode| mode.slug == custom.slug) {
                Some(index) => all[index] = custom.clone(),
                None => all.push(custom.clone()),
            }
        }

        all
    }

    /// Snapshot of the built-in modes' prompt components, keyed by slug
    pub fn default_prompts(&self) -> CustomModePrompts {
        self.modes
            .iter()
            .map(|mode| {
                (
                    mode.slug.clone(),
                    PromptComponent {
                        role_definition: Some(mode.role_definition.clone()),
                        when_to_use: mode.when_to_use.clone(),
                        custom_instructions: mode.custom_instructions.clone(),
                    },
                )
            })
            .collect()
    }

    /// Prompt-facing fields for a mode, with component fallback
    ///
    /// A custom mode takes precedence; otherwise a supplied prompt component
    /// stands in; otherwise the built-in mode is used. Missing sources yield
    /// empty strings.
    pub fn mode_selection(
        &self,
        slug: &str,
        prompt_component: Option<&PromptComponent>,
        custom_modes: &[ModeConfig],
    ) -> ModeSelection {
        if let Some(mode) = find_mode_by_slug(slug, custom_modes) {
            return ModeSelection {
                role_definition: mode.role_definition.clone(),
                base_instructions: mode.custom_instructions.clone().unwrap_or_default(),
            };
        }

        if let Some(component) = prompt_component {
            return ModeSelection {
                role_definition: component.role_definition.clone().unwrap_or_default(),
                base_instructions: component.custom_instructions.clone().unwrap_or_default(),
            };
        }

        match find_mode_by_slug(slug, &self.modes) {
            Some(mode) => ModeSelection {
                role_definition: mode.role_definition.clone(),
                base_instructions: mode.custom_instructions.clone().unwrap_or_default(),
            },
            None => ModeSelection::default(),
        }
    }

    /// The fully resolved configuration for a mode
    ///
    /// Resolves the base mode (falling back to the default mode when the slug
    /// is unknown), applies field-level overrides from `prompt_overrides`
    /// (an empty override string falls through to the base field), and, when
    /// `context` carries a workspace directory, composes the effective custom
    /// instructions from the context's instruction fragments.
    pub fn effective_details(
        &self,
        slug: &str,
        custom_modes: &[ModeConfig],
        prompt_overrides: Option<&CustomModePrompts>,
        context: Option<&ContextOptions>,
    ) -> ModeConfig {
        let base = self
            .resolve(slug, custom_modes)
            .unwrap_or_else(|| &self.modes[0]);
        let component = prompt_overrides.and_then(|overrides| overrides.get(slug));

        let role_definition = component
            .and_then(|c| c.role_definition.clone())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| base.role_definition.clone());

        let when_to_use = component
            .and_then(|c| c.when_to_use.clone())
            .filter(|text| !text.is_empty())
            .or_else(|| base.when_to_use.clone());

        let base_instructions = component
            .and_then(|c| c.custom_instructions.clone())
            .filter(|text| !text.is_empty())
            .or_else(|| base.custom_instructions.clone());

        let custom_instructions = match context {
            Some(ctx) if ctx.workspace_dir.is_some() => {
                let joined =
                    join_user_instructions(ctx, base_instructions.as_deref().unwrap_or_default());
                if joined.is_empty() { None } else { Some(joined) }
            }
            _ => base_instructions,
        };

        ModeConfig {
            slug: base.slug.clone(),
            name: base.name.clone(),
            role_definition,
            when_to_use,
            custom_instructions,
            groups: base.groups.clone(),
        }
    }

    /// The persona text for a mode, or empty when the slug is unknown
    pub fn role_definition(&self, slug: &str, custom_modes: &[ModeConfig]) -> String {
        match self.resolve(slug, custom_modes) {
            Some(mode) => mode.role_definition.clone(),
            None => {
                tracing::warn!(slug, "no mode found for slug");
                String::new()
            }
        }
    }

    /// The selection guidance for a mode, or empty when absent or unknown
    pub fn when_to_use(&self, slug: &str, custom_modes: &[ModeConfig]) -> String {
        match self.resolve(slug, custom_modes) {
            Some(mode) => mode.when_to_use.clone().unwrap_or_default(),
            None => {
                tracing::warn!(slug, "no mode found for slug");
                String::new()
            }
        }
    }

    /// The instruction text for a mode, or empty when absent or unknown
    pub fn custom_instructions(&self, slug: &str, custom_modes: &[ModeConfig]) -> String {
        match self.resolve(slug, custom_modes) {
            Some(mode) => mode.custom_instructions.clone().unwrap_or_default(),
            None => {
                tracing::warn!(slug, "no mode found for slug");
                String::new()
            }
        }
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::GroupEntry;
    use crate::tools::ToolGroup;
    use std::collections::HashMap;

    fn custom_mode(slug: &str) -> ModeConfig {
        ModeConfig {
            slug: slug.to_string(),
            name: format!("Custom {slug}"),
            role_definition: format!("You are a custom {slug} persona."),
            when_to_use: None,
            custom_instructions: Some("custom instructions".to_string()),
            groups: vec![GroupEntry::bare(ToolGroup::Read)],
        }
    }

    #[test]
    fn test_resolve_builtin() {
        let registry = ModeRegistry::new();
        let mode = registry.resolve("architect", &[]).unwrap();
        assert_eq!(mode.name, "🏗️ Architect");
    }

    #[test]
    fn test_resolve_prefers_custom_over_builtin() {
        let registry = ModeRegistry::new();
        let custom = vec![custom_mode("code")];

        let mode = registry.resolve("code", &custom).unwrap();
        assert_eq!(mode.name, "Custom code");
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        let registry = ModeRegistry::new();
        assert!(registry.resolve("nope", &[]).is_none());
    }

    #[test]
    fn test_resolve_or_err_unknown_slug() {
        let registry = ModeRegistry::new();
        let err = registry.resolve_or_err("nope", &[]).unwrap_err();
        assert!(matches!(err, KitError::ModeNotFound { slug } if slug == "nope"));
    }

    #[test]
    fn test_default_slug_is_first_builtin() {
        let registry = ModeRegistry::new();
        assert_eq!(registry.default_slug(), "code");
    }

    #[test]
    fn test_is_custom() {
        let registry = ModeRegistry::new();
        let custom = vec![custom_mode("code")];

        assert!(registry.is_custom("code", &custom));
        assert!(!registry.is_custom("code", &[]));
        assert!(!registry.is_custom("architect", &custom));
    }

    #[test]
    fn test_merge_all_override_preserves_position() {
        let registry = ModeRegistry::new();
        let custom = vec![custom_mode("architect")];

        let all = registry.merge_all(&custom);
        let slugs: Vec<&str> = all.iter().map(|m| m.slug.as_str()).collect();
        assert_eq!(slugs, vec!["code", "architect", "ask", "debug", "orchestrator"]);
        assert_eq!(all[1].name, "Custom architect");
    }

    #[test]
    fn test_merge_all_appends_new_slugs() {
        let registry = ModeRegistry::new();
        let custom = vec![custom_mode("reviewer"), custom_mode("tester")];

        let all = registry.merge_all(&custom);
        assert_eq!(all.len(), 7);
        assert_eq!(all[5].slug, "reviewer");
        assert_eq!(all[6].slug, "tester");
    }

    #[test]
    fn test_merge_all_without_customs_is_builtin() {
        let registry = ModeRegistry::new();
        assert_eq!(registry.merge_all(&[]), registry.builtin().to_vec());
    }

    #[test]
    fn test_effective_details_no_overrides_is_identity() {
        let registry = ModeRegistry::new();
        let base = registry.resolve("debug", &[]).unwrap().clone();

        let details = registry.effective_details("debug", &[], None, None);
        assert_eq!(details, base);
    }

    #[test]
    fn test_effective_details_applies_component_overrides() {
        let registry = ModeRegistry::new();
        let overrides: CustomModePrompts = HashMap::from([(
            "ask".to_string(),
            PromptComponent {
                role_definition: Some("Override persona".to_string()),
                when_to_use: Some("When asked".to_string()),
                custom_instructions: None,
            },
        )]);

        let details = registry.effective_details("ask", &[], Some(&overrides), None);
        assert_eq!(details.role_definition, "Override persona");
        assert_eq!(details.when_to_use.as_deref(), Some("When asked"));
        // Unset component field falls back to the base mode
        assert_eq!(
            details.custom_instructions,
            registry.resolve("ask", &[]).unwrap().custom_instructions
        );
    }

    #[test]
    fn test_effective_details_empty_override_falls_through() {
        let registry = ModeRegistry::new();
        let overrides: CustomModePrompts = HashMap::from([(
            "ask".to_string(),
            PromptComponent {
                role_definition: Some(String::new()),
                ..Default::default()
            },
        )]);

        let details = registry.effective_details("ask", &[], Some(&overrides), None);
        assert_eq!(
            details.role_definition,
            registry.resolve("ask", &[]).unwrap().role_definition
        );
    }

    #[test]
    fn test_effective_details_unknown_slug_falls_back_to_default_mode() {
        let registry = ModeRegistry::new();
        let details = registry.effective_details("nope", &[], None, None);
        assert_eq!(details.slug, "code");
    }

    #[test]
    fn test_effective_details_composes_instructions_with_workspace() {
        let registry = ModeRegistry::new();
        let context = ContextOptions {
            workspace_dir: Some("/work/app".to_string()),
            global_instructions: Some("GLOBAL".to_string()),
            ..Default::default()
        };

        let details = registry.effective_details("ask", &[], None, Some(&context));
        let instructions = details.custom_instructions.unwrap();
        assert!(instructions.starts_with("GLOBAL\n\n"));
        assert!(instructions.contains("answer the user's questions thoroughly"));
    }

    #[test]
    fn test_effective_details_skips_composition_without_workspace() {
        let registry = ModeRegistry::new();
        let context = ContextOptions {
            global_instructions: Some("GLOBAL".to_string()),
            ..Default::default()
        };

        let details = registry.effective_details("ask", &[], None, Some(&context));
        let instructions = details.custom_instructions.unwrap();
        assert!(!instructions.contains("GLOBAL"));
    }

    #[test]
    fn test_mode_selection_precedence() {
        let registry = ModeRegistry::new();
        let custom = vec![custom_mode("code")];
        let component = PromptComponent {
            role_definition: Some("Component persona".to_string()),
            custom_instructions: Some("Component instructions".to_string()),
            ..Default::default()
        };

        // Custom mode wins over the component
        let selection = registry.mode_selection("code", Some(&component), &custom);
        assert_eq!(selection.role_definition, "You are a custom code persona.");

        // Component wins over the built-in
        let selection = registry.mode_selection("code", Some(&component), &[]);
        assert_eq!(selection.role_definition, "Component persona");
        assert_eq!(selection.base_instructions, "Component instructions");

        // Built-in used when nothing else applies
        let selection = registry.mode_selection("code", None, &[]);
        assert!(selection.role_definition.contains("highly skilled software engineer"));
    }

    #[test]
    fn test_mode_selection_unknown_is_empty() {
        let registry = ModeRegistry::new();
        let selection = registry.mode_selection("nope", None, &[]);
        assert_eq!(selection, ModeSelection::default());
    }

    #[test]
    fn test_lookup_helpers_empty_on_unknown_slug() {
        let registry = ModeRegistry::new();
        assert_eq!(registry.role_definition("nope", &[]), "");
        assert_eq!(registry.when_to_use("nope", &[]), "");
        assert_eq!(registry.custom_instructions("nope", &[]), "");
    }

    #[test]
    fn test_default_prompts_covers_all_builtins() {
        let registry = ModeRegistry::new();
        let prompts = registry.default_prompts();

        assert_eq!(prompts.len(), registry.builtin().len());
        let code = prompts.get("code").unwrap();
        assert!(
            code.role_definition
                .as_deref()
                .unwrap()
                .contains("highly skilled software engineer")
        );
    }

    #[test]
    fn test_tools_for_mode_dedups_and_adds_always_available() {
        let catalog = ToolCatalog::standard();
        let groups = vec![
            GroupEntry::bare(ToolGroup::Read),
            GroupEntry::bare(ToolGroup::Read),
            GroupEntry::bare(ToolGroup::Edit),
        ];

        let tools = tools_for_mode(&groups, &catalog);
        assert_eq!(
            tools.iter().filter(|t| t.as_str() == "read_file").count(),
            1
        );
        assert!(tools.contains(&"apply_diff".to_string()));
        assert!(tools.contains(&"attempt_completion".to_string()));
    }

    #[test]
    fn test_tools_for_empty_groups_is_always_available_only() {
        let catalog = ToolCatalog::standard();
        let tools = tools_for_mode(&[], &catalog);
        assert_eq!(tools, catalog.always_available().to_vec());
    }
}
