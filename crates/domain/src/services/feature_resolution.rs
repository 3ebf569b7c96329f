//! Feature access resolution.
//!
//! A `FeatureSet` is constructed per request from the caller's session: the
//! global flag table, the caller's override rows and their admin status. It
//! is a plain value with pure query methods; nothing here touches storage.

use std::collections::{HashMap, HashSet};

/// Global state of one feature flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagState {
    pub enabled: bool,
    pub beta: bool,
}

/// Resolved feature context for one caller.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    flags: HashMap<String, FlagState>,
    overrides: HashSet<String>,
    is_admin: bool,
}

impl FeatureSet {
    /// Builds a feature set, case-normalizing every id.
    pub fn new(
        flags: impl IntoIterator<Item = (String, FlagState)>,
        overrides: impl IntoIterator<Item = String>,
        is_admin: bool,
    ) -> Self {
        Self {
            flags: flags
                .into_iter()
                .map(|(id, state)| (id.to_lowercase(), state))
                .collect(),
            overrides: overrides.into_iter().map(|id| id.to_lowercase()).collect(),
            is_admin,
        }
    }

    /// Fallback when flag loading fails: everything resolves to false except
    /// for admins.
    pub fn empty(is_admin: bool) -> Self {
        Self {
            flags: HashMap::new(),
            overrides: HashSet::new(),
            is_admin,
        }
    }

    /// Resolution order, first match wins:
    /// 1. admin role: always enabled
    /// 2. unknown feature id: disabled
    /// 3. explicit per-user override: enabled
    /// 4. the flag's global enabled state
    pub fn has_feature(&self, feature_id: &str) -> bool {
        if self.is_admin {
            return true;
        }

        let id = feature_id.to_lowercase();
        let Some(state) = self.flags.get(&id) else {
            return false;
        };

        if self.overrides.contains(&id) {
            return true;
        }

        state.enabled
    }

    /// Whether a feature is marked beta. Unknown ids are not beta; the admin
    /// shortcut does not apply here.
    pub fn is_beta(&self, feature_id: &str) -> bool {
        self.flags
            .get(&feature_id.to_lowercase())
            .map(|state| state.beta)
            .unwrap_or(false)
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// All known flag ids with their resolved state for this caller.
    pub fn resolve_all(&self) -> HashMap<String, bool> {
        self.flags
            .keys()
            .map(|id| (id.clone(), self.has_feature(id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> Vec<(String, FlagState)> {
        vec![
            (
                "dark_mode".to_string(),
                FlagState {
                    enabled: true,
                    beta: false,
                },
            ),
            (
                "Labs_Editor".to_string(),
                FlagState {
                    enabled: false,
                    beta: true,
                },
            ),
        ]
    }

    #[test]
    fn test_unknown_feature_is_disabled() {
        let set = FeatureSet::new(flags(), [], false);
        assert!(!set.has_feature("does_not_exist"));
    }

    #[test]
    fn test_admin_gets_everything_including_unknown() {
        let set = FeatureSet::new(flags(), [], true);
        assert!(set.has_feature("dark_mode"));
        assert!(set.has_feature("labs_editor"));
        assert!(set.has_feature("does_not_exist"));
    }

    #[test]
    fn test_global_flag_applies_without_override() {
        let set = FeatureSet::new(flags(), [], false);
        assert!(set.has_feature("dark_mode"));
        assert!(!set.has_feature("labs_editor"));
    }

    #[test]
    fn test_override_enables_disabled_flag() {
        let set = FeatureSet::new(flags(), ["labs_editor".to_string()], false);
        assert!(set.has_feature("labs_editor"));
    }

    #[test]
    fn test_override_on_unknown_id_does_not_enable() {
        let set = FeatureSet::new(flags(), ["ghost_feature".to_string()], false);
        assert!(!set.has_feature("ghost_feature"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let set = FeatureSet::new(flags(), [], false);
        assert_eq!(set.has_feature("Dark_Mode"), set.has_feature("dark_mode"));
        assert_eq!(
            set.has_feature("LABS_EDITOR"),
            set.has_feature("labs_editor")
        );
    }

    #[test]
    fn test_override_is_case_insensitive() {
        let set = FeatureSet::new(flags(), ["LABS_editor".to_string()], false);
        assert!(set.has_feature("Labs_Editor"));
    }

    #[test]
    fn test_is_beta() {
        let set = FeatureSet::new(flags(), [], false);
        assert!(set.is_beta("labs_editor"));
        assert!(set.is_beta("LABS_EDITOR"));
        assert!(!set.is_beta("dark_mode"));
        assert!(!set.is_beta("does_not_exist"));
    }

    #[test]
    fn test_beta_not_overridden_by_admin() {
        let set = FeatureSet::new(flags(), [], true);
        assert!(!set.is_beta("does_not_exist"));
        assert!(set.is_beta("labs_editor"));
    }

    #[test]
    fn test_empty_fallback() {
        let set = FeatureSet::empty(false);
        assert!(!set.has_feature("dark_mode"));

        let admin_set = FeatureSet::empty(true);
        assert!(admin_set.has_feature("dark_mode"));
    }

    #[test]
    fn test_resolve_all_uses_normalized_ids() {
        let set = FeatureSet::new(flags(), [], false);
        let resolved = set.resolve_all();
        assert_eq!(resolved.get("dark_mode"), Some(&true));
        assert_eq!(resolved.get("labs_editor"), Some(&false));
        assert!(!resolved.contains_key("Labs_Editor"));
    }
}
