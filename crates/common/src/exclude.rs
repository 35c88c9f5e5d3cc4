//! Exclusion policy for enumeration
//!
//! A single typed rule object evaluated once per candidate, replacing
//! ad hoc mixes of type references and name strings. A component is
//! excluded when its qualified name, display name, or containing module
//! is denied. Exclusion only filters enumeration output; traversal still
//! descends through excluded entries.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::ComponentSpec;

/// Denylist-based exclusion policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionPolicy {
    /// Qualified names, e.g. `form.checkbox`
    #[serde(default)]
    components: BTreeSet<String>,

    /// Display names, e.g. `checkbox`
    #[serde(default)]
    names: BTreeSet<String>,

    /// Module paths, e.g. `table`
    #[serde(default)]
    modules: BTreeSet<String>,
}

impl ExclusionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deny_component(mut self, qualified: impl Into<String>) -> Self {
        self.components.insert(qualified.into());
        self
    }

    pub fn deny_name(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    pub fn deny_module(mut self, module: impl Into<String>) -> Self {
        self.modules.insert(module.into());
        self
    }

    /// Whether the candidate is excluded from enumeration output
    pub fn excludes(&self, spec: &ComponentSpec) -> bool {
        self.components.contains(spec.qualified)
            || self.names.contains(spec.name)
            || self.modules.contains(spec.module)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.names.is_empty() && self.modules.is_empty()
    }

    /// Merge another policy's denylists into this one
    pub fn merge(&mut self, other: ExclusionPolicy) {
        self.components.extend(other.components);
        self.names.extend(other.names);
        self.modules.extend(other.modules);
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Merge all YAML policy files under a directory
    pub fn load_all(dir: &Path) -> Result<Self> {
        let mut policy = Self::default();
        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            policy.merge(Self::from_file(entry.path())?);
        }
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComponentSpec;

    fn spec(qualified: &'static str, name: &'static str, module: &'static str) -> ComponentSpec {
        ComponentSpec::abstract_base(qualified, name, module, &[])
    }

    #[test]
    fn excludes_by_component_name_and_module() {
        let policy = ExclusionPolicy::new()
            .deny_component("form.checkbox")
            .deny_name("spinner")
            .deny_module("table");

        assert!(policy.excludes(&spec("form.checkbox", "checkbox", "form")));
        assert!(policy.excludes(&spec("display.spinner", "spinner", "display")));
        assert!(policy.excludes(&spec("table.row", "row", "table")));
        assert!(!policy.excludes(&spec("form.button", "button", "form")));
    }

    #[test]
    fn empty_policy_excludes_nothing() {
        let policy = ExclusionPolicy::new();
        assert!(policy.is_empty());
        assert!(!policy.excludes(&spec("form.button", "button", "form")));
    }

    #[test]
    fn parses_yaml_denylists() {
        let yaml = r#"
components:
  - form.checkbox
modules:
  - table
"#;
        let policy = ExclusionPolicy::from_yaml(yaml).unwrap();
        assert!(policy.excludes(&spec("form.checkbox", "checkbox", "form")));
        assert!(policy.excludes(&spec("table.row", "row", "table")));
        assert!(!policy.excludes(&spec("display.icon", "icon", "display")));
    }

    #[test]
    fn loads_and_merges_policy_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.yaml"), "names: [spinner]\n").unwrap();
        std::fs::write(dir.path().join("b.yml"), "modules: [table]\n").unwrap();
        std::fs::write(dir.path().join("ignored.txt"), "names: [icon]\n").unwrap();

        let policy = ExclusionPolicy::load_all(dir.path()).unwrap();
        assert!(policy.excludes(&spec("display.spinner", "spinner", "display")));
        assert!(policy.excludes(&spec("table.row", "row", "table")));
        assert!(!policy.excludes(&spec("display.icon", "icon", "display")));
    }
}
