//! Declarative YAML matrix specifications
//!
//! A matrix spec hand-picks components and their construction parameters,
//! the way a showcase page is written by hand. Unknown component names
//! surface at assembly time, not parse time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use propflow_common::assemble::TestMatrix;
use propflow_common::exclude::ExclusionPolicy;
use propflow_common::Params;

use crate::error::{E2eError, E2eResult};

/// A complete matrix specification parsed from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixSpec {
    /// Unique name for this matrix
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Exclusions applied when this spec drives discovery
    #[serde(default)]
    pub exclude: ExclusionPolicy,

    /// Components to instantiate, in page order
    pub components: Vec<ComponentEntry>,
}

/// One component row in a matrix spec
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentEntry {
    pub component: String,

    /// Explicit element id; generated from the qualified name if absent
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub params: Params,
}

impl MatrixSpec {
    /// Parse a matrix spec from a YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        serde_yaml::from_str(yaml).map_err(E2eError::from)
    }

    /// Parse a matrix spec from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load all matrix specs from a directory
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        let mut specs = Vec::new();

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
            specs.push(Self::from_file(entry.path())?);
        }

        Ok(specs)
    }

    /// Find a spec by name
    pub fn find_by_name(specs: Vec<Self>, name: &str) -> E2eResult<Self> {
        specs
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| E2eError::SpecParse(format!("matrix not found: {name}")))
    }

    /// Convert into the matrix the assembler consumes
    pub fn into_matrix(self) -> TestMatrix {
        let mut matrix = TestMatrix::new();
        for entry in self.components {
            let mut params = entry.params;
            if let Some(id) = entry.id {
                params.insert("id", id);
            }
            matrix.push(entry.component, params);
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_spec() {
        let yaml = r#"
name: smoke
description: Button and checkbox only
components:
  - component: form.button
    id: button
    params:
      text: Some button
  - component: form.checkbox
    id: checkbox
"#;
        let spec = MatrixSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.name, "smoke");
        assert_eq!(spec.components.len(), 2);

        let matrix = spec.into_matrix();
        let first = matrix.iter().next().unwrap();
        assert_eq!(first.component, "form.button");
        assert_eq!(first.params.str("id"), Some("button"));
        assert_eq!(first.params.str("text"), Some("Some button"));
    }

    #[test]
    fn parses_exclusions() {
        let yaml = r#"
name: no-tables
exclude:
  modules:
    - table
components: []
"#;
        let spec = MatrixSpec::from_yaml(yaml).unwrap();
        assert!(!spec.exclude.is_empty());
    }

    #[test]
    fn loads_specs_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.yaml"),
            "name: a\ncomponents:\n  - component: form.button\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("skip.txt"), "not yaml").unwrap();

        let specs = MatrixSpec::load_all(dir.path()).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "a");

        assert!(MatrixSpec::find_by_name(specs, "missing").is_err());
    }
}
