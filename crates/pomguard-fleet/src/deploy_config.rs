//! Deployment config document (PCF manifest style YAML).
//!
//! Backed by `serde_yaml::Mapping`, which keeps key order, so a patched file
//! serializes with its keys where they were.

use pomguard_core::errors::PatchError;
use serde_yaml::{Mapping, Value};

/// A parsed deployment config file.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployConfig {
    path: String,
    root: Mapping,
}

impl DeployConfig {
    /// Parse YAML text. An empty or `null` document is an empty mapping.
    pub fn parse(path: &str, content: &str) -> Result<Self, PatchError> {
        let value: Value = if content.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(content).map_err(|e| PatchError::InvalidYaml {
                path: path.to_string(),
                message: e.to_string(),
            })?
        };

        let root = match value {
            Value::Null => Mapping::new(),
            Value::Mapping(map) => map,
            _ => {
                return Err(PatchError::NotAMapping {
                    path: path.to_string(),
                })
            }
        };

        Ok(Self {
            path: path.to_string(),
            root,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn bindings(&self, key: &str) -> Result<Option<&Vec<Value>>, PatchError> {
        match self.root.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Sequence(seq)) => Ok(Some(seq)),
            Some(_) => Err(PatchError::BindingsNotAList {
                path: self.path.clone(),
                key: key.to_string(),
            }),
        }
    }

    /// Whether the list under `key` contains `binding` as a string entry.
    /// A missing or `null` key counts as an empty list.
    pub fn has_binding(&self, key: &str, binding: &str) -> Result<bool, PatchError> {
        Ok(self
            .bindings(key)?
            .is_some_and(|seq| seq.iter().any(|v| v.as_str() == Some(binding))))
    }

    /// Append `binding` to the list under `key`, creating the list if needed.
    /// Returns `false` when it was already there.
    pub fn add_binding(&mut self, key: &str, binding: &str) -> Result<bool, PatchError> {
        if self.has_binding(key, binding)? {
            return Ok(false);
        }
        let entry = Value::String(binding.to_string());
        match self.root.get_mut(key) {
            Some(Value::Sequence(seq)) => seq.push(entry),
            _ => {
                self.root
                    .insert(Value::String(key.to_string()), Value::Sequence(vec![entry]));
            }
        }
        Ok(true)
    }

    pub fn to_yaml(&self) -> Result<String, PatchError> {
        serde_yaml::to_string(&self.root).map_err(|e| PatchError::Serialize {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRD: &str = "\
applications:
- name: orders
  memory: 1G
bindings:
- db
- cache
env:
  LOG_LEVEL: info
";

    #[test]
    fn test_detects_existing_binding() {
        let cfg = DeployConfig::parse("prd.yml", PRD).unwrap();
        assert!(cfg.has_binding("bindings", "db").unwrap());
        assert!(!cfg.has_binding("bindings", "otel").unwrap());
        assert!(!cfg.has_binding("services", "db").unwrap());
    }

    #[test]
    fn test_add_binding_keeps_key_order() {
        let mut cfg = DeployConfig::parse("prd.yml", PRD).unwrap();
        assert!(cfg.add_binding("bindings", "otel").unwrap());
        assert!(!cfg.add_binding("bindings", "otel").unwrap());

        let out = cfg.to_yaml().unwrap();
        let apps = out.find("applications").unwrap();
        let bindings = out.find("bindings").unwrap();
        let env = out.find("env").unwrap();
        assert!(apps < bindings && bindings < env, "{out}");

        let reparsed = DeployConfig::parse("prd.yml", &out).unwrap();
        assert!(reparsed.has_binding("bindings", "cache").unwrap());
        assert!(reparsed.has_binding("bindings", "otel").unwrap());
    }

    #[test]
    fn test_empty_document_is_empty_mapping() {
        for empty in ["", "   \n", "~\n", "null"] {
            let mut cfg = DeployConfig::parse("prd.yml", empty).unwrap();
            assert!(!cfg.has_binding("bindings", "otel").unwrap());
            assert!(cfg.add_binding("bindings", "otel").unwrap());
            assert_eq!(cfg.to_yaml().unwrap(), "bindings:\n- otel\n");
        }
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(
            DeployConfig::parse("prd.yml", "- a\n- b\n"),
            Err(PatchError::NotAMapping { .. })
        ));
        assert!(matches!(
            DeployConfig::parse("prd.yml", "bindings: [unclosed\n"),
            Err(PatchError::InvalidYaml { .. })
        ));

        let cfg = DeployConfig::parse("prd.yml", "bindings: otel\n").unwrap();
        let err = cfg.has_binding("bindings", "otel").unwrap_err();
        assert_eq!(err.to_string(), "`bindings` in prd.yml is not a list");
    }
}
