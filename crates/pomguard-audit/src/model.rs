//! Audit data model: dependency identity, expected and found versions, mismatches.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use pomguard_core::config::ExpectEntry;
use pomguard_core::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// The (group, artifact) identity of a declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyKey {
    group: String,
    artifact: String,
}

impl DependencyKey {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

impl FromStr for DependencyKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((g, a)) if !g.is_empty() && !a.is_empty() && !a.contains(':') => {
                Ok(Self::new(g, a))
            }
            _ => Err(ConfigError::InvalidValue {
                field: "dependency".to_string(),
                message: format!("expected group:artifact, got `{s}`"),
            }),
        }
    }
}

/// What the audit requires of a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExpectedVersion {
    /// The declared version must equal this literal.
    Exact(String),
    /// The dependency only has to be declared.
    Any,
}

impl fmt::Display for ExpectedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => f.write_str(v),
            Self::Any => f.write_str("any"),
        }
    }
}

impl From<Option<String>> for ExpectedVersion {
    fn from(version: Option<String>) -> Self {
        version.map_or(Self::Any, Self::Exact)
    }
}

/// What the descriptor declares for a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FoundVersion {
    Declared(String),
    /// No dependency node, or a node without a version child.
    Absent,
}

impl FoundVersion {
    /// Whether this finding satisfies `expected`.
    pub fn satisfies(&self, expected: &ExpectedVersion) -> bool {
        match (expected, self) {
            (ExpectedVersion::Exact(want), Self::Declared(have)) => want == have,
            (ExpectedVersion::Exact(_), Self::Absent) => false,
            // Presence-only: a version-less declaration still counts as absent.
            (ExpectedVersion::Any, Self::Declared(_)) => true,
            (ExpectedVersion::Any, Self::Absent) => false,
        }
    }

    pub fn as_declared(&self) -> Option<&str> {
        match self {
            Self::Declared(v) => Some(v),
            Self::Absent => None,
        }
    }
}

impl fmt::Display for FoundVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared(v) => f.write_str(v),
            Self::Absent => f.write_str("missing"),
        }
    }
}

/// Versions found in a descriptor, at most one per key.
pub type FoundVersions = HashMap<DependencyKey, FoundVersion>;

/// Ordered expectation mapping. Iteration follows insertion order and keys
/// are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expectations {
    entries: Vec<(DependencyKey, ExpectedVersion)>,
}

impl Expectations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an expectation. A key may only be added once.
    pub fn insert(
        &mut self,
        key: DependencyKey,
        expected: ExpectedVersion,
    ) -> Result<(), ConfigError> {
        if self.contains(&key) {
            return Err(ConfigError::ValidationFailed {
                field: "audit.expect".to_string(),
                message: format!("duplicate expectation for {key}"),
            });
        }
        self.entries.push((key, expected));
        Ok(())
    }

    /// Builder-style insert for literals and tests.
    pub fn with(mut self, group: &str, artifact: &str, version: Option<&str>) -> Result<Self, ConfigError> {
        self.insert(
            DependencyKey::new(group, artifact),
            version.map(str::to_string).into(),
        )?;
        Ok(self)
    }

    /// Build from configured entries, preserving their order.
    pub fn from_entries(entries: &[ExpectEntry]) -> Result<Self, ConfigError> {
        let mut expectations = Self::new();
        for entry in entries {
            expectations.insert(
                DependencyKey::new(entry.group.trim(), entry.artifact.trim()),
                entry.version.clone().into(),
            )?;
        }
        Ok(expectations)
    }

    pub fn contains(&self, key: &DependencyKey) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &DependencyKey) -> Option<&ExpectedVersion> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DependencyKey, &ExpectedVersion)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A failed expectation. Created by the matcher only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub key: DependencyKey,
    pub expected: ExpectedVersion,
    pub found: FoundVersion,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mismatch for {} - Expected: {}, Found: {}",
            self.key, self.expected, self.found
        )
    }
}
