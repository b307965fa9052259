//! Dependency extraction from a parsed descriptor.

use crate::descriptor::{Descriptor, Element};
use crate::model::{DependencyKey, Expectations, FoundVersion, FoundVersions};

/// Versions declared for the keys in `expectations`.
///
/// When a key is declared more than once, the last declaration in document
/// order wins.
pub fn extract(descriptor: &Descriptor, expectations: &Expectations) -> FoundVersions {
    collect(descriptor, |key| expectations.contains(key))
}

/// Versions declared for every dependency in the descriptor.
pub fn extract_all(descriptor: &Descriptor) -> FoundVersions {
    collect(descriptor, |_| true)
}

/// Every well-formed dependency declaration in document order, duplicates included.
pub fn declarations(descriptor: &Descriptor) -> impl Iterator<Item = (DependencyKey, FoundVersion)> + '_ {
    let ns = descriptor.namespace();
    descriptor.find_all("dependency").filter_map(move |dep| {
        let group = non_empty_child(dep, ns, "groupId")?;
        let artifact = non_empty_child(dep, ns, "artifactId")?;
        let version = match non_empty_child(dep, ns, "version") {
            Some(v) => FoundVersion::Declared(v.to_string()),
            None => FoundVersion::Absent,
        };
        Some((DependencyKey::new(group, artifact), version))
    })
}

fn collect(descriptor: &Descriptor, wanted: impl Fn(&DependencyKey) -> bool) -> FoundVersions {
    let mut found = FoundVersions::new();
    for (key, version) in declarations(descriptor) {
        if !wanted(&key) {
            continue;
        }
        tracing::debug!(dependency = %key, version = %version, "dependency declared");
        if let Some(previous) = found.insert(key.clone(), version) {
            tracing::debug!(
                dependency = %key,
                replaced = %previous,
                "duplicate declaration, keeping the later one"
            );
        }
    }
    found
}

fn non_empty_child<'a>(element: &'a Element, ns: Option<&str>, local: &str) -> Option<&'a str> {
    element
        .child(ns, local)
        .map(Element::text)
        .filter(|t| !t.is_empty())
}
