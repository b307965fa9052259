//! Expectation matching.

use crate::model::{Expectations, FoundVersion, FoundVersions, Mismatch};

/// Mismatches between `expected` and `found`, in the iteration order of
/// `expected`. Keys missing from `found` count as absent.
pub fn find_mismatches(expected: &Expectations, found: &FoundVersions) -> Vec<Mismatch> {
    expected
        .iter()
        .filter_map(|(key, want)| {
            let have = found.get(key).cloned().unwrap_or(FoundVersion::Absent);
            if have.satisfies(want) {
                None
            } else {
                Some(Mismatch {
                    key: key.clone(),
                    expected: want.clone(),
                    found: have,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DependencyKey, ExpectedVersion};

    #[test]
    fn test_wrong_version_and_missing() {
        let exp = Expectations::new()
            .with("g", "a", Some("1.0.0"))
            .and_then(|e| e.with("g", "b", None))
            .and_then(|e| e.with("g", "c", Some("3")))
            .unwrap();
        let mut found = FoundVersions::new();
        found.insert(DependencyKey::new("g", "a"), FoundVersion::Declared("0.9.0".into()));
        found.insert(DependencyKey::new("g", "c"), FoundVersion::Declared("3".into()));

        let mismatches = find_mismatches(&exp, &found);
        assert_eq!(mismatches.len(), 2);
        assert_eq!(mismatches[0].key, DependencyKey::new("g", "a"));
        assert_eq!(mismatches[0].found, FoundVersion::Declared("0.9.0".into()));
        assert_eq!(mismatches[1].key, DependencyKey::new("g", "b"));
        assert_eq!(mismatches[1].expected, ExpectedVersion::Any);
        assert_eq!(mismatches[1].found, FoundVersion::Absent);
    }

    #[test]
    fn test_empty_expectations_never_mismatch() {
        let mut found = FoundVersions::new();
        found.insert(DependencyKey::new("g", "a"), FoundVersion::Absent);
        assert!(find_mismatches(&Expectations::new(), &found).is_empty());
    }
}
