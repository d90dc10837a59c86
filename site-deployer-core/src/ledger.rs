use serde::Serialize;
use std::collections::BTreeSet;

/// Keys successfully written during one deployment run.
///
/// Sorted and deduplicated; keys are only ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadLedger {
    keys: BTreeSet<String>,
}

impl UploadLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key`. Returns false if it was already present.
    pub fn record(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for UploadLedger {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
