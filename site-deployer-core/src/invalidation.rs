//! Derivation of CDN invalidation paths from uploaded keys.
//!
//! Each key becomes `/` + its percent-escaped form. A key naming an index
//! document (`.../index.html`) also invalidates the directory forms a CDN may
//! serve the same object under: `/dir/` and `/dir`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

use crate::ledger::UploadLedger;

/// Everything except ASCII alphanumerics and `/ . -` is escaped. Space becomes `%20`.
const PATH_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'/').remove(b'.').remove(b'-');

const INDEX_DOCUMENT: &str = "index.html";

/// Sorted, deduplicated invalidation paths; each starts with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvalidationPathSet {
    paths: BTreeSet<String>,
}

impl InvalidationPathSet {
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.paths.into_iter().collect()
    }

    fn insert(&mut self, path: &str) {
        if self.paths.insert(path.to_string()) {
            info!(path, "[FLUSH] Invalidation path");
        }
    }
}

/// Percent-escape an object key for use in a URL path.
pub fn escape_key(key: &str) -> String {
    utf8_percent_encode(key, PATH_SET).to_string()
}

/// Invalidation paths for a single key, in insertion order.
pub fn paths_for_key(key: &str) -> Vec<String> {
    let escaped = escape_key(key);
    let path = if escaped.starts_with('/') {
        escaped
    } else {
        format!("/{escaped}")
    };

    let mut out = vec![path.clone()];
    if !path.ends_with(&format!("/{INDEX_DOCUMENT}")) {
        return out;
    }

    let path_no_file = &path[..path.len() - INDEX_DOCUMENT.len()];
    if path_no_file.trim().is_empty() {
        return out;
    }
    out.push(path_no_file.to_string());

    let path_no_slash = &path_no_file[..path_no_file.len() - 1];
    if path_no_slash.trim().is_empty() {
        return out;
    }
    out.push(path_no_slash.to_string());
    out
}

/// Derive the invalidation path set covering every key in `ledger`.
pub fn derive_invalidation_paths(ledger: &UploadLedger) -> InvalidationPathSet {
    let mut set = InvalidationPathSet::default();
    for key in ledger.iter() {
        for path in paths_for_key(key) {
            set.insert(&path);
        }
    }
    set
}
