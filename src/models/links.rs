//! Hypermedia links attached to API records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single `_links` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL of the linked resource.
    #[serde(default)]
    pub href: String,
}

/// The `_links` object, keyed by relation name (`self`, `product_files`, ...).
pub type Links = BTreeMap<String, Link>;
