//! Flat error reports for [`Invalid`] trees.
//!
//! Renderers that place messages next to fields want a map from field path
//! to message text rather than a tree. [`ErrorReport`] provides two views:
//!
//! - [`as_leaf_map`](ErrorReport::as_leaf_map): one entry per leaf failure,
//!   carrying the messages of every node on the way down.
//! - [`as_flat_map`](ErrorReport::as_flat_map): one entry per node that has
//!   a message of its own, so parents can display errors too.
//!
//! Keys are the dotted paths of node keys from the root; anonymous nodes
//! contribute nothing to the path.

use std::collections::{BTreeMap, BTreeSet};

use schemaker_core::Invalid;

/// Separator between messages that share a key.
const MESSAGE_SEPARATOR: &str = "; ";

/// Map-shaped views of a validation failure tree.
pub trait ErrorReport {
    /// Returns one entry per leaf path.
    fn as_leaf_map(&self) -> BTreeMap<String, String>;

    /// Returns one entry per node that carries messages, parents included.
    ///
    /// Identical `(path, message)` pairs are reported once.
    fn as_flat_map(&self) -> BTreeMap<String, String>;
}

impl ErrorReport for Invalid {
    fn as_leaf_map(&self) -> BTreeMap<String, String> {
        let mut report = BTreeMap::new();
        for path in self.paths() {
            let mut keys = Vec::new();
            let mut messages: Vec<&str> = Vec::new();
            for node in path {
                if let Some(key) = node.key.as_deref().filter(|k| !k.is_empty()) {
                    keys.push(key);
                }
                messages.extend(node.messages.iter().map(String::as_str));
            }
            report.insert(keys.join("."), messages.join(MESSAGE_SEPARATOR));
        }
        report
    }

    fn as_flat_map(&self) -> BTreeMap<String, String> {
        let mut pairs: BTreeSet<(String, &str)> = BTreeSet::new();
        for path in self.paths() {
            let mut keys = Vec::new();
            for node in path {
                if let Some(key) = node.key.as_deref().filter(|k| !k.is_empty()) {
                    keys.push(key);
                }
                let joined = keys.join(".");
                for message in &node.messages {
                    pairs.insert((joined.clone(), message.as_str()));
                }
            }
        }

        let mut report: BTreeMap<String, String> = BTreeMap::new();
        for (key, message) in pairs {
            report
                .entry(key)
                .and_modify(|existing| {
                    existing.push_str(MESSAGE_SEPARATOR);
                    existing.push_str(message);
                })
                .or_insert_with(|| message.to_string());
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Invalid {
        Invalid::node("contact")
            .with_message("Check the highlighted fields")
            .with_child(Invalid::new("email", "Invalid email address"))
            .with_child(
                Invalid::node("phones")
                    .with_child(Invalid::new("0", "Required"))
                    .with_child(Invalid::new("1", "Too short").with_message("Not a number")),
            )
    }

    #[test]
    fn test_flat_map_includes_parents() {
        let report = sample().as_flat_map();
        assert_eq!(report["contact"], "Check the highlighted fields");
        assert_eq!(report["contact.email"], "Invalid email address");
        assert_eq!(report["contact.phones.0"], "Required");
        assert_eq!(report["contact.phones.1"], "Not a number; Too short");
        assert!(!report.contains_key("contact.phones"));
    }

    #[test]
    fn test_flat_map_dedups_parent_messages() {
        let report = sample().as_flat_map();
        assert_eq!(report["contact"].matches("Check").count(), 1);
    }

    #[test]
    fn test_leaf_map_carries_ancestor_messages() {
        let report = sample().as_leaf_map();
        assert_eq!(report.len(), 3);
        assert_eq!(
            report["contact.email"],
            "Check the highlighted fields; Invalid email address"
        );
        assert!(!report.contains_key("contact"));
    }

    #[test]
    fn test_anonymous_root_adds_no_prefix() {
        let root = Invalid::default().with_child(Invalid::new("name", "Required"));
        assert_eq!(root.as_flat_map()["name"], "Required");
        assert_eq!(root.as_leaf_map()["name"], "Required");
    }

    #[test]
    fn test_single_node() {
        let report = Invalid::new("age", "Required").as_flat_map();
        assert_eq!(report.len(), 1);
        assert_eq!(report["age"], "Required");
    }
}
