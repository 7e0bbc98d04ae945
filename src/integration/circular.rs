//! Direct circular reference detection
//!
//! Only two-script cycles are reported (A imports B and B imports A).
//! Longer cycles such as A -> B -> C -> A go unnoticed.

use std::collections::{BTreeMap, BTreeSet};

/// Directed "importer depends on exporter" edges between scripts
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `from` reads an output of `to`. Self-links are ignored.
    pub fn add_link(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        self.edges
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
    }

    pub fn has_link(&self, from: &str, to: &str) -> bool {
        self.edges.get(from).is_some_and(|targets| targets.contains(to))
    }

    /// Number of distinct directed links
    pub fn link_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .flat_map(|(from, targets)| targets.iter().map(move |to| (from.as_str(), to.as_str())))
    }

    /// Each unordered pair linked both ways, once, smaller name first
    pub fn circular_pairs(&self) -> Vec<(String, String)> {
        self.links()
            .filter(|(from, to)| from < to && self.has_link(to, from))
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect()
    }

    /// Whether the link takes part in a two-script cycle
    pub fn is_circular(&self, from: &str, to: &str) -> bool {
        self.has_link(from, to) && self.has_link(to, from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_pair_reported_once() {
        let mut graph = LinkGraph::new();
        graph.add_link("b.pine", "a.pine");
        graph.add_link("a.pine", "b.pine");
        graph.add_link("a.pine", "b.pine");
        graph.add_link("c.pine", "a.pine");

        assert_eq!(graph.link_count(), 3);
        assert_eq!(
            graph.circular_pairs(),
            vec![("a.pine".to_string(), "b.pine".to_string())]
        );
        assert!(graph.is_circular("b.pine", "a.pine"));
        assert!(!graph.is_circular("c.pine", "a.pine"));
    }

    #[test]
    fn test_three_cycle_not_reported() {
        let mut graph = LinkGraph::new();
        graph.add_link("a", "b");
        graph.add_link("b", "c");
        graph.add_link("c", "a");
        assert!(graph.circular_pairs().is_empty());
    }

    #[test]
    fn test_self_link_ignored() {
        let mut graph = LinkGraph::new();
        graph.add_link("a", "a");
        assert_eq!(graph.link_count(), 0);
    }
}
