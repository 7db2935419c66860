//! The resolved want-graph and its traversal.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use airdep_core::record::ResolvedSet;
use airdep_util::errors::AirdepError;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use semver::Version;

/// A node in the resolved graph: one package at its selected version.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResolvedNode {
    pub name: String,
    pub version: Version,
}

impl fmt::Display for ResolvedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// The resolved packages and their `wants` edges, backed by petgraph.
pub struct ResolvedGraph {
    graph: DiGraph<ResolvedNode, ()>,
    index: HashMap<String, NodeIndex>,
    pub roots: Vec<NodeIndex>,
}

impl ResolvedGraph {
    /// Build the graph of a resolution result.
    ///
    /// `versions` must hold the selected version of every resolved package.
    /// Edges to packages outside the resolved set are an invariant violation.
    pub fn build(
        resolved: &ResolvedSet,
        versions: &BTreeMap<String, Version>,
        roots: &[&str],
    ) -> Result<Self, AirdepError> {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();

        for name in resolved.keys() {
            let version = versions
                .get(name)
                .cloned()
                .ok_or_else(|| AirdepError::InvariantViolation {
                    message: format!("no selected version recorded for '{name}'"),
                })?;
            let idx = graph.add_node(ResolvedNode {
                name: name.clone(),
                version,
            });
            index.insert(name.clone(), idx);
        }

        for (name, record) in resolved {
            let from = index[name];
            for dep in record.dependency_names(name)? {
                let to = *index
                    .get(&dep)
                    .ok_or_else(|| AirdepError::InvariantViolation {
                        message: format!("'{name}' wants '{dep}', which was not resolved"),
                    })?;
                graph.add_edge(from, to, ());
            }
        }

        let roots = roots
            .iter()
            .filter_map(|r| index.get(*r).copied())
            .collect();

        Ok(Self {
            graph,
            index,
            roots,
        })
    }

    /// Look up a node by package name.
    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &ResolvedNode {
        &self.graph[idx]
    }

    /// Direct dependencies of a node, sorted by name.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.sorted_neighbors(idx, Direction::Outgoing)
    }

    /// Reverse dependencies (who wants this node), sorted by name.
    pub fn dependents_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.sorted_neighbors(idx, Direction::Incoming)
    }

    fn sorted_neighbors(&self, idx: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, dir)
            .map(|e| match dir {
                Direction::Outgoing => e.target(),
                Direction::Incoming => e.source(),
            })
            .collect();
        out.sort_by(|a, b| self.graph[*a].name.cmp(&self.graph[*b].name));
        out.dedup();
        out
    }

    /// Print each root's dependency tree.
    ///
    /// A node already shown on the current branch is printed with `(*)` and
    /// not expanded again, which also keeps cycles finite.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = String::new();
        for &root in &self.roots {
            output.push_str(&format!("{}\n", self.graph[root]));
            let mut on_branch = HashSet::new();
            on_branch.insert(root);
            let deps = self.dependencies_of(root);
            let count = deps.len();
            for (i, child) in deps.into_iter().enumerate() {
                self.print_subtree(
                    &mut output,
                    child,
                    "",
                    i == count - 1,
                    1,
                    max_depth,
                    &mut on_branch,
                );
            }
        }
        output
    }

    #[allow(clippy::too_many_arguments)]
    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
        on_branch: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let node = &self.graph[idx];

        if on_branch.contains(&idx) {
            output.push_str(&format!("{prefix}{connector}{node} (*)\n"));
            return;
        }
        output.push_str(&format!("{prefix}{connector}{node}\n"));

        if let Some(max) = max_depth {
            if depth >= max {
                return;
            }
        }

        on_branch.insert(idx);
        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let deps = self.dependencies_of(idx);
        let count = deps.len();
        for (i, child) in deps.into_iter().enumerate() {
            self.print_subtree(
                output,
                child,
                &child_prefix,
                i == count - 1,
                depth + 1,
                max_depth,
                on_branch,
            );
        }
        on_branch.remove(&idx);
    }

    /// Find a chain of `wants` edges from some root to `target`.
    pub fn find_path(&self, target: &str) -> Option<Vec<&ResolvedNode>> {
        let target = self.find(target)?;
        for &root in &self.roots {
            let mut path = Vec::new();
            let mut visited = HashSet::new();
            if self.dfs_path(root, target, &mut path, &mut visited) {
                return Some(path.iter().map(|&idx| &self.graph[idx]).collect());
            }
        }
        None
    }

    fn dfs_path(
        &self,
        current: NodeIndex,
        target: NodeIndex,
        path: &mut Vec<NodeIndex>,
        visited: &mut HashSet<NodeIndex>,
    ) -> bool {
        path.push(current);
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            path.pop();
            return false;
        }
        for child in self.dependencies_of(current) {
            if self.dfs_path(child, target, path, visited) {
                return true;
            }
        }
        path.pop();
        false
    }

    /// Print the tree of packages that (transitively) want `target`.
    pub fn print_inverted_tree(&self, target: &str) -> String {
        let mut output = String::new();
        let Some(idx) = self.find(target) else {
            return output;
        };

        output.push_str(&format!("{}\n", self.graph[idx]));

        let mut on_branch = HashSet::new();
        on_branch.insert(idx);

        let dependents = self.dependents_of(idx);
        let count = dependents.len();
        for (i, dep_idx) in dependents.into_iter().enumerate() {
            self.print_inverted_subtree(&mut output, dep_idx, "", i == count - 1, &mut on_branch);
        }

        output
    }

    fn print_inverted_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        on_branch: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let node = &self.graph[idx];

        if !on_branch.insert(idx) {
            output.push_str(&format!("{prefix}{connector}{node} (*)\n"));
            return;
        }
        output.push_str(&format!("{prefix}{connector}{node}\n"));

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let dependents = self.dependents_of(idx);
        let count = dependents.len();
        for (i, dep_idx) in dependents.into_iter().enumerate() {
            self.print_inverted_subtree(output, dep_idx, &child_prefix, i == count - 1, on_branch);
        }

        on_branch.remove(&idx);
    }

    /// Number of resolved packages.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airdep_core::record::PackageRecord;

    fn build(json: &str, roots: &[&str]) -> ResolvedGraph {
        let raw: BTreeMap<String, (String, PackageRecord)> = serde_json::from_str(json).unwrap();
        let mut resolved = ResolvedSet::new();
        let mut versions = BTreeMap::new();
        for (name, (version, record)) in raw {
            versions.insert(name.clone(), Version::parse(&version).unwrap());
            resolved.insert(name, record);
        }
        ResolvedGraph::build(&resolved, &versions, roots).unwrap()
    }

    #[test]
    fn tree_printing() {
        let g = build(
            r#"{
                "app": ["1.0.0", {"wants": {"b": "*", "a": "*"}}],
                "a": ["1.1.0", {"wants": {"c": "*"}}],
                "b": ["2.0.0", {}],
                "c": ["3.0.0", {}]
            }"#,
            &["app"],
        );
        let tree = g.print_tree(None);
        assert_eq!(
            tree,
            "app v1.0.0\n├── a v1.1.0\n│   └── c v3.0.0\n└── b v2.0.0\n"
        );
    }

    #[test]
    fn tree_depth_limit() {
        let g = build(
            r#"{
                "app": ["1.0.0", {"wants": {"a": "*"}}],
                "a": ["1.0.0", {"wants": {"c": "*"}}],
                "c": ["1.0.0", {}]
            }"#,
            &["app"],
        );
        let tree = g.print_tree(Some(1));
        assert!(tree.contains("a v1.0.0"));
        assert!(!tree.contains("c v1.0.0"));
    }

    #[test]
    fn tree_marks_cycles() {
        let g = build(
            r#"{
                "a": ["1.0.0", {"wants": {"b": "*"}}],
                "b": ["1.0.0", {"wants": {"a": "*"}}]
            }"#,
            &["a"],
        );
        let tree = g.print_tree(None);
        assert_eq!(tree, "a v1.0.0\n└── b v1.0.0\n    └── a v1.0.0 (*)\n");
    }

    #[test]
    fn find_path_exists() {
        let g = build(
            r#"{
                "app": ["1.0.0", {"wants": {"a": "*"}}],
                "a": ["1.0.0", {"wants": {"b": "*"}}],
                "b": ["1.0.0", {}]
            }"#,
            &["app"],
        );
        let path = g.find_path("b").unwrap();
        let names: Vec<&str> = path.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["app", "a", "b"]);
    }

    #[test]
    fn find_path_not_found() {
        let g = build(r#"{"app": ["1.0.0", {}]}"#, &["app"]);
        assert!(g.find_path("missing").is_none());
    }

    #[test]
    fn inverted_tree() {
        let g = build(
            r#"{
                "app": ["1.0.0", {"wants": {"a": "*", "b": "*"}}],
                "a": ["1.0.0", {"wants": {"shared": "*"}}],
                "b": ["1.0.0", {"wants": {"shared": "*"}}],
                "shared": ["1.0.0", {}]
            }"#,
            &["app"],
        );
        let inv = g.print_inverted_tree("shared");
        assert_eq!(
            inv,
            "shared v1.0.0\n├── a v1.0.0\n│   └── app v1.0.0\n└── b v1.0.0\n    └── app v1.0.0\n"
        );
        assert_eq!(g.dependents_of(g.find("shared").unwrap()).len(), 2);
    }

    #[test]
    fn dangling_edge_is_invariant_violation() {
        let raw: BTreeMap<String, PackageRecord> =
            serde_json::from_str(r#"{"app": {"wants": {"ghost": "*"}}}"#).unwrap();
        let mut versions = BTreeMap::new();
        versions.insert("app".to_string(), Version::new(1, 0, 0));
        let result = ResolvedGraph::build(&raw, &versions, &["app"]);
        assert!(matches!(
            result.err(),
            Some(AirdepError::InvariantViolation { .. })
        ));
    }
}
