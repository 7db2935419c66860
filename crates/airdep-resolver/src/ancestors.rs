//! The chain of packages above the current one during a depth-first walk.
//!
//! Only ancestors are tracked, not everything visited: two sibling branches
//! that reach the same package do not see each other's paths.

use std::fmt;

/// Ordered package names from a root down to the current package's parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorPath {
    names: Vec<String>,
}

impl AncestorPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, package: &str) -> bool {
        self.names.iter().any(|n| n == package)
    }

    /// A copy of this path extended by `package`, for descending one level.
    pub fn with(&self, package: &str) -> Self {
        let mut names = Vec::with_capacity(self.names.len() + 1);
        names.extend(self.names.iter().cloned());
        names.push(package.to_string());
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Display for AncestorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(" -> "))
    }
}
