//! Dependency resolution engine: narrows a multi-version catalog under the
//! constraints of a want-graph, then flattens it to one version per package.

pub mod ancestors;
pub mod graph;
pub mod report;
pub mod resolver;
pub mod version;
