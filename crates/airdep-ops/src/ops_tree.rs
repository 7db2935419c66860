//! Operation: display the resolved want-graph.

use std::path::Path;

use airdep_core::config::GlobalConfig;
use airdep_resolver::graph::ResolvedGraph;
use airdep_resolver::resolver;

/// Options for `airdep tree`.
#[derive(Debug, Default)]
pub struct TreeOptions {
    /// Maximum tree depth to display.
    pub depth: Option<usize>,
    /// Show the chain of wants leading to this package.
    pub why: Option<String>,
    /// Show everything that wants this package.
    pub inverted: Option<String>,
}

/// Resolve the manifest and render the requested view of the graph.
pub fn tree(manifest_path: &Path, config: &GlobalConfig, opts: &TreeOptions) -> miette::Result<String> {
    let (manifest, catalog) = crate::load_catalog(manifest_path, config)?;
    let resolution = resolver::resolve(catalog, &manifest.wants)?;
    let graph = ResolvedGraph::build(
        &resolution.resolved,
        &resolution.versions,
        &manifest.root_names(),
    )?;

    if let Some(ref target) = opts.why {
        return Ok(match graph.find_path(target) {
            Some(path) => {
                let mut out = format!("Path to {target}:\n");
                for (i, node) in path.iter().enumerate() {
                    out.push_str(&format!("{}{node}\n", "  ".repeat(i)));
                }
                out
            }
            None => format!("Package '{target}' is not in the resolved graph.\n"),
        });
    }

    if let Some(ref target) = opts.inverted {
        let inverted = graph.print_inverted_tree(target);
        return Ok(if inverted.is_empty() {
            format!("Package '{target}' is not in the resolved graph.\n")
        } else {
            inverted
        });
    }

    if graph.is_empty() {
        return Ok("No packages resolved.\n".to_string());
    }
    Ok(graph.print_tree(opts.depth))
}
