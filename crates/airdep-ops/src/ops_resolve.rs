//! Operation: resolve the manifest's wants and write `airbuild.json`.

use std::path::{Path, PathBuf};

use airdep_core::build_manifest::BuildManifest;
use airdep_core::config::GlobalConfig;
use airdep_core::BUILD_MANIFEST_FILE;
use airdep_resolver::resolver::{self, Resolution};
use airdep_util::fs::{parent_dir, resolve_relative};

/// Options for `airdep resolve`.
#[derive(Debug, Default)]
pub struct ResolveOptions {
    /// Where to write the build manifest, overriding config and default.
    pub output: Option<PathBuf>,
    /// Print the narrowing report.
    pub verbose: bool,
}

/// What a successful `resolve` produced.
#[derive(Debug)]
pub struct ResolveOutcome {
    pub output_path: PathBuf,
    pub build_manifest: BuildManifest,
    pub resolution: Resolution,
}

/// Resolve the manifest at `manifest_path` and write the build manifest.
///
/// Nothing is written unless resolution succeeds.
pub fn resolve(
    manifest_path: &Path,
    config: &GlobalConfig,
    opts: &ResolveOptions,
) -> miette::Result<ResolveOutcome> {
    let (manifest, catalog) = crate::load_catalog(manifest_path, config)?;
    if manifest.wants.is_empty() {
        airdep_util::progress::status_warn(
            "Warning",
            &format!("{} declares no wants", manifest_path.display()),
        );
    }
    let resolution = resolver::resolve(catalog, &manifest.wants)?;

    if opts.verbose {
        eprint!("{}", resolution.report);
        if resolution.report.is_empty() {
            eprintln!();
        }
    }

    let build_manifest = BuildManifest::generate(manifest.root_names(), &resolution.resolved)?;
    let output_path = output_path(manifest_path, config, opts);
    build_manifest.write_to(&output_path)?;

    airdep_util::progress::status("Wrote", &output_path.display().to_string());

    Ok(ResolveOutcome {
        output_path,
        build_manifest,
        resolution,
    })
}

/// `-o` as given, else the config's `output.file` next to the manifest,
/// else `airbuild.json` next to the manifest.
pub fn output_path(manifest_path: &Path, config: &GlobalConfig, opts: &ResolveOptions) -> PathBuf {
    if let Some(ref explicit) = opts.output {
        return explicit.clone();
    }
    let base = parent_dir(manifest_path);
    match config.output.file {
        Some(ref file) => resolve_relative(base, Path::new(file)),
        None => base.join(BUILD_MANIFEST_FILE),
    }
}
