use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use selscan_core::config::SourcesConfig;

/// Resolve every requested source and concatenate the matched stylesheets
/// into one input string, in sorted file order.
///
/// A directory is walked for `*.css` files filtered through the configured
/// exclude patterns; anything else that is not an existing file is treated
/// as a glob pattern. Finding nothing is degraded input, not an error: a
/// message goes to stderr and the pipeline runs on empty CSS, which then
/// produces its own "no selectors" warning and the empty report.
pub fn gather(sources: &[String], config: &SourcesConfig) -> Result<String> {
    let exclude = build_globset(&config.exclude)?;

    let mut files: Vec<PathBuf> = Vec::new();
    for source in sources {
        if source.starts_with("http://") || source.starts_with("https://") {
            anyhow::bail!(
                "remote sources are not supported; download '{source}' and pass the local file"
            );
        }
        let path = Path::new(source);
        if path.is_dir() {
            files.extend(walk_stylesheets(path, &exclude));
        } else if path.is_file() {
            files.push(path.to_path_buf());
        } else {
            files.extend(resolve_glob(source)?);
        }
    }
    files.sort();
    files.dedup();

    if files.is_empty() {
        eprintln!(
            "{} {}",
            "Failed to find any stylesheets matching".red(),
            sources.join(", ").yellow().underline()
        );
        return Ok(String::new());
    }

    let mut css = String::new();
    for file in &files {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        css.push_str(&content);
        css.push('\n');
    }
    Ok(css)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .with_context(|| format!("invalid exclude pattern '{pattern}'"))?;
        builder.add(glob);
    }
    builder.build().context("failed to compile exclude patterns")
}

fn walk_stylesheets(dir: &Path, exclude: &GlobSet) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            let p = e.path();
            if !p.extension().is_some_and(|ext| ext == "css") {
                return false;
            }
            let normalized = p.to_string_lossy().replace('\\', "/");
            !exclude.is_match(&normalized)
        })
        .map(|e| e.into_path())
        .collect()
}

/// Resolve a user-supplied glob pattern. An explicitly written pattern is
/// taken at face value; the configured excludes do not apply to it.
fn resolve_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern)
        .with_context(|| format!("invalid glob pattern '{pattern}'"))?;
    Ok(paths
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect())
}
