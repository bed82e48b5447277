//! Builds the plugin config and release context from files and flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use plugin::{PluginConfig, ReleaseContext};
use serde::de::DeserializeOwned;

use crate::args::StepArgs;

pub fn load_config(args: &StepArgs) -> Result<PluginConfig> {
    let mut config: PluginConfig = match &args.config {
        Some(path) => read_json(path).context("loading plugin configuration")?,
        None => PluginConfig::default(),
    };

    if let Some(location) = &args.document_location {
        config.document_location = Some(location.clone());
    }
    if args.no_fallback {
        config.fallback_directory = None;
    } else if let Some(dir) = &args.fallback_directory {
        config.fallback_directory = Some(dir.clone());
    }
    Ok(config)
}

/// Loads the release context and anchors it to a working directory.
///
/// A relative `cwd` (from the file or `--cwd`) is taken relative to
/// `process_cwd`; with no `cwd` at all, `process_cwd` is used.
pub fn load_context(
    args: &StepArgs,
    next_version: Option<&str>,
    process_cwd: &Path,
) -> Result<ReleaseContext> {
    let mut context: ReleaseContext = match &args.context {
        Some(path) => read_json(path).context("loading release context")?,
        None => ReleaseContext::default(),
    };

    let cwd = args.cwd.clone().or_else(|| context.cwd.take());
    context.cwd = Some(match cwd {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => process_cwd.join(dir),
        None => process_cwd.to_path_buf(),
    });

    if let Some(version) = next_version {
        context = context.with_next_version(version);
    }
    Ok(context)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("`{}` is not valid JSON", path.display()))
}
