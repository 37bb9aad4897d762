//! Batch rewrite command.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use graft_engine::DocumentRewriter;
use rayon::prelude::*;
use serde::Deserialize;
use walkdir::WalkDir;

/// Configuration file structure (graft.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    source: SourceConfig,

    #[serde(default)]
    output: OutputConfig,
}

#[derive(Debug, Deserialize)]
struct SourceConfig {
    #[serde(default = "default_source_dir")]
    dir: String,

    #[serde(default = "default_extensions")]
    extensions: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: default_source_dir(),
            extensions: default_extensions(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct OutputConfig {
    #[serde(default)]
    maps: bool,
}

fn default_source_dir() -> String {
    "src".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["astro".to_string()]
}

/// Load configuration from graft.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// One discovered source document.
#[derive(Debug)]
struct SourceFile {
    /// Walk root the file was found under, used for relative output paths
    root: PathBuf,

    /// Full path to the document
    path: PathBuf,
}

/// Collect eligible documents under the given roots.
///
/// Directories are walked recursively and gated by extension; explicitly
/// named files are taken as-is.
fn discover(roots: &[PathBuf], extensions: &[String]) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for root in roots {
        if !root.exists() {
            anyhow::bail!("Path not found: {}", root.display());
        }
        if root.is_file() {
            files.push(SourceFile {
                root: root.parent().unwrap_or(Path::new("")).to_path_buf(),
                path: root.clone(),
            });
            continue;
        }
        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !extensions.iter().any(|wanted| wanted == ext) {
                continue;
            }
            files.push(SourceFile {
                root: root.clone(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(files)
}

#[derive(Debug)]
enum Outcome {
    Changed,
    Unchanged,
    Failed,
}

/// Run the apply command.
pub fn run(
    paths: Vec<PathBuf>,
    out: Option<&Path>,
    check: bool,
    maps: bool,
    config_path: &Path,
) -> Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let roots = if paths.is_empty() {
        vec![PathBuf::from(&config.source.dir)]
    } else {
        paths
    };
    let files = discover(&roots, &config.source.extensions)?;
    let emit_maps = maps || config.output.maps;

    let rewriter = DocumentRewriter::new();
    let outcomes: Vec<Outcome> = files
        .par_iter()
        .map(|file| process_file(&rewriter, file, out, check, emit_maps))
        .collect();

    let changed = outcomes
        .iter()
        .filter(|o| matches!(o, Outcome::Changed))
        .count();
    let unchanged = outcomes
        .iter()
        .filter(|o| matches!(o, Outcome::Unchanged))
        .count();
    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, Outcome::Failed))
        .count();

    if check {
        tracing::info!(
            "Checked {} documents in {}ms: {} need rewriting, {} unchanged",
            files.len(),
            start.elapsed().as_millis(),
            changed,
            unchanged
        );
    } else {
        tracing::info!(
            "Processed {} documents in {}ms: {} rewritten, {} unchanged",
            files.len(),
            start.elapsed().as_millis(),
            changed,
            unchanged
        );
    }

    if failed > 0 {
        anyhow::bail!("{} documents failed to rewrite", failed);
    }
    if check && changed > 0 {
        anyhow::bail!("{} documents need rewriting", changed);
    }
    Ok(())
}

fn process_file(
    rewriter: &DocumentRewriter,
    file: &SourceFile,
    out: Option<&Path>,
    check: bool,
    emit_maps: bool,
) -> Outcome {
    match rewrite_file(rewriter, file, out, check, emit_maps) {
        Ok(true) => Outcome::Changed,
        Ok(false) => Outcome::Unchanged,
        Err(e) => {
            tracing::warn!("Failed to rewrite {}: {}", file.path.display(), e);
            Outcome::Failed
        }
    }
}

fn rewrite_file(
    rewriter: &DocumentRewriter,
    file: &SourceFile,
    out: Option<&Path>,
    check: bool,
    emit_maps: bool,
) -> Result<bool> {
    let source = fs::read_to_string(&file.path)?;
    let result = rewriter.rewrite(&source)?;

    if !result.changed {
        return Ok(false);
    }
    if check {
        tracing::info!("Would rewrite {}", file.path.display());
        return Ok(true);
    }

    let target = match out {
        Some(out_dir) => {
            let relative = file.path.strip_prefix(&file.root).unwrap_or(&file.path);
            let target = out_dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            target
        }
        None => file.path.clone(),
    };

    fs::write(&target, &result.text)?;
    tracing::debug!("Rewrote {}", target.display());

    if emit_maps {
        if let Some(map) = &result.map {
            fs::write(map_path_for(&target), serde_json::to_string_pretty(map)?)?;
        }
    }

    Ok(true)
}

/// `button.astro` becomes `button.astro.map`.
fn map_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".map");
    path.with_file_name(name)
}
