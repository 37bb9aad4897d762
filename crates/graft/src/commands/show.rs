//! Single document inspection command.

use std::fs;
use std::path::Path;

use anyhow::Result;
use graft_engine::DocumentRewriter;

/// Run the show command.
pub fn run(file: &Path, map: bool) -> Result<()> {
    let source = fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file.display(), e))?;

    let result = DocumentRewriter::new().rewrite(&source)?;

    if map {
        match &result.map {
            Some(map) => println!("{}", serde_json::to_string_pretty(map)?),
            None => tracing::info!("Document unchanged, no position map"),
        }
        return Ok(());
    }

    if !result.changed {
        tracing::info!("Document unchanged");
    }
    print!("{}", result.text);

    Ok(())
}
