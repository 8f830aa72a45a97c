use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crpt_core::model::Document;

/// Read and parse a document file.
pub fn read_document(path: &Path) -> Result<Document> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    Document::from_json(&json)
        .with_context(|| format!("Failed to parse document {}", path.display()))
}

pub fn run_validate(path: PathBuf) -> Result<()> {
    let document = read_document(&path)?;
    document
        .validate()
        .with_context(|| format!("Document {} is invalid", path.display()))?;

    println!("✓ {} is valid", path.display());
    println!("  doc_id: {}", document.doc_id);
    println!("  products: {}", document.products.len());
    Ok(())
}
