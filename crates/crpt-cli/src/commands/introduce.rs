use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crpt_api::CrptClient;
use crpt_core::model::{LpIntroduceGoods, ProductGroup};

use super::validate::read_document;
use super::{load_config, Overrides};

fn read_signature(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut signature = String::new();
        std::io::stdin()
            .read_to_string(&mut signature)
            .context("Failed to read signature from stdin")?;
        return Ok(signature);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read signature {}", path.display()))
}

pub async fn run_introduce(
    overrides: &Overrides,
    document_path: PathBuf,
    group: ProductGroup,
    signature_path: PathBuf,
) -> Result<()> {
    let config = load_config(overrides)?;
    let limiter = Arc::new(config.limiter()?);
    log::info!(
        "Throttle: {} request(s) per {}",
        limiter.capacity(),
        config.time_unit
    );
    let client = CrptClient::new(&config, limiter)?;

    let document = read_document(&document_path)?;
    let signature = read_signature(&signature_path)?;
    let input = LpIntroduceGoods::new(group, document);

    let response = client.introduce_goods(&input, signature.trim_end()).await?;

    println!("Status: {}", response.status);
    println!("{}", response.body);

    response.error_for_status()?;
    Ok(())
}
