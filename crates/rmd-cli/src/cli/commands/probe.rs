//! `rmd probe <url>` – show remote metadata.

use anyhow::{Context, Result};
use rmd_core::config::RmdConfig;
use rmd_core::fetch::HttpByteSource;

pub async fn run_probe(cfg: &RmdConfig, url: &str) -> Result<()> {
    let cfg = cfg.clone();
    let url_owned = url.to_string();
    let probe = tokio::task::spawn_blocking(move || {
        let source = HttpByteSource::new(&url_owned, &cfg)?;
        source.head()
    })
    .await
    .context("probe task join")??;

    match probe.content_length {
        Some(n) => println!("content-length: {}", n),
        None => println!("content-length: unknown"),
    }
    println!(
        "accept-ranges:  {}",
        if probe.accept_ranges { "bytes" } else { "no" }
    );
    Ok(())
}
