//! `rmd duration <url>` – estimate playback duration.

use anyhow::{Context, Result};
use rmd_core::config::RmdConfig;
use rmd_core::estimate;

pub async fn run_duration(cfg: &RmdConfig, url: &str, human: bool) -> Result<()> {
    let cfg = cfg.clone();
    let url_owned = url.to_string();
    let seconds =
        tokio::task::spawn_blocking(move || estimate::estimate_duration_url(&url_owned, &cfg))
            .await
            .context("estimate task join")??;

    if human {
        println!("{}", format_hms(seconds));
    } else {
        println!("{}", seconds);
    }
    Ok(())
}

fn format_hms(total_seconds: u64) -> String {
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    format!("{}:{:02}:{:02}", h, m, s)
}
