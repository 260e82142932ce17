//! `rmd frame <url>` – decode and print the first MPEG frame header.

use anyhow::{Context, Result};
use rmd_core::config::RmdConfig;
use rmd_core::estimate;
use rmd_core::fetch::HttpByteSource;

pub async fn run_frame(cfg: &RmdConfig, url: &str) -> Result<()> {
    let cfg = cfg.clone();
    let url_owned = url.to_string();
    let (offset, frame) = tokio::task::spawn_blocking(move || {
        let source = HttpByteSource::new(&url_owned, &cfg)?;
        estimate::probe_first_frame(&source)
    })
    .await
    .context("frame task join")??;

    println!("offset:        {}", offset);
    println!("bitrate:       {} kbps", frame.bitrate_kbps);
    println!("sampling rate: {} Hz", frame.sampling_rate_hz);
    println!("channels:      {}", if frame.stereo { "stereo" } else { "mono" });
    println!(
        "raw bits:      version={} layer={} bitrate={} sampling={} channel_mode={}",
        frame.mpeg_version_bits,
        frame.layer_bits,
        frame.bitrate_bits,
        frame.sampling_rate_bits,
        frame.channel_mode_bits
    );
    Ok(())
}
