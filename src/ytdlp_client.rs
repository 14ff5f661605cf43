// yt-dlp client wrapper using command-line tool
// Calls the yt-dlp executable directly so the crate carries no extractor logic

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

pub struct YtDlpClient;

impl YtDlpClient {
    /// Download every entry of a playlist into `output_dir`, one file per
    /// video named by its title, merged to mp4.
    pub async fn download_playlist(
        playlist_url: &str,
        output_dir: &Path,
        max_height: u32,
    ) -> Result<(), String> {
        if let Err(e) = tokio::fs::create_dir_all(output_dir).await {
            return Err(format!("Failed to create output directory: {}", e));
        }

        // Check if yt-dlp is installed
        Self::check_ytdlp_installed().await?;

        tracing::info!("📥 Downloading playlist: {}", playlist_url);

        let output_template = format!("{}/%(title)s.%(ext)s", output_dir.display());

        // Progress and error text stream straight to the operator's console
        let status = Command::new("yt-dlp")
            .arg("--output")
            .arg(&output_template)
            .arg("--format")
            .arg(Self::format_selector(max_height))
            .arg("--merge-output-format")
            .arg("mp4")
            .arg(playlist_url)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                format!(
                    "Failed to execute yt-dlp: {}. Make sure yt-dlp is installed.",
                    e
                )
            })?;

        if !status.success() {
            tracing::error!("yt-dlp exited with {}", status);
            return Err(format!("yt-dlp download failed with {}", status));
        }

        Ok(())
    }

    // h264 mp4 video capped at max_height plus m4a audio, mp4 fallback
    fn format_selector(max_height: u32) -> String {
        format!(
            "bv*[ext=mp4][vcodec=h264][height<={}]+ba[ext=m4a]/b[ext=mp4]",
            max_height
        )
    }

    /// Check if yt-dlp is installed
    async fn check_ytdlp_installed() -> Result<(), String> {
        let output = Command::new("yt-dlp")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(
                "yt-dlp is not installed. Install it with: pip install yt-dlp OR apt install yt-dlp"
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_selector_embeds_height_ceiling() {
        assert_eq!(
            YtDlpClient::format_selector(720),
            "bv*[ext=mp4][vcodec=h264][height<=720]+ba[ext=m4a]/b[ext=mp4]"
        );
        assert_eq!(
            YtDlpClient::format_selector(1080),
            "bv*[ext=mp4][vcodec=h264][height<=1080]+ba[ext=m4a]/b[ext=mp4]"
        );
    }
}
