// Publish a single video with the Authorization header installed on the HTTP
// client itself, next to a placeholder API key

use clap::Parser;
use std::path::PathBuf;
use yt_courier::utils::init_logging;
use yt_courier::youtube_client::{VideoResource, VideoUploadResponse, YouTubeClient};

// Key the client is constructed with; the real authorization rides in the
// default Authorization header on every outbound request
const PLACEHOLDER_API_KEY: &str = "dummy";

/// Upload a video to YouTube with a client-injected Authorization header
#[derive(Parser)]
struct Opts {
    /// OAuth 2.0 access token
    #[clap(long)]
    access_token: String,
    /// Video file to upload
    #[clap(long)]
    file: PathBuf,
    /// Video title
    #[clap(long)]
    title: String,
    /// Video description
    #[clap(long)]
    description: String,
    /// Privacy status: public, private or unlisted
    #[clap(long, default_value = "private")]
    privacy: String,
    /// Video category id
    #[clap(long, default_value = "22")]
    category: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    init_logging().expect("Failed to initialize logging");

    let opts = Opts::parse();

    match run(&opts).await {
        Ok(response) => {
            println!("✅ Successfully uploaded: {}", opts.title);
            println!("Video ID: {}", response.id);
            Ok(())
        }
        Err(e) => {
            println!("❌ Error uploading video: {}", e);
            Err(e)
        }
    }
}

async fn run(opts: &Opts) -> Result<VideoUploadResponse, Box<dyn std::error::Error + Send + Sync>> {
    let client = YouTubeClient::with_default_authorization(
        PLACEHOLDER_API_KEY.to_string(),
        &opts.access_token,
    )?;
    let metadata = VideoResource::new(
        &opts.title,
        &opts.description,
        &opts.privacy,
        Some(opts.category.as_str()),
        None,
    );

    // The client already carries the Authorization header, no per-call token
    client
        .upload_video(None, &opts.file, &metadata, |percent| {
            println!("Upload progress: {}%", percent)
        })
        .await
}
