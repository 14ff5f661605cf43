// Publish a single video using an OAuth 2.0 access token

use clap::Parser;
use std::path::PathBuf;
use yt_courier::utils::init_logging;
use yt_courier::youtube_client::{VideoResource, VideoUploadResponse, YouTubeClient};

/// Upload a video to YouTube with a bearer access token
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
    let client = YouTubeClient::new();
    let metadata = VideoResource::new(
        &opts.title,
        &opts.description,
        &opts.privacy,
        Some(opts.category.as_str()),
        None,
    );

    client
        .upload_video(Some(opts.access_token.as_str()), &opts.file, &metadata, |percent| {
            println!("Upload progress: {}%", percent)
        })
        .await
}
