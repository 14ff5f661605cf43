// Publish a single video with service account credentials scoped to uploads

use clap::Parser;
use std::path::PathBuf;
use yt_courier::credentials::{exchange_for_access_token, ServiceAccountKey, YOUTUBE_UPLOAD_SCOPE};
use yt_courier::utils::init_logging;
use yt_courier::youtube_client::{VideoResource, YouTubeClient};

/// Upload a video to YouTube with a service account key file
#[derive(Parser)]
struct Opts {
    /// Path to the service account key file
    #[clap(long)]
    credentials: PathBuf,
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
    /// Video tags; may be given multiple times
    #[clap(long)]
    tags: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    init_logging().expect("Failed to initialize logging");

    let opts = Opts::parse();

    let key = ServiceAccountKey::from_file(&opts.credentials)?;
    let token = exchange_for_access_token(&reqwest::Client::new(), &key, YOUTUBE_UPLOAD_SCOPE).await?;

    let tags = if opts.tags.is_empty() {
        None
    } else {
        Some(opts.tags.clone())
    };
    let metadata = VideoResource::new(
        &opts.title,
        &opts.description,
        &opts.privacy,
        Some(opts.category.as_str()),
        tags,
    );

    let client = YouTubeClient::new();
    let response = client
        .upload_video(
            Some(token.access_token.as_str()),
            &opts.file,
            &metadata,
            |percent| println!("Upload progress: {}%", percent),
        )
        .await?;

    println!("✅ Successfully uploaded: {}", opts.title);
    println!("Video ID: {}", response.id);

    Ok(())
}
