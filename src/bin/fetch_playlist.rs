// Playlist fetcher - downloads a playlist and optionally re-encodes every
// clip at a different playback speed

use std::path::Path;
use yt_courier::transform::apply_speed_to_folder;
use yt_courier::utils::init_logging;
use yt_courier::ytdlp_client::YtDlpClient;

// PREDEFINED SETTINGS - EDIT THESE VALUES
const FOLDER_NAME: &str = "downloaded_videos";
const PLAYLIST_URL: &str = "https://youtube.com/playlist?list=YOUR_PLAYLIST_ID";
const MAX_HEIGHT: u32 = 720; // height ceiling in pixels (360, 480, 720, 1080, ...)
const PLAYBACK_SPEED: &str = "1.0"; // 1.0 for normal, 1.25 for 1.25x, etc.

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_logging().expect("Failed to initialize logging");

    // Validate the speed before anything touches the filesystem
    let speed_factor: f64 = match PLAYBACK_SPEED.parse() {
        Ok(value) => value,
        Err(_) => {
            println!("Invalid playback speed value. Please enter a valid number.");
            return;
        }
    };

    println!("Downloading videos...");
    if let Err(e) =
        YtDlpClient::download_playlist(PLAYLIST_URL, Path::new(FOLDER_NAME), MAX_HEIGHT).await
    {
        println!("An error occurred while processing the videos.");
        println!("{}", e);
        return;
    }
    println!("Download completed.");

    if speed_factor != 1.0 {
        println!("Adjusting playback speed...");
        if let Err(e) = apply_speed_to_folder(Path::new(FOLDER_NAME), speed_factor) {
            println!("An error occurred while processing the videos.");
            println!("{}", e);
            return;
        }
    }

    println!(
        "Playlist downloaded successfully in '{}' folder with playback speed {}x.",
        FOLDER_NAME, PLAYBACK_SPEED
    );
}
