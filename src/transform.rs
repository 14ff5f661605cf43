// src/transform.rs

use crate::utils::{check_ffmpeg_available, execute_ffmpeg_command};
use std::path::Path;
use std::process::Command;

// Prefix for in-progress re-encodes written next to their source file
const TEMP_PREFIX: &str = "temp_";

/// Re-encode a video at a different playback speed.
///
/// Video presentation timestamps are scaled by the inverse of the speed
/// factor, audio tempo by the factor itself.
pub fn adjust_speed(
    input_file: &Path,
    output_file: &Path,
    speed_factor: f64,
) -> Result<String, String> {
    let (video_filter, audio_filter) = speed_filters(speed_factor);

    let mut command = Command::new("ffmpeg");
    command
        .arg("-i")
        .arg(input_file)
        .arg("-filter:v")
        .arg(video_filter)
        .arg("-filter:a")
        .arg(audio_filter)
        .arg("-c:v")
        .arg("libx264")
        .arg("-c:a")
        .arg("aac")
        .arg("-b:a")
        .arg("128k")
        .arg("-y")
        .arg(output_file);

    execute_ffmpeg_command(command)
}

fn speed_filters(speed_factor: f64) -> (String, String) {
    let video_filter = format!("setpts={}*PTS", 1.0 / speed_factor);
    let audio_filter = format!("atempo={}", speed_factor);
    (video_filter, audio_filter)
}

/// Re-encode every .mp4 in `folder` at `speed_factor`, replacing each file in
/// place through a temp_-prefixed sibling.
pub fn apply_speed_to_folder(folder: &Path, speed_factor: f64) -> Result<(), String> {
    check_ffmpeg_available()?;

    // Snapshot the listing up front so freshly written temp files are not
    // picked up by the same pass
    let entries: Vec<_> = std::fs::read_dir(folder)
        .map_err(|e| format!("Failed to read folder {}: {}", folder.display(), e))?
        .collect::<Result<_, _>>()
        .map_err(|e| format!("Failed to read folder entry: {}", e))?;

    for entry in entries {
        let input_path = entry.path();
        if !is_speed_candidate(&input_path) {
            continue;
        }

        let file_name = match input_path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        let temp_path = folder.join(format!("{}{}", TEMP_PREFIX, file_name));

        adjust_speed(&input_path, &temp_path, speed_factor)?;

        // Replace original with processed version
        std::fs::remove_file(&input_path)
            .map_err(|e| format!("Failed to remove {}: {}", input_path.display(), e))?;
        std::fs::rename(&temp_path, &input_path)
            .map_err(|e| format!("Failed to rename {}: {}", temp_path.display(), e))?;

        println!("Processed: {}", file_name);
    }

    Ok(())
}

// .mp4 files only; temp_ leftovers from an interrupted run are skipped
fn is_speed_candidate(path: &Path) -> bool {
    let is_mp4 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "mp4")
        .unwrap_or(false);
    let is_temp = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with(TEMP_PREFIX))
        .unwrap_or(false);
    is_mp4 && !is_temp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_filters_invert_pts() {
        let (video, audio) = speed_filters(2.0);
        assert_eq!(video, "setpts=0.5*PTS");
        assert_eq!(audio, "atempo=2");

        let (video, audio) = speed_filters(1.25);
        assert_eq!(video, "setpts=0.8*PTS");
        assert_eq!(audio, "atempo=1.25");
    }

    #[test]
    fn test_speed_candidate_selection() {
        assert!(is_speed_candidate(Path::new("videos/lecture 01.mp4")));
        assert!(!is_speed_candidate(Path::new("videos/temp_lecture 01.mp4")));
        assert!(!is_speed_candidate(Path::new("videos/notes.txt")));
        assert!(!is_speed_candidate(Path::new("videos/clip.mkv")));
        assert!(!is_speed_candidate(Path::new("videos/no_extension")));
    }
}
