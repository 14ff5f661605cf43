// YouTube Data API v3 client for resumable video uploads
// Docs: https://developers.google.com/youtube/v3

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;

const UPLOAD_URL: &str = "https://www.googleapis.com/upload/youtube/v3/videos";

/// Chunk size for resumable uploads; must be a multiple of the 256 KiB
/// granularity the upload endpoint requires
pub const UPLOAD_CHUNK_SIZE: i64 = 8 * 1024 * 1024;

/// Tags applied when the caller supplies none
pub const DEFAULT_TAGS: [&str; 2] = ["processed", "automated"];

#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: Option<String>,
}

// ============================================================================
// Video Upload Structures
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VideoSnippet {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(rename = "categoryId")]
    pub category_id: String,
}

#[derive(Debug, Serialize)]
pub struct VideoStatus {
    #[serde(rename = "privacyStatus")]
    pub privacy_status: String, // "public", "private", "unlisted"
    #[serde(rename = "selfDeclaredMadeForKids")]
    pub self_declared_made_for_kids: bool,
}

#[derive(Debug, Serialize)]
pub struct VideoResource {
    pub snippet: VideoSnippet,
    pub status: VideoStatus,
}

impl VideoResource {
    /// Metadata payload shared by every publisher variant
    pub fn new(
        title: &str,
        description: &str,
        privacy_status: &str,
        category_id: Option<&str>,
        tags: Option<Vec<String>>,
    ) -> Self {
        Self {
            snippet: VideoSnippet {
                title: title.to_string(),
                description: description.to_string(),
                tags: tags
                    .unwrap_or_else(|| DEFAULT_TAGS.iter().map(|t| t.to_string()).collect()),
                category_id: category_id.unwrap_or("22").to_string(), // Default: People & Blogs
            },
            status: VideoStatus {
                privacy_status: privacy_status.to_string(),
                self_declared_made_for_kids: false,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VideoUploadResponse {
    pub id: String,
    pub snippet: Option<VideoResponseSnippet>,
}

#[derive(Debug, Deserialize)]
pub struct VideoResponseSnippet {
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

#[derive(Debug)]
pub struct ResumableChunkResponse {
    pub complete: bool,
    pub video_response: Option<VideoUploadResponse>,
}

// ============================================================================
// YouTube Client Implementation
// ============================================================================

impl YouTubeClient {
    /// Client that authenticates per call with a bearer token
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            api_key: None,
        }
    }

    /// Client that carries an Authorization header on every outbound request,
    /// built around a (possibly placeholder) API key. Upload calls on such a
    /// client take no per-call token.
    pub fn with_default_authorization(
        api_key: String,
        access_token: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", access_token))?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_key: Some(api_key),
        })
    }

    /// Upload a video file with metadata via the resumable protocol.
    ///
    /// `access_token` is `None` when the client already carries an
    /// Authorization header. `on_progress` receives the integer percent of
    /// the file transferred after every accepted chunk.
    pub async fn upload_video(
        &self,
        access_token: Option<&str>,
        video_path: &Path,
        metadata: &VideoResource,
        mut on_progress: impl FnMut(u32),
    ) -> Result<VideoUploadResponse, Box<dyn std::error::Error + Send + Sync>> {
        // Validate privacy status
        if !["public", "private", "unlisted"].contains(&metadata.status.privacy_status.as_str()) {
            return Err("Invalid privacy status. Must be 'public', 'private', or 'unlisted'".into());
        }

        let video_data = tokio::fs::read(video_path).await?;
        if video_data.is_empty() {
            return Err(format!("Video file is empty: {}", video_path.display()).into());
        }

        let total_bytes = video_data.len() as i64;
        let session_url = self
            .initiate_resumable_upload(access_token, metadata, total_bytes)
            .await?;

        for (start_byte, end_byte) in chunk_ranges(total_bytes, UPLOAD_CHUNK_SIZE) {
            let chunk = video_data[start_byte as usize..=end_byte as usize].to_vec();
            let result = self
                .upload_resumable_chunk(
                    access_token,
                    &session_url,
                    chunk,
                    start_byte,
                    end_byte,
                    total_bytes,
                )
                .await?;

            if result.complete {
                let response = result
                    .video_response
                    .ok_or("Upload completed without a response body")?;
                return Ok(response);
            }

            on_progress(percent_complete(end_byte, total_bytes));
        }

        Err("Upload session ended without a final response".into())
    }

    /// Initiate a resumable upload session
    ///
    /// Returns the upload session URL where chunks should be sent
    ///
    /// Required scope: https://www.googleapis.com/auth/youtube.upload
    async fn initiate_resumable_upload(
        &self,
        access_token: Option<&str>,
        metadata: &VideoResource,
        file_size: i64,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!(
            "🎬 Initiating resumable upload: {} ({} bytes)",
            metadata.snippet.title,
            file_size
        );

        let mut request = self
            .client
            .post(UPLOAD_URL)
            .query(&[("uploadType", "resumable"), ("part", "snippet,status")])
            .header("Content-Type", "application/json")
            .header("X-Upload-Content-Length", file_size.to_string())
            .header("X-Upload-Content-Type", "video/*")
            .json(metadata);

        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }
        if let Some(token) = access_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            tracing::error!("❌ Failed to initiate resumable upload: {}", error_text);
            return Err(format!("Failed to initiate resumable upload: {}", error_text).into());
        }

        // Extract the upload session URL from Location header
        let session_url = response
            .headers()
            .get("Location")
            .and_then(|v| v.to_str().ok())
            .ok_or("No upload session URL in response")?
            .to_string();

        tracing::debug!("Resumable upload session initiated: {}", session_url);

        Ok(session_url)
    }

    /// Upload one chunk of video data to a resumable upload session
    async fn upload_resumable_chunk(
        &self,
        access_token: Option<&str>,
        session_url: &str,
        chunk_data: Vec<u8>,
        start_byte: i64,
        end_byte: i64,
        total_bytes: i64,
    ) -> Result<ResumableChunkResponse, Box<dyn std::error::Error + Send + Sync>> {
        tracing::debug!(
            "📤 Uploading chunk: bytes {}-{}/{}",
            start_byte,
            end_byte,
            total_bytes
        );

        let content_range = format!("bytes {}-{}/{}", start_byte, end_byte, total_bytes);

        let mut request = self
            .client
            .put(session_url)
            .header("Content-Length", chunk_data.len().to_string())
            .header("Content-Range", content_range)
            .header("Content-Type", "video/*")
            .body(chunk_data);

        if let Some(token) = access_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status();

        // 308 Resume Incomplete = chunk uploaded successfully, more chunks expected
        // 200 OK or 201 Created = upload complete
        if status == 308 {
            return Ok(ResumableChunkResponse {
                complete: false,
                video_response: None,
            });
        }

        if status.is_success() {
            let video_response: VideoUploadResponse = response.json().await?;
            tracing::info!("✅ Resumable upload complete: {}", video_response.id);
            return Ok(ResumableChunkResponse {
                complete: true,
                video_response: Some(video_response),
            });
        }

        let error_text = response.text().await?;
        tracing::error!("❌ Failed to upload chunk: {}", error_text);
        Err(format!("Failed to upload chunk: {}", error_text).into())
    }
}

impl Default for YouTubeClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte ranges tiling `[0, total_bytes)` in `chunk_size` steps, ends inclusive
pub fn chunk_ranges(total_bytes: i64, chunk_size: i64) -> Vec<(i64, i64)> {
    let mut ranges = Vec::new();
    let mut start = 0;
    while start < total_bytes {
        let end = (start + chunk_size - 1).min(total_bytes - 1);
        ranges.push((start, end));
        start = end + 1;
    }
    ranges
}

/// Integer percent of the file transferred once the byte at `end_byte` lands
pub fn percent_complete(end_byte: i64, total_bytes: i64) -> u32 {
    (((end_byte + 1) * 100) / total_bytes) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_payload_shape() {
        let metadata = VideoResource::new("My Clip", "A description", "private", None, None);
        let value = serde_json::to_value(&metadata).unwrap();

        assert_eq!(value["snippet"]["title"], "My Clip");
        assert_eq!(value["snippet"]["description"], "A description");
        assert_eq!(
            value["snippet"]["tags"],
            serde_json::json!(["processed", "automated"])
        );
        assert_eq!(value["snippet"]["categoryId"], "22");
        assert_eq!(value["status"]["privacyStatus"], "private");
        assert_eq!(value["status"]["selfDeclaredMadeForKids"], false);
    }

    #[test]
    fn test_metadata_explicit_tags_and_category() {
        let metadata = VideoResource::new(
            "My Clip",
            "A description",
            "unlisted",
            Some("27"),
            Some(vec!["lecture".to_string(), "week1".to_string()]),
        );
        let value = serde_json::to_value(&metadata).unwrap();

        assert_eq!(value["snippet"]["tags"], serde_json::json!(["lecture", "week1"]));
        assert_eq!(value["snippet"]["categoryId"], "27");
        assert_eq!(value["status"]["privacyStatus"], "unlisted");
    }

    #[test]
    fn test_chunk_ranges_tile_the_file() {
        assert_eq!(chunk_ranges(20, 8), vec![(0, 7), (8, 15), (16, 19)]);
        assert_eq!(chunk_ranges(8, 8), vec![(0, 7)]);
        assert_eq!(chunk_ranges(3, 8), vec![(0, 2)]);
        assert!(chunk_ranges(0, 8).is_empty());

        // No gap, no overlap, every chunk but the last full-sized
        let ranges = chunk_ranges(100, 7);
        let mut expected_start = 0;
        for (i, (start, end)) in ranges.iter().enumerate() {
            assert_eq!(*start, expected_start);
            if i < ranges.len() - 1 {
                assert_eq!(end - start + 1, 7);
            }
            expected_start = end + 1;
        }
        assert_eq!(expected_start, 100);
    }

    #[test]
    fn test_progress_is_monotonic_and_terminal() {
        let total = 100 * 1024 * 1024 + 12345;
        let percents: Vec<u32> = chunk_ranges(total, UPLOAD_CHUNK_SIZE)
            .iter()
            .map(|(_, end)| percent_complete(*end, total))
            .collect();

        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*percents.last().unwrap(), 100);
    }

    #[tokio::test]
    async fn test_invalid_privacy_rejected_before_any_io() {
        let client = YouTubeClient::new();
        let metadata = VideoResource::new("t", "d", "secret", None, None);

        let err = client
            .upload_video(Some("token"), Path::new("/nonexistent.mp4"), &metadata, |_| {})
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid privacy status"));
    }
}
