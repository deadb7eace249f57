//! Pexels API response types.

use serde::{Deserialize, Serialize};
use url::Url;

/// Response of `GET /videos/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub videos: Vec<VideoHit>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_results: Option<u64>,
    pub next_page: Option<String>,
}

/// One search result. Only `id` is needed to fetch the clip; the rest is
/// informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoHit {
    pub id: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Duration in seconds
    pub duration: Option<u32>,
    /// Public page of the clip
    pub url: Option<String>,
}

/// A clip ready to download.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSource {
    pub id: u64,
    pub download_url: Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "page": 1,
            "per_page": 2,
            "total_results": 5120,
            "url": "https://www.pexels.com/search/videos/drone%20nature/",
            "videos": [
                {
                    "id": 1851190,
                    "width": 3840,
                    "height": 2160,
                    "duration": 20,
                    "url": "https://www.pexels.com/video/aerial-view-1851190/",
                    "image": "https://images.pexels.com/videos/1851190/free-video-1851190.jpg",
                    "user": {"id": 1, "name": "someone"},
                    "video_files": [],
                    "video_pictures": []
                },
                {"id": 2499611}
            ]
        }"#;

        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.videos.len(), 2);
        assert_eq!(resp.videos[0].id, 1851190);
        assert_eq!(resp.videos[0].width, Some(3840));
        assert_eq!(resp.videos[1].duration, None);
        assert!(resp.next_page.is_none());
    }

    #[test]
    fn test_missing_videos_is_empty() {
        let resp: SearchResponse = serde_json::from_str(r#"{"page":1}"#).unwrap();
        assert!(resp.videos.is_empty());
    }
}
