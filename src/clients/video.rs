//! Search-grounded video lookup
//!
//! The provider is asked about cooking videos with web search enabled; the
//! answer text is ignored and the grounding links become the results.

use crate::models::{Degradable, VideoResult, VideoSource};
use crate::prompts::generate_video_prompt;
use crate::providers::{ContentRequest, GroundingLink, Provider};
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Maximum number of videos returned for one query
pub const MAX_VIDEOS: usize = 4;

const VIDEO_HOSTS: [&str; 4] = ["youtube.com", "youtu.be", "vimeo.com", "tiktok.com"];

const FALLBACK_TITLE: &str = "Watch video";

/// Finds supporting video links for a query
pub struct VideoLookupClient {
    provider: Arc<dyn Provider>,
}

impl VideoLookupClient {
    /// Create a client over a provider
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Find up to [`MAX_VIDEOS`] videos; any failure yields an empty list
    pub async fn find(&self, query: &str) -> Vec<VideoResult> {
        self.find_detailed(query).await.into_value()
    }

    /// Like [`find`](Self::find) but reports whether an error was swallowed
    pub async fn find_detailed(&self, query: &str) -> Degradable<Vec<VideoResult>> {
        if !self.provider.capabilities().supports_web_search {
            tracing::debug!(
                provider = self.provider.provider_name(),
                "Provider cannot search the web, skipping video lookup"
            );
            return Degradable::ok(Vec::new());
        }

        let request = ContentRequest::new(generate_video_prompt(query)).with_web_search();

        match self.provider.generate_content(&request).await {
            Ok(response) => {
                let videos = extract_videos(&response.grounding);
                tracing::debug!(
                    candidates = response.grounding.len(),
                    kept = videos.len(),
                    "Video lookup finished"
                );
                Degradable::ok(videos)
            }
            Err(e) => {
                tracing::warn!("Video lookup failed: {:#}", e);
                Degradable::degraded(Vec::new(), e.to_string())
            }
        }
    }
}

/// Filter, deduplicate and cap grounding links
///
/// A link is kept when its URI points at a known video host or its title
/// mentions "video". The first occurrence of each URI wins.
pub fn extract_videos(links: &[GroundingLink]) -> Vec<VideoResult> {
    let mut seen = HashSet::new();

    links
        .iter()
        .filter(|link| is_video_link(link))
        .filter(|link| seen.insert(link.uri.clone()))
        .take(MAX_VIDEOS)
        .map(|link| VideoResult {
            title: link
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(FALLBACK_TITLE)
                .to_string(),
            uri: link.uri.clone(),
            source: video_source(&link.uri),
        })
        .collect()
}

fn is_video_link(link: &GroundingLink) -> bool {
    VIDEO_HOSTS.iter().any(|host| link.uri.contains(host))
        || link
            .title
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains("video"))
}

/// Label a URI as YouTube or generic web
pub fn video_source(uri: &str) -> VideoSource {
    let host = Url::parse(uri)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase));

    match host.as_deref() {
        Some(h) if h == "youtu.be" || h == "youtube.com" || h.ends_with(".youtube.com") => {
            VideoSource::YouTube
        }
        _ => VideoSource::Web,
    }
}
