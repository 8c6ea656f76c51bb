//! Video lookup prompt

/// Generates the search-grounded prompt used to find cooking videos
pub fn generate_video_prompt(query: &str) -> String {
    format!(
        "Find popular cooking video tutorials for \"{}\". \
         Prefer YouTube, Vimeo or TikTok videos from well-known cooks and \
         briefly describe what each video shows.",
        query.trim()
    )
}
