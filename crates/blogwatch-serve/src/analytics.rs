//! Aggregate statistics over the in-memory blog list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::upstream::BlogRecord;

/// Derived statistics snapshot, serialized in the wire format clients expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogStats {
    /// Number of blog records.
    pub total_blogs: usize,
    /// Title of the first record with the maximum title length, measured
    /// in characters.
    pub longest_blog_title: String,
    /// Records whose case-folded title contains "privacy".
    pub blogs_containing_privacy: usize,
    /// Distinct titles in order of first appearance.
    pub unique_blog_titles: Vec<String>,
}

/// Compute statistics over the blog list.
///
/// Pure function of its input. An empty list has no longest title, so it is
/// rejected with [`ApiError::EmptyDataset`] rather than crashing the way an
/// unchecked max would.
pub fn compute_stats(blogs: &[BlogRecord]) -> Result<BlogStats, ApiError> {
    let mut longest = blogs.first().ok_or(ApiError::EmptyDataset)?;
    let mut longest_len = longest.title.chars().count();
    for blog in &blogs[1..] {
        // Length in characters, not bytes, so a multi-byte title cannot
        // out-rank a longer one. Strictly greater keeps the first record
        // on ties.
        let len = blog.title.chars().count();
        if len > longest_len {
            longest = blog;
            longest_len = len;
        }
    }

    let blogs_containing_privacy = blogs
        .iter()
        .filter(|blog| blog.title.to_lowercase().contains("privacy"))
        .count();

    let mut seen = HashSet::new();
    let mut unique_blog_titles = Vec::new();
    for blog in blogs {
        if seen.insert(blog.title.as_str()) {
            unique_blog_titles.push(blog.title.clone());
        }
    }

    Ok(BlogStats {
        total_blogs: blogs.len(),
        longest_blog_title: longest.title.clone(),
        blogs_containing_privacy,
        unique_blog_titles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog(title: &str) -> BlogRecord {
        BlogRecord {
            title: title.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn counts_all_records() {
        let blogs = vec![blog("a"), blog("bb"), blog("a")];
        let stats = compute_stats(&blogs).unwrap();
        assert_eq!(stats.total_blogs, 3);
    }

    #[test]
    fn longest_title_wins() {
        let blogs = vec![blog("short"), blog("the longest title here"), blog("mid")];
        let stats = compute_stats(&blogs).unwrap();
        assert_eq!(stats.longest_blog_title, "the longest title here");
    }

    #[test]
    fn longest_title_measured_in_characters_not_bytes() {
        // "ééé" is 6 bytes but only 3 characters; "abcd" must win.
        let blogs = vec![blog("ééé"), blog("abcd")];
        let stats = compute_stats(&blogs).unwrap();
        assert_eq!(stats.longest_blog_title, "abcd");
    }

    #[test]
    fn longest_title_tie_breaks_to_first() {
        let blogs = vec![blog("aaaa"), blog("bbbb"), blog("cc")];
        let stats = compute_stats(&blogs).unwrap();
        assert_eq!(stats.longest_blog_title, "aaaa");
    }

    #[test]
    fn privacy_count_is_case_insensitive() {
        let blogs = vec![
            blog("Privacy Policy"),
            blog("privacy-free zone"),
            blog("PRIVACY matters"),
            blog("unrelated"),
        ];
        let stats = compute_stats(&blogs).unwrap();
        assert_eq!(stats.blogs_containing_privacy, 3);
    }

    #[test]
    fn unique_titles_preserve_first_occurrence_order() {
        let blogs = vec![blog("A"), blog("B"), blog("A")];
        let stats = compute_stats(&blogs).unwrap();
        assert_eq!(stats.unique_blog_titles, vec!["A", "B"]);
    }

    #[test]
    fn idempotent_over_same_input() {
        let blogs = vec![blog("Privacy"), blog("other"), blog("Privacy")];
        let first = compute_stats(&blogs).unwrap();
        let second = compute_stats(&blogs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_list_is_rejected() {
        let err = compute_stats(&[]).unwrap_err();
        assert!(matches!(err, ApiError::EmptyDataset));
    }

    #[test]
    fn serializes_camel_case() {
        let blogs = vec![blog("One")];
        let stats = compute_stats(&blogs).unwrap();
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalBlogs"], 1);
        assert_eq!(value["longestBlogTitle"], "One");
        assert_eq!(value["blogsContainingPrivacy"], 0);
        assert_eq!(value["uniqueBlogTitles"], serde_json::json!(["One"]));
    }
}
