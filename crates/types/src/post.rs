use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::utils::{lenient_string, lenient_vec};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mime: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

/// A single idea as returned by the ideas endpoint. Every field is lenient:
/// the server owns the shape and nothing here is validated.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub small_image: Option<Vec<Image>>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub medium_image: Option<Vec<Image>>,
}

impl Post {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// First small image, then first medium image.
    pub fn image_url(&self) -> Option<&str> {
        first_url(&self.small_image).or_else(|| first_url(&self.medium_image))
    }

    pub fn image_url_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.image_url().unwrap_or(placeholder)
    }

    /// `published_at` rendered with a chrono format string. Values that do not
    /// parse as a timestamp are returned untouched.
    pub fn published_date(&self, format: &str) -> String {
        match self.published_at.as_deref() {
            Some(raw) => format_timestamp(raw, format),
            None => String::new(),
        }
    }

    pub fn clean_content(&self) -> Option<String> {
        self.content
            .as_deref()
            .and_then(|c| crate::utils::remove_html(c).ok())
    }

    pub fn excerpt(&self, max_chars: usize) -> Option<String> {
        self.clean_content()
            .filter(|c| !c.is_empty())
            .map(|c| crate::utils::truncate(&c.replace('\n', " "), max_chars))
    }
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

fn first_url(images: &Option<Vec<Image>>) -> Option<&str> {
    images
        .as_ref()
        .and_then(|images| images.first())
        .and_then(|image| image.url.as_deref())
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn format_timestamp(raw: &str, format: &str) -> String {
    let Some(timestamp) = parse_timestamp(raw) else {
        return raw.to_string();
    };
    let mut out = String::new();
    // chrono reports bad format strings through fmt::Error
    match write!(out, "{}", timestamp.format(format)) {
        Ok(()) => out,
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str) -> Image {
        Image {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    fn post_with_images(small: Vec<Image>, medium: Vec<Image>) -> Post {
        Post {
            id: Some("1".to_string()),
            title: Some("Title".to_string()),
            small_image: Some(small),
            medium_image: Some(medium),
            ..Default::default()
        }
    }

    #[test]
    fn test_small_image_preferred() {
        let post = post_with_images(vec![image("small.jpg")], vec![image("medium.jpg")]);
        assert_eq!(post.image_url_or("placeholder"), "small.jpg");
    }

    #[test]
    fn test_medium_image_fallback() {
        let post = post_with_images(vec![], vec![image("medium.jpg"), image("other.jpg")]);
        assert_eq!(post.image_url_or("placeholder"), "medium.jpg");
    }

    #[test]
    fn test_placeholder_when_no_images() {
        let post = post_with_images(vec![], vec![]);
        assert_eq!(post.image_url_or("placeholder"), "placeholder");
        let post = Post::default();
        assert_eq!(post.image_url(), None);
    }

    #[test]
    fn test_deserialize_api_post() {
        let raw = r#"{
            "id": 7,
            "slug": "an-idea",
            "title": "An idea",
            "content": "<p>Body</p>",
            "published_at": "2022-09-01 10:15:00",
            "small_image": [],
            "medium_image": [{"id": 3, "mime": "image/jpeg", "file_name": "a.jpg", "url": "https://cdn/a.jpg"}],
            "unknown": true
        }"#;
        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.id.as_deref(), Some("7"));
        assert_eq!(post.image_url(), Some("https://cdn/a.jpg"));
        assert_eq!(post.published_date("%-m/%-d/%Y"), "9/1/2022");
        assert_eq!(post.excerpt(50).as_deref(), Some("Body"));
    }

    #[test]
    fn test_null_images_deserialize() {
        let post: Post = serde_json::from_str(r#"{"id": 1, "small_image": null}"#).unwrap();
        assert_eq!(post.image_url(), None);
        assert_eq!(post.title(), "");
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(format_timestamp("2023-01-05T08:00:00+07:00", "%-m/%-d/%Y"), "1/5/2023");
        assert_eq!(format_timestamp("2023-12-31", "%d %b %Y"), "31 Dec 2023");
        assert_eq!(format_timestamp("not a date", "%-m/%-d/%Y"), "not a date");
        let post = Post::default();
        assert_eq!(post.published_date("%-m/%-d/%Y"), "");
    }
}
