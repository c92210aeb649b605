use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{post::Post, utils::lenient_u32};

/// Pagination block of a Laravel-style paginated response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
    pub from: Option<u64>,
    pub to: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub per_page: Option<u32>,
    pub path: Option<String>,
}

impl PageMeta {
    /// False only on the first page.
    pub fn has_previous(&self) -> bool {
        self.current_page != 1
    }

    /// False only on the last page.
    pub fn has_next(&self) -> bool {
        self.current_page != self.last_page
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub first: Option<String>,
    pub last: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// A parsed `/api/ideas` body. `data` and `meta` are read leniently: every
/// element of `data` becomes a post, a `data` that is not an array yields no
/// posts and a missing or malformed `meta` yields `None`, both with a warning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdeasPage {
    pub posts: Vec<Post>,
    pub meta: Option<PageMeta>,
    pub links: Option<Links>,
}

impl IdeasPage {
    pub fn from_value(mut body: Value) -> Self {
        let posts = match body.get_mut("data").map(Value::take) {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| {
                    serde_json::from_value::<Post>(item).unwrap_or_else(|e| {
                        warn!("Post is not an object, rendering it empty: {}", e);
                        Post::default()
                    })
                })
                .collect(),
            other => {
                warn!("No posts found or incorrect data format: {:?}", other);
                vec![]
            }
        };
        let meta = match body.get_mut("meta").map(Value::take) {
            Some(Value::Null) | None => {
                warn!("Meta data is missing in API response");
                None
            }
            Some(meta) => serde_json::from_value::<PageMeta>(meta)
                .map_err(|e| warn!("Pagination meta is in an incorrect format: {}", e))
                .ok(),
        };
        let links = body
            .get_mut("links")
            .map(Value::take)
            .and_then(|links| serde_json::from_value::<Links>(links).ok());
        Self { posts, meta, links }
    }
}
