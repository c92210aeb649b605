use std::fmt::Write;

use ideas_types::{
    meta::{IdeasPage, PageMeta},
    post::Post,
    query::Query,
    utils::escape_html,
};
use tracing::{debug, warn};

use super::{controller::FeedConfig, pagination::PaginationBar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCard {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub image_url: String,
    pub date: String,
    pub title: String,
    pub excerpt: Option<String>,
}

impl ArticleCard {
    pub fn from_post(post: &Post, cfg: &FeedConfig) -> Self {
        Self {
            id: post.id.clone(),
            slug: post.slug.clone(),
            image_url: post.image_url_or(cfg.placeholder_image()).to_string(),
            date: post.published_date(cfg.date_format()),
            title: post.title().to_string(),
            excerpt: post.excerpt(cfg.excerpt_chars()),
        }
    }

    pub fn to_html(&self) -> String {
        let title = escape_html(&self.title);
        let mut html = format!(
            "<div class=\"article\"><img src=\"{}\" loading=\"lazy\" alt=\"{}\"><div class=\"article-info\"><span class=\"date\">{}</span><h3>{}</h3>",
            escape_html(&self.image_url),
            title,
            escape_html(&self.date),
            title,
        );
        if let Some(excerpt) = &self.excerpt {
            let _ = write!(html, "<p class=\"excerpt\">{}</p>", escape_html(excerpt));
        }
        html.push_str("</div></div>");
        html
    }
}

/// One card per post, in server order.
pub fn render_posts(posts: &[Post], cfg: &FeedConfig) -> Vec<ArticleCard> {
    posts
        .iter()
        .map(|post| {
            let card = ArticleCard::from_post(post, cfg);
            debug!("Image URL: {}", card.image_url);
            card
        })
        .collect()
}

pub fn render_pagination(meta: &PageMeta) -> PaginationBar {
    PaginationBar::from_meta(meta)
}

/// "Showing A - B of N". Deliberately not clamped: an empty result reads
/// "Showing 1 - 0 of 0".
pub fn total_items_label(query: &Query, total: u64) -> String {
    format!(
        "Showing {} - {} of {}",
        query.first_item(),
        query.last_item(total),
        total
    )
}

/// In-memory stand-in for the page regions the feed owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// `.articles`
    pub articles: Vec<ArticleCard>,
    /// `.pagination`
    pub pagination: PaginationBar,
    /// `#total-items`
    pub total_items: String,
    /// Query of the last response rendered into this document.
    pub query: Option<Query>,
}

impl Document {
    /// Rebuilds the regions from a successful response. The article list is
    /// always replaced; pagination and the count label only when the
    /// response carried meta.
    pub fn apply(&mut self, query: &Query, page: &IdeasPage, cfg: &FeedConfig) {
        self.articles = render_posts(&page.posts, cfg);
        match &page.meta {
            Some(meta) => {
                self.pagination = render_pagination(meta);
                self.total_items = total_items_label(query, meta.total);
            }
            None => warn!("Meta data is missing, keeping pagination for {:?}", query),
        }
        self.query = Some(query.clone());
        debug!(
            "Rendered {} articles, {} pagination buttons",
            self.articles.len(),
            self.pagination.buttons.len()
        );
    }

    pub fn articles_html(&self) -> String {
        self.articles.iter().map(ArticleCard::to_html).collect()
    }

    pub fn pagination_html(&self) -> String {
        self.pagination.to_html()
    }
}
