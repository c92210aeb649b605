use std::sync::Arc;

use async_trait::async_trait;
use ideas_types::{meta::IdeasPage, query::Query};

use super::error::Error;

/// Anything that can produce a page of ideas for a query.
#[async_trait]
pub trait IdeasSource: Send + Sync + 'static {
    async fn fetch_ideas(&self, query: &Query) -> Result<Arc<IdeasPage>, Error>;
}
