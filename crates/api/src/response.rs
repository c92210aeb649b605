use std::sync::Arc;

use ideas_types::meta::IdeasPage;
use tracing::debug;

use super::{endpoint::Endpoint, error::Error};

#[derive(Debug, Clone)]
pub enum ClientResponse {
    Ideas(Arc<IdeasPage>),
}

impl ClientResponse {
    pub async fn parse(endpoint: &Endpoint, resp: reqwest::Response) -> Result<Self, Error> {
        match endpoint {
            Endpoint::Ideas(_) => {
                let body = resp.json::<serde_json::Value>().await?;
                debug!("API response: {}", body);
                Ok(ClientResponse::Ideas(Arc::new(IdeasPage::from_value(body))))
            }
        }
    }
}
