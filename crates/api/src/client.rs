use ideas_types::{meta::IdeasPage, query::Query};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use tracing::{debug, error};

use super::{endpoint::Endpoint, error::Error, response::ClientResponse, source::IdeasSource};
use async_trait::async_trait;
use std::sync::Arc;

/// Configuration for the client.
/// base_url: Scheme and host of the ideas API. (default: https://suitmedia-backend.suitdev.com)
/// user_agent: Value for the User-Agent header. (default: reqwest's)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

impl Config {
    const DEFAULT_BASE_URL: &'static str = "https://suitmedia-backend.suitdev.com";
    pub fn new(base_url: Option<String>, user_agent: Option<String>) -> Self {
        Config {
            base_url,
            user_agent,
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(Self::DEFAULT_BASE_URL)
    }
}

/// A client for the ideas API.
/// Requests are sent once: there is no retry, no timeout and no caching.
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
    http: reqwest::Client,
}

impl Client {
    pub fn new(cfg: Option<Config>) -> Self {
        Self {
            cfg: cfg.unwrap_or_default(),
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    fn new_request(&self, endpoint: &Endpoint) -> Result<reqwest::Request, Error> {
        let url = endpoint.url(self.cfg.base_url());
        let url: reqwest::Url = url.parse().map_err(|_| Error::InvalidUrl(url))?;
        let mut request = reqwest::Request::new(reqwest::Method::GET, url);
        let headers = request.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(agent) = &self.cfg.user_agent {
            headers.insert(
                USER_AGENT,
                HeaderValue::from_str(agent).map_err(|_| Error::InvalidHeader(agent.clone()))?,
            );
        }
        Ok(request)
    }

    pub async fn get(&self, endpoint: &Endpoint) -> Result<ClientResponse, Error> {
        let request = self.new_request(endpoint)?;
        debug!("Sending request to {}", request.url());
        let resp = self.http.execute(request).await.map_err(|e| {
            error!("request {} failed: {}", endpoint, e);
            Error::from(e)
        })?;
        self.handle_response(endpoint, resp).await
    }

    pub async fn handle_response(
        &self,
        endpoint: &Endpoint,
        resp: reqwest::Response,
    ) -> Result<ClientResponse, Error> {
        let status = resp.status();
        if status.is_success() {
            debug!("request: {} status: {}", endpoint, status);
            ClientResponse::parse(endpoint, resp).await
        } else {
            error!("request {} status: {}", endpoint, status);
            Err(Error::StatusCode(status.as_u16()))
        }
    }

    pub async fn get_ideas(&self, query: &Query) -> Result<Arc<IdeasPage>, Error> {
        let ClientResponse::Ideas(page) = self.get(&Endpoint::Ideas(query.clone())).await?;
        Ok(page)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl IdeasSource for Client {
    async fn fetch_ideas(&self, query: &Query) -> Result<Arc<IdeasPage>, Error> {
        self.get_ideas(query).await
    }
}
