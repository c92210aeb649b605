use std::sync::Arc;

use ideas_api::{error::Error as ApiError, source::IdeasSource};
use ideas_types::{
    meta::IdeasPage,
    query::{Query, Sort},
};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, Instrument};

use super::{error::Error, pagination::PageButton, view::Document};

/// Configuration for the feed controller.
/// initial_query: Query issued on start. (default: page 1, 10 per page, newest first)
/// placeholder_image: Image URL for posts without images. (default: "default-image-url")
/// date_format: chrono format for publish dates. (default: "%-m/%-d/%Y")
/// excerpt_chars: Maximum excerpt length in characters. (default: 120)
/// channel_capacity: Command and completion queue depth. (default: 100)
#[derive(Debug, Clone, Default)]
pub struct FeedConfig {
    pub initial_query: Option<Query>,
    pub placeholder_image: Option<String>,
    pub date_format: Option<String>,
    pub excerpt_chars: Option<usize>,
    pub channel_capacity: Option<usize>,
}

impl FeedConfig {
    const DEFAULT_PLACEHOLDER_IMAGE: &'static str = "default-image-url";
    const DEFAULT_DATE_FORMAT: &'static str = "%-m/%-d/%Y";
    const DEFAULT_EXCERPT_CHARS: usize = 120;
    const DEFAULT_CHANNEL_CAPACITY: usize = 100;

    pub fn initial_query(&self) -> Query {
        self.initial_query.clone().unwrap_or_default()
    }

    pub fn placeholder_image(&self) -> &str {
        self.placeholder_image
            .as_deref()
            .unwrap_or(Self::DEFAULT_PLACEHOLDER_IMAGE)
    }

    pub fn date_format(&self) -> &str {
        self.date_format
            .as_deref()
            .unwrap_or(Self::DEFAULT_DATE_FORMAT)
    }

    pub fn excerpt_chars(&self) -> usize {
        self.excerpt_chars.unwrap_or(Self::DEFAULT_EXCERPT_CHARS)
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
            .unwrap_or(Self::DEFAULT_CHANNEL_CAPACITY)
            .max(1)
    }
}

#[derive(Debug)]
pub enum Command {
    SetPage(u32),
    SetPageSize(u32),
    SetSort(Sort),
    Previous,
    Next,
    Refresh,
    Query(oneshot::Sender<Query>),
}

struct Completion {
    seq: u64,
    query: Query,
    result: Result<Arc<IdeasPage>, ApiError>,
}

/// Owns the query state and the rendered document. Runs as a single task;
/// every state change issues one fetch tagged with a sequence number and only
/// the response to the newest fetch is rendered.
pub struct Feed {
    source: Arc<dyn IdeasSource>,
    cfg: FeedConfig,
    query: Query,
    latest_seq: u64,
    document: watch::Sender<Document>,
    completions_tx: mpsc::Sender<Completion>,
}

impl Feed {
    /// Starts the controller and issues the initial fetch.
    pub fn spawn(source: Arc<dyn IdeasSource>, cfg: Option<FeedConfig>) -> FeedHandle {
        let cfg = cfg.unwrap_or_default();
        let capacity = cfg.channel_capacity();
        let (commands_tx, commands_rx) = mpsc::channel(capacity);
        let (completions_tx, completions_rx) = mpsc::channel(capacity);
        let (document, updates) = watch::channel(Document::default());
        let feed = Feed {
            source,
            query: cfg.initial_query(),
            cfg,
            latest_seq: 0,
            document,
            completions_tx,
        };
        tokio::spawn(feed.run(commands_rx, completions_rx).in_current_span());
        FeedHandle {
            sender: commands_tx,
            updates,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut completions: mpsc::Receiver<Completion>,
    ) {
        info!("Starting feed controller at {:?}", self.query);
        self.fetch();
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(completion) = completions.recv() => self.handle_completion(completion),
            }
        }
        info!("Feed controller stopped");
    }

    fn handle_command(&mut self, command: Command) {
        debug!("Handling command {:?}", command);
        match command {
            Command::SetPage(page) => self.set_query(self.query.with_page(page)),
            Command::SetPageSize(size) => self.set_query(self.query.with_page_size(size)),
            Command::SetSort(sort) => self.set_query(self.query.with_sort(sort)),
            Command::Previous => {
                let target = self
                    .document
                    .borrow()
                    .pagination
                    .previous()
                    .and_then(PageButton::action);
                match target {
                    Some(page) => self.set_query(self.query.with_page(page)),
                    None => debug!("Previous page disabled"),
                }
            }
            Command::Next => {
                let target = self
                    .document
                    .borrow()
                    .pagination
                    .next()
                    .and_then(PageButton::action);
                match target {
                    Some(page) => self.set_query(self.query.with_page(page)),
                    None => debug!("Next page disabled"),
                }
            }
            Command::Refresh => self.fetch(),
            Command::Query(tx) => {
                if tx.send(self.query.clone()).is_err() {
                    debug!("Query requester went away");
                }
            }
        }
    }

    fn set_query(&mut self, query: Query) {
        self.query = query;
        self.fetch();
    }

    fn fetch(&mut self) {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        let query = self.query.clone();
        let source = self.source.clone();
        let tx = self.completions_tx.clone();
        debug!("Fetching posts #{} for {:?}", seq, query);
        tokio::spawn(
            async move {
                let result = source.fetch_ideas(&query).await;
                if tx.send(Completion { seq, query, result }).await.is_err() {
                    debug!("Feed controller gone, dropping response #{}", seq);
                }
            }
            .in_current_span(),
        );
    }

    fn handle_completion(&mut self, completion: Completion) {
        if completion.seq != self.latest_seq {
            debug!(
                "Discarding stale response #{}, latest is #{}",
                completion.seq, self.latest_seq
            );
            return;
        }
        match completion.result {
            Ok(page) => {
                debug!("Rendering response #{}", completion.seq);
                self.document
                    .send_modify(|doc| doc.apply(&completion.query, &page, &self.cfg));
            }
            Err(e) => error!("Error fetching posts: {}", e),
        }
    }
}

/// Cloneable handle to a running [`Feed`]. The controller stops once every
/// handle is dropped.
#[derive(Debug, Clone)]
pub struct FeedHandle {
    sender: mpsc::Sender<Command>,
    updates: watch::Receiver<Document>,
}

impl FeedHandle {
    async fn send(&self, command: Command) -> Result<(), Error> {
        self.sender
            .send(command)
            .await
            .map_err(|_| Error::ControllerClosed)
    }

    pub async fn set_page(&self, page: u32) -> Result<(), Error> {
        self.send(Command::SetPage(page)).await
    }

    /// Also returns to the first page.
    pub async fn set_page_size(&self, page_size: u32) -> Result<(), Error> {
        self.send(Command::SetPageSize(page_size)).await
    }

    pub async fn set_sort(&self, sort: Sort) -> Result<(), Error> {
        self.send(Command::SetSort(sort)).await
    }

    pub async fn previous(&self) -> Result<(), Error> {
        self.send(Command::Previous).await
    }

    pub async fn next(&self) -> Result<(), Error> {
        self.send(Command::Next).await
    }

    pub async fn refresh(&self) -> Result<(), Error> {
        self.send(Command::Refresh).await
    }

    /// Loads the page behind a pagination button. Disabled buttons do nothing.
    pub async fn click(&self, button: &PageButton) -> Result<(), Error> {
        match button.action() {
            Some(page) => self.set_page(page).await,
            None => Ok(()),
        }
    }

    pub async fn query(&self) -> Result<Query, Error> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Query(tx)).await?;
        rx.await.map_err(|_| Error::ControllerClosed)
    }

    pub fn document(&self) -> Document {
        self.updates.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Document> {
        self.updates.clone()
    }
}

/// Fetches and renders a single query without starting a controller.
pub async fn load(
    source: &dyn IdeasSource,
    query: &Query,
    cfg: &FeedConfig,
) -> Result<Document, Error> {
    let page = source.fetch_ideas(query).await?;
    let mut document = Document::default();
    document.apply(query, &page, cfg);
    Ok(document)
}
