#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Ideas API error: {0}")]
    IdeasApi(#[from] ideas_api::error::Error),

    #[error("Feed controller is no longer running")]
    ControllerClosed,
}
