use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid {payload} payload: {source}")]
    Json {
        payload: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown mapping status: {0}")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
