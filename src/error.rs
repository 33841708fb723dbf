use sparkpost_publisher_engine::store::http::Error as StoreError;
use sparkpost_publisher_prelude::ValidationError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to load configuration: {0}")]
    Configuration(#[from] config::ConfigError),
    #[error("Unable to read template file {path:?}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unable to parse template file {path:?}: {source}")]
    TemplateParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid template: {0}")]
    TemplateInvalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
