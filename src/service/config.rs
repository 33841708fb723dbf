use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use sparkpost_publisher_engine::store::http;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Configuration {
    pub sparkpost: http::Config,
}

impl Configuration {
    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .add_source(config::Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Reads the toml file at `path`, if any, and overrides it with the
    /// environment, `SPARKPOST__API_KEY` setting
    /// `sparkpost.api_key` for example.
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        tracing::debug!("loading configuration from {}", path);
        Self::from_builder(
            config::Config::builder().add_source(config::File::with_name(path).required(false)),
        )
    }
}
