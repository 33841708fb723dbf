use super::{NotFound, TemplateStore, UpdateOptions};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, StatusCode, Url};
use sparkpost_publisher_prelude::{TemplateBody, TemplateDefinition};

pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_ENDPOINT: &str = "https://api.sparkpost.com:443";

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub api_key: String,
    #[serde(default = "Config::default_api_version")]
    pub api_version: String,
    #[serde(default = "Config::default_endpoint")]
    pub endpoint: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"***")
            .field("api_version", &self.api_version)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Config {
    fn default_api_version() -> String {
        DEFAULT_API_VERSION.into()
    }

    fn default_endpoint() -> String {
        DEFAULT_ENDPOINT.into()
    }

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_version: Self::default_api_version(),
            endpoint: Self::default_endpoint(),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn build(&self) -> Result<HttpStore, Error> {
        tracing::debug!("building sparkpost template store");
        let endpoint = Url::parse(&self.endpoint)?;
        if endpoint.cannot_be_a_base() {
            return Err(Error::EndpointInvalid(self.endpoint.clone()));
        }
        let mut api_key = HeaderValue::from_str(&self.api_key).map_err(|err| {
            tracing::error!("api key is not a valid header value: {:?}", err);
            Error::ApiKeyInvalid
        })?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, api_key);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::ClientInvalid)?;
        Ok(HttpStore {
            client,
            endpoint,
            api_version: self.api_version.clone(),
        })
    }
}

/// One entry of the `errors` array SparkPost puts in its error responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ApiError>,
}

fn summary(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|item| match item.description {
            Some(ref description) => format!(": {} ({description})", item.message),
            None => format!(": {}", item.message),
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to parse endpoint: {0:?}")]
    UrlInvalid(#[from] url::ParseError),
    #[error("Endpoint {0:?} cannot be used as a base url")]
    EndpointInvalid(String),
    #[error("Api key contains invalid characters")]
    ApiKeyInvalid,
    #[error("Unable to build http client: {0:?}")]
    ClientInvalid(reqwest::Error),
    #[error("Unable to execute request: {0:?}")]
    RequestFailed(reqwest::Error),
    #[error("SparkPost responded with status {status}{}", summary(.errors))]
    Status {
        status: StatusCode,
        errors: Vec<ApiError>,
    },
}

impl Error {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl NotFound for Error {
    fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

// a 404 is an expected answer while reconciling
fn counts_as_error(status: StatusCode) -> bool {
    status != StatusCode::NOT_FOUND
}

/// Template store backed by the SparkPost REST api.
#[derive(Clone, Debug)]
pub struct HttpStore {
    client: reqwest::Client,
    endpoint: Url,
    api_version: String,
}

impl HttpStore {
    fn templates_url(&self, id: Option<&str>) -> Url {
        let mut url = self.endpoint.clone();
        // the endpoint is checked to be a base url when building the store
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", self.api_version.as_str(), "templates"]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    async fn execute(&self, operation: &'static str, request: RequestBuilder) -> Result<(), Error> {
        let res = request.send().await.map_err(|err| {
            metrics::counter!("template_store_error", "operation" => operation).increment(1);
            tracing::error!("unable to execute {} request: {:?}", operation, err);
            Error::RequestFailed(err)
        })?;
        let status = res.status();
        if status.is_success() {
            return Ok(());
        }
        let body: ErrorBody = res.json().await.unwrap_or_default();
        if counts_as_error(status) {
            metrics::counter!("template_store_error", "operation" => operation).increment(1);
        }
        tracing::debug!("{} request responded with {}: {:?}", operation, status, body.errors);
        Err(Error::Status {
            status,
            errors: body.errors,
        })
    }
}

#[async_trait::async_trait]
impl TemplateStore for HttpStore {
    type Error = Error;

    async fn fetch(&self, id: &str) -> Result<(), Error> {
        tracing::debug!("fetching template {}", id);
        let url = self.templates_url(Some(id));
        self.execute("fetch", self.client.get(url)).await
    }

    async fn create(&self, template: &TemplateDefinition) -> Result<(), Error> {
        tracing::debug!("creating template {}", template.id);
        let url = self.templates_url(None);
        self.execute("create", self.client.post(url).json(template)).await
    }

    async fn update(
        &self,
        id: &str,
        payload: &TemplateBody,
        options: UpdateOptions,
    ) -> Result<(), Error> {
        tracing::debug!("updating template {} with {:?}", id, options);
        let url = self.templates_url(Some(id));
        let mut request = self.client.put(url).json(payload);
        if let Some(value) = options.update_published {
            request = request.query(&[("update_published", value)]);
        }
        self.execute("update", request).await
    }
}
