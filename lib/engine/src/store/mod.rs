use sparkpost_publisher_prelude::{TemplateBody, TemplateDefinition};

pub mod http;

/// Errors returned by a [`TemplateStore`] have to tell apart the store not
/// knowing the addressed record from any other failure.
pub trait NotFound {
    fn is_not_found(&self) -> bool;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Promote the submitted content to the published version. When `None`,
    /// nothing is sent and the store applies its own default.
    pub update_published: Option<bool>,
}

impl UpdateOptions {
    pub fn update_published(value: bool) -> Self {
        Self {
            update_published: Some(value),
        }
    }
}

/// The remote operations needed to drive a template into a given state.
#[async_trait::async_trait]
pub trait TemplateStore: Send + Sync {
    type Error: NotFound + std::error::Error + Send + Sync;

    async fn fetch(&self, id: &str) -> Result<(), Self::Error>;

    async fn create(&self, template: &TemplateDefinition) -> Result<(), Self::Error>;

    async fn update(
        &self,
        id: &str,
        payload: &TemplateBody,
        options: UpdateOptions,
    ) -> Result<(), Self::Error>;
}
