use super::config::Configuration;
use crate::Error;
use sparkpost_publisher_engine::store::http::HttpStore;
use sparkpost_publisher_engine::Reconciler;
use sparkpost_publisher_prelude::TemplateDefinition;
use std::path::Path;

pub struct Publisher {
    reconciler: Reconciler<HttpStore>,
}

impl Publisher {
    pub fn new(store: HttpStore) -> Self {
        Self {
            reconciler: Reconciler::new(store),
        }
    }

    pub fn from_config(config: &Configuration) -> Result<Self, Error> {
        Ok(Self::new(config.sparkpost.build()?))
    }

    /// Reads and validates the json definition of a template.
    pub async fn load(path: &Path) -> Result<TemplateDefinition, Error> {
        tracing::debug!("loading template from {:?}", path);
        let content = tokio::fs::read(path)
            .await
            .map_err(|source| Error::TemplateRead {
                path: path.to_path_buf(),
                source,
            })?;
        let template: TemplateDefinition =
            serde_json::from_slice(&content).map_err(|source| Error::TemplateParse {
                path: path.to_path_buf(),
                source,
            })?;
        template.validate()?;
        Ok(template)
    }

    pub async fn publish(&self, template: &TemplateDefinition, publish: bool) -> Result<(), Error> {
        template.validate()?;
        self.reconciler.reconcile(template, publish).await?;
        if publish {
            tracing::info!("template {} published", template.id);
        } else {
            tracing::info!("template {} saved as draft", template.id);
        }
        Ok(())
    }
}
