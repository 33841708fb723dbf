use sparkpost_publisher::service::publisher::Publisher;
use sparkpost_publisher::Error;
use std::path::PathBuf;

#[derive(clap::Parser)]
pub(crate) struct Action {
    /// Path to the json file describing the template.
    pub template: PathBuf,
}

impl Action {
    pub(crate) async fn execute(self) -> Result<(), Error> {
        let template = Publisher::load(&self.template).await?;
        tracing::info!("template {} is valid", template.id);
        Ok(())
    }
}
