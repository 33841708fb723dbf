use sparkpost_publisher::service::config::Configuration;
use sparkpost_publisher::service::publisher::Publisher;
use sparkpost_publisher::Error;
use std::path::PathBuf;

#[derive(clap::Parser)]
pub(crate) struct Action {
    /// Path to the configuration toml file, default to /etc/sparkpost-publisher/config.toml.
    #[clap(
        short,
        long,
        default_value = "/etc/sparkpost-publisher/config.toml",
        env = "SPARKPOST_PUBLISHER_CONFIG"
    )]
    pub config_path: String,
    /// Publishes the template. Without it, only the draft is created or updated.
    #[clap(long)]
    pub publish: bool,
    /// Path to the json file describing the template.
    pub template: PathBuf,
}

impl Action {
    pub(crate) async fn execute(self) -> Result<(), Error> {
        let config = Configuration::from_path(&self.config_path)?;
        let publisher = Publisher::from_config(&config)?;
        let template = Publisher::load(&self.template).await?;
        publisher.publish(&template, self.publish).await
    }
}
