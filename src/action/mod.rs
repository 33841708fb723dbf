mod publish;
mod validate;

#[derive(clap::Subcommand)]
pub(crate) enum Action {
    /// Creates or updates a template on SparkPost
    Publish(publish::Action),
    /// Checks a template file without contacting SparkPost
    Validate(validate::Action),
}

impl Action {
    pub(crate) async fn execute(self) -> Result<(), sparkpost_publisher::Error> {
        match self {
            Self::Publish(inner) => inner.execute().await,
            Self::Validate(inner) => inner.execute().await,
        }
    }
}
