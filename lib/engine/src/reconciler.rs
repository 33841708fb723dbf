//! Drives a SparkPost template into the requested state.
//!
//! SparkPost doesn't expose the state of a template in a way that allows to
//! pick the right call upfront, so the state is deduced from what the store
//! answers.
//!
//! A template is either missing, only has a draft, or has a published version.
//! Publishing goes through two different mechanisms depending on that last
//! distinction:
//!
//! - a body with `published: true` doesn't update an existing published version
//! - the `update_published` option is rejected with a 404 when no published
//!   version exists yet
//!
//! The update is first attempted with `update_published` and, on a 404, retried
//! once without it.

use crate::store::{NotFound, TemplateStore, UpdateOptions};
use sparkpost_publisher_prelude::{TemplateBody, TemplateDefinition};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteState {
    Absent,
    /// Either a draft or a published version exists, the store doesn't tell.
    Existing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    /// The store refused `update_published` because nothing is published yet.
    NoPublishedVersion,
}

#[derive(Clone, Debug)]
pub struct Reconciler<S> {
    store: S,
}

impl<S> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: TemplateStore> Reconciler<S> {
    async fn probe(&self, id: &str) -> Result<RemoteState, S::Error> {
        match self.store.fetch(id).await {
            Ok(()) => Ok(RemoteState::Existing),
            Err(err) if err.is_not_found() => Ok(RemoteState::Absent),
            Err(err) => Err(err),
        }
    }

    async fn try_update(
        &self,
        id: &str,
        payload: &TemplateBody,
        publish: bool,
    ) -> Result<UpdateOutcome, S::Error> {
        match self
            .store
            .update(id, payload, UpdateOptions::update_published(publish))
            .await
        {
            Ok(()) => Ok(UpdateOutcome::Applied),
            Err(err) if err.is_not_found() => Ok(UpdateOutcome::NoPublishedVersion),
            Err(err) => Err(err),
        }
    }

    /// Creates or updates the template so that the store holds its content,
    /// published or as a draft depending on `publish`.
    ///
    /// Errors from the store are returned as they are, the only one handled
    /// here being the not found signal.
    #[tracing::instrument(skip_all, fields(template = %template.id, publish = publish))]
    pub async fn reconcile(
        &self,
        template: &TemplateDefinition,
        publish: bool,
    ) -> Result<(), S::Error> {
        if self.probe(&template.id).await? == RemoteState::Absent {
            tracing::debug!("template doesn't exist, creating it");
            metrics::counter!("template_reconcile", "branch" => "create").increment(1);
            self.store.create(template).await?;
            if !publish {
                return Ok(());
            }
        }

        let payload = template.submit_payload(publish);
        tracing::debug!("updating template");
        metrics::counter!("template_reconcile", "branch" => "update").increment(1);
        match self.try_update(&template.id, &payload, publish).await? {
            UpdateOutcome::Applied => Ok(()),
            UpdateOutcome::NoPublishedVersion => {
                tracing::warn!("no published version, updating without update_published");
                metrics::counter!("template_reconcile", "branch" => "update_fallback")
                    .increment(1);
                self.store
                    .update(&template.id, &payload, UpdateOptions::default())
                    .await
            }
        }
    }

    pub async fn reconcile_draft(&self, template: &TemplateDefinition) -> Result<(), S::Error> {
        self.reconcile(template, false).await
    }
}
