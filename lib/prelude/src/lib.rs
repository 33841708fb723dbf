use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Mailbox {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum Sender {
    Address(String),
    Mailbox(Mailbox),
}

impl Sender {
    pub fn email(&self) -> &str {
        match self {
            Self::Address(inner) => inner.as_str(),
            Self::Mailbox(inner) => inner.email.as_str(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct StructuredContent {
    pub from: Sender,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amp_html: Option<String>,
}

impl StructuredContent {
    fn has_body(&self) -> bool {
        [&self.html, &self.text, &self.amp_html]
            .into_iter()
            .any(|part| part.as_deref().is_some_and(|value| !value.is_empty()))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct Rfc822Content {
    pub email_rfc822: String,
}

/// The content of a template is either built by SparkPost from its parts or
/// given as a complete RFC 822 message, never both.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum TemplateContent {
    Rfc822(Rfc822Content),
    Structured(StructuredContent),
}

impl TemplateContent {
    pub fn rfc822(email_rfc822: impl Into<String>) -> Self {
        Self::Rfc822(Rfc822Content {
            email_rfc822: email_rfc822.into(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TemplateOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_tracking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_tracking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactional: Option<bool>,
}

/// Everything describing a template except the identifier it is stored at.
///
/// Fields SparkPost accepts but that are not modelled here are kept in `extra`
/// and sent back as they were read.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TemplateBody {
    pub content: TemplateContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<TemplateOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_with_subaccounts: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TemplateDefinition {
    pub id: String,
    #[serde(flatten)]
    pub body: TemplateBody,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("template id should not be empty")]
    EmptyId,
    #[error("template rfc822 content should not be empty")]
    EmptyRfc822,
    #[error("template sender should not be empty")]
    EmptySender,
    #[error("template subject should not be empty")]
    EmptySubject,
    #[error("template should have at least a html, text or amp_html part")]
    MissingBody,
}

impl TemplateDefinition {
    pub fn new(id: impl Into<String>, content: TemplateContent) -> Self {
        Self {
            id: id.into(),
            body: TemplateBody {
                content,
                name: None,
                description: None,
                published: None,
                options: None,
                shared_with_subaccounts: None,
                extra: Default::default(),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        match &self.body.content {
            TemplateContent::Rfc822(inner) if inner.email_rfc822.trim().is_empty() => {
                Err(ValidationError::EmptyRfc822)
            }
            TemplateContent::Rfc822(_) => Ok(()),
            TemplateContent::Structured(inner) if inner.from.email().trim().is_empty() => {
                Err(ValidationError::EmptySender)
            }
            TemplateContent::Structured(inner) if inner.subject.trim().is_empty() => {
                Err(ValidationError::EmptySubject)
            }
            TemplateContent::Structured(inner) if !inner.has_body() => {
                Err(ValidationError::MissingBody)
            }
            TemplateContent::Structured(_) => Ok(()),
        }
    }

    /// Builds the body sent when updating this template.
    ///
    /// The store addresses templates through the url so the identifier is left
    /// out, and the published flag always reflects the requested state.
    pub fn submit_payload(&self, publish: bool) -> TemplateBody {
        TemplateBody {
            published: Some(publish),
            ..self.body.clone()
        }
    }
}
