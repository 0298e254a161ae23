//! Error types for vsphere-userdata

use crate::userdata::CredentialGroup;
use thiserror::Error;

/// Main error type for user data generation
#[derive(Error, Debug)]
pub enum UserDataError {
    #[error("{group} cert material in the {input} is missing cert/key")]
    MissingCredential {
        group: CredentialGroup,
        input: &'static str,
    },

    #[error("failed to parse {name} template: {source}")]
    TemplateParse {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to generate {name} template: {source}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("{message}: {source}")]
    Context {
        message: String,
        #[source]
        source: Box<UserDataError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UserDataError {
    /// Wrap this error with a caller-facing context message
    pub fn context(self, message: impl Into<String>) -> Self {
        Self::Context {
            message: message.into(),
            source: Box::new(self),
        }
    }

    /// Create a template render error
    pub fn template(name: impl Into<String>, source: minijinja::Error) -> Self {
        Self::Template {
            name: name.into(),
            source,
        }
    }

    /// Create a template parse error
    pub fn template_parse(name: impl Into<String>, source: minijinja::Error) -> Self {
        Self::TemplateParse {
            name: name.into(),
            source,
        }
    }

    /// Innermost error beneath any context layers
    pub fn root(&self) -> &UserDataError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// The incomplete credential group, if this is a validation failure
    pub fn missing_credential(&self) -> Option<CredentialGroup> {
        match self.root() {
            Self::MissingCredential { group, .. } => Some(*group),
            _ => None,
        }
    }

    /// Whether the underlying failure came from the template renderer
    pub fn is_template_error(&self) -> bool {
        matches!(
            self.root(),
            Self::Template { .. } | Self::TemplateParse { .. }
        )
    }
}
