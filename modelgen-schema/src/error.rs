use thiserror::Error;

/// Adapter or connectivity failure while reading the catalog.
///
/// Wraps the underlying cause; the core never retries.
#[derive(Debug, Error)]
#[error("schema introspection failed: {message}")]
pub struct IntrospectionError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl IntrospectionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
