#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("request to {url} could not be completed: {message}")]
    Transport { url: String, message: String },

    #[cfg(feature = "http-client")]
    #[error("underlying HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl HttpError {
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }
}
