use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrgscopeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error: {status} for {url}")]
    Api {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, OrgscopeError>;
