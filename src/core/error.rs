use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Unknown ability: {0}")]
    UnknownAbility(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CalcError>;
