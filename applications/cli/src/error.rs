use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Catalog(#[from] melody_core::CoreError),

    #[error(transparent)]
    Client(#[from] melody_client::ClientError),
}

pub type Result<T> = std::result::Result<T, CliError>;
