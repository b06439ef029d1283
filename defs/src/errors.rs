use thiserror::Error;

#[derive(Error, Debug)]
pub enum VariableDecodeError {
    #[error("invalid JSON")]
    InvalidJson(#[from] serde_json::Error),

    #[error("variable at position {0} has an empty key")]
    EmptyKey(usize),
}
