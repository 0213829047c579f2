use thiserror::Error;

pub type TypesResult<T> = Result<T, TypesError>;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid throughput string: {0}")]
    InvalidThroughput(String),

    #[error("unknown node: {0}")]
    UnknownNode(String),
}
