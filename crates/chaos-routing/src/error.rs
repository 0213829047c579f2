use chaos_gateway::GatewayError;
use thiserror::Error;

pub type RoutingResult<T> = Result<T, RoutingError>;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("routing command failed (exit {exit_code}): {stderr}")]
    CommandFailed { stderr: String, exit_code: i32 },

    #[error("unknown snapshot: {0}")]
    UnknownSnapshot(String),
}
