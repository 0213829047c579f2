use chaos_gateway::GatewayError;
use thiserror::Error;

pub type ShapingResult<T> = Result<T, ShapingError>;

#[derive(Debug, Error)]
pub enum ShapingError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("shaping command failed (exit {exit_code}): {stderr}")]
    CommandFailed { stderr: String, exit_code: i32 },

    #[error("could not resolve egress interface toward {0}")]
    InterfaceNotFound(String),
}
