use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("no link between {0} and {1}")]
    UnknownLink(String, String),

    #[error("unknown snapshot: {0}")]
    UnknownSnapshot(String),

    #[error("no capture in progress")]
    NoCaptureInProgress,

    #[error("a capture is already in progress")]
    CaptureAlreadyInProgress,

    #[error(transparent)]
    Topology(#[from] chaos_topology::TopologyError),

    #[error(transparent)]
    Shaping(#[from] chaos_shaping::ShapingError),

    #[error(transparent)]
    Routing(#[from] chaos_routing::RoutingError),

    #[error(transparent)]
    Gateway(#[from] chaos_gateway::GatewayError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownNode(_)
            | ApiError::UnknownLink(..)
            | ApiError::UnknownSnapshot(_)
            | ApiError::Topology(chaos_topology::TopologyError::UnknownNode(_))
            | ApiError::Topology(chaos_topology::TopologyError::UnknownLink(..))
            | ApiError::Gateway(chaos_gateway::GatewayError::ContainerNotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
