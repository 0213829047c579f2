use thiserror::Error;

pub type ChaosResult<T> = Result<T, ChaosError>;

#[derive(Debug, Error)]
pub enum ChaosError {
    #[error("control plane request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("control plane returned an unexpected body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request log setup failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("control plane reported no {0} during startup configuration")]
    EmptyConfiguration(&'static str),

    #[error("port pool exhausted")]
    ResourceExhausted,

    #[error("control plane returned {status}: {detail}")]
    Transient { status: u16, detail: String },
}
