use thiserror::Error;

pub type TopologyResult<T> = Result<T, TopologyError>;

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("failed to read topology file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no AS named {0} found in AS_config.txt")]
    UnknownAs(String),

    #[error(transparent)]
    InvalidLink(#[from] chaos_types::TypesError),

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("no link between {0} and {1}")]
    UnknownLink(String, String),
}
