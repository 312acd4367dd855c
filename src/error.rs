use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("BIDS root `{0}` does not exist")]
    RootNotFound(PathBuf),

    #[error("BIDS root `{0}` is not a directory")]
    InvalidRoot(PathBuf),

    #[error("failed to walk the dataset tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("unknown entity `{0}`")]
    UnknownEntity(String),

    #[error("invalid range `{0}`: expected `<start>-<stop>` with digits or `*` on each side")]
    InvalidRange(String),

    #[error("failed to read index options from `{path}`: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid index options: {0}")]
    Config(#[from] ini::ParseError),
}
