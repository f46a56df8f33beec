use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors which abort a whole analysis run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("can't open log file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read log input")]
    Read(#[from] io::Error),

    #[error("can't open GeoIP database {}", path.display())]
    GeoIp {
        path: PathBuf,
        #[source]
        source: maxminddb::MaxMindDbError,
    },

    #[error("failed to render report")]
    Render(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reason a numeric log field was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("not a decimal number")]
    NonNumeric,

    #[error("value outside {min}..={max}")]
    OutOfRange { min: i64, max: i64 },
}
