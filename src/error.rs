use thiserror;

/// The Result type for slide48.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid direction {0:?}, expected one of up, down, left, right")]
    InvalidDirection(String),

    #[error("io error")]
    StdIOError(#[from] std::io::Error),

    #[error("log error")]
    LogError(#[from] log::SetLoggerError),

    #[error("terminal too small, required minimum size {0} x {1}")]
    TerminalTooSmall(usize, usize),
}
