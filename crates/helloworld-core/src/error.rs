//! Error types for `helloworld-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown role: {0:?}")]
  UnknownRole(String),

  #[error("unknown difficulty: {0:?}")]
  UnknownDifficulty(String),

  #[error("unknown message kind: {0:?}")]
  UnknownMessageKind(String),

  #[error("unknown content kind: {0:?}")]
  UnknownContentKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
