use super::*;

#[derive(Debug, thiserror::Error)]
pub(crate) enum FetchError {
  #[error("could not decode response from {url}: {source}")]
  Decode { source: reqwest::Error, url: String },
  #[error("request to {url} failed: {source}")]
  Request { source: reqwest::Error, url: String },
  #[error("{url} responded with {status}")]
  Status {
    status: reqwest::StatusCode,
    url: String,
  },
}

impl FetchError {
  pub(crate) fn name(&self) -> &'static str {
    match self {
      Self::Decode { .. } => "DecodeError",
      Self::Request { .. } => "RequestError",
      Self::Status { .. } => "StatusError",
    }
  }
}

/// Collapses a failed fetch into `None` after logging it, so rendering code
/// degrades to absent content instead of failing.
pub(crate) trait LogFailure<T> {
  fn or_log(self) -> Option<T>;
}

impl<T> LogFailure<T> for Result<T, FetchError> {
  fn or_log(self) -> Option<T> {
    match self {
      Ok(value) => Some(value),
      Err(error) => {
        error!(name = error.name(), message = %error, "fetch failed");
        None
      }
    }
  }
}
