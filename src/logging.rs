use {
  super::*,
  std::{fs::OpenOptions, sync::Mutex},
  tracing_subscriber::EnvFilter,
};

/// Installs the global subscriber. The terminal UI owns stdout, so logs go
/// to `log_file` when given and are otherwise dropped while interactive.
pub(crate) fn init(log_file: Option<&Path>, interactive: bool) -> Result {
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

  let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

  let result = match log_file {
    Some(path) => {
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
          format!("could not open log file {}", path.display())
        })?;

      subscriber
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
    }
    None if interactive => subscriber.with_writer(io::sink).try_init(),
    None => subscriber.with_writer(io::stderr).try_init(),
  };

  result.map_err(|error| anyhow!("could not initialize logging: {error}"))
}
