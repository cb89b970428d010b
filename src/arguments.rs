use super::*;

#[derive(Debug, Parser)]
#[command(version, about = "Browse employees' posts and their comments")]
pub(crate) struct Arguments {
  #[arg(
    long,
    env = "POSTBOARD_BASE_URL",
    default_value = DEFAULT_BASE_URL,
    help = "Base URL of the posts API"
  )]
  pub(crate) base_url: String,
  #[arg(
    long,
    default_value_t = DEFAULT_CONCURRENCY,
    help = "How many posts to fetch authors and comments for at once"
  )]
  pub(crate) concurrency: usize,
  #[arg(
    long,
    value_enum,
    help = "Print the selected user's page instead of starting the UI"
  )]
  pub(crate) dump: Option<DumpFormat>,
  #[arg(long, env = "POSTBOARD_LOG_FILE", help = "Write logs to this file")]
  pub(crate) log_file: Option<PathBuf>,
  #[arg(long, help = "Select this user on start-up")]
  pub(crate) user: Option<u64>,
}
