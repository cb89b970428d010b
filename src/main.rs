use {
  action::Action,
  anyhow::{Context, anyhow},
  app::App,
  arguments::Arguments,
  binding::Binding,
  clap::{Parser, ValueEnum},
  click_event::ClickEvent,
  client::Client,
  comment::Comment,
  comment_renderer::build_comment_batch,
  company::Company,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  dispatch::Dispatch,
  document::Document,
  document_view::DocumentView,
  dump_format::DumpFormat,
  effect::Effect,
  elements::{TextElement, build_option_elements},
  event::Event,
  event_kind::EventKind,
  fetch_error::{FetchError, LogFailure},
  futures::{
    FutureExt,
    stream::{self, StreamExt},
  },
  interaction::{
    attach_toggle_listeners, detach_toggle_listeners, dispatch_toggle,
  },
  listener::Listener,
  node::{Node, NodeId, NodeKind},
  page::Page,
  pending_selection::PendingSelection,
  post::Post,
  post_renderer::build_post_batch,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Flex, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
  },
  refresh::Refresh,
  selection::Selection,
  serde::{Deserialize, de::DeserializeOwned},
  source::Source,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    io::{self, IsTerminal, Stdout},
    path::{Path, PathBuf},
    process,
    time::Duration,
  },
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing::{debug, error, info, warn},
  user::User,
  utils::{truncate, wrap_text},
};

mod action;
mod app;
mod arguments;
mod binding;
mod click_event;
mod client;
mod comment;
mod comment_renderer;
mod company;
mod dispatch;
mod document;
mod document_view;
mod dump_format;
mod effect;
mod elements;
mod event;
mod event_kind;
#[cfg(test)]
mod fake_source;
mod fetch_error;
mod interaction;
mod listener;
mod logging;
mod node;
mod page;
mod pending_selection;
mod post;
mod post_renderer;
mod refresh;
mod selection;
mod source;
mod state;
mod user;
mod utils;

const COMMENTS_CLASS: &str = "comments";

const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

const DEFAULT_CONCURRENCY: usize = 4;

const DEFAULT_LOG_FILTER: &str = "postboard=info";

const DEFAULT_TEXT: &str = "Select an Employee to display their posts.";

const DEFAULT_TEXT_CLASS: &str = "default-text";

const DEFAULT_USER_ID: &str = "1";

const DUMP_WIDTH: usize = 80;

const HELP_STATUS: &str = "Press ? or esc to close help";

const HELP_TITLE: &str = "Help";

const HIDDEN_CLASS: &str = "hide";

const HIDE_COMMENTS_LABEL: &str = "Hide Comments";

const IDLE_STATUS: &str =
  "←/→ employee • ↑/↓ focus • enter comments • o open • ? help • q quit";

const LOADING_POSTS_STATUS: &str = "Loading posts...";

const MAIN_TAG: &str = "main";

const SELECT_MENU_ID: &str = "selectMenu";

const SHOW_COMMENTS_LABEL: &str = "Show Comments";

const UNKNOWN_AUTHOR_TEXT: &str = "Author: unknown";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn dump(
  client: &Client,
  page: &mut Page,
  format: DumpFormat,
  user: Option<u64>,
) -> Result {
  let user_id = user
    .map_or_else(|| DEFAULT_USER_ID.to_string(), |id| id.to_string());

  page.change(&user_id);

  let selection = page
    .handle_selection_change(client, Some(user_id.as_str()))
    .await;

  if selection.posts.is_none() {
    return Err(anyhow!("could not load posts for user {user_id}"));
  }

  let html = page.document().to_html(page.main());

  match format {
    DumpFormat::Html => println!("{html}"),
    DumpFormat::Text => print!(
      "{}",
      html2text::from_read(html.as_bytes(), DUMP_WIDTH)
        .context("could not render page as text")?
    ),
  }

  Ok(())
}

async fn run() -> Result {
  let arguments = Arguments::parse();

  logging::init(arguments.log_file.as_deref(), arguments.dump.is_none())?;

  let client = Client::new(&arguments.base_url);

  let mut page = Page::new(arguments.concurrency);

  let users = page.bootstrap(&client).await;

  if let Some(format) = arguments.dump {
    return dump(&client, &mut page, format, arguments.user).await;
  }

  let mut state = State::new(page, users, arguments.base_url.clone());

  let initial = state.select_initial_user(arguments.user);

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, state);

  for effect in initial {
    app.execute_effect(effect);
  }

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
