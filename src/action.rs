use super::*;

const KEY_BINDINGS: &[Binding] = &[
  Binding {
    action: Action::PreviousUser,
    control: false,
    keys: &[KeyCode::Left, KeyCode::Char('h')],
    label: "← / h",
  },
  Binding {
    action: Action::NextUser,
    control: false,
    keys: &[KeyCode::Right, KeyCode::Char('l')],
    label: "→ / l",
  },
  Binding {
    action: Action::FocusPrevious,
    control: false,
    keys: &[KeyCode::Up, KeyCode::Char('k'), KeyCode::BackTab],
    label: "↑ / k",
  },
  Binding {
    action: Action::FocusNext,
    control: false,
    keys: &[KeyCode::Down, KeyCode::Char('j'), KeyCode::Tab],
    label: "↓ / j",
  },
  Binding {
    action: Action::ClickFocused,
    control: false,
    keys: &[KeyCode::Enter, KeyCode::Char(' ')],
    label: "enter",
  },
  Binding {
    action: Action::OpenFocused,
    control: false,
    keys: &[KeyCode::Char('o'), KeyCode::Char('O')],
    label: "o",
  },
  Binding {
    action: Action::PageDown,
    control: false,
    keys: &[KeyCode::PageDown],
    label: "pg↓",
  },
  Binding {
    action: Action::PageDown,
    control: true,
    keys: &[KeyCode::Char('d')],
    label: "ctrl+d",
  },
  Binding {
    action: Action::PageUp,
    control: false,
    keys: &[KeyCode::PageUp],
    label: "pg↑",
  },
  Binding {
    action: Action::PageUp,
    control: true,
    keys: &[KeyCode::Char('u')],
    label: "ctrl+u",
  },
  Binding {
    action: Action::ShowHelp,
    control: false,
    keys: &[KeyCode::Char('?')],
    label: "?",
  },
  Binding {
    action: Action::Quit,
    control: false,
    keys: &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc],
    label: "q / esc",
  },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
  ClickFocused,
  FocusNext,
  FocusPrevious,
  HideHelp,
  NextUser,
  None,
  OpenFocused,
  PageDown,
  PageUp,
  PreviousUser,
  Quit,
  ShowHelp,
}

impl Action {
  fn description(self) -> &'static str {
    match self {
      Self::ClickFocused => "show or hide comments for the focused post",
      Self::FocusNext => "focus the next post",
      Self::FocusPrevious => "focus the previous post",
      Self::HideHelp => "close help",
      Self::NextUser => "next employee",
      Self::None => "",
      Self::OpenFocused => "open the focused post in your browser",
      Self::PageDown => "scroll down",
      Self::PageUp => "scroll up",
      Self::PreviousUser => "previous employee",
      Self::Quit => "quit",
      Self::ShowHelp => "show this help",
    }
  }

  /// Keys accepted while the help overlay is open.
  pub(crate) fn from_help_key(key: KeyEvent) -> Self {
    match key.code {
      KeyCode::Char('?') | KeyCode::Esc => Self::HideHelp,
      KeyCode::Char('q' | 'Q') => Self::Quit,
      _ => Self::None,
    }
  }

  pub(crate) fn from_key(key: KeyEvent) -> Self {
    KEY_BINDINGS
      .iter()
      .find(|binding| binding.matches(key))
      .map_or(Self::None, |binding| binding.action)
  }

  /// One line per key binding, in the order they are matched.
  pub(crate) fn help_lines() -> Vec<String> {
    KEY_BINDINGS
      .iter()
      .map(|binding| {
        format!("{:<9}{}", binding.label, binding.action.description())
      })
      .collect()
  }
}
