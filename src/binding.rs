use super::*;

/// Keys that trigger one action, with the label shown for them in help.
pub(crate) struct Binding {
  pub(crate) action: Action,
  pub(crate) control: bool,
  pub(crate) keys: &'static [KeyCode],
  pub(crate) label: &'static str,
}

impl Binding {
  pub(crate) fn matches(&self, key: KeyEvent) -> bool {
    self.control == key.modifiers.contains(KeyModifiers::CONTROL)
      && self.keys.contains(&key.code)
  }
}
