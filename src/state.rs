use super::*;

pub(crate) struct State {
  base_url: String,
  focus: Option<usize>,
  follow_focus: bool,
  help_visible: bool,
  message: String,
  next_request_id: u64,
  page: Page,
  pending: Option<PendingSelection>,
  pending_effects: Vec<Effect>,
  scroll: usize,
  users: Vec<User>,
  view_height: usize,
}

impl State {
  fn click_focused(&mut self) {
    let Some(button) = self.focused_button() else {
      return;
    };

    if self.page.click(button) == 0 {
      return;
    }

    let document = self.page.document();

    let post_id = document.post_id(button).unwrap_or_default();

    self.message = if document.text(button) == HIDE_COMMENTS_LABEL {
      format!("Showing comments for post {post_id}")
    } else {
      format!("Hiding comments for post {post_id}")
    };
  }

  pub(crate) fn dispatch(&mut self, action: Action) -> Dispatch {
    debug_assert!(
      self.pending_effects.is_empty(),
      "dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match action {
      Action::ClickFocused => self.click_focused(),
      Action::FocusNext => self.focus_by(1),
      Action::FocusPrevious => self.focus_by(-1),
      Action::HideHelp => self.help_visible = false,
      Action::NextUser => self.select_user_by(1),
      Action::None => {}
      Action::OpenFocused => self.open_focused(),
      Action::PageDown => self.scroll_by(self.view_height),
      Action::PageUp => self.scroll_up_by(self.view_height),
      Action::PreviousUser => self.select_user_by(-1),
      Action::Quit => should_exit = true,
      Action::ShowHelp => self.help_visible = true,
    }

    Dispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit,
    }
  }

  fn focus_by(&mut self, delta: isize) {
    let count = self.page.buttons().len();

    if count == 0 {
      self.focus = None;
      return;
    }

    let current = self.focus.unwrap_or(0).min(count - 1);

    self.focus = Some(
      current
        .saturating_add_signed(delta)
        .min(count - 1),
    );

    self.follow_focus = true;
  }

  pub(crate) fn focused_button(&self) -> Option<NodeId> {
    self
      .focus
      .and_then(|index| self.page.buttons().get(index).copied())
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::Rendered {
        page,
        posts,
        request_id,
      } => {
        let Some(pending) = self.pending.as_ref() else {
          return;
        };

        if pending.request_id != request_id {
          debug!(
            request_id,
            latest = pending.request_id,
            "discarding stale page"
          );
          return;
        }

        let Some(pending) = self.pending.take() else {
          return;
        };

        self.page = *page;

        self.focus = (!self.page.buttons().is_empty()).then_some(0);
        self.follow_focus = true;
        self.scroll = 0;

        let message = match posts {
          Some(count) => format!(
            "{count} {} by {}",
            if count == 1 { "post" } else { "posts" },
            self.user_label(&pending.user_id)
          ),
          None => format!("Could not load posts for user {}", pending.user_id),
        };

        self.set_message(message);
      }
    }
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help_visible
  }

  /// Status line text. While help is open it names the keys that close it;
  /// messages set meanwhile show once help closes.
  pub(crate) fn message(&self) -> &str {
    if self.help_visible {
      HELP_STATUS
    } else {
      &self.message
    }
  }

  pub(crate) fn new(page: Page, users: Vec<User>, base_url: String) -> Self {
    let message = if page.options().is_empty() {
      "No employees could be loaded".to_string()
    } else {
      IDLE_STATUS.to_string()
    };

    Self {
      base_url,
      focus: None,
      follow_focus: true,
      help_visible: false,
      message,
      next_request_id: 0,
      page,
      pending: None,
      pending_effects: Vec::new(),
      scroll: 0,
      users,
      view_height: 1,
    }
  }

  fn open_focused(&mut self) {
    let Some(post_id) = self
      .focused_button()
      .and_then(|button| self.page.document().post_id(button))
    else {
      return;
    };

    let url =
      format!("{}/posts/{post_id}", self.base_url.trim_end_matches('/'));

    self.pending_effects.push(Effect::OpenUrl { url });
  }

  pub(crate) fn page(&self) -> &Page {
    &self.page
  }

  pub(crate) fn scroll(&self) -> usize {
    self.scroll
  }

  fn scroll_by(&mut self, lines: usize) {
    self.scroll = self.scroll.saturating_add(lines);
    self.follow_focus = false;
  }

  fn scroll_up_by(&mut self, lines: usize) {
    self.scroll = self.scroll.saturating_sub(lines);
    self.follow_focus = false;
  }

  /// Selects `user` on start-up, if it is one of the selector's options.
  pub(crate) fn select_initial_user(
    &mut self,
    user: Option<u64>,
  ) -> Vec<Effect> {
    if let Some(user) = user {
      let value = user.to_string();

      if self.page.options().iter().any(|(option, _)| *option == value) {
        self.select_value(value);
      } else {
        self.set_message(format!("Unknown employee {user}"));
      }
    }

    std::mem::take(&mut self.pending_effects)
  }

  fn select_user_by(&mut self, delta: isize) {
    let options = self.page.options();

    if options.is_empty() {
      self.set_message("No employees to choose from".into());
      return;
    }

    let current = self
      .page
      .selected_value()
      .and_then(|value| options.iter().position(|(option, _)| option == value));

    let last = options.len() - 1;

    let target = match current {
      Some(index) => index.saturating_add_signed(delta).min(last),
      None if delta < 0 => last,
      None => 0,
    };

    if current == Some(target) {
      return;
    }

    self.select_value(options[target].0.clone());
  }

  fn select_value(&mut self, value: String) {
    if !self.page.change(&value) {
      return;
    }

    let request_id = self.next_request_id;

    self.next_request_id += 1;

    self.pending = Some(PendingSelection {
      request_id,
      user_id: value.clone(),
    });

    self.pending_effects.push(Effect::RenderSelection {
      page: Box::new(self.page.snapshot()),
      request_id,
      value,
    });

    self.set_message(LOADING_POSTS_STATUS.into());
  }

  /// Label for the selector bar.
  pub(crate) fn selector_label(&self) -> String {
    let options = self.page.options();

    if options.is_empty() {
      return "No employees".into();
    }

    let selected = self
      .page
      .selected_value()
      .and_then(|value| options.iter().position(|(option, _)| option == value));

    match selected {
      Some(index) => format!(
        "◀ {} ({}/{}) ▶",
        options[index].1,
        index + 1,
        options.len()
      ),
      None => "Select an employee with ← / →".into(),
    }
  }

  pub(crate) fn set_message(&mut self, message: String) {
    self.message = message;
  }

  fn user_label(&self, user_id: &str) -> String {
    self
      .users
      .iter()
      .find(|user| user.id.to_string() == user_id)
      .map_or_else(|| format!("user {user_id}"), User::label)
  }

  /// Lays out the page for a `width` x `height` viewport, scrolling the
  /// focused button into view unless the user scrolled away from it.
  pub(crate) fn view(&mut self, width: usize, height: usize) -> DocumentView {
    let height = height.max(1);

    let focused = self.focused_button();

    let view = DocumentView::new(
      self.page.document(),
      self.page.main(),
      focused,
      width,
    );

    self.view_height = height;

    if self.follow_focus
      && let Some(line) = focused.and_then(|button| view.anchor(button))
    {
      if line < self.scroll {
        self.scroll = line;
      } else if line >= self.scroll + height {
        self.scroll = line + 1 - height;
      }
    }

    self.scroll = self.scroll.min(view.len().saturating_sub(height));

    view
  }
}

#[cfg(test)]
mod tests {
  use {super::*, fake_source::FakeSource};

  async fn bootstrapped_state(source: &FakeSource) -> State {
    let mut page = Page::new(4);

    let users = page.bootstrap(source).await;

    State::new(page, users, "https://example.test/".into())
  }

  async fn render(source: &FakeSource, effect: Effect) -> Event {
    let Effect::RenderSelection {
      page,
      request_id,
      value,
    } = effect
    else {
      panic!("unexpected effect variant");
    };

    let mut page = *page;

    let selection = page
      .handle_selection_change(source, Some(value.as_str()))
      .await;

    Event::Rendered {
      page: Box::new(page),
      posts: selection.posts.map(|posts| posts.len()),
      request_id,
    }
  }

  #[tokio::test]
  async fn next_user_selects_the_first_option() {
    let source = FakeSource::sample();
    let mut state = bootstrapped_state(&source).await;

    let dispatch = state.dispatch(Action::NextUser);

    assert!(!dispatch.should_exit);
    assert_eq!(dispatch.effects.len(), 1);

    match &dispatch.effects[0] {
      Effect::RenderSelection { value, .. } => assert_eq!(value, "1"),
      Effect::OpenUrl { .. } => panic!("unexpected effect variant"),
    }

    assert_eq!(state.page().selected_value(), Some("1"));
    assert_eq!(state.message(), LOADING_POSTS_STATUS);
    assert_eq!(state.selector_label(), "◀ Leanne Graham (1/3) ▶");
  }

  #[tokio::test]
  async fn previous_user_from_nothing_selects_the_last_option() {
    let source = FakeSource::sample();
    let mut state = bootstrapped_state(&source).await;

    state.dispatch(Action::PreviousUser);

    assert_eq!(state.page().selected_value(), Some("3"));
  }

  #[tokio::test]
  async fn moving_past_the_last_user_does_nothing() {
    let source = FakeSource::sample();
    let mut state = bootstrapped_state(&source).await;

    state.select_initial_user(Some(3));

    let dispatch = state.dispatch(Action::NextUser);

    assert!(dispatch.effects.is_empty());
  }

  #[tokio::test]
  async fn stale_pages_are_discarded() {
    let source = FakeSource::sample();
    let mut state = bootstrapped_state(&source).await;

    let first = state.dispatch(Action::NextUser).effects.remove(0);
    let second = state.dispatch(Action::NextUser).effects.remove(0);

    let stale = render(&source, first).await;
    let latest = render(&source, second).await;

    state.handle_event(stale);

    assert!(state.page().buttons().is_empty());
    assert_eq!(state.message(), LOADING_POSTS_STATUS);

    state.handle_event(latest);

    assert!(state.page().buttons().is_empty());
    assert_eq!(state.message(), "0 posts by Ervin Howell");
    assert_eq!(state.focused_button(), None);
  }

  #[tokio::test]
  async fn rendered_page_focuses_the_first_button() {
    let source = FakeSource::sample();
    let mut state = bootstrapped_state(&source).await;

    let effects = state.select_initial_user(Some(3));

    assert_eq!(effects.len(), 1);

    let event = render(&source, effects.into_iter().next().unwrap()).await;

    state.handle_event(event);

    let buttons = state.page().buttons();

    assert_eq!(buttons.len(), 3);
    assert_eq!(state.focused_button(), Some(buttons[0]));
    assert_eq!(state.message(), "3 posts by Clementine Bauch");

    state.dispatch(Action::FocusNext);
    state.dispatch(Action::FocusNext);
    state.dispatch(Action::FocusNext);

    assert_eq!(state.focused_button(), Some(buttons[2]));

    state.dispatch(Action::FocusPrevious);

    assert_eq!(state.focused_button(), Some(buttons[1]));
  }

  #[tokio::test]
  async fn clicking_the_focused_button_toggles_its_comments() {
    let source = FakeSource::sample();
    let mut state = bootstrapped_state(&source).await;

    let effect = state.select_initial_user(Some(1)).remove(0);
    let event = render(&source, effect).await;

    state.handle_event(event);

    let button = state.focused_button().unwrap();

    state.dispatch(Action::ClickFocused);

    let document = state.page().document();
    let section = document.find_by_post_id("section", "1").unwrap();

    assert_eq!(document.text(button), HIDE_COMMENTS_LABEL);
    assert!(!document.has_class(section, HIDDEN_CLASS));
    assert_eq!(state.message(), "Showing comments for post 1");

    state.dispatch(Action::ClickFocused);

    assert_eq!(state.message(), "Hiding comments for post 1");
    assert!(state.page().document().has_class(section, HIDDEN_CLASS));
  }

  #[tokio::test]
  async fn open_focused_links_to_the_post() {
    let source = FakeSource::sample();
    let mut state = bootstrapped_state(&source).await;

    let effect = state.select_initial_user(Some(1)).remove(0);
    let event = render(&source, effect).await;

    state.handle_event(event);

    let dispatch = state.dispatch(Action::OpenFocused);

    match &dispatch.effects[..] {
      [Effect::OpenUrl { url }] => {
        assert_eq!(url, "https://example.test/posts/1");
      }
      _ => panic!("unexpected effects"),
    }
  }

  #[tokio::test]
  async fn unknown_initial_user_is_reported() {
    let source = FakeSource::sample();
    let mut state = bootstrapped_state(&source).await;

    assert!(state.select_initial_user(Some(42)).is_empty());
    assert_eq!(state.message(), "Unknown employee 42");
  }

  #[tokio::test]
  async fn empty_selector_reports_missing_employees() {
    let source = FakeSource::sample().with_failing_users();
    let mut state = bootstrapped_state(&source).await;

    assert_eq!(state.message(), "No employees could be loaded");
    assert_eq!(state.selector_label(), "No employees");
    assert!(state.dispatch(Action::NextUser).effects.is_empty());
  }

  #[tokio::test]
  async fn view_scrolls_to_keep_focus_visible() {
    let source = FakeSource::sample();
    let mut state = bootstrapped_state(&source).await;

    let effect = state.select_initial_user(Some(3)).remove(0);
    let event = render(&source, effect).await;

    state.handle_event(event);

    state.dispatch(Action::FocusNext);
    state.dispatch(Action::FocusNext);

    let view = state.view(80, 3);

    let line = view.anchor(state.focused_button().unwrap()).unwrap();

    assert!(state.scroll() <= line);
    assert!(line < state.scroll() + 3);

    state.dispatch(Action::PageUp);
    state.view(80, 3);

    assert!(state.scroll() < line.saturating_sub(2));
  }

  #[tokio::test]
  async fn help_hides_the_status_until_closed() {
    let source = FakeSource::sample();
    let mut state = bootstrapped_state(&source).await;

    state.dispatch(Action::ShowHelp);

    assert!(state.help_is_visible());
    assert_eq!(state.message(), HELP_STATUS);

    state.set_message("Opened in browser".into());

    assert_eq!(state.message(), HELP_STATUS);

    state.dispatch(Action::HideHelp);

    assert!(!state.help_is_visible());
    assert_eq!(state.message(), "Opened in browser");
  }

  #[tokio::test]
  async fn quit_exits() {
    let source = FakeSource::sample();
    let mut state = bootstrapped_state(&source).await;

    assert!(state.dispatch(Action::Quit).should_exit);
  }
}
