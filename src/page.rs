use super::*;

/// The host page: a `select#selectMenu` above a `main` container that the
/// render pipeline fills with posts.
#[derive(Clone, Debug)]
pub(crate) struct Page {
  concurrency: usize,
  document: Document,
  main: NodeId,
  select: NodeId,
}

impl Page {
  pub(crate) fn attach_toggle_listeners(&mut self) -> Option<Vec<NodeId>> {
    attach_toggle_listeners(&mut self.document, self.main)
  }

  /// Fills the selector with every user and wires its change event. A failed
  /// user fetch leaves the selector empty.
  pub(crate) async fn bootstrap<S: Source>(&mut self, source: &S) -> Vec<User> {
    let users = source.fetch_all_users().await.or_log();

    self.populate_selector(users.as_deref());

    self.document.add_event_listener(
      self.select,
      EventKind::Change,
      Listener::SelectionChange,
    );

    let users = users.unwrap_or_default();

    info!(count = users.len(), "populated selector");

    users
  }

  pub(crate) fn buttons(&self) -> Vec<NodeId> {
    self.document.query_selector_all(self.main, "button")
  }

  /// Sets the selector value. Returns whether a selection change listener is
  /// wired, in which case the caller runs a render cycle for the new value.
  pub(crate) fn change(&mut self, value: &str) -> bool {
    self.document.set_value(self.select, value);

    self
      .document
      .listeners(self.select, EventKind::Change)
      .contains(&Listener::SelectionChange)
  }

  fn clear_main(&mut self) -> NodeId {
    while let Some(child) = self.document.last_element_child(self.main) {
      self.document.remove_child(self.main, child);
    }

    self.main
  }

  /// Dispatches a click on `node` and returns how many listeners fired.
  pub(crate) fn click(&mut self, node: NodeId) -> usize {
    let listeners = self.document.listeners(node, EventKind::Click);

    let event = ClickEvent { target: node };

    for listener in &listeners {
      match listener {
        Listener::ToggleComments { post_id } => {
          self.dispatch_toggle(Some(&event), Some(post_id));
        }
        Listener::SelectionChange => {}
      }
    }

    listeners.len()
  }

  pub(crate) fn detach_toggle_listeners(&mut self) -> Option<Vec<NodeId>> {
    detach_toggle_listeners(&mut self.document, self.main)
  }

  pub(crate) fn dispatch_toggle(
    &mut self,
    event: Option<&ClickEvent>,
    post_id: Option<&str>,
  ) -> Option<(Option<NodeId>, Option<NodeId>)> {
    dispatch_toggle(&mut self.document, event, post_id)
  }

  pub(crate) fn document(&self) -> &Document {
    &self.document
  }

  /// Runs a render cycle for the selected user, defaulting to user 1 when the
  /// selector carries no value.
  pub(crate) async fn handle_selection_change<S: Source>(
    &mut self,
    source: &S,
    value: Option<&str>,
  ) -> Selection {
    let user_id = value
      .filter(|value| !value.is_empty())
      .unwrap_or(DEFAULT_USER_ID)
      .to_string();

    let posts = match user_id.parse::<u64>() {
      Ok(id) => source.fetch_posts_for_user(id).await.or_log(),
      Err(error) => {
        warn!(%user_id, %error, "ignoring selection with invalid user id");
        None
      }
    };

    let refresh = self.refresh_and_rewire(source, posts.as_deref()).await;

    info!(
      %user_id,
      posts = posts.as_ref().map(Vec::len),
      "selection changed"
    );

    Selection {
      posts,
      refresh,
      user_id,
    }
  }

  pub(crate) fn main(&self) -> NodeId {
    self.main
  }

  pub(crate) fn new(concurrency: usize) -> Self {
    let mut document = Document::new();

    let root = document.root();

    let select = document.create_element("select");
    document.set_id(select, SELECT_MENU_ID);

    let main = document.create_element(MAIN_TAG);

    let placeholder = TextElement::new("p")
      .text(DEFAULT_TEXT)
      .class_name(DEFAULT_TEXT_CLASS)
      .build(&mut document);

    document.append(main, placeholder);
    document.append(root, select);
    document.append(root, main);

    Self {
      concurrency,
      document,
      main,
      select,
    }
  }

  /// Selector options as `(value, label)` pairs.
  pub(crate) fn options(&self) -> Vec<(String, String)> {
    self
      .document
      .query_selector_all(self.select, "option")
      .into_iter()
      .map(|option| {
        (
          self.document.value(option).unwrap_or_default().to_string(),
          self.document.text(option).to_string(),
        )
      })
      .collect()
  }

  pub(crate) fn populate_selector(
    &mut self,
    users: Option<&[User]>,
  ) -> Option<NodeId> {
    let select = self.document.get_element_by_id(SELECT_MENU_ID)?;

    for option in build_option_elements(&mut self.document, users)? {
      self.document.append(select, option);
    }

    Some(select)
  }

  /// Detaches listeners, clears `main`, renders `posts` and reattaches
  /// listeners, strictly in that order.
  pub(crate) async fn refresh_and_rewire<S: Source>(
    &mut self,
    source: &S,
    posts: Option<&[Post]>,
  ) -> Option<Refresh> {
    let posts = posts?;

    let detached = self.detach_toggle_listeners();

    let main = self.clear_main();

    let content = self.render_main_content(source, Some(posts)).await;

    let attached = self.attach_toggle_listeners();

    Some(Refresh {
      attached,
      content,
      detached,
      main,
    })
  }

  /// Appends the rendered posts to `main`, or the default paragraph when
  /// there are none.
  pub(crate) async fn render_main_content<S: Source>(
    &mut self,
    source: &S,
    posts: Option<&[Post]>,
  ) -> NodeId {
    let batch = match posts {
      Some(posts) if !posts.is_empty() => {
        build_post_batch(
          &mut self.document,
          source,
          Some(posts),
          self.concurrency,
        )
        .await
      }
      _ => None,
    };

    let content = batch.unwrap_or_else(|| {
      TextElement::new("p")
        .text(DEFAULT_TEXT)
        .class_name(DEFAULT_TEXT_CLASS)
        .build(&mut self.document)
    });

    self.document.append(self.main, content);

    content
  }

  pub(crate) fn selected_value(&self) -> Option<&str> {
    self.document.value(self.select)
  }

  /// A copy of the page holding only attached nodes, handed to render tasks
  /// so earlier refreshes are not carried along.
  pub(crate) fn snapshot(&self) -> Self {
    let (document, relocated) = self.document.compacted();

    match (relocated[self.main.0], relocated[self.select.0]) {
      (Some(main), Some(select)) => Self {
        concurrency: self.concurrency,
        document,
        main,
        select,
      },
      _ => self.clone(),
    }
  }
}
