use super::*;

fn toggle_listener(document: &Document, button: NodeId) -> Option<Listener> {
  document
    .post_id(button)
    .map(|post_id| Listener::ToggleComments {
      post_id: post_id.to_string(),
    })
}

pub(crate) fn attach_toggle_listeners(
  document: &mut Document,
  main: NodeId,
) -> Option<Vec<NodeId>> {
  let buttons = document.query_selector_all(main, "button");

  if buttons.is_empty() {
    return None;
  }

  for &button in &buttons {
    if let Some(listener) = toggle_listener(document, button) {
      document.add_event_listener(button, EventKind::Click, listener);
    }
  }

  Some(buttons)
}

pub(crate) fn detach_toggle_listeners(
  document: &mut Document,
  main: NodeId,
) -> Option<Vec<NodeId>> {
  let buttons = document.query_selector_all(main, "button");

  if buttons.is_empty() {
    return None;
  }

  for &button in &buttons {
    if let Some(listener) = toggle_listener(document, button) {
      document.remove_event_listener(button, EventKind::Click, &listener);
    }
  }

  Some(buttons)
}

/// Shows or hides the comment section of `post_id` and relabels its button.
///
/// Only attached elements are considered. The button label is derived from
/// the section's state when the section exists, so the two cannot drift
/// apart; a lone button just flips its label.
pub(crate) fn dispatch_toggle(
  document: &mut Document,
  event: Option<&ClickEvent>,
  post_id: Option<&str>,
) -> Option<(Option<NodeId>, Option<NodeId>)> {
  let event = event?;
  let post_id = post_id.filter(|post_id| !post_id.is_empty())?;

  document.mark_handled(event.target);

  let section = document.find_by_post_id("section", post_id);

  let hidden =
    section.map(|section| document.toggle_class(section, HIDDEN_CLASS));

  let button = document.find_by_post_id("button", post_id);

  if let Some(button) = button {
    let hidden = hidden
      .unwrap_or_else(|| document.text(button) == HIDE_COMMENTS_LABEL);

    let label = if hidden {
      SHOW_COMMENTS_LABEL
    } else {
      HIDE_COMMENTS_LABEL
    };

    document.set_text(button, label);
  }

  debug!(post_id, ?section, ?button, "toggled comments");

  Some((section, button))
}
