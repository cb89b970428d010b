use super::*;

const INDENT: &str = "  ";

/// Terminal lines for the children of one document node. Hidden subtrees
/// are skipped; each button records the line it was drawn on.
pub(crate) struct DocumentView {
  anchors: Vec<(NodeId, usize)>,
  lines: Vec<Line<'static>>,
}

impl DocumentView {
  pub(crate) fn anchor(&self, node: NodeId) -> Option<usize> {
    self
      .anchors
      .iter()
      .find(|(anchored, _)| *anchored == node)
      .map(|(_, line)| *line)
  }

  pub(crate) fn into_lines(self) -> Vec<Line<'static>> {
    self.lines
  }

  pub(crate) fn len(&self) -> usize {
    self.lines.len()
  }

  pub(crate) fn new(
    document: &Document,
    root: NodeId,
    focused: Option<NodeId>,
    width: usize,
  ) -> Self {
    let mut view = Self {
      anchors: Vec::new(),
      lines: Vec::new(),
    };

    for &child in document.children(root) {
      view.push_node(document, child, focused, width, 0);
    }

    view
  }

  fn push_node(
    &mut self,
    document: &Document,
    node: NodeId,
    focused: Option<NodeId>,
    width: usize,
    depth: usize,
  ) {
    if document.has_class(node, HIDDEN_CLASS) {
      return;
    }

    let indent = INDENT.repeat(depth);

    match document.tag(node) {
      Some("article") => {
        for &child in document.children(node) {
          self.push_node(document, child, focused, width, depth);
        }

        self.lines.push(Line::from(Span::raw(indent)));
      }
      Some("section") => {
        for &child in document.children(node) {
          self.push_node(document, child, focused, width, depth + 1);
        }
      }
      Some("button") => {
        let style = if focused == Some(node) {
          Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
          Style::default().fg(Color::Cyan)
        };

        self.anchors.push((node, self.lines.len()));

        self.lines.push(Line::from(vec![
          Span::raw(indent),
          Span::styled(format!("[ {} ]", document.text(node)), style),
        ]));
      }
      tag => {
        let style = match tag {
          Some("h2") => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
          Some("h3") => Style::default().fg(Color::White),
          _ if document.has_class(node, DEFAULT_TEXT_CLASS) => {
            Style::default().fg(Color::DarkGray)
          }
          _ => Style::default().fg(Color::Gray),
        };

        let wrap_width = width.saturating_sub(indent.chars().count()).max(1);

        for line in wrap_text(document.text(node), wrap_width) {
          self.lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(line, style),
          ]));
        }

        for &child in document.children(node) {
          self.push_node(document, child, focused, width, depth);
        }
      }
    }
  }
}
