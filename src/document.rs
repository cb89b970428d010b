use super::*;

/// An arena-backed element tree.
///
/// Removing a child only detaches it, which keeps every `NodeId` handed out
/// valid for the lifetime of the document. Detached nodes are dropped by
/// `compacted`, which copies the attached tree into a fresh arena. Lookups
/// that mirror `document.querySelector` only see nodes attached to the root.
#[derive(Clone, Debug)]
pub(crate) struct Document {
  nodes: Vec<Node>,
  root: NodeId,
}

impl Default for Document {
  fn default() -> Self {
    Self::new()
  }
}

impl Document {
  pub(crate) fn add_class(&mut self, node: NodeId, class: &str) {
    let node = self.node_mut(node);

    if !node.has_class(class) {
      node.class_list.push(class.to_string());
    }
  }

  /// Registers `listener` for `kind`. Registering an equal listener twice is
  /// a no-op, and `false` is returned.
  pub(crate) fn add_event_listener(
    &mut self,
    node: NodeId,
    kind: EventKind,
    listener: Listener,
  ) -> bool {
    let listeners = &mut self.node_mut(node).listeners;

    if listeners
      .iter()
      .any(|(existing_kind, existing)| {
        *existing_kind == kind && *existing == listener
      })
    {
      return false;
    }

    listeners.push((kind, listener));

    true
  }

  /// Appends `child` to `parent`, detaching it from its previous parent.
  /// Appending a fragment moves its children instead and leaves it empty.
  pub(crate) fn append(&mut self, parent: NodeId, child: NodeId) {
    if self.contains(child, parent) {
      warn!(?parent, ?child, "refusing to append a node into its own subtree");
      return;
    }

    if self.node(child).kind == NodeKind::Fragment {
      let children = std::mem::take(&mut self.node_mut(child).children);

      for grandchild in children {
        self.node_mut(grandchild).parent = Some(parent);
        self.node_mut(parent).children.push(grandchild);
      }

      return;
    }

    self.detach(child);

    self.node_mut(child).parent = Some(parent);
    self.node_mut(parent).children.push(child);
  }

  pub(crate) fn children(&self, node: NodeId) -> &[NodeId] {
    &self.node(node).children
  }

  /// Copies the tree under the root into a fresh arena, dropping every
  /// detached node. The returned table maps each old id to its new one.
  pub(crate) fn compacted(&self) -> (Self, Vec<Option<NodeId>>) {
    let mut order = vec![self.root];
    order.extend(self.descendants(self.root));

    let mut relocated = vec![None; self.nodes.len()];

    for (index, old) in order.iter().enumerate() {
      relocated[old.0] = Some(NodeId(index));
    }

    let nodes = order
      .iter()
      .map(|&old| {
        let mut node = self.node(old).clone();

        node.children = node
          .children
          .iter()
          .filter_map(|child| relocated[child.0])
          .collect();

        node.parent = node.parent.and_then(|parent| relocated[parent.0]);

        node
      })
      .collect();

    (
      Self {
        nodes,
        root: NodeId(0),
      },
      relocated,
    )
  }

  fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
    let mut current = Some(node);

    while let Some(id) = current {
      if id == ancestor {
        return true;
      }

      current = self.node(id).parent;
    }

    false
  }

  pub(crate) fn create_element(&mut self, tag: &str) -> NodeId {
    self.insert(Node::new(NodeKind::Element(tag.to_string())))
  }

  pub(crate) fn create_fragment(&mut self) -> NodeId {
    self.insert(Node::new(NodeKind::Fragment))
  }

  /// Descendants of `scope` in document order, excluding `scope` itself.
  fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();

    let mut stack = self
      .children(scope)
      .iter()
      .rev()
      .copied()
      .collect::<Vec<_>>();

    while let Some(id) = stack.pop() {
      result.push(id);
      stack.extend(self.children(id).iter().rev().copied());
    }

    result
  }

  fn detach(&mut self, child: NodeId) {
    if let Some(parent) = self.node_mut(child).parent.take() {
      self
        .node_mut(parent)
        .children
        .retain(|&sibling| sibling != child);
    }
  }

  pub(crate) fn find_by_post_id(
    &self,
    tag: &str,
    post_id: &str,
  ) -> Option<NodeId> {
    self.descendants(self.root).into_iter().find(|&id| {
      let node = self.node(id);
      node.tag() == Some(tag) && node.post_id.as_deref() == Some(post_id)
    })
  }

  pub(crate) fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
    self
      .descendants(self.root)
      .into_iter()
      .find(|&node| self.node(node).id.as_deref() == Some(id))
  }

  pub(crate) fn has_class(&self, node: NodeId, class: &str) -> bool {
    self.node(node).has_class(class)
  }

  fn insert(&mut self, node: Node) -> NodeId {
    self.nodes.push(node);
    NodeId(self.nodes.len() - 1)
  }

  pub(crate) fn last_element_child(&self, node: NodeId) -> Option<NodeId> {
    self
      .children(node)
      .iter()
      .rev()
      .copied()
      .find(|&child| self.node(child).tag().is_some())
  }

  pub(crate) fn listeners(
    &self,
    node: NodeId,
    kind: EventKind,
  ) -> Vec<Listener> {
    self
      .node(node)
      .listeners
      .iter()
      .filter(|(registered, _)| *registered == kind)
      .map(|(_, listener)| listener.clone())
      .collect()
  }

  pub(crate) fn mark_handled(&mut self, node: NodeId) {
    self.node_mut(node).handled = true;
  }

  pub(crate) fn new() -> Self {
    Self {
      nodes: vec![Node::new(NodeKind::Element("body".into()))],
      root: NodeId(0),
    }
  }

  pub(crate) fn node(&self, id: NodeId) -> &Node {
    &self.nodes[id.0]
  }

  pub(crate) fn node_count(&self) -> usize {
    self.nodes.len()
  }

  fn node_mut(&mut self, id: NodeId) -> &mut Node {
    &mut self.nodes[id.0]
  }

  pub(crate) fn post_id(&self, node: NodeId) -> Option<&str> {
    self.node(node).post_id.as_deref()
  }

  /// First attached element with the given tag.
  pub(crate) fn query_selector(&self, tag: &str) -> Option<NodeId> {
    self
      .descendants(self.root)
      .into_iter()
      .find(|&id| self.node(id).tag() == Some(tag))
  }

  pub(crate) fn query_selector_all(
    &self,
    scope: NodeId,
    tag: &str,
  ) -> Vec<NodeId> {
    self
      .descendants(scope)
      .into_iter()
      .filter(|&id| self.node(id).tag() == Some(tag))
      .collect()
  }

  pub(crate) fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
    if self.node(child).parent != Some(parent) {
      return false;
    }

    self.detach(child);

    true
  }

  pub(crate) fn remove_event_listener(
    &mut self,
    node: NodeId,
    kind: EventKind,
    listener: &Listener,
  ) -> bool {
    let listeners = &mut self.node_mut(node).listeners;

    let before = listeners.len();

    listeners.retain(|(registered, existing)| {
      !(*registered == kind && existing == listener)
    });

    listeners.len() != before
  }

  pub(crate) fn root(&self) -> NodeId {
    self.root
  }

  pub(crate) fn set_id(&mut self, node: NodeId, id: &str) {
    self.node_mut(node).id = Some(id.to_string());
  }

  pub(crate) fn set_post_id(&mut self, node: NodeId, post_id: &str) {
    self.node_mut(node).post_id = Some(post_id.to_string());
  }

  pub(crate) fn set_text(&mut self, node: NodeId, text: &str) {
    self.node_mut(node).text = text.to_string();
  }

  pub(crate) fn set_value(&mut self, node: NodeId, value: &str) {
    self.node_mut(node).value = Some(value.to_string());
  }

  pub(crate) fn tag(&self, node: NodeId) -> Option<&str> {
    self.node(node).tag()
  }

  pub(crate) fn text(&self, node: NodeId) -> &str {
    &self.node(node).text
  }

  /// Serializes `node` and its subtree. Fragments serialize as their
  /// children.
  pub(crate) fn to_html(&self, node: NodeId) -> String {
    let mut html = String::new();
    self.write_html(node, &mut html);
    html
  }

  /// Toggles `class` and returns whether it is now present.
  pub(crate) fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
    let node = self.node_mut(node);

    if node.has_class(class) {
      node.class_list.retain(|name| name != class);
      false
    } else {
      node.class_list.push(class.to_string());
      true
    }
  }

  pub(crate) fn value(&self, node: NodeId) -> Option<&str> {
    self.node(node).value.as_deref()
  }

  fn write_html(&self, id: NodeId, html: &mut String) {
    let node = self.node(id);

    let Some(tag) = node.tag() else {
      for &child in &node.children {
        self.write_html(child, html);
      }

      return;
    };

    html.push('<');
    html.push_str(tag);

    let attributes = [
      ("id", node.id.clone()),
      (
        "class",
        (!node.class_list.is_empty()).then(|| node.class_list.join(" ")),
      ),
      ("data-post-id", node.post_id.clone()),
      ("value", node.value.clone()),
    ];

    for (name, value) in attributes {
      if let Some(value) = value {
        html.push(' ');
        html.push_str(name);
        html.push_str("=\"");
        html.push_str(&html_escape::encode_double_quoted_attribute(&value));
        html.push('"');
      }
    }

    html.push('>');
    html.push_str(&html_escape::encode_text(&node.text));

    for &child in &node.children {
      self.write_html(child, html);
    }

    html.push_str("</");
    html.push_str(tag);
    html.push('>');
  }
}
