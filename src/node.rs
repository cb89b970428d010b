use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NodeKind {
  Element(String),
  Fragment,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
  pub(crate) children: Vec<NodeId>,
  pub(crate) class_list: Vec<String>,
  pub(crate) handled: bool,
  pub(crate) id: Option<String>,
  pub(crate) kind: NodeKind,
  pub(crate) listeners: Vec<(EventKind, Listener)>,
  pub(crate) parent: Option<NodeId>,
  pub(crate) post_id: Option<String>,
  pub(crate) text: String,
  pub(crate) value: Option<String>,
}

impl Node {
  pub(crate) fn has_class(&self, class: &str) -> bool {
    self.class_list.iter().any(|name| name == class)
  }

  pub(crate) fn new(kind: NodeKind) -> Self {
    Self {
      children: Vec::new(),
      class_list: Vec::new(),
      handled: false,
      id: None,
      kind,
      listeners: Vec::new(),
      parent: None,
      post_id: None,
      text: String::new(),
      value: None,
    }
  }

  pub(crate) fn tag(&self) -> Option<&str> {
    match &self.kind {
      NodeKind::Element(tag) => Some(tag.as_str()),
      NodeKind::Fragment => None,
    }
  }
}
