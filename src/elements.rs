use super::*;

/// Builder for an element carrying only text, defaulting to an empty `p`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TextElement<'a> {
  class_name: Option<&'a str>,
  tag: &'a str,
  text: &'a str,
}

impl Default for TextElement<'_> {
  fn default() -> Self {
    Self {
      class_name: None,
      tag: "p",
      text: "",
    }
  }
}

impl<'a> TextElement<'a> {
  pub(crate) fn build(self, document: &mut Document) -> NodeId {
    let element = document.create_element(self.tag);

    document.set_text(element, self.text);

    if let Some(class_name) = self.class_name {
      document.add_class(element, class_name);
    }

    element
  }

  pub(crate) fn class_name(self, class_name: &'a str) -> Self {
    Self {
      class_name: Some(class_name),
      ..self
    }
  }

  pub(crate) fn new(tag: &'a str) -> Self {
    Self {
      tag,
      ..Self::default()
    }
  }

  pub(crate) fn text(self, text: &'a str) -> Self {
    Self { text, ..self }
  }
}

pub(crate) fn build_option_elements(
  document: &mut Document,
  users: Option<&[User]>,
) -> Option<Vec<NodeId>> {
  Some(
    users?
      .iter()
      .map(|user| {
        let option =
          TextElement::new("option").text(&user.name).build(document);
        document.set_value(option, &user.id.to_string());
        option
      })
      .collect(),
  )
}
