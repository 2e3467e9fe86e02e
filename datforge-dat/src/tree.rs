/// One node of the canonical DAT tree.
///
/// Both dialects converge on this shape: an ordered tree of named nodes
/// with attributes, optional text, and ordered children. A node with text
/// and no children is a leaf (`<description>Foo</description>`); a node
/// with attributes and no children serializes as an empty element
/// (`<rom name="a.bin" .../>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatNode {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<DatNode>,
}

impl DatNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A text-only leaf node.
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value for the same key.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.attrs.push((key, value));
        }
    }

    pub fn push(&mut self, child: DatNode) {
        self.children.push(child);
    }

    pub fn find_child(&self, name: &str) -> Option<&DatNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn find_children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DatNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child leaf with the given name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.find_child(name).and_then(|c| c.text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_lookup_and_replace() {
        let mut node = DatNode::new("rom");
        node.set_attr("name", "a.bin");
        node.set_attr("size", "10");
        assert_eq!(node.attr("name"), Some("a.bin"));

        node.set_attr("name", "b.bin");
        assert_eq!(node.attr("name"), Some("b.bin"));
        assert_eq!(node.attrs.len(), 2);
    }

    #[test]
    fn test_child_queries() {
        let mut game = DatNode::new("game");
        game.push(DatNode::leaf("description", "Foo"));
        game.push(DatNode::new("rom"));
        game.push(DatNode::new("rom"));

        assert_eq!(game.child_text("description"), Some("Foo"));
        assert_eq!(game.find_children("rom").count(), 2);
        assert!(game.find_child("disk").is_none());
    }
}
