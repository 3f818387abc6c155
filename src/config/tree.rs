//! Read-only view over a parsed configuration tree.
//!
//! The walker only needs node kind, text, the enclosing element's name and
//! sibling/child links; `ConfigNode` captures exactly that so any tree parser
//! can drive it.

/// A node of an already-parsed configuration document.
pub trait ConfigNode: Copy {
    /// Whether this is a text node (text and CDATA both count).
    fn is_text(&self) -> bool;

    /// Raw text content of a text node.
    fn text(&self) -> Option<&str>;

    /// Name of the element enclosing this node.
    fn parent_name(&self) -> Option<&str>;

    fn first_child(&self) -> Option<Self>;

    fn next_sibling(&self) -> Option<Self>;
}

impl<'a, 'input: 'a> ConfigNode for roxmltree::Node<'a, 'input> {
    fn is_text(&self) -> bool {
        roxmltree::Node::is_text(self)
    }

    fn text(&self) -> Option<&str> {
        if self.is_text() {
            roxmltree::Node::text(self)
        } else {
            None
        }
    }

    fn parent_name(&self) -> Option<&str> {
        self.parent_element().map(|parent| parent.tag_name().name())
    }

    fn first_child(&self) -> Option<Self> {
        roxmltree::Node::first_child(self)
    }

    fn next_sibling(&self) -> Option<Self> {
        roxmltree::Node::next_sibling(self)
    }
}
