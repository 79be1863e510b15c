use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::{Attribute, AttributeValue};

/// The kind of a [`Node::Composite`].
///
/// Reserved kinds are distinct variants rather than tag names, so a generic
/// element named `"head"` or `"Fragment"` never behaves like one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeKind<'bump> {
    /// An ordinary element with the given tag name.
    Generic(BumpString<'bump>),
    /// A transparent grouping; spliced into its parent at construction.
    Fragment,
    /// The page wrapper: renders the doctype and the `html`/`head`/`body` skeleton.
    Document,
    /// Content for the `<head>` of the enclosing [`NodeKind::Document`].
    Head,
    /// A branch of a [`crate::switch`], carrying its value in the `value` attribute.
    Case,
    /// The fallback branch of a [`crate::switch`].
    Default,
}
impl<'bump> NodeKind<'bump> {
    /// Create a generic kind for the given tag name.
    pub fn generic(bump: &'bump Bump, name: &str) -> Self {
        NodeKind::Generic(BumpString::from_str_in(name, bump))
    }
}

/// A node in the markup tree.
///
/// Composite children never contain a [`Node::Sequence`] or a fragment: both are
/// spliced in place when a composite is built through [`build_composite`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Node<'bump> {
    /// A text node, written out verbatim.
    Text {
        /// The text of the node.
        text: BumpString<'bump>,
    },
    /// An ordered list of nodes, produced when children are given as a collection.
    Sequence {
        /// The nodes in the sequence.
        items: BumpVec<'bump, Node<'bump>>,
    },
    /// A node with a kind, attributes and children.
    Composite {
        /// The kind of the node.
        kind: NodeKind<'bump>,
        /// The attributes of the node. Keys are unique.
        attributes: BumpVec<'bump, Attribute<'bump>>,
        /// The flattened children of the node.
        children: BumpVec<'bump, Node<'bump>>,
    },
}

/// Trait for types that can provide a default value given a bump allocator.
///
/// This is used by the `html!` macro to support default prop values for custom components.
/// Component props structs should implement this trait to allow omitting fields in the macro.
///
/// # Example
///
/// ```ignore
/// struct CardProps<'bump> {
///     title: String,
///     children: Node<'bump>,
/// }
///
/// impl<'bump> DefaultIn<'bump> for CardProps<'bump> {
///     fn default_in(bump: &'bump Bump) -> Self {
///         Self {
///             title: String::new(),
///             children: Node::empty(bump),
///         }
///     }
/// }
/// ```
pub trait DefaultIn<'bump> {
    /// Create a default value using the given bump allocator.
    fn default_in(bump: &'bump Bump) -> Self;
}

/// Trait for types that can be converted into a Node with a bump allocator.
pub trait IntoNode<'bump> {
    /// Convert this value into a Node using the given bump allocator.
    fn into_node(self, bump: &'bump Bump) -> Node<'bump>;
}
impl<'bump> IntoNode<'bump> for Node<'bump> {
    fn into_node(self, _bump: &'bump Bump) -> Node<'bump> {
        self
    }
}
impl<'bump> IntoNode<'bump> for &str {
    fn into_node(self, bump: &'bump Bump) -> Node<'bump> {
        Node::text(bump, self)
    }
}
impl<'bump> IntoNode<'bump> for String {
    fn into_node(self, bump: &'bump Bump) -> Node<'bump> {
        Node::text(bump, &self)
    }
}
impl<'bump> IntoNode<'bump> for &String {
    fn into_node(self, bump: &'bump Bump) -> Node<'bump> {
        Node::text(bump, self)
    }
}
impl<'bump, T: IntoNode<'bump>> IntoNode<'bump> for Option<T> {
    fn into_node(self, bump: &'bump Bump) -> Node<'bump> {
        match self {
            Some(n) => n.into_node(bump),
            None => Node::empty(bump),
        }
    }
}
impl<'bump, T: IntoNode<'bump>> IntoNode<'bump> for Vec<T> {
    fn into_node(self, bump: &'bump Bump) -> Node<'bump> {
        Node::from_iter(bump, self)
    }
}
impl<'bump> IntoNode<'bump> for BumpVec<'bump, Node<'bump>> {
    fn into_node(self, _bump: &'bump Bump) -> Node<'bump> {
        Node::Sequence { items: self }
    }
}
impl<'bump, const N: usize> IntoNode<'bump> for [Node<'bump>; N] {
    fn into_node(self, bump: &'bump Bump) -> Node<'bump> {
        Node::Sequence {
            items: BumpVec::from_iter_in(self, bump),
        }
    }
}

/// Flatten a list of nodes: sequences are unwrapped and fragments are replaced by
/// their children, recursively and in order. Flattening a flat list returns it unchanged.
pub fn flatten<'bump>(
    bump: &'bump Bump,
    nodes: impl IntoIterator<Item = Node<'bump>>,
) -> BumpVec<'bump, Node<'bump>> {
    let mut result = BumpVec::new_in(bump);
    for node in nodes {
        flatten_into(&mut result, node);
    }
    result
}

fn flatten_into<'bump>(result: &mut BumpVec<'bump, Node<'bump>>, node: Node<'bump>) {
    match node {
        Node::Sequence { items } => {
            for item in items {
                flatten_into(result, item);
            }
        }
        Node::Composite {
            kind: NodeKind::Fragment,
            children,
            ..
        } => {
            for child in children {
                flatten_into(result, child);
            }
        }
        other => result.push(other),
    }
}

/// Build a composite node. Children are flattened and duplicate attribute keys are
/// merged, with the later value replacing the earlier one in its original position.
pub fn build_composite<'bump>(
    bump: &'bump Bump,
    kind: NodeKind<'bump>,
    attributes: impl IntoIterator<Item = Attribute<'bump>>,
    children: impl IntoNode<'bump>,
) -> Node<'bump> {
    let mut merged: BumpVec<'bump, Attribute<'bump>> = BumpVec::new_in(bump);
    for attribute in attributes {
        match merged.iter_mut().find(|a| a.key == attribute.key) {
            Some(existing) => existing.value = attribute.value,
            None => merged.push(attribute),
        }
    }

    Node::Composite {
        kind,
        attributes: merged,
        children: flatten(bump, [children.into_node(bump)]),
    }
}

impl<'bump> Node<'bump> {
    /// Create a sequence from an iterator of values that implement [IntoNode].
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<T: IntoNode<'bump>>(
        bump: &'bump Bump,
        iter: impl IntoIterator<Item = T>,
    ) -> Node<'bump> {
        Node::Sequence {
            items: BumpVec::from_iter_in(iter.into_iter().map(|n| n.into_node(bump)), bump),
        }
    }

    /// Create an empty sequence, which renders to nothing.
    pub fn empty(bump: &'bump Bump) -> Node<'bump> {
        Node::Sequence {
            items: BumpVec::new_in(bump),
        }
    }

    /// Create a text node.
    pub fn text(bump: &'bump Bump, text: &str) -> Node<'bump> {
        Node::Text {
            text: BumpString::from_str_in(text, bump),
        }
    }

    /// Get the kind of the node if it is a [`Composite`].
    ///
    /// [`Composite`]: Node::Composite
    pub fn kind(&self) -> Option<&NodeKind<'bump>> {
        match self {
            Node::Composite { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Get the tag name of the node if it is a generic element.
    pub fn tag(&self) -> Option<&str> {
        match self.kind() {
            Some(NodeKind::Generic(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Get the attributes of the node if it is a [`Composite`].
    ///
    /// [`Composite`]: Node::Composite
    pub fn attrs(&self) -> Option<&[Attribute<'bump>]> {
        match self {
            Node::Composite { attributes, .. } => Some(attributes.as_slice()),
            _ => None,
        }
    }

    /// Get the value of the attribute with the given key.
    pub fn attr(&self, key: &str) -> Option<&AttributeValue<'bump>> {
        self.attrs()?
            .iter()
            .find(|a| a.key.as_str() == key)
            .and_then(|a| a.value.as_ref())
    }

    /// Get the children of a composite, or the items of a sequence.
    ///
    /// Text nodes have no children.
    pub fn children(&self) -> &[Node<'bump>] {
        match self {
            Node::Text { .. } => &[],
            Node::Sequence { items } => items.as_slice(),
            Node::Composite { children, .. } => children.as_slice(),
        }
    }

    /// Get the inner text of the node.
    ///
    /// This will return an empty string if no inner text exists.
    pub fn inner_text(&self, bump: &'bump Bump) -> BumpString<'bump> {
        let mut result = BumpString::new_in(bump);
        self.push_inner_text(&mut result);
        result
    }

    fn push_inner_text(&self, result: &mut BumpString<'bump>) {
        match self {
            Node::Text { text } => result.push_str(text.as_str()),
            _ => {
                for child in self.children() {
                    child.push_inner_text(result);
                }
            }
        }
    }

    /// Returns `true` if the node is a [`Text`].
    ///
    /// [`Text`]: Node::Text
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Returns `true` if the node is a [`Sequence`].
    ///
    /// [`Sequence`]: Node::Sequence
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence { .. })
    }

    /// Returns `true` if the node is a composite of the given kind.
    #[must_use]
    pub fn is_kind(&self, kind: &NodeKind<'_>) -> bool {
        self.kind().is_some_and(|k| k == kind)
    }

    /// Serialize the tree to pretty-printed JSON, for debugging.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attr, element, fragment, head};
    use pretty_assertions::assert_eq;

    #[test]
    fn flattening_splices_sequences_and_fragments_in_order() {
        let bump = Bump::new();
        let nested = Node::Sequence {
            items: BumpVec::from_iter_in(
                [
                    Node::text(&bump, "a"),
                    Node::from_iter(&bump, [Node::text(&bump, "b"), Node::empty(&bump)]),
                    fragment(
                        &bump,
                        [
                            Node::text(&bump, "c"),
                            fragment(&bump, [Node::text(&bump, "d")]),
                        ],
                    ),
                    element(&bump, "br", [], Node::empty(&bump)),
                ],
                &bump,
            ),
        };

        let flat = flatten(&bump, [nested]);
        let texts: Vec<_> = flat
            .iter()
            .map(|n| match n {
                Node::Text { text } => text.as_str(),
                other => other.tag().unwrap(),
            })
            .collect();
        assert_eq!(texts, ["a", "b", "c", "d", "br"]);
    }

    #[test]
    fn flattening_is_idempotent() {
        let bump = Bump::new();
        let input = [
            Node::from_iter(&bump, ["x", "y"]),
            fragment(&bump, [element(&bump, "p", [], "z")]),
        ];
        let once = flatten(&bump, input);
        let twice = flatten(&bump, once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn composite_children_are_flat() {
        let bump = Bump::new();
        let node = element(
            &bump,
            "ul",
            [],
            vec![
                fragment(&bump, [element(&bump, "li", [], "1")]),
                Node::from_iter(&bump, [element(&bump, "li", [], "2")]),
            ],
        );
        assert_eq!(node.children().len(), 2);
        assert!(node
            .children()
            .iter()
            .all(|c| c.tag() == Some("li") && !c.is_sequence()));
    }

    #[test]
    fn duplicate_attribute_keys_keep_first_position_and_last_value() {
        let bump = Bump::new();
        let node = element(
            &bump,
            "a",
            [
                attr(&bump, ("href", "/old")),
                attr(&bump, ("id", "link")),
                attr(&bump, ("href", "/new")),
            ],
            Node::empty(&bump),
        );
        let attrs = node.attrs().unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].key.as_str(), "href");
        assert_eq!(attrs[0].value_as_str(), Some("/new"));
        assert_eq!(node.attr("id").and_then(|v| v.as_str()), Some("link"));
    }

    #[test]
    fn reserved_kinds_do_not_collide_with_tag_names() {
        let bump = Bump::new();
        let node = element(&bump, "head", [], "x");
        assert!(!node.is_kind(&NodeKind::Head));
        assert_eq!(node.tag(), Some("head"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_to_tagged_json() {
        let bump = Bump::new();
        let node = element(
            &bump,
            "p",
            [
                attr(&bump, ("id", "x")),
                attr(&bump, ("n", 2)),
                attr(&bump, "hidden"),
            ],
            [Node::text(&bump, "hi"), fragment(&bump, Node::empty(&bump))],
        );
        let value: serde_json::Value = serde_json::from_str(&node.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "Composite",
                "kind": { "generic": "p" },
                "attributes": [
                    { "key": "id", "value": { "type": "String", "value": "x" } },
                    { "key": "n", "value": { "type": "Int", "value": 2 } },
                    { "key": "hidden", "value": null },
                ],
                "children": [{ "type": "Text", "text": "hi" }],
            })
        );

        let head_node = head(&bump, Node::empty(&bump));
        let value: serde_json::Value =
            serde_json::from_str(&head_node.to_json().unwrap()).unwrap();
        assert_eq!(value["kind"], "head");
    }

    #[test]
    fn inner_text_concatenates_descendants() {
        let bump = Bump::new();
        let node = element(
            &bump,
            "p",
            [],
            [
                Node::text(&bump, "Hello, "),
                element(&bump, "b", [], "World"),
            ],
        );
        assert_eq!(node.inner_text(&bump).as_str(), "Hello, World");
    }
}
