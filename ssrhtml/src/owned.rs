//! Owned types that use standard heap allocation.
//!
//! These types are useful for interoperability with systems that require
//! owned data, such as trees described in JSON. They are converted into the
//! arena with `into_bump`, which goes through the same constructors as the
//! builder, so fragments are flattened and branches are resolved.

use bumpalo::Bump;

use crate::{
    case, default_case, document, element, fragment, head, switch, when, Attribute,
    AttributeValue, Node,
};

/// An owned attribute value.
///
/// Integers up to `u64::MAX` deserialize as integers; larger JSON numbers only
/// fit in [OwnedValue::Float].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OwnedValue {
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A non-negative integer above `i64::MAX`.
    UInt(u64),
    /// A floating-point value.
    Float(f64),
    /// A string value.
    String(String),
}
impl OwnedValue {
    /// Convert this owned value into a bump-allocated value.
    pub fn into_bump(self, bump: &Bump) -> AttributeValue<'_> {
        match self {
            OwnedValue::Bool(b) => AttributeValue::Bool(b),
            OwnedValue::Int(i) => AttributeValue::Int(i.into()),
            OwnedValue::UInt(u) => AttributeValue::Int(u.into()),
            OwnedValue::Float(f) => AttributeValue::Float(f),
            OwnedValue::String(s) => AttributeValue::string(bump, &s),
        }
    }
}
impl From<&str> for OwnedValue {
    fn from(s: &str) -> Self {
        OwnedValue::String(s.to_string())
    }
}

/// An owned attribute using standard heap allocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnedAttribute {
    /// The key of the attribute.
    pub key: String,
    /// The value of the attribute.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: Option<OwnedValue>,
}
impl OwnedAttribute {
    /// Create a new owned attribute with a key and value.
    pub fn new(key: impl Into<String>, value: impl Into<OwnedValue>) -> Self {
        OwnedAttribute {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Create a boolean attribute (no value).
    pub fn boolean(key: impl Into<String>) -> Self {
        OwnedAttribute {
            key: key.into(),
            value: None,
        }
    }

    /// Convert this owned attribute into a bump-allocated attribute.
    pub fn into_bump(self, bump: &Bump) -> Attribute<'_> {
        match self.value {
            Some(value) => Attribute::with_value(bump, &self.key, value.into_bump(bump)),
            None => Attribute::boolean(bump, &self.key),
        }
    }
}

/// An owned node using standard heap allocation.
///
/// Unlike [Node], the reserved kinds and the branching constructs are spelled out
/// as variants, so a whole page can be described as data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum OwnedNode {
    /// A text node.
    Text {
        /// The text of the node.
        text: String,
    },
    /// A list of nodes.
    Sequence {
        /// The nodes in the sequence.
        items: Vec<OwnedNode>,
    },
    /// A generic element.
    Element {
        /// The tag name.
        name: String,
        /// The attributes of the element.
        #[cfg_attr(feature = "serde", serde(default))]
        attributes: Vec<OwnedAttribute>,
        /// The children of the element.
        #[cfg_attr(feature = "serde", serde(default))]
        children: Vec<OwnedNode>,
    },
    /// A fragment.
    Fragment {
        /// The children of the fragment.
        children: Vec<OwnedNode>,
    },
    /// The page wrapper.
    Document {
        /// The attributes placed on `<html>`.
        #[cfg_attr(feature = "serde", serde(default))]
        attributes: Vec<OwnedAttribute>,
        /// The children of the document.
        children: Vec<OwnedNode>,
    },
    /// A head section.
    Head {
        /// The content of `<head>`.
        children: Vec<OwnedNode>,
    },
    /// A conditional.
    If {
        /// Whether to include the children.
        cond: bool,
        /// The children to include.
        children: Vec<OwnedNode>,
    },
    /// A switch over [OwnedNode::Case] and [OwnedNode::Default] branches.
    Switch {
        /// The value to match.
        expr: OwnedValue,
        /// The branches.
        children: Vec<OwnedNode>,
    },
    /// A switch branch.
    Case {
        /// The value this branch matches.
        value: OwnedValue,
        /// The children of the branch.
        children: Vec<OwnedNode>,
    },
    /// The fallback switch branch.
    Default {
        /// The children of the branch.
        children: Vec<OwnedNode>,
    },
}
impl OwnedNode {
    /// Convert this owned node into a bump-allocated node.
    pub fn into_bump(self, bump: &Bump) -> Node<'_> {
        let convert = |children: Vec<OwnedNode>| {
            Node::from_iter(bump, children.into_iter().map(|c| c.into_bump(bump)))
        };
        let convert_attributes = |attributes: Vec<OwnedAttribute>| {
            attributes.into_iter().map(|a| a.into_bump(bump))
        };

        match self {
            OwnedNode::Text { text } => Node::text(bump, &text),
            OwnedNode::Sequence { items } => convert(items),
            OwnedNode::Element {
                name,
                attributes,
                children,
            } => element(bump, &name, convert_attributes(attributes), convert(children)),
            OwnedNode::Fragment { children } => fragment(bump, convert(children)),
            OwnedNode::Document {
                attributes,
                children,
            } => document(bump, convert_attributes(attributes), convert(children)),
            OwnedNode::Head { children } => head(bump, convert(children)),
            OwnedNode::If { cond, children } => when(bump, cond, convert(children)),
            OwnedNode::Switch { expr, children } => {
                switch(bump, expr.into_bump(bump), convert(children))
            }
            OwnedNode::Case { value, children } => {
                case(bump, value.into_bump(bump), convert(children))
            }
            OwnedNode::Default { children } => default_case(bump, convert(children)),
        }
    }
}
impl From<String> for OwnedNode {
    fn from(s: String) -> Self {
        OwnedNode::Text { text: s }
    }
}
impl From<&str> for OwnedNode {
    fn from(s: &str) -> Self {
        OwnedNode::Text {
            text: s.to_string(),
        }
    }
}
impl FromIterator<OwnedNode> for OwnedNode {
    fn from_iter<I: IntoIterator<Item = OwnedNode>>(iter: I) -> Self {
        OwnedNode::Sequence {
            items: iter.into_iter().collect(),
        }
    }
}
