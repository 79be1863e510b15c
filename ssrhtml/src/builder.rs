//! Constructors for every kind of node, plus a builder DSL that wraps them.

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::{
    build_composite, Attribute, IntoAttribute, IntoAttributeValue, IntoNode, Node, NodeKind,
};

/// Create a generic element with the given tag name, attributes and children.
pub fn element<'bump>(
    bump: &'bump Bump,
    name: &str,
    attributes: impl IntoIterator<Item = Attribute<'bump>>,
    children: impl IntoNode<'bump>,
) -> Node<'bump> {
    build_composite(bump, NodeKind::generic(bump, name), attributes, children)
}

/// Create a fragment. Fragments render as their children and disappear when placed
/// inside another node.
pub fn fragment<'bump>(bump: &'bump Bump, children: impl IntoNode<'bump>) -> Node<'bump> {
    build_composite(bump, NodeKind::Fragment, BumpVec::new_in(bump), children)
}

/// Create the page wrapper. The first [head] among its children becomes the content
/// of `<head>`; everything else goes into `<body>`. Attributes are placed on `<html>`.
pub fn document<'bump>(
    bump: &'bump Bump,
    attributes: impl IntoIterator<Item = Attribute<'bump>>,
    children: impl IntoNode<'bump>,
) -> Node<'bump> {
    build_composite(bump, NodeKind::Document, attributes, children)
}

/// Create a head section for use as a direct child of a [document].
pub fn head<'bump>(bump: &'bump Bump, children: impl IntoNode<'bump>) -> Node<'bump> {
    build_composite(bump, NodeKind::Head, BumpVec::new_in(bump), children)
}

/// A builder for creating nodes using a bump allocator.
///
/// # Example
///
/// ```
/// use ssrhtml::{bumpalo::Bump, builder::Builder, render, FormatOptions};
///
/// let bump = Bump::new();
/// let b = Builder::new(&bump);
/// let page = b.div([b.attr(("class", "container"))])(
///     b.h1([])(b.text("Hello, World!"))
/// );
/// let html = render(&page, &FormatOptions::default(), 0).unwrap();
/// assert_eq!(html, r#"<div class="container"><h1>Hello, World!</h1></div>"#);
/// ```
#[derive(Clone, Copy)]
pub struct Builder<'bump> {
    bump: &'bump Bump,
}
impl<'bump> Builder<'bump> {
    /// Create a new builder with the given bump allocator.
    pub fn new(bump: &'bump Bump) -> Self {
        Self { bump }
    }

    /// Get a reference to the bump allocator.
    pub fn bump(&self) -> &'bump Bump {
        self.bump
    }

    /// Create an attribute from a value that implements [IntoAttribute].
    pub fn attr(&self, value: impl IntoAttribute<'bump>) -> Attribute<'bump> {
        value.into_attribute(self.bump)
    }

    /// Create a text node from a string.
    pub fn text(&self, text: &str) -> Node<'bump> {
        Node::text(self.bump, text)
    }

    /// Create an element from a name and attributes.
    ///
    /// The children are passed in as a single argument to the returned function.
    pub fn tag<E: IntoNode<'bump>>(
        &self,
        name: &str,
        attributes: impl IntoIterator<Item = Attribute<'bump>>,
    ) -> impl FnOnce(E) -> Node<'bump> {
        let bump = self.bump;
        let kind = NodeKind::generic(bump, name);
        let attributes: BumpVec<'bump, Attribute<'bump>> = BumpVec::from_iter_in(attributes, bump);

        move |children: E| build_composite(bump, kind, attributes, children)
    }

    /// Create a fragment from anything that implements [IntoNode].
    ///
    /// This is a convenience wrapper around [`fragment`].
    pub fn fragment(&self, children: impl IntoNode<'bump>) -> Node<'bump> {
        fragment(self.bump, children)
    }

    /// Create the page wrapper.
    ///
    /// This is a convenience wrapper around [`document`].
    ///
    /// The children are passed in as a single argument to the returned function.
    pub fn document<E: IntoNode<'bump>>(
        &self,
        attributes: impl IntoIterator<Item = Attribute<'bump>>,
    ) -> impl FnOnce(E) -> Node<'bump> {
        let bump = self.bump;
        let attributes: BumpVec<'bump, Attribute<'bump>> = BumpVec::from_iter_in(attributes, bump);
        move |children: E| document(bump, attributes, children)
    }

    /// Create a head section.
    ///
    /// This is a convenience wrapper around [`head`].
    pub fn head(&self, children: impl IntoNode<'bump>) -> Node<'bump> {
        head(self.bump, children)
    }

    /// Include `children` only when `condition` holds.
    ///
    /// This is a convenience wrapper around [`crate::when`].
    pub fn when(&self, condition: bool, children: impl IntoNode<'bump>) -> Node<'bump> {
        crate::when(self.bump, condition, children)
    }

    /// Select the first [`Builder::case`] matching `scrutinee`, falling back to
    /// [`Builder::default_case`].
    ///
    /// This is a convenience wrapper around [`crate::switch`].
    pub fn switch(
        &self,
        scrutinee: impl IntoAttributeValue<'bump>,
        branches: impl IntoNode<'bump>,
    ) -> Node<'bump> {
        crate::switch(self.bump, scrutinee, branches)
    }

    /// Create a switch branch.
    ///
    /// This is a convenience wrapper around [`crate::case`].
    pub fn case(
        &self,
        value: impl IntoAttributeValue<'bump>,
        children: impl IntoNode<'bump>,
    ) -> Node<'bump> {
        crate::case(self.bump, value, children)
    }

    /// Create the fallback switch branch.
    ///
    /// This is a convenience wrapper around [`crate::default_case`].
    pub fn default_case(&self, children: impl IntoNode<'bump>) -> Node<'bump> {
        crate::default_case(self.bump, children)
    }
}

macro_rules! container_builders {
    ($($tag_ident:ident),*) => {
        impl<'bump> Builder<'bump> {
            $(
                #[doc = concat!("Create an element with the tag name `", stringify!($tag_ident), "` and a list of attributes.\n\nThe children are passed in as a single argument to the returned function.")]
                pub fn $tag_ident<E: IntoNode<'bump>>(
                    &self,
                    attributes: impl IntoIterator<Item = Attribute<'bump>>,
                ) -> impl FnOnce(E) -> Node<'bump> {
                    self.tag(stringify!($tag_ident), attributes)
                }
            )*
        }
        /// Tags with a builder method that accepts children.
        pub const CONTAINER_TAGS: &[&str] = &[$(stringify!($tag_ident)),*];
    };
}
container_builders! {
    body, main, p, code, div, pre, header, footer, nav,
    ol, ul, li, strong, em, blockquote, article, section,
    aside, span, script, style, title, time, a, button, form, label,
    h1, h2, h3, h4, h5, h6, small, sup, sub, q, s,
    table, tr, td, th, tbody, thead, tfoot, colgroup, video
}

macro_rules! childless_builders {
    ($($tag_ident:ident),*) => {
        impl<'bump> Builder<'bump> {
            $(
                #[doc = concat!("Create a childless element with the tag name `", stringify!($tag_ident), "` and a list of attributes.")]
                pub fn $tag_ident(
                    &self,
                    attributes: impl IntoIterator<Item = Attribute<'bump>>,
                ) -> Node<'bump> {
                    self.tag(stringify!($tag_ident), attributes)(Node::empty(self.bump))
                }
            )*
        }
        /// Tags whose builder method creates a childless element.
        pub const CHILDLESS_TAGS: &[&str] = &[$(stringify!($tag_ident)),*];
    };
}
childless_builders! {
    area, base, br, col, embed, hr, input, link, meta,
    param, source, track, wbr, img
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tag_helpers_build_generic_elements() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        let node = b.ul([b.attr(("class", "tags"))])([
            b.li([])(b.text("one")),
            b.li([])(b.text("two")),
        ]);

        assert_eq!(node.tag(), Some("ul"));
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.attr("class").and_then(|v| v.as_str()), Some("tags"));
    }

    #[test]
    fn childless_helpers_have_no_children() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        let node = b.img([b.attr(("src", "/a.png")), b.attr("hidden")]);
        assert_eq!(node.tag(), Some("img"));
        assert!(node.children().is_empty());
        assert_eq!(node.attrs().unwrap()[1].value, None);
    }

    #[test]
    fn document_and_head_use_reserved_kinds() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        let page = b.document([])([b.head(b.title([])("T")), b.text("B")]);
        assert!(page.is_kind(&NodeKind::Document));
        assert!(page.children()[0].is_kind(&NodeKind::Head));
        assert!(page.children()[1].is_text());
    }

    #[test]
    fn tag_names_are_listed() {
        assert!(CONTAINER_TAGS.contains(&"div"));
        assert!(CHILDLESS_TAGS.contains(&"img"));
        assert!(!CONTAINER_TAGS.contains(&"head"));
    }
}
