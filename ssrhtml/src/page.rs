//! Glue for producing pages from generator functions, as a request handler would.

use bumpalo::Bump;

use crate::{builder::Builder, render, FormatOptions, IntoNode, Node, RenderError};

/// Run a generator over `input` and return the root of the tree it builds.
pub fn generate<'bump, I, N: IntoNode<'bump>>(
    bump: &'bump Bump,
    generator: impl FnOnce(Builder<'bump>, I) -> N,
    input: I,
) -> Node<'bump> {
    generator(Builder::new(bump), input).into_node(bump)
}

/// Run a generator over `input` and render the resulting tree from indentation level 0.
///
/// # Example
///
/// ```
/// use ssrhtml::{bumpalo::Bump, render_page, FormatOptions};
///
/// let bump = Bump::new();
/// let html = render_page(
///     &bump,
///     |b, name: &str| b.p([])(format!("Hello, {name}!")),
///     "World",
///     &FormatOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(html, "<p>Hello, World!</p>");
/// ```
pub fn render_page<'bump, I, N: IntoNode<'bump>>(
    bump: &'bump Bump,
    generator: impl FnOnce(Builder<'bump>, I) -> N,
    input: I,
    options: &FormatOptions,
) -> Result<String, RenderError> {
    let root = generate(bump, generator, input);
    tracing::debug!(root = ?root.kind(), "generated page");
    render(&root, options, 0)
}
