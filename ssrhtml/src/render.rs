use std::borrow::Cow;
use std::io::Write;

use crate::{attribute::output_attributes, FormatOptions, Node, NodeKind};

/// Error type for rendering a tree.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    /// A node that is only meaningful inside a specific parent was reached on its own,
    /// such as a head section outside a document.
    #[error("`{kind}` node cannot be rendered outside of a {parent}")]
    UnexpectedKind {
        /// The kind of the misplaced node.
        kind: &'static str,
        /// The parent the node must appear in.
        parent: &'static str,
    },
}

/// Render a tree to a string, starting at the given indentation level.
///
/// # Example
///
/// ```
/// use ssrhtml::{attr, bumpalo::Bump, element, render, FormatOptions};
///
/// let bump = Bump::new();
/// let node = element(&bump, "div", [attr(&bump, ("class", "app"))], "hi");
/// let html = render(&node, &FormatOptions::default(), 0).unwrap();
/// assert_eq!(html, r#"<div class="app">hi</div>"#);
/// ```
pub fn render(
    node: &Node<'_>,
    options: &FormatOptions,
    start_indent: usize,
) -> Result<String, RenderError> {
    let mut output = vec![];
    render_to(&mut output, node, options, start_indent)?;
    String::from_utf8(output)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// Render a tree to a writer, starting at the given indentation level.
pub fn render_to(
    writer: &mut dyn Write,
    node: &Node<'_>,
    options: &FormatOptions,
    start_indent: usize,
) -> Result<(), RenderError> {
    tracing::trace!(
        indent = options.indent,
        start_indent,
        escape = options.escape,
        "rendering tree"
    );
    Renderer::new(options).write(writer, node, start_indent)
}

/// Walks a tree and writes it out according to [FormatOptions].
pub(crate) struct Renderer<'o> {
    options: &'o FormatOptions,
    unit: Cow<'o, str>,
}
impl<'o> Renderer<'o> {
    pub(crate) fn new(options: &'o FormatOptions) -> Self {
        Self {
            options,
            unit: options.unit(),
        }
    }

    /// Write a node and everything below it.
    pub(crate) fn write(
        &self,
        writer: &mut dyn Write,
        node: &Node<'_>,
        depth: usize,
    ) -> Result<(), RenderError> {
        match node {
            Node::Text { text } => {
                self.write_indent(writer, depth)?;
                if self.options.escape {
                    write!(writer, "{}", html_escape::encode_text(text.as_str()))?;
                } else {
                    write!(writer, "{}", text.as_str())?;
                }
                Ok(())
            }
            Node::Sequence { items } => self.write_many(writer, items.iter(), depth),
            Node::Composite { kind, attributes, children } => match kind {
                NodeKind::Fragment => self.write_many(writer, children.iter(), depth),
                NodeKind::Document => self.write_document(writer, attributes, children, depth),
                NodeKind::Generic(name) => {
                    // start tag
                    self.write_indent(writer, depth)?;
                    self.write_start_tag(writer, name.as_str(), attributes)?;

                    if children.is_empty() && self.options.self_closing.applies_to(name.as_str()) {
                        write!(writer, " />")?;
                        return Ok(());
                    }
                    write!(writer, ">")?;

                    self.write_block(writer, children.iter(), depth)?;

                    // end tag
                    write!(writer, "</{}>", name.as_str())?;
                    Ok(())
                }
                NodeKind::Head => Err(RenderError::UnexpectedKind {
                    kind: "head",
                    parent: "document",
                }),
                NodeKind::Case => Err(RenderError::UnexpectedKind {
                    kind: "case",
                    parent: "switch",
                }),
                NodeKind::Default => Err(RenderError::UnexpectedKind {
                    kind: "default",
                    parent: "switch",
                }),
            },
        }
    }

    /// Write `<name` followed by the attributes, without closing the tag.
    pub(crate) fn write_start_tag(
        &self,
        writer: &mut dyn Write,
        name: &str,
        attributes: &[crate::Attribute<'_>],
    ) -> Result<(), RenderError> {
        write!(writer, "<{name}")?;
        for (key, value) in output_attributes(attributes) {
            match value {
                Some(value) if self.options.escape => write!(
                    writer,
                    " {key}=\"{}\"",
                    html_escape::encode_double_quoted_attribute(&value.to_string())
                )?,
                Some(value) => write!(writer, " {key}=\"{value}\"")?,
                None => write!(writer, " {key}")?,
            }
        }
        Ok(())
    }

    /// Write a list of nodes at the same depth, one per line when indenting.
    pub(crate) fn write_many<'a, 'bump: 'a>(
        &self,
        writer: &mut dyn Write,
        nodes: impl IntoIterator<Item = &'a Node<'bump>>,
        depth: usize,
    ) -> Result<(), RenderError> {
        for (idx, node) in nodes.into_iter().enumerate() {
            if idx > 0 {
                self.write_newline(writer)?;
            }
            self.write(writer, node, depth)?;
        }
        Ok(())
    }

    /// Write the contents of an element one level deeper. When indenting, non-empty
    /// contents start on a new line and are followed by a new line at `depth`, so the
    /// closing tag lines up with its start tag.
    pub(crate) fn write_block<'a, 'bump: 'a>(
        &self,
        writer: &mut dyn Write,
        nodes: impl ExactSizeIterator<Item = &'a Node<'bump>>,
        depth: usize,
    ) -> Result<(), RenderError> {
        if nodes.len() == 0 {
            return Ok(());
        }
        self.write_newline(writer)?;
        self.write_many(writer, nodes, depth + 1)?;
        self.write_newline(writer)?;
        self.write_indent(writer, depth)
    }

    pub(crate) fn write_newline(&self, writer: &mut dyn Write) -> Result<(), RenderError> {
        if self.options.indent {
            writeln!(writer)?;
        }
        Ok(())
    }

    pub(crate) fn write_indent(
        &self,
        writer: &mut dyn Write,
        depth: usize,
    ) -> Result<(), RenderError> {
        if self.options.indent {
            for _ in 0..depth {
                write!(writer, "{}", self.unit)?;
            }
        }
        Ok(())
    }
}
