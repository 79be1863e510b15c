use std::io::Write;

use crate::render::{RenderError, Renderer};
use crate::{Attribute, Node, NodeKind};

/// The doctype declaration written before every document.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// Split the children of a document into the head content and the body content.
///
/// The first head section supplies the head content and is left out of the body.
/// Any later head sections stay in the body.
pub fn split_head<'a, 'bump>(
    children: &'a [Node<'bump>],
) -> (&'a [Node<'bump>], Vec<&'a Node<'bump>>) {
    let head_index = children.iter().position(|c| c.is_kind(&NodeKind::Head));
    let head = head_index.map_or(&[][..], |index| children[index].children());
    let body = children
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != head_index)
        .map(|(_, child)| child)
        .collect();
    (head, body)
}

impl Renderer<'_> {
    /// Write the doctype and the `html`/`head`/`body` skeleton around the document's
    /// children. The skeleton sits at `depth`; content is one level deeper.
    pub(crate) fn write_document(
        &self,
        writer: &mut dyn Write,
        attributes: &[Attribute<'_>],
        children: &[Node<'_>],
        depth: usize,
    ) -> Result<(), RenderError> {
        let (head, body) = split_head(children);
        tracing::trace!(
            head_nodes = head.len(),
            body_nodes = body.len(),
            "writing document"
        );

        self.write_indent(writer, depth)?;
        write!(writer, "{DOCTYPE}")?;
        self.write_newline(writer)?;

        self.write_indent(writer, depth)?;
        self.write_start_tag(writer, "html", attributes)?;
        write!(writer, ">")?;
        self.write_newline(writer)?;

        self.write_indent(writer, depth)?;
        write!(writer, "<head>")?;
        self.write_block(writer, head.iter(), depth)?;
        write!(writer, "</head>")?;
        self.write_newline(writer)?;

        self.write_indent(writer, depth)?;
        write!(writer, "<body>")?;
        self.write_block(writer, body.into_iter(), depth)?;
        write!(writer, "</body>")?;
        self.write_newline(writer)?;

        self.write_indent(writer, depth)?;
        write!(writer, "</html>")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attr, builder::Builder, document, element, head, render, when, FormatOptions};
    use bumpalo::Bump;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_head_from_body() {
        let bump = Bump::new();
        let page = document(&bump, [], [head(&bump, "T"), Node::text(&bump, "B")]);
        let output = render(&page, &FormatOptions::default(), 0).unwrap();
        assert_eq!(
            output,
            "<!DOCTYPE html><html><head>T</head><body>B</body></html>"
        );
    }

    #[test]
    fn head_may_appear_anywhere_among_children() {
        let bump = Bump::new();
        let page = document(
            &bump,
            [],
            [
                element(&bump, "h1", [], "Hi"),
                head(&bump, element(&bump, "title", [], "T")),
                element(&bump, "p", [], "Body"),
            ],
        );
        let output = render(&page, &FormatOptions::default(), 0).unwrap();
        assert_eq!(
            output,
            "<!DOCTYPE html><html><head><title>T</title></head><body><h1>Hi</h1><p>Body</p></body></html>"
        );
    }

    #[test]
    fn missing_head_renders_empty_head() {
        let bump = Bump::new();
        let page = document(&bump, [], "B");
        let output = render(&page, &FormatOptions::default(), 0).unwrap();
        assert_eq!(output, "<!DOCTYPE html><html><head></head><body>B</body></html>");
    }

    #[test]
    fn indented_document() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        let page = b.document([b.attr(("lang", "en"))])([
            b.head([b.title([])("T"), b.meta([b.attr(("charset", "utf-8"))])]),
            b.main([])(b.text("B")),
        ]);
        let options = FormatOptions::default().with_indent(true).with_indent_width(2);
        let output = render(&page, &options, 0).unwrap();
        assert_eq!(
            output,
            [
                "<!DOCTYPE html>",
                "<html lang=\"en\">",
                "<head>",
                "  <title>",
                "    T",
                "  </title>",
                "  <meta charset=\"utf-8\" />",
                "</head>",
                "<body>",
                "  <main>",
                "    B",
                "  </main>",
                "</body>",
                "</html>",
            ]
            .join("\n")
        );
    }

    #[test]
    fn indented_document_with_empty_sections() {
        let bump = Bump::new();
        let page = document(&bump, [], when(&bump, false, "hidden"));
        let options = FormatOptions::default().with_indent(true);
        let output = render(&page, &options, 1).unwrap();
        assert_eq!(
            output,
            "    <!DOCTYPE html>\n    <html>\n    <head></head>\n    <body></body>\n    </html>"
        );
    }

    #[test]
    fn only_the_first_head_is_diverted() {
        let bump = Bump::new();
        let children = [
            head(&bump, "first"),
            Node::text(&bump, "body"),
            head(&bump, "second"),
        ];
        let (head_content, body) = split_head(&children);
        assert_eq!(head_content.len(), 1);
        assert_eq!(body.len(), 2);
        assert!(body[1].is_kind(&NodeKind::Head));
    }

    #[test]
    fn document_attributes_go_on_html() {
        let bump = Bump::new();
        let page = document(
            &bump,
            [attr(&bump, ("lang", "en")), attr(&bump, ("className", "dark"))],
            "B",
        );
        let output = render(&page, &FormatOptions::default(), 0).unwrap();
        assert_eq!(
            output,
            r#"<!DOCTYPE html><html lang="en" class="dark"><head></head><body>B</body></html>"#
        );
    }
}
