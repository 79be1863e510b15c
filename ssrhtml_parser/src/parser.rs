use crate::ast::{AstAttribute, AstNode, AttributeValue};

/// Error type for parsing markup at runtime
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Parse error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

/// Parser for markup strings
struct Parser {
    input: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.current();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            position: self.pos,
        }
    }

    fn interpolation_error(&self) -> ParseError {
        self.error("Interpolation is not supported in runtime HTML parsing")
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("Expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("Expected '{expected}', found end of input"))),
        }
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let mut ident = String::new();

        // First character must be alphabetic or underscore
        match self.current() {
            Some(c) if c.is_alphabetic() || c == '_' => {
                ident.push(c);
                self.advance();
            }
            Some(c) => return Err(self.error(format!("Expected identifier, found '{c}'"))),
            None => return Err(self.error("Expected identifier, found end of input")),
        }

        while let Some(c) = self.current() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }

        Ok(ident)
    }

    fn parse_string_literal(&mut self) -> Result<String, ParseError> {
        self.expect('"')?;
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('r') => value.push('\r'),
                    Some('t') => value.push('\t'),
                    Some(c) => value.push(c),
                    None => return Err(self.error("Unterminated string literal")),
                },
                Some(c) => value.push(c),
                None => return Err(self.error("Unterminated string literal")),
            }
        }

        Ok(value)
    }

    fn parse_number(&mut self) -> Result<AttributeValue, ParseError> {
        let start = self.pos;
        let mut literal = String::new();
        if let Some('-') = self.current() {
            literal.push('-');
            self.advance();
        }
        let mut is_float = false;
        while let Some(c) = self.current() {
            if c.is_ascii_digit() {
                literal.push(c);
            } else if c == '.' && !is_float {
                is_float = true;
                literal.push(c);
            } else {
                break;
            }
            self.advance();
        }

        let invalid = || ParseError {
            message: format!("Invalid number literal '{literal}'"),
            position: start,
        };
        if is_float {
            literal
                .parse()
                .map(AttributeValue::LiteralFloat)
                .map_err(|_| invalid())
        } else {
            literal
                .parse()
                .map(AttributeValue::LiteralInt)
                .map_err(|_| invalid())
        }
    }

    fn parse_attribute_value(&mut self) -> Result<AttributeValue, ParseError> {
        match self.current() {
            Some('{') => Err(self.interpolation_error()),
            Some('"') => Ok(AttributeValue::LiteralString(self.parse_string_literal()?)),
            Some(c) if c.is_ascii_digit() || c == '-' => self.parse_number(),
            Some(c) if c.is_alphabetic() => {
                let start = self.pos;
                match self.parse_identifier()?.as_str() {
                    "true" => Ok(AttributeValue::LiteralBool(true)),
                    "false" => Ok(AttributeValue::LiteralBool(false)),
                    other => Err(ParseError {
                        message: format!("Expected literal attribute value, found '{other}'"),
                        position: start,
                    }),
                }
            }
            Some(c) => Err(self.error(format!("Expected attribute value, found '{c}'"))),
            None => Err(self.error("Expected attribute value, found end of input")),
        }
    }

    fn parse_attribute(&mut self) -> Result<AstAttribute, ParseError> {
        if let Some('{') = self.current() {
            return Err(self.interpolation_error());
        }

        // Accept raw identifiers so markup can be shared with the macro
        if self.current() == Some('r') && self.peek(1) == Some('#') {
            self.pos += 2;
        }
        let name = self.parse_identifier()?;

        self.skip_whitespace();

        if let Some('=') = self.current() {
            self.advance();
            self.skip_whitespace();
            let value = self.parse_attribute_value()?;
            Ok(AstAttribute::Named {
                name,
                value: Some(value),
            })
        } else {
            Ok(AstAttribute::Named { name, value: None })
        }
    }

    /// Whether the next character starts something other than bare text.
    fn at_markup(&self) -> bool {
        matches!(
            (self.current(), self.peek(1)),
            (Some('<' | '"' | '{'), _) | (Some('#'), Some('{'))
        )
    }

    /// Parse a run of bare text. Whitespace at either edge collapses to a single
    /// space, and is dropped at the start of an element and before a closing tag.
    fn parse_text(&mut self, after_sibling: bool) -> String {
        let start = self.pos;
        while let Some(c) = self.current() {
            if c == '<' || c == '{' {
                break;
            }
            self.advance();
        }
        let raw: String = self.input[start..self.pos].iter().collect();
        let closes = match self.current() {
            None => true,
            Some('<') => self.peek(1) == Some('/'),
            Some(_) => false,
        };

        let trimmed = raw.trim();
        let mut text = String::new();
        if after_sibling && raw.starts_with(char::is_whitespace) {
            text.push(' ');
        }
        text.push_str(trimmed);
        if !closes && !trimmed.is_empty() && raw.ends_with(char::is_whitespace) {
            text.push(' ');
        }
        text
    }

    fn parse_node(&mut self) -> Result<AstNode, ParseError> {
        match (self.current(), self.peek(1)) {
            (Some('{'), _) | (Some('#'), Some('{')) => return Err(self.interpolation_error()),
            _ => {}
        }

        if let Some('<') = self.current() {
            self.advance();

            if let Some('>') = self.current() {
                // Fragment opening tag: <>
                self.advance();
                let children = self.parse_children(None)?;
                return Ok(AstNode::Fragment(children));
            } else if let Some('/') = self.current() {
                return Err(self.error("Unexpected closing tag"));
            }

            let name = self.parse_identifier()?;
            self.skip_whitespace();

            let mut attributes = Vec::new();
            while let Some(c) = self.current() {
                if c == '>' || c == '/' {
                    break;
                }
                attributes.push(self.parse_attribute()?);
                self.skip_whitespace();
            }

            let self_closed = if let Some('/') = self.current() {
                self.advance();
                self.skip_whitespace();
                self.expect('>')?;
                true
            } else {
                self.expect('>')?;
                false
            };

            if self_closed {
                return Ok(AstNode::Element {
                    name,
                    attributes,
                    children: vec![],
                    self_closed,
                });
            }

            let children = self.parse_children(Some(&name))?;

            Ok(AstNode::Element {
                name,
                attributes,
                children,
                self_closed,
            })
        } else if let Some('"') = self.current() {
            Ok(AstNode::Text(self.parse_string_literal()?))
        } else {
            let text = self.parse_text(false);
            if text.is_empty() {
                Err(self.error("Expected element or text"))
            } else {
                Ok(AstNode::Text(text))
            }
        }
    }

    fn parse_children(&mut self, parent_tag: Option<&str>) -> Result<Vec<AstNode>, ParseError> {
        let mut children = Vec::new();

        loop {
            let text_start = self.pos;
            self.skip_whitespace();

            if let (Some('<'), Some('/')) = (self.current(), self.peek(1)) {
                self.pos += 2;
                self.skip_whitespace();

                match parent_tag {
                    None => self.expect('>')?,
                    Some(parent_tag) => {
                        let close_name = self.parse_identifier()?;
                        if close_name != parent_tag {
                            return Err(self.error(format!(
                                "Mismatched closing tag: expected '{parent_tag}', found '{close_name}'"
                            )));
                        }
                        self.skip_whitespace();
                        self.expect('>')?;
                    }
                }
                break;
            }

            if self.current().is_none() {
                return Err(match parent_tag {
                    Some(parent_tag) => self.error(format!(
                        "Unclosed tag: expected closing tag for '{parent_tag}'"
                    )),
                    None => self.error("Unclosed fragment: expected '</>'"),
                });
            }

            if self.at_markup() {
                children.push(self.parse_node()?);
            } else {
                if !children.is_empty() {
                    self.pos = text_start;
                }
                children.push(AstNode::Text(self.parse_text(!children.is_empty())));
            }
        }

        Ok(children)
    }
}

/// Parse a markup string into an AST
pub fn parse_html(input: &str) -> Result<AstNode, ParseError> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    let node = parser.parse_node()?;
    parser.skip_whitespace();

    if parser.current().is_some() {
        return Err(parser.error("Unexpected content after root element"));
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_element() {
        let html = r#"<div class="container">Hello</div>"#;
        let result = parse_html(html).unwrap();

        match result {
            AstNode::Element { name, children, .. } => {
                assert_eq!(name, "div");
                assert_eq!(children.len(), 1);
                match &children[0] {
                    AstNode::Text(text) => assert_eq!(text, "Hello"),
                    _ => panic!("Expected text node"),
                }
            }
            _ => panic!("Expected element"),
        }
    }

    #[test]
    fn test_parse_text_around_inline_elements() {
        let result = parse_html("<p>Hello <b>World</b> and\n   more </p>").unwrap();
        match result {
            AstNode::Element { children, .. } => {
                let texts: Vec<_> = children
                    .iter()
                    .map(|c| match c {
                        AstNode::Text(text) => text.as_str(),
                        AstNode::Element { name, .. } => name.as_str(),
                        _ => panic!("Unexpected node"),
                    })
                    .collect();
                assert_eq!(texts, ["Hello ", "b", " and\n   more"]);
            }
            _ => panic!("Expected element"),
        }
    }

    #[test]
    fn test_parse_quoted_text_keeps_whitespace() {
        let result = parse_html(r#"<p>" spaced "</p>"#).unwrap();
        match result {
            AstNode::Element { children, .. } => match &children[0] {
                AstNode::Text(text) => assert_eq!(text, " spaced "),
                _ => panic!("Expected text node"),
            },
            _ => panic!("Expected element"),
        }
    }

    #[test]
    fn test_parse_self_closed_element() {
        let html = r#"<input type="text" />"#;
        let result = parse_html(html).unwrap();

        match result {
            AstNode::Element {
                name,
                self_closed,
                attributes,
                ..
            } => {
                assert_eq!(name, "input");
                assert!(self_closed);
                assert_eq!(attributes.len(), 1);
            }
            _ => panic!("Expected element"),
        }
    }

    #[test]
    fn test_parse_nested_elements() {
        let html = r#"<div><p>Hello</p><span>World</span></div>"#;
        let result = parse_html(html).unwrap();

        match result {
            AstNode::Element { name, children, .. } => {
                assert_eq!(name, "div");
                assert_eq!(children.len(), 2);
            }
            _ => panic!("Expected element"),
        }
    }

    #[test]
    fn test_parse_fragment() {
        let html = r#"<><div>First</div><div>Second</div></>"#;
        let result = parse_html(html).unwrap();

        match result {
            AstNode::Fragment(children) => {
                assert_eq!(children.len(), 2);
            }
            _ => panic!("Expected fragment"),
        }
    }

    #[test]
    fn test_parse_literal_attribute_values() {
        let html = r#"<Case value=2><x-a n=-3 f=1.5 flag=true s="two" /></Case>"#;
        let result = parse_html(html).unwrap();

        let AstNode::Element {
            attributes,
            children,
            ..
        } = result
        else {
            panic!("Expected element");
        };
        assert!(matches!(
            attributes[0],
            AstAttribute::Named {
                value: Some(AttributeValue::LiteralInt(2)),
                ..
            }
        ));

        let AstNode::Element { name, attributes, .. } = &children[0] else {
            panic!("Expected element");
        };
        assert_eq!(name, "x-a");
        assert!(matches!(
            attributes[0],
            AstAttribute::Named {
                value: Some(AttributeValue::LiteralInt(-3)),
                ..
            }
        ));
        assert!(matches!(
            attributes[1],
            AstAttribute::Named {
                value: Some(AttributeValue::LiteralFloat(f)),
                ..
            } if f == 1.5
        ));
        assert!(matches!(
            attributes[2],
            AstAttribute::Named {
                value: Some(AttributeValue::LiteralBool(true)),
                ..
            }
        ));
        assert!(matches!(
            &attributes[3],
            AstAttribute::Named {
                value: Some(AttributeValue::LiteralString(s)),
                ..
            } if s == "two"
        ));
    }

    #[test]
    fn test_attribute_names_are_kept_verbatim() {
        let result = parse_html(r#"<div className="app" r#type="x"></div>"#).unwrap();
        let AstNode::Element { attributes, .. } = result else {
            panic!("Expected element");
        };
        assert_eq!(attributes[0].name(), Some("className"));
        assert_eq!(attributes[1].name(), Some("type"));
    }

    #[test]
    fn test_interpolation_error() {
        let html = r#"<div>{some_expr}</div>"#;
        let result = parse_html(html);
        assert!(result.unwrap_err().message.contains("Interpolation"));
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let err = parse_html("<div><p>x</div>").unwrap_err();
        assert!(err.message.contains("Mismatched closing tag"));
    }

    #[test]
    fn test_unclosed_tag() {
        let err = parse_html("<div>text").unwrap_err();
        assert!(err.message.contains("Unclosed tag"));
    }

    #[test]
    fn test_attribute_without_value() {
        let html = r#"<input disabled />"#;
        let result = parse_html(html).unwrap();

        match result {
            AstNode::Element { attributes, .. } => {
                assert_eq!(attributes.len(), 1);
                match &attributes[0] {
                    AstAttribute::Named { name, value } => {
                        assert_eq!(name, "disabled");
                        assert!(value.is_none());
                    }
                    _ => panic!("Expected named attribute"),
                }
            }
            _ => panic!("Expected element"),
        }
    }
}
