//! Parses markup from a token stream for use inside the `html!` macro.

use proc_macro2::TokenStream;
use syn::{
    braced,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    token, Ident, Lit, LitStr, Token,
};

use crate::ast::{AstAttribute, AstNode, AttributeValue};

/// An [AstNode] parsed from tokens.
pub struct SynAstNode(pub AstNode);

impl Parse for SynAstNode {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let node = parse_node(input)?;
        if !input.is_empty() {
            return Err(input.error("unexpected tokens after root element"));
        }
        Ok(SynAstNode(node))
    }
}

fn parse_node(input: ParseStream) -> syn::Result<AstNode> {
    if input.peek(Token![<]) {
        parse_element(input)
    } else if input.peek(LitStr) {
        let text: LitStr = input.parse()?;
        Ok(AstNode::Text(text.value()))
    } else if input.peek(Token![#]) && input.peek2(token::Brace) {
        input.parse::<Token![#]>()?;
        Ok(AstNode::Expression {
            body: parse_braced(input)?,
            iterator: true,
        })
    } else if input.peek(token::Brace) {
        Ok(AstNode::Expression {
            body: parse_braced(input)?,
            iterator: false,
        })
    } else {
        Err(input.error("expected an element, a string literal, `{expr}` or `#{iter}`"))
    }
}

fn parse_braced(input: ParseStream) -> syn::Result<TokenStream> {
    let content;
    braced!(content in input);
    content.parse()
}

/// Parses a possibly hyphenated name such as `div`, `data-id` or `r#type`.
fn parse_name(input: ParseStream) -> syn::Result<String> {
    let mut name = Ident::parse_any(input)?.unraw().to_string();
    while input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        name.push('-');
        name.push_str(&Ident::parse_any(input)?.unraw().to_string());
    }
    Ok(name)
}

fn parse_attribute(input: ParseStream) -> syn::Result<AstAttribute> {
    if input.peek(token::Brace) {
        return Ok(AstAttribute::Interpolated(parse_braced(input)?));
    }

    let name = parse_name(input)?;
    if !input.peek(Token![=]) {
        return Ok(AstAttribute::Named { name, value: None });
    }
    input.parse::<Token![=]>()?;

    let value = if input.peek(token::Brace) {
        AttributeValue::Expression(parse_braced(input)?)
    } else if input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        match input.parse::<Lit>()? {
            Lit::Int(i) => AttributeValue::LiteralInt(-i.base10_parse::<i128>()?),
            Lit::Float(f) => AttributeValue::LiteralFloat(-f.base10_parse::<f64>()?),
            other => return Err(syn::Error::new(other.span(), "expected a number after `-`")),
        }
    } else {
        match input.parse::<Lit>()? {
            Lit::Str(s) => AttributeValue::LiteralString(s.value()),
            Lit::Int(i) => AttributeValue::LiteralInt(i.base10_parse()?),
            Lit::Float(f) => AttributeValue::LiteralFloat(f.base10_parse()?),
            Lit::Bool(b) => AttributeValue::LiteralBool(b.value),
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    "unsupported attribute literal; use a string, number, boolean or `{expr}`",
                ))
            }
        }
    };

    Ok(AstAttribute::Named {
        name,
        value: Some(value),
    })
}

fn parse_element(input: ParseStream) -> syn::Result<AstNode> {
    input.parse::<Token![<]>()?;

    if input.peek(Token![>]) {
        input.parse::<Token![>]>()?;
        return Ok(AstNode::Fragment(parse_children(input, None)?));
    }
    if input.peek(Token![/]) {
        return Err(input.error("unexpected closing tag"));
    }

    let name = parse_name(input)?;
    let mut attributes = Vec::new();
    while !input.peek(Token![>]) && !input.peek(Token![/]) {
        if input.is_empty() {
            return Err(input.error(format!("unterminated start tag `<{name}`")));
        }
        attributes.push(parse_attribute(input)?);
    }

    if input.peek(Token![/]) {
        input.parse::<Token![/]>()?;
        input.parse::<Token![>]>()?;
        return Ok(AstNode::Element {
            name,
            attributes,
            children: vec![],
            self_closed: true,
        });
    }
    input.parse::<Token![>]>()?;

    let children = parse_children(input, Some(&name))?;
    Ok(AstNode::Element {
        name,
        attributes,
        children,
        self_closed: false,
    })
}

fn parse_children(input: ParseStream, parent: Option<&str>) -> syn::Result<Vec<AstNode>> {
    let mut children = Vec::new();
    loop {
        if input.is_empty() {
            return Err(match parent {
                Some(parent) => input.error(format!("expected closing tag `</{parent}>`")),
                None => input.error("expected closing fragment `</>`"),
            });
        }

        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            if let Some(parent) = parent {
                let span = input.span();
                let close = parse_name(input)?;
                if close != parent {
                    return Err(syn::Error::new(
                        span,
                        format!("mismatched closing tag: expected `</{parent}>`, found `</{close}>`"),
                    ));
                }
            }
            input.parse::<Token![>]>()?;
            return Ok(children);
        }

        children.push(parse_node(input)?);
    }
}
