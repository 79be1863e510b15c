use bumpalo::Bump;
use ssrhtml_parser::{
    AstAttribute, AstNode, AttributeValue as AstValue, ParseError, ReservedComponent,
};

use crate::{
    case, default_case, document, element, fragment, head, switch, when, Attribute,
    AttributeValue, Node,
};

/// Error type for AST evaluation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// Interpolation is not supported at runtime
    #[error("Interpolation is not supported in runtime HTML evaluation")]
    InterpolationNotSupported,
    /// Expression attributes are not supported at runtime
    #[error("Expression attributes are not supported in runtime HTML evaluation")]
    ExpressionAttributeNotSupported,
    /// A reserved component was used without the attribute it needs
    #[error("`<{component:?}>` requires a `{attribute}` attribute")]
    MissingArgument {
        /// The component missing its argument.
        component: ReservedComponent,
        /// The attribute that must be given.
        attribute: &'static str,
    },
    /// `<If>` was given a condition that is not a boolean literal
    #[error("`<If>` expects a boolean `cond`, found `{found}`")]
    NonBooleanCondition {
        /// The value that was given instead.
        found: String,
    },
}

/// Error type for runtime HTML parsing
#[derive(Debug, thiserror::Error)]
pub enum ParseHtmlError {
    /// Error parsing the HTML syntax
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    /// Error evaluating the AST (e.g., interpolation not supported)
    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
}

/// Parse an HTML string into a runtime [Node] tree.
///
/// Reserved components (`Html`, `Head`, `If`, `Switch`, `Case`, `Default`) are
/// resolved while evaluating, with their arguments given as literals.
///
/// # Example
///
/// ```
/// use ssrhtml::{bumpalo::Bump, parse_html, render, FormatOptions};
///
/// let bump = Bump::new();
/// let node = parse_html(&bump, r#"<div class="container"><p>"Hello, world!"</p></div>"#).unwrap();
/// let html = render(&node, &FormatOptions::default(), 0).unwrap();
/// assert_eq!(html, r#"<div class="container"><p>Hello, world!</p></div>"#);
/// ```
///
/// # Errors
///
/// Returns a [ParseHtmlError] if the HTML is malformed or contains features not
/// supported at runtime (like interpolation syntax).
pub fn parse_html<'bump>(bump: &'bump Bump, html: &str) -> Result<Node<'bump>, ParseHtmlError> {
    let ast = ssrhtml_parser::parse_html(html)?;
    let node = eval_node(bump, &ast)?;
    Ok(node)
}

/// Convert an AST node to a runtime Node
pub fn eval_node<'bump>(bump: &'bump Bump, node: &AstNode) -> Result<Node<'bump>, EvalError> {
    match node {
        AstNode::Element {
            name,
            attributes,
            children,
            ..
        } => {
            let children = eval_children(bump, children)?;
            match node.reserved_component() {
                Some(component) => eval_component(bump, component, attributes, children),
                None => {
                    let attrs = attributes
                        .iter()
                        .map(|a| eval_attribute(bump, a))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(element(bump, name, attrs, children))
                }
            }
        }
        AstNode::Fragment(children) => Ok(fragment(bump, eval_children(bump, children)?)),
        AstNode::Expression { .. } => Err(EvalError::InterpolationNotSupported),
        AstNode::Text(text) => Ok(Node::text(bump, text)),
    }
}

fn eval_children<'bump>(bump: &'bump Bump, children: &[AstNode]) -> Result<Node<'bump>, EvalError> {
    let nodes = children
        .iter()
        .map(|c| eval_node(bump, c))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Node::from_iter(bump, nodes))
}

fn eval_component<'bump>(
    bump: &'bump Bump,
    component: ReservedComponent,
    attributes: &[AstAttribute],
    children: Node<'bump>,
) -> Result<Node<'bump>, EvalError> {
    let argument = || -> Result<AttributeValue<'bump>, EvalError> {
        let attribute = component.argument().unwrap_or_default();
        attributes
            .iter()
            .find_map(|a| match a {
                AstAttribute::Named {
                    name,
                    value: Some(value),
                } if name == attribute => Some(eval_value(bump, value)),
                _ => None,
            })
            .unwrap_or_else(|| {
                Err(EvalError::MissingArgument {
                    component,
                    attribute,
                })
            })
    };

    Ok(match component {
        ReservedComponent::Html => {
            let attrs = attributes
                .iter()
                .map(|a| eval_attribute(bump, a))
                .collect::<Result<Vec<_>, _>>()?;
            document(bump, attrs, children)
        }
        ReservedComponent::Head => head(bump, children),
        ReservedComponent::If => match argument()? {
            AttributeValue::Bool(condition) => when(bump, condition, children),
            other => {
                return Err(EvalError::NonBooleanCondition {
                    found: other.to_string(),
                })
            }
        },
        ReservedComponent::Switch => switch(bump, argument()?, children),
        ReservedComponent::Case => case(bump, argument()?, children),
        ReservedComponent::Default => default_case(bump, children),
    })
}

fn eval_value<'bump>(bump: &'bump Bump, value: &AstValue) -> Result<AttributeValue<'bump>, EvalError> {
    Ok(match value {
        AstValue::LiteralString(s) => AttributeValue::string(bump, s),
        AstValue::LiteralInt(i) => AttributeValue::Int(*i),
        AstValue::LiteralFloat(f) => AttributeValue::Float(*f),
        AstValue::LiteralBool(b) => AttributeValue::Bool(*b),
        AstValue::Expression(_) => return Err(EvalError::ExpressionAttributeNotSupported),
    })
}

/// Convert an AST attribute to a runtime Attribute
fn eval_attribute<'bump>(
    bump: &'bump Bump,
    attr: &AstAttribute,
) -> Result<Attribute<'bump>, EvalError> {
    match attr {
        AstAttribute::Named { name, value: None } => Ok(Attribute::boolean(bump, name)),
        AstAttribute::Named {
            name,
            value: Some(value),
        } => Ok(Attribute::with_value(bump, name, eval_value(bump, value)?)),
        AstAttribute::Interpolated(_) => Err(EvalError::InterpolationNotSupported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeKind;
    use ssrhtml_parser::parse_html as parse_ast;

    #[test]
    fn test_eval_simple_element() {
        let bump = Bump::new();
        let ast = parse_ast(r#"<div class="container">"Hello"</div>"#).unwrap();
        let node = eval_node(&bump, &ast).unwrap();

        assert_eq!(node.tag(), Some("div"));
        let attrs = node.attrs().unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].key.as_str(), "class");
        assert_eq!(attrs[0].value_as_str(), Some("container"));
        match &node.children()[0] {
            Node::Text { text } => assert_eq!(text.as_str(), "Hello"),
            _ => panic!("Expected text node"),
        }
    }

    #[test]
    fn test_eval_fragment_is_transparent() {
        let bump = Bump::new();
        let ast = parse_ast(r#"<ul><><li>"First"</li><li>"Second"</li></></ul>"#).unwrap();
        let node = eval_node(&bump, &ast).unwrap();
        assert_eq!(node.children().len(), 2);
        assert!(node.children().iter().all(|c| c.tag() == Some("li")));
    }

    #[test]
    fn test_eval_reserved_components() {
        let bump = Bump::new();
        let ast = parse_ast(
            r#"<Html><Head><title>"T"</title></Head><If cond=false>"hidden"</If></Html>"#,
        )
        .unwrap();
        let node = eval_node(&bump, &ast).unwrap();
        assert!(node.is_kind(&NodeKind::Document));
        assert_eq!(node.children().len(), 1);
        assert!(node.children()[0].is_kind(&NodeKind::Head));
    }

    #[test]
    fn test_eval_switch_selects_case() {
        let bump = Bump::new();
        let ast = parse_ast(
            r#"<Switch expr="b"><Case value="a">"A"</Case><Case value="b">"B"</Case><Default>"D"</Default></Switch>"#,
        )
        .unwrap();
        let node = eval_node(&bump, &ast).unwrap();
        assert_eq!(node.inner_text(&bump).as_str(), "B");
    }

    #[test]
    fn test_eval_missing_argument() {
        let bump = Bump::new();
        let ast = parse_ast(r#"<Case>"x"</Case>"#).unwrap();
        assert_eq!(
            eval_node(&bump, &ast).unwrap_err(),
            EvalError::MissingArgument {
                component: ReservedComponent::Case,
                attribute: "value",
            }
        );
    }

    #[test]
    fn test_eval_non_boolean_condition() {
        let bump = Bump::new();
        let ast = parse_ast(r#"<If cond="yes">"x"</If>"#).unwrap();
        assert!(matches!(
            eval_node(&bump, &ast),
            Err(EvalError::NonBooleanCondition { found }) if found == "yes"
        ));
    }

    #[test]
    fn test_eval_attribute_without_value() {
        let bump = Bump::new();
        let ast = parse_ast(r#"<input disabled />"#).unwrap();
        let node = eval_node(&bump, &ast).unwrap();
        let attrs = node.attrs().unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].key.as_str(), "disabled");
        assert_eq!(attrs[0].value, None);
    }
}
