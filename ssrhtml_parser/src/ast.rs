use proc_macro2::TokenStream;

/// Represents an attribute in the AST
#[derive(Debug, Clone)]
pub enum AstAttribute {
    /// A named attribute with an optional value
    Named {
        name: String,
        value: Option<AttributeValue>,
    },
    /// An interpolated attribute expression (macro only)
    Interpolated(TokenStream),
}

impl AstAttribute {
    /// Get the name of this attribute if it is [`AstAttribute::Named`]
    pub fn name(&self) -> Option<&str> {
        match self {
            AstAttribute::Named { name, .. } => Some(name),
            AstAttribute::Interpolated(_) => None,
        }
    }
}

/// Represents an attribute value
#[derive(Debug, Clone)]
pub enum AttributeValue {
    /// A string literal value
    LiteralString(String),
    /// An integer literal value
    LiteralInt(i128),
    /// A floating-point literal value
    LiteralFloat(f64),
    /// A boolean literal value
    LiteralBool(bool),
    /// An expression (macro only)
    Expression(TokenStream),
}

/// Components with built-in meaning. Any other capitalised element name is a
/// custom component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedComponent {
    /// `<Html>`: the document wrapper.
    Html,
    /// `<Head>`: content diverted into the document's `<head>`.
    Head,
    /// `<If cond=...>`
    If,
    /// `<Switch expr=...>`
    Switch,
    /// `<Case value=...>`
    Case,
    /// `<Default>`
    Default,
}

impl ReservedComponent {
    /// Look up a reserved component by its element name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Html" => Self::Html,
            "Head" => Self::Head,
            "If" => Self::If,
            "Switch" => Self::Switch,
            "Case" => Self::Case,
            "Default" => Self::Default,
            _ => return None,
        })
    }

    /// The attribute carrying this component's argument, if it takes one.
    pub fn argument(self) -> Option<&'static str> {
        match self {
            Self::If => Some("cond"),
            Self::Switch => Some("expr"),
            Self::Case => Some("value"),
            Self::Html | Self::Head | Self::Default => None,
        }
    }
}

/// Represents a node in the AST
#[derive(Debug, Clone)]
pub enum AstNode {
    /// An element with tag name, attributes, and children
    Element {
        name: String,
        attributes: Vec<AstAttribute>,
        children: Vec<AstNode>,
        /// Whether the element was written as `<name />`
        self_closed: bool,
    },
    /// A fragment containing multiple children without a wrapper element
    Fragment(Vec<AstNode>),
    /// An interpolated expression (macro only)
    Expression { body: TokenStream, iterator: bool },
    /// Text content
    Text(String),
}

impl AstNode {
    /// Check if this node is a custom component (starts with an uppercase letter
    /// and is not reserved)
    pub fn is_custom_component(&self) -> bool {
        match self {
            AstNode::Element { name, .. } => {
                name.chars().next().is_some_and(|c| c.is_uppercase())
                    && ReservedComponent::from_name(name).is_none()
            }
            _ => false,
        }
    }

    /// Get the reserved component this element names, if any
    pub fn reserved_component(&self) -> Option<ReservedComponent> {
        self.element_name().and_then(ReservedComponent::from_name)
    }

    /// Get the element name if this is an element node
    pub fn element_name(&self) -> Option<&str> {
        match self {
            AstNode::Element { name, .. } => Some(name),
            _ => None,
        }
    }
}
