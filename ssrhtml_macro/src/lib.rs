use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use proc_macro2::{Literal, Span, TokenStream as TokenStream2};
use quote::{quote, ToTokens};
use ssrhtml_parser::{AstAttribute, AstNode, AttributeValue, ReservedComponent, SynAstNode};
use syn::{parse::Parse, parse::ParseStream, Expr, Token};

/// Input format: `in <allocator>; <html>`
struct HtmlInput {
    allocator: Expr,
    node: SynAstNode,
}
impl Parse for HtmlInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        // Parse: in <allocator_expr> ;
        input.parse::<Token![in]>()?;
        let allocator = input.parse::<Expr>()?;
        input.parse::<Token![;]>()?;

        let node = input.parse::<SynAstNode>()?;

        Ok(HtmlInput { allocator, node })
    }
}

// Wrapper to allow code generation with bump allocator
struct AstNodeWithBump<'a> {
    bump: &'a Expr,
    node: &'a AstNode,
}
impl ToTokens for AstNodeWithBump<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        ast_node_to_tokens_with_bump(self.bump, self.node, tokens);
    }
}

fn value_to_tokens(value: &AttributeValue) -> TokenStream2 {
    match value {
        AttributeValue::LiteralString(s) => quote! { #s },
        AttributeValue::LiteralInt(i) if *i < 0 => {
            let magnitude = Literal::u128_unsuffixed(i.unsigned_abs());
            quote! { -#magnitude }
        }
        AttributeValue::LiteralInt(i) => Literal::i128_unsuffixed(*i).into_token_stream(),
        AttributeValue::LiteralFloat(f) if *f < 0.0 => {
            let magnitude = Literal::f64_unsuffixed(-*f);
            quote! { -#magnitude }
        }
        AttributeValue::LiteralFloat(f) => Literal::f64_unsuffixed(*f).into_token_stream(),
        AttributeValue::LiteralBool(b) => quote! { #b },
        AttributeValue::Expression(expr) => quote! { (#expr) },
    }
}

/// Children as a single `ssrhtml::Node::Sequence` expression.
fn children_to_tokens(bump: &Expr, children: &[AstNode]) -> TokenStream2 {
    let children_tokens = children.iter().map(|c| AstNodeWithBump { bump, node: c });
    quote! {{
        let mut __children = ssrhtml::bumpalo::collections::Vec::new_in(#bump);
        #(__children.push(#children_tokens);)*
        ssrhtml::Node::Sequence { items: __children }
    }}
}

fn attributes_to_tokens(bump: &Expr, attributes: &[AstAttribute]) -> TokenStream2 {
    if attributes.is_empty() {
        return quote! { ssrhtml::bumpalo::collections::Vec::new_in(#bump) };
    }

    let attr_statements = attributes.iter().map(|attr| match attr {
        AstAttribute::Named { name, value } => match value {
            Some(value) => {
                let value = value_to_tokens(value);
                quote! {
                    __attrs.push(ssrhtml::Attribute::with_value(#bump, #name, #value));
                }
            }
            None => quote! {
                __attrs.push(ssrhtml::Attribute::boolean(#bump, #name));
            },
        },
        AstAttribute::Interpolated(expr) => quote! {
            for __a in #expr {
                __attrs.push(ssrhtml::IntoAttribute::into_attribute(__a, #bump));
            }
        },
    });
    quote! {{
        let mut __attrs = ssrhtml::bumpalo::collections::Vec::new_in(#bump);
        #(#attr_statements)*
        __attrs
    }}
}

fn reserved_component_to_tokens(
    bump: &Expr,
    component: ReservedComponent,
    component_name: &str,
    attributes: &[AstAttribute],
    children: TokenStream2,
) -> TokenStream2 {
    let argument = component.argument().map(|argument| {
        attributes.iter().find_map(|attr| match attr {
            AstAttribute::Named {
                name,
                value: Some(value),
            } if name == argument => Some(value_to_tokens(value)),
            _ => None,
        })
    });
    let argument = match argument {
        Some(Some(tokens)) => tokens,
        Some(None) => {
            let message = format!(
                "`<{component_name}>` requires a `{}` attribute",
                component.argument().unwrap_or_default()
            );
            return quote! { compile_error!(#message) };
        }
        None => TokenStream2::new(),
    };

    match component {
        ReservedComponent::Html => {
            let attrs = attributes_to_tokens(bump, attributes);
            quote! { ssrhtml::document(#bump, #attrs, #children) }
        }
        ReservedComponent::Head => quote! { ssrhtml::head(#bump, #children) },
        ReservedComponent::If => quote! { ssrhtml::when(#bump, #argument, #children) },
        ReservedComponent::Switch => quote! { ssrhtml::switch(#bump, #argument, #children) },
        ReservedComponent::Case => quote! { ssrhtml::case(#bump, #argument, #children) },
        ReservedComponent::Default => quote! { ssrhtml::default_case(#bump, #children) },
    }
}

fn custom_component_to_tokens(
    bump: &Expr,
    name: &str,
    attributes: &[AstAttribute],
    children: &[AstNode],
) -> TokenStream2 {
    let has_interpolated = attributes
        .iter()
        .any(|attr| matches!(attr, AstAttribute::Interpolated(_)));
    if has_interpolated {
        return quote! {
            compile_error!("Interpolated attributes are not supported for custom components")
        };
    }

    let component_ident = syn::Ident::new(name, Span::call_site());
    let props_ident = syn::Ident::new(&format!("{name}Props"), Span::call_site());

    // Attribute names may be camelCase or kebab-case; props fields are snake_case
    let mut field_inits = Vec::new();
    for attr in attributes {
        if let AstAttribute::Named { name, value } = attr {
            let field_ident = syn::Ident::new(&name.to_case(Case::Snake), Span::call_site());
            let value_expr = match value {
                Some(value) => {
                    let value = value_to_tokens(value);
                    quote! { (#value).into() }
                }
                None => quote! { true.into() },
            };
            field_inits.push(quote! { #field_ident: #value_expr });
        }
    }

    if !children.is_empty() {
        let children = children_to_tokens(bump, children);
        field_inits.push(quote! { children: #children });
    }

    quote! {
        #component_ident(#bump, #props_ident {
            #(#field_inits,)*
            ..ssrhtml::DefaultIn::default_in(#bump)
        })
    }
}

fn ast_node_to_tokens_with_bump(bump: &Expr, node: &AstNode, tokens: &mut TokenStream2) {
    match node {
        AstNode::Element {
            name,
            attributes,
            children,
            ..
        } => {
            if let Some(component) = node.reserved_component() {
                let children = children_to_tokens(bump, children);
                tokens.extend(reserved_component_to_tokens(
                    bump, component, name, attributes, children,
                ));
            } else if node.is_custom_component() {
                tokens.extend(custom_component_to_tokens(bump, name, attributes, children));
            } else {
                let attrs = attributes_to_tokens(bump, attributes);
                let children = children_to_tokens(bump, children);
                let name_str = name.as_str();
                tokens.extend(quote! {
                    ssrhtml::element(#bump, #name_str, #attrs, #children)
                });
            }
        }
        AstNode::Fragment(children) => {
            let children = children_to_tokens(bump, children);
            tokens.extend(quote! { ssrhtml::fragment(#bump, #children) });
        }
        AstNode::Expression { body, iterator } => {
            if *iterator {
                tokens.extend(quote! {
                    ssrhtml::Node::from_iter(#bump, #body)
                });
            } else {
                tokens.extend(quote! {
                    ssrhtml::IntoNode::into_node(#body, #bump)
                });
            }
        }
        AstNode::Text(text) => {
            tokens.extend(quote! {
                ssrhtml::Node::text(#bump, #text)
            });
        }
    }
}

#[proc_macro]
/// Constructs a tree of [`ssrhtml::Node`]s from (X)HTML-like syntax, similar to JSX.
///
/// # Syntax
///
/// ```ignore
/// html! { in <allocator>; <element>...</element> }
/// ```
///
/// The allocator is a reference to a [`bumpalo::Bump`] allocator that will be used
/// for all allocations.
///
/// Interpolation is supported using `{}` for expressions and `#{...}` for iterators.
/// Attribute values may be literals or `{expr}`; `{iter}` in attribute position
/// splices in anything that implements `IntoAttribute`.
///
/// Fragments are supported using `<>...</>` syntax.
///
/// `<Html>`, `<Head>`, `<If cond={..}>`, `<Switch expr={..}>`, `<Case value={..}>`
/// and `<Default>` build the corresponding reserved nodes. Any other capitalised
/// name calls a component function `Name(bump, NameProps { .. })`.
///
/// # Example
///
/// ```ignore
/// use ssrhtml::{bumpalo::Bump, html};
///
/// let bump = Bump::new();
/// let element = html! { in &bump;
///     <div class="container">
///         <h1>"Hello, World!"</h1>
///     </div>
/// };
/// ```
pub fn html(input: TokenStream) -> TokenStream {
    let HtmlInput { allocator, node } = syn::parse_macro_input!(input as HtmlInput);

    let wrapper = AstNodeWithBump {
        bump: &allocator,
        node: &node.0,
    };

    quote! { #wrapper }.into()
}
