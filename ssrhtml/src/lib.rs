#![deny(missing_docs)]
//! A crate for rendering HTML on the server from a runtime-built tree of nodes.
//!
//! Nodes are created through [builder], the free constructors ([element], [fragment],
//! [document], [head], [when], [switch]) or [html], and turned into a string with
//! [render] according to [FormatOptions]. Fragments and sequences are flattened
//! when a node is built, and conditionals and switches are resolved at the same
//! time, so rendering only deals with text, elements and documents.
//!
//! All allocations are done through a bump allocator ([bumpalo::Bump]) which must be passed
//! to all node-creating functions.
//!
//! Text and attribute values are written verbatim unless [FormatOptions::escape] is set.
//!
//! # Example
//!
//! ```
//! use ssrhtml::{bumpalo::Bump, html, render, FormatOptions};
//!
//! let bump = Bump::new();
//! let logged_in = true;
//! let page = html! { in &bump;
//!     <Html>
//!         <Head><title>"Home"</title></Head>
//!         <div className="container">
//!             <If cond={logged_in}><p>"Welcome back!"</p></If>
//!         </div>
//!     </Html>
//! };
//! let html_string = render(&page, &FormatOptions::default(), 0).unwrap();
//! assert_eq!(
//!     html_string,
//!     r#"<!DOCTYPE html><html><head><title>Home</title></head><body><div class="container"><p>Welcome back!</p></div></body></html>"#
//! );
//! ```

pub mod builder;
pub use builder::{document, element, fragment, head};

// Re-export bumpalo for convenience
pub use bumpalo;

mod attribute;
pub use attribute::{
    attr, output_attributes, Attribute, AttributeValue, IntoAttribute, IntoAttributeValue,
};

mod control;
pub use control::{case, default_case, switch, when, CASE_VALUE_ATTRIBUTE};

mod document;
pub use document::{split_head, DOCTYPE};

mod node;
pub use node::{build_composite, flatten, DefaultIn, IntoNode, Node, NodeKind};

#[cfg(feature = "parser")]
mod eval;
#[cfg(feature = "parser")]
pub use eval::{eval_node, parse_html, EvalError, ParseHtmlError};

mod options;
#[cfg(feature = "serde")]
pub use options::ConfigError;
pub use options::{FormatOptions, SelfClosing};

mod owned;
pub use owned::{OwnedAttribute, OwnedNode, OwnedValue};

mod page;
pub use page::{generate, render_page};

mod render;
pub use render::{render, render_to, RenderError};

#[cfg(feature = "macros")]
pub use ssrhtml_macro::html;

// Re-export parser types for convenience
#[cfg(feature = "parser")]
pub use ssrhtml_parser::{parse_html as parse_html_ast, AstNode, ParseError, ReservedComponent};
