//! Conditional and multi-way branching, resolved while the tree is built.
//!
//! Both produce a fragment, so the chosen children are spliced into whatever node
//! they are placed in and the serializer never sees a branch.

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::{
    build_composite, flatten, Attribute, AttributeValue, IntoAttributeValue, IntoNode, Node,
    NodeKind,
};

/// The attribute a [case] stores its value in.
pub const CASE_VALUE_ATTRIBUTE: &str = "value";

/// A fragment holding `children` when `condition` holds, and an empty fragment otherwise.
pub fn when<'bump>(
    bump: &'bump Bump,
    condition: bool,
    children: impl IntoNode<'bump>,
) -> Node<'bump> {
    if condition {
        crate::fragment(bump, children)
    } else {
        crate::fragment(bump, Node::empty(bump))
    }
}

/// Create a branch for [switch] that is chosen when the scrutinee equals `value`.
pub fn case<'bump>(
    bump: &'bump Bump,
    value: impl IntoAttributeValue<'bump>,
    children: impl IntoNode<'bump>,
) -> Node<'bump> {
    build_composite(
        bump,
        NodeKind::Case,
        [Attribute::with_value(bump, CASE_VALUE_ATTRIBUTE, value)],
        children,
    )
}

/// Create the fallback branch for [switch].
pub fn default_case<'bump>(bump: &'bump Bump, children: impl IntoNode<'bump>) -> Node<'bump> {
    build_composite(bump, NodeKind::Default, BumpVec::new_in(bump), children)
}

/// Resolve a switch over `branches`.
///
/// The first [case] whose value equals `scrutinee` wins, compared by typed equality
/// with no coercion. Without a match, the first [default_case] is used; without
/// either, the result is an empty fragment. Branches that are neither are ignored.
pub fn switch<'bump>(
    bump: &'bump Bump,
    scrutinee: impl IntoAttributeValue<'bump>,
    branches: impl IntoNode<'bump>,
) -> Node<'bump> {
    let scrutinee = scrutinee.into_attribute_value(bump);

    let mut matched = None;
    let mut fallback = None;
    for (index, branch) in flatten(bump, [branches.into_node(bump)])
        .into_iter()
        .enumerate()
    {
        match branch {
            Node::Composite {
                kind: NodeKind::Case,
                attributes,
                children,
            } => {
                if case_value(&attributes) == Some(&scrutinee) {
                    tracing::trace!(index, value = %scrutinee, "switch matched case");
                    matched = Some(children);
                    break;
                }
            }
            Node::Composite {
                kind: NodeKind::Default,
                children,
                ..
            } if fallback.is_none() => fallback = Some(children),
            _ => {}
        }
    }

    if matched.is_none() {
        tracing::trace!(
            value = %scrutinee,
            has_default = fallback.is_some(),
            "switch found no matching case"
        );
    }

    Node::Composite {
        kind: NodeKind::Fragment,
        attributes: BumpVec::new_in(bump),
        children: matched
            .or(fallback)
            .unwrap_or_else(|| BumpVec::new_in(bump)),
    }
}

fn case_value<'a, 'bump>(attributes: &'a [Attribute<'bump>]) -> Option<&'a AttributeValue<'bump>> {
    attributes
        .iter()
        .find(|a| a.key.as_str() == CASE_VALUE_ATTRIBUTE)
        .and_then(|a| a.value.as_ref())
}
