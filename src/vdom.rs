//! The boundary to the external virtual-node engine.
//!
//! This crate never diffs or patches anything itself. It produces [`VNode`]
//! values in the exact shape the engine's constructor takes — attributes
//! under `attrs`, handlers under `on`, children either a flat sequence or a
//! single string — and drives the engine through the [`Backend`] trait.

use crate::element::{AttrValue, Child, CompiledNode};
use crate::error::Error;
use crate::event::Handler;
use hashbrown::HashMap;

/// The external engine's virtual-node representation.
#[derive(Debug, Clone)]
pub struct VNode {
	pub tag: &'static str,
	pub props: VProps,
	pub children: VChildren,
}

/// Element properties: the attribute table and the named handler table.
///
/// Event bindings have no textual representation at this point; they exist
/// only as entries under `on`.
#[derive(Debug, Clone, Default)]
pub struct VProps {
	pub attrs: HashMap<String, AttrValue>,
	pub on: HashMap<&'static str, Handler>,
}

/// Children are either one plain string or a flat node/text sequence.
#[derive(Debug, Clone)]
pub enum VChildren {
	Text(String),
	Nodes(Vec<VChild>),
}

#[derive(Debug, Clone)]
pub enum VChild {
	Text(String),
	Node(VNode),
}

impl From<CompiledNode> for VNode {
	fn from(node: CompiledNode) -> Self {
		VNode {
			tag: node.tag,
			props: VProps {
				attrs: node.attributes,
				on: node.event_bindings,
			},
			children: convert_children(node.children),
		}
	}
}

fn convert_children(mut children: Vec<Child>) -> VChildren {
	// A lone text child collapses to the single-string form.
	if children.len() == 1 {
		return match children.remove(0) {
			Child::Text(text) => VChildren::Text(text),
			Child::Element(node) => VChildren::Nodes(vec![VChild::Node(node.into())]),
		};
	}
	VChildren::Nodes(
		children
			.into_iter()
			.map(|child| match child {
				Child::Text(text) => VChild::Text(text),
				Child::Element(node) => VChild::Node(node.into()),
			})
			.collect(),
	)
}

/// The external diff/patch engine, as seen from the component runtime.
///
/// `mount` looks the container up in the host document and materialises the
/// first tree; a missing container is a reported [`Error::ContainerNotFound`],
/// never a silent no-op. `patch` diffs the new tree against the handle from
/// the previous call and returns the new live handle to retain.
pub trait Backend {
	/// The engine's reference to the currently live tree.
	type Handle: 'static;

	fn mount(&mut self, selector: &str, vnode: VNode) -> Result<Self::Handle, Error>;

	fn patch(&mut self, previous: Self::Handle, vnode: VNode) -> Result<Self::Handle, Error>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::{div, input, p};
	use crate::event::on_click;
	use crate::tpl;

	#[test]
	fn lone_text_child_collapses_to_a_string() {
		let vnode = VNode::from(p("hello"));
		match vnode.children {
			VChildren::Text(text) => assert_eq!(text, "hello"),
			VChildren::Nodes(nodes) => panic!("expected a string, got {:?}", nodes),
		}
	}

	#[test]
	fn attributes_land_under_attrs_and_handlers_under_on() {
		let vnode = VNode::from(input(tpl!({on_click(|_| ())} r#"type="text""#)));
		assert_eq!(
			vnode.props.attrs.get("type"),
			Some(&AttrValue::Str("text".to_owned()))
		);
		assert!(vnode.props.on.contains_key("click"));
	}

	#[test]
	fn mixed_children_stay_a_flat_sequence() {
		let vnode = VNode::from(div(tpl!("a" {p("x")} "b")));
		match vnode.children {
			VChildren::Nodes(nodes) => {
				assert_eq!(nodes.len(), 3);
				assert!(matches!(nodes[0], VChild::Text(_)));
				assert!(matches!(nodes[1], VChild::Node(_)));
				assert!(matches!(nodes[2], VChild::Text(_)));
			}
			VChildren::Text(text) => panic!("expected a sequence, got {:?}", text),
		}
	}

	#[test]
	fn empty_children_convert_to_an_empty_sequence() {
		let vnode = VNode::from(div(""));
		match vnode.children {
			VChildren::Nodes(nodes) => assert!(nodes.is_empty()),
			VChildren::Text(text) => panic!("expected a sequence, got {:?}", text),
		}
	}
}
