//! Element constructors that take an explicit attribute table instead of a
//! template literal.
//!
//! The literal DSL is the primary authoring surface; these constructors
//! cover the cases where attributes are already structured data.

use crate::element::{AttrValue, Child, CompiledNode};
use crate::event::EventBinding;
use hashbrown::HashMap;

/// Builds a node for `tag` from a prepared attribute table, event bindings
/// and optional text content.
#[must_use]
pub fn with_attrs<'a>(
	tag: &'static str,
	attrs: impl IntoIterator<Item = (&'a str, AttrValue)>,
	bindings: impl IntoIterator<Item = EventBinding>,
	content: &str,
) -> CompiledNode {
	let mut attributes = HashMap::new();
	for (name, value) in attrs {
		attributes.insert(name.to_owned(), value);
	}
	let mut event_bindings = HashMap::new();
	for binding in bindings {
		event_bindings.insert(binding.name, binding.handler);
	}
	let children = if content.is_empty() {
		Vec::new()
	} else {
		vec![Child::Text(content.to_owned())]
	};
	CompiledNode {
		tag,
		attributes,
		event_bindings,
		children,
	}
}

/// An `<input>` with the given `type` and placeholder.
#[must_use]
pub fn input(kind: &str, placeholder: &str) -> CompiledNode {
	with_attrs(
		"input",
		vec![
			("type", AttrValue::Str(kind.to_owned())),
			("placeholder", AttrValue::Str(placeholder.to_owned())),
		],
		None::<EventBinding>,
		"",
	)
}

/// A `<textarea>` with a placeholder and row count.
#[must_use]
pub fn textarea(placeholder: &str, rows: i64) -> CompiledNode {
	with_attrs(
		"textarea",
		vec![
			("placeholder", AttrValue::Str(placeholder.to_owned())),
			("rows", AttrValue::Int(rows)),
		],
		None::<EventBinding>,
		"",
	)
}

/// A `<button>` with a label and a click binding.
#[must_use]
pub fn button(text: &str, on_click: EventBinding) -> CompiledNode {
	with_attrs("button", vec![], Some(on_click), text)
}

/// A `<div>` with a class.
#[must_use]
pub fn styled_div(class: &str, content: &str) -> CompiledNode {
	with_attrs(
		"div",
		vec![("class", AttrValue::Str(class.to_owned()))],
		None::<EventBinding>,
		content,
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::event::{on_click, Event};
	use core::cell::Cell;
	use std::rc::Rc;

	#[test]
	fn with_attrs_separates_attributes_and_bindings() {
		let clicks = Rc::new(Cell::new(0));
		let node = with_attrs(
			"button",
			vec![("id", AttrValue::Str("go".to_owned()))],
			Some(on_click({
				let clicks = Rc::clone(&clicks);
				move |_| clicks.set(clicks.get() + 1)
			})),
			"Go",
		);
		assert_eq!(node.attribute("id"), Some(&AttrValue::Str("go".to_owned())));
		assert_eq!(node.text(), "Go");

		node.event_bindings["click"].invoke(&Event::new());
		assert_eq!(clicks.get(), 1);
	}

	#[test]
	fn textarea_carries_an_integer_row_count() {
		let node = textarea("Message", 4);
		assert_eq!(node.tag, "textarea");
		assert_eq!(node.attribute("rows"), Some(&AttrValue::Int(4)));
	}

	#[test]
	fn input_sets_type_and_placeholder() {
		let node = input("email", "Mail address");
		assert_eq!(node.attribute("type"), Some(&AttrValue::Str("email".to_owned())));
		assert_eq!(
			node.attribute("placeholder"),
			Some(&AttrValue::Str("Mail address".to_owned()))
		);
	}
}
