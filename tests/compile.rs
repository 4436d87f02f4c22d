//! Compilation of template literals into compiled nodes, across the whole
//! pipeline: stitching, attribute extraction, child assembly, conversion.

use cambium::prelude::*;
use core::cell::RefCell;
use std::rc::Rc;

#[test]
fn plain_string_round_trip() {
	let node = div("hello");
	assert_eq!(node.tag, "div");
	assert!(node.attributes.is_empty());
	assert!(node.event_bindings.is_empty());
	match node.children.as_slice() {
		[Child::Text(text)] => assert_eq!(text, "hello"),
		other => panic!("unexpected children: {:?}", other),
	}
}

#[test]
fn attributes_are_separated_from_visible_text() {
	let node = textarea(tpl!(r#"rows="4" placeholder="Message""# "Tell us everything"));
	assert_eq!(node.attribute("rows"), Some(&AttrValue::Int(4)));
	assert_eq!(
		node.attribute("placeholder"),
		Some(&AttrValue::Str("Message".to_owned()))
	);
	assert_eq!(node.text().trim(), "Tell us everything");
}

#[test]
fn non_numeric_size_attribute_keeps_its_raw_string() {
	let node = textarea(tpl!(r#"rows="abc""#));
	assert_eq!(node.attribute("rows"), Some(&AttrValue::Str("abc".to_owned())));
}

#[test]
fn boolean_flags_compile_to_true() {
	let node = input(r#"type="checkbox" checked disabled"#);
	assert_eq!(node.attribute("checked"), Some(&AttrValue::Bool(true)));
	assert_eq!(node.attribute("disabled"), Some(&AttrValue::Bool(true)));
	assert!(node.children.is_empty());
}

#[test]
fn text_and_nested_nodes_interleave_in_source_order() {
	let node = div(tpl!("a" {p("inner")} "b"));
	match node.children.as_slice() {
		[Child::Text(before), Child::Element(inner), Child::Text(after)] => {
			assert_eq!(before, "a");
			assert_eq!(inner.tag, "p");
			assert_eq!(inner.text(), "inner");
			assert_eq!(after, "b");
		}
		other => panic!("unexpected children: {:?}", other),
	}
}

#[test]
fn nesting_recurses() {
	let node = div(tpl!({ul(tpl!({li("one")} {li("two")}))}));
	match node.children.as_slice() {
		[Child::Element(list)] => {
			assert_eq!(list.tag, "ul");
			assert_eq!(list.children.len(), 2);
		}
		other => panic!("unexpected children: {:?}", other),
	}
}

#[test]
fn a_form_compiles_with_attributes_bindings_and_children() {
	let submitted = Rc::new(RefCell::new(Vec::new()));
	let node = form(tpl!(
		{on_submit({
			let submitted = Rc::clone(&submitted);
			move |event: &Event| submitted.borrow_mut().push(event.default_prevented())
		})}
		{label(r#"for="name-input" Name:"#)}
		{input(r#"type="text" id="name-input" placeholder="Your name" required"#)}
		{button(tpl!("Send"))}
	));

	assert_eq!(node.tag, "form");
	assert_eq!(node.children.len(), 3);
	assert!(node.attributes.is_empty());

	let handler = node.handler("submit").expect("form has a submit handler").clone();
	let event = Event::new();
	handler.invoke(&event);
	// The submit binding suppresses the default before the user handler runs.
	assert!(event.default_prevented());
	assert_eq!(*submitted.borrow(), vec![true]);

	match &node.children[1] {
		Child::Element(field) => {
			assert_eq!(field.tag, "input");
			assert_eq!(field.attribute("required"), Some(&AttrValue::Bool(true)));
			assert_eq!(field.attribute("id"), Some(&AttrValue::Str("name-input".to_owned())));
		}
		Child::Text(text) => panic!("expected the input element, got {:?}", text),
	}
}

#[test]
fn bindings_are_erased_from_text_and_surface_in_the_vnode_on_table() {
	let node = button(tpl!({on_click(|_| ())} "Press"));
	assert_eq!(node.text(), "Press");

	let vnode = VNode::from(node);
	assert!(vnode.props.on.contains_key("click"));
	assert!(vnode.props.attrs.is_empty());
	match vnode.children {
		VChildren::Text(text) => assert_eq!(text, "Press"),
		VChildren::Nodes(nodes) => panic!("expected a single string, got {:?}", nodes),
	}
}

#[test]
fn interpolated_values_stringify() {
	let count = 3;
	let ratio = 0.5_f64;
	let node = p(tpl!("count " {count} ", ratio " {ratio} ", flag " {true}));
	assert_eq!(node.text(), "count 3, ratio 0.5, flag true");
}

#[test]
fn compiled_output_is_referentially_independent() {
	let make = || div(tpl!("n: " {1}));
	let first = make();
	let second = make();
	assert_eq!(first.text(), second.text());
	assert_eq!(first.children.len(), second.children.len());
}

#[test]
fn prefab_constructors_mirror_the_literal_surface() {
	let via_prefab = cambium::prefab::input("email", "Mail");
	let via_literal = input(r#"type="email" placeholder="Mail""#);
	assert_eq!(via_prefab.attribute("type"), via_literal.attribute("type"));
	assert_eq!(via_prefab.attribute("placeholder"), via_literal.attribute("placeholder"));
}
