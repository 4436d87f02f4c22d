//! The element compiler: per-tag factories turning template input into
//! [`CompiledNode`]s.
//!
//! One factory exists per supported tag name; the set is a data-driven list,
//! not a type hierarchy. Every call runs the same pipeline: stitch the
//! template (if tagged), extract attributes from the stitched text, then
//! assemble the children in source order.

use crate::attr;
use crate::event::Handler;
use crate::template::{assemble_children, stitch, Template};
use hashbrown::HashMap;

/// A typed attribute value.
///
/// Integer values only arise from the coercion rules in [`crate::attr`];
/// boolean values only from bare flag tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
	Str(String),
	Int(i64),
	Bool(bool),
}

/// One child of a compiled node, in render order.
#[derive(Debug, Clone)]
pub enum Child {
	Text(String),
	Element(CompiledNode),
}

/// The structured form of one compiled element, ready for conversion into
/// the external engine's virtual-node shape (see [`crate::vdom`]).
///
/// Attribute keys are unique and unordered; children keep literal order.
/// Each tree is recomputed whole on every render and owned by its parent.
#[derive(Debug, Clone)]
pub struct CompiledNode {
	pub tag: &'static str,
	pub attributes: HashMap<String, AttrValue>,
	pub event_bindings: HashMap<&'static str, Handler>,
	pub children: Vec<Child>,
}

impl CompiledNode {
	#[must_use]
	pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
		self.attributes.get(name)
	}

	#[must_use]
	pub fn handler(&self, event: &str) -> Option<&Handler> {
		self.event_bindings.get(event)
	}

	/// The concatenated text of all direct text children.
	#[must_use]
	pub fn text(&self) -> String {
		let mut text = String::new();
		for child in &self.children {
			if let Child::Text(fragment) = child {
				text.push_str(fragment);
			}
		}
		text
	}
}

/// Compiles template input into nodes for one fixed tag name.
#[derive(Debug, Clone, Copy)]
pub struct ElementFactory {
	tag: &'static str,
}

impl ElementFactory {
	#[must_use]
	pub const fn new(tag: &'static str) -> Self {
		Self { tag }
	}

	#[must_use]
	pub const fn tag(&self) -> &'static str {
		self.tag
	}

	/// Compiles one template invocation.
	///
	/// Plain strings skip the stitcher and go straight to attribute
	/// extraction. The output is independent of any previous call; nothing
	/// is cached.
	#[must_use]
	pub fn compile(&self, template: impl Into<Template>) -> CompiledNode {
		match template.into() {
			Template::Plain(text) => {
				let extracted = attr::extract(&text);
				CompiledNode {
					tag: self.tag,
					attributes: extracted.attributes,
					event_bindings: HashMap::new(),
					children: assemble_children(&extracted.residual, Vec::new()),
				}
			}
			Template::Tagged { strings, values } => {
				let stitched = stitch(strings, values);
				let extracted = attr::extract(&stitched.raw_text);
				let children = assemble_children(&extracted.residual, stitched.nested);
				CompiledNode {
					tag: self.tag,
					attributes: extracted.attributes,
					event_bindings: stitched.event_bindings,
					children,
				}
			}
		}
	}
}

macro_rules! tag_factories {
	($($name:ident => $tag:literal,)+) => {$(
		#[must_use]
		pub fn $name(template: impl Into<Template>) -> CompiledNode {
			ElementFactory::new($tag).compile(template)
		}
	)+};
}

// Block and form basics.
tag_factories! {
	div => "div",
	p => "p",
	span => "span",
	button => "button",
	input => "input",
}

// Headings.
tag_factories! {
	h1 => "h1",
	h2 => "h2",
	h3 => "h3",
	h4 => "h4",
	h5 => "h5",
	h6 => "h6",
}

// Text-level elements.
tag_factories! {
	a => "a",
	strong => "strong",
	em => "em",
	small => "small",
	code => "code",
	pre => "pre",
}

// Lists.
tag_factories! {
	ul => "ul",
	ol => "ol",
	li => "li",
}

// Forms.
tag_factories! {
	form => "form",
	label => "label",
	textarea => "textarea",
	select => "select",
	option => "option",
}

// Media.
tag_factories! {
	img => "img",
	video => "video",
	audio => "audio",
}

// Layout.
tag_factories! {
	header => "header",
	footer => "footer",
	nav => "nav",
	section => "section",
	article => "article",
	aside => "aside",
	main => "main",
}

// Tables.
tag_factories! {
	table => "table",
	thead => "thead",
	tbody => "tbody",
	tr => "tr",
	th => "th",
	td => "td",
}
