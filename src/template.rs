//! Template input, interpolation stitching and child assembly.
//!
//! A tagged template is an alternating sequence of literal text segments and
//! interpolated values. The stitcher walks both in template order, folding
//! event bindings into a handler table, remembering nested nodes behind
//! positional placeholders, and stringifying everything else into one text
//! buffer. After attribute extraction the buffer is split back apart on the
//! placeholders, which recovers the original text/node interleaving exactly
//! once, in source order.

use crate::element::{Child, CompiledNode};
use crate::event::{EventBinding, Handler};
use hashbrown::HashMap;

/// One interpolated template value.
///
/// This is the typed rendering of what a tagged template literal may
/// interpolate: an event binding, a nested compiled element, or anything
/// printable.
#[derive(Debug, Clone)]
pub enum Value {
	Event(EventBinding),
	Element(CompiledNode),
	Text(String),
}

/// Conversion into a template [`Value`].
///
/// Implemented for bindings, compiled nodes, strings and the printable
/// primitives, so interpolations stay free of constructor noise.
pub trait IntoValue {
	fn into_value(self) -> Value;
}

impl IntoValue for Value {
	fn into_value(self) -> Value {
		self
	}
}

impl IntoValue for EventBinding {
	fn into_value(self) -> Value {
		Value::Event(self)
	}
}

impl IntoValue for CompiledNode {
	fn into_value(self) -> Value {
		Value::Element(self)
	}
}

impl IntoValue for String {
	fn into_value(self) -> Value {
		Value::Text(self)
	}
}

impl IntoValue for &str {
	fn into_value(self) -> Value {
		Value::Text(self.to_owned())
	}
}

/// `None` interpolates as nothing, which keeps conditional fragments terse.
impl<T: IntoValue> IntoValue for Option<T> {
	fn into_value(self) -> Value {
		match self {
			Some(value) => value.into_value(),
			None => Value::Text(String::new()),
		}
	}
}

macro_rules! printable_values {
	($($ty:ty),+) => {$(
		impl IntoValue for $ty {
			fn into_value(self) -> Value {
				Value::Text(self.to_string())
			}
		}
	)+};
}

printable_values!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Interpolates `value` when `condition` holds, nothing otherwise.
#[must_use]
pub fn when(condition: bool, value: impl IntoValue) -> Value {
	if condition {
		value.into_value()
	} else {
		Value::Text(String::new())
	}
}

/// Renders every item to text and concatenates the results, in order.
#[must_use]
pub fn render_list<T, R: core::fmt::Display>(items: &[T], render: impl Fn(&T) -> R) -> Value {
	let mut text = String::new();
	for item in items {
		text.push_str(&render(item).to_string());
	}
	Value::Text(text)
}

/// The input of one element-factory invocation: a tagged template or a
/// single plain string.
#[derive(Debug, Clone)]
pub enum Template {
	/// `strings` and `values` interleave in source order;
	/// `strings.len() == values.len() + 1` when built by [`tpl!`](crate::tpl).
	Tagged { strings: Vec<String>, values: Vec<Value> },
	Plain(String),
}

impl From<&str> for Template {
	fn from(text: &str) -> Self {
		Template::Plain(text.to_owned())
	}
}

impl From<String> for Template {
	fn from(text: String) -> Self {
		Template::Plain(text)
	}
}

/// Builds a [`Template::Tagged`] from literal segments and `{…}`
/// interpolations, mirroring a tagged template literal.
///
/// ```
/// use cambium::prelude::*;
///
/// let name = "world";
/// let node = p(tpl!("hello, " {name} "!"));
/// assert_eq!(node.text(), "hello, world!");
/// ```
#[macro_export]
macro_rules! tpl {
	($($piece:tt)*) => {{
		let mut strings: ::std::vec::Vec<::std::string::String> = ::std::vec![::std::string::String::new()];
		let mut values: ::std::vec::Vec<$crate::template::Value> = ::std::vec::Vec::new();
		$crate::__tpl_pieces!(strings, values, $($piece)*);
		$crate::template::Template::Tagged { strings, values }
	}};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tpl_pieces {
	($strings:ident, $values:ident,) => {};
	($strings:ident, $values:ident, $segment:literal $($rest:tt)*) => {
		$strings
			.last_mut()
			.expect("segment buffer is never empty")
			.push_str($segment);
		$crate::__tpl_pieces!($strings, $values, $($rest)*);
	};
	// A block fragment, so interpolations may carry setup statements,
	// e.g. cloning a dispatcher into a handler closure.
	($strings:ident, $values:ident, $value:block $($rest:tt)*) => {
		$values.push($crate::template::IntoValue::into_value($value));
		$strings.push(::std::string::String::new());
		$crate::__tpl_pieces!($strings, $values, $($rest)*);
	};
}

/// The stitcher's output: one flat text buffer (with placeholders standing
/// in for nested nodes), the merged handler table, and the nested nodes
/// keyed by interpolation index.
#[derive(Debug, Clone)]
pub struct Stitched {
	pub raw_text: String,
	pub event_bindings: HashMap<&'static str, Handler>,
	pub nested: Vec<(usize, CompiledNode)>,
}

// SUB control characters keep the marker out of ordinary template text.
fn placeholder(index: usize) -> String {
	format!("\u{1A}{}\u{1A}", index)
}

/// Walks literal segments and interleaved values in template order.
///
/// Event bindings merge into the handler table, later bindings for the same
/// event name overwriting earlier ones. Nested nodes leave a positional
/// placeholder in the text buffer and are remembered by interpolation index.
/// Every other value is stringified into the buffer directly.
#[must_use]
pub fn stitch(strings: Vec<String>, values: Vec<Value>) -> Stitched {
	let mut raw_text = String::new();
	let mut event_bindings = HashMap::new();
	let mut nested = Vec::new();

	let mut values = values.into_iter();
	for (index, segment) in strings.into_iter().enumerate() {
		raw_text.push_str(&segment);
		match values.next() {
			Some(Value::Event(binding)) => {
				// Last writer wins, not additive.
				event_bindings.insert(binding.name, binding.handler);
			}
			Some(Value::Element(node)) => {
				raw_text.push_str(&placeholder(index));
				nested.push((index, node));
			}
			Some(Value::Text(text)) => raw_text.push_str(&text),
			None => {}
		}
	}

	Stitched {
		raw_text,
		event_bindings,
		nested,
	}
}

/// Splits the attribute-stripped residual text on each placeholder in
/// interpolation order.
///
/// Empty fragments between and around nested children are dropped. With no
/// nested children, non-empty trimmed text becomes a single text child.
pub(crate) fn assemble_children(residual: &str, nested: Vec<(usize, CompiledNode)>) -> Vec<Child> {
	if nested.is_empty() {
		let trimmed = residual.trim();
		if trimmed.is_empty() {
			return Vec::new();
		}
		return vec![Child::Text(trimmed.to_owned())];
	}

	let mut children = Vec::new();
	let mut rest = residual;
	for (index, node) in nested {
		let marker = placeholder(index);
		if let Some(position) = rest.find(&marker) {
			let before = &rest[..position];
			if !before.is_empty() {
				children.push(Child::Text(before.to_owned()));
			}
			children.push(Child::Element(node));
			rest = &rest[position + marker.len()..];
		} else {
			// The marker was consumed by attribute stripping; keep the node,
			// order is still source order.
			children.push(Child::Element(node));
		}
	}
	if !rest.is_empty() {
		children.push(Child::Text(rest.to_owned()));
	}
	children
}
