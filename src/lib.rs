#![doc(html_root_url = "https://docs.rs/cambium/0.1.0")]
#![warn(clippy::pedantic)]

//! A tagged-template DSL and component runtime for virtual DOM renderers.
//!
//! Templates are written as literal text with interpolated values — event
//! bindings, nested elements, anything printable — and compile into
//! structured [`element::CompiledNode`] trees. A minimal component runtime
//! holds per-instance state, dispatches named transition methods and
//! re-renders against a previously mounted tree through an external
//! diff/patch engine (the [`vdom::Backend`] seam). The engine itself, like
//! the host DOM, is a collaborator of this crate, never part of it.
//!
//! ```
//! use cambium::prelude::*;
//!
//! let counter = ComponentSpec::new(0_i64, |count: &i64, methods: &Dispatcher<i64>| {
//! 	div(tpl!(
//! 		{p(tpl!("count: " {*count}))}
//! 		{button(tpl!({on_click(methods.bind("increment"))} "+1"))}
//! 	))
//! })
//! .method("increment", |count: i64, _args: &Args| count + 1)
//! .build();
//!
//! let instance = counter.instantiate();
//! assert_eq!(instance.state(), 0);
//! ```

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod attr;
pub mod component;
pub mod element;
mod error;
pub mod event;
pub mod prefab;
pub mod template;
pub mod vdom;

pub use error::Error;

/// Single-import surface for authoring templates and components.
pub mod prelude {
	pub use crate::component::{mount, Arg, Args, Component, ComponentFactory, ComponentSpec, Dispatcher};
	pub use crate::element::*;
	pub use crate::error::Error;
	pub use crate::event::*;
	pub use crate::template::{render_list, when, IntoValue, Template, Value};
	pub use crate::vdom::{Backend, VChild, VChildren, VNode, VProps};
	pub use crate::{args, tpl};
}
