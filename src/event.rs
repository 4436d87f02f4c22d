//! Event payloads, handlers and the binding factories of the template DSL.
//!
//! Each `on_*` function produces an [`EventBinding`] token that can be
//! interpolated into a template literal. Bindings never appear in the
//! rendered text; the element compiler lifts them into the compiled node's
//! handler table (last writer wins per event name).

use core::cell::Cell;
use core::fmt;
use std::rc::Rc;
use tracing::trace;

/// A host-delivered event, reduced to the surface template handlers touch.
///
/// Backends construct one per delivered DOM event and inspect
/// [`Event::default_prevented`] afterwards to decide whether to suppress the
/// host's default action (see
/// [***Event.preventDefault()***](https://developer.mozilla.org/en-US/docs/Web/API/Event/preventDefault)).
#[derive(Debug, Default)]
pub struct Event {
	value: Option<String>,
	key: Option<String>,
	default_prevented: Cell<bool>,
}

impl Event {
	/// An event with no payload, e.g. a plain click.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// An event carrying the current value of its target, e.g. `input`/`change`.
	#[must_use]
	pub fn with_value(value: impl Into<String>) -> Self {
		Self {
			value: Some(value.into()),
			..Self::default()
		}
	}

	/// A keyboard event carrying the pressed key's name.
	#[must_use]
	pub fn with_key(key: impl Into<String>) -> Self {
		Self {
			key: Some(key.into()),
			..Self::default()
		}
	}

	#[must_use]
	pub fn value(&self) -> Option<&str> {
		self.value.as_deref()
	}

	#[must_use]
	pub fn key(&self) -> Option<&str> {
		self.key.as_deref()
	}

	/// Marks the host's default action as suppressed.
	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	#[must_use]
	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}
}

/// A cheaply clonable event callback, shared between the compiled tree and
/// the `on` table handed to the external engine.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&Event)>);

impl Handler {
	pub fn new(f: impl Fn(&Event) + 'static) -> Self {
		Self(Rc::new(f))
	}

	pub fn invoke(&self, event: &Event) {
		(self.0)(event);
	}
}

impl fmt::Debug for Handler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Handler")
	}
}

/// One event-name-to-handler pair, tagged for interpolation into a template.
#[derive(Clone, Debug)]
pub struct EventBinding {
	pub name: &'static str,
	pub handler: Handler,
}

macro_rules! binding_factories {
	($($(#[$meta:meta])* $name:ident => $event:literal,)+) => {$(
		$(#[$meta])*
		#[must_use]
		pub fn $name(handler: impl Fn(&Event) + 'static) -> EventBinding {
			EventBinding {
				name: $event,
				handler: Handler::new(move |event| {
					trace!(event = $event, "event handler invoked");
					handler(event);
				}),
			}
		}
	)+};
}

binding_factories! {
	/// Binds a `click` handler.
	on_click => "click",
	on_mouse_over => "mouseover",
	on_mouse_out => "mouseout",
	on_mouse_down => "mousedown",
	on_mouse_up => "mouseup",
	/// Binds a `keydown` handler; the event carries [`Event::key`].
	on_key_down => "keydown",
	on_key_up => "keyup",
	on_key_press => "keypress",
	/// Binds a `change` handler; the event carries [`Event::value`].
	on_change => "change",
	/// Binds an `input` handler; the event carries [`Event::value`].
	on_input => "input",
	on_focus => "focus",
	on_blur => "blur",
	on_double_click => "dblclick",
	on_scroll => "scroll",
	on_resize => "resize",
}

/// Binds a `submit` handler.
///
/// The default form submission is always suppressed before the user handler
/// runs; this is fixed behaviour of the binding, not configurable.
#[must_use]
pub fn on_submit(handler: impl Fn(&Event) + 'static) -> EventBinding {
	EventBinding {
		name: "submit",
		handler: Handler::new(move |event| {
			event.prevent_default();
			trace!(event = "submit", "event handler invoked");
			handler(event);
		}),
	}
}
