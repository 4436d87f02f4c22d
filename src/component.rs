//! The component runtime: per-instance state, named transition methods and
//! the recompute-and-patch cycle.
//!
//! A component is declared once as a [`ComponentSpec`] (template + named
//! transitions + initial state) and instantiated per mount. State only ever
//! changes by whole-value replacement: a transition takes the state by value
//! and returns its successor, so in-place mutation of a shared state is
//! ruled out by ownership rather than by convention.
//!
//! There is no module-level mount registry. [`mount`] returns the
//! [`Component`], which owns its backend binding and live handle; every
//! later dispatch is threaded through that instance.

use crate::element::CompiledNode;
use crate::error::Error;
use crate::event::Event;
use crate::vdom::{Backend, VNode};
use core::cell::RefCell;
use core::fmt;
use hashbrown::HashMap;
use std::rc::{Rc, Weak};
use tracing::{debug, error, info, instrument, trace};

/// One positional argument of a dispatched transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
	Str(String),
	Int(i64),
	Float(f64),
	Bool(bool),
}

impl From<&str> for Arg {
	fn from(value: &str) -> Self {
		Arg::Str(value.to_owned())
	}
}

impl From<String> for Arg {
	fn from(value: String) -> Self {
		Arg::Str(value)
	}
}

impl From<i64> for Arg {
	fn from(value: i64) -> Self {
		Arg::Int(value)
	}
}

impl From<i32> for Arg {
	fn from(value: i32) -> Self {
		Arg::Int(value.into())
	}
}

impl From<f64> for Arg {
	fn from(value: f64) -> Self {
		Arg::Float(value)
	}
}

impl From<bool> for Arg {
	fn from(value: bool) -> Self {
		Arg::Bool(value)
	}
}

/// The ordered argument list of one dispatch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Arg>);

impl Args {
	#[must_use]
	pub fn new(args: Vec<Arg>) -> Self {
		Self(args)
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<&Arg> {
		self.0.get(index)
	}

	/// The argument at `index`, if it is a string.
	#[must_use]
	pub fn str(&self, index: usize) -> Option<&str> {
		match self.0.get(index) {
			Some(Arg::Str(value)) => Some(value),
			_ => None,
		}
	}

	/// The argument at `index`, if it is an integer.
	#[must_use]
	pub fn int(&self, index: usize) -> Option<i64> {
		match self.0.get(index) {
			Some(Arg::Int(value)) => Some(*value),
			_ => None,
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Builds an [`Args`] list: `args![]`, `args!["buy milk"]`, `args![3, true]`.
#[macro_export]
macro_rules! args {
	($($arg:expr),* $(,)?) => {
		$crate::component::Args::new(::std::vec![$($crate::component::Arg::from($arg)),*])
	};
}

type TemplateFn<S> = Box<dyn Fn(&S, &Dispatcher<S>) -> CompiledNode>;
type TransitionFn<S> = Box<dyn Fn(S, &Args) -> S>;

/// The declaration of a component: template, named transitions, initial
/// state.
pub struct ComponentSpec<S> {
	template: TemplateFn<S>,
	methods: HashMap<&'static str, TransitionFn<S>>,
	initial_state: S,
}

impl<S: fmt::Debug> fmt::Debug for ComponentSpec<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentSpec")
			.field("methods", &self.methods.keys().collect::<Vec<_>>())
			.field("initial_state", &self.initial_state)
			.finish()
	}
}

impl<S: Clone + fmt::Debug + 'static> ComponentSpec<S> {
	/// Declares a component with its initial state and template.
	///
	/// The template is a pure view of the state; it runs on every render and
	/// must not dispatch synchronously while it runs.
	pub fn new(initial_state: S, template: impl Fn(&S, &Dispatcher<S>) -> CompiledNode + 'static) -> Self {
		Self {
			template: Box::new(template),
			methods: HashMap::new(),
			initial_state,
		}
	}

	/// Declares a named transition.
	///
	/// Transitions take the state by value and return its replacement; they
	/// must not have observable side effects, so dispatching one twice from
	/// the same state yields the same result.
	#[must_use]
	pub fn method(mut self, name: &'static str, transition: impl Fn(S, &Args) -> S + 'static) -> Self {
		self.methods.insert(name, Box::new(transition));
		self
	}

	/// Finishes the declaration.
	#[must_use]
	pub fn build(self) -> ComponentFactory<S> {
		ComponentFactory { spec: Rc::new(self) }
	}
}

/// A reusable component declaration; each call produces an independent
/// instance with its own state.
#[derive(Debug)]
pub struct ComponentFactory<S> {
	spec: Rc<ComponentSpec<S>>,
}

impl<S> Clone for ComponentFactory<S> {
	fn clone(&self) -> Self {
		Self {
			spec: Rc::clone(&self.spec),
		}
	}
}

impl<S: Clone + fmt::Debug + 'static> ComponentFactory<S> {
	/// Instantiates with the declared initial state and performs the first
	/// render.
	#[must_use]
	pub fn instantiate(&self) -> Component<S> {
		self.instantiate_with(|state| state)
	}

	/// Instantiates with initial props merged over the declared state, then
	/// performs the first render.
	#[must_use]
	pub fn instantiate_with(&self, props: impl FnOnce(S) -> S) -> Component<S> {
		let spec = Rc::clone(&self.spec);
		let state = props(spec.initial_state.clone());
		let inner = Rc::new_cyclic(|weak: &Weak<RefCell<Inner<S>>>| {
			let dispatcher = Dispatcher {
				inner: Weak::clone(weak),
			};
			let tree = (spec.template)(&state, &dispatcher);
			RefCell::new(Inner {
				spec: Rc::clone(&spec),
				state,
				tree,
				sink: None,
			})
		});
		Component { inner }
	}
}

struct Inner<S> {
	spec: Rc<ComponentSpec<S>>,
	state: S,
	tree: CompiledNode,
	// `None` until `mount` binds a backend; dispatches report `NotMounted`
	// instead of silently dropping the re-render.
	sink: Option<Box<dyn PatchSink>>,
}

/// A live component instance.
///
/// Cheap to clone (shared ownership); the clone dispatches against the same
/// state and mount binding.
pub struct Component<S> {
	inner: Rc<RefCell<Inner<S>>>,
}

impl<S> Clone for Component<S> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<S: fmt::Debug> fmt::Debug for Component<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("Component")
			.field("state", &inner.state)
			.field("mounted", &inner.sink.is_some())
			.finish()
	}
}

impl<S: Clone + fmt::Debug + 'static> Component<S> {
	/// A snapshot of the current state.
	#[must_use]
	pub fn state(&self) -> S {
		self.inner.borrow().state.clone()
	}

	/// Runs `f` against the current compiled tree.
	pub fn with_tree<R>(&self, f: impl FnOnce(&CompiledNode) -> R) -> R {
		f(&self.inner.borrow().tree)
	}

	#[must_use]
	pub fn is_mounted(&self) -> bool {
		self.inner.borrow().sink.is_some()
	}

	/// A handle for dispatching transitions from event handlers.
	#[must_use]
	pub fn dispatcher(&self) -> Dispatcher<S> {
		Dispatcher {
			inner: Rc::downgrade(&self.inner),
		}
	}

	/// Dispatches the named transition and patches the mounted tree.
	///
	/// State and tree are only replaced after the new tree has been computed
	/// and the backend patch succeeded; on any error the previous state
	/// stays in place.
	pub fn dispatch(&self, method: &str, args: &Args) -> Result<(), Error> {
		dispatch_on(&self.inner, method, args)
	}

	/// Recomputes the tree from the current state and patches, without a
	/// transition.
	pub fn refresh(&self) -> Result<(), Error> {
		let (spec, state) = {
			let inner = self.inner.borrow();
			(Rc::clone(&inner.spec), inner.state.clone())
		};
		let dispatcher = self.dispatcher();
		let tree = (spec.template)(&state, &dispatcher);
		commit(&self.inner, None, tree)
	}
}

/// Dispatches transitions into a component without keeping it alive.
///
/// Holds a weak reference; compiled trees hold handler closures that hold
/// dispatchers, and a strong reference here would cycle.
pub struct Dispatcher<S> {
	inner: Weak<RefCell<Inner<S>>>,
}

impl<S> Clone for Dispatcher<S> {
	fn clone(&self) -> Self {
		Self {
			inner: Weak::clone(&self.inner),
		}
	}
}

impl<S> fmt::Debug for Dispatcher<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Dispatcher")
	}
}

impl<S: Clone + fmt::Debug + 'static> Dispatcher<S> {
	/// Dispatches the named transition; see [`Component::dispatch`].
	pub fn call(&self, method: &str, args: &Args) -> Result<(), Error> {
		let inner = self.inner.upgrade().ok_or(Error::Detached)?;
		dispatch_on(&inner, method, args)
	}

	/// Adapts a no-argument dispatch into an event handler.
	///
	/// Host event dispatch has no error channel, so failures are logged and
	/// swallowed here.
	#[must_use]
	pub fn bind(&self, method: &'static str) -> impl Fn(&Event) + 'static {
		let dispatcher = self.clone();
		move |_event: &Event| {
			if let Err(cause) = dispatcher.call(method, &Args::default()) {
				error!(method, %cause, "dispatch from event handler failed");
			}
		}
	}

	/// Adapts a dispatch into an event handler, deriving the arguments from
	/// the event.
	#[must_use]
	pub fn bind_with(&self, method: &'static str, to_args: impl Fn(&Event) -> Args + 'static) -> impl Fn(&Event) + 'static {
		let dispatcher = self.clone();
		move |event: &Event| {
			if let Err(cause) = dispatcher.call(method, &to_args(event)) {
				error!(method, %cause, "dispatch from event handler failed");
			}
		}
	}
}

// User code (transition, template) runs with no interior borrow held, so a
// handler that dispatches again re-enters cleanly; commits stay serial and
// each patch applies against the latest retained handle.
fn dispatch_on<S: Clone + fmt::Debug + 'static>(inner: &Rc<RefCell<Inner<S>>>, method: &str, args: &Args) -> Result<(), Error> {
	let (spec, state) = {
		let guard = inner.borrow();
		(Rc::clone(&guard.spec), guard.state.clone())
	};
	let transition = spec
		.methods
		.get(method)
		.ok_or_else(|| Error::UnknownMethod(method.to_owned()))?;

	debug!(method, ?args, "dispatching transition");
	let new_state = transition(state, args);
	trace!(state = ?new_state, "transition produced new state");

	let dispatcher = Dispatcher {
		inner: Rc::downgrade(inner),
	};
	let new_tree = (spec.template)(&new_state, &dispatcher);
	commit(inner, Some(new_state), new_tree)
}

fn commit<S>(inner: &Rc<RefCell<Inner<S>>>, new_state: Option<S>, new_tree: CompiledNode) -> Result<(), Error> {
	let mut guard = inner.borrow_mut();
	let sink = guard.sink.as_mut().ok_or(Error::NotMounted)?;
	sink.apply(&new_tree)?;
	if let Some(state) = new_state {
		guard.state = state;
	}
	guard.tree = new_tree;
	Ok(())
}

trait PatchSink {
	fn apply(&mut self, tree: &CompiledNode) -> Result<(), Error>;
}

struct BackendSink<B: Backend> {
	backend: B,
	// `None` transiently while a patch is in flight, and permanently after a
	// failed patch consumed the handle.
	handle: Option<B::Handle>,
}

impl<B: Backend> PatchSink for BackendSink<B> {
	fn apply(&mut self, tree: &CompiledNode) -> Result<(), Error> {
		let previous = self.handle.take().ok_or(Error::NotMounted)?;
		let next = self.backend.patch(previous, VNode::from(tree.clone()))?;
		self.handle = Some(next);
		Ok(())
	}
}

/// Instantiates the component, materialises its first tree in the container
/// matched by `selector`, and binds the instance to the backend so later
/// dispatches patch against the retained handle.
///
/// A missing container surfaces as [`Error::ContainerNotFound`] from the
/// backend; a template panic during the first render propagates to the
/// caller.
#[instrument(skip(factory, backend))]
pub fn mount<S, B>(selector: &str, factory: &ComponentFactory<S>, backend: B) -> Result<Component<S>, Error>
where
	S: Clone + fmt::Debug + 'static,
	B: Backend + 'static,
{
	let component = factory.instantiate();
	let vnode = component.with_tree(|tree| VNode::from(tree.clone()));
	let mut backend = backend;
	let handle = backend.mount(selector, vnode)?;
	component.inner.borrow_mut().sink = Some(Box::new(BackendSink {
		backend,
		handle: Some(handle),
	}));
	info!(selector, "component mounted");
	Ok(component)
}
