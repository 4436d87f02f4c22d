use thiserror::Error;

/// Failures reported by the mount and dispatch paths.
///
/// Parse ambiguities and integer-coercion fallbacks are deliberately *not*
/// errors; see [`crate::attr::extract`].
#[derive(Debug, Error)]
pub enum Error {
	/// No container matched the selector handed to [`crate::component::mount`].
	#[error("container `{0}` not found")]
	ContainerNotFound(String),

	/// A transition was dispatched before the instance was bound to a backend.
	///
	/// State is left untouched when this is returned.
	#[error("component has not been mounted yet")]
	NotMounted,

	/// A transition was dispatched under a name the component never declared.
	#[error("unknown transition method `{0}`")]
	UnknownMethod(String),

	/// A [`crate::component::Dispatcher`] outlived its component instance.
	#[error("component instance no longer exists")]
	Detached,

	/// The external engine failed to materialise or patch the tree.
	#[error("backend failure: {0}")]
	Backend(#[source] Box<dyn std::error::Error + 'static>),
}

impl Error {
	/// Wraps an engine-side error for propagation through [`crate::vdom::Backend`].
	pub fn backend(error: impl std::error::Error + 'static) -> Self {
		Error::Backend(Box::new(error))
	}
}
