use source_span::Span;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

/**
 * Wrap a value to give it a source location.
 *
 * The span is lexical metadata only: comparing or hashing two located values
 * only looks at the wrapped values, so a freshly built AST compares equal to
 * the same AST parsed back from text.
 */
pub struct Located<T> {
	t: T,
	span: Span
}

impl<T> Located<T> {
	pub fn new(t: T, span: Span) -> Located<T> {
		Located {
			t: t,
			span: span
		}
	}

	pub fn span(&self) -> Span {
		self.span
	}

	pub fn into_inner(self) -> T {
		self.t
	}
}

impl<T> From<T> for Located<T> {
	fn from(t: T) -> Located<T> {
		Located::new(t, Span::default())
	}
}

impl<T> Deref for Located<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.t
	}
}

impl<T> DerefMut for Located<T> {
	fn deref_mut(&mut self) -> &mut T {
		&mut self.t
	}
}

impl<T> AsRef<T> for Located<T> {
	fn as_ref(&self) -> &T {
		&self.t
	}
}

impl<T> AsMut<T> for Located<T> {
	fn as_mut(&mut self) -> &mut T {
		&mut self.t
	}
}

impl<T: PartialEq> PartialEq for Located<T> {
	fn eq(&self, other: &Located<T>) -> bool {
		self.t == other.t
	}
}

impl<T: Eq> Eq for Located<T> {}

impl<T: PartialEq> PartialEq<T> for Located<T> {
	fn eq(&self, other: &T) -> bool {
		self.t == *other
	}
}

impl<T: Hash> Hash for Located<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.t.hash(state)
	}
}

impl<T: Clone> Clone for Located<T> {
	fn clone(&self) -> Self {
		Located {
			t: self.t.clone(),
			span: self.span
		}
	}
}

impl<T: fmt::Display> fmt::Display for Located<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.t.fmt(f)
	}
}

impl<T: fmt::Debug> fmt::Debug for Located<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.t.fmt(f)
	}
}
