// Shorthand for return Err(StaveError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(StaveError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(StaveError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::StaveError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::StaveError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

pub(crate) use err;
