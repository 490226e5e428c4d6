//! Unit newtypes so that grid extents cannot be swapped by accident.
//!
//! Note the deliberately inverted axis convention inherited by the whole
//! crate: `Width` is the extent of the `y` axis and `Height` the extent of
//! the `x` axis. See [`crate::grid`].

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);
