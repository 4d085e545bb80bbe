//! Mutable two-dimensional element access that is bounds-checked in debug mode and unchecked in release
//! mode. These are internal APIs: every caller walks index ranges derived from a shape it has
//! already validated, so out-of-bounds indices are a bug in this crate, not in user input.

use ndarray::{ArrayBase, DataMut, Ix2};

pub(crate) trait UncheckedIndexMut {
    type Elem;
    unsafe fn atm(&mut self, i: usize, j: usize) -> &mut Self::Elem;
}

impl<A, S: DataMut<Elem = A>> UncheckedIndexMut for ArrayBase<S, Ix2> {
    type Elem = A;

    unsafe fn atm(&mut self, i: usize, j: usize) -> &mut Self::Elem {
        #[cfg(debug_assertions)]
        {
            self.get_mut((i, j)).unwrap()
        }
        #[cfg(not(debug_assertions))]
        self.uget_mut((i, j))
    }
}
