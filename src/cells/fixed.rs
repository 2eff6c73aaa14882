use super::CellStorage;
use crate::traits::Cell;

/// Cell store with a capacity fixed at compile time.
///
/// Used for scratch values of a known width, such as the two-cell window read by
/// `BigInteger::value_at`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FixedCells<C: Cell, const N: usize> {
    cells: [C; N],
}

impl<C: Cell, const N: usize> FixedCells<C, N> {
    /// A store with all cells zero.
    #[inline]
    pub fn new() -> Self {
        Self {
            cells: [C::zero(); N],
        }
    }

    #[inline]
    pub fn from_cells(cells: [C; N]) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn into_cells(self) -> [C; N] {
        self.cells
    }

    #[inline]
    pub const fn capacity() -> usize {
        N
    }
}

impl<C: Cell, const N: usize> Default for FixedCells<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cell, const N: usize> CellStorage<C> for FixedCells<C, N> {
    #[inline]
    fn cells(&self) -> &[C] {
        &self.cells
    }

    #[inline]
    fn cells_mut(&mut self) -> &mut [C] {
        &mut self.cells
    }

    fn reserve_cells(&mut self, len: usize) {
        assert!(
            len <= N,
            "fixed cell store of {} cells cannot address {} cells",
            N,
            len
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_test() {
        let mut store = FixedCells::<u32, 3>::new();
        assert_eq!(FixedCells::<u32, 3>::capacity(), 3);
        assert_eq!(store.len(), 3);
        assert!(store.is_zero());

        store.set(2, 7);
        assert_eq!(store.get(2), 7);
        assert_eq!(store.get(5), 0);
        assert_eq!(store.significant_len(), 3);
        assert_eq!(store.into_cells(), [0, 0, 7]);
    }

    #[test]
    fn normalize_is_noop_test() {
        let mut store = FixedCells::<u8, 4>::from_cells([1, 0, 0, 0]);
        store.normalize();
        assert_eq!(store.len(), 4);
        assert_eq!(store.significant_len(), 1);
    }

    #[test]
    #[should_panic]
    fn add_past_capacity_test() {
        let mut store = FixedCells::<u8, 1>::new();
        store.add_cells(&FixedCells::<u8, 2>::from_cells([0, 1]));
    }
}
