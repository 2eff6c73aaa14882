use super::CellStorage;
use crate::traits::Cell;

/// Cell store backed by a vector, extended with zero cells on demand.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct GrowableCells<C: Cell> {
    cells: Vec<C>,
}

impl<C: Cell> GrowableCells<C> {
    #[inline]
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    #[inline]
    pub fn from_vec(cells: Vec<C>) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn into_vec(self) -> Vec<C> {
        self.cells
    }

    #[inline]
    pub fn push(&mut self, cell: C) {
        self.cells.push(cell)
    }

    /// Keep only the `len` least significant cells.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.cells.truncate(len)
    }

    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.cells, &mut other.cells)
    }
}

impl<C: Cell> CellStorage<C> for GrowableCells<C> {
    #[inline]
    fn cells(&self) -> &[C] {
        &self.cells
    }

    #[inline]
    fn cells_mut(&mut self) -> &mut [C] {
        &mut self.cells
    }

    fn reserve_cells(&mut self, len: usize) {
        if len > self.cells.len() {
            self.cells.resize(len, C::zero());
        }
    }

    fn normalize(&mut self) {
        let len = self.significant_len();
        self.cells.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_extend_test() {
        let mut store = GrowableCells::<u16>::new();
        assert_eq!(store.len(), 0);
        assert_eq!(store.get(3), 0);
        assert_eq!(store.len(), 0);

        store.set(3, 9);
        assert_eq!(store.cells(), &[0, 0, 0, 9]);
        store.reserve_cells(2);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn normalize_test() {
        let mut store = GrowableCells::<u8>::from_vec(vec![1, 2, 0, 0]);
        store.normalize();
        assert_eq!(store.cells(), &[1, 2]);

        let mut zero = GrowableCells::<u8>::from_vec(vec![0, 0]);
        zero.normalize();
        assert_eq!(zero.len(), 0);
        assert!(zero.is_zero());
    }

    #[test]
    fn carry_extends_store_test() {
        let mut store = GrowableCells::<u8>::from_vec(vec![0xFF]);
        let carry = store.add_cells(&GrowableCells::from_vec(vec![0x01]));
        assert!(carry);
        store.push(carry as u8);
        assert_eq!(store.into_vec(), vec![0x00, 0x01]);
    }

    #[test]
    fn swap_test() {
        let mut a = GrowableCells::<u32>::from_vec(vec![1]);
        let mut b = GrowableCells::<u32>::from_vec(vec![2, 3]);
        a.swap(&mut b);
        assert_eq!(a.cells(), &[2, 3]);
        assert_eq!(b.cells(), &[1]);
    }
}
