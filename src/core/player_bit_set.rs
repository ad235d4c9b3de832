/// Set of player seats, one bit per seat.
///
/// A deck can't deal more than 23 two card hands plus a board, so 32 bits
/// covers every table a view accepts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayerBitSet {
    set: u32,
}

impl PlayerBitSet {
    pub fn count(&self) -> usize {
        self.set.count_ones() as usize
    }
    pub fn enable(&mut self, idx: usize) {
        self.set |= 1 << idx;
    }
    pub fn get(&self, idx: usize) -> bool {
        (self.set & (1 << idx)) != 0
    }
    pub fn ones(self) -> ActivePlayerBitSetIter {
        ActivePlayerBitSetIter { set: self.set }
    }
}

pub struct ActivePlayerBitSetIter {
    set: u32,
}

impl Iterator for ActivePlayerBitSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.set == 0 {
            None
        } else {
            // Find the index of the first non-zero
            let idx = self.set.trailing_zeros() as usize;
            // Then set the first non-zero to zero
            self.set &= !(1 << idx);
            // Then emit the next one
            Some(idx)
        }
    }
}
