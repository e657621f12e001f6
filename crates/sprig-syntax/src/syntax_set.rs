use crate::SyntaxKind;

const SIZE: usize = SyntaxKind::COUNT.div_ceil(u64::BITS as usize);

/// Bitset of kinds, usable in `const` context for first/recovery sets.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxSet {
    bits: [u64; SIZE],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SIZE] };
    const BITS_PER_SLOT: u16 = u64::BITS as u16;

    const fn slot(kind: SyntaxKind) -> (usize, u64) {
        let kind = kind as u16;
        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;
        let bit_index = kind % Self::BITS_PER_SLOT;
        (slot_index, 1 << bit_index)
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < kinds.len() {
            set = set.with(kinds[i]);
            i += 1;
        }

        set
    }

    pub const fn with(mut self, kind: SyntaxKind) -> Self {
        let (slot_index, mask) = Self::slot(kind);
        self.bits[slot_index] |= mask;
        self
    }

    pub const fn union(mut self, other: Self) -> Self {
        let mut i = 0;

        while i < self.bits.len() {
            self.bits[i] |= other.bits[i];
            i += 1;
        }

        self
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let (slot_index, mask) = Self::slot(kind);
        self.bits[slot_index] & mask != 0
    }

    pub fn iter(self) -> impl Iterator<Item = SyntaxKind> {
        (0..SyntaxKind::COUNT as u16)
            .filter_map(SyntaxKind::from_raw)
            .filter(move |&kind| self.contains(kind))
    }
}

impl std::fmt::Debug for SyntaxSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::SyntaxSet;
    use crate::{SyntaxKind, T};

    #[test]
    fn covers_every_kind() {
        let last = SyntaxKind::from_raw(SyntaxKind::COUNT as u16 - 1).unwrap();
        let set = SyntaxSet::new([SyntaxKind::TOMBSTONE, last]);
        assert!(set.contains(SyntaxKind::TOMBSTONE));
        assert!(set.contains(last));
        assert!(!set.contains(SyntaxKind::FN));
    }

    #[test]
    fn union_and_iter() {
        const ITEMS: SyntaxSet = SyntaxSet::new([T![fn], T![struct]]);
        let set = ITEMS.union(SyntaxSet::new([T![;]]));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![T![;], T![fn], T![struct]]);
        assert_eq!(format!("{set:?}"), "{SEMICOLON, FN_KW, STRUCT_KW}");
    }
}
