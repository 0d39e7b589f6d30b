//! Line pattern catalogue
//!
//! Every threat the search recognises is one of these fixed shapes read
//! along a line. Shapes use three symbols:
//! - `o`: a stone of the side being evaluated
//! - `_`: an empty cell
//! - `x`: an opposing stone (the board edge does not count)
//!
//! The table is ordered strongest first, so any contiguous range of levels
//! is a contiguous slice and a query can stop at the first hit.

use std::fmt;

/// Severity of a line shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThreatLevel {
    /// Lone stone
    One = 1,
    /// Two stones with room to grow
    Two = 2,
    /// Open or split three
    Three = 3,
    /// Any four
    Four = 4,
    /// Five in a row
    Five = 5,
}

impl ThreatLevel {
    /// All levels, weakest first
    pub const ALL: [ThreatLevel; 5] = [
        ThreatLevel::One,
        ThreatLevel::Two,
        ThreatLevel::Three,
        ThreatLevel::Four,
        ThreatLevel::Five,
    ];

    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get((value as usize).checked_sub(1)?).copied()
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.value())
    }
}

/// What a pattern requires of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Own,
    Blank,
    Opponent,
}

/// One catalogue entry
#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    /// Position in [`CATALOGUE`]
    pub id: usize,
    pub level: ThreatLevel,
    pub shape: &'static str,
}

impl Pattern {
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Requirement at index `i` of the window
    #[inline]
    pub fn symbol(&self, i: usize) -> Symbol {
        match self.shape.as_bytes()[i] {
            b'o' => Symbol::Own,
            b'x' => Symbol::Opponent,
            _ => Symbol::Blank,
        }
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.len()).map(move |i| self.symbol(i))
    }

    /// True for the single winning shape
    #[inline]
    pub fn is_five(&self) -> bool {
        self.level == ThreatLevel::Five
    }
}

const fn entry(id: usize, level: ThreatLevel, shape: &'static str) -> Pattern {
    Pattern { id, level, shape }
}

/// The frozen catalogue, strongest first.
pub static CATALOGUE: [Pattern; 20] = [
    entry(0, ThreatLevel::Five, "ooooo"),
    entry(1, ThreatLevel::Four, "oooo_"),
    entry(2, ThreatLevel::Four, "ooo_o"),
    entry(3, ThreatLevel::Four, "oo_oo"),
    entry(4, ThreatLevel::Four, "o_ooo"),
    entry(5, ThreatLevel::Four, "_oooo"),
    entry(6, ThreatLevel::Three, "x_ooo__"),
    entry(7, ThreatLevel::Three, "__ooo_x"),
    entry(8, ThreatLevel::Three, "_ooo_"),
    entry(9, ThreatLevel::Three, "_o_oo_"),
    entry(10, ThreatLevel::Three, "_oo_o_"),
    entry(11, ThreatLevel::Two, "oo___"),
    entry(12, ThreatLevel::Two, "_oo__"),
    entry(13, ThreatLevel::Two, "__oo_"),
    entry(14, ThreatLevel::Two, "___oo"),
    entry(15, ThreatLevel::One, "o____"),
    entry(16, ThreatLevel::One, "_o___"),
    entry(17, ThreatLevel::One, "__o__"),
    entry(18, ThreatLevel::One, "___o_"),
    entry(19, ThreatLevel::One, "____o"),
];

/// Catalogue index span `[first, end)` of one level
const fn span(level: ThreatLevel) -> (usize, usize) {
    match level {
        ThreatLevel::Five => (0, 1),
        ThreatLevel::Four => (1, 6),
        ThreatLevel::Three => (6, 11),
        ThreatLevel::Two => (11, 15),
        ThreatLevel::One => (15, 20),
    }
}

/// Patterns of exactly one level, in catalogue order
pub fn patterns(level: ThreatLevel) -> &'static [Pattern] {
    let (first, end) = span(level);
    &CATALOGUE[first..end]
}

/// Inclusive span of severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelRange {
    weakest: ThreatLevel,
    strongest: ThreatLevel,
}

impl LevelRange {
    /// Levels from `weakest` up to `strongest`, both included.
    ///
    /// # Panics
    /// Panics if `weakest` is stronger than `strongest`.
    pub fn new(weakest: ThreatLevel, strongest: ThreatLevel) -> Self {
        assert!(
            weakest <= strongest,
            "empty level range {weakest}..={strongest}"
        );
        Self { weakest, strongest }
    }

    /// A range holding a single level
    pub fn only(level: ThreatLevel) -> Self {
        Self::new(level, level)
    }

    #[inline]
    pub fn weakest(self) -> ThreatLevel {
        self.weakest
    }

    #[inline]
    pub fn strongest(self) -> ThreatLevel {
        self.strongest
    }

    #[inline]
    pub fn contains(self, level: ThreatLevel) -> bool {
        self.weakest <= level && level <= self.strongest
    }

    /// Patterns of every level in the range, strongest first
    pub fn patterns(self) -> &'static [Pattern] {
        let (first, _) = span(self.strongest);
        let (_, end) = span(self.weakest);
        &CATALOGUE[first..end]
    }
}

impl fmt::Display for LevelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.weakest, self.strongest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_ids_match_positions() {
        for (i, pattern) in CATALOGUE.iter().enumerate() {
            assert_eq!(pattern.id, i, "pattern {} out of place", pattern.shape);
        }
    }

    #[test]
    fn test_catalogue_strongest_first() {
        for pair in CATALOGUE.windows(2) {
            assert!(pair[0].level >= pair[1].level);
        }
    }

    #[test]
    fn test_level_slices() {
        assert_eq!(patterns(ThreatLevel::Five).len(), 1);
        assert_eq!(patterns(ThreatLevel::Four).len(), 5);
        assert_eq!(patterns(ThreatLevel::Three).len(), 5);
        assert_eq!(patterns(ThreatLevel::Two).len(), 4);
        assert_eq!(patterns(ThreatLevel::One).len(), 5);
        for level in ThreatLevel::ALL {
            assert!(patterns(level).iter().all(|p| p.level == level));
        }
    }

    #[test]
    fn test_stone_count_matches_level() {
        for pattern in &CATALOGUE {
            let own = pattern.symbols().filter(|&s| s == Symbol::Own).count();
            assert_eq!(own, pattern.level.value() as usize, "{}", pattern.shape);
        }
    }

    #[test]
    fn test_range_patterns() {
        let range = LevelRange::new(ThreatLevel::Three, ThreatLevel::Five);
        let slice = range.patterns();
        assert_eq!(slice.len(), 11);
        assert!(slice[0].is_five());
        assert_eq!(slice.last().map(|p| p.shape), Some("_oo_o_"));

        let only_two = LevelRange::only(ThreatLevel::Two).patterns();
        assert_eq!(only_two.first().map(|p| p.id), Some(11));
        assert!(range.contains(ThreatLevel::Four));
        assert!(!range.contains(ThreatLevel::Two));
    }

    #[test]
    #[should_panic]
    fn test_inverted_range_panics() {
        let _ = LevelRange::new(ThreatLevel::Five, ThreatLevel::Three);
    }

    #[test]
    fn test_level_values() {
        assert_eq!(ThreatLevel::from_value(3), Some(ThreatLevel::Three));
        assert_eq!(ThreatLevel::from_value(0), None);
        assert_eq!(ThreatLevel::from_value(6), None);
        assert!(ThreatLevel::Five > ThreatLevel::Four);
    }
}
