//! Legend cards — precomputed, non-interactive leaderboard entries for
//! famous figures. Only their scores participate in ranking; names are
//! kept for the leaderboard view. Built once at startup from the two
//! datasets below and never mutated.

/// Tech-industry legends.
pub const TECH_TITANS: &[(&str, u32)] = &[
    ("Steve Jobs", 99),
    ("Elon Musk", 96),
    ("Satya Nadella", 95),
    ("Jeff Bezos", 94),
    ("Sundar Pichai", 91),
    ("Sheryl Sandberg", 90),
    ("Sam Altman", 89),
    ("Marissa Mayer", 85),
    ("Jack Dorsey", 82),
    ("Adam Neumann", 61),
];

/// Pop-culture figures re-imagined as product managers.
pub const POP_ICONS: &[(&str, u32)] = &[
    ("Beyoncé", 97),
    ("Taylor Swift", 93),
    ("Gordon Ramsay", 88),
    ("Oprah Winfrey", 87),
    ("Kanye West", 74),
    ("Kim Kardashian", 72),
    ("Jake Paul", 55),
    ("Florida Man", 38),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: &'static str,
    pub score: u32,
}

/// The static legend board: both datasets merged and sorted descending
/// by score. Process-wide immutable state, held in `AppState` behind an
/// `Arc`.
#[derive(Debug)]
pub struct LegendBoard {
    entries: Vec<LegendEntry>,
}

impl LegendBoard {
    /// Rebuilds the board from the two static datasets.
    pub fn from_static() -> Self {
        let mut entries: Vec<LegendEntry> = TECH_TITANS
            .iter()
            .chain(POP_ICONS.iter())
            .map(|&(name, score)| LegendEntry { name, score })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    #[cfg(test)]
    pub fn from_scores(scores: &[u32]) -> Self {
        let mut entries: Vec<LegendEntry> = scores
            .iter()
            .map(|&score| LegendEntry { name: "legend", score })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of legends scoring strictly above `score`. The list is
    /// sorted descending, so they form a prefix and the scan stops at the
    /// first legend not beating the card. Equal scores do not count —
    /// ties favor the user's card.
    pub fn above(&self, score: u32) -> usize {
        self.entries
            .iter()
            .take_while(|legend| legend.score > score)
            .count()
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_is_sorted_descending() {
        let board = LegendBoard::from_static();
        assert!(board
            .entries()
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
        assert_eq!(board.len(), TECH_TITANS.len() + POP_ICONS.len());
    }

    #[test]
    fn test_above_counts_strictly_greater_only() {
        let board = LegendBoard::from_scores(&[95, 80, 80, 60]);
        assert_eq!(board.above(80), 1); // only 95; the two 80s tie
        assert_eq!(board.above(79), 3);
        assert_eq!(board.above(100), 0);
        assert_eq!(board.above(0), 4);
    }

    #[test]
    fn test_above_on_empty_board() {
        let board = LegendBoard::from_scores(&[]);
        assert_eq!(board.above(50), 0);
        assert!(board.is_empty());
    }
}
