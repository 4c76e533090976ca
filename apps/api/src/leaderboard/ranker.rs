//! Combined rank computation across dynamic cards and the legend board.
//!
//! The legend scores never live in the external store; they are merged at
//! read time. A store failure degrades to `Unavailable` so callers can
//! drop the ranking badge without failing the whole page.

use serde::Serialize;
use tracing::warn;

use crate::leaderboard::legends::LegendBoard;
use crate::leaderboard::store::{ScoreStore, StoreError};

/// Rank triple for a dynamic card across the combined field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ranked {
    /// 1-indexed rank among dynamic cards and legends together.
    pub rank: u64,
    pub total_cards: u64,
    /// Share of all entries this card outranks, 0–100.
    pub percentile: u32,
}

/// Outcome of a rank lookup. `Unavailable` is an infrastructure failure,
/// deliberately distinct from `NotFound` (unknown or expired-and-purged
/// card id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOutcome {
    Ranked(Ranked),
    NotFound,
    Unavailable,
}

/// Computes a card's combined rank.
///
/// Dynamic rank comes from the store (0-indexed, descending); legends
/// scoring strictly above the card are added on top. Legends tying the
/// card's score are not counted as beating it.
pub async fn get_rank(
    store: &dyn ScoreStore,
    legends: &LegendBoard,
    card_id: &str,
) -> RankOutcome {
    let score = match store.score_of(card_id).await {
        Ok(Some(score)) => score,
        Ok(None) => return RankOutcome::NotFound,
        Err(StoreError::Unavailable(e)) => return degraded("score lookup", &e),
    };

    let dynamic_rank = match store.rank_of(card_id).await {
        Ok(Some(rank)) => rank,
        // Entry vanished between the two reads; report it as unknown.
        Ok(None) => return RankOutcome::NotFound,
        Err(StoreError::Unavailable(e)) => return degraded("rank lookup", &e),
    };

    let dynamic_total = match store.count().await {
        Ok(total) => total,
        Err(StoreError::Unavailable(e)) => return degraded("count", &e),
    };

    let legends_above = legends.above(score) as u64;
    let total_cards = dynamic_total + legends.len() as u64;
    let combined_rank = dynamic_rank + legends_above; // 0-indexed

    RankOutcome::Ranked(Ranked {
        rank: combined_rank + 1,
        total_cards,
        percentile: percentile(combined_rank, total_cards),
    })
}

fn degraded(op: &str, err: &str) -> RankOutcome {
    warn!("leaderboard {op} degraded: {err}");
    RankOutcome::Unavailable
}

/// Percentile of a 0-indexed rank in a field of `total` entries.
/// A lone entry is defined as the 100th percentile; there is nothing to
/// compare against, and it avoids the zero denominator.
fn percentile(rank0: u64, total: u64) -> u32 {
    if total <= 1 {
        return 100;
    }
    let beaten = (total - rank0 - 1) as f64;
    ((beaten / (total - 1) as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::store::InMemoryScoreStore;
    use async_trait::async_trait;

    /// Store double whose every operation fails, for degraded-path tests.
    struct FailingScoreStore;

    #[async_trait]
    impl ScoreStore for FailingScoreStore {
        async fn upsert(&self, _card_id: &str, _score: u32) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn score_of(&self, _card_id: &str) -> Result<Option<u32>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn rank_of(&self, _card_id: &str) -> Result<Option<u64>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn count(&self) -> Result<u64, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    async fn seeded_store(cards: &[(&str, u32)]) -> InMemoryScoreStore {
        let store = InMemoryScoreStore::new();
        for &(id, score) in cards {
            store.upsert(id, score).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_legend_interleaving_worked_example() {
        // dynamic [90, 70], legends [95, 80, 60]: the 70 card has one
        // dynamic entry and two legends above it
        let store = seeded_store(&[("top", 90), ("mid", 70)]).await;
        let legends = LegendBoard::from_scores(&[95, 80, 60]);

        let outcome = get_rank(&store, &legends, "mid").await;
        assert_eq!(
            outcome,
            RankOutcome::Ranked(Ranked {
                rank: 4,
                total_cards: 5,
                percentile: 25,
            })
        );
    }

    #[tokio::test]
    async fn test_rank_is_monotonic_in_score() {
        let store = seeded_store(&[("better", 88), ("worse", 42)]).await;
        let legends = LegendBoard::from_scores(&[]);

        let better = match get_rank(&store, &legends, "better").await {
            RankOutcome::Ranked(r) => r,
            other => panic!("expected rank, got {other:?}"),
        };
        let worse = match get_rank(&store, &legends, "worse").await {
            RankOutcome::Ranked(r) => r,
            other => panic!("expected rank, got {other:?}"),
        };
        assert!(better.rank < worse.rank);
        assert!(better.percentile > worse.percentile);
    }

    #[tokio::test]
    async fn test_singleton_is_100th_percentile() {
        let store = seeded_store(&[("only", 12)]).await;
        let legends = LegendBoard::from_scores(&[]);

        let outcome = get_rank(&store, &legends, "only").await;
        assert_eq!(
            outcome,
            RankOutcome::Ranked(Ranked {
                rank: 1,
                total_cards: 1,
                percentile: 100,
            })
        );
    }

    #[tokio::test]
    async fn test_legend_tie_favors_the_user_card() {
        let store = seeded_store(&[("tied", 80)]).await;
        let legends = LegendBoard::from_scores(&[80, 80]);

        let outcome = get_rank(&store, &legends, "tied").await;
        // neither 80-point legend counts as beating the card
        assert_eq!(
            outcome,
            RankOutcome::Ranked(Ranked {
                rank: 1,
                total_cards: 3,
                percentile: 100,
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_card_is_not_found() {
        let store = seeded_store(&[("known", 50)]).await;
        let legends = LegendBoard::from_scores(&[90]);

        assert_eq!(
            get_rank(&store, &legends, "unknown").await,
            RankOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_store_failure_is_unavailable_not_not_found() {
        let legends = LegendBoard::from_scores(&[90]);

        assert_eq!(
            get_rank(&FailingScoreStore, &legends, "any").await,
            RankOutcome::Unavailable
        );
    }

    #[tokio::test]
    async fn test_upsert_then_rerank_reflects_latest_score() {
        let store = seeded_store(&[("a", 30), ("b", 60)]).await;
        let legends = LegendBoard::from_scores(&[]);

        store.upsert("a", 99).await.unwrap();

        let outcome = get_rank(&store, &legends, "a").await;
        assert_eq!(
            outcome,
            RankOutcome::Ranked(Ranked {
                rank: 1,
                total_cards: 2,
                percentile: 100,
            })
        );
    }

    #[test]
    fn test_percentile_formula() {
        assert_eq!(percentile(0, 1), 100);
        assert_eq!(percentile(0, 2), 100);
        assert_eq!(percentile(1, 2), 0);
        assert_eq!(percentile(3, 5), 25);
        assert_eq!(percentile(2, 5), 50);
    }
}
