//! Best-score tracking
//!
//! The session keeps the best score in memory and writes it to the store
//! only when a round beats it. Persistence failures never touch gameplay;
//! the in-memory best stays correct for the rest of the session.

use crate::persistence::{ScoreStore, load_or_zero};

/// Best score after a round: only a strictly higher score replaces it
pub fn resolve_best(final_score: u64, stored_best: u64) -> u64 {
    final_score.max(stored_best)
}

/// What a round end did to the best score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub score: u64,
    pub best: u64,
    /// The round set a new best
    pub improved: bool,
    /// The new best reached durable storage
    pub persisted: bool,
}

/// Owns the best score and its store
pub struct ScoreTracker<S> {
    store: S,
    best: u64,
    /// Round number whose end has already been recorded
    recorded_round: Option<u64>,
}

impl<S: ScoreStore> ScoreTracker<S> {
    /// Read the stored best (0 on any failure)
    pub fn load(store: S) -> Self {
        let best = load_or_zero(&store);
        log::info!("Highscore: {}", best);
        Self {
            store,
            best,
            recorded_round: None,
        }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record the end of round `round`. A round is recorded at most once;
    /// repeated calls return the same best without writing again.
    pub fn on_round_end(&mut self, round: u64, final_score: u64) -> RoundResult {
        if self.recorded_round == Some(round) {
            return RoundResult {
                score: final_score,
                best: self.best,
                improved: false,
                persisted: false,
            };
        }
        self.recorded_round = Some(round);

        let new_best = resolve_best(final_score, self.best);
        if new_best == self.best {
            return RoundResult {
                score: final_score,
                best: self.best,
                improved: false,
                persisted: false,
            };
        }

        self.best = new_best;
        let persisted = match self.store.save(new_best) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Highscore {} kept for this session only: {}", new_best, e);
                false
            }
        };
        RoundResult {
            score: final_score,
            best: new_best,
            improved: true,
            persisted,
        }
    }
}
