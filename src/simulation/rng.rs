//! Seeded random source for reproducible simulations
//!
//! All randomness in a generation pass flows through [`SimulationRng`], so the
//! same seed always produces the same sequence of identifiers, counts and
//! feedback decisions.

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::seq::{index, IndexedRandom};
use rand::{Rng, SeedableRng};

use crate::domain::{CorrelationId, DocumentId, FeedbackProbability, QueryText, SessionId, UserId};

/// Length of generated user tokens
pub const USER_TOKEN_LEN: usize = 12;

/// Length of the random part of generated document ids
pub const DOCUMENT_TOKEN_LEN: usize = 8;

/// Deterministic random source used by the event simulator
#[derive(Debug, Clone)]
pub struct SimulationRng {
    inner: StdRng,
}

impl SimulationRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a fresh seed from OS entropy, for runs that don't pin one
    pub fn entropy_seed() -> u64 {
        rand::random()
    }

    /// Decide whether a navigation is followed by a success signal
    ///
    /// Always consumes exactly one draw so that the outcome of one decision
    /// never shifts the ones after it.
    pub fn probability_of_feedback(&mut self, probability: FeedbackProbability) -> bool {
        let draw: f64 = self.inner.random();
        draw < probability.into_inner()
    }

    /// Alphanumeric token of the given length
    pub fn random_token(&mut self, len: usize) -> String {
        (&mut self.inner)
            .sample_iter(Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    /// Uniform count in `1..=max`
    pub fn count_up_to(&mut self, max: u32) -> u32 {
        self.inner.random_range(1..=max.max(1))
    }

    /// `amount` distinct indices below `len`, in ascending order
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        let mut picked = index::sample(&mut self.inner, len, amount.min(len)).into_vec();
        picked.sort_unstable();
        picked
    }

    pub fn choose_query(&mut self, vocabulary: &[QueryText]) -> Option<QueryText> {
        vocabulary.choose(&mut self.inner).cloned()
    }

    pub fn session_id(&mut self) -> SessionId {
        SessionId::from_random_bytes(self.inner.random())
    }

    pub fn correlation_id(&mut self) -> CorrelationId {
        CorrelationId::from_random_bytes(self.inner.random())
    }

    pub fn user_id(&mut self) -> UserId {
        UserId::try_new(self.random_token(USER_TOKEN_LEN))
            .expect("Alphanumeric token is a valid user id")
    }

    pub fn document_id(&mut self) -> DocumentId {
        let token = self.random_token(DOCUMENT_TOKEN_LEN);
        DocumentId::try_new(format!("doc-{token}"))
            .expect("Prefixed token is a valid document id")
    }
}
