use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::Question;

/// Picks a bounded random subset of questions without replacement.
#[derive(Debug, Clone, Copy)]
pub struct QuestionSampler {
    sample_size: usize,
}

impl QuestionSampler {
    #[must_use]
    pub fn new(sample_size: usize) -> Self {
        Self { sample_size }
    }

    /// Uniformly permute the pool, keep the first `min(sample_size, len)`.
    /// Inactive questions are dropped before shuffling.
    pub fn sample<R: Rng + ?Sized>(&self, pool: Vec<Question>, rng: &mut R) -> Vec<Question> {
        let mut eligible: Vec<Question> = pool.into_iter().filter(Question::is_active).collect();
        eligible.shuffle(rng);
        eligible.truncate(self.sample_size);
        eligible
    }
}
