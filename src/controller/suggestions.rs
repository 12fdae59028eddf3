//! Random suggestion sets drawn from the song catalog

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

/// Uniform sample without replacement of `min(count, catalog.len())` items.
/// Items come out in random order.
pub fn sample<T: Clone, R: Rng + ?Sized>(rng: &mut R, count: usize, catalog: &[T]) -> Vec<T> {
    let amount = count.min(catalog.len());
    rand::seq::index::sample(rng, catalog.len(), amount)
        .into_iter()
        .map(|index| catalog[index].clone())
        .collect()
}

/// Shared random source for every suggestion set of a screen
pub struct SuggestionGenerator {
    rng: Mutex<StdRng>,
}

impl SuggestionGenerator {
    /// A fixed seed makes the generated sets reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub async fn generate<T: Clone>(&self, count: usize, catalog: &[T]) -> Vec<T> {
        let mut rng = self.rng.lock().await;
        let picked = sample(&mut *rng, count, catalog);
        tracing::debug!(
            requested = count,
            catalog = catalog.len(),
            picked = picked.len(),
            "Suggestions generated"
        );
        picked
    }
}

impl Default for SuggestionGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}
