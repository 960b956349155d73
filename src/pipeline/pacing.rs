use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Exp1;
use std::time::Duration;
use tracing::info;

use crate::config::Pacing;

/// Sleeps between upstream requests
pub trait Pacer {
    /// Jittered delay after every deck
    fn short_pause(&mut self);
    /// Cool-down taken every `pause_every` processed decks
    fn long_pause(&mut self);
}

/// Exp(1) seconds clamped to `[min, max]`
pub fn sample_short_delay<R: Rng>(rng: &mut R, min: Duration, max: Duration) -> Duration {
    let secs: f64 = rng.sample(Exp1);
    Duration::from_secs_f64(secs.clamp(min.as_secs_f64(), max.as_secs_f64()))
}

/// Uniform over `[min, max]`
pub fn sample_long_pause<R: Rng>(rng: &mut R, min: Duration, max: Duration) -> Duration {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Blocking pacer with randomized delays
pub struct RandomPacer {
    rng: StdRng,
    pacing: Pacing,
}

impl RandomPacer {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            pacing,
        }
    }

    pub fn with_seed(pacing: Pacing, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pacing,
        }
    }
}

impl Pacer for RandomPacer {
    fn short_pause(&mut self) {
        let delay = sample_short_delay(&mut self.rng, self.pacing.short_min, self.pacing.short_max);
        std::thread::sleep(delay);
    }

    fn long_pause(&mut self) {
        let delay = sample_long_pause(&mut self.rng, self.pacing.long_min, self.pacing.long_max);
        info!("Paused for {:.0}s", delay.as_secs_f64());
        std::thread::sleep(delay);
        info!("Resuming deck processing");
    }
}
