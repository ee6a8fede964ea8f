//! Edge colors. Purely cosmetic: they only help tell crossing edges apart.
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

pub const EDGE_COLORS: [&str; 5] = ["red", "black", "blue", "skyblue", "violet"];

/// One generator, seeded once, drawn from for every edge.
pub struct EdgePalette {
    rng: StdRng,
}

impl EdgePalette {
    /// Reproducible palette, for tests and `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Palette seeded from the wall clock.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        debug!(seed, "edge palette seeded from clock");
        Self::seeded(seed)
    }

    pub fn next_color(&mut self) -> &'static str {
        EDGE_COLORS[self.rng.gen_range(0..EDGE_COLORS.len())]
    }
}
