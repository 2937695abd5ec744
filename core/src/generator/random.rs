use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement, reproducible from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds from the thread-local RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let layout = MineLayout::random(config, &mut rng);

        // double check mine count
        let count = layout.mine_coords().count();
        if count != config.mines as usize {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                count,
                config.mines
            );
        }
        log::debug!(
            "Generated {}x{} layout with {} mines from seed {}",
            config.size.0,
            config.size.1,
            count,
            self.seed
        );
        Ok(layout)
    }
}
