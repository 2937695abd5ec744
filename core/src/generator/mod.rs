use crate::*;
pub use random::*;

mod random;

/// Source of mine layouts for new boards.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
