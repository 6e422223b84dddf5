use crate::*;
pub use random::*;

mod random;

pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// Places mines exactly where the layout says, ignoring the requested config.
impl MineGenerator for MineLayout {
    fn generate(self, config: GameConfig) -> MineLayout {
        if self.game_config() != config {
            log::warn!(
                "Fixed layout {:?} does not match requested config {:?}, using layout",
                self.game_config(),
                config
            );
        }
        self
    }
}
