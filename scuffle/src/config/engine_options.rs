use scuffle_prng::{
    LinearCongruentialGenerator,
    PseudoRandomNumberGenerator,
};
use serde::{
    Deserialize,
    Serialize,
};

/// How the random roll in the damage formula is made.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RandomizeBaseDamage {
    /// Roll a random factor in `[85%, 100%]`.
    #[default]
    Randomize,
    /// Always use 100%.
    Max,
    /// Always use 85%.
    Min,
}

/// How ties are resolved when ordering by speed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedSortTieResolution {
    /// Shuffle tied elements with the battle's random number generator.
    #[default]
    Random,
    /// Keep tied elements in their original order.
    Keep,
    /// Reverse the original order of tied elements.
    Reverse,
}

fn default_rng_factory() -> fn(Option<u64>) -> Box<dyn PseudoRandomNumberGenerator> {
    |seed| Box::new(LinearCongruentialGenerator::new(seed))
}

fn default_max_cascade_depth() -> u8 {
    10
}

fn default_auto_continue() -> bool {
    true
}

/// Options for how the engine operates, common across battles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Creates the battle's random number generator from its seed.
    ///
    /// Tests swap this out to control individual random rolls.
    #[serde(skip, default = "default_rng_factory")]
    pub rng_factory: fn(Option<u64>) -> Box<dyn PseudoRandomNumberGenerator>,
    #[serde(default)]
    pub randomize_base_damage: RandomizeBaseDamage,
    #[serde(default)]
    pub speed_sort_tie_resolution: SpeedSortTieResolution,
    /// How deeply handlers may nest before further cascades are dropped.
    ///
    /// A top-level mutation runs at depth 1. A hook that requests another mutation from inside
    /// that handler runs at depth 2, and so on.
    #[serde(default = "default_max_cascade_depth")]
    pub max_cascade_depth: u8,
    /// Allows players to pass instead of acting with a healthy battler.
    #[serde(default)]
    pub allow_pass: bool,
    /// Continues the battle as soon as every player has made a choice.
    #[serde(default = "default_auto_continue")]
    pub auto_continue: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            rng_factory: default_rng_factory(),
            randomize_base_damage: RandomizeBaseDamage::default(),
            speed_sort_tie_resolution: SpeedSortTieResolution::default(),
            max_cascade_depth: default_max_cascade_depth(),
            allow_pass: false,
            auto_continue: default_auto_continue(),
        }
    }
}
