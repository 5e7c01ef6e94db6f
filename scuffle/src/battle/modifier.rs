use std::collections::BTreeMap;

use scuffle_data::Fraction;

/// A named point in a value formula where one category of multipliers is folded in.
///
/// Stages are applied in declaration order. Integer flooring only ever happens at a stage
/// boundary, so multipliers that share a stage compose exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModifierStage {
    BasePower,
    Attack,
    Defense,
    /// Before the `+2` constant of the damage formula.
    Mod1,
    /// Moves hitting more than one target.
    Spread,
    Critical,
    /// After critical hits, before the random roll.
    Mod2,
    Random,
    SameType,
    TypeEffectiveness,
    /// After type effectiveness.
    Mod3,
    Accuracy,
    Speed,
}

/// Multipliers collected for one value, grouped by stage and then by priority.
///
/// Within a stage, multipliers with the same priority are multiplied together exactly before
/// being applied, so the order they were collected in never matters. Priority groups within a
/// stage apply from highest to lowest, flooring between groups.
#[derive(Debug, Default, Clone)]
pub struct ModifierChain {
    stages: BTreeMap<ModifierStage, BTreeMap<i32, Fraction>>,
}

impl ModifierChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a multiplier. Neutral multipliers are dropped.
    pub fn push(&mut self, stage: ModifierStage, priority: i32, modifier: Fraction) {
        if modifier.is_one() {
            return;
        }
        let product = self
            .stages
            .entry(stage)
            .or_default()
            .entry(priority)
            .or_insert(Fraction::ONE);
        *product = *product * modifier;
    }

    /// Checks if any non-neutral multiplier was collected for the stage.
    pub fn has_stage(&self, stage: ModifierStage) -> bool {
        self.stages.contains_key(&stage)
    }

    /// The exact product of every multiplier in the stage, ignoring flooring.
    pub fn product(&self, stage: ModifierStage) -> Fraction {
        self.stages
            .get(&stage)
            .map(|groups| groups.values().copied().product())
            .unwrap_or(Fraction::ONE)
    }

    /// Applies every multiplier of the stage to the value.
    pub fn apply(&self, stage: ModifierStage, value: u64) -> u64 {
        match self.stages.get(&stage) {
            Some(groups) => groups
                .values()
                .rev()
                .fold(value, |value, modifier| modifier.apply(value)),
            None => value,
        }
    }
}

#[cfg(test)]
mod modifier_test {
    use scuffle_data::Fraction;

    use crate::battle::{
        ModifierChain,
        ModifierStage,
    };

    #[test]
    fn same_stage_order_does_not_change_result() {
        let modifiers = [Fraction::new(3, 2), Fraction::new(13, 10), Fraction::new(1, 2)];
        let mut forward = ModifierChain::new();
        let mut backward = ModifierChain::new();
        for modifier in modifiers {
            forward.push(ModifierStage::Mod2, 0, modifier);
        }
        for modifier in modifiers.into_iter().rev() {
            backward.push(ModifierStage::Mod2, 0, modifier);
        }
        for value in [1, 7, 33, 86, 101, 977] {
            assert_eq!(
                forward.apply(ModifierStage::Mod2, value),
                backward.apply(ModifierStage::Mod2, value)
            );
        }
        // 33 * 3/2 * 13/10 * 1/2 = 32.175, floored once.
        assert_eq!(forward.apply(ModifierStage::Mod2, 33), 32);
    }

    #[test]
    fn priority_groups_floor_between_groups() {
        let mut chain = ModifierChain::new();
        chain.push(ModifierStage::Mod3, 0, Fraction::new(1, 2));
        chain.push(ModifierStage::Mod3, 1, Fraction::new(3, 2));
        // Higher priority first: floor(7 * 3/2) = 10, floor(10 / 2) = 5.
        assert_eq!(chain.apply(ModifierStage::Mod3, 7), 5);
    }

    #[test]
    fn neutral_modifiers_are_dropped() {
        let mut chain = ModifierChain::new();
        chain.push(ModifierStage::Attack, 0, Fraction::ONE);
        assert!(!chain.has_stage(ModifierStage::Attack));
        assert_eq!(chain.apply(ModifierStage::Attack, 42), 42);
        assert_eq!(chain.product(ModifierStage::Attack), Fraction::ONE);
    }
}
