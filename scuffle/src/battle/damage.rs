use anyhow::Result;
use scuffle_data::{
    Boost,
    Fraction,
    MoveCategory,
    MoveData,
    Stat,
};
use scuffle_prng::{
    PseudoRandomNumberGenerator,
    RandomExt,
};

use crate::{
    battle::{
        Battle,
        ModifierChain,
        ModifierStage,
        MonHandle,
        boosted_stat,
        dispatch,
    },
    config::RandomizeBaseDamage,
    effect::MoveHit,
    error::integer_overflow_error,
};

/// The part of the damage formula before any modifier: level, base power, and the ratio of
/// the offensive stat to the defensive stat.
pub fn base_damage(level: u8, base_power: u64, attack: u64, defense: u64) -> u64 {
    let base = 2 * level as u64 / 5 + 2;
    base * base_power * attack / defense.max(1) / 50
}

/// Doubles or halves damage once per step of type effectiveness.
pub fn apply_type_modifier(damage: u64, type_modifier: i8) -> u64 {
    let steps = type_modifier.unsigned_abs() as u32;
    if type_modifier >= 0 {
        damage << steps.min(6)
    } else {
        damage >> steps.min(6)
    }
}

/// Folds every modifier stage into the base damage.
///
/// Order: `Mod1`, `+2`, spread, critical hit, `Mod2`, random roll, same-type bonus, type
/// effectiveness, `Mod3`. The result is at least 1.
pub fn compose_damage(base: u64, chain: &ModifierChain, type_modifier: i8) -> u64 {
    let damage = chain.apply(ModifierStage::Mod1, base);
    let damage = damage + 2;
    let damage = [
        ModifierStage::Spread,
        ModifierStage::Critical,
        ModifierStage::Mod2,
        ModifierStage::Random,
        ModifierStage::SameType,
    ]
    .into_iter()
    .fold(damage, |damage, stage| chain.apply(stage, damage));
    let damage = apply_type_modifier(damage, type_modifier);
    let damage = chain.apply(ModifierStage::TypeEffectiveness, damage);
    let damage = chain.apply(ModifierStage::Mod3, damage);
    damage.max(1)
}

/// The random roll of the damage formula, between 85% and 100%.
pub fn random_factor(
    option: RandomizeBaseDamage,
    prng: &mut dyn PseudoRandomNumberGenerator,
) -> Fraction {
    let roll = match option {
        RandomizeBaseDamage::Randomize => prng.range(0, 16),
        RandomizeBaseDamage::Max => 0,
        RandomizeBaseDamage::Min => 15,
    };
    Fraction::new(100 - roll, 100)
}

/// Chance of a critical hit at each critical hit stage, as `1 / n`.
const CRIT_CHANCE: [u64; 4] = [24, 8, 2, 1];

/// Result of running the damage formula for one hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageCalculation {
    pub damage: u32,
    pub crit: bool,
    pub type_modifier: i8,
}

/// Runs the damage formula for one hit of a move, consulting every relevant object at each
/// stage.
pub fn calculate_damage(
    battle: &mut Battle,
    user: MonHandle,
    target: MonHandle,
    mov: &MoveData,
    spread: bool,
) -> Result<DamageCalculation> {
    let crit_stage = (mov.crit_ratio as usize).min(CRIT_CHANCE.len() - 1);
    let crit = battle.prng.chance(1, CRIT_CHANCE[crit_stage]);
    let hit = MoveHit {
        user,
        target,
        mov,
        crit,
        spread,
    };
    let origins = dispatch::origins_for(battle, Some(user), Some(target), true);
    let mut chain = ModifierChain::new();

    let base_power = dispatch::run_move(battle, user, |behavior, context| {
        behavior.real_base_power(context, user, target, mov)
    })?
    .unwrap_or(mov.base_power);
    dispatch::collect_modifiers(
        battle,
        &origins,
        ModifierStage::BasePower,
        &mut chain,
        |hooks, context| hooks.base_power_multiplier(context, &hit),
    )?;
    let base_power = chain
        .apply(ModifierStage::BasePower, base_power as u64)
        .max(1);

    let physical = mov.category == MoveCategory::Physical;
    let (attack_stat, attack_boost, defense_stat, defense_boost) = if physical {
        (Stat::Atk, Boost::Atk, Stat::Def, Boost::Def)
    } else {
        (Stat::SpAtk, Boost::SpAtk, Stat::SpDef, Boost::SpDef)
    };

    let (level, attack) = {
        let user = battle.mon(user)?;
        let mut stage = user.boosts.get(attack_boost);
        // Critical hits ignore the attacker's drops.
        if crit {
            stage = stage.max(0);
        }
        (
            user.level,
            boosted_stat(user.stats.get(attack_stat) as u64, stage),
        )
    };
    dispatch::collect_modifiers(
        battle,
        &origins,
        ModifierStage::Attack,
        &mut chain,
        |hooks, context| {
            if physical {
                hooks.atk_multiplier(context, &hit)
            } else {
                hooks.sp_atk_multiplier(context, &hit)
            }
        },
    )?;
    let attack = chain.apply(ModifierStage::Attack, attack).max(1);

    let defense = {
        let target = battle.mon(target)?;
        let mut stage = target.boosts.get(defense_boost);
        // Critical hits ignore the defender's raises.
        if crit {
            stage = stage.min(0);
        }
        boosted_stat(target.stats.get(defense_stat) as u64, stage)
    };
    dispatch::collect_modifiers(
        battle,
        &origins,
        ModifierStage::Defense,
        &mut chain,
        |hooks, context| {
            if physical {
                hooks.def_multiplier(context, &hit)
            } else {
                hooks.sp_def_multiplier(context, &hit)
            }
        },
    )?;
    let defense = chain.apply(ModifierStage::Defense, defense).max(1);

    let base = base_damage(level, base_power, attack, defense);

    dispatch::collect_modifiers(
        battle,
        &origins,
        ModifierStage::Mod1,
        &mut chain,
        |hooks, context| hooks.mod1_multiplier(context, &hit),
    )?;
    if spread {
        chain.push(ModifierStage::Spread, 0, Fraction::new(3, 4));
    }
    if crit {
        chain.push(ModifierStage::Critical, 0, Fraction::new(3, 2));
    }
    dispatch::collect_modifiers(
        battle,
        &origins,
        ModifierStage::Mod2,
        &mut chain,
        |hooks, context| hooks.mod2_multiplier(context, &hit),
    )?;
    let random = random_factor(
        battle.engine_options.randomize_base_damage,
        battle.prng.as_mut(),
    );
    chain.push(ModifierStage::Random, 0, random);
    if battle.mon(user)?.has_type(mov.primary_type) {
        chain.push(ModifierStage::SameType, 0, Fraction::new(3, 2));
    }
    let type_modifier = {
        let target = battle.mon(target)?;
        battle.type_chart().modifier(mov.primary_type, &target.types)
    };
    dispatch::collect_modifiers(
        battle,
        &origins,
        ModifierStage::Mod3,
        &mut chain,
        |hooks, context| hooks.mod3_multiplier(context, &hit, type_modifier),
    )?;

    let damage = compose_damage(base, &chain, type_modifier);
    Ok(DamageCalculation {
        damage: damage.try_into().map_err(integer_overflow_error)?,
        crit,
        type_modifier,
    })
}

#[cfg(test)]
mod damage_test {
    use scuffle_data::Fraction;

    use crate::battle::{
        ModifierChain,
        ModifierStage,
        apply_type_modifier,
        base_damage,
        compose_damage,
    };

    #[test]
    fn canonical_neutral_hit() {
        let base = base_damage(100, 100, 100, 100);
        assert_eq!(base, 84);
        assert_eq!(compose_damage(base, &ModifierChain::new(), 0), 86);
    }

    #[test]
    fn type_effectiveness_doubles_and_halves() {
        assert_eq!(apply_type_modifier(86, 1), 172);
        assert_eq!(apply_type_modifier(86, 2), 344);
        assert_eq!(apply_type_modifier(86, -1), 43);
        assert_eq!(apply_type_modifier(86, -2), 21);
        assert_eq!(compose_damage(84, &ModifierChain::new(), -1), 43);
    }

    #[test]
    fn minimum_damage_is_one() {
        assert_eq!(base_damage(1, 10, 5, 500), 0);
        assert_eq!(compose_damage(0, &ModifierChain::new(), -2), 1);
    }

    #[test]
    fn mod1_applies_before_the_constant() {
        let mut before = ModifierChain::new();
        before.push(ModifierStage::Mod1, 0, Fraction::new(1, 2));
        let mut after = ModifierChain::new();
        after.push(ModifierStage::Mod3, 0, Fraction::new(1, 2));
        // 84 / 2 + 2 = 44, but (84 + 2) / 2 = 43.
        assert_eq!(compose_damage(84, &before, 0), 44);
        assert_eq!(compose_damage(84, &after, 0), 43);
    }

    #[test]
    fn stage_order_is_fixed_regardless_of_push_order() {
        let mut first = ModifierChain::new();
        first.push(ModifierStage::Mod3, 0, Fraction::new(6, 5));
        first.push(ModifierStage::Mod1, 0, Fraction::new(1, 2));
        first.push(ModifierStage::SameType, 0, Fraction::new(3, 2));
        let mut second = ModifierChain::new();
        second.push(ModifierStage::SameType, 0, Fraction::new(3, 2));
        second.push(ModifierStage::Mod1, 0, Fraction::new(1, 2));
        second.push(ModifierStage::Mod3, 0, Fraction::new(6, 5));
        assert_eq!(
            compose_damage(84, &first, 1),
            compose_damage(84, &second, 1)
        );
        // ((84 / 2 + 2) * 3/2 * 2) * 6/5 = 158.
        assert_eq!(compose_damage(84, &first, 1), 158);
    }
}
