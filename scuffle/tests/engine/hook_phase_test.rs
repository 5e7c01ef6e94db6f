use std::{
    cell::Cell,
    rc::Rc,
};

use anyhow::Result;
use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use scuffle::{
    battle::{
        Battle,
        HandlerOutcome,
    },
    config::{
        SpeedSortTieResolution,
        TeamData,
    },
    effect::{
        AbilityBehavior,
        DamageKind,
        DamageRequest,
        EffectBehavior,
        EffectRequest,
        EffectTarget,
        HookContext,
        Hooks,
        Veto,
    },
    handlers,
    registry::Registries,
};
use scuffle_data::{
    AbilityData,
    DataStore,
    Id,
};
use scuffle_test_utils::{
    TestBattleBuilder,
    TestDataStore,
};

#[derive(Default)]
struct PhaseCounts {
    prevention: Cell<u32>,
    value: Cell<u32>,
    post: Cell<u32>,
}

impl PhaseCounts {
    fn get(&self) -> (u32, u32, u32) {
        (self.prevention.get(), self.value.get(), self.post.get())
    }
}

/// Field effect that counts every damage phase it is consulted for.
struct PhaseCounter(Rc<PhaseCounts>);

impl Hooks for PhaseCounter {
    fn on_damage_prevention(&self, _: &mut HookContext, _: &DamageRequest) -> Result<Veto> {
        self.0.prevention.set(self.0.prevention.get() + 1);
        Ok(Veto::Allow)
    }

    fn on_damage_cap(
        &self,
        _: &mut HookContext,
        _: &DamageRequest,
        _: u32,
    ) -> Result<Option<u32>> {
        self.0.value.set(self.0.value.get() + 1);
        Ok(None)
    }

    fn on_post_damage(&self, _: &mut HookContext, _: &DamageRequest, _: u32) -> Result<()> {
        self.0.post.set(self.0.post.get() + 1);
        Ok(())
    }
}

impl EffectBehavior for PhaseCounter {
    fn name(&self) -> &str {
        "Phase Counter"
    }

    fn silent(&self) -> bool {
        true
    }
}

/// Blocks indirect damage to its owner.
struct IndirectShield;

impl Hooks for IndirectShield {
    fn on_damage_prevention(&self, ctx: &mut HookContext, request: &DamageRequest) -> Result<Veto> {
        Ok(Veto::from_prevent(
            ctx.is_owner(request.target) && !request.kind.is_direct(),
        ))
    }
}

impl AbilityBehavior for IndirectShield {}

fn registries(counts: &Rc<PhaseCounts>) -> Registries {
    let mut registries = Registries::standard();
    registries
        .abilities
        .register("indirectshield", |_: &AbilityData| Rc::new(IndirectShield));
    let counts = counts.clone();
    registries.effects.register("phasecounter", move |_: &Id| {
        Rc::new(PhaseCounter(counts.clone()))
    });
    registries
}

fn team(name: &str, ability: &str) -> Result<TeamData> {
    let team = serde_json::json!({
        "members": [
            {
                "name": name,
                "species": "Splashling",
                "ability": ability,
                "moves": ["Splash"],
                "nature": "Hardy",
                "level": 100,
                "ivs": { "hp": 31, "atk": 31, "def": 31, "spa": 31, "spd": 31, "spe": 31 }
            }
        ]
    });
    Ok(serde_json::from_value(team)?)
}

fn make_battle<'d>(data: &'d dyn DataStore, registries: &'d Registries) -> Result<Battle<'d>> {
    TestBattleBuilder::new()
        .with_seed(0)
        .with_fixed_rng(1)
        .with_speed_sort_tie_resolution(SpeedSortTieResolution::Keep)
        .with_team_1(team("Alpha", "No Ability")?)
        .with_team_2(team("Beta", "Indirect Shield")?)
        .build(data, registries)
}

fn effect_damage(target: scuffle::battle::MonHandle, amount: u32) -> DamageRequest {
    DamageRequest::indirect(target, amount, DamageKind::Effect("Test".to_owned()))
}

#[test]
fn prevention_skips_value_and_post_phases() {
    let data = TestDataStore::new().unwrap();
    let counts = Rc::new(PhaseCounts::default());
    let registries = registries(&counts);
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));
    assert_matches!(
        handlers::add_effect(
            &mut battle,
            EffectRequest::new(EffectTarget::Field, "phasecounter")
        ),
        Ok(HandlerOutcome::Applied(()))
    );

    let beta = battle.active_mon(1, 0).unwrap();
    assert_matches!(
        handlers::damage(&mut battle, effect_damage(beta, 10)),
        Ok(HandlerOutcome::Prevented)
    );
    assert_eq!(counts.get(), (0, 0, 0));
    assert_eq!(battle.mon(beta).unwrap().hp, 205);
}

#[test]
fn unprevented_damage_runs_every_phase_once() {
    let data = TestDataStore::new().unwrap();
    let counts = Rc::new(PhaseCounts::default());
    let registries = registries(&counts);
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));
    assert_matches!(
        handlers::add_effect(
            &mut battle,
            EffectRequest::new(EffectTarget::Field, "phasecounter")
        ),
        Ok(HandlerOutcome::Applied(()))
    );
    battle.new_logs();

    let alpha = battle.active_mon(0, 0).unwrap();
    assert_matches!(
        handlers::damage(&mut battle, effect_damage(alpha, 10)),
        Ok(HandlerOutcome::Applied(10))
    );
    assert_eq!(counts.get(), (1, 1, 1));
    assert_eq!(
        battle.new_logs(),
        vec!["damage|mon:Alpha,player-1,1|health:195/205|from:Test"]
    );
}

#[test]
fn damage_to_fainted_battler_has_no_effect() {
    let data = TestDataStore::new().unwrap();
    let counts = Rc::new(PhaseCounts::default());
    let registries = registries(&counts);
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));

    let alpha = battle.active_mon(0, 0).unwrap();
    assert_matches!(
        handlers::damage(&mut battle, effect_damage(alpha, 0)),
        Ok(HandlerOutcome::NoEffect)
    );
    battle.mon_mut(alpha).unwrap().hp = 0;
    assert_matches!(
        handlers::damage(&mut battle, effect_damage(alpha, 10)),
        Ok(HandlerOutcome::NoEffect)
    );
}
