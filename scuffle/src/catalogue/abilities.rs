use std::rc::Rc;

use anyhow::Result;
use scuffle_data::{
    AbilityData,
    Boost,
    Fraction,
    MoveData,
    MoveFlag,
    Status,
    Type,
};

use crate::{
    battle::MonHandle,
    catalogue::{
        CONFUSION,
        RAIN,
        fraction_of_max_hp,
    },
    effect::{
        AbilityBehavior,
        BoostRequest,
        DamageKind,
        DamageRequest,
        EffectRequest,
        EffectTarget,
        HookContext,
        Hooks,
        MoveHit,
        StatusRequest,
        Veto,
    },
    registry::AbilityRegistry,
};

fn log_immune(ctx: &mut HookContext, mon: MonHandle) -> Result<()> {
    let from = ctx.describe_origin();
    let event = log_event!("immune", mon: ctx.mon(mon)?.position_details()).with_opt("from", from);
    ctx.log(event);
    Ok(())
}

/// The attacker, if the damage is a contact move from another battler hitting the owner.
fn contact_attacker(ctx: &HookContext, request: &DamageRequest) -> Option<MonHandle> {
    if !ctx.is_owner(request.target) || !request.kind.is_direct() {
        return None;
    }
    let contact = request
        .mov
        .as_ref()
        .is_some_and(|mov| mov.has_flag(MoveFlag::Contact));
    match request.source {
        Some(source) if contact && source != request.target => Some(source),
        _ => None,
    }
}

fn attacker_can_act(ctx: &HookContext, attacker: MonHandle) -> Result<bool> {
    Ok(ctx.mon(attacker)?.can_act())
}

/// Survives any hit from full HP with 1 HP left, and is immune to one-hit knockouts.
struct Sturdy;

impl Hooks for Sturdy {
    fn on_move_ability_immunity(
        &self,
        ctx: &mut HookContext,
        _: MonHandle,
        target: MonHandle,
        mov: &MoveData,
    ) -> Result<bool> {
        Ok(ctx.is_owner(target) && mov.has_flag(MoveFlag::OneHitKnockOut))
    }

    fn on_damage_cap(
        &self,
        ctx: &mut HookContext,
        request: &DamageRequest,
        damage: u32,
    ) -> Result<Option<u32>> {
        if !ctx.is_owner(request.target) || !request.kind.is_direct() {
            return Ok(None);
        }
        let mon = ctx.mon(request.target)?;
        if mon.hp != mon.max_hp || damage < mon.hp {
            return Ok(None);
        }
        let capped = mon.hp - 1;
        let event = log_event!("activate", mon: mon.position_details())
            .with_opt("from", ctx.describe_origin());
        ctx.log(event);
        Ok(Some(capped))
    }
}

impl AbilityBehavior for Sturdy {}

/// Blocks one status from being inflicted on the owner, and cures it on activation.
struct StatusImmunity(Status);

impl Hooks for StatusImmunity {
    fn on_status_prevention(&self, ctx: &mut HookContext, request: &StatusRequest) -> Result<Veto> {
        if !ctx.is_owner(request.target) || request.status != self.0 {
            return Ok(Veto::Allow);
        }
        log_immune(ctx, request.target)?;
        Ok(Veto::Prevent)
    }
}

impl AbilityBehavior for StatusImmunity {
    fn on_start(&self, ctx: &mut HookContext) -> Result<()> {
        let Some(owner) = ctx.owner() else {
            return Ok(());
        };
        let afflicted = ctx
            .mon(owner)?
            .status
            .as_ref()
            .is_some_and(|status| status.status == self.0);
        if afflicted {
            ctx.cure_status(owner)?;
        }
        Ok(())
    }
}

/// Keeps the owner from being confused.
struct OwnTempo;

impl Hooks for OwnTempo {
    fn on_effect_prevention(&self, ctx: &mut HookContext, request: &EffectRequest) -> Result<Veto> {
        match request.target {
            EffectTarget::Mon(target) if ctx.is_owner(target) && request.id == *CONFUSION => {
                log_immune(ctx, target)?;
                Ok(Veto::Prevent)
            }
            _ => Ok(Veto::Allow),
        }
    }
}

impl AbilityBehavior for OwnTempo {}

/// Keeps the owner off the ground.
struct Levitate;

impl Hooks for Levitate {}

impl AbilityBehavior for Levitate {
    fn grants_levitation(&self) -> bool {
        true
    }
}

/// Halves the attacking stat of fire and ice moves against the owner.
struct ThickFat;

impl ThickFat {
    fn multiplier(ctx: &HookContext, hit: &MoveHit) -> Fraction {
        if ctx.is_owner(hit.target) && matches!(hit.mov.primary_type, Type::Fire | Type::Ice) {
            Fraction::new(1, 2)
        } else {
            Fraction::ONE
        }
    }
}

impl Hooks for ThickFat {
    fn atk_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        Ok(Self::multiplier(ctx, hit))
    }

    fn sp_atk_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        Ok(Self::multiplier(ctx, hit))
    }
}

impl AbilityBehavior for ThickFat {}

/// Weakens super-effective hits against the owner.
struct SolidRock;

impl Hooks for SolidRock {
    fn mod3_multiplier(
        &self,
        ctx: &mut HookContext,
        hit: &MoveHit,
        type_modifier: i8,
    ) -> Result<Fraction> {
        if ctx.is_owner(hit.target) && type_modifier > 0 {
            Ok(Fraction::new(3, 4))
        } else {
            Ok(Fraction::ONE)
        }
    }
}

impl AbilityBehavior for SolidRock {}

/// Blocks all damage to the owner except from moves.
struct MagicGuard;

impl Hooks for MagicGuard {
    fn on_damage_prevention(&self, ctx: &mut HookContext, request: &DamageRequest) -> Result<Veto> {
        let indirect = !matches!(request.kind, DamageKind::Move | DamageKind::Confusion);
        Ok(Veto::from_prevent(ctx.is_owner(request.target) && indirect))
    }
}

impl AbilityBehavior for MagicGuard {}

/// Blocks stat drops caused by other battlers.
struct ClearBody;

impl Hooks for ClearBody {
    fn on_stat_change(
        &self,
        ctx: &mut HookContext,
        request: &BoostRequest,
        delta: i8,
    ) -> Result<Option<i8>> {
        if !ctx.is_owner(request.target) || delta >= 0 || !request.caused_by_other() {
            return Ok(None);
        }
        let from = ctx.describe_origin();
        let event = log_event!(
            "fail",
            mon: ctx.mon(request.target)?.position_details(),
            what: "unboost"
        )
        .with_opt("from", from);
        ctx.log(event);
        Ok(Some(0))
    }
}

impl AbilityBehavior for ClearBody {}

/// Sharply raises attack whenever another battler lowers one of the owner's stats.
struct Defiant;

impl Hooks for Defiant {
    fn on_post_stat_change(
        &self,
        ctx: &mut HookContext,
        request: &BoostRequest,
        applied: i8,
    ) -> Result<()> {
        if !ctx.is_owner(request.target) || applied >= 0 || !request.caused_by_other() {
            return Ok(());
        }
        let from = ctx.describe_origin();
        ctx.change_stat(
            BoostRequest::new(request.target, Boost::Atk, 2)
                .with_source(Some(request.target))
                .with_from(from),
        )?;
        Ok(())
    }
}

impl AbilityBehavior for Defiant {}

/// Raises speed at the end of every turn after the first on the field.
struct SpeedBoost;

impl Hooks for SpeedBoost {
    fn on_end_of_turn(&self, ctx: &mut HookContext) -> Result<()> {
        let Some(owner) = ctx.owner() else {
            return Ok(());
        };
        if ctx.mon(owner)?.active_turns == 0 {
            return Ok(());
        }
        let from = ctx.describe_origin();
        ctx.change_stat(
            BoostRequest::new(owner, Boost::Spe, 1)
                .with_source(Some(owner))
                .with_from(from),
        )?;
        Ok(())
    }
}

impl AbilityBehavior for SpeedBoost {}

/// Doubles the owner's attack.
struct HugePower;

impl Hooks for HugePower {
    fn atk_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        if ctx.is_owner(hit.user) {
            Ok(Fraction::new(2, 1))
        } else {
            Ok(Fraction::ONE)
        }
    }
}

impl AbilityBehavior for HugePower {}

/// Powers up the owner's weak moves.
struct Technician;

impl Technician {
    const MAX_BASE_POWER: u32 = 60;
}

impl Hooks for Technician {
    fn modifier_priority(&self) -> i32 {
        30
    }

    fn base_power_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        if ctx.is_owner(hit.user) && hit.mov.base_power <= Self::MAX_BASE_POWER {
            Ok(Fraction::new(3, 2))
        } else {
            Ok(Fraction::ONE)
        }
    }
}

impl AbilityBehavior for Technician {}

/// Raises the accuracy of the owner's moves.
struct CompoundEyes;

impl Hooks for CompoundEyes {
    fn chance_of_hit_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        if ctx.is_owner(hit.user) {
            Ok(Fraction::new(13, 10))
        } else {
            Ok(Fraction::ONE)
        }
    }
}

impl AbilityBehavior for CompoundEyes {}

/// Powers up moves of one type while the owner is at a third of its HP or lower.
struct Pinch(Type);

impl Pinch {
    fn multiplier(&self, ctx: &HookContext, hit: &MoveHit) -> Result<Fraction> {
        if !ctx.is_owner(hit.user) || hit.mov.primary_type != self.0 {
            return Ok(Fraction::ONE);
        }
        let mon = ctx.mon(hit.user)?;
        if mon.hp <= mon.max_hp / 3 {
            Ok(Fraction::new(3, 2))
        } else {
            Ok(Fraction::ONE)
        }
    }
}

impl Hooks for Pinch {
    fn atk_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        self.multiplier(ctx, hit)
    }

    fn sp_atk_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        self.multiplier(ctx, hit)
    }
}

impl AbilityBehavior for Pinch {}

/// Doubles the owner's speed in rain.
struct SwiftSwim;

impl Hooks for SwiftSwim {
    fn speed_multiplier(&self, ctx: &mut HookContext, mon: MonHandle) -> Result<Fraction> {
        let raining = ctx.weather().is_some_and(|weather| *weather == *RAIN);
        if ctx.is_owner(mon) && raining {
            Ok(Fraction::new(2, 1))
        } else {
            Ok(Fraction::ONE)
        }
    }
}

impl AbilityBehavior for SwiftSwim {}

/// May paralyze battlers that make contact with the owner.
struct Static;

impl Hooks for Static {
    fn on_post_damage(&self, ctx: &mut HookContext, request: &DamageRequest, _: u32) -> Result<()> {
        let Some(attacker) = contact_attacker(ctx, request) else {
            return Ok(());
        };
        if !attacker_can_act(ctx, attacker)? || !ctx.chance(3, 10) {
            return Ok(());
        }
        let from = ctx.describe_origin();
        ctx.inflict_status(
            StatusRequest::new(attacker, Status::Paralysis)
                .with_source(Some(request.target))
                .with_from(from),
        )?;
        Ok(())
    }
}

impl AbilityBehavior for Static {}

/// Hurts battlers that make contact with the owner.
struct RoughSkin;

impl Hooks for RoughSkin {
    fn on_post_damage(&self, ctx: &mut HookContext, request: &DamageRequest, _: u32) -> Result<()> {
        let Some(attacker) = contact_attacker(ctx, request) else {
            return Ok(());
        };
        if !attacker_can_act(ctx, attacker)? {
            return Ok(());
        }
        let amount = fraction_of_max_hp(ctx, attacker, Fraction::new(1, 8))?;
        ctx.damage(
            DamageRequest::indirect(attacker, amount, DamageKind::Effect("Rough Skin".to_owned()))
                .with_source(Some(request.target)),
        )?;
        Ok(())
    }
}

impl AbilityBehavior for RoughSkin {}

/// Spreads itself to battlers that make contact with the owner.
struct Mummy;

impl Mummy {
    const ID: &'static str = "mummy";
}

impl Hooks for Mummy {
    fn on_post_damage(&self, ctx: &mut HookContext, request: &DamageRequest, _: u32) -> Result<()> {
        let Some(attacker) = contact_attacker(ctx, request) else {
            return Ok(());
        };
        let attacker_data = ctx.mon(attacker)?;
        if !attacker_data.can_act() || attacker_data.ability.id == *Self::ID {
            return Ok(());
        }
        ctx.change_ability(attacker, Self::ID.into())?;
        Ok(())
    }
}

impl AbilityBehavior for Mummy {}

/// Hurts the battler that knocked the owner out with a contact move.
struct Aftermath;

impl Hooks for Aftermath {
    fn on_post_damage_death(
        &self,
        ctx: &mut HookContext,
        request: &DamageRequest,
        _: u32,
    ) -> Result<()> {
        let Some(attacker) = contact_attacker(ctx, request) else {
            return Ok(());
        };
        if !attacker_can_act(ctx, attacker)? {
            return Ok(());
        }
        let amount = fraction_of_max_hp(ctx, attacker, Fraction::new(1, 4))?;
        ctx.damage(
            DamageRequest::indirect(attacker, amount, DamageKind::Effect("Aftermath".to_owned()))
                .with_source(Some(request.target)),
        )?;
        Ok(())
    }
}

impl AbilityBehavior for Aftermath {}

/// Lowers the attack of adjacent foes when the owner enters.
struct Intimidate;

impl Hooks for Intimidate {
    fn on_switch_event(
        &self,
        ctx: &mut HookContext,
        _: Option<MonHandle>,
        who_in: Option<MonHandle>,
    ) -> Result<()> {
        let Some(owner) = who_in.filter(|mon| ctx.is_owner(*mon)) else {
            return Ok(());
        };
        ctx.log_ability_activation()?;
        let from = ctx.describe_origin();
        for foe in ctx.foes_of(owner)? {
            ctx.change_stat(
                BoostRequest::new(foe, Boost::Atk, -1)
                    .with_source(Some(owner))
                    .with_from(from.clone()),
            )?;
        }
        Ok(())
    }
}

impl AbilityBehavior for Intimidate {}

/// Starts a weather when the owner enters.
struct WeatherSetter(&'static str);

impl Hooks for WeatherSetter {
    fn on_switch_event(
        &self,
        ctx: &mut HookContext,
        _: Option<MonHandle>,
        who_in: Option<MonHandle>,
    ) -> Result<()> {
        if !who_in.is_some_and(|mon| ctx.is_owner(mon)) {
            return Ok(());
        }
        ctx.set_weather(Some(self.0.into()))?;
        Ok(())
    }
}

impl AbilityBehavior for WeatherSetter {}

/// Announces the owner on entry. The suppression itself is a behavior flag.
struct Suppressor {
    weather: bool,
    abilities: bool,
}

impl Hooks for Suppressor {
    fn on_switch_event(
        &self,
        ctx: &mut HookContext,
        _: Option<MonHandle>,
        who_in: Option<MonHandle>,
    ) -> Result<()> {
        if who_in.is_some_and(|mon| ctx.is_owner(mon)) {
            ctx.log_ability_activation()?;
        }
        Ok(())
    }
}

impl AbilityBehavior for Suppressor {
    fn suppresses_weather(&self) -> bool {
        self.weather
    }

    fn suppresses_abilities(&self) -> bool {
        self.abilities
    }
}

/// Passes burn, paralysis, and poison back to the battler that inflicted it.
struct Synchronize;

impl Hooks for Synchronize {
    fn on_post_status(&self, ctx: &mut HookContext, request: &StatusRequest) -> Result<()> {
        if !ctx.is_owner(request.target) {
            return Ok(());
        }
        let Some(source) = request.source.filter(|source| *source != request.target) else {
            return Ok(());
        };
        if matches!(request.status, Status::Sleep | Status::Freeze) {
            return Ok(());
        }
        let from = ctx.describe_origin();
        ctx.inflict_status(
            StatusRequest::new(source, request.status)
                .with_source(Some(request.target))
                .with_from(from),
        )?;
        Ok(())
    }
}

impl AbilityBehavior for Synchronize {}

/// Keeps foes from switching out.
struct ShadowTag;

impl ShadowTag {
    const ID: &'static str = "shadowtag";
}

impl Hooks for ShadowTag {
    fn on_switch_prevention(&self, ctx: &mut HookContext, mon: MonHandle) -> Result<Veto> {
        let Some(side) = ctx.owner_side() else {
            return Ok(Veto::Allow);
        };
        let trapped = ctx.mon(mon)?;
        Ok(Veto::from_prevent(
            trapped.side != side && !trapped.has_ability(Self::ID),
        ))
    }
}

impl AbilityBehavior for ShadowTag {}

/// Keeps other battlers from taking the owner's item.
struct StickyHold;

impl Hooks for StickyHold {
    fn on_item_change_prevention(
        &self,
        ctx: &mut HookContext,
        target: MonHandle,
        source: Option<MonHandle>,
    ) -> Result<Veto> {
        if !ctx.is_owner(target) || !source.is_some_and(|source| source != target) {
            return Ok(Veto::Allow);
        }
        ctx.log_ability_activation()?;
        Ok(Veto::Prevent)
    }
}

impl AbilityBehavior for StickyHold {}

pub(super) fn register(registry: &mut AbilityRegistry) {
    registry.register("sturdy", |_: &AbilityData| Rc::new(Sturdy));
    registry.register("insomnia", |_: &AbilityData| Rc::new(StatusImmunity(Status::Sleep)));
    registry.register("limber", |_: &AbilityData| Rc::new(StatusImmunity(Status::Paralysis)));
    registry.register("owntempo", |_: &AbilityData| Rc::new(OwnTempo));
    registry.register("levitate", |_: &AbilityData| Rc::new(Levitate));
    registry.register("thickfat", |_: &AbilityData| Rc::new(ThickFat));
    registry.register("solidrock", |_: &AbilityData| Rc::new(SolidRock));
    registry.register("magicguard", |_: &AbilityData| Rc::new(MagicGuard));
    registry.register("clearbody", |_: &AbilityData| Rc::new(ClearBody));
    registry.register("defiant", |_: &AbilityData| Rc::new(Defiant));
    registry.register("speedboost", |_: &AbilityData| Rc::new(SpeedBoost));
    registry.register("hugepower", |_: &AbilityData| Rc::new(HugePower));
    registry.register("technician", |_: &AbilityData| Rc::new(Technician));
    registry.register("compoundeyes", |_: &AbilityData| Rc::new(CompoundEyes));
    registry.register("blaze", |_: &AbilityData| Rc::new(Pinch(Type::Fire)));
    registry.register("swiftswim", |_: &AbilityData| Rc::new(SwiftSwim));
    registry.register("static", |_: &AbilityData| Rc::new(Static));
    registry.register("roughskin", |_: &AbilityData| Rc::new(RoughSkin));
    registry.register(Mummy::ID, |_: &AbilityData| Rc::new(Mummy));
    registry.register("aftermath", |_: &AbilityData| Rc::new(Aftermath));
    registry.register("intimidate", |_: &AbilityData| Rc::new(Intimidate));
    registry.register("drizzle", |_: &AbilityData| Rc::new(WeatherSetter(RAIN)));
    registry.register("cloudnine", |_: &AbilityData| {
        Rc::new(Suppressor {
            weather: true,
            abilities: false,
        })
    });
    registry.register("neutralizinggas", |_: &AbilityData| {
        Rc::new(Suppressor {
            weather: false,
            abilities: true,
        })
    });
    registry.register("synchronize", |_: &AbilityData| Rc::new(Synchronize));
    registry.register(ShadowTag::ID, |_: &AbilityData| Rc::new(ShadowTag));
    registry.register("stickyhold", |_: &AbilityData| Rc::new(StickyHold));
}
