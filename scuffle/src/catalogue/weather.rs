//! Weather and terrain.

use std::rc::Rc;

use anyhow::Result;
use scuffle_data::{
    Fraction,
    Id,
    MoveCategory,
    Status,
    Type,
};

use crate::{
    catalogue::fraction_of_max_hp,
    effect::{
        DamageKind,
        DamageRequest,
        EffectBehavior,
        EffectDuration,
        HookContext,
        Hooks,
        MoveHit,
        StatusRequest,
        Veto,
    },
    registry::EffectRegistry,
};

pub const RAIN: &str = "raindance";
pub const SUN: &str = "sunnyday";
pub const SANDSTORM: &str = "sandstorm";
pub const HAIL: &str = "hail";
pub const ELECTRIC_TERRAIN: &str = "electricterrain";

const WEATHER_TURNS: u8 = 5;

/// Weather that strengthens one type and weakens another.
struct TypeWeather {
    name: &'static str,
    boosted: Type,
    weakened: Type,
}

impl Hooks for TypeWeather {
    fn mod2_multiplier(&self, _: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        if hit.mov.primary_type == self.boosted {
            Ok(Fraction::new(3, 2))
        } else if hit.mov.primary_type == self.weakened {
            Ok(Fraction::new(1, 2))
        } else {
            Ok(Fraction::ONE)
        }
    }
}

impl EffectBehavior for TypeWeather {
    fn name(&self) -> &str {
        self.name
    }

    fn duration(&self, _: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(WEATHER_TURNS))
    }
}

/// Weather that hurts every active battler without one of the listed types at the end of each
/// turn.
struct DamagingWeather {
    name: &'static str,
    unaffected: &'static [Type],
    /// Types whose special defense the weather raises by half.
    fortified: Option<Type>,
}

impl Hooks for DamagingWeather {
    fn sp_def_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        let Some(typ) = self.fortified else {
            return Ok(Fraction::ONE);
        };
        if hit.mov.category == MoveCategory::Special && ctx.mon(hit.target)?.has_type(typ) {
            Ok(Fraction::new(3, 2))
        } else {
            Ok(Fraction::ONE)
        }
    }

    fn on_end_of_turn(&self, ctx: &mut HookContext) -> Result<()> {
        for mon in ctx.battle().active_mons() {
            let data = ctx.mon(mon)?;
            if data.hp == 0 || self.unaffected.iter().any(|typ| data.has_type(*typ)) {
                continue;
            }
            let amount = fraction_of_max_hp(ctx, mon, Fraction::new(1, 16))?;
            ctx.damage(DamageRequest::indirect(
                mon,
                amount,
                DamageKind::Effect(self.name.to_owned()),
            ))?;
        }
        Ok(())
    }
}

impl EffectBehavior for DamagingWeather {
    fn name(&self) -> &str {
        self.name
    }

    fn duration(&self, _: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(WEATHER_TURNS))
    }
}

/// Powers up electric moves of grounded users and keeps grounded battlers awake.
struct ElectricTerrain;

impl Hooks for ElectricTerrain {
    fn base_power_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        if hit.mov.primary_type == Type::Electric && ctx.is_grounded(hit.user)? {
            Ok(Fraction::new(13, 10))
        } else {
            Ok(Fraction::ONE)
        }
    }

    fn on_status_prevention(&self, ctx: &mut HookContext, request: &StatusRequest) -> Result<Veto> {
        if request.status != Status::Sleep || !ctx.is_grounded(request.target)? {
            return Ok(Veto::Allow);
        }
        let event = log_event!("activate", mon: ctx.mon(request.target)?.position_details())
            .with("effect", "Electric Terrain");
        ctx.log(event);
        Ok(Veto::Prevent)
    }
}

impl EffectBehavior for ElectricTerrain {
    fn name(&self) -> &str {
        "Electric Terrain"
    }

    fn duration(&self, _: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(WEATHER_TURNS))
    }
}

pub(super) fn register(registry: &mut EffectRegistry) {
    registry.register(RAIN, |_: &Id| {
        Rc::new(TypeWeather {
            name: "Rain",
            boosted: Type::Water,
            weakened: Type::Fire,
        })
    });
    registry.register(SUN, |_: &Id| {
        Rc::new(TypeWeather {
            name: "Sun",
            boosted: Type::Fire,
            weakened: Type::Water,
        })
    });
    registry.register(SANDSTORM, |_: &Id| {
        Rc::new(DamagingWeather {
            name: "Sandstorm",
            unaffected: &[Type::Rock, Type::Ground, Type::Steel],
            fortified: Some(Type::Rock),
        })
    });
    registry.register(HAIL, |_: &Id| {
        Rc::new(DamagingWeather {
            name: "Hail",
            unaffected: &[Type::Ice],
            fortified: None,
        })
    });
    registry.register(ELECTRIC_TERRAIN, |_: &Id| Rc::new(ElectricTerrain));
}
