use std::rc::Rc;

use scuffle_data::{
    MoveCategory,
    MoveData,
    Status,
};

use crate::{
    catalogue::{
        ELECTRIC_TERRAIN,
        HAIL,
        LIGHT_SCREEN,
        RAIN,
        REFLECT,
        SAFEGUARD,
        SANDSTORM,
        SPIKES,
        STEALTH_ROCK,
        SUN,
        TAILWIND,
    },
    moves::{
        CounterMove,
        CrashOnMiss,
        DelayedHitMove,
        FixedAmount,
        FixedDamage,
        OneHitKnockOut,
        ProtectMove,
        RandomStatusMove,
        RemoveItemMove,
        ReplaceAbilityMove,
        SideConditionMove,
        StatusBoostedPower,
        TerrainMove,
        TwoTurnMove,
        WeatherMove,
    },
    registry::MoveRegistry,
};

pub(super) fn register(registry: &mut MoveRegistry) {
    registry.register("seismictoss", |_: &MoveData| {
        Rc::new(FixedDamage(FixedAmount::Level))
    });
    registry.register("nightshade", |_: &MoveData| {
        Rc::new(FixedDamage(FixedAmount::Level))
    });
    registry.register("sonicboom", |_: &MoveData| {
        Rc::new(FixedDamage(FixedAmount::Constant(20)))
    });
    registry.register("dragonrage", |_: &MoveData| {
        Rc::new(FixedDamage(FixedAmount::Constant(40)))
    });
    registry.register("superfang", |_: &MoveData| {
        Rc::new(FixedDamage(FixedAmount::HalfCurrentHp))
    });

    for id in ["fissure", "guillotine", "horndrill", "sheercold"] {
        registry.register(id, |_: &MoveData| Rc::new(OneHitKnockOut));
    }

    registry.register("solarbeam", |_: &MoveData| {
        Rc::new(TwoTurnMove {
            skip_in_weather: Some(SUN),
        })
    });
    for id in ["razorwind", "skyattack"] {
        registry.register(id, |_: &MoveData| {
            Rc::new(TwoTurnMove {
                skip_in_weather: None,
            })
        });
    }

    registry.register("counter", |_: &MoveData| {
        Rc::new(CounterMove {
            category: MoveCategory::Physical,
        })
    });
    registry.register("mirrorcoat", |_: &MoveData| {
        Rc::new(CounterMove {
            category: MoveCategory::Special,
        })
    });
    for id in ["highjumpkick", "jumpkick"] {
        registry.register(id, |_: &MoveData| Rc::new(CrashOnMiss));
    }

    registry.register("raindance", |_: &MoveData| Rc::new(WeatherMove(RAIN)));
    registry.register("sunnyday", |_: &MoveData| Rc::new(WeatherMove(SUN)));
    registry.register("sandstorm", |_: &MoveData| Rc::new(WeatherMove(SANDSTORM)));
    registry.register("hail", |_: &MoveData| Rc::new(WeatherMove(HAIL)));
    registry.register("electricterrain", |_: &MoveData| {
        Rc::new(TerrainMove(ELECTRIC_TERRAIN))
    });

    for id in [
        STEALTH_ROCK,
        SPIKES,
        REFLECT,
        LIGHT_SCREEN,
        SAFEGUARD,
        TAILWIND,
    ] {
        registry.register(id, move |_: &MoveData| Rc::new(SideConditionMove(id)));
    }

    registry.register("futuresight", |_: &MoveData| Rc::new(DelayedHitMove));
    registry.register("knockoff", |_: &MoveData| Rc::new(RemoveItemMove));
    registry.register("worryseed", |_: &MoveData| {
        Rc::new(ReplaceAbilityMove(Some("insomnia")))
    });
    registry.register("entrainment", |_: &MoveData| Rc::new(ReplaceAbilityMove(None)));
    for id in ["protect", "detect"] {
        registry.register(id, |_: &MoveData| Rc::new(ProtectMove));
    }
    registry.register("facade", |_: &MoveData| Rc::new(StatusBoostedPower));
    registry.register("triattack", |_: &MoveData| {
        Rc::new(RandomStatusMove {
            chance: 20,
            statuses: &[Status::Burn, Status::Paralysis, Status::Freeze],
        })
    });
}
