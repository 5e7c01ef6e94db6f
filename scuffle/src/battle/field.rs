use scuffle_data::Id;

use crate::effect::{
    EffectInstance,
    EffectStore,
};

/// The field shared by both sides.
#[derive(Debug, Default)]
pub struct Field {
    pub weather: Option<EffectInstance>,
    pub terrain: Option<EffectInstance>,
    /// Other whole-field effects.
    pub effects: EffectStore,
}

impl Field {
    /// The weather, regardless of suppression.
    pub fn weather(&self) -> Option<&Id> {
        self.weather.as_ref().map(|weather| &weather.id)
    }

    pub fn terrain(&self) -> Option<&Id> {
        self.terrain.as_ref().map(|terrain| &terrain.id)
    }
}
