use std::{
    fmt,
    fmt::Display,
};

use anyhow::Result;
use scuffle_data::{
    AbilityData,
    BoostTable,
    DataStore,
    Id,
    ItemData,
    MoveCategory,
    StatTable,
    Type,
};

use crate::{
    battle::calculate_mon_stats,
    config::MonData,
    effect::{
        AbilityEffect,
        EffectStore,
        HeldItem,
        StatusCondition,
    },
    error::{
        WrapOptionError,
        WrapResultError,
    },
    moves::MoveInstance,
    registry::Registries,
};

/// Handle to a battler in a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonHandle(pub usize);

impl Display for MonHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The last time a battler was hit by a damaging move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRecord {
    pub source: MonHandle,
    pub category: MoveCategory,
    pub damage: u32,
    pub turn: u64,
}

/// A battler.
///
/// Battlers are only mutated through handlers. Behaviors and effects read them through a
/// [`HookContext`][crate::effect::HookContext].
#[derive(Debug)]
pub struct Mon {
    pub handle: MonHandle,
    pub name: String,
    pub species: String,
    pub player_id: String,
    pub side: usize,
    pub team_position: usize,
    pub active_position: Option<usize>,
    pub level: u8,
    pub types: Vec<Type>,
    pub stats: StatTable,
    pub hp: u32,
    pub max_hp: u32,
    /// The ability the battler entered the battle with.
    pub base_ability: Id,
    pub ability: AbilityEffect,
    pub item: Option<HeldItem>,
    pub status: Option<StatusCondition>,
    pub boosts: BoostTable,
    pub effects: EffectStore,
    pub moves: Vec<MoveInstance>,
    pub last_move: Option<Id>,
    pub last_hit: Option<HitRecord>,
    /// Move the battler is locked into by its item.
    pub locked_move: Option<Id>,
    pub fainted: bool,
    /// Turns spent on the field since the battler last switched in.
    pub active_turns: u32,
}

impl Mon {
    /// Creates a battler from its team entry.
    pub fn new(
        handle: MonHandle,
        data: &MonData,
        side: usize,
        team_position: usize,
        player_id: &str,
        store: &dyn DataStore,
        registries: &Registries,
    ) -> Result<Self> {
        let species = store
            .get_species(&Id::from(data.species.as_str()))?
            .wrap_not_found_error_with_format(format_args!("species {}", data.species))?;
        let stats = calculate_mon_stats(&species.base_stats, data);

        let ability_name = data
            .ability
            .clone()
            .or_else(|| species.default_ability.clone())
            .unwrap_or_else(|| "No Ability".to_owned());
        let ability = Self::create_ability(&Id::from(ability_name.as_str()), store, registries)?;

        let item = match &data.item {
            Some(item) => Some(Self::create_item(&Id::from(item.as_str()), store, registries)?),
            None => None,
        };

        let moves = data
            .moves
            .iter()
            .map(|name| {
                let id = Id::from(name.as_str());
                let mov = store
                    .get_move(&id)?
                    .wrap_not_found_error_with_format(format_args!("move {name}"))?;
                Ok(MoveInstance::new(id, mov, registries))
            })
            .collect::<Result<Vec<_>>>()
            .wrap_error_with_format(format_args!("failed to build moves for {}", data.name))?;

        Ok(Self {
            handle,
            name: data.name.clone(),
            species: species.name.clone(),
            player_id: player_id.to_owned(),
            side,
            team_position,
            active_position: None,
            level: data.level,
            types: species.types(),
            hp: stats.hp as u32,
            max_hp: stats.hp as u32,
            stats,
            base_ability: ability.id.clone(),
            ability,
            item,
            status: None,
            boosts: BoostTable::default(),
            effects: EffectStore::new(),
            moves,
            last_move: None,
            last_hit: None,
            locked_move: None,
            fainted: false,
            active_turns: 0,
        })
    }

    /// Creates an ability instance. Abilities missing from the data store are still created,
    /// with placeholder data.
    pub fn create_ability(
        id: &Id,
        store: &dyn DataStore,
        registries: &Registries,
    ) -> Result<AbilityEffect> {
        let data = store
            .get_ability(id)?
            .unwrap_or_else(|| AbilityData::unknown(id));
        let behavior = registries.abilities.create(id, &data);
        Ok(AbilityEffect::new(id.clone(), data, behavior))
    }

    pub fn create_item(id: &Id, store: &dyn DataStore, registries: &Registries) -> Result<HeldItem> {
        let data: ItemData = store
            .get_item(id)?
            .wrap_not_found_error_with_format(format_args!("item {id}"))?;
        let behavior = registries.items.create(id, &data);
        Ok(HeldItem::new(id.clone(), data, behavior))
    }

    pub fn active(&self) -> bool {
        self.active_position.is_some()
    }

    /// Checks if the battler is on the field and able to act.
    pub fn can_act(&self) -> bool {
        self.active() && !self.fainted && self.hp > 0
    }

    pub fn has_type(&self, typ: Type) -> bool {
        self.types.contains(&typ)
    }

    pub fn has_ability(&self, ability: &str) -> bool {
        self.ability.active() && self.ability.id == *ability
    }

    pub fn health(&self) -> String {
        format!("{}/{}", self.hp, self.max_hp)
    }

    /// Identifies the battler in the event log, such as `Pikachu,player-1,1`.
    pub fn position_details(&self) -> String {
        match self.active_position {
            Some(position) => format!("{},{},{}", self.name, self.player_id, position + 1),
            None => format!("{},{}", self.name, self.player_id),
        }
    }

    /// Finds the slot holding the move.
    pub fn move_slot(&self, id: &Id) -> Option<usize> {
        self.moves.iter().position(|mov| mov.id == *id)
    }
}
