use crate::{
    battle::{
        Choice,
        MonHandle,
        Request,
    },
    effect::EffectStore,
};

/// One side of the battle, controlled by a single player.
#[derive(Debug)]
pub struct Side {
    pub index: usize,
    pub name: String,
    pub player_id: String,
    pub player_name: String,
    /// Every battler on the team, in team order.
    pub team: Vec<MonHandle>,
    /// Battler in each active position.
    pub active: Vec<Option<MonHandle>>,
    /// Effects on the whole side, such as entry hazards and screens.
    pub effects: EffectStore,
    /// Effects on each active position, such as a delayed hit.
    pub slot_effects: Vec<EffectStore>,
    pub request: Option<Request>,
    pub choice: Option<Vec<Choice>>,
}

impl Side {
    pub fn new(
        index: usize,
        name: String,
        player_id: String,
        player_name: String,
        active_per_side: usize,
    ) -> Self {
        Self {
            index,
            name,
            player_id,
            player_name,
            team: Vec::new(),
            active: vec![None; active_per_side],
            effects: EffectStore::new(),
            slot_effects: vec![EffectStore::new(); active_per_side],
            request: None,
            choice: None,
        }
    }

    /// Battlers currently in an active position.
    pub fn active_mons(&self) -> impl Iterator<Item = MonHandle> + '_ {
        self.active.iter().filter_map(|mon| *mon)
    }

    /// The side opposing this one.
    pub fn foe_index(&self) -> usize {
        1 - self.index
    }
}
