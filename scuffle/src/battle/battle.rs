use std::{
    cmp::Reverse,
    collections::VecDeque,
    rc::Rc,
};

use anyhow::Result;
use itertools::Itertools;
use scuffle_data::{
    AbilityFlag,
    Boost,
    DataStore,
    Id,
    MoveData,
    Stat,
    Type,
    TypeChart,
};
use scuffle_prng::PseudoRandomNumberGenerator;

use crate::{
    battle::{
        Action,
        Choice,
        Field,
        ModifierChain,
        ModifierStage,
        Mon,
        MonHandle,
        MoveAction,
        MoveChoice,
        Request,
        Side,
        SkipAction,
        SwitchAction,
        boosted_stat,
        dispatch,
        parse_choices,
        pipeline,
        speed_sort,
    },
    config::{
        BattleOptions,
        BattleType,
        EngineOptions,
    },
    effect::{
        ForcedAction,
        HookOrigin,
    },
    error::{
        WrapOptionError,
        WrapResultError,
        choice_error,
        general_error,
    },
    handlers,
    log::{
        Event,
        EventLog,
    },
    moves::ActiveMove,
    registry::Registries,
};

/// Battles that reach this turn end in a tie.
const TURN_LIMIT: u64 = 1000;

/// A single battle between two sides.
///
/// The battle owns every battler, side, and field object. Players drive it by answering
/// requests with [`Battle::set_player_choice`], and read what happened through
/// [`Battle::new_logs`].
///
/// All battle logic runs single-threaded and to completion: one action, including every
/// mutation it cascades into, finishes before the next begins.
pub struct Battle<'d> {
    pub(crate) data: &'d dyn DataStore,
    pub(crate) registries: &'d Registries,
    pub(crate) engine_options: EngineOptions,
    pub(crate) battle_type: BattleType,
    pub(crate) prng: Box<dyn PseudoRandomNumberGenerator>,
    log: EventLog,
    pub(crate) mons: Vec<Mon>,
    pub(crate) sides: Vec<Side>,
    pub(crate) field: Field,
    type_chart: TypeChart,
    turn: u64,
    /// Number of handlers currently running inside one another.
    pub(crate) cascade_depth: u8,
    pub(crate) active_move: Option<ActiveMove>,
    /// Battlers whose HP reached zero, waiting for their faint message.
    pub(crate) faint_queue: VecDeque<MonHandle>,
    started: bool,
    ended: bool,
    winner: Option<usize>,
}

// Block for constructors.
impl<'d> Battle<'d> {
    /// Creates a new battle. Nothing happens until [`Battle::start`] is called.
    pub fn new(
        options: BattleOptions,
        engine_options: EngineOptions,
        data: &'d dyn DataStore,
        registries: &'d Registries,
    ) -> Result<Self> {
        options.validate()?;
        let prng = (engine_options.rng_factory)(options.seed);
        let type_chart = data
            .get_type_chart()
            .wrap_error_with_message("failed to load type chart")?;

        let active_per_side = options.battle_type.active_per_side();
        let mut mons = Vec::new();
        let mut sides = Vec::new();
        for (index, side_data) in [options.side_1, options.side_2].into_iter().enumerate() {
            let player = side_data.player;
            let mut side = Side::new(
                index,
                side_data.name,
                player.id,
                player.name,
                active_per_side,
            );
            for (team_position, member) in player.team.members.iter().enumerate() {
                let handle = MonHandle(mons.len());
                mons.push(Mon::new(
                    handle,
                    member,
                    index,
                    team_position,
                    &side.player_id,
                    data,
                    registries,
                )?);
                side.team.push(handle);
            }
            sides.push(side);
        }

        Ok(Self {
            data,
            registries,
            engine_options,
            battle_type: options.battle_type,
            prng,
            log: EventLog::new(),
            mons,
            sides,
            field: Field::default(),
            type_chart,
            turn: 0,
            cascade_depth: 0,
            active_move: None,
            faint_queue: VecDeque::new(),
            started: false,
            ended: false,
            winner: None,
        })
    }
}

// Block for getters.
impl<'d> Battle<'d> {
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// The winning side, once the battle has ended. `None` after a tie.
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn battle_type(&self) -> BattleType {
        self.battle_type
    }

    pub fn engine_options(&self) -> &EngineOptions {
        &self.engine_options
    }

    pub fn type_chart(&self) -> &TypeChart {
        &self.type_chart
    }

    pub fn data(&self) -> &'d dyn DataStore {
        self.data
    }

    pub fn prng_mut(&mut self) -> &mut dyn PseudoRandomNumberGenerator {
        self.prng.as_mut()
    }

    pub fn mon(&self, mon: MonHandle) -> Result<&Mon> {
        self.mons
            .get(mon.0)
            .wrap_not_found_error_with_format(format_args!("mon {mon}"))
    }

    pub fn mon_mut(&mut self, mon: MonHandle) -> Result<&mut Mon> {
        self.mons
            .get_mut(mon.0)
            .wrap_not_found_error_with_format(format_args!("mon {mon}"))
    }

    pub fn mons(&self) -> impl Iterator<Item = &Mon> {
        self.mons.iter()
    }

    pub fn side(&self, side: usize) -> Result<&Side> {
        self.sides
            .get(side)
            .wrap_not_found_error_with_format(format_args!("side {side}"))
    }

    pub fn side_mut(&mut self, side: usize) -> Result<&mut Side> {
        self.sides
            .get_mut(side)
            .wrap_not_found_error_with_format(format_args!("side {side}"))
    }

    pub fn sides(&self) -> impl Iterator<Item = &Side> {
        self.sides.iter()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// The battler at a team position.
    pub fn team_mon(&self, side: usize, team_position: usize) -> Result<MonHandle> {
        self.side(side)?
            .team
            .get(team_position)
            .copied()
            .wrap_not_found_error_with_format(format_args!(
                "team position {team_position} on side {side}"
            ))
    }

    /// The battler in an active position, if any.
    pub fn active_mon(&self, side: usize, position: usize) -> Option<MonHandle> {
        self.sides.get(side)?.active.get(position).copied().flatten()
    }

    fn side_index_for_player(&self, player_id: &str) -> Result<usize> {
        self.sides
            .iter()
            .position(|side| side.player_id == player_id)
            .ok_or_else(|| choice_error(format!("{player_id} is not a player in this battle")))
    }

    /// Data for a move the battler is using, from its move slot if it has one.
    pub(crate) fn move_data(&self, mon: MonHandle, id: &Id) -> Result<Rc<MoveData>> {
        let data = self.mon(mon)?;
        if let Some(slot) = data.move_slot(id) {
            if let Some(instance) = data.moves.get(slot) {
                return Ok(instance.data.clone());
            }
        }
        let data = self
            .data
            .get_move(id)?
            .wrap_not_found_error_with_format(format_args!("move {id}"))?;
        Ok(Rc::new(data))
    }
}

// Block for logs.
impl<'d> Battle<'d> {
    pub fn has_new_logs(&self) -> bool {
        self.log.has_new_events()
    }

    /// Every event logged since the last call.
    pub fn new_logs(&mut self) -> Vec<String> {
        self.log
            .read_out()
            .iter()
            .map(|event| event.to_string())
            .collect()
    }

    /// Every event ever logged.
    pub fn all_logs(&self) -> Vec<String> {
        self.log
            .events()
            .iter()
            .map(|event| event.to_string())
            .collect()
    }

    pub(crate) fn log(&mut self, event: Event) {
        self.log.push(event)
    }
}

// Block for battle-wide queries.
impl<'d> Battle<'d> {
    /// Active battlers that have not fainted, in position order.
    pub fn active_mons(&self) -> Vec<MonHandle> {
        self.sides
            .iter()
            .flat_map(|side| side.active_mons())
            .filter(|mon| {
                self.mons
                    .get(mon.0)
                    .is_some_and(|mon| !mon.fainted && mon.hp > 0)
            })
            .collect()
    }

    /// Active battlers in effective speed order.
    ///
    /// Ties keep position order, so this never draws from the random number generator.
    pub fn active_mons_by_speed(&mut self) -> Result<Vec<MonHandle>> {
        let mons = self.active_mons();
        let speeds = mons
            .into_iter()
            .map(|mon| Ok((mon, self.effective_speed(mon)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(speeds
            .into_iter()
            .sorted_by_key(|(_, speed)| Reverse(*speed))
            .map(|(mon, _)| mon)
            .collect())
    }

    /// Speed after stat stages and every speed multiplier in play.
    pub fn effective_speed(&mut self, mon: MonHandle) -> Result<u64> {
        let speed = {
            let data = self.mon(mon)?;
            boosted_stat(data.stats.get(Stat::Spe) as u64, data.boosts.get(Boost::Spe))
        };
        let origins = dispatch::origins_for(self, None, Some(mon), false);
        let mut chain = ModifierChain::new();
        dispatch::collect_modifiers(
            self,
            &origins,
            ModifierStage::Speed,
            &mut chain,
            |hooks, context| hooks.speed_multiplier(context, mon),
        )?;
        Ok(chain.apply(ModifierStage::Speed, speed))
    }

    /// Active foes the battler can reach.
    pub fn adjacent_foes(&self, mon: MonHandle) -> Result<Vec<MonHandle>> {
        let side = self.mon(mon)?.side;
        let foe_side = self.side(side)?.foe_index();
        Ok(self
            .side(foe_side)?
            .active_mons()
            .filter(|foe| {
                self.mons
                    .get(foe.0)
                    .is_some_and(|foe| !foe.fainted && foe.hp > 0)
            })
            .collect())
    }

    /// Active allies of the battler, not including itself.
    pub fn adjacent_allies(&self, mon: MonHandle) -> Result<Vec<MonHandle>> {
        let side = self.mon(mon)?.side;
        Ok(self
            .side(side)?
            .active_mons()
            .filter(|ally| *ally != mon)
            .filter(|ally| {
                self.mons
                    .get(ally.0)
                    .is_some_and(|ally| !ally.fainted && ally.hp > 0)
            })
            .collect())
    }

    /// Checks if the battler's ability is hidden from dispatch.
    pub fn ability_suppressed(&self, mon: MonHandle) -> bool {
        self.mon(mon).map_or(true, |data| data.ability.suppressed)
    }

    /// Recomputes which abilities are hidden by another active battler's ability.
    ///
    /// Only battlers on the field can be suppressed. Returns the battlers whose ability was
    /// hidden before and is visible again.
    pub fn refresh_ability_suppression(&mut self) -> Vec<MonHandle> {
        let active = self.active_mons();
        let suppressors = active
            .iter()
            .copied()
            .filter(|mon| {
                self.mons
                    .get(mon.0)
                    .is_some_and(|data| data.can_act() && data.ability.behavior.suppresses_abilities())
            })
            .collect::<Vec<_>>();
        let mut restored = Vec::new();
        for (index, data) in self.mons.iter_mut().enumerate() {
            let mon = MonHandle(index);
            let suppressed = active.contains(&mon)
                && !data.ability.data.has_flag(AbilityFlag::NoSuppress)
                && suppressors.iter().any(|suppressor| *suppressor != mon);
            if data.ability.suppressed && !suppressed {
                restored.push(mon);
            }
            data.ability.suppressed = suppressed;
        }
        restored
    }

    /// Checks if an active ability hides the weather.
    pub fn weather_suppressed(&self) -> bool {
        self.active_mons().into_iter().any(|mon| {
            !self.ability_suppressed(mon)
                && self
                    .mons
                    .get(mon.0)
                    .is_some_and(|mon| mon.ability.behavior.suppresses_weather())
        })
    }

    /// The weather, unless it is suppressed.
    pub fn effective_weather(&self) -> Option<&Id> {
        if self.weather_suppressed() {
            None
        } else {
            self.field.weather()
        }
    }

    pub fn terrain(&self) -> Option<&Id> {
        self.field.terrain()
    }

    /// Checks if the battler touches the ground.
    pub fn is_grounded(&self, mon: MonHandle) -> Result<bool> {
        let data = self.mon(mon)?;
        if data.has_type(Type::Flying) {
            return Ok(false);
        }
        let levitating =
            !self.ability_suppressed(mon) && data.ability.behavior.grants_levitation();
        Ok(!levitating)
    }

    /// Team positions of battlers on the side that could switch in.
    pub fn switchable(&self, side: usize) -> Result<Vec<usize>> {
        Ok(self
            .side(side)?
            .team
            .iter()
            .enumerate()
            .filter(|(_, mon)| {
                self.mons
                    .get(mon.0)
                    .is_some_and(|mon| !mon.active() && !mon.fainted && mon.hp > 0)
            })
            .map(|(team_position, _)| team_position)
            .collect())
    }
}

// Block for the public battle flow.
impl<'d> Battle<'d> {
    /// Starts the battle: sends out the lead battlers and makes the first turn request.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(general_error("battle already started"));
        }
        self.started = true;

        let event = log_event!("info", battletype: self.battle_type);
        self.log(event);
        for index in 0..self.sides.len() {
            let side = self.side(index)?;
            let event = log_event!(
                "player",
                id: &side.player_id,
                name: &side.player_name,
                side: index
            );
            self.log(event);
        }
        self.log(log_event!("start"));

        for side in 0..self.sides.len() {
            let positions = self.side(side)?.active.len();
            let leads = self
                .side(side)?
                .team
                .iter()
                .copied()
                .take(positions)
                .collect::<Vec<_>>();
            for (position, mon) in leads.into_iter().enumerate() {
                handlers::place_mon(self, side, position, mon)?;
            }
        }
        for mon in self.active_mons_by_speed()? {
            handlers::run_switch_in_events(self, mon, None)?;
        }
        self.faint_messages()?;
        if self.ended {
            return Ok(());
        }
        self.request_switches_or_next_turn()
    }

    /// Checks if every player with a request has made a choice.
    pub fn ready_to_continue(&self) -> bool {
        let mut requests = self
            .sides
            .iter()
            .filter(|side| side.request.is_some())
            .peekable();
        requests.peek().is_some() && requests.all(|side| side.choice.is_some())
    }

    /// The request the player must answer, if any.
    pub fn request_for_player(&self, player_id: &str) -> Option<Request> {
        self.sides
            .iter()
            .find(|side| side.player_id == player_id)
            .and_then(|side| side.request.clone())
    }

    /// Sets the player's choice for their active request.
    ///
    /// Invalid choices are rejected with a [`ChoiceError`][crate::error::ChoiceError] and leave
    /// the request open.
    pub fn set_player_choice(&mut self, player_id: &str, input: &str) -> Result<()> {
        if self.ended {
            return Err(choice_error("the battle is over"));
        }
        let side = self.side_index_for_player(player_id)?;
        let request = self
            .side(side)?
            .request
            .clone()
            .ok_or_else(|| choice_error(format!("{player_id} has no active request")))?;
        let choices = parse_choices(input)?;
        self.validate_choices(side, &request, &choices)?;
        self.side_mut(side)?.choice = Some(choices);

        if self.engine_options.auto_continue && self.ready_to_continue() {
            self.continue_battle()?;
        }
        Ok(())
    }

    /// Runs the battle until the next request.
    pub fn continue_battle(&mut self) -> Result<()> {
        if !self.ready_to_continue() {
            return Err(general_error(
                "cannot continue: not every player has made a choice",
            ));
        }
        let mut turn = true;
        let mut choices = Vec::new();
        for side in &mut self.sides {
            if let (Some(request), Some(side_choices)) = (side.request.take(), side.choice.take()) {
                turn = turn && request == Request::Turn;
                choices.push((side.index, side_choices));
            }
        }
        if turn {
            self.run_turn(choices)
        } else {
            self.run_replacements(choices)
        }
    }
}

// Block for choice validation.
impl<'d> Battle<'d> {
    fn validate_choices(&mut self, side: usize, request: &Request, choices: &[Choice]) -> Result<()> {
        let active = self.side(side)?.active.clone();
        if choices.len() != active.len() {
            return Err(choice_error(format!(
                "expected {} choices, got {}",
                active.len(),
                choices.len()
            )));
        }

        let mut switching_in = Vec::new();
        for (position, choice) in choices.iter().enumerate() {
            let mon = active[position].filter(|mon| self.mon(*mon).is_ok_and(|mon| mon.can_act()));
            match request {
                Request::Turn => match (choice, mon) {
                    (Choice::Pass, None) => (),
                    (Choice::Pass, Some(_)) => {
                        if !self.engine_options.allow_pass {
                            return Err(choice_error(format!(
                                "the battler in position {position} must act"
                            )));
                        }
                    }
                    (_, None) => {
                        return Err(choice_error(format!(
                            "no battler can act in position {position}"
                        )));
                    }
                    (Choice::Move(choice), Some(mon)) => self.validate_move_choice(mon, choice)?,
                    (Choice::Switch(team_position), Some(mon)) => {
                        self.validate_switch_choice(side, *team_position, &switching_in)?;
                        if !handlers::can_switch(self, mon)? {
                            return Err(choice_error(format!(
                                "{} is trapped",
                                self.mon(mon)?.name
                            )));
                        }
                        switching_in.push(*team_position);
                    }
                },
                Request::Switch { positions } => {
                    let needs_switch = positions.contains(&position);
                    match choice {
                        Choice::Switch(team_position) if needs_switch => {
                            self.validate_switch_choice(side, *team_position, &switching_in)?;
                            switching_in.push(*team_position);
                        }
                        Choice::Pass if !needs_switch => (),
                        Choice::Pass => {
                            let remaining = self
                                .switchable(side)?
                                .into_iter()
                                .filter(|team_position| !switching_in.contains(team_position))
                                .count();
                            if remaining > 0 {
                                return Err(choice_error(format!(
                                    "position {position} must switch"
                                )));
                            }
                        }
                        _ => {
                            return Err(choice_error(format!(
                                "position {position} can only {}",
                                if needs_switch { "switch" } else { "pass" }
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_move_choice(&self, mon: MonHandle, choice: &MoveChoice) -> Result<()> {
        let data = self.mon(mon)?;
        let slot = data.moves.get(choice.slot).ok_or_else(|| {
            choice_error(format!("{} has no move in slot {}", data.name, choice.slot))
        })?;
        if slot.pp == 0 {
            return Err(choice_error(format!(
                "{} has no PP left for {}",
                data.name, slot.data.name
            )));
        }
        if let Some(locked) = &data.locked_move {
            if *locked != slot.id {
                return Err(choice_error(format!(
                    "{} is locked into {locked}",
                    data.name
                )));
            }
        }
        if let Some(target) = choice.target {
            self.resolve_choice_target(mon, target)?;
        }
        Ok(())
    }

    fn validate_switch_choice(
        &self,
        side: usize,
        team_position: usize,
        switching_in: &[usize],
    ) -> Result<()> {
        let mon = self
            .side(side)?
            .team
            .get(team_position)
            .copied()
            .ok_or_else(|| choice_error(format!("no battler at team position {team_position}")))?;
        let data = self.mon(mon)?;
        if data.fainted || data.hp == 0 {
            return Err(choice_error(format!("{} has fainted", data.name)));
        }
        if data.active() {
            return Err(choice_error(format!("{} is already active", data.name)));
        }
        if switching_in.contains(&team_position) {
            return Err(choice_error(format!(
                "{} is already switching in",
                data.name
            )));
        }
        Ok(())
    }

    /// Resolves a relative target position to the battler currently there.
    fn resolve_choice_target(&self, mon: MonHandle, target: isize) -> Result<Option<MonHandle>> {
        let side = self.mon(mon)?.side;
        let (side, position) = match target {
            0 => return Err(choice_error("target position 0 is invalid")),
            target if target > 0 => (self.side(side)?.foe_index(), target as usize - 1),
            target => (side, target.unsigned_abs() - 1),
        };
        let active = &self.side(side)?.active;
        if position >= active.len() {
            return Err(choice_error(format!("target position {target} is out of range")));
        }
        Ok(active[position])
    }
}

// Block for the turn loop.
impl<'d> Battle<'d> {
    fn run_turn(&mut self, choices: Vec<(usize, Vec<Choice>)>) -> Result<()> {
        let mut actions = Vec::new();
        for (side, side_choices) in choices {
            for (position, choice) in side_choices.into_iter().enumerate() {
                let Some(mon) = self.active_mon(side, position) else {
                    continue;
                };
                if !self.mon(mon)?.can_act() {
                    continue;
                }
                if let Some(action) = self.resolve_action(side, position, mon, choice)? {
                    actions.push(action);
                }
            }
        }
        for action in &mut actions {
            let speed = self.effective_speed(action.mon())?;
            action.set_speed(speed);
        }
        speed_sort(
            &mut actions,
            self.prng.as_mut(),
            self.engine_options.speed_sort_tie_resolution,
        );

        for action in actions {
            if self.ended {
                return Ok(());
            }
            self.run_action(action)?;
            self.faint_messages()?;
        }
        if self.ended {
            return Ok(());
        }

        handlers::end_of_turn(self)?;
        self.faint_messages()?;
        if self.ended {
            return Ok(());
        }
        for mon in self.active_mons() {
            self.mon_mut(mon)?.active_turns += 1;
        }
        self.request_switches_or_next_turn()
    }

    /// Turns a choice into an action, unless an effect forces a different one.
    fn resolve_action(
        &mut self,
        side: usize,
        position: usize,
        mon: MonHandle,
        choice: Choice,
    ) -> Result<Option<Action>> {
        if let Some((forced, from)) = self.forced_action(mon)? {
            let action = match forced {
                ForcedAction::Move { mov, target } => self.move_action(mon, mov, target, true)?,
                ForcedAction::Skip => Action::Skip(SkipAction {
                    mon,
                    from,
                    speed: 0,
                }),
            };
            return Ok(Some(action));
        }
        match choice {
            Choice::Pass => Ok(None),
            Choice::Move(choice) => {
                let id = self
                    .mon(mon)?
                    .moves
                    .get(choice.slot)
                    .map(|mov| mov.id.clone())
                    .wrap_expectation("move slot disappeared after validation")?;
                let target = match choice.target {
                    Some(target) => self.resolve_choice_target(mon, target)?,
                    None => None,
                };
                Ok(Some(self.move_action(mon, id, target, false)?))
            }
            Choice::Switch(team_position) => Ok(Some(Action::Switch(SwitchAction {
                mon: self.team_mon(side, team_position)?,
                switching_out: Some(mon),
                side,
                position,
                speed: 0,
            }))),
        }
    }

    fn move_action(
        &self,
        mon: MonHandle,
        mov: Id,
        target: Option<MonHandle>,
        forced: bool,
    ) -> Result<Action> {
        let priority = self.move_data(mon, &mov)?.priority as i32;
        Ok(Action::Move(MoveAction {
            mon,
            mov,
            target,
            forced,
            priority,
            speed: 0,
        }))
    }

    /// Asks the battler's status and effects for an action that replaces its choice.
    fn forced_action(&mut self, mon: MonHandle) -> Result<Option<(ForcedAction, Option<String>)>> {
        let mut origins = Vec::new();
        let data = self.mon(mon)?;
        if data.status.is_some() {
            origins.push(HookOrigin::Status(mon));
        }
        origins.extend(
            data.effects
                .keys()
                .map(|id| HookOrigin::MonEffect(mon, id.clone())),
        );
        for origin in origins {
            if let Some(Some(action)) = dispatch::run_effect(self, &origin, |behavior, context| {
                behavior.forced_action(context, mon)
            })? {
                let from = origin.describe(self);
                return Ok(Some((action, from)));
            }
        }
        Ok(None)
    }

    fn run_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Move(action) => {
                if !self.mon(action.mon)?.can_act() {
                    return Ok(());
                }
                pipeline::use_move(self, action.mon, &action.mov, action.target, action.forced)?;
            }
            Action::Switch(action) => {
                if let Some(out) = action.switching_out {
                    if !self.mon(out)?.can_act() {
                        return Ok(());
                    }
                }
                handlers::switch_in(self, action.side, action.position, action.mon)?;
            }
            Action::Skip(action) => {
                if !self.mon(action.mon)?.can_act() {
                    return Ok(());
                }
                let event = log_event!("cant", mon: self.mon(action.mon)?.position_details())
                    .with_opt("from", action.from);
                self.log(event);
            }
        }
        Ok(())
    }

    /// Switches in the replacements chosen for fainted battlers.
    fn run_replacements(&mut self, choices: Vec<(usize, Vec<Choice>)>) -> Result<()> {
        let mut actions = Vec::new();
        for (side, side_choices) in choices {
            for (position, choice) in side_choices.into_iter().enumerate() {
                if let Choice::Switch(team_position) = choice {
                    actions.push(Action::Switch(SwitchAction {
                        mon: self.team_mon(side, team_position)?,
                        switching_out: None,
                        side,
                        position,
                        speed: 0,
                    }));
                }
            }
        }
        for action in &mut actions {
            let speed = self.effective_speed(action.mon())?;
            action.set_speed(speed);
        }
        speed_sort(
            &mut actions,
            self.prng.as_mut(),
            self.engine_options.speed_sort_tie_resolution,
        );
        for action in actions {
            self.run_action(action)?;
            self.faint_messages()?;
            if self.ended {
                return Ok(());
            }
        }
        self.request_switches_or_next_turn()
    }

    /// Logs every pending faint, then checks if the battle is over.
    pub(crate) fn faint_messages(&mut self) -> Result<()> {
        while let Some(mon) = self.faint_queue.pop_front() {
            let data = self.mon(mon)?;
            if data.fainted || data.hp > 0 || !data.active() {
                continue;
            }
            handlers::faint(self, mon)?;
        }
        self.check_win()
    }

    fn check_win(&mut self) -> Result<()> {
        if self.ended || !self.started {
            return Ok(());
        }
        let remaining = self
            .sides
            .iter()
            .map(|side| {
                side.team.iter().any(|mon| {
                    self.mons
                        .get(mon.0)
                        .is_some_and(|mon| !mon.fainted && mon.hp > 0)
                })
            })
            .collect::<Vec<_>>();
        match remaining.iter().filter(|left| **left).count() {
            0 => self.win(None),
            1 => self.win(remaining.iter().position(|left| *left)),
            _ => Ok(()),
        }
    }

    fn win(&mut self, side: Option<usize>) -> Result<()> {
        match side {
            Some(side) => self.log(log_event!("win", side: side)),
            None => self.log(log_event!("tie")),
        }
        self.ended = true;
        self.winner = side;
        for side in &mut self.sides {
            side.request = None;
            side.choice = None;
        }
        Ok(())
    }

    fn positions_needing_switch(&self, side: usize) -> Result<Vec<usize>> {
        let available = self.switchable(side)?.len();
        Ok(self
            .side(side)?
            .active
            .iter()
            .enumerate()
            .filter(|(_, mon)| {
                mon.is_none_or(|mon| self.mons.get(mon.0).is_none_or(|mon| mon.fainted))
            })
            .map(|(position, _)| position)
            .take(available)
            .collect())
    }

    fn request_switches_or_next_turn(&mut self) -> Result<()> {
        let mut waiting = false;
        for side in 0..self.sides.len() {
            let positions = self.positions_needing_switch(side)?;
            if !positions.is_empty() {
                self.side_mut(side)?.request = Some(Request::Switch { positions });
                waiting = true;
            }
        }
        if waiting {
            return Ok(());
        }
        self.next_turn()
    }

    fn next_turn(&mut self) -> Result<()> {
        self.turn += 1;
        if self.turn >= TURN_LIMIT {
            self.log(log_event!("turnlimit"));
            return self.win(None);
        }
        let event = log_event!("turn", turn: self.turn);
        self.log(event);
        for side in &mut self.sides {
            side.request = Some(Request::Turn);
            side.choice = None;
        }
        Ok(())
    }
}
