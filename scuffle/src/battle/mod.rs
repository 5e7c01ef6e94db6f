mod action;
mod battle;
mod calculations;
mod choice;
mod damage;
pub mod dispatch;
mod field;
mod modifier;
mod mon;
mod outcome;
mod pipeline;
mod side;
mod speed_order;

pub use action::{
    Action,
    MoveAction,
    SkipAction,
    SwitchAction,
};
pub use battle::Battle;
pub use calculations::{
    apply_nature_to_stats,
    boosted_stat,
    calculate_mon_stats,
};
pub use choice::{
    Choice,
    MoveChoice,
    Request,
    parse_choices,
};
pub use damage::{
    DamageCalculation,
    apply_type_modifier,
    base_damage,
    calculate_damage,
    compose_damage,
    random_factor,
};
pub use field::Field;
pub use modifier::{
    ModifierChain,
    ModifierStage,
};
pub use mon::{
    HitRecord,
    Mon,
    MonHandle,
};
pub use outcome::{
    HandlerOutcome,
    MoveOutcome,
};
pub(crate) use pipeline::land_delayed_hit;
pub use pipeline::use_move;
pub use side::Side;
pub use speed_order::{
    SpeedOrderable,
    compare_speed_order,
    sort_with_ties,
    speed_sort,
};
