//! Error types and helpers.
//!
//! Battle outcomes such as a missed move or a prevented status are not errors; they are values
//! like [`MoveOutcome`][crate::battle::MoveOutcome]. Errors here mean the caller did something
//! invalid (a bad choice string) or the engine hit a defect.

mod context;
mod errors;
mod wrap;

pub use errors::{
    ChoiceError,
    GeneralError,
    IntegerOverflowError,
    NotFoundError,
    choice_error,
    general_error,
    integer_overflow_error,
    not_found_error,
};
pub use wrap::{
    WrapError,
    WrapOptionError,
    WrapResultError,
};
