use std::fmt::Display;

use anyhow::Error;
use thiserror::Error;

/// An error consisting of only a message.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GeneralError {
    message: String,
}

impl GeneralError {
    pub fn new<M>(message: M) -> Self
    where
        M: Display,
    {
        Self {
            message: message.to_string(),
        }
    }
}

/// A referenced battle object does not exist.
#[derive(Debug, Error)]
#[error("{target} not found")]
pub struct NotFoundError {
    target: String,
}

impl NotFoundError {
    pub fn new<M>(target: M) -> Self
    where
        M: Display,
    {
        Self {
            target: target.to_string(),
        }
    }
}

/// A player submitted a choice that cannot be made.
#[derive(Debug, Error)]
#[error("invalid choice: {reason}")]
pub struct ChoiceError {
    reason: String,
}

impl ChoiceError {
    pub fn new<M>(reason: M) -> Self
    where
        M: Display,
    {
        Self {
            reason: reason.to_string(),
        }
    }
}

/// An arithmetic result did not fit its type.
#[derive(Debug, Error)]
#[error("integer overflow")]
pub struct IntegerOverflowError {
    #[source]
    error: Error,
}

impl IntegerOverflowError {
    pub fn new(error: Error) -> Self {
        Self { error }
    }
}

#[track_caller]
pub fn general_error<M>(message: M) -> Error
where
    M: Display,
{
    GeneralError::new(message).into()
}

#[track_caller]
pub fn not_found_error<M>(target: M) -> Error
where
    M: Display,
{
    NotFoundError::new(target).into()
}

#[track_caller]
pub fn choice_error<M>(reason: M) -> Error
where
    M: Display,
{
    ChoiceError::new(reason).into()
}

#[track_caller]
pub fn integer_overflow_error<E>(error: E) -> Error
where
    E: Into<Error>,
{
    IntegerOverflowError::new(error.into()).into()
}

#[cfg(test)]
mod errors_test {
    use assert_matches::assert_matches;

    use crate::error::{
        IntegerOverflowError,
        integer_overflow_error,
    };

    #[test]
    fn overflow_wraps_conversion_error() {
        let error = u8::try_from(300u32).map_err(integer_overflow_error).unwrap_err();
        assert_eq!(error.to_string(), "integer overflow");
        assert_matches!(error.downcast_ref::<IntegerOverflowError>(), Some(_));
    }

    #[test]
    fn fitting_value_converts() {
        assert_matches!(u8::try_from(200u32).map_err(integer_overflow_error), Ok(200));
    }
}
