//! Reflection error type.

use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReflectError {
    #[error("integer {0} does not fit in 64 bits")]
    IntegerOverflow(String),
    #[error("map value serialized before its key")]
    ValueWithoutKey,
    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for ReflectError {
    fn custom<T: Display>(msg: T) -> Self {
        ReflectError::Custom(msg.to_string())
    }
}
