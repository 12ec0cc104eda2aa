// src/core/errors.rs

//! Defines the primary error type for the entire application.

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// The main error enum, representing all possible failures within the server.
/// Using `thiserror` allows for clean error definitions and automatic `From` trait implementations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExoDbError {
    #[error("Unknown command {0}")]
    UnknownCommand(String),

    #[error("Wrong number of arguments for '{0}' command")]
    ArgArity(String),

    #[error("Syntax error")]
    Syntax,

    #[error("Incorrect type")]
    WrongType,

    #[error("Tokenizing error: {0}")]
    Tokenize(String),

    #[error("Could not load snapshot: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExoDbError {
    fn from(e: std::io::Error) -> Self {
        ExoDbError::Io(e.to_string())
    }
}

impl From<ParseIntError> for ExoDbError {
    fn from(_: ParseIntError) -> Self {
        ExoDbError::Syntax
    }
}

impl From<ParseFloatError> for ExoDbError {
    fn from(_: ParseFloatError) -> Self {
        ExoDbError::Syntax
    }
}
