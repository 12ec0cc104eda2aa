// src/core/commands/helpers.rs

//! Small, shared argument-parsing helpers used by every command's `parse`.

use crate::core::errors::ExoDbError;
use bytes::Bytes;

/// Fails with `ArgArity` unless exactly `expected` arguments were given.
pub fn validate_arg_count(args: &[Bytes], expected: usize, name: &str) -> Result<(), ExoDbError> {
    if args.len() != expected {
        return Err(ExoDbError::ArgArity(name.to_string()));
    }
    Ok(())
}

pub fn to_upper_str(b: &Bytes) -> Result<String, ExoDbError> {
    std::str::from_utf8(b)
        .map(|s| s.to_ascii_uppercase())
        .map_err(|_| ExoDbError::Syntax)
}

pub fn parse_i64(b: &Bytes) -> Result<i64, ExoDbError> {
    std::str::from_utf8(b)
        .map_err(|_| ExoDbError::Syntax)?
        .parse::<i64>()
        .map_err(|_| ExoDbError::Syntax)
}

/// Parses a score literal. `NaN` and infinities are rejected as a syntax
/// error rather than accepted and stored.
pub fn parse_f64(b: &Bytes) -> Result<f64, ExoDbError> {
    let v = std::str::from_utf8(b)
        .map_err(|_| ExoDbError::Syntax)?
        .parse::<f64>()
        .map_err(|_| ExoDbError::Syntax)?;
    if !v.is_finite() {
        return Err(ExoDbError::Syntax);
    }
    Ok(v)
}

/// Formats a score the way ZADD/ZRANGE WITHSCORES reply with one: integral
/// values print without a decimal point, matching the common RESP
/// convention for numeric bulk strings.
pub fn format_score(score: f64) -> String {
    if score.is_finite() && score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{score}")
    }
}
