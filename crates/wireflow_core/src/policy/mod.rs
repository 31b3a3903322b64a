//! Client config override policy contracts.
//!
//! # Responsibility
//! - Decide which client configuration keys a connector may override on the
//!   producer/consumer/admin clients the worker creates on its behalf.
//! - Keep every decision synchronous, allocation-light, and data-shaped so
//!   the worker can report all problems of one attempt at once.
//!
//! # Invariants
//! - Policies never mutate the request they validate.
//! - A verdict carries exactly one entry per requested key.
//! - Rejection is data (`PolicyViolation`), not a panic or early abort.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod builtin;
pub mod gate;
pub mod principal;
pub mod request;
pub mod selector;
pub mod spi;
pub mod verdict;

pub type PolicyResult<T> = Result<T, PolicyError>;

/// Policy contract errors.
///
/// `InvalidArgument` marks malformed input and is fatal, never retried.
/// `NotConfigured` is reserved for third-party policies that require
/// `configure` before `validate`; every built-in policy works from
/// construction-time defaults and never returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    InvalidArgument(String),
    NotConfigured(String),
}

impl Display for PolicyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::NotConfigured(policy) => {
                write!(f, "policy `{policy}` requires configure before validate")
            }
        }
    }
}

impl Error for PolicyError {}
