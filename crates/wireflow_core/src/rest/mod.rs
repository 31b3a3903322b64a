//! REST resource configuration gatekeeping.
//!
//! # Responsibility
//! - Hold the serving subsystem's mutable resource configuration store.
//! - Shield that store from duplicate component registrations during
//!   extension bootstrap.
//!
//! # Invariants
//! - The guarded path never raises; duplicate attempts are absorbed.
//! - Deduplication always uses the store's own identity predicates.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod extension;
pub mod guarded;
pub mod resource_config;

pub type RestResult<T> = Result<T, RestConfigError>;

/// Facade wiring errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestConfigError {
    /// No resource configuration store was available at construction time.
    MissingStore,
}

impl Display for RestConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingStore => write!(
                f,
                "resource configuration store is not available; wire the serving subsystem before installing extensions"
            ),
        }
    }
}

impl Error for RestConfigError {}
