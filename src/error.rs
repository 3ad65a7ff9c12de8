//! Rejections surfaced to front ends.
//!
//! The model itself never fails: a dead pet ignores actions and a tired pet
//! refuses to play. Adapters that need to report those outcomes to a user
//! go through [`crate::store::Session`], which turns them into an
//! [`ActionError`].

use crate::store::PetId;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// No pet is stored under this id.
    UnknownPet(PetId),
    /// The pet has died; it no longer reacts to anything.
    Dead { name: String },
    /// Not enough energy for the requested play session.
    TooTired { name: String },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPet(id) => write!(f, "no pet with id {id}"),
            Self::Dead { name } => write!(f, "{name} is no longer alive."),
            Self::TooTired { name } => write!(f, "{name} is too tired to play."),
        }
    }
}

impl std::error::Error for ActionError {}
