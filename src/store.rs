//! Keyed pet storage for front ends that serve more than one caller.
//!
//! The core never holds a process-wide pet. An adapter owns a [`PetStore`],
//! wraps it in a [`Session`] and calls it from one thread at a time (or
//! behind its own lock): each `Session` call is one atomic unit of catch-up,
//! action and mortality check.

use crate::error::ActionError;
use crate::model::Pet;
use crate::sim::Action;
use crate::snapshot::Snapshot;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PetId(String);

impl PetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait PetStore {
    fn get(&self, id: &PetId) -> Option<&Pet>;
    fn get_mut(&mut self, id: &PetId) -> Option<&mut Pet>;
    /// Stores `pet`, returning whatever was stored under `id` before.
    fn insert(&mut self, id: PetId, pet: Pet) -> Option<Pet>;
    fn remove(&mut self, id: &PetId) -> Option<Pet>;
    fn ids(&self) -> Vec<PetId>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pets: BTreeMap<PetId, Pet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }
}

impl PetStore for MemoryStore {
    fn get(&self, id: &PetId) -> Option<&Pet> {
        self.pets.get(id)
    }

    fn get_mut(&mut self, id: &PetId) -> Option<&mut Pet> {
        self.pets.get_mut(id)
    }

    fn insert(&mut self, id: PetId, pet: Pet) -> Option<Pet> {
        self.pets.insert(id, pet)
    }

    fn remove(&mut self, id: &PetId) -> Option<Pet> {
        self.pets.remove(id)
    }

    fn ids(&self) -> Vec<PetId> {
        self.pets.keys().cloned().collect()
    }
}

/// Request-shaped access to a store: every call first catches the pet up to
/// `now`, then acts, and answers with the resulting record.
pub struct Session<S: PetStore> {
    store: S,
}

impl<S: PetStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Adopts a new pet under `id`, replacing any previous one.
    pub fn create(&mut self, id: PetId, name: &str, now: DateTime<Utc>) -> Snapshot {
        let mut pet = Pet::named(name);
        pet.tick_realtime(now);
        let snapshot = pet.to_snapshot();
        info!("adopted {} as {id}", pet.name());
        self.store.insert(id, pet);
        snapshot
    }

    /// Replaces the pet under `id` with one rebuilt from `snapshot`.
    pub fn restore(&mut self, id: PetId, snapshot: Snapshot, now: DateTime<Utc>) -> Snapshot {
        let pet = Pet::from_snapshot(snapshot, now);
        let out = pet.to_snapshot();
        info!("restored {} as {id} (alive={})", pet.name(), pet.is_alive());
        self.store.insert(id, pet);
        out
    }

    pub fn status(&mut self, id: &PetId, now: DateTime<Utc>) -> Result<Snapshot, ActionError> {
        let pet = self.caught_up(id, now)?;
        Ok(pet.to_snapshot())
    }

    pub fn act(
        &mut self,
        id: &PetId,
        action: &Action,
        now: DateTime<Utc>,
    ) -> Result<Snapshot, ActionError> {
        let pet = self.caught_up(id, now)?;
        if !pet.is_alive() {
            return Err(ActionError::Dead {
                name: pet.name().to_string(),
            });
        }
        if !pet.apply(action, now) {
            let name = pet.name().to_string();
            return Err(if pet.is_alive() {
                ActionError::TooTired { name }
            } else {
                ActionError::Dead { name }
            });
        }
        debug!("{id}: {} applied", action.verb());
        Ok(pet.to_snapshot())
    }

    pub fn release(&mut self, id: &PetId) -> Option<Pet> {
        self.store.remove(id)
    }

    fn caught_up(&mut self, id: &PetId, now: DateTime<Utc>) -> Result<&mut Pet, ActionError> {
        let pet = self
            .store
            .get_mut(id)
            .ok_or_else(|| ActionError::UnknownPet(id.clone()))?;
        pet.tick_realtime(now);
        Ok(pet)
    }
}
