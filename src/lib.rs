//! Tomodachi: a virtual pet whose hunger, happiness and energy drift with
//! time and respond to care.
//!
//! [`Pet`] holds the state and its actions; time enters either through
//! [`Pet::tick_realtime`] (catch up on demand) or a [`FixedStepDriver`]
//! (pushed from a timer). [`Snapshot`] is the flat record used for saves,
//! and [`Session`] serves many pets from an injected [`PetStore`].

pub mod app;
pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod render;
pub mod sim;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use driver::FixedStepDriver;
pub use error::ActionError;
pub use model::{Mood, Pet};
pub use sim::Action;
pub use snapshot::Snapshot;
pub use store::{MemoryStore, PetId, PetStore, Session};
