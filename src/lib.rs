//! Mealscope: controller and data layer for a recipe browser backed by TheMealDB.
//!
//! The crate owns the query state machine, the HTTP client, and the device-local
//! cache. Rendering and routing stay with the embedding presentation layer, which
//! talks to a [`Controller`] through a [`Dispatcher`] and observes [`AppState`] snapshots.

pub mod app;
pub mod logging;
pub mod logic;
pub mod settings;
pub mod sources;
pub mod state;
pub mod store;
pub mod util;

#[cfg(test)]
mod test_utils;

pub use app::navigator::{Navigator, NoopNavigator};
pub use app::{Controller, Dispatcher};
pub use settings::Settings;
pub use sources::{HttpService, RemoteDataService};
pub use state::{AppState, DisplayMode, FetchError, Recipe, ReferenceItem, ReferenceKind};
pub use store::{FileStore, MemoryStore, PersistentStore};
