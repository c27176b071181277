//! Background workers reporting back to the controller loop.

mod reference;
mod search;

pub use reference::spawn_reference_loads;
pub use search::spawn_search_fetch;
