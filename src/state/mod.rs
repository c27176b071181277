//! Controller state: the immutable snapshot and the value types it carries.

pub mod app_state;
pub mod error;
pub mod types;

pub use app_state::{AppState, QueryDescriptor};
pub use error::FetchError;
pub use types::{DisplayMode, Recipe, ReferenceItem, ReferenceKind, ReferenceList};
