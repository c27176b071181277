//! Controller loop: channels, the event loop, and background workers.

mod channels;
mod event_loop;
mod workers;

pub use channels::Channels;
pub use event_loop::Runtime;
