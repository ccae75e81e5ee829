//! Time-bound events pinned to a map location, and the per-user log that
//! feeds map markers and the live feed.

mod log;
mod types;


pub use log::EventLog;
pub use types::{EventLocation, MapEvent, NewMapEvent};
