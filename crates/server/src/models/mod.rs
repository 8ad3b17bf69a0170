//! Domain types for the lunch catalog service.

pub mod item;
pub mod session;

pub use item::{Item, NewItem};
pub use session::{Identity, keys as session_keys};
