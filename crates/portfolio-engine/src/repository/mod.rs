//! Repository Layer
//!
//! Collaborator interfaces and their in-memory implementations.

mod listeners;
mod memory;
mod traits;


pub use listeners::{Listeners, Subscription};
pub use memory::{ImmediateTimer, InMemoryStore, LocalSessionProvider, RecordingNotifier};
pub use traits::{DataStore, Notifier, SessionProvider, Timer};
