pub mod error;
pub mod key;
pub mod store;
pub mod testing;

pub use error::StateError;
pub use key::{KeyKind, StateKey};
pub use store::{CounterStore, Expiry};
