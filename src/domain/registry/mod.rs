//! Registry domain - Model records, selection and lifecycle transitions

mod error;
mod event;
mod model_registry;
pub mod store;

pub use error::RegistryError;
pub use event::RegistryEvent;
pub use model_registry::{ModelRegistry, RegistryStats, SortDirection, SortField};
pub use store::ModelStore;
