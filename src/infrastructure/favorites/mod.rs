pub mod file;
pub mod memory_store;

pub use memory_store::InMemoryFavoritesStore;
