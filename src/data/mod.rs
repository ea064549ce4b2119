mod loader;

pub use loader::{load_default_pools, load_pools_from_path, LoadError};
