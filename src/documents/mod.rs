mod storage;
mod types;

pub use storage::DocumentStore;
pub use types::*;
