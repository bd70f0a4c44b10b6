pub mod cache;
pub mod keys;
pub mod mutation;

pub use cache::*;
pub use keys::*;
pub use mutation::*;
