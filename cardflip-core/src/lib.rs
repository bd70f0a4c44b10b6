pub mod api;
pub mod errors;
pub mod filters;
pub mod models;
pub mod schema;

pub use api::*;
pub use errors::*;
pub use filters::*;
pub use models::*;
pub use schema::*;
