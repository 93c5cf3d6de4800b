pub mod assist;
pub mod errors;
pub mod filters;
pub mod form;
pub mod models;
pub mod service;
pub mod store;

pub use errors::*;
pub use filters::*;
pub use form::*;
pub use models::*;
pub use service::*;
pub use store::*;
