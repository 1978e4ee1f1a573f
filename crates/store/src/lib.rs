mod client;
mod error;
mod resource;
mod store;

pub use client::*;
pub use error::*;
pub use resource::*;
pub use store::*;
