pub mod client;
pub mod types;

pub use client::PostalClient;
pub use types::{PostOffice, PostalResponse};
