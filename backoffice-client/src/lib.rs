mod auth;
mod backoffice_url;
mod client;
pub mod dto;

pub use auth::*;
pub use backoffice_url::*;
pub use client::*;
