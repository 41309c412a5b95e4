//! Accounts

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::AccountsServiceError;
pub(crate) use repository::try_get_role;
pub use service::*;
