//! Orders

mod errors;
mod handlers;
mod models;

pub(crate) use errors::into_api_error;
pub(crate) use handlers::*;
