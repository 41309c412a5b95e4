//! Shared application domain, persistence and external service adapters.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod media;
pub mod payments;

#[cfg(test)]
mod test;

mod uuids;
