//! Food Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod like;
pub(crate) mod partner;
pub(crate) mod save;
pub(crate) mod saved;
pub(crate) mod update;
