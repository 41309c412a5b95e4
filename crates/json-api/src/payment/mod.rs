//! Payment

pub(crate) mod create_intent;
