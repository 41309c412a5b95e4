//! ReelBite Domain Concerns

pub mod accounts;
pub mod carts;
pub mod foods;
pub mod orders;
