//! Route handlers

pub mod assess;
pub mod classify;
pub mod extract;
