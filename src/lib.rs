//! Library exports for the UTM link builder
//!
//! The pure core (`utm`, `model`, `session`) carries no IO; `database`,
//! `history`, `handler`, and `route` make up the persisted-history store
//! and the HTTP boundary.

pub mod database;
pub mod handler;
pub mod history;
pub mod model;
pub mod route;
pub mod session;
pub mod utm;
