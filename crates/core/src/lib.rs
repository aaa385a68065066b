//! SafeWatch domain logic.
//!
//! Pure, synchronous building blocks shared by the HTTP front end: the movie
//! model, the child-safety scoring rules and the embed-page sanitizer. Nothing
//! in this crate performs I/O.

pub mod error;
pub mod movie;
pub mod safety;
pub mod safety_config;
pub mod sanitizer;
