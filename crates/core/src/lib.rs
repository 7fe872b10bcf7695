//! Core types and contracts for the betstore record store.
//!
//! Pure data types, validation and error definitions. Nothing in this crate
//! performs I/O; storage backends live in the `betstore` crate.

pub mod bet;
pub mod storage;
