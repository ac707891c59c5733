//! Game engine of a square mine field: mine placement, reveals with flood fill, chording, flags and question
//! marks, scoring, and the explosion frame counter shown after a loss.
//!
//! Painting, audio and timers stay with the host, which receives them through the traits in [`host`].

#![no_std]

extern crate alloc;

pub use cell::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use explosion::*;
pub use generator::*;
pub use grid::*;
pub use host::*;
pub use reveal::*;
pub use scoring::*;
pub use types::*;

mod cell;
mod config;
mod controller;
mod error;
mod explosion;
mod generator;
mod grid;
pub mod host;
mod reveal;
mod scoring;
mod types;
