//! Overgrown Dusk - headless platformer simulation
//!
//! The parry/sword platformer's frame loop as a library:
//! - `game` holds the simulation state and the per-frame step
//! - `input` provides scripted key timelines
//! - `config` reads runner settings and gameplay tuning

pub mod config;
pub mod game;
pub mod input;
pub mod util;
