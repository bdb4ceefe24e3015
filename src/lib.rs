//! Colorcycle - library for color cycling animations
//!
//! This library provides functionality to:
//! - Parse hex colors and validate color groups
//! - Resolve color ownership when a color appears in several groups
//! - Compute the cycle length (LCM of group lengths)
//! - Render every frame of the cycle from a source image
//! - Encode the frames as an animated GIF

pub mod cli;
pub mod color;
pub mod config;
pub mod cycle;
pub mod frame_map;
pub mod gif;
pub mod group;
pub mod orchestrator;
pub mod output;
pub mod prompt;
pub mod registry;
pub mod renderer;
pub mod source;
