//! Lane Rush Library
//!
//! A top-down lane racing simulation that can run independently or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
