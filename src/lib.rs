//! Visual one- and two-component blackbody fitting of young stellar
//! object photometry.
//!
//! The radiometry and plot-state layers ([`radiometry`], [`fit`],
//! [`controller`]) have no toolkit dependency; [`app`] and [`ui`] drive
//! them from egui.

pub mod app;
pub mod color;
pub mod config;
pub mod controller;
pub mod data;
pub mod events;
pub mod fit;
pub mod radiometry;
pub mod state;
pub mod surface;
pub mod ui;
