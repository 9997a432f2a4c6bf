//! Petalist: Iris dataset analyses behind a small desktop menu.
//!
//! The library holds everything that does not need a window: loading,
//! the analysis core, figure rendering and the command session. The binary
//! adds the eframe front end.

pub mod analysis;
pub mod color;
pub mod config;
pub mod data;
pub mod export;
pub mod render;
pub mod session;
