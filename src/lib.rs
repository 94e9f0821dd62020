//! Karaoke song recommendations in the terminal.
//!
//! Pick a vocal type, era, genre, mood and difficulty (plus an optional
//! free-text request), get a list of songs from a hosted text-generation
//! model, and keep a setlist of favourites along with search and viewing
//! history between runs.

pub mod app;
pub mod collections;
pub mod config;
pub mod handlers;
pub mod model;
pub mod recommend;
pub mod session;
pub mod storage;
pub mod ui;
