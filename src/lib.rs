//! Flashcards and multiple-choice drills for combinatorics.
//!
//! The library holds everything that does not touch the terminal: dataset
//! loading, filtering, the study and quiz controllers and configuration.
//! The `combicards` binary drives them from a ratatui front end.

pub mod config;
pub mod content;
pub mod engine;
pub mod logging;
pub mod session;
pub mod store;
