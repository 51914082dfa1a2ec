// src/debug/mod.rs

//! The `debug` module is macros and functions for printing in debug
//! builds and test builds.

pub mod printers;
