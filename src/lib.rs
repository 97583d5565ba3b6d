pub mod config;
pub mod error;
pub mod gesture;
pub mod model;
pub mod quiz;
pub mod shuffle;
pub mod store;
pub mod trace_table;
pub mod view;
// cmd and reports belong to the binary (main.rs).
