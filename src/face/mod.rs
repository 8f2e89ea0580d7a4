pub mod compose;
pub mod config;
pub mod controls;
pub mod eyes;
pub mod nose;
pub mod state;
