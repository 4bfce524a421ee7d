//! Virtual pet cats: wandering, needs that run down, feedback bubbles and
//! a save that survives restarts. The terminal front end lives in `app`.

pub mod app;
pub mod bubble;
pub mod cat;
pub mod colony;
pub mod config;
pub mod controller;
pub mod input;
pub mod render;
pub mod schedule;
pub mod storage;
