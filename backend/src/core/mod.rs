//! Core primitives shared by the simulation engine

pub mod time;
