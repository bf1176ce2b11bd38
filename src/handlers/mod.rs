// src/handlers/mod.rs

pub mod editor;
pub mod roster;
