// src/utils/mod.rs

pub mod bearer;
