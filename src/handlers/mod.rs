// src/handlers/mod.rs

pub mod dashboard;
pub mod generator;
pub mod history;
pub mod profile;
pub mod session;
