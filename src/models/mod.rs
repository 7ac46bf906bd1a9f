// src/models/mod.rs

pub mod achievement;
pub mod analysis;
pub mod dashboard;
pub mod session;
pub mod user;
