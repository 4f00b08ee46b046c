// src/services/mod.rs

pub mod auth;
pub mod scoring;
pub mod seed;
