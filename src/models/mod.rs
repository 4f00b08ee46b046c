// src/models/mod.rs

pub mod question;
pub mod topic_score;
pub mod user;
