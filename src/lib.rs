// src/lib.rs — Library root for faithjudge

pub mod cli;
pub mod infra;
pub mod judge;
pub mod provider;
