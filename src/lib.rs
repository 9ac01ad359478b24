// src/lib.rs

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod service;

#[cfg(test)]
mod test_utils;
