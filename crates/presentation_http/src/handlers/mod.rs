//! HTTP request handlers

pub mod common;
pub mod generate;
pub mod health;
pub mod stream;
