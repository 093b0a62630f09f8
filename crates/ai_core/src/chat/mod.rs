//! OpenAI-compatible chat completion engine
//!
//! Works against any server that implements `POST {base}/chat/completions`
//! with bearer authentication (Groq, OpenAI, most local gateways).

mod client;

pub use client::OpenAiCompatibleEngine;
