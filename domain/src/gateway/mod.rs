//! Clients for the third-party services the relay forwards to.

pub mod gemini;
pub mod mailersend;
