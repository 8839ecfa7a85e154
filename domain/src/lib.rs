//! Request normalization and upstream calls for the meeting notes relay.
//!
//! `summary` turns caller input into a Gemini prompt and reduces the response to a
//! summary string; `share` emails a summary through MailerSend. Both are stateless
//! and depend only on the process [`service::config::Config`].

pub mod error;
pub mod gateway;
pub mod share;
pub mod summary;
