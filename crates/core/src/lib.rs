//! Network-free building blocks for the virtual try-on client.
//!
//! Holds the shared error type, seed policy and the image transport codec
//! used by `tryon-kling`.

pub mod codec;
pub mod error;
pub mod seed;
pub mod types;
