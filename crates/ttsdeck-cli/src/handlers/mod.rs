//! Command handlers.
//!
//! Handlers take the composed [`CliContext`](crate::CliContext), call into
//! the synthesis crate and format the result for the terminal. They hold no
//! business logic of their own.

pub mod speak;
pub mod voices;
