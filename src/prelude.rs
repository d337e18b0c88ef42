//! Prelude module for fortune_engine crate.
//!
//! Re-exports the derive_more macros used across the engine's types.

#[allow(unused_imports)]
pub use derive_more::{Deref, Display, From, FromStr, Into, TryInto};
