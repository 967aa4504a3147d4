//! Core domain model for the Nano Banana prompt builder.
//!
//! Everything in this crate is synchronous and free of I/O except the
//! [`store::ByteStore`] seam and the [`enhance::PromptEnhancer`] trait,
//! which are implemented by sibling crates.

pub mod archive;
pub mod codec;
pub mod enhance;
pub mod error;
pub mod options;
pub mod patch;
pub mod profile;
pub mod prompt;
pub mod randomizer;
pub mod session;
pub mod store;

pub use error::CoreError;
pub use patch::FieldEdit;
pub use prompt::{ImagePrompt, PromptDocument};
pub use session::PromptSession;
