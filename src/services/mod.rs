//! Services module - Pure business logic for password generation.
//!
//! The services are **framework-agnostic** and have no dependencies on the UI
//! layer, making them testable and reusable.
//!
//! # Components
//!
//! - [`generator`]: Builds the [`Alphabet`] for a Configuration and samples
//!   passwords from it, one independent uniform draw per character.
//! - [`clipboard`]: The [`ClipboardSink`] seam copied passwords are written
//!   through, with its [`ClipboardError`] type.
//!
//! # Usage Example
//!
//! ```ignore
//! use passgen::models::GeneratorConfig;
//! use passgen::services::generator;
//!
//! let password = generator::generate(&GeneratorConfig::default());
//! assert_eq!(password.len(), 12);
//! ```

pub mod clipboard;
pub mod generator;

pub use clipboard::{ClipboardError, ClipboardSink};
pub use generator::{Alphabet, generate, generate_with};
