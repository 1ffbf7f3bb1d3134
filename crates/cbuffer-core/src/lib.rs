//! # cbuffer-core
//!
//! A library for embedding binary files into C libraries as static byte arrays.
//!
//! Embedding trusted data (a root-CA bundle, a firmware blob) at compile time
//! avoids file I/O at runtime. This crate provides:
//! - Loading a file into a terminator-normalized [`ByteSequence`]
//! - Encoding bytes as a line-wrapped C hex array literal
//! - Emitting a matching `<name>.h` / `<name>.c` pair
//!
//! ## Architecture
//!
//! - [`loader`]: File loading and terminator normalization
//! - [`encoder`]: Hex literal rendering
//! - [`emit`]: Header/source emission and output sinks
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use cbuffer_core::{load, ArrayName, ArtifactSink, DirectorySink, Emitter};
//!
//! let seq = load("certs/ca.pem")?;
//! let name = ArrayName::new("xi_RootCA_list")?;
//!
//! let artifact = Emitter::new().emit(&seq, &name);
//! DirectorySink::new("src/generated").write_artifact(&artifact)?;
//! # Ok::<(), cbuffer_core::Error>(())
//! ```
//!
//! ## Extensibility
//!
//! - [`ArtifactSink`]: Route generated text somewhere other than stdout or a directory
//! - [`EmitterConfig`]: Custom banner, per-array length macros, literal layout

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod emit;
pub mod encoder;
pub mod error;
pub mod loader;

// Re-export primary types for convenience
pub use emit::{
    emit, ArrayName, ArtifactSink, DirectorySink, Emitter, EmitterConfig, GeneratedArtifact,
    LengthMacro, PreviewSink, DEFAULT_BANNER, SHARED_LENGTH_MACRO,
};
pub use encoder::{encode, Encoder, EncoderConfig, BYTES_PER_LINE};
pub use error::{Error, Result};
pub use loader::{load, ByteSequence, TERMINATOR};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
