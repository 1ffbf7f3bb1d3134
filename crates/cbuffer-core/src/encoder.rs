//! Rendering of byte sequences as C array literal bodies.
//!
//! Every byte becomes a `0x`-prefixed, two-digit lowercase hex token.
//! Tokens are grouped into lines of [`BYTES_PER_LINE`] entries:
//!
//! ```text
//! 0x2d, 0x2d, 0x2d, ... 0x42,
//!     0x45, 0x47, ...
//! ```
//!
//! The first line carries no indentation of its own; the emitter places it
//! after the opening brace.

use std::fmt::Write as FmtWrite;

/// Number of hex entries per array line
pub const BYTES_PER_LINE: usize = 16;

/// Indentation placed before every continuation line
pub const DEFAULT_INDENT: &str = "    ";

/// Configuration for literal encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Entries per line (default: 16, values below 1 are treated as 1)
    pub per_line: usize,
    /// Indentation string for continuation lines (default: 4 spaces)
    pub indent: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            per_line: BYTES_PER_LINE,
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl EncoderConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of entries per line
    pub fn per_line(mut self, n: usize) -> Self {
        self.per_line = n;
        self
    }

    /// Sets the continuation indentation
    pub fn indent(mut self, s: impl Into<String>) -> Self {
        self.indent = s.into();
        self
    }
}

/// Renders bytes into array literal text
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    /// Creates an encoder with the default layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with a custom layout
    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode bytes into a new string
    pub fn encode(&self, bytes: &[u8]) -> String {
        // "0xNN, " is six characters per entry
        let mut out = String::with_capacity(bytes.len() * 6);
        self.encode_to(&mut out, bytes).expect("String write cannot fail");
        out
    }

    /// Write the encoded literal to a writer
    pub fn encode_to(&self, w: &mut impl FmtWrite, bytes: &[u8]) -> std::fmt::Result {
        let per_line = self.config.per_line.max(1);

        for (i, line) in bytes.chunks(per_line).enumerate() {
            if i > 0 {
                write!(w, ",\n{}", self.config.indent)?;
            }
            for (j, byte) in line.iter().enumerate() {
                if j > 0 {
                    w.write_str(", ")?;
                }
                write!(w, "0x{:02x}", byte)?;
            }
        }

        Ok(())
    }
}

/// Encode bytes with the default layout
pub fn encode(bytes: &[u8]) -> String {
    Encoder::new().encode(bytes)
}
