//! C header/source emission.
//!
//! The [`Emitter`] turns a [`ByteSequence`] and an [`ArrayName`] into a
//! [`GeneratedArtifact`]: a header declaring the array and a source file
//! defining it. Both texts are a pure function of their inputs and the
//! [`EmitterConfig`].
//!
//! ## Length macro
//!
//! The array is sized by a preprocessor macro. With [`LengthMacro::Shared`]
//! (the default) every generated header uses the same name,
//! [`SHARED_LENGTH_MACRO`], so two generated headers included in one
//! translation unit will clash if their lengths differ. Use
//! [`LengthMacro::PerArray`] when more than one array is embedded in the
//! same build.
//!
//! ## Output
//!
//! Artifacts are handed to an [`ArtifactSink`], either a console preview
//! or a directory on disk.

mod sink;

use crate::encoder::{Encoder, EncoderConfig};
use crate::error::{Error, Result};
use crate::loader::ByteSequence;
use std::fmt::{self, Write as FmtWrite};
use std::str::FromStr;
use tracing::debug;

pub use sink::{ArtifactSink, DirectorySink, PreviewSink};

/// License banner placed at the top of both generated files
pub const DEFAULT_BANNER: &str = "\
/* Copyright (c) 2003-2018, LogMeIn, Inc. All rights reserved.
 *
 * This is part of the Xively C Client library,
 * it is licensed under the BSD 3-Clause license.
 */
";

/// Length macro name shared by every generated header
pub const SHARED_LENGTH_MACRO: &str = "XI_ROOTCA_LIST_BYTE_LENGTH";

const CPP_OPEN: &str = "#ifdef __cplusplus\nextern \"C\" {\n#endif\n";
const CPP_CLOSE: &str = "#ifdef __cplusplus\n}\n#endif\n";

/// A validated C identifier naming the generated array and its files.
///
/// The include guard (and the [`LengthMacro::PerArray`] macro name) is
/// derived from the uppercased name, so names differing only in case, such
/// as `ca` and `CA`, share a guard and cannot be included together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayName(String);

impl ArrayName {
    /// Validates `name` as a C identifier
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let mut chars = name.chars();

        match chars.next() {
            None => return Err(Error::invalid_array_name(name, "must not be empty")),
            Some(c) if c.is_ascii_digit() => {
                return Err(Error::invalid_array_name(
                    name,
                    "must not start with a digit",
                ))
            }
            Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
                return Err(Error::invalid_array_name(
                    name,
                    "must start with a letter or underscore",
                ))
            }
            Some(_) => {}
        }

        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::invalid_array_name(
                name,
                "may only contain ASCII letters, digits and underscores",
            ));
        }

        Ok(Self(name))
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Include guard token: `__<UPPER_NAME>_H__`
    pub fn include_guard(&self) -> String {
        format!("__{}_H__", self.0.to_ascii_uppercase())
    }

    /// File name of the generated header
    pub fn header_file_name(&self) -> String {
        format!("{}.h", self.0)
    }

    /// File name of the generated source
    pub fn source_file_name(&self) -> String {
        format!("{}.c", self.0)
    }
}

impl fmt::Display for ArrayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ArrayName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for ArrayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How the array length macro is named
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthMacro {
    /// Always [`SHARED_LENGTH_MACRO`]
    #[default]
    Shared,
    /// `<UPPER_NAME>_BYTE_LENGTH`, unique per array
    PerArray,
}

impl LengthMacro {
    /// Returns the macro name used for `name`
    pub fn name_for(&self, name: &ArrayName) -> String {
        match self {
            LengthMacro::Shared => SHARED_LENGTH_MACRO.to_string(),
            LengthMacro::PerArray => {
                format!("{}_BYTE_LENGTH", name.as_str().to_ascii_uppercase())
            }
        }
    }
}

/// Configuration for emission
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Banner comment placed at the top of both files
    pub banner: String,
    /// Length macro naming
    pub length_macro: LengthMacro,
    /// Array literal layout
    pub encoder: EncoderConfig,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            banner: DEFAULT_BANNER.to_string(),
            length_macro: LengthMacro::default(),
            encoder: EncoderConfig::default(),
        }
    }
}

impl EmitterConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the banner. A trailing newline is added if missing.
    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        let mut banner = banner.into();
        if !banner.ends_with('\n') {
            banner.push('\n');
        }
        self.banner = banner;
        self
    }

    /// Sets the length macro naming
    pub fn length_macro(mut self, length_macro: LengthMacro) -> Self {
        self.length_macro = length_macro;
        self
    }

    /// Sets the array literal layout
    pub fn encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }
}

/// A generated header/source pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    name: ArrayName,
    header: String,
    source: String,
}

impl GeneratedArtifact {
    /// The array name both texts were generated for
    pub fn name(&self) -> &ArrayName {
        &self.name
    }

    /// Header text (`<name>.h`)
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Source text (`<name>.c`)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// File name for the header
    pub fn header_file_name(&self) -> String {
        self.name.header_file_name()
    }

    /// File name for the source
    pub fn source_file_name(&self) -> String {
        self.name.source_file_name()
    }
}

/// Produces C header/source text for an embedded byte array
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    config: EmitterConfig,
    encoder: Encoder,
}

impl Emitter {
    /// Creates an emitter with the default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an emitter with a custom config
    pub fn with_config(config: EmitterConfig) -> Self {
        let encoder = Encoder::with_config(config.encoder.clone());
        Self { config, encoder }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Generate the header and source text for `seq`
    pub fn emit(&self, seq: &ByteSequence, name: &ArrayName) -> GeneratedArtifact {
        let length_macro = self.config.length_macro.name_for(name);

        let mut header = String::new();
        self.write_header(&mut header, seq, name, &length_macro)
            .expect("String write cannot fail");

        let mut source = String::with_capacity(self.config.banner.len() + seq.len() * 6 + 256);
        self.write_source(&mut source, seq, name, &length_macro)
            .expect("String write cannot fail");

        debug!(
            "Emitted {} ({} bytes, length macro {})",
            name,
            seq.len(),
            length_macro
        );

        GeneratedArtifact {
            name: name.clone(),
            header,
            source,
        }
    }

    fn write_header(
        &self,
        w: &mut impl FmtWrite,
        seq: &ByteSequence,
        name: &ArrayName,
        length_macro: &str,
    ) -> fmt::Result {
        let guard = name.include_guard();

        w.write_str(&self.config.banner)?;
        writeln!(w)?;
        writeln!(w)?;

        writeln!(w, "#ifndef {}", guard)?;
        writeln!(w, "#define {}", guard)?;
        writeln!(w)?;

        w.write_str(CPP_OPEN)?;
        writeln!(w)?;

        writeln!(w, "#ifndef {}", length_macro)?;
        writeln!(w, "#define {} {}", length_macro, seq.len())?;
        writeln!(w, "#endif /* {} */", length_macro)?;
        writeln!(w)?;

        writeln!(w, "extern const unsigned char {}[ {} ];", name, length_macro)?;
        writeln!(w)?;

        w.write_str(CPP_CLOSE)?;
        writeln!(w)?;

        writeln!(w, "#endif /* {} */", guard)
    }

    fn write_source(
        &self,
        w: &mut impl FmtWrite,
        seq: &ByteSequence,
        name: &ArrayName,
        length_macro: &str,
    ) -> fmt::Result {
        w.write_str(&self.config.banner)?;
        writeln!(w)?;

        w.write_str(CPP_OPEN)?;
        writeln!(w)?;

        writeln!(w, "#include \"{}\"", name.header_file_name())?;
        writeln!(w)?;

        writeln!(w, "const unsigned char {}[ {} ] = {{", name, length_macro)?;
        w.write_str(&self.encoder.config().indent)?;
        self.encoder.encode_to(w, seq)?;
        writeln!(w, " }};")?;
        writeln!(w)?;

        w.write_str(CPP_CLOSE)
    }
}

/// Emit with the default config
pub fn emit(seq: &ByteSequence, name: &ArrayName) -> GeneratedArtifact {
    Emitter::new().emit(seq, name)
}
