//! cbuffer - Embed a binary file into a C library as a static byte array
//!
//! This tool reads an input file (typically a root-CA bundle) and generates
//! a `<name>.h` / `<name>.c` pair declaring and defining the file's bytes.
//! By default both files are printed to the console; pass `--no-pretend`
//! to write them to disk.

use anyhow::{bail, Context, Result};
use cbuffer_core::{
    load, ArrayName, ArtifactSink, DirectorySink, Emitter, EmitterConfig, GeneratedArtifact,
    LengthMacro, PreviewSink,
};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Embed a binary file into C sources as a static byte array
#[derive(Parser, Debug)]
#[command(name = "cbuffer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// File that is going to be converted
    #[arg(short, long, alias = "file_name")]
    file_name: PathBuf,

    /// Array name, also used for the include guard and output file names
    #[arg(short, long, alias = "array_name")]
    array_name: ArrayName,

    /// Output directory for the generated .h and .c files
    #[arg(short, long, alias = "out_path", default_value = ".")]
    out_path: PathBuf,

    /// Write the files to disk instead of printing them to the console
    #[arg(long)]
    no_pretend: bool,

    /// How the array length macro is named
    #[arg(long, value_enum, default_value = "shared")]
    length_macro: MacroNaming,

    /// Replace the default license banner with the contents of a file
    #[arg(long)]
    banner: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Naming scheme for the length macro
#[derive(Debug, Clone, Copy, ValueEnum)]
enum MacroNaming {
    /// XI_ROOTCA_LIST_BYTE_LENGTH, shared by every generated header
    Shared,
    /// <UPPER_NAME>_BYTE_LENGTH, safe when several arrays share a build
    PerArray,
}

impl From<MacroNaming> for LengthMacro {
    fn from(naming: MacroNaming) -> Self {
        match naming {
            MacroNaming::Shared => LengthMacro::Shared,
            MacroNaming::PerArray => LengthMacro::PerArray,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(&cli, &mut std::io::stdout())
}

/// Generate the artifact and send it to the sink selected by `--no-pretend`
fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let artifact = generate(cli)?;

    if cli.no_pretend {
        let mut sink = DirectorySink::new(&cli.out_path);
        sink.write_artifact(&artifact).with_context(|| {
            format!(
                "Failed to write {} / {} to {}",
                artifact.header_file_name(),
                artifact.source_file_name(),
                cli.out_path.display()
            )
        })?;
        for path in sink.written() {
            writeln!(out, "Wrote {}", path.display())?;
        }
    } else {
        PreviewSink::new(out)
            .write_artifact(&artifact)
            .context("Failed to print generated sources")?;
    }

    Ok(())
}

/// Build the emitter configuration from command-line flags
fn emitter_config(cli: &Cli) -> Result<EmitterConfig> {
    let mut config = EmitterConfig::new().length_macro(cli.length_macro.into());

    if let Some(ref banner) = cli.banner {
        let text = fs::read_to_string(banner)
            .with_context(|| format!("Failed to read banner file: {}", banner.display()))?;
        debug!("Using banner from {}", banner.display());
        config = config.banner(text);
    }

    Ok(config)
}

/// Load the input and generate the header/source pair
fn generate(cli: &Cli) -> Result<GeneratedArtifact> {
    let config = emitter_config(cli)?;

    let seq = match load(&cli.file_name) {
        Ok(seq) => seq,
        Err(e) if e.is_input_not_found() => {
            bail!("Input file does not exist: {}", cli.file_name.display())
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to load input file: {}", cli.file_name.display())
            })
        }
    };
    info!(
        "Loaded {} bytes from {} (including terminator)",
        seq.len(),
        cli.file_name.display()
    );

    Ok(Emitter::with_config(config).emit(&seq, &cli.array_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbuffer_core::SHARED_LENGTH_MACRO;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cbuffer").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_defaults() {
        let cli = parse(&["--file-name", "ca.pem", "--array-name", "xi_RootCA_list"]);
        assert_eq!(cli.file_name, PathBuf::from("ca.pem"));
        assert_eq!(cli.array_name.as_str(), "xi_RootCA_list");
        assert_eq!(cli.out_path, PathBuf::from("."));
        assert!(!cli.no_pretend);
        assert!(matches!(cli.length_macro, MacroNaming::Shared));
    }

    #[test]
    fn test_parse_underscore_aliases() {
        let cli = parse(&[
            "--file_name",
            "ca.pem",
            "--array_name",
            "ca",
            "--out_path",
            "out",
            "--no-pretend",
        ]);
        assert_eq!(cli.out_path, PathBuf::from("out"));
        assert!(cli.no_pretend);
    }

    #[test]
    fn test_rejects_invalid_array_name() {
        let result = Cli::try_parse_from(["cbuffer", "-f", "ca.pem", "-a", "root-ca"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_requires_arguments() {
        assert!(Cli::try_parse_from(["cbuffer", "-f", "ca.pem"]).is_err());
        assert!(Cli::try_parse_from(["cbuffer", "-a", "ca"]).is_err());
    }

    #[test]
    fn test_generate_and_write() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("ca.pem");
        fs::write(&input, "AB\n").unwrap();
        let out = temp_dir.path().join("generated");

        let cli = parse(&[
            "-f",
            input.to_str().unwrap(),
            "-a",
            "ca_list",
            "-o",
            out.to_str().unwrap(),
            "--no-pretend",
        ]);
        let mut stdout = Vec::new();
        run(&cli, &mut stdout).unwrap();

        let printed = String::from_utf8(stdout).unwrap();
        assert_eq!(
            printed,
            format!(
                "Wrote {}\nWrote {}\n",
                out.join("ca_list.h").display(),
                out.join("ca_list.c").display()
            )
        );

        let header = fs::read_to_string(out.join("ca_list.h")).unwrap();
        let source = fs::read_to_string(out.join("ca_list.c")).unwrap();
        assert!(header.contains(&format!("#define {} 3\n", SHARED_LENGTH_MACRO)));
        assert!(source.contains("0x41, 0x42, 0x00 };"));
    }

    #[test]
    fn test_preview_writes_nothing_to_disk() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("ca.pem");
        fs::write(&input, "AB\n").unwrap();
        let out = temp_dir.path().join("generated");

        let cli = parse(&[
            "-f",
            input.to_str().unwrap(),
            "-a",
            "ca_list",
            "-o",
            out.to_str().unwrap(),
        ]);
        let mut stdout = Vec::new();
        run(&cli, &mut stdout).unwrap();

        let artifact = generate(&cli).unwrap();
        let printed = String::from_utf8(stdout).unwrap();
        assert_eq!(
            printed,
            format!("{}\n{}\n", artifact.header(), artifact.source())
        );
        assert!(!out.exists());
    }

    #[test]
    fn test_per_array_macro_and_banner() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("blob.bin");
        fs::write(&input, [0xdeu8, 0xad, 0xbe, 0xef]).unwrap();
        let banner = temp_dir.path().join("banner.txt");
        fs::write(&banner, "/* Generated file. Do not edit. */").unwrap();

        let cli = parse(&[
            "-f",
            input.to_str().unwrap(),
            "-a",
            "blob",
            "--length-macro",
            "per-array",
            "--banner",
            banner.to_str().unwrap(),
        ]);
        let artifact = generate(&cli).unwrap();
        assert!(artifact
            .header()
            .starts_with("/* Generated file. Do not edit. */\n"));
        assert!(artifact.header().contains("#define BLOB_BYTE_LENGTH 5\n"));
    }

    #[test]
    fn test_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.pem");
        let cli = parse(&["-f", missing.to_str().unwrap(), "-a", "ca"]);

        let err = generate(&cli).unwrap_err();
        assert!(err.to_string().contains("Input file does not exist"));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
