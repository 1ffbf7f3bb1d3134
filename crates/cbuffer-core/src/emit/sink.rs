//! Output sinks for generated artifacts.
//!
//! This module provides the [`ArtifactSink`] trait and its two
//! implementations: [`PreviewSink`] prints both texts to a stream, and
//! [`DirectorySink`] writes `<name>.h` and `<name>.c` to disk.

use super::GeneratedArtifact;
use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, trace};

/// Destination for a generated header/source pair.
///
/// Implement this trait to route artifacts somewhere other than a
/// terminal or a directory.
pub trait ArtifactSink {
    /// Emit both texts of the artifact
    fn write_artifact(&mut self, artifact: &GeneratedArtifact) -> Result<()>;
}

/// Writes the header, then the source, each followed by a newline.
pub struct PreviewSink<W: io::Write> {
    out: W,
}

impl PreviewSink<io::Stdout> {
    /// A preview sink printing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: io::Write> PreviewSink<W> {
    /// Wraps an arbitrary writer
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the wrapped writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> ArtifactSink for PreviewSink<W> {
    fn write_artifact(&mut self, artifact: &GeneratedArtifact) -> Result<()> {
        self.out.write_all(artifact.header().as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.write_all(artifact.source().as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes `<name>.h` and `<name>.c` into a directory.
///
/// Both files are staged as hidden temp files next to their targets and
/// only renamed into place once both have been written, so a failed write
/// never leaves a fresh header paired with a stale source.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Creates a sink rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in write order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn staging_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(format!(".{}.tmp", file_name))
    }
}

impl ArtifactSink for DirectorySink {
    fn write_artifact(&mut self, artifact: &GeneratedArtifact) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::directory_create(&self.dir, e))?;

        let files = [
            (artifact.header_file_name(), artifact.header()),
            (artifact.source_file_name(), artifact.source()),
        ];

        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());
        for (file_name, contents) in &files {
            let temp = self.staging_path(file_name);
            trace!("Staging {}", temp.display());

            if let Err(e) = fs::write(&temp, contents) {
                discard(&temp);
                for (t, _) in &staged {
                    discard(t);
                }
                return Err(Error::file_write(temp, e));
            }
            staged.push((temp, self.dir.join(file_name)));
        }

        for (i, (temp, target)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(temp, target) {
                for (t, _) in &staged[i..] {
                    discard(t);
                }
                return Err(Error::file_write(target, e));
            }
            info!("Wrote {}", target.display());
            self.written.push(target.clone());
        }

        Ok(())
    }
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        trace!("Could not remove {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::{emit, ArrayName};
    use crate::loader::ByteSequence;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn artifact(name: &str, bytes: &[u8]) -> GeneratedArtifact {
        let seq = ByteSequence::from_bytes(bytes.to_vec());
        emit(&seq, &ArrayName::new(name).unwrap())
    }

    #[test]
    fn test_preview_layout() {
        let artifact = artifact("ca", b"A");
        let mut sink = PreviewSink::new(Vec::new());
        sink.write_artifact(&artifact).unwrap();

        let printed = String::from_utf8(sink.into_inner()).unwrap();
        let expected = format!("{}\n{}\n", artifact.header(), artifact.source());
        assert_eq!(printed, expected);
    }

    #[test]
    fn test_directory_sink_writes_both() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("src").join("generated");
        let artifact = artifact("xi_RootCA_list", b"-----BEGIN CERTIFICATE-----\n");

        let mut sink = DirectorySink::new(&out);
        sink.write_artifact(&artifact).unwrap();

        let header = fs::read_to_string(out.join("xi_RootCA_list.h")).unwrap();
        let source = fs::read_to_string(out.join("xi_RootCA_list.c")).unwrap();
        assert_eq!(header, artifact.header());
        assert_eq!(source, artifact.source());
        assert_eq!(
            sink.written().to_vec(),
            vec![out.join("xi_RootCA_list.h"), out.join("xi_RootCA_list.c")]
        );

        let leftovers: Vec<_> = fs::read_dir(&out)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_directory_sink_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("ca.h"), "stale").unwrap();
        fs::write(temp_dir.path().join("ca.c"), "stale").unwrap();

        let artifact = artifact("ca", b"fresh");
        DirectorySink::new(temp_dir.path())
            .write_artifact(&artifact)
            .unwrap();

        let header = fs::read_to_string(temp_dir.path().join("ca.h")).unwrap();
        assert_eq!(header, artifact.header());
    }

    #[test]
    fn test_directory_sink_failed_staging_keeps_old_pair() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("ca.h"), "stale-h").unwrap();
        fs::write(dir.join("ca.c"), "stale-c").unwrap();
        // A directory where the source temp file should go makes staging fail
        fs::create_dir(dir.join(".ca.c.tmp")).unwrap();

        let mut sink = DirectorySink::new(dir);
        let err = sink
            .write_artifact(&artifact("ca", b"fresh"))
            .unwrap_err();

        assert!(matches!(err, Error::FileWrite { .. }));
        assert_eq!(fs::read_to_string(dir.join("ca.h")).unwrap(), "stale-h");
        assert_eq!(fs::read_to_string(dir.join("ca.c")).unwrap(), "stale-c");
        assert!(!dir.join(".ca.h.tmp").exists());
        assert!(sink.written().is_empty());
    }

    #[test]
    fn test_directory_sink_blocked_by_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();

        let err = DirectorySink::new(&blocker)
            .write_artifact(&artifact("ca", b"x"))
            .unwrap_err();
        assert!(matches!(err, Error::DirectoryCreate { .. }));
    }
}
