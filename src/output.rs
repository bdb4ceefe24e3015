//! Output errors and file path generation

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for writing the animation
#[derive(Debug, Error)]
pub enum OutputError {
    /// Creating the file or its directories failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The encoder rejected a frame or setting
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Create the parent directories of `path` if they don't exist.
pub fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Default file name for an input: `{input_stem}_animated.gif`.
pub fn default_output_name(input: &Path) -> String {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    format!("{}_animated.gif", stem)
}

/// Default output path, relative to the current directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    PathBuf::from(default_output_name(input))
}

/// Resolve where the animation should be written.
///
/// | `-o` argument            | Output                          |
/// |--------------------------|---------------------------------|
/// | none                     | `{input_stem}_animated.gif`     |
/// | `out.gif`                | `out.gif`                       |
/// | `dir/` or existing dir   | `dir/{input_stem}_animated.gif` |
pub fn resolve_output_path(input: &Path, output_arg: Option<&Path>) -> PathBuf {
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(default_output_name(input))
            } else {
                output.to_path_buf()
            }
        }
        None => default_output_path(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("art/waterfall.png")),
            PathBuf::from("waterfall_animated.gif")
        );
    }

    #[test]
    fn test_resolve_explicit_file() {
        let path = resolve_output_path(Path::new("in.png"), Some(Path::new("out/anim.gif")));
        assert_eq!(path, PathBuf::from("out/anim.gif"));
    }

    #[test]
    fn test_resolve_trailing_slash_dir() {
        let path = resolve_output_path(Path::new("sprites/fire.png"), Some(Path::new("build/")));
        assert_eq!(path, PathBuf::from("build/fire_animated.gif"));
    }

    #[test]
    fn test_resolve_existing_dir() {
        let dir = tempdir().unwrap();
        let path = resolve_output_path(Path::new("lava.png"), Some(dir.path()));
        assert_eq!(path, dir.path().join("lava_animated.gif"));
    }

    #[test]
    fn test_ensure_parent_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a/b/c.gif");
        ensure_parent_dir(&path).unwrap();
        assert!(dir.path().join("a/b").is_dir());
    }

    #[test]
    fn test_output_error_display() {
        let err = OutputError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(err.to_string(), "IO error: boom");
        assert!(std::error::Error::source(&err).is_some());
    }
}
