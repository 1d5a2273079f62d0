//! Template compiler capability.
//!
//! The pipeline only knows about the [`TemplateCompiler`] trait; the concrete
//! backend is chosen by the bootstrap file. A compiler either returns the
//! generated code or fails with a [`CompileError`] locating the problem in a
//! template. Anything else (the compiler binary is missing, a file cannot be
//! read) is a fatal [`CheckError`].

pub mod command;

pub use command::CommandCompiler;

use crate::errors::CheckError;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// A template failed to compile.
///
/// `source_file` may differ from the template that was being compiled when
/// the failure happened inside an included template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({}:{source_line})", .source_file.display())]
pub struct CompileError {
    pub message: String,
    pub source_file: PathBuf,
    pub source_line: usize,
}

impl CompileError {
    pub fn new(
        message: impl Into<String>,
        source_file: impl Into<PathBuf>,
        source_line: usize,
    ) -> Self {
        Self {
            message: message.into(),
            source_file: source_file.into(),
            source_line,
        }
    }
}

/// Why a call to [`TemplateCompiler::compile`] produced no code.
#[derive(Debug, Error)]
pub enum CompileFailure {
    /// Recoverable: reported and the batch continues
    #[error(transparent)]
    Template(#[from] CompileError),

    /// The compiler could not run at all
    #[error(transparent)]
    Fatal(#[from] CheckError),
}

pub trait TemplateCompiler {
    fn compile(&self, path: &Path) -> Result<String, CompileFailure>;
}

impl<T: TemplateCompiler + ?Sized> TemplateCompiler for Box<T> {
    fn compile(&self, path: &Path) -> Result<String, CompileFailure> {
        (**self).compile(path)
    }
}

/// Location of the compiled artifact for `source`.
///
/// The whole absolute source path is mirrored below `compiled_root` so that
/// templates with the same relative name under different roots never collide,
/// and the extension is swapped for `target_extension`.
pub fn compiled_path(compiled_root: &Path, source: &Path, target_extension: &str) -> PathBuf {
    let mut target = compiled_root.to_path_buf();
    for component in source.components() {
        match component {
            Component::Prefix(prefix) => {
                let drive: OsString = prefix
                    .as_os_str()
                    .to_string_lossy()
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .collect::<String>()
                    .into();
                target.push(drive);
            }
            Component::Normal(part) => target.push(part),
            Component::RootDir | Component::CurDir | Component::ParentDir => {}
        }
    }
    target.set_extension(target_extension);
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compiled_path_mirrors_absolute_source() {
        let target = compiled_path(
            Path::new("/tmp/compiled"),
            Path::new("/srv/app/templates/Home/default.latte"),
            "php",
        );
        assert_eq!(
            target,
            PathBuf::from("/tmp/compiled/srv/app/templates/Home/default.php")
        );
    }

    #[test]
    fn test_compiled_path_only_replaces_final_extension() {
        let target = compiled_path(
            Path::new("out"),
            Path::new("/srv/my.latte.d/page.latte"),
            "php",
        );
        assert_eq!(target, PathBuf::from("out/srv/my.latte.d/page.php"));
    }

    #[test]
    fn test_distinct_roots_do_not_collide() {
        let a = compiled_path(Path::new("/c"), Path::new("/one/x.latte"), "php");
        let b = compiled_path(Path::new("/c"), Path::new("/two/x.latte"), "php");
        assert_ne!(a, b);
    }

    #[test]
    fn test_compile_error_display() {
        let err = CompileError::new("Unexpected tag {/if}", "/app/bad.latte", 4);
        assert_eq!(err.to_string(), "Unexpected tag {/if} (/app/bad.latte:4)");
    }
}
