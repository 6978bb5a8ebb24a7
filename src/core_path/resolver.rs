use crate::core_error::FtpdError;
use std::path::{Component, Path, PathBuf};

/// The directory every session is confined to.
///
/// Built once at startup from an absolute, lexically normalized path. All
/// client paths go through [`VirtualRoot::resolve`] before they touch the
/// filesystem.
#[derive(Debug, Clone)]
pub struct VirtualRoot {
    root: PathBuf,
}

/// A client path that has been checked against the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    real: PathBuf,
    virtual_path: String,
}

impl ResolvedPath {
    /// Absolute path on disk, equal to the root or inside it.
    pub fn real(&self) -> &Path {
        &self.real
    }

    /// Path as the client sees it, always starting with `/`.
    pub fn virtual_path(&self) -> &str {
        &self.virtual_path
    }

    pub fn into_real(self) -> PathBuf {
        self.real
    }
}

impl VirtualRoot {
    /// Makes `dir` absolute against the current directory, normalizes it and
    /// checks that it is an existing directory. An empty path means `.`.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, FtpdError> {
        let dir = dir.as_ref();
        let absolute = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            std::env::current_dir()?.join(dir)
        };
        let root = normalize(&absolute);

        match std::fs::metadata(&root) {
            Ok(metadata) if metadata.is_dir() => Ok(Self { root }),
            _ => Err(FtpdError::InvalidRoot(root)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolves `arg` relative to the virtual working directory `cwd`.
    ///
    /// Absolute arguments (`/x`) are taken from the root, anything else is
    /// appended to `cwd`. The joined path is normalized lexically; `None`
    /// means it ended up outside the root.
    pub fn resolve(&self, cwd: &str, arg: &str) -> Option<ResolvedPath> {
        let virtual_path = if arg.starts_with('/') {
            arg.to_string()
        } else {
            format!("{}/{}", cwd.trim_end_matches('/'), arg)
        };

        let mut candidate = self.root.clone();
        for component in Path::new(&virtual_path).components() {
            match component {
                Component::Normal(part) => candidate.push(part),
                Component::ParentDir => {
                    candidate.pop();
                }
                Component::CurDir | Component::RootDir => {}
                Component::Prefix(_) => return None,
            }
        }

        if !candidate.starts_with(&self.root) {
            return None;
        }

        let virtual_path = self.virtual_path_of(&candidate);
        Some(ResolvedPath {
            real: candidate,
            virtual_path,
        })
    }

    /// Client-visible form of a real path inside the root.
    pub fn virtual_path_of(&self, real: &Path) -> String {
        let relative = real.strip_prefix(&self.root).unwrap_or(Path::new(""));
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        format!("/{}", parts.join("/"))
    }
}

/// Lexical normalization: drops `.`, folds `..` and repeated separators.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
