/// A hydrated file staged in memory before anything touches the output tree.
#[derive(Debug, Clone)]
pub struct StagedFile {
    /// Destination path relative to the output root, with every segment
    /// already token-substituted.
    pub destination: std::path::PathBuf,
    /// Token-substituted file contents, kept as raw bytes so binary stubs
    /// survive untouched.
    pub content: Vec<u8>,
}

/// The full output tree staged in memory.
///
/// Only regular files are staged; parent directories are created on apply.
#[derive(Debug, Clone, Default)]
pub struct StagedTree {
    pub files: Vec<StagedFile>,
}

impl StagedTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
