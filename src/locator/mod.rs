//! Command discovery for PowerShell script trees.
//!
//! The locator walks a directory for script files, tokenizes each one and
//! records every `function` and `workflow` declaration it finds:
//!
//! ```text
//! root/
//! ├── deploy.ps1     workflow Deploy-App { ... }   -> Deploy-App (orchestration)
//! └── lib/
//!     └── util.psm1  function Get-Thing { ... }    -> Get-Thing  (routine)
//! ```
//!
//! Every call rescans the disk; nothing is cached between calls. Any
//! enumeration or read failure aborts the scan, so callers get either a
//! complete map or an error.

mod scan;
mod types;

pub use scan::{Declaration, declarations, scan_source};
pub use types::{CommandMap, DeclarationKind, DeclarationRecord};

use crate::errors::LocateError;
use crate::logging::OperationLog;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File extensions scanned when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ps1", "psm1"];

const COMPONENT: &str = "locator";

/// Options controlling which files a scan visits.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Recognised script extensions, without the leading dot
    pub extensions: Vec<String>,
    /// Follow symbolic links while walking
    pub follow_links: bool,
    /// Glob patterns, relative to the scan root, for paths to skip
    pub exclude: Vec<glob::Pattern>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            follow_links: false,
            exclude: Vec::new(),
        }
    }
}

impl ScanOptions {
    /// True if `path` has one of the recognised extensions (ignoring case).
    pub fn is_script(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.exclude.iter().any(|p| p.matches_path(relative))
    }
}

/// Scans script trees for declared commands.
#[derive(Debug, Clone, Default)]
pub struct CommandLocator {
    options: ScanOptions,
}

impl CommandLocator {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Build the command map for every script file under `root`.
    ///
    /// Files are visited in file-name order within each directory; when two
    /// declarations share a name the one visited last wins.
    pub fn locate(&self, root: &Path) -> Result<CommandMap, LocateError> {
        let root = resolve_existing(root)?;
        let op = OperationLog::start(COMPONENT, "locate", root.display().to_string());

        let files = self.script_files(&root)?;
        let mut map = CommandMap::new();
        for file in &files {
            scan_file_into(file, &mut map)?;
        }

        op.complete(&format!(
            "{} routines and {} orchestrations from {} files",
            map.of_kind(DeclarationKind::Routine).count(),
            map.of_kind(DeclarationKind::Orchestration).count(),
            files.len()
        ));
        Ok(map)
    }

    /// Enumerate the script files a scan of `root` would visit, in visit order.
    ///
    /// A symlink to a script file counts as a script file even when links
    /// are not followed; `follow_links` only governs linked directories.
    pub fn script_files(&self, root: &Path) -> Result<Vec<PathBuf>, LocateError> {
        let root = resolve_existing(root)?;
        let walker = WalkDir::new(&root)
            .follow_links(self.options.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.skip_entry(&root, entry));

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| LocateError::Walk {
                path: source.path().map_or_else(|| root.clone(), Path::to_path_buf),
                source,
            })?;
            if self.options.is_script(entry.path()) && is_file_entry(&entry)? {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn skip_entry(&self, root: &Path, entry: &DirEntry) -> bool {
        entry.depth() > 0 && self.options.is_excluded(root, entry.path())
    }

    /// First workflow declared in `file`, if any.
    ///
    /// Only that file is scanned, whatever its extension. "First" means in
    /// declaration order, counting only declarations that survive
    /// last-write-wins within the file.
    pub fn find_orchestration(&self, file: &Path) -> Result<Option<DeclarationRecord>, LocateError> {
        let file = resolve_existing(file)?;
        let op = OperationLog::start(COMPONENT, "find_orchestration", file.display().to_string());

        let mut map = CommandMap::new();
        let found = scan_file_into(&file, &mut map)?;
        let first = found.into_iter().find(|record| {
            record.kind == DeclarationKind::Orchestration && map.get(&record.name) == Some(record)
        });

        match &first {
            Some(record) => op.complete(&format!("found workflow {}", record.name)),
            None => op.complete("no workflow declared"),
        }
        Ok(first)
    }

    /// Like `find_orchestration`, but a file without a workflow is an error.
    pub fn require_orchestration(&self, file: &Path) -> Result<DeclarationRecord, LocateError> {
        self.find_orchestration(file)?
            .ok_or_else(|| LocateError::NoOrchestrationDeclared {
                path: file.to_path_buf(),
            })
    }

    /// Whether `file` declares a workflow. Only I/O problems are errors.
    pub fn has_orchestration(&self, file: &Path) -> Result<bool, LocateError> {
        Ok(self.find_orchestration(file)?.is_some())
    }
}

/// Make `path` absolute and confirm it exists.
fn resolve_existing(path: &Path) -> Result<PathBuf, LocateError> {
    let not_found = || LocateError::PathNotFound {
        path: path.to_path_buf(),
    };
    let absolute = std::path::absolute(path).map_err(|_| not_found())?;
    match absolute.try_exists() {
        Ok(true) => Ok(absolute),
        Ok(false) | Err(_) => Err(not_found()),
    }
}

/// True for regular files and for unfollowed symlinks whose target is a file.
fn is_file_entry(entry: &DirEntry) -> Result<bool, LocateError> {
    if entry.file_type().is_file() {
        return Ok(true);
    }
    if !entry.path_is_symlink() {
        return Ok(false);
    }
    std::fs::metadata(entry.path())
        .map(|meta| meta.is_file())
        .map_err(|source| LocateError::Read {
            path: entry.path().to_path_buf(),
            source,
        })
}

fn read_script(file: &Path) -> Result<String, LocateError> {
    let read_error = |source: std::io::Error| LocateError::Read {
        path: file.to_path_buf(),
        source,
    };
    let bytes = std::fs::read(file).map_err(read_error)?;
    decode_script(&bytes).map_err(read_error)
}

/// Decode script bytes as UTF-8, or as the encoding named by a leading
/// UTF-8, UTF-16LE or UTF-16BE byte order mark.
fn decode_script(bytes: &[u8]) -> std::io::Result<String> {
    let (encoding, bom_len) =
        encoding_rs::Encoding::for_bom(bytes).unwrap_or((encoding_rs::UTF_8, 0));
    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("script is not valid {}", encoding.name()),
            )
        })
}

/// Scan one file into `map`, returning its declarations in source order.
fn scan_file_into(
    file: &Path,
    map: &mut CommandMap,
) -> Result<Vec<DeclarationRecord>, LocateError> {
    let source = read_script(file)?;
    let found: Vec<DeclarationRecord> = scan_source(&source)
        .into_iter()
        .map(|declaration| DeclarationRecord::new(declaration.name, declaration.kind, file))
        .collect();
    tracing::debug!(file = %file.display(), declarations = found.len(), "scanned");

    for record in &found {
        if let Some(previous) = map.insert(record.clone()) {
            tracing::debug!(
                name = %record.name,
                previous = %previous.source_path.display(),
                current = %file.display(),
                "declaration replaced"
            );
        }
    }
    Ok(found)
}

/// Scan `root` with default options.
pub fn locate(root: &Path) -> Result<CommandMap, LocateError> {
    CommandLocator::default().locate(root)
}

/// First workflow declared in `file`, using default options.
pub fn find_orchestration(file: &Path) -> Result<Option<DeclarationRecord>, LocateError> {
    CommandLocator::default().find_orchestration(file)
}

/// First workflow declared in `file`, or `LocateError::NoOrchestrationDeclared`.
pub fn require_orchestration(file: &Path) -> Result<DeclarationRecord, LocateError> {
    CommandLocator::default().require_orchestration(file)
}

/// Whether `file` declares a workflow.
pub fn has_orchestration(file: &Path) -> Result<bool, LocateError> {
    CommandLocator::default().has_orchestration(file)
}
