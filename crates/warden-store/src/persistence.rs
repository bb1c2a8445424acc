//! Seed loading and atomic persistence of the dynamic rule set.
//!
//! Files are JSON arrays. The durable dynamic-rule file is rewritten in full
//! on every mutation: written to a sibling temp file, synced, then renamed
//! over the target, so a crash never leaves a half-written file behind.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use warden_core::errors::{StoreError, StoreResult};
use warden_rules::DynamicRule;

use crate::entry::KnowledgeEntry;

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Read a file, mapping "not found" to `Ok(None)`.
fn read_optional(path: &Path) -> Result<Option<String>, std::io::Error> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Load the mandatory knowledge-entry seed.
///
/// Missing file → `SeedMissing`; unreadable, undecodable, invalid or
/// duplicate-keyed content → `SeedMalformed`.
pub fn load_entries_seed(path: &Path) -> StoreResult<Vec<KnowledgeEntry>> {
    let raw = read_optional(path)
        .map_err(|e| StoreError::SeedMalformed {
            path: display(path),
            message: e.to_string(),
        })?
        .ok_or_else(|| StoreError::SeedMissing {
            path: display(path),
        })?;

    let entries: Vec<KnowledgeEntry> =
        serde_json::from_str(&raw).map_err(|e| StoreError::SeedMalformed {
            path: display(path),
            message: e.to_string(),
        })?;

    let mut seen = FxHashSet::default();
    for entry in &entries {
        entry.validate().map_err(|e| StoreError::SeedMalformed {
            path: display(path),
            message: e.to_string(),
        })?;
        if !seen.insert(entry.id.as_str()) {
            return Err(StoreError::SeedMalformed {
                path: display(path),
                message: format!("duplicate entry id '{}'", entry.id),
            });
        }
    }
    Ok(entries)
}

/// Load the durable dynamic-rule file, if present. Corruption is fatal.
pub fn load_dynamic_rules(path: &Path) -> StoreResult<Option<Vec<DynamicRule>>> {
    let corrupt = |message: String| StoreError::DurableCorrupt {
        path: display(path),
        message,
    };
    match read_optional(path).map_err(|e| corrupt(e.to_string()))? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| corrupt(e.to_string())),
        None => Ok(None),
    }
}

/// Load the optional dynamic-rule seed, if present.
pub fn load_dynamic_seed(path: &Path) -> StoreResult<Option<Vec<DynamicRule>>> {
    let malformed = |message: String| StoreError::SeedMalformed {
        path: display(path),
        message,
    };
    match read_optional(path).map_err(|e| malformed(e.to_string()))? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| malformed(e.to_string())),
        None => Ok(None),
    }
}

/// Serialize and atomically write the full dynamic-rule set.
pub fn save_dynamic_rules(path: &Path, rules: &[DynamicRule]) -> StoreResult<()> {
    let json = serde_json::to_vec_pretty(rules).map_err(|e| StoreError::Persistence {
        path: display(path),
        message: e.to_string(),
    })?;
    write_atomic(path, &json)
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dynamic_rules".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Write `bytes` to a sibling temp file, sync it, and rename it over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let fail = |e: std::io::Error| StoreError::Persistence {
        path: display(path),
        message: e.to_string(),
    };

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(fail)?;

    let tmp = temp_path(path);
    let written = File::create(&tmp).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(fail(e));
    }
    sync_dir(parent).map_err(fail)
}

/// Flush a directory entry so a completed rename survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    File::open(dir)?.sync_all()
}

/// Directories cannot be opened for syncing here; the rename is final.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}
