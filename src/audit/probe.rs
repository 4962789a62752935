use super::classify::{category_for_extension, extension_of};
use super::error::ProbeError;
use super::types::FileRecord;
use std::fs::{self, Metadata};
use std::path::Path;

/// Read size and permission bits for one filesystem entry and classify it.
///
/// Performs exactly one metadata read and never touches file contents.
pub fn probe(path: &Path) -> Result<FileRecord, ProbeError> {
    let metadata = fs::metadata(path).map_err(|err| ProbeError::from_io(path, err))?;

    let extension = path
        .file_name()
        .map(|name| extension_of(&name.to_string_lossy()))
        .unwrap_or_default();

    Ok(FileRecord {
        path: path.to_path_buf(),
        size_bytes: metadata.len(),
        permission_bits: permission_bits(&metadata),
        category: category_for_extension(&extension),
        extension,
    })
}

#[cfg(unix)]
fn permission_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

// No rwx triplets off Unix; only the read-only flag is available.
#[cfg(not(unix))]
fn permission_bits(metadata: &Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}
