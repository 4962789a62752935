use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Permission bits that mark a file as unusual: write or execute for group or other.
pub const UNUSUAL_PERMISSION_MASK: u32 = 0o033;

/// Semantic file type derived from a file's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Text,
    Image,
    Executable,
    Video,
    Audio,
    Archive,
    /// Fallthrough for extensions absent from the table
    Other,
}

impl Category {
    pub const COUNT: usize = 7;

    /// All categories in report order
    pub const ALL: [Category; Category::COUNT] = [
        Category::Text,
        Category::Image,
        Category::Executable,
        Category::Video,
        Category::Audio,
        Category::Archive,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Text => "Text",
            Category::Image => "Image",
            Category::Executable => "Executable",
            Category::Video => "Video",
            Category::Audio => "Audio",
            Category::Archive => "Archive",
            Category::Other => "Other",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metadata for one regular file, produced once per probe and never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// POSIX rwxrwxrwx bits (`mode & 0o777`)
    pub permission_bits: u32,
    pub category: Category,
    /// Lower-cased extension including the dot, empty when the name has none
    pub extension: String,
}

impl FileRecord {
    /// Permission bits as a three digit octal string, e.g. `"644"`
    pub fn permissions_octal(&self) -> String {
        format!("{:03o}", self.permission_bits & 0o777)
    }

    pub fn has_unusual_permissions(&self) -> bool {
        self.permission_bits & UNUSUAL_PERMISSION_MASK != 0
    }

    pub fn is_large(&self, threshold_bytes: u64) -> bool {
        self.size_bytes >= threshold_bytes
    }

    pub fn has_unknown_extension(&self) -> bool {
        self.category == Category::Other
    }
}

/// Per-category totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeBucket {
    pub category: Category,
    pub file_count: u64,
    pub total_bytes: u64,
}

/// Diagnostics gathered during a run; not part of the report proper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub files_dispatched: u64,
    pub files_probed: u64,
    pub skipped_not_found: u64,
    pub skipped_permission_denied: u64,
    pub skipped_other: u64,
    pub walk_errors: u64,
    pub directories: u64,
    pub workers: usize,
    pub duration_ms: u64,
}

impl RunStats {
    pub fn files_skipped(&self) -> u64 {
        self.skipped_not_found + self.skipped_permission_denied + self.skipped_other
    }
}

/// Final aggregate of a single `analyze` call
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub threshold_bytes: u64,
    /// Only categories that received at least one file are present
    pub buckets: BTreeMap<Category, TypeBucket>,
    pub unusual_permissions: Vec<FileRecord>,
    pub large_files: Vec<FileRecord>,
    pub unknown_extensions: Vec<FileRecord>,
    pub stats: RunStats,
}

impl RunReport {
    pub fn bucket(&self, category: Category) -> Option<&TypeBucket> {
        self.buckets.get(&category)
    }

    /// Sum of `file_count` over every bucket
    pub fn total_files(&self) -> u64 {
        self.buckets.values().map(|b| b.file_count).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.buckets.values().map(|b| b.total_bytes).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
            && self.unusual_permissions.is_empty()
            && self.large_files.is_empty()
            && self.unknown_extensions.is_empty()
    }

    /// Make list order deterministic: large files by size (largest first),
    /// everything else by path.
    pub fn sort(&mut self) {
        self.large_files
            .sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes).then_with(|| a.path.cmp(&b.path)));
        self.unusual_permissions.sort_by(|a, b| a.path.cmp(&b.path));
        self.unknown_extensions.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Unknown-extension files grouped by their extension
    pub fn unknown_by_extension(&self) -> BTreeMap<&str, Vec<&FileRecord>> {
        let mut groups: BTreeMap<&str, Vec<&FileRecord>> = BTreeMap::new();
        for record in &self.unknown_extensions {
            groups.entry(record.extension.as_str()).or_default().push(record);
        }
        groups
    }
}
