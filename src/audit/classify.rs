//! Extension based classification.
//!
//! The table is a closed `match`; anything it does not name lands in
//! [`Category::Other`], which the aggregator also records as an unknown extension.

use super::types::Category;
use std::path::Path;

/// Lower-cased extension of `file_name` including the leading dot.
///
/// Dotfiles such as `.bashrc` have no extension and yield an empty string.
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Category for an already normalised extension (see [`extension_of`])
pub fn category_for_extension(extension: &str) -> Category {
    match extension {
        ".txt" | ".log" | ".md" | ".csv" => Category::Text,
        ".jpg" | ".jpeg" | ".png" | ".gif" | ".bmp" | ".svg" => Category::Image,
        ".sh" | ".exe" | ".bin" | ".run" => Category::Executable,
        ".mp4" | ".mkv" | ".avi" | ".mov" => Category::Video,
        ".mp3" | ".wav" | ".ogg" | ".flac" => Category::Audio,
        ".zip" | ".tar" | ".gz" | ".bz2" | ".7z" => Category::Archive,
        _ => Category::Other,
    }
}

/// Classify a file by name. Total: never fails.
pub fn classify(file_name: &str) -> Category {
    category_for_extension(&extension_of(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(classify("notes.txt"), Category::Text);
        assert_eq!(classify("README.md"), Category::Text);
        assert_eq!(classify("photo.png"), Category::Image);
        assert_eq!(classify("logo.svg"), Category::Image);
        assert_eq!(classify("install.sh"), Category::Executable);
        assert_eq!(classify("clip.mkv"), Category::Video);
        assert_eq!(classify("song.flac"), Category::Audio);
        assert_eq!(classify("backup.tar.gz"), Category::Archive);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("PHOTO.JPG"), Category::Image);
        assert_eq!(classify("Notes.TxT"), Category::Text);
        assert_eq!(extension_of("PHOTO.JPG"), ".jpg");
    }

    #[test]
    fn test_unknown_falls_through_to_other() {
        assert_eq!(classify("data.xyz"), Category::Other);
        assert_eq!(classify("Makefile"), Category::Other);
        assert_eq!(classify(".bashrc"), Category::Other);
        assert_eq!(classify(""), Category::Other);
    }

    #[test]
    fn test_extension_of_edge_cases() {
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("trailing."), ".");
    }
}
