use bytes::Bytes;
use std::path::{Path, PathBuf};

use super::UploadError;

/// Persists uploaded payloads in a flat directory, never overwriting an
/// existing file.
pub struct UploadSink {
    upload_dir: PathBuf,
}

impl UploadSink {
    pub fn new<P: AsRef<Path>>(upload_dir: P) -> Result<Self, std::io::Error> {
        let upload_dir = upload_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&upload_dir)?;
        Ok(Self { upload_dir })
    }

    /// Store `data` under a name derived from `original_name`, returning
    /// the name actually used.
    ///
    /// The client-supplied name is reduced to its final path segment, so a
    /// name embedding directory components cannot write outside the upload
    /// directory. Name collisions resolve to `stem_1.ext`, `stem_2.ext`, …
    /// with an unbounded counter.
    pub async fn store(&self, original_name: &str, data: Bytes) -> Result<String, UploadError> {
        let sanitized = leaf_name(original_name);
        let (stem, ext) = split_extension(sanitized);

        let mut dest_name = sanitized.to_string();
        let mut counter: u64 = 1;
        while self.upload_dir.join(&dest_name).exists() {
            dest_name = format!("{stem}_{counter}{ext}");
            counter += 1;
        }

        tokio::fs::write(self.upload_dir.join(&dest_name), &data).await?;
        Ok(dest_name)
    }
}

/// Final path segment of a client-supplied name; both separator styles
/// count, whatever platform the client ran on.
fn leaf_name(name: &str) -> &str {
    match name.rfind(['/', '\\']) {
        Some(ix) => &name[ix + 1..],
        None => name,
    }
}

/// Split a filename into stem and extension (dot included). Leading dots
/// never start an extension, so dotfiles keep their full name as the stem.
fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(ix) => name.split_at(leading + ix),
        None => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_name_strips_directories() {
        assert_eq!(leaf_name("report.pdf"), "report.pdf");
        assert_eq!(leaf_name("dir/report.pdf"), "report.pdf");
        assert_eq!(leaf_name("../../etc/passwd"), "passwd");
        assert_eq!(leaf_name("dir1\\dir2\\report.pdf"), "report.pdf");
        assert_eq!(leaf_name(""), "");
    }

    #[test]
    fn split_extension_cases() {
        assert_eq!(split_extension("report.pdf"), ("report", ".pdf"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".gitignore"), (".gitignore", ""));
        assert_eq!(split_extension(""), ("", ""));
    }
}
