use std::collections::BTreeMap;
use std::io::{Cursor, Write};

use tracing::*;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::SplitError;

/// Name of the auxiliary entry appended to every archive.
pub const README_NAME: &str = "README.md";

pub const README: &str = "\
# Image slices

Every image in this archive was cut from a source image along guide lines.

The default naming scheme is `image-{i}-split-{index}.png`:

- `{i}` is the position of the source image in the export, starting at 0.
- `{index}` is the slice position, counted row by row from the top-left
  corner and starting at 0.

Custom patterns may also use `{w}` and `{h}` (slice size in pixels),
`{findex}` (position among slices that passed the size filters) and
`{sindex}` (position among the slices that were picked for export).
";

/// Collects named PNG blobs and writes them into one zip payload.
///
/// Entries keep insertion order. Inserting a name twice replaces the earlier
/// bytes in place.
#[derive(Debug, Default)]
pub struct ArchiveAssembler {
    order: Vec<String>,
    files: BTreeMap<String, Vec<u8>>,
}

impl ArchiveAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        let name = name.into();
        if self.files.insert(name.clone(), bytes).is_some() {
            warn!("Duplicate archive entry {}, keeping the later file", name);
        } else {
            self.order.push(name);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entry names in the order they will be written, without the README.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Writes every entry followed by the README and returns the archive bytes.
    pub fn finish(mut self) -> Result<Vec<u8>, SplitError> {
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let readme_taken = self.files.contains_key(README_NAME);

        for name in &self.order {
            let Some(bytes) = self.files.remove(name) else {
                continue;
            };
            writer.start_file(name.as_str(), options)?;
            writer.write_all(&bytes)?;
        }
        if readme_taken {
            warn!("A slice is named {}, skipping the bundled readme", README_NAME);
        } else {
            writer.start_file(README_NAME, options)?;
            writer.write_all(README.as_bytes())?;
        }

        let bytes = writer.finish()?.into_inner();
        debug!("Archive finished: {} slices, {} bytes", self.order.len(), bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_back(bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|index| {
                let mut file = archive.by_index(index).unwrap();
                let mut contents = Vec::new();
                file.read_to_end(&mut contents).unwrap();
                (file.name().to_string(), contents)
            })
            .collect()
    }

    #[test]
    fn test_readme_is_last() {
        let mut archive = ArchiveAssembler::new();
        archive.insert("b.png", vec![2]);
        archive.insert("a.png", vec![1]);
        let entries = read_back(archive.finish().unwrap());

        let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["b.png", "a.png", README_NAME]);
        assert_eq!(entries[2].1, README.as_bytes());
    }

    #[test]
    fn test_duplicate_names_keep_later_bytes() {
        let mut archive = ArchiveAssembler::new();
        archive.insert("same.png", vec![1]);
        archive.insert("other.png", vec![9]);
        archive.insert("same.png", vec![2, 3]);
        assert_eq!(archive.len(), 2);

        let entries = read_back(archive.finish().unwrap());
        assert_eq!(entries[0], ("same.png".to_string(), vec![2, 3]));
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_empty_archive_still_has_readme() {
        let entries = read_back(ArchiveAssembler::new().finish().unwrap());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, README_NAME);
    }
}
