use std::io;
use std::path::{Path, PathBuf};

/// Lists the regular files of `dir`, sorted by path.
pub fn list_index_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Extracts `<n>` from a file named `<prefix>-<n>.txt`.
pub fn partition_number(path: &Path) -> Option<usize> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".txt")?;
    let (_, number) = stem.rsplit_once('-')?;
    number.parse().ok()
}

/// Keeps the files whose partition number maps onto `shard_id`.
///
/// Files without a `-<n>.txt` suffix are ignored.
pub fn select_files_for_shard(files: &[PathBuf], shard_id: usize, num_shards: usize) -> Vec<PathBuf> {
    if num_shards == 0 {
        return Vec::new();
    }

    files
        .iter()
        .filter(|path| partition_number(path).is_some_and(|n| n % num_shards == shard_id))
        .cloned()
        .collect()
}

/// Parses the shard id out of a hostname such as `indexserver-3`.
pub fn shard_id_from_name(name: &str) -> Option<usize> {
    let (_, id) = name.rsplit_once('-')?;
    id.parse().ok()
}
