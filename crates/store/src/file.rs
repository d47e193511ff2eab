use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::kv::KvStore;
use crate::{Error, Result};

/// Store keeping one file per key inside a directory.
///
/// Keys are escaped into file names: ASCII alphanumerics, `-` and `_` pass through, every other
/// byte becomes `%XX`. Writes go to a temporary file in the same directory that is then renamed
/// over the target, so readers never observe a partial value.
#[derive(Debug, Clone)]
pub struct FileStore {
	dir: PathBuf,
}

impl FileStore {
	/// Opens a store rooted at `dir`, creating the directory if needed.
	pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
		let dir = dir.into();
		fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
		Ok(Self { dir })
	}

	/// Directory holding the values.
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// File backing `key`.
	pub fn path_for(&self, key: &str) -> PathBuf {
		self.dir.join(escape(key))
	}
}

impl KvStore for FileStore {
	fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
		let path = self.path_for(key);
		match fs::read(&path) {
			Ok(bytes) => Ok(Some(bytes)),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(Error::io(path, e)),
		}
	}

	fn set(&self, key: &str, value: &[u8]) -> Result<()> {
		let path = self.path_for(key);
		let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
		tmp.write_all(value).map_err(|e| Error::io(tmp.path(), e))?;
		tmp.persist(&path).map_err(|e| Error::io(&path, e.error))?;
		debug!(path = %path.display(), bytes = value.len(), "stored value");
		Ok(())
	}

	fn contains(&self, key: &str) -> Result<bool> {
		Ok(self.path_for(key).is_file())
	}

	fn remove(&self, key: &str) -> Result<()> {
		let path = self.path_for(key);
		match fs::remove_file(&path) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(Error::io(path, e)),
		}
	}
}

pub(crate) fn escape(key: &str) -> String {
	let mut name = String::with_capacity(key.len());
	for byte in key.bytes() {
		if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
			name.push(char::from(byte));
		} else {
			let _ = write!(name, "%{byte:02X}");
		}
	}
	if name.is_empty() {
		name.push('%');
	}
	name
}

