//! Reader, writer and file entry points.
//!
//! [`ConfigFacade`] pairs a [`ConfigMapper`] with a [`ConfigAdapter`] and runs
//! `adapter.read → mapper.load` or `mapper.save → adapter.write`. Errors from
//! either side are returned unchanged inside [`Error`].

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::adapter::ConfigAdapter;
use crate::mapper::{ConfigMapper, LoadingMode};
use crate::schema::Mapped;
use crate::tree::Root;
use crate::{Error, Result};

/// Loads and stores a mapped type through one configuration format.
#[derive(Debug, Clone)]
pub struct ConfigFacade<T, A> {
    mapper: ConfigMapper<T>,
    adapter: A,
}

impl<T: Mapped, A: ConfigAdapter> ConfigFacade<T, A> {
    /// Creates a facade, building the schema of `T` up front.
    pub fn new(adapter: A) -> Result<Self> {
        Ok(Self::with_mapper(ConfigMapper::new()?, adapter))
    }

    pub fn with_mapper(mapper: ConfigMapper<T>, adapter: A) -> Self {
        Self { mapper, adapter }
    }

    pub fn mapper(&self) -> &ConfigMapper<T> {
        &self.mapper
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Reads a document from `reader` and loads a `T` from it.
    pub fn load(&self, reader: &mut dyn Read, mode: LoadingMode) -> Result<T> {
        let root = self.adapter.read(reader)?;
        Ok(self.mapper.load(&root, mode)?)
    }

    /// Loads a `T` from the file at `path`.
    pub fn load_file(&self, path: impl AsRef<Path>, mode: LoadingMode) -> Result<T> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration file");
        let mut reader = BufReader::new(open(path)?);
        self.load(&mut reader, mode)
    }

    /// Saves `object` and writes the resulting document to `writer`.
    pub fn save(&self, object: &T, writer: &mut dyn Write) -> Result<()> {
        let root = self.mapper.save(object)?;
        self.adapter.write(&root, writer)?;
        Ok(())
    }

    /// Saves `object` to the file at `path`, replacing its contents.
    pub fn save_file(&self, object: &T, path: impl AsRef<Path>) -> Result<()> {
        let root = self.mapper.save(object)?;
        self.write_file(&root, path.as_ref())
    }

    /// Writes the declared defaults of `T` to `writer`.
    pub fn save_defaults(&self, writer: &mut dyn Write) -> Result<()> {
        self.adapter.write(&self.mapper.save_defaults(), writer)?;
        Ok(())
    }

    /// Writes the declared defaults of `T` to the file at `path`.
    pub fn save_defaults_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.write_file(&self.mapper.save_defaults(), path.as_ref())
    }

    /// Saves `object` on top of the file at `path`.
    ///
    /// Sections and options already in the file that `T` does not map are
    /// kept; options `T` maps are replaced. Absent optional fields do not
    /// remove an option already in the file. A missing file is created.
    pub fn update_file(&self, object: &T, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let saved = self.mapper.save(object)?;

        let mut root = if path.exists() {
            let mut reader = BufReader::new(open(path)?);
            self.adapter.read(&mut reader)?
        } else {
            debug!(path = %path.display(), "No existing file to update");
            Root::empty()
        };
        root.merge(saved);
        self.write_file(&root, path)
    }

    fn write_file(&self, root: &Root, path: &Path) -> Result<()> {
        write_tree(&self.adapter, root, path)
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::NotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(err),
    })
}

/// Reads a tree from the file at `path` with `adapter`.
pub fn read_tree(adapter: &dyn ConfigAdapter, path: impl AsRef<Path>) -> Result<Root> {
    let path = path.as_ref();
    let mut reader = BufReader::new(open(path)?);
    Ok(adapter.read(&mut reader)?)
}

/// Writes `root` to the file at `path` with `adapter`, creating parent
/// directories as needed.
pub fn write_tree(adapter: &dyn ConfigAdapter, root: &Root, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    adapter.write(root, &mut writer)?;
    writer.flush()?;
    info!(
        path = %path.display(),
        sections = root.len(),
        options = root.option_count(),
        "Wrote configuration file"
    );
    Ok(())
}
