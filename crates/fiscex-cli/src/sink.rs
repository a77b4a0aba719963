//! CSV sheet sink.

use std::fs;
use std::path::PathBuf;

use fiscex_core::export::RowSink;
use fiscex_core::Result;
use tracing::info;

/// Writes each sheet as `<dir>/<name>.csv`.
pub struct CsvDirSink {
    dir: PathBuf,
}

impl CsvDirSink {
    /// The directory is created on construction.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.csv"))
    }
}

impl RowSink for CsvDirSink {
    fn write_sheet(&mut self, name: &str, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
        let path = self.path_for(name);
        let mut writer = csv::Writer::from_path(&path).map_err(into_io)?;

        writer.write_record(headers).map_err(into_io)?;
        for row in rows {
            writer.write_record(row).map_err(into_io)?;
        }
        writer.flush()?;

        info!("wrote {} row(s) to {}", rows.len(), path.display());
        Ok(())
    }
}

fn into_io(e: csv::Error) -> fiscex_core::FiscexError {
    std::io::Error::other(e).into()
}
