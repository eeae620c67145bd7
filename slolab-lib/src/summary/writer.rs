use super::Summary;
use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use std::fs;
use std::io::{BufWriter, Write};
use tempfile::NamedTempFile;

const LOG_TARGET: &str = "   summary";

/// Permission bits of a written summary file.
pub const SUMMARY_FILE_MODE: u32 = 0o644;

/// Persists a summary artifact.
pub trait SummaryWriter: Send + Sync {
    /// Write `summary` to `path`. A missing or empty path means persistence is not configured and
    /// the call succeeds without doing anything.
    fn write(&self, path: Option<&Utf8Path>, summary: &Summary) -> Result<()>;
}

/// Writes summaries as indented JSON, atomically replacing the destination.
#[derive(Debug, Clone, Copy)]
pub struct JsonFileWriter {
    file_mode: u32,
    sync: bool,
}

impl Default for JsonFileWriter {
    fn default() -> Self {
        Self {
            file_mode: SUMMARY_FILE_MODE,
            sync: true,
        }
    }
}

impl JsonFileWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the fsync before rename. Only meant for tests on slow filesystems.
    #[must_use]
    pub const fn without_sync(mut self) -> Self {
        self.sync = false;
        self
    }
}

impl SummaryWriter for JsonFileWriter {
    fn write(&self, path: Option<&Utf8Path>, summary: &Summary) -> Result<()> {
        let Some(path) = path.filter(|p| !p.as_str().is_empty()) else {
            log::debug!(target: LOG_TARGET, "No output path configured, not writing summary");
            return Ok(());
        };

        let staged = stage(path, summary, self.file_mode, self.sync)?;
        commit(staged, path)?;

        log::info!(target: LOG_TARGET, "Wrote summary to '{path}'");
        Ok(())
    }
}

/// Write the summary to a uniquely named temp file next to `path`.
///
/// The temp file is deleted when the returned handle is dropped without being committed.
fn stage(path: &Utf8Path, summary: &Summary, file_mode: u32, sync: bool) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };

    fs::create_dir_all(dir).into_app_err_with(|| format!("unable to create directory '{dir}'"))?;

    let prefix = format!("{}.", path.file_name().unwrap_or("summary"));
    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .into_app_err_with(|| format!("unable to create temp file in '{dir}'"))?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, summary).into_app_err_with(|| format!("unable to encode summary for '{path}'"))?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .into_app_err_with(|| format!("unable to write temp file for '{path}'"))?;
    }

    if sync {
        tmp.as_file()
            .sync_all()
            .into_app_err_with(|| format!("unable to sync temp file for '{path}'"))?;
    }

    set_mode(&tmp, file_mode).into_app_err_with(|| format!("unable to set permissions of temp file for '{path}'"))?;

    Ok(tmp)
}

/// Atomically move a staged temp file over `path`.
fn commit(staged: NamedTempFile, path: &Utf8Path) -> Result<()> {
    // On failure the returned error owns the temp file, dropping it removes the file.
    let _ = staged
        .persist(path)
        .map_err(|e| e.error)
        .into_app_err_with(|| format!("unable to replace '{path}'"))?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(tmp: &NamedTempFile, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tmp.as_file().set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
#[expect(clippy::unnecessary_wraps, reason = "matches the unix signature")]
const fn set_mode(_tmp: &NamedTempFile, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
