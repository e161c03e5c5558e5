//! Byte streams over an opened file

use fsnode_core::{FsError, FsResult, OpenMode};
use std::fs;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// An open file and the mode it was opened with.
///
/// Every call checks the mode first, so reading a `w` stream fails with
/// `NotReadable` instead of an OS error.
#[derive(Debug)]
pub struct FileStream {
    path: PathBuf,
    mode: OpenMode,
    inner: BufReader<fs::File>,
}

impl FileStream {
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> FsResult<Self> {
        let path = path.as_ref();
        let file = mode
            .open_options()
            .open(path)
            .map_err(|e| FsError::from_io(path, e))?;
        debug!(path = %path.display(), %mode, "opened stream");
        Ok(Self {
            path: path.to_path_buf(),
            mode,
            inner: BufReader::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    fn ensure_readable(&self) -> FsResult<()> {
        if self.mode.is_readable() {
            Ok(())
        } else {
            Err(FsError::NotReadable(self.path.display().to_string()))
        }
    }

    fn ensure_writable(&self) -> FsResult<()> {
        if self.mode.is_writable() {
            Ok(())
        } else {
            Err(FsError::NotWritable(self.path.display().to_string()))
        }
    }

    fn io_error(&self, err: std::io::Error) -> FsError {
        FsError::inaccessible(&self.path, err)
    }

    /// Everything from the current position to the end.
    pub fn read_to_string(&mut self) -> FsResult<String> {
        self.ensure_readable()?;
        let mut data = String::new();
        self.inner
            .read_to_string(&mut data)
            .map_err(|e| self.io_error(e))?;
        Ok(data)
    }

    /// Remaining lines, each trimmed of surrounding whitespace.
    pub fn read_lines(&mut self) -> FsResult<Vec<String>> {
        self.ensure_readable()?;
        let mut lines = Vec::new();
        for line in self.inner.by_ref().lines() {
            match line {
                Ok(line) => lines.push(line.trim().to_string()),
                Err(e) => return Err(FsError::inaccessible(&self.path, e)),
            }
        }
        Ok(lines)
    }

    /// Next line including its terminator, `None` at end of file.
    pub fn read_line(&mut self) -> FsResult<Option<String>> {
        self.ensure_readable()?;
        let mut line = String::new();
        let read = self
            .inner
            .read_line(&mut line)
            .map_err(|e| self.io_error(e))?;
        Ok((read > 0).then_some(line))
    }

    pub fn eof(&mut self) -> FsResult<bool> {
        self.ensure_readable()?;
        self.inner
            .fill_buf()
            .map(|buf| buf.is_empty())
            .map_err(|e| FsError::inaccessible(&self.path, e))
    }

    pub fn write_str(&mut self, data: &str) -> FsResult<()> {
        self.ensure_writable()?;
        // drop read-ahead so the write lands at the logical position
        self.inner
            .seek(SeekFrom::Current(0))
            .map_err(|e| self.io_error(e))?;
        self.inner
            .get_mut()
            .write_all(data.as_bytes())
            .map_err(|e| FsError::inaccessible(&self.path, e))
    }

    /// Write each line followed by the platform line ending.
    pub fn write_lines<I, S>(&mut self, lines: I) -> FsResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.write_str(line.as_ref())?;
            self.write_str(LINE_ENDING)?;
        }
        Ok(())
    }

    pub fn rewind(&mut self) -> FsResult<()> {
        self.inner
            .seek(SeekFrom::Start(0))
            .map(|_| ())
            .map_err(|e| self.io_error(e))
    }

    /// Flush to disk if anything could have been written, then release the
    /// file.
    pub fn close(self) -> FsResult<()> {
        if self.mode.is_writable() {
            self.inner
                .get_ref()
                .sync_all()
                .map_err(|e| FsError::inaccessible(&self.path, e))?;
        }
        debug!(path = %self.path.display(), "closed stream");
        Ok(())
    }
}
