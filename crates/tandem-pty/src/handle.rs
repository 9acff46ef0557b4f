//! One live child process on a pseudo-terminal.

use std::io::Write;

use portable_pty::{Child, MasterPty, PtySize};
use tandem_common::GridSize;

pub(crate) struct ProcessHandle {
    writer: Box<dyn Write + Send>,
    child: Box<dyn Child + Send + Sync>,
    master: Box<dyn MasterPty + Send>,
    size: GridSize,
}

pub(crate) fn pty_size(size: GridSize) -> PtySize {
    PtySize {
        rows: size.rows,
        cols: size.cols,
        pixel_width: 0,
        pixel_height: 0,
    }
}

impl ProcessHandle {
    pub(crate) fn new(
        writer: Box<dyn Write + Send>,
        child: Box<dyn Child + Send + Sync>,
        master: Box<dyn MasterPty + Send>,
        size: GridSize,
    ) -> Self {
        Self {
            writer,
            child,
            master,
            size,
        }
    }

    pub(crate) fn pid(&self) -> Option<u32> {
        self.child.process_id()
    }

    pub(crate) fn size(&self) -> GridSize {
        self.size
    }

    pub(crate) fn write_input(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.writer.write_all(data)?;
        self.writer.flush()
    }

    pub(crate) fn resize(&mut self, size: GridSize) -> Result<(), String> {
        self.master
            .resize(pty_size(size))
            .map_err(|e| e.to_string())?;
        self.size = size;
        Ok(())
    }

    pub(crate) fn kill(&mut self) {
        if let Err(e) = self.child.kill() {
            tracing::debug!(error = %e, "pty kill failed (may already be dead)");
        }
    }

    /// Reap the child without blocking. `None` while it is still running;
    /// a status that cannot be read is reported as 1.
    pub(crate) fn try_exit_code(&mut self) -> Option<u32> {
        match self.child.try_wait() {
            Ok(status) => status.map(|s| s.exit_code()),
            Err(e) => {
                tracing::debug!(error = %e, "pty wait failed");
                Some(1)
            }
        }
    }
}
