use std::path::PathBuf;

use tandem_common::{GridSize, ProcessId, SpawnError};

/// What to launch: a working directory and the initial grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub cwd: PathBuf,
    pub size: GridSize,
}

/// A freshly launched process.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedProcess {
    pub id: ProcessId,
    /// Program name without its directory, e.g. `zsh`.
    pub shell_name: String,
    pub pid: Option<u32>,
}

/// Output or termination of a supervised process.
///
/// For one id, every `Data` precedes its `Exit`, and `Exit` arrives at most
/// once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Data { id: ProcessId, bytes: Vec<u8> },
    Exit { id: ProcessId, code: u32 },
}

impl ProcessEvent {
    pub fn id(&self) -> ProcessId {
        match self {
            ProcessEvent::Data { id, .. } | ProcessEvent::Exit { id, .. } => *id,
        }
    }
}

/// Owner of every child process in the application.
///
/// Ids are allocated monotonically from 1 and never reused. Operations on
/// unknown or dead ids are silent no-ops.
pub trait ProcessHost {
    fn spawn(&mut self, request: &SpawnRequest) -> Result<SpawnedProcess, SpawnError>;

    /// Forward raw input bytes.
    fn write(&mut self, id: ProcessId, data: &[u8]);

    /// Best-effort grid change.
    fn resize(&mut self, id: ProcessId, size: GridSize);

    /// Terminate and forget the process. A killed id never reports `Exit`.
    fn kill(&mut self, id: ProcessId);

    fn is_alive(&self, id: ProcessId) -> bool;

    /// Number of live processes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Everything that happened since the last call, in production order.
    fn drain_events(&mut self) -> Vec<ProcessEvent>;

    fn kill_all(&mut self);
}
