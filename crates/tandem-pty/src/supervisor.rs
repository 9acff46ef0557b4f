//! The portable-pty backed [`ProcessHost`].

use std::collections::HashMap;
use std::io::Read;
use std::sync::mpsc;
use std::thread;

use portable_pty::{native_pty_system, PtySystem};
use tandem_common::{GridSize, ProcessId, SpawnError};

use crate::handle::{pty_size, ProcessHandle};
use crate::host::{ProcessEvent, ProcessHost, SpawnRequest, SpawnedProcess};
use crate::shell::ShellCommand;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Bytes read from a PTY per `read` call (8 KB).
pub const PTY_READ_CHUNK: usize = 8_192;

// =============================================================================
// READER MESSAGES
// =============================================================================

/// What reader threads send back. `Eof` is internal: only the supervisor
/// decides whether it becomes an `Exit` event.
enum ReaderMessage {
    Data(ProcessId, Vec<u8>),
    Eof(ProcessId),
}

// =============================================================================
// SUPERVISOR
// =============================================================================

/// Owns every shell process, keyed by [`ProcessId`].
///
/// The supervisor is the only writer of its process table. Reader threads
/// never touch it; they only send [`ReaderMessage`]s.
pub struct PtySupervisor {
    shell: ShellCommand,
    pty_system: Box<dyn PtySystem + Send>,
    handles: HashMap<ProcessId, ProcessHandle>,
    /// Processes whose output hit EOF but whose child has not been reaped.
    exiting: Vec<ProcessId>,
    next_id: ProcessId,
    tx: mpsc::Sender<ReaderMessage>,
    rx: mpsc::Receiver<ReaderMessage>,
}

impl PtySupervisor {
    pub fn new(shell: ShellCommand) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            shell,
            pty_system: native_pty_system(),
            handles: HashMap::new(),
            exiting: Vec::new(),
            next_id: ProcessId(1),
            tx,
            rx,
        }
    }

    pub fn shell(&self) -> &ShellCommand {
        &self.shell
    }

    /// Current grid of a live process.
    pub fn size(&self, id: ProcessId) -> Option<GridSize> {
        self.handles.get(&id).map(ProcessHandle::size)
    }

    /// Ids of all live processes, ascending.
    pub fn ids(&self) -> Vec<ProcessId> {
        let mut ids: Vec<_> = self.handles.keys().copied().collect();
        ids.sort();
        ids
    }

    fn allocate_id(&mut self) -> ProcessId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    fn spawn_reader(
        &self,
        id: ProcessId,
        mut reader: Box<dyn Read + Send>,
    ) -> std::io::Result<thread::JoinHandle<()>> {
        let tx = self.tx.clone();
        thread::Builder::new()
            .name(format!("pty-reader-{}", id.0))
            .spawn(move || {
                let mut buf = [0u8; PTY_READ_CHUNK];
                loop {
                    match reader.read(&mut buf) {
                        Ok(0) => break,
                        Ok(n) => {
                            if tx.send(ReaderMessage::Data(id, buf[..n].to_vec())).is_err() {
                                return;
                            }
                        }
                        Err(e) => {
                            tracing::debug!(pty = %id, error = %e, "pty reader stopped");
                            break;
                        }
                    }
                }
                let _ = tx.send(ReaderMessage::Eof(id));
            })
    }

    /// Report exits for processes past EOF whose child has finished.
    /// Children still running stay queued for a later drain.
    fn reap(&mut self, events: &mut Vec<ProcessEvent>) {
        let handles = &mut self.handles;
        self.exiting.retain(|&id| {
            let Some(handle) = handles.get_mut(&id) else {
                return false;
            };
            let Some(code) = handle.try_exit_code() else {
                return true;
            };
            handles.remove(&id);
            tracing::info!(pty = %id, code, "process exited");
            events.push(ProcessEvent::Exit { id, code });
            false
        });
    }
}

impl Default for PtySupervisor {
    fn default() -> Self {
        Self::new(ShellCommand::default())
    }
}

impl ProcessHost for PtySupervisor {
    fn spawn(&mut self, request: &SpawnRequest) -> Result<SpawnedProcess, SpawnError> {
        let pair = self
            .pty_system
            .openpty(pty_size(request.size))
            .map_err(|e| SpawnError::OpenPty(e.to_string()))?;

        let cmd = self.shell.build(&request.cwd);
        let mut child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| SpawnError::Launch {
                shell: self.shell.program.clone(),
                reason: e.to_string(),
            })?;
        drop(pair.slave);

        let io = pair
            .master
            .take_writer()
            .and_then(|w| pair.master.try_clone_reader().map(|r| (w, r)));
        let (writer, reader) = match io {
            Ok(io) => io,
            Err(e) => {
                let _ = child.kill();
                return Err(SpawnError::OpenPty(e.to_string()));
            }
        };

        let id = self.allocate_id();
        if let Err(e) = self.spawn_reader(id, reader) {
            let _ = child.kill();
            return Err(SpawnError::Reader(e.to_string()));
        }

        let shell_name = self.shell.name();
        let handle = ProcessHandle::new(writer, child, pair.master, request.size);
        let pid = handle.pid();
        self.handles.insert(id, handle);

        tracing::info!(
            pty = %id,
            pid = ?pid,
            shell = %shell_name,
            cwd = %request.cwd.display(),
            size = %request.size,
            "spawned shell"
        );
        Ok(SpawnedProcess {
            id,
            shell_name,
            pid,
        })
    }

    fn write(&mut self, id: ProcessId, data: &[u8]) {
        let Some(handle) = self.handles.get_mut(&id) else {
            tracing::debug!(pty = %id, "write to unknown process dropped");
            return;
        };
        if let Err(e) = handle.write_input(data) {
            tracing::debug!(pty = %id, error = %e, "pty write failed");
        }
    }

    fn resize(&mut self, id: ProcessId, size: GridSize) {
        let Some(handle) = self.handles.get_mut(&id) else {
            tracing::debug!(pty = %id, "resize of unknown process dropped");
            return;
        };
        if let Err(e) = handle.resize(size) {
            tracing::debug!(pty = %id, error = %e, "pty resize failed");
        }
    }

    fn kill(&mut self, id: ProcessId) {
        if let Some(mut handle) = self.handles.remove(&id) {
            self.exiting.retain(|&e| e != id);
            handle.kill();
            tracing::info!(pty = %id, "process killed");
        }
    }

    fn is_alive(&self, id: ProcessId) -> bool {
        self.handles.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.handles.len()
    }

    fn drain_events(&mut self) -> Vec<ProcessEvent> {
        let mut events = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            match message {
                ReaderMessage::Data(id, bytes) if self.handles.contains_key(&id) => {
                    match events.last_mut() {
                        Some(ProcessEvent::Data { id: last, bytes: buf }) if *last == id => {
                            buf.extend_from_slice(&bytes)
                        }
                        _ => events.push(ProcessEvent::Data { id, bytes }),
                    }
                }
                ReaderMessage::Data(..) => {}
                ReaderMessage::Eof(id) if self.handles.contains_key(&id) => self.exiting.push(id),
                ReaderMessage::Eof(_) => {}
            }
        }
        self.reap(&mut events);
        events
    }

    fn kill_all(&mut self) {
        let ids = self.ids();
        let count = ids.len();
        for id in ids {
            self.kill(id);
        }
        tracing::info!(count, "all processes killed");
    }
}

impl Drop for PtySupervisor {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            self.kill_all();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn supervisor() -> PtySupervisor {
        let mut shell = ShellCommand::default();
        shell.program = "/bin/sh".into();
        shell.login_shell = false;
        PtySupervisor::new(shell)
    }

    fn request() -> SpawnRequest {
        SpawnRequest {
            cwd: std::env::temp_dir(),
            size: GridSize::new(80, 24),
        }
    }

    /// Drain until `done` holds or a few seconds pass.
    fn drain_until(
        sup: &mut PtySupervisor,
        mut done: impl FnMut(&[ProcessEvent]) -> bool,
    ) -> Vec<ProcessEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut all = Vec::new();
        while Instant::now() < deadline {
            all.extend(sup.drain_events());
            if done(&all) {
                break;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        all
    }

    fn output_of(events: &[ProcessEvent], id: ProcessId) -> String {
        events
            .iter()
            .filter_map(|e| match e {
                ProcessEvent::Data { id: i, bytes } if *i == id => Some(bytes.as_slice()),
                _ => None,
            })
            .map(String::from_utf8_lossy)
            .collect()
    }

    #[test]
    fn ids_are_monotonic() {
        let mut sup = supervisor();
        let a = sup.spawn(&request()).expect("spawn a");
        let b = sup.spawn(&request()).expect("spawn b");
        assert_eq!(a.id, ProcessId(1));
        assert_eq!(b.id, ProcessId(2));
        assert_eq!(a.shell_name, "sh");
        assert_eq!(sup.len(), 2);
        sup.kill_all();
        assert!(sup.is_empty());
    }

    #[test]
    fn write_and_read_echo() {
        let mut sup = supervisor();
        let p = sup.spawn(&request()).expect("spawn");
        sup.write(p.id, b"echo PTY_TEST_MARKER_12345\n");

        let events = drain_until(&mut sup, |ev| output_of(ev, p.id).contains("PTY_TEST_MARKER_12345"));
        assert!(output_of(&events, p.id).contains("PTY_TEST_MARKER_12345"));
        sup.kill(p.id);
    }

    #[test]
    fn shell_sees_parent_environment() {
        std::env::set_var("TANDEM_PTY_TEST_EDITOR", "inherited_ok");
        let mut sup = supervisor();
        let p = sup.spawn(&request()).expect("spawn");
        sup.write(p.id, b"echo \"[$TANDEM_PTY_TEST_EDITOR]\"\n");

        let events = drain_until(&mut sup, |ev| output_of(ev, p.id).contains("[inherited_ok]"));
        assert!(output_of(&events, p.id).contains("[inherited_ok]"));
        sup.kill(p.id);
    }

    #[test]
    fn natural_exit_reports_code_once() {
        let mut sup = supervisor();
        let p = sup.spawn(&request()).expect("spawn");
        sup.write(p.id, b"exit 3\n");

        let events = drain_until(&mut sup, |ev| {
            ev.iter().any(|e| matches!(e, ProcessEvent::Exit { .. }))
        });
        let exits: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, ProcessEvent::Exit { .. }))
            .collect();
        assert_eq!(exits, vec![&ProcessEvent::Exit { id: p.id, code: 3 }]);
        assert!(!sup.is_alive(p.id));

        // Exit is the last event for the id
        let last = events.iter().rposition(|e| e.id() == p.id).unwrap();
        assert!(matches!(events[last], ProcessEvent::Exit { .. }));

        std::thread::sleep(Duration::from_millis(100));
        assert!(sup.drain_events().is_empty());
    }

    #[test]
    fn drain_does_not_wait_for_lingering_child() {
        let mut sup = supervisor();
        let p = sup.spawn(&request()).expect("spawn");
        sup.write(
            p.id,
            b"exec sh -c 'exec </dev/null >/dev/null 2>&1; sleep 1; exit 4'\n",
        );

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut exits = Vec::new();
        while exits.is_empty() && Instant::now() < deadline {
            let started = Instant::now();
            let events = sup.drain_events();
            assert!(started.elapsed() < Duration::from_millis(500));
            exits.extend(
                events
                    .into_iter()
                    .filter(|e| matches!(e, ProcessEvent::Exit { .. })),
            );
            std::thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(exits, vec![ProcessEvent::Exit { id: p.id, code: 4 }]);
        assert!(!sup.is_alive(p.id));
    }

    #[test]
    fn killed_process_never_exits() {
        let mut sup = supervisor();
        let p = sup.spawn(&request()).expect("spawn");
        sup.kill(p.id);
        sup.kill(p.id);
        assert!(!sup.is_alive(p.id));

        std::thread::sleep(Duration::from_millis(300));
        let events = sup.drain_events();
        assert!(events.iter().all(|e| e.id() != p.id));
    }

    #[test]
    fn resize_updates_size() {
        let mut sup = supervisor();
        let p = sup.spawn(&request()).expect("spawn");
        assert_eq!(sup.size(p.id), Some(GridSize::new(80, 24)));
        sup.resize(p.id, GridSize::new(120, 40));
        assert_eq!(sup.size(p.id), Some(GridSize::new(120, 40)));
        sup.kill(p.id);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut sup = supervisor();
        sup.write(ProcessId(99), b"hello");
        sup.resize(ProcessId(99), GridSize::new(10, 10));
        sup.kill(ProcessId(99));
        assert!(!sup.is_alive(ProcessId(99)));
        assert!(sup.drain_events().is_empty());
    }

    #[test]
    fn bad_program_is_launch_error() {
        let mut shell = ShellCommand::default();
        shell.program = "/nonexistent/tandem-shell".into();
        let mut sup = PtySupervisor::new(shell);
        let err = sup.spawn(&request()).unwrap_err();
        assert!(matches!(err, SpawnError::Launch { .. }));
        assert!(sup.is_empty());
    }

    #[test]
    fn kill_all_is_idempotent() {
        let mut sup = supervisor();
        sup.spawn(&request()).expect("spawn");
        sup.kill_all();
        sup.kill_all();
        assert!(sup.is_empty());
    }
}
