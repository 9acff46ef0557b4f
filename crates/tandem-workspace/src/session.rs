//! Terminal sessions of one project.

use indexmap::IndexMap;
use tandem_common::{GridSize, ProcessId, SessionId, SpawnError};
use tandem_pty::{ProcessHost, SpawnRequest};

use crate::display::DisplayBuffer;

/// One terminal tab bound 1:1 to a supervised process.
#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    pub process: ProcessId,
    pub shell_name: String,
    pub title: String,
    pub display: DisplayBuffer,
    /// Grid the process was last sized to.
    pub grid: GridSize,
    pub alive: bool,
    pub exit_code: Option<u32>,
}

/// Notice appended to a session's output when its process exits.
pub fn exit_notice(code: u32) -> String {
    format!("\r\n\x1b[31m[Process exited with code {code}]\x1b[0m\r\n")
}

/// Result of closing a tab: the tab created to keep the list non-empty,
/// if one was needed.
#[derive(Debug)]
pub struct CloseOutcome<I, E> {
    pub replacement: Option<Result<I, E>>,
}

/// Insertion-ordered sessions with exactly one active entry whenever the
/// registry is non-empty.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: IndexMap<SessionId, Session>,
    active: Option<SessionId>,
    next_id: SessionId,
    scrollback: usize,
}

impl SessionRegistry {
    pub fn new(scrollback: usize) -> Self {
        Self {
            sessions: IndexMap::new(),
            active: None,
            next_id: SessionId(1),
            scrollback,
        }
    }

    // -- Queries --

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    pub fn active_id(&self) -> Option<SessionId> {
        self.active
    }

    pub fn active(&self) -> Option<&Session> {
        self.active.and_then(|id| self.sessions.get(&id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    pub fn ids(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }

    /// The id the next session will get.
    pub fn next_id(&self) -> SessionId {
        self.next_id
    }

    // -- Mutations --

    /// Spawn a process and bind a new, active session to it.
    ///
    /// On failure nothing is created.
    pub fn add_session<H: ProcessHost + ?Sized>(
        &mut self,
        host: &mut H,
        request: &SpawnRequest,
    ) -> Result<SessionId, SpawnError> {
        let spawned = host.spawn(request)?;
        let id = self.next_id;
        self.next_id = id.next();

        self.sessions.insert(
            id,
            Session {
                id,
                process: spawned.id,
                title: format!("{} #{}", spawned.shell_name, id.0),
                shell_name: spawned.shell_name,
                display: DisplayBuffer::new(self.scrollback),
                grid: request.size,
                alive: true,
                exit_code: None,
            },
        );
        self.active = Some(id);
        Ok(id)
    }

    /// Make `id` the active session. Returns `false` for unknown ids.
    pub fn switch_session(&mut self, id: SessionId) -> bool {
        if !self.sessions.contains_key(&id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Kill, dispose, and remove a session.
    ///
    /// If it was active, the tab now at the same position becomes active,
    /// else the last one. If the registry becomes empty a fresh session is
    /// spawned with `request`. Returns `None` for unknown ids.
    pub fn close_session<H: ProcessHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: SessionId,
        request: &SpawnRequest,
    ) -> Option<CloseOutcome<SessionId, SpawnError>> {
        let index = self.sessions.get_index_of(&id)?;
        let (_, mut session) = self.sessions.shift_remove_index(index)?;
        if session.alive {
            host.kill(session.process);
        }
        session.display.dispose();

        if self.sessions.is_empty() {
            self.active = None;
            return Some(CloseOutcome {
                replacement: Some(self.add_session(host, request)),
            });
        }
        if self.active == Some(id) {
            let next = index.min(self.sessions.len() - 1);
            self.active = self.sessions.get_index(next).map(|(id, _)| *id);
        }
        Some(CloseOutcome { replacement: None })
    }

    /// Append process output. Returns `false` for unknown sessions.
    pub fn apply_output(&mut self, id: SessionId, bytes: &[u8]) -> bool {
        match self.sessions.get_mut(&id) {
            Some(session) => {
                session.display.append(bytes);
                true
            }
            None => false,
        }
    }

    /// Record a process exit. The tab stays, relabelled.
    ///
    /// Returns the notice appended to the display, or `None` if the session
    /// is unknown or already exited.
    pub fn mark_exited(&mut self, id: SessionId, code: u32) -> Option<String> {
        let session = self.sessions.get_mut(&id)?;
        if !session.alive {
            return None;
        }
        session.alive = false;
        session.exit_code = Some(code);
        session.title = format!("(exited) {}", session.shell_name);
        let notice = exit_notice(code);
        session.display.append(notice.as_bytes());
        Some(notice)
    }

    /// Activate the next (or previous) session, wrapping around. Does
    /// nothing with fewer than two sessions.
    pub fn cycle(&mut self, forward: bool) -> Option<SessionId> {
        let len = self.sessions.len();
        if len < 2 {
            return None;
        }
        let current = self
            .active
            .and_then(|id| self.sessions.get_index_of(&id))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.active = self.sessions.get_index(next).map(|(id, _)| *id);
        self.active
    }

    /// Kill every live process and dispose every buffer. Returns the
    /// processes that were alive.
    pub fn dispose_all<H: ProcessHost + ?Sized>(&mut self, host: &mut H) -> Vec<ProcessId> {
        let mut killed = Vec::new();
        for (_, mut session) in self.sessions.drain(..) {
            if session.alive {
                host.kill(session.process);
                killed.push(session.process);
            }
            session.display.dispose();
        }
        self.active = None;
        killed
    }

    /// Structural invariants; panics on violation.
    pub(crate) fn check_invariants(&self) {
        match self.active {
            None => assert!(self.sessions.is_empty(), "sessions non-empty with no active id"),
            Some(id) => assert!(
                self.sessions.contains_key(&id),
                "active session {id} is not in the registry"
            ),
        }
        for (key, session) in &self.sessions {
            assert_eq!(*key, session.id);
            assert!(session.id < self.next_id, "session id {} not allocated", session.id);
            assert_eq!(session.alive, session.exit_code.is_none());
        }
    }
}
