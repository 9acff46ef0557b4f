//! Test doubles for the process host and the surface factory.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use tandem_common::{GridSize, ProcessId, Rect, SpawnError, SurfaceError};
use tandem_pty::{ProcessEvent, ProcessHost, SpawnRequest, SpawnedProcess};
use tandem_surface::{HeadlessSurface, RenderSurface, SurfaceFactory, SurfaceKey, SurfaceSink};

/// In-memory [`ProcessHost`] with scriptable output and exits.
#[derive(Debug)]
pub struct FakeHost {
    next_id: ProcessId,
    alive: BTreeMap<ProcessId, GridSize>,
    pending: Vec<ProcessEvent>,
    fail_next: bool,
    pub spawns: Vec<SpawnRequest>,
    pub writes: Vec<(ProcessId, Vec<u8>)>,
    pub resizes: Vec<(ProcessId, GridSize)>,
    pub kills: Vec<ProcessId>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            next_id: ProcessId(1),
            alive: BTreeMap::new(),
            pending: Vec::new(),
            fail_next: false,
            spawns: Vec::new(),
            writes: Vec::new(),
            resizes: Vec::new(),
            kills: Vec::new(),
        }
    }
}

impl FakeHost {
    pub fn fail_next_spawn(&mut self) {
        self.fail_next = true;
    }

    fn exiting(&self, id: ProcessId) -> bool {
        self.pending
            .iter()
            .any(|event| matches!(event, ProcessEvent::Exit { id: pending, .. } if *pending == id))
    }

    /// Queue output from a live process.
    pub fn emit(&mut self, id: ProcessId, bytes: &[u8]) {
        if self.alive.contains_key(&id) && !self.exiting(id) {
            self.pending.push(ProcessEvent::Data {
                id,
                bytes: bytes.to_vec(),
            });
        }
    }

    /// End a live process on its own. Like the real supervisor, the
    /// process leaves the table when its exit is drained.
    pub fn exit(&mut self, id: ProcessId, code: u32) {
        if self.alive.contains_key(&id) && !self.exiting(id) {
            self.pending.push(ProcessEvent::Exit { id, code });
        }
    }

    pub fn size(&self, id: ProcessId) -> Option<GridSize> {
        self.alive.get(&id).copied()
    }

    pub fn live_ids(&self) -> Vec<ProcessId> {
        self.alive.keys().copied().collect()
    }
}

impl ProcessHost for FakeHost {
    fn spawn(&mut self, request: &SpawnRequest) -> Result<SpawnedProcess, SpawnError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(SpawnError::Launch {
                shell: "fakesh".into(),
                reason: "scripted failure".into(),
            });
        }
        let id = self.next_id;
        self.next_id = id.next();
        self.alive.insert(id, request.size);
        self.spawns.push(request.clone());
        Ok(SpawnedProcess {
            id,
            shell_name: "fakesh".into(),
            pid: Some(1000 + id.0),
        })
    }

    fn write(&mut self, id: ProcessId, data: &[u8]) {
        if self.alive.contains_key(&id) {
            self.writes.push((id, data.to_vec()));
        }
    }

    fn resize(&mut self, id: ProcessId, size: GridSize) {
        if let Some(current) = self.alive.get_mut(&id) {
            *current = size;
            self.resizes.push((id, size));
        }
    }

    fn kill(&mut self, id: ProcessId) {
        if self.alive.remove(&id).is_some() {
            self.kills.push(id);
            self.pending
                .retain(|event| !matches!(event, ProcessEvent::Exit { id: pending, .. } if *pending == id));
        }
    }

    fn is_alive(&self, id: ProcessId) -> bool {
        self.alive.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.alive.len()
    }

    fn drain_events(&mut self) -> Vec<ProcessEvent> {
        let events = std::mem::take(&mut self.pending);
        for event in &events {
            if let ProcessEvent::Exit { id, .. } = event {
                self.alive.remove(id);
            }
        }
        events
    }

    fn kill_all(&mut self) {
        let ids: Vec<_> = self.alive.keys().copied().collect();
        for id in ids {
            self.kill(id);
        }
    }
}

/// What happened to one recorded surface.
#[derive(Debug, Default, Clone)]
struct SurfaceRecord {
    navigations: Vec<String>,
    visible: Option<bool>,
    bounds: Option<Rect>,
    disposed: bool,
}

type Records = Rc<RefCell<HashMap<SurfaceKey, SurfaceRecord>>>;

/// A [`HeadlessSurface`] that also records what was asked of it.
struct RecordingSurface {
    key: SurfaceKey,
    inner: HeadlessSurface,
    records: Records,
}

impl RecordingSurface {
    fn record(&self, f: impl FnOnce(&mut SurfaceRecord)) {
        f(self.records.borrow_mut().entry(self.key).or_default());
    }
}

impl RenderSurface for RecordingSurface {
    fn navigate(&mut self, url: &str) {
        self.record(|r| r.navigations.push(url.to_string()));
        self.inner.navigate(url);
    }

    fn reload(&mut self) {
        self.inner.reload();
    }

    fn go_back(&mut self) {
        self.inner.go_back();
    }

    fn go_forward(&mut self) {
        self.inner.go_forward();
    }

    fn can_go_back(&self) -> bool {
        self.inner.can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        self.inner.can_go_forward()
    }

    fn open_devtools(&mut self) {
        self.inner.open_devtools();
    }

    fn close_devtools(&mut self) {
        self.inner.close_devtools();
    }

    fn is_devtools_open(&self) -> bool {
        self.inner.is_devtools_open()
    }

    fn set_visible(&mut self, visible: bool) {
        self.record(|r| r.visible = Some(visible));
        self.inner.set_visible(visible);
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.record(|r| r.bounds = Some(bounds));
        self.inner.set_bounds(bounds);
    }

    fn dispose(&mut self) {
        self.record(|r| r.disposed = true);
        self.inner.dispose();
    }
}

/// Factory of headless surfaces whose calls can be inspected afterwards.
#[derive(Default)]
pub struct RecordingFactory {
    fail: bool,
    records: Records,
    pub created: Vec<SurfaceKey>,
}

impl RecordingFactory {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn navigations(&self, key: SurfaceKey) -> Vec<String> {
        self.records
            .borrow()
            .get(&key)
            .map(|r| r.navigations.clone())
            .unwrap_or_default()
    }

    pub fn visible(&self, key: SurfaceKey) -> Option<bool> {
        self.records.borrow().get(&key).and_then(|r| r.visible)
    }

    pub fn bounds(&self, key: SurfaceKey) -> Option<Rect> {
        self.records.borrow().get(&key).and_then(|r| r.bounds)
    }

    /// Disposed surfaces in creation order.
    pub fn disposed(&self) -> Vec<SurfaceKey> {
        let records = self.records.borrow();
        self.created
            .iter()
            .copied()
            .filter(|key| records.get(key).is_some_and(|r| r.disposed))
            .collect()
    }
}

impl SurfaceFactory for RecordingFactory {
    fn create(
        &mut self,
        key: SurfaceKey,
        url: &str,
        sink: SurfaceSink,
    ) -> Result<Box<dyn RenderSurface>, SurfaceError> {
        if self.fail {
            return Err(SurfaceError::Create("scripted failure".into()));
        }
        self.created.push(key);
        let records = Rc::clone(&self.records);
        records
            .borrow_mut()
            .entry(key)
            .or_default()
            .navigations
            .push(url.to_string());
        Ok(Box::new(RecordingSurface {
            key,
            inner: HeadlessSurface::new(key, url, sink),
            records,
        }))
    }
}
