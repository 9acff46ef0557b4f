use tandem_pty::ProcessHost;
use tandem_surface::SurfaceFactory;

use super::Workspace;

impl<H: ProcessHost, S: SurfaceFactory> Workspace<H, S> {
    /// Assert every structural invariant. Panics on the first violation.
    pub fn check_invariants(&self) {
        assert!(!self.projects.is_empty(), "workspace has no projects");
        assert!(
            self.projects.contains_key(&self.active),
            "active project {} does not exist",
            self.active
        );

        let mut alive = 0;
        for (id, project) in &self.projects {
            assert_eq!(*id, project.id);
            assert!(project.id < self.next_project);
            project.sessions.check_invariants();
            project.contents.check_invariants();

            for session in project.sessions.iter().filter(|s| s.alive) {
                alive += 1;
                assert_eq!(
                    self.routes.get(&session.process),
                    Some(&(project.id, session.id)),
                    "alive {} of {} is not routed",
                    session.id,
                    project.id
                );
                assert!(
                    self.host.is_alive(session.process),
                    "alive {} has no live process {}",
                    session.id,
                    session.process
                );
            }
        }
        assert_eq!(self.routes.len(), alive, "routes include dead sessions");
    }
}
