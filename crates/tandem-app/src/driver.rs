//! Headless driver: applies line commands to the workspace and streams the
//! active session's output.

use std::io::{self, Write};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use tandem_common::Action;
use tandem_pty::ProcessHost;
use tandem_surface::SurfaceFactory;
use tandem_workspace::{InputDispatcher, Workspace};

use crate::command::{parse_line, DriverCommand, HELP};

/// How long the loop waits for input before pumping again.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Driver<H: ProcessHost, S: SurfaceFactory, W: Write> {
    workspace: Workspace<H, S>,
    input: InputDispatcher,
    out: W,
}

impl<H: ProcessHost, S: SurfaceFactory, W: Write> Driver<H, S, W> {
    pub fn new(workspace: Workspace<H, S>, input: InputDispatcher, out: W) -> Self {
        Self {
            workspace,
            input,
            out,
        }
    }

    /// Apply one command.
    pub fn apply(&mut self, command: DriverCommand) -> io::Result<Flow> {
        let project = self.workspace.active_project_id();
        match command {
            DriverCommand::Key(combo) => match self.input.handle_chord(&mut self.workspace, &combo) {
                Ok(Some(action)) => tracing::debug!(action = action.label(), "chord handled"),
                Ok(None) => writeln!(self.out, "unbound: {combo}")?,
                Err(e) => writeln!(self.out, "error: {e}")?,
            },
            DriverCommand::Type(text) => self.send(text.as_bytes())?,
            DriverCommand::Run(mut line) => {
                line.push('\r');
                self.send(line.as_bytes())?;
            }
            DriverCommand::Go(address) => match self.workspace.navigate(project, &address) {
                Some(url) => writeln!(self.out, "-> {url}")?,
                None => writeln!(self.out, "nothing to load")?,
            },
            DriverCommand::Viewport(rect) => self.workspace.set_viewport(rect),
            DriverCommand::Press(point) => {
                let on_divider = self
                    .workspace
                    .panel_rects(project)
                    .is_some_and(|rects| rects.divider_hit(point));
                if on_divider {
                    self.workspace.begin_divider_drag();
                }
            }
            DriverCommand::Move(point) => {
                if let Some(ratio) = self.workspace.drag_divider(point) {
                    tracing::trace!(ratio, "divider moved");
                }
            }
            DriverCommand::Release => {
                self.workspace.end_divider_drag();
            }
            DriverCommand::Layout(mode) => {
                self.workspace.set_layout(project, mode);
            }
            DriverCommand::Switch(id) => {
                if !self.workspace.switch_project(id) {
                    writeln!(self.out, "no such project: {id}")?;
                }
            }
            DriverCommand::Rename(name) => {
                self.workspace.rename_project(project, &name);
            }
            DriverCommand::Status => {
                if let Some(status) = self.workspace.status() {
                    writeln!(self.out, "{status}")?;
                }
            }
            DriverCommand::List => self.list()?,
            DriverCommand::Help => self.help()?,
            DriverCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        let project = self.workspace.active_project_id();
        if !self.workspace.write_input(project, bytes) {
            writeln!(self.out, "no live terminal")?;
        }
        Ok(())
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "{HELP}")?;
        writeln!(self.out, "keys:")?;
        for action in Action::all() {
            if let Some(combo) = self.input.registry().combo_for_action(action) {
                writeln!(self.out, "  {:<20} {}", combo.to_string(), action.label())?;
            }
        }
        Ok(())
    }

    fn list(&mut self) -> io::Result<()> {
        let active = self.workspace.active_project_id();
        for project in self.workspace.projects() {
            let marker = if project.id == active { '*' } else { ' ' };
            writeln!(
                self.out,
                "{marker} {} {} [{}]",
                project.id.0,
                project.name,
                project.layout.mode().label()
            )?;
            for session in project.sessions.iter() {
                let current = project.sessions.active_id() == Some(session.id);
                writeln!(
                    self.out,
                    "    {} {}",
                    if current { '>' } else { ' ' },
                    session.title
                )?;
            }
            for tab in project.contents.iter() {
                let current = project.contents.active_id() == Some(tab.id);
                writeln!(
                    self.out,
                    "    {} {} <{}>",
                    if current { '>' } else { ' ' },
                    tab.title,
                    tab.url
                )?;
            }
        }
        Ok(())
    }

    /// One loop turn: pump the workspace, echo the active session's
    /// output, and surface notifications.
    pub fn tick(&mut self) -> io::Result<()> {
        let active = self.workspace.active_project_id();
        let active_session = self
            .workspace
            .active_project()
            .and_then(|p| p.sessions.active_id());
        for chunk in self.workspace.pump() {
            if chunk.project == active && Some(chunk.session) == active_session {
                self.out.write_all(&chunk.bytes)?;
            }
        }
        for notification in self.workspace.notifications().drain() {
            writeln!(self.out, "! {}: {}", notification.title, notification.body)?;
        }
        self.out.flush()
    }

    /// Run until `quit` or until the input channel closes, then shut the
    /// workspace down.
    pub fn run(mut self, lines: Receiver<String>) -> io::Result<()> {
        let mut events = self.workspace.subscribe();
        loop {
            match lines.recv_timeout(FRAME) {
                Ok(line) => match parse_line(&line) {
                    Ok(Some(command)) => {
                        if self.apply(command)? == Flow::Quit {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => writeln!(self.out, "{e}")?,
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("input closed");
                    self.tick()?;
                    break;
                }
            }
            self.tick()?;
            while let Ok(event) = events.try_recv() {
                tracing::debug!(?event, "workspace event");
            }
        }
        self.workspace.shutdown();
        Ok(())
    }
}

#[cfg(test)]
impl<H: ProcessHost, S: SurfaceFactory, W: Write> Driver<H, S, W> {
    fn workspace(&self) -> &Workspace<H, S> {
        &self.workspace
    }

    fn workspace_mut(&mut self) -> &mut Workspace<H, S> {
        &mut self.workspace
    }

    fn output(&self) -> &W {
        &self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use tandem_common::{LayoutMode, Rect};
    use tandem_config::TandemConfig;
    use tandem_input::{KeyCombo, KeybindRegistry};
    use tandem_layout::Point;
    use tandem_pty::{PtySupervisor, ShellCommand};
    use tandem_surface::HeadlessFactory;
    use tandem_workspace::WorkspaceSettings;

    type TestDriver = Driver<PtySupervisor, HeadlessFactory, Vec<u8>>;

    fn driver() -> TestDriver {
        let config = TandemConfig::default();
        let mut shell = ShellCommand::default();
        shell.program = "/bin/sh".into();
        let settings = WorkspaceSettings::from_config(&config, std::env::temp_dir());
        let workspace = Workspace::new(settings, PtySupervisor::new(shell), HeadlessFactory);
        let input = InputDispatcher::new(KeybindRegistry::from_config(&config.keybinds));
        Driver::new(workspace, input, Vec::new())
    }

    fn printed(d: &TestDriver) -> String {
        String::from_utf8_lossy(d.output()).into_owned()
    }

    fn tick_until(d: &mut TestDriver, needle: &str) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            d.tick().unwrap();
            if printed(d).contains(needle) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        false
    }

    #[test]
    fn run_echoes_shell_output() {
        let mut d = driver();
        d.apply(DriverCommand::Run("echo tandem-$((40+2))".into()))
            .unwrap();
        assert!(tick_until(&mut d, "tandem-42"));
        d.workspace_mut().shutdown();
    }

    #[test]
    fn exit_notice_reaches_output() {
        let mut d = driver();
        d.apply(DriverCommand::Run("exit 5".into())).unwrap();
        assert!(tick_until(&mut d, "[Process exited with code 5]"));
        assert_eq!(d.workspace().status().unwrap().terminal, "Exited");
    }

    #[test]
    fn divider_drag_through_pointer_commands() {
        let mut d = driver();
        d.apply(DriverCommand::Viewport(Rect::new(0.0, 0.0, 1004.0, 600.0)))
            .unwrap();
        d.apply(DriverCommand::Press(Point::new(502.0, 300.0))).unwrap();
        d.apply(DriverCommand::Move(Point::new(251.0, 300.0))).unwrap();
        d.apply(DriverCommand::Release).unwrap();

        let layout = &d.workspace().active_project().unwrap().layout;
        assert_eq!(layout.ratio(), Some(0.25));
        assert!(!layout.is_dragging());
        d.workspace_mut().shutdown();
    }

    #[test]
    fn press_away_from_divider_does_not_drag() {
        let mut d = driver();
        d.apply(DriverCommand::Viewport(Rect::new(0.0, 0.0, 1004.0, 600.0)))
            .unwrap();
        d.apply(DriverCommand::Press(Point::new(100.0, 300.0))).unwrap();
        d.apply(DriverCommand::Move(Point::new(251.0, 300.0))).unwrap();
        assert_eq!(d.workspace().active_project().unwrap().layout.ratio(), None);
        d.workspace_mut().shutdown();
    }

    #[test]
    fn keys_and_listing() {
        let mut d = driver();
        d.apply(DriverCommand::Key(KeyCombo::parse("Ctrl+3").unwrap()))
            .unwrap();
        assert_eq!(
            d.workspace().active_project().unwrap().layout.mode(),
            LayoutMode::ContentOnly
        );
        d.apply(DriverCommand::Key(KeyCombo::parse("Ctrl+Q").unwrap()))
            .unwrap();
        d.apply(DriverCommand::Rename("docs".into())).unwrap();
        d.apply(DriverCommand::List).unwrap();

        let out = printed(&d);
        assert!(out.contains("unbound: Ctrl+Q"));
        assert!(out.contains("* 1 docs [Content Only]"));
        assert!(out.contains("sh #1"));
        d.workspace_mut().shutdown();
    }

    #[test]
    fn help_lists_bound_keys() {
        let mut d = driver();
        d.apply(DriverCommand::Help).unwrap();
        let out = printed(&d);
        assert!(out.contains("keys:"));
        assert!(out.contains("New Terminal"));
        assert!(!out.contains("Layout: Split Vertical"));
        d.workspace_mut().shutdown();
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut d = driver();
        assert_eq!(d.apply(DriverCommand::Quit).unwrap(), Flow::Quit);
        assert_eq!(d.apply(DriverCommand::Status).unwrap(), Flow::Continue);
        assert!(printed(&d).contains("[Project 1] sh (pty:1)"));
        d.workspace_mut().shutdown();
    }

    #[test]
    fn run_returns_when_input_closes() {
        let d = driver();
        let (tx, rx) = std::sync::mpsc::channel();
        tx.send("status".to_string()).unwrap();
        drop(tx);
        d.run(rx).unwrap();
    }
}
