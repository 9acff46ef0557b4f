//! Process supervisor: spawns interactive shells on pseudo-terminals and
//! relays their output and exit status back to the UI loop.
//!
//! Each process gets a background reader thread that forwards output
//! chunks over a shared `mpsc` channel. The owner drains that channel once
//! per loop turn with [`ProcessHost::drain_events`].

mod handle;
mod host;
mod shell;
mod supervisor;

pub use host::{ProcessEvent, ProcessHost, SpawnRequest, SpawnedProcess};
pub use shell::{default_shell, shell_name, ShellCommand, ALLOWED_ENV_VARS};
pub use supervisor::{PtySupervisor, PTY_READ_CHUNK};
