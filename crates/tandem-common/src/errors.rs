use std::path::PathBuf;

use crate::id::ProjectId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// A shell process could not be launched. No session is created when this
/// is returned.
#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    #[error("failed to open pty: {0}")]
    OpenPty(String),

    #[error("failed to launch shell '{shell}': {reason}")]
    Launch { shell: String, reason: String },

    #[error("failed to start pty reader: {0}")]
    Reader(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("failed to create render surface: {0}")]
    Create(String),

    #[error("render surface operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid keybind: {0}")]
    InvalidKeybind(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TandemError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("no such project: {0}")]
    UnknownProject(ProjectId),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("layout.divider_width".into());
        assert_eq!(
            err.to_string(),
            "config validation error: layout.divider_width"
        );
    }

    #[test]
    fn spawn_error_display() {
        let err = SpawnError::Launch {
            shell: "/bin/nope".into(),
            reason: "No such file or directory".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to launch shell '/bin/nope': No such file or directory"
        );

        let err = SpawnError::OpenPty("out of ptys".into());
        assert_eq!(err.to_string(), "failed to open pty: out of ptys");
    }

    #[test]
    fn tandem_error_from_spawn() {
        let err: TandemError = SpawnError::Reader("thread limit".into()).into();
        assert!(matches!(err, TandemError::Spawn(_)));
        assert!(err.to_string().contains("thread limit"));
    }

    #[test]
    fn unknown_project_names_id() {
        let err = TandemError::UnknownProject(ProjectId(4));
        assert_eq!(err.to_string(), "no such project: project-4");
    }

    #[test]
    fn tandem_error_from_config() {
        let err: TandemError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, TandemError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn tandem_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: TandemError = io_err.into();
        assert!(matches!(err, TandemError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn input_and_surface_errors() {
        let err = InputError::InvalidKeybind("Hyper+X".into());
        assert_eq!(err.to_string(), "invalid keybind: Hyper+X");

        let err = SurfaceError::Create("no display".into());
        assert_eq!(err.to_string(), "failed to create render surface: no display");

        let err = TandemError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
