//! Numeric identifiers for the entities the workspace tracks.
//!
//! Process ids are allocated by the supervisor and are unique across the
//! whole application. Session and content ids are allocated per project.
//! Project ids are allocated by the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// The id following this one.
            pub fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a supervised child process.
    ProcessId,
    "pty"
);
numeric_id!(
    /// Identifier of a terminal tab within one project.
    SessionId,
    "session"
);
numeric_id!(
    /// Identifier of a content tab within one project.
    ContentId,
    "content"
);
numeric_id!(
    /// Identifier of a project.
    ProjectId,
    "project"
);
