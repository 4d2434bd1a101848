use std::fmt;

/// Which side of the transfer runs the command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecutionSide {
    /// The command runs on the source replica's side.
    Source,
    /// The command runs on the target replica's side, addressing the
    /// source remotely. Chosen when only the target is local.
    Target,
}

impl fmt::Display for ExecutionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Target => "target",
        })
    }
}

/// One transfer endpoint as the executing side will address it.
///
/// Locality here is *relative to the executing side*, not to the planner:
/// a replica on the same remote host as the executing command is
/// [`Endpoint::Local`] even though neither is on the invoking node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Endpoint {
    /// Addressed by bare path.
    Local {
        /// Expanded absolute path.
        path: String,
    },
    /// Addressed as `user@host:path`.
    Remote {
        /// Hostname the transfer tool will dial.
        host: String,
        /// Login user on that host.
        user: String,
        /// Expanded absolute path on that host.
        path: String,
    },
}

impl Endpoint {
    /// The expanded path, without any address part.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Local { path } | Self::Remote { path, .. } => path,
        }
    }

    /// Whether the endpoint is addressed through a remote host.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { path } => f.write_str(path),
            Self::Remote { host, user, path } => write!(f, "{user}@{host}:{path}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Endpoint, ExecutionSide};

    #[test]
    fn local_endpoint_renders_bare_path() {
        let endpoint = Endpoint::Local {
            path: "/home/alice/tree".into(),
        };
        assert_eq!(endpoint.to_string(), "/home/alice/tree");
        assert!(!endpoint.is_remote());
    }

    #[test]
    fn remote_endpoint_renders_ssh_address() {
        let endpoint = Endpoint::Remote {
            host: "quartz.example.net".into(),
            user: "alice".into(),
            path: "/srv/annex".into(),
        };
        assert_eq!(endpoint.to_string(), "alice@quartz.example.net:/srv/annex");
        assert_eq!(endpoint.path(), "/srv/annex");
    }

    #[test]
    fn sides_display_lowercase() {
        assert_eq!(ExecutionSide::Source.to_string(), "source");
        assert_eq!(ExecutionSide::Target.to_string(), "target");
    }
}
