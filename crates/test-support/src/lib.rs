#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Shared fixtures for oc-sync tests: a canned peer network, a matching
//! replica catalog, and scripted execution contexts that expand paths
//! without touching a shell.
//!
//! The canned world has four hosts and one drive:
//!
//! - `basalt`: the usual invoking node (`basalt.lan`), alias `slab`
//! - `quartz`: remote via `alice@quartz.example.net`
//! - `shale`: remote via `alice@shale.example.net`
//! - `pumice`: known but unreachable
//! - `flint`: drive, alias `pocket`

use std::cell::RefCell;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::rc::Rc;

use catalog::{Catalog, Patterns};
use exec::{Session, SessionError, SessionProvider};
use topology::{Connection, MountConvention, MountConventions, Network, Peer, RemoteHost};

/// The canned peer network described in the crate docs.
///
/// # Panics
///
/// Panics if the fixture tables stop satisfying [`Network::new`].
#[must_use]
pub fn sample_network() -> Network {
    let peers = vec![
        Peer::host("basalt", vec!["slab".into()], vec!["basalt.lan".into()]),
        Peer::host("quartz", vec![], vec![]),
        Peer::host("shale", vec![], vec![]),
        Peer::host("pumice", vec![], vec![]),
        Peer::drive("flint", vec!["pocket".into()]),
    ];
    let connections = [
        (
            "quartz".to_string(),
            RemoteHost::new("quartz.example.net", "alice"),
        ),
        (
            "shale".to_string(),
            RemoteHost::new("shale.example.net", "alice"),
        ),
    ]
    .into_iter()
    .collect();
    let mounts = MountConventions::new(
        Some(MountConvention::Direct),
        Some(MountConvention::Root("/media/$USER".into())),
    );
    Network::new(peers, connections, mounts).unwrap()
}

/// A replica catalog matching [`sample_network`].
///
/// Hosts default to the `home` refinement (prefix `$HOME`), drives to
/// `user` (prefix `$USER`). `quartz/tree` carries an ordered working set so
/// filter-ordering assertions have something to bite on.
///
/// # Panics
///
/// Panics if the fixture tables stop satisfying the catalog validator.
#[must_use]
pub fn sample_catalog() -> Catalog {
    Catalog::builder()
        .host_default_refinement("home")
        .drive_default_refinement("user")
        .refinement_prefix("home", "$HOME")
        .refinement_prefix("user", "$USER")
        .prefix("basalt/scratch", "$HOME/scratch")
        .prefix("quartz/tree", "$HOME/depot/tree")
        .prefix("quartz/annex", "/srv/annex")
        .includes(
            "quartz/tree",
            Patterns::List(vec!["projects/**".into(), "notes/**".into()]),
        )
        .excludes("quartz/tree", Patterns::List(vec!["*.tmp".into()]))
        .excludes("basalt", Patterns::List(vec![".cache/**".into()]))
        .build()
        .unwrap()
}

/// Session provider whose sessions never touch a shell.
///
/// Expansion substitutes `$HOME` with `/home/alice` and `$USER` with
/// `alice`, and every call is recorded so tests can assert what ran
/// where. `run` always reports success with empty output.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSessions {
    log: Rc<RefCell<Vec<String>>>,
}

impl ScriptedSessions {
    /// A provider with an empty call log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `expand` and `run` call so far, as `location: detail` lines.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.log.borrow().len()
    }
}

impl SessionProvider for ScriptedSessions {
    fn session(&self, connection: &Connection) -> Result<Box<dyn Session>, SessionError> {
        let location = match connection {
            Connection::Local => "local".to_owned(),
            Connection::Remote(remote) => remote.to_string(),
            Connection::Impossible => return Err(SessionError::Unreachable),
        };
        Ok(Box::new(ScriptedSession {
            location,
            log: Rc::clone(&self.log),
        }))
    }
}

#[derive(Debug)]
struct ScriptedSession {
    location: String,
    log: Rc<RefCell<Vec<String>>>,
}

impl Session for ScriptedSession {
    fn run(&self, command: &str) -> Result<Output, SessionError> {
        self.log
            .borrow_mut()
            .push(format!("{}: run {command}", self.location));
        Ok(Output {
            status: success_status(),
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    }

    fn expand(&self, path: &str) -> Result<String, SessionError> {
        self.log
            .borrow_mut()
            .push(format!("{}: expand {path}", self.location));
        Ok(path.replace("$HOME", "/home/alice").replace("$USER", "alice"))
    }
}

fn success_status() -> ExitStatus {
    ExitStatus::from_raw(0)
}

#[cfg(test)]
mod tests {
    use exec::SessionProvider;
    use topology::Connection;

    use super::{ScriptedSessions, sample_catalog, sample_network};

    #[test]
    fn fixtures_agree_with_each_other() {
        let network = sample_network();
        let catalog = sample_catalog();

        let id = catalog.normalize("quartz/tree", &network).unwrap();
        let replica = catalog.resolve("quartz/tree", &network).unwrap();
        assert_eq!(replica.id(), &id);
        assert_eq!(replica.prefix(), "$HOME/depot/tree");
    }

    #[test]
    fn scripted_expansion_substitutes_and_records() {
        let sessions = ScriptedSessions::new();
        let session = sessions.session(&Connection::Local).unwrap();

        let expanded = session.expand("$HOME/scratch").unwrap();
        assert_eq!(expanded, "/home/alice/scratch");
        assert_eq!(sessions.calls(), ["local: expand $HOME/scratch"]);
    }
}
