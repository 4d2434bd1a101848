use topology::Connection;

use crate::error::SessionError;
use crate::local::LocalSession;
use crate::session::Session;
use crate::ssh::SshSession;

/// Hands out sessions for resolved connections.
///
/// The planner and executor depend on this trait rather than on the
/// concrete factory so tests can substitute scripted contexts.
pub trait SessionProvider {
    /// Opens a session bound to `connection`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unreachable`] for
    /// [`Connection::Impossible`], and whatever the session kind reports
    /// at construction.
    fn session(&self, connection: &Connection) -> Result<Box<dyn Session>, SessionError>;
}

/// The real provider: local shell for [`Connection::Local`], system `ssh`
/// for [`Connection::Remote`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionFactory;

impl SessionProvider for SessionFactory {
    fn session(&self, connection: &Connection) -> Result<Box<dyn Session>, SessionError> {
        match connection {
            Connection::Local => Ok(Box::new(LocalSession)),
            Connection::Remote(remote) => Ok(Box::new(SshSession::new(
                remote.host.clone(),
                remote.user.clone(),
            ))),
            Connection::Impossible => Err(SessionError::Unreachable),
        }
    }
}

#[cfg(test)]
mod tests {
    use topology::{Connection, RemoteHost};

    use super::{SessionFactory, SessionProvider};
    use crate::error::SessionError;

    #[test]
    fn local_connection_yields_working_session() {
        let session = SessionFactory.session(&Connection::Local).unwrap();
        assert_eq!(session.expand("/srv/data").unwrap(), "/srv/data");
    }

    #[test]
    fn remote_connection_yields_ssh_session() {
        let connection = Connection::Remote(RemoteHost::new("h.example.net", "u"));
        // Construction succeeds; dialing only happens on use.
        assert!(SessionFactory.session(&connection).is_ok());
    }

    #[test]
    fn impossible_connection_is_refused() {
        let err = SessionFactory.session(&Connection::Impossible).unwrap_err();
        assert!(matches!(err, SessionError::Unreachable));
    }
}
