use catalog::{Replica, ReplicaId};
use exec::SessionProvider;
use policy::SyncSpec;
use topology::{Connection, Network};
use tracing::{debug, info};

use crate::endpoint::{Endpoint, ExecutionSide};
use crate::error::PlanError;
use crate::options::{PlanOption, compile_options};

/// A fully resolved transfer, ready for rendering and execution.
///
/// Everything interactive has already happened: connections are classified,
/// paths are expanded on their owning sides, and the option list is final.
/// Rendering a plan is pure string work from here.
#[derive(Debug)]
pub struct TransferPlan {
    src_id: ReplicaId,
    target_id: ReplicaId,
    side: ExecutionSide,
    src: Endpoint,
    target: Endpoint,
    src_connection: Connection,
    target_connection: Connection,
    options: Vec<PlanOption>,
    create_target: bool,
}

impl TransferPlan {
    /// Source replica id.
    #[must_use]
    pub const fn src_id(&self) -> &ReplicaId {
        &self.src_id
    }

    /// Target replica id.
    #[must_use]
    pub const fn target_id(&self) -> &ReplicaId {
        &self.target_id
    }

    /// Which side runs the transfer command.
    #[must_use]
    pub const fn side(&self) -> ExecutionSide {
        self.side
    }

    /// Source endpoint as the executing side addresses it.
    #[must_use]
    pub const fn src(&self) -> &Endpoint {
        &self.src
    }

    /// Target endpoint as the executing side addresses it.
    #[must_use]
    pub const fn target(&self) -> &Endpoint {
        &self.target
    }

    /// The canonical ordered option list.
    #[must_use]
    pub fn options(&self) -> &[PlanOption] {
        &self.options
    }

    /// Whether the executor should create the target directory first.
    #[must_use]
    pub const fn create_target(&self) -> bool {
        self.create_target
    }

    /// Connection of the side the transfer command runs on.
    #[must_use]
    pub const fn executing_connection(&self) -> &Connection {
        match self.side {
            ExecutionSide::Source => &self.src_connection,
            ExecutionSide::Target => &self.target_connection,
        }
    }

    /// Connection of the target side, for pre-transfer directory creation.
    #[must_use]
    pub const fn target_connection(&self) -> &Connection {
        &self.target_connection
    }
}

/// Plans a transfer from `src` to `target` as seen from `invoking_node`.
///
/// Reachability is checked for both endpoints before anything else; an
/// unreachable pair fails without a single session being opened. Path
/// expansion then runs on each endpoint's own side, the policy is compiled
/// into the canonical option list, and endpoints are rendered relative to
/// the chosen execution side.
///
/// # Errors
///
/// Returns [`PlanError::UnreachablePeer`] when either endpoint has no
/// route, and propagates topology, catalog, and session failures.
pub fn plan_transfer(
    network: &Network,
    sessions: &dyn SessionProvider,
    src: &Replica,
    target: &Replica,
    spec: SyncSpec,
    invoking_node: &str,
) -> Result<TransferPlan, PlanError> {
    let src_connection = network.resolve_connection(src.id().peer(), invoking_node)?;
    let target_connection = network.resolve_connection(target.id().peer(), invoking_node)?;

    for (replica, connection) in [(src, &src_connection), (target, &target_connection)] {
        if connection.is_impossible() {
            return Err(PlanError::UnreachablePeer {
                peer: replica.id().peer().to_owned(),
                node: invoking_node.to_owned(),
            });
        }
    }

    let side = choose_side(&src_connection, &target_connection);
    debug!(
        target: "oc_sync::plan",
        src = %src.id(),
        dst = %target.id(),
        side = %side,
        "execution side chosen"
    );

    let src_path = resolve_path(network, sessions, src, &src_connection)?;
    let target_path = resolve_path(network, sessions, target, &target_connection)?;

    let both_local = src_connection.is_local() && target_connection.is_local();
    let mut spec = spec;
    spec.transport.compression = spec.transport.compression.resolve(both_local);

    let options = compile_options(&spec, target.working_set());

    let (src_endpoint, target_endpoint) = match side {
        ExecutionSide::Source => (
            Endpoint::Local { path: src_path },
            far_endpoint(&src_connection, &target_connection, target_path),
        ),
        ExecutionSide::Target => (
            far_endpoint(&target_connection, &src_connection, src_path),
            Endpoint::Local { path: target_path },
        ),
    };

    info!(
        target: "oc_sync::plan",
        src = %src_endpoint,
        dst = %target_endpoint,
        side = %side,
        "transfer planned"
    );

    Ok(TransferPlan {
        src_id: src.id().clone(),
        target_id: target.id().clone(),
        side,
        src: src_endpoint,
        target: target_endpoint,
        src_connection,
        target_connection,
        options,
        create_target: spec.transport.create_target,
    })
}

/// Resolves a single replica to its connection and expanded path, with the
/// same reachability gate as a full plan.
///
/// Backup maintenance runs over one endpoint instead of a pair; it still
/// refuses to open a session toward an unreachable peer.
///
/// # Errors
///
/// Returns [`PlanError::UnreachablePeer`] when the replica's peer has no
/// route from `invoking_node`, and propagates topology and session
/// failures.
pub fn resolve_endpoint(
    network: &Network,
    sessions: &dyn SessionProvider,
    replica: &Replica,
    invoking_node: &str,
) -> Result<(Connection, String), PlanError> {
    let connection = network.resolve_connection(replica.id().peer(), invoking_node)?;
    if connection.is_impossible() {
        return Err(PlanError::UnreachablePeer {
            peer: replica.id().peer().to_owned(),
            node: invoking_node.to_owned(),
        });
    }
    let path = resolve_path(network, sessions, replica, &connection)?;
    Ok((connection, path))
}

/// Pull mode exactly when only the target is local; source side otherwise.
const fn choose_side(src: &Connection, target: &Connection) -> ExecutionSide {
    if target.is_local() && !src.is_local() {
        ExecutionSide::Target
    } else {
        ExecutionSide::Source
    }
}

/// Joins the replica prefix onto any mount prefix and expands the result
/// on the replica's own side.
fn resolve_path(
    network: &Network,
    sessions: &dyn SessionProvider,
    replica: &Replica,
    connection: &Connection,
) -> Result<String, PlanError> {
    let raw = match network.mount_prefix(replica.id().peer())? {
        Some(mount) => format!("{mount}/{}", replica.prefix()),
        None => replica.prefix().to_owned(),
    };
    let session = sessions.session(connection)?;
    let expanded = session.expand(&raw)?;
    debug!(
        target: "oc_sync::plan",
        replica = %replica.id(),
        raw,
        expanded,
        "endpoint path resolved"
    );
    Ok(expanded)
}

/// Endpoint for the non-executing side.
///
/// Renders a remote address only when that side actually lives on a
/// different `(host, user)` than the executing side; two replicas on the
/// same remote account address each other by bare path.
fn far_endpoint(executing: &Connection, far: &Connection, path: String) -> Endpoint {
    match far.remote() {
        Some(remote) if executing.remote() != Some(remote) => Endpoint::Remote {
            host: remote.host.clone(),
            user: remote.user.clone(),
            path,
        },
        _ => Endpoint::Local { path },
    }
}
