//! Process-wide chain context.
//!
//! The surrounding protocol performs one-time cryptographic setup per
//! process, selected by network. That boundary is modeled here as an
//! explicit, idempotent initializer returning a `'static` handle rather
//! than a hidden singleton: callers hold the [`ChainContext`] they were
//! given, and the address codec never reads this state -- network and
//! encoding variant are explicit parameters everywhere.
//!
//! The first [`init`] call pins the network for the process lifetime.
//! Repeat calls with the same network are no-ops that return the same
//! handle; a conflicting network fails.

use std::fmt;
use std::sync::OnceLock;

use tracing::{debug, info};

use crate::Network;

// ---------------------------------------------------------------------------
// ChainContext
// ---------------------------------------------------------------------------

/// Handle to the process-wide context, pinned to a single network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainContext {
    network: Network,
}

static CONTEXT: OnceLock<ChainContext> = OnceLock::new();

impl ChainContext {
    /// Returns the network this process is pinned to.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Returns the active context, or `None` before the first [`init`].
    pub fn get() -> Option<&'static ChainContext> {
        CONTEXT.get()
    }
}

/// Initializes the process-wide chain context.
///
/// Idempotent: the first call pins `network` and wins; later calls with
/// the same network return the same handle.
///
/// # Errors
///
/// [`ChainError::AlreadyInitialized`] if the process is already pinned
/// to a different network.
pub fn init(network: Network) -> Result<&'static ChainContext, ChainError> {
    let mut first = false;
    let context = CONTEXT.get_or_init(|| {
        first = true;
        ChainContext { network }
    });

    if first {
        info!(%network, "chain context initialized");
    } else if context.network != network {
        return Err(ChainError::AlreadyInitialized(context.network));
    } else {
        debug!(%network, "chain context already initialized");
    }
    Ok(context)
}

// ---------------------------------------------------------------------------
// ChainError
// ---------------------------------------------------------------------------

/// Errors from chain-context initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    /// [`init`] was called again with a different network; the payload
    /// is the network the process is pinned to.
    AlreadyInitialized(Network),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized(active) => {
                write!(f, "chain context already pinned to {active}")
            }
        }
    }
}

impl std::error::Error for ChainError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
