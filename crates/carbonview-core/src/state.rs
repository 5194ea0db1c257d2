//! State management for Carbonview pages.
//!
//! Pages follow the Elm pattern: `State + Message → (State, Command)`.
//! The page controller owns the state, feeds it messages from widgets, and
//! executes the returned commands. Side effects never happen inside
//! `update` itself, which keeps every state transition unit-testable.
//!
//! The only side effect this application needs is a data fetch. Fetches are
//! described, not performed: `update` returns a [`Command::Fetch`] carrying a
//! [`FetchRequest`], and the controller resolves it against its data source.
//! Each request carries a [`FetchGeneration`]; a response whose generation no
//! longer matches the issuing view's latest generation is stale and must be
//! discarded.

use serde::{Deserialize, Serialize};

/// Application state trait.
pub trait State {
    /// Message type for state updates
    type Message;

    /// Update state in response to a message.
    ///
    /// Returns a command describing any side effect to perform.
    fn update(&mut self, msg: Self::Message) -> Command;
}

/// Monotonic counter distinguishing in-flight fetches issued by one view.
///
/// Two toggles on the same page own independent generation sequences; the
/// counter only orders requests from a single origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct FetchGeneration(pub u64);

impl FetchGeneration {
    /// Advance to the next generation, invalidating all earlier ones.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// A described data fetch: endpoint path plus the generation that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Endpoint path including query string, e.g.
    /// `/company/api/trend_data?interval=monthly`
    pub path: String,
    /// Generation stamped by the issuing view
    pub generation: FetchGeneration,
}

/// Commands for side effects.
#[derive(Debug, Default)]
pub enum Command {
    /// No command
    #[default]
    None,
    /// Execute multiple commands
    Batch(Vec<Command>),
    /// Perform a data fetch
    Fetch(FetchRequest),
}

impl Command {
    /// Check if this command performs no work.
    #[must_use]
    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            Self::Batch(cmds) => cmds.iter().all(Self::is_none),
            Self::Fetch(_) => false,
        }
    }

    /// Collect every fetch request described by this command.
    #[must_use]
    pub fn fetches(&self) -> Vec<&FetchRequest> {
        match self {
            Self::None => Vec::new(),
            Self::Fetch(req) => vec![req],
            Self::Batch(cmds) => cmds.iter().flat_map(Self::fetches).collect(),
        }
    }
}
