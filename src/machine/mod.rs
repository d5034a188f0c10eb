//! The state/transition layer.
//!
//! - [`State`]: named actions, ordered transitions and an entry hook
//! - [`Transition`] and [`Guard`]: when to leave a state and where to go
//! - [`StateMachine`]: the runner ticking the current state and switching states
//! - [`StateHistory`]: the transitions the runner has taken
//!
//! Only one state is current at a time; the others sit idle in the graph and
//! their actions are never updated.

mod guard;
mod history;
mod runner;
mod state;
mod transition;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use runner::{StateMachine, TickReport, DEFAULT_HISTORY_LIMIT};
pub use state::{ActionFault, EntryHook, State};
pub use transition::Transition;

pub(crate) use state::NamedAction;
