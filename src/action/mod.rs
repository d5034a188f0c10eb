//! Scheduled actions.
//!
//! An action binds a control law to a commandable target and an update period.
//! The driver calls [`Action::update`] as often as it likes (ideally faster than
//! the shortest period); the control law only runs once a full period has
//! elapsed since its previous run, and receives that elapsed time in seconds.
//!
//! This is cooperative scheduling: `update` never sleeps.

mod schedule;
mod scheduled;

pub use schedule::Schedule;
pub use scheduled::{Action, ActionError, ControlLaw, ScheduledAction, Update};
