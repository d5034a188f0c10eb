//! Tickwise: periodically scheduled control actions composed into a state machine
//!
//! Tickwise is built for cooperative control loops: a driver calls `tick()`
//! as fast as it likes, and every piece of control logic decides for itself
//! whether a full period has elapsed and it should run. Nothing sleeps and
//! nothing spawns threads.
//!
//! # Core Concepts
//!
//! - **Commandable**: anything that accepts a command value (motors, servos, valves)
//! - **Action**: a control law gated by a fixed update period
//! - **PID**: a generic PID action reading a live [`Feedback`] value
//! - **State**: named actions plus ordered, guarded transitions
//! - **StateMachine**: ticks the current state and follows the first transition that fires
//!
//! # Example
//!
//! ```rust
//! use std::cell::{Cell, RefCell};
//! use std::rc::Rc;
//! use std::time::Duration;
//! use tickwise::builder::{PidActionBuilder, StateBuilder, StateMachineBuilder};
//! use tickwise::core::{CommandError, Commandable, Feedback, ManualClock};
//!
//! #[derive(Default)]
//! struct Motor {
//!     power: i32,
//! }
//!
//! impl Commandable<i32> for Motor {
//!     fn set_value(&mut self, value: i32) -> Result<(), CommandError> {
//!         self.power = value;
//!         Ok(())
//!     }
//! }
//!
//! let clock = ManualClock::new();
//! let rpm = Feedback::new(0.0_f64);
//! let motor = Rc::new(RefCell::new(Motor::default()));
//! let armed = Rc::new(Cell::new(false));
//!
//! let hold = PidActionBuilder::new()
//!     .gains(0.2, 0.1, 0.0)
//!     .bounds(-127, 127)
//!     .i_bounds(-127, 127)
//!     .period(Duration::from_millis(10))
//!     .feedback(rpm.clone())
//!     .setpoint(3600.0)
//!     .build_with_clock(Rc::clone(&motor), clock.clone())
//!     .unwrap();
//!
//! let flag = Rc::clone(&armed);
//! let mut machine = StateMachineBuilder::new()
//!     .initial("Idle")
//!     .state(StateBuilder::new("Idle").when(move || flag.get(), "Spin").build().unwrap())
//!     .state(StateBuilder::new("Spin").action("flywheel", hold).build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! machine.tick();
//! assert_eq!(machine.current_state().name(), "Idle");
//!
//! armed.set(true);
//! machine.tick();
//! assert_eq!(machine.current_state().name(), "Spin");
//!
//! clock.advance(Duration::from_millis(10));
//! machine.tick();
//! assert_eq!(motor.borrow().power, 127);
//! ```

pub mod action;
pub mod builder;
pub mod config;
pub mod core;
pub mod machine;
pub mod pid;

// Re-export commonly used types
pub use action::{Action, ActionError, ScheduledAction, Update};
pub use builder::{BuildError, PidActionBuilder, StateBuilder, StateMachineBuilder};
pub use crate::core::{Clock, CommandError, Commandable, ControlValue, Feedback, ManualClock};
pub use machine::{State, StateMachine, TickReport, Transition};
pub use pid::{PidAction, PidGains, SimplePid};
