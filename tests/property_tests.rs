//! Property-based tests for control laws, scheduling gates and state machines.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use tickwise::action::{Action, ActionError, ControlLaw, ScheduledAction, Update};
use tickwise::builder::{StateBuilder, StateMachineBuilder};
use tickwise::core::{CommandError, Commandable, ManualClock};
use tickwise::pid::{PidGains, PidLaw};

/// Counts how often the machine updated it.
struct Counter {
    updates: Rc<Cell<usize>>,
}

impl Action for Counter {
    fn update(&mut self) -> Result<Update, ActionError> {
        self.updates.set(self.updates.get() + 1);
        Ok(Update::Waiting)
    }

    fn period(&self) -> Duration {
        Duration::from_millis(1)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct Elapsed;

impl ControlLaw for Elapsed {
    type Output = f64;

    fn compute(&mut self, delta_seconds: f64) -> f64 {
        delta_seconds
    }
}

#[derive(Default)]
struct Recorder {
    values: Vec<f64>,
}

impl Commandable<f64> for Recorder {
    fn set_value(&mut self, value: f64) -> Result<(), CommandError> {
        self.values.push(value);
        Ok(())
    }
}

prop_compose! {
    fn arbitrary_gains()(
        p in -10.0..10.0f64,
        i in -10.0..10.0f64,
        d in -10.0..10.0f64,
    ) -> PidGains {
        PidGains::new(p, i, d)
    }
}

prop_compose! {
    fn ordered_pair()(a in -1000..1000i32, b in -1000..1000i32) -> (i32, i32) {
        (a.min(b), a.max(b))
    }
}

proptest! {
    #[test]
    fn output_never_leaves_bounds(
        gains in arbitrary_gains(),
        (min_value, max_value) in ordered_pair(),
        (min_i, max_i) in ordered_pair(),
        offset in -500..500i32,
        steps in prop::collection::vec((-1e4..1e4f64, -1e4..1e4f64, 0.0..2.0f64), 1..20),
    ) {
        let mut law = PidLaw::new(gains)
            .with_bounds(min_value, max_value)
            .with_i_bounds(min_i, max_i)
            .with_offset(offset);

        for (setpoint, measured, dt) in steps {
            let output = law.step(setpoint, measured, dt);
            prop_assert!(output >= min_value && output <= max_value);
            prop_assert!(law.integral() >= f64::from(min_i));
            prop_assert!(law.integral() <= f64::from(max_i));
        }
    }

    #[test]
    fn first_step_has_no_derivative(
        gains in arbitrary_gains(),
        setpoint in -1e3..1e3f64,
        measured in -1e3..1e3f64,
        dt in 0.0..1.0f64,
    ) {
        let mut law: PidLaw<f64> = PidLaw::new(gains);
        law.step(setpoint, measured, dt);

        let terms = law.terms().unwrap();
        prop_assert_eq!(terms.d, 0.0);
        prop_assert!(law.is_primed());
    }

    #[test]
    fn reset_unprimes_the_derivative(
        gains in arbitrary_gains(),
        readings in prop::collection::vec(-1e3..1e3f64, 2..10),
    ) {
        let mut law: PidLaw<f64> = PidLaw::new(gains);
        for reading in &readings {
            law.step(0.0, *reading, 0.1);
        }

        law.reset();
        law.step(0.0, readings[0], 0.1);

        prop_assert_eq!(law.terms().unwrap().d, 0.0);
    }

    #[test]
    fn gate_runs_at_most_once_per_period(
        period_ms in 1..50u64,
        advances in prop::collection::vec(0..40u64, 1..60),
    ) {
        let clock = ManualClock::new();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut action = ScheduledAction::with_clock(
            Duration::from_millis(period_ms),
            Elapsed,
            Rc::clone(&recorder),
            clock.clone(),
        );

        let mut since_last_run = 0u64;
        for advance in advances {
            clock.advance(Duration::from_millis(advance));
            since_last_run += advance;

            let update = action.update().unwrap();
            prop_assert_eq!(update.ran(), since_last_run >= period_ms);
            if let Update::Ran { delta_seconds } = update {
                prop_assert_eq!(delta_seconds, Duration::from_millis(since_last_run).as_secs_f64());
                since_last_run = 0;
            }
        }

        let total: u64 = clock.elapsed().as_millis() as u64;
        prop_assert!(recorder.borrow().values.len() as u64 <= total / period_ms);
    }

    #[test]
    fn first_firing_transition_wins(guards in prop::collection::vec(any::<bool>(), 1..8)) {
        let source = guards
            .iter()
            .enumerate()
            .fold(StateBuilder::new("Source"), |builder, (position, &fires)| {
                builder.when(move || fires, format!("Target{position}"))
            })
            .build()
            .unwrap();

        let targets = (0..guards.len())
            .map(|position| StateBuilder::new(format!("Target{position}")).build().unwrap())
            .collect();

        let mut machine = StateMachineBuilder::new()
            .initial("Source")
            .state(source)
            .states(targets)
            .build()
            .unwrap();

        machine.tick();

        let expected = guards
            .iter()
            .position(|&fires| fires)
            .map_or_else(|| "Source".to_string(), |position| format!("Target{position}"));
        prop_assert_eq!(machine.current_state().name(), expected.as_str());
    }

    #[test]
    fn only_the_current_state_is_updated(schedule in prop::collection::vec(any::<bool>(), 1..30)) {
        let switch = Rc::new(Cell::new(false));
        let a_updates = Rc::new(Cell::new(0));
        let b_updates = Rc::new(Cell::new(0));

        let to_b = Rc::clone(&switch);
        let to_a = Rc::clone(&switch);
        let mut machine = StateMachineBuilder::new()
            .initial("A")
            .state(
                StateBuilder::new("A")
                    .action("count", Counter { updates: Rc::clone(&a_updates) })
                    .when(move || to_b.get(), "B")
                    .build()
                    .unwrap(),
            )
            .state(
                StateBuilder::new("B")
                    .action("count", Counter { updates: Rc::clone(&b_updates) })
                    .when(move || !to_a.get(), "A")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let mut expected_a = 0;
        let mut expected_b = 0;
        for want_b in schedule {
            match machine.current_state().name() {
                "A" => expected_a += 1,
                _ => expected_b += 1,
            }
            switch.set(want_b);
            machine.tick();
        }

        prop_assert_eq!(a_updates.get(), expected_a);
        prop_assert_eq!(b_updates.get(), expected_b);
    }
}
