//! Flywheel Velocity Control
//!
//! This example spins a simulated flywheel up to 3600 rpm and holds it there.
//!
//! Key concepts:
//! - A motor as a `Commandable<i32>` accepting power in -127..=127
//! - The sensed rpm shared through a `Feedback<f64>` handle
//! - PID actions scheduled every 20 ms, driven by a manual clock
//! - States with guarded transitions (Idle -> SpinUp -> Hold)
//!
//! Run with: cargo run --example flywheel

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tickwise::builder::{BuildError, PidActionBuilder, StateBuilder, StateMachineBuilder};
use tickwise::core::{CommandError, Commandable, Feedback, ManualClock};
use tickwise::machine::{State, StateMachine};
use tickwise::pid::PidAction;

const TARGET_RPM: f64 = 3600.0;
const TICK: Duration = Duration::from_millis(5);

// Simulated motor: power maps to a free-running speed, reached with a lag.
struct Flywheel {
    power: i32,
    rpm: Feedback<f64>,
}

impl Flywheel {
    const RPM_PER_POWER: f64 = 30.0;
    const TIME_CONSTANT: f64 = 0.3;

    fn simulate(&self, elapsed: Duration) {
        let free_speed = f64::from(self.power) * Self::RPM_PER_POWER;
        let rpm = self.rpm.get();
        let blend = elapsed.as_secs_f64() / Self::TIME_CONSTANT;
        self.rpm.set(rpm + (free_speed - rpm) * blend);
    }
}

impl Commandable<i32> for Flywheel {
    fn set_value(&mut self, value: i32) -> Result<(), CommandError> {
        self.power = value;
        Ok(())
    }
}

type FlywheelPid = PidAction<f64, i32, Rc<RefCell<Flywheel>>, ManualClock>;

fn controller(
    p: f64,
    i: f64,
    rpm: &Feedback<f64>,
    flywheel: &Rc<RefCell<Flywheel>>,
    clock: &ManualClock,
) -> Result<FlywheelPid, BuildError> {
    PidActionBuilder::new()
        .gains(p, i, 0.0)
        .bounds(-127, 127)
        .i_bounds(-127, 127)
        .period(Duration::from_millis(20))
        .feedback(rpm.clone())
        .setpoint(TARGET_RPM)
        .build_with_clock(Rc::clone(flywheel), clock.clone())
}

fn announce(previous: &State) {
    println!("  <- entered from {}", previous.name());
}

fn build_machine(
    armed: &Rc<Cell<bool>>,
    rpm: &Feedback<f64>,
    flywheel: &Rc<RefCell<Flywheel>>,
    clock: &ManualClock,
) -> Result<StateMachine, BuildError> {
    let arm = Rc::clone(armed);
    let near_target = rpm.clone();
    let off_target = rpm.clone();

    let idle = StateBuilder::new("Idle")
        .when(move || arm.get(), "SpinUp")
        .build()?;

    let spin_up = StateBuilder::new("SpinUp")
        .action("flywheel", controller(0.2, 0.1, rpm, flywheel, clock)?)
        .when(move || (near_target.get() - TARGET_RPM).abs() < 50.0, "Hold")
        .on_entry(announce)
        .build()?;

    let hold = StateBuilder::new("Hold")
        .action("flywheel", controller(0.05, 0.02, rpm, flywheel, clock)?)
        .when(move || (off_target.get() - TARGET_RPM).abs() > 400.0, "SpinUp")
        .on_entry(announce)
        .build()?;

    StateMachineBuilder::new()
        .initial("Idle")
        .states(vec![idle, spin_up, hold])
        .build()
}

fn main() {
    println!("=== Flywheel Velocity Control ===\n");

    let clock = ManualClock::new();
    let rpm = Feedback::new(0.0_f64);
    let flywheel = Rc::new(RefCell::new(Flywheel {
        power: 0,
        rpm: rpm.clone(),
    }));
    let armed = Rc::new(Cell::new(false));

    let mut machine = match build_machine(&armed, &rpm, &flywheel, &clock) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("Invalid state machine: {e}");
            return;
        }
    };

    for step in 0..800u32 {
        if step == 20 {
            println!("Arming flywheel");
            armed.set(true);
        }

        clock.advance(TICK);
        flywheel.borrow().simulate(TICK);

        let report = machine.tick();
        if let Some(transition) = &report.transition {
            println!(
                "t={:>5} ms  {} -> {}",
                clock.elapsed().as_millis(),
                transition.from,
                transition.to
            );
        }
        if step % 100 == 0 {
            println!(
                "t={:>5} ms  state={:<7} power={:>4} rpm={:>7.1}",
                clock.elapsed().as_millis(),
                machine.current_state().name(),
                flywheel.borrow().power,
                rpm.get()
            );
        }
    }

    println!("\nPath: {:?}", machine.history().get_path());
    println!("=== Complete ===");
}
