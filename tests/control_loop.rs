//! End-to-end tests: PID actions inside a running state machine.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tickwise::builder::{BuildError, PidActionBuilder, StateBuilder, StateMachineBuilder};
use tickwise::config::PidConfig;
use tickwise::core::{CommandError, Commandable, Feedback, ManualClock};
use tickwise::machine::State;
use tickwise::pid::{PidAction, PidGains, PidLaw, SimplePid};

#[derive(Default)]
struct Motor {
    commands: Vec<i32>,
    unplugged: bool,
}

impl Commandable<i32> for Motor {
    fn set_value(&mut self, value: i32) -> Result<(), CommandError> {
        if self.unplugged {
            return Err(CommandError::DeviceUnavailable {
                device: "flywheel".to_string(),
            });
        }
        self.commands.push(value);
        Ok(())
    }
}

type MotorPid = PidAction<f64, i32, Rc<RefCell<Motor>>, ManualClock>;

#[test]
fn proportional_step_then_offset() {
    let mut law: PidLaw<f64> = PidLaw::new(PidGains::new(1.0, 0.0, 0.0));

    assert_eq!(law.step(10.0, 4.0, 0.01), 6.0);

    law.set_offset(-3.0);
    assert_eq!(law.step(10.0, 4.0, 0.01), 3.0);
}

#[test]
fn integral_saturates_on_the_first_step() {
    let mut law: PidLaw<f64> = PidLaw::new(PidGains::new(0.0, 2.0, 0.0)).with_i_bounds(-8.0, 8.0);

    assert_eq!(law.step(5.0, 0.0, 1.0), 8.0);
    assert_eq!(law.integral(), 8.0);
}

#[test]
fn simple_pid_remembers_its_output() {
    let mut pid = SimplePid::new(PidGains::new(0.5, 0.0, 0.0)).with_bounds(-1.0, 1.0);

    assert_eq!(pid.output(), 0.0);
    pid.compute(4.0, 3.0, 0.02);
    assert_eq!(pid.output(), 0.5);
}

#[test]
fn flywheel_spins_up_and_holds() {
    let clock = ManualClock::new();
    let rpm = Feedback::new(0.0_f64);
    let motor = Rc::new(RefCell::new(Motor::default()));
    let entered: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let hold = PidActionBuilder::new()
        .gains(0.2, 0.1, 0.0)
        .bounds(-127, 127)
        .i_bounds(-127, 127)
        .period(Duration::from_millis(20))
        .feedback(rpm.clone())
        .setpoint(3600.0)
        .build_with_clock(Rc::clone(&motor), clock.clone())
        .unwrap();

    let at_speed = rpm.clone();
    let log = Rc::clone(&entered);
    let mut machine = StateMachineBuilder::new()
        .initial("Spin")
        .state(
            StateBuilder::new("Spin")
                .action("flywheel", hold)
                .when(move || at_speed.get() >= 3500.0, "Ready")
                .build()
                .unwrap(),
        )
        .state(
            StateBuilder::new("Ready")
                .on_entry(move |previous: &State| {
                    log.borrow_mut().push(previous.name().to_string());
                })
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    clock.advance(Duration::from_millis(20));
    let report = machine.tick();
    assert!(report.is_clean());
    assert!(!report.transitioned());
    assert_eq!(motor.borrow().commands, vec![127]);

    rpm.set(3500.0);
    clock.advance(Duration::from_millis(20));
    let report = machine.tick();
    assert!(report.transitioned());
    assert_eq!(machine.current_state().name(), "Ready");
    assert_eq!(*entered.borrow(), vec!["Spin".to_string()]);
    assert_eq!(machine.history().get_path(), vec!["Spin", "Ready"]);

    // p = 20, integral = 7.2 + 0.2
    assert_eq!(motor.borrow().commands, vec![127, 27]);
}

#[test]
fn retuning_through_the_state_keeps_the_integral() {
    let clock = ManualClock::new();
    let rpm = Feedback::new(0.0_f64);
    let motor = Rc::new(RefCell::new(Motor::default()));

    let hold = PidActionBuilder::<f64, i32>::new()
        .gains(0.0, 1.0, 0.0)
        .period(Duration::from_secs(1))
        .feedback(rpm)
        .setpoint(10.0)
        .build_with_clock(Rc::clone(&motor), clock.clone())
        .unwrap();

    let mut machine = StateMachineBuilder::new()
        .initial("Hold")
        .state(StateBuilder::new("Hold").action("pid", hold).build().unwrap())
        .build()
        .unwrap();

    clock.advance(Duration::from_secs(1));
    machine.tick();

    let pid = machine.current_state_mut().action_as_mut::<MotorPid>("pid");
    assert_eq!(pid.integral(), 10.0);
    pid.set_target(20.0);
    pid.set_pid_constants(1.0, 1.0, 0.0);

    clock.advance(Duration::from_secs(1));
    machine.tick();

    // p = 20, integral = 10 + 20
    assert_eq!(motor.borrow().commands, vec![10, 50]);
}

#[test]
fn failing_actuator_is_reported_and_does_not_block_transitions() {
    let clock = ManualClock::new();
    let motor = Rc::new(RefCell::new(Motor {
        unplugged: true,
        ..Motor::default()
    }));
    let give_up = Rc::new(Cell::new(false));

    let drive = PidActionBuilder::<f64, i32>::new()
        .gains(1.0, 0.0, 0.0)
        .period(Duration::from_millis(10))
        .feedback(Feedback::new(0.0_f64))
        .setpoint(1.0)
        .build_with_clock(Rc::clone(&motor), clock.clone())
        .unwrap();

    let flag = Rc::clone(&give_up);
    let mut machine = StateMachineBuilder::new()
        .initial("Drive")
        .state(
            StateBuilder::new("Drive")
                .action("motor", drive)
                .when(move || flag.get(), "Safe")
                .build()
                .unwrap(),
        )
        .state(StateBuilder::new("Safe").build().unwrap())
        .build()
        .unwrap();

    give_up.set(true);
    clock.advance(Duration::from_millis(10));
    let report = machine.tick();

    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].action, "motor");
    assert!(report.transitioned());
    assert_eq!(machine.current_state().name(), "Safe");
}

#[test]
fn json_config_feeds_the_builder() {
    let config: PidConfig<i32> = PidConfig::from_json(
        r#"{ "gains": { "p": 1.0, "i": 0.0, "d": 0.0 }, "min_value": 5, "max_value": -5 }"#,
    )
    .unwrap();

    let result = PidActionBuilder::new()
        .config(config)
        .feedback(Feedback::new(0.0_f64))
        .build(Rc::new(RefCell::new(Motor::default())));

    assert!(matches!(result, Err(BuildError::InvalidConfig(ref violations)) if violations.len() == 1));
}
