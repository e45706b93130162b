//! Standard motion-gesture profile
//!
//! Seven input variables (three accelerometer axes, three rotation angles,
//! acceleration magnitude), one `GestureType` output variable whose sets
//! occupy consecutive unit-width bands, and ten rules.

use super::types::{GestureType, SensorFrame, CHANNEL_COUNT};
use crate::app::config::EngineConfig;
use crate::fuzzy::{Clause, FuzzyController, FuzzyRule, FuzzySet, FuzzyVariable, MembershipFunction};

pub const ACCELEROMETER_X: &str = "AccelerometerX";
pub const ACCELEROMETER_Y: &str = "AccelerometerY";
pub const ACCELEROMETER_Z: &str = "AccelerometerZ";
pub const GYROSCOPE_CROSS_X: &str = "GyroscopeCrossX";
pub const GYROSCOPE_CROSS_Y: &str = "GyroscopeCrossY";
pub const GYROSCOPE_CROSS_Z: &str = "GyroscopeCrossZ";
pub const MAGNITUDE: &str = "Magnitude";

/// Output variable carrying the gesture score
pub const GESTURE_OUTPUT: &str = "GestureType";

/// Input variable names in [`SensorFrame::channels`] order
pub const INPUT_NAMES: [&str; CHANNEL_COUNT] = [
    ACCELEROMETER_X,
    ACCELEROMETER_Y,
    ACCELEROMETER_Z,
    GYROSCOPE_CROSS_X,
    GYROSCOPE_CROSS_Y,
    GYROSCOPE_CROSS_Z,
    MAGNITUDE,
];

const HIGH_NEG: &str = "HighNeg";
const LOW_NEG: &str = "LowNeg";
const ZERO: &str = "Zero";
const LOW_POS: &str = "LowPos";
const HIGH_POS: &str = "HighPos";

/// `(set, a, b, c)` for one accelerometer axis (g)
const ACCELERATION_SETS: [(&str, f64, f64, f64); 5] = [
    (HIGH_NEG, -1.0, -0.375, -0.3),
    (LOW_NEG, -0.3, -0.175, -0.1),
    (ZERO, -0.1, 0.0, 0.1),
    (LOW_POS, 0.1, 0.175, 0.3),
    (HIGH_POS, 0.3, 0.375, 1.0),
];

/// `(set, a, b, c)` for one rotation angle (degrees)
const ANGLE_SETS: [(&str, f64, f64, f64); 5] = [
    (HIGH_NEG, -120.0, -90.0, -85.0),
    (LOW_NEG, -85.0, -60.0, -45.0),
    (ZERO, -45.0, 0.0, 45.0),
    (LOW_POS, 45.0, 60.0, 85.0),
    (HIGH_POS, 85.0, 90.0, 120.0),
];

const MAGNITUDE_SETS: [(&str, f64, f64, f64); 3] = [
    (ZERO, 0.0, 0.25, 0.5),
    (LOW_POS, 0.5, 0.75, 1.0),
    (HIGH_POS, 1.0, 10.0, 25.0),
];

/// Build a controller holding the full gesture profile
pub fn standard_controller(engine: &EngineConfig) -> crate::Result<FuzzyController> {
    let mut controller = FuzzyController::new().with_defuzzify_samples(engine.defuzzify_samples);

    for name in [ACCELEROMETER_X, ACCELEROMETER_Y, ACCELEROMETER_Z] {
        controller.register_input(name, triangular_variable(name, &ACCELERATION_SETS, engine.plateau_width)?);
    }
    for name in [GYROSCOPE_CROSS_X, GYROSCOPE_CROSS_Y, GYROSCOPE_CROSS_Z] {
        controller.register_input(name, triangular_variable(name, &ANGLE_SETS, engine.plateau_width)?);
    }
    controller.register_input(
        MAGNITUDE,
        triangular_variable(MAGNITUDE, &MAGNITUDE_SETS, engine.plateau_width)?,
    );
    controller.register_output(GESTURE_OUTPUT, gesture_variable(engine.plateau_width)?);

    for rule in standard_rules()? {
        controller.add_rule(rule);
    }

    Ok(controller)
}

/// The ten gesture rules in firing order
pub fn standard_rules() -> crate::Result<Vec<FuzzyRule>> {
    let accel = |x: &str, y: &str, z: &str| {
        vec![
            Clause::new(ACCELEROMETER_X, x),
            Clause::new(ACCELEROMETER_Y, y),
            Clause::new(ACCELEROMETER_Z, z),
        ]
    };
    let gyro = |x: &str, y: &str, z: &str| {
        vec![
            Clause::new(GYROSCOPE_CROSS_X, x),
            Clause::new(GYROSCOPE_CROSS_Y, y),
            Clause::new(GYROSCOPE_CROSS_Z, z),
        ]
    };
    let gesture = |g: GestureType| Clause::new(GESTURE_OUTPUT, g.set_name());

    let at_rest = INPUT_NAMES.iter().map(|name| Clause::new(*name, ZERO)).collect();

    Ok(vec![
        FuzzyRule::all_of(accel(ZERO, HIGH_POS, ZERO), gesture(GestureType::StepForward))?,
        FuzzyRule::all_of(accel(ZERO, HIGH_NEG, ZERO), gesture(GestureType::StepBackward))?,
        FuzzyRule::all_of(accel(HIGH_POS, ZERO, ZERO), gesture(GestureType::StepRight))?,
        FuzzyRule::all_of(accel(HIGH_NEG, ZERO, ZERO), gesture(GestureType::StepLeft))?,
        FuzzyRule::all_of(accel(ZERO, ZERO, HIGH_POS), gesture(GestureType::Jump))?,
        FuzzyRule::all_of(accel(ZERO, ZERO, HIGH_NEG), gesture(GestureType::Squat))?,
        FuzzyRule::all_of(gyro(HIGH_POS, LOW_POS, ZERO), gesture(GestureType::TurnRight))?,
        FuzzyRule::all_of(gyro(HIGH_NEG, LOW_NEG, ZERO), gesture(GestureType::TurnLeft))?,
        FuzzyRule::single(Clause::new(MAGNITUDE, HIGH_POS), gesture(GestureType::Shake)),
        FuzzyRule::all_of(at_rest, gesture(GestureType::None))?,
    ])
}

/// Push every channel of `frame` into the matching input variable
pub fn apply_frame(controller: &mut FuzzyController, frame: &SensorFrame) -> crate::Result<()> {
    for (name, value) in INPUT_NAMES.iter().zip(frame.channels()) {
        controller.set_input(name, value)?;
    }
    Ok(())
}

fn triangular_variable(
    name: &str,
    sets: &[(&str, f64, f64, f64)],
    plateau_width: f64,
) -> crate::Result<FuzzyVariable> {
    let mut variable = FuzzyVariable::new(name);
    for &(set_name, a, b, c) in sets {
        variable.add_set(set_name, triangular_set(a, b, c, plateau_width)?);
    }
    Ok(variable)
}

/// One set per gesture over its band, apex at the band center
fn gesture_variable(plateau_width: f64) -> crate::Result<FuzzyVariable> {
    let mut variable = FuzzyVariable::new(GESTURE_OUTPUT);
    for gesture in GestureType::ALL {
        let (start, end) = gesture.band();
        variable.add_set(
            gesture.set_name(),
            triangular_set(start, start + 0.5, end, plateau_width)?,
        );
    }
    Ok(variable)
}

fn triangular_set(a: f64, b: f64, c: f64, plateau_width: f64) -> crate::Result<FuzzySet> {
    FuzzySet::new(MembershipFunction::triangular_with_plateau(a, b, c, plateau_width)?, a, c)
}
