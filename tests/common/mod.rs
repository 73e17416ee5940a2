#![allow(dead_code)]

use approx::assert_relative_eq;
use rlc_solve::inputs::{CircuitInputs, Quantity};
use rlc_solve::{CircuitError, CircuitResult, Topology, solve};

pub mod strategies;

/// Epsilon for values that go through the same arithmetic by two routes.
pub const EPSILON_STRICT: f64 = 1e-9;

/// Epsilon for physical identities (KVL, power triangle, reactance round trips).
pub const EPSILON_PHYSICAL: f64 = 1e-6;

/// Epsilon for worked examples quoted to four or five significant figures.
pub const EPSILON_QUOTED: f64 = 1e-3;

pub fn assert_close(actual: f64, expected: f64, epsilon: f64) {
    assert_relative_eq!(actual, expected, epsilon = epsilon, max_relative = epsilon);
}

/// Input set with only the frequency filled in.
pub fn at_frequency(hz: f64) -> CircuitInputs {
    CircuitInputs {
        frequency: Quantity::Given(hz),
        ..CircuitInputs::default()
    }
}

/// Voltage-driven R/L/C set; a zero component value means the component is absent.
pub fn rlc(voltage: f64, r: f64, l: f64, c: f64, hz: f64) -> CircuitInputs {
    CircuitInputs {
        voltage: given_or_unknown(voltage),
        resistance: given_or_unknown(r),
        inductance: given_or_unknown(l),
        capacitance: given_or_unknown(c),
        ..at_frequency(hz)
    }
}

pub fn given_or_unknown(value: f64) -> Quantity {
    match value > 0.0 {
        true => Quantity::Given(value),
        false => Quantity::Unknown,
    }
}

pub fn solve_ok(inputs: &CircuitInputs, topology: Topology) -> CircuitResult {
    solve(inputs, topology).unwrap_or_else(|e| panic!("expected a solution, got {e}"))
}

pub fn solve_err(inputs: &CircuitInputs, topology: Topology) -> CircuitError {
    match solve(inputs, topology) {
        Ok(result) => panic!("expected a failure, got {result:?}"),
        Err(e) => e,
    }
}

pub fn omega(hz: f64) -> f64 {
    2.0 * std::f64::consts::PI * hz
}
