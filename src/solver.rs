use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;

use crate::errors::CircuitError;
use crate::inputs::{CircuitInputs, Quantity};
use crate::result::{Breakdown, CircuitResult};
use crate::rules::{Derivation, Knowns, TOLERANCE, agrees, derive};
use crate::units::Frequency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    #[default]
    Series,
    Parallel,
}

impl FromStr for Topology {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "series" => Ok(Self::Series),
            "parallel" => Ok(Self::Parallel),
            _ => Err(CircuitError::UnknownTopology(s.to_string())),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Series => f.write_str("series"),
            Self::Parallel => f.write_str("parallel"),
        }
    }
}

/// Checks that the inputs can possibly be solved and returns the frequency.
///
/// Frequency must be given. Voltage and current may only both be given when
/// impedance is given too. Beyond that, two of resistance, capacitance,
/// inductance, impedance and power are required, or one when exactly one of
/// voltage and current is given.
pub fn check_solvable(inputs: &CircuitInputs) -> Result<Frequency, CircuitError> {
    let frequency = match inputs.frequency {
        Quantity::Unknown => return Err(CircuitError::insufficient("frequency is required")),
        Quantity::Given(hz) | Quantity::GivenAsReactance(hz) => Frequency::new(hz)?,
    };

    let voltage = inputs.voltage.is_given();
    let current = inputs.current.is_given();
    if voltage && current && inputs.impedance.is_unknown() {
        return Err(CircuitError::contradiction(
            "voltage and current are both given; leave one blank or give the impedance",
        ));
    }

    let components = [
        inputs.resistance,
        inputs.capacitance,
        inputs.inductance,
        inputs.impedance,
        inputs.power,
    ]
    .iter()
    .filter(|q| q.is_given())
    .count();
    let required = if voltage ^ current { 1 } else { 2 };
    if components < required {
        return Err(CircuitError::insufficient(format!(
            "need at least {required} of resistance, capacitance, inductance, impedance, power (got {components})"
        )));
    }
    Ok(frequency)
}

/// Solves one circuit. Stateless: the result depends only on `inputs` and `topology`.
pub fn solve(inputs: &CircuitInputs, topology: Topology) -> Result<CircuitResult, CircuitError> {
    let _span = tracing::info_span!("solve", %topology).entered();

    let frequency = check_solvable(inputs)?;
    let mut knowns = Knowns::from_inputs(inputs)?;

    // With impedance given, a given current is redundant: it is re-derived from U / Z.
    if let (Some(u), Some(i), Some(z)) = (knowns.voltage, knowns.current, knowns.impedance) {
        warn_if_disagrees("current", i, u / z);
        knowns.current = None;
    }

    let derivations = derive(&mut knowns, topology, frequency.angular())?;
    check_impedance(&knowns, topology)?;

    let result = match topology {
        Topology::Series => evaluate_series(&knowns, frequency, derivations)?,
        Topology::Parallel => evaluate_parallel(&knowns, frequency, derivations)?,
    };

    if let Some(p) = knowns.power {
        warn_if_disagrees("power", p, result.real_power);
    }
    ensure_finite(&result)?;
    tracing::debug!(
        impedance = result.impedance,
        current = result.current,
        phase = result.phase_angle_deg,
        "solved"
    );
    Ok(result)
}

/// Voltage, current and impedance after derivation, all three required.
fn excitation(k: &Knowns) -> Result<(f64, f64, f64), CircuitError> {
    match (k.voltage, k.current, k.impedance) {
        (Some(_), Some(_), Some(z)) if z == 0.0 => Err(CircuitError::indeterminate("zero impedance")),
        (Some(u), Some(i), Some(z)) => Ok((u, i, z)),
        (_, _, None) => Err(CircuitError::insufficient(
            "the impedance cannot be determined from the given values",
        )),
        _ => Err(CircuitError::insufficient(
            "voltage and current cannot be determined; give voltage, current or power",
        )),
    }
}

fn evaluate_series(
    k: &Knowns,
    frequency: Frequency,
    derivations: Vec<Derivation>,
) -> Result<CircuitResult, CircuitError> {
    let (voltage, current, impedance) = excitation(k)?;
    let r = k.resistance.unwrap_or(0.0);
    let xl = k.inductive_reactance.unwrap_or(0.0);
    let xc = k.capacitive_reactance.unwrap_or(0.0);
    let net = xl - xc;

    Ok(CircuitResult {
        topology: Topology::Series,
        frequency: frequency.into(),
        voltage,
        current,
        impedance,
        resistance: k.resistance,
        inductance: k.inductance,
        capacitance: k.capacitance,
        inductive_reactance: xl,
        capacitive_reactance: xc,
        phase_angle_deg: phase_angle_deg(r, net),
        power_factor: (r / impedance).min(1.0),
        real_power: current * current * r,
        apparent_power: voltage * current,
        reactive_power: (current * current * net).abs(),
        breakdown: Breakdown::Series {
            resistor_voltage: current * r,
            inductor_voltage: current * xl,
            capacitor_voltage: current * xc,
        },
        derivations,
    })
}

fn evaluate_parallel(
    k: &Knowns,
    frequency: Frequency,
    derivations: Vec<Derivation>,
) -> Result<CircuitResult, CircuitError> {
    let (voltage, current, impedance) = excitation(k)?;
    let ir = voltage * k.conductance();
    let il = k.inductive_reactance.map_or(0.0, |x| voltage / x);
    let ic = k.capacitive_reactance.map_or(0.0, |x| voltage / x);
    let net = ic - il;

    Ok(CircuitResult {
        topology: Topology::Parallel,
        frequency: frequency.into(),
        voltage,
        current,
        impedance,
        resistance: k.resistance,
        inductance: k.inductance,
        capacitance: k.capacitance,
        inductive_reactance: k.inductive_reactance.unwrap_or(0.0),
        capacitive_reactance: k.capacitive_reactance.unwrap_or(0.0),
        phase_angle_deg: phase_angle_deg(ir, net),
        power_factor: (ir / current).min(1.0),
        real_power: voltage * ir,
        apparent_power: voltage * current,
        reactive_power: (voltage * net).abs(),
        breakdown: Breakdown::Parallel {
            resistor_current: ir,
            inductor_current: il,
            capacitor_current: ic,
        },
        derivations,
    })
}

/// Angle of `in_phase + j·quadrature` in degrees. A zero in-phase part is decided by
/// the sign of the quadrature part alone: +90°, −90° or 0°.
pub fn phase_angle_deg(in_phase: f64, quadrature: f64) -> f64 {
    if in_phase == 0.0 {
        return match quadrature.partial_cmp(&0.0) {
            Some(Ordering::Greater) => 90.0,
            Some(Ordering::Less) => -90.0,
            _ => 0.0,
        };
    }
    Complex64::new(in_phase, quadrature).arg().to_degrees()
}

/// A given impedance must fit the resistance and agree with the branches around it.
fn check_impedance(k: &Knowns, topology: Topology) -> Result<(), CircuitError> {
    let Some(z) = k.impedance else {
        return Ok(());
    };
    match (topology, k.resistance) {
        (Topology::Series, Some(r)) if z < r * (1.0 - TOLERANCE) => {
            return Err(CircuitError::contradiction(format!(
                "impedance {z} Ω is smaller than the resistance {r} Ω"
            )));
        }
        (Topology::Parallel, Some(r)) if z > r * (1.0 + TOLERANCE) => {
            return Err(CircuitError::contradiction(format!(
                "parallel impedance {z} Ω exceeds the resistance {r} Ω"
            )));
        }
        _ => {}
    }
    if !k.resistance_settled() {
        return Ok(());
    }

    // Parallel branches are compared as admittances so open branches stay finite.
    let (from_branches, given) = match topology {
        Topology::Series => (k.resistance.unwrap_or(0.0).hypot(k.net_reactance()), z),
        Topology::Parallel => (k.conductance().hypot(k.susceptance()), 1.0 / z),
    };
    match agrees(from_branches, given) {
        true => Ok(()),
        false => Err(CircuitError::contradiction(format!(
            "impedance {z} Ω does not match the branches around it"
        ))),
    }
}

fn warn_if_disagrees(quantity: &'static str, given: f64, derived: f64) {
    if !agrees(given, derived) {
        tracing::warn!(quantity, given, derived, "given value disagrees with the derived one");
    }
}

fn ensure_finite(result: &CircuitResult) -> Result<(), CircuitError> {
    match result.quantities().into_iter().find(|(_, v, _)| !v.is_finite()) {
        Some((name, _, _)) => Err(CircuitError::indeterminate(format!("{name} is not finite"))),
        None => Ok(()),
    }
}
