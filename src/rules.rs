//! Derivation rules over the set of known circuit quantities.
//!
//! Each rule looks at which quantities are known and, when it applies, derives exactly
//! one missing quantity. [`derive`] runs the rule table for a topology from the top
//! after every success until no rule applies. A rule never overwrites a known value,
//! so the search terminates after at most one step per quantity.

use crate::errors::CircuitError;
use crate::inputs::{CircuitInputs, Quantity};
use crate::solver::Topology;
use crate::units::{AngularFrequency, Capacitance, Inductance};

/// Relative slack before an impedance smaller than its resistive part is rejected.
pub(crate) const TOLERANCE: f64 = 1e-9;

/// Relative difference within which two routes to the same quantity agree.
pub(crate) const AGREEMENT: f64 = 1e-3;

pub(crate) fn agrees(a: f64, b: f64) -> bool {
    (a - b).abs() <= AGREEMENT * a.abs().max(b.abs())
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Knowns {
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub resistance: Option<f64>,
    pub inductance: Option<f64>,
    pub capacitance: Option<f64>,
    pub inductive_reactance: Option<f64>,
    pub capacitive_reactance: Option<f64>,
    pub impedance: Option<f64>,
    pub power: Option<f64>,
}

impl Knowns {
    pub fn from_inputs(inputs: &CircuitInputs) -> Result<Self, CircuitError> {
        let mut knowns = Self {
            voltage: checked("voltage", inputs.voltage)?,
            current: checked("current", inputs.current)?,
            resistance: checked("resistance", inputs.resistance)?,
            impedance: checked("impedance", inputs.impedance)?,
            power: checked("power", inputs.power)?,
            ..Self::default()
        };
        match inputs.inductance {
            Quantity::GivenAsReactance(_) => {
                knowns.inductive_reactance = checked("inductive reactance", inputs.inductance)?
            }
            q => knowns.inductance = checked("inductance", q)?,
        }
        match inputs.capacitance {
            Quantity::GivenAsReactance(_) => {
                knowns.capacitive_reactance = checked("capacitive reactance", inputs.capacitance)?
            }
            q => knowns.capacitance = checked("capacitance", q)?,
        }
        Ok(knowns)
    }

    /// Xl − Xc, absent branches counting as zero.
    pub fn net_reactance(&self) -> f64 {
        self.inductive_reactance.unwrap_or(0.0) - self.capacitive_reactance.unwrap_or(0.0)
    }

    /// 1/R, an absent resistor being an open branch.
    pub fn conductance(&self) -> f64 {
        self.resistance.map_or(0.0, |r| 1.0 / r)
    }

    /// 1/Xc − 1/Xl, absent branches being open.
    pub fn susceptance(&self) -> f64 {
        self.capacitive_reactance.map_or(0.0, |x| 1.0 / x)
            - self.inductive_reactance.map_or(0.0, |x| 1.0 / x)
    }

    /// Resistance is settled when known, or absent with no power left to derive it from.
    pub(crate) fn resistance_settled(&self) -> bool {
        self.resistance.is_some() || self.power.is_none()
    }

    fn has_reactance(&self) -> bool {
        self.inductive_reactance.is_some() || self.capacitive_reactance.is_some()
    }

    /// The one known reactance and the slot of the missing one, when exactly one is known.
    fn lone_reactance(&self) -> Option<(f64, Target)> {
        match (self.inductive_reactance, self.capacitive_reactance) {
            (Some(xl), None) => Some((xl, Target::CapacitiveReactance)),
            (None, Some(xc)) => Some((xc, Target::InductiveReactance)),
            _ => None,
        }
    }

    fn has_any_branch(&self) -> bool {
        self.resistance.is_some() || self.has_reactance()
    }

    fn slot_mut(&mut self, target: Target) -> &mut Option<f64> {
        match target {
            Target::Voltage => &mut self.voltage,
            Target::Current => &mut self.current,
            Target::Resistance => &mut self.resistance,
            Target::Inductance => &mut self.inductance,
            Target::Capacitance => &mut self.capacitance,
            Target::InductiveReactance => &mut self.inductive_reactance,
            Target::CapacitiveReactance => &mut self.capacitive_reactance,
            Target::Impedance => &mut self.impedance,
        }
    }

    fn apply(&mut self, step: &Derivation) {
        *self.slot_mut(step.target) = Some(step.value);
    }
}

fn checked(quantity: &'static str, q: Quantity) -> Result<Option<f64>, CircuitError> {
    match q {
        Quantity::Unknown => Ok(None),
        Quantity::Given(value) | Quantity::GivenAsReactance(value) => {
            match value > 0.0 && value.is_finite() {
                true => Ok(Some(value)),
                false => Err(CircuitError::InvalidValue { quantity, value }),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Voltage,
    Current,
    Resistance,
    Inductance,
    Capacitance,
    InductiveReactance,
    CapacitiveReactance,
    Impedance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    InductiveReactance,
    InductanceFromReactance,
    CapacitiveReactance,
    CapacitanceFromReactance,
    SeriesResistanceFromPowerAndCurrent,
    SeriesCurrentFromPower,
    SeriesResistanceFromPowerAndVoltage,
    ParallelResistanceFromPower,
    ParallelVoltageFromPower,
    SeriesResistanceFromImpedance,
    SeriesReactanceFromImpedance,
    ParallelResistanceFromImpedance,
    ParallelReactanceFromImpedance,
    SeriesMissingReactance,
    ParallelMissingReactance,
    SeriesImpedance,
    ParallelImpedance,
    CurrentFromVoltage,
    VoltageFromCurrent,
}

impl Rule {
    pub fn formula(self) -> &'static str {
        match self {
            Self::InductiveReactance => "Xl = 2π·f·L",
            Self::InductanceFromReactance => "L = Xl / (2π·f)",
            Self::CapacitiveReactance => "Xc = 1 / (2π·f·C)",
            Self::CapacitanceFromReactance => "C = 1 / (2π·f·Xc)",
            Self::SeriesResistanceFromPowerAndCurrent => "R = P / I²",
            Self::SeriesCurrentFromPower => "I = √(P / R)",
            Self::SeriesResistanceFromPowerAndVoltage => "P·R² − U²·R + P·(Xl − Xc)² = 0",
            Self::ParallelResistanceFromPower => "R = U² / P",
            Self::ParallelVoltageFromPower => "U = √(P·R)",
            Self::SeriesResistanceFromImpedance => "R = √(Z² − (Xl − Xc)²)",
            Self::SeriesReactanceFromImpedance => "Xl = √(Z² − R²)",
            Self::ParallelResistanceFromImpedance => "1/R = √(1/Z² − (1/Xc − 1/Xl)²)",
            Self::ParallelReactanceFromImpedance => "1/Xl = √(1/Z² − 1/R²)",
            Self::SeriesMissingReactance => "|Xl − Xc| = √(Z² − R²)",
            Self::ParallelMissingReactance => "|1/Xc − 1/Xl| = √(1/Z² − 1/R²)",
            Self::SeriesImpedance => "Z = √(R² + (Xl − Xc)²)",
            Self::ParallelImpedance => "Z = 1 / √((1/R)² + (1/Xc − 1/Xl)²)",
            Self::CurrentFromVoltage => "I = U / Z",
            Self::VoltageFromCurrent => "U = I · Z",
        }
    }
}

/// One fired rule and the value it produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derivation {
    pub rule: Rule,
    pub target: Target,
    pub value: f64,
}

type RuleOutcome = Result<Option<Derivation>, CircuitError>;
type RuleFn = fn(&Knowns, AngularFrequency) -> RuleOutcome;

const SERIES_RULES: &[RuleFn] = &[
    inductive_reactance,
    inductance_from_reactance,
    capacitive_reactance,
    capacitance_from_reactance,
    series_resistance_from_power_and_current,
    series_current_from_power,
    series_resistance_from_power_and_voltage,
    series_resistance_from_impedance,
    series_reactance_from_impedance,
    series_missing_reactance,
    series_impedance,
    current_from_voltage,
    voltage_from_current,
];

const PARALLEL_RULES: &[RuleFn] = &[
    inductive_reactance,
    inductance_from_reactance,
    capacitive_reactance,
    capacitance_from_reactance,
    parallel_resistance_from_power,
    parallel_voltage_from_power,
    parallel_resistance_from_impedance,
    parallel_reactance_from_impedance,
    parallel_missing_reactance,
    parallel_impedance,
    current_from_voltage,
    voltage_from_current,
];

/// Fills in `knowns` until no rule applies and returns the fired steps in order.
pub fn derive(
    knowns: &mut Knowns,
    topology: Topology,
    omega: AngularFrequency,
) -> Result<Vec<Derivation>, CircuitError> {
    let rules = match topology {
        Topology::Series => SERIES_RULES,
        Topology::Parallel => PARALLEL_RULES,
    };
    let mut steps = Vec::new();
    'search: loop {
        for rule in rules {
            if let Some(step) = rule(&*knowns, omega)? {
                tracing::debug!(rule = ?step.rule, target = ?step.target, value = step.value, "derived");
                knowns.apply(&step);
                steps.push(step);
                continue 'search;
            }
        }
        break;
    }
    Ok(steps)
}

fn derived(rule: Rule, target: Target, value: f64) -> RuleOutcome {
    Ok(Some(Derivation { rule, target, value }))
}

fn inductive_reactance(k: &Knowns, omega: AngularFrequency) -> RuleOutcome {
    match (k.inductance, k.inductive_reactance) {
        (Some(l), None) => derived(
            Rule::InductiveReactance,
            Target::InductiveReactance,
            Inductance::new(l)?.reactance(omega),
        ),
        _ => Ok(None),
    }
}

fn inductance_from_reactance(k: &Knowns, omega: AngularFrequency) -> RuleOutcome {
    match (k.inductive_reactance, k.inductance) {
        (Some(xl), None) => derived(
            Rule::InductanceFromReactance,
            Target::Inductance,
            Inductance::from_reactance(xl, omega)?.into(),
        ),
        _ => Ok(None),
    }
}

fn capacitive_reactance(k: &Knowns, omega: AngularFrequency) -> RuleOutcome {
    match (k.capacitance, k.capacitive_reactance) {
        (Some(c), None) => derived(
            Rule::CapacitiveReactance,
            Target::CapacitiveReactance,
            Capacitance::new(c)?.reactance(omega),
        ),
        _ => Ok(None),
    }
}

fn capacitance_from_reactance(k: &Knowns, omega: AngularFrequency) -> RuleOutcome {
    match (k.capacitive_reactance, k.capacitance) {
        (Some(xc), None) => derived(
            Rule::CapacitanceFromReactance,
            Target::Capacitance,
            Capacitance::from_reactance(xc, omega)?.into(),
        ),
        _ => Ok(None),
    }
}

fn series_resistance_from_power_and_current(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    match (k.resistance, k.power, k.current) {
        (None, Some(p), Some(i)) => derived(
            Rule::SeriesResistanceFromPowerAndCurrent,
            Target::Resistance,
            p / (i * i),
        ),
        _ => Ok(None),
    }
}

fn series_current_from_power(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    match (k.voltage, k.current, k.power, k.resistance) {
        (None, None, Some(p), Some(r)) => {
            derived(Rule::SeriesCurrentFromPower, Target::Current, (p / r).sqrt())
        }
        _ => Ok(None),
    }
}

/// P = U²·R / (R² + X²) solved for R. Of the two roots the larger one, the
/// low-current operating point, is taken.
fn series_resistance_from_power_and_voltage(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    let (None, Some(p), Some(u), None, None) =
        (k.resistance, k.power, k.voltage, k.current, k.impedance)
    else {
        return Ok(None);
    };
    let x = k.net_reactance();
    let u2 = u * u;
    let discriminant = u2 * u2 - 4.0 * p * p * x * x;
    if discriminant < 0.0 {
        return Err(CircuitError::contradiction(format!(
            "{p} W cannot be dissipated from {u} V through {} Ω of net reactance",
            x.abs()
        )));
    }
    derived(
        Rule::SeriesResistanceFromPowerAndVoltage,
        Target::Resistance,
        (u2 + discriminant.sqrt()) / (2.0 * p),
    )
}

fn parallel_resistance_from_power(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    match (k.resistance, k.power, k.voltage) {
        (None, Some(p), Some(u)) => {
            derived(Rule::ParallelResistanceFromPower, Target::Resistance, u * u / p)
        }
        _ => Ok(None),
    }
}

fn parallel_voltage_from_power(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    match (k.voltage, k.current, k.power, k.resistance) {
        (None, None, Some(p), Some(r)) => {
            derived(Rule::ParallelVoltageFromPower, Target::Voltage, (p * r).sqrt())
        }
        _ => Ok(None),
    }
}

fn series_resistance_from_impedance(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    let (None, None, Some(z), true) = (k.resistance, k.power, k.impedance, k.has_reactance())
    else {
        return Ok(None);
    };
    let x = k.net_reactance().abs();
    if z < x * (1.0 - TOLERANCE) {
        return Err(CircuitError::contradiction(format!(
            "impedance {z} Ω is smaller than the net reactance {x} Ω"
        )));
    }
    match (z * z - x * x).max(0.0).sqrt() {
        r if r > 0.0 => derived(Rule::SeriesResistanceFromImpedance, Target::Resistance, r),
        _ => Ok(None),
    }
}

/// Splits a given impedance into the known resistance and a reactance. With neither L
/// nor C given the reactance is assigned to the inductive branch.
fn series_reactance_from_impedance(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    let (Some(z), false, true) = (k.impedance, k.has_reactance(), k.resistance_settled()) else {
        return Ok(None);
    };
    let r = k.resistance.unwrap_or(0.0);
    if z < r * (1.0 - TOLERANCE) {
        return Err(CircuitError::contradiction(format!(
            "impedance {z} Ω is smaller than the resistance {r} Ω"
        )));
    }
    match (z * z - r * r).max(0.0).sqrt() {
        x if x > 0.0 => derived(Rule::SeriesReactanceFromImpedance, Target::InductiveReactance, x),
        _ => Ok(None),
    }
}

fn parallel_resistance_from_impedance(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    let (None, None, Some(z), true) = (k.resistance, k.power, k.impedance, k.has_reactance())
    else {
        return Ok(None);
    };
    let y = 1.0 / z;
    let b = k.susceptance().abs();
    if y < b * (1.0 - TOLERANCE) {
        return Err(CircuitError::contradiction(format!(
            "impedance {z} Ω is larger than the reactive branches allow ({} Ω)",
            1.0 / b
        )));
    }
    match (y * y - b * b).max(0.0).sqrt() {
        g if g > 0.0 => derived(Rule::ParallelResistanceFromImpedance, Target::Resistance, 1.0 / g),
        _ => Ok(None),
    }
}

/// Recovers the reactive branch behind a given impedance. With neither L nor C given
/// the missing branch is taken to be inductive.
fn parallel_reactance_from_impedance(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    let (Some(z), false, true) = (k.impedance, k.has_reactance(), k.resistance_settled()) else {
        return Ok(None);
    };
    let y = 1.0 / z;
    let g = k.conductance();
    if y < g * (1.0 - TOLERANCE) {
        return Err(CircuitError::contradiction(format!(
            "parallel impedance {z} Ω exceeds the resistance {} Ω",
            1.0 / g
        )));
    }
    match (y * y - g * g).max(0.0).sqrt() {
        b if b > 0.0 => derived(
            Rule::ParallelReactanceFromImpedance,
            Target::InductiveReactance,
            1.0 / b,
        ),
        _ => Ok(None),
    }
}

/// With R and one reactance known but not accounting for a given Z, adds the other
/// reactive branch. The added branch is taken to dominate: it equals the known
/// reactance plus √(Z² − R²).
fn series_missing_reactance(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    let (Some(z), Some(r), Some((known, target))) = (k.impedance, k.resistance, k.lone_reactance())
    else {
        return Ok(None);
    };
    if agrees(r.hypot(known), z) {
        return Ok(None);
    }
    if z < r * (1.0 - TOLERANCE) {
        return Err(CircuitError::contradiction(format!(
            "impedance {z} Ω is smaller than the resistance {r} Ω"
        )));
    }
    let x = (z * z - r * r).max(0.0).sqrt();
    derived(Rule::SeriesMissingReactance, target, known + x)
}

/// Parallel counterpart of [`series_missing_reactance`], in susceptances: the added
/// branch carries the known branch current plus √(Itotal² − Ir²).
fn parallel_missing_reactance(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    let (Some(z), Some(r), Some((known, target))) = (k.impedance, k.resistance, k.lone_reactance())
    else {
        return Ok(None);
    };
    let (y, g, b_known) = (1.0 / z, 1.0 / r, 1.0 / known);
    if agrees(g.hypot(b_known), y) {
        return Ok(None);
    }
    if y < g * (1.0 - TOLERANCE) {
        return Err(CircuitError::contradiction(format!(
            "parallel impedance {z} Ω exceeds the resistance {r} Ω"
        )));
    }
    let b = (y * y - g * g).max(0.0).sqrt();
    derived(Rule::ParallelMissingReactance, target, 1.0 / (b_known + b))
}

fn series_impedance(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    let (None, true, true) = (k.impedance, k.resistance_settled(), k.has_any_branch()) else {
        return Ok(None);
    };
    let r = k.resistance.unwrap_or(0.0);
    derived(Rule::SeriesImpedance, Target::Impedance, r.hypot(k.net_reactance()))
}

fn parallel_impedance(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    let (None, true, true) = (k.impedance, k.resistance_settled(), k.has_any_branch()) else {
        return Ok(None);
    };
    let admittance = k.conductance().hypot(k.susceptance());
    if admittance == 0.0 {
        return Err(CircuitError::indeterminate(
            "the reactive branches cancel, total current is zero",
        ));
    }
    derived(Rule::ParallelImpedance, Target::Impedance, 1.0 / admittance)
}

fn current_from_voltage(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    match (k.voltage, k.current, k.impedance) {
        (Some(_), None, Some(z)) if z == 0.0 => {
            Err(CircuitError::indeterminate("zero impedance"))
        }
        (Some(u), None, Some(z)) => derived(Rule::CurrentFromVoltage, Target::Current, u / z),
        _ => Ok(None),
    }
}

fn voltage_from_current(k: &Knowns, _: AngularFrequency) -> RuleOutcome {
    match (k.current, k.voltage, k.impedance) {
        (Some(_), None, Some(z)) if z == 0.0 => {
            Err(CircuitError::indeterminate("zero impedance"))
        }
        (Some(i), None, Some(z)) => derived(Rule::VoltageFromCurrent, Target::Voltage, i * z),
        _ => Ok(None),
    }
}
