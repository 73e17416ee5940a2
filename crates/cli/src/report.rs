use std::fmt;

use rlc_solve::format::format_optional;
use rlc_solve::{Breakdown, CircuitInputs, CircuitResult, Field, Quantity, Topology, UnitKind, format_value};

const SERIES_FORMULAS: [&str; 4] = [
    "Ur = I·R, Ul = I·Xl, Uc = I·Xc",
    "φ = arctan((Xl − Xc) / R)",
    "cos φ = R / Z",
    "P = I²·R, S = U·I, Q = |I²·(Xl − Xc)|",
];

const PARALLEL_FORMULAS: [&str; 4] = [
    "Ir = U / R, Il = U / Xl, Ic = U / Xc",
    "φ = arctan((Ic − Il) / Ir)",
    "cos φ = Ir / I",
    "P = U·Ir, S = U·I, Q = |U·(Ic − Il)|",
];

/// Human-readable breakdown of one solve.
pub struct Report<'a> {
    inputs: &'a CircuitInputs,
    result: &'a CircuitResult,
}

pub fn render(inputs: &CircuitInputs, result: &CircuitResult) -> String {
    Report { inputs, result }.to_string()
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        match r.topology {
            Topology::Series => writeln!(f, "--- Series circuit ---\n")?,
            Topology::Parallel => writeln!(f, "--- Parallel circuit ---\n")?,
        }

        writeln!(f, "Given values:")?;
        for field in Field::ALL {
            match self.inputs.get(field) {
                Quantity::Unknown => {}
                Quantity::Given(v) => writeln!(f, "  {field}: {}", format_value(v, field.unit()))?,
                Quantity::GivenAsReactance(v) => writeln!(
                    f,
                    "  {field}: {} (as reactance)",
                    format_value(v, UnitKind::Ohm)
                )?,
            }
        }

        writeln!(f, "\nFormulas used:")?;
        for step in &r.derivations {
            writeln!(f, "  • {}", step.rule.formula())?;
        }
        let closing = match r.topology {
            Topology::Series => SERIES_FORMULAS,
            Topology::Parallel => PARALLEL_FORMULAS,
        };
        for formula in closing {
            writeln!(f, "  • {formula}")?;
        }

        writeln!(f, "\nIntermediate values:")?;
        writeln!(f, "  Resistance (R): {}", format_optional(r.resistance, UnitKind::Ohm))?;
        writeln!(f, "  Inductance (L): {}", format_optional(r.inductance, UnitKind::Henry))?;
        writeln!(f, "  Capacitance (C): {}", format_optional(r.capacitance, UnitKind::Farad))?;
        writeln!(f, "  Inductive reactance (Xl): {}", format_value(r.inductive_reactance, UnitKind::Ohm))?;
        writeln!(f, "  Capacitive reactance (Xc): {}", format_value(r.capacitive_reactance, UnitKind::Ohm))?;
        match r.breakdown {
            Breakdown::Series { resistor_voltage, inductor_voltage, capacitor_voltage } => {
                writeln!(f, "  Voltage across R (Ur): {}", format_value(resistor_voltage, UnitKind::Volt))?;
                writeln!(f, "  Voltage across L (Ul): {}", format_value(inductor_voltage, UnitKind::Volt))?;
                writeln!(f, "  Voltage across C (Uc): {}", format_value(capacitor_voltage, UnitKind::Volt))?;
            }
            Breakdown::Parallel { resistor_current, inductor_current, capacitor_current } => {
                writeln!(f, "  Current through R (Ir): {}", format_value(resistor_current, UnitKind::Ampere))?;
                writeln!(f, "  Current through L (Il): {}", format_value(inductor_current, UnitKind::Ampere))?;
                writeln!(f, "  Current through C (Ic): {}", format_value(capacitor_current, UnitKind::Ampere))?;
            }
        }

        writeln!(f, "\nResults:")?;
        writeln!(f, "  Total impedance (Z): {}", format_value(r.impedance, UnitKind::Ohm))?;
        writeln!(f, "  Total current (I): {}", format_value(r.current, UnitKind::Ampere))?;
        writeln!(f, "  Voltage (U): {}", format_value(r.voltage, UnitKind::Volt))?;
        writeln!(f, "  Phase angle (φ): {:.3} °", r.phase_angle_deg)?;
        writeln!(f, "  Power factor (cos φ): {:.3}", r.power_factor)?;
        writeln!(f, "  Real power (P): {}", format_value(r.real_power, UnitKind::Watt))?;
        writeln!(f, "  Apparent power (S): {}", format_value(r.apparent_power, UnitKind::VoltAmpere))?;
        writeln!(f, "  Reactive power (Q): {}", format_value(r.reactive_power, UnitKind::VoltAmpereReactive))
    }
}
