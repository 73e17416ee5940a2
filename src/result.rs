use crate::rules::Derivation;
use crate::solver::Topology;
use crate::units::UnitKind;

/// Per-component split of the excitation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Breakdown {
    /// Voltage drops Ur, Ul, Uc across the series elements.
    Series {
        resistor_voltage: f64,
        inductor_voltage: f64,
        capacitor_voltage: f64,
    },
    /// Branch currents Ir, Il, Ic through the parallel elements.
    Parallel {
        resistor_current: f64,
        inductor_current: f64,
        capacitor_current: f64,
    },
}

/// Everything one solve computed. Absent components read as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitResult {
    pub topology: Topology,
    pub frequency: f64,
    pub voltage: f64,
    pub current: f64,
    pub impedance: f64,
    pub resistance: Option<f64>,
    pub inductance: Option<f64>,
    pub capacitance: Option<f64>,
    pub inductive_reactance: f64,
    pub capacitive_reactance: f64,
    /// Degrees. Series: voltage relative to current. Parallel: current relative to voltage.
    pub phase_angle_deg: f64,
    pub power_factor: f64,
    pub real_power: f64,
    pub apparent_power: f64,
    pub reactive_power: f64,
    pub breakdown: Breakdown,
    /// Rules fired while filling in unknowns, in order.
    pub derivations: Vec<Derivation>,
}

impl CircuitResult {
    /// Name → value view of the result, with the unit each value is rendered in.
    /// Dimensionless entries (phase, power factor) carry `None`.
    pub fn quantities(&self) -> Vec<(&'static str, f64, Option<UnitKind>)> {
        let mut out = vec![
            ("frequency", self.frequency, Some(UnitKind::Hertz)),
            ("voltage", self.voltage, Some(UnitKind::Volt)),
            ("current", self.current, Some(UnitKind::Ampere)),
            ("impedance", self.impedance, Some(UnitKind::Ohm)),
        ];
        if let Some(r) = self.resistance {
            out.push(("resistance", r, Some(UnitKind::Ohm)));
        }
        if let Some(l) = self.inductance {
            out.push(("inductance", l, Some(UnitKind::Henry)));
        }
        if let Some(c) = self.capacitance {
            out.push(("capacitance", c, Some(UnitKind::Farad)));
        }
        out.extend([
            ("reactance_l", self.inductive_reactance, Some(UnitKind::Ohm)),
            ("reactance_c", self.capacitive_reactance, Some(UnitKind::Ohm)),
        ]);
        match self.breakdown {
            Breakdown::Series { resistor_voltage, inductor_voltage, capacitor_voltage } => {
                out.extend([
                    ("voltage_r", resistor_voltage, Some(UnitKind::Volt)),
                    ("voltage_l", inductor_voltage, Some(UnitKind::Volt)),
                    ("voltage_c", capacitor_voltage, Some(UnitKind::Volt)),
                ]);
            }
            Breakdown::Parallel { resistor_current, inductor_current, capacitor_current } => {
                out.extend([
                    ("current_r", resistor_current, Some(UnitKind::Ampere)),
                    ("current_l", inductor_current, Some(UnitKind::Ampere)),
                    ("current_c", capacitor_current, Some(UnitKind::Ampere)),
                ]);
            }
        }
        out.extend([
            ("phase_angle_deg", self.phase_angle_deg, None),
            ("power_factor", self.power_factor, None),
            ("real_power", self.real_power, Some(UnitKind::Watt)),
            ("apparent_power", self.apparent_power, Some(UnitKind::VoltAmpere)),
            ("reactive_power", self.reactive_power, Some(UnitKind::VoltAmpereReactive)),
        ]);
        out
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.quantities()
            .into_iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, v, _)| v)
    }
}
