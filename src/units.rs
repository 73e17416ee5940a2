use std::f64::consts::PI;
use std::fmt;

use crate::errors::CircuitError;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Frequency(f64);

impl Frequency {
    pub fn new(hz: f64) -> Result<Self, CircuitError> {
        match hz > 0.0 && hz.is_finite() {
            true => Ok(Self(hz)),
            false => Err(CircuitError::InvalidFrequency(hz)),
        }
    }

    pub fn angular(self) -> AngularFrequency {
        AngularFrequency(2.0 * PI * self.0)
    }
}

impl From<Frequency> for f64 {
    fn from(value: Frequency) -> f64 {
        value.0
    }
}

/// ω = 2πf, always strictly positive when built from a [`Frequency`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AngularFrequency(f64);

impl From<AngularFrequency> for f64 {
    fn from(value: AngularFrequency) -> f64 {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Inductance(f64);

impl Inductance {
    pub fn new(l: f64) -> Result<Self, CircuitError> {
        match l > 0.0 && l.is_finite() {
            true => Ok(Self(l)),
            false => Err(CircuitError::InvalidValue { quantity: "inductance", value: l }),
        }
    }

    /// Xl = ωL
    pub fn reactance(self, omega: AngularFrequency) -> f64 {
        omega.0 * self.0
    }

    /// L = Xl / ω
    pub fn from_reactance(xl: f64, omega: AngularFrequency) -> Result<Self, CircuitError> {
        Self::new(xl / omega.0)
    }
}

impl From<Inductance> for f64 {
    fn from(value: Inductance) -> f64 {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Capacitance(f64);

impl Capacitance {
    pub fn new(c: f64) -> Result<Self, CircuitError> {
        match c > 0.0 && c.is_finite() {
            true => Ok(Self(c)),
            false => Err(CircuitError::InvalidValue { quantity: "capacitance", value: c }),
        }
    }

    /// Xc = 1 / (ωC)
    pub fn reactance(self, omega: AngularFrequency) -> f64 {
        1.0 / (omega.0 * self.0)
    }

    /// C = 1 / (ωXc)
    pub fn from_reactance(xc: f64, omega: AngularFrequency) -> Result<Self, CircuitError> {
        Self::new(1.0 / (omega.0 * xc))
    }
}

impl From<Capacitance> for f64 {
    fn from(value: Capacitance) -> f64 {
        value.0
    }
}

/// Physical unit of a rendered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Volt,
    Ampere,
    Hertz,
    Ohm,
    Henry,
    Farad,
    Watt,
    VoltAmpere,
    VoltAmpereReactive,
}

impl UnitKind {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Volt => "V",
            Self::Ampere => "A",
            Self::Hertz => "Hz",
            Self::Ohm => "Ω",
            Self::Henry => "H",
            Self::Farad => "F",
            Self::Watt => "W",
            Self::VoltAmpere => "VA",
            Self::VoltAmpereReactive => "var",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Display bands, descending. A value lands in the first band whose threshold it reaches.
pub const DISPLAY_PREFIXES: [(f64, &str); 8] = [
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
    (1e-3, "m"),
    (1e-6, "μ"),
    (1e-9, "n"),
    (1e-12, "p"),
];

/// Input prefix codes, lowercase. Multi-letter codes come first so `meg` wins over `m`.
pub const INPUT_PREFIXES: [(&str, f64); 10] = [
    ("meg", 1e6),
    ("t", 1e12),
    ("g", 1e9),
    ("k", 1e3),
    ("m", 1e-3),
    ("u", 1e-6),
    ("μ", 1e-6),
    ("µ", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
];

/// Returns the prefix code `decoration` starts with and its multiplier.
pub fn leading_prefix(decoration: &str) -> Option<(&'static str, f64)> {
    INPUT_PREFIXES
        .iter()
        .find(|(code, _)| decoration.starts_with(code))
        .copied()
}

pub fn is_prefix_code(code: &str) -> bool {
    INPUT_PREFIXES.iter().any(|(c, _)| *c == code)
}
