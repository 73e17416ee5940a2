use std::fmt;

use crate::errors::ParseError;
use crate::units::{UnitKind, is_prefix_code, leading_prefix};

/// Input field a raw token was typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Voltage,
    Current,
    Frequency,
    Resistance,
    Capacitance,
    Inductance,
    Impedance,
    Power,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Voltage,
        Field::Current,
        Field::Frequency,
        Field::Resistance,
        Field::Capacitance,
        Field::Inductance,
        Field::Impedance,
        Field::Power,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Voltage => "voltage",
            Self::Current => "current",
            Self::Frequency => "frequency",
            Self::Resistance => "resistance",
            Self::Capacitance => "capacitance",
            Self::Inductance => "inductance",
            Self::Impedance => "impedance",
            Self::Power => "power",
        }
    }

    /// Natural unit of a plain value typed into this field.
    pub fn unit(self) -> UnitKind {
        match self {
            Self::Voltage => UnitKind::Volt,
            Self::Current => UnitKind::Ampere,
            Self::Frequency => UnitKind::Hertz,
            Self::Resistance | Self::Impedance => UnitKind::Ohm,
            Self::Capacitance => UnitKind::Farad,
            Self::Inductance => UnitKind::Henry,
            Self::Power => UnitKind::Watt,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a parsed magnitude stands for beyond the natural unit of its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoleHint {
    #[default]
    None,
    /// Already an inductive reactance in ohms.
    ReactanceL,
    /// Already a capacitive reactance in ohms.
    ReactanceC,
    /// Already the total impedance in ohms.
    Impedance,
    /// A real power in watts.
    Power,
}

impl RoleHint {
    fn from_suffix(c: char) -> Option<Self> {
        match c {
            'l' => Some(Self::ReactanceL),
            'c' => Some(Self::ReactanceC),
            'z' => Some(Self::Impedance),
            'w' | 's' | 'q' => Some(Self::Power),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParsedQuantity {
    pub magnitude: f64,
    pub role: RoleHint,
}

impl ParsedQuantity {
    pub const ABSENT: Self = Self { magnitude: 0.0, role: RoleHint::None };

    pub fn new(magnitude: f64, role: RoleHint) -> Self {
        Self { magnitude, role }
    }

    pub fn is_given(&self) -> bool {
        self.magnitude > 0.0
    }
}

/// Lenient parse: anything that is not a well-formed value reads as absent, and
/// whatever follows the leading number is taken as unit noise.
pub fn parse_value(raw: &str, field: Field) -> ParsedQuantity {
    scan(raw, field, false).unwrap_or(ParsedQuantity::ABSENT)
}

/// Parses `<number>[prefix][role][unit noise]`, e.g. `4.7k`, `10l`, `100 nF`, `2.2 kohm`.
///
/// Blank input is absent, not an error. Text without a leading number is an error, and
/// so is a number that carries on past where it can be read (`1e-3`, `1,5`, `10 2`).
pub fn try_parse_value(raw: &str, field: Field) -> Result<ParsedQuantity, ParseError> {
    scan(raw, field, true)
}

fn scan(raw: &str, field: Field, strict: bool) -> Result<ParsedQuantity, ParseError> {
    let input = raw.trim().to_lowercase();
    if input.is_empty() {
        return Ok(ParsedQuantity::ABSENT);
    }

    let suffix_start = input
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(input.len());

    let numeric_part = &input[..suffix_start];
    let decoration: String = input[suffix_start..]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let value: f64 = numeric_part.parse().map_err(|_| ParseError {
        field,
        input: raw.to_string(),
        message: format!("Invalid number: {numeric_part:?}"),
    })?;
    if strict && continues_number(&decoration) {
        return Err(ParseError {
            field,
            input: raw.to_string(),
            message: format!("Unexpected {decoration:?} after the number"),
        });
    }

    let (role, unit_part) = split_role(&decoration);
    let multiplier = leading_prefix(unit_part).map_or(1.0, |(_, m)| m);
    let magnitude = value * multiplier;

    if !magnitude.is_finite() {
        return Err(ParseError {
            field,
            input: raw.to_string(),
            message: "Value out of range".to_string(),
        });
    }
    if magnitude == 0.0 {
        return Ok(ParsedQuantity::ABSENT);
    }

    let role = match (role, field) {
        (RoleHint::None, Field::Impedance) => RoleHint::Impedance,
        (RoleHint::None, Field::Power) => RoleHint::Power,
        (role, _) => role,
    };
    Ok(ParsedQuantity::new(magnitude, role))
}

/// Splits a trailing role letter off the decoration. The letter only counts when
/// what precedes it is empty or a prefix code, so `ohms` keeps its `s`.
fn split_role(decoration: &str) -> (RoleHint, &str) {
    let mut chars = decoration.chars();
    match chars.next_back().and_then(RoleHint::from_suffix) {
        Some(role) if chars.as_str().is_empty() || is_prefix_code(chars.as_str()) => {
            (role, chars.as_str())
        }
        _ => (RoleHint::None, decoration),
    }
}

/// Digits, a decimal comma or an exponent right after the number.
fn continues_number(decoration: &str) -> bool {
    let mut chars = decoration.chars();
    match (chars.next(), chars.next()) {
        (Some(c), _) if c.is_ascii_digit() || c == ',' => true,
        (Some('e'), Some(c)) => c.is_ascii_digit() || c == '+' || c == '-',
        _ => false,
    }
}
