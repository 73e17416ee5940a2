use crate::errors::{CircuitError, ParseError};
use crate::parser::{Field, ParsedQuantity, RoleHint, parse_value, try_parse_value};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Quantity {
    #[default]
    Unknown,
    /// Given in the natural unit of its slot (V, A, Hz, Ω, F, H, Ω, W).
    Given(f64),
    /// Inductance or capacitance supplied directly as its reactance in ohms.
    GivenAsReactance(f64),
}

impl Quantity {
    pub fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn is_given(self) -> bool {
        !self.is_unknown()
    }
}

/// The raw text of the eight input fields, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInputs {
    pub voltage: String,
    pub current: String,
    pub frequency: String,
    pub resistance: String,
    pub capacitance: String,
    pub inductance: String,
    pub impedance: String,
    pub power: String,
}

impl RawInputs {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Voltage => &self.voltage,
            Field::Current => &self.current,
            Field::Frequency => &self.frequency,
            Field::Resistance => &self.resistance,
            Field::Capacitance => &self.capacitance,
            Field::Inductance => &self.inductance,
            Field::Impedance => &self.impedance,
            Field::Power => &self.power,
        }
    }

    pub fn parse_all(&self) -> Vec<(Field, ParsedQuantity)> {
        Field::ALL
            .iter()
            .map(|&field| (field, parse_value(self.get(field), field)))
            .collect()
    }

    pub fn try_parse_all(&self) -> Result<Vec<(Field, ParsedQuantity)>, ParseError> {
        Field::ALL
            .iter()
            .map(|&field| Ok((field, try_parse_value(self.get(field), field)?)))
            .collect()
    }
}

/// Normalized quantity set consumed by one solve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CircuitInputs {
    pub voltage: Quantity,
    pub current: Quantity,
    pub frequency: Quantity,
    pub resistance: Quantity,
    pub capacitance: Quantity,
    pub inductance: Quantity,
    pub impedance: Quantity,
    pub power: Quantity,
}

impl CircuitInputs {
    /// Routes each parsed token to the slot its role names. A reactance suffix sends
    /// the value to the inductance or capacitance slot, `z` to impedance, a power
    /// suffix to power. Two tokens landing in the same slot is a contradiction.
    pub fn from_parsed(
        parsed: impl IntoIterator<Item = (Field, ParsedQuantity)>,
    ) -> Result<Self, CircuitError> {
        let mut inputs = Self::default();
        let mut origins: [Option<Field>; 8] = [None; 8];

        for (field, quantity) in parsed {
            if !quantity.is_given() {
                continue;
            }
            let (target, value) = match quantity.role {
                RoleHint::None => (field, Quantity::Given(quantity.magnitude)),
                RoleHint::ReactanceL => (Field::Inductance, Quantity::GivenAsReactance(quantity.magnitude)),
                RoleHint::ReactanceC => (Field::Capacitance, Quantity::GivenAsReactance(quantity.magnitude)),
                RoleHint::Impedance => (Field::Impedance, Quantity::Given(quantity.magnitude)),
                RoleHint::Power => (Field::Power, Quantity::Given(quantity.magnitude)),
            };

            if let Some(previous) = origins[target as usize] {
                return Err(CircuitError::contradiction(format!(
                    "{target} supplied by both the {previous} and {field} fields"
                )));
            }
            origins[target as usize] = Some(field);
            *inputs.slot_mut(target) = value;
        }
        Ok(inputs)
    }

    pub fn parse(raw: &RawInputs) -> Result<Self, CircuitError> {
        Self::from_parsed(raw.parse_all())
    }

    pub fn get(&self, field: Field) -> Quantity {
        match field {
            Field::Voltage => self.voltage,
            Field::Current => self.current,
            Field::Frequency => self.frequency,
            Field::Resistance => self.resistance,
            Field::Capacitance => self.capacitance,
            Field::Inductance => self.inductance,
            Field::Impedance => self.impedance,
            Field::Power => self.power,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Quantity {
        match field {
            Field::Voltage => &mut self.voltage,
            Field::Current => &mut self.current,
            Field::Frequency => &mut self.frequency,
            Field::Resistance => &mut self.resistance,
            Field::Capacitance => &mut self.capacitance,
            Field::Inductance => &mut self.inductance,
            Field::Impedance => &mut self.impedance,
            Field::Power => &mut self.power,
        }
    }
}
