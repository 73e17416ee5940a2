/// strategies.rs
use proptest::prelude::*;
use rlc_solve::inputs::{CircuitInputs, Quantity};

/// Resistances across the range a bench calculator sees
pub fn resistance_strategy() -> impl Strategy<Value = f64> {
    1.0_f64..1e5_f64
}

pub fn inductance_strategy() -> impl Strategy<Value = f64> {
    1e-6_f64..10.0_f64
}

pub fn capacitance_strategy() -> impl Strategy<Value = f64> {
    1e-9_f64..1e-3_f64
}

pub fn frequency_strategy() -> impl Strategy<Value = f64> {
    1.0_f64..1e5_f64
}

pub fn voltage_strategy() -> impl Strategy<Value = f64> {
    0.1_f64..1e3_f64
}

/// Tokens shaped like what users type: number, optional prefix, role letter and unit noise
pub fn value_token_strategy() -> impl Strategy<Value = String> {
    "[0-9]{0,4}(\\.[0-9]{0,3})? ?(k|m|u|n|p|meg|K|M|U|N|P|μ)?(l|c|z|w|s|q|L|C|Z|W)?(ohm|f|h|v|F|H)?"
}

/// Anything at all, including text that is not a number
pub fn arbitrary_token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![value_token_strategy().boxed(), "\\PC{0,16}".boxed()]
}

fn given_or_not(value: impl Strategy<Value = f64>) -> impl Strategy<Value = Quantity> {
    prop_oneof![Just(Quantity::Unknown), value.prop_map(Quantity::Given)]
}

/// L or C in natural units, as a reactance, or absent
fn reactive_component(natural: impl Strategy<Value = f64>) -> impl Strategy<Value = Quantity> {
    prop_oneof![
        Just(Quantity::Unknown),
        natural.prop_map(Quantity::Given),
        (1.0_f64..1e4_f64).prop_map(Quantity::GivenAsReactance),
    ]
}

/// Any mix of components, impedance and power behind a single voltage or current
pub fn circuit_inputs_strategy() -> impl Strategy<Value = CircuitInputs> {
    (
        any::<bool>(),
        voltage_strategy(),
        given_or_not(resistance_strategy()),
        reactive_component(inductance_strategy()),
        reactive_component(capacitance_strategy()),
        given_or_not(resistance_strategy()),
        given_or_not(1e-3_f64..1e3_f64),
        frequency_strategy(),
    )
        .prop_map(|(voltage_driven, level, resistance, inductance, capacitance, impedance, power, hz)| {
            let (voltage, current) = match voltage_driven {
                true => (Quantity::Given(level), Quantity::Unknown),
                false => (Quantity::Unknown, Quantity::Given(level / 100.0)),
            };
            CircuitInputs {
                voltage,
                current,
                frequency: Quantity::Given(hz),
                resistance,
                capacitance,
                inductance,
                impedance,
                power,
            }
        })
}
