use proptest::prelude::*;
use rlc_solve::inputs::{CircuitInputs, Quantity};
use rlc_solve::rules::Rule;
use rlc_solve::{Breakdown, CircuitError, Topology, solve};

mod common;
use common::*;
use common::strategies::*;

#[test]
fn worked_example_rl() {
    // U = 10 V, R = 100 Ω, L = 0.1 H, f = 60 Hz, no capacitor.
    let result = solve_ok(&rlc(10.0, 100.0, 0.1, 0.0, 60.0), Topology::Series);

    assert_close(result.inductive_reactance, 37.699, EPSILON_QUOTED);
    assert_eq!(result.capacitive_reactance, 0.0);
    assert_close(result.impedance, 106.84, EPSILON_QUOTED);
    assert_close(result.current, 0.09360, EPSILON_QUOTED);
    assert_close(result.phase_angle_deg, 20.66, EPSILON_QUOTED);
    assert_eq!(result.capacitance, None);
    assert_eq!(result.voltage, 10.0);
}

#[test]
fn voltage_drops_and_powers() {
    let result = solve_ok(&rlc(10.0, 100.0, 0.1, 0.0, 60.0), Topology::Series);
    let i = result.current;

    let Breakdown::Series { resistor_voltage, inductor_voltage, capacitor_voltage } = result.breakdown
    else {
        panic!("series result without series breakdown");
    };
    assert_close(resistor_voltage, i * 100.0, EPSILON_STRICT);
    assert_close(inductor_voltage, i * result.inductive_reactance, EPSILON_STRICT);
    assert_eq!(capacitor_voltage, 0.0);

    assert_close(result.power_factor, 100.0 / result.impedance, EPSILON_STRICT);
    assert_close(result.real_power, i * i * 100.0, EPSILON_STRICT);
    assert_close(result.apparent_power, 10.0 * i, EPSILON_STRICT);
    assert_close(result.reactive_power, i * i * result.inductive_reactance, EPSILON_STRICT);
}

#[test]
fn capacitive_circuit_has_negative_phase() {
    let result = solve_ok(&rlc(10.0, 100.0, 0.0, 10e-6, 50.0), Topology::Series);
    assert_close(result.capacitive_reactance, 1.0 / (omega(50.0) * 10e-6), EPSILON_PHYSICAL);
    assert!(result.phase_angle_deg < 0.0);
}

#[test]
fn pure_reactance_sits_at_ninety_degrees() {
    let inductive = solve_ok(&rlc(10.0, 0.0, 0.1, 0.0, 50.0), Topology::Series);
    assert_eq!(inductive.phase_angle_deg, 90.0);
    assert_eq!(inductive.power_factor, 0.0);
    assert_eq!(inductive.real_power, 0.0);

    let capacitive = solve_ok(&rlc(10.0, 0.0, 0.0, 1e-6, 50.0), Topology::Series);
    assert_eq!(capacitive.phase_angle_deg, -90.0);
}

#[test]
fn resonance_is_purely_resistive() {
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        resistance: Quantity::Given(50.0),
        inductance: Quantity::GivenAsReactance(80.0),
        capacitance: Quantity::GivenAsReactance(80.0),
        ..at_frequency(1000.0)
    };
    let result = solve_ok(&inputs, Topology::Series);
    assert_eq!(result.phase_angle_deg, 0.0);
    assert_close(result.impedance, 50.0, EPSILON_STRICT);
    assert_close(result.power_factor, 1.0, EPSILON_STRICT);
    assert_close(result.reactive_power, 0.0, EPSILON_STRICT);
}

#[test]
fn current_driven_circuit_derives_voltage() {
    let inputs = CircuitInputs {
        current: Quantity::Given(0.5),
        ..rlc(0.0, 30.0, 0.0, 0.0, 50.0)
    };
    let inputs = CircuitInputs { inductance: Quantity::GivenAsReactance(40.0), ..inputs };
    let result = solve_ok(&inputs, Topology::Series);
    assert_close(result.impedance, 50.0, EPSILON_STRICT);
    assert_close(result.voltage, 25.0, EPSILON_STRICT);
    assert!(result.derivations.iter().any(|d| d.rule == Rule::VoltageFromCurrent));
}

#[test]
fn reactance_input_back_derives_the_component() {
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        inductance: Quantity::GivenAsReactance(100.0),
        ..at_frequency(50.0)
    };
    let result = solve_ok(&inputs, Topology::Series);
    assert_close(result.inductance.unwrap(), 100.0 / omega(50.0), EPSILON_PHYSICAL);
    assert_eq!(result.derivations[0].rule, Rule::InductanceFromReactance);
}

#[test]
fn impedance_with_resistance_recovers_an_inductive_reactance() {
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        resistance: Quantity::Given(30.0),
        impedance: Quantity::Given(50.0),
        ..at_frequency(50.0)
    };
    let result = solve_ok(&inputs, Topology::Series);
    assert_close(result.inductive_reactance, 40.0, EPSILON_PHYSICAL);
    assert_close(result.inductance.unwrap(), 40.0 / omega(50.0), EPSILON_PHYSICAL);
    assert_close(result.current, 0.2, EPSILON_STRICT);
    assert!(result.phase_angle_deg > 0.0);
}

#[test]
fn impedance_with_reactance_recovers_resistance() {
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        capacitance: Quantity::GivenAsReactance(40.0),
        impedance: Quantity::Given(50.0),
        ..at_frequency(50.0)
    };
    let result = solve_ok(&inputs, Topology::Series);
    assert_close(result.resistance.unwrap(), 30.0, EPSILON_PHYSICAL);
    assert!(result.phase_angle_deg < 0.0);
}

#[test]
fn impedance_below_resistance_contradicts() {
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        resistance: Quantity::Given(100.0),
        impedance: Quantity::Given(50.0),
        ..at_frequency(50.0)
    };
    let err = solve_err(&inputs, Topology::Series);
    assert!(matches!(err, CircuitError::Contradiction(_)), "{err}");
}

#[test]
fn impedance_below_resistance_contradicts_with_a_reactance_given() {
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        resistance: Quantity::Given(100.0),
        inductance: Quantity::GivenAsReactance(40.0),
        impedance: Quantity::Given(50.0),
        ..at_frequency(50.0)
    };
    let err = solve_err(&inputs, Topology::Series);
    assert!(matches!(err, CircuitError::Contradiction(_)), "{err}");
}

#[test]
fn impedance_with_resistance_and_inductor_adds_the_capacitor() {
    // R = 30 and Xl = 10 alone give 31.6 Ω; Z = 50 needs |Xl − Xc| = 40.
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        resistance: Quantity::Given(30.0),
        inductance: Quantity::GivenAsReactance(10.0),
        impedance: Quantity::Given(50.0),
        ..at_frequency(50.0)
    };
    let result = solve_ok(&inputs, Topology::Series);

    assert_close(result.capacitive_reactance, 50.0, EPSILON_PHYSICAL);
    assert_close(result.capacitance.unwrap(), 1.0 / (omega(50.0) * 50.0), EPSILON_PHYSICAL);
    assert_close(result.current, 0.2, EPSILON_STRICT);
    assert_close(result.phase_angle_deg, -53.130, EPSILON_QUOTED);
    assert_close(result.power_factor, 0.6, EPSILON_PHYSICAL);
    assert_close(result.power_factor, result.phase_angle_deg.to_radians().cos(), EPSILON_PHYSICAL);
    assert!(result.derivations.iter().any(|d| d.rule == Rule::SeriesMissingReactance));
}

#[test]
fn impedance_already_explained_by_the_branches_adds_nothing() {
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        resistance: Quantity::Given(30.0),
        inductance: Quantity::GivenAsReactance(40.0),
        impedance: Quantity::Given(50.02),
        ..at_frequency(50.0)
    };
    let result = solve_ok(&inputs, Topology::Series);
    assert_eq!(result.capacitance, None);
    assert_eq!(result.capacitive_reactance, 0.0);
}

#[test]
fn impedance_disagreeing_with_every_branch_contradicts() {
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        resistance: Quantity::Given(30.0),
        inductance: Quantity::GivenAsReactance(40.0),
        capacitance: Quantity::GivenAsReactance(10.0),
        impedance: Quantity::Given(60.0),
        ..at_frequency(50.0)
    };
    let err = solve_err(&inputs, Topology::Series);
    assert!(matches!(err, CircuitError::Contradiction(_)), "{err}");
}

#[test]
fn resistance_from_power_is_checked_against_impedance() {
    // I = 10/50 = 0.2 A, so R = 4 / 0.04 = 100 Ω, more than Z.
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        power: Quantity::Given(4.0),
        inductance: Quantity::GivenAsReactance(40.0),
        capacitance: Quantity::GivenAsReactance(10.0),
        impedance: Quantity::Given(50.0),
        ..at_frequency(50.0)
    };
    let err = solve_err(&inputs, Topology::Series);
    assert!(matches!(err, CircuitError::Contradiction(_)), "{err}");
}

#[test]
fn redundant_current_is_rederived_from_impedance() {
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        current: Quantity::Given(0.3),
        resistance: Quantity::Given(50.0),
        impedance: Quantity::Given(50.0),
        ..at_frequency(50.0)
    };
    let result = solve_ok(&inputs, Topology::Series);
    assert_close(result.current, 0.2, EPSILON_STRICT);
}

#[test]
fn power_and_current_give_resistance() {
    let inputs = CircuitInputs {
        current: Quantity::Given(2.0),
        power: Quantity::Given(40.0),
        inductance: Quantity::GivenAsReactance(10.0),
        ..at_frequency(50.0)
    };
    let result = solve_ok(&inputs, Topology::Series);
    assert_close(result.resistance.unwrap(), 10.0, EPSILON_STRICT);
    assert_close(result.real_power, 40.0, EPSILON_PHYSICAL);
    assert_close(result.voltage, 2.0 * 200f64.sqrt(), EPSILON_PHYSICAL);
}

#[test]
fn power_and_resistance_give_current() {
    let inputs = CircuitInputs {
        resistance: Quantity::Given(10.0),
        power: Quantity::Given(250.0),
        ..at_frequency(50.0)
    };
    let result = solve_ok(&inputs, Topology::Series);
    assert_close(result.current, 5.0, EPSILON_STRICT);
    assert_close(result.voltage, 50.0, EPSILON_STRICT);
}

#[test]
fn power_and_voltage_give_resistance() {
    // U = 10 V, Xl = 30 Ω, P = 1 W: R² − 100·R + 900 = 0, roots 90 Ω and 10 Ω.
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        power: Quantity::Given(1.0),
        inductance: Quantity::GivenAsReactance(30.0),
        ..at_frequency(50.0)
    };
    let result = solve_ok(&inputs, Topology::Series);
    assert_close(result.resistance.unwrap(), 90.0, EPSILON_PHYSICAL);
    assert_close(result.real_power, 1.0, EPSILON_PHYSICAL);
}

#[test]
fn unreachable_power_contradicts() {
    // At most U² / (2·X) = 100 / 60 W can be dissipated through 30 Ω of reactance.
    let inputs = CircuitInputs {
        voltage: Quantity::Given(10.0),
        power: Quantity::Given(5.0),
        inductance: Quantity::GivenAsReactance(30.0),
        ..at_frequency(50.0)
    };
    let err = solve_err(&inputs, Topology::Series);
    assert!(matches!(err, CircuitError::Contradiction(_)), "{err}");
}

proptest! {

#[test]
fn prop_impedance_matches_closed_form(
    r in resistance_strategy(),
    l in inductance_strategy(),
    c in capacitance_strategy(),
    f in frequency_strategy(),
) {
    let result = solve_ok(&rlc(1.0, r, l, c, f), Topology::Series);
    let w = omega(f);
    let expected = (r * r + (w * l - 1.0 / (w * c)).powi(2)).sqrt();
    prop_assert!((result.impedance - expected).abs() <= EPSILON_PHYSICAL * expected);
}

#[test]
fn prop_reactance_inputs_match_natural_units(
    r in resistance_strategy(),
    l in inductance_strategy(),
    c in capacitance_strategy(),
    f in frequency_strategy(),
) {
    let natural = solve_ok(&rlc(1.0, r, l, c, f), Topology::Series);
    let as_reactance = CircuitInputs {
        inductance: Quantity::GivenAsReactance(natural.inductive_reactance),
        capacitance: Quantity::GivenAsReactance(natural.capacitive_reactance),
        ..rlc(1.0, r, 0.0, 0.0, f)
    };
    let direct = solve_ok(&as_reactance, Topology::Series);

    prop_assert!((direct.impedance - natural.impedance).abs() <= EPSILON_PHYSICAL * natural.impedance);
    prop_assert!((direct.inductance.unwrap() - l).abs() <= EPSILON_PHYSICAL * l);
    prop_assert!((direct.capacitance.unwrap() - c).abs() <= EPSILON_PHYSICAL * c);
}

#[test]
fn prop_phase_sign_follows_dominant_reactance(
    r in resistance_strategy(),
    xl in 1.0_f64..1e4_f64,
    xc in 1.0_f64..1e4_f64,
) {
    prop_assume!((xl - xc).abs() > 1e-6);
    let inputs = CircuitInputs {
        voltage: Quantity::Given(1.0),
        resistance: Quantity::Given(r),
        inductance: Quantity::GivenAsReactance(xl),
        capacitance: Quantity::GivenAsReactance(xc),
        ..at_frequency(50.0)
    };
    let result = solve_ok(&inputs, Topology::Series);
    prop_assert_eq!(result.phase_angle_deg > 0.0, xl > xc);
    prop_assert!(result.phase_angle_deg.abs() < 90.0);
}

#[test]
fn prop_voltage_drops_close_the_loop(
    u in voltage_strategy(),
    r in resistance_strategy(),
    l in inductance_strategy(),
    c in capacitance_strategy(),
    f in frequency_strategy(),
) {
    let result = solve_ok(&rlc(u, r, l, c, f), Topology::Series);
    let Breakdown::Series { resistor_voltage, inductor_voltage, capacitor_voltage } = result.breakdown
    else {
        return Err(TestCaseError::fail("series result without series breakdown"));
    };
    let phasor_sum = resistor_voltage.hypot(inductor_voltage - capacitor_voltage);
    prop_assert!((phasor_sum - u).abs() <= EPSILON_PHYSICAL * u);
}

#[test]
fn prop_power_triangle(
    u in voltage_strategy(),
    r in resistance_strategy(),
    l in inductance_strategy(),
    c in capacitance_strategy(),
    f in frequency_strategy(),
) {
    let result = solve_ok(&rlc(u, r, l, c, f), Topology::Series);
    let s = result.real_power.hypot(result.reactive_power);
    prop_assert!((s - result.apparent_power).abs() <= EPSILON_PHYSICAL * result.apparent_power);
    prop_assert!(result.power_factor <= 1.0);
}

#[test]
fn prop_any_series_solution_is_self_consistent(inputs in circuit_inputs_strategy()) {
    if let Ok(result) = solve(&inputs, Topology::Series) {
        let cos_phi = result.phase_angle_deg.to_radians().cos();
        prop_assert!((result.power_factor - cos_phi).abs() < 2e-3, "{result:?}");
        prop_assert!(result.real_power <= result.apparent_power * (1.0 + EPSILON_PHYSICAL), "{result:?}");
    }
}

}
