use crate::units::{DISPLAY_PREFIXES, UnitKind};

/// Rendered in place of values that could not be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Renders `value` with three decimals and an SI display prefix, e.g. `4.500 mV`.
///
/// Magnitudes below 1e-12 collapse to `0.000 <unit>`. Non-finite values render as
/// [`NOT_AVAILABLE`].
pub fn format_value(value: f64, unit: UnitKind) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let magnitude = value.abs();
    let Some(band) = DISPLAY_PREFIXES.iter().position(|(threshold, _)| magnitude >= *threshold)
    else {
        return format!("{:.3} {unit}", 0.0);
    };
    // A mantissa that rounds to 1000.000 moves up one band.
    let band = match band > 0 && (magnitude / DISPLAY_PREFIXES[band].0 * 1e3).round() >= 1e6 {
        true => band - 1,
        false => band,
    };
    let (scale, prefix) = DISPLAY_PREFIXES[band];
    format!("{:.3} {prefix}{unit}", value / scale)
}

pub fn format_optional(value: Option<f64>, unit: UnitKind) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format_value(v, unit))
}
