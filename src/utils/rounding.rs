/// Round `value` to `decimals` decimal places.
///
/// The published airspeed, thrust, and fuel-flow relations are all
/// defined with fixed decimal precision in SI base units, so the same
/// rounding is applied after every model evaluation.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
