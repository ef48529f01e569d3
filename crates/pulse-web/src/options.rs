use pulse_engine::config::DownscaleFactor;
use pulse_engine::HostError;

/// Validates a downscale factor handed over from JS.
///
/// JS numbers are doubles; only finite positive integers are accepted.
/// `undefined`/`NaN` arrive as NaN and are rejected like any other bad value.
pub fn downscale_from_js(value: f64) -> Result<DownscaleFactor, HostError> {
    let invalid = || HostError::InvalidDownscale { value: value.to_string() };
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > f64::from(u32::MAX) {
        return Err(invalid());
    }
    DownscaleFactor::new(value as u32).map_err(|_| invalid())
}
