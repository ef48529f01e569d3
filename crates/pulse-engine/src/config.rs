//! Host configuration.
//!
//! The only knob the scheduling core has is the downscale factor. Front-ends
//! build a [`HostConfig`] from their defaults and may let the environment
//! override it.

use std::num::NonZeroU32;

use crate::error::HostError;

/// Environment variable consulted by [`HostConfig::from_env`].
pub const DOWNSCALE_ENV: &str = "PULSE_DOWNSCALE";

/// Divisor applied to observed layout sizes before they become the render
/// resolution. Always `>= 1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DownscaleFactor(NonZeroU32);

impl DownscaleFactor {
    /// No downscaling.
    pub const NONE: Self = Self(NonZeroU32::MIN);

    pub fn new(value: u32) -> Result<Self, HostError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or_else(|| HostError::InvalidDownscale { value: value.to_string() })
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0.get())
    }
}

impl Default for DownscaleFactor {
    fn default() -> Self {
        Self::NONE
    }
}

impl std::str::FromStr for DownscaleFactor {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HostError::InvalidDownscale { value: s.to_string() };
        let value: u32 = s.trim().parse().map_err(|_| invalid())?;
        Self::new(value).map_err(|_| invalid())
    }
}

/// Configuration consumed by [`crate::host::Host::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostConfig {
    pub downscale: DownscaleFactor,
}

impl HostConfig {
    pub fn with_downscale(downscale: DownscaleFactor) -> Self {
        Self { downscale }
    }

    /// Applies overrides from the process environment on top of `defaults`.
    pub fn from_env(defaults: Self) -> Result<Self, HostError> {
        Self::from_lookup(defaults, |key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup` on top of `defaults`.
    pub fn from_lookup<F>(defaults: Self, lookup: F) -> Result<Self, HostError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = defaults;
        if let Some(raw) = lookup(DOWNSCALE_ENV) {
            config.downscale = raw.parse()?;
            log::debug!("downscale overridden from {DOWNSCALE_ENV}: {}", config.downscale.get());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_factor_is_rejected() {
        assert_eq!(
            DownscaleFactor::new(0),
            Err(HostError::InvalidDownscale { value: "0".into() })
        );
    }

    #[test]
    fn default_factor_is_one() {
        assert_eq!(DownscaleFactor::default().get(), 1);
        assert_eq!(HostConfig::default().downscale, DownscaleFactor::NONE);
    }

    #[test]
    fn parses_positive_integers() {
        assert_eq!(" 3 ".parse::<DownscaleFactor>().unwrap().get(), 3);
        assert!("0".parse::<DownscaleFactor>().is_err());
        assert!("-2".parse::<DownscaleFactor>().is_err());
        assert!("1.5".parse::<DownscaleFactor>().is_err());
        assert!("fast".parse::<DownscaleFactor>().is_err());
    }

    #[test]
    fn lookup_without_override_keeps_defaults() {
        let defaults = HostConfig::with_downscale(DownscaleFactor::new(3).unwrap());
        let config = HostConfig::from_lookup(defaults.clone(), |_| None).unwrap();
        assert_eq!(config, defaults);
    }

    #[test]
    fn lookup_override_replaces_downscale() {
        let config = HostConfig::from_lookup(HostConfig::default(), |key| {
            (key == DOWNSCALE_ENV).then(|| "4".to_string())
        })
        .unwrap();
        assert_eq!(config.downscale.get(), 4);
    }

    #[test]
    fn lookup_rejects_bad_override() {
        let err = HostConfig::from_lookup(HostConfig::default(), |_| Some("zero".into())).unwrap_err();
        assert_eq!(err, HostError::InvalidDownscale { value: "zero".into() });
    }
}
