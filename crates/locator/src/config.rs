//! Injected locator configuration.
//!
//! Defaults describe the Tecnopuc campus. Any value can be overridden from
//! `LOCATOR_*` environment variables or a JSON document.

use foundation::{Coordinate, GeoBounds};
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_SNAP_FRACTIONS: [f64; 3] = [0.10, 0.40, 0.85];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid snap fractions {fractions:?}: {reason}")]
    InvalidSnapFractions {
        fractions: Vec<f64>,
        reason: &'static str,
    },
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub api_base_url: String,
    /// Fixed start of every route.
    pub entry_position: Coordinate,
    /// Campus rectangle; only used to pick a diagnostic message.
    pub geofence: GeoBounds,
    /// Viewport-height ratios the panel rests at, ascending.
    pub snap_fractions: Vec<f64>,
    /// Extra height above the smallest snap before page scroll is locked.
    pub scroll_lock_margin_px: f64,
    pub snap_animation_ms: u32,
    pub map_center: Coordinate,
    /// Gap between the panel top and the recenter control.
    pub recenter_margin_px: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            entry_position: Coordinate::new(-30.059762130905092, -51.171838045120246),
            geofence: GeoBounds::new(
                Coordinate::new(-30.063, -51.175),
                Coordinate::new(-30.057, -51.169),
            ),
            snap_fractions: DEFAULT_SNAP_FRACTIONS.to_vec(),
            scroll_lock_margin_px: 5.0,
            snap_animation_ms: 300,
            map_center: Coordinate::new(-30.059103, -51.170969),
            recenter_margin_px: 16.0,
        }
    }
}

impl LocatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Overlays values found through `lookup` on the defaults.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("LOCATOR_API_BASE_URL") {
            config.api_base_url = url;
        }
        config.entry_position.lat =
            lookup_number(&lookup, "LOCATOR_ENTRY_LAT", config.entry_position.lat);
        config.entry_position.lng =
            lookup_number(&lookup, "LOCATOR_ENTRY_LNG", config.entry_position.lng);
        if let Some(v) = lookup_list(&lookup, "LOCATOR_GEOFENCE") {
            if let [south, west, north, east] = v[..] {
                config.geofence =
                    GeoBounds::new(Coordinate::new(south, west), Coordinate::new(north, east));
            } else {
                tracing::warn!("LOCATOR_GEOFENCE needs south,west,north,east; ignoring");
            }
        }
        if let Some(v) = lookup_list(&lookup, "LOCATOR_SNAP_FRACTIONS") {
            config.snap_fractions = v;
        }
        config.scroll_lock_margin_px = lookup_number(
            &lookup,
            "LOCATOR_SCROLL_LOCK_MARGIN_PX",
            config.scroll_lock_margin_px,
        );
        config.snap_animation_ms = lookup_number(
            &lookup,
            "LOCATOR_SNAP_ANIMATION_MS",
            config.snap_animation_ms,
        );
        config.recenter_margin_px =
            lookup_number(&lookup, "LOCATOR_RECENTER_MARGIN_PX", config.recenter_margin_px);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidSnapFractions {
            fractions: self.snap_fractions.clone(),
            reason,
        };
        if self.snap_fractions.is_empty() {
            return Err(invalid("at least one snap fraction is required"));
        }
        if self
            .snap_fractions
            .iter()
            .any(|f| !f.is_finite() || *f <= 0.0 || *f > 1.0)
        {
            return Err(invalid("fractions must lie in (0, 1]"));
        }
        if self.snap_fractions.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("fractions must be strictly ascending"));
        }
        Ok(())
    }
}

fn lookup_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, raw = %raw, "ignoring unparsable number");
            default
        }),
        None => default,
    }
}

fn lookup_list(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Vec<f64>> {
    let raw = lookup(key)?;
    let parsed: Result<Vec<f64>, _> = raw.split(',').map(|s| s.trim().parse::<f64>()).collect();
    match parsed {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, raw = %raw, "ignoring unparsable list");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, LocatorConfig};
    use foundation::Coordinate;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let c = LocatorConfig::default();
        c.validate().unwrap();
        assert_eq!(c.snap_fractions, vec![0.10, 0.40, 0.85]);
        assert!(c.geofence.contains(c.entry_position));
    }

    #[test]
    fn env_overrides_apply() {
        let c = LocatorConfig::from_lookup(lookup(&[
            ("LOCATOR_API_BASE_URL", "https://maps.example/api"),
            ("LOCATOR_SNAP_FRACTIONS", "0.2, 0.5, 0.9"),
            ("LOCATOR_ENTRY_LAT", "-30.1"),
            ("LOCATOR_GEOFENCE", "-31,-52,-30,-51"),
            ("LOCATOR_SNAP_ANIMATION_MS", "150"),
        ]))
        .unwrap();
        assert_eq!(c.api_base_url, "https://maps.example/api");
        assert_eq!(c.snap_fractions, vec![0.2, 0.5, 0.9]);
        assert_eq!(c.entry_position.lat, -30.1);
        assert!(c.geofence.contains(Coordinate::new(-30.5, -51.5)));
        assert_eq!(c.snap_animation_ms, 150);
    }

    #[test]
    fn unparsable_values_keep_defaults() {
        let c = LocatorConfig::from_lookup(lookup(&[
            ("LOCATOR_ENTRY_LNG", "west"),
            ("LOCATOR_SNAP_FRACTIONS", "a,b"),
        ]))
        .unwrap();
        assert_eq!(c, LocatorConfig::default());
    }

    #[test]
    fn unparsable_animation_duration_keeps_default() {
        for raw in ["fast", "-1", "300ms", "4294967296"] {
            let c =
                LocatorConfig::from_lookup(lookup(&[("LOCATOR_SNAP_ANIMATION_MS", raw)])).unwrap();
            assert_eq!(c.snap_animation_ms, 300, "{raw}");
        }
        let c = LocatorConfig::from_lookup(lookup(&[("LOCATOR_SNAP_ANIMATION_MS", " 0 ")])).unwrap();
        assert_eq!(c.snap_animation_ms, 0);
    }

    #[test]
    fn rejects_bad_snap_fractions() {
        for bad in ["[]", "[0.5, 0.4]", "[0.0, 0.5]", "[0.5, 1.5]"] {
            let json = format!(r#"{{"snap_fractions": {bad}}}"#);
            let err = LocatorConfig::from_json_str(&json).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSnapFractions { .. }), "{bad}");
        }
    }

    #[test]
    fn json_document_fills_missing_fields_from_defaults() {
        let c = LocatorConfig::from_json_str(r#"{"api_base_url": "http://10.0.0.2/api"}"#).unwrap();
        assert_eq!(c.api_base_url, "http://10.0.0.2/api");
        assert_eq!(c.recenter_margin_px, 16.0);
        assert!(matches!(
            LocatorConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
