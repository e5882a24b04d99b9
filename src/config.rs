use log::Level;

use crate::error::ConfigError;

/// Fraction of the remaining distance the smoothed pointer covers each frame.
pub const DEFAULT_EASING: f64 = 0.6;

/// Page-level knobs for the effect.
///
/// Everything has a sensible default; the hosting page can override a subset
/// through `data-*` attributes on the canvas element (see
/// [`EffectConfig::with_overrides`]).
#[derive(Debug, Clone, PartialEq)]
pub struct EffectConfig {
    pub canvas_selector: String,
    pub page_selector: String,
    pub switch_selector: String,
    pub vertex_shader_id: String,
    pub fragment_shader_id: String,
    pub easing: f64,
    /// Text color applied while the transparency mode is on.
    pub transparent_text_color: String,
    /// Text color applied while the transparency mode is off.
    pub opaque_text_color: String,
    pub log_level: Level,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            canvas_selector: "#ring_shape-canvas".into(),
            page_selector: ".page".into(),
            switch_selector: "#transparency-switch".into(),
            vertex_shader_id: "vertShader".into(),
            fragment_shader_id: "fragShader".into(),
            easing: DEFAULT_EASING,
            transparent_text_color: "#333333".into(),
            opaque_text_color: "#eeeeee".into(),
            log_level: Level::Info,
        }
    }
}

impl EffectConfig {
    /// Applies `data-*` overrides fetched through `attr`.
    ///
    /// Each bad value is skipped (the default stays) and returned alongside the
    /// config so the caller can report it once logging is up.
    pub fn with_overrides<F>(mut self, attr: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();

        if let Some(raw) = attr("data-easing") {
            match parse_easing(&raw) {
                Ok(easing) => self.easing = easing,
                Err(e) => rejected.push(e),
            }
        }
        if let Some(raw) = attr("data-log-level") {
            match parse_level(&raw) {
                Ok(level) => self.log_level = level,
                Err(e) => rejected.push(e),
            }
        }
        for (key, slot) in [
            ("data-transparent-color", &mut self.transparent_text_color),
            ("data-opaque-color", &mut self.opaque_text_color),
        ] {
            if let Some(raw) = attr(key) {
                let raw = raw.trim();
                if raw.is_empty() {
                    rejected.push(ConfigError::Empty { key });
                } else {
                    *slot = raw.to_string();
                }
            }
        }

        (self, rejected)
    }
}

fn parse_easing(raw: &str) -> Result<f64, ConfigError> {
    let value: f64 = raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        key: "data-easing",
        value: raw.to_string(),
    })?;
    if !(value > 0.0 && value <= 1.0) {
        return Err(ConfigError::EasingOutOfRange(value));
    }
    Ok(value)
}

fn parse_level(raw: &str) -> Result<Level, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "error" => Ok(Level::Error),
        "warn" => Ok(Level::Warn),
        "info" => Ok(Level::Info),
        "debug" => Ok(Level::Debug),
        "trace" => Ok(Level::Trace),
        _ => Err(ConfigError::UnknownLogLevel(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_hosting_page() {
        let cfg = EffectConfig::default();
        assert_eq!(cfg.easing, 0.6);
        assert_eq!(cfg.transparent_text_color, "#333333");
        assert_eq!(cfg.opaque_text_color, "#eeeeee");
        assert_eq!(cfg.canvas_selector, "#ring_shape-canvas");
    }

    #[test]
    fn no_attributes_keeps_defaults() {
        let (cfg, rejected) = EffectConfig::default().with_overrides(attrs(&[]));
        assert_eq!(cfg, EffectConfig::default());
        assert!(rejected.is_empty());
    }

    #[test]
    fn valid_overrides_apply() {
        let (cfg, rejected) = EffectConfig::default().with_overrides(attrs(&[
            ("data-easing", "0.25"),
            ("data-log-level", "DEBUG"),
            ("data-opaque-color", " #fff "),
        ]));
        assert!(rejected.is_empty());
        assert_eq!(cfg.easing, 0.25);
        assert_eq!(cfg.log_level, Level::Debug);
        assert_eq!(cfg.opaque_text_color, "#fff");
        assert_eq!(cfg.transparent_text_color, "#333333");
    }

    #[test]
    fn bad_overrides_are_reported_and_skipped() {
        let (cfg, rejected) = EffectConfig::default().with_overrides(attrs(&[
            ("data-easing", "1.5"),
            ("data-log-level", "loud"),
            ("data-transparent-color", "  "),
        ]));
        assert_eq!(cfg, EffectConfig::default());
        assert_eq!(
            rejected,
            vec![
                ConfigError::EasingOutOfRange(1.5),
                ConfigError::UnknownLogLevel("loud".into()),
                ConfigError::Empty {
                    key: "data-transparent-color"
                },
            ]
        );
    }

    #[test]
    fn easing_must_be_numeric_and_positive() {
        assert!(matches!(
            parse_easing("fast"),
            Err(ConfigError::NotANumber { .. })
        ));
        assert_eq!(parse_easing("0"), Err(ConfigError::EasingOutOfRange(0.0)));
        assert_eq!(parse_easing("1"), Ok(1.0));
    }
}
