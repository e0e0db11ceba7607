use serde::Deserialize;

/// Normalization options for one input category (sticks or buttons).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryOptions {
    #[serde(default)]
    pub analog: Option<bool>,
    #[serde(default)]
    pub dead_zone: Option<f64>,
    #[serde(default)]
    pub precision: Option<u32>,
}

/// Raw listener options.
///
/// The flat keys apply to both sticks and buttons. When a `stick` or
/// `button` sub-object is present, the flat keys are ignored for that
/// category; the other category then resolves from pure defaults unless it
/// carries a sub-object of its own.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GamepadOptions {
    #[serde(default)]
    pub analog: Option<bool>,
    #[serde(default)]
    pub dead_zone: Option<f64>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub stick: Option<CategoryOptions>,
    #[serde(default)]
    pub button: Option<CategoryOptions>,
}

/// Resolved configuration for one category.
///
/// `precision` holds the rounding multiplier (`10^digits`), `0.0` meaning
/// rounding is disabled. `dead_zone` is already clamped to `[0, 1]`, so
/// nothing is re-validated per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryConfig {
    pub analog: bool,
    pub dead_zone: f64,
    pub precision: f64,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self { analog: true, dead_zone: 0.0, precision: 0.0 }
    }
}

/// Resolved listener options, one configuration per category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolvedOptions {
    pub stick: CategoryConfig,
    pub button: CategoryConfig,
}

impl GamepadOptions {
    fn flat(&self) -> CategoryOptions {
        CategoryOptions {
            analog: self.analog,
            dead_zone: self.dead_zone,
            precision: self.precision,
        }
    }

    /// Resolves the raw options into clamped per-category configuration.
    pub fn resolve(&self) -> ResolvedOptions {
        let stick = match (self.stick, self.button) {
            (Some(stick), _) => stick,
            (None, Some(_)) => CategoryOptions::default(),
            (None, None) => self.flat(),
        };
        let button = match (self.button, self.stick) {
            (Some(button), _) => button,
            (None, Some(_)) => CategoryOptions::default(),
            (None, None) => self.flat(),
        };
        ResolvedOptions {
            stick: resolve_category(stick),
            button: resolve_category(button),
        }
    }
}

fn resolve_category(source: CategoryOptions) -> CategoryConfig {
    let defaults = CategoryConfig::default();
    let dead_zone = source
        .dead_zone
        .unwrap_or(defaults.dead_zone)
        .clamp(0.0, 1.0);
    let precision = match source.precision.unwrap_or(0) {
        0 => 0.0,
        digits => 10f64.powi(digits as i32),
    };
    CategoryConfig {
        analog: source.analog.unwrap_or(defaults.analog),
        dead_zone,
        precision,
    }
}
