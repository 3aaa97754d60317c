use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::presets::{ProductionScale, RecipePreset};

/// Fresh yeast mass equivalent to one unit of dry yeast.
pub const FRESH_PER_DRY_YEAST: f64 = 3.0;

/// Yeast kind supported by the core.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum YeastKind {
    #[default]
    Dry,
    Fresh,
}

impl YeastKind {
    pub fn label(self) -> &'static str {
        match self {
            YeastKind::Dry => "Dry yeast",
            YeastKind::Fresh => "Fresh yeast",
        }
    }

    pub fn other(self) -> Self {
        match self {
            YeastKind::Dry => YeastKind::Fresh,
            YeastKind::Fresh => YeastKind::Dry,
        }
    }
}

/// Input for one evaluation of the engine.
///
/// Percentages are baker's percentages: relative to flour, flour being 100.
/// Missing fields in serialized form are filled from [`Default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeConfiguration {
    /// Number of dough balls.
    pub pizza_count: u32,
    /// Target mass of one ball in grams.
    pub ball_weight_g: f64,
    pub hydration_pct: f64,
    pub salt_pct: f64,
    /// Yeast percentage, expressed for `yeast_kind`.
    pub yeast_pct: f64,
    pub yeast_kind: YeastKind,
    pub oil_pct: f64,
    pub sugar_pct: f64,
    /// Inflate the target mass to cover bowl residue and scraps.
    pub include_process_loss: bool,
    pub ambient_temp_c: f64,
    pub flour_temp_c: f64,
    /// Base temperature of the mix-water heuristic.
    pub base_temp_c: f64,
    /// When the dough must be ready (local wall-clock time).
    #[serde(with = "hhmm")]
    pub serving_time: NaiveTime,
    /// Hours from mixing to serving.
    pub total_fermentation_hours: f64,
}

impl Default for RecipeConfiguration {
    fn default() -> Self {
        RecipeConfiguration {
            pizza_count: 4,
            ball_weight_g: 250.0,
            hydration_pct: 60.0,
            salt_pct: 3.0,
            yeast_pct: 0.1,
            yeast_kind: YeastKind::Dry,
            oil_pct: 0.0,
            sugar_pct: 0.0,
            include_process_loss: true,
            ambient_temp_c: 22.0,
            flour_temp_c: 21.0,
            base_temp_c: 60.0,
            serving_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
            total_fermentation_hours: 24.0,
        }
    }
}

impl RecipeConfiguration {
    /// Switches the yeast kind, converting the percentage so leavening stays equal.
    ///
    /// No rounding happens here: dry -> fresh -> dry gives back the original
    /// percentage up to a single floating-point error. Round for display only.
    pub fn with_yeast_kind(mut self, kind: YeastKind) -> Self {
        if kind == self.yeast_kind {
            return self;
        }
        self.yeast_pct = match kind {
            YeastKind::Fresh => self.yeast_pct * FRESH_PER_DRY_YEAST,
            YeastKind::Dry => self.yeast_pct / FRESH_PER_DRY_YEAST,
        };
        self.yeast_kind = kind;
        self
    }

    /// Overwrites the baker's percentages with those of a recipe style.
    ///
    /// The preset's yeast percentage is dry yeast; it is converted when the
    /// configuration currently works with fresh yeast.
    pub fn apply_recipe(self, preset: &RecipePreset) -> Self {
        let kind = self.yeast_kind;
        RecipeConfiguration {
            hydration_pct: preset.hydration_pct,
            salt_pct: preset.salt_pct,
            yeast_pct: preset.yeast_pct,
            yeast_kind: YeastKind::Dry,
            oil_pct: preset.oil_pct,
            sugar_pct: preset.sugar_pct,
            ..self
        }
        .with_yeast_kind(kind)
    }

    /// Overwrites ball count and weight with those of a production scale.
    pub fn apply_scale(self, scale: &ProductionScale) -> Self {
        RecipeConfiguration {
            pizza_count: scale.pizza_count,
            ball_weight_g: scale.ball_weight_g,
            ..self
        }
    }
}

/// `NaiveTime` as `"HH:MM"`; seconds are accepted on input.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(D::Error::custom)
    }
}
