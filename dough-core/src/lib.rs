//! Baker's-percentage dough calculation.
//!
//! [`compute_on`] maps a [`RecipeConfiguration`] to a [`CalculationResult`]:
//! ingredient masses, the ideal mixing-water temperature and the
//! fermentation schedule. It keeps no state and does no I/O.

mod config;
mod error;
pub mod presets;

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;

pub use config::{FRESH_PER_DRY_YEAST, RecipeConfiguration, YeastKind};
pub use error::InvalidConfiguration;
pub use presets::{ProductionScale, RecipePreset};

/// Target mass multiplier covering bowl residue, bench scraps and divider waste.
pub const PROCESS_LOSS_FACTOR: f64 = 1.03;
/// Dough leaves the fridge this many hours before serving.
pub const COLD_RETRIEVAL_LEAD_HOURS: f64 = 3.0;
/// Hydration (in %) above which the result carries a handling note.
pub const HIGH_HYDRATION_PCT: f64 = 75.0;
/// Flour mass from which masses read better in kilograms.
pub const KILOGRAM_DISPLAY_THRESHOLD_G: f64 = 1000.0;

/// Ingredient of the dough table.
#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Ingredient {
    Flour,
    Water,
    Salt,
    Yeast(YeastKind),
    Oil,
    Sugar,
}

impl Ingredient {
    pub fn name(self) -> &'static str {
        match self {
            Ingredient::Flour => "Flour",
            Ingredient::Water => "Water",
            Ingredient::Salt => "Salt",
            Ingredient::Yeast(kind) => kind.label(),
            Ingredient::Oil => "Oil",
            Ingredient::Sugar => "Sugar",
        }
    }
}

/// One row of the ingredient table.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct IngredientRow {
    pub ingredient: Ingredient,
    pub name: &'static str,
    pub mass_g: f64,
    /// Baker's percentage (flour = 100).
    pub percentage: f64,
    pub note: String,
}

/// Both yeast representations, derived from the same fraction.
#[derive(Copy, Clone, Debug, Serialize, PartialEq)]
pub struct YeastMass {
    pub dry_g: f64,
    pub fresh_g: f64,
}

impl YeastMass {
    /// `native_g` is the mass of `kind` implied by the configured percentage.
    fn derive(native_g: f64, kind: YeastKind) -> Self {
        match kind {
            YeastKind::Dry => YeastMass {
                dry_g: native_g,
                fresh_g: native_g * FRESH_PER_DRY_YEAST,
            },
            YeastKind::Fresh => YeastMass {
                dry_g: native_g / FRESH_PER_DRY_YEAST,
                fresh_g: native_g,
            },
        }
    }

    pub fn for_kind(&self, kind: YeastKind) -> f64 {
        match kind {
            YeastKind::Dry => self.dry_g,
            YeastKind::Fresh => self.fresh_g,
        }
    }
}

/// Percentages as fractions of flour, plus the resulting total multiplier.
#[derive(Copy, Clone, Debug, Serialize, PartialEq)]
pub struct BakersFractions {
    pub hydration: f64,
    pub salt: f64,
    pub yeast: f64,
    pub oil: f64,
    pub sugar: f64,
    /// `1 + sum of the above`: dough mass over flour mass.
    pub scale_factor: f64,
}

impl BakersFractions {
    fn from_config(cfg: &RecipeConfiguration) -> Self {
        let hydration = cfg.hydration_pct / 100.0;
        let salt = cfg.salt_pct / 100.0;
        let yeast = cfg.yeast_pct / 100.0;
        let oil = cfg.oil_pct / 100.0;
        let sugar = cfg.sugar_pct / 100.0;
        BakersFractions {
            hydration,
            salt,
            yeast,
            oil,
            sugar,
            scale_factor: 1.0 + hydration + salt + yeast + oil + sugar,
        }
    }
}

/// Everything derived from one configuration.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CalculationResult {
    pub yeast_kind: YeastKind,
    pub hydration_pct: f64,
    /// Finished dough mass, loss included when requested.
    pub total_dough_g: f64,
    /// `100 + every other percentage`.
    pub total_percentage: f64,
    pub fractions: BakersFractions,
    pub flour_g: f64,
    pub water_g: f64,
    pub water_volume_ml: f64,
    pub salt_g: f64,
    pub yeast: YeastMass,
    pub oil_g: f64,
    pub sugar_g: f64,
    /// May be negative or implausible; never clamped.
    pub ideal_water_temp_c: f64,
    pub serving: NaiveDateTime,
    pub dough_start: NaiveDateTime,
    pub cold_retrieval: NaiveDateTime,
    pub ingredients: Vec<IngredientRow>,
}

impl CalculationResult {
    /// Yeast mass for the configured kind.
    pub fn yeast_g(&self) -> f64 {
        self.yeast.for_kind(self.yeast_kind)
    }

    pub fn use_kilograms(&self) -> bool {
        self.flour_g >= KILOGRAM_DISPLAY_THRESHOLD_G
    }

    pub fn production_note(&self) -> Option<&'static str> {
        (self.hydration_pct > HIGH_HYDRATION_PCT).then_some("High hydration")
    }
}

fn finite(field: &'static str, v: f64) -> Result<f64, InvalidConfiguration> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(InvalidConfiguration::NonFinite { field })
    }
}

fn validate(cfg: &RecipeConfiguration) -> Result<(), InvalidConfiguration> {
    finite("ball_weight_g", cfg.ball_weight_g)?;
    finite("hydration_pct", cfg.hydration_pct)?;
    finite("salt_pct", cfg.salt_pct)?;
    finite("yeast_pct", cfg.yeast_pct)?;
    finite("oil_pct", cfg.oil_pct)?;
    finite("sugar_pct", cfg.sugar_pct)?;
    finite("ambient_temp_c", cfg.ambient_temp_c)?;
    finite("flour_temp_c", cfg.flour_temp_c)?;
    finite("base_temp_c", cfg.base_temp_c)?;
    finite("total_fermentation_hours", cfg.total_fermentation_hours)?;

    if cfg.pizza_count == 0 {
        return Err(InvalidConfiguration::ZeroPizzaCount);
    }
    if cfg.ball_weight_g <= 0.0 {
        return Err(InvalidConfiguration::NonPositiveBallWeight(cfg.ball_weight_g));
    }
    if cfg.total_fermentation_hours < 0.0 {
        return Err(InvalidConfiguration::NegativeFermentation(
            cfg.total_fermentation_hours,
        ));
    }
    Ok(())
}

/// `at` minus a fractional number of hours, to the second.
fn hours_before(at: NaiveDateTime, hours: f64) -> Result<NaiveDateTime, InvalidConfiguration> {
    let secs = (hours * 3600.0).round() as i64;
    TimeDelta::try_seconds(secs)
        .and_then(|d| at.checked_sub_signed(d))
        .ok_or(InvalidConfiguration::ScheduleOutOfRange)
}

/// Percentage for display: at most three decimals, trailing zeros trimmed.
///
/// `0.30000000000000004` prints as `0.3`, `60.0` as `60`.
pub fn fmt_pct(pct: f64) -> String {
    let s = format!("{pct:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn pct_note(pct: f64) -> String {
    format!("{}%", fmt_pct(pct))
}

/// Evaluates `cfg` with the schedule anchored to today's local date.
pub fn compute(cfg: &RecipeConfiguration) -> Result<CalculationResult, InvalidConfiguration> {
    compute_on(cfg, Local::now().date_naive())
}

/// Evaluates `cfg` with the serving time falling on `serving_date`.
///
/// - dough = flour × (1 + hydration + salt + yeast + oil + sugar)
/// - the process-loss factor inflates the finished mass, not any ingredient
/// - dry and fresh yeast are both derived from the configured fraction
pub fn compute_on(
    cfg: &RecipeConfiguration,
    serving_date: NaiveDate,
) -> Result<CalculationResult, InvalidConfiguration> {
    validate(cfg)?;

    let mut total_dough = cfg.pizza_count as f64 * cfg.ball_weight_g;
    if cfg.include_process_loss {
        total_dough *= PROCESS_LOSS_FACTOR;
    }

    // T_water = T_base - (T_flour + T_ambient)
    let ideal_water_temp = cfg.base_temp_c - (cfg.flour_temp_c + cfg.ambient_temp_c);

    let fr = BakersFractions::from_config(cfg);
    if fr.scale_factor <= 0.0 || !fr.scale_factor.is_finite() {
        return Err(InvalidConfiguration::NonPositiveScaleFactor(fr.scale_factor));
    }

    let flour = total_dough / fr.scale_factor;
    let water = flour * fr.hydration;
    let salt = flour * fr.salt;
    let oil = flour * fr.oil;
    let sugar = flour * fr.sugar;
    let yeast = YeastMass::derive(flour * fr.yeast, cfg.yeast_kind);

    let mut ingredients = vec![
        IngredientRow {
            ingredient: Ingredient::Flour,
            name: Ingredient::Flour.name(),
            mass_g: flour,
            percentage: 100.0,
            note: "Base".to_string(),
        },
        IngredientRow {
            ingredient: Ingredient::Water,
            name: Ingredient::Water.name(),
            mass_g: water,
            percentage: cfg.hydration_pct,
            note: pct_note(cfg.hydration_pct),
        },
        IngredientRow {
            ingredient: Ingredient::Salt,
            name: Ingredient::Salt.name(),
            mass_g: salt,
            percentage: cfg.salt_pct,
            note: pct_note(cfg.salt_pct),
        },
        IngredientRow {
            ingredient: Ingredient::Yeast(cfg.yeast_kind),
            name: cfg.yeast_kind.label(),
            mass_g: yeast.for_kind(cfg.yeast_kind),
            percentage: cfg.yeast_pct,
            note: match cfg.yeast_kind {
                YeastKind::Dry => "DRY",
                YeastKind::Fresh => "FRESH",
            }
            .to_string(),
        },
    ];
    if fr.oil > 0.0 {
        ingredients.push(IngredientRow {
            ingredient: Ingredient::Oil,
            name: Ingredient::Oil.name(),
            mass_g: oil,
            percentage: cfg.oil_pct,
            note: pct_note(cfg.oil_pct),
        });
    }
    if fr.sugar > 0.0 {
        ingredients.push(IngredientRow {
            ingredient: Ingredient::Sugar,
            name: Ingredient::Sugar.name(),
            mass_g: sugar,
            percentage: cfg.sugar_pct,
            note: pct_note(cfg.sugar_pct),
        });
    }

    // Full date-time arithmetic so a long ferment lands on an earlier day.
    let serving = serving_date.and_time(cfg.serving_time);
    let dough_start = hours_before(serving, cfg.total_fermentation_hours)?;
    let cold_retrieval = hours_before(serving, COLD_RETRIEVAL_LEAD_HOURS)?;

    Ok(CalculationResult {
        yeast_kind: cfg.yeast_kind,
        hydration_pct: cfg.hydration_pct,
        total_dough_g: total_dough,
        total_percentage: 100.0
            + cfg.hydration_pct
            + cfg.salt_pct
            + cfg.yeast_pct
            + cfg.oil_pct
            + cfg.sugar_pct,
        fractions: fr,
        flour_g: flour,
        water_g: water,
        water_volume_ml: water,
        salt_g: salt,
        yeast,
        oil_g: oil,
        sugar_g: sugar,
        ideal_water_temp_c: ideal_water_temp,
        serving,
        dough_start,
        cold_retrieval,
        ingredients,
    })
}

/* ===========================
Unit tests
=========================== */

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveTime;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn napoli() -> RecipeConfiguration {
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
            ..Default::default()
        }
    }

    #[test]
    fn test_napoli_reference_batch() {
        let out = compute_on(&napoli(), day()).unwrap();
        assert_relative_eq!(out.total_dough_g, 1030.0, epsilon = 1e-9);
        assert_relative_eq!(out.fractions.scale_factor, 1.631, epsilon = 1e-12);
        assert_relative_eq!(out.flour_g, 1030.0 / 1.631, epsilon = 1e-9);
        assert_relative_eq!(out.flour_g, 631.51, epsilon = 0.01);
        assert_relative_eq!(out.water_g, 378.91, epsilon = 0.01);
        assert_relative_eq!(out.salt_g, 18.95, epsilon = 0.01);
        assert_relative_eq!(out.yeast.dry_g, 0.6315, epsilon = 1e-3);
        assert_relative_eq!(out.yeast.fresh_g, 1.8945, epsilon = 1e-3);
        assert_relative_eq!(out.total_percentage, 163.1, epsilon = 1e-9);
        assert_relative_eq!(out.water_volume_ml, out.water_g);
        assert!(!out.use_kilograms());
        assert_eq!(out.production_note(), None);
    }

    #[test]
    fn test_masses_sum_to_total() {
        let presets = presets::RECIPE_PRESETS;
        for preset in presets {
            for kind in [YeastKind::Dry, YeastKind::Fresh] {
                let cfg = napoli().apply_recipe(preset).with_yeast_kind(kind);
                let out = compute_on(&cfg, day()).unwrap();
                let sum = out.flour_g + out.water_g + out.salt_g + out.oil_g + out.sugar_g
                    + out.yeast_g();
                assert_relative_eq!(sum, out.total_dough_g, epsilon = 1e-9);

                let table_sum: f64 = out.ingredients.iter().map(|r| r.mass_g).sum();
                assert_relative_eq!(table_sum, out.total_dough_g, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_fresh_is_three_times_dry() {
        for kind in [YeastKind::Dry, YeastKind::Fresh] {
            let cfg = RecipeConfiguration {
                yeast_kind: kind,
                yeast_pct: 0.37,
                ..napoli()
            };
            let out = compute_on(&cfg, day()).unwrap();
            assert_relative_eq!(out.yeast.fresh_g, out.yeast.dry_g * 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_switching_kind_keeps_leavening() {
        let dry = compute_on(&napoli(), day()).unwrap();
        let fresh_cfg = napoli().with_yeast_kind(YeastKind::Fresh);
        let fresh = compute_on(&fresh_cfg, day()).unwrap();
        // Fresh yeast is heavier, so flour shifts slightly; per-flour ratio is what holds.
        assert_relative_eq!(
            fresh.yeast.dry_g / fresh.flour_g,
            dry.yeast.dry_g / dry.flour_g,
            epsilon = 1e-12
        );
        let back = fresh_cfg.with_yeast_kind(YeastKind::Dry);
        assert_relative_eq!(back.yeast_pct, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_process_loss_is_three_percent() {
        let with = compute_on(&napoli(), day()).unwrap();
        let without = compute_on(
            &RecipeConfiguration {
                include_process_loss: false,
                ..napoli()
            },
            day(),
        )
        .unwrap();
        assert_relative_eq!(without.total_dough_g, 1000.0);
        assert_relative_eq!(with.total_dough_g, without.total_dough_g * 1.03, epsilon = 1e-9);
    }

    #[test]
    fn test_table_rows() {
        let out = compute_on(&napoli(), day()).unwrap();
        let names: Vec<_> = out.ingredients.iter().map(|r| r.name).collect();
        assert_eq!(names, ["Flour", "Water", "Salt", "Dry yeast"]);
        assert_eq!(out.ingredients[0].note, "Base");
        assert_eq!(out.ingredients[1].note, "60%");
        assert_eq!(out.ingredients[3].note, "DRY");

        let cfg = RecipeConfiguration {
            oil_pct: 2.0,
            sugar_pct: 1.5,
            ..napoli().with_yeast_kind(YeastKind::Fresh)
        };
        let out = compute_on(&cfg, day()).unwrap();
        assert_eq!(out.ingredients.len(), 6);
        assert_eq!(out.ingredients[3].ingredient, Ingredient::Yeast(YeastKind::Fresh));
        assert_eq!(out.ingredients[3].name, "Fresh yeast");
        assert_eq!(out.ingredients[4].ingredient, Ingredient::Oil);
        assert_eq!(out.ingredients[5].note, "1.5%");

        let only_sugar = RecipeConfiguration {
            sugar_pct: 2.0,
            ..napoli()
        };
        let out = compute_on(&only_sugar, day()).unwrap();
        assert_eq!(out.ingredients.len(), 5);
        assert_eq!(out.ingredients[4].ingredient, Ingredient::Sugar);
    }

    #[test]
    fn test_water_temp_not_clamped() {
        let cfg = RecipeConfiguration {
            ambient_temp_c: 35.0,
            flour_temp_c: 30.0,
            base_temp_c: 55.0,
            ..napoli()
        };
        let out = compute_on(&cfg, day()).unwrap();
        assert_relative_eq!(out.ideal_water_temp_c, -10.0);

        let out = compute_on(&napoli(), day()).unwrap();
        assert_relative_eq!(out.ideal_water_temp_c, 17.0);
    }

    #[test]
    fn test_schedule_crosses_midnight() {
        let out = compute_on(&napoli(), day()).unwrap();
        let prev = day().pred_opt().unwrap();
        assert_eq!(out.serving, at(day(), 20, 0));
        assert_eq!(out.dough_start, at(prev, 20, 0));
        assert_eq!(out.cold_retrieval, at(day(), 17, 0));

        let cfg = RecipeConfiguration {
            serving_time: NaiveTime::from_hms_opt(1, 30, 0).unwrap(),
            total_fermentation_hours: 6.5,
            ..napoli()
        };
        let out = compute_on(&cfg, day()).unwrap();
        assert_eq!(out.dough_start, at(prev, 19, 0));
        assert_eq!(out.cold_retrieval, at(prev, 22, 30));

        let same_time = RecipeConfiguration {
            total_fermentation_hours: 0.0,
            ..napoli()
        };
        let out = compute_on(&same_time, day()).unwrap();
        assert_eq!(out.dough_start, out.serving);
    }

    #[test]
    fn test_non_positive_scale_factor_rejected() {
        let cfg = RecipeConfiguration {
            hydration_pct: -100.0,
            salt_pct: 0.0,
            yeast_pct: 0.0,
            ..napoli()
        };
        let err = compute_on(&cfg, day()).unwrap_err();
        assert!(matches!(err, InvalidConfiguration::NonPositiveScaleFactor(f) if f <= 0.0));

        let cfg = RecipeConfiguration {
            hydration_pct: -150.0,
            ..napoli()
        };
        assert!(matches!(
            compute_on(&cfg, day()),
            Err(InvalidConfiguration::NonPositiveScaleFactor(_))
        ));
    }

    #[test]
    fn test_invalid_mass_inputs_fail_fast() {
        let zero = RecipeConfiguration {
            pizza_count: 0,
            ..napoli()
        };
        assert_eq!(
            compute_on(&zero, day()),
            Err(InvalidConfiguration::ZeroPizzaCount)
        );

        let neg = RecipeConfiguration {
            ball_weight_g: -1.0,
            ..napoli()
        };
        assert_eq!(
            compute_on(&neg, day()),
            Err(InvalidConfiguration::NonPositiveBallWeight(-1.0))
        );

        let nan = RecipeConfiguration {
            salt_pct: f64::NAN,
            ..napoli()
        };
        assert_eq!(
            compute_on(&nan, day()),
            Err(InvalidConfiguration::NonFinite { field: "salt_pct" })
        );

        let back_in_time = RecipeConfiguration {
            total_fermentation_hours: -2.0,
            ..napoli()
        };
        assert_eq!(
            compute_on(&back_in_time, day()),
            Err(InvalidConfiguration::NegativeFermentation(-2.0))
        );

        let forever = RecipeConfiguration {
            total_fermentation_hours: 1e300,
            ..napoli()
        };
        assert_eq!(
            compute_on(&forever, day()),
            Err(InvalidConfiguration::ScheduleOutOfRange)
        );
    }

    #[test]
    fn test_fmt_pct_trims_float_noise() {
        assert_eq!(fmt_pct(0.1 * 3.0), "0.3");
        assert_eq!(fmt_pct(0.3 / 3.0), "0.1");
        assert_eq!(fmt_pct(60.0), "60");
        assert_eq!(fmt_pct(2.8), "2.8");
        assert_eq!(fmt_pct(163.1), "163.1");
        assert_eq!(fmt_pct(0.125), "0.125");
        assert_eq!(fmt_pct(-0.0001), "0");
    }

    #[test]
    fn test_notes_after_yeast_switch() {
        let cfg = RecipeConfiguration {
            oil_pct: 0.1 * 3.0,
            ..napoli().with_yeast_kind(YeastKind::Fresh)
        };
        let out = compute_on(&cfg, day()).unwrap();
        assert_eq!(out.ingredients[4].note, "0.3%");
    }

    #[test]
    fn test_large_batch_notes() {
        let cfg = RecipeConfiguration {
            hydration_pct: 80.0,
            ..napoli().apply_scale(presets::production_scale("unit-b").unwrap())
        };
        let out = compute_on(&cfg, day()).unwrap();
        assert!(out.use_kilograms());
        assert_eq!(out.production_note(), Some("High hydration"));
    }
}
