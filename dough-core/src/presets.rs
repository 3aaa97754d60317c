//! Named recipe styles and production scales.
//!
//! These are partial configurations; a caller merges them with
//! [`RecipeConfiguration::apply_recipe`](crate::RecipeConfiguration::apply_recipe)
//! and [`RecipeConfiguration::apply_scale`](crate::RecipeConfiguration::apply_scale).

use serde::Serialize;

/// Baker's percentages of a recipe style.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct RecipePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub hydration_pct: f64,
    pub salt_pct: f64,
    pub yeast_pct: f64,
    pub oil_pct: f64,
    pub sugar_pct: f64,
}

/// Batch size bundle: how many balls and how heavy.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ProductionScale {
    pub id: &'static str,
    pub name: &'static str,
    pub pizza_count: u32,
    pub ball_weight_g: f64,
    pub description: &'static str,
    pub notes: &'static str,
}

pub const RECIPE_PRESETS: &[RecipePreset] = &[
    RecipePreset {
        id: "napoli-avpn",
        name: "Neapolitan (AVPN)",
        hydration_pct: 60.0,
        salt_pct: 3.0,
        yeast_pct: 0.1,
        oil_pct: 0.0,
        sugar_pct: 0.0,
    },
    RecipePreset {
        id: "napoli-contemporary",
        name: "Contemporary Neapolitan",
        hydration_pct: 70.0,
        salt_pct: 2.8,
        yeast_pct: 0.2,
        oil_pct: 0.0,
        sugar_pct: 0.0,
    },
    RecipePreset {
        id: "roman",
        name: "Roman",
        hydration_pct: 56.0,
        salt_pct: 2.5,
        yeast_pct: 0.2,
        oil_pct: 3.0,
        sugar_pct: 0.0,
    },
    RecipePreset {
        id: "new-york",
        name: "New York Style",
        hydration_pct: 62.0,
        salt_pct: 2.0,
        yeast_pct: 0.4,
        oil_pct: 2.0,
        sugar_pct: 2.0,
    },
    RecipePreset {
        id: "detroit-chicago",
        name: "Detroit/Chicago",
        hydration_pct: 70.0,
        salt_pct: 2.5,
        yeast_pct: 0.5,
        oil_pct: 4.0,
        sugar_pct: 0.0,
    },
];

pub const PRODUCTION_SCALES: &[ProductionScale] = &[
    ProductionScale {
        id: "artisanal",
        name: "Artisanal",
        pizza_count: 4,
        ball_weight_g: 250.0,
        description: "Small batch",
        notes: "Test and refine your recipe",
    },
    ProductionScale {
        id: "unit-a",
        name: "Unit A",
        pizza_count: 45,
        ball_weight_g: 250.0,
        description: "Medium scale (~45 balls)",
        notes: "Check mixer capacity",
    },
    ProductionScale {
        id: "unit-b",
        name: "Unit B",
        pizza_count: 300,
        ball_weight_g: 250.0,
        description: "Large scale (~300 balls)",
        notes: "Check silo and mixer capacity",
    },
];

/// Looks up a recipe style by id, ignoring ASCII case.
pub fn recipe_preset(id: &str) -> Option<&'static RecipePreset> {
    RECIPE_PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// Looks up a production scale by id, ignoring ASCII case.
pub fn production_scale(id: &str) -> Option<&'static ProductionScale> {
    PRODUCTION_SCALES.iter().find(|s| s.id.eq_ignore_ascii_case(id))
}
