use std::fmt;

use chrono::NaiveDateTime;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, CellAlignment, ContentArrangement, Table};
use dough_core::{CalculationResult, RecipeConfiguration, fmt_pct};

/// Grams with at most one decimal, e.g. `631.5 g`, `18 g`.
pub fn fmt_g(x: f64) -> String {
    let v = (x * 10.0).round() / 10.0;
    if (v - v.round()).abs() < 1e-9 {
        format!("{:.0} g", v)
    } else {
        format!("{:.1} g", v)
    }
}

/// Kilograms for big batches; small amounts (yeast, salt) stay in grams.
fn fmt_mass(x: f64, use_kg: bool) -> String {
    if use_kg && x >= 1000.0 {
        format!("{:.2} kg", x / 1000.0)
    } else if x < 10.0 {
        format!("{:.2} g", x)
    } else {
        fmt_g(x)
    }
}

fn fmt_day_clock(t: NaiveDateTime) -> String {
    t.format("%H:%M (%a)").to_string()
}

pub fn ingredients_table(res: &CalculationResult) -> Table {
    let kg = res.use_kilograms();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Ingredient").add_attribute(Attribute::Bold),
            Cell::new("Amount").add_attribute(Attribute::Bold),
            Cell::new("%").add_attribute(Attribute::Bold),
            Cell::new("Notes").add_attribute(Attribute::Bold),
        ]);

    for row in &res.ingredients {
        table.add_row(vec![
            Cell::new(row.name),
            Cell::new(fmt_mass(row.mass_g, kg)).set_alignment(CellAlignment::Right),
            Cell::new(fmt_pct(row.percentage)).set_alignment(CellAlignment::Right),
            Cell::new(&row.note),
        ]);
    }
    table
}

/// Full terminal report: table, water temperature and schedule.
pub struct Report<'a> {
    cfg: &'a RecipeConfiguration,
    res: &'a CalculationResult,
    debug: bool,
}

pub fn report<'a>(
    cfg: &'a RecipeConfiguration,
    res: &'a CalculationResult,
    debug: bool,
) -> Report<'a> {
    Report { cfg, res, debug }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (cfg, res) = (self.cfg, self.res);
        let kg = res.use_kilograms();

        writeln!(f, "\n=== Ingredients summary ===")?;
        writeln!(
            f,
            "{} × {} g → {} total ({}%{})",
            cfg.pizza_count,
            cfg.ball_weight_g,
            fmt_mass(res.total_dough_g, kg),
            fmt_pct(res.total_percentage),
            if cfg.include_process_loss { ", +3% loss" } else { "" }
        )?;
        writeln!(f, "{}", ingredients_table(res))?;
        if let Some(note) = res.production_note() {
            writeln!(f, "⚠ {note}")?;
        }

        writeln!(f, "\n=== Water ===")?;
        writeln!(f, "- Volume:                  {:.0} ml", res.water_volume_ml)?;
        writeln!(f, "- Ideal temperature:       {:.1} °C", res.ideal_water_temp_c)?;
        if res.ideal_water_temp_c < 0.0 {
            writeln!(
                f,
                "  (below freezing: ambient and flour are too warm for this base temperature)"
            )?;
        }

        // Every step carries its weekday: a long or late ferment spans midnight.
        writeln!(f, "\n=== Timeline ===")?;
        writeln!(f, "- Start dough:             {}", fmt_day_clock(res.dough_start))?;
        writeln!(f, "- Out of the fridge:       {}", fmt_day_clock(res.cold_retrieval))?;
        writeln!(f, "- Serve:                   {}", fmt_day_clock(res.serving))?;
        writeln!(f, "- Total:                   {:.1} h", cfg.total_fermentation_hours)?;

        if self.debug {
            let fr = &res.fractions;
            writeln!(f, "\n=== Debug ===")?;
            writeln!(
                f,
                "hydration={} salt={} yeast={} oil={} sugar={} factor={}",
                fr.hydration, fr.salt, fr.yeast, fr.oil, fr.sugar, fr.scale_factor
            )?;
            writeln!(
                f,
                "flour={} dry_yeast={} fresh_yeast={}",
                res.flour_g, res.yeast.dry_g, res.yeast.fresh_g
            )?;
        }
        Ok(())
    }
}

/// Plain-text recipe card to paste into a chat or note.
pub fn share_text(label: &str, cfg: &RecipeConfiguration, res: &CalculationResult) -> String {
    format!(
        "🍕 {label}\n\
         Units: {} x {}g\n\
         Total: {:.2}kg\n\
         \n\
         Ingredients:\n\
         - Flour: {:.0}g\n\
         - Water: {:.0}g\n\
         - Salt: {:.1}g\n\
         - {}: {:.2}g\n\
         \n\
         Ideal water temp: {:.1}°C\n\
         Start: {}\n",
        cfg.pizza_count,
        cfg.ball_weight_g,
        res.total_dough_g / 1000.0,
        res.flour_g,
        res.water_g,
        res.salt_g,
        cfg.yeast_kind.label(),
        res.yeast_g(),
        res.ideal_water_temp_c,
        fmt_day_clock(res.dough_start),
    )
}
