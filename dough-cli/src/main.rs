mod render;
mod state;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveTime;
use clap::{Parser, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use dough_core::{
    RecipeConfiguration, YeastKind, compute,
    presets::{PRODUCTION_SCALES, RECIPE_PRESETS, production_scale, recipe_preset},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Yeast CLI enum mirrors dough-core (derive for Clap).
#[derive(Copy, Clone, Debug, ValueEnum)]
enum YeastFlag {
    Dry,
    Fresh,
}

impl From<YeastFlag> for YeastKind {
    fn from(y: YeastFlag) -> Self {
        match y {
            YeastFlag::Dry => YeastKind::Dry,
            YeastFlag::Fresh => YeastKind::Fresh,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    /// Short text to copy into a message
    Share,
}

fn parse_hhmm(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM ({e})"))
}

/// Every recipe flag is optional: unset flags keep the stored value.
#[derive(Parser, Debug)]
#[command(
    name = "dough",
    about = "Pizza dough calculator: baker's percentages, water temperature & schedule.",
    version
)]
struct Args {
    /// Production scale preset (see --list-presets)
    #[arg(long)]
    scale: Option<String>,

    /// Recipe style preset (see --list-presets)
    #[arg(long)]
    preset: Option<String>,

    /// Number of dough balls
    #[arg(long)]
    balls: Option<u32>,

    /// Dough ball weight in grams
    #[arg(long)]
    ball_weight: Option<f64>,

    /// Hydration in % of flour
    #[arg(long)]
    hydration: Option<f64>,

    /// Salt in % of flour
    #[arg(long)]
    salt: Option<f64>,

    /// Yeast type; switching converts the current percentage (fresh = 3× dry)
    #[arg(long, value_enum)]
    yeast: Option<YeastFlag>,

    /// Switch between dry and fresh yeast, converting the current percentage
    #[arg(long, conflicts_with = "yeast")]
    toggle_yeast: bool,

    /// Yeast in % of flour, for the selected yeast type
    #[arg(long)]
    yeast_pct: Option<f64>,

    /// Oil in % of flour
    #[arg(long)]
    oil: Option<f64>,

    /// Sugar in % of flour
    #[arg(long)]
    sugar: Option<f64>,

    /// Add 3% to the target mass for bowl residue and scraps (true/false)
    #[arg(long, action = clap::ArgAction::Set)]
    process_loss: Option<bool>,

    /// Ambient temperature in °C
    #[arg(long, allow_negative_numbers = true)]
    ambient_temp: Option<f64>,

    /// Flour temperature in °C
    #[arg(long, allow_negative_numbers = true)]
    flour_temp: Option<f64>,

    /// Base temperature for the mixing-water rule in °C
    #[arg(long, allow_negative_numbers = true)]
    base_temp: Option<f64>,

    /// Serving time HH:MM
    #[arg(long, value_parser = parse_hhmm)]
    serve_at: Option<NaiveTime>,

    /// Hours from mixing to serving
    #[arg(long)]
    total_hours: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Show the baker's fraction breakdown
    #[arg(long)]
    debug: bool,

    /// Stored state file (defaults to the platform data directory)
    #[arg(long, env = "DOUGH_STATE")]
    state: Option<PathBuf>,

    /// Do not write the effective configuration back
    #[arg(long)]
    no_save: bool,

    /// Ignore the stored state and start from the defaults
    #[arg(long)]
    reset: bool,

    /// List recipe and scale presets, then exit
    #[arg(long)]
    list_presets: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Stored state → scale → recipe preset → explicit flags.
fn resolve(args: &Args, base: RecipeConfiguration) -> Result<RecipeConfiguration> {
    let mut cfg = base;

    if let Some(id) = &args.scale {
        let scale = production_scale(id).ok_or_else(|| anyhow!("unknown scale `{id}`"))?;
        debug!(scale = scale.id, "applying production scale");
        cfg = cfg.apply_scale(scale);
    }
    if let Some(id) = &args.preset {
        let preset = recipe_preset(id).ok_or_else(|| anyhow!("unknown preset `{id}`"))?;
        debug!(preset = preset.id, "applying recipe preset");
        cfg = cfg.apply_recipe(preset);
    }

    macro_rules! set {
        ($flag:ident => $field:ident) => {
            if let Some(v) = args.$flag {
                cfg.$field = v;
            }
        };
    }

    set!(balls => pizza_count);
    set!(ball_weight => ball_weight_g);
    set!(hydration => hydration_pct);
    set!(salt => salt_pct);
    set!(oil => oil_pct);
    set!(sugar => sugar_pct);
    set!(process_loss => include_process_loss);
    set!(ambient_temp => ambient_temp_c);
    set!(flour_temp => flour_temp_c);
    set!(base_temp => base_temp_c);
    set!(serve_at => serving_time);
    set!(total_hours => total_fermentation_hours);

    let kind = args
        .yeast
        .map(YeastKind::from)
        .or_else(|| args.toggle_yeast.then(|| cfg.yeast_kind.other()));
    match (kind, args.yeast_pct) {
        (Some(kind), Some(pct)) => {
            cfg.yeast_kind = kind;
            cfg.yeast_pct = pct;
        }
        (Some(kind), None) => cfg = cfg.with_yeast_kind(kind),
        (None, Some(pct)) => cfg.yeast_pct = pct,
        (None, None) => {}
    }

    Ok(cfg)
}

fn print_presets() {
    let mut recipes = Table::new();
    recipes.load_preset(UTF8_FULL).set_header(vec![
        Cell::new("Recipe").add_attribute(Attribute::Bold),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Hydration").add_attribute(Attribute::Bold),
        Cell::new("Salt").add_attribute(Attribute::Bold),
        Cell::new("Dry yeast").add_attribute(Attribute::Bold),
        Cell::new("Oil").add_attribute(Attribute::Bold),
        Cell::new("Sugar").add_attribute(Attribute::Bold),
    ]);
    for p in RECIPE_PRESETS {
        recipes.add_row(vec![
            Cell::new(p.id),
            Cell::new(p.name),
            Cell::new(format!("{}%", p.hydration_pct)),
            Cell::new(format!("{}%", p.salt_pct)),
            Cell::new(format!("{}%", p.yeast_pct)),
            Cell::new(format!("{}%", p.oil_pct)),
            Cell::new(format!("{}%", p.sugar_pct)),
        ]);
    }

    let mut scales = Table::new();
    scales.load_preset(UTF8_FULL).set_header(vec![
        Cell::new("Scale").add_attribute(Attribute::Bold),
        Cell::new("Balls").add_attribute(Attribute::Bold),
        Cell::new("Description").add_attribute(Attribute::Bold),
        Cell::new("Notes").add_attribute(Attribute::Bold),
    ]);
    for s in PRODUCTION_SCALES {
        scales.add_row(vec![
            Cell::new(s.id),
            Cell::new(format!("{} × {:.0} g", s.pizza_count, s.ball_weight_g)),
            Cell::new(s.description),
            Cell::new(s.notes),
        ]);
    }

    println!("{recipes}");
    println!("{scales}");
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.verbose {
            "dough=debug,dough_core=debug"
        } else {
            "warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.list_presets {
        print_presets();
        return Ok(());
    }

    let state_path = args.state.clone().or_else(state::default_state_path);
    let base = match (&state_path, args.reset) {
        (Some(path), false) => state::load(path),
        _ => RecipeConfiguration::default(),
    };

    let cfg = resolve(&args, base)?;
    debug!(?cfg, "effective configuration");

    let res = compute(&cfg).context("cannot compute this recipe")?;

    match args.format {
        OutputFormat::Table => print!("{}", render::report(&cfg, &res, args.debug)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&res).context("failed to serialize result")?
        ),
        OutputFormat::Share => {
            let label = args
                .preset
                .as_deref()
                .and_then(recipe_preset)
                .map_or("Custom", |p| p.name);
            print!("{}", render::share_text(label, &cfg, &res));
        }
    }

    if !args.no_save {
        match &state_path {
            Some(path) => state::save(path, &cfg)?,
            None => bail!("no data directory available; pass --state or --no-save"),
        }
    }

    Ok(())
}
