// File: crates/demo/src/main.rs
// Summary: Demo loads per-step percentage changes from CSV and renders portfolio / spread charts to PNGs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chart_core::series::parse_timestamp;
use chart_core::{
    accumulate_spread, compound_percent_changes, Chart, ChartOptions, Marker, Point, Series, ValueFormat,
};
use chart_render_skia::SkiaSurface;

const DEFAULT_INPUT: &str = "crates/demo/data/sample_returns.csv";

struct Args {
    input: PathBuf,
    options: Option<PathBuf>,
    out_dir: PathBuf,
    period_days: Option<f64>,
    verbose: bool,
}

fn main() -> Result<()> {
    let args = parse_args()?;
    setup_logger(args.verbose)?;

    let base = load_options(args.options.as_deref())?;
    let steps = load_steps_csv(&args.input)
        .with_context(|| format!("failed to load CSV '{}'", args.input.display()))?;
    log::info!("loaded {} series from {}", steps.len(), args.input.display());
    if steps.is_empty() {
        anyhow::bail!("no rows loaded; check headers/delimiter.");
    }

    // 1) Compounded returns per source, percent values.
    let portfolio: Vec<Series> = steps
        .iter()
        .map(|s| Series::new(s.name.clone(), compound_percent_changes(&s.points)))
        .collect();
    let opts = ChartOptions { value_format: ValueFormat::Percentage, center_zero: false, ..base.clone() };
    let mut chart = Chart::new(SkiaSurface::new(opts.width, opts.height), opts)?;
    if let Some(days) = args.period_days {
        chart.set_period(days)?;
    }
    chart.set_data(&portfolio)?;
    if let Some(best) = best_point(&portfolio) {
        chart.set_markers(&[Marker::new(best.timestamp, best.value).with_color("#f59e0b")])?;
    }
    write(&chart, &args.out_dir.join("portfolio.png"))?;

    // Same chart with the tooltip showing for the point nearest the plot center.
    let center = chart.plot_rect().center();
    if let Some(hit) = chart.hit_points().iter().min_by(|a, b| {
        let pa = (a.local.x + chart.plot_rect().left - center.x).abs();
        let pb = (b.local.x + chart.plot_rect().left - center.x).abs();
        pa.total_cmp(&pb)
    }) {
        let plot = chart.plot_rect();
        let (x, y) = (hit.local.x + plot.left, hit.local.y + plot.top);
        chart.pointer_move(x, y)?;
        write(&chart, &args.out_dir.join("portfolio_hover.png"))?;
    }

    // 2) Additive spread of the first two sources, shaded by sign.
    if steps.len() >= 2 {
        let spread: Vec<Series> = steps[..2]
            .iter()
            .map(|s| Series::new(s.name.clone(), accumulate_spread(&s.points)))
            .collect();
        let opts = ChartOptions {
            value_format: ValueFormat::Percentage,
            center_zero: true,
            shade_between: true,
            ..base
        };
        let mut chart = Chart::new(SkiaSurface::new(opts.width, opts.height), opts)?;
        if let Some(days) = args.period_days {
            chart.set_period(days)?;
        }
        chart.set_data(&spread)?;
        write(&chart, &args.out_dir.join("spread.png"))?;
    }
    Ok(())
}

fn write(chart: &Chart<SkiaSurface>, path: &Path) -> Result<()> {
    chart.surface().write_png(path)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn best_point(series: &[Series]) -> Option<Point> {
    series
        .iter()
        .flat_map(|s| s.points.iter().copied())
        .max_by(|a, b| a.value.total_cmp(&b.value))
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        input: PathBuf::from(DEFAULT_INPUT),
        options: None,
        out_dir: PathBuf::from("target/out"),
        period_days: None,
        verbose: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = |name: &str| it.next().with_context(|| format!("{name} needs a value"));
        match flag.as_str() {
            "--options" => args.options = Some(PathBuf::from(value("--options")?)),
            "--out" => args.out_dir = PathBuf::from(value("--out")?),
            "--period" => {
                let raw = value("--period")?;
                args.period_days = Some(raw.parse().with_context(|| format!("bad --period '{raw}'"))?);
            }
            "-v" | "--verbose" => args.verbose = true,
            other if !other.starts_with('-') => args.input = PathBuf::from(other),
            other => anyhow::bail!("unknown flag '{other}'"),
        }
    }
    Ok(args)
}

fn setup_logger(verbose: bool) -> Result<()> {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("installing logger")?;
    Ok(())
}

fn load_options(path: Option<&Path>) -> Result<ChartOptions> {
    let Some(path) = path else { return Ok(ChartOptions::default()) };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing options {}", path.display()))
}

/// Load `timestamp,series,change` rows into one step series per source, in
/// first-seen order. Rows with an unparseable timestamp or value are skipped.
fn load_steps_csv(path: &Path) -> Result<Vec<Series>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    log::debug!("headers: {headers:?}");
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_time = idx(&["timestamp", "date", "time", "datetime"]).context("missing timestamp column")?;
    let i_value = idx(&["change", "change_pct", "value", "value_usdt", "total_value"]).context("missing value column")?;
    let i_series = idx(&["series", "source", "name"]);

    let mut order: Vec<String> = Vec::new();
    let mut by_name: BTreeMap<String, Vec<Point>> = BTreeMap::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let name = i_series.and_then(|i| rec.get(i)).unwrap_or("Series").to_string();
        let ts = rec.get(i_time).and_then(|s| parse_timestamp(s).ok());
        let value = rec.get(i_value).and_then(|s| s.parse::<f64>().ok());
        let (Some(timestamp), Some(value)) = (ts, value) else {
            skipped += 1;
            continue;
        };
        if !by_name.contains_key(&name) {
            order.push(name.clone());
        }
        by_name.entry(name).or_default().push(Point::new(timestamp, value));
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} malformed rows");
    }
    Ok(order
        .into_iter()
        .filter_map(|name| by_name.remove(&name).map(|points| Series::new(name, points)))
        .collect())
}
