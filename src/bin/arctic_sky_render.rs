use std::fs;
use std::path::{Path, PathBuf};

use arctic_sky::api::{ExplorerConfig, ExplorerEngine, GalleryChart, LoadFailureView};
use arctic_sky::core::{Dataset, MetricKey, SeasonFilter};
use arctic_sky::render::{RenderFrame, Renderer, SvgRenderer};
use arctic_sky::telemetry;
use tracing::{error, info};

const USAGE: &str = "usage: arctic_sky_render --output <path> [--input <path>] [--config <path>] \
[--season <All|Winter|Spring|Summer|Fall>] [--metric <brightnessIndex|daylightHours|cloudCover>] \
[--hide-site <name>]... [--static] [--snapshot <path>] [--gallery-dir <dir>] [--verbose]";

#[derive(Debug, Default)]
struct CliArgs {
    output: PathBuf,
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    season: Option<SeasonFilter>,
    metric: Option<MetricKey>,
    hidden_sites: Vec<String>,
    settled: bool,
    snapshot: Option<PathBuf>,
    gallery_dir: Option<PathBuf>,
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let _ = if args.verbose {
        telemetry::init_tracing_with_fallback("arctic_sky=debug")
    } else {
        telemetry::init_default_tracing()
    };

    let mut config = match &args.config {
        Some(path) => ExplorerConfig::from_path(path).map_err(|err| err.to_string())?,
        None => ExplorerConfig::default(),
    };
    if let Some(input) = &args.input {
        config.data_path = input.clone();
    }

    let dataset = match Dataset::from_path(&config.data_path) {
        Ok(dataset) => dataset,
        Err(err) => {
            let view = LoadFailureView::from_error(&err);
            let mut renderer = SvgRenderer::new();
            view.render(&mut renderer, config.layout, &config.style)
                .map_err(|err| err.to_string())?;
            if let Some(document) = renderer.last_document() {
                write_file(&args.output, document)?;
            }
            return Err(view.message().to_owned());
        }
    };

    let metric = args.metric.unwrap_or(config.default_metric);
    let layout = config.layout;
    let mut engine =
        ExplorerEngine::new(SvgRenderer::new(), config, dataset).map_err(|err| err.to_string())?;
    if let Some(season) = args.season {
        engine.set_season(season).map_err(|err| err.to_string())?;
    }
    if metric != engine.filter().metric() {
        engine.set_metric(metric).map_err(|err| err.to_string())?;
    }
    for site in &args.hidden_sites {
        let outcome = engine.toggle_site(site).map_err(|err| err.to_string())?;
        if !outcome.changed() {
            error!(site = %site, ?outcome, "site could not be hidden");
        }
    }

    let document = if args.settled {
        let scene = engine
            .current_scene()
            .ok_or_else(|| "nothing has been drawn".to_owned())?;
        let mut renderer = SvgRenderer::new();
        renderer
            .render(&RenderFrame::snapshot_of(scene))
            .map_err(|err| err.to_string())?;
        renderer.take_last_document()
    } else {
        engine.renderer_mut().take_last_document()
    }
    .ok_or_else(|| "renderer produced no document".to_owned())?;
    write_file(&args.output, &document)?;
    info!(
        path = %args.output.display(),
        width = layout.viewport.width,
        height = layout.viewport.height,
        "explorer chart written"
    );
    println!("{}", engine.summary());

    if let Some(path) = &args.snapshot {
        let payload = engine.snapshot_json_pretty().map_err(|err| err.to_string())?;
        write_file(path, &payload)?;
    }

    if let Some(dir) = &args.gallery_dir {
        write_gallery(dir, &engine, metric)?;
    }
    Ok(())
}

fn write_gallery(
    dir: &Path,
    engine: &ExplorerEngine<SvgRenderer>,
    metric: MetricKey,
) -> Result<(), String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("failed to create `{}`: {err}", dir.display()))?;
    let renderer = SvgRenderer::new();
    for chart in GalleryChart::ALL {
        let scene = match chart.build(engine.dataset(), metric, &engine.config().style) {
            Ok(scene) => scene,
            Err(err) => {
                error!(chart = chart.slug(), %err, "skipping gallery chart");
                continue;
            }
        };
        let document = renderer
            .document(&RenderFrame::snapshot_of(&scene))
            .map_err(|err| err.to_string())?;
        write_file(&dir.join(format!("{}.svg", chart.slug())), &document)?;
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), String> {
    fs::write(path, contents).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs::default();
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "--output" => output = Some(PathBuf::from(value("--output")?)),
            "--input" => parsed.input = Some(PathBuf::from(value("--input")?)),
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--season" => {
                let raw = value("--season")?;
                parsed.season = Some(raw.parse::<SeasonFilter>().map_err(|err| err.to_string())?);
            }
            "--metric" => {
                let raw = value("--metric")?;
                parsed.metric = Some(raw.parse::<MetricKey>().map_err(|err| err.to_string())?);
            }
            "--hide-site" => parsed.hidden_sites.push(value("--hide-site")?),
            "--snapshot" => parsed.snapshot = Some(PathBuf::from(value("--snapshot")?)),
            "--gallery-dir" => parsed.gallery_dir = Some(PathBuf::from(value("--gallery-dir")?)),
            "--static" => parsed.settled = true,
            "--verbose" | "-v" => parsed.verbose = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`\n{USAGE}")),
        }
    }

    parsed.output = output.ok_or_else(|| format!("missing --output\n{USAGE}"))?;
    Ok(parsed)
}
