use chrono::NaiveDate;
use gantt_rs::api::{GanttChart, GanttConfig, GanttTask};
use gantt_rs::core::{DateInput, ScrollMetrics, local_today};
use gantt_rs::render::NullRenderer;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "usage: gantt_layout_dump --input <chart.json> [--output <layout.json>]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: Option<PathBuf>,
}

/// Chart description read from `--input`.
#[derive(Debug, Deserialize)]
struct ChartFile {
    #[serde(default)]
    config: GanttConfig,
    start_date: Option<DateInput>,
    end_date: Option<DateInput>,
    container_width: f64,
    #[serde(default)]
    today: Option<NaiveDate>,
    #[serde(default)]
    tasks: Vec<GanttTask>,
    #[serde(default)]
    scroll: Option<ScrollMetrics>,
}

fn main() {
    let _ = gantt_rs::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let file: ChartFile =
        serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;

    let today = file.today.unwrap_or_else(local_today);
    let mut chart = GanttChart::new(NullRenderer::default(), file.config, today)
        .map_err(|err| err.to_string())?;
    chart
        .set_range_inputs(file.start_date.as_ref(), file.end_date.as_ref())
        .map_err(|err| err.to_string())?;
    chart
        .resize(file.container_width)
        .map_err(|err| err.to_string())?;
    chart.set_tasks(file.tasks).map_err(|err| err.to_string())?;

    if let Some(metrics) = file.scroll {
        let events = chart.on_scroll(metrics).map_err(|err| err.to_string())?;
        for event in events {
            eprintln!("pagination: {event:?}");
        }
    }

    chart.render().map_err(|err| err.to_string())?;
    let json = chart
        .snapshot()
        .to_json_contract_v1_pretty()
        .map_err(|err| err.to_string())?;

    match args.output {
        Some(path) => fs::write(&path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| USAGE.to_owned())?,
        output,
    })
}
