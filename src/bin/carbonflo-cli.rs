//! Headless access to the CarbonFlo backend: list countries, ask about one, or
//! estimate a personal contribution.

use carbonflo::climate_api::ClimateApi;
use carbonflo::config::{self, AppSettings};
use carbonflo::logging::{self, ConsoleTarget};
use carbonflo::metrics::format_likelihood;
use carbonflo::session::{ContributionSession, MetricsLoad, TrendsSession};

fn main() {
    if let Err(err) = logging::init(ConsoleTarget::Stderr) {
        eprintln!("Logging disabled: {err}");
    }
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    let mut settings = config::load_or_default().map_err(|err| err.to_string())?;
    if let Some(base_url) = options.base_url {
        settings.server.base_url = base_url;
        settings = settings.normalized().map_err(|err| err.to_string())?;
    }
    match options.command {
        Command::Metrics => print_metrics(&settings),
        Command::Insight { index } => print_point_insight(&settings, index),
        Command::Contribute { country, actions } => {
            print_contribution(&settings, country, actions)
        }
    }
}

fn print_metrics(settings: &AppSettings) -> Result<(), String> {
    let api = ClimateApi::from_settings(settings);
    let metrics = api.fetch_metrics().map_err(|err| err.to_string())?;
    for index in 0..metrics.len() {
        let Some(metric) = metrics.get(index) else {
            continue;
        };
        println!(
            "{index:>3}  {:<32} {:>6}%  {}",
            metric.name,
            format_likelihood(metric.likelihood),
            metric.target_year
        );
    }
    Ok(())
}

fn print_point_insight(settings: &AppSettings, index: usize) -> Result<(), String> {
    let api = ClimateApi::from_settings(settings);
    let mut session = TrendsSession::new(api.endpoints().clone(), settings.chart.point_limit);
    if let Some(job) = session.mount() {
        session.finish_metrics_load(job.token, api.fetch_metrics());
    }
    if let MetricsLoad::Failed(err) = session.metrics() {
        return Err(format!("Failed to load countries: {err}"));
    }
    let plotted = session.chart_values().len();
    let Some(job) = session.begin_point_click(index, 0.0, 0.0) else {
        return match session.tooltip() {
            Some(tooltip) => Err(tooltip.insight.clone()),
            None => Err(format!("Index {index} is not plotted ({plotted} points)")),
        };
    };
    session.finish_point_insight(job.token, api.fetch(&job.request));
    let tooltip = session
        .tooltip()
        .ok_or_else(|| "Insight was discarded".to_string())?;
    println!(
        "{} ({}% by {})",
        tooltip.country,
        format_likelihood(tooltip.likelihood),
        tooltip.year
    );
    println!("{}", tooltip.insight);
    Ok(())
}

fn print_contribution(
    settings: &AppSettings,
    country: String,
    actions: String,
) -> Result<(), String> {
    let api = ClimateApi::from_settings(settings);
    let mut session = ContributionSession::new(api.endpoints().clone());
    if let Some(job) = session.mount() {
        session.finish_metrics_load(job.token, api.fetch_metrics());
    }
    match session.metrics() {
        MetricsLoad::Failed(err) => {
            return Err(format!("{}\n{err}", carbonflo::session::COUNTRY_LOAD_ALERT));
        }
        MetricsLoad::Ready(metrics) if !country.is_empty() && !metrics.contains(&country) => {
            return Err(format!("Unknown country: {country}"));
        }
        _ => {}
    }
    session.select_country(Some(country));
    session.set_actions(actions);
    let job = session.submit().map_err(|err| err.to_string())?;
    if let Some(job) = job {
        session.finish_submission(job.token, api.fetch(&job.request));
    }
    if let Some(response) = session.response() {
        println!("{response}");
    }
    Ok(())
}

enum Command {
    Metrics,
    Insight { index: usize },
    Contribute { country: String, actions: String },
}

struct Options {
    base_url: Option<String>,
    command: Command,
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut base_url = None;
    let mut command = None;
    let mut index = None;
    let mut country = None;
    let mut actions = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--base-url" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--base-url requires a value".to_string())?;
                base_url = Some(value.to_string());
            }
            "--index" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--index requires a value".to_string())?;
                let parsed = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid --index value: {value}"))?;
                index = Some(parsed);
            }
            "--country" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--country requires a value".to_string())?;
                country = Some(value.to_string());
            }
            "--actions" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--actions requires a value".to_string())?;
                actions = Some(value.to_string());
            }
            name @ ("metrics" | "insight" | "contribute") if command.is_none() => {
                command = Some(name.to_string());
            }
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }

    let command = match command.as_deref() {
        Some("metrics") => Command::Metrics,
        Some("insight") => Command::Insight {
            index: index.ok_or_else(|| "insight requires --index".to_string())?,
        },
        Some("contribute") => Command::Contribute {
            country: country.unwrap_or_default(),
            actions: actions.unwrap_or_default(),
        },
        _ => return Err(format!("Missing command\n\n{}", help_text())),
    };
    Ok(Some(Options { base_url, command }))
}

fn help_text() -> &'static str {
    "carbonflo-cli\n\
\n\
Usage:\n\
  carbonflo-cli metrics [--base-url URL]\n\
  carbonflo-cli insight --index N [--base-url URL]\n\
  carbonflo-cli contribute --country NAME --actions TEXT [--base-url URL]\n\
\n\
Commands:\n\
  metrics      List countries with likelihood and target year.\n\
  insight      Ask for an AI insight about the Nth plotted country.\n\
  contribute   Estimate the impact of your own actions.\n"
}
