use anyhow::Result;
use clap::Parser;
use std::path::Path;

use salesview::assemble::{
    cohort::assemble_cohort, competitors::assemble_competitors, forecast::assemble_forecast,
    losses::assemble_losses, nps::assemble_nps, velocity::assemble_velocity,
};
use salesview::buckets::tables;
use salesview::cli::{Cli, Commands, OutputFormat, ReportKind};
use salesview::config::ViewConfig;
use salesview::errors::SalesviewError;
use salesview::formatting::{ColoredFormatter, FormattingConfig, StyleFormatter};
use salesview::output::{self, create_writer, ReportView};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            report,
            format,
            config,
            plain,
        } => render(&input, report, format, config.as_deref(), plain),
        Commands::Tables { plain } => {
            print_tables(formatting_config(plain));
            Ok(())
        }
    }
}

fn render(
    input: &Path,
    report: ReportKind,
    format: OutputFormat,
    config: Option<&Path>,
    plain: bool,
) -> Result<()> {
    let view_config = match config {
        Some(path) => ViewConfig::load(path)?,
        None => ViewConfig::default(),
    };

    let content = std::fs::read_to_string(input).map_err(|e| SalesviewError::io(input, e))?;
    let payload: serde_json::Value =
        serde_json::from_str(&content).map_err(SalesviewError::Json)?;

    let locale = &view_config.locale;
    let floor = view_config.chart_floor;
    let view = match report {
        ReportKind::Cohort => {
            ReportView::Cohort(assemble_cohort(&payload, view_config.cohort_columns, locale))
        }
        ReportKind::Forecast => ReportView::Forecast(assemble_forecast(&payload, locale, floor)),
        ReportKind::Velocity => ReportView::Velocity(assemble_velocity(&payload, locale, floor)),
        ReportKind::Competitors => {
            ReportView::Competitors(assemble_competitors(&payload, locale))
        }
        ReportKind::Losses => ReportView::Losses(assemble_losses(&payload, locale, floor)),
        ReportKind::Nps => ReportView::Nps(assemble_nps(&payload, locale)),
    };

    let output_format = match format {
        OutputFormat::Terminal => output::OutputFormat::Terminal,
        OutputFormat::Json => output::OutputFormat::Json,
    };
    let mut writer = create_writer(
        output_format,
        formatting_config(plain),
        view_config.locale.clone(),
    );
    writer.write_view(&view)
}

fn formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}

fn print_tables(config: FormattingConfig) {
    let fmt = ColoredFormatter::new(config);

    let scales = [
        ("cohort_heat", &*tables::COHORT_HEAT),
        ("win_rate", &*tables::WIN_RATE),
        ("goal_progress", &*tables::GOAL_PROGRESS),
        ("nps_score", &*tables::NPS_SCORE),
        ("nps_response", &*tables::NPS_RESPONSE),
    ];
    for (name, scale) in scales {
        println!("{}", fmt.header(name));
        for t in scale.thresholds() {
            println!(
                "  >= {:>6.1}  {}",
                t.min_value,
                fmt.style(&t.style_key, &t.label),
            );
        }
        println!();
    }

    let maps = [
        ("lead_grade", &*tables::LEAD_GRADE),
        ("alert_priority", &*tables::ALERT_PRIORITY),
        ("plan_status", &*tables::PLAN_STATUS),
    ];
    for (name, map) in maps {
        println!("{}", fmt.header(name));
        for (key, entry) in map.entries() {
            println!("  {:<10} {}", key, fmt.style(entry.style_key, entry.label));
        }
        println!();
    }
}
