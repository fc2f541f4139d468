//! Report view writers for the CLI harness.
//!
//! A [`ReportView`] wraps one assembled view-model; writers serialize it as
//! pretty JSON or render it as a terminal report. The terminal writer draws
//! the same bar charts the dashboards painted, scaled through each view's
//! precomputed `bar_percent` values.

use std::io::Write;

use serde::Serialize;

use crate::assemble::cohort::CohortView;
use crate::assemble::competitors::CompetitorView;
use crate::assemble::forecast::ForecastView;
use crate::assemble::losses::{LossSection, LossesView};
use crate::assemble::nps::NpsView;
use crate::assemble::velocity::VelocityView;
use crate::formatting::{ColoredFormatter, FormattingConfig, StyleFormatter};
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// One assembled report, ready to write.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum ReportView {
    Cohort(CohortView),
    Forecast(ForecastView),
    Velocity(VelocityView),
    Competitors(CompetitorView),
    Losses(LossesView),
    Nps(NpsView),
}

pub trait OutputWriter {
    fn write_view(&mut self, view: &ReportView) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_view(&mut self, view: &ReportView) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(view)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

pub struct TerminalWriter {
    fmt: ColoredFormatter,
    locale: Locale,
}

impl TerminalWriter {
    pub fn new(config: FormattingConfig, locale: Locale) -> Self {
        Self {
            fmt: ColoredFormatter::new(config),
            locale,
        }
    }
}

impl OutputWriter for TerminalWriter {
    fn write_view(&mut self, view: &ReportView) -> anyhow::Result<()> {
        match view {
            ReportView::Cohort(v) => print_cohort(&self.fmt, v),
            ReportView::Forecast(v) => print_forecast(&self.fmt, &self.locale, v),
            ReportView::Velocity(v) => print_velocity(&self.fmt, v),
            ReportView::Competitors(v) => print_competitors(&self.fmt, &self.locale, v),
            ReportView::Losses(v) => print_losses(&self.fmt, &self.locale, v),
            ReportView::Nps(v) => print_nps(&self.fmt, &self.locale, v),
        }
        Ok(())
    }
}

pub fn create_writer(
    format: OutputFormat,
    config: FormattingConfig,
    locale: Locale,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(config, locale)),
    }
}

const BAR_WIDTH: usize = 30;

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn print_cohort(fmt: &ColoredFormatter, view: &CohortView) {
    println!("{}", fmt.header("Análise de Coorte"));
    println!();
    println!("Leads analisados: {}", view.total_created);

    for row in &view.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| match cell {
                Some(c) => fmt.style(&c.bucket.style_key, &format!("{:>6}", c.formatted)),
                None => fmt.dim(&format!("{:>6}", "-")),
            })
            .collect();
        println!("  {:<8} {:>6}  {}", row.label, row.created, cells.join(" "));
    }

    println!();
    let averages: Vec<String> = view
        .avg_by_column
        .iter()
        .map(|avg| format!("{avg:>5.1}%"))
        .collect();
    println!("  {:<8} {:>6}  {}", "Média", "", averages.join(" "));
}

fn print_forecast(fmt: &ColoredFormatter, locale: &Locale, view: &ForecastView) {
    println!("{}", fmt.header("Previsão de Vendas"));
    println!();
    println!("  Pipeline:     {}", locale.currency(view.totals.pipeline));
    println!("  Ponderado:    {}", locale.currency(view.totals.weighted));
    println!("  Melhor caso:  {}", locale.currency(view.totals.best_case));
    println!("  Pior caso:    {}", locale.currency(view.totals.worst_case));
    println!(
        "  Comprometido: {} ({} do pipeline)",
        locale.currency(view.totals.committed),
        locale.percent(view.committed_share, 1),
    );
    println!("  Negócios:     {}", locale.count(view.totals.deals));
    println!(
        "  Taxa histórica média: {}",
        locale.ratio_percent(view.avg_win_rate, 1)
    );
    println!();

    for period in &view.periods {
        println!(
            "  {:<8} {} {:>15}  win {}",
            period.label,
            bar(period.bar_percent),
            period.formatted_weighted,
            period.formatted_win_rate,
        );
    }
}

fn print_velocity(fmt: &ColoredFormatter, view: &VelocityView) {
    println!("{}", fmt.header("Velocidade do Pipeline"));
    println!();
    println!("  Ciclo médio:  {}", view.formatted_cycle);
    println!("  Valor médio:  {}", view.formatted_deal_value);
    println!("  Velocidade:   {}/dia", view.formatted_velocity);
    println!("  Conversão:    {}", view.formatted_win_rate);
    println!();

    for stage in &view.stages {
        println!(
            "  {:<16} {} {:>15}  {}",
            stage.name,
            bar(stage.bar_percent),
            stage.formatted_value,
            fmt.dim(&stage.formatted_days),
        );
    }
}

fn print_competitors(fmt: &ColoredFormatter, locale: &Locale, view: &CompetitorView) {
    println!("{}", fmt.header("Concorrentes"));
    println!();
    println!(
        "  Disputas: {}  Vitórias: {}  Derrotas: {}  Taxa geral: {}",
        locale.count(view.total_encounters),
        locale.count(view.total_wins),
        locale.count(view.total_losses),
        fmt.style(
            &view.overall_bucket.style_key,
            &locale.percent(view.overall_win_rate, 1),
        ),
    );
    println!();

    for row in &view.rows {
        println!(
            "  {:<20} {:>3}W/{:>3}L  {} [{}]",
            row.name,
            row.wins,
            row.losses,
            fmt.style(
                &row.bucket.style_key,
                &format!("{:>6}", row.formatted_win_rate)
            ),
            row.bucket.label,
        );
    }
}

fn print_losses(fmt: &ColoredFormatter, locale: &Locale, view: &LossesView) {
    println!("{}", fmt.header("Análise de Perdas"));
    println!();
    println!(
        "  Perdas: {}  Valor perdido: {}",
        locale.count(view.total_losses),
        view.formatted_total_value,
    );

    print_loss_section(fmt, "Por motivo", &view.by_reason);
    print_loss_section(fmt, "Por concorrente", &view.by_competitor);
    print_loss_section(fmt, "Por vendedor", &view.by_user);
    print_loss_section(fmt, "Tendência mensal", &view.monthly_trend);
}

fn print_loss_section(fmt: &ColoredFormatter, title: &str, section: &LossSection) {
    if section.bars.is_empty() {
        return;
    }
    println!();
    println!("  {}", fmt.header(title));
    for b in &section.bars {
        println!(
            "    {:<20} {} {:>4}  {:>15}",
            b.label,
            bar(b.bar_percent),
            b.count,
            b.formatted_value,
        );
    }
}

fn print_nps(fmt: &ColoredFormatter, locale: &Locale, view: &NpsView) {
    println!("{}", fmt.header("NPS"));
    println!();
    println!(
        "  Score: {} [{}]",
        fmt.style(&view.category.style_key, &format!("{:.0}", view.score)),
        view.category.label,
    );
    println!("  Respostas: {}", locale.count(view.total_responses));
    println!(
        "  Promotores: {} ({})  Neutros: {} ({})  Detratores: {} ({})",
        locale.count(view.promoters),
        locale.percent(view.promoter_share, 0),
        locale.count(view.passives),
        locale.percent(view.passive_share, 0),
        locale.count(view.detractors),
        locale.percent(view.detractor_share, 0),
    );

    if !view.by_month.is_empty() {
        println!();
        for month in &view.by_month {
            println!(
                "  {:<8} {}",
                month.label,
                fmt.style(&month.category.style_key, &format!("{:>6.1}", month.score)),
            );
        }
    }
}
