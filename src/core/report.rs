use crate::core::calculator::{multiplier, result_meter_percentage};
use crate::core::locale::{self, strings};
use crate::domain::model::{CalculationResult, Locale, SavedResult};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
    Tsv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            other => Err(format!("Unsupported format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    pub arabic_digits: bool,
    pub meter_width: usize,
}

const DEFAULT_METER_WIDTH: usize = 20;

pub fn render(
    result: &CalculationResult,
    format: OutputFormat,
    locale: Locale,
    options: TextOptions,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result, locale, options)),
        OutputFormat::Json => render_json(result),
        OutputFormat::Csv => schedule_table(result, b','),
        OutputFormat::Tsv => schedule_table(result, b'\t'),
    }
}

fn format_weight(weight_kg: f64) -> String {
    if weight_kg.fract() == 0.0 {
        format!("{}", weight_kg as i64)
    } else {
        format!("{}", weight_kg)
    }
}

pub fn meter_bar(percentage: f64, width: usize) -> String {
    let width = if width == 0 { DEFAULT_METER_WIDTH } else { width };
    let percentage = percentage.clamp(0.0, 100.0);
    let filled = ((percentage / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percentage
    )
}

pub fn render_text(result: &CalculationResult, locale: Locale, options: TextOptions) -> String {
    let s = strings(locale);
    let amount = result.total_liters.to_string();
    let mut lines = Vec::new();

    lines.push(format!("{} {}", amount, s.liter_unit));
    lines.push(String::new());
    lines.push(s.breakdown_heading.to_string());
    lines.push(format!(
        "  {} {} {}",
        s.weight_heading,
        format_weight(result.weight_kg),
        s.kg_unit
    ));
    lines.push(format!("  {} {}", s.activity_heading, result.activity_label));
    lines.push(format!(
        "  {} {} × {} {} = {} {}",
        s.formula_heading,
        format_weight(result.weight_kg),
        multiplier(result.activity_tier),
        s.ml_unit,
        result.total_milliliters,
        s.ml_unit
    ));
    lines.push(String::new());
    lines.push(format!(
        "{}. {}",
        locale::need_sentence(locale, &amount),
        locale::encouragement(locale, result.activity_tier)
    ));
    lines.push(String::new());
    lines.push(s.schedule_heading.to_string());
    for entry in &result.schedule {
        lines.push(format!("  {:<24} {} {}", entry.time_label, entry.milliliters, s.ml_unit));
    }
    lines.push(String::new());
    lines.push(format!(
        "{} {}",
        s.meter_heading,
        meter_bar(result_meter_percentage(result.total_liters), options.meter_width)
    ));

    let text = lines.join("\n");
    if options.arabic_digits {
        locale::to_arabic_digits(&text)
    } else {
        text
    }
}

pub fn render_json(result: &CalculationResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

fn write_rows<T: Serialize>(rows: &[T], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[derive(Serialize)]
struct ScheduleRow<'a> {
    time: &'a str,
    milliliters: i64,
}

fn schedule_table(result: &CalculationResult, delimiter: u8) -> Result<String> {
    let rows: Vec<ScheduleRow> = result
        .schedule
        .iter()
        .map(|entry| ScheduleRow {
            time: &entry.time_label,
            milliliters: entry.milliliters,
        })
        .collect();
    write_rows(&rows, delimiter)
}

pub fn schedule_csv(result: &CalculationResult) -> Result<String> {
    schedule_table(result, b',')
}

pub fn schedule_tsv(result: &CalculationResult) -> Result<String> {
    schedule_table(result, b'\t')
}

#[derive(Serialize)]
struct HistoryRow<'a> {
    id: i64,
    date: String,
    weight_kg: f64,
    activity: &'a str,
    total_milliliters: i64,
    total_liters: String,
}

pub fn history_csv(saved: &[SavedResult]) -> Result<String> {
    let rows: Vec<HistoryRow> = saved
        .iter()
        .map(|entry| HistoryRow {
            id: entry.id,
            date: entry.date.to_rfc3339(),
            weight_kg: entry.result.weight_kg,
            activity: entry.result.activity_tier.as_str(),
            total_milliliters: entry.result.total_milliliters,
            total_liters: entry.result.total_liters.to_string(),
        })
        .collect();
    write_rows(&rows, b',')
}

/// One line per saved result, newest last.
pub fn render_history(saved: &[SavedResult], locale: Locale) -> String {
    let s = strings(locale);
    saved
        .iter()
        .map(|entry| {
            format!(
                "#{} {} {} {} ({} {}, {})",
                entry.id,
                entry.date.format("%Y-%m-%d %H:%M"),
                entry.result.total_liters,
                s.liter_unit,
                format_weight(entry.result.weight_kg),
                s.kg_unit,
                entry.result.activity_label
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
