use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use super::{display_hour, display_timestamp};
use crate::api::forecast::LoadedForecast;
use crate::color::palette::Palette;
use crate::color::{css::parse_color, Rgb};
use crate::contacts::{EmergencyContact, ContactCategory};
use crate::geo::{peak_ward, Ward};
use crate::metrics::{
    enhanced_model_rows, format_metric, format_percentage, metric_detail, ranked_features,
    METRIC_DETAILS,
};
use crate::models::{ForecastSource, ModelVerification, ServiceReply, SmsInfo};
use crate::regions::RegionLookup;
use crate::risk::{HourlyBand, RiskBand, HOURLY_HIGH_LINE, HOURLY_MEDIUM_LINE};

const BAR_WIDTH: usize = 40;

fn header(title: &str) {
    println!(
        "\n {} v{}",
        "floodcast".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" {}\n", title);
}

fn bold(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| bold(h)).collect::<Vec<_>>());
    table
}

fn table_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

fn band_color(band: RiskBand) -> Color {
    match band {
        RiskBand::VeryHigh => Color::Red,
        RiskBand::High => Color::DarkYellow,
        RiskBand::Medium => Color::Yellow,
        RiskBand::Low | RiskBand::VeryLow => Color::Green,
    }
}

/// The color a ward is actually painted with.
fn fill_of(ward: &Ward, palette: &Palette) -> Rgb {
    ward.precomputed_color()
        .and_then(|c| parse_color(c).ok())
        .unwrap_or_else(|| palette.color_at(ward.flood_probability))
}

fn swatch(c: Rgb) -> ColoredString {
    "   ".on_truecolor(c.r, c.g, c.b)
}

// ── Forecast map ──────────────────────────────────────────────────────────────

/// Render the ward forecast: summary box, ward table, hourly outlook and top factors.
pub fn render_map(
    loaded: &LoadedForecast,
    palette: &Palette,
    regions: &RegionLookup,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let forecast = &loaded.forecast;
    let peak = peak_ward(loaded.wards.wards());
    let peak_name = peak.map(|w| regions.region_for(&w.name));

    if quiet {
        println!(
            "Wards: {}  Peak: {:.2}%{}  Source: {}",
            loaded.wards.features.len(),
            forecast.peak_flood_probability,
            peak_name
                .as_deref()
                .map(|n| format!(" ({})", n))
                .unwrap_or_default(),
            loaded.source,
        );
        return Ok(());
    }

    header("Ward flood-risk forecast");

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "PEAK FLOOD PROBABILITY".bold());
    println!(
        " │  {:<48} │",
        format!("Peak probability : {:.2}%", forecast.peak_flood_probability)
    );
    println!(
        " │  {:<48} │",
        format!("Location         : {}", peak_name.as_deref().unwrap_or("-"))
    );
    println!(
        " │  {:<48} │",
        format!("Wards            : {}", loaded.wards.features.len())
    );
    println!(
        " │  {:<48} │",
        format!("Data             : {}", loaded.source)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if loaded.source == ForecastSource::Mock {
        println!(
            " {} Forecast service unavailable; showing sample wards.\n",
            "[MOCK]".yellow().bold()
        );
    }

    if let Some(name) = &peak_name {
        println!(
            " {} {} is currently showing the highest flood risk. Residents should stay informed and prepare for potential flooding.\n",
            "[ALERT]".red().bold(),
            name.bold()
        );
    }

    render_ward_table(loaded, palette, regions, verbose);
    println!();

    if !forecast.hourly_forecast.is_empty() {
        println!(" {} 24-hour probability forecast\n", "[HOURLY]".cyan().bold());
        for hour in &forecast.hourly_forecast {
            let band = HourlyBand::from_probability(hour.probability);
            let bar = hour_bar(hour.probability, BAR_WIDTH);
            let bar = match band {
                HourlyBand::High => bar.red(),
                HourlyBand::Medium => bar.yellow(),
                HourlyBand::Low => bar.green(),
            };
            println!(
                "  {:>8}  {:<width$}  {:>5.1}%",
                display_hour(&hour.hour),
                bar,
                hour.probability,
                width = BAR_WIDTH
            );
        }
        println!(
            "  {:>8}  high risk above {}%, medium above {}%\n",
            "",
            HOURLY_HIGH_LINE,
            HOURLY_MEDIUM_LINE
        );
    }

    if !forecast.top_factors.is_empty() {
        println!(" {} Top risk factors\n", "[FACTORS]".cyan().bold());
        for factor in &forecast.top_factors {
            if verbose {
                println!("  • {:<24} {:.2}", factor.feature, factor.shap_value);
            } else {
                println!("  • {}", factor.feature);
            }
        }
        println!();
    }

    if !forecast.last_updated.is_empty() {
        println!(" Last updated: {}", display_timestamp(&forecast.last_updated));
    }

    Ok(())
}

fn render_ward_table(
    loaded: &LoadedForecast,
    palette: &Palette,
    regions: &RegionLookup,
    verbose: bool,
) {
    let peak = peak_ward(loaded.wards.wards()).map(|w| w.name.as_str());

    let mut headers = vec!["Region", "Flood Probability", "Inundation", "Risk", "Fill"];
    if verbose {
        headers.insert(1, "Ward");
    }
    let mut table = new_table(&headers);

    let mut wards: Vec<&Ward> = loaded.wards.wards().collect();
    wards.sort_by(|a, b| b.flood_probability.total_cmp(&a.flood_probability));

    for ward in wards {
        let band = RiskBand::from_probability(ward.flood_probability);
        let fill = fill_of(ward, palette);

        let mut region = Cell::new(regions.region_for(&ward.name));
        if Some(ward.name.as_str()) == peak {
            region = region.add_attribute(Attribute::Bold).fg(Color::Red);
        }

        let mut row = vec![
            region,
            Cell::new(format!("{:.2}%", ward.flood_probability))
                .fg(band_color(band))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}%", ward.inundation_percent))
                .set_alignment(CellAlignment::Right),
            Cell::new(band.to_string()).fg(band_color(band)),
            Cell::new(format!("██ {}", fill.to_hex())).fg(table_color(fill)),
        ];
        if verbose {
            let id = match ward.ward_number() {
                Some(n) => format!("{} (#{})", ward.name, n),
                None => ward.name.clone(),
            };
            row.insert(1, Cell::new(id));
        }
        table.add_row(row);
    }

    println!("{}", table);
}

/// `#` bar scaled to `width` for a probability in `[0, 100]`.
pub fn hour_bar(probability: f64, width: usize) -> String {
    let filled = ((probability.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    "#".repeat(filled)
}

/// Gradient swatches for each legend band plus every control point.
pub fn render_legend(palette: &Palette) {
    println!("\n {}\n", "Flood Risk".bold());
    for band in RiskBand::all() {
        let c = palette.color_at(band.representative());
        println!("  {}  {:<10} ({})", swatch(c), band.to_string(), band.range_label());
    }

    println!("\n {}\n", "Gradient stops".bold());
    for stop in palette.stops() {
        println!(
            "  {}  {:>5.0}%  {}",
            swatch(stop.color),
            stop.threshold * 100.0,
            stop.color
        );
    }
    println!();
}

// ── Alerts & SMS ──────────────────────────────────────────────────────────────

/// Print a service reply as a success when `ok`, as a failure otherwise.
/// Returns `ok`.
pub fn render_reply(reply: &ServiceReply, ok: bool, success_fallback: &str) -> bool {
    if ok {
        println!(
            " {} {}",
            "✓".green(),
            reply.message.as_deref().unwrap_or(success_fallback)
        );
    } else {
        println!(
            " {} {}",
            "✗".red(),
            reply
                .error
                .as_deref()
                .or(reply.message.as_deref())
                .unwrap_or("Unknown error occurred")
        );
    }
    ok
}

pub fn render_wards(wards: &[&str], thresholds: &[u8]) {
    println!("\n {}\n", "Wards accepting alerts".bold());
    for ward in wards {
        println!("  • {}", ward);
    }
    let thresholds: Vec<String> = thresholds.iter().map(|t| format!("{}%", t)).collect();
    println!("\n Thresholds: {}\n", thresholds.join(", "));
}

pub fn render_sms_info(info: &SmsInfo) {
    header("SMS service");
    match &info.sms_service {
        Some(service) => {
            let enabled = if service.enabled {
                "enabled".green()
            } else {
                "disabled".red()
            };
            println!("  Provider : {}", service.provider);
            println!("  State    : {}", enabled);
            println!("  Status   : {}", service.status);
        }
        None => println!("  {}", "No SMS service information returned".yellow()),
    }
    println!();
}

// ── Metrics ───────────────────────────────────────────────────────────────────

pub fn render_metrics(m: &ModelVerification, explain: bool) {
    header("Model validation results");

    println!(" {} Enhanced model performance\n", "[MODEL]".cyan().bold());
    let mut table = new_table(&["Metric", "Value", "Meaning"]);
    for (label, key, value) in enhanced_model_rows(m) {
        let meaning = metric_detail(key).map(|d| d.interpretation).unwrap_or("");
        table.add_row(vec![
            bold(label),
            Cell::new(value).set_alignment(CellAlignment::Right),
            Cell::new(meaning),
        ]);
    }
    println!("{}\n", table);

    if !m.forecast_horizons.is_empty() {
        println!(" {} Forecast horizons\n", "[HORIZONS]".cyan().bold());
        let mut table = new_table(&["Horizon", "RMSE", "R²", "MAPE"]);
        for (horizon, h) in &m.forecast_horizons {
            table.add_row(vec![
                Cell::new(horizon),
                Cell::new(format_metric(h.rmse)).set_alignment(CellAlignment::Right),
                Cell::new(format_metric(h.r2)).set_alignment(CellAlignment::Right),
                Cell::new(format_percentage(h.mape)).set_alignment(CellAlignment::Right),
            ]);
        }
        println!("{}\n", table);
    }

    let hw = &m.high_water_levels;
    println!(" {} High water levels\n", "[HIGH WATER]".cyan().bold());
    let mut table = new_table(&["Samples", "RMSE", "R²", "MAPE"]);
    table.add_row(vec![
        Cell::new(hw.samples.map_or("N/A".to_string(), |s| s.to_string())),
        Cell::new(format_metric(hw.rmse)),
        Cell::new(format_metric(hw.r2)),
        Cell::new(format_percentage(hw.mape)),
    ]);
    println!("{}\n", table);

    let ev = &m.extreme_events;
    println!(" {} Extreme events\n", "[EXTREME]".cyan().bold());
    println!("  Correct predictions : {}", format_percentage(ev.correct_predictions).green());
    println!("  False alarms        : {}", format_percentage(ev.false_alarms).red());
    println!("  Lead time accuracy  : {}\n", format_percentage(ev.lead_time_accuracy));

    let ranked = ranked_features(&m.feature_importance);
    if !ranked.is_empty() {
        println!(" {} Feature importance\n", "[FEATURES]".cyan().bold());
        let max = ranked.first().map_or(1.0, |f| f.importance.max(f64::EPSILON));
        for f in &ranked {
            println!(
                "  {:<24} {:<30} {:.4}",
                f.feature,
                hour_bar(f.importance / max * 100.0, 30).blue(),
                f.importance
            );
        }
        println!();
    }

    if explain {
        render_explanations();
    }
}

pub fn render_explanations() {
    println!(" {} Metric explanations\n", "[HELP]".cyan().bold());
    for d in &METRIC_DETAILS {
        println!("  {}", d.name.bold());
        println!("    {}", d.description);
        println!("    Formula: {}", d.formula.italic());
        println!("    {}\n", d.interpretation.dimmed());
    }
}

// ── Contacts ──────────────────────────────────────────────────────────────────

pub fn render_contacts(contacts: &[&EmergencyContact], filter: Option<ContactCategory>) {
    let title = match filter {
        Some(c) => format!("Emergency contacts ({})", c),
        None => "Emergency contacts".to_string(),
    };
    header(&title);

    let mut table = new_table(&["Name", "Phone", "Category", "Description"]);
    for c in contacts {
        let category_color = match c.category {
            ContactCategory::Emergency => Color::Red,
            ContactCategory::Flood => Color::Blue,
            ContactCategory::Utilities => Color::DarkYellow,
            ContactCategory::Medical => Color::Green,
        };
        table.add_row(vec![
            bold(c.name),
            Cell::new(c.phone),
            Cell::new(c.category.to_string()).fg(category_color),
            Cell::new(c.description),
        ]);
    }
    println!("{}\n", table);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_bar() {
        assert_eq!(hour_bar(0.0, 40), "");
        assert_eq!(hour_bar(50.0, 40).len(), 20);
        assert_eq!(hour_bar(150.0, 40).len(), 40);
    }

    #[test]
    fn test_fill_prefers_parsable_precomputed_color() {
        let mut ward = Ward {
            name: "A".into(),
            flood_probability: 0.0,
            inundation_percent: 0.0,
            color: Some("#ff9900".into()),
            extra: Default::default(),
        };
        let palette = Palette::flood_risk();
        assert_eq!(fill_of(&ward, &palette), Rgb::new(255, 153, 0));

        ward.color = Some("not-a-color".into());
        assert_eq!(fill_of(&ward, &palette), Rgb::new(0, 128, 0));
    }

    #[test]
    fn test_reply_success_detection() {
        let ok = ServiceReply {
            success: None,
            message: Some("Alert set up successfully!".into()),
            error: None,
        };
        assert!(render_reply(&ok, ok.accepted(), "done"));

        let failed = ServiceReply {
            success: Some(false),
            message: None,
            error: Some("SMS disabled".into()),
        };
        assert!(!render_reply(&failed, failed.accepted(), "done"));
    }

    #[test]
    fn test_bare_sms_reply_is_not_sent() {
        let bare = ServiceReply::default();
        assert!(!render_reply(&bare, bare.confirmed(), "Test SMS sent successfully!"));
    }
}
