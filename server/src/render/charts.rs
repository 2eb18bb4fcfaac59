use std::{f64::consts::TAU, fmt::Write as _};

use products_hr::{ChartData, DepartmentShare, aggregate::palette_color};

use super::{Nav, escape, layout, rupees};

const PIE_RADIUS: f64 = 110.0;
const PIE_CENTER: f64 = 130.0;
const BAR_WIDTH: f64 = 640.0;
const BAR_HEIGHT: f64 = 260.0;
const BAR_PLOT_TOP: f64 = 24.0;
const BAR_PLOT_BOTTOM: f64 = 220.0;

pub fn charts_page(data: &ChartData) -> String {
    let mut body = String::from("<h1>Employee Charts</h1>");
    body.push_str("<section class=\"chart\"><h2>Employees by Department</h2>");
    body.push_str(&pie_chart(&data.department_distribution));
    body.push_str("</section>");

    let histogram: Vec<(String, u64)> = data
        .salary_histogram
        .iter()
        .map(|entry| (entry.bucket.label().to_string(), entry.count as u64))
        .collect();
    body.push_str("<section class=\"chart\"><h2>Salary Distribution</h2>");
    body.push_str(&bar_chart(&histogram, palette_color(1), |count| count.to_string()));
    body.push_str("</section>");

    let averages: Vec<(String, u64)> = data
        .average_salary_by_department
        .iter()
        .map(|entry| (entry.name.clone(), entry.average))
        .collect();
    body.push_str("<section class=\"chart\"><h2>Average Salary by Department</h2>");
    body.push_str(&bar_chart(&averages, palette_color(0), rupees));
    body.push_str("</section>");

    layout("Employee Charts", Nav::Charts, &body)
}

fn point(angle: f64) -> (f64, f64) {
    // Angles start at 12 o'clock and run clockwise.
    (
        PIE_CENTER + PIE_RADIUS * angle.sin(),
        PIE_CENTER - PIE_RADIUS * angle.cos(),
    )
}

fn pie_chart(shares: &[DepartmentShare]) -> String {
    let total: usize = shares.iter().map(|share| share.count).sum();
    if total == 0 {
        return "<p class=\"empty\">No employees to chart.</p>".to_string();
    }
    let size = PIE_CENTER * 2.0;
    let mut svg = format!(
        "<svg class=\"pie\" viewBox=\"0 0 {size} {size}\" width=\"{size}\" height=\"{size}\" role=\"img\">"
    );
    let mut start = 0.0_f64;
    for share in shares.iter().filter(|share| share.count > 0) {
        let name = escape(&share.name);
        if share.count == total {
            let _ = write!(
                svg,
                "<circle cx=\"{PIE_CENTER}\" cy=\"{PIE_CENTER}\" r=\"{PIE_RADIUS}\" fill=\"{}\"><title>{name}: {}</title></circle>",
                share.color, share.count
            );
            break;
        }
        let sweep = TAU * share.count as f64 / total as f64;
        let end = start + sweep;
        let (x1, y1) = point(start);
        let (x2, y2) = point(end);
        let large_arc = u8::from(sweep > TAU / 2.0);
        let _ = write!(
            svg,
            "<path d=\"M{PIE_CENTER},{PIE_CENTER} L{x1:.2},{y1:.2} A{PIE_RADIUS},{PIE_RADIUS} 0 {large_arc} 1 {x2:.2},{y2:.2} Z\" fill=\"{}\"><title>{name}: {}</title></path>",
            share.color, share.count
        );
        start = end;
    }
    svg.push_str("</svg><ul class=\"legend\">");
    for share in shares {
        let _ = write!(
            svg,
            "<li><span class=\"swatch\" style=\"background:{}\"></span>{} ({})</li>",
            share.color,
            escape(&share.name),
            share.count
        );
    }
    svg.push_str("</ul>");
    svg
}

fn bar_chart(bars: &[(String, u64)], color: &str, format_value: impl Fn(u64) -> String) -> String {
    if bars.is_empty() {
        return "<p class=\"empty\">No employees to chart.</p>".to_string();
    }
    let max = bars.iter().map(|(_, value)| *value).max().unwrap_or(0).max(1);
    let slot = BAR_WIDTH / bars.len() as f64;
    let bar = slot * 0.6;
    let plot = BAR_PLOT_BOTTOM - BAR_PLOT_TOP;
    let mut svg = format!(
        "<svg class=\"bars\" viewBox=\"0 0 {BAR_WIDTH} {BAR_HEIGHT}\" width=\"{BAR_WIDTH}\" height=\"{BAR_HEIGHT}\" role=\"img\">\
         <line x1=\"0\" y1=\"{BAR_PLOT_BOTTOM}\" x2=\"{BAR_WIDTH}\" y2=\"{BAR_PLOT_BOTTOM}\" stroke=\"#9aa5b1\"/>"
    );
    for (index, (label, value)) in bars.iter().enumerate() {
        let height = plot * *value as f64 / max as f64;
        let x = slot * index as f64 + (slot - bar) / 2.0;
        let y = BAR_PLOT_BOTTOM - height;
        let middle = x + bar / 2.0;
        let label = escape(label);
        let shown = escape(&format_value(*value));
        let _ = write!(
            svg,
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{bar:.2}\" height=\"{height:.2}\" fill=\"{color}\"><title>{label}: {shown}</title></rect>\
             <text x=\"{middle:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"12\">{shown}</text>\
             <text x=\"{middle:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"12\">{label}</text>",
            y - 6.0,
            BAR_PLOT_BOTTOM + 18.0,
        );
    }
    svg.push_str("</svg>");
    svg
}
