//! Server-rendered HTML views. Everything here is a pure function of core values.

mod charts;
mod dashboard;

pub use charts::charts_page;
pub use dashboard::{DraftForm, dashboard_page};

use std::fmt::Write as _;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Nav {
    Home,
    Dashboard,
    Charts,
}

const NAV_ITEMS: [(Nav, &str, &str); 3] = [
    (Nav::Home, "/", "Home"),
    (Nav::Dashboard, "/dashboard", "Dashboard"),
    (Nav::Charts, "/charts", "Employee Charts"),
];

const STYLES: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #1f2933; background: #f5f7fa; }
.shell { display: flex; min-height: 100vh; }
nav { width: 200px; background: #1f2933; padding: 24px 16px; }
nav a { display: block; color: #cbd2d9; text-decoration: none; padding: 8px 12px; border-radius: 6px; }
nav a.active, nav a:hover { background: #323f4b; color: #fff; }
main { flex: 1; padding: 32px; }
.cards { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; margin-bottom: 24px; }
.card { background: #fff; border-radius: 8px; padding: 16px; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
.card .label { font-size: 13px; color: #616e7c; }
.card .value { font-size: 24px; font-weight: 600; margin-top: 4px; }
.filters { display: flex; gap: 8px; margin-bottom: 16px; flex-wrap: wrap; }
.toolbar { display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px; }
table { width: 100%; border-collapse: collapse; background: #fff; }
th, td { text-align: left; padding: 10px 12px; border-bottom: 1px solid #e4e7eb; }
.empty { padding: 32px; text-align: center; color: #616e7c; background: #fff; }
.pager { display: flex; gap: 12px; align-items: center; justify-content: flex-end; margin-top: 16px; }
.button { display: inline-block; padding: 8px 14px; border-radius: 6px; border: 1px solid #9aa5b1; background: #fff; color: #1f2933; text-decoration: none; cursor: pointer; font-size: 14px; }
.button.primary { background: #3e4c59; border-color: #3e4c59; color: #fff; }
.overlay { position: fixed; inset: 0; background: rgba(15,23,42,.45); display: flex; align-items: center; justify-content: center; }
.modal { background: #fff; border-radius: 10px; padding: 24px; width: 420px; }
.modal label { display: block; font-size: 13px; margin-top: 10px; }
.modal input { width: 100%; box-sizing: border-box; padding: 6px 8px; }
.modal .actions { display: flex; justify-content: flex-end; gap: 8px; margin-top: 18px; }
.chart { background: #fff; border-radius: 8px; padding: 16px; margin-bottom: 24px; }
.legend { list-style: none; padding: 0; display: flex; gap: 16px; flex-wrap: wrap; }
.swatch { display: inline-block; width: 12px; height: 12px; border-radius: 2px; margin-right: 6px; }
"#;

/// Escape text for element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `₹` followed by the amount grouped in thousands, e.g. `₹1,850,000`.
pub fn rupees(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₹{grouped}")
}

/// Query-string value encoding for links built by the views.
pub fn query_value(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

pub fn layout(title: &str, active: Nav, body: &str) -> String {
    let mut nav = String::new();
    for (item, href, label) in NAV_ITEMS {
        let class = if item == active { " class=\"active\"" } else { "" };
        let _ = write!(nav, "<a href=\"{href}\"{class}>{label}</a>");
    }
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLES}</style>\n</head>\n<body>\n\
         <div class=\"shell\"><nav>{nav}</nav><main>{body}</main></div>\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn home_page() -> String {
    let body = "<h1>Employee Records</h1>\
        <p>Browse, filter and edit the employee roster, or look at how it breaks down.</p>\
        <p><a class=\"button primary\" href=\"/dashboard\">Open dashboard</a> \
        <a class=\"button\" href=\"/charts\">View charts</a></p>";
    layout("HR Dashboard", Nav::Home, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn groups_rupee_amounts() {
        assert_eq!(rupees(0), "₹0");
        assert_eq!(rupees(999), "₹999");
        assert_eq!(rupees(1_000), "₹1,000");
        assert_eq!(rupees(300_001), "₹300,001");
        assert_eq!(rupees(3_200_000), "₹3,200,000");
    }

    #[test]
    fn query_values_are_encoded() {
        assert_eq!(query_value("emp 1&x"), "emp+1%26x");
    }

    #[test]
    fn layout_marks_active_nav_item() {
        let html = layout("Charts", Nav::Charts, "<p>x</p>");
        assert!(html.contains("<a href=\"/charts\" class=\"active\">Employee Charts</a>"));
        assert!(html.contains("<a href=\"/dashboard\">Dashboard</a>"));
        assert!(html.contains("<title>Charts</title>"));
    }
}
