//! HTML dashboard rendering.
//!
//! Every label and value is escaped before it is embedded; record values
//! come straight from the device and are never assumed to be safe.

use std::fmt::Write;

use crate::error::TelemetryError;
use crate::parsers::types::{Field, Snapshot, UpsReadings};
use crate::settings::DashboardSettings;

const STYLESHEET: &str = "https://cdnjs.cloudflare.com/ajax/libs/bootstrap/5.1.3/css/bootstrap.min.css";

const STYLE: &str = r#"body { font-family: 'Roboto', sans-serif; background-color: #f8f9fa; margin: 0; }
header { background-color: #6c757d; padding: 20px; text-align: center; color: white; }
header img { width: 150px; }
.card { border: none; border-radius: 15px; box-shadow: 0px 4px 10px rgba(0,0,0,0.1); }
.card-body { padding: 20px; }
.card h2 { font-size: 1.5rem; }
.card p { font-size: 1.2rem; font-weight: bold; }
.sidebar { background-color: #6c757d; min-height: 100vh; padding-top: 30px; }
.sidebar a { color: white; display: block; padding: 15px; text-decoration: none; margin-bottom: 10px; }
.sidebar a:hover { background-color: #343a40; border-radius: 10px; }
.alert { margin: 20px; }"#;

const SIDEBAR: [&str; 8] = [
    "Dashboard",
    "Temperature",
    "Humidity",
    "Fire Alarm",
    "Water Leak",
    "Smoke",
    "UPS",
    "IPDU",
];

/// A single dashboard card
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub value: String,
    pub unit: &'static str,
}

impl Card {
    fn new(title: impl Into<String>, value: &str, unit: &'static str) -> Self {
        Self {
            title: title.into(),
            value: value.to_string(),
            unit,
        }
    }
}

/// Escape `& < > " '` for embedding in HTML text or attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Cards in dashboard order: environment, inputs, UPS, IPDU.
pub fn cards(snapshot: &Snapshot) -> Vec<Card> {
    let mut cards = Vec::new();

    for field in [
        Field::Temp,
        Field::Hum,
        Field::FireStatus,
        Field::WldStatus,
        Field::SmokeStatus,
    ]
    .into_iter()
    .chain(Field::INPUTS)
    {
        if let Some(value) = snapshot.scalar(field) {
            cards.push(Card::new(field.label(), value, field.unit()));
        }
    }

    for ((title, unit), value) in UpsReadings::LABELS.iter().zip(snapshot.ups.as_slice()) {
        cards.push(Card::new(*title, value, *unit));
    }

    for (i, value) in snapshot.ipdu.as_slice().iter().enumerate() {
        cards.push(Card::new(format!("IPDU Value {}", i + 1), value, ""));
    }

    cards
}

fn push_card(html: &mut String, card: &Card) {
    let value = if card.unit.is_empty() {
        escape_html(&card.value)
    } else {
        format!("{} {}", escape_html(&card.value), card.unit)
    };
    let _ = write!(
        html,
        r#"<div class="col-md-3"><div class="card text-center"><div class="card-body"><h2>{}</h2><p>{}</p></div></div></div>
"#,
        escape_html(&card.title),
        value
    );
}

fn page(settings: &DashboardSettings, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    if settings.refresh_secs > 0 {
        let _ = writeln!(
            html,
            "<meta http-equiv=\"refresh\" content=\"{}\">",
            settings.refresh_secs
        );
    }
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(html, "<title>{}</title>", escape_html(&settings.title));
    let _ = writeln!(html, "<link href=\"{}\" rel=\"stylesheet\">", STYLESHEET);
    let _ = writeln!(html, "<style>\n{}\n</style>\n</head>\n<body>", STYLE);

    html.push_str("<header>");
    match &settings.logo {
        Some(logo) => {
            let _ = write!(
                html,
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(logo),
                escape_html(&settings.title)
            );
        }
        None => {
            let _ = write!(html, "<h1>{}</h1>", escape_html(&settings.title));
        }
    }
    html.push_str("</header>\n");

    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

/// Render the full dashboard page for `snapshot`.
pub fn render_dashboard(snapshot: &Snapshot, settings: &DashboardSettings) -> String {
    let mut body = String::from("<div class=\"d-flex\">\n<div class=\"sidebar\">\n");
    for entry in SIDEBAR {
        let _ = writeln!(body, "<a href=\"#\">{}</a>", entry);
    }
    body.push_str("</div>\n<div class=\"container-fluid\">\n");
    let _ = writeln!(
        body,
        "<p class=\"text-muted\">Last update: {}</p>",
        escape_html(&snapshot.timestamp)
    );
    body.push_str("<div class=\"row g-4\">\n");
    for card in cards(snapshot) {
        push_card(&mut body, &card);
    }
    body.push_str("</div>\n</div>\n</div>\n");

    page(settings, &body)
}

/// Render a page carrying the user-visible message for `error`.
pub fn render_error(error: &TelemetryError, settings: &DashboardSettings) -> String {
    let body = format!(
        "<div class=\"alert alert-danger\" role=\"alert\">{}</div>\n",
        escape_html(&error.to_string())
    );
    page(settings, &body)
}
