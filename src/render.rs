//! HTML rendering
//!
//! Every string that can originate from the client is escaped before it is
//! interpolated into markup.

use crate::domain::{ConnectionRecord, GeoInfo};

/// Escape `& < > " '` for safe interpolation into HTML text or attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
    body { font-family: system-ui, Arial, sans-serif; margin: 40px; background: #fafafa; }
    .card { max-width: 760px; margin: auto; padding: 24px; border: 1px solid #ddd; border-radius: 12px; background: #fff; }
    code { background: #f1f1f1; padding: 2px 6px; border-radius: 4px; word-break: break-all; }
    .muted { color: #666; }
    .row { display: flex; gap: 12px; flex-wrap: wrap; }
    .row div { flex: 1 1 320px; margin-bottom: 8px; }
"#;

/// Render the full connection page
pub fn render_page(record: &ConnectionRecord) -> String {
    let mut rows = String::new();

    if let Some(id) = record.connection_id {
        push_row(&mut rows, "Connection ID", &id.to_string());
    }
    push_row(&mut rows, "Client IP", &record.client_address);
    push_row(
        &mut rows,
        "Client Port (Remote Port)",
        &record
            .client_port
            .map(|p| p.to_string())
            .unwrap_or_else(|| "Unknown (behind proxy)".to_string()),
    );
    if let Some(address) = &record.server_address {
        push_row(&mut rows, "Server IP", address);
    }
    if let Some(port) = record.server_port {
        push_row(&mut rows, "Server Port (Local Port)", &port.to_string());
    }
    push_row(&mut rows, "Timestamp", &record.timestamp_iso());
    push_row(
        &mut rows,
        "High-resolution clock (ns)",
        &record.monotonic_reading.to_string(),
    );
    push_row(&mut rows, "User-Agent", &record.user_agent);
    push_row(&mut rows, "Accept-Language", &record.accept_language);
    push_row(&mut rows, "Fingerprint (SHA-256)", &record.fingerprint);

    let geo_section = record.geo.as_ref().map(render_geo).unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Your connection details</title>
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <style>{STYLE}</style>
</head>
<body>
  <div class="card">
    <h1>Your current connection</h1>
    <div class="row">
{rows}    </div>
{geo_section}    <hr/>
    <p class="muted">Refresh the page and the <code>Client Port</code> will most likely change; clients pick a new ephemeral port for each connection. Behind a reverse proxy the real client port cannot be known.</p>
    <p class="muted">The fingerprint is derived from headers any client can forge. It identifies, it does not authenticate.</p>
  </div>
</body>
</html>
"#
    )
}

fn render_geo(geo: &GeoInfo) -> String {
    let mut rows = String::new();

    let fields = [
        ("City", geo.city.as_deref()),
        ("Region", geo.region.as_deref()),
        ("Country", geo.country_name.as_deref()),
        ("Organization", geo.organization.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            push_row(&mut rows, label, value);
        }
    }

    let mut section = String::from("    <hr/>\n    <h2>Approximate location</h2>\n");

    if !rows.is_empty() {
        section.push_str(&format!("    <div class=\"row\">\n{rows}    </div>\n"));
    }

    if let Some((lat, lon)) = geo.coordinates() {
        section.push_str(&format!(
            "    <p>Coordinates: <code>{lat}, {lon}</code> (<a href=\"https://www.openstreetmap.org/?mlat={lat}&amp;mlon={lon}#map=10/{lat}/{lon}\" rel=\"noopener noreferrer\" target=\"_blank\">map</a>)</p>\n"
        ));
    }

    if let Some(message) = &geo.message {
        section.push_str(&format!(
            "    <p class=\"muted\">{}</p>\n",
            escape_html(message)
        ));
    }

    section
}

fn push_row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!(
        "      <div><strong>{}:</strong> <code>{}</code></div>\n",
        label,
        escape_html(value)
    ));
}
