//! Server-side rendering of the dashboard page.

use chrono::{DateTime, Local};

use chickenshield_protocols::{RiskReport, SenderReputation, Verdict};

/// Which explanation the report card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Plain-language explanation.
    Simple,
    /// Technical explanation.
    #[default]
    Technical,
}

impl ViewMode {
    /// Parse the `mode` query value. Anything unrecognised is technical.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("simple") => ViewMode::Simple,
            _ => ViewMode::Technical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Simple => "simple",
            ViewMode::Technical => "technical",
        }
    }

    fn toggled(self) -> Self {
        match self {
            ViewMode::Simple => ViewMode::Technical,
            ViewMode::Technical => ViewMode::Simple,
        }
    }
}

/// Color band for a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn for_score(score: i64) -> Self {
        if score < 40 {
            RiskBand::Low
        } else if score < 70 {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskBand::Low => "#64ffda",
            RiskBand::Medium => "#facc15",
            RiskBand::High => "#ef4444",
        }
    }

    fn background(&self) -> &'static str {
        match self {
            RiskBand::Low => "rgba(100, 255, 218, 0.1)",
            RiskBand::Medium => "rgba(250, 204, 21, 0.1)",
            RiskBand::High => "rgba(239, 68, 68, 0.1)",
        }
    }
}

/// The explanation text for `mode`.
///
/// Simple mode falls back to a generic analogy when the report predates
/// plain-language explanations.
pub fn explanation(report: &RiskReport, mode: ViewMode) -> String {
    match mode {
        ViewMode::Simple => {
            if !report.assessment.explanation_simple.is_empty() {
                return report.assessment.explanation_simple.clone();
            }
            let (risk, guards) = if report.verdict() == Verdict::Safe {
                ("Safe", "it's okay to enter")
            } else {
                ("Dangerous", "it's better to stay outside")
            };
            format!(
                "(A fresh scan gives a detailed simple explanation.) This website looks {}. \
                 Imagine a castle: the guards are saying {}!",
                risk, guards
            )
        }
        ViewMode::Technical => {
            if !report.assessment.explanation_technical.is_empty() {
                report.assessment.explanation_technical.clone()
            } else {
                report.explanation.clone().unwrap_or_default()
            }
        }
    }
}

/// Indicator tag as shown to users: the first underscore becomes a space.
pub fn display_tag(tag: &str) -> String {
    tag.replacen('_', " ", 1)
}

/// Escape text for inclusion in HTML content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn verdict_color(verdict: Verdict) -> &'static str {
    if verdict == Verdict::Safe { "#64ffda" } else { "#ef4444" }
}

fn reputation_color(reputation: SenderReputation) -> &'static str {
    match reputation {
        SenderReputation::High => "#4ade80",
        SenderReputation::Low => "#ef4444",
        _ => "#facc15",
    }
}

/// Local wall-clock time of an RFC 3339 timestamp, or the raw text.
fn scan_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(t) => t.with_timezone(&Local).format("%H:%M:%S").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

fn query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Everything needed to render one dashboard page.
pub struct DashboardPage<'a> {
    pub report: Option<&'a RiskReport>,
    pub history: &'a [RiskReport],
    pub mode: ViewMode,
}

impl DashboardPage<'_> {
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(8 * 1024);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        html.push_str("<title>ChickenShield</title>\n<style>");
        html.push_str(STYLE_CSS);
        html.push_str("</style>\n</head>\n<body>\n");
        self.render_header(&mut html);
        html.push_str("<main class=\"grid\">\n");
        self.render_history(&mut html);
        self.render_report(&mut html);
        html.push_str("</main>\n</body>\n</html>\n");
        html
    }

    fn self_link(&self, mode: ViewMode) -> String {
        match self.report {
            Some(r) if !r.timestamp.is_empty() => {
                format!("/?at={}&amp;mode={}", query_value(&r.timestamp), mode.as_str())
            }
            _ => format!("/?mode={}", mode.as_str()),
        }
    }

    fn render_header(&self, html: &mut String) {
        let (label, class) = match self.mode {
            ViewMode::Simple => ("KID MODE", "toggle simple"),
            ViewMode::Technical => ("PRO MODE", "toggle"),
        };
        html.push_str("<header>\n<div>\n<h1>CHICKEN SHIELD</h1>\n");
        html.push_str("<p class=\"tagline\">Cyber Threat Intelligence</p>\n</div>\n");
        html.push_str(&format!(
            "<a class=\"{}\" href=\"{}\">{}</a>\n</header>\n",
            class,
            self.self_link(self.mode.toggled()),
            label
        ));
    }

    fn render_history(&self, html: &mut String) {
        html.push_str("<section class=\"card history\">\n<h2>Recent Scans</h2>\n");
        if self.history.is_empty() {
            html.push_str("<p class=\"muted\">No history yet.</p>\n");
        }
        for item in self.history {
            let source = if item.source.is_empty() { "Unknown Source" } else { item.source.as_str() };
            html.push_str(&format!(
                "<a class=\"entry\" href=\"/?at={}&amp;mode={}\">\
                 <span class=\"verdict\" style=\"color: {}\">{}</span>\
                 <span class=\"muted\">{}</span>\
                 <p class=\"source\">{}</p></a>\n",
                query_value(&item.timestamp),
                self.mode.as_str(),
                verdict_color(item.verdict()),
                item.verdict(),
                escape_html(&scan_time(&item.timestamp)),
                escape_html(source)
            ));
        }
        html.push_str("</section>\n");
    }

    fn render_report(&self, html: &mut String) {
        html.push_str("<section class=\"card report\">\n<div class=\"report-head\">\n<div>\n");
        html.push_str("<h2>Latest Intelligence Report</h2>\n");

        let Some(report) = self.report else {
            html.push_str("<p class=\"muted\">Source: WAITING FOR DATA...</p>\n</div>\n</div>\n");
            html.push_str("<div class=\"empty\">\n<p>No active scan data found.</p>\n");
            html.push_str("<p class=\"muted\">Run a watch or scan to analyze a page.</p>\n</div>\n");
            html.push_str("</section>\n");
            return;
        };

        let kind = report
            .assessment
            .content_type
            .map(|k| k.as_str().to_uppercase())
            .unwrap_or_default();
        html.push_str(&format!("<p class=\"muted\">Source: {}</p>\n</div>\n", kind));

        let band = RiskBand::for_score(report.risk_score());
        html.push_str(&format!(
            "<div class=\"score\" style=\"color: {0}; border-color: {0}; background: {1}\">\
             <span class=\"value\">{2}</span> <span>RISK SCORE</span></div>\n</div>\n",
            band.color(),
            band.background(),
            report.risk_score()
        ));

        let heading = match self.mode {
            ViewMode::Simple => "Simple Explanation",
            ViewMode::Technical => "Technical Analysis Verdict",
        };
        html.push_str(&format!(
            "<div class=\"verdict-box {}\">\n<p class=\"label\">{}</p>\n\
             <p class=\"verdict big\" style=\"color: {}\">{}</p>\n<p>{}</p>\n</div>\n",
            self.mode.as_str(),
            heading,
            verdict_color(report.verdict()),
            report.verdict(),
            escape_html(&explanation(report, self.mode))
        ));

        html.push_str("<div class=\"indicators\">\n");
        render_tags(html, "Social Engineering", "social", &report.assessment.social_engineering_indicators);
        render_tags(html, "Technical Flags", "technical", &report.assessment.technical_indicators);
        html.push_str("</div>\n");

        let source = if report.source.is_empty() { "Unknown" } else { report.source.as_str() };
        let domain_age = match report.assessment.domain_age_estimate_days {
            Some(days) if days > 0 => format!("{} days", days),
            _ => "N/A".to_string(),
        };
        let time = if report.timestamp.is_empty() {
            "Just now".to_string()
        } else {
            scan_time(&report.timestamp)
        };
        let reputation = report.assessment.sender_reputation;

        html.push_str("<div class=\"facts\">\n");
        html.push_str(&format!(
            "<div><p class=\"label\">Source / Domain</p><p class=\"mono\" title=\"{0}\">{0}</p></div>\n",
            escape_html(source)
        ));
        html.push_str(&format!(
            "<div><p class=\"label\">Reputation</p><p style=\"color: {}\">{}</p></div>\n",
            reputation_color(reputation),
            reputation.as_str().to_uppercase()
        ));
        html.push_str(&format!(
            "<div><p class=\"label\">Domain Age</p><p>{}</p></div>\n",
            domain_age
        ));
        html.push_str(&format!(
            "<div><p class=\"label\">Scan Time</p><p>{}</p></div>\n",
            escape_html(&time)
        ));
        html.push_str("</div>\n</section>\n");
    }
}

fn render_tags(html: &mut String, title: &str, class: &str, tags: &[String]) {
    html.push_str(&format!("<div class=\"tags {}\">\n<h3>{}</h3>\n", class, title));
    if tags.is_empty() {
        html.push_str("<span class=\"muted\">None detected</span>\n");
    }
    for tag in tags {
        html.push_str(&format!("<span class=\"tag\">{}</span>\n", escape_html(&display_tag(tag))));
    }
    html.push_str("</div>\n");
}

const STYLE_CSS: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0a192f; color: #e6f1ff; padding: 1.5rem; }
a { color: inherit; text-decoration: none; }
header { display: flex; justify-content: space-between; align-items: center; padding-bottom: 1rem; margin-bottom: 2rem; border-bottom: 1px solid #233554; }
h1 { font-size: 1.5rem; letter-spacing: 0.2em; color: #fff; }
h2 { font-size: 1.1rem; margin-bottom: 1rem; color: #fff; }
h3 { font-size: 0.9rem; margin-bottom: 0.75rem; }
.tagline, .label { font-size: 0.7rem; text-transform: uppercase; letter-spacing: 0.1em; color: #64ffda; }
.toggle { padding: 0.4rem 0.8rem; border: 1px solid #1a73e8; border-radius: 999px; background: #112240; color: #9ca3af; font-size: 0.75rem; font-weight: bold; }
.toggle.simple { border-color: #ec4899; color: #f472b6; background: rgba(236, 72, 153, 0.2); }
.grid { display: grid; grid-template-columns: 1fr 2fr; gap: 1.5rem; }
.card { background: #112240; border: 1px solid #233554; border-radius: 0.75rem; padding: 1.5rem; }
.history { max-height: 24rem; overflow-y: auto; }
.entry { display: block; padding: 0.75rem; margin-bottom: 0.75rem; border: 1px solid #233554; border-radius: 0.25rem; background: #0a192f; }
.entry .verdict { font-size: 0.75rem; font-weight: bold; text-transform: uppercase; margin-right: 0.5rem; }
.source { font-size: 0.75rem; color: #d1d5db; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.muted { font-size: 0.8rem; color: #6b7280; }
.report-head { display: flex; justify-content: space-between; align-items: flex-start; margin-bottom: 1.5rem; }
.score { padding: 0.5rem 1rem; border: 1px solid; border-radius: 999px; font-size: 0.75rem; }
.score .value { font-size: 1.5rem; font-weight: bold; }
.empty { height: 10rem; display: flex; flex-direction: column; align-items: center; justify-content: center; border: 2px dashed #233554; border-radius: 0.5rem; color: #6b7280; }
.verdict-box { padding: 1rem; border: 1px solid #233554; border-radius: 0.5rem; background: #0a192f; margin-bottom: 1rem; color: #d1d5db; }
.verdict-box.simple { background: rgba(131, 24, 67, 0.2); border-color: rgba(236, 72, 153, 0.3); color: #fce7f3; }
.verdict.big { font-size: 1.25rem; font-weight: bold; text-transform: uppercase; margin: 0.25rem 0 0.5rem; }
.indicators { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.tags { padding: 1rem; border-radius: 0.5rem; background: rgba(10, 25, 47, 0.5); }
.tags.social h3 { color: #64ffda; }
.tags.technical h3 { color: #60a5fa; }
.tag { display: inline-block; padding: 0.25rem 0.5rem; margin: 0 0.5rem 0.5rem 0; font-size: 0.75rem; border-radius: 0.25rem; border: 1px solid rgba(239, 68, 68, 0.2); background: rgba(239, 68, 68, 0.1); color: #f87171; }
.tags.technical .tag { border-color: rgba(59, 130, 246, 0.2); background: rgba(59, 130, 246, 0.1); color: #60a5fa; }
.facts { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; margin-top: 1.5rem; padding-top: 1.5rem; border-top: 1px solid #233554; }
.facts > div { padding: 0.75rem; border: 1px solid #233554; border-radius: 0.25rem; background: #0a192f; overflow: hidden; }
.mono { font-family: monospace; color: #22d3ee; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
"#;
