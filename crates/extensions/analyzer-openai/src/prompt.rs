//! Analysis prompt.

use chickenshield_protocols::ContentDescription;

pub const SYSTEM_MESSAGE: &str = "You are a cybersecurity expert. Output valid JSON only.";

const EMPTY_BODY: &str = "No text content";

const REPLY_SHAPE: &str = r#"{
  "content_type": "email" or "website",
  "creation_date_estimate": "ISO date string or null",
  "domain_age_estimate_days": number or null,
  "sender_reputation": "low", "medium", "high", or "unknown",
  "social_engineering_indicators": ["urgency", "fear", "impersonation", "financial_pressure", "etc"],
  "technical_indicators": ["suspicious_links", "spoofed_domain", "tracking_pixels", "hidden_redirects"],
  "risk_score": number (0-100),
  "verdict": "safe", "suspicious", or "dangerous",
  "explanation_technical": "Detailed security analysis using cyber-security terminology.",
  "explanation_simple": "A fun, simple analogy explaining the risk to a 5-year-old (e.g. using wolves, candy, locks)."
}"#;

/// User prompt for one description, with the body cut to `body_cap`
/// characters.
pub fn build_prompt(description: &ContentDescription, body_cap: usize) -> String {
    let body = match description.body_within(body_cap) {
        "" => EMPTY_BODY,
        body => body,
    };

    format!(
        "You are a cybersecurity expert. Analyze the following content for scams, phishing, or malicious intent.\n\
         \n\
         CONTENT TYPE: {kind}\n\
         URL/SENDER: {source}\n\
         SUBJECT/TITLE: {title}\n\
         CONTENT BODY: {body}\n\
         \n\
         Analyze the content. Return ONLY a raw JSON object (no markdown, no backticks) with this structure:\n\
         {shape}\n",
        kind = description.kind,
        source = description.source,
        title = description.title,
        body = body,
        shape = REPLY_SHAPE,
    )
}
