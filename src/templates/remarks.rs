use once_cell::sync::Lazy;
use regex::Regex;

static PAREN_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([A-Za-z0-9]+\)").expect("static regex"));

static WELCOME_SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bWelcome to [^\n.?!]*[\n.?!-]+").expect("static regex"));

static HIGHLIGHT_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(income|rent|investment|cashflow|tenant|legal|triplex|duplex|multiplex)")
        .expect("static regex")
});

/// First sentence of the agent's remarks with the address, listing codes and
/// any "Welcome to ..." opener removed, investment words in `*bold*`.
pub fn summarize(remarks: &str, address_text: Option<&str>) -> Option<String> {
    let mut text = remarks.to_string();

    if let Some(address) = address_text.filter(|a| !a.is_empty()) {
        let pattern = format!("(?i){}", regex::escape(address));
        if let Ok(re) = Regex::new(&pattern) {
            text = re.replace_all(&text, "").into_owned();
        }
    }

    text = PAREN_CODE.replace_all(&text, "").into_owned();
    text = WELCOME_SENTENCE.replace_all(&text, "").into_owned();

    let first = text.trim().split('.').next().unwrap_or("").trim();
    if first.is_empty() {
        return None;
    }

    let highlighted = HIGHLIGHT_WORDS.replace_all(first, "*$1*");
    Some(format!("{highlighted}."))
}
