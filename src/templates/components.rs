use crate::config::ContactFooter;

/// `$1,234,567`, rounded to whole dollars. Negatives render as `-$1,234`.
pub fn money(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}")
}

/// Like [`money`] but drops the cents instead of rounding them.
pub fn whole_dollars(value: f64) -> String {
    money(value.trunc())
}

/// `0.04` becomes `4.00%`.
pub fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// `0.1` becomes `10%`.
pub fn whole_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

pub fn contact_footer(contact: &ContactFooter) -> String {
    format!(
        "📞 *Contact Details*\n{}\nDM -> {}\n\n📩 *{}*\nDM -> {}\n",
        contact.agent_line, contact.agent_phone, contact.team_line, contact.team_phone
    )
}
