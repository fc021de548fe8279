pub mod components;
pub mod post;
pub mod remarks;

use crate::config::{Config, Layout};
use crate::domain::ScoredListing;
use components::contact_footer;
use post::render_post;

const DIGEST_HEADLINE: &str = "🔥 Top Investment Opportunities 🔥";
const CALL_TO_ACTION: &str = "📲 Reply *INVEST* to get full details & cashflow analysis.";

/// The full text written to the output file and echoed to stdout.
pub fn render_report(selected: &[ScoredListing], config: &Config) -> String {
    let footer = contact_footer(&config.contact);

    match config.layout {
        Layout::Numbered => selected
            .iter()
            .enumerate()
            .map(|(i, item)| {
                format!(
                    "\n=== Property #{} ===\n{}\n{}",
                    i + 1,
                    render_post(item, &config.mortgage),
                    footer
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),

        Layout::Digest => {
            let mut message = format!("{DIGEST_HEADLINE}\n\n");
            for item in selected {
                message.push_str(&render_post(item, &config.mortgage));
                message.push('\n');
                message.push_str(&footer);
                message.push('\n');
            }
            message.push_str(CALL_TO_ACTION);
            message.push_str("\n\n");
            message.push_str(&footer);
            message
        }
    }
}
