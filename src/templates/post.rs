use crate::config::MortgageTerms;
use crate::domain::finance::{MortgageQuote, Scenarios};
use crate::domain::{Listing, ScoredListing};
use crate::templates::components::{money, percent, title_case, whole_dollars, whole_percent};
use crate::templates::remarks::summarize;
use std::fmt::Write;

/// One chat post for a scored listing, without the contact footer.
pub fn render_post(item: &ScoredListing, terms: &MortgageTerms) -> String {
    match &item.analysis.scenarios {
        Scenarios::SingleUnit {
            first_time,
            investor,
            monthly_tax,
            insurance_misc,
            upstairs_rent,
            basement_rent,
            live_in_cost,
        } => {
            let mut out = String::new();
            let l = &item.listing;

            if l.area.is_empty() {
                out.push_str("🔥 *Investment Opportunity*\n");
            } else {
                let _ = writeln!(out, "🔥 *Investment Opportunity in {}*", l.area);
            }

            out.push_str("*Property Details*\n");
            let _ = writeln!(
                out,
                "- List Price: {} | Bedrooms: {} | Bathrooms: {} | Parking: {}",
                money(l.price),
                l.bedrooms,
                l.bathrooms,
                l.parking
            );
            if l.age_years.is_some() {
                let _ = writeln!(out, "- Year Built: {}", l.year_built);
            }
            optional_line(&mut out, "Basement", l.basement_features.as_deref());
            optional_line(&mut out, "Lot Size", l.lot_size.as_deref());
            optional_line(&mut out, "Amenities Nearby", l.amenities.as_deref());

            out.push('\n');
            assumptions(&mut out, l, terms, &format!(
                "Upstairs rent {}, Basement rent {}.",
                money(*upstairs_rent),
                money(*basement_rent)
            ));

            out.push('\n');
            out.push_str("*Scenario 1 - 🏠 For First Time Home Buyers*\n");
            mortgage_line(&mut out, first_time, money);
            let _ = writeln!(out, "    - Monthly Property Tax: {}", money(*monthly_tax));
            let _ = writeln!(out, "    - Insurance + Misc: {}", money(*insurance_misc));
            let _ = writeln!(out, "    - 💰 Basement rent: {}", money(*basement_rent));
            let _ = writeln!(
                out,
                "    👉 Live in this house worth {} for {}/month",
                money(l.price),
                money(*live_in_cost)
            );
            out.push_str("    ----------\n\n");

            out.push_str("*Scenario 2 - 💼 For Investment Buyers*\n");
            mortgage_line(&mut out, investor, money);
            let _ = writeln!(out, "    - Monthly Property Tax: {}", money(*monthly_tax));
            let _ = writeln!(out, "    - Insurance + Misc: {}", money(*insurance_misc));
            let _ = writeln!(
                out,
                "    - 💰 Net Rent: Upstairs = {}, Basement = {}",
                money(*upstairs_rent),
                money(*basement_rent)
            );
            let _ = writeln!(
                out,
                "    📈 *Get a Monthly Cashflow* of : {} from the property",
                money(item.cashflow())
            );
            out.push_str("    ----------\n");
            out
        }

        Scenarios::MultiUnit { quote, rent_per_unit } => {
            let mut out = String::new();
            let l = &item.listing;
            let estimate = &item.analysis.estimate;

            let _ = writeln!(out, "🔥 *Investment Opportunity in {} - {}*", l.city, l.community);
            out.push_str("*Property Details*\n");
            let units = l
                .units
                .map(|u| u.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            let _ = writeln!(
                out,
                "- List Price: {} | Units: {} | Bedrooms: {} | Bathrooms: {}",
                money(l.price),
                units,
                l.bedrooms,
                l.bathrooms
            );
            if let Some(kind) = &l.property_type {
                let _ = writeln!(out, "- Type: {}", title_case(kind));
            }
            optional_line(&mut out, "Amenities Nearby", l.amenities.as_deref());

            out.push('\n');
            assumptions(&mut out, l, terms, &format!(
                "Average rent per unit: {}.",
                money(*rent_per_unit)
            ));

            out.push('\n');
            out.push_str("*💼 Opportunity For Investment Buyers*\n");
            // truncated, same as the ranking threshold
            mortgage_line(&mut out, quote, whole_dollars);
            let _ = writeln!(out, "    - Monthly Expenses: {}", whole_dollars(estimate.expenses));
            let _ = writeln!(out, "    - Est. Income: {}/mo", whole_dollars(estimate.income));
            let _ = writeln!(
                out,
                "    📈 *Get a Monthly Cashflow* of : {}/mo from the property",
                whole_dollars(estimate.cashflow)
            );

            if let Some(summary) = summarize(&l.remarks, l.address_text.as_deref()) {
                let _ = writeln!(out, "\n💬 {summary}");
            }
            out
        }
    }
}

fn optional_line(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = writeln!(out, "- {label}: {value}");
    }
}

fn mortgage_line(out: &mut String, quote: &MortgageQuote, dollars: fn(f64) -> String) {
    let _ = writeln!(
        out,
        "    - Monthly Mortgage ({} down): {}",
        whole_percent(quote.downpayment_fraction),
        dollars(quote.monthly_payment)
    );
}

fn assumptions(out: &mut String, listing: &Listing, terms: &MortgageTerms, rent_line: &str) {
    out.push_str("_*Assumptions based on Current Mortgage Rates and Estimates:*_\n");
    let _ = writeln!(out, "Purchase Price as is - {}", money(listing.price));
    let _ = writeln!(out, "Mortgage Rate - {}", percent(terms.annual_rate));
    let _ = writeln!(out, "{} year amortization", terms.amortization_years);
    let _ = writeln!(out, "{rent_line}");
}
