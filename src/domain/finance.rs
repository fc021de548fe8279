// src/domain/finance.rs

use crate::config::{CashflowModel, MortgageTerms, MultiUnitAssumptions, SingleUnitAssumptions};
use crate::domain::listing::Listing;

/// Mortgage default-insurance premium as a fraction of the financed amount.
/// Steps down as the downpayment grows and disappears at 20%.
pub fn insurance_premium_rate(downpayment_fraction: f64) -> f64 {
    if downpayment_fraction < 0.10 {
        0.04
    } else if downpayment_fraction < 0.15 {
        0.031
    } else if downpayment_fraction < 0.20 {
        0.028
    } else {
        0.0
    }
}

/// Level monthly payment that amortizes `principal` over `years`.
pub fn monthly_payment(principal: f64, annual_rate: f64, years: u32) -> f64 {
    let m = annual_rate / 12.0;
    let n = (years * 12) as i32;
    let growth = (1.0 + m).powi(n);
    principal * (m * growth) / (growth - 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MortgageQuote {
    pub downpayment_fraction: f64,
    pub downpayment: f64,
    pub premium: f64,
    /// Amount borrowed, premium included.
    pub principal: f64,
    pub monthly_payment: f64,
}

pub fn quote(price: f64, downpayment_fraction: f64, terms: &MortgageTerms) -> MortgageQuote {
    let downpayment = price * downpayment_fraction;
    let base = price - downpayment;
    let premium = insurance_premium_rate(downpayment_fraction) * base;
    let principal = base + premium;

    MortgageQuote {
        downpayment_fraction,
        downpayment,
        premium,
        principal,
        monthly_payment: monthly_payment(principal, terms.annual_rate, terms.amortization_years),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashflowEstimate {
    pub income: f64,
    pub mortgage: f64,
    pub expenses: f64,
    pub cashflow: f64,
}

impl CashflowEstimate {
    fn new(income: f64, mortgage: f64, expenses: f64) -> Self {
        Self {
            income,
            mortgage,
            expenses,
            cashflow: income - (mortgage + expenses),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scenarios {
    /// Owner-occupier at the low downpayment and investor at the high one.
    SingleUnit {
        first_time: MortgageQuote,
        investor: MortgageQuote,
        monthly_tax: f64,
        insurance_misc: f64,
        upstairs_rent: f64,
        basement_rent: f64,
        /// Owner's monthly outlay after the basement tenant pays rent.
        live_in_cost: f64,
    },
    MultiUnit {
        quote: MortgageQuote,
        rent_per_unit: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DealAnalysis {
    pub estimate: CashflowEstimate,
    pub scenarios: Scenarios,
}

pub fn analyze(listing: &Listing, model: &CashflowModel, terms: &MortgageTerms) -> DealAnalysis {
    match model {
        CashflowModel::SingleUnit(a) => single_unit(listing, a, terms),
        CashflowModel::MultiUnit(a) => multi_unit(listing, a, terms),
    }
}

fn single_unit(listing: &Listing, a: &SingleUnitAssumptions, terms: &MortgageTerms) -> DealAnalysis {
    let first_time = quote(listing.price, a.first_time_downpayment, terms);
    let investor = quote(listing.price, a.investor_downpayment, terms);
    let monthly_tax = listing.tax_amount / 12.0;

    let income = a.upstairs_rent + a.basement_rent;
    let expenses = monthly_tax + a.monthly_utilities + a.monthly_insurance_misc;
    let live_in_cost =
        first_time.monthly_payment + monthly_tax + a.monthly_insurance_misc - a.basement_rent;

    DealAnalysis {
        estimate: CashflowEstimate::new(income, investor.monthly_payment, expenses),
        scenarios: Scenarios::SingleUnit {
            first_time,
            investor,
            monthly_tax,
            insurance_misc: a.monthly_insurance_misc,
            upstairs_rent: a.upstairs_rent,
            basement_rent: a.basement_rent,
            live_in_cost,
        },
    }
}

fn multi_unit(listing: &Listing, a: &MultiUnitAssumptions, terms: &MortgageTerms) -> DealAnalysis {
    let rent_per_unit = a.rent_for(&listing.city);
    let quote = quote(listing.price, a.downpayment, terms);

    let income = listing.units.unwrap_or(0) as f64 * rent_per_unit;
    let expenses = listing.price * a.annual_expense_ratio / 12.0;

    DealAnalysis {
        estimate: CashflowEstimate::new(income, quote.monthly_payment, expenses),
        scenarios: Scenarios::MultiUnit {
            quote,
            rent_per_unit,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Profile};

    const EPS: f64 = 1e-6;

    fn terms(rate: f64, years: u32) -> MortgageTerms {
        MortgageTerms {
            annual_rate: rate,
            amortization_years: years,
        }
    }

    fn listing(price: f64) -> Listing {
        Listing {
            mls_number: "T1".into(),
            url: None,
            address_text: None,
            area: String::new(),
            city: "Unknown".into(),
            community: "Unknown Area".into(),
            property_type: None,
            bedrooms: 4,
            bathrooms: 3,
            parking: 2,
            units: None,
            price,
            tax_amount: 0.0,
            remarks: String::new(),
            amenities: None,
            lot_size: None,
            basement_features: None,
            age_years: None,
            year_built: 2025,
        }
    }

    #[test]
    fn payment_is_positive_and_finite() {
        for principal in [1.0, 250_000.0, 640_000.0, 5_000_000.0] {
            for (rate, years) in [(0.01, 5), (0.04, 25), (0.0725, 30)] {
                let p = monthly_payment(principal, rate, years);
                assert!(p.is_finite() && p > 0.0, "{principal} {rate} {years} -> {p}");
            }
        }
    }

    #[test]
    fn premium_steps() {
        assert_eq!(insurance_premium_rate(0.05), 0.04);
        assert_eq!(insurance_premium_rate(0.10), 0.031);
        assert_eq!(insurance_premium_rate(0.149), 0.031);
        assert_eq!(insurance_premium_rate(0.15), 0.028);
        assert_eq!(insurance_premium_rate(0.20), 0.0);
        assert_eq!(insurance_premium_rate(0.35), 0.0);
    }

    #[test]
    fn twenty_percent_down_has_no_premium() {
        let q = quote(800_000.0, 0.20, &terms(0.04, 25));
        assert_eq!(q.premium, 0.0);
        assert!((q.principal - 640_000.0).abs() < EPS);
    }

    #[test]
    fn ten_percent_down_adds_premium_to_principal() {
        let q = quote(500_000.0, 0.10, &terms(0.04, 30));
        assert!((q.downpayment - 50_000.0).abs() < EPS);
        assert!((q.premium - 450_000.0 * 0.031).abs() < EPS);
        assert!((q.principal - 450_000.0 * 1.031).abs() < EPS);
    }

    #[test]
    fn reference_scenario_matches_formula() {
        let price = 800_000.0;
        let principal = price - price * 0.20;
        let m: f64 = 0.04 / 12.0;
        let n = 25 * 12;
        let growth = (1.0 + m).powf(n as f64);
        let expected = principal * m * growth / (growth - 1.0);

        let q = quote(price, 0.20, &terms(0.04, 25));
        assert!((q.monthly_payment - expected).abs() < 1e-6);
        // worked by hand: 640k principal over 300 months
        assert!((q.monthly_payment - 3378.18).abs() < 0.5);
    }

    #[test]
    fn single_unit_cashflow_subtracts_all_costs() {
        let config = Config::preset(Profile::Residential, 2025);
        let mut house = listing(900_000.0);
        house.tax_amount = 12_000.0;

        let analysis = analyze(&house, &config.cashflow, &config.mortgage);
        let payment = quote(900_000.0, 0.20, &config.mortgage).monthly_payment;

        assert!((analysis.estimate.income - 4_800.0).abs() < EPS);
        assert!((analysis.estimate.expenses - (1_000.0 + 300.0 + 200.0)).abs() < EPS);
        assert!((analysis.estimate.cashflow - (4_800.0 - payment - 1_500.0)).abs() < EPS);
        assert!(analysis.estimate.cashflow < 0.0, "a losing deal is still a result");

        let Scenarios::SingleUnit { first_time, live_in_cost, .. } = analysis.scenarios else {
            panic!("expected single-unit scenarios");
        };
        assert!(first_time.premium > 0.0);
        assert!((live_in_cost - (first_time.monthly_payment + 1_000.0 + 200.0 - 1_800.0)).abs() < EPS);
    }

    #[test]
    fn multi_unit_uses_city_rent_and_expense_ratio() {
        let config = Config::preset(Profile::Multiplex, 2025);
        let mut triplex = listing(700_000.0);
        triplex.city = "Kitchener".into();
        triplex.units = Some(3);

        let analysis = analyze(&triplex, &config.cashflow, &config.mortgage);
        let payment = monthly_payment(560_000.0, 0.04, 25);

        assert!((analysis.estimate.income - 5_100.0).abs() < EPS);
        assert!((analysis.estimate.mortgage - payment).abs() < EPS);
        assert!((analysis.estimate.expenses - 14_000.0 / 12.0).abs() < EPS);
    }

    #[test]
    fn multi_unit_without_units_has_no_income() {
        let config = Config::preset(Profile::Multiplex, 2025);
        let analysis = analyze(&listing(700_000.0), &config.cashflow, &config.mortgage);
        assert_eq!(analysis.estimate.income, 0.0);
        assert!(analysis.estimate.cashflow < 0.0);
    }
}
