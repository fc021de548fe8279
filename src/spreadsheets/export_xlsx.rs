use crate::domain::ScoredListing;
use crate::errors::OutputError;
use rust_xlsxwriter::Workbook;
use std::path::Path;

const HEADERS: [&str; 14] = [
    "MLS #",
    "City",
    "Community",
    "Type",
    "Price",
    "Beds",
    "Baths",
    "Parking",
    "Units",
    "Monthly Income",
    "Monthly Mortgage",
    "Monthly Expenses",
    "Monthly Cashflow",
    "URL",
];

/// Write the selected deals, one row each, to an xlsx workbook at `path`.
pub fn export_deals_xlsx(deals: &[ScoredListing], path: &Path) -> Result<(), OutputError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| OutputError::Xlsx(format!("Failed to write header '{}': {}", header, e)))?;
    }

    for (i, deal) in deals.iter().enumerate() {
        let r = (i + 1) as u32;
        let l = &deal.listing;
        let estimate = &deal.analysis.estimate;

        let text_cells: [(u16, &str); 4] = [
            (0, l.mls_number.as_str()),
            (1, l.city.as_str()),
            (2, l.community.as_str()),
            (3, l.property_type.as_deref().unwrap_or("")),
        ];
        for (col, value) in text_cells {
            worksheet
                .write_string(r, col, value)
                .map_err(|e| OutputError::Xlsx(format!("row {r} column {col}: {e}")))?;
        }

        let number_cells: [(u16, f64); 9] = [
            (4, l.price),
            (5, l.bedrooms as f64),
            (6, l.bathrooms as f64),
            (7, l.parking as f64),
            (8, l.units.unwrap_or(0) as f64),
            (9, estimate.income.round()),
            (10, estimate.mortgage.round()),
            (11, estimate.expenses.round()),
            (12, estimate.cashflow.round()),
        ];
        for (col, value) in number_cells {
            worksheet
                .write_number(r, col, value)
                .map_err(|e| OutputError::Xlsx(format!("row {r} column {col}: {e}")))?;
        }

        worksheet
            .write_string(r, 13, l.url.as_deref().unwrap_or(""))
            .map_err(|e| OutputError::Xlsx(format!("Failed to write url: {}", e)))?;
    }

    workbook
        .save(path)
        .map_err(|e| OutputError::Xlsx(format!("Failed to save workbook: {}", e)))?;

    Ok(())
}
