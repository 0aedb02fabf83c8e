// Fixed-width console table for search results

use pricelens_catalog::PriceRecord;

use crate::util::{format_amount, format_metric, pad_right};

pub(crate) const HEADERS: [&str; 6] = ["#", "Product", "Price", "Weight", "File", "Price per kg"];
const WIDTHS: [usize; 6] = [5, 30, 10, 8, 20, 12];

fn line(cells: [&str; 6]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(WIDTHS)
        .map(|(cell, width)| pad_right(cell, width))
        .collect();
    padded.join(" ").trim_end().to_string()
}

/// Render records as a header line plus one numbered line per record.
pub(crate) fn render_table(records: &[&PriceRecord]) -> String {
    let mut out = line(HEADERS);
    out.push('\n');

    for (idx, record) in records.iter().enumerate() {
        let number = (idx + 1).to_string();
        let price = format_amount(record.price);
        let weight = format_amount(record.weight);
        let metric = format_metric(record.price_per_unit);
        out.push_str(&line([
            &number,
            &record.product,
            &price,
            &weight,
            &record.source_file,
            &metric,
        ]));
        out.push('\n');
    }

    out
}
