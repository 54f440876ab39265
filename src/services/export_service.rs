use std::io::Write;

use crate::models::PurchaseRecord;

pub const EXPORT_HEADER: [&str; 8] = [
    "id", "reference", "phoneNumber", "network", "capacity", "price", "status", "createdAt",
];

/// Write purchases as CSV. Returns the number of data rows written.
pub fn write_purchases_csv<W: Write>(rows: &[PurchaseRecord], writer: W) -> Result<usize, csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXPORT_HEADER)?;
    for r in rows {
        let capacity = r.capacity.to_string();
        let price = format!("{:.2}", r.price);
        let created_at = r.created_at.map(|t| t.to_rfc3339()).unwrap_or_default();
        wtr.write_record([
            r.id.as_str(),
            r.reference.as_str(),
            r.phone_number.as_str(),
            r.network.as_str(),
            capacity.as_str(),
            price.as_str(),
            r.status.as_str(),
            created_at.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(rows.len())
}
