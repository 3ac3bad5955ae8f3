//! Stable content fingerprint of a merged table.

use crate::domain::MergedTable;
use sha2::{Digest, Sha256};

/// SHA-256 over column labels, row keys and cell bits, truncated to 16 hex
/// characters. Equal tables always hash equal.
pub fn table_fingerprint(table: &MergedTable) -> String {
    let mut hasher = Sha256::new();
    for key in table.columns().keys() {
        hasher.update(key.to_string().as_bytes());
        hasher.update([0u8]);
    }
    for (key, values) in table.rows() {
        hasher.update(key.to_string().as_bytes());
        hasher.update([0u8]);
        for value in values {
            match value {
                Some(v) => {
                    hasher.update([1u8]);
                    hasher.update(v.to_bits().to_le_bytes());
                }
                None => hasher.update([0u8]),
            }
        }
    }
    format!("{:x}", hasher.finalize())[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColumnIndex, ColumnKey, Metric, Region, RowKey};

    fn table(value: Option<f64>) -> MergedTable {
        let mut columns = ColumnIndex::new();
        columns.push(ColumnKey::year(Metric::CellPhones, 1995)).expect("push");
        MergedTable::from_rows(columns, vec![(RowKey::new(Region::Unassigned, "x"), vec![value])])
            .expect("table")
    }

    #[test]
    fn fingerprint_distinguishes_absent_from_zero() {
        assert_eq!(table_fingerprint(&table(None)), table_fingerprint(&table(None)));
        assert_ne!(table_fingerprint(&table(None)), table_fingerprint(&table(Some(0.0))));
        assert_eq!(table_fingerprint(&table(None)).len(), 16);
    }
}
