//! CSV polygon batches: `WKT` and `name` columns in, the same table with one
//! count column per category out.

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

use crate::analyzer::AnalysisRecord;
use crate::models::Category;

pub const WKT_COLUMN: &str = "WKT";
pub const NAME_COLUMN: &str = "name";

/// Output column holding a category's count
pub fn count_column(category: Category) -> &'static str {
    match category {
        Category::Eatery => "no. of eateries",
        Category::Office => "no. of offices",
        Category::Apartment => "no. of apartments",
        Category::PayingGuest => "no. of PGs",
        Category::Gym => "no. of gyms",
        Category::Salon => "no. of salons",
    }
}

/// Input table, every original column preserved
#[derive(Debug)]
pub struct PolygonTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    wkt_idx: usize,
    name_idx: usize,
}

impl PolygonTable {
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading polygons from {}", path.display());
        let file = File::open(path).context("Failed to open polygon file")?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let wkt_idx = headers
            .iter()
            .position(|h| h.trim() == WKT_COLUMN)
            .context("CSV must contain a 'WKT' column")?;
        let name_idx = headers
            .iter()
            .position(|h| h.trim() == NAME_COLUMN)
            .context("CSV must contain a 'name' column")?;

        let rows = csv_reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to read polygon rows")?;

        info!("Loaded {} polygons", rows.len());
        Ok(Self {
            headers,
            rows,
            wkt_idx,
            name_idx,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(name, wkt)` per row; short rows yield empty strings
    pub fn polygons(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.rows.iter().map(|row| {
            (
                row.get(self.name_idx).unwrap_or(""),
                row.get(self.wkt_idx).unwrap_or(""),
            )
        })
    }

    /// Write the table back with one count column per category, row for row.
    pub fn write_with_counts<W: Write>(
        &self,
        writer: W,
        records: &[AnalysisRecord],
        categories: &[Category],
    ) -> Result<()> {
        if records.len() != self.rows.len() {
            bail!(
                "{} analysis records for {} polygon rows",
                records.len(),
                self.rows.len()
            );
        }

        let mut csv_writer = WriterBuilder::new().flexible(true).from_writer(writer);

        let mut header = self.headers.clone();
        for category in categories {
            header.push_field(count_column(*category));
        }
        csv_writer.write_record(&header)?;

        for (row, record) in self.rows.iter().zip(records) {
            let mut out = row.clone();
            for category in categories {
                out.push_field(&record.counts.get(*category).to_string());
            }
            csv_writer.write_record(&out)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    pub fn save_with_counts(&self, path: &Path, records: &[AnalysisRecord], categories: &[Category]) -> Result<()> {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        self.write_with_counts(file, records, categories)?;
        info!("Results saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::CategoryCounts;

    const INPUT: &str = "zone,WKT,name\n\
        north,\"POLYGON((0 0, 0 1, 1 1, 0 0))\",Area_1\n\
        south,\"POLYGON((0 0, 1 1, 0 0))\",Area_2\n";

    fn record(name: &str, eateries: usize) -> AnalysisRecord {
        let mut counts = CategoryCounts::zeroed(&[Category::Eatery, Category::PayingGuest]);
        counts.set(Category::Eatery, eateries);
        AnalysisRecord {
            name: name.to_string(),
            analyzable: eateries > 0,
            skipped_pairs: 0,
            counts,
            note: None,
        }
    }

    #[test]
    fn test_reads_named_polygons() {
        let table = PolygonTable::from_reader(INPUT.as_bytes()).unwrap();
        let polygons: Vec<_> = table.polygons().collect();

        assert_eq!(table.len(), 2);
        assert_eq!(polygons[0], ("Area_1", "POLYGON((0 0, 0 1, 1 1, 0 0))"));
        assert_eq!(polygons[1].0, "Area_2");
    }

    #[test]
    fn test_missing_wkt_column() {
        let err = PolygonTable::from_reader("name,geometry\nA,x\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'WKT'"));
    }

    #[test]
    fn test_counts_appended_after_original_columns() {
        let table = PolygonTable::from_reader(INPUT.as_bytes()).unwrap();
        let records = vec![record("Area_1", 4), record("Area_2", 0)];

        let mut out = Vec::new();
        table
            .write_with_counts(&mut out, &records, &[Category::Eatery, Category::PayingGuest])
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "zone,WKT,name,no. of eateries,no. of PGs");
        assert!(lines[1].starts_with("north,"));
        assert!(lines[1].ends_with("Area_1,4,0"));
        assert!(lines[2].ends_with("Area_2,0,0"));
    }

    #[test]
    fn test_record_count_mismatch() {
        let table = PolygonTable::from_reader(INPUT.as_bytes()).unwrap();
        let mut out = Vec::new();
        assert!(table
            .write_with_counts(&mut out, &[record("Area_1", 1)], Category::all())
            .is_err());
    }
}
