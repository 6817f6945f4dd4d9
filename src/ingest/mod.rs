//! CSV ingestion of influencer metric spreadsheets.
//!
//! Reads the analytics export format the matching data originates from:
//! one row per influencer with an id, a display name, and 19 metric columns
//! that are assembled in a fixed order into the candidate's feature
//! vector. Dimension semantics live entirely in this column order; the
//! ranking core assigns no meaning to vector positions.
//!
//! A row with a missing or unparseable metric cell is skipped and counted,
//! never fatal: spreadsheets are external data and one bad row must not
//! abort the batch. Missing *columns* are a header-level error, caught
//! before any row is read.

use crate::models::{CandidateRecord, Platform};
use crate::storage::CandidateStore;
use crate::{Error, Result};
use std::io::Read;
use std::sync::Arc;

/// Metric columns composing the feature vector, in vector order.
pub const METRIC_COLUMNS: [&str; 19] = [
    "page_views",
    "reach",
    "impressions",
    "likes",
    "comments",
    "shares",
    "engagement",
    "ctr",
    "conversion_rate",
    "audience_growth_rate",
    "top_posts",
    "age_18_24",
    "age_25_34",
    "age_35_44",
    "age_45_54",
    "age_55_64",
    "gender_male",
    "gender_female",
    "gender_non_binary",
];

/// Options controlling an import run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Platform the imported candidates belong to.
    pub platform: Platform,
    /// Whether to clear the platform's existing candidates first.
    pub replace: bool,
}

/// Outcome of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows successfully validated and stored.
    pub imported: usize,
    /// Rows skipped due to missing or malformed values.
    pub skipped: usize,
}

/// Maps CSV column indices to candidate fields.
#[derive(Debug)]
struct ColumnMap {
    id: usize,
    name: Option<usize>,
    /// One index per entry of [`METRIC_COLUMNS`], in vector order.
    metrics: Vec<usize>,
}

impl ColumnMap {
    /// Creates a column map from CSV headers.
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |names: &[&str]| -> Option<usize> {
            headers
                .iter()
                .position(|h| names.contains(&h.to_lowercase().trim()))
        };

        let id = find(&["influencer_id", "id"]).ok_or_else(|| {
            Error::InvalidInput("CSV must have an 'influencer_id' (or 'id') column".to_string())
        })?;
        let name = find(&["influencer_name", "name"]);

        let mut metrics = Vec::with_capacity(METRIC_COLUMNS.len());
        let mut missing = Vec::new();
        for column in METRIC_COLUMNS {
            match find(&[column]) {
                Some(idx) => metrics.push(idx),
                None => missing.push(column),
            }
        }

        if !missing.is_empty() {
            return Err(Error::InvalidInput(format!(
                "CSV is missing metric columns: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { id, name, metrics })
    }
}

/// Imports influencer metric CSVs into a candidate store.
pub struct CsvImporter {
    store: Arc<dyn CandidateStore>,
}

impl CsvImporter {
    /// Creates an importer writing to the given store.
    #[must_use]
    pub fn new(store: Arc<dyn CandidateStore>) -> Self {
        Self { store }
    }

    /// Imports candidates from a CSV reader.
    ///
    /// With `options.replace` the platform's existing candidates are
    /// cleared first, matching the source pipeline's reload semantics.
    ///
    /// # Errors
    ///
    /// Returns an error if the headers are unusable (missing id or metric
    /// columns), if the input cannot be read, or if the store rejects a
    /// write. Individual malformed rows are counted in the summary instead.
    pub fn import_from_reader<R: Read>(
        &self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportSummary> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::OperationFailed {
                operation: "read_csv_headers".to_string(),
                cause: e.to_string(),
            })?
            .clone();
        let column_map = ColumnMap::from_headers(&headers)?;

        let mut summary = ImportSummary::default();
        let mut candidates = Vec::new();

        for (row_number, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| Error::OperationFailed {
                operation: "read_csv_record".to_string(),
                cause: e.to_string(),
            })?;

            match Self::parse_row(&column_map, &record) {
                Ok(candidate) => candidates.push(candidate),
                Err(e) => {
                    summary.skipped += 1;
                    // Row 1 is the first data row after the header.
                    tracing::warn!(row = row_number + 1, error = %e, "skipping CSV row");
                },
            }
        }

        if options.replace {
            self.store.clear(options.platform)?;
        }
        for candidate in candidates {
            self.store.upsert(options.platform, candidate)?;
            summary.imported += 1;
        }

        tracing::info!(
            platform = %options.platform,
            imported = summary.imported,
            skipped = summary.skipped,
            "CSV import complete"
        );
        Ok(summary)
    }

    /// Parses one data row into a validated candidate.
    fn parse_row(
        column_map: &ColumnMap,
        record: &csv::StringRecord,
    ) -> Result<crate::models::Candidate> {
        let id = record
            .get(column_map.id)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::InvalidInput("missing influencer_id".to_string()))?;

        let name = column_map
            .name
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        let mut vector = Vec::with_capacity(column_map.metrics.len());
        for (&idx, column) in column_map.metrics.iter().zip(METRIC_COLUMNS) {
            let cell = record
                .get(idx)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| Error::InvalidInput(format!("missing value for '{column}'")))?;
            let value: f32 = cell.parse().map_err(|_| {
                Error::InvalidInput(format!("non-numeric value '{cell}' for '{column}'"))
            })?;
            vector.push(value);
        }

        CandidateRecord {
            id: id.to_string(),
            name,
            vector: Some(vector),
        }
        .into_candidate()
    }
}
