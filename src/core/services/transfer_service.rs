use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, FixedOffset};

use crate::core::errors::{IssueLensError, Result};
use crate::core::models::event::EventRecord;
use crate::core::models::export_bundle::{ExportBundle, ExportField, ImportPayload};
use crate::core::models::filter_state::FilterState;

/// Largest file `import` accepts.
pub const MAX_IMPORT_BYTES: u64 = 2 * 1024 * 1024;

/// Builds export bundles and validates import files.
pub struct TransferService;

impl TransferService {
    /// Default export file name, e.g. `errors_export_2024-01-05.json`.
    pub fn export_file_name(now: &DateTime<FixedOffset>) -> String {
        format!("errors_export_{}.json", now.format("%Y-%m-%d"))
    }

    /// Project `events` (already filtered) onto `fields`.
    ///
    /// Duplicate fields are collapsed, keeping the first position.
    pub fn build_export(
        &self,
        events: &[&EventRecord],
        filter: &FilterState,
        fields: &[ExportField],
        now: DateTime<FixedOffset>,
    ) -> ExportBundle {
        let mut seen = HashSet::new();
        let fields: Vec<ExportField> = fields.iter().copied().filter(|f| seen.insert(*f)).collect();

        let data = events
            .iter()
            .map(|event| {
                fields
                    .iter()
                    .map(|f| (f.key().to_string(), f.extract(event)))
                    .collect()
            })
            .collect();

        ExportBundle {
            generated_at: now,
            period: filter.window,
            projects: filter.projects.iter().cloned().collect(),
            fields,
            data,
        }
    }

    /// Check that `path` looks like an importable file: a `.json`
    /// extension and a size under `MAX_IMPORT_BYTES`.
    pub fn validate_import_file(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(IssueLensError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if !is_json {
            return Err(IssueLensError::ImportRejected {
                reason: format!("{} is not a .json file", path.display()),
            });
        }
        let size = std::fs::metadata(path)?.len();
        if size >= MAX_IMPORT_BYTES {
            return Err(IssueLensError::ImportRejected {
                reason: format!(
                    "{} is {} bytes; files must be smaller than 2 MiB",
                    path.display(),
                    size
                ),
            });
        }
        Ok(())
    }

    /// Parse an import body into records.
    ///
    /// Accepts event records or rows of an `export` bundle.
    pub fn parse_import(&self, content: &str) -> Result<Vec<EventRecord>> {
        serde_json::from_str::<ImportPayload>(content)
            .map_err(|e| IssueLensError::ImportRejected {
                reason: format!("expected an array of events or an object with a 'data' array ({e})"),
            })?
            .into_records()
    }

    /// Merge `incoming` into `store`, re-homing every record to
    /// `project_uuid`.
    ///
    /// Records whose uuid already exists in the store (or earlier in
    /// `incoming`) are skipped. Returns `(imported, skipped)`.
    pub fn merge_into(
        &self,
        store: &mut Vec<EventRecord>,
        incoming: Vec<EventRecord>,
        project_uuid: &str,
        project_title: Option<&str>,
    ) -> (usize, usize) {
        let mut known: HashSet<String> = store
            .iter()
            .filter(|e| !e.uuid.is_empty())
            .map(|e| e.uuid.clone())
            .collect();

        let mut imported = 0;
        let mut skipped = 0;
        for mut event in incoming {
            if !event.uuid.is_empty() && !known.insert(event.uuid.clone()) {
                skipped += 1;
                continue;
            }
            event.project_uuid = project_uuid.to_string();
            if let Some(title) = project_title {
                event.project_title = Some(title.to_string());
            }
            store.push(event);
            imported += 1;
        }
        (imported, skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::event::parse_timestamp;
    use crate::core::models::window::TimeWindow;
    use tempfile::TempDir;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-05T12:00:00+00:00").unwrap()
    }

    fn event(uuid: &str, project: &str) -> EventRecord {
        let mut ev = EventRecord::new(uuid, parse_timestamp("2024-01-03T10:00:00Z").unwrap(), project);
        ev.kind = Some("ValueError".into());
        ev.value = Some("bad input".into());
        ev
    }

    #[test]
    fn file_name_uses_date_of_now() {
        assert_eq!(
            TransferService::export_file_name(&now()),
            "errors_export_2024-01-05.json"
        );
    }

    #[test]
    fn export_projects_selected_fields_only() {
        let events = [event("1", "A")];
        let refs: Vec<&EventRecord> = events.iter().collect();
        let filter = FilterState::new(TimeWindow::TwoWeeks, ["A"]);

        let bundle = TransferService.build_export(
            &refs,
            &filter,
            &[ExportField::ExceptionType, ExportField::Function, ExportField::ExceptionType],
            now(),
        );

        assert_eq!(bundle.fields, vec![ExportField::ExceptionType, ExportField::Function]);
        assert_eq!(bundle.projects, vec!["A".to_string()]);
        assert_eq!(bundle.data.len(), 1);
        let row = &bundle.data[0];
        assert_eq!(row.len(), 2);
        assert_eq!(row["exception_type"], "ValueError");
        assert!(row["function"].is_null());
    }

    #[test]
    fn export_serializes_period_code() {
        let filter = FilterState::new(TimeWindow::Month, Vec::<String>::new());
        let bundle = TransferService.build_export(&[], &filter, &ExportField::ALL, now());
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["period"], "1m");
        assert_eq!(json["fields"].as_array().unwrap().len(), 8);
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn rejects_non_json_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("events.csv");
        std::fs::write(&path, "[]").unwrap();

        let err = TransferService.validate_import_file(&path).unwrap_err();
        assert!(matches!(err, IssueLensError::ImportRejected { .. }));
    }

    #[test]
    fn rejects_oversized_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.json");
        std::fs::write(&path, vec![b' '; MAX_IMPORT_BYTES as usize]).unwrap();

        let err = TransferService.validate_import_file(&path).unwrap_err();
        assert!(err.to_string().contains("2 MiB"));
    }

    #[test]
    fn accepts_small_json_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ok.JSON");
        std::fs::write(&path, "[]").unwrap();

        assert!(TransferService.validate_import_file(&path).is_ok());
    }

    #[test]
    fn parse_rejects_wrong_shape() {
        let err = TransferService.parse_import(r#"{"rows": []}"#).unwrap_err();
        assert!(matches!(err, IssueLensError::ImportRejected { .. }));
    }

    #[test]
    fn merge_rehomes_and_skips_duplicates() {
        let mut store = vec![event("1", "A")];
        let incoming = vec![event("1", "X"), event("2", "X"), event("2", "X"), event("", "X")];

        let (imported, skipped) = TransferService.merge_into(&mut store, incoming, "B", Some("Shop"));

        assert_eq!((imported, skipped), (2, 2));
        assert_eq!(store.len(), 3);
        assert!(store[1..].iter().all(|e| e.project_uuid == "B"));
        assert_eq!(store[1].project_title.as_deref(), Some("Shop"));
        assert_eq!(store[0].project_uuid, "A");
    }
}
