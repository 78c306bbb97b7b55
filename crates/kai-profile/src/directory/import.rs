use std::io::Read;

use serde::Deserialize;

use super::domain::NewEmployeeRecord;
use crate::assessment::archetypes::ArchetypeKey;

/// Reads `name,email,department,style_score,readiness_score,exposure_score,archetype`
/// rows into new employee records for `org_code`.
pub(crate) fn parse_employee_rows<R: Read>(
    reader: R,
    org_code: &str,
) -> Result<Vec<NewEmployeeRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<EmployeeRow>().enumerate() {
        let row = row?;
        // header is line 1
        let line = index + 2;

        let archetype =
            ArchetypeKey::parse(&row.archetype).ok_or_else(|| ImportError::UnknownArchetype {
                line,
                value: row.archetype.clone(),
            })?;
        if row.name.is_empty() || row.email.is_empty() {
            return Err(ImportError::MissingIdentity { line });
        }

        records.push(NewEmployeeRecord {
            org_code: Some(org_code.to_string()),
            name: row.name,
            email: row.email,
            department: row.department,
            style_score: row.style_score.clamp(-10.0, 10.0),
            readiness_score: row.readiness_score.clamp(0.0, 100.0),
            exposure_score: row.exposure_score.min(100),
            archetype,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct EmployeeRow {
    name: String,
    email: String,
    #[serde(default)]
    department: String,
    style_score: f64,
    readiness_score: f64,
    exposure_score: u8,
    archetype: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("invalid employee CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: unknown archetype '{value}'")]
    UnknownArchetype { line: usize, value: String },
    #[error("line {line}: name and email are required")]
    MissingIdentity { line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_rows_and_accepts_display_names() {
        let csv = "name,email,department,style_score,readiness_score,exposure_score,archetype\n\
                   Jan Jansen , jan@demo.com,Finance,-6,85,80,SYSTEM_GUARDIAN\n\
                   Sophie de Vries,sophie@demo.com,Marketing,12,92,60,The Visionary Architect\n";

        let rows = parse_employee_rows(Cursor::new(csv), "DEMO2025").expect("valid csv");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Jan Jansen");
        assert_eq!(rows[0].archetype, ArchetypeKey::SystemGuardian);
        assert_eq!(rows[1].style_score, 10.0);
        assert_eq!(rows[1].org_code.as_deref(), Some("DEMO2025"));
    }

    #[test]
    fn reports_line_of_unknown_archetype() {
        let csv = "name,email,department,style_score,readiness_score,exposure_score,archetype\n\
                   Karel Visser,karel@demo.com,Legal,-5,20,20,GRUMPY\n";

        let err = parse_employee_rows(Cursor::new(csv), "DEMO2025").expect_err("unknown archetype");

        assert!(matches!(err, ImportError::UnknownArchetype { line: 2, .. }));
    }

    #[test]
    fn malformed_numbers_surface_csv_errors() {
        let csv = "name,email,department,style_score,readiness_score,exposure_score,archetype\n\
                   Lisa de Jong,lisa@demo.com,HR,zero,65,30,PRAGMATIC_BRIDGE\n";

        let err = parse_employee_rows(Cursor::new(csv), "DEMO2025").expect_err("bad number");

        assert!(matches!(err, ImportError::Csv(_)));
    }
}
