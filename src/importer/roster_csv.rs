// ==========================================
// 值班排班系统 - 名册 CSV 导入
// ==========================================
// 表头: name, active, roles, tiers, unavailable
// 列表字段以 ';' 分隔；tiers 形如 audio_video:experienced
// ==========================================

use crate::domain::types::{DayMonth, SkillTier};
use crate::domain::volunteer::Volunteer;
use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

const LIST_SEPARATOR: char = ';';

// ==========================================
// RosterCsvImporter - 名册导入器
// ==========================================
pub struct RosterCsvImporter;

impl RosterCsvImporter {
    /// 从 CSV 文件导入名册
    pub fn import(path: &Path) -> ImportResult<Vec<Volunteer>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        if let Some(ext) = path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        let volunteers = Self::import_reader(file)?;
        info!(path = %path.display(), count = volunteers.len(), "名册导入完成");
        Ok(volunteers)
    }

    /// 从任意读取源导入名册
    pub fn import_reader<R: Read>(source: R) -> ImportResult<Vec<Volunteer>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(source);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut volunteers = Vec::new();
        let mut seen = HashSet::new();

        for (row_idx, result) in reader.records().enumerate() {
            // 行号从表头下一行开始计
            let row = row_idx + 2;
            let record = result?;

            let mut row_map = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.as_str(), value.trim());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            let volunteer = Self::map_row(row, &row_map)?;
            if !seen.insert(volunteer.name.clone()) {
                return Err(ImportError::DuplicateName {
                    row,
                    name: volunteer.name,
                });
            }
            volunteers.push(volunteer);
        }

        Ok(volunteers)
    }

    fn map_row(row: usize, fields: &HashMap<&str, &str>) -> ImportResult<Volunteer> {
        let field = |name: &str| fields.get(name).copied().unwrap_or("");

        let name = field("name");
        if name.is_empty() {
            return Err(ImportError::MissingField {
                row,
                field: "name".to_string(),
            });
        }

        let mut volunteer = Volunteer::new(name);
        volunteer.active = parse_active(row, field("active"))?;

        for role in split_list(field("roles")) {
            volunteer.roles.insert(role.to_string());
        }

        for entry in split_list(field("tiers")) {
            let (role, tier) = entry.split_once(':').ok_or_else(|| ImportError::FieldValueError {
                row,
                field: "tiers".to_string(),
                message: format!("期望 role:tier，实际 {}", entry),
            })?;
            let tier: SkillTier = tier.parse().map_err(|message| ImportError::FieldValueError {
                row,
                field: "tiers".to_string(),
                message,
            })?;
            volunteer.skill_tiers.insert(role.trim().to_string(), tier);
        }

        for entry in split_list(field("unavailable")) {
            let date: DayMonth = entry.parse().map_err(|e: crate::domain::DayMonthParseError| {
                ImportError::FieldValueError {
                    row,
                    field: "unavailable".to_string(),
                    message: e.to_string(),
                }
            })?;
            volunteer.unavailable_dates.insert(date);
        }

        Ok(volunteer)
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_active(row: usize, raw: &str) -> ImportResult<bool> {
    match raw.to_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "y" | "sim" => Ok(true),
        "false" | "0" | "no" | "n" | "nao" => Ok(false),
        other => Err(ImportError::FieldValueError {
            row,
            field: "active".to_string(),
            message: format!("无法识别的布尔值: {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const HEADER: &str = "name,active,roles,tiers,unavailable";

    #[test]
    fn test_import_reader_full_row() {
        let csv = format!(
            "{}\nRicardo,true,attendant;audio_video,audio_video:experienced,04/01;11/01\n",
            HEADER
        );
        let roster = RosterCsvImporter::import_reader(csv.as_bytes()).unwrap();

        assert_eq!(roster.len(), 1);
        let v = &roster[0];
        assert_eq!(v.name, "Ricardo");
        assert!(v.active);
        assert!(v.roles.contains("attendant"));
        assert_eq!(v.tier_for("audio_video"), Some(SkillTier::Experienced));
        assert!(v.is_unavailable_on(DayMonth::new(11, 1).unwrap()));
    }

    #[test]
    fn test_import_reader_skips_blank_rows_and_defaults_active() {
        let csv = format!("{}\nA,,attendant,,\n,,,,\nB,no,attendant,,\n", HEADER);
        let roster = RosterCsvImporter::import_reader(csv.as_bytes()).unwrap();

        assert_eq!(roster.len(), 2);
        assert!(roster[0].active);
        assert!(!roster[1].active);
    }

    #[test]
    fn test_import_reader_rejects_duplicate_names() {
        let csv = format!("{}\nA,,attendant,,\nA,,roving_mic,,\n", HEADER);
        let err = RosterCsvImporter::import_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::DuplicateName { row: 3, .. }));
    }

    #[test]
    fn test_import_reader_reports_bad_date_row() {
        let csv = format!("{}\nA,,attendant,,31-01\n", HEADER);
        let err = RosterCsvImporter::import_reader(csv.as_bytes()).unwrap_err();
        match err {
            ImportError::FieldValueError { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "unavailable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_import_reader_missing_name() {
        let csv = format!("{}\n,true,attendant,,\n", HEADER);
        let err = RosterCsvImporter::import_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::MissingField { row: 2, .. }));
    }

    #[test]
    fn test_import_file() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "Everton,true,,audio_video:treinando,").unwrap();

        let roster = RosterCsvImporter::import(file.path()).unwrap();
        assert_eq!(roster[0].tier_for("audio_video"), Some(SkillTier::Training));
        assert!(roster[0].is_qualified_for("audio_video"));
    }

    #[test]
    fn test_import_file_not_found_and_wrong_extension() {
        let err = RosterCsvImporter::import(Path::new("non_existent.csv")).unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));

        let file = Builder::new().suffix(".txt").tempfile().unwrap();
        let err = RosterCsvImporter::import(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    }
}
