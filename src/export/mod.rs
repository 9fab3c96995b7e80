pub mod excel;

use crate::batch::{BatchFailure, BatchReport};
use crate::error::Result;
use crate::reader::FileQuote;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// レポート形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Json,
    Excel,
    Both,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            "both" => Ok(ReportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use json, excel, or both", s)),
        }
    }
}

/// JSONレポート
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    generated_at: String,
    quotes: &'a [FileQuote],
    failures: &'a [BatchFailure],
}

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, title: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        (
            output.join(format!("{}.json", title)),
            output.join(format!("{}.xlsx", title)),
        )
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(title);
        (
            parent.join(format!("{}.json", stem)),
            parent.join(format!("{}.xlsx", stem)),
        )
    }
}

pub fn generate_json(quotes: &[FileQuote], failures: &[BatchFailure], output_path: &Path) -> Result<()> {
    let report = JsonReport {
        generated_at: chrono::Local::now().to_rfc3339(),
        quotes,
        failures,
    };
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// レポートを出力し、書き出したパスを返す
pub fn export_report(
    report: &BatchReport,
    format: ReportFormat,
    output: &Path,
    title: &str,
    default_currency: &str,
) -> Result<Vec<PathBuf>> {
    let written = match format {
        ReportFormat::Json => {
            let path = output_path_for_format(output, title, "json");
            generate_json(&report.quotes, &report.failures, &path)?;
            vec![path]
        }
        ReportFormat::Excel => {
            let path = output_path_for_format(output, title, "xlsx");
            excel::generate_excel(&report.quotes, &report.failures, &path, title, default_currency)?;
            vec![path]
        }
        ReportFormat::Both => {
            let (json_path, excel_path) = output_paths_for_both(output, title);
            generate_json(&report.quotes, &report.failures, &json_path)?;
            excel::generate_excel(&report.quotes, &report.failures, &excel_path, title, default_currency)?;
            vec![json_path, excel_path]
        }
    };

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("xlsx".parse::<ReportFormat>().unwrap(), ReportFormat::Excel);
        assert_eq!("both".parse::<ReportFormat>().unwrap(), ReportFormat::Both);
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_output_paths_for_both_with_file() {
        let (json, xlsx) = output_paths_for_both(Path::new("out/report.json"), "quotes");
        assert_eq!(json, PathBuf::from("out/report.json"));
        assert_eq!(xlsx, PathBuf::from("out/report.xlsx"));
    }

    #[test]
    fn test_output_path_for_dir() {
        let path = output_path_for_format(Path::new("reports"), "quotes", "xlsx");
        assert_eq!(path, PathBuf::from("reports/quotes.xlsx"));
    }
}
