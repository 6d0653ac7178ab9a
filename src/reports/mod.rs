//! Report generation
//!
//! Reports are rendered in memory and written in one call once a walk has
//! finished, so an interrupted walk never leaves a half-written file.

use crate::errors::SiftError;
use crate::scanner::{VerdictKind, WalkReport};
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;

const RECORD_SEPARATOR_WIDTH: usize = 40;
const HEADER_RULE_WIDTH: usize = 60;

/// Render the crash report: header block, then one record per reported folder
pub fn render_crash_report(report: &WalkReport, scanned_at: DateTime<Local>) -> String {
    let flagged = report.bucket(VerdictKind::FlagForReport);
    let mut out = String::new();

    out.push_str(&format!("# 扫描时间: {}\n", scanned_at.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("# 扫描路径: {}\n", report.root.display()));
    out.push_str(&format!("# 找到 {} 个需要重现的payload\n", flagged.len()));
    out.push_str(&"#".repeat(HEADER_RULE_WIDTH));
    out.push_str("\n\n");

    for verdict in flagged {
        out.push_str(&format!("{} {}\n", crate::names::FOLDER_NAME_LABEL, verdict.folder_name));
        out.push_str(&format!("完整路径: {}\n", verdict.folder_path.display()));
        out.push_str(&format!(
            "日志文件: {}\n",
            verdict.primary_evidence_name().unwrap_or_default()
        ));
        out.push_str(&"-".repeat(RECORD_SEPARATOR_WIDTH));
        out.push('\n');
    }

    out
}

/// One identifier per line, newline terminated
pub fn render_identifiers(identifiers: &[String]) -> String {
    identifiers.iter().map(|id| format!("{id}\n")).collect()
}

/// Walk report as pretty JSON
pub fn render_json(report: &WalkReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Write `content` to `path` in a single call
pub fn write_report(path: &Path, content: &str) -> Result<(), SiftError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SiftError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| SiftError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::{FOLDER_NAME_LABEL, folder_names_from_report};
    use crate::scanner::{Verdict, VerdictReason};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample_report() -> WalkReport {
        let mut report = WalkReport::new(Path::new("/data/oneplus13"), "crash-without-recovery");
        report.record(
            Verdict::new(
                Path::new("/data/oneplus13/a_20250101_000000"),
                VerdictKind::FlagForReport,
                VerdictReason::CrashWithoutRecovery,
            )
            .with_evidence("/data/oneplus13/a_20250101_000000/run.log"),
        );
        report.record(Verdict::new(
            Path::new("/data/oneplus13/b_20250101_000000"),
            VerdictKind::Keep,
            VerdictReason::NoCrash,
        ));
        report
    }

    #[test]
    fn test_crash_report_layout() {
        let scanned_at = Local.with_ymd_and_hms(2025, 7, 4, 10, 11, 12).unwrap();
        let text = render_crash_report(&sample_report(), scanned_at);

        assert!(text.starts_with("# 扫描时间: 2025-07-04 10:11:12\n# 扫描路径: /data/oneplus13\n# 找到 1 个需要重现的payload\n"));
        assert!(text.contains("文件夹名称: a_20250101_000000\n完整路径: /data/oneplus13/a_20250101_000000\n日志文件: run.log\n----------------------------------------\n"));
        assert!(!text.contains("b_20250101_000000"));
        assert_eq!(folder_names_from_report(&text, FOLDER_NAME_LABEL), vec!["a_20250101_000000"]);
    }

    #[test]
    fn test_render_identifiers() {
        assert_eq!(render_identifiers(&["a".to_string(), "b".to_string()]), "a\nb\n");
        assert_eq!(render_identifiers(&[]), "");
    }

    #[test]
    fn test_json_report() {
        let json = render_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["policy"], "crash-without-recovery");
        assert_eq!(value["buckets"]["flag-for-report"][0]["folder_name"], "a_20250101_000000");
        assert_eq!(value["buckets"]["flag-for-report"][0]["reason"], "crash-without-recovery");
    }

    #[test]
    fn test_write_report_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out/report.txt");
        write_report(&path, "hello\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
