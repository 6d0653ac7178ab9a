//! Payload name extraction
//!
//! Run folders are named `<payload>_<YYYYMMDD>_<HHMMSS>`. Stripping the
//! timestamp recovers the payload so repeated runs of the same payload
//! collapse to one entry.

use crate::errors::SiftError;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

/// Label that introduces a folder name record in a crash report
pub const FOLDER_NAME_LABEL: &str = "文件夹名称:";

lazy_static! {
    static ref TIMESTAMP_SUFFIX: Regex = Regex::new(r"^(.+?)_\d{8}_\d{6}$").unwrap();
}

/// Strip the trailing `_YYYYMMDD_HHMMSS` from a folder name
pub fn strip_timestamp(name: &str) -> Result<&str, SiftError> {
    TIMESTAMP_SUFFIX
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| SiftError::UnparsableName(name.to_string()))
}

/// Deduplicated, lexicographically sorted identifiers
pub fn dedupe_sorted<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(Into::into)
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Result of normalizing a batch of folder names
#[derive(Debug, Default)]
pub struct Normalized {
    pub identifiers: Vec<String>,
    /// Names that did not carry a timestamp suffix
    pub rejected: Vec<String>,
}

/// Strip, dedupe and sort a batch of folder names
///
/// Unparsable names are logged and excluded; they never fail the batch.
pub fn normalize_all<'a, I>(names: I) -> Normalized
where
    I: IntoIterator<Item = &'a str>,
{
    let mut bases = Vec::new();
    let mut rejected = Vec::new();

    for name in names {
        match strip_timestamp(name) {
            Ok(base) => {
                tracing::debug!("Extracted: {} -> {}", name, base);
                bases.push(base);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                rejected.push(name.to_string());
            }
        }
    }

    Normalized {
        identifiers: dedupe_sorted(bases),
        rejected,
    }
}

/// Folder names from the records of a crash report
///
/// Only lines starting with `label` (after trimming) are considered.
pub fn folder_names_from_report<'a>(report: &'a str, label: &str) -> Vec<&'a str> {
    report
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(label))
        .map(str::trim)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_timestamp() {
        assert_eq!(strip_timestamp("payloadX_20250131_235959").unwrap(), "payloadX");
        assert_eq!(
            strip_timestamp("mac_sch_multi_43_52_50_group10_combo30_case1085_20250704_101112").unwrap(),
            "mac_sch_multi_43_52_50_group10_combo30_case1085"
        );
        assert!(matches!(
            strip_timestamp("no_timestamp_here"),
            Err(SiftError::UnparsableName(name)) if name == "no_timestamp_here"
        ));
        assert!(strip_timestamp("_20250131_235959").is_err());
        assert!(strip_timestamp("x_20250131_235959_extra").is_err());
        assert!(strip_timestamp("x_2025013_235959").is_err());
    }

    #[test]
    fn test_normalize_dedupes_and_sorts() {
        let normalized = normalize_all([
            "b_20250101_000000",
            "a_20250101_000000",
            "a_20250102_000000",
            "garbage",
        ]);
        assert_eq!(normalized.identifiers, vec!["a", "b"]);
        assert_eq!(normalized.rejected, vec!["garbage"]);
    }

    #[test]
    fn test_dedupe_sorted() {
        assert_eq!(dedupe_sorted(["z", "a", "z"]), vec!["a", "z"]);
        assert!(dedupe_sorted(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_folder_names_from_report() {
        let report = "\
# 扫描时间: 2025-07-04 10:11:12
# 扫描路径: /data/oneplus13
# 找到 2 个需要重现的payload
############################################################

文件夹名称: a_20250101_000000
完整路径: /data/oneplus13/a_20250101_000000
日志文件: run.log
----------------------------------------
  文件夹名称:   b_20250101_000000
完整路径: /data/oneplus13/b_20250101_000000
";
        assert_eq!(
            folder_names_from_report(report, FOLDER_NAME_LABEL),
            vec!["a_20250101_000000", "b_20250101_000000"]
        );
    }
}
