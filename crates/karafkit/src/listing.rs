//! Parsers for console listing output.
//!
//! The console emits human-readable tables even with `--no-format`, so
//! parsing is deliberately tolerant: lines are split on whitespace and
//! anything that does not tokenize to the expected shape (banners,
//! headers, separators) is silently dropped. Console format drift
//! should land here and nowhere else.

use std::collections::BTreeMap;

use crate::types::{FeatureRecord, RepoRecord};

/// Parse `feature:list` output into feature records.
///
/// A data line has at least 4 fields: name, version, then the state in
/// field 3. Extra trailing fields are ignored, shorter lines skipped.
pub fn parse_feature_listing(raw: &str) -> Vec<FeatureRecord> {
    raw.lines().filter_map(parse_feature_line).collect()
}

fn parse_feature_line(line: &str) -> Option<FeatureRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return None;
    }
    Some(FeatureRecord {
        name: fields[0].to_string(),
        version: fields[1].to_string(),
        state: fields[3].to_string(),
    })
}

/// Parse `feature:repo-list` output into a url-keyed map.
///
/// A data line is exactly 2 fields: name, url. Any other field count is
/// skipped.
pub fn parse_repo_listing(raw: &str) -> BTreeMap<String, RepoRecord> {
    let mut repos = BTreeMap::new();
    for line in raw.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            continue;
        }
        repos.insert(
            fields[1].to_string(),
            RepoRecord {
                name: fields[0].to_string(),
                url: fields[1].to_string(),
            },
        );
    }
    repos
}

/// Normalize a requested version for comparison. Deployed versions use
/// `.` where descriptors use `-` (`1.0.0-SNAPSHOT` deploys as
/// `1.0.0.SNAPSHOT`).
pub fn normalize_desired_version(version: &str) -> String {
    version.replace('-', ".")
}

/// Normalize a listed version for comparison; some listings separate
/// with `_` instead.
pub fn normalize_listed_version(version: &str) -> String {
    version.replace('_', ".")
}
