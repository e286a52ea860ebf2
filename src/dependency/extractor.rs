use log::*;
use regex::Captures;
use std::collections::HashMap;

use crate::{
    cache,
    dependency::{
        record::{ConfigFileInput, DependencyRecord},
        variant::ConfigFileVariant,
        version::normalize_version,
    },
};

/// Extracts dependency records from a configuration file.
///
/// The version-aware pattern is tried first. Only when it matches nothing is
/// the version-less pattern tried, so files that never pin versions are
/// still picked up.
pub fn extract(
    input: &ConfigFileInput,
    renames: &HashMap<String, String>,
) -> Vec<DependencyRecord> {
    let Some(content) = input.content.as_deref() else {
        return vec![];
    };

    let records = extract_pass(input, content, renames, true);

    if !records.is_empty() {
        debug!(
            "extracted {} versioned {} dependencies",
            records.len(),
            input.variant
        );
        return records;
    }

    let records = extract_pass(input, content, renames, false);

    debug!(
        "extracted {} unversioned {} dependencies",
        records.len(),
        input.variant
    );

    records
}

fn extract_pass(
    input: &ConfigFileInput,
    content: &str,
    renames: &HashMap<String, String>,
    include_version: bool,
) -> Vec<DependencyRecord> {
    let regex = input.variant.pattern(include_version);

    regex
        .captures_iter(content)
        .filter_map(|caps| {
            record_from_captures(input, &caps, renames, include_version)
        })
        .collect()
}

fn record_from_captures(
    input: &ConfigFileInput,
    caps: &Captures,
    renames: &HashMap<String, String>,
    include_version: bool,
) -> Option<DependencyRecord> {
    let expected = ConfigFileVariant::expected_groups(include_version);
    let groups = caps.iter().skip(1).flatten().count();

    debug_assert_eq!(
        groups, expected,
        "maybe invalid regular expression for {}: {}",
        input.variant, &caps[0]
    );

    if groups != expected {
        error!(
            "skipping malformed {} match: {}",
            input.variant,
            &caps[0]
        );
        return None;
    }

    let owner = caps.get(1)?.as_str();
    let name = caps.get(2)?.as_str();

    if owner.is_empty() || name.is_empty() {
        return None;
    }

    let version = if include_version {
        caps.get(3).map(|m| normalize_version(m.as_str()))
    } else {
        None
    };

    let cached = cache::locate(input.cache_root.as_deref(), name);

    Some(
        DependencyRecord::new(name, renames.get(name).cloned(), owner, version)
            .with_cached_license(cached),
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::cache::CacheLookupResult;

    fn no_renames() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn extracts_versioned_carthage_dependency() {
        let input = ConfigFileInput::carthage(Some(
            r#"github "mono0926/NativePopup" "1.8.4""#.into(),
        ));

        let records = extract(&input, &no_renames());

        assert_eq!(
            records,
            vec![DependencyRecord::new(
                "NativePopup",
                None,
                "mono0926",
                Some("1.8.4".into())
            )]
        );
    }

    #[test]
    fn extracts_versioned_mint_dependency() {
        let input =
            ConfigFileInput::mint(Some("mono0926/NativePopup@1.0.0".into()));

        let records = extract(&input, &no_renames());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].owner, "mono0926");
        assert_eq!(records[0].name, "NativePopup");
        assert_eq!(records[0].version, Some("1.0.0".into()));
        assert_eq!(records[0].cached_license, CacheLookupResult::NotConfigured);
    }

    #[test]
    fn extracts_versioned_license_plist_dependency() {
        let input = ConfigFileInput::license_plist(Some(
            "mono0926/NativePopup 1.0.0".into(),
        ));

        let records = extract(&input, &no_renames());

        assert_eq!(
            records,
            vec![DependencyRecord::new(
                "NativePopup",
                None,
                "mono0926",
                Some("1.0.0".into())
            )]
        );
    }

    #[test]
    fn falls_back_to_unversioned_pattern() {
        let input = ConfigFileInput::carthage(Some(
            r#"github "mono0926/NativePopup""#.into(),
        ));

        let records = extract(&input, &no_renames());

        assert_eq!(
            records,
            vec![DependencyRecord::new("NativePopup", None, "mono0926", None)]
        );
    }

    #[test]
    fn versioned_matches_take_precedence() {
        let content = r#"
github "mono0926/NativePopup" "1.8.4"
github "ReactiveX/RxSwift"
"#;
        let input = ConfigFileInput::carthage(Some(content.into()));

        let records = extract(&input, &no_renames());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "NativePopup");
    }

    #[test]
    fn extracts_multiple_lines() {
        let content = r#"
github "Alamofire/Alamofire" "5.8.1"
github "ReactiveX/RxSwift" "6.6.0"
github "onevcat/Kingfisher" "7.10.2"
"#;
        let input = ConfigFileInput::carthage(Some(content.into()));

        let records = extract(&input, &no_renames());

        let names: Vec<&str> =
            records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alamofire", "RxSwift", "Kingfisher"]);
    }

    #[test]
    fn shortens_commit_hash_versions() {
        let input = ConfigFileInput::carthage(Some(
            r#"github "mono0926/NativePopup" "e2a4d1f7c0b9a8e7d6c5b4a3928170f6e5d4c3b2""#
                .into(),
        ));

        let records = extract(&input, &no_renames());

        assert_eq!(records[0].version, Some("e2a4d1f".into()));
    }

    #[test]
    fn applies_renames() {
        let input =
            ConfigFileInput::mint(Some("mono0926/NativePopup@1.0.0".into()));
        let renames =
            HashMap::from([("NativePopup".to_string(), "Popup".to_string())]);

        let records = extract(&input, &renames);

        assert_eq!(records[0].display_name, Some("Popup".into()));
        assert_eq!(records[0].preferred_name(), "Popup");
    }

    #[test]
    fn missing_content_yields_nothing() {
        let input = ConfigFileInput::mint(None);
        assert!(extract(&input, &no_renames()).is_empty());
    }

    #[test]
    fn unrelated_content_yields_nothing() {
        let input = ConfigFileInput::carthage(Some(
            "binary \"https://example.com/spec.json\" ~> 1.0".into(),
        ));
        assert!(extract(&input, &no_renames()).is_empty());
    }

    #[test]
    fn looks_up_cache_for_each_record() {
        let cache = TempDir::new().unwrap();
        fs::create_dir_all(cache.path().join("NativePopup")).unwrap();
        fs::write(cache.path().join("NativePopup/LICENSE"), "MIT License")
            .unwrap();
        fs::create_dir_all(cache.path().join("RxSwift")).unwrap();

        let content = r#"
github "mono0926/NativePopup" "1.8.4"
github "ReactiveX/RxSwift" "6.6.0"
"#;
        let input = ConfigFileInput::carthage(Some(content.into()))
            .with_cache_root(Some(cache.path().to_path_buf()));

        let records = extract(&input, &no_renames());

        assert_eq!(
            records[0].cached_license,
            CacheLookupResult::Found(cache.path().join("NativePopup/LICENSE"))
        );
        assert_eq!(records[1].cached_license, CacheLookupResult::CheckedAbsent);
    }
}
