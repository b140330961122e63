use super::*;
use chrono::NaiveDate;

#[test]
fn test_initial_sentinel() {
    let v = Version::initial();
    assert!(v.is_initial());
    assert_eq!(v, "0");
    assert_eq!(Version::parse("0").unwrap(), v);
}

#[test]
fn test_dir_name_with_hhmm_time() {
    let parsed = Version::from_dir_name("20230101-0000-init").unwrap();
    assert_eq!(parsed.version, "20230101-0000000");
    assert_eq!(parsed.label, "init");
}

#[test]
fn test_dir_name_with_hhmmss_time() {
    let parsed = Version::from_dir_name("20230215-134501-add-column").unwrap();
    assert_eq!(parsed.version, "20230215-1345010");
    assert_eq!(parsed.label, "add-column");
}

#[test]
fn test_dir_name_without_label() {
    let parsed = Version::from_dir_name("20230215-1345017").unwrap();
    assert_eq!(parsed.version, "20230215-1345017");
    assert_eq!(parsed.label, "");
}

#[test]
fn test_dir_name_rejects_bad_prefix() {
    for name in [
        "init",
        "2023-0101-init",
        "20230101-12-init",
        "20231301-0000-init",
        "20230230-0000-init",
        "20230101-2500-init",
        "20230101-12a0-init",
    ] {
        let err = Version::from_dir_name(name).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidMigrationName { .. }),
            "{name} should be rejected, got {err}"
        );
    }
}

#[test]
fn test_parse_canonicalizes_legacy_marker() {
    let v = Version::parse("20230101-120000").unwrap();
    assert_eq!(v.as_str(), "20230101-1200000");
    let v = Version::parse(" 20230101-1200000\n").unwrap();
    assert_eq!(v.as_str(), "20230101-1200000");
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(matches!(
        Version::parse("version").unwrap_err(),
        CoreError::InvalidVersion { .. }
    ));
    assert!(Version::parse("").is_err());
}

#[test]
fn test_lexicographic_order_matches_chronological() {
    let a = Version::from_dir_name("20221231-2359-a").unwrap().version;
    let b = Version::from_dir_name("20230101-0000-b").unwrap().version;
    let c = Version::from_dir_name("20230101-000001-c").unwrap().version;
    let d = Version::from_dir_name("20230101-0000011-d").unwrap().version;
    assert!(Version::initial() < a);
    assert!(a < b);
    assert!(b < c);
    assert!(c < d);
}

#[test]
fn test_same_prefix_different_label_share_version() {
    let a = Version::from_dir_name("20230101-0000-alpha").unwrap();
    let b = Version::from_dir_name("20230101-0000-beta").unwrap();
    assert_eq!(a.version, b.version);
}

#[test]
fn test_from_timestamp() {
    let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_milli_opt(7, 5, 3, 450)
        .unwrap();
    assert_eq!(Version::from_timestamp(ts).as_str(), "20240309-0705034");
}

#[test]
fn test_from_str() {
    let v: Version = "20240309-0705".parse().unwrap();
    assert_eq!(v.to_string(), "20240309-0705000");
}

#[test]
fn test_dir_name_with_hundredths_from_earlier_releases() {
    let parsed = Version::from_dir_name("20190412-103075-add_users").unwrap();
    assert_eq!(parsed.version, "20190412-1030750");
    assert_eq!(parsed.label, "add_users");

    let earlier = Version::from_dir_name("20190412-103059-a").unwrap().version;
    let later = Version::from_dir_name("20190412-103099-b").unwrap().version;
    let next_minute = Version::from_dir_name("20190412-103100-c").unwrap().version;
    assert!(earlier < parsed.version);
    assert!(parsed.version < later);
    assert!(later < next_minute);
}

#[test]
fn test_marker_fits_legacy_column() {
    let v = Version::parse("20230101-1200").unwrap();
    assert_eq!(v.marker(), "20230101-120000");
    assert_eq!(Version::parse(v.marker()).unwrap(), v);

    let v = Version::parse("20230101-1200007").unwrap();
    assert_eq!(v.marker(), "20230101-1200007");
    assert_eq!(Version::initial().marker(), "0");
}
