use mapf_challenges::{OutputFormat, ThresholdSearch};
use mapf_runtime::{cli, settings_from_matches};
use std::path::PathBuf;

#[test]
fn test_flags_build_settings() {
    let matches = cli()
        .try_get_matches_from([
            "mapf-runtime", "-m", "den312d.map", "-t", "4", "-a", "8", "-x", "10", "-s", "99",
        ])
        .unwrap();
    let settings = settings_from_matches(&matches).unwrap();
    assert_eq!(settings.map, "den312d.map");
    assert_eq!(settings.teams, 4);
    assert_eq!(settings.agents_per_team, 8);
    assert_eq!(settings.instances, 10);
    assert_eq!(settings.seed, 99);
    assert_eq!(settings.maps_dir, PathBuf::from("maps"));
    assert_eq!(settings.search, ThresholdSearch::Bisection);
}

#[test]
fn test_missing_seed_is_rejected() {
    assert!(cli()
        .try_get_matches_from(["mapf-runtime", "-m", "a.map", "-t", "1", "-a", "1", "-x", "1"])
        .is_err());
}

#[test]
fn test_optional_flags() {
    let matches = cli()
        .try_get_matches_from([
            "mapf-runtime",
            "-m",
            "a.map",
            "-t",
            "1",
            "-a",
            "2",
            "-x",
            "1",
            "-s",
            "0",
            "--maps-dir",
            "/data/maps",
            "--output-dir",
            "/tmp/out",
            "--search",
            "descending",
            "--format",
            "json",
            "--unbounded-retries",
        ])
        .unwrap();
    let settings = settings_from_matches(&matches).unwrap();
    assert_eq!(settings.maps_dir, PathBuf::from("/data/maps"));
    assert_eq!(settings.output_dir, PathBuf::from("/tmp/out"));
    assert_eq!(settings.search, ThresholdSearch::Descending);
    assert_eq!(settings.format, OutputFormat::Json);
    assert_eq!(settings.max_retries, None);
}

#[test]
fn test_settings_json_with_override() {
    let matches = cli()
        .try_get_matches_from([
            "mapf-runtime",
            "--settings",
            r#"{"map": "a.map", "teams": 2, "agents_per_team": 3, "instances": 4, "seed": 5}"#,
            "-s",
            "6",
            "--max-retries",
            "10",
        ])
        .unwrap();
    let settings = settings_from_matches(&matches).unwrap();
    assert_eq!(settings.teams, 2);
    assert_eq!(settings.seed, 6);
    assert_eq!(settings.max_retries, Some(10));
}

#[test]
fn test_unknown_search_is_rejected() {
    let matches = cli()
        .try_get_matches_from([
            "mapf-runtime", "-m", "a.map", "-t", "1", "-a", "1", "-x", "1", "-s", "0", "--search",
            "greedy",
        ])
        .unwrap();
    assert!(settings_from_matches(&matches).is_err());
}

#[test]
fn test_zero_teams_is_rejected() {
    let matches = cli()
        .try_get_matches_from([
            "mapf-runtime", "-m", "a.map", "-t", "0", "-a", "1", "-x", "1", "-s", "0",
        ])
        .unwrap();
    assert!(settings_from_matches(&matches).is_err());
}
