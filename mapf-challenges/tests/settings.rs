use mapf_challenges::{GeneratorError, GeneratorSettings, OutputFormat, ThresholdSearch};
use mapf_utils::{dejsonify, jsonify};
use std::path::PathBuf;

#[test]
fn test_defaults_from_json() {
    let settings: GeneratorSettings = dejsonify(
        r#"{"map": "den312d.map", "teams": 2, "agents_per_team": 5, "instances": 3, "seed": 42}"#,
    )
    .unwrap();
    assert_eq!(settings, GeneratorSettings::new("den312d.map", 2, 5, 3, 42));
    assert_eq!(settings.maps_dir, PathBuf::from("maps"));
    assert_eq!(settings.output_dir, PathBuf::from("instances"));
    assert_eq!(settings.search, ThresholdSearch::Bisection);
    assert_eq!(settings.format, OutputFormat::Picat);
    assert_eq!(settings.max_retries, Some(1_000_000));
}

#[test]
fn test_missing_required_field() {
    assert!(dejsonify::<GeneratorSettings>(
        r#"{"map": "den312d.map", "teams": 2, "agents_per_team": 5, "instances": 3}"#
    )
    .is_err());
}

#[test]
fn test_explicit_options_from_json() {
    let settings: GeneratorSettings = dejsonify(
        r#"{"map": "m.map", "teams": 1, "agents_per_team": 1, "instances": 1, "seed": 0,
            "search": "descending", "format": "json", "max_retries": null}"#,
    )
    .unwrap();
    assert_eq!(settings.search, ThresholdSearch::Descending);
    assert_eq!(settings.format, OutputFormat::Json);
    assert_eq!(settings.max_retries, None);
}

#[test]
fn test_json_round_trip() {
    let settings = GeneratorSettings::new("m.map", 4, 2, 10, 7);
    assert_eq!(
        dejsonify::<GeneratorSettings>(&jsonify(&settings)).unwrap(),
        settings
    );
}

#[test]
fn test_validate() {
    assert!(GeneratorSettings::new("m.map", 1, 1, 1, 0).validate().is_ok());
    for settings in [
        GeneratorSettings::new("", 1, 1, 1, 0),
        GeneratorSettings::new("m.map", 0, 1, 1, 0),
        GeneratorSettings::new("m.map", 1, 0, 1, 0),
        GeneratorSettings::new("m.map", 1, 1, 0, 0),
    ] {
        assert!(matches!(settings.validate(), Err(GeneratorError::Config(_))));
    }
    let mut settings = GeneratorSettings::new("m.map", 1, 1, 1, 0);
    settings.max_retries = Some(0);
    assert!(settings.validate().is_err());
}

#[test]
fn test_instance_file_name() {
    let mut settings = GeneratorSettings::new("den312d.map", 3, 12, 5, 0);
    assert_eq!(settings.instance_file_name(4), "den312d.map_03_12_4.pi");
    assert_eq!(
        settings.instance_path(0),
        PathBuf::from("instances").join("den312d.map_03_12_0.pi")
    );
    settings.format = OutputFormat::Json;
    settings.teams = 100;
    assert_eq!(settings.instance_file_name(1), "den312d.map_100_12_1.json");
}
