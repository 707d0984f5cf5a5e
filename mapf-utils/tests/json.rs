use mapf_utils::{dejsonify, jsonify, jsonify_pretty, load_json_arg};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Sample {
    zeta: u32,
    alpha: Vec<u32>,
}

#[test]
fn test_jsonify_sorts_keys() {
    let value = json!({"b": 1, "a": {"d": 2, "c": 3}});
    assert_eq!(jsonify(&value), r#"{"a":{"c":3,"d":2},"b":1}"#);
}

#[test]
fn test_jsonify_sorts_keys_inside_arrays() {
    let value = json!([{"y": 1, "x": 2}]);
    assert_eq!(jsonify(&value), r#"[{"x":2,"y":1}]"#);
}

#[test]
fn test_jsonify_struct() {
    let sample = Sample {
        zeta: 7,
        alpha: vec![1, 2],
    };
    assert_eq!(jsonify(&sample), r#"{"alpha":[1,2],"zeta":7}"#);
    assert_eq!(
        dejsonify::<Value>(&jsonify_pretty(&sample)).unwrap(),
        json!({"alpha": [1, 2], "zeta": 7})
    );
}

#[test]
fn test_load_json_arg_inline() {
    let sample: Sample = load_json_arg(r#"{"zeta": 1, "alpha": []}"#).unwrap();
    assert_eq!(
        sample,
        Sample {
            zeta: 1,
            alpha: vec![]
        }
    );
}

#[test]
fn test_load_json_arg_file() {
    let path = std::env::temp_dir().join(format!("mapf_utils_{}.json", std::process::id()));
    std::fs::write(&path, r#"{"zeta": 4, "alpha": [9]}"#).unwrap();
    let sample: Sample = load_json_arg(path.to_str().unwrap()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(sample.zeta, 4);
    assert_eq!(sample.alpha, vec![9]);
}

#[test]
fn test_load_json_arg_missing_file() {
    assert!(load_json_arg::<Sample>("/nonexistent/dir/settings.json").is_err());
}

#[test]
fn test_load_json_arg_invalid() {
    assert!(load_json_arg::<Sample>("not json").is_err());
}
