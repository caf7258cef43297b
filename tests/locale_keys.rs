use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde_yaml::Value;

fn flatten(prefix: &str, value: &Value, out: &mut BTreeSet<String>) {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let key = k.as_str().unwrap_or_default();
                let path = if prefix.is_empty() {
                    key.to_string()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, v, out);
            }
        }
        _ => {
            out.insert(prefix.to_string());
        }
    }
}

fn keys(locale: &str) -> BTreeSet<String> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("locales")
        .join(format!("{locale}.yml"));
    let text = fs::read_to_string(&path).unwrap();
    let value: Value = serde_yaml::from_str(&text).unwrap();
    let mut out = BTreeSet::new();
    flatten("", &value, &mut out);
    out
}

#[test]
fn locales_define_the_same_keys() {
    let en = keys("en");
    let pt = keys("pt-BR");
    let missing_pt: Vec<_> = en.difference(&pt).collect();
    let missing_en: Vec<_> = pt.difference(&en).collect();
    assert!(missing_pt.is_empty(), "missing in pt-BR: {missing_pt:?}");
    assert!(missing_en.is_empty(), "missing in en: {missing_en:?}");
}

#[test]
fn placeholders_match_between_locales() {
    let placeholders = |locale: &str| -> Vec<(String, Vec<String>)> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("locales")
            .join(format!("{locale}.yml"));
        let text = fs::read_to_string(&path).unwrap();
        let value: Value = serde_yaml::from_str(&text).unwrap();
        let mut out = Vec::new();
        collect_placeholders("", &value, &mut out);
        out.sort();
        out
    };
    assert_eq!(placeholders("en"), placeholders("pt-BR"));
}

fn collect_placeholders(prefix: &str, value: &Value, out: &mut Vec<(String, Vec<String>)>) {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let key = k.as_str().unwrap_or_default();
                collect_placeholders(&format!("{prefix}.{key}"), v, out);
            }
        }
        Value::String(s) => {
            let mut names: Vec<String> = s
                .split("%{")
                .skip(1)
                .filter_map(|rest| rest.split_once('}').map(|(name, _)| name.to_string()))
                .collect();
            names.sort();
            out.push((prefix.to_string(), names));
        }
        _ => {}
    }
}
