use std::fs;
use std::process::Command;

use combicards::content::{Category, ContentStore, DatasetSource};
use combicards::store::schema::CARDS_FILE;

const RAW: &str = r#"[
    {"type": "formula", "q": "Qual é a fórmula da permutação simples?", "a": "$P_n = n!$"},
    {"type": "exemplo", "q": "Quantos anagramas tem a palavra BANANA?", "a": "$\\frac{6!}{3!\\,2!} = 60$"},
    {"type": "exemplo", "q": "De quantas formas escolher 3 de 10 pessoas?", "a": "$C_{10,3} = 120$"},
    {"type": "dica", "q": "Qual a diferença entre arranjo e combinação?", "a": "No arranjo a ordem importa."},
    {"type": "exemplo", "q": "", "a": "sem pergunta"}
]"#;

#[test]
fn annotated_output_loads_as_a_deck() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.json");
    fs::write(&input, RAW).unwrap();
    let out_dir = dir.path().join("out");

    let status = Command::new(env!("CARGO_BIN_EXE_annotate_cards"))
        .arg(&input)
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--title")
        .arg("Teste")
        .status()
        .unwrap();
    assert!(status.success());
    assert!(out_dir.join(CARDS_FILE).exists());

    let cards = ContentStore::new(DatasetSource::Directory(out_dir.clone()))
        .load_cards()
        .unwrap();
    assert_eq!(cards.len(), 4);
    assert_eq!(cards.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert_eq!(cards[0].category, Category::Permutation);
    assert_eq!(cards[2].category, Category::Combination);
    assert!(cards[1].tags.iter().any(|t| t == "anagrama"));

    let text = fs::read_to_string(out_dir.join(CARDS_FILE)).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["metadata"]["total_cards"], 4);
    assert_eq!(doc["metadata"]["title"], "Teste");
}

#[test]
fn unreadable_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_annotate_cards"))
        .arg(dir.path().join("missing.json"))
        .arg("--output-dir")
        .arg(dir.path())
        .status()
        .unwrap();
    assert!(!status.success());
}
