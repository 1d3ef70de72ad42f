//! 分類の統合テスト
//!
//! 辞書・分類・一括適用の振る舞いを公開APIから検証

use tactic_tagger_common::{
    classify, classify_text, tag_table, Cell, DictionaryStore, Table, TAG_COLUMN,
};

fn store(entries: &[(&str, &str)]) -> DictionaryStore {
    let mut store = DictionaryStore::new();
    for (label, keywords) in entries {
        store.add_or_update(label, keywords);
    }
    store
}

#[test]
fn test_hurry_offer() {
    let store = store(&[("urgency_marketing", "limited, hurry")]);
    assert_eq!(classify_text("Hurry, offer ends soon", &store), "urgency_marketing");
}

#[test]
fn test_vip_limited_access() {
    let store = store(&[("urgency_marketing", "limited"), ("exclusive_marketing", "vip")]);
    assert_eq!(
        classify_text("VIP limited access", &store),
        "urgency_marketing, exclusive_marketing"
    );
}

#[test]
fn test_integer_statement() {
    let store = DictionaryStore::with_defaults();
    assert_eq!(classify(&Cell::Int(42), &store), "");
}

/// 空でない ⇔ いずれかのキーワードが小文字化した文に含まれる
#[test]
fn test_empty_iff_no_keyword_contained() {
    let store = DictionaryStore::with_defaults();
    let statements = [
        "Hurry!",
        "LAST CHANCE to save",
        "Members only event",
        "A calm afternoon",
        "",
        "Exclusive: act now",
        "Nothing special here",
    ];

    for s in statements {
        let lowered = s.to_lowercase();
        let any_contained = store
            .iter()
            .any(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k.as_str())));
        assert_eq!(!classify_text(s, &store).is_empty(), any_contained, "statement: {s}");
    }
}

#[test]
fn test_case_variants_agree() {
    let store = DictionaryStore::with_defaults();
    for s in ["Only Today: VIP prices", "while Supplies LAST", "plain text"] {
        let original = classify_text(s, &store);
        assert_eq!(classify_text(&s.to_lowercase(), &store), original);
        assert_eq!(classify_text(&s.to_uppercase(), &store), original);
    }
}

#[test]
fn test_non_string_cells_ignore_store() {
    let everything = store(&[("all", "1, 4, true, 2")]);
    for cell in [Cell::Int(142), Cell::Float(4.0), Cell::Bool(true), Cell::Empty] {
        assert_eq!(classify(&cell, &everything), "");
    }
}

#[test]
fn test_batch_with_defaults() {
    let table = Table::from_csv_str("id,text,score\n1,hurry now,3.5\n2,nothing special,1\n").unwrap();
    let tagged = tag_table(&table, "text", &DictionaryStore::with_defaults()).unwrap();

    let tags: Vec<String> = tagged.column(TAG_COLUMN).unwrap().map(|c| c.to_string()).collect();
    assert_eq!(tags, vec!["urgency_marketing", ""]);

    // 他の列と行順はそのまま
    for (original, tagged_row) in table.rows().iter().zip(tagged.rows()) {
        assert_eq!(&tagged_row[..3], &original[..]);
    }
}

#[test]
fn test_edit_round_trip() {
    let mut store = DictionaryStore::with_defaults();
    store.edit("urgency_marketing", "a, b, b, , c");
    let keywords: Vec<&str> = store
        .get("urgency_marketing")
        .unwrap()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(keywords, vec!["a", "b", "c"]);
}

#[test]
fn test_reset_independent_of_edits() {
    let mut first = DictionaryStore::with_defaults();
    first.edit("urgency_marketing", "");
    first.add_or_update("new", "x");
    first.reset();

    let second = DictionaryStore::with_defaults();
    assert_eq!(first, second);
    assert!(second.get("urgency_marketing").unwrap().contains("hurry"));
}
