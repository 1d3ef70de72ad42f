//! 組み込みの既定辞書
//!
//! セッション開始時とリセット時に `DictionaryStore` へコピーされる。
//! `'static` なスライスなので、呼び出し側から書き換えられることはない。

/// 既定カテゴリ（ラベル, キーワード）
pub const DEFAULT_DICTIONARIES: &[(&str, &[&str])] = &[
    (
        "urgency_marketing",
        &[
            "limited offer",
            "limited time",
            "limited stock",
            "hurry",
            "act now",
            "last chance",
            "ends soon",
            "ending soon",
            "only today",
            "today only",
            "while supplies last",
            "don't miss out",
            "countdown",
            "final hours",
        ],
    ),
    (
        "exclusive_marketing",
        &[
            "exclusive",
            "vip",
            "members only",
            "invitation only",
            "invite only",
            "by invitation",
            "insider",
            "private sale",
            "early access",
            "select customers",
            "limited edition",
        ],
    ),
];
