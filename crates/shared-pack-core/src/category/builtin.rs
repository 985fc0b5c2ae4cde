//! Builtin Category Definitions
//!
//! コード内で定義されるビルトインカテゴリ。
//! 宣言順がそのまま分類時の優先順になる（先にマッチしたものが勝つ）。

use serde::{Deserialize, Serialize};

/// ビルトインカテゴリ定義（宣言順 = マッチ順）
pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        name: "model",
        prefixes: &["app/Models"],
        make_command: Some("make:model"),
    },
    BuiltinCategory {
        name: "job",
        prefixes: &["app/Jobs"],
        make_command: Some("make:job"),
    },
    BuiltinCategory {
        name: "service",
        prefixes: &["app/Services"],
        make_command: None,
    },
    BuiltinCategory {
        name: "provider",
        prefixes: &["app/Providers"],
        make_command: Some("make:provider"),
    },
    BuiltinCategory {
        name: "controller",
        prefixes: &["app/Http/Controllers"],
        make_command: Some("make:controller"),
    },
    BuiltinCategory {
        name: "middleware",
        prefixes: &["app/Http/Middleware"],
        make_command: Some("make:middleware"),
    },
    BuiltinCategory {
        name: "command",
        prefixes: &["app/Console/Commands"],
        make_command: Some("make:command"),
    },
    BuiltinCategory {
        name: "event",
        prefixes: &["app/Events"],
        make_command: Some("make:event"),
    },
    BuiltinCategory {
        name: "listener",
        prefixes: &["app/Listeners"],
        make_command: Some("make:listener"),
    },
    BuiltinCategory {
        name: "mail",
        prefixes: &["app/Mail"],
        make_command: Some("make:mail"),
    },
    BuiltinCategory {
        name: "notification",
        prefixes: &["app/Notifications"],
        make_command: Some("make:notification"),
    },
    BuiltinCategory {
        name: "migration",
        prefixes: &["database/migrations"],
        make_command: Some("make:migration"),
    },
    BuiltinCategory {
        name: "factory",
        prefixes: &["database/factories"],
        make_command: Some("make:factory"),
    },
    BuiltinCategory {
        name: "seeder",
        prefixes: &["database/seeders"],
        make_command: Some("make:seeder"),
    },
];

/// どのカテゴリにもマッチしなかったファイルのカテゴリ名
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// ビルトインカテゴリの静的定義
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    /// カテゴリ名（一意識別子）
    pub name: &'static str,
    /// ディレクトリプレフィックス（プロジェクトルート相対、末尾スラッシュなし）
    pub prefixes: &'static [&'static str],
    /// 対応する生成コマンド（表示用のみ）
    pub make_command: Option<&'static str>,
}

/// ランタイムカテゴリ定義
///
/// ビルトインと`.shared-pack.toml`の両方からこの形に変換される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    pub prefixes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make_command: Option<String>,
}

impl From<&BuiltinCategory> for CategoryDef {
    fn from(b: &BuiltinCategory) -> Self {
        Self {
            name: b.name.to_string(),
            prefixes: b.prefixes.iter().map(|s| s.to_string()).collect(),
            make_command: b.make_command.map(|s| s.to_string()),
        }
    }
}
