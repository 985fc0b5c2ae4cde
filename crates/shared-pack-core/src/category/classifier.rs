//! Category Classifier
//!
//! プロジェクト相対パスをCategoryStoreの定義に基づいて分類する。
//! 宣言順に走査し、最初にマッチしたカテゴリを返す。

use super::builtin::{CategoryDef, UNKNOWN_CATEGORY};
use super::store::CategoryStore;

/// カテゴリ分類器
#[derive(Debug, Clone, Default)]
pub struct CategoryClassifier {
    store: CategoryStore,
}

impl CategoryClassifier {
    /// 新規分類器を作成
    pub fn new(store: CategoryStore) -> Self {
        Self { store }
    }

    /// ビルトインカテゴリのみで分類器を構築
    pub fn builtin() -> Self {
        Self::new(CategoryStore::builtin())
    }

    /// 利用可能なカテゴリ名を取得（宣言順）
    pub fn category_names(&self) -> Vec<&str> {
        self.store.names()
    }

    /// カテゴリ定義を取得
    pub fn get_category(&self, name: &str) -> Option<&CategoryDef> {
        self.store.get(name)
    }

    /// 全カテゴリ定義（宣言順）
    pub fn categories(&self) -> &[CategoryDef] {
        self.store.all()
    }

    /// パスを分類
    ///
    /// プレフィックスはパスセグメント単位で比較する。
    /// `app/Models` は `app/Models/Foo.php` にマッチするが
    /// `app/ModelsExtra/Foo.php` にはマッチしない。
    pub fn classify(&self, relative_path: &str) -> &str {
        self.store
            .all()
            .iter()
            .find(|cat| {
                cat.prefixes
                    .iter()
                    .any(|prefix| has_segment_prefix(relative_path, prefix))
            })
            .map(|cat| cat.name.as_str())
            .unwrap_or(UNKNOWN_CATEGORY)
    }
}

/// `path` が `prefix/` で始まるか
fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return false;
    }
    path.strip_prefix(prefix)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_builtin_directories() {
        let classifier = CategoryClassifier::builtin();
        assert_eq!(classifier.classify("app/Models/Player.php"), "model");
        assert_eq!(classifier.classify("app/Jobs/SendReport.php"), "job");
        assert_eq!(
            classifier.classify("app/Http/Controllers/Api/PlayerController.php"),
            "controller"
        );
        assert_eq!(
            classifier.classify("database/migrations/2024_01_01_000000_create_players.php"),
            "migration"
        );
    }

    #[test]
    fn test_category_names_in_declaration_order() {
        let classifier = CategoryClassifier::builtin();
        let names = classifier.category_names();
        assert_eq!(names.len(), 14);
        assert_eq!(names.first(), Some(&"model"));
        assert!(names.contains(&"seeder"));
        assert!(!names.contains(&UNKNOWN_CATEGORY));
    }

    #[test]
    fn test_classify_is_segment_exact() {
        let classifier = CategoryClassifier::builtin();
        assert_eq!(classifier.classify("app/ModelsHelper/Foo.php"), "unknown");
        assert_eq!(classifier.classify("app/ModelsExtra/Foo.php"), "unknown");
        assert_eq!(classifier.classify("app/Models"), "unknown");
    }

    #[test]
    fn test_classify_unknown() {
        let classifier = CategoryClassifier::builtin();
        assert_eq!(classifier.classify("app/Rules/Uppercase.php"), "unknown");
        assert_eq!(classifier.classify("README.md"), "unknown");
    }

    #[test]
    fn test_first_declared_category_wins() {
        let store = CategoryStore::from_defs(vec![
            CategoryDef {
                name: "http".to_string(),
                prefixes: vec!["app/Http".to_string()],
                make_command: None,
            },
            CategoryDef {
                name: "controller".to_string(),
                prefixes: vec!["app/Http/Controllers".to_string()],
                make_command: None,
            },
        ]);
        let classifier = CategoryClassifier::new(store);
        assert_eq!(
            classifier.classify("app/Http/Controllers/HomeController.php"),
            "http"
        );
    }

    #[test]
    fn test_trailing_slash_in_prefix_is_ignored() {
        let store = CategoryStore::from_defs(vec![CategoryDef {
            name: "policy".to_string(),
            prefixes: vec!["app/Policies/".to_string()],
            make_command: None,
        }]);
        let classifier = CategoryClassifier::new(store);
        assert_eq!(classifier.classify("app/Policies/PostPolicy.php"), "policy");
    }

    proptest! {
        #[test]
        fn prop_classify_is_deterministic(path in "[a-zA-Z/._]{0,40}") {
            let classifier = CategoryClassifier::builtin();
            let first = classifier.classify(&path).to_string();
            prop_assert_eq!(classifier.classify(&path), first.as_str());
            let known = classifier.get_category(&first).is_some();
            prop_assert!(known || first == UNKNOWN_CATEGORY);
        }

        #[test]
        fn prop_suffix_on_segment_never_matches(suffix in "[A-Za-z]{1,8}", file in "[A-Za-z]{1,8}") {
            let classifier = CategoryClassifier::builtin();
            let path = format!("app/Models{}/{}.php", suffix, file);
            prop_assert_ne!(classifier.classify(&path), "model");
        }
    }
}
