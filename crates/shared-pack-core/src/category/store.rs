//! Category Store
//!
//! カテゴリ定義のランタイムストア。
//! ビルトインとプロジェクト設定をマージし、宣言順を保持する。

use super::builtin::{CategoryDef, BUILTIN_CATEGORIES};

/// カテゴリ定義のランタイムストア
#[derive(Debug, Clone)]
pub struct CategoryStore {
    categories: Vec<CategoryDef>,
}

impl CategoryStore {
    /// ビルトインカテゴリのみで初期化
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES.iter().map(CategoryDef::from).collect();
        Self { categories }
    }

    /// 任意の定義列から初期化（テスト・設定用）
    pub fn from_defs(categories: Vec<CategoryDef>) -> Self {
        Self { categories }
    }

    /// プロジェクト設定でオーバーライド
    ///
    /// - 同名カテゴリはその位置のまま上書き
    /// - 新規カテゴリは末尾に追加（設定ファイルの順序）
    pub fn with_overrides(mut self, overrides: &[CategoryDef]) -> Self {
        for def in overrides {
            match self.categories.iter_mut().find(|c| c.name == def.name) {
                Some(existing) => *existing = def.clone(),
                None => self.categories.push(def.clone()),
            }
        }
        self
    }

    /// カテゴリ定義を取得
    pub fn get(&self, name: &str) -> Option<&CategoryDef> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// 全カテゴリを取得（宣言順）
    pub fn all(&self) -> &[CategoryDef] {
        &self.categories
    }

    /// カテゴリ名一覧（宣言順）
    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::builtin()
    }
}
