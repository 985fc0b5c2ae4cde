//! # Category Module
//!
//! プロジェクト内のファイルをディレクトリ位置に基づいて論理カテゴリに分類する。
//!
//! ## モジュール構成
//!
//! - `builtin`: ビルトインカテゴリ定義（model, job, service, ...）
//! - `store`: カテゴリ定義のランタイムストア（宣言順を保持）
//! - `classifier`: 分類器
//!
//! ## 使用例
//!
//! ```rust
//! use shared_pack_core::category::{CategoryClassifier, UNKNOWN_CATEGORY};
//!
//! let classifier = CategoryClassifier::builtin();
//! assert_eq!(classifier.classify("app/Models/Player.php"), "model");
//! assert_eq!(classifier.classify("app/ModelsHelper/Foo.php"), UNKNOWN_CATEGORY);
//! ```

mod builtin;
mod classifier;
mod store;

// Re-exports
pub use builtin::{BuiltinCategory, CategoryDef, BUILTIN_CATEGORIES, UNKNOWN_CATEGORY};
pub use classifier::CategoryClassifier;
pub use store::CategoryStore;
