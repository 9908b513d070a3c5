//! App - アプリケーション層
//!
//! ports を組み合わせて 2 つの操作を実装します。
//!
//! # 主要コンポーネント
//! - **Archiver**: 古いレコードを hot → cold へ移動
//! - **Retriever**: hot → cold の順でレコードを取得
//! - **TieringBuilder**: 両者を同じストアで組み立てる

pub mod archiver;
pub mod builder;
pub mod retriever;

pub use self::archiver::Archiver;
pub use self::builder::{BuildError, Tiering, TieringBuilder};
pub use self::retriever::Retriever;
