//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryPrimaryStore / InMemoryColdStore**: テスト・組み込み用
//! - **FsPrimaryStore / FsColdStore**: ローカルディレクトリ上の実装（CLI 用）
//!
//! 本番のドキュメント DB / Blob storage への実装は別クレートに置く想定です。

mod fs;
pub mod fs_cold;
pub mod fs_primary;
pub mod inmem_cold;
pub mod inmem_primary;

pub use self::fs_cold::FsColdStore;
pub use self::fs_primary::FsPrimaryStore;
pub use self::inmem_cold::InMemoryColdStore;
pub use self::inmem_primary::InMemoryPrimaryStore;
