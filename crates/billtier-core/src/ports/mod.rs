//! Ports - 抽象化レイヤー
//!
//! 外部ストレージへのインターフェースを trait として定義します。
//!
//! # 構成
//! - PrimaryStore: hot tier（ドキュメント DB）
//! - ColdStore: cold tier（Blob storage）
//! - Clock: cutoff 計算用の時刻

pub mod clock;
pub mod cold_store;
pub mod primary_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::cold_store::ColdStore;
pub use self::primary_store::PrimaryStore;
