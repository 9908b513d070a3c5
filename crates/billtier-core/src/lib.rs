//! billtier-core
//!
//! Tiered storage for billing records: a hot document store for recent
//! records and cold object storage for anything past the retention window.
//!
//! # モジュール構成
//! - **domain**: レコード・ID・アーカイブキー・検索結果・エラー
//! - **ports**: PrimaryStore / ColdStore / Clock の trait
//! - **impls**: in-memory とローカルディレクトリの実装
//! - **app**: Archiver / Retriever / TieringBuilder
//! - **config**: 設定の読み込み

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
