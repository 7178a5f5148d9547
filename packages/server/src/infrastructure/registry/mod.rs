//! コネクションレジストリの実装
//!
//! ## 実装
//!
//! - `inmemory`: 単一プロセス内の HashMap を使った実装

pub mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;
