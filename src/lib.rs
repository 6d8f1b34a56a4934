//! 부스바 사이징/단락 과도해석 계산 로직을 라이브러리로 분리하여 CLI와 HTTP API가 같이 쓴다.

#[cfg(feature = "server")]
pub mod api;
pub mod app;
pub mod busbar;
pub mod config;
pub mod conversion;
pub mod error;
pub mod i18n;
pub mod material_db;
pub mod presets;
pub mod quantity;
pub mod ui_cli;
pub mod units;
