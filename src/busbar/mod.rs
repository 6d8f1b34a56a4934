//! 부스바 사이징/단락 과도해석 계산 모듈 모음.
//! 모든 계산은 입출력이 없는 순수 함수이며 같은 입력에 대해 항상 같은 결과를 낸다.

pub mod catalog;
pub mod input;
pub mod sizing;
pub mod transient;

pub use catalog::{
    standard_sizes, SizeCatalog, StandardCatalog, StandardSize, TableCatalog, FALLBACK_SIZE_LABEL,
    MAX_RECOMMENDATIONS,
};
pub use input::*;
pub use sizing::*;
pub use transient::*;
