use serde::{Deserialize, Serialize};

/// 카탈로그에 해당 면적을 만족하는 규격이 없을 때 제시하는 규격.
pub const FALLBACK_SIZE_LABEL: &str = "60mm x 10mm";

/// 추천 규격 최대 개수.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// 제조 표준 부스바 단면 (폭 × 두께, mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardSize {
    pub width_mm: f64,
    pub thickness_mm: f64,
}

impl StandardSize {
    pub const fn new(width_mm: f64, thickness_mm: f64) -> Self {
        Self {
            width_mm,
            thickness_mm,
        }
    }

    pub fn area_mm2(&self) -> f64 {
        self.width_mm * self.thickness_mm
    }

    /// `60mm x 10mm` 형식의 표시 문자열.
    pub fn label(&self) -> String {
        format!("{}mm x {}mm", self.width_mm, self.thickness_mm)
    }
}

/// "필요 면적 → 만족하는 규격 (카탈로그 순서)" 조회 기능.
pub trait SizeCatalog {
    /// 면적 오름차순으로 정렬된 전체 규격.
    fn sizes(&self) -> &[StandardSize];

    /// 필요 면적 이상인 규격을 카탈로그 순서대로 최대 3개 반환한다.
    /// 하나도 없으면 `["60mm x 10mm"]`를 반환한다.
    fn recommend(&self, required_area_mm2: f64) -> Vec<String> {
        let picks: Vec<String> = self
            .sizes()
            .iter()
            .filter(|s| s.area_mm2() >= required_area_mm2)
            .take(MAX_RECOMMENDATIONS)
            .map(StandardSize::label)
            .collect();
        if picks.is_empty() {
            vec![FALLBACK_SIZE_LABEL.to_string()]
        } else {
            picks
        }
    }
}

/// 내장 표준 규격 카탈로그.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCatalog;

impl SizeCatalog for StandardCatalog {
    fn sizes(&self) -> &[StandardSize] {
        STANDARD_SIZES
    }
}

/// 설정 파일 등에서 읽어 들인 사용자 정의 카탈로그.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCatalog {
    sizes: Vec<StandardSize>,
}

impl TableCatalog {
    /// 비어 있지 않고, 모든 치수가 양수이며, 면적이 비감소 순서일 때만 생성한다.
    pub fn new(sizes: Vec<StandardSize>) -> Result<Self, &'static str> {
        if sizes.is_empty() {
            return Err("카탈로그가 비어 있습니다.");
        }
        if sizes.iter().any(|s| {
            !(s.width_mm.is_finite() && s.thickness_mm.is_finite())
                || s.width_mm <= 0.0
                || s.thickness_mm <= 0.0
        }) {
            return Err("카탈로그 치수는 0보다 큰 유한한 값이어야 합니다.");
        }
        if sizes
            .windows(2)
            .any(|w| w[1].area_mm2() < w[0].area_mm2())
        {
            return Err("카탈로그는 면적 오름차순이어야 합니다.");
        }
        Ok(Self { sizes })
    }

    pub fn builtin() -> Self {
        Self {
            sizes: STANDARD_SIZES.to_vec(),
        }
    }
}

impl SizeCatalog for TableCatalog {
    fn sizes(&self) -> &[StandardSize] {
        &self.sizes
    }
}

pub fn standard_sizes() -> &'static [StandardSize] {
    STANDARD_SIZES
}

// 같은 면적은 얇고 넓은 규격을 먼저 둔다.
const STANDARD_SIZES: &[StandardSize] = &[
    StandardSize::new(20.0, 5.0),
    StandardSize::new(25.0, 5.0),
    StandardSize::new(30.0, 5.0),
    StandardSize::new(40.0, 5.0),
    StandardSize::new(50.0, 5.0),
    StandardSize::new(60.0, 5.0),
    StandardSize::new(80.0, 5.0),
    StandardSize::new(40.0, 10.0),
    StandardSize::new(100.0, 5.0),
    StandardSize::new(50.0, 10.0),
    StandardSize::new(60.0, 10.0),
    StandardSize::new(80.0, 10.0),
    StandardSize::new(100.0, 10.0),
    StandardSize::new(120.0, 10.0),
    StandardSize::new(160.0, 10.0),
    StandardSize::new(200.0, 10.0),
];
