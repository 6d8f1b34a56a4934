use serde::{Deserialize, Serialize};

/// 응력 단위. 내부 기준은 Pa이다. 압력과 달리 게이지/절대 구분이 없다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressUnit {
    Pascal,
    KiloPascal,
    MegaPascal,
    NPerSquareMillimeter,
    KgfPerSquareMillimeter,
    Psi,
    Ksi,
}

const PA_PER_PSI: f64 = 6_894.757_293_168;
const PA_PER_KGF_MM2: f64 = 9_806_650.0;

impl StressUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            StressUnit::Pascal => "Pa",
            StressUnit::KiloPascal => "kPa",
            StressUnit::MegaPascal => "MPa",
            StressUnit::NPerSquareMillimeter => "N/mm²",
            StressUnit::KgfPerSquareMillimeter => "kgf/mm²",
            StressUnit::Psi => "psi",
            StressUnit::Ksi => "ksi",
        }
    }

    fn pascal_per_unit(&self) -> f64 {
        match self {
            StressUnit::Pascal => 1.0,
            StressUnit::KiloPascal => 1e3,
            StressUnit::MegaPascal | StressUnit::NPerSquareMillimeter => 1e6,
            StressUnit::KgfPerSquareMillimeter => PA_PER_KGF_MM2,
            StressUnit::Psi => PA_PER_PSI,
            StressUnit::Ksi => PA_PER_PSI * 1000.0,
        }
    }
}

/// 응력을 다른 단위로 변환한다.
pub fn convert_stress(value: f64, from: StressUnit, to: StressUnit) -> f64 {
    value * from.pascal_per_unit() / to.pascal_per_unit()
}
