use serde::{Deserialize, Serialize};

/// 면적 단위. 내부 기준은 제곱밀리미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareMillimeter,
    SquareCentimeter,
    SquareMeter,
    SquareInch,
    /// 1000 circular mil (북미 도체 규격)
    Kcmil,
}

impl AreaUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareMillimeter => "mm²",
            AreaUnit::SquareCentimeter => "cm²",
            AreaUnit::SquareMeter => "m²",
            AreaUnit::SquareInch => "in²",
            AreaUnit::Kcmil => "kcmil",
        }
    }
}

fn to_square_millimeter(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMillimeter => value,
        AreaUnit::SquareCentimeter => value * 100.0,
        AreaUnit::SquareMeter => value * 1e6,
        AreaUnit::SquareInch => value * 645.16,
        AreaUnit::Kcmil => value * 0.506_707_479,
    }
}

fn from_square_millimeter(value_mm2: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMillimeter => value_mm2,
        AreaUnit::SquareCentimeter => value_mm2 / 100.0,
        AreaUnit::SquareMeter => value_mm2 / 1e6,
        AreaUnit::SquareInch => value_mm2 / 645.16,
        AreaUnit::Kcmil => value_mm2 / 0.506_707_479,
    }
}

/// 면적을 변환한다.
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    from_square_millimeter(to_square_millimeter(value, from), to)
}
