use serde::{Deserialize, Serialize};

/// 힘 단위. 내부 기준은 N이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceUnit {
    Newton,
    KiloNewton,
    KilogramForce,
    PoundForce,
}

impl ForceUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            ForceUnit::Newton => "N",
            ForceUnit::KiloNewton => "kN",
            ForceUnit::KilogramForce => "kgf",
            ForceUnit::PoundForce => "lbf",
        }
    }

    fn newton_per_unit(&self) -> f64 {
        match self {
            ForceUnit::Newton => 1.0,
            ForceUnit::KiloNewton => 1000.0,
            ForceUnit::KilogramForce => 9.806_65,
            ForceUnit::PoundForce => 4.448_221_615_260_5,
        }
    }
}

/// 힘을 다른 단위로 변환한다.
pub fn convert_force(value: f64, from: ForceUnit, to: ForceUnit) -> f64 {
    value * from.newton_per_unit() / to.newton_per_unit()
}
