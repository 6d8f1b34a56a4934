/// 부스바 도체 재질의 물성 테이블.
/// 값은 배전반 사이징용 대표값이며 프로세스 수명 동안 바뀌지 않는다.
use serde::{Deserialize, Serialize};

use crate::error::BusbarError;

/// 지원하는 도체 재질.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Copper,
    Aluminum,
}

impl MaterialKind {
    pub fn code(&self) -> &'static str {
        match self {
            MaterialKind::Copper => "copper",
            MaterialKind::Aluminum => "aluminum",
        }
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for MaterialKind {
    type Err = BusbarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find_material(s).map(|m| m.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialProperties {
    pub kind: MaterialKind,
    pub name: &'static str,
    /// 검색용 별칭 (소문자)
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    /// 허용 전류밀도 [A/mm²]
    pub current_density_limit: f64,
    /// 20°C 저항률 [Ω·m]
    pub resistivity: f64,
    /// 밀도 [kg/m³]
    pub density: f64,
    /// 최고 허용 온도 [°C]
    pub max_allowable_temperature: f64,
    /// 최대 허용 기계적 응력 [Pa]
    pub max_allowable_mechanical_stress: f64,
    pub notes: &'static str,
}

/// "재질 키 → 물성" 조회 기능. 재질 추가는 데이터 변경으로만 이뤄진다.
pub trait MaterialTable {
    fn properties(&self, kind: MaterialKind) -> &MaterialProperties;

    fn all(&self) -> &[MaterialProperties];
}

/// 내장 정적 물성 테이블.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMaterials;

impl MaterialTable for BuiltinMaterials {
    fn properties(&self, kind: MaterialKind) -> &MaterialProperties {
        properties(kind)
    }

    fn all(&self) -> &[MaterialProperties] {
        MATERIALS
    }
}

pub fn materials() -> &'static [MaterialProperties] {
    MATERIALS
}

/// 재질 종류에 해당하는 물성을 반환한다.
pub fn properties(kind: MaterialKind) -> &'static MaterialProperties {
    match kind {
        MaterialKind::Copper => &MATERIALS[0],
        MaterialKind::Aluminum => &MATERIALS[1],
    }
}

/// 코드/이름/별칭으로 재질을 찾는다. 대소문자와 앞뒤 공백은 무시한다.
pub fn find_material(code: &str) -> Result<&'static MaterialProperties, BusbarError> {
    let key = code.trim();
    MATERIALS
        .iter()
        .find(|m| {
            m.kind.code().eq_ignore_ascii_case(key)
                || m.name.eq_ignore_ascii_case(key)
                || m.aliases.iter().any(|a| a.eq_ignore_ascii_case(key))
        })
        .ok_or_else(|| BusbarError::UnknownMaterial(key.to_string()))
}

static MATERIALS: &[MaterialProperties] = &[
    MaterialProperties {
        kind: MaterialKind::Copper,
        name: "Copper",
        aliases: &["cu", "etp", "c11000"],
        current_density_limit: 1.6,
        resistivity: 1.72e-8,
        density: 8960.0,
        max_allowable_temperature: 90.0,
        max_allowable_mechanical_stress: 120e6,
        notes: "전기동(ETP) 기준",
    },
    MaterialProperties {
        kind: MaterialKind::Aluminum,
        name: "Aluminum",
        aliases: &["al", "aluminium", "6101"],
        current_density_limit: 1.0,
        resistivity: 2.82e-8,
        density: 2700.0,
        max_allowable_temperature: 80.0,
        max_allowable_mechanical_stress: 70e6,
        notes: "전기용 알루미늄 합금(6101 계열) 기준",
    },
];
