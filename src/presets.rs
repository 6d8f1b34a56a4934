/// 전압 등급별 표준 부스바 구성 프리셋.
/// 계산 코어가 만드는 값이 아니라 조회용 카탈로그 데이터이며, 선택된 프리셋은
/// 일반 `BusbarInput`으로 사이징에 들어간다.
use serde::Serialize;

use crate::busbar::BusbarInput;
use crate::material_db::MaterialKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltageLevel {
    /// 공칭 전압 [kV]
    pub voltage: f64,
    pub label: &'static str,
    pub category: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct PresetData {
    voltage_kv: f64,
    name: &'static str,
    material: MaterialKind,
    current_a: f64,
    width_mm: f64,
    thickness_mm: f64,
    length_mm: f64,
    short_circuit_ka: f64,
    phase_distance_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardConfiguration {
    pub name: &'static str,
    pub input: BusbarInput,
}

pub fn voltage_levels() -> &'static [VoltageLevel] {
    VOLTAGE_LEVELS
}

/// 공칭 전압에 해당하는 표준 구성 목록. 일치하는 등급이 없으면 빈 목록.
pub fn standard_configurations(voltage_kv: f64) -> Vec<StandardConfiguration> {
    PRESETS
        .iter()
        .filter(|p| (p.voltage_kv - voltage_kv).abs() < 1e-6)
        .map(|p| StandardConfiguration {
            name: p.name,
            input: BusbarInput::new(p.material, p.current_a, p.voltage_kv)
                .with_geometry(p.width_mm, p.thickness_mm, p.length_mm)
                .with_fault(p.short_circuit_ka, p.phase_distance_mm),
        })
        .collect()
}

const VOLTAGE_LEVELS: &[VoltageLevel] = &[
    VoltageLevel { voltage: 0.4, label: "400 V", category: "LV" },
    VoltageLevel { voltage: 0.69, label: "690 V", category: "LV" },
    VoltageLevel { voltage: 6.6, label: "6.6 kV", category: "MV" },
    VoltageLevel { voltage: 11.0, label: "11 kV", category: "MV" },
    VoltageLevel { voltage: 22.9, label: "22.9 kV", category: "MV" },
    VoltageLevel { voltage: 33.0, label: "33 kV", category: "MV" },
];

const fn preset(
    voltage_kv: f64,
    name: &'static str,
    material: MaterialKind,
    (current_a, short_circuit_ka): (f64, f64),
    (width_mm, thickness_mm, length_mm): (f64, f64, f64),
    phase_distance_mm: f64,
) -> PresetData {
    PresetData {
        voltage_kv,
        name,
        material,
        current_a,
        width_mm,
        thickness_mm,
        length_mm,
        short_circuit_ka,
        phase_distance_mm,
    }
}

const PRESETS: &[PresetData] = &[
    preset(0.4, "LV 분전반 630 A", MaterialKind::Copper, (630.0, 25.0), (40.0, 10.0, 800.0), 100.0),
    preset(0.4, "LV 배전반 1600 A", MaterialKind::Copper, (1600.0, 50.0), (100.0, 10.0, 1000.0), 150.0),
    preset(0.4, "LV 주배전반 3200 A", MaterialKind::Copper, (3200.0, 65.0), (200.0, 10.0, 1000.0), 185.0),
    preset(0.4, "LV 알루미늄 1250 A", MaterialKind::Aluminum, (1250.0, 36.0), (160.0, 10.0, 1000.0), 150.0),
    preset(0.69, "690 V MCC 2000 A", MaterialKind::Copper, (2000.0, 50.0), (120.0, 10.0, 1000.0), 150.0),
    preset(6.6, "6.6 kV 배전반 1250 A", MaterialKind::Copper, (1250.0, 31.5), (80.0, 10.0, 1200.0), 250.0),
    preset(11.0, "11 kV 배전반 2000 A", MaterialKind::Copper, (2000.0, 40.0), (120.0, 10.0, 1200.0), 280.0),
    preset(22.9, "22.9 kV 수전반 630 A", MaterialKind::Copper, (630.0, 25.0), (60.0, 10.0, 1500.0), 350.0),
    preset(33.0, "33 kV 배전반 1250 A", MaterialKind::Aluminum, (1250.0, 25.0), (200.0, 10.0, 1500.0), 400.0),
];
