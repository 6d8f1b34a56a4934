//! 부스바 사이징 계산: 필요 단면적, 온도상승, 단락 전자력과 굽힘응력, 표준 규격 추천.
//!
//! 온도상승 계수(0.05 °C/W)와 분포 그리드는 기존 계산 결과와의 호환을 위해
//! 단순화된 식을 그대로 유지한다. 물리적으로 더 정확한 모델로 바꾸면 결과가 달라진다.

use serde::Serialize;

use super::catalog::{SizeCatalog, StandardCatalog};
use super::input::BusbarInput;
use crate::error::CalcResult;
use crate::material_db::{BuiltinMaterials, MaterialKind, MaterialTable};

/// 전류밀도 기준 필요 단면적에 적용하는 고정 여유율 (25%).
pub const SAFETY_FACTOR: f64 = 1.25;
/// 손실 1 W당 온도상승 [°C/W]. 경험 계수.
pub const TEMPERATURE_RISE_PER_WATT: f64 = 0.05;
/// μ0 / 2π [H/m]
pub const MU0_OVER_2PI: f64 = 2e-7;
/// 이 단면적 [mm²]을 넘으면 상세 해석 검토를 권고한다.
pub const FEM_REVIEW_AREA_MM2: f64 = 300.0;
/// 이 전류 [A]를 넘으면 표피효과가 유의하다고 본다.
pub const SKIN_EFFECT_CURRENT_A: f64 = 1000.0;
/// 전자력 진동 주파수(계통 50 Hz의 2배) [Hz]. 모드 해석 값이 아니다.
pub const RESONANCE_FREQUENCY_HZ: f64 = 100.0;
/// 표피효과가 유의할 때의 교류 저항 증가 배율.
pub const SKIN_EFFECT_RESISTANCE_FACTOR: f64 = 1.15;
/// 분포 그리드 한 변의 격자 수.
pub const DISTRIBUTION_GRID_SIZE: usize = 10;

/// 사이징 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusbarResult {
    pub material: MaterialKind,
    /// 필요 단면적 [mm²]
    pub required_cross_section_area: f64,
    /// 실제 단면적 [mm²]
    pub cross_section_area: f64,
    /// 전류밀도 [A/mm²]
    pub current_density: f64,
    /// 도체 저항 [Ω]
    pub resistance: f64,
    /// 저항 손실 [W]
    pub power_loss: f64,
    /// 단락 전자력 [N]
    pub short_circuit_force: f64,
    /// 온도상승 [°C]
    pub temperature_rise: f64,
    pub max_allowable_temperature: f64,
    pub is_sizing_sufficient: bool,
    /// 굽힘응력 [Pa]
    pub mechanical_stress: f64,
    pub max_allowable_mechanical_stress: f64,
    pub recommended_standard_sizes: Vec<String>,
    pub advanced_results: AdvancedResults,
    /// 참고용 경고 메시지
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedResults {
    /// [Hz]
    pub resonance_frequency: f64,
    pub fem_analysis_required: bool,
    /// 전압강하 지표 (I·R·1000 / kV)
    pub voltage_drop: f64,
    pub skin_effect_significant: bool,
    pub effective_resistance_increase: f64,
    /// 도체에서 1 m 떨어진 지점의 자속밀도 [T]
    pub magnetic_field_strength: f64,
    #[serde(rename = "ForceDistribution", skip_serializing_if = "Option::is_none")]
    pub force_distribution: Option<Vec<f64>>,
    #[serde(rename = "StressDistribution", skip_serializing_if = "Option::is_none")]
    pub stress_distribution: Option<Vec<f64>>,
    #[serde(rename = "TemperatureDistribution", skip_serializing_if = "Option::is_none")]
    pub temperature_distribution: Option<Vec<f64>>,
}

/// 내장 물성 테이블과 표준 카탈로그로 사이징을 계산한다.
pub fn compute_sizing(input: &BusbarInput) -> CalcResult<BusbarResult> {
    compute_sizing_with(input, &BuiltinMaterials, &StandardCatalog)
}

/// 물성 테이블과 규격 카탈로그를 지정해 사이징을 계산한다.
pub fn compute_sizing_with(
    input: &BusbarInput,
    materials: &impl MaterialTable,
    catalog: &impl SizeCatalog,
) -> CalcResult<BusbarResult> {
    input.validate()?;
    let props = materials.properties(input.material);

    let required_area = (input.current * SAFETY_FACTOR) / props.current_density_limit;
    let cross_section = input.busbar_width * input.busbar_thickness;
    let current_density = input.current / cross_section;

    // mm → m, mm² → m²
    let resistance = props.resistivity * (input.busbar_length / 1000.0) / (cross_section / 1e6);
    let power_loss = input.current.powi(2) * resistance;
    let temperature_rise = power_loss * TEMPERATURE_RISE_PER_WATT;

    let short_circuit_force = short_circuit_force_n(
        input.short_circuit_current * 1000.0,
        input.busbar_length,
        input.phase_distance,
    );
    let mechanical_stress = bending_stress_pa(
        short_circuit_force,
        input.busbar_width,
        input.busbar_thickness,
        input.busbar_length,
    );

    let is_sizing_sufficient = temperature_rise <= props.max_allowable_temperature
        && mechanical_stress <= props.max_allowable_mechanical_stress;

    let recommended_standard_sizes = catalog.recommend(required_area);

    let skin_effect_significant = input.current > SKIN_EFFECT_CURRENT_A;
    let fem_analysis_required = required_area > FEM_REVIEW_AREA_MM2;
    let mut advanced = AdvancedResults {
        resonance_frequency: RESONANCE_FREQUENCY_HZ,
        fem_analysis_required,
        voltage_drop: input.current * resistance * 1000.0 / input.voltage,
        skin_effect_significant,
        effective_resistance_increase: if skin_effect_significant {
            SKIN_EFFECT_RESISTANCE_FACTOR
        } else {
            1.0
        },
        magnetic_field_strength: (MU0_OVER_2PI * input.current) / (2.0 * std::f64::consts::PI * 1.0),
        force_distribution: None,
        stress_distribution: None,
        temperature_distribution: None,
    };
    if input.use_advanced_calculation {
        advanced.force_distribution = Some(synthetic_distribution(
            short_circuit_force * 0.5,
            short_circuit_force * 1.5,
        ));
        advanced.stress_distribution = Some(synthetic_distribution(
            mechanical_stress * 0.7,
            mechanical_stress * 1.2,
        ));
        advanced.temperature_distribution = Some(synthetic_distribution(
            input.ambient_temperature,
            input.ambient_temperature + temperature_rise,
        ));
    }

    let mut warnings = Vec::new();
    if temperature_rise > props.max_allowable_temperature {
        warnings.push(format!(
            "온도상승 {:.1} °C가 허용 온도 {:.0} °C를 초과합니다.",
            temperature_rise, props.max_allowable_temperature
        ));
    }
    if mechanical_stress > props.max_allowable_mechanical_stress {
        warnings.push(format!(
            "단락 시 굽힘응력 {:.1} MPa가 허용 응력 {:.0} MPa를 초과합니다. 상간 거리나 지지 간격을 검토하세요.",
            mechanical_stress / 1e6,
            props.max_allowable_mechanical_stress / 1e6
        ));
    }
    if cross_section < required_area {
        warnings.push(format!(
            "실제 단면적 {:.0} mm²가 필요 단면적 {:.0} mm²보다 작습니다.",
            cross_section, required_area
        ));
    }
    if fem_analysis_required {
        warnings.push("필요 단면적이 커서 상세(FEM) 해석 검토를 권장합니다.".into());
    }
    if skin_effect_significant {
        warnings.push("전류가 1000 A를 넘어 표피효과로 교류 저항이 증가합니다.".into());
    }
    if let Some(phases) = input.phase_currents.filter(|_| input.requires_phase_currents()) {
        if phases.max() > input.current {
            warnings.push(format!(
                "최대 상전류 {:.0} A가 설계 전류 {:.0} A보다 큽니다. 계산은 설계 전류 기준입니다.",
                phases.max(),
                input.current
            ));
        }
    }

    Ok(BusbarResult {
        material: input.material,
        required_cross_section_area: required_area,
        cross_section_area: cross_section,
        current_density,
        resistance,
        power_loss,
        short_circuit_force,
        temperature_rise,
        max_allowable_temperature: props.max_allowable_temperature,
        is_sizing_sufficient,
        mechanical_stress,
        max_allowable_mechanical_stress: props.max_allowable_mechanical_stress,
        recommended_standard_sizes,
        advanced_results: advanced,
        warnings,
    })
}

/// 평행 도체 사이의 전자력 F = μ0·I²·L / (2π·d) [N].
///
/// `current_a`는 암페어, 길이와 상간 거리는 mm 단위이다.
pub fn short_circuit_force_n(current_a: f64, length_mm: f64, phase_distance_mm: f64) -> f64 {
    MU0_OVER_2PI * current_a.powi(2) * (length_mm / 1000.0) / (phase_distance_mm / 1000.0)
}

/// 단순지지보 중앙부 굽힘응력 [Pa]. 치수는 mm 단위.
pub fn bending_stress_pa(force_n: f64, width_mm: f64, thickness_mm: f64, length_mm: f64) -> f64 {
    let moment_of_inertia = (width_mm * thickness_mm.powi(3)) / 12.0;
    (force_n * (length_mm / 4.0) * (thickness_mm / 2.0)) / moment_of_inertia * 1e6
}

/// 시각화용 합성 분포(10×10, 행 우선). 물리 해석 결과가 아니다.
///
/// 중심에서 `max`, 중심에서 0.5 이상 떨어진 지점에서 `min`이 되는 방사 대칭 프로파일.
pub fn synthetic_distribution(min: f64, max: f64) -> Vec<f64> {
    let n = DISTRIBUTION_GRID_SIZE;
    let mut values = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let x = i as f64 / (n - 1) as f64;
            let y = j as f64 / (n - 1) as f64;
            let distance = ((x - 0.5).powi(2) + (y - 0.5).powi(2)).sqrt();
            let normalized = 1.0 - (distance * 2.0).min(1.0);
            values.push(min + (max - min) * normalized);
        }
    }
    values
}
