//! 사이징 계산 회귀 테스트.
use busbar_sizing_toolbox::busbar::{
    compute_sizing, compute_sizing_with, BusbarInput, PhaseCurrents, StandardSize, TableCatalog,
};
use busbar_sizing_toolbox::error::BusbarError;
use busbar_sizing_toolbox::material_db::{BuiltinMaterials, MaterialKind};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn reference_input() -> BusbarInput {
    BusbarInput::new(MaterialKind::Copper, 800.0, 0.4)
        .with_geometry(60.0, 10.0, 1000.0)
        .with_fault(50.0, 200.0)
}

#[test]
fn copper_800a_reference_scenario() {
    let r = compute_sizing(&reference_input()).expect("sizing");
    assert_close("required area", r.required_cross_section_area, 625.0, 1e-12);
    assert_close("cross section", r.cross_section_area, 600.0, 1e-12);
    assert_close("resistance", r.resistance, 2.866_666_666_666_667e-5, 1e-9);
    assert_close("power loss", r.power_loss, 18.346_666_666_666_67, 1e-9);
    assert_close("temperature rise", r.temperature_rise, 0.917_333_333_333_333, 1e-9);
    assert_close("force", r.short_circuit_force, 2_500_000.0, 1e-12);
    // I = 60·10³/12 = 5000 mm⁴ → σ = 2.5e6·250·5 / 5000 · 1e6
    assert_close("stress", r.mechanical_stress, 6.25e11, 1e-12);
    assert_close("current density", r.current_density, 800.0 / 600.0, 1e-12);
    assert!(!r.is_sizing_sufficient);
    assert_eq!(
        r.recommended_standard_sizes,
        vec!["80mm x 10mm", "100mm x 10mm", "120mm x 10mm"]
    );
}

#[test]
fn advanced_results_are_always_filled() {
    let r = compute_sizing(&reference_input()).expect("sizing");
    let adv = &r.advanced_results;
    assert_close("voltage drop", adv.voltage_drop, 800.0 * r.resistance * 1000.0 / 0.4, 1e-12);
    assert!(!adv.skin_effect_significant);
    assert_eq!(adv.effective_resistance_increase, 1.0);
    assert!(adv.fem_analysis_required);
    assert_close("B at 1 m", adv.magnetic_field_strength, 2e-7 * 800.0 / (2.0 * std::f64::consts::PI), 1e-12);
    assert_eq!(adv.resonance_frequency, 100.0);
    assert!(adv.force_distribution.is_none());
    assert!(adv.temperature_distribution.is_none());
}

#[test]
fn skin_effect_above_1000a() {
    let input = BusbarInput::new(MaterialKind::Copper, 1250.0, 0.4)
        .with_geometry(100.0, 10.0, 1000.0)
        .with_fault(25.0, 200.0);
    let r = compute_sizing(&input).expect("sizing");
    assert!(r.advanced_results.skin_effect_significant);
    assert_eq!(r.advanced_results.effective_resistance_increase, 1.15);
}

#[test]
fn sufficiency_requires_both_limits() {
    // 짧은 지지 간격, 넓은 상간 거리 → 응력 기준 충족
    let input = BusbarInput::new(MaterialKind::Copper, 300.0, 0.4)
        .with_geometry(40.0, 10.0, 100.0)
        .with_fault(1.0, 500.0);
    let r = compute_sizing(&input).expect("sizing");
    assert!(r.temperature_rise <= r.max_allowable_temperature);
    assert!(r.mechanical_stress <= r.max_allowable_mechanical_stress);
    assert!(r.is_sizing_sufficient);
    assert!(r.warnings.is_empty(), "{:?}", r.warnings);

    let loaded = BusbarInput::new(MaterialKind::Copper, 300.0, 0.4)
        .with_geometry(40.0, 10.0, 1000.0)
        .with_fault(50.0, 500.0);
    let r = compute_sizing(&loaded).expect("sizing");
    assert!(r.temperature_rise <= r.max_allowable_temperature);
    assert!(r.mechanical_stress > r.max_allowable_mechanical_stress);
    assert!(!r.is_sizing_sufficient);
}

#[test]
fn aluminum_uses_its_own_limits() {
    let input = BusbarInput::new(MaterialKind::Aluminum, 800.0, 0.4)
        .with_geometry(60.0, 10.0, 1000.0)
        .with_fault(50.0, 200.0);
    let r = compute_sizing(&input).expect("sizing");
    assert_close("required area", r.required_cross_section_area, 1000.0, 1e-12);
    assert_eq!(r.max_allowable_temperature, 80.0);
    assert_eq!(r.max_allowable_mechanical_stress, 70e6);
    assert_eq!(
        r.recommended_standard_sizes,
        vec!["100mm x 10mm", "120mm x 10mm", "160mm x 10mm"]
    );
}

#[test]
fn recommendation_falls_back_when_nothing_fits() {
    let input = BusbarInput::new(MaterialKind::Copper, 4000.0, 0.4)
        .with_geometry(200.0, 10.0, 1000.0)
        .with_fault(50.0, 200.0);
    let r = compute_sizing(&input).expect("sizing");
    // 4000·1.25/1.6 = 3125 mm² > 2000 mm²
    assert_eq!(r.recommended_standard_sizes, vec!["60mm x 10mm"]);
}

#[test]
fn recommendations_are_ascending_and_at_most_three() {
    for current in [50.0, 300.0, 640.0, 1200.0, 2400.0] {
        let input = BusbarInput::new(MaterialKind::Copper, current, 0.4)
            .with_geometry(100.0, 10.0, 1000.0)
            .with_fault(25.0, 200.0);
        let r = compute_sizing(&input).expect("sizing");
        assert!(r.recommended_standard_sizes.len() <= 3);
        let areas: Vec<f64> = r
            .recommended_standard_sizes
            .iter()
            .map(|label| {
                let dims: Vec<f64> = label
                    .split(" x ")
                    .map(|d| d.trim_end_matches("mm").parse().unwrap())
                    .collect();
                dims[0] * dims[1]
            })
            .collect();
        assert!(areas.windows(2).all(|w| w[0] <= w[1]), "{areas:?}");
    }
}

#[test]
fn custom_catalog_replaces_builtin() {
    let catalog = TableCatalog::new(vec![
        StandardSize::new(30.0, 10.0),
        StandardSize::new(63.0, 10.0),
        StandardSize::new(125.0, 10.0),
    ])
    .expect("catalog");
    let r = compute_sizing_with(&reference_input(), &BuiltinMaterials, &catalog).expect("sizing");
    assert_eq!(r.recommended_standard_sizes, vec!["63mm x 10mm", "125mm x 10mm"]);
}

#[test]
fn advanced_grids_follow_the_radial_profile() {
    let input = reference_input().with_advanced(true).with_ambient(35.0);
    let r = compute_sizing(&input).expect("sizing");
    let adv = &r.advanced_results;
    let force = adv.force_distribution.as_ref().expect("force grid");
    let stress = adv.stress_distribution.as_ref().expect("stress grid");
    let temp = adv.temperature_distribution.as_ref().expect("temperature grid");
    assert_eq!(force.len(), 100);
    assert_eq!(stress.len(), 100);
    assert_eq!(temp.len(), 100);
    assert_close("force corner", force[0], r.short_circuit_force * 0.5, 1e-12);
    assert_close("stress corner", stress[9], r.mechanical_stress * 0.7, 1e-12);
    assert_close("temp corner", temp[90], 35.0, 1e-12);
    assert!(temp.iter().all(|t| *t >= 35.0 && *t <= 35.0 + r.temperature_rise + 1e-12));
}

#[test]
fn advanced_grids_serialize_with_capitalized_keys() {
    let r = compute_sizing(&reference_input().with_advanced(true)).expect("sizing");
    let json = serde_json::to_value(&r).expect("json");
    assert!(json["advancedResults"]["ForceDistribution"].is_array());
    assert!(json["advancedResults"]["TemperatureDistribution"].is_array());
    assert!(json["requiredCrossSectionArea"].is_number());

    let plain = serde_json::to_value(compute_sizing(&reference_input()).expect("sizing")).expect("json");
    assert!(plain["advancedResults"].get("ForceDistribution").is_none());
}

#[test]
fn invalid_typed_input_is_rejected_before_calculation() {
    let input = BusbarInput::new(MaterialKind::Copper, 0.0, 0.4)
        .with_geometry(60.0, -1.0, 1000.0)
        .with_fault(50.0, 200.0);
    match compute_sizing(&input) {
        Err(BusbarError::Validation(errors)) => {
            assert_eq!(errors.fields(), vec!["current", "busbarThickness"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn unbalanced_phase_above_design_current_warns() {
    let input = reference_input().unbalanced(PhaseCurrents::new(780.0, 820.0, 800.0));
    let r = compute_sizing(&input).expect("sizing");
    let baseline = compute_sizing(&reference_input()).expect("sizing");
    // 물리량은 설계 전류 기준 그대로
    assert_eq!(r.temperature_rise, baseline.temperature_rise);
    assert_eq!(r.warnings.len(), baseline.warnings.len() + 1);
}

#[test]
fn repeated_calls_are_identical() {
    let input = reference_input().with_advanced(true);
    let a = compute_sizing(&input).expect("sizing");
    let b = compute_sizing(&input).expect("sizing");
    assert_eq!(a, b);
}
