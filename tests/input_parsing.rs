//! 요청 형태(JSON) 입력의 숫자 변환과 검증 오류 집계.
use busbar_sizing_toolbox::busbar::{
    Arrangement, BusbarInput, ConnectionType, RawBusbarInput, SystemType,
};
use busbar_sizing_toolbox::error::BusbarError;
use busbar_sizing_toolbox::material_db::MaterialKind;

fn parse(json: &str) -> Result<BusbarInput, BusbarError> {
    RawBusbarInput::from_json(json).expect("json shape").parse()
}

fn validation_fields(err: BusbarError) -> Vec<String> {
    match err {
        BusbarError::Validation(errors) => errors.fields().into_iter().map(String::from).collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

const VALID: &str = r#"{
    "current": "800", "voltage": "0.4", "material": "Copper",
    "busbarWidth": " 60 ", "busbarThickness": 10, "busbarLength": "1000",
    "shortCircuitCurrent": 50, "phaseDistance": "200"
}"#;

#[test]
fn numeric_strings_are_accepted() {
    let input = parse(VALID).expect("valid input");
    assert_eq!(input.current, 800.0);
    assert_eq!(input.busbar_width, 60.0);
    assert_eq!(input.material, MaterialKind::Copper);
}

#[test]
fn omitted_optional_fields_take_defaults() {
    let input = parse(VALID).expect("valid input");
    assert_eq!(input.ambient_temperature, 40.0);
    assert_eq!(input.arrangement, Arrangement::Horizontal);
    assert_eq!(input.number_of_bars_per_phase, 1);
    assert_eq!(input.power_factor, 0.9);
    assert!(input.is_balanced);
    assert_eq!(input.system_type, SystemType::ThreePhase);
    assert_eq!(input.connection_type, ConnectionType::Star);
    assert!(!input.use_advanced_calculation);
}

#[test]
fn every_missing_field_is_reported_at_once() {
    let err = parse(r#"{ "voltage": 0.4, "material": "copper", "busbarThickness": 10,
        "busbarLength": 1000, "phaseDistance": 200 }"#)
    .unwrap_err();
    let fields = validation_fields(err);
    for f in ["current", "busbarWidth", "shortCircuitCurrent"] {
        assert!(fields.iter().any(|x| x == f), "{f} missing from {fields:?}");
    }
    assert_eq!(fields.len(), 3);
}

#[test]
fn non_numeric_and_non_positive_values_are_field_errors() {
    let err = parse(r#"{ "current": "eight hundred", "voltage": -0.4, "material": "cu",
        "busbarWidth": 0, "busbarThickness": 10, "busbarLength": 1000,
        "shortCircuitCurrent": 50, "phaseDistance": 200 }"#)
    .unwrap_err();
    assert_eq!(validation_fields(err), vec!["current", "voltage", "busbarWidth"]);
}

#[test]
fn unknown_material_on_valid_input() {
    let json = VALID.replace("Copper", "unobtanium");
    match parse(&json) {
        Err(BusbarError::UnknownMaterial(code)) => assert_eq!(code, "unobtanium"),
        other => panic!("expected unknown material, got {other:?}"),
    }
}

#[test]
fn unknown_material_joins_other_field_errors() {
    let json = VALID
        .replace("Copper", "unobtanium")
        .replace(r#""current": "800""#, r#""current": "x""#);
    let fields = validation_fields(parse(&json).unwrap_err());
    assert_eq!(fields, vec!["current", "material"]);
}

#[test]
fn material_aliases_are_case_insensitive() {
    for (code, kind) in [
        ("CU", MaterialKind::Copper),
        ("aluminium", MaterialKind::Aluminum),
        ("Al", MaterialKind::Aluminum),
    ] {
        let json = VALID.replace("Copper", code);
        assert_eq!(parse(&json).expect("alias").material, kind);
    }
}

#[test]
fn unbalanced_three_phase_requires_every_phase() {
    let json = VALID.replace(
        r#""current": "800""#,
        r#""current": "800", "isBalanced": false, "phaseCurrents": { "phaseA": 790, "phaseC": -1 }"#,
    );
    let fields = validation_fields(parse(&json).unwrap_err());
    assert_eq!(fields, vec!["phaseCurrents.phaseB", "phaseCurrents.phaseC"]);
}

#[test]
fn unbalanced_single_phase_ignores_phase_currents() {
    let json = VALID.replace(
        r#""current": "800""#,
        r#""current": "800", "systemType": "single-phase", "isBalanced": false"#,
    );
    let input = parse(&json).expect("single phase");
    assert_eq!(input.system_type, SystemType::SinglePhase);
    assert!(input.phase_currents.is_none());
}

#[test]
fn out_of_range_defaults_are_rejected() {
    let json = VALID.replace(
        r#""current": "800""#,
        r#""current": "800", "ambientTemperature": 120, "powerFactor": "1.2",
            "numberOfBarsPerPhase": 2.5, "connectionType": "zigzag""#,
    );
    let fields = validation_fields(parse(&json).unwrap_err());
    assert_eq!(
        fields,
        vec!["ambientTemperature", "numberOfBarsPerPhase", "connectionType", "powerFactor"]
    );
}

#[test]
fn typed_input_round_trips_through_request_shape() {
    let input = parse(VALID).expect("valid input");
    let raw = RawBusbarInput::from(&input);
    assert_eq!(raw.parse().expect("reparse"), input);
}

#[test]
fn wrongly_typed_values_are_field_errors() {
    let json = VALID.replace(
        r#""current": "800""#,
        r#""current": true, "arrangement": 3, "isBalanced": "sometimes",
            "useAdvancedCalculation": [true]"#,
    );
    let fields = validation_fields(parse(&json).unwrap_err());
    assert_eq!(
        fields,
        vec!["current", "arrangement", "isBalanced", "useAdvancedCalculation"]
    );
}

#[test]
fn flags_given_as_text_are_read() {
    let json = VALID.replace(
        r#""current": "800""#,
        r#""current": "800", "isBalanced": "FALSE", "useAdvancedCalculation": "true",
            "phaseCurrents": { "phaseA": 790, "phaseB": "805", "phaseC": 800 }"#,
    );
    let input = parse(&json).expect("unbalanced input");
    assert!(!input.is_balanced);
    assert!(input.use_advanced_calculation);
    assert_eq!(input.phase_currents.map(|p| p.max()), Some(805.0));
}
