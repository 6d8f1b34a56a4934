//! 부스바 사이징 입력값과 요청(JSON/CLI) 형태의 원시 입력 검증.
//!
//! 원시 입력은 숫자 또는 숫자 문자열을 받아 숫자로 변환한 뒤 검증한다.
//! 검증은 첫 번째 오류에서 멈추지 않고 모든 위반 필드를 모아서 반환한다.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{BusbarError, CalcResult, ValidationErrors};
use crate::material_db::{self, MaterialKind};

pub const DEFAULT_AMBIENT_TEMPERATURE_C: f64 = 40.0;
pub const DEFAULT_POWER_FACTOR: f64 = 0.9;
pub const DEFAULT_BARS_PER_PHASE: u32 = 1;

pub const AMBIENT_TEMPERATURE_RANGE_C: (f64, f64) = (-50.0, 100.0);
pub const BARS_PER_PHASE_RANGE: (u32, u32) = (1, 10);
pub const POWER_FACTOR_RANGE: (f64, f64) = (0.0, 1.0);

const MSG_REQUIRED: &str = "필수 항목입니다.";
const MSG_NOT_NUMBER: &str = "숫자가 아닙니다.";
const MSG_NOT_BOOLEAN: &str = "true 또는 false 여야 합니다.";
const MSG_NOT_FINITE: &str = "유한한 숫자여야 합니다.";
const MSG_NOT_POSITIVE: &str = "0보다 커야 합니다.";

/// 부스바 배치. 현재 계산식에는 영향을 주지 않고 기록만 된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Arrangement {
    #[default]
    Horizontal,
    Vertical,
    Flat,
}

impl std::str::FromStr for Arrangement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "horizontal" | "h" => Ok(Arrangement::Horizontal),
            "vertical" | "v" => Ok(Arrangement::Vertical),
            "flat" => Ok(Arrangement::Flat),
            _ => Err(format!("알 수 없는 배치: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SystemType {
    SinglePhase,
    #[default]
    ThreePhase,
}

impl std::str::FromStr for SystemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        match key.as_str() {
            "singlephase" | "single" | "1ph" | "1phase" => Ok(SystemType::SinglePhase),
            "threephase" | "three" | "3ph" | "3phase" => Ok(SystemType::ThreePhase),
            _ => Err(format!("알 수 없는 계통 방식: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionType {
    Delta,
    #[default]
    Star,
}

impl std::str::FromStr for ConnectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delta" | "d" => Ok(ConnectionType::Delta),
            "star" | "wye" | "y" => Ok(ConnectionType::Star),
            _ => Err(format!("알 수 없는 결선 방식: {s}")),
        }
    }
}

/// 불평형 3상 계통의 상별 전류 [A].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseCurrents {
    pub phase_a: f64,
    pub phase_b: f64,
    pub phase_c: f64,
}

impl PhaseCurrents {
    pub fn new(phase_a: f64, phase_b: f64, phase_c: f64) -> Self {
        Self {
            phase_a,
            phase_b,
            phase_c,
        }
    }

    pub fn max(&self) -> f64 {
        self.phase_a.max(self.phase_b).max(self.phase_c)
    }

    fn named(&self) -> [(&'static str, f64); 3] {
        [
            ("phaseCurrents.phaseA", self.phase_a),
            ("phaseCurrents.phaseB", self.phase_b),
            ("phaseCurrents.phaseC", self.phase_c),
        ]
    }
}

/// 검증을 통과한 사이징 입력. 단위: 전류 A, 전압 kV, 치수 mm, 단락전류 kA, 온도 °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusbarInput {
    pub current: f64,
    pub voltage: f64,
    pub material: MaterialKind,
    pub ambient_temperature: f64,
    pub arrangement: Arrangement,
    pub busbar_width: f64,
    pub busbar_thickness: f64,
    pub busbar_length: f64,
    pub short_circuit_current: f64,
    pub phase_distance: f64,
    pub number_of_bars_per_phase: u32,
    pub system_type: SystemType,
    pub connection_type: ConnectionType,
    pub power_factor: f64,
    pub is_balanced: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_currents: Option<PhaseCurrents>,
    #[serde(default)]
    pub use_advanced_calculation: bool,
}

impl BusbarInput {
    /// 기본값으로 채운 입력을 만든다. 형상과 단락 조건은 `with_*`로 지정해야 검증을 통과한다.
    pub fn new(material: MaterialKind, current_a: f64, voltage_kv: f64) -> Self {
        Self {
            current: current_a,
            voltage: voltage_kv,
            material,
            ambient_temperature: DEFAULT_AMBIENT_TEMPERATURE_C,
            arrangement: Arrangement::default(),
            busbar_width: 0.0,
            busbar_thickness: 0.0,
            busbar_length: 0.0,
            short_circuit_current: 0.0,
            phase_distance: 0.0,
            number_of_bars_per_phase: DEFAULT_BARS_PER_PHASE,
            system_type: SystemType::default(),
            connection_type: ConnectionType::default(),
            power_factor: DEFAULT_POWER_FACTOR,
            is_balanced: true,
            phase_currents: None,
            use_advanced_calculation: false,
        }
    }

    pub fn with_geometry(mut self, width_mm: f64, thickness_mm: f64, length_mm: f64) -> Self {
        self.busbar_width = width_mm;
        self.busbar_thickness = thickness_mm;
        self.busbar_length = length_mm;
        self
    }

    pub fn with_fault(mut self, short_circuit_ka: f64, phase_distance_mm: f64) -> Self {
        self.short_circuit_current = short_circuit_ka;
        self.phase_distance = phase_distance_mm;
        self
    }

    pub fn with_ambient(mut self, ambient_c: f64) -> Self {
        self.ambient_temperature = ambient_c;
        self
    }

    pub fn with_advanced(mut self, enabled: bool) -> Self {
        self.use_advanced_calculation = enabled;
        self
    }

    /// 3상 불평형 계통으로 설정한다.
    pub fn unbalanced(mut self, phases: PhaseCurrents) -> Self {
        self.system_type = SystemType::ThreePhase;
        self.is_balanced = false;
        self.phase_currents = Some(phases);
        self
    }

    /// 실제 단면적 [mm²]
    pub fn cross_section_mm2(&self) -> f64 {
        self.busbar_width * self.busbar_thickness
    }

    pub fn requires_phase_currents(&self) -> bool {
        self.system_type == SystemType::ThreePhase && !self.is_balanced
    }

    /// 값 객체의 불변식을 모두 확인하고 위반 항목을 한꺼번에 반환한다.
    pub fn validate(&self) -> CalcResult<()> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            ("current", self.current),
            ("voltage", self.voltage),
            ("busbarWidth", self.busbar_width),
            ("busbarThickness", self.busbar_thickness),
            ("busbarLength", self.busbar_length),
            ("shortCircuitCurrent", self.short_circuit_current),
            ("phaseDistance", self.phase_distance),
        ] {
            check_positive(&mut errors, field, value);
        }
        check_range(
            &mut errors,
            "ambientTemperature",
            self.ambient_temperature,
            AMBIENT_TEMPERATURE_RANGE_C,
        );
        check_range(&mut errors, "powerFactor", self.power_factor, POWER_FACTOR_RANGE);
        let (min_bars, max_bars) = BARS_PER_PHASE_RANGE;
        if !(min_bars..=max_bars).contains(&self.number_of_bars_per_phase) {
            errors.push(
                "numberOfBarsPerPhase",
                format!("{min_bars}~{max_bars} 범위여야 합니다."),
            );
        }
        if self.requires_phase_currents() {
            match self.phase_currents {
                Some(phases) => {
                    for (field, value) in phases.named() {
                        check_positive(&mut errors, field, value);
                    }
                }
                None => {
                    for field in [
                        "phaseCurrents.phaseA",
                        "phaseCurrents.phaseB",
                        "phaseCurrents.phaseC",
                    ] {
                        errors.push(field, MSG_REQUIRED);
                    }
                }
            }
        }
        errors.into_result()
    }
}

/// 숫자 또는 숫자 문자열. 그 밖의 JSON 값은 `Other`로 받아 검증 단계에서 필드 오류로 보고한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl NumberInput {
    /// 값이 비어 있으면 `Ok(None)`, 숫자로 해석할 수 없으면 `Err`.
    fn read(&self) -> Result<Option<f64>, &'static str> {
        match self {
            NumberInput::Number(v) => Ok(Some(*v)),
            NumberInput::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    Ok(None)
                } else {
                    s.parse::<f64>().map(Some).map_err(|_| MSG_NOT_NUMBER)
                }
            }
            NumberInput::Other(_) => Err(MSG_NOT_NUMBER),
        }
    }
}

impl std::fmt::Display for NumberInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberInput::Number(v) => write!(f, "{v}"),
            NumberInput::Text(s) => write!(f, "{s}"),
            NumberInput::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for NumberInput {
    fn from(value: f64) -> Self {
        NumberInput::Number(value)
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        NumberInput::Text(value.to_string())
    }
}

/// 참/거짓 또는 `"true"`/`"false"` 문자열.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagInput {
    Flag(bool),
    Text(String),
    Other(serde_json::Value),
}

impl FlagInput {
    fn read(&self) -> Result<Option<bool>, &'static str> {
        match self {
            FlagInput::Flag(b) => Ok(Some(*b)),
            FlagInput::Text(s) => match s.trim().to_lowercase().as_str() {
                "" => Ok(None),
                "true" | "yes" | "y" => Ok(Some(true)),
                "false" | "no" | "n" => Ok(Some(false)),
                _ => Err(MSG_NOT_BOOLEAN),
            },
            FlagInput::Other(_) => Err(MSG_NOT_BOOLEAN),
        }
    }
}

impl From<bool> for FlagInput {
    fn from(value: bool) -> Self {
        FlagInput::Flag(value)
    }
}

/// 문자열 필드에 다른 JSON 값이 오면 그 표기를 문자열로 받아 선택지 검증에서 거부되게 한다.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPhaseCurrents {
    pub phase_a: Option<NumberInput>,
    pub phase_b: Option<NumberInput>,
    pub phase_c: Option<NumberInput>,
}

/// API/CLI 요청 형태의 입력. 모든 필드가 선택적이며 `parse`에서 검증한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBusbarInput {
    pub current: Option<NumberInput>,
    pub voltage: Option<NumberInput>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub material: Option<String>,
    pub ambient_temperature: Option<NumberInput>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub arrangement: Option<String>,
    pub busbar_width: Option<NumberInput>,
    pub busbar_thickness: Option<NumberInput>,
    pub busbar_length: Option<NumberInput>,
    pub short_circuit_current: Option<NumberInput>,
    pub phase_distance: Option<NumberInput>,
    pub number_of_bars_per_phase: Option<NumberInput>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub system_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub connection_type: Option<String>,
    pub power_factor: Option<NumberInput>,
    pub is_balanced: Option<FlagInput>,
    pub phase_currents: Option<RawPhaseCurrents>,
    pub use_advanced_calculation: Option<FlagInput>,
}

impl RawBusbarInput {
    pub fn from_json(src: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(src)
    }

    /// 숫자 변환과 검증을 수행해 `BusbarInput`을 만든다.
    ///
    /// 필드 오류가 하나라도 있으면 모든 항목을 담은 `Validation` 오류를,
    /// 필드는 모두 유효하지만 재질을 찾을 수 없으면 `UnknownMaterial`을 반환한다.
    pub fn parse(&self) -> CalcResult<BusbarInput> {
        let mut errors = ValidationErrors::new();

        let current = required_positive(&mut errors, "current", self.current.as_ref());
        let voltage = required_positive(&mut errors, "voltage", self.voltage.as_ref());

        let mut unknown_material = None;
        let material = match self.material.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("material", MSG_REQUIRED);
                None
            }
            Some(code) => match material_db::find_material(code) {
                Ok(props) => Some(props.kind),
                Err(_) => {
                    unknown_material = Some(code.to_string());
                    None
                }
            },
        };

        let ambient_temperature = optional_in_range(
            &mut errors,
            "ambientTemperature",
            self.ambient_temperature.as_ref(),
            AMBIENT_TEMPERATURE_RANGE_C,
        )
        .unwrap_or(DEFAULT_AMBIENT_TEMPERATURE_C);
        let arrangement = parse_choice(&mut errors, "arrangement", self.arrangement.as_deref());

        let busbar_width = required_positive(&mut errors, "busbarWidth", self.busbar_width.as_ref());
        let busbar_thickness =
            required_positive(&mut errors, "busbarThickness", self.busbar_thickness.as_ref());
        let busbar_length =
            required_positive(&mut errors, "busbarLength", self.busbar_length.as_ref());
        let short_circuit_current = required_positive(
            &mut errors,
            "shortCircuitCurrent",
            self.short_circuit_current.as_ref(),
        );
        let phase_distance =
            required_positive(&mut errors, "phaseDistance", self.phase_distance.as_ref());

        let number_of_bars_per_phase =
            parse_bars_per_phase(&mut errors, self.number_of_bars_per_phase.as_ref());
        let system_type: SystemType =
            parse_choice(&mut errors, "systemType", self.system_type.as_deref());
        let connection_type =
            parse_choice(&mut errors, "connectionType", self.connection_type.as_deref());
        let power_factor = optional_in_range(
            &mut errors,
            "powerFactor",
            self.power_factor.as_ref(),
            POWER_FACTOR_RANGE,
        )
        .unwrap_or(DEFAULT_POWER_FACTOR);
        let is_balanced =
            parse_flag(&mut errors, "isBalanced", self.is_balanced.as_ref()).unwrap_or(true);
        let use_advanced_calculation = parse_flag(
            &mut errors,
            "useAdvancedCalculation",
            self.use_advanced_calculation.as_ref(),
        )
        .unwrap_or(false);

        let needs_phases = system_type == SystemType::ThreePhase && !is_balanced;
        let phase_currents = parse_phase_currents(&mut errors, self.phase_currents.as_ref(), needs_phases);

        if let Some(code) = &unknown_material {
            if !errors.is_empty() {
                errors.push("material", format!("알 수 없는 재질: {code}"));
            }
        }

        let (
            Some(current),
            Some(voltage),
            Some(material),
            Some(busbar_width),
            Some(busbar_thickness),
            Some(busbar_length),
            Some(short_circuit_current),
            Some(phase_distance),
        ) = (
            current,
            voltage,
            material,
            busbar_width,
            busbar_thickness,
            busbar_length,
            short_circuit_current,
            phase_distance,
        )
        else {
            return Err(match unknown_material {
                Some(code) if errors.is_empty() => BusbarError::UnknownMaterial(code),
                _ => BusbarError::Validation(errors),
            });
        };
        errors.into_result()?;

        Ok(BusbarInput {
            current,
            voltage,
            material,
            ambient_temperature,
            arrangement,
            busbar_width,
            busbar_thickness,
            busbar_length,
            short_circuit_current,
            phase_distance,
            number_of_bars_per_phase,
            system_type,
            connection_type,
            power_factor,
            is_balanced,
            phase_currents,
            use_advanced_calculation,
        })
    }
}

impl From<&BusbarInput> for RawBusbarInput {
    fn from(input: &BusbarInput) -> Self {
        let num = |v: f64| Some(NumberInput::Number(v));
        Self {
            current: num(input.current),
            voltage: num(input.voltage),
            material: Some(input.material.code().to_string()),
            ambient_temperature: num(input.ambient_temperature),
            arrangement: Some(format!("{:?}", input.arrangement)),
            busbar_width: num(input.busbar_width),
            busbar_thickness: num(input.busbar_thickness),
            busbar_length: num(input.busbar_length),
            short_circuit_current: num(input.short_circuit_current),
            phase_distance: num(input.phase_distance),
            number_of_bars_per_phase: num(f64::from(input.number_of_bars_per_phase)),
            system_type: Some(format!("{:?}", input.system_type)),
            connection_type: Some(format!("{:?}", input.connection_type)),
            power_factor: num(input.power_factor),
            is_balanced: Some(input.is_balanced.into()),
            phase_currents: input.phase_currents.map(|p| RawPhaseCurrents {
                phase_a: num(p.phase_a),
                phase_b: num(p.phase_b),
                phase_c: num(p.phase_c),
            }),
            use_advanced_calculation: Some(input.use_advanced_calculation.into()),
        }
    }
}

pub(crate) fn read_number(raw: Option<&NumberInput>) -> Result<Option<f64>, &'static str> {
    match raw {
        Some(v) => v.read(),
        None => Ok(None),
    }
}

pub(crate) fn check_positive(errors: &mut ValidationErrors, field: &str, value: f64) -> bool {
    if !value.is_finite() {
        errors.push(field, MSG_NOT_FINITE);
        false
    } else if value <= 0.0 {
        errors.push(field, MSG_NOT_POSITIVE);
        false
    } else {
        true
    }
}

fn check_range(errors: &mut ValidationErrors, field: &str, value: f64, (min, max): (f64, f64)) -> bool {
    if !value.is_finite() {
        errors.push(field, MSG_NOT_FINITE);
        false
    } else if value < min || value > max {
        errors.push(field, format!("{min}~{max} 범위여야 합니다."));
        false
    } else {
        true
    }
}

pub(crate) fn required_positive(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&NumberInput>,
) -> Option<f64> {
    match read_number(raw) {
        Ok(Some(v)) => check_positive(errors, field, v).then_some(v),
        Ok(None) => {
            errors.push(field, MSG_REQUIRED);
            None
        }
        Err(msg) => {
            errors.push(field, msg);
            None
        }
    }
}

fn optional_in_range(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&NumberInput>,
    range: (f64, f64),
) -> Option<f64> {
    match read_number(raw) {
        Ok(Some(v)) => check_range(errors, field, v, range).then_some(v),
        Ok(None) => None,
        Err(msg) => {
            errors.push(field, msg);
            None
        }
    }
}

fn parse_bars_per_phase(errors: &mut ValidationErrors, raw: Option<&NumberInput>) -> u32 {
    let (min, max) = BARS_PER_PHASE_RANGE;
    match read_number(raw) {
        Ok(None) => DEFAULT_BARS_PER_PHASE,
        Ok(Some(v)) if v.fract() == 0.0 && v >= f64::from(min) && v <= f64::from(max) => v as u32,
        Ok(Some(_)) => {
            errors.push(
                "numberOfBarsPerPhase",
                format!("{min}~{max} 범위의 정수여야 합니다."),
            );
            DEFAULT_BARS_PER_PHASE
        }
        Err(msg) => {
            errors.push("numberOfBarsPerPhase", msg);
            DEFAULT_BARS_PER_PHASE
        }
    }
}

fn parse_flag(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&FlagInput>,
) -> Option<bool> {
    match raw.map(FlagInput::read) {
        None | Some(Ok(None)) => None,
        Some(Ok(Some(b))) => Some(b),
        Some(Err(msg)) => {
            errors.push(field, msg);
            None
        }
    }
}

fn parse_choice<T>(errors: &mut ValidationErrors, field: &str, raw: Option<&str>) -> T
where
    T: std::str::FromStr<Err = String> + Default,
{
    match raw.map(str::trim) {
        None | Some("") => T::default(),
        Some(s) => s.parse().unwrap_or_else(|msg: String| {
            errors.push(field, msg);
            T::default()
        }),
    }
}

fn parse_phase_currents(
    errors: &mut ValidationErrors,
    raw: Option<&RawPhaseCurrents>,
    required: bool,
) -> Option<PhaseCurrents> {
    let empty = RawPhaseCurrents::default();
    let raw = match raw {
        Some(raw) => raw,
        None if required => &empty,
        None => return None,
    };
    let mut read = |field: &str, value: Option<&NumberInput>| {
        if required {
            required_positive(errors, field, value)
        } else {
            match read_number(value) {
                Ok(None) => None,
                Ok(Some(v)) => check_positive(errors, field, v).then_some(v),
                Err(msg) => {
                    errors.push(field, msg);
                    None
                }
            }
        }
    };
    let a = read("phaseCurrents.phaseA", raw.phase_a.as_ref());
    let b = read("phaseCurrents.phaseB", raw.phase_b.as_ref());
    let c = read("phaseCurrents.phaseC", raw.phase_c.as_ref());
    match (a, b, c) {
        (Some(a), Some(b), Some(c)) => Some(PhaseCurrents::new(a, b, c)),
        _ => None,
    }
}
