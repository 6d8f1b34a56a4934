//! 단락 과도 시뮬레이션: 감쇠하는 직류 오프셋과 50 Hz 교류 성분을 합성한 시계열.
//!
//! 온도는 적분하지 않고 순시 전류²과 경과 시간에 비례하는 근사식을 사용한다.

use serde::{Deserialize, Serialize};

use super::input::{read_number, BusbarInput, NumberInput, AMBIENT_TEMPERATURE_RANGE_C};
use super::sizing::MU0_OVER_2PI;
use crate::error::{BusbarError, CalcResult, ValidationErrors};

pub const MAX_DURATION_S: f64 = 10.0;
pub const MIN_TIME_STEPS: usize = 10;
pub const MAX_TIME_STEPS: usize = 1000;

/// 대칭 실효값 대비 첫 파고값 배율.
pub const PEAK_FACTOR: f64 = 2.5;
/// 직류 성분 감쇠 시정수 [s]
pub const DC_TIME_CONSTANT_S: f64 = 0.1;
pub const SYSTEM_FREQUENCY_HZ: f64 = 50.0;
const HEATING_COEFFICIENT: f64 = 0.05;
const HEATING_TIME_SCALE: f64 = 10.0;

/// 과도해석에 필요한 최소 입력 (사이징 입력/결과에서 가져온다).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationPrerequisites {
    /// [°C]
    pub ambient_temperature: f64,
    /// [kA]
    pub short_circuit_current: f64,
    /// [mm]
    pub busbar_length: f64,
    /// [mm]
    pub phase_distance: f64,
}

impl From<&BusbarInput> for SimulationPrerequisites {
    fn from(input: &BusbarInput) -> Self {
        Self {
            ambient_temperature: input.ambient_temperature,
            short_circuit_current: input.short_circuit_current,
            busbar_length: input.busbar_length,
            phase_distance: input.phase_distance,
        }
    }
}

/// 요청의 `busbarData`. 사이징 입력/결과 형태의 객체에서 필요한 필드만 읽는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSimulationData {
    pub ambient_temperature: Option<NumberInput>,
    pub short_circuit_current: Option<NumberInput>,
    pub busbar_length: Option<NumberInput>,
    pub phase_distance: Option<NumberInput>,
}

impl RawSimulationData {
    /// 필요한 필드가 없거나 유효하지 않으면 해당 필드를 모두 나열한 오류를 반환한다.
    ///
    /// 주위 온도는 사이징 입력과 같은 범위를 요구한다.
    pub fn prerequisites(&self) -> CalcResult<SimulationPrerequisites> {
        let (min_ambient, max_ambient) = AMBIENT_TEMPERATURE_RANGE_C;
        let ambient_ok = |v: f64| (min_ambient..=max_ambient).contains(&v);
        let positive = |v: f64| v > 0.0;

        let mut missing = Vec::new();
        let mut take = |field: &str, raw: Option<&NumberInput>, accept: &dyn Fn(f64) -> bool| {
            match read_number(raw) {
                Ok(Some(v)) if v.is_finite() && accept(v) => Some(v),
                _ => {
                    missing.push(field.to_string());
                    None
                }
            }
        };
        let ambient = take("ambientTemperature", self.ambient_temperature.as_ref(), &ambient_ok);
        let short_circuit =
            take("shortCircuitCurrent", self.short_circuit_current.as_ref(), &positive);
        let length = take("busbarLength", self.busbar_length.as_ref(), &positive);
        let distance = take("phaseDistance", self.phase_distance.as_ref(), &positive);

        match (ambient, short_circuit, length, distance) {
            (Some(ambient_temperature), Some(short_circuit_current), Some(busbar_length), Some(phase_distance)) => {
                Ok(SimulationPrerequisites {
                    ambient_temperature,
                    short_circuit_current,
                    busbar_length,
                    phase_distance,
                })
            }
            _ => Err(BusbarError::MissingPrerequisiteData(missing)),
        }
    }
}

/// 과도해석 요청: `{ busbarData, duration, timeSteps }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub busbar_data: Option<RawSimulationData>,
    pub duration: Option<NumberInput>,
    pub time_steps: Option<NumberInput>,
}

impl SimulationRequest {
    /// 생략된 해석 시간/스텝 수는 `defaults`로 채워 시뮬레이션을 실행한다.
    pub fn run(&self, defaults: (f64, usize)) -> CalcResult<ShortCircuitTimeSeries> {
        let (default_duration, default_steps) = defaults;
        let (duration_s, time_steps) = check_parameters(
            Parameter::from_request(self.duration.as_ref(), default_duration),
            Parameter::from_request(self.time_steps.as_ref(), default_steps as f64),
        )?;
        let data = self.busbar_data.clone().unwrap_or_default();
        let prerequisites = data.prerequisites()?;
        simulate(&prerequisites, duration_s, time_steps)
    }
}

/// 단락 과도 시계열. 모든 배열은 `time_points`와 인덱스가 일치한다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortCircuitTimeSeries {
    /// [s]
    pub time_points: Vec<f64>,
    /// [A]
    pub current_values: Vec<f64>,
    /// [N]
    pub force_values: Vec<f64>,
    /// [°C]
    pub temperature_values: Vec<f64>,
    /// 전류 절댓값의 최대 [A]
    pub max_current: f64,
    pub max_force: f64,
    pub max_temperature: f64,
}

/// 검증된 사이징 입력으로 과도해석을 수행한다.
pub fn simulate_transient(
    input: &BusbarInput,
    duration_s: f64,
    time_steps: usize,
) -> CalcResult<ShortCircuitTimeSeries> {
    simulate(&SimulationPrerequisites::from(input), duration_s, time_steps)
}

/// 해석 조건 하나: 숫자로 읽은 값과 오류 메시지에 쓸 제출 원문.
struct Parameter {
    value: Option<f64>,
    submitted: String,
}

impl Parameter {
    fn given(value: f64) -> Self {
        Self {
            value: Some(value),
            submitted: value.to_string(),
        }
    }

    /// 비어 있으면 `default`를 쓴다.
    fn from_request(raw: Option<&NumberInput>, default: f64) -> Self {
        match (read_number(raw), raw) {
            (Ok(Some(v)), Some(raw)) => Self {
                value: Some(v),
                submitted: raw.to_string(),
            },
            (Ok(_), _) => Self::given(default),
            (Err(_), raw) => Self {
                value: None,
                submitted: raw.map(ToString::to_string).unwrap_or_default(),
            },
        }
    }
}

fn check_parameters(duration: Parameter, time_steps: Parameter) -> CalcResult<(f64, usize)> {
    let mut errors = ValidationErrors::new();
    let duration_s = duration.value.filter(|d| *d > 0.0 && *d <= MAX_DURATION_S);
    if duration_s.is_none() {
        errors.push(
            "duration",
            format!(
                "0 초과 {MAX_DURATION_S} 이하의 초 단위 숫자여야 합니다 (입력: {}).",
                duration.submitted
            ),
        );
    }
    let steps = time_steps
        .value
        .filter(|n| n.fract() == 0.0 && *n >= MIN_TIME_STEPS as f64 && *n <= MAX_TIME_STEPS as f64)
        .map(|n| n as usize);
    if steps.is_none() {
        errors.push(
            "timeSteps",
            format!(
                "{MIN_TIME_STEPS}~{MAX_TIME_STEPS} 범위의 정수여야 합니다 (입력: {}).",
                time_steps.submitted
            ),
        );
    }
    match (duration_s, steps) {
        (Some(duration_s), Some(steps)) => Ok((duration_s, steps)),
        _ => Err(BusbarError::InvalidSimulationParameters {
            duration: duration.submitted,
            time_steps: time_steps.submitted,
            errors,
        }),
    }
}

/// `[0, duration_s]` 구간을 `time_steps`개 점으로 균등 분할해 시계열을 만든다.
pub fn simulate(
    data: &SimulationPrerequisites,
    duration_s: f64,
    time_steps: usize,
) -> CalcResult<ShortCircuitTimeSeries> {
    let (duration_s, time_steps) = check_parameters(
        Parameter::given(duration_s),
        Parameter::given(time_steps as f64),
    )?;

    let fault_current_a = data.short_circuit_current * 1000.0;
    let peak_current = fault_current_a * PEAK_FACTOR;
    let steady_state_current = fault_current_a * std::f64::consts::SQRT_2;
    let omega = 2.0 * std::f64::consts::PI * SYSTEM_FREQUENCY_HZ;
    let length_m = data.busbar_length / 1000.0;
    let distance_m = data.phase_distance / 1000.0;

    let last = (time_steps - 1) as f64;
    let mut series = ShortCircuitTimeSeries {
        time_points: Vec::with_capacity(time_steps),
        current_values: Vec::with_capacity(time_steps),
        force_values: Vec::with_capacity(time_steps),
        temperature_values: Vec::with_capacity(time_steps),
        max_current: 0.0,
        max_force: f64::NEG_INFINITY,
        max_temperature: f64::NEG_INFINITY,
    };

    for i in 0..time_steps {
        // 비율을 먼저 구해 마지막 점이 정확히 duration이 되도록 한다.
        let t = (i as f64 / last) * duration_s;
        let current = peak_current * (-t / DC_TIME_CONSTANT_S).exp() * (omega * t).cos()
            + steady_state_current * (omega * t).sin();
        let force = (MU0_OVER_2PI * current.powi(2) * length_m / distance_m).abs();
        let temperature = data.ambient_temperature
            + (current / 1000.0).powi(2) * HEATING_COEFFICIENT * t * HEATING_TIME_SCALE;

        series.max_current = series.max_current.max(current.abs());
        series.max_force = series.max_force.max(force);
        series.max_temperature = series.max_temperature.max(temperature);

        series.time_points.push(t);
        series.current_values.push(current);
        series.force_values.push(force);
        series.temperature_values.push(temperature);
    }

    Ok(series)
}
