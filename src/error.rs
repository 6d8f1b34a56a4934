//! 부스바 계산 코어의 오류 타입.

use serde::Serialize;
use thiserror::Error;

/// 단일 입력 필드의 검증 실패 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// 요청 필드 이름 (예: `busbarWidth`, `phaseCurrents.phaseA`)
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 검증 실패 목록. 첫 번째 오류에서 멈추지 않고 모든 위반 항목을 담는다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// 해당 필드에 대한 오류가 포함되어 있는지 확인한다.
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }

    /// 비어 있으면 `Ok(())`, 아니면 `BusbarError::Validation`으로 변환한다.
    pub fn into_result(self) -> Result<(), BusbarError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(BusbarError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

/// 사이징/과도해석 코어에서 발생 가능한 오류.
///
/// 모든 변형은 입력에 대한 결정적 거부이며 재시도로 해결되지 않는다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BusbarError {
    #[error("입력 검증 실패 ({} 건): {0}", .0.len())]
    Validation(ValidationErrors),

    #[error("알 수 없는 재질: {0}")]
    UnknownMaterial(String),

    /// `duration`/`time_steps`는 제출된 값 그대로의 표기.
    #[error("해석 조건 오류: duration={duration}, timeSteps={time_steps} ({errors})")]
    InvalidSimulationParameters {
        duration: String,
        time_steps: String,
        errors: ValidationErrors,
    },

    #[error("과도해석에 필요한 사이징 데이터가 없습니다: {}", .0.join(", "))]
    MissingPrerequisiteData(Vec<String>),
}

impl BusbarError {
    /// 오류 종류를 나타내는 고정 문자열. API 응답의 `error` 필드로 사용한다.
    pub fn kind(&self) -> &'static str {
        match self {
            BusbarError::Validation(_) => "ValidationError",
            BusbarError::UnknownMaterial(_) => "UnknownMaterial",
            BusbarError::InvalidSimulationParameters { .. } => "InvalidSimulationParameters",
            BusbarError::MissingPrerequisiteData(_) => "MissingPrerequisiteData",
        }
    }

    /// 필드 단위 상세 목록.
    pub fn details(&self) -> Vec<FieldError> {
        match self {
            BusbarError::Validation(errors) => errors.iter().cloned().collect(),
            BusbarError::MissingPrerequisiteData(fields) => fields
                .iter()
                .map(|f| FieldError::new(f.clone(), "missing or invalid"))
                .collect(),
            BusbarError::UnknownMaterial(code) => {
                vec![FieldError::new("material", format!("unknown material '{code}'"))]
            }
            BusbarError::InvalidSimulationParameters { errors, .. } => {
                errors.iter().cloned().collect()
            }
        }
    }
}

pub type CalcResult<T> = Result<T, BusbarError>;
