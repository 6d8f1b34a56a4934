use thiserror::Error;

use crate::quantity::QuantityKind;
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `C`, `F`, `mm`, `in`, `mm2`, `kcmil`, `MPa`, `psi`, `kN`, `lbf` 등이다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Temperature => {
            let from = parse_temperature_unit(from_unit_str)?;
            let to = parse_temperature_unit(to_unit_str)?;
            Ok(convert_temperature(value, from, to))
        }
        QuantityKind::TemperatureDifference => {
            let from = parse_temperature_diff_unit(from_unit_str)?;
            let to = parse_temperature_diff_unit(to_unit_str)?;
            Ok(convert_temperature_diff(value, from, to))
        }
        QuantityKind::Length => {
            let from = parse_length_unit(from_unit_str)?;
            let to = parse_length_unit(to_unit_str)?;
            Ok(convert_length(value, from, to))
        }
        QuantityKind::Area => {
            let from = parse_area_unit(from_unit_str)?;
            let to = parse_area_unit(to_unit_str)?;
            Ok(convert_area(value, from, to))
        }
        QuantityKind::Stress => {
            let from = parse_stress_unit(from_unit_str)?;
            let to = parse_stress_unit(to_unit_str)?;
            Ok(convert_stress(value, from, to))
        }
        QuantityKind::Force => {
            let from = parse_force_unit(from_unit_str)?;
            let to = parse_force_unit(to_unit_str)?;
            Ok(convert_force(value, from, to))
        }
    }
}

pub fn parse_temperature_unit(s: &str) -> Result<TemperatureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "c" | "celsius" | "°c" => Ok(TemperatureUnit::Celsius),
        "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
        "f" | "fahrenheit" | "°f" => Ok(TemperatureUnit::Fahrenheit),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_temperature_diff_unit(s: &str) -> Result<TemperatureDiffUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "k" | "kelvin" => Ok(TemperatureDiffUnit::Kelvin),
        "c" | "celsius" | "°c" => Ok(TemperatureDiffUnit::Celsius),
        "f" | "fahrenheit" | "°f" => Ok(TemperatureDiffUnit::Fahrenheit),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_length_unit(s: &str) -> Result<LengthUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "mm" | "millimeter" => Ok(LengthUnit::Millimeter),
        "cm" => Ok(LengthUnit::Centimeter),
        "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
        "in" | "inch" | "\"" => Ok(LengthUnit::Inch),
        "ft" | "foot" => Ok(LengthUnit::Foot),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_area_unit(s: &str) -> Result<AreaUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "mm2" | "mm^2" | "mm²" | "sqmm" => Ok(AreaUnit::SquareMillimeter),
        "cm2" | "cm^2" | "cm²" => Ok(AreaUnit::SquareCentimeter),
        "m2" | "m^2" | "m²" | "sqm" => Ok(AreaUnit::SquareMeter),
        "in2" | "in^2" | "in²" | "sqin" => Ok(AreaUnit::SquareInch),
        "kcmil" | "mcm" => Ok(AreaUnit::Kcmil),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_stress_unit(s: &str) -> Result<StressUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "pa" | "pascal" => Ok(StressUnit::Pascal),
        "kpa" => Ok(StressUnit::KiloPascal),
        "mpa" => Ok(StressUnit::MegaPascal),
        "n/mm2" | "n/mm^2" | "n/mm²" => Ok(StressUnit::NPerSquareMillimeter),
        "kgf/mm2" | "kg/mm2" => Ok(StressUnit::KgfPerSquareMillimeter),
        "psi" => Ok(StressUnit::Psi),
        "ksi" => Ok(StressUnit::Ksi),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_force_unit(s: &str) -> Result<ForceUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "n" | "newton" => Ok(ForceUnit::Newton),
        "kn" | "kilonewton" => Ok(ForceUnit::KiloNewton),
        "kgf" => Ok(ForceUnit::KilogramForce),
        "lbf" => Ok(ForceUnit::PoundForce),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}
