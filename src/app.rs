use std::path::Path;

use thiserror::Error;

use crate::config::{self, Config};
use crate::conversion;
use crate::error::BusbarError;
use crate::i18n::{self, Translator};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] config::ConfigError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] conversion::ConversionError),
    /// 사이징/과도해석 계산 오류
    #[error("계산 오류: {0}")]
    Calculation(#[from] BusbarError),
    /// 입력 JSON 형식 오류
    #[error("JSON 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI 애플리케이션의 메인 루프를 실행한다. 종료 시 설정을 `config_path`에 저장한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &Translator) -> Result<(), AppError> {
    loop {
        let choice = ui_cli::main_menu(tr)?;
        tracing::debug!(?choice, "menu selected");
        let outcome = match choice {
            MenuChoice::Sizing => ui_cli::handle_sizing(tr, config),
            MenuChoice::Transient => ui_cli::handle_transient(tr, config),
            MenuChoice::Materials => {
                ui_cli::print_materials(tr);
                Ok(())
            }
            MenuChoice::StandardSizes => ui_cli::print_standard_sizes(tr, config),
            MenuChoice::UnitConversion => ui_cli::handle_unit_conversion(tr),
            MenuChoice::Settings => ui_cli::handle_settings(tr, config),
            MenuChoice::Exit => {
                config.save(config_path)?;
                tracing::debug!(path = %config_path.display(), "saved config");
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        // 계산/변환 오류는 메뉴로 돌아가고, 입출력 오류만 루프를 끝낸다.
        match outcome {
            Ok(()) => {}
            Err(AppError::Io(e)) => return Err(AppError::Io(e)),
            Err(e) => {
                tracing::warn!(error = %e, "menu action failed");
                println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX));
            }
        }
    }
    Ok(())
}
