use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use busbar_sizing_toolbox::app::{self, AppError};
use busbar_sizing_toolbox::busbar::{
    compute_sizing_with, NumberInput, RawBusbarInput, SimulationRequest, SizeCatalog,
};
use busbar_sizing_toolbox::config;
use busbar_sizing_toolbox::i18n::{self, Translator};
use busbar_sizing_toolbox::material_db::{self, BuiltinMaterials};

#[derive(Parser, Debug)]
#[command(name = "busbar_sizing_toolbox", version, about = "Busbar sizing & short-circuit transient toolbox")]
struct Cli {
    /// UI 언어 (auto, ko, en)
    #[arg(long, global = true)]
    lang: Option<String>,
    /// 설정 파일 경로 (기본: BUSBAR_CONFIG 또는 config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 대화형 메뉴 (기본)
    Interactive,
    /// JSON 입력 파일로 사이징 계산
    Size {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
    /// JSON 입력 파일로 단락 과도해석
    Simulate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        duration: Option<f64>,
        #[arg(long)]
        steps: Option<usize>,
    },
    /// 재질 물성표 출력 (JSON)
    Materials,
    /// 표준 규격 카탈로그 출력 (JSON)
    Sizes,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("busbar_sizing_toolbox=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let config_path = config::resolve_path(cli.config.as_deref());
    let mut cfg = config::load_or_default(&config_path)?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            let lang = i18n::resolve_language(cli.lang.as_deref(), Some(cfg.language.as_str()));
            let tr = Translator::new_with_pack(&lang, None);
            tracing::info!(lang = %lang, path = %config_path.display(), "starting interactive mode");
            app::run(&mut cfg, &config_path, &tr)?;
        }
        Command::Size { input, pretty } => {
            let raw = RawBusbarInput::from_json(&fs::read_to_string(input)?)?;
            let input = raw.parse()?;
            let catalog = cfg.catalog()?;
            let result = compute_sizing_with(&input, &BuiltinMaterials, &catalog)?;
            tracing::info!(sufficient = result.is_sizing_sufficient, "sizing completed");
            let out = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{out}");
        }
        Command::Simulate {
            input,
            duration,
            steps,
        } => {
            let mut request: SimulationRequest = serde_json::from_str(&fs::read_to_string(input)?)?;
            if let Some(d) = duration {
                request.duration = Some(NumberInput::Number(d));
            }
            if let Some(s) = steps {
                request.time_steps = Some(NumberInput::Number(s as f64));
            }
            let series = request.run(cfg.simulation.as_tuple())?;
            tracing::info!(steps = series.time_points.len(), "transient simulated");
            println!("{}", serde_json::to_string(&series)?);
        }
        Command::Materials => {
            println!("{}", serde_json::to_string_pretty(material_db::materials())?);
        }
        Command::Sizes => {
            let catalog = cfg.catalog()?;
            println!("{}", serde_json::to_string_pretty(catalog.sizes())?);
        }
    }
    Ok(())
}
