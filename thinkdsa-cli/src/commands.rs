use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde_json::json;
use thinkdsa_core::config::CONFIG_PATH;
use thinkdsa_core::store::ScoreStore;
use thinkdsa_core::{AppConfig, HintResult, HintService, ProblemContext};
use tracing::{info, warn};

use crate::cli::HintArgs;
use crate::render;

const EMPTY_CODE_NOTICE: &str = "Please write some code first before asking for a new hint!";

pub async fn hint(config_path: Option<&Path>, args: HintArgs) -> Result<ExitCode, Box<dyn Error>> {
    let config = AppConfig::load(config_path)?;
    if !config.enabled {
        eprintln!("ThinkDSA is disabled. Set `enabled = true` in the configuration to get hints.");
        return Ok(ExitCode::SUCCESS);
    }

    let context = build_context(&args)?;
    if args.wants_code_feedback() && !context.has_user_code() {
        eprintln!("{EMPTY_CODE_NOTICE}");
        return Ok(ExitCode::FAILURE);
    }

    let credential = config.resolve_api_key().unwrap_or_default();
    if context.has_user_code() {
        eprintln!("Sudo is analyzing your code...");
    } else {
        eprintln!("Sudo is thinking of a first hint for you...");
    }

    let service = HintService::from_config(&config);
    let result = service.request_hint(&context, &credential).await;

    if let HintResult::Success {
        score: Some(score), ..
    } = &result
    {
        let store = ScoreStore::new(&config.score_store);
        if let Err(err) = store.record(&context.title, score) {
            warn!(error = %err, "Failed to persist score");
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(exit_code_for(&result));
    }

    match &result {
        HintResult::Success { hint_text, score } => {
            println!("{}", render::hint_block(hint_text, score.as_ref()));
        }
        HintResult::Failure { error_message } => {
            eprintln!("AI Error: {error_message}");
        }
    }
    Ok(exit_code_for(&result))
}

pub fn score(
    config_path: Option<&Path>,
    title: Option<&str>,
    as_json: bool,
) -> Result<ExitCode, Box<dyn Error>> {
    let config = AppConfig::load(config_path)?;
    let store = ScoreStore::new(&config.score_store);

    match title {
        Some(title) => {
            let Some(stored) = store.get(title)? else {
                eprintln!("No score recorded for \"{title}\" yet.");
                return Ok(ExitCode::FAILURE);
            };
            if as_json {
                println!("{}", serde_json::to_string_pretty(&stored)?);
            } else {
                println!("{}", render::score_details(&stored.assessment()));
            }
        }
        None => {
            let scores = store.list()?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&json!({ "scores": scores }))?);
            } else if scores.is_empty() {
                println!("No scores recorded yet.");
            } else {
                for stored in &scores {
                    println!("{}", render::stored_line(stored));
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn init(config_path: Option<&Path>, force: bool) -> Result<ExitCode, Box<dyn Error>> {
    let path = config_path.map_or_else(|| PathBuf::from(CONFIG_PATH), Path::to_path_buf);
    AppConfig::default().save(&path, force)?;
    info!(path = %path.display(), "Configuration written");
    println!("Wrote {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn build_context(args: &HintArgs) -> Result<ProblemContext, Box<dyn Error>> {
    let description = match &args.description_file {
        Some(path) => Some(read_input(path)?),
        None => args.description.clone(),
    };
    let code = match &args.code_file {
        Some(path) => Some(read_input(path)?),
        None => args.code.clone(),
    };

    let context = ProblemContext::from_page(
        args.title.as_deref(),
        description.as_deref(),
        args.language.as_deref(),
    );
    Ok(match code {
        Some(code) => context.with_user_code(code),
        None => context,
    })
}

fn read_input(path: &Path) -> Result<String, Box<dyn Error>> {
    info!(path = %path.display(), "Reading input file");
    fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()).into())
}

fn exit_code_for(result: &HintResult) -> ExitCode {
    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
