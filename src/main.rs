//! Console transport: drives one local session from stdin.
//!
//! Commands: `/start`, `/restart`, `/quit`. Any other line is a reply;
//! a number picks the matching button of the last question.

use std::error::Error;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use castcard::adapters::ai::{OpenAIConfig, OpenAIProvider};
use castcard::adapters::archive::JsonlArchiveSink;
use castcard::adapters::storage::{FileSessionStore, InMemorySessionStore};
use castcard::application::{
    GenerateScriptHandler, GenerationSettings, HandleReplyHandler, ReplyOutcome, RetryPolicy,
};
use castcard::config::{AiConfig, AppConfig, LogFormat, RuntimeConfig};
use castcard::domain::foundation::SessionId;
use castcard::domain::script::ScriptValidator;
use castcard::ports::{AIError, AIProvider, SessionStore};

const CONSOLE_SESSION: &str = "console";

fn init_tracing(runtime: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&runtime.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match runtime.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn build_provider(config: &AiConfig) -> Result<Arc<dyn AIProvider>, AIError> {
    let api_key = config
        .openai_api_key
        .as_ref()
        .map(|key| key.expose_secret().clone())
        .unwrap_or_default();
    let openai = OpenAIConfig::new(api_key)
        .with_model(&config.model)
        .with_base_url(&config.base_url)
        .with_timeout(config.timeout());
    Ok(Arc::new(OpenAIProvider::new(openai)?))
}

fn build_controller(config: &AppConfig) -> Result<HandleReplyHandler, Box<dyn Error>> {
    let provider = build_provider(&config.ai)?;
    let info = provider.provider_info();
    info!(provider = %info.name, model = %info.model, "generation backend ready");

    let sessions: Arc<dyn SessionStore> = match &config.storage.sessions_dir {
        Some(dir) => Arc::new(FileSessionStore::new(dir)),
        None => Arc::new(InMemorySessionStore::new()),
    };
    let archive = Arc::new(JsonlArchiveSink::new(&config.storage.archive_path));

    let generator = GenerateScriptHandler::new(
        provider,
        Arc::new(ScriptValidator::new()),
    )
    .with_policy(RetryPolicy {
        max_attempts: config.generation.max_attempts,
        retry_delay: config.generation.retry_delay(),
        call_timeout: config.ai.timeout(),
    })
    .with_settings(GenerationSettings {
        model: Some(config.ai.model.clone()),
        temperature: config.ai.temperature,
        max_tokens: config.ai.max_tokens,
    });

    Ok(HandleReplyHandler::new(sessions, archive, Arc::new(generator)))
}

/// Prints the outcome and returns the buttons now on offer.
fn render(outcome: &ReplyOutcome) -> Vec<String> {
    let prompt = match outcome {
        ReplyOutcome::Prompt(prompt) => prompt,
        ReplyOutcome::Reprompt { prompt, error } => {
            println!("{}", error.hint());
            prompt
        }
        ReplyOutcome::ScriptReady { script, .. } => {
            println!("\n{}\n", script);
            return Vec::new();
        }
        ReplyOutcome::GenerationFailed { notice } | ReplyOutcome::Inactive { notice } => {
            println!("{}", notice);
            return Vec::new();
        }
    };

    println!("\n{}", prompt.text);
    for (index, option) in prompt.options.iter().enumerate() {
        println!("  {}. {}", index + 1, option);
    }
    prompt.options.clone()
}

/// Maps "2" to the second offered button; anything else passes through.
fn resolve_reply<'a>(line: &'a str, options: &'a [String]) -> &'a str {
    line.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| options.get(index))
        .map(String::as_str)
        .unwrap_or(line)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.runtime);
    config.validate()?;

    let controller = build_controller(&config)?;
    let session_id = SessionId::new(CONSOLE_SESSION)?;
    info!(session_id = %session_id, "console ready");

    println!("Отправьте /start, чтобы начать. /quit завершает работу.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut options: Vec<String> = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let outcome = match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/start" => controller.start(&session_id).await,
            "/restart" => controller.restart(&session_id).await,
            reply => {
                let reply = resolve_reply(reply, &options);
                controller.handle_reply(&session_id, reply).await
            }
        };

        match outcome {
            Ok(outcome) => options = render(&outcome),
            Err(e) => {
                error!(error = %e, "turn failed");
                println!("Что-то пошло не так. Отправьте /start.");
                options.clear();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Мужской".to_string(), "Женский".to_string()]
    }

    #[test]
    fn number_selects_option() {
        assert_eq!(resolve_reply("2", &options()), "Женский");
    }

    #[test]
    fn out_of_range_number_passes_through() {
        assert_eq!(resolve_reply("0", &options()), "0");
        assert_eq!(resolve_reply("3", &options()), "3");
    }

    #[test]
    fn provider_is_built_from_ai_section() {
        let config = AiConfig {
            openai_api_key: Some(secrecy::SecretString::new("sk-test".to_string())),
            model: "gpt-4o".to_string(),
            ..Default::default()
        };

        let info = build_provider(&config).unwrap().provider_info();
        assert_eq!(info.name, "openai");
        assert_eq!(info.model, "gpt-4o");
    }

    #[test]
    fn text_passes_through() {
        assert_eq!(resolve_reply("Иван Петров", &options()), "Иван Петров");
    }
}
