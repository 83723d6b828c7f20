use std::{io::ErrorKind, process::Stdio};

use tokio::{io::AsyncWriteExt, process::Command};
use tracing::info;

use crate::error::{Result, TubegistError};

pub const MODEL_CMD_ENV: &str = "TUBEGIST_MODEL_CMD";
pub const DEFAULT_MODEL_CMD: &str = "llm -m gemini-1.5-pro";

/// Something that turns a prompt plus transcript text into free text.
#[allow(async_fn_in_trait)]
pub trait LanguageModel {
    async fn generate(&self, prompt: &str, transcript_text: &str) -> Result<String>;
}

/// How to reach the model. Built once at startup and handed to clients by
/// reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl ModelConfig {
    /// Parses a whitespace separated command line, e.g. `llm -m gemini-1.5-pro`.
    pub fn parse(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(TubegistError::InvalidModelCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Reads `TUBEGIST_MODEL_CMD`, falling back to [`DEFAULT_MODEL_CMD`].
    pub fn from_env() -> Result<Self> {
        match std::env::var(MODEL_CMD_ENV) {
            Ok(command) => Self::parse(&command),
            Err(_) => Self::parse(DEFAULT_MODEL_CMD),
        }
    }
}

/// Runs an external command, writing the prompt and transcript to its stdin
/// and taking its stdout as the model response.
pub struct CommandModel<'a> {
    config: &'a ModelConfig,
}

impl<'a> CommandModel<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        Self { config }
    }
}

impl LanguageModel for CommandModel<'_> {
    async fn generate(&self, prompt: &str, transcript_text: &str) -> Result<String> {
        info!(program = %self.config.program, "invoking model command");

        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TubegistError::ModelFailed {
                reason: format!("could not start {}: {}", self.config.program, e),
            })?;

        let input = format!("{prompt}{transcript_text}");
        let stdin = child.stdin.take();
        let write_input = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes()).await?;
                // dropped here, the command sees EOF
            }
            Ok::<(), std::io::Error>(())
        };

        // stdout is drained while stdin is written, large inputs must not block
        let (written, output) = tokio::join!(write_input, child.wait_with_output());
        let output = output?;
        if !output.status.success() {
            return Err(TubegistError::ModelFailed {
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if let Err(e) = written {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::summarize;

    #[test]
    fn parses_program_and_args() {
        let config = ModelConfig::parse("  llm -m   gemini-1.5-pro ").unwrap();
        assert_eq!(config.program, "llm");
        assert_eq!(config.args, ["-m", "gemini-1.5-pro"]);
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(
            ModelConfig::parse("   "),
            Err(TubegistError::InvalidModelCommand)
        ));
    }

    #[tokio::test]
    async fn command_receives_prompt_then_text() {
        let config = ModelConfig::parse("cat").unwrap();
        let model = CommandModel::new(&config);
        let response = model.generate("Summarize: ", "the text").await.unwrap();
        assert_eq!(response, "Summarize: the text");
    }

    #[tokio::test]
    async fn failing_command_reports_model_error() {
        let config = ModelConfig::parse("false").unwrap();
        let err = CommandModel::new(&config)
            .generate("p", "t")
            .await
            .unwrap_err();
        assert!(matches!(err, TubegistError::ModelFailed { .. }));
    }

    #[tokio::test]
    async fn missing_program_reports_model_error() {
        let config = ModelConfig::parse("tubegist-no-such-model-binary").unwrap();
        let err = CommandModel::new(&config)
            .generate("p", "t")
            .await
            .unwrap_err();
        assert!(matches!(err, TubegistError::ModelFailed { .. }));
    }

    #[tokio::test]
    async fn summarize_truncates_model_output() {
        let config = ModelConfig::parse("cat").unwrap();
        let model = CommandModel::new(&config);
        let summary = summarize(&model, "Three. Four five.", "One two. ", 3)
            .await
            .unwrap();
        assert_eq!(summary, "One two. Three.");
    }
}
