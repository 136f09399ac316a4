use std::path::PathBuf;

use aikitchen_core::domain::{
    common::{
        ConversationConfig, DEFAULT_CHAT_PROMPT_TEMPLATE, DEFAULT_IMAGE_PROMPT_TEMPLATE,
        DetectorConfig, FlowConfig, KitchenConfig, LocalFlowConfig, RemoteFlowConfig,
        entities::app_errors::CoreError,
    },
    recipe::value_objects::Tweaks,
    session::policies::IngredientContextPolicy,
};
use clap::{Parser, ValueEnum};
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(name = "aikitchen", version, about = "AI Kitchen recipe assistant API")]
pub struct Args {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub detector: DetectorArgs,

    #[command(flatten)]
    pub flow: FlowArgs,

    #[command(flatten)]
    pub conversation: ConversationArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DetectorArgs {
    #[arg(
        long = "detector-model-path",
        env = "DETECTOR_MODEL_PATH",
        default_value = "best.onnx"
    )]
    pub model_path: PathBuf,

    #[arg(
        long = "detector-labels-path",
        env = "DETECTOR_LABELS_PATH",
        default_value = "labels.txt"
    )]
    pub labels_path: PathBuf,

    #[arg(
        long = "detector-input-size",
        env = "DETECTOR_INPUT_SIZE",
        default_value_t = 640
    )]
    pub input_size: u32,

    #[arg(
        long = "detector-confidence",
        env = "DETECTOR_CONFIDENCE",
        default_value_t = 0.25
    )]
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlowMode {
    /// Langflow server reached over HTTP
    Remote,
    /// Flow definition executed by a local runner process
    Local,
}

#[derive(Debug, Clone, clap::Args)]
pub struct FlowArgs {
    #[arg(long = "flow-mode", env = "FLOW_MODE", value_enum, default_value_t = FlowMode::Remote)]
    pub mode: FlowMode,

    #[arg(long = "flow-base-url", env = "FLOW_BASE_URL")]
    pub base_url: Option<Url>,

    #[arg(long = "flow-id", env = "FLOW_ID")]
    pub flow_id: Option<String>,

    #[arg(long = "flow-api-key", env = "FLOW_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// JSON object of component id -> parameter overrides
    #[arg(long = "flow-tweaks", env = "FLOW_TWEAKS", default_value = "{}")]
    pub tweaks: String,

    #[arg(
        long = "flow-timeout-secs",
        env = "FLOW_TIMEOUT_SECS",
        default_value_t = 120
    )]
    pub timeout_secs: u64,

    #[arg(
        long = "flow-runner-command",
        env = "FLOW_RUNNER_COMMAND",
        default_value = "langflow-run"
    )]
    pub runner_command: String,

    #[arg(
        long = "flow-runner-args",
        env = "FLOW_RUNNER_ARGS",
        value_delimiter = ',',
        allow_hyphen_values = true
    )]
    pub runner_args: Vec<String>,

    #[arg(
        long = "flow-definition-path",
        env = "FLOW_DEFINITION_PATH",
        default_value = "AI Kitchen.json"
    )]
    pub definition_path: PathBuf,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ConversationArgs {
    #[arg(
        long = "ingredient-context",
        env = "INGREDIENT_CONTEXT",
        default_value = "always"
    )]
    pub ingredient_context: IngredientContextPolicy,

    #[arg(
        long = "image-prompt-template",
        env = "IMAGE_PROMPT_TEMPLATE",
        default_value = DEFAULT_IMAGE_PROMPT_TEMPLATE
    )]
    pub image_prompt_template: String,

    #[arg(
        long = "chat-prompt-template",
        env = "CHAT_PROMPT_TEMPLATE",
        default_value = DEFAULT_CHAT_PROMPT_TEMPLATE
    )]
    pub chat_prompt_template: String,
}

impl TryFrom<Args> for KitchenConfig {
    type Error = CoreError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.detector.input_size == 0 {
            return Err(CoreError::ConfigurationError(
                "--detector-input-size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&args.detector.confidence) {
            return Err(CoreError::ConfigurationError(
                "--detector-confidence must be between 0 and 1".to_string(),
            ));
        }

        let tweaks = Tweaks::parse(&args.flow.tweaks)?;

        let flow = match args.flow.mode {
            FlowMode::Remote => FlowConfig::Remote(RemoteFlowConfig {
                base_url: args.flow.base_url.ok_or_else(|| {
                    CoreError::ConfigurationError(
                        "--flow-base-url is required in remote mode".to_string(),
                    )
                })?,
                flow_id: args
                    .flow
                    .flow_id
                    .filter(|id| !id.trim().is_empty())
                    .ok_or_else(|| {
                        CoreError::ConfigurationError(
                            "--flow-id is required in remote mode".to_string(),
                        )
                    })?,
                api_key: args.flow.api_key.filter(|key| !key.is_empty()),
                tweaks,
                timeout_secs: args.flow.timeout_secs,
            }),
            FlowMode::Local => FlowConfig::Local(LocalFlowConfig {
                command: args.flow.runner_command,
                args: args.flow.runner_args,
                flow_path: args.flow.definition_path,
                tweaks,
                timeout_secs: args.flow.timeout_secs,
            }),
        };

        Ok(KitchenConfig {
            detector: DetectorConfig {
                model_path: args.detector.model_path,
                labels_path: args.detector.labels_path,
                input_size: args.detector.input_size,
                confidence_threshold: args.detector.confidence,
            },
            flow,
            conversation: ConversationConfig {
                ingredient_context: args.conversation.ingredient_context,
                image_prompt_template: args.conversation.image_prompt_template,
                chat_prompt_template: args.conversation.chat_prompt_template,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["aikitchen"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn remote_mode_builds_remote_flow_config() {
        let args = parse(&[
            "--flow-base-url",
            "https://langflow.internal:7860",
            "--flow-id",
            "a1b2",
            "--flow-api-key",
            "k",
            "--flow-tweaks",
            r#"{"Prompt-ScINz": {}}"#,
        ]);

        let config = KitchenConfig::try_from(args).unwrap();

        match config.flow {
            FlowConfig::Remote(remote) => {
                assert_eq!(remote.flow_id, "a1b2");
                assert_eq!(remote.api_key.as_deref(), Some("k"));
                assert_eq!(remote.timeout_secs, 120);
                assert!(!remote.tweaks.is_empty());
            }
            FlowConfig::Local(_) => panic!("expected remote flow config"),
        }
        assert_eq!(
            config.conversation.ingredient_context,
            IngredientContextPolicy::Always
        );
    }

    #[test]
    fn remote_mode_requires_base_url() {
        let args = parse(&["--flow-id", "a1b2"]);
        assert!(matches!(
            KitchenConfig::try_from(args),
            Err(CoreError::ConfigurationError(_))
        ));
    }

    #[test]
    fn local_mode_builds_runner_config() {
        let args = parse(&[
            "--flow-mode",
            "local",
            "--flow-runner-command",
            "python3",
            "--flow-runner-args",
            "run_flow.py,--quiet",
            "--ingredient-context",
            "first-turn",
        ]);

        let config = KitchenConfig::try_from(args).unwrap();

        match config.flow {
            FlowConfig::Local(local) => {
                assert_eq!(local.command, "python3");
                assert_eq!(local.args, vec!["run_flow.py", "--quiet"]);
                assert_eq!(local.flow_path, PathBuf::from("AI Kitchen.json"));
                assert_eq!(local.timeout_secs, 120);
            }
            FlowConfig::Remote(_) => panic!("expected local flow config"),
        }
        assert_eq!(
            config.conversation.ingredient_context,
            IngredientContextPolicy::FirstTurn
        );
    }

    #[test]
    fn rejects_unknown_context_policy() {
        let argv = ["aikitchen", "--ingredient-context", "sometimes"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let args = parse(&[
            "--flow-mode",
            "local",
            "--detector-confidence",
            "1.5",
        ]);
        assert!(KitchenConfig::try_from(args).is_err());
    }

    #[test]
    fn rejects_malformed_tweaks() {
        let args = parse(&["--flow-mode", "local", "--flow-tweaks", "[]"]);
        assert!(KitchenConfig::try_from(args).is_err());
    }
}
