use std::{path::PathBuf, process::Stdio, time::Duration};

use serde::Serialize;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::instrument;

use crate::domain::{
    common::LocalFlowConfig,
    recipe::{
        entities::{FlowRequest, RecipeError},
        ports::RecipeBackend,
        value_objects::Tweaks,
    },
};

/// Runs a flow definition file through a local runner process.
///
/// The runner is invoked as `<command> <args...> <flow_path>`, receives one
/// JSON document on stdin and prints the reply text on stdout. A runner that
/// outlives the configured timeout is killed.
#[derive(Debug, Clone)]
pub struct LocalFlowRunner {
    command: String,
    args: Vec<String>,
    flow_path: PathBuf,
    tweaks: Tweaks,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct LocalFlowInput<'a> {
    flow: String,
    input_value: &'a str,
    session_id: &'a str,
    tweaks: &'a Tweaks,
    fallback_to_env_vars: bool,
}

impl LocalFlowRunner {
    pub fn new(config: LocalFlowConfig) -> Self {
        Self {
            command: config.command,
            args: config.args,
            flow_path: config.flow_path,
            tweaks: config.tweaks,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl RecipeBackend for LocalFlowRunner {
    #[instrument(skip(self, request), fields(flow = %self.flow_path.display()))]
    async fn run_flow(&self, request: FlowRequest) -> Result<String, RecipeError> {
        let input = serde_json::to_vec(&LocalFlowInput {
            flow: self.flow_path.display().to_string(),
            input_value: &request.input_value,
            session_id: request.session_id.as_deref().unwrap_or_default(),
            tweaks: &self.tweaks,
            fallback_to_env_vars: true,
        })
        .map_err(|e| RecipeError::Decode(format!("failed to encode flow input: {}", e)))?;

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .arg(&self.flow_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                tracing::debug!("Failed to start flow runner '{}': {}", self.command, e);
                RecipeError::Network(format!("failed to start flow runner: {}", e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // The exit status decides the outcome if the runner ignores stdin.
            if let Err(e) = stdin.write_all(&input).await {
                tracing::warn!("Failed to write flow input: {}", e);
            }
        }

        // Dropping the child on timeout kills the runner.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::debug!("Flow runner timed out after {:?}", self.timeout);
                RecipeError::Network(format!("flow runner timed out after {:?}", self.timeout))
            })?
            .map_err(|e| {
                tracing::debug!("Flow runner did not complete: {}", e);
                RecipeError::Network(format!("flow runner did not complete: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!("Flow runner failed: {} - {}", output.status, stderr.trim());
            return Err(RecipeError::Backend(format!(
                "flow runner exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            tracing::debug!("Flow runner printed invalid UTF-8: {}", e);
            RecipeError::Decode(e.to_string())
        })?;

        let reply = stdout.trim();
        if reply.is_empty() {
            tracing::debug!("No valid message found in response.");
            return Err(RecipeError::MissingMessage);
        }

        Ok(reply.to_string())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn runner(script: &str) -> LocalFlowRunner {
        runner_with_timeout(script, 30)
    }

    fn runner_with_timeout(script: &str, timeout_secs: u64) -> LocalFlowRunner {
        LocalFlowRunner::new(LocalFlowConfig {
            command: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            flow_path: PathBuf::from("AI Kitchen.json"),
            tweaks: Tweaks::parse(r#"{"Memory-7zsPb": {}}"#).unwrap(),
            timeout_secs,
        })
    }

    #[tokio::test]
    async fn stdout_becomes_the_reply() {
        let reply = runner("cat > /dev/null; echo 'Tomato soup, 20 minutes.'")
            .run_flow(FlowRequest::new("tomato"))
            .await;

        assert_eq!(reply, Ok("Tomato soup, 20 minutes.".to_string()));
    }

    #[tokio::test]
    async fn runner_receives_input_and_tweaks() {
        let reply = runner("cat")
            .run_flow(FlowRequest::new("egg, tomato").with_session("s-42"))
            .await
            .unwrap();

        let echoed: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(echoed["input_value"], "egg, tomato");
        assert_eq!(echoed["session_id"], "s-42");
        assert_eq!(echoed["flow"], "AI Kitchen.json");
        assert_eq!(echoed["fallback_to_env_vars"], true);
        assert!(echoed["tweaks"]["Memory-7zsPb"].is_object());
    }

    #[tokio::test]
    async fn failing_runner_is_backend_error() {
        let reply = runner("cat > /dev/null; echo 'missing OPENAI_API_KEY' >&2; exit 3")
            .run_flow(FlowRequest::new("tomato"))
            .await;

        match reply {
            Err(RecipeError::Backend(detail)) => assert!(detail.contains("OPENAI_API_KEY")),
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn silent_runner_is_missing_message() {
        let reply = runner("cat > /dev/null")
            .run_flow(FlowRequest::new("tomato"))
            .await;

        assert_eq!(reply, Err(RecipeError::MissingMessage));
    }

    #[tokio::test]
    async fn absent_runner_is_network_error() {
        let runner = LocalFlowRunner::new(LocalFlowConfig {
            command: "aikitchen-no-such-flow-runner".to_string(),
            args: Vec::new(),
            flow_path: PathBuf::from("flow.json"),
            tweaks: Tweaks::new(),
            timeout_secs: 30,
        });

        let reply = runner.run_flow(FlowRequest::new("tomato")).await;

        assert!(matches!(reply, Err(RecipeError::Network(_))));
    }

    #[tokio::test]
    async fn hung_runner_times_out_as_network_error() {
        let started = std::time::Instant::now();
        let reply = runner_with_timeout("cat > /dev/null; sleep 30", 1)
            .run_flow(FlowRequest::new("tomato"))
            .await;

        match reply {
            Err(RecipeError::Network(detail)) => assert!(detail.contains("timed out")),
            other => panic!("expected network error, got {:?}", other),
        }
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn adapter_failures_stay_below_error_level() {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::ERROR)
            .with_writer(move || CapturedLog(writer.clone()))
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let reply = runner("cat > /dev/null")
            .run_flow(FlowRequest::new("tomato"))
            .await;

        assert_eq!(reply, Err(RecipeError::MissingMessage));
        assert!(captured.lock().unwrap().is_empty());
    }

    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
