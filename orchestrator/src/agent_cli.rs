// Bridge to an external agent CLI: run it with a prompt payload and pull JSON out of stdout

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::process::Command;
use tracing::{error, info, instrument, warn};

use crate::metrics;

lazy_static! {
    static ref RESPONSE_MARKER: Regex = Regex::new(r"Response:\s*").unwrap();
}

#[derive(Error, Debug)]
pub enum AgentCliError {
    #[error("{0} command not found. Please ensure it's installed and in PATH.")]
    CommandNotFound(String),

    #[error("Agent execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Could not parse JSON from agent response")]
    UnparsableOutput,

    #[error("Error executing agent command: {0}")]
    Io(#[from] std::io::Error),
}

impl AgentCliError {
    fn outcome(&self) -> &'static str {
        match self {
            AgentCliError::CommandNotFound(_) => "not_found",
            AgentCliError::ExecutionFailed(_) => "failed",
            AgentCliError::Timeout(_) => "timeout",
            AgentCliError::UnparsableOutput => "unparsable",
            AgentCliError::Io(_) => "io_error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AgentCli {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl AgentCli {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Split a whitespace-separated command line into program and leading arguments.
    pub fn from_command_line(command: &[String], timeout: Duration) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec(), timeout))
    }

    /// Run the agent with `{"prompt": ...}` as its last argument and return the JSON it printed.
    #[instrument(skip(self), fields(program = %self.program))]
    pub async fn invoke(&self, prompt: &str) -> Result<Value, AgentCliError> {
        let result = self.run(prompt).await;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.outcome(),
        };
        metrics::AGENT_CLI_CALLS.with_label_values(&[outcome]).inc();
        result
    }

    async fn run(&self, prompt: &str) -> Result<Value, AgentCliError> {
        let payload = json!({ "prompt": prompt }).to_string();
        info!("Executing agent command with prompt: {}", prompt);

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(&payload)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Err(_) => {
                error!("Agent command timed out after {:?}", self.timeout);
                return Err(AgentCliError::Timeout(self.timeout));
            }
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                error!("Agent command not found: {}", self.program);
                return Err(AgentCliError::CommandNotFound(self.program.clone()));
            }
            Ok(result) => result?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Agent command failed ({}): {}", output.status, stderr);
            return Err(AgentCliError::ExecutionFailed(stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        info!("Agent raw output: {}", stdout);
        extract_json(&stdout).ok_or_else(|| {
            warn!("Could not extract valid JSON from agent output");
            AgentCliError::UnparsableOutput
        })
    }
}

/// Find the JSON payload in CLI output.
///
/// Tries, in order: the whole output, the first object after a `Response:`
/// marker, and the first object anywhere in the text.
pub fn extract_json(output: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(output.trim()) {
        return Some(value);
    }

    if let Some(marker) = RESPONSE_MARKER.find(output) {
        if let Some(value) = first_object(&output[marker.end()..]) {
            return Some(value);
        }
    }

    first_object(output)
}

fn first_object(text: &str) -> Option<Value> {
    text.match_indices('{').find_map(|(pos, _)| {
        let mut stream = serde_json::Deserializer::from_str(&text[pos..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value @ Value::Object(_))) => Some(value),
            _ => None,
        }
    })
}
