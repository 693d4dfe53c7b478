use crate::constants::callback::ERROR_MESSAGE_KEY;
use crate::constants::limits::STDERR_DETAIL_BYTES;
use crate::errors::BearError;
use crate::services::logger::Logger;
use crate::utils::redact::redact_callback_url;
use crate::utils::text::truncate_utf8_prefix;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

/// Delivers one callback URL to the application and returns its raw reply.
#[async_trait]
pub trait Xcall: Send + Sync {
    async fn call(&self, url: &str) -> Result<String, BearError>;
}

/// Runs the external `xcall` helper as `<program> -url <URL>`.
#[derive(Debug, Clone)]
pub struct ProcessXcall {
    logger: Logger,
    program: PathBuf,
    timeout: Option<Duration>,
}

/// The helper reports x-error callbacks on stderr with a failing status.
/// Those are application answers, not helper failures.
fn x_error_payload(stderr: &str) -> Option<String> {
    let trimmed = stderr.trim();
    let value: Value = serde_json::from_str(trimmed).ok()?;
    value
        .get(ERROR_MESSAGE_KEY)
        .is_some()
        .then(|| trimmed.to_string())
}

impl ProcessXcall {
    pub fn new(logger: Logger, program: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            logger: logger.child("xcall"),
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Xcall for ProcessXcall {
    async fn call(&self, url: &str) -> Result<String, BearError> {
        self.logger.debug(
            "invoke",
            Some(&serde_json::json!({ "url": redact_callback_url(url) })),
        );

        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.arg("-url").arg(url);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        let started = chrono::Utc::now().timestamp_millis();
        let child = cmd.spawn().map_err(|err| {
            BearError::process(format!(
                "Failed to spawn xcall helper {}: {}",
                self.program.display(),
                err
            ))
            .with_hint("Set BEAR_XCALL_PATH or pass --xcall to point at the helper.")
        })?;

        let waited = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    self.logger.error(
                        "helper timed out",
                        Some(&serde_json::json!({ "timeout_ms": limit.as_millis() as u64 })),
                    );
                    BearError::process(format!(
                        "xcall helper did not answer within {} ms",
                        limit.as_millis()
                    ))
                })?,
            None => child.wait_with_output().await,
        };
        let output = waited.map_err(|err| {
            BearError::process(format!("Failed to wait for xcall helper: {}", err))
        })?;
        let duration_ms = chrono::Utc::now().timestamp_millis() - started;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if let Some(payload) = x_error_payload(&stderr) {
                self.logger.debug(
                    "x-error",
                    Some(&serde_json::json!({ "duration_ms": duration_ms })),
                );
                return Ok(payload);
            }
            let exit_code = output.status.code().unwrap_or(-1);
            self.logger.warn(
                "helper failed",
                Some(&serde_json::json!({ "exit_code": exit_code, "duration_ms": duration_ms })),
            );
            return Err(BearError::process(format!(
                "xcall helper exited with status {}",
                exit_code
            ))
            .with_details(serde_json::json!({
                "exit_code": exit_code,
                "stderr": truncate_utf8_prefix(stderr.trim_end(), STDERR_DETAIL_BYTES),
            })));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|err| {
            BearError::process(format!("xcall helper wrote non-UTF-8 output: {}", err))
        })?;
        self.logger.debug(
            "reply",
            Some(&serde_json::json!({ "duration_ms": duration_ms, "bytes": stdout.len() })),
        );
        Ok(stdout.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}
