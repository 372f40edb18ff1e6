//! # Command Execution Module / 命令执行模块
//!
//! Turns configured command lines into processes. Step commands inherit the
//! runner's stdio so their output streams straight into the CI log; the
//! classifier's output is captured so it can be parsed.
//!
//! 将配置的命令行转换为进程。步骤命令继承运行器的标准输入输出，
//! 因此其输出直接流入 CI 日志；分类器的输出会被捕获以便解析。

use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Expands environment variables and `~` in `command_line`, then splits it
/// into a program and its arguments using shell quoting rules.
///
/// 展开 `command_line` 中的环境变量和 `~`，然后按 shell 引号规则
/// 将其拆分为程序和参数。
pub fn parse_command_line(command_line: &str) -> Result<(String, Vec<String>)> {
    let expanded = shellexpand::full(command_line)
        .with_context(|| format!("Failed to expand command: {command_line}"))?
        .to_string();

    let mut parts = shlex::split(&expanded)
        .ok_or_else(|| anyhow!("Failed to parse command: {}", expanded))?;

    if parts.is_empty() {
        return Err(anyhow!("Empty command after parsing."));
    }
    let program = parts.remove(0);
    Ok((program, parts))
}

/// Builds a `tokio::process::Command` for `command_line`, run from `cwd`.
pub fn build_command(command_line: &str, cwd: &Path) -> Result<Command> {
    let (program, args) = parse_command_line(command_line)?;
    let mut cmd = Command::new(program);
    cmd.args(args).kill_on_drop(true).current_dir(cwd);
    Ok(cmd)
}

/// Runs `cmd` with inherited stdio and waits for it to exit.
///
/// The `io::Result` is an error only if the process could not be spawned or
/// waited on.
pub async fn run_inherited(mut cmd: Command) -> std::io::Result<ExitStatus> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
}

/// Output captured from a finished process.
/// 从已结束进程捕获的输出。
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Spawns a command and captures stdout and stderr separately.
/// Both streams are drained concurrently so neither pipe can fill up and
/// stall the child.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// The exit status and both streams, or the spawn/wait error.
///
/// 派生一个命令，分别捕获其 stdout 和 stderr。
/// 两个流被并发读取，因此任何一个管道都不会被填满而阻塞子进程。
pub async fn spawn_and_capture(mut cmd: Command) -> std::io::Result<CapturedOutput> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("Failed to capture stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("Failed to capture stderr"))?;

    let stdout_buf = Arc::new(tokio::sync::Mutex::new(String::new()));
    let stderr_buf = Arc::new(tokio::sync::Mutex::new(String::new()));
    let stdout_handle = tokio::spawn(read_lines(stdout, Arc::clone(&stdout_buf)));
    let stderr_handle = tokio::spawn(read_lines(stderr, Arc::clone(&stderr_buf)));

    let status = child.wait().await?;

    // Wait for both readers so no trailing output is lost.
    if let Err(e) = stdout_handle.await {
        eprintln!("Failed to join stdout task: {}", e);
    }
    if let Err(e) = stderr_handle.await {
        eprintln!("Failed to join stderr task: {}", e);
    }

    let stdout = stdout_buf.lock().await.clone();
    let stderr = stderr_buf.lock().await.clone();
    Ok(CapturedOutput {
        status,
        stdout,
        stderr,
    })
}

async fn read_lines<R>(stream: R, buffer: Arc<tokio::sync::Mutex<String>>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let mut buffer = buffer.lock().await;
        buffer.push_str(&line);
        buffer.push('\n');
    }
}
