use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;

use colored::Colorize;

use crate::env::EnvManager;
use crate::errors::{Result, RunnerError};

/// Output of one finished child process.
#[derive(Debug)]
pub struct CapturedRun {
    pub status: ExitStatus,
    /// Combined stdout and stderr, in arrival order.
    pub output: String,
}

impl CapturedRun {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn exit_code(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }
}

/// Runs a single foreground command, streaming its output to the
/// console under a labeled prefix while capturing it for the result.
pub struct ProcessRunner {
    label: String,
    echo: bool,
}

impl ProcessRunner {
    pub fn new(label: impl Into<String>) -> Self {
        ProcessRunner {
            label: label.into(),
            echo: true,
        }
    }

    /// Silence console streaming; output is still captured.
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    pub fn run(
        &self,
        program: &Path,
        args: &[String],
        cwd: &Path,
        env: &EnvManager,
    ) -> Result<CapturedRun> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        env.apply(&mut cmd);

        log::debug!(
            "spawning {} {} in {}",
            program.display(),
            args.join(" "),
            cwd.display()
        );

        let mut child = cmd.spawn().map_err(|source| RunnerError::Spawn {
            command: program.display().to_string(),
            source,
        })?;

        let captured = Arc::new(Mutex::new(String::new()));

        let stdout_handle = child.stdout.take().map(|stdout| {
            self.stream(stdout, Arc::clone(&captured), false)
        });
        let stderr_handle = child.stderr.take().map(|stderr| {
            self.stream(stderr, Arc::clone(&captured), true)
        });

        let status = child.wait()?;

        if let Some(handle) = stdout_handle {
            let _ = handle.join();
        }
        if let Some(handle) = stderr_handle {
            let _ = handle.join();
        }

        let output = captured.lock().unwrap().clone();
        Ok(CapturedRun { status, output })
    }

    fn stream<R: Read + Send + 'static>(
        &self,
        pipe: R,
        captured: Arc<Mutex<String>>,
        is_stderr: bool,
    ) -> thread::JoinHandle<()> {
        let label = self.label.clone();
        let echo = self.echo;
        thread::spawn(move || {
            let reader = BufReader::new(pipe);
            for line in reader.lines().map_while(|l| l.ok()) {
                if echo {
                    let prefix = if is_stderr {
                        format!("[{}]", label).red()
                    } else {
                        format!("[{}]", label).blue()
                    };
                    if is_stderr {
                        eprintln!("{} {}", prefix, line);
                    } else {
                        println!("{} {}", prefix, line);
                    }
                }
                let mut buf = captured.lock().unwrap();
                buf.push_str(&line);
                buf.push('\n');
            }
        })
    }
}
