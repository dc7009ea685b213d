use anyhow::{Context, Result, bail};
use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::thread;

/// How clipboard utilities are executed
/// Immutable desktops keep the utilities inside a container, so calls are
/// proxied through a sandbox runner such as `toolbox run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launcher {
    /// Run the utility directly on the host
    Direct,
    /// Run `runner args... program ...`
    Sandbox { runner: String, args: Vec<String> },
}

impl Launcher {
    /// Sandbox launcher using `toolbox run`
    pub fn toolbox() -> Self {
        Launcher::Sandbox {
            runner: "toolbox".to_string(),
            args: vec!["run".to_string()],
        }
    }

    /// Build a command that runs `program` through this launcher
    pub fn command(&self, program: &str) -> Command {
        match self {
            Launcher::Direct => Command::new(program),
            Launcher::Sandbox { runner, args } => {
                let mut cmd = Command::new(runner);
                cmd.args(args).arg(program);
                cmd
            }
        }
    }

    /// Human-readable prefix for log and error messages
    pub fn describe(&self, program: &str) -> String {
        match self {
            Launcher::Direct => program.to_string(),
            Launcher::Sandbox { runner, args } if args.is_empty() => {
                format!("{} {}", runner, program)
            }
            Launcher::Sandbox { runner, args } => {
                format!("{} {} {}", runner, args.join(" "), program)
            }
        }
    }

    /// Run `program args` and return its stdout
    /// Fails if the program cannot be spawned or exits unsuccessfully
    pub fn capture(&self, program: &str, args: &[&str]) -> Result<Vec<u8>> {
        let output = self
            .command(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run {}", self.describe(program)))?;

        if !output.status.success() {
            bail!(
                "{} failed with status {}: {}",
                self.describe(program),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(output.stdout)
    }

    /// Run `program args`, copying its stdout into `out` as it arrives
    /// Returns the number of bytes copied
    pub fn stream(&self, program: &str, args: &[&str], out: &mut dyn Write) -> Result<u64> {
        let mut child = self
            .command(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn {}", self.describe(program)))?;

        let mut stdout = child
            .stdout
            .take()
            .context("Child stdout was not captured")?;
        let mut stderr = child
            .stderr
            .take()
            .context("Child stderr was not captured")?;

        // Drain stderr concurrently so a chatty child never blocks on it
        let stderr_reader = thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf);
            buf
        });

        let copied = io::copy(&mut stdout, out);
        // Close our end so a child blocked on a full pipe can exit
        drop(stdout);

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for {}", self.describe(program)))?;
        let stderr = stderr_reader.join().unwrap_or_default();
        let copied = copied.context("Failed to copy clipboard data")?;

        if !status.success() {
            bail!(
                "{} failed with status {}: {}",
                self.describe(program),
                status,
                String::from_utf8_lossy(&stderr).trim()
            );
        }

        log::debug!("Streamed {} bytes from {}", copied, self.describe(program));
        Ok(copied)
    }
}
