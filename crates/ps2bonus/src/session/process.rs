//! Emulator process spawning.
//!
//! [`ProcessSpawner`] is the seam between the session controller and the
//! operating system, so sessions can be driven by fake processes in tests.

use std::io;
use std::process::{Child, Command};

use tracing::debug;

use crate::launch::LaunchCommand;

/// A started emulator process
pub trait RunningProcess: Send + 'static {
    fn id(&self) -> u32;

    /// Block until the process exits, returning its exit code if it has one
    fn wait(self: Box<Self>) -> io::Result<Option<i32>>;
}

pub trait ProcessSpawner {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<Box<dyn RunningProcess>>;
}

impl RunningProcess for Child {
    fn id(&self) -> u32 {
        Child::id(self)
    }

    fn wait(mut self: Box<Self>) -> io::Result<Option<i32>> {
        Child::wait(&mut self).map(|status| status.code())
    }
}

/// Spawns real processes with [`std::process::Command`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<Box<dyn RunningProcess>> {
        let mut cmd = Command::new(&command.executable);
        if !command.working_dir.as_os_str().is_empty() {
            cmd.current_dir(&command.working_dir);
        }
        apply_arguments(&mut cmd, &command.arguments);

        debug!(
            "Spawning {} {} (in {})",
            command.executable.display(),
            command.arguments,
            command.working_dir.display()
        );
        let child = cmd.spawn()?;
        Ok(Box::new(child))
    }
}

/// The argument string goes to the process verbatim on Windows
#[cfg(target_os = "windows")]
fn apply_arguments(cmd: &mut Command, arguments: &str) {
    use std::os::windows::process::CommandExt;

    if !arguments.is_empty() {
        cmd.raw_arg(arguments);
    }
}

#[cfg(not(target_os = "windows"))]
fn apply_arguments(cmd: &mut Command, arguments: &str) {
    cmd.args(split_args(arguments));
}

/// Split an argument string on whitespace, honouring double quotes.
#[cfg_attr(target_os = "windows", allow(dead_code))]
fn split_args(s: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in s.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_args_quoted_paths() {
        let args = split_args("--fullboot --cfgpath=\"/bonus/Configs/Foo Bar\" \"/games/Foo Bar.iso\"");
        assert_eq!(
            args,
            vec![
                "--fullboot".to_string(),
                "--cfgpath=/bonus/Configs/Foo Bar".to_string(),
                "/games/Foo Bar.iso".to_string(),
            ]
        );
    }

    #[test]
    fn test_split_args_keeps_single_quotes() {
        let args = split_args("\"/games/Tony Hawk's Underground.iso\"");
        assert_eq!(args, vec!["/games/Tony Hawk's Underground.iso".to_string()]);
    }

    #[test]
    fn test_split_args_empty() {
        assert!(split_args("").is_empty());
        assert!(split_args("   ").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_spawner_runs_process() {
        let command = LaunchCommand {
            executable: "sh".into(),
            working_dir: std::env::temp_dir(),
            arguments: "-c \"exit 3\"".to_string(),
        };
        let process = SystemSpawner.spawn(&command).unwrap();
        assert!(process.id() > 0);
        assert_eq!(process.wait().unwrap(), Some(3));
    }
}
