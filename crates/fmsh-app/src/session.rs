//! Session state and the read loop.
//!
//! The session is the only component with mutable state: the current working
//! directory and the display name. Each iteration reads one line, runs one
//! command to completion, translates any error into one of two fixed
//! diagnostics, and reprints the path. Navigation verbs run inline because
//! only the session may mutate the path; every other verb goes through the
//! dispatcher on a blocking task.

use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, BufReader};

use fmsh_ops::{dispatch, navigation};
use fmsh_types::FmError;

pub struct Session {
    current_path: PathBuf,
    display_name: String,
}

impl Session {
    /// Create a session starting in the user's home directory.
    pub fn new(username: &str) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        Self::with_start_dir(username, home)
    }

    fn with_start_dir(username: &str, start: PathBuf) -> Self {
        Self {
            current_path: start,
            display_name: capitalize(username),
        }
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// Run the read loop until `.exit`, Ctrl+C, or stdin EOF.
    pub async fn run(&mut self) -> std::io::Result<()> {
        println!("Welcome to the File Manager, {}!", self.display_name);
        self.show_path();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    break;
                }
                line = lines.next_line() => {
                    match line {
                        Ok(Some(input)) => {
                            if !self.process_line(input.trim()).await {
                                break;
                            }
                        }
                        // stdin closed: treat like .exit.
                        Ok(None) => break,
                        Err(err) => {
                            log::error!("reading stdin failed: {err}");
                            break;
                        }
                    }
                }
            }
        }

        println!(
            "Thank you for using File Manager, {}, goodbye!",
            self.display_name
        );
        Ok(())
    }

    /// Handle one trimmed input line. Returns `false` when the session
    /// should end.
    async fn process_line(&mut self, input: &str) -> bool {
        if input.is_empty() {
            return true;
        }
        if input == ".exit" {
            return false;
        }

        let mut tokens = input.split_whitespace();
        let Some(verb) = tokens.next() else {
            return true;
        };
        let args: Vec<String> = tokens.map(str::to_string).collect();

        if let Err(err) = self.execute(verb, &args).await {
            log::debug!("{verb}: {err}");
            println!("{}", user_message(&err));
        }

        self.show_path();
        true
    }

    /// Run one command to completion. Navigation mutates the path on
    /// success; everything else is routed through the dispatcher.
    async fn execute(&mut self, verb: &str, args: &[String]) -> fmsh_types::Result<()> {
        match verb {
            "up" => {
                self.current_path = navigation::go_up(&self.current_path)?;
                Ok(())
            }
            "cd" => {
                if args.len() != 1 {
                    return Err(FmError::input("cd needs 1 arguments"));
                }
                self.current_path = navigation::change_dir(&self.current_path, &args[0])?;
                Ok(())
            }
            "ls" => {
                let listing = navigation::list_dir(&self.current_path)?;
                println!("{listing}");
                Ok(())
            }
            _ => {
                let verb = verb.to_string();
                let args = args.to_vec();
                let cwd = self.current_path.clone();
                let joined = tokio::task::spawn_blocking(move || {
                    let stdout = std::io::stdout();
                    let mut out = stdout.lock();
                    dispatch(&verb, &args, &cwd, &mut out)
                })
                .await;
                match joined {
                    Ok(result) => result,
                    Err(err) => {
                        // A panicked handler must not take the loop down.
                        log::error!("command task failed: {err}");
                        Err(FmError::operation("command task failed"))
                    }
                }
            }
        }
    }

    fn show_path(&self) {
        println!("You are currently in {}", self.current_path.display());
    }
}

/// Map an error kind to its fixed user-facing line.
fn user_message(err: &FmError) -> &'static str {
    if err.is_input() {
        "Invalid input"
    } else {
        "Operation failed"
    }
}

/// Upper-case only the first character of the given name.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> Session {
        Session::with_start_dir("tester", dir.path().to_path_buf())
    }

    #[test]
    fn capitalize_uppercases_first_letter_only() {
        assert_eq!(capitalize("alice"), "Alice");
        assert_eq!(capitalize("bOB"), "BOB");
        assert_eq!(capitalize("Carol"), "Carol");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn user_message_maps_kinds() {
        assert_eq!(user_message(&FmError::input("bad")), "Invalid input");
        assert_eq!(user_message(&FmError::operation("broke")), "Operation failed");
    }

    #[tokio::test]
    async fn empty_input_keeps_looping() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);
        assert!(session.process_line("").await);
        assert_eq!(session.current_path(), tmp.path());
    }

    #[tokio::test]
    async fn exit_command_ends_loop() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);
        assert!(!session.process_line(".exit").await);
    }

    #[tokio::test]
    async fn mkdir_cd_up_round_trip() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);

        assert!(session.process_line("mkdir sub").await);
        assert!(tmp.path().join("sub").is_dir());

        assert!(session.process_line("cd sub").await);
        assert_eq!(session.current_path(), tmp.path().join("sub"));

        assert!(session.process_line("up").await);
        assert_eq!(session.current_path(), tmp.path());
    }

    #[tokio::test]
    async fn wrong_arg_count_leaves_path_unchanged() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        let mut session = session_in(&tmp);

        assert!(session.process_line("cd sub extra").await);
        assert_eq!(session.current_path(), tmp.path());

        assert!(session.process_line("add").await);
        assert_eq!(session.current_path(), tmp.path());
    }

    #[tokio::test]
    async fn failed_cd_leaves_path_unchanged() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);
        assert!(session.process_line("cd missing").await);
        assert_eq!(session.current_path(), tmp.path());
    }

    #[tokio::test]
    async fn handler_error_does_not_end_loop() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);
        assert!(session.process_line("cat missing.txt").await);
        assert!(session.process_line("frobnicate").await);
        assert_eq!(session.current_path(), tmp.path());
    }

    #[tokio::test]
    async fn dispatched_command_runs_to_completion() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);
        assert!(session.process_line("add a.txt").await);
        assert!(tmp.path().join("a.txt").is_file());
    }
}
