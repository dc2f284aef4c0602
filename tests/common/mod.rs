// Shared helpers for integration tests.
//
// Provides a temporary home directory with a fake clone at `~/DOT`, plus a
// scripted executor and prompter so the commands can run end to end without
// git, ping or a terminal.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};

use dotlink::config::{Config, Settings};
use dotlink::exec::{ExecResult, Executor};
use dotlink::logging::{Log, Logger};
use dotlink::reconcile::PolicyMode;
use dotlink::reconcile::prompt::{ConflictChoice, Prompter};
use dotlink::tasks::Context;

/// Remote recorded in every test configuration.
pub const REMOTE: &str = "git@example.com:me/dot.git";

/// A temporary home directory backed by a [`tempfile::TempDir`].
pub struct TestHome {
    /// Temporary directory standing in for `$HOME`.
    pub dir: tempfile::TempDir,
}

impl TestHome {
    /// Create a home with an (empty) clone at `~/DOT`.
    pub fn new() -> Self {
        let home = Self::uncloned();
        std::fs::create_dir_all(home.path().join("DOT/.git")).expect("create fake clone");
        home
    }

    /// Create a home without any clone.
    pub fn uncloned() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp home"),
        }
    }

    /// Path to the home directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `rel` inside the clone.
    pub fn repo_path(&self, rel: &str) -> PathBuf {
        self.path().join("DOT").join(rel)
    }

    /// Write `content` to `~/DOT/<rel>`.
    pub fn repo_file(self, rel: &str, content: &str) -> Self {
        write(&self.repo_path(rel), content);
        self
    }

    /// Write `content` to `~/<rel>`.
    pub fn home_file(self, rel: &str, content: &str) -> Self {
        write(&self.path().join(rel), content);
        self
    }

    /// Create `~/<rel>` as a symlink to `target`.
    #[cfg(unix)]
    pub fn home_link(self, rel: &str, target: &Path) -> Self {
        let link = self.path().join(rel);
        if let Some(parent) = link.parent() {
            std::fs::create_dir_all(parent).expect("create link parent");
        }
        std::os::unix::fs::symlink(target, link).expect("create symlink");
        self
    }

    /// Contents of `~/<rel>`.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).expect("read home file")
    }

    /// Whether `~/<rel>` is a symlink to `~/DOT/<program>/<rel>`.
    pub fn is_linked(&self, program: &str, rel: &str) -> bool {
        std::fs::read_link(self.path().join(rel))
            .is_ok_and(|t| t == self.repo_path(&format!("{program}/{rel}")))
    }

    /// Settings for this home under `policy`.
    pub fn settings(&self, policy: PolicyMode) -> Settings {
        let config = Config {
            repo_dir: "DOT".to_string(),
            remote: REMOTE.to_string(),
            ping_host: Some("example.com".to_string()),
            diff_tool: "vimdiff".to_string(),
        };
        Settings::new(config, self.path().to_path_buf(), policy, false, false)
    }

    /// Build a context over this home with the given collaborators.
    pub fn context(
        &self,
        settings: Settings,
        executor: &Arc<ScriptedExecutor>,
        prompter: &Arc<ScriptedPrompter>,
    ) -> (Context, Arc<Logger>) {
        let log = Arc::new(Logger::with_log_file(None));
        let ctx = Context::new(Arc::new(settings), Arc::clone(&log) as Arc<dyn Log>)
            .with_executor(Arc::clone(executor) as Arc<dyn Executor>)
            .with_prompter(Arc::clone(prompter) as Arc<dyn Prompter>)
            .with_cache_dir(Some(self.path().join(".cache/dotlink")));
        (ctx, log)
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}

/// Executor that answers from a queue and records every call.
///
/// An empty queue answers every call with success and no output.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    responses: Mutex<VecDeque<(bool, String)>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    /// Queue `(success, stdout)` answers in call order.
    pub fn answering(responses: &[(bool, &str)]) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .iter()
                    .map(|(ok, out)| (*ok, (*out).to_string()))
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every command run so far, as `"program arg1 arg2"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn next(&self, program: &str, args: &[&str]) -> ExecResult {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().expect("calls lock").push(line);
        let (success, stdout) = self
            .responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or((true, String::new()));
        ExecResult {
            stdout,
            stderr: if success { String::new() } else { "scripted failure".to_string() },
            success,
            code: Some(i32::from(!success)),
        }
    }
}

impl Executor for ScriptedExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let result = self.next(program, args);
        if !result.success {
            bail!("{program} failed: {}", result.stderr);
        }
        Ok(result)
    }

    fn run_in(&self, _dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.run(program, args)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        Ok(self.next(program, args))
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<bool> {
        Ok(self.next(program, args).success)
    }

    fn which(&self, _program: &str) -> bool {
        true
    }
}

/// Prompter that replays queued answers and fails on unexpected questions.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    confirms: Mutex<VecDeque<bool>>,
    choices: Mutex<VecDeque<ConflictChoice>>,
    asked: Mutex<usize>,
}

impl ScriptedPrompter {
    /// Queue answers to the yes/no prompt.
    pub fn confirming(self, answers: &[bool]) -> Self {
        self.confirms
            .lock()
            .expect("confirms lock")
            .extend(answers.iter().copied());
        self
    }

    /// Queue answers to the four-way conflict prompt.
    pub fn choosing(self, answers: &[ConflictChoice]) -> Self {
        self.choices
            .lock()
            .expect("choices lock")
            .extend(answers.iter().copied());
        self
    }

    /// Number of prompts shown so far.
    pub fn asked(&self) -> usize {
        *self.asked.lock().expect("asked lock")
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm_replace(&self, source: &Path, _current: &Path) -> Result<bool> {
        *self.asked.lock().expect("asked lock") += 1;
        match self.confirms.lock().expect("confirms lock").pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("unexpected prompt for {}", source.display()),
        }
    }

    fn resolve_conflict(&self, source: &Path, _target: &Path) -> Result<ConflictChoice> {
        *self.asked.lock().expect("asked lock") += 1;
        match self.choices.lock().expect("choices lock").pop_front() {
            Some(choice) => Ok(choice),
            None => bail!("unexpected prompt for {}", source.display()),
        }
    }
}
