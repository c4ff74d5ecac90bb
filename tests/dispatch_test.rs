//! Tests for command dispatch and the manifest guard around execution

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use gospace::application::{ApplicationError, ApplicationResult};
use gospace::cli::commands::Command;
use gospace::cli::dispatch::{execute, Dispatcher};
use gospace::cli::CliError;
use gospace::domain::{DomainError, Workspace};
use gospace::infrastructure::traits::{FileSystem, RealFileSystem};
use gospace::util::testing;

const NAMES: [&str; 3] = ["setup", "zip-vendor", "hash"];

/// What a fake command does to the manifest when executed.
#[derive(Clone, Copy)]
enum Behavior {
    Nothing,
    Rewrite,
    RewriteThenFail,
    RewriteThenPanic,
}

#[derive(Parser, Debug)]
struct FakeArgs {
    #[arg(long)]
    fast: bool,
}

/// Command that records what was parsed and executed.
struct FakeCommand {
    name: &'static str,
    workspace: Workspace,
    behavior: Behavior,
    log: Arc<Mutex<Vec<String>>>,
}

impl FakeCommand {
    fn manifest(&self) -> PathBuf {
        self.repo_dir().join("go.mod")
    }
}

impl Command for FakeCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn parse(&mut self, args: &[String]) -> Result<(), clap::Error> {
        let parsed = FakeArgs::try_parse_from(std::iter::once(self.name.to_string()).chain(args.to_vec()))?;
        self.log
            .lock()
            .unwrap()
            .push(format!("parse {} fast={}", self.name, parsed.fast));
        Ok(())
    }

    fn exec(&self) -> ApplicationResult<()> {
        self.log.lock().unwrap().push(format!("exec {}", self.name));
        match self.behavior {
            Behavior::Nothing => Ok(()),
            Behavior::Rewrite => {
                std::fs::write(self.manifest(), "module rewritten\n").unwrap();
                Ok(())
            }
            Behavior::RewriteThenFail => {
                std::fs::write(self.manifest(), "module rewritten\n").unwrap();
                Err(ApplicationError::Domain(DomainError::VendorMissing(
                    self.repo_dir().join("vendor"),
                )))
            }
            Behavior::RewriteThenPanic => {
                std::fs::write(self.manifest(), "module rewritten\n").unwrap();
                panic!("command blew up");
            }
        }
    }

    fn workspace(&self) -> &Workspace {
        &self.workspace
    }
}

struct Fixture {
    _temp: TempDir,
    workspace: Workspace,
    log: Arc<Mutex<Vec<String>>>,
}

impl Fixture {
    fn new() -> Self {
        testing::init_test_setup();
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let root_str = root.to_string_lossy().into_owned();
        let workspace = Workspace::new(
            root_str,
            root,
            "example.com/app",
            "https://example.com/app.git",
        );
        std::fs::create_dir_all(workspace.repo_dir()).unwrap();
        Self {
            _temp: temp,
            workspace,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn command(&self, name: &'static str, behavior: Behavior) -> FakeCommand {
        FakeCommand {
            name,
            workspace: self.workspace.clone(),
            behavior,
            log: self.log.clone(),
        }
    }

    fn dispatcher(&self) -> Dispatcher {
        let commands: Vec<Box<dyn Command>> = NAMES
            .iter()
            .map(|&name| Box::new(self.command(name, Behavior::Nothing)) as Box<dyn Command>)
            .collect();
        Dispatcher::new(commands, Arc::new(RealFileSystem))
    }

    fn manifest(&self) -> PathBuf {
        self.workspace.manifest_path()
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

fn fs() -> Arc<dyn FileSystem> {
    Arc::new(RealFileSystem)
}

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

// ============================================================
// Dispatch
// ============================================================

#[rstest]
#[case("zip-vendor")]
#[case("Zip-Vendor")]
#[case("ZIP-VENDOR")]
fn given_name_in_any_case_when_dispatching_then_same_command_runs(#[case] name: &str) {
    // Arrange
    let fixture = Fixture::new();
    let mut dispatcher = fixture.dispatcher();

    // Act
    dispatcher.dispatch(name, &strings(&["--fast"])).unwrap();

    // Assert
    assert_eq!(
        fixture.log(),
        vec!["parse zip-vendor fast=true", "exec zip-vendor"]
    );
}

#[test]
fn given_unknown_name_when_dispatching_then_lists_every_command_once_in_order() {
    let fixture = Fixture::new();
    let mut dispatcher = fixture.dispatcher();

    let err = dispatcher.dispatch("vendor", &[]).unwrap_err();

    match &err {
        CliError::UnknownCommand { name, supported } => {
            assert_eq!(name, "vendor");
            assert_eq!(supported, &NAMES.to_vec());
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.starts_with("unknown command: vendor\nsupported:\n"));
    for name in NAMES {
        assert_eq!(message.matches(&format!("\t{name}")).count(), 1);
    }
    assert_eq!(err.exit_code(), 1);
    assert!(fixture.log().is_empty());
}

#[test]
fn given_empty_name_when_dispatching_then_reports_unknown_command() {
    let fixture = Fixture::new();
    let mut dispatcher = fixture.dispatcher();

    let err = dispatcher.dispatch("", &[]).unwrap_err();

    assert!(matches!(err, CliError::UnknownCommand { ref name, .. } if name.is_empty()));
    assert!(fixture.log().is_empty());
}

#[test]
fn given_bad_arguments_when_dispatching_then_invalid_args_and_no_exec() {
    let fixture = Fixture::new();
    let mut dispatcher = fixture.dispatcher();

    let err = dispatcher.dispatch("hash", &strings(&["--slow"])).unwrap_err();

    assert!(matches!(err, CliError::InvalidArgs { command: "hash", .. }));
    assert!(err.to_string().starts_with("invalid args"));
    assert!(err.to_string().contains("--slow"));
    assert_eq!(err.exit_code(), 1);
    assert!(fixture.log().is_empty());
}

#[test]
fn given_help_flag_when_dispatching_then_succeeds_without_exec() {
    let fixture = Fixture::new();
    let mut dispatcher = fixture.dispatcher();

    dispatcher.dispatch("setup", &strings(&["--help"])).unwrap();

    assert!(fixture.log().is_empty());
}

#[test]
fn given_duplicate_names_when_finding_then_first_registered_wins() {
    let fixture = Fixture::new();
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(fixture.command("hash", Behavior::Nothing)),
        Box::new(fixture.command("hash", Behavior::Rewrite)),
    ];
    std::fs::write(fixture.manifest(), "module original\n").unwrap();
    let mut dispatcher = Dispatcher::new(commands, fs());

    dispatcher.dispatch("HASH", &[]).unwrap();

    assert_eq!(fixture.log(), vec!["parse hash fast=false", "exec hash"]);
}

// ============================================================
// Manifest guard around execution
// ============================================================

#[test]
fn given_command_rewrites_manifest_when_executed_then_original_restored() {
    let fixture = Fixture::new();
    std::fs::write(fixture.manifest(), "module example.com/app\n").unwrap();
    let cmd = fixture.command("setup", Behavior::Rewrite);

    execute(&cmd, fs()).unwrap();

    assert_eq!(
        std::fs::read_to_string(fixture.manifest()).unwrap(),
        "module example.com/app\n"
    );
}

#[test]
fn given_command_leaves_manifest_alone_when_executed_then_file_not_rewritten() {
    let fixture = Fixture::new();
    std::fs::write(fixture.manifest(), "module example.com/app\n").unwrap();
    let before = std::fs::metadata(fixture.manifest()).unwrap().modified().unwrap();
    let cmd = fixture.command("hash", Behavior::Nothing);

    execute(&cmd, fs()).unwrap();

    let after = std::fs::metadata(fixture.manifest()).unwrap().modified().unwrap();
    assert_eq!(before, after);
    assert_eq!(
        std::fs::read_to_string(fixture.manifest()).unwrap(),
        "module example.com/app\n"
    );
}

#[test]
fn given_no_manifest_before_exec_when_command_creates_one_then_kept() {
    let fixture = Fixture::new();
    let cmd = fixture.command("setup", Behavior::Rewrite);

    execute(&cmd, fs()).unwrap();

    assert_eq!(
        std::fs::read_to_string(fixture.manifest()).unwrap(),
        "module rewritten\n"
    );
}

#[test]
fn given_command_fails_after_rewrite_when_executed_then_error_returned_and_manifest_restored() {
    let fixture = Fixture::new();
    std::fs::write(fixture.manifest(), "module example.com/app\n").unwrap();
    let cmd = fixture.command("update", Behavior::RewriteThenFail);

    let result = execute(&cmd, fs());

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::VendorMissing(_)))
    ));
    assert_eq!(
        std::fs::read_to_string(fixture.manifest()).unwrap(),
        "module example.com/app\n"
    );
}

#[test]
fn given_command_panics_after_rewrite_when_unwinding_then_manifest_restored() {
    let fixture = Fixture::new();
    std::fs::write(fixture.manifest(), "module example.com/app\n").unwrap();
    let cmd = fixture.command("update", Behavior::RewriteThenPanic);

    let result = panic::catch_unwind(AssertUnwindSafe(|| execute(&cmd, fs())));

    assert!(result.is_err());
    assert_eq!(
        std::fs::read_to_string(fixture.manifest()).unwrap(),
        "module example.com/app\n"
    );
}

#[test]
fn given_dispatch_of_rewriting_command_then_manifest_restored() {
    let fixture = Fixture::new();
    std::fs::write(fixture.manifest(), "module example.com/app\n").unwrap();
    let commands: Vec<Box<dyn Command>> =
        vec![Box::new(fixture.command("flatten-vendor", Behavior::RewriteThenFail))];
    let mut dispatcher = Dispatcher::new(commands, fs());

    let err = dispatcher.dispatch("flatten-vendor", &[]).unwrap_err();

    assert!(matches!(err, CliError::Infra(_)));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(
        std::fs::read_to_string(fixture.manifest()).unwrap(),
        "module example.com/app\n"
    );
}
