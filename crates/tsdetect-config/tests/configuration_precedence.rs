//! Behavioural coverage for layered configuration loading.

use std::cell::RefCell;
use std::ffi::OsString;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use rstest::fixture;
use rstest_bdd_macros::{scenario, then, when};

use tsdetect_config::{Config, LogFormat};

struct Harness {
    cli_args: RefCell<Vec<OsString>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
}

impl Harness {
    fn new() -> Self {
        Self {
            cli_args: RefCell::new(vec![OsString::from("tsdetect")]),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
        }
    }

    fn push_flag(&self, flag: &str, value: &str) {
        let mut args = self.cli_args.borrow_mut();
        args.push(OsString::from(flag));
        args.push(OsString::from(value));
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }

        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }

    fn loaded_config(&self) -> Config {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[when("the CLI sets the manifest path to \"{path}\"")]
fn when_cli_manifest(harness: &Harness, path: String) {
    harness.push_flag("--manifest-path", &path);
}

#[when("the CLI sets the project root to \"{path}\"")]
fn when_cli_project_root(harness: &Harness, path: String) {
    harness.push_flag("--project-root", &path);
}

#[when("the CLI sets the log format to \"{format}\"")]
fn when_cli_log_format(harness: &Harness, format: String) {
    harness.push_flag("--log-format", &format);
}

#[then("the manifest path resolves to \"{path}\"")]
fn then_manifest_path(harness: &Harness, path: String) {
    let config = harness.loaded_config();
    assert_eq!(config.manifest_path(), Utf8PathBuf::from(path));
}

#[then("the log format resolves to \"{format}\"")]
fn then_log_format(harness: &Harness, format: String) {
    let config = harness.loaded_config();
    let expected: LogFormat = match format.parse() {
        Ok(parsed) => parsed,
        Err(error) => panic!("invalid expected format '{format}': {error}"),
    };
    assert_eq!(config.log_format(), expected);
}

#[then("loading the configuration fails")]
fn then_loading_fails(harness: &Harness) {
    harness.load();
    assert!(
        harness.error.borrow().is_some(),
        "expected configuration loading to fail, got {:?}",
        harness.loaded.borrow()
    );
}

#[scenario(path = "tests/features/configuration_precedence.feature")]
fn configuration_precedence(#[from(harness)] harness: Harness) {
    let _ = harness;
}
