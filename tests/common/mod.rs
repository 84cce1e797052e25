//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod mock_data;
pub mod stub;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

pub const TEST_PUBLIC_KEY: &str = "test-public";
pub const TEST_PRIVATE_KEY: &str = "test-private";

/// Runs the `herodex` binary against an isolated config and data directory
pub struct HerodexTest {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
    with_credentials: bool,
}

impl HerodexTest {
    /// Config pointing at `base_url`, with favorites stored in the temp dir
    pub fn new(base_url: &str) -> Self {
        Self::with_config(base_url, "")
    }

    /// Like [`HerodexTest::new`], with extra YAML lines appended to the config
    pub fn with_config(base_url: &str, extra_yaml: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        let config_path = temp_dir.path().join("config.yaml");
        let yaml = format!(
            "base_url: \"{base_url}\"\ndata_dir: \"{}\"\nsplash_delay_ms: 60000\n{extra_yaml}",
            data_dir.display()
        );
        fs::write(&config_path, yaml).expect("Failed to write config");
        Self {
            temp_dir,
            config_path,
            with_credentials: true,
        }
    }

    /// Run without any catalog keys in the environment
    pub fn without_credentials(mut self) -> Self {
        self.with_credentials = false;
        self
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_herodex"));
        command
            .args(args)
            .env("HERODEX_CONFIG", &self.config_path)
            .env_remove("HERODEX_LOG")
            .env_remove("RUST_LOG");
        if self.with_credentials {
            command
                .env("MARVEL_PUBLIC_KEY", TEST_PUBLIC_KEY)
                .env("MARVEL_PRIVATE_KEY", TEST_PRIVATE_KEY);
        } else {
            command
                .env_remove("MARVEL_PUBLIC_KEY")
                .env_remove("MARVEL_PRIVATE_KEY");
        }
        command.output().expect("Failed to execute command")
    }

    /// Run and assert success, returning stdout
    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "Command {:?} failed.\nstdout: {}\nstderr: {}",
            args,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Run with `--json` and parse stdout
    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let stdout = self.run_success(&full);
        serde_json::from_str(&stdout).expect("stdout is JSON")
    }

    /// Run and assert failure with `code`, returning stderr
    pub fn run_failure(&self, args: &[&str], code: i32) -> String {
        let output = self.run(args);
        assert_eq!(
            output.status.code(),
            Some(code),
            "Command {:?} exited unexpectedly.\nstdout: {}\nstderr: {}",
            args,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stderr).into_owned()
    }
}
