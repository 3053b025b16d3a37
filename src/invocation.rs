use std::env;
use std::path::PathBuf;

use crate::datasets::DatasetLoader;
use crate::error::{ErrorKind, Result, SpkError};
use crate::pipeline::{GoalDispatcher, InputValidator, PipelineConfig};

pub const MSG_ERR_INVALID_INPUT: &str = "Invalid Input!";
pub const MSG_ERR_GENERIC: &str = "An Error Has Occurred";
const DEBUG_ENV: &str = "SPKMEANS_DEBUG";

/// Positional arguments of one run: `[k] goal path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub k: Option<i64>,
    pub goal: String,
    pub path: PathBuf,
}

impl Invocation {
    /// Parse the arguments that follow the program name.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        match args.as_slice() {
            [goal, path] => Ok(Self {
                k: None,
                goal: goal.clone(),
                path: PathBuf::from(path),
            }),
            [k, goal, path] => {
                let k = k.trim().parse::<i64>().map_err(|_| {
                    SpkError::invalid(format!("k must be an integer, got {k:?}"))
                })?;
                Ok(Self {
                    k: Some(k),
                    goal: goal.clone(),
                    path: PathBuf::from(path),
                })
            }
            other => Err(SpkError::invalid(format!(
                "expected 2 or 3 arguments ([k] goal path), got {}",
                other.len()
            ))),
        }
    }

    /// Load, validate, dispatch and render. Returns the text to print.
    pub fn run(&self, config: PipelineConfig) -> Result<String> {
        let points = DatasetLoader::load(&self.path)?;
        let request = InputValidator::validate(self.k, &self.goal, points)?;
        let output = GoalDispatcher::native(config).dispatch(&request)?;
        Ok(output.render())
    }
}

/// How much of an error reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Quiet,
    Verbose,
}

impl Verbosity {
    pub fn from_env() -> Self {
        match env::var(DEBUG_ENV) {
            Ok(value) if matches!(value.trim(), "1" | "true") => Verbosity::Verbose,
            _ => Verbosity::Quiet,
        }
    }

    pub fn message(self, err: &SpkError) -> String {
        match self {
            Verbosity::Verbose => err.to_string(),
            Verbosity::Quiet => match err.kind() {
                ErrorKind::InvalidInput => MSG_ERR_INVALID_INPUT.to_string(),
                ErrorKind::GenericProcessing => MSG_ERR_GENERIC.to_string(),
            },
        }
    }
}
