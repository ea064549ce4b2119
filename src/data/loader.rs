use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::models::{Question, Topic};

/// Question pools compiled into the binary; the topics of the learning unit.
const DEFAULT_POOLS: &str = include_str!("pools.json");

/// Error type for loading question pools.
#[derive(Debug)]
pub enum LoadError {
    /// Error reading the pools file.
    Io(io::Error),
    /// Error parsing the pools JSON.
    Parse(serde_json::Error),
    /// The pools are structurally unusable (empty, bad option index).
    Invalid(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read pools: {}", e),
            LoadError::Parse(e) => write!(f, "failed to parse pools: {}", e),
            LoadError::Invalid(msg) => write!(f, "invalid pools: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

/// Load the built-in question pools.
pub fn load_default_pools() -> Result<Vec<Topic>, LoadError> {
    parse_pools(DEFAULT_POOLS)
}

/// Load question pools from a user-supplied JSON file.
pub fn load_pools_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Topic>, LoadError> {
    let json = fs::read_to_string(path.as_ref())?;
    parse_pools(&json)
}

fn parse_pools(json: &str) -> Result<Vec<Topic>, LoadError> {
    let topics: Vec<Topic> = serde_json::from_str(json)?;
    validate_pools(&topics)?;
    Ok(topics)
}

fn validate_pools(topics: &[Topic]) -> Result<(), LoadError> {
    if topics.is_empty() {
        return Err(LoadError::Invalid("no topics defined".to_string()));
    }

    for topic in topics {
        if topic.questions.is_empty() {
            return Err(LoadError::Invalid(format!(
                "topic '{}' has an empty question pool",
                topic.id
            )));
        }

        for question in &topic.questions {
            if let Question::MultipleChoice {
                options, correct, ..
            } = question
            {
                if *correct >= options.len() {
                    return Err(LoadError::Invalid(format!(
                        "topic '{}': correct index {} out of range for {} options",
                        topic.id,
                        correct,
                        options.len()
                    )));
                }
            }
        }
    }

    Ok(())
}
