use serde::{Deserialize, Serialize};

fn default_program() -> String {
    "fswebcam".to_string()
}

fn default_args() -> Vec<String> {
    vec!["--no-banner".into(), "-q".into(), "-".into()]
}

/// External command that writes one captured photo to stdout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

impl CameraConfig {
    /// Split a whitespace separated command line into program and args
    pub fn from_command_line(cmd: &str) -> Self {
        let mut parts = cmd.split_whitespace().map(str::to_string);
        match parts.next() {
            Some(program) => Self {
                program,
                args: parts.collect(),
            },
            None => Self::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}
