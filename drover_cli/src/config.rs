use std::{env, path::PathBuf};

const INSTANCES_DIR_ENV_VAR: &str = "DROVER_INSTANCES_DIR";
const OUTPUT_DIR_ENV_VAR: &str = "DROVER_OUTPUT_DIR";

/// Directories taken from the environment, flags override them.
#[derive(Debug, Clone)]
pub struct Config {
    pub instances_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var(INSTANCES_DIR_ENV_VAR).ok(),
            env::var(OUTPUT_DIR_ENV_VAR).ok(),
        )
    }

    fn from_vars(instances_dir: Option<String>, output_dir: Option<String>) -> Self {
        Config {
            instances_dir: instances_dir
                .filter(|dir| !dir.is_empty())
                .map_or_else(|| PathBuf::from("./instances"), PathBuf::from),
            output_dir: output_dir
                .filter(|dir| !dir.is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(None, Some(String::new()));

        assert_eq!(config.instances_dir, PathBuf::from("./instances"));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_from_vars() {
        let config = Config::from_vars(Some(String::from("/data")), Some(String::from("out")));

        assert_eq!(config.instances_dir, PathBuf::from("/data"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }
}
