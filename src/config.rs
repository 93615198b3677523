use crate::prompt::model::DEFAULT_PAGE_SIZE;
use crate::prompt::template::MAX_COLUMN_LEN;
use thiserror::Error;

pub const DEFAULT_MAX_COLUMN_LEN: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub show_all: bool,
    pub max_column_len: usize,
    pub page_size: usize,
    pub records_path: String,
    pub help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            show_all: false,
            max_column_len: DEFAULT_MAX_COLUMN_LEN,
            page_size: DEFAULT_PAGE_SIZE,
            records_path: String::new(),
            help: false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown option {0}")]
    UnknownOption(String),
    #[error("{0} requires a value")]
    MissingValue(String),
    #[error("invalid value {value:?} for {name}: expected a non-negative number")]
    InvalidNumber { name: String, value: String },
    #[error("{name} must be at most {max}, got {value}")]
    TooLarge { name: String, value: usize, max: usize },
    #[error("missing records file (use - for stdin)")]
    MissingRecords,
    #[error("unexpected argument {0}")]
    UnexpectedArgument(String),
}

impl Config {
    /// Builds the configuration from command line arguments (without the
    /// program name), falling back to `KONF_*` variables looked up through `env`.
    pub fn parse<I, F>(args: I, env: F) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        if let Some(v) = env("KONF_SHOW_ALL") {
            cfg.show_all = matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(v) = env("KONF_MAX_COLUMN_LEN") {
            cfg.max_column_len = parse_width("KONF_MAX_COLUMN_LEN", &v)?;
        }
        if let Some(v) = env("KONF_PAGE_SIZE") {
            cfg.page_size = parse_number("KONF_PAGE_SIZE", &v)?;
        }

        let mut path: Option<String> = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => cfg.help = true,
                "-a" | "--all" => cfg.show_all = true,
                "-w" | "--max-width" => {
                    let v = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    cfg.max_column_len = parse_width(&arg, &v)?;
                }
                "-s" | "--size" => {
                    let v = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    cfg.page_size = parse_number(&arg, &v)?;
                }
                "-" => path = set_path(path, arg)?,
                s if s.starts_with('-') => return Err(ConfigError::UnknownOption(arg)),
                _ => path = set_path(path, arg)?,
            }
        }

        cfg.page_size = cfg.page_size.max(1);
        match path {
            Some(p) => cfg.records_path = p,
            None if cfg.help => {}
            None => return Err(ConfigError::MissingRecords),
        }
        Ok(cfg)
    }
}

fn set_path(current: Option<String>, arg: String) -> Result<Option<String>, ConfigError> {
    match current {
        Some(_) => Err(ConfigError::UnexpectedArgument(arg)),
        None => Ok(Some(arg)),
    }
}

fn parse_width(name: &str, value: &str) -> Result<usize, ConfigError> {
    let width = parse_number(name, value)?;
    if width > MAX_COLUMN_LEN {
        return Err(ConfigError::TooLarge {
            name: name.to_string(),
            value: width,
            max: MAX_COLUMN_LEN,
        });
    }
    Ok(width)
}

fn parse_number(name: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidNumber {
            name: name.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_with_only_a_path() {
        let cfg = Config::parse(args(&["records.json"]), no_env).unwrap();
        assert_eq!(
            cfg,
            Config {
                records_path: "records.json".to_string(),
                ..Config::default()
            }
        );
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::parse(args(&["--all", "-w", "12", "--size", "4", "-"]), no_env).unwrap();
        assert!(cfg.show_all);
        assert_eq!(cfg.max_column_len, 12);
        assert_eq!(cfg.page_size, 4);
        assert_eq!(cfg.records_path, "-");
    }

    #[test]
    fn env_fills_in_and_flags_win() {
        let vars: HashMap<&str, &str> = [
            ("KONF_SHOW_ALL", "true"),
            ("KONF_MAX_COLUMN_LEN", "15"),
            ("KONF_PAGE_SIZE", "0"),
        ]
        .into_iter()
        .collect();
        let env = |k: &str| vars.get(k).map(|v| v.to_string());
        let cfg = Config::parse(args(&["-w", "9", "r.json"]), env).unwrap();
        assert!(cfg.show_all);
        assert_eq!(cfg.max_column_len, 9);
        // page size never drops below one row
        assert_eq!(cfg.page_size, 1);
    }

    #[test]
    fn rejects_oversized_column_width() {
        assert_eq!(
            Config::parse(args(&["-w", "4000000000", "r.json"]), no_env),
            Err(ConfigError::TooLarge {
                name: "-w".to_string(),
                value: 4_000_000_000,
                max: MAX_COLUMN_LEN
            })
        );
        let env = |k: &str| (k == "KONF_MAX_COLUMN_LEN").then(|| "65536".to_string());
        assert!(matches!(
            Config::parse(args(&["r.json"]), env),
            Err(ConfigError::TooLarge { .. })
        ));
        let cfg = Config::parse(args(&["-w", "65535", "r.json"]), no_env).unwrap();
        assert_eq!(cfg.max_column_len, MAX_COLUMN_LEN);
    }

    #[test]
    fn help_does_not_need_a_path() {
        let cfg = Config::parse(args(&["-h"]), no_env).unwrap();
        assert!(cfg.help);
    }

    #[test]
    fn reports_bad_arguments() {
        assert_eq!(
            Config::parse(args(&[]), no_env),
            Err(ConfigError::MissingRecords)
        );
        assert_eq!(
            Config::parse(args(&["--max-width"]), no_env),
            Err(ConfigError::MissingValue("--max-width".to_string()))
        );
        assert_eq!(
            Config::parse(args(&["-w", "-3", "r.json"]), no_env),
            Err(ConfigError::InvalidNumber {
                name: "-w".to_string(),
                value: "-3".to_string()
            })
        );
        assert_eq!(
            Config::parse(args(&["--verbose", "r.json"]), no_env),
            Err(ConfigError::UnknownOption("--verbose".to_string()))
        );
        assert_eq!(
            Config::parse(args(&["a.json", "b.json"]), no_env),
            Err(ConfigError::UnexpectedArgument("b.json".to_string()))
        );
    }
}
