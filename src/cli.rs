//! Command-line argument handling shared by both binaries
//!
//! Flags map one-to-one onto properties from properties.json:
//!
//! | Flag               | Property          |
//! |--------------------|-------------------|
//! | `--url`            | `source.url`      |
//! | `--columns`        | `column.order`    |
//! | `--blank`          | `blank.character` |
//! | `--origin`         | `origin`          |
//! | `--collision`      | `collision`       |
//! | `--max-coordinate` | `max.coordinate`  |
//!
//! `--file <path>` selects a local document (dev binary only).

use crate::properties::{registry, PropertyReader};
use std::path::PathBuf;

/// Environment variable consulted when `--url` is not given
pub const URL_ENV_VAR: &str = "HIDDEN_GRID_URL";

const FLAGS: [(&str, &str); 6] = [
    ("--url", "source.url"),
    ("--columns", "column.order"),
    ("--blank", "blank.character"),
    ("--origin", "origin"),
    ("--collision", "collision"),
    ("--max-coordinate", "max.coordinate"),
];

#[derive(Debug, Default)]
pub struct CliArgs {
    pub properties: PropertyReader,
    pub file: Option<PathBuf>,
    pub help: bool,
    /// Problems found while parsing; each is also logged at `warn`
    pub warnings: Vec<String>,
}

impl CliArgs {
    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Parse command-line arguments (including the program name at index 0)
///
/// Unknown arguments and flags missing their value are recorded in
/// `warnings` and otherwise ignored.
pub fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();
    let mut i = 1;

    while i < args.len() {
        let arg = args[i].as_str();
        let value = args.get(i + 1);

        if let Some((_, property)) = FLAGS.iter().find(|(flag, _)| *flag == arg) {
            if let Some(value) = value {
                cli.properties.set(*property, value.as_str());
                i += 2;
                continue;
            }
            cli.warn(format!("Missing value for {}", arg));
        } else {
            match (arg, value) {
                ("--file", Some(path)) => {
                    cli.file = Some(PathBuf::from(path));
                    i += 2;
                    continue;
                }
                ("--file", None) => cli.warn("Missing value for --file".to_string()),
                ("-h" | "--help", _) => cli.help = true,
                _ => cli.warn(format!("Ignoring unknown argument '{}'", arg)),
            }
        }
        i += 1;
    }

    cli
}

/// Fill `source.url` from the environment when no flag set it
pub fn apply_env(cli: &mut CliArgs, env_url: Option<String>) {
    if cli.properties.is_set("source.url") {
        return;
    }
    if let Some(url) = env_url {
        cli.properties.set("source.url", url);
    }
}

/// Usage text listing every flag with its default
pub fn usage(program: &str) -> String {
    let reg = registry();
    let mut out = format!("Usage: {} [OPTIONS]\n\nOptions:\n", program);

    for (flag, property) in FLAGS {
        let (default, description) = reg
            .get_property(property)
            .map(|p| (p.default_value.as_str(), p.description.as_str()))
            .unwrap_or(("", ""));
        out.push_str(&format!(
            "  {:<18} {} (default: '{}')\n",
            format!("{} <value>", flag),
            description,
            default
        ));
    }
    out.push_str(&format!(
        "\n{} overrides the default URL when --url is not given.\n",
        URL_ENV_VAR
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("hidden_grid")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_maps_flags_to_properties() {
        let cli = parse_args(&args(&[
            "--url",
            "http://localhost/doc",
            "--origin",
            "bottom-left",
            "--max-coordinate",
            "50",
        ]));
        assert_eq!(cli.properties.get_string("source.url"), "http://localhost/doc");
        assert_eq!(cli.properties.get_enum("origin"), "bottom-left");
        assert_eq!(cli.properties.get_u32_in_range("max.coordinate", 1, 100), 50);
        assert!(!cli.help);
    }

    #[test]
    fn test_parse_args_file_and_help() {
        let cli = parse_args(&args(&["--file", "table.html", "--bogus", "--help"]));
        assert_eq!(cli.file, Some(PathBuf::from("table.html")));
        assert!(cli.help);
    }

    #[test]
    fn test_parse_args_missing_value() {
        let cli = parse_args(&args(&["--columns"]));
        assert!(!cli.properties.is_set("column.order"));
        assert_eq!(cli.warnings, vec!["Missing value for --columns".to_string()]);
    }

    #[test]
    fn test_parse_args_file_without_path() {
        let cli = parse_args(&args(&["--file"]));
        assert_eq!(cli.file, None);
        assert_eq!(cli.warnings, vec!["Missing value for --file".to_string()]);
    }

    #[test]
    fn test_parse_args_unknown_argument_is_recorded() {
        let cli = parse_args(&args(&["--bogus"]));
        assert_eq!(cli.warnings, vec!["Ignoring unknown argument '--bogus'".to_string()]);
    }

    #[test]
    fn test_env_url_only_when_flag_absent() {
        let mut cli = parse_args(&args(&[]));
        apply_env(&mut cli, Some("http://env.example/doc".to_string()));
        assert_eq!(cli.properties.get_string("source.url"), "http://env.example/doc");

        let mut cli = parse_args(&args(&["--url", "http://flag.example/doc"]));
        apply_env(&mut cli, Some("http://env.example/doc".to_string()));
        assert_eq!(cli.properties.get_string("source.url"), "http://flag.example/doc");
    }

    #[test]
    fn test_usage_lists_flags() {
        let text = usage("hidden_grid");
        for (flag, _) in FLAGS {
            assert!(text.contains(flag));
        }
        assert!(text.contains("x,character,y"));
    }
}
