use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use pubfinder::config::{validate_max_distance, FinderConfig};

/// Two-letter short flags clap cannot declare, and their long forms.
const SHORT_ALIASES: [(&str, &str); 2] = [("-fp", "--postcode-file"), ("-fb", "--pub-file")];

#[derive(Parser, Debug)]
#[command(name = "pubfinder")]
#[command(about = "Find the nearest pubs to a postcode")]
pub struct Args {
    /// Postcode of current location
    pub postcode: String,

    /// Turns on debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Location of postcode CSV file (default data/postcodes_swift_sample.csv)
    #[arg(long, value_name = "PATH")]
    pub postcode_file: Option<PathBuf>,

    /// Location of pub postcode CSV file (default data/pubnames_swift_sample.csv)
    #[arg(long, value_name = "PATH")]
    pub pub_file: Option<PathBuf>,

    /// Limit number of results (default 10)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Only return results less than this distance in km (default 50)
    #[arg(short, long, value_parser = parse_max_distance)]
    pub max_distance: Option<f64>,

    /// Load the postcode file into memory once instead of rescanning it
    #[arg(long)]
    pub preload: bool,

    /// TOML file with defaults for the options above
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse the process arguments, accepting `-fp` and `-fb`.
    pub fn parse_with_aliases() -> Self {
        Self::parse_from(expand_short_aliases(std::env::args_os()))
    }

    /// Options given on the command line, in config form for merging.
    pub fn overrides(&self) -> FinderConfig {
        FinderConfig {
            postcode_file: self.postcode_file.clone(),
            pub_file: self.pub_file.clone(),
            limit: self.limit,
            max_distance: self.max_distance,
            preload: self.preload.then_some(true),
        }
    }
}

fn parse_max_distance(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("{:?} is not a number", raw))?;
    validate_max_distance(value)
}

/// Rewrite `-fp`/`-fb` (and their `=value` forms) to long options.
pub fn expand_short_aliases<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut expanded = Vec::new();
    let mut positional_only = false;

    for arg in args {
        if positional_only {
            expanded.push(arg);
            continue;
        }
        if arg == "--" {
            positional_only = true;
            expanded.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|s| {
            SHORT_ALIASES.iter().find_map(|(short, long)| {
                if s == *short {
                    Some(OsString::from(*long))
                } else {
                    s.strip_prefix(short)
                        .and_then(|rest| rest.strip_prefix('='))
                        .map(|value| OsString::from(format!("{}={}", long, value)))
                }
            })
        });
        expanded.push(rewritten.unwrap_or(arg));
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(expand_short_aliases(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_short_aliases_expand() {
        let args = parse(&[
            "pubfinder",
            "-fp",
            "codes.csv",
            "-fb=pubs.csv",
            "CB5 8PF",
        ]);
        assert_eq!(args.postcode, "CB5 8PF");
        assert_eq!(args.postcode_file, Some(PathBuf::from("codes.csv")));
        assert_eq!(args.pub_file, Some(PathBuf::from("pubs.csv")));
    }

    #[test]
    fn test_aliases_untouched_after_separator() {
        let expanded = expand_short_aliases(["pubfinder", "--", "-fp"].map(OsString::from));
        assert_eq!(expanded[2], OsString::from("-fp"));
    }

    #[test]
    fn test_max_distance_must_be_finite_and_non_negative() {
        for bad in ["NaN", "inf", "-5", "far"] {
            let argv = ["pubfinder", "-m", bad, "ST10 1UF"].map(OsString::from);
            assert!(Args::try_parse_from(argv).is_err(), "accepted {}", bad);
        }
        let args = parse(&["pubfinder", "-m", "0", "ST10 1UF"]);
        assert_eq!(args.max_distance, Some(0.0));
    }

    #[test]
    fn test_unset_options_stay_unset() {
        let args = parse(&["pubfinder", "-d", "-l", "3", "-m", "12.5", "ST10 1UF"]);
        assert!(args.debug);

        let overrides = args.overrides();
        assert_eq!(overrides.limit, Some(3));
        assert_eq!(overrides.max_distance, Some(12.5));
        assert_eq!(overrides.postcode_file, None);
        assert_eq!(overrides.preload, None);
    }
}
