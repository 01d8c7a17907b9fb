//! Command line nearby search.
//!
//! Resolves the given postcode, ranks the catalog by distance and prints the
//! closest matches.

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use pubfinder::config::{FinderConfig, Settings};
use pubfinder::{
    find_nearest, CatalogSource, FinderError, PostcodeFile, PostcodeIndex, PostcodeLookup,
    SearchOutcome,
};

mod args;
use args::Args;

fn main() -> ExitCode {
    let args = Args::parse_with_aliases();

    // Initialize logging
    let level = if args.debug { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = run(&args, &mut std::io::stdout().lock());
    ExitCode::from(exit_code(&result))
}

/// Process exit status for a finished run, logging any failure.
fn exit_code(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => FinderConfig::load_from_file(path)?,
        None => FinderConfig::default(),
    };
    let settings = Settings::resolve(args.overrides(), file_config)?;

    info!("Postcode file: {}", settings.postcode_file.display());
    info!("Pub file: {}", settings.pub_file.display());

    let catalog = CatalogSource::file(&settings.pub_file)?;

    let outcome = if settings.preload {
        let index = PostcodeIndex::load(&settings.postcode_file).with_context(|| {
            format!(
                "Failed to load postcode index from {}",
                settings.postcode_file.display()
            )
        })?;
        search(&index, &args.postcode, catalog, &settings)?
    } else {
        let file = PostcodeFile::new(&settings.postcode_file);
        search(&file, &args.postcode, catalog, &settings)?
    };

    if outcome.results.is_empty() {
        writeln!(out, "Sorry, this search didnt return any results")?;
        writeln!(out, "Try increasing max distance")?;
        return Ok(());
    }

    for result in &outcome.results {
        writeln!(out, "{}", result)?;
    }
    Ok(())
}

fn search<L: PostcodeLookup>(
    lookup: &L,
    postcode: &str,
    catalog: CatalogSource,
    settings: &Settings,
) -> Result<SearchOutcome> {
    match find_nearest(
        lookup,
        postcode,
        catalog,
        settings.limit,
        settings.max_distance,
    ) {
        Ok(outcome) => Ok(outcome),
        Err(FinderError::PostcodeNotFound { postcode }) => {
            anyhow::bail!("Cant find current location: {}", postcode)
        }
        Err(FinderError::SourceUnavailable { path, source }) => {
            let role = if path == settings.pub_file {
                "Pub postcode file"
            } else {
                "Postcode file"
            };
            Err(anyhow::Error::new(source)
                .context(format!("{} doesnt exist: {}", role, path.display())))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const POSTCODES: &str = "\
ST10 1UF,399777,342161,52.976801,-2.004769
ST10 1AA,400512,343010,52.984432,-1.993885
ST10 4DB,398120,339870,52.956198,-2.029384
CB5 8PF,546341,259322,52.209400,0.146400
";

    const PUBS: &str = "\
The Queens Arms,ST10 1AA
The Anchor,ZZ99 9ZZ
The Red Lion,ST10 4DB
The Burleigh Arms,CB5 8PF
";

    fn fixture() -> (TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let postcodes = dir.path().join("postcodes.csv");
        let pubs = dir.path().join("pubs.csv");
        std::fs::write(&postcodes, POSTCODES).unwrap();
        std::fs::write(&pubs, PUBS).unwrap();
        (dir, postcodes, pubs)
    }

    fn args(postcode: &str, postcodes: &Path, pubs: &Path, extra: &[&str]) -> Args {
        let mut argv = vec![
            "pubfinder".to_string(),
            "--postcode-file".to_string(),
            postcodes.display().to_string(),
            "--pub-file".to_string(),
            pubs.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        argv.push(postcode.to_string());
        Args::parse_from(argv)
    }

    fn execute(args: &Args) -> (u8, String, Option<String>) {
        let mut out = Vec::new();
        let result = run(args, &mut out);
        let message = result.as_ref().err().map(|e| format!("{:#}", e));
        let code = exit_code(&result);
        (code, String::from_utf8(out).unwrap(), message)
    }

    #[test]
    fn test_success_prints_ranked_lines() {
        let (_dir, postcodes, pubs) = fixture();
        let cases: [&[&str]; 2] = [&[], &["--preload"]];
        for extra in cases {
            let (code, out, message) = execute(&args("st10 1uf", &postcodes, &pubs, extra));
            assert_eq!(code, 0);
            assert!(message.is_none());

            let lines: Vec<&str> = out.lines().collect();
            assert_eq!(lines.len(), 2);
            assert!(lines[0].starts_with("The Queens Arms  -  "));
            assert!(lines[1].starts_with("The Red Lion  -  "));
            assert!(lines.iter().all(|l| l.ends_with(" km")));
        }
    }

    #[test]
    fn test_no_results_suggests_wider_cap() {
        let (_dir, postcodes, pubs) = fixture();
        let (code, out, message) = execute(&args("ST10 1UF", &postcodes, &pubs, &["-m", "0.1"]));
        assert_eq!(code, 0);
        assert!(message.is_none());
        assert_eq!(
            out,
            "Sorry, this search didnt return any results\nTry increasing max distance\n"
        );
    }

    #[test]
    fn test_unknown_reference_exits_with_failure() {
        let (_dir, postcodes, pubs) = fixture();
        let (code, out, message) = execute(&args("ZZ9 9ZZ", &postcodes, &pubs, &[]));
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert_eq!(message.unwrap(), "Cant find current location: ZZ9 9ZZ");
    }

    #[test]
    fn test_missing_postcode_file_exits_with_failure() {
        let (dir, _postcodes, pubs) = fixture();
        let missing = dir.path().join("nope.csv");
        let (code, out, message) = execute(&args("ST10 1UF", &missing, &pubs, &[]));
        assert_eq!(code, 1);
        assert!(out.is_empty());
        let message = message.unwrap();
        assert!(message.starts_with("Postcode file doesnt exist: "));
        assert!(message.contains("nope.csv"));
    }

    #[test]
    fn test_missing_pub_file_exits_with_failure() {
        let (dir, postcodes, _pubs) = fixture();
        let missing = dir.path().join("nope.csv");
        let (code, out, message) = execute(&args("ST10 1UF", &postcodes, &missing, &[]));
        assert_eq!(code, 1);
        assert!(out.is_empty());
        let message = message.unwrap();
        assert!(message.starts_with("Pub postcode file doesnt exist: "));
        assert!(message.contains("nope.csv"));
    }

    #[test]
    fn test_nan_cap_from_config_exits_with_failure() {
        let (dir, postcodes, pubs) = fixture();
        let config = dir.path().join("pubfinder.toml");
        std::fs::write(&config, "max_distance = nan\n").unwrap();

        let config = config.display().to_string();
        let (code, out, message) =
            execute(&args("ST10 1UF", &postcodes, &pubs, &["--config", &config]));
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(message.unwrap().contains("max distance"));
    }
}
