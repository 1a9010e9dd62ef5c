use std::path::PathBuf;

use clap::Parser;
use leadgen_gemini::ModelChoice;

use super::*;
use crate::generate::Emit;

#[test]
fn parses_generate_with_defaults() {
    let cli = Cli::try_parse_from(["leadgen", "generate", "--description", "AI chatbots"])
        .expect("expected valid cli args");

    let Commands::Generate(args) = cli.command else {
        panic!("expected generate command");
    };
    assert_eq!(args.description, "AI chatbots");
    assert_eq!(args.model, ModelChoice::Auto);
    assert_eq!(args.limit, 3);
    assert_eq!(args.output, PathBuf::from("leads.csv"));
    assert!(args.json_output.is_none());
    assert_eq!(args.emit, Emit::Table);
}

#[test]
fn parses_generate_with_all_options() {
    let cli = Cli::try_parse_from([
        "leadgen",
        "generate",
        "-d",
        "voice cloning for podcasts",
        "--model",
        "gemini-1.5-flash",
        "--limit",
        "7",
        "--output",
        "out/leads.csv",
        "--json-output",
        "out/leads.json",
        "--emit",
        "json",
    ])
    .expect("expected valid cli args");

    let Commands::Generate(args) = cli.command else {
        panic!("expected generate command");
    };
    assert_eq!(
        args.model,
        ModelChoice::Explicit("gemini-1.5-flash".to_owned())
    );
    assert_eq!(args.limit, 7);
    assert_eq!(args.output, PathBuf::from("out/leads.csv"));
    assert_eq!(args.json_output, Some(PathBuf::from("out/leads.json")));
    assert_eq!(args.emit, Emit::Json);
}

#[test]
fn generate_requires_description() {
    assert!(Cli::try_parse_from(["leadgen", "generate"]).is_err());
}

#[test]
fn generate_rejects_unknown_emit_format() {
    assert!(
        Cli::try_parse_from(["leadgen", "generate", "-d", "x", "--emit", "xml"]).is_err()
    );
}

#[test]
fn parses_models_command() {
    let cli = Cli::try_parse_from(["leadgen", "models"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Models {
            model: ModelChoice::Auto
        }
    ));
}

#[test]
fn no_command_is_an_error() {
    assert!(Cli::try_parse_from(["leadgen"]).is_err());
}
