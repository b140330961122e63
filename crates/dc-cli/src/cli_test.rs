use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    Cli::command().debug_assert();
}

#[test]
fn test_aliases() {
    let cases = [
        ("m", "migrate"),
        ("ro", "rollback"),
        ("re", "redo"),
        ("t", "types"),
    ];
    for (alias, name) in cases {
        let cli = Cli::try_parse_from(["damaged-captain", alias]).unwrap();
        let parsed = match cli.command {
            Commands::Migrate => "migrate",
            Commands::Rollback => "rollback",
            Commands::Redo => "redo",
            Commands::Types => "types",
            Commands::Create(_) => "create",
        };
        assert_eq!(parsed, name, "alias {alias}");
    }
}

#[test]
fn test_create_takes_name() {
    let cli = Cli::try_parse_from(["damaged-captain", "c", "add_users"]).unwrap();
    match cli.command {
        Commands::Create(args) => assert_eq!(args.name, "add_users"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_create_requires_name() {
    assert!(Cli::try_parse_from(["damaged-captain", "create"]).is_err());
}

#[test]
fn test_global_args_after_subcommand() {
    let cli = Cli::try_parse_from([
        "damaged-captain",
        "migrate",
        "--config",
        "db/.damaged-captainrc",
        "--database",
        "staging",
        "-v",
    ])
    .unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.config.as_deref(), Some("db/.damaged-captainrc"));
    assert_eq!(cli.global.database.as_deref(), Some("staging"));
}
