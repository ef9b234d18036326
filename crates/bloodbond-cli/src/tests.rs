use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["bloodbond-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["bloodbond-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["bloodbond-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_hospitals_add_with_optional_fields() {
    let cli = Cli::try_parse_from([
        "bloodbond-cli",
        "hospitals",
        "add",
        "--name",
        "AIIMS",
        "--email",
        "desk@aiims.test",
        "--city",
        "Delhi",
        "--state",
        "Delhi",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Some(Commands::Hospitals {
            command: HospitalsCommands::Add {
                ref name,
                phone: None,
                registration_number: None,
                city: Some(ref city),
                ..
            }
        }) if name == "AIIMS" && city == "Delhi"
    ));
}

#[test]
fn hospitals_add_requires_email() {
    let result = Cli::try_parse_from(["bloodbond-cli", "hospitals", "add", "--name", "AIIMS"]);
    assert!(result.is_err());
}

#[test]
fn parses_hospitals_list() {
    let cli = Cli::try_parse_from(["bloodbond-cli", "hospitals", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Hospitals {
            command: HospitalsCommands::List
        })
    ));
}

#[test]
fn parses_geocode_query() {
    let cli = Cli::try_parse_from(["bloodbond-cli", "geocode", "Jaipur, Rajasthan"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Geocode { ref query }) if query == "Jaipur, Rajasthan"
    ));
}

#[test]
fn nearest_requires_city_and_state() {
    let cli = Cli::try_parse_from([
        "bloodbond-cli",
        "nearest",
        "--city",
        "Delhi",
        "--state",
        "Delhi",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Nearest { ref city, ref state }) if city == "Delhi" && state == "Delhi"
    ));

    let result = Cli::try_parse_from(["bloodbond-cli", "nearest", "--city", "Delhi"]);
    assert!(result.is_err());
}

#[test]
fn log_filter_falls_back_to_configured_level() {
    let filter = build_env_filter(None, "debug").expect("valid filter");
    assert_eq!(filter.to_string(), "debug");
}

#[test]
fn log_filter_prefers_rust_log() {
    let filter = build_env_filter(Some("warn"), "debug").expect("valid filter");
    assert_eq!(filter.to_string(), "warn");
}
