use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("meublehub").chain(args.iter().copied()))
        .expect("parse")
}

#[test]
fn object_kind_defaults_to_furniture() {
    let cli = parse(&["objects", "create", "--room", "4", "Sofa"]);
    match cli.command {
        Command::Objects(ObjectsCommand::Create { room, name, kind }) => {
            assert_eq!(room.as_deref(), Some("4"));
            assert_eq!(name, "Sofa");
            assert_eq!(kind, ObjectKind::Furniture);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn unknown_object_kind_is_rejected() {
    let result = Cli::try_parse_from(["meublehub", "objects", "create", "Sofa", "--kind", "boat"]);
    assert!(result.is_err());

    let cli = parse(&["objects", "create", "Lamp", "--kind", "decorations"]);
    assert!(matches!(
        cli.command,
        Command::Objects(ObjectsCommand::Create { kind: ObjectKind::Decorations, .. })
    ));
}

#[test]
fn open_parses_route_argument() {
    let cli = parse(&["open", "/homes/3/rooms"]);
    assert!(matches!(cli.command, Command::Open { route: Route::HomeRooms(HomeId(3)) }));

    let cli = parse(&["open"]);
    assert!(matches!(cli.command, Command::Open { route: Route::Dashboard }));

    assert!(Cli::try_parse_from(["meublehub", "open", "/nowhere"]).is_err());
}

#[test]
fn flags_override_loaded_config() {
    let cli = parse(&[
        "homes",
        "list",
        "--config",
        "/nonexistent/meublehub.toml",
        "--users-url",
        "http://users.test/",
        "--reservation-ownership",
        "username",
        "--session-path",
        "/tmp/meublehub-session.json",
    ]);

    let config = cli.client_config().expect("config");

    assert_eq!(config.users_url, "http://users.test");
    assert_eq!(config.reservation_ownership, ReservationOwnership::Username);
    assert_eq!(
        config.session_path,
        Some(PathBuf::from("/tmp/meublehub-session.json"))
    );
}

#[test]
fn invalid_url_flag_fails_config() {
    let cli = parse(&[
        "whoami",
        "--config",
        "/nonexistent/meublehub.toml",
        "--objects-url",
        "ftp://objects.test",
    ]);
    assert!(cli.client_config().is_err());
}
