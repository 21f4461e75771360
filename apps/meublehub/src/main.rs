mod shell;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{pages::SignupForm, ClientConfig, Hub, ReservationOwnership};
use shared::domain::{HomeId, ObjectId, ObjectKind, RoomId, UserId};
use tracing_subscriber::EnvFilter;

use crate::shell::{Route, Screen, Shell};

#[derive(Parser, Debug)]
#[command(name = "meublehub", about = "Homes, rooms and reservable objects")]
struct Cli {
    /// Config file; `meublehub.toml` in the working directory when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    users_url: Option<String>,
    #[arg(long, global = true)]
    homes_url: Option<String>,
    #[arg(long, global = true)]
    rooms_url: Option<String>,
    #[arg(long, global = true)]
    objects_url: Option<String>,
    #[arg(long, global = true)]
    session_path: Option<PathBuf>,
    /// `user_id` or `username`.
    #[arg(long, global = true)]
    reservation_ownership: Option<ReservationOwnership>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to `--password`.
        #[arg(long)]
        confirm_password: Option<String>,
        #[arg(long)]
        admin_key: Option<String>,
    },
    Logout,
    Whoami,
    /// Render the page at a route such as `/homes` or `/room/3`.
    Open {
        #[arg(default_value = "/")]
        route: Route,
    },
    #[command(subcommand)]
    Homes(HomesCommand),
    #[command(subcommand)]
    Rooms(RoomsCommand),
    #[command(subcommand)]
    Objects(ObjectsCommand),
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Subcommand, Debug)]
enum HomesCommand {
    List,
    Create { name: String },
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
enum RoomsCommand {
    List {
        #[arg(long)]
        home: u64,
    },
    Create {
        #[arg(long)]
        home: u64,
        name: String,
    },
    Delete {
        #[arg(long)]
        home: u64,
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
enum ObjectsCommand {
    List {
        #[arg(long)]
        room: Option<String>,
        #[arg(long)]
        available: bool,
    },
    Create {
        #[arg(long)]
        room: Option<String>,
        name: String,
        #[arg(long, default_value = "Furniture", value_parser = parse_kind)]
        kind: ObjectKind,
    },
    Reserve {
        #[arg(long)]
        room: Option<String>,
        id: String,
    },
    Unreserve {
        #[arg(long)]
        room: Option<String>,
        id: String,
    },
    Delete {
        #[arg(long)]
        room: Option<String>,
        id: String,
    },
    Reserved,
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    List,
    Get { id: u64 },
}

fn parse_kind(raw: &str) -> Result<ObjectKind, String> {
    match ObjectKind::parse(raw) {
        ObjectKind::Unknown(other) => Err(format!(
            "unknown object type '{other}', expected one of: {}",
            ObjectKind::SELECTABLE
                .iter()
                .map(ObjectKind::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        )),
        kind => Ok(kind),
    }
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load_from(path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?,
            None => ClientConfig::load()?,
        };
        for (flag, target) in [
            (&self.users_url, &mut config.users_url),
            (&self.homes_url, &mut config.homes_url),
            (&self.rooms_url, &mut config.rooms_url),
            (&self.objects_url, &mut config.objects_url),
        ] {
            if let Some(url) = flag {
                *target = url.clone();
            }
        }
        if let Some(path) = &self.session_path {
            config.session_path = Some(path.clone());
        }
        if let Some(policy) = self.reservation_ownership {
            config.reservation_ownership = policy;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.client_config()?;
    tracing::debug!(?config, "resolved client config");

    let shell = Shell::new(Hub::new(&config));
    let screen = dispatch(&shell, cli.command).await;

    println!("{}", shell.frame(&screen));
    Ok(if screen.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn dispatch(shell: &Shell, command: Command) -> Screen {
    match command {
        Command::Login { email, password } => shell.login(&email, &password).await,
        Command::Signup {
            username,
            email,
            password,
            confirm_password,
            admin_key,
        } => {
            let mut form = SignupForm::default();
            form.confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            form.username = username;
            form.email = email;
            form.password = password;
            form.admin_key = admin_key;
            shell.signup(form).await
        }
        Command::Logout => shell.logout(),
        Command::Whoami => shell.whoami(),
        Command::Open { route } => shell.open(route).await,
        Command::Homes(command) => match command {
            HomesCommand::List => shell.open(Route::Homes).await,
            HomesCommand::Create { name } => shell.create_home(&name).await,
            HomesCommand::Delete { id } => shell.delete_home(HomeId(id)).await,
        },
        Command::Rooms(command) => match command {
            RoomsCommand::List { home } => shell.open(Route::HomeRooms(HomeId(home))).await,
            RoomsCommand::Create { home, name } => shell.create_room(HomeId(home), &name).await,
            RoomsCommand::Delete { home, id } => {
                shell.delete_room(HomeId(home), RoomId(id)).await
            }
        },
        Command::Objects(command) => match command {
            ObjectsCommand::List { room, available } => shell.objects(room, available).await,
            ObjectsCommand::Create { room, name, kind } => {
                shell.create_object(room, &name, kind).await
            }
            ObjectsCommand::Reserve { room, id } => {
                shell.reserve(room, &ObjectId(id)).await
            }
            ObjectsCommand::Unreserve { room, id } => {
                shell.unreserve(room, &ObjectId(id)).await
            }
            ObjectsCommand::Delete { room, id } => {
                shell.delete_object(room, &ObjectId(id)).await
            }
            ObjectsCommand::Reserved => shell.reserved_objects().await,
        },
        Command::Users(command) => match command {
            UsersCommand::List => shell.users().await,
            UsersCommand::Get { id } => shell.user(UserId(id)).await,
        },
    }
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
