use clap::{crate_description, crate_name, crate_version, Arg, ArgAction, Command};
use guardgen::{
    api,
    config::{Config, CONFIG_FILE},
    stacks::{InstallOptions, Stack},
};
use std::path::PathBuf;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .arg(
            Arg::new("guard")
                .help("Name of the guard (user area)")
                .default_value("admin"),
        )
        .arg(
            Arg::new("stack")
                .long("stack")
                .value_name("STACK")
                .help("The development stack that should be installed (blade, react, vue, api)"),
        )
        .arg(
            Arg::new("dark")
                .long("dark")
                .help("Keep dark mode classes in the installed views")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pest")
                .long("pest")
                .help("Install the Pest test flavor instead of PHPUnit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stubs")
                .long("stubs")
                .value_name("DIR")
                .help("Directory containing the stub templates"),
        )
        .arg(
            Arg::new("app-root")
                .long("app-root")
                .value_name("DIR")
                .help("Application tree to install into"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config::load(CONFIG_FILE)?;

    let guard = matches.get_one::<String>("guard").expect("guard has a default");

    let stack = match matches.get_one::<String>("stack") {
        Some(name) => Some(Stack::from_name(name)?),
        None => None,
    };

    let stubs_dir = matches
        .get_one::<String>("stubs")
        .map(PathBuf::from)
        .or(config.stubs_dir)
        .unwrap_or_else(|| PathBuf::from("stubs"));

    let app_root = matches
        .get_one::<String>("app-root")
        .map(PathBuf::from)
        .or(config.app_root)
        .unwrap_or_else(|| PathBuf::from("."));

    let options = InstallOptions {
        dark: matches.get_flag("dark"),
        pest: matches.get_flag("pest"),
    };

    api::install(guard, &stubs_dir, &app_root, stack, options)?;

    Ok(())
}
