use clap::{Arg, ArgAction, Command};
use clap_complete::Shell;

pub fn build_cli() -> Command {
    Command::new("gzrun-build")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build, watch and serve the gzrun launcher front-end")
        .long_about("Runs the gzrun build pipeline: cleans the output directory, derives the packaging manifest, copies static assets and runs the TypeScript compiler for the client and backend trees. 'watch' keeps everything rebuilding on change and 'serve' adds a loopback live-reload server.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Project root directory (default: current directory)")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Build settings file (default: <root>/gzrun-build.toml)")
                .global(true),
        )
        .subcommand(Command::new("build").about("Clean and build everything once (the default)"))
        .subcommand(
            Command::new("watch")
                .about("Build, then keep assets and compilers running on change"),
        )
        .subcommand(Command::new("serve").about("Watch and serve the client with live reload"))
        .subcommand(
            Command::new("run")
                .about("Run a single task and its dependencies")
                .arg(
                    Arg::new("task")
                        .help("Task name (see 'gzrun-build tasks')")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("tasks").about("List every task and its dependencies"))
        .subcommand(Command::new("clean").about("Remove the output directory"))
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Target shell")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(Shell)),
                ),
        )
}
