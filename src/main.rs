use anyhow::Result;
use clap::{crate_version, App as ClapApp, Arg, ArgMatches};
use ghview::app::App;
use ghview::config::Config;
use std::path::PathBuf;

fn cli() -> ClapApp<'static, 'static> {
    ClapApp::new("ghview")
        .version(crate_version!())
        .about("Look up a GitHub user and browse their repositories")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml (default ~/.config/ghview)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("session")
                .short("s")
                .long("session")
                .value_name("FILE")
                .help("Session file restoring the last query")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("base-url")
                .long("base-url")
                .value_name("URL")
                .help("GitHub API base URL")
                .takes_value(true),
        )
}

/// Apply command line overrides on top of the loaded file.
///
fn apply_overrides(config: &mut Config, matches: &ArgMatches) {
    if let Some(session) = matches.value_of("session") {
        config.session_file = Some(PathBuf::from(session));
    }
    if let Some(base_url) = matches.value_of("base-url") {
        config.base_url = base_url.to_string();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    apply_overrides(&mut config, &matches);
    App::start(config).await
}
