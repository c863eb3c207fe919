use clap::Parser;
use design_code::config::LogFormat;
use design_code::utils::{logger, validation::Validate};
use design_code::{CliConfig, DesignCodeError, GitCli, LocalStorage, Session, StdRandom};

fn exit_with(e: &DesignCodeError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.validate().and_then(|_| cli.session_config()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    tracing::debug!(
        "Tokens in {}, changelog at {}",
        config.paths.tokens_dir.display(),
        config.paths.changelog_path.display()
    );

    let storage = LocalStorage::new(&config.paths.repo_root);
    let git = GitCli::new(&config.git_program, &config.paths.repo_root);
    let rng = StdRandom::new(cli.seed);
    let mut session = Session::new(storage, git, rng, config);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    // Commit and push failures are reported by the session and still exit 0.
    match session.run(&mut input, &mut out).await {
        Ok(report) => {
            tracing::debug!(
                "{} of {} commits recorded, pushed: {}",
                report.committed_count(),
                report.requested,
                report.pushed
            );
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}
