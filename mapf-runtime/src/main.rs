use mapf_runtime::{cli, generate_batch, settings_from_matches};
use mapf_utils::jsonify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = cli().get_matches();

    let result = settings_from_matches(&matches).and_then(|settings| generate_batch(&settings));
    match result {
        Ok(summary) => println!("{}", jsonify(&summary)),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
