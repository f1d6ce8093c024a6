use std::{
    env,
    path::Path,
    process::ExitCode,
    thread,
    time::{Duration, Instant},
};

use checks_base::{proxy::ProxySettings, Check, RecorderSink};
use checks_envoy::EnvoyCheck;
use getopts::Options;
use metrics_exporter_dogstatsd::DogStatsDBuilder;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
use self::config::{CheckConfig, RunnerError};

const DEFAULT_DOGSTATSD_ADDR: &str = "127.0.0.1:8125";
const FLUSH_INTERVAL: Duration = Duration::from_secs(3);

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("checks-runner");
    let opts = opts();

    let matches = match opts.parse(args.iter().skip(1)) {
        Ok(m) => m,
        Err(f) => {
            error!("Failed to parse command line args: {}", f);
            print_usage(program, &opts);
            return ExitCode::FAILURE;
        }
    };

    if matches.opt_present("help") {
        print_usage(program, &opts);
        return ExitCode::SUCCESS;
    }

    let Some(config_path) = matches.opt_str("config") else {
        error!("Missing required option `--config`.");
        print_usage(program, &opts);
        return ExitCode::FAILURE;
    };
    let dogstatsd = matches.opt_str("dogstatsd").unwrap_or_else(|| DEFAULT_DOGSTATSD_ADDR.to_owned());

    match run(Path::new(&config_path), &dogstatsd, matches.opt_present("once")) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &Path, dogstatsd: &str, once: bool) -> Result<(), RunnerError> {
    let config = CheckConfig::load(config_path)?;
    let agent_proxy = config.agent_proxy(&ProxySettings::from_env());
    let interval = config.collection_interval();

    DogStatsDBuilder::default().with_remote_address(dogstatsd)?.with_flush_interval(FLUSH_INTERVAL).install()?;
    info!(config = %config_path.display(), %dogstatsd, instances = config.instances.len(), "Runner started.");

    let checks = config
        .instances
        .into_iter()
        .map(|instance| EnvoyCheck::new(instance).with_agent_proxy(agent_proxy.clone()))
        .collect::<Vec<_>>();
    let sink = RecorderSink::new();

    loop {
        let started = Instant::now();
        for check in &checks {
            if let Err(e) = check.run(&sink) {
                error!(check = check.name(), url = %check.config().stats_url, "Check run failed: {}", e);
            }
        }

        if once {
            // Let the exporter flush what this pass submitted.
            thread::sleep(FLUSH_INTERVAL * 2);
            return Ok(());
        }

        if let Some(remaining) = interval.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

fn print_usage(program: &str, opts: &Options) {
    let brief = format!("Usage: {} -c CONFIG [options]", program);
    print!("{}", opts.usage(&brief));
}

fn opts() -> Options {
    let mut opts = Options::new();

    opts.optopt("c", "config", "path to the check configuration file", "PATH");
    opts.optopt(
        "",
        "dogstatsd",
        "address of the DogStatsD server metrics are forwarded to (default: 127.0.0.1:8125)",
        "ADDR",
    );
    opts.optflag("", "once", "run every instance once and exit");
    opts.optflag("h", "help", "print this help menu");

    opts
}
