use std::env;
use std::net::SocketAddr;
use std::process;

use getopts::Options;
use tokio::time::Duration;

const DEFAULT_UPSTREAM: &str = "https://www.amicale-insat.fr/event/json/list";

pub struct Args {
    pub address: SocketAddr,
    pub enable_cache: bool,
    pub cache_ttl: Duration,
    pub default_months: u32,
    pub upstream: String,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on [Default: 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optflag(
        "c",
        "enable-cache",
        "Enable caching of built agendas [Default: false]",
    );
    opts.optopt(
        "t",
        "cache-ttl",
        "Time-to-live for cached agendas [Default: 3600]",
        "SECONDS",
    );
    opts.optopt(
        "m",
        "months",
        "Agenda window length in months when the request names none [Default: 2]",
        "MONTHS",
    );
    opts.optopt(
        "u",
        "upstream",
        "Event list endpoint to proxy [Default: the production Amicale API]",
        "URL",
    );
    opts
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    let address = match matches.opt_get_default("address", SocketAddr::from(([127, 0, 0, 1], 8080)))
    {
        Ok(address) => address,
        Err(err) => {
            eprintln!("Provided value for option 'address' is invalid: {err}");
            process::exit(1);
        }
    };

    let enable_cache = matches.opt_present("enable-cache");

    let cache_ttl = match matches.opt_get_default("cache-ttl", 3600) {
        Ok(secs) => Duration::from_secs(secs),
        Err(err) => {
            eprintln!("Provided value for option 'cache-ttl' is invalid: {err}");
            process::exit(1);
        }
    };

    let default_months = match matches.opt_get_default("months", 2) {
        Ok(months) => months,
        Err(err) => {
            eprintln!("Provided value for option 'months' is invalid: {err}");
            process::exit(1);
        }
    };

    let upstream = matches
        .opt_str("upstream")
        .unwrap_or_else(|| DEFAULT_UPSTREAM.to_string());

    Args {
        address,
        enable_cache,
        cache_ttl,
        default_months,
        upstream,
    }
}
