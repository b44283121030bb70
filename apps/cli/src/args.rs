use std::env;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub logs_dir: Option<PathBuf>,
}

pub fn parse_args() -> Result<CliArgs, String> {
    let mut args = env::args().skip(1);
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--port" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --port".to_string())?;
                let port = value
                    .parse::<u16>()
                    .map_err(|_| format!("invalid port value: {value}"))?;
                parsed.port = Some(port);
            }
            "--logs-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --logs-dir".to_string())?;
                parsed.logs_dir = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument: {arg}"));
            }
        }
    }

    Ok(parsed)
}

pub fn print_help() {
    println!(
        "WaitDash CLI\n\n\
Usage:\n  waitdash [--port <port>] [--logs-dir <dir>]\n\n\
Options:\n  --port <port>      Override the configured port for this run only\n  --logs-dir <dir>   Replay captured event logs from this directory\n  -h, --help         Show this help message\n"
    );
}
