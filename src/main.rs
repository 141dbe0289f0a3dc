//! predict-host entry point.
//!
//! Usage: `predict-host <handler-manifest-path>`. Resolves the handler unit,
//! initializes the model, then serves line-delimited JSON requests on
//! stdin/stdout until end of input.
//!
//! Exit codes: 0 on clean end-of-input; 1 on a missing/invalid handler path,
//! initialization failure, or stream I/O failure.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use predict_host::{config, logging, HandlerLoader, HandlerRegistry, Host, ServeError};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        None => {
            eprintln!("Error: handler manifest path required as argument");
            print_usage();
            ExitCode::FAILURE
        }
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            ExitCode::SUCCESS
        }
        Some("version") | Some("--version") | Some("-V") => {
            println!("predict-host {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(path) => run_host(Path::new(path)),
    }
}

fn run_host(handler_path: &Path) -> ExitCode {
    let config = config::load();
    if let Err(e) = logging::init_logging(&config.log) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let loader = HandlerLoader::new(HandlerRegistry::with_builtins());
    let handler = match loader.load(handler_path) {
        Ok(handler) => handler,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut host = Host::new(handler, config);

    match host.run(stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ServeError::Init(report)) => {
            // The init report itself is the diagnostic, exactly one line.
            match serde_json::to_string(&report) {
                Ok(json) => eprintln!("{}", json),
                Err(e) => eprintln!("Error: {}", e),
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "predict-host - line-delimited JSON prediction host v{}

USAGE:
    predict-host <HANDLER_MANIFEST>

ARGS:
    <HANDLER_MANIFEST>  Path to a handler unit manifest (JSON with an
                        \"entry\" field naming a registered handler). The
                        manifest's directory is passed to the handler's
                        model_fn as the model directory.

COMMANDS:
    help       Show this help message
    version    Show version information

PROTOCOL:
    One JSON request per stdin line; one JSON response per stdout line.
    The exact line {{\"ping\": true}} returns a health probe result.
    Blank lines are ignored. Diagnostics go to stderr.

ENVIRONMENT:
    PREDICT_HOST_MAX_REQUEST_BYTES  Max request line size (default 16777216)
    PREDICT_HOST_LOG_FORMAT         json | pretty (default json)
    PREDICT_HOST_LOG_FILE           Log to a file instead of stderr
    RUST_LOG                        Log level (debug, info, warn, error)

EXIT CODES:
    0  Clean end of input
    1  Invalid handler path, initialization failure, or stream error
",
        version
    );
}
