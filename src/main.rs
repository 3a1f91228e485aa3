use anyhow::Result;
use clap::Parser;
use mdsreq::commands::{
    self, Call, CallMethod, ClientOptions,
    args::{load_body, parse_header, parse_param, parse_seconds},
};
use mdsreq::http::{Headers, Method, Params};
use std::path::PathBuf;
use std::time::Duration;

/// mdsreq - metadata registration API request helper
///
/// Sends GET, POST and DELETE requests with Basic Authentication, default
/// query parameters and timeouts. The response body is written to stdout.
///
/// Examples:
///   mdsreq --base-url https://mds.example.org get /doi
///   mdsreq post /metadata --data-file resource.xml -H "Content-Type: application/xml"
#[derive(Parser, Debug)]
#[command(author, version = env!("MDSREQ_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Prefix for every request URL
    #[arg(long, env = "MDS_BASE_URL", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Basic Authentication username
    #[arg(long, short = 'u', env = "MDS_USERNAME", global = true)]
    username: Option<String>,

    /// Basic Authentication password
    #[arg(long, short = 'p', env = "MDS_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    /// Query parameter added to every request; wins over --query
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param, global = true)]
    default_params: Vec<(String, String)>,

    /// Connect and read timeout in seconds
    #[arg(long, env = "MDS_TIMEOUT", value_name = "SECS", value_parser = parse_seconds, global = true)]
    timeout: Option<Duration>,

    /// Connect timeout in seconds; --timeout then only limits reads
    #[arg(long, value_name = "SECS", value_parser = parse_seconds, requires = "timeout", global = true)]
    connect_timeout: Option<Duration>,

    /// Print {"code": ..., "data": ...} instead of the raw body
    #[arg(long, global = true)]
    json: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Send a GET request
    Get(NoBodyArgs),

    /// Send a POST request
    Post(BodyArgs),

    /// Send a DELETE request
    Delete(NoBodyArgs),

    /// Send a request with the method given by name
    ///
    /// The name is case-insensitive, but a body is only sent for exactly "POST".
    Request {
        /// GET, POST or DELETE
        #[arg(value_name = "METHOD")]
        method: String,

        #[command(flatten)]
        args: BodyArgs,
    },
}

#[derive(clap::Args, Debug)]
struct RequestArgs {
    /// Request URL, relative to --base-url if set
    #[arg(value_name = "URL")]
    url: String,

    /// Query parameter for this request
    #[arg(long = "query", short = 'q', value_name = "KEY=VALUE", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Request header
    #[arg(long = "header", short = 'H', value_name = "NAME:VALUE", value_parser = parse_header)]
    headers: Vec<(String, String)>,
}

#[derive(clap::Args, Debug)]
struct NoBodyArgs {
    #[command(flatten)]
    request: RequestArgs,
}

#[derive(clap::Args, Debug)]
struct BodyArgs {
    #[command(flatten)]
    request: RequestArgs,

    /// Text request body
    #[arg(long, short = 'd', conflicts_with = "data_file")]
    data: Option<String>,

    /// File sent as raw request body
    #[arg(long, value_name = "PATH")]
    data_file: Option<PathBuf>,
}

impl Cli {
    fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            default_params: self.default_params.clone(),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
        }
    }
}

impl RequestArgs {
    fn into_call(self, method: CallMethod) -> Call {
        Call {
            method,
            url: self.url,
            body: None,
            params: self.params.into_iter().collect::<Params>(),
            headers: self.headers.into_iter().collect::<Headers>(),
        }
    }
}

impl Commands {
    fn into_call(self) -> Result<Call> {
        let call = match self {
            Commands::Get(args) => args.request.into_call(CallMethod::Verb(Method::Get)),
            Commands::Delete(args) => args.request.into_call(CallMethod::Verb(Method::Delete)),
            Commands::Post(args) => {
                let body = load_body(args.data, args.data_file)?;
                Call {
                    body,
                    ..args.request.into_call(CallMethod::Verb(Method::Post))
                }
            }
            Commands::Request { method, args } => {
                let body = load_body(args.data, args.data_file)?;
                Call {
                    body,
                    ..args.request.into_call(CallMethod::Named(method))
                }
            }
        };
        Ok(call)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let client = cli.client_options().build_client()?;
    let json = cli.json;
    let call = cli.command.into_call()?;

    commands::run(
        &client,
        &call,
        json,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await
}
