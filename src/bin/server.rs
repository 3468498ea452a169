use anyhow::Context;
use clap::Parser;
use rps_arena::Server;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server host
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Directory holding the landing page and game script
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();

    println!("Starting rock-paper-scissors arena on {}:{}", args.host, args.port);
    println!("Serving static assets from {}", args.static_dir.display());

    Server::run(&args.host, args.port, args.static_dir.clone())
        .await
        .with_context(|| format!("server failed on {}:{}", args.host, args.port))
}
