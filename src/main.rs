use clap::Parser;

use tasktrack::cli::{self, Cli, Commands};
use tasktrack::error;

/// 初始化日志：TASKTRACK_LOG 优先；serve 默认 info，客户端命令默认 error
fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_env("TASKTRACK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // 日志写到 stderr，stdout 留给命令输出
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn dispatch(parsed: Cli) -> error::Result<()> {
    let server = parsed.server;
    match parsed.command {
        Commands::Serve(args) => cli::serve::execute(args).await,
        Commands::List(args) => cli::tasks::list(server, args).await,
        Commands::Add(args) => cli::tasks::add(server, args).await,
        Commands::Toggle { id } => cli::tasks::toggle(server, &id).await,
        Commands::SetStatus { id, status } => cli::tasks::set_status(server, &id, status).await,
        Commands::Delete { id } => cli::tasks::delete(server, &id).await,
        Commands::Stats => cli::tasks::stats(server).await,
        Commands::Config { init } => cli::tasks::show_config(init),
    }
}

fn main() {
    // 解析命令行参数
    let cli = Cli::parse();
    let level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "error",
    };
    init_tracing(level);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    // 统一调度
    if let Err(e) = runtime.block_on(dispatch(cli)) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
