mod api;
mod transcript;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use api::ChatApi;
use transcript::Transcript;

const SAMPLE_QUERIES: &str = "Sample queries: Find Python devs with 3+ years; \
    Who has worked on healthcare projects?; Suggest people for a React Native project";

#[derive(Debug, Parser)]
#[command(name = "hr-chat", about = "Terminal chat client for the HR resource API")]
struct Cli {
    /// Base URL of the HR API
    #[arg(long, env = "HR_API_URL", default_value = "http://localhost:8000")]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = ChatApi::new(&cli.api_url);
    debug!(url = api.chat_url(), "chat client started");

    println!("HR Resource Query Chatbot");
    println!("Ask your resource or allocation queries below (\"exit\" to quit).");
    println!("{SAMPLE_QUERIES}");
    println!();

    let mut transcript = Transcript::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"Your query: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query, "exit" | "quit") {
            break;
        }

        println!("Thinking...");
        let answer = api.ask(query).await?;
        transcript.push(query, answer);

        println!();
        print!("{}", transcript.render());
        println!("---");
    }

    Ok(())
}
