use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "annotate-cli")]
#[command(about = "Management CLI for the annotation service", long_about = None)]
struct Cli {
    /// Service root, without the resource path
    #[arg(short, long, default_value = "http://localhost:2222")]
    url: String,

    /// Path the annotation resources are mounted under
    #[arg(short, long, default_value = "/rest")]
    base: String,

    #[arg(short, long, env = "ANNOTATE_ADMIN_KEY", default_value = "CHANGE_ME_IN_PRODUCTION")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service state and loaded strategy counts
    Status,
    /// List loaded spotter and disambiguator policies
    Policies,
    /// Stop the service
    Stop,
    /// Annotate a piece of text
    Annotate {
        text: String,
        #[arg(long, default_value = "Default")]
        spotter: String,
        #[arg(long, default_value = "Default")]
        disambiguator: String,
        #[arg(long, default_value_t = 0.0)]
        confidence: f64,
        #[arg(long, default_value_t = 0)]
        support: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let url = cli.url.trim_end_matches('/');

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let res = match cli.command {
        Commands::Status => {
            client.get(format!("{}/admin/status", url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Policies => {
            client.get(format!("{}/admin/policies", url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Stop => {
            client.post(format!("{}/admin/shutdown", url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Annotate { text, spotter, disambiguator, confidence, support } => {
            let form = [
                ("text", text),
                ("spotter", spotter),
                ("disambiguator", disambiguator),
                ("confidence", confidence.to_string()),
                ("support", support.to_string()),
            ];
            client.post(format!("{}{}/annotate", url, cli.base.trim_end_matches('/')))
                .form(&form)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
