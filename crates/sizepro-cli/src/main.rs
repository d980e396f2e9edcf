use clap::{Parser, Subcommand};
use sizepro_core::{SizeproError, SkillRegistry, ToolCall};
use sizepro_tools::{register_tools, JenkinsConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sizepro", about = "SizePro assistant — pipeline and dataset tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trigger the Jenkins job for a pipeline stage
    Trigger {
        /// Stage to trigger: preprocessing, training, or postprocessing
        stage: String,
    },
    /// List registered tools
    Tools,
}

/// Jenkins connection settings from the environment (`.env` supported).
///
/// `JENKINS_API_TOKEN` is required; `JENKINS_URL` and `JENKINS_USER` fall back
/// to the component defaults.
fn jenkins_config_from_env() -> Result<JenkinsConfig, SizeproError> {
    let api_token = std::env::var("JENKINS_API_TOKEN")
        .map_err(|_| SizeproError::Config("JENKINS_API_TOKEN is not set".to_string()))?;

    let mut config = JenkinsConfig::new(api_token);
    if let Ok(url) = std::env::var("JENKINS_URL") {
        config.base_url = url;
    }
    if let Ok(user) = std::env::var("JENKINS_USER") {
        config.username = user;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut registry = SkillRegistry::new();
    register_tools(&mut registry, jenkins_config_from_env()?);
    info!(count = registry.skill_count(), "Tools registered");

    match cli.command {
        Commands::Trigger { stage } => {
            let call = ToolCall {
                id: "cli".to_string(),
                name: "pipeline_trigger".to_string(),
                arguments: serde_json::json!({ "stage": stage }),
            };
            let result = registry.execute(call).await?;
            println!("{}", result.content);
            if result.is_error {
                std::process::exit(1);
            }
        }
        Commands::Tools => {
            for desc in registry.list_descriptors() {
                println!("{} — {}", desc.name, desc.description);
            }
        }
    }

    Ok(())
}
