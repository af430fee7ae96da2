use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dialoguer::Input;
use tracing_subscriber::EnvFilter;

use sara_gateway::daemon::build_assistant;
use sara_gateway::{Config, Daemon, ReplyEnvelope};

/// SARA - voice assistant gateway with built-in commands and Gemini conversation
#[derive(Parser)]
#[command(name = "sara", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web UI and conversation API (default)
    Serve {
        /// Port to listen on, overriding configuration
        #[arg(long)]
        port: Option<u16>,
    },
    /// Converse on the terminal
    Chat,
    /// Run a single turn and print the reply
    Say {
        /// What to say
        text: String,
        /// Also synthesize the reply to an MP3 file
        #[arg(long)]
        speak: bool,
        /// Where to write the MP3 when speaking
        #[arg(long, default_value = "response.mp3")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,sara_gateway=info",
        1 => "info,sara_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    tracing::debug!(
        model = %config.llm.model,
        port = config.api_server.port,
        timeout_secs = config.timeout.as_secs(),
        "loaded configuration"
    );

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.api_server.port = port;
            }
            let daemon = Daemon::new(config)?;
            tracing::info!("sara gateway ready");
            daemon.run().await?;
        }
        Command::Chat => chat(&config).await?,
        Command::Say { text, speak, out } => say(config, &text, speak, &out).await?,
    }

    Ok(())
}

/// Interactive text conversation until "exit" or end of input
async fn chat(config: &Config) -> anyhow::Result<()> {
    let assistant = build_assistant(config)?;
    println!("{} is listening. Type \"exit\" to quit, \"reset\" to start over.\n", config.name);

    loop {
        let line = tokio::task::spawn_blocking(|| {
            Input::<String>::new()
                .with_prompt("You")
                .allow_empty(true)
                .interact_text()
        })
        .await?;

        let line = match line {
            Ok(line) => line,
            // Ctrl-D / closed terminal ends the session
            Err(_) => break,
        };

        match line.trim() {
            "" => continue,
            "exit" | "quit" => break,
            "reset" => {
                assistant.reset().await;
                println!("(conversation cleared)\n");
            }
            utterance => {
                let reply = assistant.converse(utterance).await;
                print_reply(&config.name, &reply);
            }
        }
    }

    Ok(())
}

/// Single turn, optionally spoken to a file
async fn say(config: Config, text: &str, speak: bool, out: &Path) -> anyhow::Result<()> {
    let name = config.name.clone();
    let daemon = Daemon::new(config)?;
    let reply = daemon.assistant().converse(text).await;
    print_reply(&name, &reply);

    if speak {
        let synthesizer = daemon
            .synthesizer()
            .ok_or_else(|| anyhow::anyhow!("GOOGLE_TTS_API_KEY is not set"))?;
        let audio = synthesizer
            .synthesize(&reply.text, reply.tone, reply.accent)
            .await?;
        tokio::fs::write(out, &audio).await?;
        println!("Wrote {} bytes of audio to {}", audio.len(), out.display());
    }

    Ok(())
}

fn print_reply(name: &str, reply: &ReplyEnvelope) {
    println!("{name} [{} / {}]: {}\n", reply.tone, reply.accent, reply.text);
}
