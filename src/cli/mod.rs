use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "autogen-api")]
#[command(author, version, about = "Relay between the AUTO-GEN UI and the SiliconFlow chat API", long_about = None)]
pub struct Cli {
    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}
