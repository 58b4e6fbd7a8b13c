use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use sfxgen::app::{SoundEffectsClient, TracingSink};
use sfxgen::domain::{DEFAULT_DURATION_SECONDS, GenerationOptions};
use sfxgen::logging::{LoggingConfig, init_logging};

#[derive(Debug, Parser)]
#[command(name = "sfxgen")]
#[command(about = "Generate a sound effect from a text prompt")]
struct CliArgs {
    /// Text description of the sound
    prompt: String,

    /// File the generated audio is written to
    output_path: PathBuf,

    /// Length of the sound in seconds
    #[arg(default_value_t = DEFAULT_DURATION_SECONDS)]
    duration_seconds: f64,
}

impl CliArgs {
    fn options(&self) -> GenerationOptions {
        GenerationOptions::default().with_duration_seconds(self.duration_seconds)
    }
}

fn main() -> ExitCode {
    if let Err(error) = init_logging(&LoggingConfig::from_env()) {
        eprintln!("sfxgen: failed to initialize logging: {error}");
    }

    let cli = CliArgs::parse();
    let options = cli.options();

    let client = match SoundEffectsClient::from_env() {
        Ok(client) => client.with_diagnostics(Arc::new(TracingSink)),
        Err(error) => {
            eprintln!("sfxgen: {}", error.user_message());
            return ExitCode::FAILURE;
        }
    };

    let audio = match client.generate(&cli.prompt, &options) {
        Ok(audio) => audio,
        Err(error) => {
            tracing::debug!(error = ?error, "generation failed");
            eprintln!("sfxgen: {}", error.user_message());
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = std::fs::write(&cli.output_path, &audio) {
        eprintln!(
            "sfxgen: failed to write {}: {error}",
            cli.output_path.display()
        );
        return ExitCode::FAILURE;
    }

    println!(
        "sfxgen: wrote {} bytes ({}) to {}",
        audio.len(),
        options.output_format,
        cli.output_path.display()
    );
    ExitCode::SUCCESS
}
