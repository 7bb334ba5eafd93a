//! Viva application binary - composition root.
//!
//! Ties together the Viva crates into a single executable:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Construct the generation backend from config (explicit owned handle)
//! 3. Wire the interview engine, session store, and exporter
//! 4. Dispatch a one-shot subcommand, or start the interactive menu

mod cli;
mod menu;

use std::sync::Arc;

use clap::Parser;

use viva_backend::HttpBackend;
use viva_core::VivaConfig;
use viva_engine::{InterviewEngine, TemplateStyle};
use viva_export::{CommandPdfRenderer, SessionExporter};

use cli::{CliArgs, Command};
use menu::App;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = VivaConfig::load_or_default(&config_file);

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Viva v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Backend: explicit owned handle, built once from config and passed in.
    let backend = HttpBackend::new(
        config.backend.endpoint.as_str(),
        config.backend.base_model.as_str(),
    )
    .with_adapter(config.backend.adapter_path.as_str());
    let engine = InterviewEngine::new(Arc::new(backend));

    let output_dir = args.resolve_output_dir(&config.general.output_dir);
    let exporter = SessionExporter::new(output_dir);
    let renderer = CommandPdfRenderer::new(config.export.pdf_command.as_str());

    match args.command {
        Some(Command::Ask {
            practice,
            conversational,
        }) => {
            let style = if conversational {
                TemplateStyle::Conversational
            } else {
                TemplateStyle::Direct
            };
            match engine.generate_question_styled(practice, style).await {
                Ok(result) => println!("{}", result.cleaned_text),
                Err(e) => {
                    tracing::error!(error = %e, "Question generation failed");
                    return Err(e.to_string().into());
                }
            }
        }
        Some(Command::Answer { question }) => match engine.answer_question(&question).await {
            Ok(result) => println!("{}", result.cleaned_text),
            Err(e) => {
                tracing::error!(error = %e, "Answer generation failed");
                return Err(e.to_string().into());
            }
        },
        Some(Command::Review { question, answer }) => {
            match engine.review_answer(&question, &answer).await {
                Ok(result) => println!("{}", result.cleaned_text),
                Err(e) => {
                    tracing::error!(error = %e, "Review generation failed");
                    return Err(e.to_string().into());
                }
            }
        }
        Some(Command::Batch { count, pdf }) => {
            let records = engine.generate_batch(count).await;
            for record in &records {
                println!("{}. {}", record.id, record.question);
            }
            let path = exporter.export_questions(&records, None)?;
            println!("Saved to: {}", path.display());
            if pdf {
                // PDF derivation is best-effort: a missing renderer must not
                // fail the batch that was already written.
                match exporter.export_pdf(&renderer, &path).await {
                    Ok(pdf_path) => println!("PDF saved to: {}", pdf_path.display()),
                    Err(e) => tracing::warn!(error = %e, "PDF conversion failed"),
                }
            }
        }
        Some(Command::Probe) => {
            for outcome in engine.probe().await {
                match outcome.result {
                    Ok(text) => {
                        let preview: String = text.chars().take(200).collect();
                        println!("[ok]   {}: {}", outcome.label, preview);
                    }
                    Err(e) => println!("[fail] {}: {}", outcome.label, e),
                }
            }
        }
        None => {
            let app = App::new(engine, exporter);
            menu::run(app, &renderer, &config.backend.base_model).await;
        }
    }

    Ok(())
}
