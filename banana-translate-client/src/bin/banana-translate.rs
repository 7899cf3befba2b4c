use banana_translate::{LanguageCode, Orchestrator, SourceLanguage};
use banana_translate_client::{
    HttpTransport, LocalTransport, Notifier, TerminalNotifier, TracingNotifier,
    TranslationTransport, URL_ENV_VAR, WorkflowController,
};
use clap::{Arg, ArgAction, Command, value_parser};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("banana-translate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate text with the banana-translate demo service")
        .arg(
            Arg::new("text")
                .help("Text to translate")
                .required_unless_present("list-languages")
                .index(1),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .short('f')
                .help("Source language code, or 'auto' to detect it")
                .default_value("auto"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .short('t')
                .help("Target language code (e.g., vi, fr, ja)")
                .default_value("vi"),
        )
        .arg(
            Arg::new("server")
                .long("server")
                .short('s')
                .help(format!(
                    "Base URL of banana-translate-web (default: ${})",
                    URL_ENV_VAR
                ))
                .conflicts_with("local"),
        )
        .arg(
            Arg::new("local")
                .long("local")
                .short('l')
                .help("Translate in-process instead of calling a server")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("failure-rate")
                .long("failure-rate")
                .help("Simulated outage probability for --local (default: 0.05)")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Random seed for --local, for repeatable runs")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Request timeout in seconds")
                .value_parser(value_parser!(u64))
                .default_value("30"),
        )
        .arg(
            Arg::new("list-languages")
                .long("list-languages")
                .help("List supported languages and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show detailed translation process")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if matches.get_flag("list-languages") {
        println!("{} {:<4} {}", SourceLanguage::Auto.flag(), "auto", SourceLanguage::Auto.name());
        for language in LanguageCode::ALL {
            println!("{} {:<4} {}", language.flag(), language.as_str(), language.name());
        }
        return Ok(());
    }

    let Some(text) = matches.get_one::<String>("text") else {
        return Err("Missing text to translate".into());
    };
    let source: SourceLanguage = matches
        .get_one::<String>("from")
        .map(String::as_str)
        .unwrap_or("auto")
        .parse()?;
    let target: LanguageCode = matches
        .get_one::<String>("to")
        .map(String::as_str)
        .unwrap_or("vi")
        .parse()?;
    let timeout = Duration::from_secs(matches.get_one::<u64>("timeout").copied().unwrap_or(30));

    // 1. Pick a transport
    let server = matches
        .get_one::<String>("server")
        .cloned()
        .or_else(|| env::var(URL_ENV_VAR).ok());
    let transport: Arc<dyn TranslationTransport> = match server {
        Some(url) if !matches.get_flag("local") => {
            Arc::new(HttpTransport::with_timeout(url, timeout)?)
        }
        _ => {
            let mut builder = Orchestrator::builder();
            if let Some(rate) = matches.get_one::<f64>("failure-rate") {
                builder = builder.failure_rate(*rate);
            }
            if let Some(seed) = matches.get_one::<u64>("seed") {
                builder = builder.seed(*seed);
            }
            Arc::new(LocalTransport::new(Arc::new(builder.build()?)))
        }
    };

    if verbose {
        println!("📝 Source: \"{}\"", text);
        println!("🌍 {} {} → {} {}", source.flag(), source, target.flag(), target);
        println!("🔌 Transport: {}", transport.transport_name());
        println!();
    }

    // 2. Run one submission through the workflow controller
    let notifier: Arc<dyn Notifier> = if verbose {
        Arc::new(TerminalNotifier)
    } else {
        Arc::new(TracingNotifier)
    };
    let mut controller = WorkflowController::new(transport, notifier);
    controller.set_source_text(text.as_str());
    controller.set_source_lang(source);
    controller.set_target_lang(target);

    let result = match controller.submit().await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("❌ {}", e);
            return Err(e.into());
        }
    };

    if verbose {
        if let Some(detected) = result.detected_source_lang {
            println!("🔍 Detected: {} {}", detected.flag(), detected.name());
        }
        println!("📊 Confidence: {:.1}%", result.confidence * 100.0);
        println!("🔢 Characters: {}", result.characters_translated);
        println!();
    }
    println!("{}", result.translated_text);

    Ok(())
}
