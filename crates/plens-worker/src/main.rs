//! Clarity analysis worker binary.
//!
//! One batch run per invocation: load the collaborator payloads, analyze,
//! write the Clarity Report JSON.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use plens_analysis::{AnalysisConfig, ClarityPipeline};
use plens_models::{PresentationContext, VisualContext};
use plens_reasoning::{GeminiClient, Reasoning, UnavailableReasoning};
use plens_worker::{load_presentation_context, load_transcript, load_visual_context};

struct Args {
    transcript: PathBuf,
    visual: Option<PathBuf>,
    context: Option<PathBuf>,
    out: PathBuf,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let mut transcript = None;
    let mut visual = None;
    let mut context = None;
    let mut out = PathBuf::from("clarity_report.json");

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--visual" => {
                visual = Some(PathBuf::from(args.next().ok_or("--visual needs a path")?));
            }
            "--context" => {
                context = Some(PathBuf::from(args.next().ok_or("--context needs a path")?));
            }
            "--out" => {
                out = PathBuf::from(args.next().ok_or("--out needs a path")?);
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown flag: {}", other));
            }
            other => {
                if transcript.replace(PathBuf::from(other)).is_some() {
                    return Err("more than one transcript path given".to_string());
                }
            }
        }
    }

    let transcript = transcript.ok_or("missing transcript path")?;
    Ok(Args {
        transcript,
        visual,
        context,
        out,
    })
}

const USAGE: &str =
    "Usage: plens-worker <transcript.json> [--visual <path>] [--context <path>] [--out <path>]";

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("plens=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    info!("Starting plens-worker");

    // Load configuration
    let config = AnalysisConfig::from_env();
    info!("Analysis config: {:?}", config);

    // Pick the reasoning strategy: Gemini when configured, degraded
    // fallbacks-only otherwise.
    let reasoner: Arc<dyn Reasoning> = match GeminiClient::new() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            warn!(error = %e, "Reasoning service not configured, running with local fallbacks only");
            Arc::new(UnavailableReasoning::new())
        }
    };

    let pipeline = match ClarityPipeline::new(config, reasoner) {
        Ok(p) => p,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Load inputs
    let transcript = match load_transcript(&args.transcript) {
        Ok(t) => t,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let visual: Option<VisualContext> = match &args.visual {
        Some(path) => match load_visual_context(path) {
            Ok(v) => Some(v),
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let presentation: PresentationContext = match &args.context {
        Some(path) => match load_presentation_context(path) {
            Ok(c) => c,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => PresentationContext::default(),
    };

    // Run the analysis
    let report = match pipeline.run(&transcript, visual.as_ref(), &presentation).await {
        Ok(report) => report,
        Err(e) => {
            error!("Analysis failed: {}", e);
            std::process::exit(1);
        }
    };

    // Write the report
    let json = match serde_json::to_string_pretty(&report) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize report: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(&args.out, json) {
        error!("Failed to write report to {}: {}", args.out.display(), e);
        std::process::exit(1);
    }

    info!(
        run_id = %report.run_id,
        score = report.clarity_score,
        tier = %report.clarity_tier,
        segments = report.segments.len(),
        out = %args.out.display(),
        "Analysis complete"
    );
    for segment in &report.segments {
        info!(
            segment_id = %segment.segment_id,
            start = %plens_models::format_timestamp(segment.start_sec),
            severity = %segment.severity,
            label = %segment.label,
            "Flagged segment"
        );
    }
}
