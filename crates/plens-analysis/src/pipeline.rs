//! The batch analysis pipeline.
//!
//! One entry point per video: the pipeline runs to completion and produces
//! one immutable Clarity Report, or fails fast with a single explicit
//! error before any processing starts. Intermediate state is local to the
//! run, so an abandoned run corrupts nothing.
//!
//! # Phases
//!
//! 1. Validate configuration (fatal on violation)
//! 2. Short-circuit zero-duration transcripts into a perfect empty report
//! 3. Window the transcript
//! 4. Parallel phase: per-window term extraction, claim classification,
//!    role tagging (delegated, bounded by a semaphore) plus the local
//!    ramble and visual signals
//! 5. Sequential phase: grounding gap and structure order, threading their
//!    accumulators through windows in timestamp order
//! 6. Pure scoring of every window
//! 7. Bounded-parallel issue synthesis for flagged windows
//! 8. Aggregation into the final report

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use plens_models::{
    ClarityReport, PresentationContext, RoleTag, SignalResult, Transcript, VisualContext, Window,
    WindowRisk,
};
use plens_reasoning::Reasoning;

use crate::aggregator::aggregate_clarity;
use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::logging::RunLogger;
use crate::scorer::{rank_windows, score_window};
use crate::signals::{claims, concept_spike, delegate, grounding, ramble, structure, visual};
use crate::synthesizer::synthesize_issue;
use crate::windower::build_windows;

/// Results of the parallel per-window phase.
struct WindowScan {
    concept: SignalResult,
    claims: SignalResult,
    ramble: SignalResult,
    visual: SignalResult,
    role: RoleTag,
    role_confidence: f64,
}

/// The clarity analysis pipeline.
pub struct ClarityPipeline {
    config: AnalysisConfig,
    reasoner: Arc<dyn Reasoning>,
}

impl ClarityPipeline {
    /// Create a pipeline, validating configuration up front.
    pub fn new(config: AnalysisConfig, reasoner: Arc<dyn Reasoning>) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self { config, reasoner })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run one analysis and produce the Clarity Report.
    pub async fn run(
        &self,
        transcript: &Transcript,
        visual_context: Option<&VisualContext>,
        presentation: &PresentationContext,
    ) -> AnalysisResult<ClarityReport> {
        let run_id = plens_models::RunId::new();
        let logger = RunLogger::new(&run_id, &transcript.video_id);

        if transcript.is_empty() {
            logger.stage("windower", "Transcript has no speech, reporting a perfect score");
            return Ok(ClarityReport::perfect(run_id, transcript.video_id.clone()));
        }

        let windows = build_windows(transcript, self.config.window_secs)?;
        logger.stage(
            "windower",
            &format!(
                "Split {:.1}s of transcript into {} windows",
                transcript.duration(),
                windows.len()
            ),
        );

        let scans = self.scan_windows(&windows, visual_context).await;
        let signals = self.sequential_signals(&windows, scans).await;

        let risks: Vec<WindowRisk> = windows
            .iter()
            .zip(signals.iter())
            .map(|(window, signals)| score_window(window, signals, &self.config))
            .collect();

        let flagged: Vec<&WindowRisk> = risks.iter().filter(|r| r.flagged).collect();
        logger.stage(
            "scorer",
            &format!("{} of {} windows flagged", flagged.len(), risks.len()),
        );
        if !flagged.is_empty() {
            let mut ranked: Vec<WindowRisk> = flagged.iter().map(|r| (*r).clone()).collect();
            rank_windows(&mut ranked);
            logger.stage(
                "scorer",
                &format!(
                    "Riskiest window: ordinal {} at risk {:.2}",
                    ranked[0].ordinal, ranked[0].risk
                ),
            );
        }

        let issues = self
            .synthesize_flagged(&windows, &risks, &signals, presentation)
            .await;

        let (score, _) = aggregate_clarity(&risks, &self.config);
        let report = ClarityReport::new(run_id, transcript.video_id.clone(), score, issues);
        logger.stage(
            "aggregator",
            &format!(
                "Clarity {:.1} ({}), {} segments",
                report.clarity_score,
                report.clarity_tier,
                report.segments.len()
            ),
        );

        Ok(report)
    }

    /// Parallel phase: run the window-independent signals across all
    /// windows, with delegated calls bounded by the semaphore.
    async fn scan_windows(
        &self,
        windows: &[Window],
        visual_context: Option<&VisualContext>,
    ) -> Vec<WindowScan> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_reasoning_parallel));

        let futures = windows.iter().map(|window| {
            let semaphore = semaphore.clone();
            let reasoner = self.reasoner.clone();
            let timeout = self.config.reasoning_timeout;
            let threshold = self.config.new_term_threshold;

            async move {
                // local signals need no permit
                let ramble = ramble::analyze(window);
                let visual = visual::analyze(window, visual_context);

                let _permit = semaphore.acquire_owned().await.ok();

                let concept =
                    concept_spike::analyze(reasoner.as_ref(), timeout, window, threshold).await;
                let claims = claims::analyze(reasoner.as_ref(), timeout, window).await;

                let (role, role_confidence) = if window.is_silent() {
                    (RoleTag::Unknown, 0.0)
                } else {
                    delegate(timeout, "tag_role", reasoner.tag_role(&window.text))
                        .await
                        .unwrap_or((RoleTag::Unknown, 0.0))
                };

                WindowScan {
                    concept,
                    claims,
                    ramble,
                    visual,
                    role,
                    role_confidence,
                }
            }
        });

        join_all(futures).await
    }

    /// Sequential phase: grounding gap and structure order, folding their
    /// accumulators over windows in timestamp order.
    async fn sequential_signals(
        &self,
        windows: &[Window],
        scans: Vec<WindowScan>,
    ) -> Vec<Vec<SignalResult>> {
        let mut grounding_state = grounding::GroundingState::new();
        let mut narrative_state = structure::NarrativeState::new();
        let mut all_signals = Vec::with_capacity(windows.len());

        for (window, scan) in windows.iter().zip(scans.into_iter()) {
            let terms = match &scan.concept.evidence {
                plens_models::SignalEvidence::Terms(terms) => terms.clone(),
                _ => plens_models::TermExtraction::default(),
            };

            let grounding = grounding::analyze(
                self.reasoner.as_ref(),
                self.config.reasoning_timeout,
                window,
                &terms,
                &mut grounding_state,
            )
            .await;

            let structure =
                structure::score_role(scan.role, scan.role_confidence, &mut narrative_state);

            all_signals.push(vec![
                scan.concept,
                grounding,
                scan.claims,
                scan.visual,
                structure,
                scan.ramble,
            ]);
        }

        all_signals
    }

    /// Bounded-parallel issue synthesis for flagged windows. Issues come
    /// back in timestamp order regardless of completion order.
    async fn synthesize_flagged(
        &self,
        windows: &[Window],
        risks: &[WindowRisk],
        signals: &[Vec<SignalResult>],
        presentation: &PresentationContext,
    ) -> Vec<plens_models::Issue> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_reasoning_parallel));

        let futures = risks.iter().filter(|r| r.flagged).map(|risk| {
            let semaphore = semaphore.clone();
            let reasoner = self.reasoner.clone();
            let config = self.config.clone();
            let window = &windows[risk.ordinal];
            let window_signals = &signals[risk.ordinal];
            let surrounding = surrounding_text(windows, risk.ordinal);

            async move {
                let _permit = semaphore.acquire_owned().await.ok();
                synthesize_issue(
                    reasoner.as_ref(),
                    &config,
                    window,
                    risk,
                    window_signals,
                    &surrounding,
                    presentation,
                )
                .await
            }
        });

        let mut issues = join_all(futures).await;
        issues.sort_by(|a, b| a.segment_id.cmp(&b.segment_id));
        issues
    }
}

/// Neighboring window text used to ground generated feedback.
fn surrounding_text(windows: &[Window], ordinal: usize) -> String {
    let mut parts = Vec::new();
    if ordinal > 0 {
        parts.push(windows[ordinal - 1].text.as_str());
    }
    if ordinal + 1 < windows.len() {
        parts.push(windows[ordinal + 1].text.as_str());
    }
    parts.join(" ... ")
}
