//! Fit analyzer: single-shot comparison of a job description against the résumé.
//!
//! Not a conversation: each run overwrites the previous result. While a run is
//! pending the trigger control is disabled and the result area shows a busy
//! placeholder; the control is re-enabled exactly once when the run resolves.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::prompts::{
    ANALYZE_LABEL, ANALYZING_LABEL, CALL_TO_ACTION_LABEL, FIT_BUSY_MESSAGE, FIT_FAILURE_MESSAGE,
    FIT_SYSTEM_TEMPLATE,
};
use crate::analysis::score::extract_match_score;
use crate::context::ResumeContext;
use crate::llm_client::prompts::fill_resume_template;
use crate::llm_client::{CompletionClient, CompletionRequest, CompletionResult};
use crate::models::submission::Submission;
use crate::render::markdown_to_html;

/// Link shown under a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallToAction {
    pub label: String,
    pub href: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitAnalysis {
    pub markdown: String,
    pub html: String,
    /// Score parsed from the Markdown, when the model produced one.
    pub match_score: Option<u8>,
    pub call_to_action: CallToAction,
}

/// Contents of the result area.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FitResult {
    Empty,
    Busy { message: String },
    Ready(FitAnalysis),
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FitView {
    pub control_enabled: bool,
    pub control_label: &'static str,
    pub result: FitResult,
}

#[derive(Debug, Clone)]
pub struct FitAnalyzer {
    context: ResumeContext,
    result: FitResult,
    control_enabled: bool,
}

impl FitAnalyzer {
    pub fn new(context: ResumeContext) -> Self {
        Self {
            context,
            result: FitResult::Empty,
            control_enabled: true,
        }
    }

    pub fn control_enabled(&self) -> bool {
        self.control_enabled
    }

    pub fn result(&self) -> &FitResult {
        &self.result
    }

    pub fn system_instruction(&self) -> String {
        fill_resume_template(
            FIT_SYSTEM_TEMPLATE,
            self.context.subject_name(),
            self.context.as_json(),
        )
    }

    /// Disables the control and shows the busy placeholder. Blank input and
    /// runs while one is pending change nothing.
    pub fn begin(&mut self, job_description: &str) -> Submission {
        if job_description.trim().is_empty() {
            debug!("Ignoring blank job description");
            return Submission::Blank;
        }
        if !self.control_enabled {
            debug!("Fit analysis refused: run still pending");
            return Submission::Busy;
        }

        self.control_enabled = false;
        self.result = FitResult::Busy {
            message: FIT_BUSY_MESSAGE.to_string(),
        };

        Submission::Started(CompletionRequest {
            prompt: job_description.to_string(),
            system_instruction: self.system_instruction(),
        })
    }

    /// Renders the outcome and re-enables the control. Returns `None` if no
    /// run was pending.
    pub fn resolve(&mut self, result: CompletionResult) -> Option<&FitResult> {
        if self.control_enabled {
            warn!("Fit result arrived with no pending run; dropped");
            return None;
        }

        self.result = match result {
            CompletionResult::Success(markdown) => {
                let analysis = self.build_analysis(markdown);
                info!("Fit analysis ready (score: {:?})", analysis.match_score);
                FitResult::Ready(analysis)
            }
            CompletionResult::Unavailable => FitResult::Failed {
                message: FIT_FAILURE_MESSAGE.to_string(),
            },
        };
        self.control_enabled = true;
        Some(&self.result)
    }

    /// Full run: begin, call the client, resolve.
    pub async fn analyze(
        &mut self,
        client: &dyn CompletionClient,
        job_description: &str,
    ) -> Option<&FitResult> {
        let request = match self.begin(job_description) {
            Submission::Started(request) => request,
            Submission::Blank | Submission::Busy => return None,
        };
        let result = client.execute(&request).await;
        self.resolve(result)
    }

    pub fn view(&self) -> FitView {
        FitView {
            control_enabled: self.control_enabled,
            control_label: if self.control_enabled {
                ANALYZE_LABEL
            } else {
                ANALYZING_LABEL
            },
            result: self.result.clone(),
        }
    }

    fn build_analysis(&self, markdown: String) -> FitAnalysis {
        let href = format!("mailto:{}", self.context.contact());
        let call_to_action = CallToAction {
            label: CALL_TO_ACTION_LABEL.to_string(),
            html: markdown_to_html(&format!("[{CALL_TO_ACTION_LABEL}](<{href}>)")),
            href,
        };

        FitAnalysis {
            html: markdown_to_html(&markdown),
            match_score: extract_match_score(&markdown),
            markdown,
            call_to_action,
        }
    }
}
