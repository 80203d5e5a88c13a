//! Résumé context: the fixed dataset every assistant answer is grounded in.
//!
//! Loaded once at startup (embedded default or a JSON file) and serialized once.
//! Prompt builders embed `ResumeContext::as_json()` verbatim; there is no
//! retrieval or summarization step.

pub mod handlers;
pub mod models;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::context::models::Resume;

const DEFAULT_RESUME_JSON: &str = include_str!("../../data/resume.json");

/// Immutable résumé plus its serialized form. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ResumeContext {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    resume: Resume,
    json: String,
}

impl ResumeContext {
    pub fn new(resume: Resume) -> Result<Self> {
        let json = serde_json::to_string(&resume).context("Failed to serialize resume context")?;
        Ok(Self {
            inner: Arc::new(Inner { resume, json }),
        })
    }

    /// The dataset compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(DEFAULT_RESUME_JSON).context("Embedded resume.json is invalid")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let resume: Resume = serde_json::from_str(json).context("Malformed resume JSON")?;
        Self::new(resume)
    }

    /// Loads from `path` if given, otherwise falls back to the embedded dataset.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read resume file {}", path.display()))?;
                let ctx = Self::from_json(&raw)
                    .with_context(|| format!("Invalid resume file {}", path.display()))?;
                info!("Resume context loaded from {}", path.display());
                Ok(ctx)
            }
            None => Self::embedded(),
        }
    }

    pub fn resume(&self) -> &Resume {
        &self.inner.resume
    }

    /// Compact JSON of the whole résumé, as embedded in system instructions.
    pub fn as_json(&self) -> &str {
        &self.inner.json
    }

    pub fn subject_name(&self) -> &str {
        self.inner.resume.subject_name()
    }

    pub fn contact(&self) -> &str {
        &self.inner.resume.contact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_dataset_parses() {
        let ctx = ResumeContext::embedded().unwrap();
        let resume = ctx.resume();
        assert_eq!(ctx.subject_name(), "Manjima Jijo");
        assert_eq!(resume.education.len(), 2);
        assert_eq!(resume.experience.len(), 3);
        assert_eq!(resume.projects.len(), 4);
        assert_eq!(
            resume.skills.categories().collect::<Vec<_>>(),
            vec!["languages", "libraries", "tools", "os"]
        );
    }

    #[test]
    fn test_json_contains_every_section() {
        let ctx = ResumeContext::embedded().unwrap();
        let json = ctx.as_json();
        for key in ["\"profile\"", "\"skills\"", "\"education\"", "\"experience\"", "\"projects\""] {
            assert!(json.contains(key), "missing {key}");
        }
        assert!(json.contains(r#""languages":["Python (Advanced)","C","C++","HTML","SQL"]"#));
    }

    #[test]
    fn test_json_round_trips_to_same_resume() {
        let ctx = ResumeContext::embedded().unwrap();
        let reparsed: Resume = serde_json::from_str(ctx.as_json()).unwrap();
        assert_eq!(&reparsed, ctx.resume());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "profile": "Grace Hopper, Engineer.",
                "summary": "Compilers.",
                "contact": "grace@example.com",
                "skills": {{"languages": ["COBOL"]}},
                "education": [],
                "experience": [],
                "projects": []
            }}"#
        )
        .unwrap();

        let ctx = ResumeContext::load(Some(file.path())).unwrap();
        assert_eq!(ctx.subject_name(), "Grace Hopper");
        assert_eq!(ctx.contact(), "grace@example.com");
        assert_eq!(ctx.resume().skills.get("languages").unwrap(), ["COBOL"]);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = ResumeContext::load(Some(Path::new("/definitely/not/here.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"profile": 42}}"#).unwrap();
        assert!(ResumeContext::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_load_without_path_uses_embedded() {
        let ctx = ResumeContext::load(None).unwrap();
        assert_eq!(ctx.as_json(), ResumeContext::embedded().unwrap().as_json());
    }
}
