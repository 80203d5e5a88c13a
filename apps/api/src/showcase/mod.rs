//! Showcase data for the static sections of the page: the skill proficiency
//! chart, the experience timeline and the project grid.
//!
//! Independent of the assistant widgets; nothing here reaches the model.

pub mod handlers;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

const DEFAULT_SHOWCASE_JSON: &str = include_str!("../../data/showcase.json");

/// Filter value that selects every project.
pub const ALL_PROJECTS: &str = "all";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillLevel {
    pub label: String,
    /// Proficiency, 0–100.
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: u32,
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub title: String,
    pub category: String,
    pub tech: String,
    pub desc: String,
    pub icon: String,
}

/// Chart-ready series: labels and values in the same order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillChart {
    pub labels: Vec<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Showcase {
    pub skills: Vec<SkillLevel>,
    pub experience: Vec<TimelineEntry>,
    pub projects: Vec<ProjectCard>,
}

impl Showcase {
    pub fn embedded() -> Result<Self> {
        serde_json::from_str(DEFAULT_SHOWCASE_JSON).context("Embedded showcase.json is invalid")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read showcase file {}", path.display()))?;
                let showcase = serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid showcase file {}", path.display()))?;
                info!("Showcase data loaded from {}", path.display());
                Ok(showcase)
            }
            None => Self::embedded(),
        }
    }

    pub fn skill_chart(&self) -> SkillChart {
        SkillChart {
            labels: self.skills.iter().map(|s| s.label.clone()).collect(),
            data: self.skills.iter().map(|s| s.level.min(100)).collect(),
        }
    }

    /// Timeline entry at `index` (position, not `id`).
    pub fn select_experience(&self, index: usize) -> Option<&TimelineEntry> {
        self.experience.get(index)
    }

    /// `"all"` (or no filter) returns every card; anything else keeps cards whose
    /// category or tech list contains the filter text. Matching is case-sensitive
    /// and uses the filter exactly as given, surrounding whitespace included.
    pub fn filter_projects(&self, filter: Option<&str>) -> Vec<&ProjectCard> {
        match filter {
            None | Some("") | Some(ALL_PROJECTS) => self.projects.iter().collect(),
            Some(filter) => self
                .projects
                .iter()
                .filter(|p| p.category.contains(filter) || p.tech.contains(filter))
                .collect(),
        }
    }
}
