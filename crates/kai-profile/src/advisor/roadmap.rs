use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::client::AdvisorError;
use crate::assessment::archetypes::{Archetype, ArchetypeKey};
use crate::assessment::profile::ProfileReport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub focus: String,
    pub actions: Vec<String>,
}

impl RoadmapPhase {
    fn new(focus: &str, actions: [&str; 3]) -> Self {
        Self {
            focus: focus.to_string(),
            actions: actions.iter().map(|action| action.to_string()).collect(),
        }
    }

    fn is_usable(&self) -> bool {
        !self.focus.trim().is_empty() && self.actions.iter().any(|action| !action.trim().is_empty())
    }
}

/// 30/60/90-day action plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub day30: RoadmapPhase,
    pub day60: RoadmapPhase,
    pub day90: RoadmapPhase,
}

impl Roadmap {
    /// Generic plan used whenever generation fails.
    pub fn fallback() -> Self {
        Self {
            day30: RoadmapPhase::new(
                "Exploration & Analysis",
                [
                    "Take a basic course on AI in your sector",
                    "Map out your current set of tasks",
                    "Identify one safe task to automate",
                ],
            ),
            day60: RoadmapPhase::new(
                "Experiment & Pilot",
                [
                    "Start a small experiment with an AI tool",
                    "Critically evaluate the quality of the output",
                    "Share your findings with your direct colleagues",
                ],
            ),
            day90: RoadmapPhase::new(
                "Integration & Growth",
                [
                    "Make the AI tool part of your regular workflow",
                    "Explore more advanced use cases",
                    "Help a colleague with the knowledge you gained",
                ],
            ),
        }
    }

    /// Parses a model reply, tolerating a surrounding markdown code fence.
    pub fn parse(raw: &str) -> Result<Self, AdvisorError> {
        let roadmap: Roadmap = serde_json::from_str(strip_code_fence(raw))
            .map_err(|err| AdvisorError::InvalidContent(err.to_string()))?;

        if roadmap.phases().iter().all(|(_, phase)| phase.is_usable()) {
            Ok(roadmap)
        } else {
            Err(AdvisorError::InvalidContent(
                "roadmap phase without focus or actions".to_string(),
            ))
        }
    }

    pub fn phases(&self) -> [(&'static str, &RoadmapPhase); 3] {
        [
            ("Day 1-30", &self.day30),
            ("Day 31-60", &self.day60),
            ("Day 61-90", &self.day90),
        ]
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string, e.g. ```json
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapOutcome {
    pub roadmap: Roadmap,
    pub source: RoadmapSource,
}

/// Profile facts the roadmap prompt is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapContext {
    pub role: String,
    pub department: String,
    pub industry: String,
    pub experience: String,
    pub org_size: String,
    pub archetype: ArchetypeKey,
    pub style_label: String,
    pub readiness_score: f64,
    /// 1 (calm) to 5 (very anxious).
    pub anxiety_raw: f64,
}

impl RoadmapContext {
    pub fn from_report(report: &ProfileReport) -> Self {
        Self {
            role: report.context.role.clone(),
            department: report.context.department.clone(),
            industry: report.context.industry.clone(),
            experience: report.context.experience.clone(),
            org_size: report.context.org_size.clone(),
            archetype: report.scores.archetype,
            style_label: report.scores.style_label().to_string(),
            readiness_score: report.scores.readiness_score,
            anxiety_raw: report.scores.anxiety_raw,
        }
    }
}

pub fn roadmap_prompt(context: &RoadmapContext, archetype: &Archetype) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are a senior AI transformation consultant specialised in the {} sector.",
        context.industry
    );
    prompt.push_str("You are advising an employee with the following profile:\n\n");
    prompt.push_str("--- PROFILE ---\n");
    let _ = writeln!(prompt, "Role: {}", context.role);
    let _ = writeln!(prompt, "Department: {}", context.department);
    let _ = writeln!(prompt, "Experience: {}", context.experience);
    let _ = writeln!(prompt, "Organisation size: {}", context.org_size);
    prompt.push_str("\n--- PSYCHOLOGY (KAI MODEL) ---\n");
    let _ = writeln!(prompt, "Archetype: {}", archetype.name);
    let _ = writeln!(prompt, "Cognitive style: {}", context.style_label);
    let _ = writeln!(
        prompt,
        "AI readiness score: {}/100",
        context.readiness_score.round()
    );
    let _ = writeln!(
        prompt,
        "Anxiety level (1-5): {} (where 5 is very anxious)",
        context.anxiety_raw
    );
    prompt.push_str("\n--- ASSIGNMENT ---\n");
    prompt.push_str("Generate a concrete, actionable 30-60-90 day plan.\n\n");
    prompt.push_str("GUIDELINES:\n");
    prompt.push_str(
        "1. Show empathy for the anxiety level. If anxiety is high, focus on safety and small steps.\n",
    );
    let _ = writeln!(
        prompt,
        "2. Tailor the advice to the {} sector and name specific relevant use cases.",
        context.industry
    );
    let _ = writeln!(
        prompt,
        "3. Take the organisation size ({}) into account: a start-up can move fast, an enterprise must respect policy.",
        context.org_size
    );
    prompt.push_str("4. Address the reader directly, professional but approachable.\n\n");
    prompt.push_str("Return only a JSON object (no markdown) in this format:\n");
    prompt.push_str(
        r#"{
  "day30": { "focus": "Short title (max 5 words)", "actions": ["Action 1", "Action 2", "Action 3"] },
  "day60": { "focus": "Short title (max 5 words)", "actions": ["Action 1", "Action 2", "Action 3"] },
  "day90": { "focus": "Short title (max 5 words)", "actions": ["Action 1", "Action 2", "Action 3"] }
}"#,
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::archetypes::ArchetypeRegistry;

    #[test]
    fn parses_plain_and_fenced_json() {
        let json = serde_json::to_string(&Roadmap::fallback()).expect("serializes");

        assert_eq!(Roadmap::parse(&json).expect("plain"), Roadmap::fallback());

        let fenced = format!("```json\n{json}\n```");
        assert_eq!(Roadmap::parse(&fenced).expect("fenced"), Roadmap::fallback());
    }

    #[test]
    fn rejects_prose_and_empty_phases() {
        assert!(matches!(
            Roadmap::parse("Here is your plan!"),
            Err(AdvisorError::InvalidContent(_))
        ));

        let hollow = r#"{"day30": {"focus": "", "actions": []},
            "day60": {"focus": "b", "actions": ["x"]},
            "day90": {"focus": "c", "actions": ["y"]}}"#;
        assert!(Roadmap::parse(hollow).is_err());
    }

    #[test]
    fn prompt_mentions_profile_and_archetype() {
        let registry = ArchetypeRegistry::standard();
        let context = RoadmapContext {
            role: "Controller".to_string(),
            department: "Finance".to_string(),
            industry: "Finance".to_string(),
            experience: "Senior".to_string(),
            org_size: "Enterprise".to_string(),
            archetype: ArchetypeKey::SystemGuardian,
            style_label: "Adaptive".to_string(),
            readiness_score: 84.6,
            anxiety_raw: 2.0,
        };

        let prompt = roadmap_prompt(&context, registry.get(context.archetype));

        assert!(prompt.contains("specialised in the Finance sector"));
        assert!(prompt.contains("Archetype: The System Guardian"));
        assert!(prompt.contains("AI readiness score: 85/100"));
        assert!(prompt.contains("\"day90\""));
    }
}
