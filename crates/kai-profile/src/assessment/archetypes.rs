use serde::{Deserialize, Serialize};

/// The ten profile classifications produced by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArchetypeKey {
    VisionaryArchitect,
    StrategicIntegrator,
    CreativeExperimenter,
    SystemGuardian,
    ProcessOptimizer,
    PracticalTraditionalist,
    PragmaticBridge,
    CollaborativePivot,
    HesitantObserver,
    ResistantSkeptic,
}

impl ArchetypeKey {
    pub const COUNT: usize = 10;

    pub const fn ordered() -> [ArchetypeKey; Self::COUNT] {
        [
            ArchetypeKey::VisionaryArchitect,
            ArchetypeKey::StrategicIntegrator,
            ArchetypeKey::CreativeExperimenter,
            ArchetypeKey::SystemGuardian,
            ArchetypeKey::ProcessOptimizer,
            ArchetypeKey::PracticalTraditionalist,
            ArchetypeKey::PragmaticBridge,
            ArchetypeKey::CollaborativePivot,
            ArchetypeKey::HesitantObserver,
            ArchetypeKey::ResistantSkeptic,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ArchetypeKey::VisionaryArchitect => "VISIONARY_ARCHITECT",
            ArchetypeKey::StrategicIntegrator => "STRATEGIC_INTEGRATOR",
            ArchetypeKey::CreativeExperimenter => "CREATIVE_EXPERIMENTER",
            ArchetypeKey::SystemGuardian => "SYSTEM_GUARDIAN",
            ArchetypeKey::ProcessOptimizer => "PROCESS_OPTIMIZER",
            ArchetypeKey::PracticalTraditionalist => "PRACTICAL_TRADITIONALIST",
            ArchetypeKey::PragmaticBridge => "PRAGMATIC_BRIDGE",
            ArchetypeKey::CollaborativePivot => "COLLABORATIVE_PIVOT",
            ArchetypeKey::HesitantObserver => "HESITANT_OBSERVER",
            ArchetypeKey::ResistantSkeptic => "RESISTANT_SKEPTIC",
        }
    }

    /// Parses either the key (`SYSTEM_GUARDIAN`) or the display name
    /// (`The System Guardian`), ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        let normalized = normalized.strip_prefix("THE ").unwrap_or(&normalized);
        let normalized = normalized.replace([' ', '-'], "_");
        Self::ordered()
            .into_iter()
            .find(|key| key.as_str() == normalized)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ArchetypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Narrative record shown on the results card and used as AI context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Archetype {
    pub key: ArchetypeKey,
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub risk: &'static str,
    pub opportunity: &'static str,
    pub behaviors: Vec<&'static str>,
    pub strengths: Vec<&'static str>,
    pub challenges: Vec<&'static str>,
    pub management_tips: Vec<&'static str>,
    /// 1 (easy) to 10 (hard).
    pub transformation_difficulty: u8,
    pub action_plan: &'static str,
}

/// Immutable table holding exactly one record per [`ArchetypeKey`].
#[derive(Debug, Clone)]
pub struct ArchetypeRegistry {
    entries: [Archetype; ArchetypeKey::COUNT],
}

impl ArchetypeRegistry {
    pub fn standard() -> Self {
        Self {
            entries: ArchetypeKey::ordered().map(standard_archetype),
        }
    }

    pub fn get(&self, key: ArchetypeKey) -> &Archetype {
        &self.entries[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
        self.entries.iter()
    }
}

fn standard_archetype(key: ArchetypeKey) -> Archetype {
    match key {
        ArchetypeKey::VisionaryArchitect => Archetype {
            key,
            name: "The Visionary Architect",
            description: "A strategic pioneer who understands both the technology and its organisation-wide impact. You are the engine behind transformation.",
            color: "#3b82f6",
            risk: "May run too far ahead of the troops and lose touch with operational reality.",
            opportunity: "Lead strategic pilots and shape the long-term vision for AI integration.",
            behaviors: vec!["Thinks in systems", "Experiments continuously", "Skips details for the big picture"],
            strengths: vec!["Strategic insight", "High digital literacy", "Courage and vision"],
            challenges: vec!["Impatience with slow processes", "Underestimates implementation risk"],
            management_tips: vec![
                "Give a mandate for R&D",
                "Pair with a System Guardian for balance",
                "Ask for concrete ROI cases",
            ],
            transformation_difficulty: 2,
            action_plan: "Focus on governance and scalability. Your challenge is not the technology but bringing people along.",
        },
        ArchetypeKey::StrategicIntegrator => Archetype {
            key,
            name: "The Strategic Integrator",
            description: "The bridge between wild idea and working solution. You combine an innovative mindset with enough pragmatism to get things done.",
            color: "#6366f1",
            risk: "Can get stuck in the politics between renewal and preservation.",
            opportunity: "Translate the Architect's vision into workable roadmaps for departments.",
            behaviors: vec!["Looks for fit", "Connects people and technology", "Translates jargon into business"],
            strengths: vec!["Stakeholder management", "Process insight", "Adaptive intelligence"],
            challenges: vec!["Seen as too technical by business and too vague by IT"],
            management_tips: vec![
                "Deploy as project lead for AI transformation",
                "Leave room for cross-functional work",
            ],
            transformation_difficulty: 3,
            action_plan: "Identify high-impact use cases and coach teams through their first adoption.",
        },
        ArchetypeKey::CreativeExperimenter => Archetype {
            key,
            name: "The Creative Experimenter",
            description: "An enthusiastic explorer who sees AI as a playground. You generate many ideas but sometimes lack the structure to anchor them.",
            color: "#8b5cf6",
            risk: "Stays at fun demos and shadow IT without becoming safe or scalable.",
            opportunity: "Act as an inspirer; show colleagues what is possible.",
            behaviors: vec!["Tries every new tool", "Shares screenshots enthusiastically", "Sometimes ignores security rules"],
            strengths: vec!["Creativity", "Enthusiasm", "Fast adoption"],
            challenges: vec!["Lack of focus", "Little attention to compliance and security"],
            management_tips: vec![
                "Provide a safe sandbox environment",
                "Set clear boundaries on what is and is not allowed",
            ],
            transformation_difficulty: 4,
            action_plan: "Learn the basics of data security and master one tool properly.",
        },
        ArchetypeKey::SystemGuardian => Archetype {
            key,
            name: "The System Guardian",
            description: "The quality keeper. You embrace technology, but only when it is safe, proven and properly integrated. You prevent chaos.",
            color: "#10b981",
            risk: "Can slow innovation with a 'yes, but' attitude and a focus on what can go wrong.",
            opportunity: "Own AI governance, validation and quality control.",
            behaviors: vec!["Checks the rules", "Tests thoroughly for errors", "Documents processes"],
            strengths: vec!["Accuracy", "Risk control", "Process stability"],
            challenges: vec!["Resists fast, untested change"],
            management_tips: vec![
                "Involve early in the process, not only at the end",
                "Give the role of safety officer",
            ],
            transformation_difficulty: 3,
            action_plan: "Develop frameworks for validating AI output. Your critical eye is invaluable.",
        },
        ArchetypeKey::ProcessOptimizer => Archetype {
            key,
            name: "The Process Optimizer",
            description: "You look for efficiency within existing frameworks. AI is not a revolution to you but a better screwdriver for today's work.",
            color: "#14b8a6",
            risk: "Optimises processes that may become redundant altogether.",
            opportunity: "Implement quick wins in administrative and repetitive tasks.",
            behaviors: vec!["Looks for time savings", "Automates spreadsheets", "Likes step-by-step plans"],
            strengths: vec!["Efficiency", "Execution power", "Reliability"],
            challenges: vec!["Struggles with out-of-the-box thinking", "Misses the strategic shift"],
            management_tips: vec![
                "Provide concrete automation tools",
                "Show how much time it saves",
            ],
            transformation_difficulty: 4,
            action_plan: "Pick one repetitive process and automate it end to end. Share the time saved.",
        },
        ArchetypeKey::PracticalTraditionalist => Archetype {
            key,
            name: "The Practical Traditionalist",
            description: "You value craftsmanship and proven methods. You are not against change but want hard evidence before investing.",
            color: "#f59e0b",
            risk: "May fall behind as the market standard shifts; skills risk becoming outdated.",
            opportunity: "Use AI to remove tedious tasks so you can focus on your expertise.",
            behaviors: vec!["Waits and sees", "Asks for evidence", "Relies on experience"],
            strengths: vec!["Deep domain knowledge", "Stability", "Realism"],
            challenges: vec!["Low digital readiness for change", "Scepticism"],
            management_tips: vec![
                "Give practical demos instead of theoretical training",
                "Pair with an Integrator",
            ],
            transformation_difficulty: 7,
            action_plan: "Start small. Use AI to prepare your work (e.g. research), not to replace it.",
        },
        ArchetypeKey::PragmaticBridge => Archetype {
            key,
            name: "The Pragmatic Bridge",
            description: "The ideal team player. You understand both fast innovators and careful adaptors, are digitally capable and bring calm to the transition.",
            color: "#0ea5e9",
            risk: "Can get squeezed trying to keep everyone happy.",
            opportunity: "Act as interpreter and mediator between IT and the work floor.",
            behaviors: vec!["Listens to both sides", "Seeks compromise", "Implements calmly"],
            strengths: vec!["Diplomacy", "Team cohesion", "Balance"],
            challenges: vec!["Sometimes self-effacing", "Can lack an outspoken vision"],
            management_tips: vec!["Deploy as team lead or coach", "Use to lower resistance"],
            transformation_difficulty: 3,
            action_plan: "Run knowledge sessions that turn innovation into practical steps for the team.",
        },
        ArchetypeKey::CollaborativePivot => Archetype {
            key,
            name: "The Collaborative Pivot",
            description: "A social person who moves with the group. If the team uses AI, you join in. You need some guidance but are open to growth.",
            color: "#84cc16",
            risk: "Depends on team culture; in a conservative team you will not move.",
            opportunity: "Create a lead group this person can join and be pulled along by.",
            behaviors: vec!["Asks for help", "Learns together", "Follows the leader"],
            strengths: vec!["Collaboration", "Teachability", "Loyalty"],
            challenges: vec!["Little own initiative", "Technical uncertainty"],
            management_tips: vec!["Pair with a buddy", "Reward group success"],
            transformation_difficulty: 5,
            action_plan: "Find an AI buddy in your team and do a first project together.",
        },
        ArchetypeKey::HesitantObserver => Archetype {
            key,
            name: "The Hesitant Observer",
            description: "You wait and see. You have little experience with AI yet and find it all somewhat daunting. You need safety and time.",
            color: "#fbbf24",
            risk: "Silent resistance; may withdraw from innovation.",
            opportunity: "With the right, safe guidance this can become a very loyal user.",
            behaviors: vec!["Questions the benefit", "Stays quiet in meetings", "Avoids new tools"],
            strengths: vec!["Reflection", "Caution"],
            challenges: vec!["Fear of the unknown", "Low digital skills"],
            management_tips: vec![
                "Do not apply pressure",
                "Focus on what's in it for them",
                "Simple tools first",
            ],
            transformation_difficulty: 8,
            action_plan: "Take a basic AI awareness course to dispel myths before starting with tools.",
        },
        ArchetypeKey::ResistantSkeptic => Archetype {
            key,
            name: "The Resistant Skeptic",
            description: "You feel threatened by AI and see it mainly as a risk to your job or to quality. Your resistance comes from concern, not unwillingness.",
            color: "#ef4444",
            risk: "Active resistance, a negative team atmosphere, undermining of implementation.",
            opportunity: "Once the fear is addressed, this person can become the sharpest critic and therefore a quality keeper.",
            behaviors: vec!["Voices open criticism", "Refuses to participate", "Highlights AI mistakes"],
            strengths: vec!["Critical thinking", "Protecting values"],
            challenges: vec!["High AI anxiety", "Entrenched patterns"],
            management_tips: vec![
                "Listen to the concerns and acknowledge them",
                "Guarantee job security and role",
                "Show that AI augments rather than replaces",
            ],
            transformation_difficulty: 10,
            action_plan: "Focus on psychological safety. Talk about your role and how your human qualities remain unique.",
        },
    }
}
