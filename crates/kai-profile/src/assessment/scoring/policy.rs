use serde::{Deserialize, Serialize};

use crate::assessment::archetypes::ArchetypeKey;

/// Inputs the decision tree looks at; everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationInput {
    pub style_score: f64,
    pub readiness_score: f64,
    pub anxiety_raw: f64,
}

/// Which side of the adaptor/innovator scale a style score sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylePole {
    Innovator,
    Adaptor,
    Bridge,
}

impl StylePole {
    const THRESHOLD: f64 = 3.0;

    /// `None` for a non-finite score.
    pub fn of(style_score: f64) -> Option<Self> {
        if style_score > Self::THRESHOLD {
            Some(StylePole::Innovator)
        } else if style_score < -Self::THRESHOLD {
            Some(StylePole::Adaptor)
        } else if (-Self::THRESHOLD..=Self::THRESHOLD).contains(&style_score) {
            Some(StylePole::Bridge)
        } else {
            None
        }
    }
}

pub(crate) struct ClassificationRule {
    pub archetype: ArchetypeKey,
    pub applies: fn(&ClassificationInput) -> bool,
}

fn pole_is(input: &ClassificationInput, pole: StylePole) -> bool {
    StylePole::of(input.style_score) == Some(pole)
}

/// Ordered rules; the first one that applies decides the archetype.
pub(crate) const DECISION_TREE: &[ClassificationRule] = &[
    ClassificationRule {
        archetype: ArchetypeKey::ResistantSkeptic,
        applies: |input| input.anxiety_raw >= 4.0 && input.readiness_score < 50.0,
    },
    ClassificationRule {
        archetype: ArchetypeKey::VisionaryArchitect,
        applies: |input| pole_is(input, StylePole::Innovator) && input.readiness_score >= 80.0,
    },
    ClassificationRule {
        archetype: ArchetypeKey::StrategicIntegrator,
        applies: |input| pole_is(input, StylePole::Innovator) && input.readiness_score >= 50.0,
    },
    ClassificationRule {
        archetype: ArchetypeKey::CreativeExperimenter,
        applies: |input| pole_is(input, StylePole::Innovator),
    },
    ClassificationRule {
        archetype: ArchetypeKey::SystemGuardian,
        applies: |input| pole_is(input, StylePole::Adaptor) && input.readiness_score >= 80.0,
    },
    ClassificationRule {
        archetype: ArchetypeKey::ProcessOptimizer,
        applies: |input| pole_is(input, StylePole::Adaptor) && input.readiness_score >= 50.0,
    },
    ClassificationRule {
        archetype: ArchetypeKey::PracticalTraditionalist,
        applies: |input| pole_is(input, StylePole::Adaptor),
    },
    ClassificationRule {
        archetype: ArchetypeKey::PragmaticBridge,
        applies: |input| pole_is(input, StylePole::Bridge) && input.readiness_score >= 75.0,
    },
    ClassificationRule {
        archetype: ArchetypeKey::CollaborativePivot,
        applies: |input| pole_is(input, StylePole::Bridge) && input.readiness_score >= 40.0,
    },
    ClassificationRule {
        archetype: ArchetypeKey::HesitantObserver,
        applies: |input| pole_is(input, StylePole::Bridge),
    },
];

pub(crate) const FALLBACK_ARCHETYPE: ArchetypeKey = ArchetypeKey::PracticalTraditionalist;

pub fn classify(input: &ClassificationInput) -> ArchetypeKey {
    DECISION_TREE
        .iter()
        .find(|rule| (rule.applies)(input))
        .map(|rule| rule.archetype)
        .unwrap_or(FALLBACK_ARCHETYPE)
}
