use crate::assessment::answers::AnswerMap;
use crate::assessment::catalog::{QuestionCatalog, QuestionCategory, QuestionType};

use super::config::ScoringConfig;
use super::{ScoreContribution, ScoreDimension};

pub(crate) struct StyleTally {
    pub score: f64,
    pub process_score: u8,
    pub innovation_score: u8,
}

/// Adaptor/innovator balance over every style question. Unanswered
/// questions still count towards the maximum.
pub(crate) fn score_style(
    catalog: &QuestionCatalog,
    answers: &AnswerMap,
    config: &ScoringConfig,
    contributions: &mut Vec<ScoreContribution>,
) -> StyleTally {
    let mut question_count = 0usize;
    let mut raw = 0.0;
    let mut adaptor_points = 0.0;
    let mut innovator_points = 0.0;

    for question in catalog.in_category(QuestionCategory::Style) {
        question_count += 1;
        let Some(weight) = answers.number(&question.id) else {
            continue;
        };

        raw += weight;
        if weight < 0.0 {
            adaptor_points += weight.abs();
        } else {
            innovator_points += weight;
        }
        contributions.push(ScoreContribution {
            question_id: question.id.clone(),
            dimension: ScoreDimension::Style,
            points: weight,
            max_points: config.max_style_weight,
        });
    }

    let max = question_count as f64 * config.max_style_weight;
    if question_count == 0 || max.is_nan() || max <= 0.0 {
        return StyleTally {
            score: 0.0,
            process_score: 0,
            innovation_score: 0,
        };
    }

    let boosted = |points: f64| -> u8 {
        (points / max * 100.0 * config.style_boost)
            .round()
            .clamp(0.0, 100.0) as u8
    };

    StyleTally {
        score: (raw / max * 10.0).clamp(-10.0, 10.0),
        process_score: boosted(adaptor_points),
        innovation_score: boosted(innovator_points),
    }
}

/// Skill and attitude readiness over answered readiness and sentiment
/// questions, each worth 100 points.
pub(crate) fn score_readiness(
    catalog: &QuestionCatalog,
    answers: &AnswerMap,
    config: &ScoringConfig,
    contributions: &mut Vec<ScoreContribution>,
) -> f64 {
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    let relevant = catalog
        .in_category(QuestionCategory::Readiness)
        .chain(catalog.in_category(QuestionCategory::Sentiment));

    for question in relevant {
        let Some(value) = answers.number(&question.id) else {
            continue;
        };

        let points = if config.is_inverse_readiness(&question.id) {
            (6.0 - value) * 20.0
        } else {
            match question.question_type {
                QuestionType::Scale => (value - 1.0) * 25.0,
                QuestionType::Select | QuestionType::Slider => value,
                QuestionType::Text | QuestionType::Scenario => continue,
            }
        };

        numerator += points;
        denominator += 100.0;
        contributions.push(ScoreContribution {
            question_id: question.id.clone(),
            dimension: ScoreDimension::Readiness,
            points,
            max_points: 100.0,
        });
    }

    if denominator == 0.0 {
        return config.neutral_score;
    }
    (numerator / denominator * 100.0).clamp(0.0, 100.0)
}

/// Automation exposure of the role over answered exposure questions.
pub(crate) fn score_exposure(
    catalog: &QuestionCatalog,
    answers: &AnswerMap,
    config: &ScoringConfig,
    contributions: &mut Vec<ScoreContribution>,
) -> u8 {
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for question in catalog.in_category(QuestionCategory::Exposure) {
        let Some(value) = answers.number(&question.id) else {
            continue;
        };

        let points = if config.is_inverse_exposure(&question.id) {
            (6.0 - value) * 25.0
        } else if question.question_type == QuestionType::Slider {
            value
        } else {
            (value - 1.0) * 25.0
        };

        numerator += points;
        denominator += 100.0;
        contributions.push(ScoreContribution {
            question_id: question.id.clone(),
            dimension: ScoreDimension::Exposure,
            points,
            max_points: 100.0,
        });
    }

    if denominator == 0.0 {
        return config.neutral_score.round() as u8;
    }
    (numerator / denominator * 100.0).round().clamp(0.0, 100.0) as u8
}

pub(crate) fn score_sentiment(
    answers: &AnswerMap,
    config: &ScoringConfig,
    contributions: &mut Vec<ScoreContribution>,
) -> f64 {
    match answers.number(&config.excitement_id) {
        Some(excitement) => {
            let points = ((excitement - 1.0) * 25.0).clamp(0.0, 100.0);
            contributions.push(ScoreContribution {
                question_id: config.excitement_id.clone(),
                dimension: ScoreDimension::Sentiment,
                points,
                max_points: 100.0,
            });
            points
        }
        None => config.neutral_score,
    }
}

pub(crate) fn anxiety_raw(answers: &AnswerMap, config: &ScoringConfig) -> f64 {
    answers
        .number(&config.anxiety_id)
        .unwrap_or(config.default_anxiety)
}
