use super::{Question, QuestionCategory, QuestionOption, QuestionType};
use crate::assessment::answers::AnswerValue;

/// Reduced question set used by the quick scan.
pub const QUICK_SCAN_IDS: &[&str] = &[
    "prof_name",
    "prof_email",
    "prof_role",
    "prof_industry",
    "exp_data",
    "exp_decision",
    "exp_creative",
    "style_reaction",
    "style_deadline",
    "read_freq",
    "read_learning",
    "sent_anxiety",
];

pub(super) fn standard_questions() -> Vec<Question> {
    use QuestionCategory::{Exposure, Profile, Readiness, Sentiment, Style};

    vec![
        // Profile & context
        text(
            "prof_name",
            "What is your full name?",
            Some("We use this to personalise your report."),
        ),
        text(
            "prof_email",
            "What is your work e-mail address?",
            Some("Your personal report and roadmap are sent here."),
        ),
        text(
            "prof_org_code",
            "Do you have an organisation code?",
            Some("Enter it if your employer invited you (e.g. DEMO2025). Otherwise leave this empty."),
        ),
        text(
            "prof_role",
            "What is your current job title?",
            Some("Used to match your task profile against market standards."),
        ),
        select(
            "prof_industry",
            Profile,
            "Which sector is your organisation active in?",
            &[
                ("Financial Services", "Finance"),
                ("Healthcare & Welfare", "Healthcare"),
                ("Technology & Software", "Tech"),
                ("Government & Public Sector", "Public"),
                ("Retail & E-commerce", "Retail"),
                ("Manufacturing & Industry", "Manufacturing"),
                ("Business Services", "Services"),
                ("Education & Research", "Education"),
                ("Creative Industry & Media", "Media"),
                ("Construction & Real Estate", "Construction"),
                ("Other", "Other"),
            ],
        ),
        select(
            "prof_dept",
            Profile,
            "Which department do you mainly work in?",
            &[
                ("Management & Board", "Management"),
                ("IT, Data & Engineering", "IT"),
                ("Marketing & Communication", "Marketing"),
                ("Sales & Account Management", "Sales"),
                ("HR & Recruitment", "HR"),
                ("Finance & Administration", "Finance"),
                ("Operations & Logistics", "Operations"),
                ("Legal, Risk & Compliance", "Legal"),
                ("R&D / Product Development", "R&D"),
                ("Customer Service / Support", "Support"),
            ],
        ),
        select(
            "prof_exp",
            Profile,
            "How many years of experience do you have in your current field?",
            &[
                ("Starter (0-2 years)", "Junior"),
                ("Professional (3-7 years)", "Medior"),
                ("Senior / Expert (8-15 years)", "Senior"),
                ("Veteran / Executive (15+ years)", "Executive"),
            ],
        ),
        select(
            "prof_org_size",
            Profile,
            "How large is your organisation?",
            &[
                ("Freelance / Sole trader", "Freelance"),
                ("Start-up / Scale-up (2-50)", "Small"),
                ("SME (51-250)", "Medium"),
                ("Corporate / Enterprise (250+)", "Enterprise"),
            ],
        ),
        // Exposure: how susceptible the role is to automation
        slider(
            "exp_data",
            Exposure,
            "What share of your time goes into processing, analysing or entering structured data?",
            Some("Think of spreadsheets, administration, generating reports, maintaining databases."),
        ),
        scale(
            "exp_text",
            Exposure,
            "How often do you write standard texts (e-mails, reports, notes) that follow a fixed format?",
            Some("Texts whose content varies but whose structure is predictable."),
        ),
        scale(
            "exp_decision",
            Exposure,
            "How complex is the decision making in your role?",
            Some("1 = I follow strict rules and protocols, 5 = I constantly weigh options under uncertainty"),
        ),
        scale(
            "exp_repetitive",
            Exposure,
            "How many of your daily tasks are repetitive and predictable?",
            Some("Tasks performed the same way every week. (1 = everything is unique, 5 = very repetitive)"),
        ),
        scale(
            "exp_creative",
            Exposure,
            "How often do you need creative solutions for unstructured problems?",
            Some("Problems without a standard playbook. (1 = never, 5 = daily)"),
        ),
        scale(
            "exp_physical",
            Exposure,
            "Does your work require physical interaction with the real world?",
            Some("E.g. building, bedside care, inspections, operating machinery. (1 = fully digital, 5 = fully physical)"),
        ),
        scale(
            "exp_human",
            Exposure,
            "How important are deep human empathy and emotional intelligence in your work?",
            Some("E.g. therapy, complex leadership, negotiation, mediation. (1 = not at all, 5 = crucial)"),
        ),
        // Cognitive style: adaptor (negative) versus innovator (positive)
        scenario(
            "style_reaction",
            "New software that changes your workflow is introduced unexpectedly. What is your first instinct?",
            ("I first look at how to fit it into my current way of working to limit risk.", -2),
            ("I dive straight in and look for old processes I can drop entirely.", 2),
        ),
        scenario(
            "style_deadline",
            "You are on a project with tight deadlines and an unforeseen problem appears.",
            ("I follow the agreed procedures closely to avoid mistakes.", -2),
            ("I look for a fast, unorthodox workaround, even if it bends the rules.", 2),
        ),
        scenario(
            "style_detail",
            "Where does your attention naturally go during projects?",
            ("Accuracy, details and perfecting the execution.", -1),
            ("The big picture and the vision; details come later.", 1),
        ),
        scenario(
            "style_consensus",
            "How do you operate in a group?",
            ("I create cohesion and consensus; I am the glue of the team.", -1),
            ("I challenge the status quo, even when that causes friction.", 1),
        ),
        scenario(
            "style_structure",
            "How do you relate to rules and structures?",
            ("I work best within clear frameworks and guidelines.", -2),
            ("Rules often feel limiting and I look for ways to improve or bypass them.", 2),
        ),
        scenario(
            "style_ideas",
            "When solving a problem, what do you prefer?",
            ("Three solutions that are guaranteed to work and are practical.", -2),
            ("Twenty wild ideas, of which maybe one works but is revolutionary.", 2),
        ),
        // Readiness: skills and tooling
        weighted_select(
            "read_freq",
            Readiness,
            "How often do you currently use generative AI tools (ChatGPT, Gemini, Copilot)?",
            &[
                ("Never / rarely", 0),
                ("Monthly (small experiments)", 30),
                ("Weekly (specific tasks)", 60),
                ("Daily (part of my work)", 100),
            ],
        ),
        weighted_select(
            "read_prompt",
            Readiness,
            "How do you rate your prompt engineering skills?",
            &[
                ("I do not know what that is", 0),
                ("Basic (I ask simple questions)", 40),
                ("Advanced (I give context and instructions)", 75),
                ("Expert (chain-of-thought, formatting, etc.)", 100),
            ],
        ),
        scale(
            "read_learning",
            Readiness,
            "How easily do you pick up new digital systems?",
            Some("1 = I need a lot of help, 5 = I figure it out myself and learn fast"),
        ),
        scale(
            "read_limits",
            Readiness,
            "I understand the limitations (such as hallucinations and bias) of current AI models well.",
            Some("Knowing what AI cannot do matters as much as knowing what it can."),
        ),
        scale(
            "read_ethics",
            Readiness,
            "I know the privacy and security rules for sharing company data with AI.",
            Some("Do you know what may go into a public model? (1 = no idea, 5 = fully informed)"),
        ),
        // Sentiment: anxiety and trust
        scale(
            "sent_anxiety",
            Sentiment,
            "I worry that AI will make my job or skills redundant.",
            None,
        ),
        scale(
            "sent_trust",
            Sentiment,
            "I trust that I can critically assess and improve AI output.",
            None,
        ),
        scale(
            "sent_excitement",
            Sentiment,
            "I see the rise of AI as a chance to make my work more enjoyable and valuable.",
            None,
        ),
        scale(
            "sent_pressure",
            Sentiment,
            "I feel pressure from my organisation or market to 'do something with AI' without knowing what.",
            None,
        ),
    ]
}

fn text(id: &str, text: &str, sub_text: Option<&str>) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        sub_text: sub_text.map(str::to_string),
        question_type: QuestionType::Text,
        category: QuestionCategory::Profile,
        options: Vec::new(),
    }
}

fn scale(id: &str, category: QuestionCategory, text: &str, sub_text: Option<&str>) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        sub_text: sub_text.map(str::to_string),
        question_type: QuestionType::Scale,
        category,
        options: Vec::new(),
    }
}

fn slider(id: &str, category: QuestionCategory, text: &str, sub_text: Option<&str>) -> Question {
    Question {
        question_type: QuestionType::Slider,
        ..scale(id, category, text, sub_text)
    }
}

fn select(id: &str, category: QuestionCategory, text: &str, options: &[(&str, &str)]) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        sub_text: None,
        question_type: QuestionType::Select,
        category,
        options: options
            .iter()
            .map(|(label, value)| QuestionOption {
                label: label.to_string(),
                value: AnswerValue::from(*value),
            })
            .collect(),
    }
}

fn weighted_select(
    id: &str,
    category: QuestionCategory,
    text: &str,
    options: &[(&str, i32)],
) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        sub_text: None,
        question_type: QuestionType::Select,
        category,
        options: options
            .iter()
            .map(|(label, value)| QuestionOption {
                label: label.to_string(),
                value: AnswerValue::from(*value),
            })
            .collect(),
    }
}

fn scenario(id: &str, text: &str, adaptor: (&str, i32), innovator: (&str, i32)) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        sub_text: None,
        question_type: QuestionType::Scenario,
        category: QuestionCategory::Style,
        options: [adaptor, innovator]
            .into_iter()
            .map(|(label, weight)| QuestionOption {
                label: label.to_string(),
                value: AnswerValue::from(weight),
            })
            .collect(),
    }
}
