use serde::Serialize;

pub const SYSTEM_PROMPT: &str = "\
    You are a CV assistant. You help the user improve their resume, write cover \
    letters, prepare for interviews and plan their career. \
    When a CV is provided, ground every suggestion in its content and refer to \
    sections by their titles. Do NOT invent employers, dates or qualifications. \
    Keep answers concise and use short paragraphs or bullet points.";

/// Shown in place of the CV when there is no current document.
pub const NO_DOCUMENT_NOTE: &str = "The user has no CV open. Answer in general terms.";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuickPrompt {
    pub title: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
}

pub static QUICK_PROMPTS: [QuickPrompt; 6] = [
    QuickPrompt {
        title: "Improve Summary",
        description: "Enhance your professional summary",
        prompt: "Help me improve my professional summary to make it more compelling and impactful.",
    },
    QuickPrompt {
        title: "Optimize Experience",
        description: "Better describe your work experience",
        prompt: "Help me rewrite my work experience descriptions to be more achievement-focused and impactful.",
    },
    QuickPrompt {
        title: "Skills Suggestions",
        description: "Get relevant skills recommendations",
        prompt: "Based on my experience, suggest additional skills I should add to my CV.",
    },
    QuickPrompt {
        title: "Cover Letter",
        description: "Generate a cover letter",
        prompt: "Help me write a compelling cover letter based on my CV.",
    },
    QuickPrompt {
        title: "Interview Prep",
        description: "Prepare for interviews",
        prompt: "Help me prepare for interviews based on my CV and experience.",
    },
    QuickPrompt {
        title: "Career Advice",
        description: "Get personalized career guidance",
        prompt: "Provide career advice based on my current CV and experience.",
    },
];
