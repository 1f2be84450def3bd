//! Fixed texts: the assistant persona, the crisis reply, and the crisis
//! resources list.

use serde::Serialize;

/// System framing sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are MindCare AI, a compassionate mental health support chatbot designed specifically for teenagers and young adults.

Guidelines:
- Be empathetic, warm, and non-judgmental
- Use age-appropriate language for teens
- Provide emotional support and validation
- Suggest healthy coping strategies when appropriate
- Encourage professional help when needed
- Never provide medical diagnoses or prescribe medications
- Keep responses conversational and supportive (150-200 words max)
- Always remind that you're a supportive companion, not a replacement for professional care

Remember: You're here to listen, support, and guide teens toward appropriate resources.";

/// Reply for any message containing a crisis phrase.
pub const CRISIS_RESPONSE: &str = "I'm really concerned about what you've shared. Your feelings are valid, but I want to make sure you're safe. Please reach out to a trusted adult, counselor, or contact:

🆘 National Suicide Prevention Lifeline: 988
📱 Crisis Text Line: Text HOME to 741741
🏥 Emergency: Call 911

You don't have to go through this alone. There are people who want to help you.";

/// Notice the chat route attaches when the crisis branch fired.
pub const CRISIS_NOTICE: &str =
    "Crisis resources have been provided. Please reach out for immediate help if needed.";

/// A hotline or service listed on the resources page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrisisResource {
    pub name: &'static str,
    pub contact: &'static str,
    pub description: &'static str,
}

pub const CRISIS_RESOURCES: &[CrisisResource] = &[
    CrisisResource {
        name: "988 Suicide & Crisis Lifeline",
        contact: "Call or text 988",
        description: "Free, confidential support 24/7 for people in distress.",
    },
    CrisisResource {
        name: "Crisis Text Line",
        contact: "Text HOME to 741741",
        description: "Text with a trained crisis counselor any time.",
    },
    CrisisResource {
        name: "Emergency Services",
        contact: "Call 911",
        description: "For immediate danger to yourself or someone else.",
    },
];
