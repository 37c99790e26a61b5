use companion_core::Personality;
use companion_memory::{Interaction, InteractionContext};

const GUIDELINES: &str = "Guidelines:
1. Be conversational and friendly while maintaining helpfulness
2. Show empathy and understanding when appropriate
3. Ask follow-up questions to show interest
4. Share insights and relevant information naturally
5. Admit when you're not sure about something";

/// Everything that goes into the system prompt besides the personality.
#[derive(Debug, Default)]
pub struct PromptLayers<'a> {
    pub context: Option<&'a InteractionContext>,
    pub memories: &'a [Interaction],
    pub enrichment: &'a str,
}

pub struct ContextAssembler;

impl ContextAssembler {
    /// Identity, guidelines, context record, recalled memories, outside information.
    ///
    /// Empty memory and enrichment layers are left out entirely.
    pub fn build_system_prompt(personality: &Personality, layers: &PromptLayers<'_>) -> String {
        let mut sections = vec![personality.format_identity(), GUIDELINES.to_string()];

        if let Some(context) = layers.context {
            let rendered = serde_json::to_string_pretty(context).unwrap_or_else(|_| "{}".to_string());
            sections.push(format!("Context:\n{}", rendered));
        }

        if !layers.memories.is_empty() {
            let lines = layers
                .memories
                .iter()
                .map(|m| format!("- User: {} | AI: {}", m.user_input(), m.ai_response()))
                .collect::<Vec<_>>()
                .join("\n");
            sections.push(format!("Things you remember from earlier conversations:\n{}", lines));
        }

        if !layers.enrichment.is_empty() {
            sections.push(format!(
                "Relevant information from the web:\n{}",
                layers.enrichment
            ));
        }

        sections.push("Please respond to the user's input.".to_string());
        sections.join("\n\n")
    }

    /// The single user message: rendered recent history plus the new input.
    pub fn build_user_message(recent_context: &str, user_input: &str) -> String {
        format!("Previous conversation:\n{}\n\nUser: {}", recent_context, user_input)
    }
}
