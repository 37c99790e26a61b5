use crate::{
    api_types::Message,
    commands::Command,
    enrichment::{self, Enrichment},
    llm::{CompletionParams, LlmClient},
    prompts::{ContextAssembler, PromptLayers},
};
use chrono::Utc;
use companion_core::{CompanionConfig, Personality, SearchTriggers, TopicRegistry, UserPreferences};
use companion_memory::{ConversationMemory, InteractionContext};
use serde_json::Value;

/// Leading character that turns input into a slash-command.
pub const COMMAND_PREFIX: char = '/';

/// The response orchestrator.
///
/// Owns the conversation memory and user preferences for one session. Each
/// [`generate_response`](Self::generate_response) call either short-circuits
/// into a command or runs the whole prompt → completion → record pipeline.
pub struct CompanionEngine {
    personality: Personality,
    memory: ConversationMemory,
    preferences: UserPreferences,
    topics: TopicRegistry,
    triggers: SearchTriggers,
    client: Box<dyn LlmClient>,
    enrichment: Option<Box<dyn Enrichment>>,
    params: CompletionParams,
    recent_context_messages: usize,
    relevant_memory_limit: usize,
}

impl CompanionEngine {
    pub fn new(personality: Personality, memory: ConversationMemory, client: Box<dyn LlmClient>) -> Self {
        Self {
            personality,
            memory,
            preferences: UserPreferences::new(),
            topics: TopicRegistry::default(),
            triggers: SearchTriggers::default(),
            client,
            enrichment: None,
            params: CompletionParams::default(),
            recent_context_messages: 5,
            relevant_memory_limit: 5,
        }
    }

    /// Build an engine wired from config: memory, registries and sampling params.
    pub fn from_config(
        config: &CompanionConfig,
        personality: Personality,
        client: Box<dyn LlmClient>,
    ) -> Self {
        let mut engine = Self::new(personality, ConversationMemory::new(&config.memory), client);
        engine.topics = config.topics.clone();
        engine.triggers = config.enrichment.clone();
        engine.params = CompletionParams::from(&config.llm);
        engine.recent_context_messages = config.memory.recent_context_messages;
        engine.relevant_memory_limit = config.memory.relevant_memory_limit;
        engine
    }

    pub fn with_enrichment(mut self, enrichment: Box<dyn Enrichment>) -> Self {
        self.enrichment = Some(enrichment);
        self
    }

    pub fn with_topics(mut self, topics: TopicRegistry) -> Self {
        self.topics = topics;
        self
    }

    pub fn with_triggers(mut self, triggers: SearchTriggers) -> Self {
        self.triggers = triggers;
        self
    }

    pub fn with_params(mut self, params: CompletionParams) -> Self {
        self.params = params;
        self
    }

    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    pub fn modify_personality(&mut self, new_traits: Option<Vec<String>>, new_style: Option<String>) {
        self.personality.modify(new_traits, new_style);
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut ConversationMemory {
        &mut self.memory
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn detect_topics(&self, text: &str) -> Vec<String> {
        self.topics.detect_topics(text)
    }

    pub fn needs_enrichment(&self, user_input: &str) -> bool {
        self.triggers.is_triggered(user_input)
    }

    /// Parse and run a slash-command (without its leading `/`).
    pub fn handle_command(&mut self, raw: &str) -> String {
        let command = Command::parse(raw);
        tracing::debug!("Command: {:?}", command);
        command.execute(&mut self.memory, &mut self.preferences)
    }

    /// Respond to one line of user input.
    ///
    /// Commands are answered directly. Everything else goes to the completion
    /// service; a failure there becomes an apology and nothing is recorded.
    pub async fn generate_response(
        &mut self,
        user_input: &str,
        additional_context: Option<InteractionContext>,
    ) -> String {
        if let Some(command) = user_input.strip_prefix(COMMAND_PREFIX) {
            return self.handle_command(command);
        }

        let recent_context = self.memory.get_recent_context(self.recent_context_messages);
        let context = self.build_context(user_input, additional_context);

        let enrichment_text = if self.needs_enrichment(user_input) {
            tracing::debug!("Input needs outside information, consulting enrichment source");
            enrichment::gather(self.enrichment.as_deref(), user_input).await
        } else {
            String::new()
        };

        let memories = self
            .memory
            .get_relevant_memories(user_input, self.relevant_memory_limit);
        let layers = PromptLayers {
            context: Some(&context),
            memories: &memories,
            enrichment: &enrichment_text,
        };
        let system_prompt = ContextAssembler::build_system_prompt(&self.personality, &layers);
        let user_message = ContextAssembler::build_user_message(&recent_context, user_input);

        tracing::debug!(
            "Calling completion service (system prompt {} chars, {} recalled memories)",
            system_prompt.len(),
            memories.len()
        );
        let response = match self
            .client
            .complete(&system_prompt, vec![Message::user(user_message)], self.params.clone())
            .await
        {
            Ok(response) => response.text(),
            Err(e) => {
                tracing::error!("Completion failed: {:#}", e);
                return format!("I apologize, but I encountered an error: {:#}", e);
            }
        };

        self.memory
            .add_interaction(user_input, &response, Some(context));
        response
    }

    /// Context record stored with the interaction and shown to the model.
    ///
    /// Caller-supplied fields win on key collisions.
    fn build_context(
        &self,
        user_input: &str,
        additional_context: Option<InteractionContext>,
    ) -> InteractionContext {
        let mut context = InteractionContext::new();
        context.insert(
            "timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        context.insert(
            "user_preferences".to_string(),
            self.preferences.to_json_value(),
        );
        context.insert(
            "detected_topics".to_string(),
            Value::from(self.detect_topics(user_input)),
        );
        if let Some(extra) = additional_context {
            context.extend(extra);
        }
        context
    }
}
