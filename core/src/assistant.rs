//! The user-facing actions: recommend, save and ask.

use tracing::{info, warn};

use crate::client::TextGenerator;
use crate::errors::{GenerationResult, SessionError};
use crate::prompt::{build_question_prompt, build_recommendation_prompt};
use crate::selection::{GenreSelection, YearRange};
use crate::session::{HistoryEntry, Recommendation, Session};

/// Drives the generation service on behalf of one or more sessions.
///
/// Holds no session state itself; handlers take the [`Session`] they act on.
pub struct RecommendationAssistant<G> {
    generator: G,
}

impl<G: TextGenerator> RecommendationAssistant<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// The "generate recommendations" action.
    ///
    /// An empty selection is rejected without calling the service. A
    /// successful result becomes the session's pending recommendation; a
    /// failure clears it so an error message can never be saved.
    pub async fn recommend(
        &self,
        session: &mut Session,
        genres: &GenreSelection,
        years: YearRange,
    ) -> Result<GenerationResult, SessionError> {
        if genres.is_empty() {
            warn!("Recommendation requested with no genres selected");
            return Err(SessionError::EmptySelection);
        }

        info!(genres = %genres.joined(), %years, "Requesting recommendations");
        let prompt = build_recommendation_prompt(genres, years.min(), years.max());
        let result = self.generator.generate_text(&prompt).await;

        session.set_last_recommendation(result.as_ref().ok().map(|text| Recommendation {
            text: text.clone(),
            genres: genres.clone(),
            years,
        }));

        Ok(result)
    }

    /// The "save" action.
    pub fn save<'s>(&self, session: &'s mut Session) -> Result<&'s HistoryEntry, SessionError> {
        session.save_recommendation()
    }

    /// The "ask" action. Blank questions are rejected before any call.
    pub async fn ask(&self, question: &str) -> Result<GenerationResult, SessionError> {
        if question.trim().is_empty() {
            return Err(SessionError::EmptyQuestion);
        }

        info!(question_len = question.len(), "Asking free-form question");
        let prompt = build_question_prompt(question);
        Ok(self.generator.generate_text(&prompt).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GenerationError;
    use crate::selection::{default_selection, Genre};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records prompts and replays canned results in order.
    struct ScriptedGenerator {
        prompts: Mutex<Vec<String>>,
        replies: Mutex<Vec<GenerationResult>>,
    }

    impl ScriptedGenerator {
        fn new(replies: Vec<GenerationResult>) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                replies: Mutex::new(replies.into_iter().rev().collect()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate_text(&self, prompt: &str) -> GenerationResult {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(GenerationError::Transport("script exhausted".into())))
        }
    }

    #[tokio::test]
    async fn empty_selection_skips_generation() {
        let assistant = RecommendationAssistant::new(ScriptedGenerator::new(vec![]));
        let mut session = Session::new();

        let outcome = assistant
            .recommend(&mut session, &GenreSelection::new(), YearRange::default())
            .await;

        assert_eq!(outcome.unwrap_err(), SessionError::EmptySelection);
        assert!(assistant.generator().prompts().is_empty());
        assert!(session.history().is_empty());
        assert!(session.last_recommendation().is_none());
    }

    #[tokio::test]
    async fn recommend_sends_rendered_prompt() {
        let assistant =
            RecommendationAssistant::new(ScriptedGenerator::new(vec![Ok("## Películas".into())]));
        let mut session = Session::new();
        let years = YearRange::new(1990, 2020).unwrap();

        let result = assistant
            .recommend(&mut session, &default_selection(), years)
            .await
            .unwrap();

        assert_eq!(result.unwrap(), "## Películas");
        let prompts = assistant.generator().prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Comedia, Sci-Fi"));
        assert!(prompts[0].contains("1990") && prompts[0].contains("2020"));
        // Generating does not save.
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn two_generations_saved_in_call_order() {
        let assistant = RecommendationAssistant::new(ScriptedGenerator::new(vec![
            Ok("primera".into()),
            Ok("segunda".into()),
        ]));
        let mut session = Session::new();
        let drama: GenreSelection = [Genre::Drama].into_iter().collect();

        assistant
            .recommend(&mut session, &default_selection(), YearRange::default())
            .await
            .unwrap()
            .unwrap();
        assistant.save(&mut session).unwrap();
        assistant
            .recommend(&mut session, &drama, YearRange::new(1970, 1980).unwrap())
            .await
            .unwrap()
            .unwrap();
        assistant.save(&mut session).unwrap();

        let entries = session.history().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].recommendation.text, "primera");
        assert_eq!(entries[1].recommendation.text, "segunda");
        assert_eq!(entries[1].recommendation.genres, drama);
        assert_eq!(entries[1].recommendation.years.min(), 1970);
    }

    #[tokio::test]
    async fn failed_generation_is_not_saveable() {
        let assistant = RecommendationAssistant::new(ScriptedGenerator::new(vec![
            Ok("buena".into()),
            Err(GenerationError::Http {
                status_code: 403,
                message: "forbidden".into(),
            }),
        ]));
        let mut session = Session::new();

        assistant
            .recommend(&mut session, &default_selection(), YearRange::default())
            .await
            .unwrap()
            .unwrap();
        let failed = assistant
            .recommend(&mut session, &default_selection(), YearRange::default())
            .await
            .unwrap();

        assert!(failed.is_err());
        assert_eq!(
            assistant.save(&mut session).unwrap_err(),
            SessionError::NothingToSave
        );
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn blank_question_is_rejected() {
        let assistant = RecommendationAssistant::new(ScriptedGenerator::new(vec![]));

        assert_eq!(
            assistant.ask("   ").await.unwrap_err(),
            SessionError::EmptyQuestion
        );
        assert!(assistant.generator().prompts().is_empty());
    }

    #[tokio::test]
    async fn ask_wraps_question() {
        let assistant =
            RecommendationAssistant::new(ScriptedGenerator::new(vec![Ok("🎬 Respuesta".into())]));

        let answer = assistant
            .ask("Explica el final de Inception")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(answer, "🎬 Respuesta");
        let prompts = assistant.generator().prompts();
        assert!(prompts[0].contains("Explica el final de Inception"));
        assert!(prompts[0].contains("experto en cine"));
    }
}
