//! Prompt templates sent to the model.

use crate::selection::GenreSelection;

/// Asks for three films mixing `genres` released between the two years.
///
/// Callers reject an empty selection before getting here; an empty one still
/// renders, just with nothing between the words.
pub fn build_recommendation_prompt(genres: &GenreSelection, min_year: u16, max_year: u16) -> String {
    format!(
        "Recomienda 3 películas que mezclen los géneros {} \
         (entre {} y {}).\n\
         Incluye:\n\
         1. Título y año.\n\
         2. Breve reseña (sin spoilers).\n\
         3. Una curiosidad o dato interesante.\n\
         Formatea la respuesta en markdown.",
        genres.joined(),
        min_year,
        max_year
    )
}

/// Wraps a free-form question in the film-critic instruction.
pub fn build_question_prompt(question: &str) -> String {
    format!(
        "Responde como experto en cine: {}. \
         Sé conciso pero detallado. Usa emojis si es apropiado.",
        question
    )
}
