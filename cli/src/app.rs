use anyhow::{Context, Result};
use cinebot_core::{
    default_selection, Genre, GenerationResult, GenreSelection, RecommendationAssistant, Session,
    TextGenerator, YearRange,
};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

use crate::output::{
    print_answer, print_banner, print_genres, print_history, print_recommendations, print_source,
    print_success, print_warning,
};
use crate::source::source_listing;

/// Values collected by the configuration step
#[derive(Debug, Clone)]
pub struct FormState {
    pub genres: GenreSelection,
    pub years: YearRange,
    pub show_source: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            genres: default_selection(),
            years: YearRange::default(),
            show_source: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Generate,
    Save,
    History,
    Ask,
    Configure,
    ToggleSource,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 7] = [
        MenuAction::Generate,
        MenuAction::Save,
        MenuAction::History,
        MenuAction::Ask,
        MenuAction::Configure,
        MenuAction::ToggleSource,
        MenuAction::Exit,
    ];

    fn label(self, form: &FormState) -> String {
        match self {
            MenuAction::Generate => "🎥 Recomendador · Generar Recomendaciones".to_string(),
            MenuAction::Save => "🎥 Recomendador · Guardar estas recomendaciones".to_string(),
            MenuAction::History => "🎥 Recomendador · Historial".to_string(),
            MenuAction::Ask => "💬 Chat Cinéfilo · Enviar Pregunta".to_string(),
            MenuAction::Configure => "⚙️  Configuración".to_string(),
            MenuAction::ToggleSource if form.show_source => "📄 Ocultar código fuente".to_string(),
            MenuAction::ToggleSource => "📄 Ver código fuente".to_string(),
            MenuAction::Exit => "Salir".to_string(),
        }
    }
}

/// Display a spinner while `work` runs
async fn with_spinner<F: Future>(message: &str, work: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));

    let output = work.await;
    spinner.finish_and_clear();
    output
}

/// Runs one interactive session. The session and its history end with this call.
pub async fn run_interactive<G: TextGenerator>(
    assistant: &RecommendationAssistant<G>,
    show_source: bool,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut session = Session::new();
    let mut form = FormState {
        show_source,
        ..FormState::default()
    };
    info!(session_id = %session.id, "Interactive session started");

    print_banner();
    configure(&theme, &mut form)?;

    loop {
        if form.show_source {
            print_source(source_listing());
        }

        println!(
            "\n{} {}",
            "🍿 Para tu combo".bold(),
            format!("{} ({})", form.genres.joined(), form.years).cyan()
        );

        let items: Vec<String> = MenuAction::ALL.iter().map(|a| a.label(&form)).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("¿Qué quieres hacer?")
            .items(&items)
            .default(0)
            .interact()
            .context("Failed to read menu selection")?;
        let action = MenuAction::ALL[choice];
        debug!(?action, "Menu action selected");

        match action {
            MenuAction::Generate => {
                recommend(assistant, &mut session, &form).await;
            }
            MenuAction::Save => match assistant.save(&mut session) {
                Ok(_) => print_success("¡Guardado en historial!"),
                Err(warning) => print_warning(&warning.to_string()),
            },
            MenuAction::History => print_history(session.history().entries()),
            MenuAction::Ask => {
                let question: String = Input::with_theme(&theme)
                    .with_prompt("Escribe tu pregunta (ej: 'Explica el final de Inception')")
                    .allow_empty(true)
                    .interact_text()
                    .context("Failed to read question")?;
                ask(assistant, &question).await;
            }
            MenuAction::Configure => configure(&theme, &mut form)?,
            MenuAction::ToggleSource => form.show_source = !form.show_source,
            MenuAction::Exit => break,
        }
    }

    info!(
        session_id = %session.id,
        started_at = %session.created_at,
        elapsed_secs = session.elapsed().num_seconds(),
        saved = session.history().len(),
        "Interactive session ended"
    );
    Ok(())
}

/// The configuration panel: genres and a validated year range.
fn configure(theme: &ColorfulTheme, form: &mut FormState) -> Result<()> {
    println!("{}", "⚙️  Configuración".bold());

    let labels: Vec<&str> = Genre::ALL.iter().map(|g| g.label()).collect();
    let checked: Vec<bool> = Genre::ALL.iter().map(|g| form.genres.contains(*g)).collect();
    let picked = MultiSelect::with_theme(theme)
        .with_prompt("Géneros favoritos (espacio para marcar)")
        .items(&labels)
        .defaults(&checked)
        .interact()
        .context("Failed to read genre selection")?;
    form.genres = picked.into_iter().map(|i| Genre::ALL[i]).collect();

    let min: u16 = Input::with_theme(theme)
        .with_prompt(format!("Año mínimo ({}-{})", YearRange::LOWER, YearRange::UPPER))
        .default(form.years.min())
        .validate_with(|year: &u16| -> Result<(), String> {
            YearRange::new(*year, YearRange::UPPER)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .context("Failed to read minimum year")?;

    let max: u16 = Input::with_theme(theme)
        .with_prompt(format!("Año máximo ({}-{})", min, YearRange::UPPER))
        .default(form.years.max().max(min))
        .validate_with(|year: &u16| -> Result<(), String> {
            YearRange::new(min, *year).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()
        .context("Failed to read maximum year")?;

    form.years = YearRange::new(min, max)?;
    Ok(())
}

async fn recommend<G: TextGenerator>(
    assistant: &RecommendationAssistant<G>,
    session: &mut Session,
    form: &FormState,
) {
    let outcome = with_spinner(
        "Buscando joyas cinematográficas...",
        assistant.recommend(session, &form.genres, form.years),
    )
    .await;

    match outcome {
        Ok(result) => print_recommendations(&result),
        Err(warning) => print_warning(&warning.to_string()),
    }
}

async fn ask<G: TextGenerator>(assistant: &RecommendationAssistant<G>, question: &str) {
    println!("{}", "💬 Pregúntame sobre cine".bold());
    match with_spinner("Pensando como un crítico...", assistant.ask(question)).await {
        Ok(result) => print_answer(&result),
        Err(warning) => print_warning(&warning.to_string()),
    }
}

/// Runs a single recommendation and prints it.
pub async fn run_recommend<G: TextGenerator>(
    assistant: &RecommendationAssistant<G>,
    genres: &[String],
    min_year: u16,
    max_year: u16,
) -> Result<GenerationResult> {
    let selection = genres
        .iter()
        .map(|g| g.parse::<Genre>())
        .collect::<Result<GenreSelection, _>>()
        .context("Invalid genre; run `cinebot genres` for the list")?;
    let years = YearRange::new(min_year, max_year)?;

    // One-shot: the session lives only for this call.
    let mut session = Session::new();
    let outcome = with_spinner(
        "Buscando joyas cinematográficas...",
        assistant.recommend(&mut session, &selection, years),
    )
    .await?;
    print_recommendations(&outcome);
    Ok(outcome)
}

/// Runs a single question and prints the answer.
pub async fn run_ask<G: TextGenerator>(
    assistant: &RecommendationAssistant<G>,
    question: &str,
) -> Result<GenerationResult> {
    let outcome = with_spinner("Pensando como un crítico...", assistant.ask(question)).await?;
    print_answer(&outcome);
    Ok(outcome)
}

pub fn run_genres() {
    print_genres();
}

pub fn run_source() {
    print_source(source_listing());
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cinebot_core::GenerationError;

    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate_text(&self, prompt: &str) -> GenerationResult {
            Ok(prompt.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl TextGenerator for Failing {
        async fn generate_text(&self, _prompt: &str) -> GenerationResult {
            Err(GenerationError::Transport("connection reset".into()))
        }
    }

    #[test]
    fn default_form_matches_initial_panel() {
        let form = FormState::default();
        assert_eq!(form.genres.joined(), "Comedia, Sci-Fi");
        assert_eq!(form.years, YearRange::new(1990, 2020).unwrap());
        assert!(!form.show_source);
    }

    #[test]
    fn toggle_label_follows_state() {
        let mut form = FormState::default();
        assert_eq!(MenuAction::ToggleSource.label(&form), "📄 Ver código fuente");
        form.show_source = true;
        assert_eq!(MenuAction::ToggleSource.label(&form), "📄 Ocultar código fuente");
    }

    #[tokio::test]
    async fn run_recommend_parses_genres() {
        let assistant = RecommendationAssistant::new(Echo);
        let outcome = run_recommend(
            &assistant,
            &["comedia".to_string(), "sci-fi".to_string()],
            1990,
            2020,
        )
        .await
        .unwrap();
        assert!(outcome.unwrap().contains("Comedia, Sci-Fi"));
    }

    #[tokio::test]
    async fn run_recommend_rejects_unknown_genre_and_bad_range() {
        let assistant = RecommendationAssistant::new(Echo);
        assert!(run_recommend(&assistant, &["western".to_string()], 1990, 2020)
            .await
            .is_err());
        assert!(run_recommend(&assistant, &["Drama".to_string()], 2020, 1990)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn run_ask_reports_failure_as_error_text() {
        let assistant = RecommendationAssistant::new(Failing);
        let outcome = run_ask(&assistant, "¿Quién dirigió Alien?").await.unwrap();
        assert!(cinebot_core::render_result(&outcome).starts_with("Error:"));
    }
}
