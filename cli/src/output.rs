use cinebot_core::{Genre, GenerationResult, HistoryEntry, YearRange};
use colored::*;
use pulldown_cmark::{CodeBlockKind, Event as MdEvent, HeadingLevel, Options, Parser as MdParser, Tag};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

pub fn print_banner() {
    println!("{}", "🎬 CineBot: Recomendador + Chat Cinéfilo".bright_cyan().bold());
    println!();
}

/// Output area of the recommender view
pub fn print_recommendations(result: &GenerationResult) {
    print_result(result);
}

/// Output area of the chat view
pub fn print_answer(result: &GenerationResult) {
    println!("{}", "Respuesta:".blue().bold());
    print_result(result);
}

fn print_result(result: &GenerationResult) {
    match result {
        Ok(text) => println!("{}", render_markdown(text)),
        // Shown where the response would have gone
        Err(e) => println!("{}", e.to_output().red()),
    }
}

/// Inline, non-fatal warning
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}

pub fn print_success(message: &str) {
    println!("{} {}", "✔".green().bold(), message.green());
}

pub fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        print_warning("El historial está vacío.");
        return;
    }

    println!("{}", "📜 Historial de Recomendaciones".bright_cyan().bold());
    for (idx, entry) in entries.iter().enumerate() {
        let rec = &entry.recommendation;
        println!(
            "\n{} {}",
            format!("Recomendación {}", idx + 1).bold(),
            format!(
                "({} · {} · {})",
                rec.genres.joined(),
                rec.years,
                entry.saved_at.format("%H:%M:%S")
            )
            .dimmed()
        );
        println!("{}", render_markdown(&rec.text));
    }
}

pub fn print_genres() {
    for genre in Genre::ALL {
        println!("  {} {}", "•".yellow(), genre);
    }
    println!(
        "{}",
        format!("Años disponibles: {}–{}", YearRange::LOWER, YearRange::UPPER).dimmed()
    );
}

/// Full source listing, highlighted as Rust
pub fn print_source(files: &[(&str, &str)]) {
    println!("{}", "📜 Código Fuente Completo".bright_cyan().bold());
    for (path, text) in files {
        println!("\n{}", path.cyan().bold());
        println!("{}", "─".repeat(60).dimmed());
        print!("{}", highlight_code(text, "rs"));
        println!("{}", "─".repeat(60).dimmed());
    }
}

/// Highlight `code` for a 24-bit terminal. Falls back to plain text when the
/// theme is unavailable.
pub fn highlight_code(code: &str, lang: &str) -> String {
    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();
    let Some(theme) = theme_set.themes.get("base16-ocean.dark") else {
        return code.to_string();
    };

    let syntax = if lang.is_empty() {
        syntax_set.find_syntax_plain_text()
    } else {
        syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| syntax_set.find_syntax_plain_text())
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut output = String::new();
    for line in LinesWithEndings::from(code) {
        match highlighter.highlight_line(line, &syntax_set) {
            Ok(ranges) => output.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
            Err(_) => output.push_str(line),
        }
    }
    // Reset colors left over from the last line
    output.push_str("\x1b[0m");
    output
}

/// Render model markdown for the terminal.
///
/// The model's output is trusted: HTML is passed through untouched.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut output = String::new();
    let mut bold = false;
    let mut italic = false;
    let mut heading = false;
    let mut quote = false;
    // None for bullet lists, Some(next number) for ordered lists
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut code_block: Option<(String, String)> = None;

    for event in MdParser::new_ext(markdown, options) {
        match event {
            MdEvent::Start(Tag::Heading(level, ..)) => {
                heading = true;
                ensure_blank_line(&mut output);
                let marker = match level {
                    HeadingLevel::H1 => "▍",
                    HeadingLevel::H2 => "▌",
                    _ => "▎",
                };
                output.push_str(&format!("{} ", marker.bright_cyan().bold()));
            }
            MdEvent::End(Tag::Heading(..)) => {
                heading = false;
                output.push('\n');
            }
            MdEvent::Start(Tag::Paragraph) => {
                if lists.is_empty() {
                    ensure_blank_line(&mut output);
                }
                if quote {
                    output.push_str(&format!("{} ", "│".dimmed()));
                }
            }
            MdEvent::End(Tag::Paragraph) => {
                if lists.is_empty() {
                    output.push('\n');
                }
            }
            MdEvent::Start(Tag::BlockQuote) => {
                quote = true;
                italic = true;
            }
            MdEvent::End(Tag::BlockQuote) => {
                quote = false;
                italic = false;
            }
            MdEvent::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code_block = Some((lang, String::new()));
            }
            MdEvent::End(Tag::CodeBlock(_)) => {
                if let Some((lang, content)) = code_block.take() {
                    ensure_line_start(&mut output);
                    output.push_str(&"─".repeat(40).dimmed().to_string());
                    output.push('\n');
                    output.push_str(&highlight_code(&content, &lang));
                    output.push_str(&"─".repeat(40).dimmed().to_string());
                    output.push('\n');
                }
            }
            MdEvent::Start(Tag::List(first)) => {
                if lists.is_empty() {
                    ensure_blank_line(&mut output);
                } else {
                    ensure_line_start(&mut output);
                }
                lists.push(first);
            }
            MdEvent::End(Tag::List(_)) => {
                lists.pop();
                ensure_line_start(&mut output);
            }
            MdEvent::Start(Tag::Item) => {
                ensure_line_start(&mut output);
                let depth = lists.len().saturating_sub(1);
                output.push_str(&"  ".repeat(depth));
                match lists.last_mut() {
                    Some(Some(n)) => {
                        output.push_str(&format!("{} ", format!("{}.", n).yellow()));
                        *n += 1;
                    }
                    _ => output.push_str(&format!("{} ", "•".yellow())),
                }
            }
            MdEvent::End(Tag::Item) => {
                ensure_line_start(&mut output);
            }
            MdEvent::Start(Tag::Emphasis) => italic = true,
            MdEvent::End(Tag::Emphasis) => italic = false,
            MdEvent::Start(Tag::Strong) => bold = true,
            MdEvent::End(Tag::Strong) => bold = false,
            MdEvent::End(Tag::Link(_, url, _)) => {
                output.push_str(&format!(" ({})", url.underline().blue()));
            }
            MdEvent::Code(code) => {
                output.push_str(&format!("{}", code.on_bright_black().white()));
            }
            MdEvent::Text(text) => {
                if let Some((_, content)) = code_block.as_mut() {
                    content.push_str(&text);
                } else {
                    output.push_str(&style_text(&text, bold || heading, italic));
                }
            }
            MdEvent::Html(html) => output.push_str(&html),
            MdEvent::TaskListMarker(done) => {
                output.push_str(if done { "[x] " } else { "[ ] " });
            }
            MdEvent::SoftBreak => output.push(' '),
            MdEvent::HardBreak => output.push('\n'),
            MdEvent::Rule => {
                ensure_line_start(&mut output);
                output.push_str(&"─".repeat(40).dimmed().to_string());
                output.push('\n');
            }
            _ => {}
        }
    }

    output.trim_end().to_string()
}

fn style_text(text: &str, bold: bool, italic: bool) -> String {
    let mut styled = text.normal();
    if bold {
        styled = styled.bold();
    }
    if italic {
        styled = styled.italic();
    }
    styled.to_string()
}

fn ensure_line_start(output: &mut String) {
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
}

fn ensure_blank_line(output: &mut String) {
    if output.is_empty() || output.ends_with("\n\n") {
        return;
    }
    ensure_line_start(output);
    output.push('\n');
}
