// Source files embedded for the on-screen source view.
const SOURCES: &[(&str, &str)] = &[
    ("cli/src/main.rs", include_str!("main.rs")),
    ("cli/src/cli.rs", include_str!("cli.rs")),
    ("cli/src/app.rs", include_str!("app.rs")),
    ("cli/src/output.rs", include_str!("output.rs")),
    ("cli/src/logging.rs", include_str!("logging.rs")),
    ("cli/src/source.rs", include_str!("source.rs")),
    ("core/src/lib.rs", include_str!("../../core/src/lib.rs")),
    ("core/src/assistant.rs", include_str!("../../core/src/assistant.rs")),
    ("core/src/prompt.rs", include_str!("../../core/src/prompt.rs")),
    ("core/src/selection.rs", include_str!("../../core/src/selection.rs")),
    ("core/src/session.rs", include_str!("../../core/src/session.rs")),
    ("core/src/client.rs", include_str!("../../core/src/client.rs")),
    ("core/src/types.rs", include_str!("../../core/src/types.rs")),
    ("core/src/config.rs", include_str!("../../core/src/config.rs")),
    ("core/src/errors.rs", include_str!("../../core/src/errors.rs")),
];

/// The program's own source as `(path, text)` pairs.
pub fn source_listing() -> &'static [(&'static str, &'static str)] {
    SOURCES
}
