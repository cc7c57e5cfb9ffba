//! Structured user input for the recommender: the genre vocabulary, an
//! ordered genre selection and a bounded year range.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed genre vocabulary offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Accion,
    Comedia,
    Drama,
    SciFi,
    Fantasia,
    Terror,
    Romance,
    Animacion,
    Documental,
    Thriller,
}

impl Genre {
    pub const ALL: [Genre; 10] = [
        Genre::Accion,
        Genre::Comedia,
        Genre::Drama,
        Genre::SciFi,
        Genre::Fantasia,
        Genre::Terror,
        Genre::Romance,
        Genre::Animacion,
        Genre::Documental,
        Genre::Thriller,
    ];

    /// Label used both on screen and inside prompts
    pub fn label(self) -> &'static str {
        match self {
            Genre::Accion => "Acción",
            Genre::Comedia => "Comedia",
            Genre::Drama => "Drama",
            Genre::SciFi => "Sci-Fi",
            Genre::Fantasia => "Fantasía",
            Genre::Terror => "Terror",
            Genre::Romance => "Romance",
            Genre::Animacion => "Animación",
            Genre::Documental => "Documental",
            Genre::Thriller => "Thriller",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = ConfigError;

    /// Case-insensitive; accent-free spellings ("accion", "scifi") are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Genre::ALL
            .iter()
            .copied()
            .find(|genre| normalize(genre.label()) == wanted)
            .ok_or_else(|| ConfigError::UnknownGenre(s.to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '-' && *c != ' ')
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' => 'u',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Genres chosen by the user, unique and in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreSelection {
    genres: Vec<Genre>,
}

impl GenreSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a genre; returns false if it was already selected.
    pub fn insert(&mut self, genre: Genre) -> bool {
        if self.genres.contains(&genre) {
            return false;
        }
        self.genres.push(genre);
        true
    }

    pub fn contains(&self, genre: Genre) -> bool {
        self.genres.contains(&genre)
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Genre> + '_ {
        self.genres.iter().copied()
    }

    /// Labels joined with ", " in selection order
    pub fn joined(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<Genre> for GenreSelection {
    fn from_iter<I: IntoIterator<Item = Genre>>(iter: I) -> Self {
        let mut selection = GenreSelection::new();
        for genre in iter {
            selection.insert(genre);
        }
        selection
    }
}

/// Initial selection offered when a session starts
pub fn default_selection() -> GenreSelection {
    [Genre::Comedia, Genre::SciFi].into_iter().collect()
}

/// Inclusive year range with `min <= max`, both within [`YearRange::LOWER`]..=[`YearRange::UPPER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    min: u16,
    max: u16,
}

impl YearRange {
    pub const LOWER: u16 = 1970;
    pub const UPPER: u16 = 2025;

    pub fn new(min: u16, max: u16) -> Result<Self, ConfigError> {
        if min > max || min < Self::LOWER || max > Self::UPPER {
            return Err(ConfigError::InvalidYearRange {
                min,
                max,
                lower: Self::LOWER,
                upper: Self::UPPER,
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u16 {
        self.min
    }

    pub fn max(&self) -> u16 {
        self.max
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: 1990,
            max: 2020,
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.min, self.max)
    }
}
