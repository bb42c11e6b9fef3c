//! Parser for the movies and ratings CSV files.
//!
//! - movies.csv: movieId,title,genres
//! - ratings.csv: movieId,rating (userId, timestamp and any other columns are ignored)
//!
//! Headers are mandatory. Required columns are checked before any record is
//! read so a wrong file produces a `MissingColumn` error rather than a
//! confusing per-record failure.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

const MOVIE_COLUMNS: [&str; 3] = ["movieId", "title", "genres"];
const RATING_COLUMNS: [&str; 2] = ["movieId", "rating"];

#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    title: String,
    #[serde(default)]
    genres: String,
}

#[derive(Debug, Deserialize)]
struct RatingRecord {
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    rating: f64,
}

/// Parse the movies file at `path`
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    read_movies(open_file(path)?, &file_label(path))
}

/// Parse the ratings file at `path`
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    read_ratings(open_file(path)?, &file_label(path))
}

/// Parse a movies table from any reader; `file` names the source in errors
pub fn read_movies<R: Read>(source: R, file: &str) -> Result<Vec<Movie>> {
    let mut reader = csv_reader(source);
    require_columns(&mut reader, file, &MOVIE_COLUMNS)?;

    let mut movies = Vec::new();
    for result in reader.deserialize::<MovieRecord>() {
        let record = result.map_err(|e| record_error(file, e))?;
        movies.push(Movie {
            id: record.movie_id,
            title: record.title,
            genres: record.genres,
        });
    }
    Ok(movies)
}

/// Parse a ratings table from any reader; `file` names the source in errors
pub fn read_ratings<R: Read>(source: R, file: &str) -> Result<Vec<Rating>> {
    let mut reader = csv_reader(source);
    require_columns(&mut reader, file, &RATING_COLUMNS)?;

    let mut ratings = Vec::new();
    for result in reader.deserialize::<RatingRecord>() {
        let record = result.map_err(|e| record_error(file, e))?;
        if !record.rating.is_finite() {
            return Err(DataLoadError::InvalidValue {
                field: "rating".to_string(),
                value: record.rating.to_string(),
            });
        }
        ratings.push(Rating {
            movie_id: record.movie_id,
            rating: record.rating,
        });
    }
    Ok(ratings)
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Short name of the file for error messages ("movies.csv")
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(source)
}

fn require_columns<R: Read>(
    reader: &mut csv::Reader<R>,
    file: &str,
    required: &[&str],
) -> Result<()> {
    let headers = reader.headers().map_err(|e| record_error(file, e))?;
    for column in required {
        if !headers.iter().any(|header| header == *column) {
            return Err(DataLoadError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Attach the line number when the CSV reader knows it
fn record_error(file: &str, err: csv::Error) -> DataLoadError {
    let line = err.position().map(|pos| pos.line() as usize);
    match line {
        Some(line) => DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason: err.to_string(),
        },
        None => DataLoadError::Csv {
            file: file.to_string(),
            source: err,
        },
    }
}
