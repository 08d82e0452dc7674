//! Filesystem-backed JSON persistence for expense books.
//!
//! Each book is one pretty-printed JSON document under a data root. Writes
//! go through a temporary file and a rename, so an interrupted save never
//! leaves a half-written book behind.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use masruf_core::{storage::BookStorage, CoreError};
use masruf_domain::Book;

const BOOK_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each book as one JSON file named after its slug.
#[derive(Debug, Clone)]
pub struct JsonBookStorage {
    books_dir: PathBuf,
}

impl JsonBookStorage {
    pub fn new(books_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&books_dir)?;
        Ok(Self { books_dir })
    }

    pub fn book_path(&self, name: &str) -> PathBuf {
        self.books_dir
            .join(format!("{}.{}", canonical_name(name), BOOK_EXTENSION))
    }

    /// Loads `name`, or returns a fresh book with `initial_budget` when no
    /// file exists yet.
    pub fn load_or_default(&self, name: &str, initial_budget: f64) -> Result<Book, CoreError> {
        if self.book_exists(name) {
            self.load_book(name)
        } else {
            Ok(Book::new(name, initial_budget))
        }
    }

    pub fn list_books(&self) -> Result<Vec<String>, CoreError> {
        if !self.books_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.books_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(BOOK_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn delete_book(&self, name: &str) -> Result<(), CoreError> {
        let path = self.book_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl BookStorage for JsonBookStorage {
    fn save_book(&self, book: &Book) -> Result<(), CoreError> {
        let path = self.book_path(&book.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &serialize_book(book)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load_book(&self, name: &str) -> Result<Book, CoreError> {
        let path = self.book_path(name);
        if !path.exists() {
            return Err(CoreError::BookNotFound(name.to_string()));
        }
        let data = fs::read_to_string(&path)?;
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }

    fn book_exists(&self, name: &str) -> bool {
        self.book_path(name).exists()
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "book".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_book(book: &Book) -> Result<String, CoreError> {
    serde_json::to_string_pretty(book).map_err(|err| CoreError::Serde(err.to_string()))
}
