//! Common test utilities and helpers

#![allow(dead_code)]

use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

/// Review and media tables of the media database
const SCHEMA: &str = r#"
    CREATE TABLE games  (id INTEGER PRIMARY KEY, title VARCHAR NOT NULL, rating REAL);
    CREATE TABLE movies (id INTEGER PRIMARY KEY, title VARCHAR NOT NULL, rating REAL);
    CREATE TABLE shows  (id INTEGER PRIMARY KEY, title VARCHAR NOT NULL, rating REAL);
    CREATE TABLE books  (id INTEGER PRIMARY KEY, title VARCHAR NOT NULL, rating REAL);

    CREATE TABLE game_reviews (
        user_id INTEGER NOT NULL,
        media_id INTEGER NOT NULL,
        rating REAL NOT NULL CHECK (rating BETWEEN 0.5 AND 5),
        PRIMARY KEY (user_id, media_id)
    );
    CREATE TABLE movie_reviews (
        user_id INTEGER NOT NULL,
        media_id INTEGER NOT NULL,
        rating REAL NOT NULL CHECK (rating BETWEEN 0.5 AND 5),
        PRIMARY KEY (user_id, media_id)
    );
    CREATE TABLE show_reviews (
        user_id INTEGER NOT NULL,
        media_id INTEGER NOT NULL,
        rating REAL NOT NULL CHECK (rating BETWEEN 0.5 AND 5),
        PRIMARY KEY (user_id, media_id)
    );
    CREATE TABLE book_reviews (
        user_id INTEGER NOT NULL,
        media_id INTEGER NOT NULL,
        rating REAL NOT NULL CHECK (rating BETWEEN 0.5 AND 5),
        PRIMARY KEY (user_id, media_id)
    );
"#;

/// Temporary media database; the directory is removed on drop
pub struct TestDb {
    pub path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    /// Create an empty database with the full schema
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("database.db");
        let conn = Connection::open(&path).expect("Failed to create test database");
        conn.execute_batch(SCHEMA).expect("Failed to create schema");
        Self { path, _dir: dir }
    }

    /// Run arbitrary SQL against the database
    pub fn exec(&self, sql: &str) {
        let conn = Connection::open(&self.path).unwrap();
        conn.execute_batch(sql).unwrap();
    }

    /// Insert a review into `{category}_reviews`
    pub fn review(&self, category: &str, user_id: i64, media_id: i64, rating: f64) {
        let conn = Connection::open(&self.path).unwrap();
        conn.execute(
            &format!(
                "INSERT INTO {}_reviews (user_id, media_id, rating) VALUES (?1, ?2, ?3)",
                category
            ),
            rusqlite::params![user_id, media_id, rating],
        )
        .unwrap();
    }

    /// Insert a media row into the category's media table
    pub fn media(&self, table: &str, id: i64, title: &str, rating: f64) {
        let conn = Connection::open(&self.path).unwrap();
        conn.execute(
            &format!(
                "INSERT INTO {} (id, title, rating) VALUES (?1, ?2, ?3)",
                table
            ),
            rusqlite::params![id, title, rating],
        )
        .unwrap();
    }
}

/// A small catalogue with two users and a third who only reviewed books
pub fn seeded_db() -> TestDb {
    let db = TestDb::new();

    db.media("books", 1, "Dune", 4.0);
    db.media("books", 2, "Emma", 2.0);
    db.media("movies", 2, "Heat", 3.0);
    db.media("games", 3, "Celeste", 4.5);
    db.media("shows", 9, "Dark", 4.0);

    db.review("book", 1, 1, 5.0);
    db.review("movie", 1, 2, 3.0);
    db.review("game", 2, 3, 4.0);
    db.review("show", 2, 9, 4.5);
    db.review("book", 2, 1, 3.5);
    db.review("book", 3, 2, 1.0);

    db
}
