//! Paged API example: one sortable collection served page by page
//!
//! ```text
//! cargo run --example paged_api
//! curl 'http://127.0.0.1:3000/books?page=2&count=5&orderBy=year&desc=true'
//! ```

use std::sync::Arc;

use paged_source::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub rating: f64,
    pub added_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub internal_notes: String,
}

impl_sortable!(Book {
    id,
    title,
    author,
    year,
    rating,
    added_at as "addedAt",
});

fn catalog() -> Vec<Book> {
    let titles = [
        ("Dune", "Frank Herbert", 1965, 4.3),
        ("Neuromancer", "William Gibson", 1984, 3.9),
        ("The Left Hand of Darkness", "Ursula K. Le Guin", 1969, 4.1),
        ("Hyperion", "Dan Simmons", 1989, 4.2),
        ("Foundation", "Isaac Asimov", 1951, 4.2),
        ("Snow Crash", "Neal Stephenson", 1992, 4.0),
        ("The Dispossessed", "Ursula K. Le Guin", 1974, 4.2),
        ("Solaris", "Stanisław Lem", 1961, 4.0),
        ("Blindsight", "Peter Watts", 2006, 4.0),
        ("Anathem", "Neal Stephenson", 2008, 4.2),
        ("Ubik", "Philip K. Dick", 1969, 4.1),
        ("The Stars My Destination", "Alfred Bester", 1956, 4.1),
    ];

    titles
        .into_iter()
        .enumerate()
        .map(|(i, (title, author, year, rating))| Book {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: author.to_string(),
            year,
            rating,
            added_at: Utc::now() - chrono::Duration::days(i as i64),
            internal_notes: String::new(),
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("paged_source=debug,tower_http=debug")),
        )
        .init();

    let books = InMemorySource::from(catalog());

    // The same pipeline, called directly
    let newest = books
        .to_paged_result(Params::paged(1, 3).order_by_desc("year"))
        .select(|book: Book| format!("{} ({})", book.title, book.year))
        .await?;
    println!("📚 {} books, newest first:", newest.total);
    for line in &newest.data {
        println!("   {}", line);
    }

    let config = PagingConfig {
        max_count: Some(50),
        default_count: Some(5),
        stable_key: None,
    };

    let app = paged_router::<Book, _>("/books", Arc::new(books), config);

    println!("\n🌐 Try:");
    println!("   GET http://127.0.0.1:3000/books?page=1&count=5");
    println!("   GET http://127.0.0.1:3000/books?page=2&orderBy=rating&desc=true");
    println!("   GET http://127.0.0.1:3000/books?page=1&count=5&orderBy=internal_notes  (400)");

    serve(app, "127.0.0.1:3000").await
}
