use data_loader::Dataset;
use std::path::Path;
use std::time::Instant;

fn main() {
    let movies_path = Path::new("data/movies.csv");
    let ratings_path = Path::new("data/ratings.csv");

    println!("Loading movies and ratings...\n");

    let start = Instant::now();
    let dataset = Dataset::load_from_files(movies_path, ratings_path)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (movies, ratings) = dataset.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Ratings: {}", ratings);
    println!("Orphan ratings: {}", dataset.orphan_rating_count());
    println!("\nPerformance: {:.0} ratings/second",
             ratings as f64 / elapsed.as_secs_f64());
}
