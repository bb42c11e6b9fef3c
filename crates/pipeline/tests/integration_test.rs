//! Integration tests for the pipeline.
//!
//! These tests run the feature builder, neighbor index and recommender
//! together over a small, realistic table.

use data_loader::{Dataset, Movie, MovieId, Rating};
use pipeline::{
    FeatureBuilder, GenreSearch, MatchOutcome, NeighborIndex, Recommender, TitleSearch,
    list_genres, movies_by_genre,
};

fn create_test_dataset() -> Dataset {
    let movies = vec![
        Movie::new(1, "Toy Story (1995)", "Adventure|Animation|Children|Comedy|Fantasy"),
        Movie::new(2, "Jumanji (1995)", "Adventure|Children|Fantasy"),
        Movie::new(3, "Grumpier Old Men (1995)", "Comedy|Romance"),
        Movie::new(4, "Heat (1995)", "Action|Crime|Thriller"),
        Movie::new(5, "Toy Story 2 (1999)", "Adventure|Animation|Children|Comedy|Fantasy"),
        Movie::new(6, "Spider-Man (2002)", "Action|Adventure|Sci-Fi|Thriller"),
        Movie::new(7, "Iron Man (2008)", "Action|Adventure|Sci-Fi"),
        Movie::new(8, "Obscure Short", "(no genres listed)"),
    ];

    let mut ratings = Vec::new();
    for value in [4.0, 5.0, 4.5] {
        ratings.push(Rating::new(1, value));
    }
    for value in [3.0, 3.5] {
        ratings.push(Rating::new(2, value));
    }
    ratings.push(Rating::new(3, 3.0));
    for value in [4.0, 4.5, 5.0] {
        ratings.push(Rating::new(4, value));
    }
    for value in [4.0, 4.5] {
        ratings.push(Rating::new(5, value));
    }
    ratings.push(Rating::new(6, 3.5));
    ratings.push(Rating::new(7, 4.0));
    // Movie 8 has no ratings

    Dataset::from_parts(movies, ratings).unwrap()
}

fn recommended_ids(outcome: &MatchOutcome) -> Vec<MovieId> {
    match outcome {
        MatchOutcome::Recommended { recommendations } => {
            recommendations.iter().map(|r| r.movie_id).collect()
        }
        other => panic!("expected recommendations, got {other:?}"),
    }
}

#[test]
fn test_feature_table_covers_every_movie() {
    let dataset = create_test_dataset();
    let table = FeatureBuilder::new()
        .build(dataset.movies(), dataset.ratings())
        .unwrap();

    assert_eq!(table.len(), dataset.movies().len());
    assert_eq!(table.genre_columns().len(), list_genres(dataset.movies()).len());

    for movie in dataset.movies() {
        let row = table.row(movie.id).unwrap();
        assert_eq!(row.values.len(), table.width());

        let flags: f64 = row.genre_flags().iter().sum();
        assert_eq!(flags, movie.genre_labels().len() as f64);
    }

    assert_eq!(table.row(8).unwrap().mean_rating(), 0.0);
    assert_eq!(table.row(1).unwrap().mean_rating(), 4.5);
}

#[test]
fn test_toy_story_recommends_its_sequel_first() {
    let dataset = create_test_dataset();
    let result = Recommender::default()
        .similar_to_title(dataset.movies(), dataset.ratings(), "toy story (1995)")
        .unwrap();

    let TitleSearch::Found(matches) = result else {
        panic!("Toy Story should match");
    };
    assert_eq!(matches.len(), 1);

    let ids = recommended_ids(&matches[0].outcome);
    assert_eq!(ids.len(), 4, "k = 5 leaves four recommendations");
    assert_eq!(ids[0], 5);
    assert!(!ids.contains(&1));
}

#[test]
fn test_every_match_gets_its_own_block() {
    let dataset = create_test_dataset();
    let result = Recommender::new(3)
        .similar_to_title(dataset.movies(), dataset.ratings(), "man")
        .unwrap();

    let TitleSearch::Found(matches) = result else {
        panic!("Spider-Man and Iron Man should match");
    };

    let matched: Vec<MovieId> = matches.iter().map(|m| m.movie_id).collect();
    assert_eq!(matched, vec![6, 7]);

    for block in &matches {
        let ids = recommended_ids(&block.outcome);
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&block.movie_id));
    }
}

#[test]
fn test_index_is_deterministic() {
    let dataset = create_test_dataset();
    let table = FeatureBuilder::new()
        .build(dataset.movies(), dataset.ratings())
        .unwrap();
    let index = NeighborIndex::fit(&table, table.len()).unwrap();

    let query = &table.row(3).unwrap().values;
    let first = index.kneighbors(query).unwrap();
    let second = index.kneighbors(query).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), table.len());
}

#[test]
fn test_genre_search() {
    let dataset = create_test_dataset();

    let GenreSearch::Found(comedies) = movies_by_genre(dataset.movies(), "comedy").unwrap() else {
        panic!("expected comedies");
    };
    let ids: Vec<MovieId> = comedies.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 3, 5]);

    assert_eq!(
        movies_by_genre(dataset.movies(), "Western").unwrap(),
        GenreSearch::NotFound
    );
}
