use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub fixtures: FixturePaths,
}

/// Locations of the seed files read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixturePaths {
    pub movies: PathBuf,
    pub directors: PathBuf,
    pub genres: PathBuf,
}

impl FixturePaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            movies: dir.join("movies.json"),
            directors: dir.join("directors.json"),
            genres: dir.join("genres.json"),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movie_catalog.db?mode=rwc".to_string());

        let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let defaults = FixturePaths::in_dir(&data_dir);
        let fixtures = FixturePaths {
            movies: std::env::var_os("MOVIES_PATH").map(PathBuf::from).unwrap_or(defaults.movies),
            directors: std::env::var_os("DIRECTORS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.directors),
            genres: std::env::var_os("GENRES_PATH").map(PathBuf::from).unwrap_or(defaults.genres),
        };

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            fixtures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_paths_follow_data_dir() {
        let paths = FixturePaths::in_dir("/srv/catalog");
        assert_eq!(paths.movies, PathBuf::from("/srv/catalog/movies.json"));
        assert_eq!(paths.directors, PathBuf::from("/srv/catalog/directors.json"));
        assert_eq!(paths.genres, PathBuf::from("/srv/catalog/genres.json"));
    }
}
