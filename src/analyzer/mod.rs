//! Descriptive queries over the cleaned movie table.
//!
//! Each query is independent and read-only; [`Analyzer::run_all`] evaluates
//! the fixed question set of the analysis and collects the answers into an
//! [`AnalysisReport`]. Queries fail fast: a year with no rows or a filter
//! that matches nothing surfaces an error instead of a default value.

use crate::error::{AnalysisError, Result};
use crate::types::AnalysisReport;
use crate::utils::{column_series, explode_tokens, numeric_column};
use polars::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Read-only query interface over a cleaned DataFrame.
pub struct Analyzer<'a> {
    df: &'a DataFrame,
}

impl<'a> Analyzer<'a> {
    pub fn new(df: &'a DataFrame) -> Self {
        Self { df }
    }

    /// Evaluate the fixed question set in order.
    pub fn run_all(&self) -> Result<AnalysisReport> {
        Ok(AnalysisReport {
            top_rated_title: self.top_rated_title()?,
            mean_revenue: self.mean_revenue()?,
            mean_revenue_2015_2017: self.mean_revenue_between(2015, 2017)?,
            movies_in_2016: self.movies_in_year(2016)?,
            nolan_movie_count: self.movies_by_director("Christopher Nolan")?,
            highly_rated_count: self.highly_rated_count(8.0)?,
            nolan_median_rating: self.median_rating_by_director("Christopher Nolan")?,
            best_year_by_mean_rating: self.best_year_by_mean_rating()?,
            movie_count_change_pct: self.movie_count_change_pct(2006, 2016)?,
            most_frequent_actor: self.most_frequent_actor()?,
            distinct_genre_count: self.distinct_genre_count()?,
        })
    }

    /// Title of the row with the maximum Rating. Ties go to the first
    /// occurrence in table order.
    pub fn top_rated_title(&self) -> Result<String> {
        let ratings = numeric_column(self.df, "Rating")?;
        let titles = column_series(self.df, "Title")?;
        let ra = ratings.f64()?;
        let ta = titles.str()?;

        let mut best: Option<(f64, String)> = None;
        for (rating, title) in ra.into_iter().zip(ta.into_iter()) {
            if let (Some(rating), Some(title)) = (rating, title) {
                let improves = match &best {
                    Some((max, _)) => rating > *max,
                    None => true,
                };
                if improves {
                    best = Some((rating, title.to_string()));
                }
            }
        }

        best.map(|(_, title)| title)
            .ok_or_else(|| AnalysisError::NoValidValues("Rating".to_string()))
    }

    /// Arithmetic mean of Revenue_(Millions) across all rows.
    pub fn mean_revenue(&self) -> Result<f64> {
        let revenue = numeric_column(self.df, "Revenue_(Millions)")?;
        revenue
            .mean()
            .ok_or_else(|| AnalysisError::NoValidValues("Revenue_(Millions)".to_string()))
    }

    /// Mean Revenue_(Millions) over rows with `from <= Year <= to`,
    /// inclusive on both ends.
    pub fn mean_revenue_between(&self, from: i64, to: i64) -> Result<f64> {
        let years = self.year_values()?;
        let revenue = numeric_column(self.df, "Revenue_(Millions)")?;
        let ra = revenue.f64()?;

        let mut sum = 0.0;
        let mut count = 0usize;
        for (year, rev) in years.iter().zip(ra.into_iter()) {
            if let (Some(year), Some(rev)) = (year, rev) {
                if (from..=to).contains(year) {
                    sum += rev;
                    count += 1;
                }
            }
        }

        if count == 0 {
            return Err(AnalysisError::NoValidValues("Revenue_(Millions)".to_string()));
        }
        Ok(sum / count as f64)
    }

    /// Number of rows with the given Year. A year with no rows is a lookup
    /// error, mirroring a group-by-then-get on a missing key.
    pub fn movies_in_year(&self, year: i64) -> Result<usize> {
        let years = self.year_values()?;
        let count = years.iter().filter(|y| **y == Some(year)).count();
        if count == 0 {
            return Err(AnalysisError::YearNotFound(year));
        }
        Ok(count)
    }

    /// Number of rows whose Director matches exactly.
    pub fn movies_by_director(&self, director: &str) -> Result<usize> {
        let directors = column_series(self.df, "Director")?;
        let da = directors.str()?;
        Ok(da.into_iter().filter(|d| *d == Some(director)).count())
    }

    /// Number of rows with Rating >= threshold (inclusive).
    pub fn highly_rated_count(&self, threshold: f64) -> Result<usize> {
        let ratings = numeric_column(self.df, "Rating")?;
        let ra = ratings.f64()?;
        Ok(ra.into_iter().flatten().filter(|r| *r >= threshold).count())
    }

    /// Median Rating among rows whose Director matches exactly.
    pub fn median_rating_by_director(&self, director: &str) -> Result<f64> {
        let directors = column_series(self.df, "Director")?;
        let ratings = numeric_column(self.df, "Rating")?;
        let da = directors.str()?;
        let ra = ratings.f64()?;

        let mut values: Vec<f64> = da
            .into_iter()
            .zip(ra.into_iter())
            .filter(|(d, _)| *d == Some(director))
            .filter_map(|(_, r)| r)
            .collect();

        if values.is_empty() {
            return Err(AnalysisError::NoValidValues("Rating".to_string()));
        }

        values.sort_by(|a, b| a.total_cmp(b));
        let n = values.len();
        let median = if n % 2 == 1 {
            values[n / 2]
        } else {
            (values[n / 2 - 1] + values[n / 2]) / 2.0
        };
        Ok(median)
    }

    /// The Year with the highest mean Rating. Exact ties resolve to the
    /// lowest year, which keeps the answer deterministic.
    pub fn best_year_by_mean_rating(&self) -> Result<i64> {
        let years = self.year_values()?;
        let ratings = numeric_column(self.df, "Rating")?;
        let ra = ratings.f64()?;

        let mut groups: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
        for (year, rating) in years.iter().zip(ra.into_iter()) {
            if let (Some(year), Some(rating)) = (year, rating) {
                let entry = groups.entry(*year).or_insert((0.0, 0));
                entry.0 += rating;
                entry.1 += 1;
            }
        }

        let mut best: Option<(i64, f64)> = None;
        for (year, (sum, count)) in &groups {
            let mean = sum / *count as f64;
            let improves = match best {
                Some((_, max)) => mean > max,
                None => true,
            };
            if improves {
                best = Some((*year, mean));
            }
        }

        best.map(|(year, _)| year)
            .ok_or_else(|| AnalysisError::NoValidValues("Year".to_string()))
    }

    /// Percentage change in row count between two years:
    /// `(count_to - count_from) / count_from * 100`.
    ///
    /// Either year having no rows propagates as [`AnalysisError::YearNotFound`],
    /// which also makes a division by zero unreachable.
    pub fn movie_count_change_pct(&self, from: i64, to: i64) -> Result<f64> {
        let count_from = self.movies_in_year(from)?;
        let count_to = self.movies_in_year(to)?;
        Ok((count_to as f64 - count_from as f64) / count_from as f64 * 100.0)
    }

    /// The most frequent individual actor after splitting each Actors cell
    /// on commas and trimming each token. Ties resolve to the token seen
    /// first in table order.
    pub fn most_frequent_actor(&self) -> Result<String> {
        let actors = column_series(self.df, "Actors")?;
        let tokens = explode_tokens(&actors)?;
        if tokens.is_empty() {
            return Err(AnalysisError::NoValidValues("Actors".to_string()));
        }

        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (idx, token) in tokens.iter().enumerate() {
            let entry = counts.entry(token.as_str()).or_insert((0, idx));
            entry.0 += 1;
        }

        let mut best: Option<(&str, usize, usize)> = None;
        for (token, (count, first_idx)) in &counts {
            let improves = match best {
                Some((_, max, best_idx)) => {
                    *count > max || (*count == max && *first_idx < best_idx)
                }
                None => true,
            };
            if improves {
                best = Some((*token, *count, *first_idx));
            }
        }

        best.map(|(token, _, _)| token.to_string())
            .ok_or_else(|| AnalysisError::NoValidValues("Actors".to_string()))
    }

    /// Number of distinct genre tokens after splitting each Genre cell on
    /// commas and trimming each token.
    pub fn distinct_genre_count(&self) -> Result<usize> {
        let genres = column_series(self.df, "Genre")?;
        let tokens = explode_tokens(&genres)?;
        let distinct: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
        Ok(distinct.len())
    }

    fn year_values(&self) -> Result<Vec<Option<i64>>> {
        let years = column_series(self.df, "Year")?.cast(&DataType::Int64)?;
        Ok(years.i64()?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_df() -> DataFrame {
        df![
            "Rank" => [1i64, 2, 3, 4, 5, 6],
            "Title" => [
                "Guardians of the Galaxy",
                "Prometheus",
                "Interstellar",
                "The Dark Knight",
                "Sing",
                "Moana",
            ],
            "Genre" => [
                "Action,Adventure,Sci-Fi",
                "Adventure,Mystery,Sci-Fi",
                "Adventure,Drama,Sci-Fi",
                "Action,Crime,Drama",
                "Animation,Comedy,Family",
                "Animation,Adventure,Comedy",
            ],
            "Director" => [
                "James Gunn",
                "Ridley Scott",
                "Christopher Nolan",
                "Christopher Nolan",
                "Christophe Lourdelet",
                "Ron Clements",
            ],
            "Actors" => [
                "Chris Pratt, Vin Diesel, Zoe Saldana",
                "Noomi Rapace, Michael Fassbender",
                "Matthew McConaughey, Anne Hathaway",
                "Christian Bale, Heath Ledger",
                "Matthew McConaughey, Reese Witherspoon",
                "Auli'i Cravalho, Dwayne Johnson",
            ],
            "Year" => [2014i64, 2012, 2014, 2008, 2016, 2016],
            "Runtime_(Minutes)" => [121i64, 124, 169, 152, 108, 107],
            "Rating" => [9.0, 7.0, 8.6, 9.0, 7.2, 7.7],
            "Votes" => [757074i64, 485820, 1047747, 1791916, 60545, 118151],
            "Revenue_(Millions)" => [333i64, 126, 188, 533, 270, 249],
            "Metascore" => [76i64, 65, 74, 82, 59, 81],
        ]
        .unwrap()
    }

    #[test]
    fn test_top_rated_title_tie_goes_to_first_occurrence() {
        // Guardians and The Dark Knight are both rated 9.0; first wins.
        let df = sample_df();
        let title = Analyzer::new(&df).top_rated_title().unwrap();
        assert_eq!(title, "Guardians of the Galaxy");
    }

    #[test]
    fn test_mean_revenue() {
        let df = sample_df();
        let mean = Analyzer::new(&df).mean_revenue().unwrap();
        let expected = (333.0 + 126.0 + 188.0 + 533.0 + 270.0 + 249.0) / 6.0;
        assert!((mean - expected).abs() < 1e-9);
    }

    #[test]
    fn test_mean_revenue_between_is_inclusive() {
        let df = sample_df();
        // Only the two 2016 rows fall in [2015, 2017].
        let mean = Analyzer::new(&df).mean_revenue_between(2015, 2017).unwrap();
        assert!((mean - (270.0 + 249.0) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_movies_in_year() {
        let df = sample_df();
        assert_eq!(Analyzer::new(&df).movies_in_year(2016).unwrap(), 2);
        assert_eq!(Analyzer::new(&df).movies_in_year(2014).unwrap(), 2);
    }

    #[test]
    fn test_movies_in_missing_year_is_an_error() {
        let df = sample_df();
        let err = Analyzer::new(&df).movies_in_year(1999).unwrap_err();
        assert_eq!(err.error_code(), "YEAR_NOT_FOUND");
    }

    #[test]
    fn test_movies_by_director_exact_match() {
        let df = sample_df();
        assert_eq!(
            Analyzer::new(&df)
                .movies_by_director("Christopher Nolan")
                .unwrap(),
            2
        );
        // "Christophe Lourdelet" must not match a prefix of the name.
        assert_eq!(
            Analyzer::new(&df).movies_by_director("Christophe").unwrap(),
            0
        );
    }

    #[test]
    fn test_highly_rated_count_boundary_is_inclusive() {
        let df = df![
            "Rating" => [8.1, 7.9, 8.0, 9.2],
        ]
        .unwrap();
        assert_eq!(Analyzer::new(&df).highly_rated_count(8.0).unwrap(), 3);
    }

    #[test]
    fn test_median_rating_even_count() {
        let df = sample_df();
        // Nolan ratings: [8.6, 9.0] -> 8.8
        let median = Analyzer::new(&df)
            .median_rating_by_director("Christopher Nolan")
            .unwrap();
        assert!((median - 8.8).abs() < 1e-9);
    }

    #[test]
    fn test_median_rating_unknown_director_is_an_error() {
        let df = sample_df();
        let err = Analyzer::new(&df)
            .median_rating_by_director("Wes Anderson")
            .unwrap_err();
        assert_eq!(err.error_code(), "NO_VALID_VALUES");
    }

    #[test]
    fn test_best_year_by_mean_rating() {
        let df = sample_df();
        // 2014: (9.0 + 8.6)/2 = 8.8; 2008: 9.0; 2012: 7.0; 2016: 7.45
        assert_eq!(Analyzer::new(&df).best_year_by_mean_rating().unwrap(), 2008);
    }

    #[test]
    fn test_best_year_tie_resolves_to_lowest_year() {
        let df = df![
            "Year" => [2010i64, 2012],
            "Rating" => [8.0, 8.0],
        ]
        .unwrap();
        assert_eq!(Analyzer::new(&df).best_year_by_mean_rating().unwrap(), 2010);
    }

    #[test]
    fn test_movie_count_change_pct() {
        let df = df![
            "Year" => [2006i64, 2006, 2006, 2006, 2016, 2016, 2016, 2016, 2016, 2016, 2016, 2016],
        ]
        .unwrap();
        // 4 -> 8 is a 100% increase.
        let pct = Analyzer::new(&df).movie_count_change_pct(2006, 2016).unwrap();
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_movie_count_change_pct_missing_year_propagates() {
        let df = df!["Year" => [2016i64, 2016]].unwrap();
        let err = Analyzer::new(&df)
            .movie_count_change_pct(2006, 2016)
            .unwrap_err();
        assert_eq!(err.error_code(), "YEAR_NOT_FOUND");
    }

    #[test]
    fn test_most_frequent_actor() {
        let df = sample_df();
        // Matthew McConaughey appears twice; everyone else once. Chris Pratt
        // is seen first, so a tie would go to him, but there is no tie here.
        assert_eq!(
            Analyzer::new(&df).most_frequent_actor().unwrap(),
            "Matthew McConaughey"
        );
    }

    #[test]
    fn test_most_frequent_actor_tie_goes_to_first_seen() {
        let df = df![
            "Actors" => ["Chris Pratt, Zoe Saldana", "Zoe Saldana, Chris Pratt"],
        ]
        .unwrap();
        // Both appear twice; Chris Pratt was encountered first.
        assert_eq!(
            Analyzer::new(&df).most_frequent_actor().unwrap(),
            "Chris Pratt"
        );
    }

    #[test]
    fn test_distinct_genre_count() {
        let df = df![
            "Genre" => ["Action,Adventure", "Adventure,Sci-Fi"],
        ]
        .unwrap();
        // Action, Adventure, Sci-Fi
        assert_eq!(Analyzer::new(&df).distinct_genre_count().unwrap(), 3);
    }

    #[test]
    fn test_run_all_produces_every_answer() {
        let df = sample_df();
        // The sample has no 2006 rows, so patch the question years via the
        // individual queries instead; run_all itself needs both years.
        let mut with_2006 = df.clone();
        let years = Series::new(
            "Year".into(),
            [2014i64, 2006, 2014, 2008, 2016, 2016].as_ref(),
        );
        with_2006.replace("Year", years).unwrap();

        let report = Analyzer::new(&with_2006).run_all().unwrap();
        assert_eq!(report.top_rated_title, "Guardians of the Galaxy");
        assert_eq!(report.movies_in_2016, 2);
        assert_eq!(report.distinct_genre_count, 9);
        assert!((report.movie_count_change_pct - 100.0).abs() < 1e-9);
    }
}
