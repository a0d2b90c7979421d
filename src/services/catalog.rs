/// Catalog store
///
/// Loads the movie catalog and the precomputed similarity matrix once at startup.
/// The two artifacts are co-indexed by position: row `i` of the matrix scores
/// catalog entry `i` against every other entry. Shapes are checked on load and
/// any mismatch is fatal.
use serde_json::{Map, Value};
use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::BufReader,
    path::Path,
};

use crate::{error::CatalogError, models::Movie};

/// Accepted id columns, in order of preference
pub const ID_FIELDS: [&str; 3] = ["movie_id", "id", "tmdbId"];

const TITLE_FIELD: &str = "title";

/// Ordered, immutable list of movies with a title lookup
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
    /// title -> index of its first occurrence
    positions: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut positions = HashMap::with_capacity(movies.len());
        for (index, movie) in movies.iter().enumerate() {
            positions.entry(movie.title.clone()).or_insert(index);
        }
        Self { movies, positions }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Index of the first movie with exactly this title
    pub fn position(&self, title: &str) -> Option<usize> {
        self.positions.get(title).copied()
    }

    pub fn find(&self, title: &str) -> Option<&Movie> {
        self.position(title).and_then(|index| self.get(index))
    }

    /// Case-insensitive substring match over titles, in catalog order
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Movie> + 'a {
        let needle = query.trim().to_lowercase();
        self.movies
            .iter()
            .filter(move |movie| movie.title.to_lowercase().contains(&needle))
    }
}

/// Square matrix of similarity scores, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds a matrix from rows, rejecting ragged rows and non-finite scores
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, CatalogError> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(CatalogError::RaggedRow {
                    row: row_index,
                    len: row.len(),
                    expected: size,
                });
            }
            if let Some(col) = row.iter().position(|score| !score.is_finite()) {
                return Err(CatalogError::NonFiniteScore {
                    row: row_index,
                    col,
                });
            }
            scores.extend(row);
        }

        Ok(Self { size, scores })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.size {
            return None;
        }
        let start = index * self.size;
        Some(&self.scores[start..start + self.size])
    }
}

/// The validated pair of catalog and similarity matrix.
///
/// Constructed once at startup and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    catalog: Catalog,
    similarity: SimilarityMatrix,
}

impl CatalogStore {
    /// Pairs a catalog with its matrix, failing if their sizes disagree
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> Result<Self, CatalogError> {
        if similarity.size() != catalog.len() {
            return Err(CatalogError::DimensionMismatch {
                rows: similarity.size(),
                cols: similarity.size(),
                catalog_len: catalog.len(),
            });
        }
        Ok(Self {
            catalog,
            similarity,
        })
    }

    /// Loads both artifacts from disk
    pub fn load(catalog_path: &Path, similarity_path: &Path) -> Result<Self, CatalogError> {
        let catalog = load_catalog(catalog_path)?;
        let similarity = load_similarity(similarity_path)?;
        let store = Self::new(catalog, similarity)?;

        tracing::info!(
            movies = store.catalog.len(),
            catalog_path = %catalog_path.display(),
            similarity_path = %similarity_path.display(),
            "Loaded catalog and similarity matrix"
        );

        Ok(store)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a catalog artifact in either records or column-oriented layout
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let value: Value = read_json(path)?;
    parse_catalog(value)
}

pub fn load_similarity(path: &Path) -> Result<SimilarityMatrix, CatalogError> {
    let rows: Vec<Vec<f64>> = read_json(path)?;
    SimilarityMatrix::from_rows(rows)
}

pub fn parse_catalog(value: Value) -> Result<Catalog, CatalogError> {
    let rows = match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(row) => Ok(row),
                _ => Err(CatalogError::UnsupportedLayout(format!(
                    "entry {} is not an object",
                    index
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Value::Object(columns) => columns_to_rows(columns)?,
        _ => {
            return Err(CatalogError::UnsupportedLayout(
                "expected an array of records or an object of columns".to_string(),
            ))
        }
    };

    let movies = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| movie_from_row(index, row))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::new(movies))
}

/// Pivots `{column: {row_key: value}}` (or `{column: [values]}`) into rows
/// ordered by numeric row key.
fn columns_to_rows(columns: Map<String, Value>) -> Result<Vec<Map<String, Value>>, CatalogError> {
    let mut rows: BTreeMap<usize, Map<String, Value>> = BTreeMap::new();

    for (column, cells) in columns {
        let cells: Vec<(usize, Value)> = match cells {
            Value::Object(cells) => cells
                .into_iter()
                .map(|(key, value)| {
                    key.parse::<usize>().map(|row| (row, value)).map_err(|_| {
                        CatalogError::UnsupportedLayout(format!(
                            "column {} has non-numeric row key {:?}",
                            column, key
                        ))
                    })
                })
                .collect::<Result<_, _>>()?,
            Value::Array(cells) => cells.into_iter().enumerate().collect(),
            _ => {
                return Err(CatalogError::UnsupportedLayout(format!(
                    "column {} is neither an object nor an array",
                    column
                )))
            }
        };

        for (row, value) in cells {
            rows.entry(row).or_default().insert(column.clone(), value);
        }
    }

    Ok(rows.into_values().collect())
}

fn movie_from_row(index: usize, mut row: Map<String, Value>) -> Result<Movie, CatalogError> {
    let title = match row.remove(TITLE_FIELD) {
        Some(Value::String(title)) => title,
        Some(Value::Number(number)) => number.to_string(),
        _ => {
            return Err(CatalogError::MissingField {
                index,
                field: TITLE_FIELD.to_string(),
            })
        }
    };

    // Every id column is taken out of the metadata so the canonical `id` is unambiguous
    let mut id = None;
    for field in ID_FIELDS {
        if let Some(value) = row.remove(field) {
            if id.is_none() && !value.is_null() {
                id = Some(parse_id(index, &value)?);
            }
        }
    }

    let id = id.ok_or_else(|| CatalogError::MissingField {
        index,
        field: ID_FIELDS.join("/"),
    })?;

    Ok(Movie {
        id,
        title,
        metadata: row.into_iter().collect(),
    })
}

fn parse_id(index: usize, value: &Value) -> Result<u64, CatalogError> {
    let parsed = match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(raw) => raw.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| CatalogError::InvalidId {
        index,
        value: value.to_string(),
    })
}
