mod levenshtein;
mod operations;
mod strings;
mod utf8;
mod util;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
