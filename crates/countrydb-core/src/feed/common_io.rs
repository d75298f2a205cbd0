// crates/countrydb-core/src/feed/common_io.rs
use crate::error::{CountryDbError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// Opens a feed file, buffers it and, for `.gz` files, wraps it in a Gzip
/// decoder. The caller doesn't care about the compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        CountryDbError::feed(path.display().to_string(), format!("cannot open: {e}"))
    })?;

    let reader = BufReader::new(file);

    if !is_gzip(path) {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(CountryDbError::feed(
            path.display().to_string(),
            "gzip input requires the 'compact' feature",
        ))
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_gzip_by_extension() {
        assert!(is_gzip(Path::new("data/countries.json.gz")));
        assert!(is_gzip(Path::new("COUNTRIES.JSON.GZ")));
        assert!(!is_gzip(Path::new("data/countries.json")));
    }

    #[test]
    fn missing_file_is_feed_unavailable() {
        let err = open_stream(Path::new("/definitely/not/here.json")).err().unwrap();
        assert!(matches!(err, CountryDbError::FeedUnavailable { .. }));
    }
}
