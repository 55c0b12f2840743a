//! Local copies of fetched CSV data

// standard library
use std::fs;
use std::path::{Path, PathBuf};

// external crates
use log::{debug, info, warn};

// ftools modules
use ftools_format::f;

// internal modules
use crate::error::Result;
use crate::fetch::{fetch_fission_yield_csv, fetch_ground_state_csv, DEFAULT_TIMEOUT};

/// Directory of previously fetched CSV files
///
/// Responses are stored exactly as received, under
///
/// - `<root>/base/base<query>.csv` for ground state data
/// - `<root>/fission/fission<parent>.csv` for independent fission yields
///
/// so a second run for the same nuclides needs no network access at all.
/// Files are only written once a request has succeeded.
///
/// ```rust, no_run
/// # use ftools_iaea::DataCache;
/// let cache = DataCache::new("./data").with_timeout(10);
/// let csv_text = cache.ground_state("137cs").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DataCache {
    root: PathBuf,
    timeout: u64,
}

impl DataCache {
    /// Cache rooted at `root`, created on first write
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Change the request timeout (s) used on a cache miss
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Request timeout (s)
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Location of the ground state file for `query`
    pub fn ground_state_path(&self, query: &str) -> PathBuf {
        self.root.join("base").join(f!("base{query}.csv"))
    }

    /// Location of the fission yield file for `parent`
    pub fn fission_yield_path(&self, parent: &str) -> PathBuf {
        self.root.join("fission").join(f!("fission{parent}.csv"))
    }

    /// Ground state CSV for `query`, fetched if not already cached
    pub fn ground_state(&self, query: &str) -> Result<String> {
        self.cached_or_fetch(&self.ground_state_path(query), || {
            fetch_ground_state_csv(query, self.timeout)
        })
    }

    /// Independent fission yield CSV for `parent`, fetched if not already cached
    pub fn fission_yields(&self, parent: &str) -> Result<String> {
        self.cached_or_fetch(&self.fission_yield_path(parent), || {
            fetch_fission_yield_csv(parent, self.timeout)
        })
    }

    /// Remove every cached file
    pub fn clear(&self) -> Result<()> {
        for directory in ["base", "fission"] {
            let path = self.root.join(directory);
            if path.is_dir() {
                info!("Removing {}", path.display());
                fs::remove_dir_all(path)?;
            }
        }
        Ok(())
    }

    fn cached_or_fetch<F>(&self, path: &Path, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        if path.is_file() {
            debug!("Reading {}", path.display());
            return Ok(fs::read_to_string(path)?);
        }

        let csv_text = fetch()?;
        if csv_text.trim().is_empty() {
            warn!("Empty response, {} not written", path.display());
            return Ok(csv_text);
        }

        // never leave a partial file behind
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let partial = path.with_extension("part");
        fs::write(&partial, &csv_text)?;
        fs::rename(&partial, path)?;
        debug!("Cached {}", path.display());

        Ok(csv_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn file_layout() {
        let cache = DataCache::new("/tmp/cache");
        assert_eq!(
            cache.ground_state_path("90sr"),
            PathBuf::from("/tmp/cache/base/base90sr.csv")
        );
        assert_eq!(
            cache.fission_yield_path("241pu"),
            PathBuf::from("/tmp/cache/fission/fission241pu.csv")
        );
        assert_eq!(cache.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn hits_never_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DataCache::new(dir.path());
        let path = cache.ground_state_path("90sr");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "z,n\n38,52\n").unwrap();

        let text = cache
            .cached_or_fetch(&path, || panic!("should not fetch"))
            .unwrap();
        assert_eq!(text, "z,n\n38,52\n");
    }

    #[test]
    fn misses_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DataCache::new(dir.path());
        let path = cache.fission_yield_path("235u");

        let text = cache
            .cached_or_fetch(&path, || Ok("z,a\n".to_string()))
            .unwrap();
        assert_eq!(text, "z,a\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "z,a\n");
        assert!(!path.with_extension("part").exists());
    }

    #[test]
    fn failures_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DataCache::new(dir.path());
        let path = cache.ground_state_path("90sr");

        let result = cache.cached_or_fetch(&path, || Err(Error::ParseError("offline".into())));
        assert!(result.is_err());
        assert!(!path.exists());

        cache.cached_or_fetch(&path, || Ok("  \n".into())).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DataCache::new(dir.path());
        cache
            .cached_or_fetch(&cache.ground_state_path("90sr"), || Ok("a".into()))
            .unwrap();
        cache
            .cached_or_fetch(&cache.fission_yield_path("235u"), || Ok("b".into()))
            .unwrap();

        cache.clear().unwrap();
        assert!(!dir.path().join("base").exists());
        assert!(!dir.path().join("fission").exists());

        // nothing to clear is fine
        cache.clear().unwrap();
    }
}
