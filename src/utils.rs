use std::io;
use std::path::{Path, PathBuf};

const CACHE_DIR_NAME: &str = "ec_climate_cache";

pub(crate) fn get_cache_dir() -> Result<PathBuf, io::Error> {
    dirs::cache_dir()
        .map(|p| p.join(CACHE_DIR_NAME))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine system cache directory",
            )
        })
}

pub(crate) fn ensure_cache_dir_exists(path: &Path) -> Result<(), io::Error> {
    std::fs::create_dir_all(path)
}
