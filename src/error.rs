use std::io;

pub type PathfoldResult<T> = Result<T, PathfoldError>;

#[derive(thiserror::Error, Debug)]
pub enum PathfoldError {
    #[error(transparent)]
    StdIo(#[from] io::Error),

    #[error(transparent)]
    TomlDeserialize(#[from] toml::de::Error),
}
