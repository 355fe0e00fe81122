use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error at position {position}: {source}")]
    Xml {
        source: quick_xml::Error,
        position: usize,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("File {} does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("Output file directory {} does not exist and couldn't be created: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Loading JaCoCo report {} failed: {source}", path.display())]
    Load {
        path: PathBuf,
        source: Box<ConvertError>,
    },

    #[error("Transforming JaCoCo data to Cobertura failed: {0}")]
    Transform(String),

    #[error("Writing Cobertura report to {} failed: {source}", path.display())]
    Store {
        path: PathBuf,
        source: Box<ConvertError>,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
