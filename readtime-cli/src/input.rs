use std::io::Read;
use std::path::PathBuf;

use derive_more::Display;

use crate::error::AppError;

const STDIN_ARG: &str = "-";

/// Where content is read from
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Source {
    #[display("<stdin>")]
    Stdin,
    #[display("{}", _0.display())]
    File(PathBuf),
}

impl Source {
    /// Maps file arguments to sources, reading standard input when there are none
    pub fn from_args(files: Vec<PathBuf>) -> Vec<Self> {
        if files.is_empty() {
            return vec![Self::Stdin];
        }

        files
            .into_iter()
            .map(|path| {
                if path.as_os_str() == STDIN_ARG {
                    Self::Stdin
                } else {
                    Self::File(path)
                }
            })
            .collect()
    }

    pub fn read(&self) -> Result<String, AppError> {
        let result = match self {
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text).map(|_| text)
            }
            Self::File(path) => std::fs::read_to_string(path),
        };

        result.map_err(|error| AppError::ReadInput {
            input: self.to_string(),
            error,
        })
    }
}
