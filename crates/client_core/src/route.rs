use std::fmt;

use thiserror::Error;

/// Pages of the dashboard, addressed by the node port they talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Visualization {
        port: u16,
    },
    Transactions {
        port: u16,
        value: Option<String>,
        recipient: Option<String>,
    },
    Stake {
        port: u16,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid port segment {0:?}")]
    InvalidPort(String),
    #[error("unknown path {0:?}")]
    UnknownPath(String),
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let Some((port, rest)) = segments.split_first() else {
            return Err(RouteError::UnknownPath(path.to_string()));
        };
        let port = port
            .parse::<u16>()
            .map_err(|_| RouteError::InvalidPort((*port).to_string()))?;

        match rest {
            ["visualization"] => Ok(Route::Visualization { port }),
            ["stake"] => Ok(Route::Stake { port }),
            ["transactions", tail @ ..] if tail.len() <= 2 => Ok(Route::Transactions {
                port,
                value: tail.first().map(|v| (*v).to_string()),
                recipient: tail.get(1).map(|v| (*v).to_string()),
            }),
            _ => Err(RouteError::UnknownPath(path.to_string())),
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            Route::Visualization { port }
            | Route::Transactions { port, .. }
            | Route::Stake { port } => *port,
        }
    }

    pub fn title(&self) -> String {
        let page = match self {
            Route::Visualization { .. } => "Visualization",
            Route::Transactions { .. } => "Transactions",
            Route::Stake { .. } => "Stake Distribution",
        };
        format!("{} ROTRANS - {page}", self.port())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Visualization { port } => write!(f, "/{port}/visualization"),
            Route::Stake { port } => write!(f, "/{port}/stake"),
            Route::Transactions {
                port,
                value,
                recipient,
            } => {
                write!(f, "/{port}/transactions")?;
                if let Some(value) = value {
                    write!(f, "/{value}")?;
                    if let Some(recipient) = recipient {
                        write!(f, "/{recipient}")?;
                    }
                }
                Ok(())
            }
        }
    }
}
