//! Line-oriented commands read from stdin.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Stop or resume scheduled ticks
    TogglePause,
    Reload,
    Blank,
    /// Advance one generation, even while paused
    Step,
    /// Toggle the cell under display coordinates
    Click { px: f64, py: f64 },
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("unknown command '{0}' (try p, r, b, s, c <x> <y>, q)")]
    Unknown(String),

    #[error("click needs two coordinates")]
    MissingCoordinates,

    #[error("invalid coordinate '{0}'")]
    BadCoordinate(String),
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(None);
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "p" | "pause" => Command::TogglePause,
            "r" | "reload" => Command::Reload,
            "b" | "blank" => Command::Blank,
            "s" | "step" => Command::Step,
            "q" | "quit" | "exit" => Command::Quit,
            "c" | "click" => {
                let px = coordinate(words.next())?;
                let py = coordinate(words.next())?;
                Command::Click { px, py }
            }
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn coordinate(word: Option<&str>) -> Result<f64, ParseError> {
    let word = word.ok_or(ParseError::MissingCoordinates)?;
    word.parse()
        .map_err(|_| ParseError::BadCoordinate(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!(Command::parse("p").unwrap(), Some(Command::TogglePause));
        assert_eq!(Command::parse("  Reload ").unwrap(), Some(Command::Reload));
        assert_eq!(Command::parse("b").unwrap(), Some(Command::Blank));
        assert_eq!(Command::parse("step").unwrap(), Some(Command::Step));
        assert_eq!(Command::parse("q").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_click() {
        assert_eq!(
            Command::parse("c 12.5 40").unwrap(),
            Some(Command::Click { px: 12.5, py: 40.0 })
        );
        assert_eq!(
            Command::parse("click -3 7").unwrap(),
            Some(Command::Click { px: -3.0, py: 7.0 })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("c 1"), Err(ParseError::MissingCoordinates));
        assert_eq!(
            Command::parse("c one 2"),
            Err(ParseError::BadCoordinate("one".to_string()))
        );
        assert_eq!(
            Command::parse("zoom"),
            Err(ParseError::Unknown("zoom".to_string()))
        );
    }
}
