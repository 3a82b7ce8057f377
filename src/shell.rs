use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "chore",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Drive the app by pressing the numbered controls"
)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Press control #n, attaching a proof photo or video
    #[command(alias = "c")]
    Click {
        #[arg(value_parser = parse_slot)]
        slot: usize,
        proof: Option<PathBuf>,
    },
    /// Assign a bonus task through control #n
    Extra {
        #[arg(value_parser = parse_slot)]
        slot: usize,
        /// Bonus points, 1 to 10
        points: u32,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        title: Vec<String>,
    },
    /// Press control #n with text input
    Text {
        #[arg(value_parser = parse_slot)]
        slot: usize,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Press control #n and confirm
    Confirm {
        #[arg(value_parser = parse_slot)]
        slot: usize,
    },
    /// Open a page (checklist, home, approvals, child-today, child-report, ...)
    Go { route: String, child_id: Option<i64> },
    /// Print the screen again
    #[command(alias = "s")]
    Show,
    /// Exit
    #[command(aliases = ["q", "exit"])]
    Quit,
}

impl Command {
    /// `Ok(None)` for a blank line. `help` and usage mistakes come back as
    /// clap errors whose rendering is the text to show.
    pub fn parse(line: &str) -> Result<Option<Command>, clap::Error> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        Line::try_parse_from(line.split_whitespace()).map(|line| Some(line.command))
    }
}

fn parse_slot(word: &str) -> Result<usize, String> {
    word.trim_start_matches('#')
        .parse()
        .map_err(|_| format!("not a control number: {word}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn click_takes_an_optional_proof() {
        assert_eq!(
            Command::parse("click #3").unwrap(),
            Some(Command::Click {
                slot: 3,
                proof: None
            })
        );
        assert_eq!(
            Command::parse("c 1 /tmp/bed.jpg").unwrap(),
            Some(Command::Click {
                slot: 1,
                proof: Some(PathBuf::from("/tmp/bed.jpg"))
            })
        );
    }

    #[test]
    fn extra_keeps_every_title_word() {
        assert_eq!(
            Command::parse("extra 2 3 wash the car").unwrap(),
            Some(Command::Extra {
                slot: 2,
                points: 3,
                title: vec!["wash".to_string(), "the".to_string(), "car".to_string()]
            })
        );
        let err = Command::parse("extra 2 lots wash").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn go_parses_child_id() {
        assert_eq!(
            Command::parse("go child-report 5").unwrap(),
            Some(Command::Go {
                route: "child-report".to_string(),
                child_id: Some(5)
            })
        );
        assert!(Command::parse("go child-report five").is_err());
        assert_eq!(
            Command::parse("dance").unwrap_err().kind(),
            ErrorKind::InvalidSubcommand
        );
    }

    #[test]
    fn help_is_generated() {
        let err = Command::parse("help").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        let text = err.render().to_string();
        assert!(text.contains("click"));
        assert!(text.contains("Open a page"));
    }

    #[test]
    fn quit_has_short_forms() {
        assert_eq!(Command::parse("q").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    }
}
