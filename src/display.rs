//! Terminal rendering of generation results.

use crate::error::AppError;
use crate::generator::{Generation, Team};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::Write;

const HEADER_COLOR: Color = Color::Cyan;
const TEAM_NUMBER_COLOR: Color = Color::Green;
const NAME_COLOR: Color = Color::AnsiValue(231);
const TAG_COLOR: Color = Color::DarkGrey;
const ERROR_COLOR: Color = Color::Red;

/// Renders a full generation result, including the labeled display
/// sets when a split was applied. Output is queued and flushed once to
/// avoid flicker on slow terminals.
pub fn render_generation<W: Write>(out: &mut W, generation: &Generation) -> Result<(), AppError> {
    queue!(
        out,
        SetForegroundColor(HEADER_COLOR),
        Print(format!("{}\n", generation.mode.label())),
        ResetColor,
    )?;

    match &generation.split {
        Some(sets) => {
            render_set(out, "Set 1", &sets.set1, 1)?;
            render_set(out, "Set 2", &sets.set2, sets.set1.len() + 1)?;
        }
        None => render_teams(out, &generation.teams, 1)?,
    }

    out.flush()?;
    Ok(())
}

/// Renders an error message in place of a team list.
pub fn render_error<W: Write>(out: &mut W, error: &AppError) -> Result<(), AppError> {
    queue!(
        out,
        SetForegroundColor(ERROR_COLOR),
        Print(format!("{error}\n")),
        ResetColor,
    )?;
    out.flush()?;
    Ok(())
}

fn render_set<W: Write>(
    out: &mut W,
    label: &str,
    teams: &[Team],
    first_number: usize,
) -> Result<(), AppError> {
    queue!(
        out,
        SetForegroundColor(HEADER_COLOR),
        Print(format!("\n{label}\n")),
        ResetColor,
    )?;
    render_teams(out, teams, first_number)
}

fn render_teams<W: Write>(
    out: &mut W,
    teams: &[Team],
    first_number: usize,
) -> Result<(), AppError> {
    for (offset, team) in teams.iter().enumerate() {
        let tag = if team.is_single() { "Single" } else { "Team" };
        queue!(
            out,
            SetForegroundColor(TEAM_NUMBER_COLOR),
            Print(format!("Team {:02}: ", first_number + offset)),
            SetForegroundColor(NAME_COLOR),
            Print(team.members.join("  &  ")),
            SetForegroundColor(TAG_COLOR),
            Print(format!("  [{tag}]\n")),
            ResetColor,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{PairingMode, SplitSets};

    fn team(a: &str, b: &str) -> Team {
        Team::pair(a.to_string(), b.to_string())
    }

    #[test]
    fn test_render_lists_every_team() {
        let generation = Generation {
            mode: PairingMode::FreeRandom,
            teams: vec![team("Alice", "Bob"), Team::single("Carol".to_string())],
            split: None,
        };

        let mut buffer = Vec::new();
        render_generation(&mut buffer, &generation).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.contains("Free random pairing"));
        assert!(output.contains("Team 01: Alice  &  Bob"));
        assert!(output.contains("Team 02: Carol"));
        assert!(output.contains("[Single]"));
    }

    #[test]
    fn test_render_split_sets_continue_numbering() {
        let generation = Generation {
            mode: PairingMode::ConfigMatch,
            teams: vec![team("X", "P"), team("Y", "Q")],
            split: Some(SplitSets {
                set1: vec![team("X", "P")],
                set2: vec![team("Y", "Q")],
            }),
        };

        let mut buffer = Vec::new();
        render_generation(&mut buffer, &generation).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.contains("Set 1"));
        assert!(output.contains("Set 2"));
        assert!(output.contains("Team 01: X  &  P"));
        assert!(output.contains("Team 02: Y  &  Q"));
    }

    #[test]
    fn test_render_error_includes_message() {
        let mut buffer = Vec::new();
        render_error(&mut buffer, &AppError::constraints_exhausted(1000)).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("1000 attempts"));
    }
}
