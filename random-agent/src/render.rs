//! Text rendering of encoded Tetris observations

use anyhow::{anyhow, Result};
use games_tetris::{ShapeKind, COLS, OBS_LEN, ROWS};
use std::fmt::Write;

fn glyph(palette_index: u8) -> Result<char> {
    if palette_index == 0 {
        return Ok('.');
    }
    let kind = ShapeKind::from_index(usize::from(palette_index) - 1)
        .ok_or_else(|| anyhow!("unknown palette index {}", palette_index))?;
    Ok(match kind {
        ShapeKind::S => 'S',
        ShapeKind::Z => 'Z',
        ShapeKind::I => 'I',
        ShapeKind::O => 'O',
        ShapeKind::J => 'J',
        ShapeKind::L => 'L',
        ShapeKind::T => 'T',
    })
}

/// Board framed by walls, followed by the next piece and the score
pub fn render_frame(obs: &[u8]) -> Result<String> {
    if obs.len() != OBS_LEN {
        return Err(anyhow!("expected {} observation bytes, got {}", OBS_LEN, obs.len()));
    }

    let mut out = String::with_capacity((COLS + 3) * (ROWS + 3));
    for row in obs[..ROWS * COLS].chunks(COLS) {
        out.push('|');
        for &cell in row {
            out.push(glyph(cell)?);
        }
        out.push_str("|\n");
    }
    out.push('+');
    out.push_str(&"-".repeat(COLS));
    out.push_str("+\n");

    let next = glyph(obs[ROWS * COLS])?;
    let mut score = [0u8; 8];
    score.copy_from_slice(&obs[ROWS * COLS + 1..]);
    writeln!(out, "next: {}  score: {}", next, u64::from_le_bytes(score))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_obs() -> Vec<u8> {
        let mut obs = vec![0u8; ROWS * COLS];
        obs.push(ShapeKind::T.index() as u8 + 1);
        obs.extend_from_slice(&30u64.to_le_bytes());
        obs
    }

    #[test]
    fn test_render_empty_board() {
        let frame = render_frame(&empty_obs()).unwrap();
        let lines: Vec<&str> = frame.lines().collect();

        assert_eq!(lines.len(), ROWS + 2);
        assert_eq!(lines[0], "|..........|");
        assert_eq!(lines[ROWS], "+----------+");
        assert_eq!(lines[ROWS + 1], "next: T  score: 30");
    }

    #[test]
    fn test_render_cells() {
        let mut obs = empty_obs();
        obs[(ROWS - 1) * COLS] = ShapeKind::I.index() as u8 + 1;
        obs[(ROWS - 1) * COLS + 9] = ShapeKind::O.index() as u8 + 1;

        let frame = render_frame(&obs).unwrap();
        assert_eq!(frame.lines().nth(ROWS - 1), Some("|I........O|"));
    }

    #[test]
    fn test_render_rejects_bad_input() {
        assert!(render_frame(&[0; 3]).is_err());

        let mut obs = empty_obs();
        obs[0] = 42;
        assert!(render_frame(&obs).is_err());
    }
}
