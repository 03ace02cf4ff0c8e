//! Position - board snapshot stored as JSON
//!
//! ```json
//! { "size": 3, "to_move": "O", "rows": ["X . .", ". O .", ". . X"] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};
use crate::error::{HexError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub size: usize,
    /// Defaults to the side implied by the stone counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_move: Option<Player>,
    pub rows: Vec<String>,
}

impl Position {
    pub fn from_board(board: &Board) -> Self {
        let rows = (0..board.size())
            .map(|x| {
                board
                    .row(x)
                    .iter()
                    .map(|c| c.mark().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();

        Self {
            size: board.size(),
            to_move: Some(board.current_player()),
            rows,
        }
    }

    pub fn to_board(&self) -> Result<Board> {
        if self.rows.len() != self.size {
            return Err(HexError::RowCount {
                expected: self.size,
                found: self.rows.len(),
            });
        }
        let mut board = Board::from_rows(self.rows.as_slice())?;
        if let Some(player) = self.to_move {
            board.set_current_player(player);
        }
        Ok(board)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
