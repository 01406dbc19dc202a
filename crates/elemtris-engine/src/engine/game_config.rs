use serde::{Deserialize, Serialize};

use crate::{ConfigError, PiecePosition};

/// Window layout the board is derived from.
///
/// The grid has `window_width / block_size` columns and
/// `window_height / block_size` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    pub window_width: u32,
    pub window_height: u32,
    pub block_size: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            window_width: 400,
            window_height: 800,
            block_size: 40,
        }
    }
}

impl Layout {
    #[must_use]
    pub fn columns(&self) -> usize {
        self.window_width.checked_div(self.block_size).unwrap_or(0) as usize
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.window_height.checked_div(self.block_size).unwrap_or(0) as usize
    }
}

/// Settings of a game session.
///
/// Every field has a default, so a config file only needs the values it
/// overrides:
///
/// ```
/// use elemtris_engine::GameConfig;
///
/// let json = r#"{ "layout": { "window_height": 400 } }"#;
/// let config: GameConfig = serde_json::from_str(json).unwrap();
/// assert_eq!((config.columns(), config.rows()), (10, 10));
/// assert_eq!(config.spawn, GameConfig::default().spawn);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub layout: Layout,
    /// Where new pieces appear (top-left corner of their bounding box).
    pub spawn: PiecePosition,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            spawn: PiecePosition::new(3, 0),
        }
    }
}

impl GameConfig {
    /// Config with a board of exactly `columns × rows` and the default spawn point.
    #[must_use]
    pub fn with_board(columns: u32, rows: u32) -> Self {
        Self {
            layout: Layout {
                window_width: columns,
                window_height: rows,
                block_size: 1,
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.layout.columns()
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.layout.rows()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        let (columns, rows) = (self.columns(), self.rows());
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyBoard { columns, rows });
        }
        let PiecePosition { x, y } = self.spawn;
        let inside = usize::try_from(x).is_ok_and(|x| x < columns)
            && usize::try_from(y).is_ok_and(|y| y < rows);
        if !inside {
            return Err(ConfigError::SpawnOutOfBounds {
                x,
                y,
                columns,
                rows,
            });
        }
        Ok(())
    }
}
