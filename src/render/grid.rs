use crate::document::CharacterPlacement;

/// Which placement wins when several target the same cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Later placements overwrite earlier ones (input order)
    #[default]
    Last,
    /// The first placement for a cell is kept
    First,
}

impl CollisionPolicy {
    /// Parse from string value
    ///
    /// Validation against the allowed values happens in the property reader.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "first" => Self::First,
            _ => Self::Last,
        }
    }
}

/// Where row y=0 is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// y=0 is the first printed line
    #[default]
    TopLeft,
    /// y=0 is the last printed line (y grows upward)
    BottomLeft,
}

impl Origin {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "bottom-left" => Self::BottomLeft,
            _ => Self::TopLeft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fill character for cells no placement targets
    pub blank: char,
    pub origin: Origin,
    pub collision: CollisionPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            blank: ' ',
            origin: Origin::default(),
            collision: CollisionPolicy::default(),
        }
    }
}

/// Dense character buffer sized to the bounding box of a placement set
///
/// Cells are stored row-major by grid coordinate; `origin` only affects
/// the order rows are printed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
    /// Cells that received at least one placement
    written: Vec<bool>,
    origin: Origin,
}

impl Grid {
    /// Build a grid just large enough to hold every placement
    ///
    /// An empty placement list yields a 0x0 grid.
    pub fn from_placements(placements: &[CharacterPlacement], options: &RenderOptions) -> Self {
        let width = placements
            .iter()
            .map(|p| p.x as usize + 1)
            .max()
            .unwrap_or(0);
        let height = placements
            .iter()
            .map(|p| p.y as usize + 1)
            .max()
            .unwrap_or(0);

        let mut cells = vec![options.blank; width * height];
        let mut written = vec![false; cells.len()];

        for placement in placements {
            let idx = placement.y as usize * width + placement.x as usize;
            if options.collision == CollisionPolicy::First && written[idx] {
                continue;
            }
            cells[idx] = placement.character;
            written[idx] = true;
        }

        tracing::debug!(
            "Grid {}x{} built from {} placements",
            width,
            height,
            placements.len()
        );

        Grid {
            width,
            height,
            cells,
            written,
            origin: options.origin,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Character at grid coordinate (x, y), or None when out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Number of cells that received a placement
    ///
    /// A placement whose glyph equals the blank character still counts.
    pub fn non_blank_count(&self) -> usize {
        self.written.iter().filter(|&&w| w).count()
    }

    /// Rows in print order
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let rows: Box<dyn Iterator<Item = usize>> = match self.origin {
            Origin::TopLeft => Box::new(0..self.height),
            Origin::BottomLeft => Box::new((0..self.height).rev()),
        };
        rows.map(move |y| {
            self.cells[y * self.width..(y + 1) * self.width]
                .iter()
                .collect()
        })
    }

    /// Serialize the grid: `height` lines of `width` characters joined by
    /// newlines, without a trailing newline
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}
