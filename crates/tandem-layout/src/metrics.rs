use tandem_common::{GridSize, Rect};
use tandem_config::schema::TerminalConfig;

/// Character cell geometry of the terminal panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: f64,
    pub cell_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
}

impl CellMetrics {
    pub fn new(cell_width: f64, cell_height: f64, padding: f64) -> Self {
        Self {
            cell_width,
            cell_height,
            padding_x: padding,
            padding_y: padding,
        }
    }

    /// How many columns and rows fit in `area`, each at least 1.
    pub fn fit(&self, area: Rect) -> GridSize {
        let cells = |len: f64, pad: f64, cell: f64| -> u16 {
            let usable = (len - pad * 2.0).max(0.0);
            if !usable.is_finite() || !cell.is_finite() || cell <= 0.0 {
                return 1;
            }
            ((usable / cell).floor() as u16).max(1)
        };
        GridSize::new(
            cells(area.width, self.padding_x, self.cell_width),
            cells(area.height, self.padding_y, self.cell_height),
        )
    }
}

impl From<&TerminalConfig> for CellMetrics {
    fn from(config: &TerminalConfig) -> Self {
        Self::new(config.cell_width, config.cell_height, config.padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_subtracts_padding() {
        let m = CellMetrics::new(8.0, 16.0, 4.0);
        // (808 - 8) / 8 = 100, (408 - 8) / 16 = 25
        assert_eq!(m.fit(Rect::new(0.0, 0.0, 808.0, 408.0)), GridSize::new(100, 25));
    }

    #[test]
    fn fit_floors_partial_cells() {
        let m = CellMetrics::new(8.0, 16.0, 0.0);
        assert_eq!(m.fit(Rect::new(0.0, 0.0, 815.0, 31.0)), GridSize::new(101, 1));
    }

    #[test]
    fn fit_never_below_one() {
        let m = CellMetrics::new(8.0, 16.0, 4.0);
        assert_eq!(m.fit(Rect::zero()), GridSize::new(1, 1));
        assert_eq!(m.fit(Rect::new(0.0, 0.0, 5.0, 5.0)), GridSize::new(1, 1));
    }

    #[test]
    fn fit_saturates_huge_areas() {
        let m = CellMetrics::new(1.0, 1.0, 0.0);
        let g = m.fit(Rect::new(0.0, 0.0, 1e9, 1e9));
        assert_eq!(g, GridSize::new(u16::MAX, u16::MAX));
    }

    #[test]
    fn from_terminal_config() {
        let m = CellMetrics::from(&TerminalConfig::default());
        assert_eq!(m.cell_width, 8.0);
        assert_eq!(m.padding_y, 4.0);
    }
}
